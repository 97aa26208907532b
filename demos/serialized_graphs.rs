//! Shows how `@Serialized:` expressions reconstruct shared object graphs.
//!
//! Run with: `cargo run --example serialized_graphs`

use framsreader::deserialize;

fn main() {
    // Every list/map registers in the reference table as it opens; ^N
    // aliases the N-th composite instead of copying it.
    let value = deserialize(r#"[{"genes":[1,2,3]},^1,^2]"#).unwrap();
    println!("parsed: {}", value);

    let items = value.as_list().unwrap().borrow();
    println!("slot 1 aliases slot 0: {}", items[0].ptr_eq(&items[1]));

    // Mutating through one handle is visible through the other.
    if let Some(map) = items[0].as_map() {
        let genes = map.borrow().get("genes").cloned();
        if let Some(genes) = genes.as_ref().and_then(|v| v.as_list()) {
            genes.borrow_mut().push(4.into());
        }
    }
    drop(items);
    println!("after push: {}", value);

    // Scalars round-trip too.
    for expr in ["null", "0x1A", "1.5e2", r#""a\tb""#] {
        println!("{:>8} -> {:?}", expr, deserialize(expr).unwrap());
    }
}
