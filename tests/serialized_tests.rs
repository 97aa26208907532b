//! Expression-engine coverage: the `@Serialized:` grammar, reference
//! aliasing, and the failure modes of each error category.

use framsreader::{deserialize, Error, Number, Value, ValueMap};

#[test]
fn test_null_consumes_entire_token() {
    assert_eq!(deserialize("null").unwrap(), Value::Null);
    assert_eq!(deserialize("  null  ").unwrap(), Value::Null);
}

#[test]
fn test_string_escapes() {
    let value = deserialize(r#""a\tb\n""#).unwrap();
    assert_eq!(value.as_str(), Some("a\tb\n"));

    let value = deserialize(r#""say \"hi\"""#).unwrap();
    assert_eq!(value.as_str(), Some("say \"hi\""));

    assert_eq!(deserialize(r#""""#).unwrap().as_str(), Some(""));
}

#[test]
fn test_numbers() {
    assert_eq!(deserialize("42").unwrap(), Value::from(42));
    assert_eq!(deserialize("-17").unwrap(), Value::from(-17));
    assert_eq!(deserialize("+8").unwrap(), Value::from(8));
    assert_eq!(deserialize("0x1A").unwrap(), Value::from(26));
    assert_eq!(deserialize("-0x10").unwrap(), Value::from(-16));
    assert_eq!(deserialize("1.5e2").unwrap(), Value::from(150.0));
    assert_eq!(deserialize("-0.25").unwrap(), Value::from(-0.25));
}

#[test]
fn test_flat_list() {
    let value = deserialize("[1,2,3]").unwrap();
    let items = value.as_list().unwrap().borrow();
    assert_eq!(items.len(), 3);
    assert_eq!(*items, vec![Value::from(1), Value::from(2), Value::from(3)]);
    assert!(items.iter().all(|v| matches!(v, Value::Number(Number::Integer(_)))));
}

#[test]
fn test_nested_map() {
    let value = deserialize(r#"{"x":1,"y":[2,3]}"#).unwrap();
    let map = value.as_map().unwrap().borrow();
    assert_eq!(map.get("x"), Some(&Value::from(1)));
    let y = map.get("y").unwrap().as_list().unwrap().borrow().clone();
    assert_eq!(y, vec![Value::from(2), Value::from(3)]);
}

#[test]
fn test_empty_containers() {
    assert_eq!(deserialize("[]").unwrap(), Value::list(vec![]));
    assert_eq!(deserialize("{}").unwrap(), Value::map(ValueMap::new()));
}

#[test]
fn test_whitespace_between_tokens() {
    let value = deserialize(" [ 1 , \"two\" , { \"k\" : null } ] ").unwrap();
    let items = value.as_list().unwrap().borrow();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].as_str(), Some("two"));
    let map = items[2].as_map().unwrap().borrow();
    assert_eq!(map.get("k"), Some(&Value::Null));
}

#[test]
fn test_nulls_inside_containers() {
    let value = deserialize("[null,1,null]").unwrap();
    let items = value.as_list().unwrap().borrow();
    assert_eq!(*items, vec![Value::Null, Value::from(1), Value::Null]);
}

// Composites register in construction order the moment they open: the outer
// list claims index 0, the map inside it index 1.
#[test]
fn test_backreference_aliases_registered_map() {
    let value = deserialize(r#"[{"a":1},^1]"#).unwrap();
    let items = value.as_list().unwrap().borrow();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_map());
    assert!(items[0].ptr_eq(&items[1]));
    assert_eq!(
        items[0].as_map().unwrap().borrow().get("a"),
        Some(&Value::from(1))
    );
}

#[test]
fn test_backreference_to_outer_list_builds_cycle() {
    let value = deserialize("[1,^0]").unwrap();
    let items = value.as_list().unwrap().borrow();
    assert_eq!(items[0], Value::from(1));
    assert!(items[1].ptr_eq(&value));
}

#[test]
fn test_aliases_are_not_reregistered() {
    // If the ^1 alias took a table slot of its own, [2] would land at
    // index 3 and ^2 would resolve to the wrong composite.
    let value = deserialize("[[1],^1,[2],^2]").unwrap();
    let items = value.as_list().unwrap().borrow();
    assert!(items[1].ptr_eq(&items[0]));
    assert!(items[3].ptr_eq(&items[2]));
    assert!(!items[0].ptr_eq(&items[2]));
}

#[test]
fn test_backreference_as_map_value() {
    let value = deserialize(r#"{"a":[1],"b":^1}"#).unwrap();
    let map = value.as_map().unwrap().borrow();
    assert!(map.get("a").unwrap().ptr_eq(map.get("b").unwrap()));
}

#[test]
fn test_shared_substructure_mutates_together() {
    let value = deserialize("[[7],^1]").unwrap();
    let items = value.as_list().unwrap().borrow();
    items[0].as_list().unwrap().borrow_mut().push(Value::from(8));
    assert_eq!(items[1].as_list().unwrap().borrow().len(), 2);
}

#[test]
fn test_reference_with_interior_whitespace() {
    let value = deserialize("[[1],^ 1]").unwrap();
    let items = value.as_list().unwrap().borrow();
    assert!(items[0].ptr_eq(&items[1]));
}

#[test]
fn test_forward_reference_rejected() {
    let err = deserialize("[[1],^2,[2]]").unwrap_err();
    assert_eq!(err, Error::Reference { index: 2, registered: 2 });
}

#[test]
fn test_unresolvable_reference() {
    let err = deserialize("^5").unwrap_err();
    assert_eq!(err, Error::Reference { index: 5, registered: 0 });
}

#[test]
fn test_empty_expression() {
    assert_eq!(deserialize(""), Err(Error::EmptyValue));
    assert_eq!(deserialize("   "), Err(Error::EmptyValue));
}

#[test]
fn test_truncated_list() {
    assert!(matches!(deserialize("[1,2,"), Err(Error::Structural(_))));
    assert!(matches!(deserialize("["), Err(Error::Structural(_))));
}

#[test]
fn test_unterminated_map() {
    assert!(matches!(deserialize(r#"{"a":1"#), Err(Error::Structural(_))));
}

// Input that ends right after a ',' or ':' separator is an unterminated
// container, not an unrecognized token.
#[test]
fn test_truncation_after_separator() {
    assert!(matches!(deserialize("[1,2,"), Err(Error::Structural(_))));
    assert!(matches!(deserialize(r#"{"a":"#), Err(Error::Structural(_))));
    assert!(matches!(deserialize(r#"{"a":1,"#), Err(Error::Structural(_))));
}

#[test]
fn test_mismatched_closers() {
    assert!(matches!(deserialize("[1}"), Err(Error::Structural(_))));
    assert!(matches!(deserialize(r#"{"a":1]"#), Err(Error::Structural(_))));
    assert!(matches!(deserialize("]"), Err(Error::Structural(_))));
}

#[test]
fn test_missing_colon_in_map() {
    assert!(matches!(deserialize(r#"{"a" 1}"#), Err(Error::Structural(_))));
}

#[test]
fn test_top_level_comma_rejected() {
    assert!(matches!(deserialize("1,2"), Err(Error::Structural(_))));
}

#[test]
fn test_double_comma_rejected() {
    assert!(matches!(deserialize("[1,,2]"), Err(Error::Structural(_))));
}

#[test]
fn test_trailing_content_rejected() {
    assert!(matches!(deserialize("null 1"), Err(Error::Structural(_))));
    assert!(matches!(deserialize("[1] [2]"), Err(Error::Structural(_))));
}

#[test]
fn test_lexical_errors() {
    assert!(matches!(deserialize("007"), Err(Error::Lexical(_))));
    assert!(matches!(deserialize("[01]"), Err(Error::Lexical(_))));
    assert!(matches!(deserialize("0x"), Err(Error::Lexical(_))));
    assert!(matches!(deserialize(r#""no end"#), Err(Error::Lexical(_))));
    assert!(matches!(deserialize("^x"), Err(Error::Lexical(_))));
}

#[test]
fn test_unsupported_productions() {
    assert!(matches!(deserialize("<Creature>"), Err(Error::Unsupported(_))));
    assert!(matches!(deserialize("custom"), Err(Error::Unsupported(_))));
    assert!(matches!(deserialize("{1:2}"), Err(Error::Unsupported(_))));
}

#[test]
fn test_deeply_nested_lists() {
    let depth = 100;
    let expr = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let mut value = deserialize(&expr).unwrap();
    for _ in 0..depth - 1 {
        let inner = value.as_list().unwrap().borrow()[0].clone();
        value = inner;
    }
    assert!(value.as_list().unwrap().borrow().is_empty());
}
