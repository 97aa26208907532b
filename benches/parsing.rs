use criterion::{black_box, criterion_group, criterion_main, Criterion};
use framsreader::{deserialize, from_str};

fn sample_document(records: usize) -> String {
    let mut out = String::new();
    for i in 0..records {
        out.push_str("Genotype:\n");
        out.push_str(&format!("name:\"gen-{}\"\n", i));
        out.push_str("energy:1.5e2\n");
        out.push_str("flags:0x1A\n");
        out.push_str("info:~\nfirst line\nsecond line~\n");
        out.push_str("data:@Serialized:{\"weights\":[0.25,0.5,0.75],\"tags\":[\"a\",\"b\"],\"extra\":null}\n");
        out.push('\n');
    }
    out
}

fn benchmark_scan_document(c: &mut Criterion) {
    let small = sample_document(10);
    let large = sample_document(500);

    c.bench_function("scan_document_10", |b| {
        b.iter(|| from_str(black_box(&small)).unwrap())
    });

    c.bench_function("scan_document_500", |b| {
        b.iter(|| from_str(black_box(&large)).unwrap())
    });
}

fn benchmark_deserialize_expression(c: &mut Criterion) {
    let flat = "[1,2,3,4,5,6,7,8,9,10]";
    let nested = r#"{"a":[1,[2,[3,[4,[5]]]]],"b":{"c":{"d":[null,"text",0x10]}},"shared":^1}"#;

    c.bench_function("deserialize_flat_list", |b| {
        b.iter(|| deserialize(black_box(flat)).unwrap())
    });

    c.bench_function("deserialize_nested_graph", |b| {
        b.iter(|| deserialize(black_box(nested)).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_scan_document,
    benchmark_deserialize_expression
);
criterion_main!(benches);
