//! Reads a Framsticks parameter file and prints its records.
//!
//! Run with: `cargo run --example read_document -- <path>`
//! Without an argument it parses a built-in sample.

use framsreader::{from_file, from_str, Document};

const SAMPLE: &str = "\
# sample genotype file
Genotype:
name:\"quadruped\"
energy:1.5e2
flags:0x1A
info:~
A four-legged walker.
Evolved for flat terrain.~
data:@Serialized:{\"weights\":[0.25,0.5],\"tags\":[\"walker\",\"stable\"]}

Genotype:
name:\"worm\"
energy:80
";

fn print_document(doc: &Document) {
    for (i, obj) in doc.iter().enumerate() {
        println!("record {}: class {:?}", i, obj.class());
        for (key, value) in obj.iter() {
            if key != "class" {
                println!("  {} = {}", key, value);
            }
        }
    }
}

fn main() {
    let doc = match std::env::args().nth(1) {
        Some(path) => match from_file(&path) {
            Ok(doc) => doc,
            Err(err) => {
                eprintln!("failed to read {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => from_str(SAMPLE).expect("built-in sample parses"),
    };

    print_document(&doc);
}
