use itemset_compress::{read_compressed, write_compressed};
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};

/// Drops unused symbols from a previously written compressed dataset.
///
/// Usage: cargo run --example prune <compressed> <output>
fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: {} <compressed> <output>", args[0]);
        std::process::exit(1);
    }

    let input = &args[1];
    let output = &args[2];

    let file = File::open(input).unwrap_or_else(|_| {
        eprintln!("File not found: {}", input);
        std::process::exit(1);
    });

    let mut compressed = read_compressed(BufReader::new(file)).unwrap_or_else(|e| {
        eprintln!("Cannot load {}: {}", input, e);
        std::process::exit(1);
    });

    let before = compressed.symbols.len();
    compressed.prune();

    let out = File::create(output).unwrap_or_else(|e| {
        eprintln!("Cannot create {}: {}", output, e);
        std::process::exit(1);
    });
    if let Err(e) = write_compressed(BufWriter::new(out), &compressed) {
        eprintln!("Cannot write {}: {}", output, e);
        std::process::exit(1);
    }

    println!(
        "Kept {} of {} symbols; updated compressed dataset saved to {}",
        compressed.symbols.len(),
        before,
        output
    );
}
