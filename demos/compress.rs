use itemset_compress::{read_transactions, write_compressed, DatasetStats, ItemsetCompressor};
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};

/// Mines a transaction file and writes the compressed dataset.
///
/// Usage: cargo run --example compress <input> <output> [min_support]
fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: {} <input> <output> [min_support]", args[0]);
        std::process::exit(1);
    }

    let input = &args[1];
    let output = &args[2];
    let min_support = match args.get(3).map(|s| s.parse::<usize>()) {
        None => 2,
        Some(Ok(n)) => n,
        Some(Err(_)) => {
            eprintln!("min_support must be a positive integer");
            std::process::exit(1);
        }
    };

    let file = File::open(input).unwrap_or_else(|_| {
        eprintln!("File not found: {}", input);
        std::process::exit(1);
    });

    let dataset = read_transactions(BufReader::new(file)).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {}", input, e);
        std::process::exit(1);
    });

    println!("{}", DatasetStats::analyze(&dataset, 10));

    let compressor = ItemsetCompressor::with_min_support(min_support).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    let compressed = compressor.compress(&dataset).unwrap_or_else(|e| {
        eprintln!("Compression failed: {}", e);
        std::process::exit(1);
    });

    let out = File::create(output).unwrap_or_else(|e| {
        eprintln!("Cannot create {}: {}", output, e);
        std::process::exit(1);
    });
    if let Err(e) = write_compressed(BufWriter::new(out), &compressed) {
        eprintln!("Cannot write {}: {}", output, e);
        std::process::exit(1);
    }

    let stats = compressed.stats();

    println!("\n=== Statistics ===");
    println!("Items in input: {}", stats.input_items);
    println!("Tokens in output: {}", stats.output_tokens);
    println!("Symbols assigned: {}", stats.num_symbols);
    println!("Compression ratio: {:.2}%", stats.compression_ratio());
    println!("Compressed dataset saved to {}", output);
}
