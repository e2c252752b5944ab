//! # Itemset Compress - Frequent-Itemset Dataset Compression
//!
//! Compresses a dataset of transactions by mining frequently co-occurring
//! item groups and substituting each group with a single compact symbol.
//!
//! The pipeline has four stages:
//! 1. **Frequency table**: count items and drop those below minimum support
//! 2. **Prefix tree**: fold transactions into shared, frequency-ordered paths
//! 3. **Conditional mining**: project each item's prefix paths and re-mine them
//! 4. **Encoding**: assign symbols in discovery order and greedily rewrite
//!    each transaction
//!
//! ## Example
//!
//! ```
//! use itemset_compress::{ItemsetCompressor, Itemset};
//!
//! let dataset = vec![
//!     vec!["a", "b", "c"],
//!     vec!["a", "b"],
//!     vec!["a", "b", "d"],
//!     vec!["a", "c"],
//! ];
//!
//! let compressor = ItemsetCompressor::with_min_support(2).unwrap();
//! let found = compressor.mine(&dataset);
//! assert_eq!(found.support(&Itemset::new(["a", "b"])), Some(3));
//!
//! let compressed = compressor.compress(&dataset).unwrap();
//! for decoded in compressed.iter_decoded() {
//!     println!("{:?}", decoded.unwrap());
//! }
//! ```
//!
//! ## Ordering
//!
//! Results are deterministic for a given input order. Items with equal
//! counts are ordered by first appearance, mining explores items by
//! ascending count, and symbols follow discovery order. Substitution is
//! greedy: an itemset earlier in assignment order consumes its items before
//! later itemsets are tried.

mod compressor;
mod config;
mod encoder;
mod error;
mod format;
mod frequency;
mod iter;
mod itemset;
mod mining;
mod stats;
mod symbol;
mod transaction;
mod tree;


pub use compressor::{CompressedDataset, CompressionStats, ItemsetCompressor};
pub use config::{CompressorConfig, MinSupport};
pub use encoder::{CompressedTransaction, SymbolTable};
pub use error::{CompressError, Result};
pub use format::{read_compressed, write_compressed};
pub use frequency::{FrequencyTable, HeaderEntry};
pub use iter::DecodedIter;
pub use itemset::{count_support, FrequentItemsets, Itemset};
pub use mining::{mine_frequent_itemsets, mine_tree};
pub use stats::DatasetStats;
pub use symbol::{OverflowPolicy, Symbol, SymbolAlphabet};
pub use transaction::{read_transactions, Transaction};
pub use tree::{PrefixPath, PrefixTree};
