use crate::config::{CompressorConfig, MinSupport};
use crate::encoder::{CompressedTransaction, SymbolTable};
use crate::error::Result;
use crate::iter::DecodedIter;
use crate::itemset::FrequentItemsets;
use crate::mining::mine_frequent_itemsets;
use crate::symbol::SymbolAlphabet;
use std::hash::Hash;
use tracing::info;

/// Mines a dataset for frequent itemsets and rewrites it with one symbol per
/// itemset.
///
/// # Example
///
/// ```
/// use itemset_compress::ItemsetCompressor;
///
/// let dataset = vec![
///     vec!["bread", "milk", "eggs"],
///     vec!["bread", "milk"],
///     vec!["bread", "milk", "beer"],
/// ];
///
/// let compressor = ItemsetCompressor::default();
/// let compressed = compressor.compress(&dataset).unwrap();
///
/// let decoded: Vec<Vec<&str>> = compressed.iter_decoded().collect::<Result<_, _>>().unwrap();
/// assert_eq!(decoded.len(), 3);
/// println!("{} symbols", compressed.symbols.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ItemsetCompressor {
    config: CompressorConfig,
}

impl ItemsetCompressor {
    pub fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    /// Shorthand for the default alphabet with a custom threshold.
    pub fn with_min_support(min_support: usize) -> Result<Self> {
        let min_support = MinSupport::new(min_support)?;
        Ok(Self::new(CompressorConfig::new(
            min_support,
            SymbolAlphabet::default(),
        )))
    }

    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// Mines frequent itemsets without encoding.
    pub fn mine<T, S>(&self, dataset: &[S]) -> FrequentItemsets<T>
    where
        T: Hash + Ord + Clone,
        S: AsRef<[T]>,
    {
        mine_frequent_itemsets(dataset, self.config.min_support)
    }

    /// Mines `dataset`, assigns symbols and encodes every transaction.
    pub fn compress<T, S>(&self, dataset: &[S]) -> Result<CompressedDataset<T>>
    where
        T: Hash + Ord + Clone,
        S: AsRef<[T]>,
    {
        let found = self.mine(dataset);
        info!(
            transactions = dataset.len(),
            itemsets = found.len(),
            min_support = %self.config.min_support,
            "mined frequent itemsets"
        );

        let symbols = SymbolTable::assign(&found, &self.config.alphabet)?;
        let transactions: Vec<_> = dataset
            .iter()
            .map(|transaction| symbols.encode(transaction.as_ref()))
            .collect();

        let compressed = CompressedDataset {
            transactions,
            symbols,
        };
        let stats = compressed.stats();
        info!(
            input_items = stats.input_items,
            output_tokens = stats.output_tokens,
            symbols = stats.num_symbols,
            "encoded dataset"
        );
        Ok(compressed)
    }
}

/// Encoded transactions together with the table needed to expand them.
#[derive(Debug, Clone)]
pub struct CompressedDataset<T> {
    pub transactions: Vec<CompressedTransaction<T>>,
    pub symbols: SymbolTable<T>,
}

impl<T: Hash + Ord + Clone> CompressedDataset<T> {
    /// Drops every symbol no transaction references.
    pub fn prune(&mut self) {
        self.symbols = self.symbols.prune(&self.transactions);
    }

    /// Lazily decodes each transaction in order.
    pub fn iter_decoded(&self) -> DecodedIter<'_, T> {
        DecodedIter::new(self)
    }

    /// Returns compression statistics.
    ///
    /// Item counts for the input are recovered by expansion, so symbols
    /// missing from the table count as zero items.
    pub fn stats(&self) -> CompressionStats {
        let input_items = self
            .transactions
            .iter()
            .map(|t| {
                let expanded: usize = t
                    .symbols
                    .iter()
                    .filter_map(|s| self.symbols.itemset(s))
                    .map(|set| set.len())
                    .sum();
                expanded + t.leftovers.len()
            })
            .sum();

        let output_tokens = self.transactions.iter().map(|t| t.len()).sum();
        let mapping_items = self.symbols.iter().map(|(_, set)| set.len()).sum();

        CompressionStats {
            input_items,
            output_tokens,
            num_symbols: self.symbols.len(),
            mapping_items,
        }
    }
}

/// Statistics about the compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Items across all original transactions
    pub input_items: usize,
    /// Symbols plus leftover items across all encoded transactions
    pub output_tokens: usize,
    /// Entries in the symbol table
    pub num_symbols: usize,
    /// Items listed across all symbol table entries
    pub mapping_items: usize,
}

impl CompressionStats {
    /// Returns the compression ratio as a percentage.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_items == 0 {
            0.0
        } else {
            (self.output_tokens as f64 / self.input_items as f64) * 100.0
        }
    }
}
