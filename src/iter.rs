use crate::compressor::CompressedDataset;
use crate::encoder::CompressedTransaction;
use crate::error::Result;
use std::hash::Hash;

/// Iterator that reconstructs the original transactions by expanding symbols.
///
/// Yields an error for a transaction that references a symbol missing from
/// the table, then carries on with the next one.
pub struct DecodedIter<'a, T> {
    dataset: &'a CompressedDataset<T>,
    inner: std::slice::Iter<'a, CompressedTransaction<T>>,
}

impl<'a, T: Hash + Ord + Clone> DecodedIter<'a, T> {
    pub(crate) fn new(dataset: &'a CompressedDataset<T>) -> Self {
        Self {
            dataset,
            inner: dataset.transactions.iter(),
        }
    }
}

impl<'a, T: Hash + Ord + Clone> Iterator for DecodedIter<'a, T> {
    type Item = Result<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        let transaction = self.inner.next()?;
        Some(self.dataset.symbols.decode(transaction))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T: Hash + Ord + Clone> ExactSizeIterator for DecodedIter<'a, T> {}
