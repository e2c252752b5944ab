use crate::config::MinSupport;
use crate::frequency::FrequencyTable;
use std::cmp::Reverse;
use std::fmt;
use std::hash::Hash;

/// Summary of a raw dataset, printed before compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStats<T> {
    pub total_transactions: usize,
    pub unique_items: usize,
    /// Most frequent items, highest count first; ties in first-seen order
    pub top_items: Vec<(T, usize)>,
}

impl<T: Hash + Eq + Clone> DatasetStats<T> {
    pub fn analyze<S: AsRef<[T]>>(dataset: &[S], top_n: usize) -> Self {
        let counts = FrequencyTable::from_transactions(dataset, MinSupport::ONE);

        let mut ranked: Vec<(T, usize)> = counts
            .iter()
            .map(|entry| (entry.item.clone(), entry.count))
            .collect();
        ranked.sort_by_key(|&(_, count)| Reverse(count));
        ranked.truncate(top_n);

        Self {
            total_transactions: dataset.len(),
            unique_items: counts.len(),
            top_items: ranked,
        }
    }
}

impl<T: fmt::Display> fmt::Display for DatasetStats<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Transactions: {}", self.total_transactions)?;
        writeln!(f, "Total Unique Items: {}", self.unique_items)?;
        write!(f, "Top {} Most Frequent Items:", self.top_items.len())?;
        for (item, count) in &self.top_items {
            write!(f, " {item} ({count})")?;
        }
        Ok(())
    }
}
