use crate::error::Result;
use ahash::AHashSet as HashSet;
use std::hash::Hash;
use std::io::BufRead;
use tracing::debug;

/// One record of the dataset: a set of items.
///
/// Duplicates collapse on construction. The order of first occurrence is kept
/// so that every pass over the dataset sees items in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction<T> {
    items: Vec<T>,
}

impl<T: Hash + Eq + Clone> Transaction<T> {
    pub fn new<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.clone()))
            .collect();
        Self { items }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Returns the items as an unordered set, for comparisons that ignore order.
    pub fn to_set(&self) -> HashSet<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T> Transaction<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for Transaction<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: Hash + Eq + Clone> From<Vec<T>> for Transaction<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> AsRef<[T]> for Transaction<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Transaction<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Reads one transaction per line, items separated by whitespace.
///
/// Blank lines become empty transactions so that line numbers and
/// transaction numbers stay aligned.
pub fn read_transactions<R: BufRead>(reader: R) -> Result<Vec<Transaction<String>>> {
    let mut dataset = Vec::new();
    for line in reader.lines() {
        let line = line?;
        dataset.push(Transaction::new(line.split_whitespace().map(str::to_string)));
    }
    debug!(transactions = dataset.len(), "read raw transactions");
    Ok(dataset)
}
