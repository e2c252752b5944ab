use crate::config::MinSupport;
use ahash::AHashMap as HashMap;
use std::cmp::Reverse;
use std::hash::Hash;

/// An item that met the support threshold, with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry<T> {
    pub item: T,
    pub count: usize,
}

/// Occurrence counts for the items of one dataset, filtered by minimum support.
///
/// Entries keep the order in which items were first seen. That order is the
/// tie-break everywhere two items have the same count, which makes every
/// tree and every mining pass reproducible. The position of an entry is its
/// *rank*; prefix trees store ranks instead of item values.
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {
    entries: Vec<HeaderEntry<T>>,
    ranks: HashMap<T, usize>,
}

impl<T: Hash + Eq + Clone> FrequencyTable<T> {
    /// Counts items across a collection of transactions.
    ///
    /// Each transaction is treated as a set: a repeated item counts once.
    pub fn from_transactions<I, S>(transactions: I, min_support: MinSupport) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[T]>,
    {
        let mut counter = Counter::default();
        for transaction in transactions {
            counter.add(transaction.as_ref(), 1);
        }
        counter.finish(min_support)
    }

    /// Counts items across weighted paths, each path standing for `weight`
    /// identical transactions.
    pub fn from_weighted<'a, I>(paths: I, min_support: MinSupport) -> Self
    where
        I: IntoIterator<Item = (&'a [T], usize)>,
        T: 'a,
    {
        let mut counter = Counter::default();
        for (path, weight) in paths {
            counter.add(path, weight);
        }
        counter.finish(min_support)
    }

    /// Returns the count of `item`, or `None` if it did not meet the threshold.
    pub fn count(&self, item: &T) -> Option<usize> {
        self.rank(item).map(|rank| self.entries[rank].count)
    }

    pub fn rank(&self, item: &T) -> Option<usize> {
        self.ranks.get(item).copied()
    }

    /// Filters a transaction to the items in this table and orders them by
    /// descending count. Repeated items collapse to one rank.
    ///
    /// Equal counts fall back to rank, not to the transaction's own order, so
    /// every path in a tree agrees on one order and conditional counts stay exact.
    pub fn order_transaction(&self, transaction: &[T]) -> Vec<usize> {
        let mut ranks: Vec<usize> = transaction
            .iter()
            .filter_map(|item| self.rank(item))
            .collect();
        ranks.sort_by_key(|&rank| (Reverse(self.entries[rank].count), rank));
        ranks.dedup();
        ranks
    }
}

impl<T> FrequencyTable<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, rank: usize) -> Option<&HeaderEntry<T>> {
        self.entries.get(rank)
    }

    /// Iterates entries in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, HeaderEntry<T>> {
        self.entries.iter()
    }

    /// Ranks ordered by ascending count, equal counts in first-seen order.
    ///
    /// This is the order the miner explores items in.
    pub fn ascending_ranks(&self) -> Vec<usize> {
        let mut ranks: Vec<usize> = (0..self.entries.len()).collect();
        ranks.sort_by_key(|&rank| self.entries[rank].count);
        ranks
    }
}

/// Accumulates counts in first-seen order before filtering.
struct Counter<T> {
    seen: Vec<HeaderEntry<T>>,
    positions: HashMap<T, usize>,
    /// Index of the last batch that counted each entry
    last_batch: Vec<usize>,
    batch: usize,
}

impl<T> Default for Counter<T> {
    fn default() -> Self {
        Self {
            seen: Vec::new(),
            positions: HashMap::default(),
            last_batch: Vec::new(),
            batch: 0,
        }
    }
}

impl<T: Hash + Eq + Clone> Counter<T> {
    /// Counts each distinct item of `items` once, with `weight`.
    fn add(&mut self, items: &[T], weight: usize) {
        self.batch += 1;
        for item in items {
            match self.positions.get(item) {
                Some(&pos) if self.last_batch[pos] == self.batch => {}
                Some(&pos) => {
                    self.seen[pos].count += weight;
                    self.last_batch[pos] = self.batch;
                }
                None => {
                    self.positions.insert(item.clone(), self.seen.len());
                    self.seen.push(HeaderEntry {
                        item: item.clone(),
                        count: weight,
                    });
                    self.last_batch.push(self.batch);
                }
            }
        }
    }

    fn finish(self, min_support: MinSupport) -> FrequencyTable<T> {
        let entries: Vec<HeaderEntry<T>> = self
            .seen
            .into_iter()
            .filter(|entry| min_support.admits(entry.count))
            .collect();

        let ranks = entries
            .iter()
            .enumerate()
            .map(|(rank, entry)| (entry.item.clone(), rank))
            .collect();

        FrequencyTable { entries, ranks }
    }
}
