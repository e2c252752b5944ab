use ahash::AHashMap as HashMap;
use std::hash::Hash;

/// A set of items, stored sorted so equal sets compare and hash equally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Itemset<T> {
    items: Vec<T>,
}

impl<T: Ord> Itemset<T> {
    pub fn new<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort();
        items.dedup();
        Self { items }
    }

    /// Returns a copy of this set with `item` added.
    pub fn with(&self, item: T) -> Self
    where
        T: Clone,
    {
        let mut items = self.items.clone();
        if let Err(pos) = items.binary_search(&item) {
            items.insert(pos, item);
        }
        Self { items }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.binary_search(item).is_ok()
    }

    /// Returns true if every item is present in `transaction`.
    pub fn is_contained_in(&self, transaction: &[T]) -> bool {
        self.items.iter().all(|item| transaction.contains(item))
    }
}

impl<T> Itemset<T> {
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in ascending order.
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

impl<T: Ord> FromIterator<T> for Itemset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, T> IntoIterator for &'a Itemset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Frequent itemsets in discovery order, each with its recorded support.
///
/// Recording an itemset a second time overwrites its support but keeps its
/// original position.
#[derive(Debug, Clone)]
pub struct FrequentItemsets<T> {
    entries: Vec<(Itemset<T>, usize)>,
    positions: HashMap<Itemset<T>, usize>,
}

impl<T> Default for FrequentItemsets<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::default(),
        }
    }
}

impl<T: Hash + Ord + Clone> FrequentItemsets<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, itemset: Itemset<T>, support: usize) {
        match self.positions.get(&itemset) {
            Some(&pos) => self.entries[pos].1 = support,
            None => {
                self.positions.insert(itemset.clone(), self.entries.len());
                self.entries.push((itemset, support));
            }
        }
    }

    pub fn support(&self, itemset: &Itemset<T>) -> Option<usize> {
        self.positions.get(itemset).map(|&pos| self.entries[pos].1)
    }

    pub fn contains(&self, itemset: &Itemset<T>) -> bool {
        self.positions.contains_key(itemset)
    }
}

impl<T> FrequentItemsets<T> {
    /// Iterates `(itemset, support)` in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset<T>, usize)> + '_ {
        self.entries.iter().map(|(itemset, support)| (itemset, *support))
    }

    pub fn itemsets(&self) -> impl Iterator<Item = &Itemset<T>> + '_ {
        self.entries.iter().map(|(itemset, _)| itemset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counts the transactions containing every item of `itemset`.
pub fn count_support<T, I, S>(transactions: I, itemset: &Itemset<T>) -> usize
where
    T: Ord,
    I: IntoIterator<Item = S>,
    S: AsRef<[T]>,
{
    transactions
        .into_iter()
        .filter(|t| itemset.is_contained_in(t.as_ref()))
        .count()
}
