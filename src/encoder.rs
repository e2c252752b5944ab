use crate::error::{CompressError, Result};
use crate::itemset::{FrequentItemsets, Itemset};
use crate::symbol::{Symbol, SymbolAlphabet};
use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use std::hash::Hash;
use tracing::debug;

/// A transaction after substitution: the symbols that matched, in assignment
/// order, followed by the items no itemset covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedTransaction<T> {
    pub symbols: Vec<Symbol>,
    pub leftovers: Vec<T>,
}

impl<T> CompressedTransaction<T> {
    /// Number of tokens (symbols plus leftover items).
    pub fn len(&self) -> usize {
        self.symbols.len() + self.leftovers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty() && self.leftovers.is_empty()
    }
}

/// Symbols assigned to frequent itemsets, in assignment order.
#[derive(Debug, Clone)]
pub struct SymbolTable<T> {
    entries: Vec<(Symbol, Itemset<T>)>,
    lookup: HashMap<Symbol, usize>,
}

impl<T> Default for SymbolTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::default(),
        }
    }
}

impl<T: Hash + Ord + Clone> SymbolTable<T> {
    /// Assigns consecutive symbols to itemsets in discovery order.
    pub fn assign(found: &FrequentItemsets<T>, alphabet: &SymbolAlphabet) -> Result<Self> {
        Self::from_itemsets(found.itemsets().cloned(), alphabet)
    }

    /// Assigns consecutive symbols to the given itemsets in order.
    pub fn from_itemsets<I>(itemsets: I, alphabet: &SymbolAlphabet) -> Result<Self>
    where
        I: IntoIterator<Item = Itemset<T>>,
    {
        let itemsets: Vec<Itemset<T>> = itemsets.into_iter().collect();
        alphabet.ensure_room(itemsets.len())?;

        let mut entries = Vec::with_capacity(itemsets.len());
        for (index, itemset) in itemsets.into_iter().enumerate() {
            entries.push((alphabet.symbol_for(index)?, itemset));
        }

        debug!(symbols = entries.len(), "assigned symbols");
        Ok(Self::from_entries(entries))
    }

    /// Builds a table from explicit `(symbol, itemset)` pairs, e.g. one read
    /// back from disk. Later duplicates of a symbol are ignored.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Symbol, Itemset<T>)>,
    {
        let mut table = Self::default();
        for (symbol, itemset) in entries {
            if table.lookup.contains_key(&symbol) {
                continue;
            }
            table.lookup.insert(symbol.clone(), table.entries.len());
            table.entries.push((symbol, itemset));
        }
        table
    }

    /// Greedily rewrites one transaction.
    ///
    /// Itemsets are tried once each, in assignment order. A match consumes
    /// its items, so a later itemset can never reuse them.
    pub fn encode(&self, transaction: &[T]) -> CompressedTransaction<T> {
        let mut remaining: HashSet<&T> = transaction.iter().collect();
        let mut symbols = Vec::new();

        for (symbol, itemset) in &self.entries {
            if itemset.iter().all(|item| remaining.contains(item)) {
                symbols.push(symbol.clone());
                for item in itemset {
                    remaining.remove(item);
                }
            }
        }

        let leftovers = transaction
            .iter()
            .filter(|item| remaining.remove(item))
            .cloned()
            .collect();

        CompressedTransaction { symbols, leftovers }
    }

    /// Expands every symbol back into its itemset and appends the leftovers.
    pub fn decode(&self, compressed: &CompressedTransaction<T>) -> Result<Vec<T>> {
        let mut items = Vec::with_capacity(compressed.len());
        for symbol in &compressed.symbols {
            let itemset = self
                .itemset(symbol)
                .ok_or_else(|| CompressError::UnknownSymbol {
                    symbol: symbol.to_string(),
                })?;
            items.extend(itemset.iter().cloned());
        }
        items.extend(compressed.leftovers.iter().cloned());
        Ok(items)
    }

    /// Keeps only the symbols referenced by at least one transaction.
    pub fn prune(&self, transactions: &[CompressedTransaction<T>]) -> Self {
        let used: HashSet<&Symbol> = transactions
            .iter()
            .flat_map(|t| t.symbols.iter())
            .collect();

        let pruned = Self::from_entries(
            self.entries
                .iter()
                .filter(|(symbol, _)| used.contains(symbol))
                .cloned(),
        );
        debug!(
            before = self.entries.len(),
            after = pruned.entries.len(),
            "pruned symbol table"
        );
        pruned
    }
}

impl<T> SymbolTable<T> {
    pub fn itemset(&self, symbol: &Symbol) -> Option<&Itemset<T>> {
        self.lookup.get(symbol).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.lookup.contains_key(symbol)
    }

    /// Iterates `(symbol, itemset)` in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Itemset<T>)> + '_ {
        self.entries.iter().map(|(symbol, itemset)| (symbol, itemset))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.entries.iter().map(|(symbol, _)| symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MinSupport;
    use crate::mining::mine_frequent_itemsets;
    use crate::symbol::OverflowPolicy;

    fn sym(code: &str) -> Symbol {
        Symbol::new(code)
    }

    fn basket() -> Vec<Vec<&'static str>> {
        vec![
            vec!["a", "b", "c"],
            vec!["a", "b"],
            vec!["a", "b", "d"],
            vec!["a", "c"],
        ]
    }

    fn basket_table() -> SymbolTable<&'static str> {
        let found = mine_frequent_itemsets(&basket(), MinSupport::new(2).unwrap());
        SymbolTable::assign(&found, &SymbolAlphabet::uppercase()).unwrap()
    }

    #[test]
    fn test_assignment_follows_discovery() {
        let table = basket_table();
        let listed: Vec<_> = table
            .iter()
            .map(|(s, set)| (s.as_str().to_string(), set.items().to_vec()))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("A".to_string(), vec!["c"]),
                ("B".to_string(), vec!["a", "c"]),
                ("C".to_string(), vec!["b"]),
                ("D".to_string(), vec!["a", "b"]),
                ("E".to_string(), vec!["a"]),
            ]
        );
    }

    #[test]
    fn test_encode_basket() {
        let table = basket_table();

        let t = table.encode(&["a", "b", "c"]);
        assert_eq!(t.symbols, vec![sym("A"), sym("C"), sym("E")]);
        assert!(t.leftovers.is_empty());

        let t = table.encode(&["a", "b", "d"]);
        assert_eq!(t.symbols, vec![sym("C"), sym("E")]);
        assert_eq!(t.leftovers, vec!["d"]);
    }

    #[test]
    fn test_greedy_order_wins() {
        let table = SymbolTable::from_itemsets(
            vec![Itemset::new(vec!['a', 'b']), Itemset::new(vec!['b', 'c'])],
            &SymbolAlphabet::uppercase(),
        )
        .unwrap();

        let t = table.encode(&['a', 'b', 'c']);
        assert_eq!(t.symbols, vec![sym("A")]);
        assert_eq!(t.leftovers, vec!['c']);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_repeated_items_collapse() {
        let table = basket_table();
        let t = table.encode(&["d", "a", "d", "a"]);
        assert_eq!(t.symbols, vec![sym("E")]);
        assert_eq!(t.leftovers, vec!["d"]);
    }

    #[test]
    fn test_empty_table_is_identity() {
        let table: SymbolTable<u8> = SymbolTable::default();
        let t = table.encode(&[3, 1, 2]);
        assert!(t.symbols.is_empty());
        assert_eq!(t.leftovers, vec![3, 1, 2]);
    }

    #[test]
    fn test_decode_round_trip() {
        let table = basket_table();
        for transaction in basket() {
            let compressed = table.encode(&transaction);
            let mut decoded = table.decode(&compressed).unwrap();
            let mut original = transaction.clone();
            decoded.sort();
            original.sort();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_decode_unknown_symbol() {
        let table = basket_table();
        let bogus = CompressedTransaction {
            symbols: vec![sym("Q")],
            leftovers: vec![],
        };
        let err = table.decode(&bogus).unwrap_err();
        assert!(matches!(err, CompressError::UnknownSymbol { symbol } if symbol == "Q"));
    }

    #[test]
    fn test_prune_keeps_used_only() {
        let table = basket_table();
        let compressed: Vec<_> = basket().iter().map(|t| table.encode(t)).collect();
        let pruned = table.prune(&compressed);

        let kept: Vec<&str> = pruned.symbols().map(Symbol::as_str).collect();
        assert_eq!(kept, vec!["A", "C", "E"]);
        assert!(!pruned.contains(&sym("B")));
        assert_eq!(pruned.itemset(&sym("C")).unwrap().items(), &["b"]);
    }

    #[test]
    fn test_alphabet_exhausted() {
        let itemsets: Vec<Itemset<u32>> = (0..3).map(|i| Itemset::new(vec![i])).collect();
        let alphabet = SymbolAlphabet::new(['X', 'Y'])
            .unwrap()
            .with_overflow(OverflowPolicy::Reject);
        let err = SymbolTable::from_itemsets(itemsets, &alphabet).unwrap_err();
        assert!(matches!(
            err,
            CompressError::AlphabetExhausted {
                required: 3,
                capacity: 2
            }
        ));
    }

    #[test]
    fn test_overflow_extends() {
        let itemsets: Vec<Itemset<u32>> = (0..30).map(|i| Itemset::new(vec![i])).collect();
        let table = SymbolTable::from_itemsets(itemsets, &SymbolAlphabet::uppercase()).unwrap();
        assert_eq!(table.len(), 30);
        assert_eq!(table.itemset(&sym("AA")).unwrap().items(), &[26]);
        assert_eq!(table.itemset(&sym("AD")).unwrap().items(), &[29]);
    }
}
