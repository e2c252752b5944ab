//! Frequent-itemset mining over prefix trees.
//!
//! The top-level dataset is folded into a [`PrefixTree`]. For every item,
//! taken in ascending order of frequency, the miner records the itemset
//! formed by the current prefix plus that item. It then collects the item's
//! conditional pattern base and mines that base as a smaller dataset. Each
//! level builds its own tree and drops it on return.
//!
//! Discovery order is part of the result: it decides which symbol each
//! itemset receives and therefore how transactions are encoded.

use crate::config::MinSupport;
use crate::frequency::FrequencyTable;
use crate::itemset::{FrequentItemsets, Itemset};
use crate::tree::PrefixTree;
use std::hash::Hash;
use tracing::{debug, trace};

/// Mines every itemset whose support meets `min_support`.
///
/// Each recorded support is the count of the extending item within its
/// conditional dataset. Trees order equal-count items by first appearance,
/// so this equals the itemset's support over `transactions`.
pub fn mine_frequent_itemsets<T, I, S>(
    transactions: I,
    min_support: MinSupport,
) -> FrequentItemsets<T>
where
    T: Hash + Ord + Clone,
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<[T]>,
{
    let header = FrequencyTable::from_transactions(transactions.clone(), min_support);
    let mut found = FrequentItemsets::new();

    if header.is_empty() {
        debug!(%min_support, "no item meets minimum support");
        return found;
    }

    let tree = PrefixTree::build(transactions, header);
    mine_tree(&tree, min_support, &Itemset::empty(), &mut found);

    debug!(itemsets = found.len(), %min_support, "mining complete");
    found
}

/// Explores one tree, recording `prefix ∪ {item}` for each of its items and
/// recursing into every non-empty conditional tree.
pub fn mine_tree<T>(
    tree: &PrefixTree<T>,
    min_support: MinSupport,
    prefix: &Itemset<T>,
    found: &mut FrequentItemsets<T>,
) where
    T: Hash + Ord + Clone,
{
    let header = tree.header();
    debug!(
        prefix_len = prefix.len(),
        header_len = header.len(),
        nodes = tree.node_count(),
        "mining level"
    );

    for rank in header.ascending_ranks() {
        let Some(entry) = header.entry(rank) else {
            continue;
        };
        let extended = prefix.with(entry.item.clone());
        trace!(size = extended.len(), support = entry.count, "recorded itemset");
        found.record(extended.clone(), entry.count);

        let base = tree.conditional_pattern_base(&entry.item);
        let conditional_header = FrequencyTable::from_weighted(
            base.iter().map(|path| (path.items.as_slice(), path.count)),
            min_support,
        );

        if conditional_header.is_empty() {
            continue;
        }

        let conditional = PrefixTree::build_conditional(&base, conditional_header);
        mine_tree(&conditional, min_support, &extended, found);
    }
}
