use crate::frequency::FrequencyTable;
use ahash::AHashMap as HashMap;
use slotmap::SlotMap;
use std::hash::Hash;

slotmap::new_key_type! {
    /// Generational index of a node in a [`PrefixTree`].
    pub(crate) struct NodeKey;
}

/// A node in the prefix tree.
///
/// Children are owned through the arena; `parent` is a plain back-index.
#[derive(Debug)]
pub(crate) struct TreeNode {
    /// Header-table rank of the item, `None` for the root
    pub rank: Option<usize>,
    pub count: usize,
    pub parent: Option<NodeKey>,
    /// At most one child per item rank
    pub children: HashMap<usize, NodeKey>,
}

impl TreeNode {
    fn root() -> Self {
        Self {
            rank: None,
            count: 1,
            parent: None,
            children: HashMap::default(),
        }
    }

    fn item(rank: usize, count: usize, parent: NodeKey) -> Self {
        Self {
            rank: Some(rank),
            count,
            parent: Some(parent),
            children: HashMap::default(),
        }
    }
}

/// A prefix path leading to one item's node, standing for `count`
/// transactions of the conditional dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPath<T> {
    /// Ancestors nearest-first, root excluded
    pub items: Vec<T>,
    pub count: usize,
}

/// Shared prefix tree over one (possibly conditional) dataset.
///
/// Every root-to-node path is a transaction prefix ordered by descending
/// item frequency. For each item the tree keeps the nodes holding it in
/// creation order; that registry replaces per-node sibling links.
pub struct PrefixTree<T> {
    pub(crate) nodes: SlotMap<NodeKey, TreeNode>,
    pub(crate) root: NodeKey,
    header: FrequencyTable<T>,
    /// Nodes holding each item, indexed by rank
    links: Vec<Vec<NodeKey>>,
}

impl<T: Hash + Eq + Clone> PrefixTree<T> {
    /// Builds a tree from transactions, keeping only items in `header`.
    pub fn build<I, S>(transactions: I, header: FrequencyTable<T>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[T]>,
    {
        let mut tree = Self::empty(header);
        for transaction in transactions {
            let ordered = tree.header.order_transaction(transaction.as_ref());
            tree.insert(&ordered, 1);
        }
        tree
    }

    /// Builds a tree from a conditional pattern base.
    pub fn build_conditional(paths: &[PrefixPath<T>], header: FrequencyTable<T>) -> Self {
        let mut tree = Self::empty(header);
        for path in paths {
            let ordered = tree.header.order_transaction(&path.items);
            tree.insert(&ordered, path.count);
        }
        tree
    }

    /// Collects the conditional pattern base of `item`.
    ///
    /// For every node holding `item`, the values of its ancestors up to the
    /// root are gathered nearest-first. Empty paths are dropped; the rest
    /// carry the node's count as their multiplicity.
    pub fn conditional_pattern_base(&self, item: &T) -> Vec<PrefixPath<T>> {
        let Some(rank) = self.header.rank(item) else {
            return Vec::new();
        };

        self.links[rank]
            .iter()
            .filter_map(|&key| {
                let node = &self.nodes[key];
                let mut items = Vec::new();
                let mut current = node.parent;

                while let Some(parent) = current {
                    let Some(entry) = self.nodes[parent].rank.and_then(|r| self.header.entry(r))
                    else {
                        break;
                    };
                    items.push(entry.item.clone());
                    current = self.nodes[parent].parent;
                }

                (!items.is_empty()).then_some(PrefixPath {
                    items,
                    count: node.count,
                })
            })
            .collect()
    }
}

impl<T> PrefixTree<T> {
    fn empty(header: FrequencyTable<T>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(TreeNode::root());
        let links = vec![Vec::new(); header.len()];
        Self {
            nodes,
            root,
            header,
            links,
        }
    }

    /// Inserts an ordered run of ranks below the root, adding `count` to
    /// every node along the way.
    fn insert(&mut self, ranks: &[usize], count: usize) {
        let mut current = self.root;

        for &rank in ranks {
            if let Some(&child) = self.nodes[current].children.get(&rank) {
                self.nodes[child].count += count;
                current = child;
            } else {
                let child = self.nodes.insert(TreeNode::item(rank, count, current));
                self.nodes[current].children.insert(rank, child);
                self.links[rank].push(child);
                current = child;
            }
        }
    }

    pub fn header(&self) -> &FrequencyTable<T> {
        &self.header
    }

    /// Number of item nodes, root excluded.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of nodes holding the item at `rank`.
    pub fn link_len(&self, rank: usize) -> usize {
        self.links.get(rank).map_or(0, Vec::len)
    }

    /// Sum of counts over all nodes holding the item at `rank`.
    pub fn linked_count(&self, rank: usize) -> usize {
        self.links
            .get(rank)
            .map_or(0, |keys| keys.iter().map(|&key| self.nodes[key].count).sum())
    }
}
