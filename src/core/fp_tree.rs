//! Arena-backed frequent pattern tree
//!
//! The tree compresses a weighted set of item paths into a prefix-sharing
//! structure. Nodes live in one `Vec` and refer to each other by index:
//! - a node owns its children through an item-keyed map of indices
//! - the parent link is an index used only for upward walks
//! - the header table keeps, per item, the list of node indices carrying it
//!
//! # Ordering
//!
//! Items in the header table are ordered by descending count in this tree,
//! ties broken by ascending item code. Every path is inserted in that order,
//! which is what lets transactions with a common frequent prefix share nodes.
//!
//! The same builder produces the global tree (every path has weight 1) and
//! the conditional trees built from a conditional pattern base.

use crate::types::ItemId;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Index of a node in the tree arena
pub type NodeId = usize;

/// The root always sits at index 0 and carries no item
pub const ROOT: NodeId = 0;

/// One node of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpNode {
    /// `None` only for the root
    pub item: Option<ItemId>,
    /// Weighted number of paths passing through this node
    pub count: u64,
    /// `None` only for the root
    pub parent: Option<NodeId>,
    /// Children keyed by item code
    pub children: BTreeMap<ItemId, NodeId>,
}

impl FpNode {
    fn root() -> Self {
        Self {
            item: None,
            count: 0,
            parent: None,
            children: BTreeMap::new(),
        }
    }
}

/// Header table row: an item, its total count and every node carrying it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub item: ItemId,
    pub count: u64,
    /// Node indices in creation order
    pub nodes: Vec<NodeId>,
}

/// A prefix path with multiplicity, as collected from a link chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPath {
    /// Items from just below the root down to the parent of the chain node
    pub items: Vec<ItemId>,
    pub count: u64,
}

/// Frequent pattern tree with its header table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpTree {
    nodes: Vec<FpNode>,
    header: Vec<HeaderEntry>,
    rank: HashMap<ItemId, usize>,
}

impl FpTree {
    /// Build a tree from weighted item paths
    ///
    /// Items whose summed weight is below `min_count` are pruned before
    /// insertion. The iterator is walked twice: once to count, once to insert.
    ///
    /// # Arguments
    ///
    /// * `paths` - `(items, weight)` pairs; items within a path must be distinct
    /// * `min_count` - Absolute support threshold within this tree
    pub fn build<'a, I>(paths: I, min_count: u64) -> Self
    where
        I: IntoIterator<Item = (&'a [ItemId], u64)>,
        I::IntoIter: Clone,
    {
        let paths = paths.into_iter();

        let mut counts: HashMap<ItemId, u64> = HashMap::new();
        for (items, weight) in paths.clone() {
            for &item in items {
                *counts.entry(item).or_insert(0) += weight;
            }
        }

        let mut header: Vec<HeaderEntry> = counts
            .into_iter()
            .filter(|&(_, count)| count >= min_count)
            .map(|(item, count)| HeaderEntry {
                item,
                count,
                nodes: Vec::new(),
            })
            .collect();

        header.sort_by(|a, b| match b.count.cmp(&a.count) {
            Ordering::Equal => a.item.cmp(&b.item),
            other => other,
        });

        let rank: HashMap<ItemId, usize> = header
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.item, position))
            .collect();

        let mut tree = FpTree {
            nodes: vec![FpNode::root()],
            header,
            rank,
        };

        let mut ordered: Vec<ItemId> = Vec::new();
        for (items, weight) in paths {
            if weight == 0 {
                continue;
            }

            ordered.clear();
            ordered.extend(items.iter().copied().filter(|item| tree.rank.contains_key(item)));
            ordered.sort_by_key(|item| tree.rank[item]);

            tree.insert(&ordered, weight);
        }

        tree
    }

    /// Build the global tree from encoded transactions (each of weight 1)
    pub fn from_transactions(transactions: &[Vec<ItemId>], min_count: u64) -> Self {
        Self::build(
            transactions.iter().map(|items| (items.as_slice(), 1)),
            min_count,
        )
    }

    /// Build a conditional tree from a conditional pattern base
    pub fn from_pattern_base(base: &[PrefixPath], min_count: u64) -> Self {
        Self::build(
            base.iter().map(|path| (path.items.as_slice(), path.count)),
            min_count,
        )
    }

    /// Insert one ordered path, sharing existing prefix nodes
    fn insert(&mut self, items: &[ItemId], weight: u64) {
        self.nodes[ROOT].count += weight;

        let mut current = ROOT;
        for &item in items {
            let existing = self.nodes[current].children.get(&item).copied();
            current = match existing {
                Some(child) => {
                    self.nodes[child].count += weight;
                    child
                }
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(FpNode {
                        item: Some(item),
                        count: weight,
                        parent: Some(current),
                        children: BTreeMap::new(),
                    });
                    self.nodes[current].children.insert(item, child);

                    let position = self.rank[&item];
                    self.header[position].nodes.push(child);
                    child
                }
            };
        }
    }

    /// True when no item survived pruning
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Header table, most frequent item first
    pub fn header(&self) -> &[HeaderEntry] {
        &self.header
    }

    pub fn node(&self, id: NodeId) -> &FpNode {
        &self.nodes[id]
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The items and counts along the only root-to-leaf path, if the tree
    /// does not branch anywhere
    ///
    /// Counts are non-increasing from the root downwards.
    pub fn single_path(&self) -> Option<Vec<(ItemId, u64)>> {
        if self.nodes.iter().any(|node| node.children.len() > 1) {
            return None;
        }

        let mut path = Vec::with_capacity(self.nodes.len() - 1);
        let mut current = ROOT;
        while let Some((&item, &child)) = self.nodes[current].children.iter().next() {
            path.push((item, self.nodes[child].count));
            current = child;
        }

        Some(path)
    }

    /// Items on the path from the root down to `node`, excluding `node`
    pub fn prefix_path(&self, node: NodeId) -> Vec<ItemId> {
        let mut items = Vec::new();
        let mut current = self.nodes[node].parent;

        while let Some(id) = current {
            if let Some(item) = self.nodes[id].item {
                items.push(item);
            }
            current = self.nodes[id].parent;
        }

        items.reverse();
        items
    }

    /// Conditional pattern base of the item at `header_index`
    ///
    /// One prefix path per node in the item's link chain, weighted by that
    /// node's count. Nodes hanging directly under the root contribute nothing.
    pub fn conditional_pattern_base(&self, header_index: usize) -> Vec<PrefixPath> {
        self.header[header_index]
            .nodes
            .iter()
            .filter_map(|&node| {
                let items = self.prefix_path(node);
                if items.is_empty() {
                    None
                } else {
                    Some(PrefixPath {
                        items,
                        count: self.nodes[node].count,
                    })
                }
            })
            .collect()
    }
}
