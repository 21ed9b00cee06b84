//! Recursive FP-growth
//!
//! Enumerates every itemset meeting the support threshold without generating
//! candidates. For the current tree and suffix:
//! 1. A tree without branches is closed out directly: every subset of its path,
//!    joined with the suffix, is frequent with the count of its deepest node.
//! 2. Otherwise each header item, least frequent first, is emitted with the
//!    suffix, its conditional pattern base is collected, a conditional tree is
//!    built from it and the recursion continues with the item added to the
//!    suffix.
//!
//! Every itemset is produced exactly once. Results go to a caller-owned
//! buffer so parallel branches can each fill their own.

use crate::core::fp_tree::FpTree;
use crate::core::traits::PatternMiner;
use crate::types::{FrequentItemset, ItemId, MiningError};

/// Thresholds the recursion needs at every level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningLimits {
    /// Absolute support threshold
    pub min_count: u64,
    /// Longest itemset to emit, if bounded
    pub max_len: Option<usize>,
}

impl MiningLimits {
    pub fn new(min_count: u64, max_len: Option<usize>) -> Self {
        Self { min_count, max_len }
    }

    /// True when an itemset of `len` items may still grow
    fn can_extend(&self, len: usize) -> bool {
        self.max_len.map_or(true, |max| len < max)
    }
}

/// Mine `tree` for all frequent itemsets extending `suffix`
///
/// # Arguments
///
/// * `tree` - Tree (global or conditional) to mine
/// * `suffix` - Items every emitted itemset contains
/// * `limits` - Support threshold and length bound
/// * `out` - Buffer receiving the itemsets
pub fn grow(tree: &FpTree, suffix: &[ItemId], limits: MiningLimits, out: &mut Vec<FrequentItemset>) {
    if tree.is_empty() || !limits.can_extend(suffix.len()) {
        return;
    }

    if let Some(path) = tree.single_path() {
        emit_path_subsets(&path, suffix, limits, out);
        return;
    }

    for header_index in (0..tree.header().len()).rev() {
        grow_item(tree, header_index, suffix, limits, out);
    }
}

/// Mine the branch rooted at one header item of `tree`
///
/// Emits `{item} ∪ suffix` and everything that extends it. Branches of the
/// same tree share nothing but read access to it.
pub fn grow_item(
    tree: &FpTree,
    header_index: usize,
    suffix: &[ItemId],
    limits: MiningLimits,
    out: &mut Vec<FrequentItemset>,
) {
    let entry = &tree.header()[header_index];

    let mut itemset = Vec::with_capacity(suffix.len() + 1);
    itemset.push(entry.item);
    itemset.extend_from_slice(suffix);

    out.push(FrequentItemset::new(itemset.clone(), entry.count));

    if !limits.can_extend(itemset.len()) {
        return;
    }

    let base = tree.conditional_pattern_base(header_index);
    if base.is_empty() {
        return;
    }

    let conditional = FpTree::from_pattern_base(&base, limits.min_count);
    grow(&conditional, &itemset, limits, out);
}

/// Emit every non-empty subset of a single path, joined with the suffix
///
/// Path counts are non-increasing, so a subset's support is the count of its
/// deepest node.
fn emit_path_subsets(
    path: &[(ItemId, u64)],
    suffix: &[ItemId],
    limits: MiningLimits,
    out: &mut Vec<FrequentItemset>,
) {
    let room = limits
        .max_len
        .map_or(path.len(), |max| max.saturating_sub(suffix.len()));

    // (items, count) of every subset built from the nodes seen so far
    let mut subsets: Vec<(Vec<ItemId>, u64)> = Vec::new();
    for &(item, count) in path {
        let mut extended: Vec<(Vec<ItemId>, u64)> = subsets
            .iter()
            .filter(|(items, _)| items.len() < room)
            .map(|(items, _)| {
                let mut items = items.clone();
                items.push(item);
                (items, count)
            })
            .collect();

        if room > 0 {
            extended.push((vec![item], count));
        }
        subsets.extend(extended);
    }

    for (mut items, count) in subsets {
        items.extend_from_slice(suffix);
        out.push(FrequentItemset::new(items, count));
    }
}

/// Single-threaded FP-growth over the whole tree
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialMiner;

impl PatternMiner for SequentialMiner {
    fn mine(&self, tree: FpTree, limits: MiningLimits) -> Result<Vec<FrequentItemset>, MiningError> {
        let mut out = Vec::new();
        grow(&tree, &[], limits, &mut out);
        Ok(out)
    }
}
