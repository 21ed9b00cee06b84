//! Transaction-related types for the basket miner
//!
//! Raw transactions hold item labels exactly as the reader produced them.
//! The mining phase works on dense integer codes instead.

/// A single basket: distinct, trimmed, non-empty item labels
///
/// Item order within a basket carries no meaning.
pub type Transaction = Vec<String>;

/// Dense integer code of an item for the mining phase
///
/// Codes are assigned by descending frequency, so code 0 is the most frequent
/// surviving item. The mapping is only valid for one analysis run.
pub type ItemId = u32;

/// A set of item codes, kept sorted ascending (most frequent item first)
pub type Itemset = Vec<ItemId>;
