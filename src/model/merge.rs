// File: ./src/model/merge.rs
use crate::model::block::{BlockCandidate, BlockTemplate, DatedBlockCandidate};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A block that can be collapsed with others describing the same time slot.
///
/// The key orders by day first, then start, then end, which is also the
/// output order. `is_class` is deliberately not part of the key.
pub trait Mergeable {
    type Key: Ord;

    fn dedup_key(&self) -> Self::Key;
    fn is_class_mut(&mut self) -> &mut bool;
    fn label_mut(&mut self) -> &mut Option<String>;
}

impl Mergeable for BlockCandidate {
    type Key = (u32, u16, u16);

    fn dedup_key(&self) -> Self::Key {
        (
            self.weekday.number_from_monday(),
            self.range.start_min,
            self.range.end_min,
        )
    }
    fn is_class_mut(&mut self) -> &mut bool {
        &mut self.is_class
    }
    fn label_mut(&mut self) -> &mut Option<String> {
        &mut self.label
    }
}

impl Mergeable for DatedBlockCandidate {
    type Key = (NaiveDate, u16, u16);

    fn dedup_key(&self) -> Self::Key {
        (self.date, self.range.start_min, self.range.end_min)
    }
    fn is_class_mut(&mut self) -> &mut bool {
        &mut self.is_class
    }
    fn label_mut(&mut self) -> &mut Option<String> {
        &mut self.label
    }
}

/// Folds `later` into `kept`: CLASS is sticky, the first non-null label wins.
fn merge_into<T: Mergeable>(kept: &mut T, mut later: T) {
    if *later.is_class_mut() {
        *kept.is_class_mut() = true;
    }
    if kept.label_mut().is_none() {
        *kept.label_mut() = later.label_mut().take();
    }
}

/// Collapses duplicates and returns the survivors sorted by key.
pub fn dedup_blocks<T: Mergeable>(candidates: Vec<T>) -> Vec<T> {
    let mut by_key: BTreeMap<T::Key, T> = BTreeMap::new();
    for candidate in candidates {
        match by_key.entry(candidate.dedup_key()) {
            Entry::Occupied(mut kept) => merge_into(kept.get_mut(), candidate),
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }
    by_key.into_values().collect()
}

/// Canonical recurring templates from weekday-keyed candidates.
pub fn canonical_templates(candidates: Vec<BlockCandidate>) -> Vec<BlockTemplate> {
    dedup_blocks(candidates)
        .into_iter()
        .map(BlockTemplate::from)
        .collect()
}
