//! # Section Reordering
//!
//! Array-move helpers for the home page's section list, plus the drop
//! event a drag engine reports when a section is released.

use serde::{Deserialize, Serialize};

use crate::errors::ReorderError;
use crate::flatten::{SectionItem, SectionKey};

/// Move the element at `from` to `to`, shifting the elements in between.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, ReorderError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(ReorderError::OutOfRange { index, len });
        }
    }

    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Ok(moved)
}

/// Move the section named `dragged` into the slot held by `target`.
///
/// Dropping a section on itself is a no-op. Names must be unique, since a
/// repeated name cannot say which copy was dragged.
pub fn reorder(sections: &[String], dragged: &str, target: &str) -> Result<Vec<String>, ReorderError> {
    if dragged == target {
        return Ok(sections.to_vec());
    }

    let from = unique_position(sections, dragged)?;
    let to = unique_position(sections, target)?;
    move_item(sections, from, to)
}

fn unique_position(sections: &[String], name: &str) -> Result<usize, ReorderError> {
    let mut hits = sections
        .iter()
        .enumerate()
        .filter(|(_, s)| s.as_str() == name)
        .map(|(i, _)| i);

    let first = hits
        .next()
        .ok_or_else(|| ReorderError::UnknownId(name.to_string()))?;
    if hits.next().is_some() {
        return Err(ReorderError::DuplicateId(name.to_string()));
    }
    Ok(first)
}

/// Drop event from the drag engine. `over_id` is absent when the section
/// was released outside any slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDrop {
    pub active_id: SectionKey,
    #[serde(default)]
    pub over_id: Option<SectionKey>,
}

impl SectionDrop {
    pub fn new(active: SectionKey, over: Option<SectionKey>) -> Self {
        Self {
            active_id: active,
            over_id: over,
        }
    }

    /// Resolve the keys to `(from, to)` indices. `None` means nothing moves.
    pub fn resolve(&self, items: &[SectionItem]) -> Result<Option<(usize, usize)>, ReorderError> {
        let Some(over) = &self.over_id else {
            return Ok(None);
        };
        if *over == self.active_id {
            return Ok(None);
        }

        let index_of = |key: &SectionKey| {
            items
                .iter()
                .position(|item| item.key == *key)
                .ok_or_else(|| ReorderError::UnknownId(key.to_string()))
        };
        Ok(Some((index_of(&self.active_id)?, index_of(over)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<String> {
        ["Hero", "Features", "Testimonials", "CTA", "Footer"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn items(names: &[&str]) -> Vec<SectionItem> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| SectionItem {
                key: SectionKey::from_index(i),
                name: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_reorder_forward() {
        let out = reorder(&sections(), "Hero", "CTA").unwrap();
        assert_eq!(out, vec!["Features", "Testimonials", "CTA", "Hero", "Footer"]);
    }

    #[test]
    fn test_reorder_backward() {
        let out = reorder(&sections(), "Footer", "Features").unwrap();
        assert_eq!(out, vec!["Hero", "Footer", "Features", "Testimonials", "CTA"]);
    }

    #[test]
    fn test_reorder_same_is_noop() {
        assert_eq!(reorder(&sections(), "CTA", "CTA").unwrap(), sections());
    }

    #[test]
    fn test_reorder_unknown_name() {
        assert_eq!(
            reorder(&sections(), "Pricing", "Hero"),
            Err(ReorderError::UnknownId("Pricing".to_string()))
        );
    }

    #[test]
    fn test_reorder_ambiguous_name() {
        let dup = vec!["CTA".to_string(), "Hero".to_string(), "CTA".to_string()];
        assert_eq!(
            reorder(&dup, "CTA", "Hero"),
            Err(ReorderError::DuplicateId("CTA".to_string()))
        );
    }

    #[test]
    fn test_reorder_preserves_multiset() {
        let mut before = sections();
        let mut after = reorder(&before, "Testimonials", "Hero").unwrap();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_move_item_out_of_range() {
        assert_eq!(
            move_item(&[1, 2, 3], 0, 3),
            Err(ReorderError::OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_drop_resolves_duplicate_names_by_key() {
        let list = items(&["CTA", "Hero", "CTA"]);
        let drop = SectionDrop::new(SectionKey::from_index(2), Some(SectionKey::from_index(0)));
        assert_eq!(drop.resolve(&list).unwrap(), Some((2, 0)));
    }

    #[test]
    fn test_drop_outside_or_on_self_is_noop() {
        let list = items(&["Hero", "CTA"]);
        assert_eq!(SectionDrop::new(SectionKey::from_index(0), None).resolve(&list).unwrap(), None);

        let same = SectionDrop::new(SectionKey::from_index(1), Some(SectionKey::from_index(1)));
        assert_eq!(same.resolve(&list).unwrap(), None);
    }

    #[test]
    fn test_drop_wire_shape() {
        let drop: SectionDrop =
            serde_json::from_str(r#"{"activeId":"section-1","overId":"section-3"}"#).unwrap();
        assert_eq!(drop.active_id, SectionKey::from_index(1));
        assert_eq!(drop.over_id, Some(SectionKey::from_index(3)));
    }
}
