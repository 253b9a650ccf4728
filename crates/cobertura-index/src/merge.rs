//! Whole-category replacement of index records.

use cobertura_core::models::{Category, IndexRecord, SearchIndex};
use serde::Serialize;

/// Merged index plus the counts reported to the operator
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub index: SearchIndex,
    /// Records of other categories carried over unchanged
    pub retained: usize,
    /// Prior records of the rebuilt category that were dropped
    pub replaced: usize,
    /// Records contributed by this run
    pub added: usize,
}

/// Counts only, for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeCounts {
    pub retained: usize,
    pub replaced: usize,
    pub added: usize,
    pub total: usize,
}

impl MergeOutcome {
    pub fn counts(&self) -> MergeCounts {
        MergeCounts {
            retained: self.retained,
            replaced: self.replaced,
            added: self.added,
            total: self.index.len(),
        }
    }
}

/// Replace every record of `category` with `new_records`.
///
/// Records of other categories are kept as they are. The combined list is
/// stably sorted by display name. Prior records of `category` that are not in
/// `new_records` are gone afterwards: this is a rebuild, not an upsert.
pub fn merge(
    existing: SearchIndex,
    category: &Category,
    new_records: Vec<IndexRecord>,
) -> MergeOutcome {
    let (replaced, mut records): (Vec<IndexRecord>, Vec<IndexRecord>) =
        existing.into_records().into_iter().partition(|record| record.is_category(category));

    let retained = records.len();
    let added = new_records.len();
    records.extend(new_records);

    let mut index = SearchIndex::new(records);
    index.sort();

    MergeOutcome { index, retained, replaced: replaced.len(), added }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobertura_core::models::Institution;

    fn record(name: &str, category: Category) -> IndexRecord {
        IndexRecord::new(name, "Durango", Institution::Issste, [0.0, 0.0], category)
    }

    #[test]
    fn test_replaces_only_target_category() {
        let existing = SearchIndex::new(vec![
            record("Loc A", Category::Rural),
            record("AGEB 001", Category::Urban),
            record("AGEB 003", Category::Urban),
        ]);

        let outcome = merge(existing, &Category::Urban, vec![record("AGEB 002", Category::Urban)]);

        assert_eq!(outcome.retained, 1);
        assert_eq!(outcome.replaced, 2);
        assert_eq!(outcome.added, 1);
        let names: Vec<&str> = outcome.index.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["AGEB 002", "Loc A"]);
    }

    #[test]
    fn test_records_without_category_are_retained() {
        let mut untagged = record("Legacy", Category::Rural);
        untagged.category = None;

        let outcome = merge(SearchIndex::new(vec![untagged.clone()]), &Category::Urban, vec![]);
        assert_eq!(outcome.index.records(), &[untagged]);
        assert_eq!(outcome.counts().total, 1);
    }

    #[test]
    fn test_empty_rebuild_clears_category() {
        let existing = SearchIndex::new(vec![record("Loc A", Category::Rural)]);
        let outcome = merge(existing, &Category::Rural, vec![]);
        assert!(outcome.index.is_empty());
        assert_eq!(outcome.replaced, 1);
    }

    #[test]
    fn test_sort_is_code_point_order() {
        let outcome = merge(
            SearchIndex::default(),
            &Category::Rural,
            vec![
                record("Ñuñoa", Category::Rural),
                record("Zaragoza", Category::Rural),
                record("agua", Category::Rural),
                record("Abasolo", Category::Rural),
            ],
        );
        let names: Vec<&str> = outcome.index.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Abasolo", "Zaragoza", "agua", "Ñuñoa"]);
    }
}
