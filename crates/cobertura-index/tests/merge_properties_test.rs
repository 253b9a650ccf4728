//! Property tests for whole-category merging

use cobertura_core::models::{Category, IndexRecord, Institution, SearchIndex};
use cobertura_index::merge;
use proptest::prelude::*;

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Urban),
        Just(Category::Rural),
        Just(Category::Other("hospital".to_string())),
    ]
}

fn record_strategy() -> impl Strategy<Value = IndexRecord> {
    (
        "[A-Za-zÁÉÑ ]{1,12}",
        "[a-z]{0,8}",
        category_strategy(),
        -180.0..180.0_f64,
        -90.0..90.0_f64,
    )
        .prop_map(|(name, municipality, category, lon, lat)| {
            IndexRecord::new(name, municipality, Institution::Ssd, [lon, lat], category)
        })
}

fn index_strategy() -> impl Strategy<Value = SearchIndex> {
    prop::collection::vec(record_strategy(), 0..30).prop_map(SearchIndex::new)
}

fn urban_records() -> impl Strategy<Value = Vec<IndexRecord>> {
    prop::collection::vec(record_strategy(), 0..20).prop_map(|records| {
        records
            .into_iter()
            .map(|mut r| {
                r.category = Some(Category::Urban);
                r
            })
            .collect()
    })
}

fn sorted_keys(index: &SearchIndex) -> Vec<String> {
    let mut keys: Vec<String> =
        index.records().iter().map(|r| serde_json::to_string(r).unwrap()).collect();
    keys.sort();
    keys
}

proptest! {
    #[test]
    fn merge_output_is_sorted(existing in index_strategy(), new_records in urban_records()) {
        let outcome = merge(existing, &Category::Urban, new_records);
        prop_assert!(outcome.index.is_sorted());
    }

    #[test]
    fn merge_is_idempotent(existing in index_strategy(), new_records in urban_records()) {
        let once = merge(existing, &Category::Urban, new_records.clone()).index;
        let twice = merge(once.clone(), &Category::Urban, new_records).index;
        prop_assert_eq!(sorted_keys(&once), sorted_keys(&twice));
    }

    #[test]
    fn merge_leaves_other_categories_alone(
        existing in index_strategy(),
        new_records in urban_records(),
    ) {
        let others = |index: &SearchIndex| {
            let mut keys: Vec<String> = index
                .records()
                .iter()
                .filter(|r| !r.is_category(&Category::Urban))
                .map(|r| serde_json::to_string(r).unwrap())
                .collect();
            keys.sort();
            keys
        };

        let before = others(&existing);
        let outcome = merge(existing, &Category::Urban, new_records.clone());

        prop_assert_eq!(others(&outcome.index), before);
        prop_assert_eq!(outcome.added, new_records.len());
        prop_assert_eq!(outcome.index.len(), outcome.retained + outcome.added);
    }
}
