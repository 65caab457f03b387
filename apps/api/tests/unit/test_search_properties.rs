//! Property tests for search over randomly generated catalogs.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use textile_search::{
    application::search_textiles::use_case::{PageLimits, SearchTextilesUseCase},
    domain::{
        shared::pagination::PaginationParams,
        textile::{
            entity::TextileRecord,
            filters::SearchFilters,
            query::SortOrder,
            value_objects::{Color, Material},
        },
    },
    infrastructure::repositories::memory_catalog_store::InMemoryCatalogStore,
};
use uuid::Uuid;

fn price() -> impl Strategy<Value = f64> {
    (0u32..50_000).prop_map(|cents| f64::from(cents) / 100.0)
}

fn record() -> impl Strategy<Value = (f64, usize, usize, i32, i64)> {
    (
        price(),
        0..Color::ALL.len(),
        0..Material::ALL.len(),
        -2i32..10,
        0i64..48,
    )
}

fn catalog() -> impl Strategy<Value = Vec<TextileRecord>> {
    prop::collection::vec(record(), 0..40).prop_map(|rows| {
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        rows.into_iter()
            .enumerate()
            .map(|(i, (price, color, material, quantity, hour))| {
                // Coarse timestamps so that sort ties fall through to the id.
                let created_at = base + Duration::hours(hour);
                TextileRecord {
                    id: Uuid::from_u128(i as u128 + 1),
                    name: format!("Remnant {}", i % 5),
                    description: None,
                    price,
                    currency: "EUR".into(),
                    unit: "metre".into(),
                    primary_color: Color::ALL[color],
                    secondary_color: None,
                    material: Material::ALL[material],
                    composition: None,
                    quantity_available: quantity,
                    image_urls: vec![],
                    thumbnail_url: None,
                    supplier: None,
                    created_at,
                    updated_at: created_at,
                }
            })
            .collect()
    })
}

fn filters() -> impl Strategy<Value = SearchFilters> {
    (
        prop::option::of(price()),
        prop::option::of(price()),
        prop::option::of(0..Color::ALL.len()),
        prop::option::of(0..Material::ALL.len()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(a, b, color, material, in_stock)| {
            let (price_min, price_max) = match (a, b) {
                (Some(a), Some(b)) => (Some(a.min(b)), Some(a.max(b))),
                other => other,
            };
            SearchFilters {
                price_min,
                price_max,
                color: color.map(|i| Color::ALL[i]),
                material: material.map(|i| Material::ALL[i]),
                in_stock,
                query: None,
            }
        })
}

fn sort() -> impl Strategy<Value = SortOrder> {
    prop_oneof![
        Just(SortOrder::Newest),
        Just(SortOrder::Oldest),
        Just(SortOrder::PriceAsc),
        Just(SortOrder::PriceDesc),
        Just(SortOrder::Name),
    ]
}

fn satisfies(record: &TextileRecord, filters: &SearchFilters) -> bool {
    filters.price_min.is_none_or(|min| record.price >= min)
        && filters.price_max.is_none_or(|max| record.price <= max)
        && filters.color.is_none_or(|c| record.primary_color == c)
        && filters.material.is_none_or(|m| record.material == m)
        && filters
            .in_stock
            .is_none_or(|wanted| (record.quantity_available > 0) == wanted)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pages_partition_the_matching_set(
        catalog in catalog(),
        filters in filters(),
        sort in sort(),
        limit in 1i64..12,
    ) {
        let expected: HashSet<Uuid> = catalog
            .iter()
            .filter(|r| satisfies(r, &filters))
            .map(|r| r.id)
            .collect();

        let store = Arc::new(InMemoryCatalogStore::new(catalog));
        let service = SearchTextilesUseCase::new(store, PageLimits::default());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let first = runtime
            .block_on(service.search(&filters, sort, Some(PaginationParams::new(1, limit))))
            .unwrap();
        prop_assert_eq!(first.total, expected.len() as i64);

        let mut seen = HashSet::new();
        let mut previous: Option<TextileRecord> = None;
        for page in 1..=first.total_pages {
            let result = runtime
                .block_on(service.search(&filters, sort, Some(PaginationParams::new(page, limit))))
                .unwrap();
            prop_assert!(result.items.len() as i64 <= limit);
            prop_assert_eq!(result.total, first.total);

            for item in result.items {
                prop_assert!(satisfies(&item, &filters));
                if let Some(prev) = &previous {
                    prop_assert!(sort.compare(prev, &item).is_lt());
                }
                prop_assert!(seen.insert(item.id));
                previous = Some(item);
            }
        }
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn facet_counts_ignore_only_their_own_dimension(
        catalog in catalog(),
        filters in filters(),
    ) {
        let relaxed_color = SearchFilters { color: None, ..filters.clone() };
        let expected: i64 = catalog
            .iter()
            .filter(|r| satisfies(r, &relaxed_color))
            .count() as i64;

        let store = Arc::new(InMemoryCatalogStore::new(catalog));
        let service = SearchTextilesUseCase::new(store, PageLimits::default());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let result = runtime
            .block_on(service.search(&filters, SortOrder::Newest, None))
            .unwrap();

        let counted: i64 = result.facets.colors.iter().map(|f| f.count).sum();
        prop_assert_eq!(counted, expected);
        prop_assert!(result.facets.colors.iter().all(|f| f.count > 0));
    }
}
