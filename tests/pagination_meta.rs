use storefront_api::response::Meta;
use storefront_api::routes::params::{ProductQuery, SortOrder};

#[test]
fn page_count_rounds_up() {
    let meta = Meta::new(1, 3, 7);
    assert_eq!(meta.page_count, 3);
    assert!(!meta.has_previous_page);
    assert!(meta.has_next_page);

    let last = Meta::new(3, 3, 7);
    assert!(last.has_previous_page);
    assert!(!last.has_next_page);
}

#[test]
fn exact_multiple_has_no_partial_page() {
    let meta = Meta::new(2, 5, 10);
    assert_eq!(meta.page_count, 2);
    assert!(!meta.has_next_page);
}

#[test]
fn empty_result_has_zero_pages() {
    let meta = Meta::new(1, 10, 0);
    assert_eq!(meta.page_count, 0);
    assert!(!meta.has_next_page);
    assert!(!meta.has_previous_page);
}

#[test]
fn query_defaults_and_skip() {
    let options = ProductQuery::default().page_options();
    assert_eq!(options.page, 1);
    assert_eq!(options.take, 10);
    assert_eq!(options.order, SortOrder::Asc);
    assert_eq!(options.skip(), 0);

    let options = ProductQuery {
        page: Some(4),
        take: Some(25),
        order: Some(SortOrder::Desc),
        ..Default::default()
    }
    .page_options();
    assert_eq!(options.skip(), 75);
    assert_eq!(options.order, SortOrder::Desc);
}

#[test]
fn filters_drop_blanks_and_lowercase() {
    let filters = ProductQuery {
        keyword: Some("   ".into()),
        category: Some(" Shoes ".into()),
        size: Some("XL".into()),
        color: None,
        ..Default::default()
    }
    .filters();
    assert_eq!(filters.keyword, None);
    assert_eq!(filters.category.as_deref(), Some("shoes"));
    assert_eq!(filters.size.as_deref(), Some("xl"));
    assert!(filters.needs_variant_join());
}

#[test]
fn skip_saturates_for_far_pages() {
    let options = ProductQuery {
        page: Some(i64::MAX),
        take: Some(50),
        ..Default::default()
    }
    .page_options();
    assert_eq!(options.skip(), i64::MAX as u64);
}
