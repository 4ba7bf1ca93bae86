//! End-to-end listing controller tests against a wiremock catalog API.

use std::time::Duration;

use shopfront_catalog::{
    CatalogClient, CategoryTree, ListingController, ListingPhase, ListingSource, Refresh,
};
use shopfront_core::{build_query, FilterState};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIVE_MINUTES: Duration = Duration::from_secs(300);

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::new(base_url, 30, "shopfront-test/0.1")
        .expect("client construction should not fail")
}

fn listing_controller(server: &MockServer, source: ListingSource) -> ListingController {
    ListingController::new(
        test_client(&server.uri()),
        source,
        "https://cdn.shop.example/images",
        FIVE_MINUTES,
    )
}

fn coat_page() -> serde_json::Value {
    serde_json::json!({
        "content": [
            {
                "id": 301,
                "title": "Wool Coat",
                "price": 1000.0,
                "discountedPrice": 800.0,
                "colorVariants": [
                    { "name": "camel", "photos": ["coat-camel-1.jpg"] }
                ],
                "sizeVariants": [
                    { "name": "M", "quantity": 2 },
                    { "name": "L", "quantity": 1 }
                ],
                "ratings": [
                    { "userId": 1, "rating": 4.0 },
                    { "userId": 2, "rating": 5.0 }
                ]
            }
        ],
        "currentPage": 1,
        "totalPages": 1,
        "totalElements": 1,
        "pageSize": 12
    })
}

#[tokio::test]
async fn load_normalizes_fetched_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coat_page()))
        .mount(&server)
        .await;

    let mut controller = listing_controller(&server, ListingSource::All);
    controller.load(&FilterState::default()).await;

    assert_eq!(controller.phase(), ListingPhase::Ready);
    let page = controller.page().expect("page should be loaded");
    assert_eq!(page.total_elements, 1);

    let coat = &page.products[0];
    // Derived discount from the price pair, no explicit field present.
    assert_eq!(coat.discount_percent, 20);
    assert_eq!(
        coat.image_url,
        "https://cdn.shop.example/images/coat-camel-1.jpg"
    );
    assert_eq!(coat.total_stock, 3);
    assert!((coat.rating_avg - 4.5).abs() < f64::EPSILON);
    assert_eq!(coat.rating_count, 2);
}

#[tokio::test]
async fn second_load_within_ttl_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coat_page()))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = listing_controller(&server, ListingSource::All);
    let filter = FilterState::default();

    controller.load(&filter).await;
    controller.load(&filter).await;

    assert_eq!(controller.phase(), ListingPhase::Ready);
    assert_eq!(controller.products().len(), 1);
    // The expect(1) on the mock verifies only one request went out.
}

#[tokio::test]
async fn different_pages_are_distinct_cache_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coat_page()))
        .expect(2)
        .mount(&server)
        .await;

    let mut controller = listing_controller(&server, ListingSource::All);
    controller.load(&FilterState::default()).await;
    controller
        .load(&FilterState {
            page: 2,
            ..FilterState::default()
        })
        .await;
}

#[tokio::test]
async fn force_refresh_bypasses_the_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coat_page()))
        .expect(2)
        .mount(&server)
        .await;

    let mut controller = listing_controller(&server, ListingSource::All);
    let filter = FilterState::default();

    controller.load(&filter).await;
    controller.load_with(&filter, Refresh::Force).await;

    assert_eq!(controller.phase(), ListingPhase::Ready);
}

#[tokio::test]
async fn invalidate_forces_a_refetch_on_next_load() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coat_page()))
        .expect(2)
        .mount(&server)
        .await;

    let mut controller = listing_controller(&server, ListingSource::All);
    let filter = FilterState::default();

    controller.load(&filter).await;
    controller.invalidate(&filter);
    controller.load(&filter).await;
}

#[tokio::test]
async fn failed_refresh_preserves_previous_page() {
    let server = MockServer::start().await;

    // First request succeeds, everything after it fails.
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coat_page()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = listing_controller(&server, ListingSource::All);
    let filter = FilterState::default();

    controller.load(&filter).await;
    assert_eq!(controller.phase(), ListingPhase::Ready);

    controller.load_with(&filter, Refresh::Force).await;
    assert_eq!(controller.phase(), ListingPhase::Error);
    assert!(controller.error().is_some());
    // Last-good data is still there for the view.
    assert_eq!(controller.products().len(), 1);
    assert_eq!(controller.products()[0].id, 301);
}

#[tokio::test]
async fn overlapping_loads_resolve_to_the_newest_filter() {
    let server = MockServer::start().await;

    let page_a = serde_json::json!({
        "content": [{ "id": 1, "title": "A", "price": 10.0 }],
        "currentPage": 1, "totalPages": 1, "totalElements": 1, "pageSize": 12
    });
    let page_b = serde_json::json!({
        "content": [{ "id": 2, "title": "B", "price": 10.0 }],
        "currentPage": 1, "totalPages": 1, "totalElements": 1, "pageSize": 12
    });

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page_a))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page_b))
        .mount(&server)
        .await;

    let mut controller = listing_controller(&server, ListingSource::All);
    let filter_a = FilterState::default();
    let filter_b = FilterState {
        page: 2,
        ..FilterState::default()
    };

    // Both loads are in flight; B was issued last.
    let generation_a = controller.begin_load();
    let generation_b = controller.begin_load();

    let result_b = controller.fetch_listing(&build_query(&filter_b)).await;
    controller.complete_load(generation_b, result_b);

    // A's response arrives after B's and must be discarded.
    let result_a = controller.fetch_listing(&build_query(&filter_a)).await;
    controller.complete_load(generation_a, result_a);

    assert_eq!(controller.phase(), ListingPhase::Ready);
    assert_eq!(controller.products()[0].id, 2);
}

#[tokio::test]
async fn category_source_presents_embedded_listing_as_one_page() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "id": 7,
        "name": "Coats",
        "parentId": 2,
        "level": 2,
        "products": [
            { "id": 301, "title": "Wool Coat", "price": 1000.0, "discountedPrice": 800.0 },
            { "id": 302, "title": "Rain Coat", "price": 200.0 }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/categories/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let mut controller = listing_controller(&server, ListingSource::Category(7));
    controller.load(&FilterState::default()).await;

    assert_eq!(controller.phase(), ListingPhase::Ready);
    let page = controller.page().expect("page should be loaded");
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.products[0].discount_percent, 20);
}

#[tokio::test]
async fn missing_category_surfaces_as_error_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut controller = listing_controller(&server, ListingSource::Category(404));
    controller.load(&FilterState::default()).await;

    assert_eq!(controller.phase(), ListingPhase::Error);
    assert!(controller.error().is_some_and(shopfront_catalog::CatalogError::is_not_found));
    assert!(controller.products().is_empty());
}

#[tokio::test]
async fn search_source_queries_the_search_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/search"))
        .and(query_param("query", "coat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coat_page()))
        .mount(&server)
        .await;

    let mut controller =
        listing_controller(&server, ListingSource::Search("coat".to_string()));
    controller.load(&FilterState::default()).await;

    assert_eq!(controller.phase(), ListingPhase::Ready);
    assert_eq!(controller.products()[0].title, "Wool Coat");
}

#[tokio::test]
async fn tree_children_or_empty_swallows_only_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories/404/children"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/500/children"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tree = CategoryTree::new(test_client(&server.uri()));

    let children = tree
        .children_or_empty(404)
        .await
        .expect("missing parent should read as leaf");
    assert!(children.is_empty());

    assert!(tree.children_or_empty(500).await.is_err());
}
