use crate::domain::{PropertyListing, PropertySort};
use crate::tests::utils::{app, body_text, get, FakeBackend};
use std::sync::Arc;

fn listing(id: u32, total: i64) -> PropertyListing {
    PropertyListing {
        id: format!("prop-{id}"),
        name: format!("House {id}"),
        location: Some("Kigali".into()),
        property_type: Some("apartment".into()),
        monthly_price: 150_000,
        available_rooms: 2,
        total_count: total,
    }
}

#[test]
fn listing_is_public_and_paged() {
    let backend = Arc::new(FakeBackend {
        listings: (1..=12).map(|i| listing(i, 30)).collect(),
        ..FakeBackend::default()
    });
    let ctx = app(backend.clone());

    let resp = get(&ctx, "/properties?page=2&sort=price_desc", None);

    assert_eq!(resp.status(), 200);
    let body = body_text(resp);
    assert!(body.contains("House 12"));
    assert!(body.contains("150,000 RWF"));
    assert!(body.contains("Page 2 of 3"));
    assert!(body.contains("/properties?page=1&amp;sort=price_desc"));
    assert!(body.contains("/properties?page=3&amp;sort=price_desc"));

    let queries = backend.queries.lock().unwrap();
    assert_eq!(queries[0].page, 2);
    assert_eq!(queries[0].sort, PropertySort::PriceDesc);
    assert_eq!(queries[0].offset(), 12);
}

#[test]
fn junk_paging_falls_back_to_first_page_newest() {
    let backend = Arc::new(FakeBackend::default());
    let ctx = app(backend.clone());

    let body = body_text(get(&ctx, "/properties?page=-4&sort=cheapest", None));

    assert!(body.contains("No properties are listed right now."));
    let queries = backend.queries.lock().unwrap();
    assert_eq!(queries[0].page, 1);
    assert_eq!(queries[0].sort, PropertySort::Newest);
}
