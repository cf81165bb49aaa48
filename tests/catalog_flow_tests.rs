//! End-to-end flows over the public API: record observations, query price
//! views, resolve a shopping list, delete history, persist and reload.

use price_tracker::{
    aggregate, resolve_local, Catalog, CatalogStore, JsonStore, MatchStatus, Observation,
    SqliteStore,
};

fn observe(barcode: Option<&str>, name: &str, supermarket: &str, price: f64) -> Observation {
    Observation {
        barcode: barcode.map(str::to_string),
        name: name.to_string(),
        supermarket: supermarket.to_string(),
        price,
    }
}

/// A week of shopping: two scanned products across three stores, one manual
/// entry recorded twice.
fn build_catalog() -> Catalog {
    Catalog::default()
        .upsert(&observe(Some("4006381333931"), "Milk", "FreshMart", 3.49))
        .unwrap()
        .upsert(&observe(Some("4006381333931"), "Organic Whole Milk", "MegaGrocer", 2.99))
        .unwrap()
        .upsert(&observe(Some("4006381333931"), "Organic Whole Milk", "CornerShop", 3.20))
        .unwrap()
        .upsert(&observe(Some("5010029201234"), "Porridge Oats", "MegaGrocer", 1.15))
        .unwrap()
        .upsert(&observe(None, "Fresh Bread", "CornerShop", 1.99))
        .unwrap()
        .upsert(&observe(None, "fresh bread", "FreshMart", 1.79))
        .unwrap()
}

#[test]
fn observations_accumulate_and_merge_by_identity() {
    let catalog = build_catalog();

    assert_eq!(catalog.len(), 3);

    let milk = catalog.find("4006381333931").unwrap();
    assert_eq!(milk.price_history.len(), 3);
    // The longer scanned name replaced the original short one
    assert_eq!(milk.name, "Organic Whole Milk");

    // Manual entries merged by normalized name, keeping the first spelling
    let bread = catalog.find("manual:fresh-bread").unwrap();
    assert_eq!(bread.price_history.len(), 2);
    assert_eq!(bread.name, "Fresh Bread");
}

#[test]
fn price_views_answer_where_to_buy() {
    let catalog = build_catalog();
    let milk = catalog.find("4006381333931").unwrap();

    assert_eq!(aggregate::lowest(&milk.price_history).unwrap().price, 2.99);
    assert_eq!(aggregate::highest(&milk.price_history).unwrap().price, 3.49);

    let best = aggregate::best_store_for(&milk.price_history).unwrap();
    assert_eq!(best.supermarket, "MegaGrocer");
    assert_eq!(best.price, 2.99);
}

#[test]
fn shopping_list_resolves_against_the_catalog() {
    let catalog = build_catalog();
    let list = vec![
        "milk".to_string(),
        "bread".to_string(),
        "bananas".to_string(),
    ];

    let resolutions = resolve_local(&list, &catalog);

    assert_eq!(resolutions.len(), 3);

    assert_eq!(resolutions[0].status, MatchStatus::Found);
    assert_eq!(
        resolutions[0].matched_product_name.as_deref(),
        Some("Organic Whole Milk")
    );
    assert_eq!(resolutions[0].best_supermarket.as_deref(), Some("MegaGrocer"));
    assert_eq!(resolutions[0].lowest_price, Some(2.99));

    assert_eq!(resolutions[1].status, MatchStatus::Found);
    assert_eq!(resolutions[1].best_supermarket.as_deref(), Some("FreshMart"));
    assert_eq!(resolutions[1].lowest_price, Some(1.79));

    assert_eq!(resolutions[2].status, MatchStatus::NotFound);
    assert!(resolutions[2].lowest_price.is_none());
}

#[test]
fn deleting_history_cascades_to_the_product() {
    let mut catalog = build_catalog();

    // Delete the oat entry; its product only had one observation
    let entry_id = catalog.find("5010029201234").unwrap().price_history[0].id.clone();
    catalog = catalog.delete_entry("5010029201234", &entry_id);

    assert!(catalog.find("5010029201234").is_none());
    assert_eq!(catalog.len(), 2);

    // Deleting one of several entries keeps the product
    let milk_entry = catalog.find("4006381333931").unwrap().price_history[0].id.clone();
    catalog = catalog.delete_entry("4006381333931", &milk_entry);
    assert_eq!(catalog.find("4006381333931").unwrap().price_history.len(), 2);
}

#[test]
fn rejected_observation_leaves_the_catalog_usable() {
    let catalog = build_catalog();

    let result = catalog.upsert(&observe(Some("4006381333931"), "Milk", "FreshMart", -1.0));
    assert!(result.is_err());

    // The snapshot we still hold answers queries exactly as before
    assert_eq!(catalog.find("4006381333931").unwrap().price_history.len(), 3);
}

#[test]
fn catalog_survives_a_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("products.json"));
    let catalog = build_catalog();

    store.save(&catalog).unwrap();
    let reloaded = store.load().unwrap();

    assert_eq!(reloaded, catalog);

    // A reloaded catalog keeps resolving identically
    let list = vec!["milk".to_string()];
    assert_eq!(resolve_local(&list, &reloaded), resolve_local(&list, &catalog));
}

#[test]
fn catalog_survives_a_sqlite_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("products.db"));
    let catalog = build_catalog();

    store.save(&catalog).unwrap();
    let reloaded = store.load().unwrap();

    assert_eq!(reloaded, catalog);
}

#[test]
fn stores_are_interchangeable_behind_the_trait() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = build_catalog();

    let stores: Vec<Box<dyn CatalogStore>> = vec![
        Box::new(JsonStore::new(dir.path().join("products.json"))),
        Box::new(SqliteStore::new(dir.path().join("products.db"))),
    ];

    for store in &stores {
        store.save(&catalog).unwrap();
        assert_eq!(store.load().unwrap(), catalog);
    }
}
