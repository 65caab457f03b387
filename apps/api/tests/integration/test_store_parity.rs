//! Runs the Postgres catalog store against a live database and checks it
//! answers every search exactly like the in-memory store.
//!
//! Needs `DATABASE_URL`; without it the tests log a notice and return. Each
//! test works in its own throwaway schema.

use super::helpers::catalog_fixture;
use chrono::{TimeZone, Utc};
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::{str::FromStr, sync::Arc, time::Duration};
use textile_search::{
    application::search_textiles::{
        dto::SearchRequest,
        use_case::{PageLimits, SearchTextilesUseCase},
    },
    domain::textile::{
        entity::TextileRecord,
        repository::CatalogStore,
        value_objects::{Color, Material},
    },
    infrastructure::{
        database::pool::create_pool,
        repositories::{
            memory_catalog_store::InMemoryCatalogStore, sqlx_catalog_store::PgCatalogStore,
        },
    },
};
use uuid::Uuid;

struct TestDatabase {
    admin: PgPool,
    pool: PgPool,
    schema: String,
}

impl TestDatabase {
    async fn create(database_url: &str) -> Self {
        let admin = create_pool(database_url, 1, Duration::from_secs(5))
            .await
            .expect("failed to connect to DATABASE_URL");
        let schema = format!("textile_parity_{}", Uuid::now_v7().simple());
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .expect("failed to create schema");

        let options = PgConnectOptions::from_str(database_url)
            .expect("invalid DATABASE_URL")
            .options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("failed to connect to test schema");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("migrations failed");

        Self {
            admin,
            pool,
            schema,
        }
    }

    async fn teardown(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("failed to drop schema");
    }
}

async fn insert(pool: &PgPool, r: &TextileRecord) {
    sqlx::query(
        "INSERT INTO textiles (id, name, description, price, currency, unit, primary_color,
            secondary_color, material, composition, quantity_available, image_urls,
            thumbnail_url, supplier, created_at, updated_at)
         VALUES ($1, $2, $3, $4::numeric, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
    )
    .bind(r.id)
    .bind(&r.name)
    .bind(&r.description)
    .bind(r.price)
    .bind(&r.currency)
    .bind(&r.unit)
    .bind(r.primary_color.as_str())
    .bind(r.secondary_color.map(|c| c.as_str()))
    .bind(r.material.as_str())
    .bind(&r.composition)
    .bind(r.quantity_available)
    .bind(&r.image_urls)
    .bind(&r.thumbnail_url)
    .bind(&r.supplier)
    .bind(r.created_at)
    .bind(r.updated_at)
    .execute(pool)
    .await
    .expect("failed to seed textile");
}

fn seed_records() -> Vec<TextileRecord> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/seed/catalog.json");
    let raw = std::fs::read_to_string(path).expect("failed to read seed catalog");
    serde_json::from_str(&raw).expect("failed to parse seed catalog")
}

/// Records whose names carry LIKE metacharacters and lowercase initials.
fn awkward_records() -> Vec<TextileRecord> {
    let ts = Utc.with_ymd_and_hms(2026, 2, 14, 8, 0, 0).unwrap();
    let make = |n: u128, name: &str, price: f64, quantity: i32| TextileRecord {
        id: Uuid::from_u128(0xA000 + n),
        name: name.to_string(),
        description: None,
        price,
        currency: "EUR".to_string(),
        unit: "metre".to_string(),
        primary_color: Color::Grey,
        secondary_color: Some(Color::Pink),
        material: Material::Wool,
        composition: Some("80% wool, 20% polyamide".to_string()),
        quantity_available: quantity,
        image_urls: vec![
            "https://cdn.test/a.jpg".to_string(),
            "https://cdn.test/b.jpg".to_string(),
        ],
        thumbnail_url: None,
        supplier: None,
        created_at: ts,
        updated_at: ts,
    };
    vec![
        make(1, "Remnant 50% off", 12.75, 3),
        make(2, "poly_blend offcut", 9.99, -1),
        make(3, "alpaca boucle", 31.4, 0),
    ]
}

fn requests() -> Vec<SearchRequest> {
    let base = SearchRequest::default;
    vec![
        base(),
        SearchRequest {
            price_min: Some(20.0),
            price_max: Some(80.5),
            sort: Some("price_asc".into()),
            limit: Some(10),
            ..base()
        },
        SearchRequest {
            color: Some("grey".into()),
            material: Some("wool".into()),
            ..base()
        },
        SearchRequest {
            in_stock: Some(false),
            sort: Some("oldest".into()),
            ..base()
        },
        SearchRequest {
            in_stock: Some(true),
            sort: Some("name".into()),
            page: Some(2),
            limit: Some(7),
            ..base()
        },
        SearchRequest {
            sort: Some("name".into()),
            limit: Some(100),
            ..base()
        },
        SearchRequest {
            q: Some("50%".into()),
            ..base()
        },
        SearchRequest {
            q: Some("_".into()),
            ..base()
        },
        SearchRequest {
            q: Some("LINEN".into()),
            sort: Some("price_desc".into()),
            ..base()
        },
        SearchRequest {
            material: Some("cotton".into()),
            price_max: Some(150.0),
            page: Some(2),
            limit: Some(3),
            ..base()
        },
    ]
}

struct Stores {
    db: TestDatabase,
    postgres: SearchTextilesUseCase,
    memory: SearchTextilesUseCase,
    pg_store: Arc<PgCatalogStore>,
    records: Vec<TextileRecord>,
}

async fn stores() -> Option<Stores> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres store checks");
        return None;
    };
    let db = TestDatabase::create(&database_url).await;

    let mut records = seed_records();
    records.extend(catalog_fixture());
    records.extend(awkward_records());
    for record in &records {
        insert(&db.pool, record).await;
    }

    let pg_store = Arc::new(PgCatalogStore::new(db.pool.clone()));
    let memory_store = Arc::new(InMemoryCatalogStore::new(records.clone()));
    Some(Stores {
        postgres: SearchTextilesUseCase::new(pg_store.clone(), PageLimits::default()),
        memory: SearchTextilesUseCase::new(memory_store, PageLimits::default()),
        pg_store,
        records,
        db,
    })
}

#[tokio::test]
async fn postgres_and_memory_stores_agree_on_every_search() {
    let Some(stores) = stores().await else {
        return;
    };

    for request in requests() {
        let from_pg = stores
            .postgres
            .execute(request.clone())
            .await
            .expect("postgres search failed");
        let from_memory = stores
            .memory
            .execute(request.clone())
            .await
            .expect("memory search failed");
        assert_eq!(from_pg, from_memory, "stores disagree for {:?}", request);
    }

    stores.db.teardown().await;
}

#[tokio::test]
async fn like_metacharacters_match_literally_in_postgres() {
    let Some(stores) = stores().await else {
        return;
    };

    let percent = SearchRequest {
        q: Some("50%".into()),
        ..Default::default()
    };
    let result = stores.postgres.execute(percent).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "Remnant 50% off");

    let underscore = SearchRequest {
        q: Some("_".into()),
        ..Default::default()
    };
    let result = stores.postgres.execute(underscore).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "poly_blend offcut");

    stores.db.teardown().await;
}

#[tokio::test]
async fn name_order_is_byte_order_in_postgres() {
    let Some(stores) = stores().await else {
        return;
    };

    let request = SearchRequest {
        sort: Some("name".into()),
        limit: Some(100),
        ..Default::default()
    };
    let result = stores.postgres.execute(request).await.unwrap();
    let names: Vec<&str> = result.items.iter().map(|r| r.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.last().copied(), Some("poly_blend offcut"));

    stores.db.teardown().await;
}

#[tokio::test]
async fn stored_rows_decode_back_to_the_inserted_records() {
    let Some(stores) = stores().await else {
        return;
    };

    for record in &stores.records {
        let found = stores
            .pg_store
            .find_by_id(record.id)
            .await
            .expect("lookup failed");
        assert_eq!(found.as_ref(), Some(record));
    }
    assert!(
        stores
            .pg_store
            .find_by_id(Uuid::from_u128(0xDEAD))
            .await
            .unwrap()
            .is_none()
    );

    stores.db.teardown().await;
}
