use crate::domain::textile::{
    entity::TextileRecord,
    errors::DomainError,
    facets::{FacetValue, PriceRange},
    query::{CatalogQuery, FacetField, Predicate, SortOrder},
    repository::CatalogStore,
    value_objects::{Color, Material},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const TEXTILE_COLUMNS: &str = "SELECT id, name, description, price::float8 AS price, currency, unit,
        primary_color, secondary_color, material, composition, quantity_available,
        image_urls, thumbnail_url, supplier, created_at, updated_at
 FROM textiles";

/// Columns searched by `Predicate::TextMatches`.
const TEXT_COLUMNS: [&str; 4] = ["name", "description", "composition", "supplier"];

#[derive(Debug, FromRow)]
struct TextileRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: f64,
    currency: String,
    unit: String,
    primary_color: String,
    secondary_color: Option<String>,
    material: String,
    composition: Option<String>,
    quantity_available: i32,
    image_urls: Vec<String>,
    thumbnail_url: Option<String>,
    supplier: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TextileRow> for TextileRecord {
    type Error = DomainError;

    /// Rows with values outside the known enumerations or a non-finite price
    /// are store corruption, not caller mistakes.
    fn try_from(r: TextileRow) -> Result<Self, Self::Error> {
        let malformed = |what: &str, value: &str| {
            error!("Textile {} has malformed {}: '{}'", r.id, what, value);
            DomainError::StoreError(format!("textile {} has malformed {}", r.id, what))
        };

        let primary_color = r
            .primary_color
            .parse::<Color>()
            .map_err(|_| malformed("primary_color", &r.primary_color))?;
        let secondary_color = match r.secondary_color.as_deref() {
            Some(value) => Some(
                value
                    .parse::<Color>()
                    .map_err(|_| malformed("secondary_color", value))?,
            ),
            None => None,
        };
        let material = r
            .material
            .parse::<Material>()
            .map_err(|_| malformed("material", &r.material))?;
        if !r.price.is_finite() {
            return Err(malformed("price", &r.price.to_string()));
        }

        Ok(TextileRecord {
            id: r.id,
            name: r.name,
            description: r.description,
            price: r.price,
            currency: r.currency,
            unit: r.unit,
            primary_color,
            secondary_color,
            material,
            composition: r.composition,
            quantity_available: r.quantity_available,
            image_urls: r.image_urls,
            thumbnail_url: r.thumbnail_url,
            supplier: r.supplier,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Escapes LIKE metacharacters so user text matches literally.
fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Appends a WHERE clause with one AND-ed condition per predicate.
///
/// Every user-supplied value is bound, never interpolated.
fn apply_catalog_filters(qb: &mut QueryBuilder<'static, Postgres>, query: &CatalogQuery) {
    qb.push(" WHERE TRUE");

    for predicate in query.predicates() {
        match predicate {
            Predicate::PriceAtLeast(min) => {
                qb.push(" AND price >= ").push_bind(*min).push("::numeric");
            }
            Predicate::PriceAtMost(max) => {
                qb.push(" AND price <= ").push_bind(*max).push("::numeric");
            }
            Predicate::ColorIs(color) => {
                qb.push(" AND primary_color = ").push_bind(color.as_str());
            }
            Predicate::MaterialIs(material) => {
                qb.push(" AND material = ").push_bind(material.as_str());
            }
            Predicate::InStock(true) => {
                qb.push(" AND quantity_available > 0");
            }
            Predicate::InStock(false) => {
                qb.push(" AND quantity_available <= 0");
            }
            Predicate::TextMatches(text) => {
                let pattern = like_pattern(text);
                qb.push(" AND (");
                for (i, column) in TEXT_COLUMNS.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push(*column)
                        .push(" ILIKE ")
                        .push_bind(pattern.clone())
                        .push(" ESCAPE '\\'");
                }
                qb.push(")");
            }
        }
    }
}

fn order_by(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Newest => " ORDER BY created_at DESC, id ASC",
        SortOrder::Oldest => " ORDER BY created_at ASC, id ASC",
        SortOrder::PriceAsc => " ORDER BY price ASC, id ASC",
        SortOrder::PriceDesc => " ORDER BY price DESC, id ASC",
        SortOrder::Name => " ORDER BY name COLLATE \"C\" ASC, id ASC",
    }
}

fn facet_column(field: FacetField) -> &'static str {
    match field {
        FacetField::Color => "primary_color",
        FacetField::Material => "material",
    }
}

fn count_query(query: &CatalogQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*)::bigint FROM textiles");
    apply_catalog_filters(&mut qb, query);
    qb
}

fn page_query(query: &CatalogQuery, limit: i64, offset: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(TEXTILE_COLUMNS);
    apply_catalog_filters(&mut qb, query);
    qb.push(order_by(query.sort()))
        .push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    qb
}

fn facet_query(query: &CatalogQuery, field: FacetField) -> QueryBuilder<'static, Postgres> {
    let column = facet_column(field);
    let mut qb = QueryBuilder::new(format!(
        "SELECT {column} AS value, COUNT(*)::bigint AS count FROM textiles"
    ));
    apply_catalog_filters(&mut qb, query);
    qb.push(format!(" GROUP BY {column} ORDER BY count DESC, value ASC"));
    qb
}

fn price_range_query(query: &CatalogQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb =
        QueryBuilder::new("SELECT MIN(price)::float8, MAX(price)::float8 FROM textiles");
    apply_catalog_filters(&mut qb, query);
    qb
}

fn store_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        error!("{} failed: {}", context, e);
        DomainError::StoreError(format!("{} failed: {}", context, e))
    }
}

/// Catalog store backed by the `textiles` table in Postgres.
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Wraps a pool created and owned by the host application.
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing PgCatalogStore with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    #[instrument(skip(self, query), fields(predicates = query.predicates().len()))]
    async fn count(&self, query: &CatalogQuery) -> Result<i64, DomainError> {
        let total: i64 = count_query(query)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(store_error("Textile count query"))?;
        debug!("Textile count query matched {} rows", total);
        Ok(total)
    }

    #[instrument(skip(self, query), fields(predicates = query.predicates().len()))]
    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TextileRecord>, DomainError> {
        let rows: Vec<TextileRow> = page_query(query, limit, offset)
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(store_error("Textile page query"))?;

        debug!("Retrieved {} textiles", rows.len());
        rows.into_iter().map(TextileRecord::try_from).collect()
    }

    #[instrument(skip(self, query), fields(predicates = query.predicates().len()))]
    async fn facet_counts(
        &self,
        query: &CatalogQuery,
        field: FacetField,
    ) -> Result<Vec<FacetValue>, DomainError> {
        facet_query(query, field)
            .build_query_as::<FacetValue>()
            .fetch_all(&self.pool)
            .await
            .map_err(store_error("Textile facet query"))
    }

    #[instrument(skip(self, query), fields(predicates = query.predicates().len()))]
    async fn price_range(&self, query: &CatalogQuery) -> Result<Option<PriceRange>, DomainError> {
        let (min, max): (Option<f64>, Option<f64>) = price_range_query(query)
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(store_error("Textile price range query"))?;

        Ok(match (min, max) {
            (Some(min), Some(max)) => Some(PriceRange { min, max }),
            _ => None,
        })
    }

    #[instrument(skip(self), fields(textile_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TextileRecord>, DomainError> {
        let row = sqlx::query_as::<_, TextileRow>(&format!("{TEXTILE_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Textile lookup"))?;
        row.map(TextileRecord::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(store_error("Catalog health check"))?;
        Ok(())
    }
}
