use super::value_objects::{Color, Material};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A deadstock fabric listing as held by the catalog store.
///
/// Records are read-only from the search service's point of view; the store
/// owns their lifecycle.
///
/// # Invariants
/// - `price` is finite and non-negative, expressed per `unit`
/// - `currency` is an ISO-4217 code
/// - `quantity_available` is the number of `unit`s left; zero means sold out
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct TextileRecord {
    /// Unique identifier, also the final ordering tiebreaker
    pub id: Uuid,

    /// Listing title shown in search results
    pub name: String,

    /// Seller-provided description (optional)
    pub description: Option<String>,

    /// Price per unit
    pub price: f64,

    /// ISO-4217 currency code for `price`
    pub currency: String,

    /// Selling unit, e.g. "metre" or "yard"
    pub unit: String,

    /// Dominant color, the one color filters match against
    pub primary_color: Color,

    /// Accent color, if any
    pub secondary_color: Option<Color>,

    /// Main fiber family
    pub material: Material,

    /// Free-text fiber composition, e.g. "95% cotton, 5% elastane"
    pub composition: Option<String>,

    /// Units still available for purchase
    pub quantity_available: i32,

    /// Full-size media references
    pub image_urls: Vec<String>,

    /// Small preview image for result grids
    pub thumbnail_url: Option<String>,

    /// Mill or reseller the stock comes from
    pub supplier: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TextileRecord {
    pub fn is_available(&self) -> bool {
        self.quantity_available > 0
    }
}
