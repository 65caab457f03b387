use super::errors::DomainError;
use super::query::Predicate;
use super::value_objects::{Color, Material};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// Longest free-text query accepted, in characters.
pub const MAX_QUERY_LENGTH: u64 = 200;

/// Constraints a caller wants applied to a catalog search.
///
/// Every field is optional and an absent field places no constraint on its
/// dimension. Present fields combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct SearchFilters {
    /// Inclusive lower price bound
    #[validate(range(min = 0.0))]
    pub price_min: Option<f64>,

    /// Inclusive upper price bound
    #[validate(range(min = 0.0))]
    pub price_max: Option<f64>,

    /// Primary color to match exactly
    pub color: Option<Color>,

    /// Material to match exactly
    pub material: Option<Material>,

    /// `true` keeps only stock with quantity left, `false` only sold-out stock
    pub in_stock: Option<bool>,

    /// Case-insensitive substring over name, description, composition and supplier
    #[validate(length(max = MAX_QUERY_LENGTH))]
    pub query: Option<String>,
}

impl SearchFilters {
    /// Checks numeric and length bounds plus price range ordering.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        for (name, value) in [("price_min", self.price_min), ("price_max", self.price_max)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(DomainError::ValidationError(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        self.validate()?;

        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(DomainError::ValidationError(format!(
                    "price_min ({}) must not exceed price_max ({})",
                    min, max
                )));
            }
        }
        Ok(())
    }

    /// Trimmed text query, `None` when absent or blank.
    pub fn text_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// One narrowing predicate per present field, in a fixed order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(min) = self.price_min {
            predicates.push(Predicate::PriceAtLeast(min));
        }
        if let Some(max) = self.price_max {
            predicates.push(Predicate::PriceAtMost(max));
        }
        if let Some(color) = self.color {
            predicates.push(Predicate::ColorIs(color));
        }
        if let Some(material) = self.material {
            predicates.push(Predicate::MaterialIs(material));
        }
        if let Some(in_stock) = self.in_stock {
            predicates.push(Predicate::InStock(in_stock));
        }
        if let Some(text) = self.text_query() {
            predicates.push(Predicate::TextMatches(text.to_string()));
        }

        predicates
    }
}
