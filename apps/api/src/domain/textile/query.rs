//! Store-agnostic query model.
//!
//! A [`CatalogQuery`] starts unconstrained and is narrowed by appending
//! [`Predicate`]s. Store implementations translate the predicate list into
//! their own query language; [`CatalogQuery::matches`] is the reference
//! semantics every translation must agree with.

use super::entity::TextileRecord;
use super::errors::DomainError;
use super::value_objects::{Color, Material};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use ts_rs::TS;

/// Filter dimension a predicate constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Price,
    Color,
    Material,
    Availability,
    Text,
}

/// A single narrowing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `price >= bound`
    PriceAtLeast(f64),
    /// `price <= bound`
    PriceAtMost(f64),
    /// Primary color equals the value
    ColorIs(Color),
    MaterialIs(Material),
    /// `true`: quantity above zero, `false`: quantity of zero
    InStock(bool),
    /// Case-insensitive substring over the searchable text fields
    TextMatches(String),
}

impl Predicate {
    pub fn dimension(&self) -> Dimension {
        match self {
            Predicate::PriceAtLeast(_) | Predicate::PriceAtMost(_) => Dimension::Price,
            Predicate::ColorIs(_) => Dimension::Color,
            Predicate::MaterialIs(_) => Dimension::Material,
            Predicate::InStock(_) => Dimension::Availability,
            Predicate::TextMatches(_) => Dimension::Text,
        }
    }

    pub fn matches(&self, record: &TextileRecord) -> bool {
        match self {
            Predicate::PriceAtLeast(min) => record.price >= *min,
            Predicate::PriceAtMost(max) => record.price <= *max,
            Predicate::ColorIs(color) => record.primary_color == *color,
            Predicate::MaterialIs(material) => record.material == *material,
            Predicate::InStock(wanted) => record.is_available() == *wanted,
            Predicate::TextMatches(text) => {
                let needle = text.to_lowercase();
                let contains = |field: Option<&str>| {
                    field.is_some_and(|value| value.to_lowercase().contains(&needle))
                };
                contains(Some(&record.name))
                    || contains(record.description.as_deref())
                    || contains(record.composition.as_deref())
                    || contains(record.supplier.as_deref())
            }
        }
    }
}

/// Result ordering. Every variant falls back to ascending id so the order is
/// total and pages never overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    Name,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::Name => "name",
        }
    }

    pub fn compare(&self, a: &TextileRecord, b: &TextileRecord) -> Ordering {
        let primary = match self {
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
            SortOrder::Oldest => a.created_at.cmp(&b.created_at),
            SortOrder::PriceAsc => a.price.total_cmp(&b.price),
            SortOrder::PriceDesc => b.price.total_cmp(&a.price),
            SortOrder::Name => a.name.cmp(&b.name),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "price_asc" => Ok(SortOrder::PriceAsc),
            "price_desc" => Ok(SortOrder::PriceDesc),
            "name" => Ok(SortOrder::Name),
            other => Err(DomainError::ValidationError(format!(
                "unknown sort order '{}'",
                other
            ))),
        }
    }
}

/// Attribute a facet list is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetField {
    Color,
    Material,
}

impl FacetField {
    pub fn dimension(&self) -> Dimension {
        match self {
            FacetField::Color => Dimension::Color,
            FacetField::Material => Dimension::Material,
        }
    }

    pub fn value_of(&self, record: &TextileRecord) -> &'static str {
        match self {
            FacetField::Color => record.primary_color.as_str(),
            FacetField::Material => record.material.as_str(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    predicates: Vec<Predicate>,
    sort: SortOrder,
}

impl CatalogQuery {
    /// Unconstrained query over the full catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn narrow(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Copy of this query with every predicate on `dimension` dropped.
    pub fn relaxing(&self, dimension: Dimension) -> Self {
        Self {
            predicates: self
                .predicates
                .iter()
                .filter(|p| p.dimension() != dimension)
                .cloned()
                .collect(),
            sort: self.sort,
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn matches(&self, record: &TextileRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}
