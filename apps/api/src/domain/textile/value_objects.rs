//! Enumerated attribute values used by catalog filters and facets.
//!
//! Both enums serialize as their lowercase names, which is also the form
//! stored in the `textiles` table. Parsing from user input is
//! case-insensitive; anything outside the set is a validation failure
//! rather than a filter that silently matches nothing.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
    Grey,
    Beige,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Navy,
    Purple,
    Pink,
    Multicolor,
}

impl Color {
    pub const ALL: [Color; 14] = [
        Color::Black,
        Color::White,
        Color::Grey,
        Color::Beige,
        Color::Brown,
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Navy,
        Color::Purple,
        Color::Pink,
        Color::Multicolor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Grey => "grey",
            Color::Beige => "beige",
            Color::Brown => "brown",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Navy => "navy",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Multicolor => "multicolor",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Color::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| DomainError::ValidationError(format!("unknown color '{}'", s.trim())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Cotton,
    Linen,
    Silk,
    Wool,
    Polyester,
    Viscose,
    Nylon,
    Elastane,
    Leather,
    Blend,
    Other,
}

impl Material {
    pub const ALL: [Material; 11] = [
        Material::Cotton,
        Material::Linen,
        Material::Silk,
        Material::Wool,
        Material::Polyester,
        Material::Viscose,
        Material::Nylon,
        Material::Elastane,
        Material::Leather,
        Material::Blend,
        Material::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Cotton => "cotton",
            Material::Linen => "linen",
            Material::Silk => "silk",
            Material::Wool => "wool",
            Material::Polyester => "polyester",
            Material::Viscose => "viscose",
            Material::Nylon => "nylon",
            Material::Elastane => "elastane",
            Material::Leather => "leather",
            Material::Blend => "blend",
            Material::Other => "other",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Material::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| {
                DomainError::ValidationError(format!("unknown material '{}'", s.trim()))
            })
    }
}
