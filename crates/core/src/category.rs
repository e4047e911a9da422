//! Closed enumerations mirrored by CHECK constraints in the schema.
//!
//! Each variant's `as_str` value must match the corresponding CHECK
//! constraint in the `products.category` / `warranties.type` columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Appliances,
    Furniture,
    Automotive,
    Clothing,
    Sports,
    Jewelry,
    Tools,
    Other,
}

impl Category {
    /// All valid categories, in display order.
    pub const ALL: [Category; 9] = [
        Category::Electronics,
        Category::Appliances,
        Category::Furniture,
        Category::Automotive,
        Category::Clothing,
        Category::Sports,
        Category::Jewelry,
        Category::Tools,
        Category::Other,
    ];

    /// The database/wire representation of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Appliances => "appliances",
            Category::Furniture => "furniture",
            Category::Automotive => "automotive",
            Category::Clothing => "clothing",
            Category::Sports => "sports",
            Category::Jewelry => "jewelry",
            Category::Tools => "tools",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown product category: {s}")))
    }
}

/// Warranty coverage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarrantyType {
    Manufacturer,
    Retailer,
    Extended,
}

impl WarrantyType {
    /// The database/wire representation of this warranty type.
    pub fn as_str(self) -> &'static str {
        match self {
            WarrantyType::Manufacturer => "manufacturer",
            WarrantyType::Retailer => "retailer",
            WarrantyType::Extended => "extended",
        }
    }
}

impl fmt::Display for WarrantyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WarrantyType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manufacturer" => Ok(WarrantyType::Manufacturer),
            "retailer" => Ok(WarrantyType::Retailer),
            "extended" => Ok(WarrantyType::Extended),
            other => Err(CoreError::Validation(format!(
                "Unknown warranty type: {other}"
            ))),
        }
    }
}
