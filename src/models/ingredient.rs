use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KitchenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(pub u64);

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Grocery store aisle an ingredient is shelved under.
///
/// Declaration order is the order shopping lists are grouped in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Grains,
    Canned,
    Spices,
    Oils,
    Baking,
    Beverages,
    Frozen,
    Condiments,
    #[default]
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 13] = [
        IngredientCategory::Produce,
        IngredientCategory::Dairy,
        IngredientCategory::Meat,
        IngredientCategory::Seafood,
        IngredientCategory::Grains,
        IngredientCategory::Canned,
        IngredientCategory::Spices,
        IngredientCategory::Oils,
        IngredientCategory::Baking,
        IngredientCategory::Beverages,
        IngredientCategory::Frozen,
        IngredientCategory::Condiments,
        IngredientCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Produce => "produce",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Meat => "meat",
            IngredientCategory::Seafood => "seafood",
            IngredientCategory::Grains => "grains",
            IngredientCategory::Canned => "canned",
            IngredientCategory::Spices => "spices",
            IngredientCategory::Oils => "oils",
            IngredientCategory::Baking => "baking",
            IngredientCategory::Beverages => "beverages",
            IngredientCategory::Frozen => "frozen",
            IngredientCategory::Condiments => "condiments",
            IngredientCategory::Other => "other",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IngredientCategory {
    type Err = KitchenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| KitchenError::InvalidInput(format!("unknown category '{}'", s)))
    }
}

/// Measurement unit for recipe, pantry and shopping quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Piece,
    Gram,
    Kilogram,
    Milliliter,
    Liter,
    Cup,
    Tablespoon,
    Teaspoon,
    Ounce,
    Pound,
    Pinch,
    ToTaste,
}

/// What a unit measures. Units are never converted; the dimension only
/// tells a reader whether two mismatched units measure the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitDimension {
    Mass,
    Volume,
    Count,
    Unmeasured,
}

impl UnitDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitDimension::Mass => "mass",
            UnitDimension::Volume => "volume",
            UnitDimension::Count => "count",
            UnitDimension::Unmeasured => "unmeasured",
        }
    }
}

impl fmt::Display for UnitDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Unit {
    pub const ALL: [Unit; 12] = [
        Unit::Piece,
        Unit::Gram,
        Unit::Kilogram,
        Unit::Milliliter,
        Unit::Liter,
        Unit::Cup,
        Unit::Tablespoon,
        Unit::Teaspoon,
        Unit::Ounce,
        Unit::Pound,
        Unit::Pinch,
        Unit::ToTaste,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Piece => "piece",
            Unit::Gram => "gram",
            Unit::Kilogram => "kilogram",
            Unit::Milliliter => "milliliter",
            Unit::Liter => "liter",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tablespoon",
            Unit::Teaspoon => "teaspoon",
            Unit::Ounce => "ounce",
            Unit::Pound => "pound",
            Unit::Pinch => "pinch",
            Unit::ToTaste => "to_taste",
        }
    }

    /// Short label for tables.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Unit::Piece => "pc",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Pinch => "pinch",
            Unit::ToTaste => "to taste",
        }
    }

    pub fn dimension(&self) -> UnitDimension {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => UnitDimension::Mass,
            Unit::Milliliter | Unit::Liter | Unit::Cup | Unit::Tablespoon | Unit::Teaspoon => {
                UnitDimension::Volume
            }
            Unit::Piece => UnitDimension::Count,
            Unit::Pinch | Unit::ToTaste => UnitDimension::Unmeasured,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = KitchenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        let unit = match wanted.as_str() {
            "pc" | "pcs" | "pieces" => Unit::Piece,
            "g" | "grams" => Unit::Gram,
            "kg" | "kilograms" => Unit::Kilogram,
            "ml" | "milliliters" => Unit::Milliliter,
            "l" | "liters" => Unit::Liter,
            "cups" => Unit::Cup,
            "tbsp" | "tablespoons" => Unit::Tablespoon,
            "tsp" | "teaspoons" => Unit::Teaspoon,
            "oz" | "ounces" => Unit::Ounce,
            "lb" | "lbs" | "pounds" => Unit::Pound,
            "pinches" => Unit::Pinch,
            other => Self::ALL
                .into_iter()
                .find(|u| u.as_str() == other)
                .ok_or_else(|| KitchenError::InvalidInput(format!("unknown unit '{}'", s)))?,
        };
        Ok(unit)
    }
}

/// A named substance shared by every household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    #[serde(default)]
    pub category: IngredientCategory,
}

impl Ingredient {
    /// Canonical key for lookups (trimmed, lowercase name).
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parse_aliases() {
        assert_eq!("g".parse::<Unit>().unwrap(), Unit::Gram);
        assert_eq!("Tbsp".parse::<Unit>().unwrap(), Unit::Tablespoon);
        assert_eq!("to-taste".parse::<Unit>().unwrap(), Unit::ToTaste);
        assert_eq!("kilogram".parse::<Unit>().unwrap(), Unit::Kilogram);
        assert!("bushel".parse::<Unit>().is_err());
    }

    #[test]
    fn test_unit_dimension() {
        assert_eq!(Unit::Pound.dimension(), UnitDimension::Mass);
        assert_eq!(Unit::Cup.dimension(), UnitDimension::Volume);
        assert_eq!(Unit::Piece.dimension(), UnitDimension::Count);
        assert_eq!(Unit::Pinch.dimension(), UnitDimension::Unmeasured);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            " Produce ".parse::<IngredientCategory>().unwrap(),
            IngredientCategory::Produce
        );
        assert!("snacks".parse::<IngredientCategory>().is_err());
    }

    #[test]
    fn test_unit_serde_names() {
        let json = serde_json::to_string(&Unit::ToTaste).unwrap();
        assert_eq!(json, "\"to_taste\"");
        let back: Unit = serde_json::from_str("\"tablespoon\"").unwrap();
        assert_eq!(back, Unit::Tablespoon);
    }
}
