//! # Unit Catalog Module
//!
//! Static registry of measurement units: their physical kind (weight,
//! volume, count) and the unit system (metric, imperial) they belong to.
//!
//! ## Features
//!
//! - O(1) identifier lookup through a lazy static alias map
//! - English and French aliases, singular and plural ("grams", "grammes",
//!   "tasse", "cuillère à soupe", ...)
//! - Two non-convertible pseudo-units, `unit` and `pinch`, for counted and
//!   pinched amounts
//! - Graceful degradation: an unknown identifier resolves to a count-kind
//!   unit outside any system, so conversion becomes a no-op instead of an
//!   error
//!
//! The catalog intentionally files the kitchen volume units `cup`, `tbsp`
//! and `tsp` under the imperial *weight* column: household recipes convert
//! "200 g of flour" into "cups of flour" through fixed water-like
//! equivalences, and the conversion tables in
//! [`unit_conversion`](crate::unit_conversion) depend on that bucketing.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Physical kind of a unit, governing which conversions are legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Weight,
    Volume,
    /// Counted amounts; never converted
    Count,
}

/// Unit system grouping within a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial,
    /// Count-kind and unknown units belong to no system
    NotApplicable,
}

/// A measurement unit known to the catalog.
///
/// Serializes as its canonical identifier; deserialization accepts any
/// registered alias and keeps unrecognized identifiers as [`Unit::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    // Metric weight
    Milligrams,
    Grams,
    Kilograms,
    // Imperial weight column; cup and spoons are the kitchen approximation
    Ounces,
    Pounds,
    Cups,
    Tablespoons,
    Teaspoons,
    // Metric volume
    Milliliters,
    Centiliters,
    Deciliters,
    Liters,
    // Imperial volume
    FluidOunces,
    Pints,
    Quarts,
    Gallons,
    // Count pseudo-units
    /// A counted item ("2 unit" of eggs); renders without a suffix
    Piece,
    /// A pinch; counted, never converted
    Pinch,
    /// Identifier the catalog does not know; behaves as a count unit
    Unknown(String),
}

lazy_static! {
    /// Alias map for identifier resolution, lowercase keys
    static ref UNIT_ALIASES: HashMap<&'static str, Unit> = {
        let mut map = HashMap::new();

        // Metric weight
        map.insert("mg", Unit::Milligrams);
        map.insert("milligram", Unit::Milligrams);
        map.insert("g", Unit::Grams);
        map.insert("gram", Unit::Grams);
        map.insert("gramme", Unit::Grams);
        map.insert("kg", Unit::Kilograms);
        map.insert("kilogram", Unit::Kilograms);
        map.insert("kilogramme", Unit::Kilograms);

        // Imperial weight
        map.insert("oz", Unit::Ounces);
        map.insert("ounce", Unit::Ounces);
        map.insert("lb", Unit::Pounds);
        map.insert("pound", Unit::Pounds);
        map.insert("livre", Unit::Pounds);

        // Kitchen approximation column (weight kind, see module docs)
        map.insert("cup", Unit::Cups);
        map.insert("tasse", Unit::Cups);
        map.insert("tbsp", Unit::Tablespoons);
        map.insert("tablespoon", Unit::Tablespoons);
        map.insert("cas", Unit::Tablespoons);
        map.insert("cuillère à soupe", Unit::Tablespoons);
        map.insert("tsp", Unit::Teaspoons);
        map.insert("teaspoon", Unit::Teaspoons);
        map.insert("cac", Unit::Teaspoons);
        map.insert("cuillère à café", Unit::Teaspoons);

        // Metric volume
        map.insert("ml", Unit::Milliliters);
        map.insert("milliliter", Unit::Milliliters);
        map.insert("millilitre", Unit::Milliliters);
        map.insert("cl", Unit::Centiliters);
        map.insert("centilitre", Unit::Centiliters);
        map.insert("dl", Unit::Deciliters);
        map.insert("décilitre", Unit::Deciliters);
        map.insert("l", Unit::Liters);
        map.insert("liter", Unit::Liters);
        map.insert("litre", Unit::Liters);

        // Imperial volume
        map.insert("floz", Unit::FluidOunces);
        map.insert("fl oz", Unit::FluidOunces);
        map.insert("fluid ounce", Unit::FluidOunces);
        map.insert("pint", Unit::Pints);
        map.insert("pinte", Unit::Pints);
        map.insert("quart", Unit::Quarts);
        map.insert("gallon", Unit::Gallons);

        // Count pseudo-units
        map.insert("unit", Unit::Piece);
        map.insert("unité", Unit::Piece);
        map.insert("piece", Unit::Piece);
        map.insert("pièce", Unit::Piece);
        map.insert("pinch", Unit::Pinch);
        map.insert("pincée", Unit::Pinch);

        map
    };
}

impl Unit {
    /// Resolve a unit identifier or alias.
    ///
    /// Matching is case-insensitive and tolerates plural forms. Identifiers
    /// the catalog does not know resolve to [`Unit::Unknown`] rather than
    /// failing; such units have kind [`UnitKind::Count`] and never convert.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mealplan::unit_catalog::{Unit, UnitKind};
    ///
    /// assert_eq!(Unit::from_id("g"), Unit::Grams);
    /// assert_eq!(Unit::from_id("Tasses"), Unit::Cups);
    /// assert_eq!(Unit::from_id("poignée").kind(), UnitKind::Count);
    /// ```
    pub fn from_id(id: &str) -> Self {
        let id = id.trim().to_lowercase();

        if let Some(unit) = UNIT_ALIASES.get(id.as_str()) {
            return unit.clone();
        }

        // Plural forms: retry without the trailing 's'
        if let Some(singular) = id.strip_suffix('s') {
            if !singular.is_empty() {
                if let Some(unit) = UNIT_ALIASES.get(singular) {
                    return unit.clone();
                }
            }
        }

        Unit::Unknown(id)
    }

    /// Canonical identifier, as stored in recipe records
    pub fn id(&self) -> &str {
        match self {
            Unit::Milligrams => "mg",
            Unit::Grams => "g",
            Unit::Kilograms => "kg",
            Unit::Ounces => "oz",
            Unit::Pounds => "lb",
            Unit::Cups => "cup",
            Unit::Tablespoons => "tbsp",
            Unit::Teaspoons => "tsp",
            Unit::Milliliters => "ml",
            Unit::Centiliters => "cl",
            Unit::Deciliters => "dl",
            Unit::Liters => "l",
            Unit::FluidOunces => "floz",
            Unit::Pints => "pint",
            Unit::Quarts => "quart",
            Unit::Gallons => "gallon",
            Unit::Piece => "unit",
            Unit::Pinch => "pinch",
            Unit::Unknown(id) => id,
        }
    }

    /// Short display label used when formatting measurements
    pub fn label(&self) -> &str {
        match self {
            Unit::FluidOunces => "fl oz",
            _ => self.id(),
        }
    }

    /// Physical kind of the unit
    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::Milligrams
            | Unit::Grams
            | Unit::Kilograms
            | Unit::Ounces
            | Unit::Pounds
            | Unit::Cups
            | Unit::Tablespoons
            | Unit::Teaspoons => UnitKind::Weight,
            Unit::Milliliters
            | Unit::Centiliters
            | Unit::Deciliters
            | Unit::Liters
            | Unit::FluidOunces
            | Unit::Pints
            | Unit::Quarts
            | Unit::Gallons => UnitKind::Volume,
            Unit::Piece | Unit::Pinch | Unit::Unknown(_) => UnitKind::Count,
        }
    }

    /// Unit system of the unit
    pub fn system(&self) -> UnitSystem {
        match self {
            Unit::Milligrams
            | Unit::Grams
            | Unit::Kilograms
            | Unit::Milliliters
            | Unit::Centiliters
            | Unit::Deciliters
            | Unit::Liters => UnitSystem::Metric,
            Unit::Ounces
            | Unit::Pounds
            | Unit::Cups
            | Unit::Tablespoons
            | Unit::Teaspoons
            | Unit::FluidOunces
            | Unit::Pints
            | Unit::Quarts
            | Unit::Gallons => UnitSystem::Imperial,
            Unit::Piece | Unit::Pinch | Unit::Unknown(_) => UnitSystem::NotApplicable,
        }
    }

    /// Whether the unit participates in numeric conversion at all
    pub fn is_convertible(&self) -> bool {
        self.kind() != UnitKind::Count
    }
}

impl From<String> for Unit {
    fn from(id: String) -> Self {
        Unit::from_id(&id)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.id().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
