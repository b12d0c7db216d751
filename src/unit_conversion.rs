//! # Unit Conversion Module
//!
//! Pure numeric conversion between units of the same physical kind, plus
//! the decimal-to-culinary-fraction formatting used everywhere a quantity
//! is shown to the cook.
//!
//! ## Features
//!
//! - Fixed multiplicative factor tables, one per kind, anchored to a base
//!   unit (grams, millilitres) so reciprocal factors stay consistent and
//!   conversions round-trip within floating-point tolerance
//! - Non-fatal by design: incompatible or unknown units convert as the
//!   identity, never as an error
//! - Cup downshift: sub-tablespoon cup amounts are re-expressed in
//!   teaspoons or tablespoons before formatting
//! - Fifteen common culinary fractions (eighths through halves) rendered
//!   as Unicode glyphs
//!
//! The imperial column of the weight table is expressed in kitchen volume
//! units (cup, tbsp, tsp) through fixed water-like gram equivalences. This
//! is the approximation household recipes are written against, not a
//! physical weight/volume conversion; the constants (240 g per cup, 15 g
//! per tablespoon, 5 g per teaspoon) must not be replaced with
//! per-ingredient densities.

use crate::unit_catalog::{Unit, UnitKind};
use lazy_static::lazy_static;
use log::trace;
use std::collections::HashMap;

lazy_static! {
    /// Grams per unit for the weight kind. The cup/tbsp/tsp entries are the
    /// kitchen approximation column (see module docs).
    static ref WEIGHT_GRAMS: HashMap<Unit, f64> = {
        let mut map = HashMap::new();
        map.insert(Unit::Milligrams, 0.001);
        map.insert(Unit::Grams, 1.0);
        map.insert(Unit::Kilograms, 1000.0);
        map.insert(Unit::Ounces, 28.35);
        map.insert(Unit::Pounds, 453.6);
        map.insert(Unit::Cups, 240.0);
        map.insert(Unit::Tablespoons, 15.0);
        map.insert(Unit::Teaspoons, 5.0);
        map
    };

    /// Millilitres per unit for the volume kind
    static ref VOLUME_MILLILITERS: HashMap<Unit, f64> = {
        let mut map = HashMap::new();
        map.insert(Unit::Milliliters, 1.0);
        map.insert(Unit::Centiliters, 10.0);
        map.insert(Unit::Deciliters, 100.0);
        map.insert(Unit::Liters, 1000.0);
        map.insert(Unit::FluidOunces, 30.0);
        map.insert(Unit::Pints, 473.0);
        map.insert(Unit::Quarts, 946.0);
        map.insert(Unit::Gallons, 3785.0);
        map
    };
}

/// The fifteen culinary fractions, as (value, glyph) pairs
const CULINARY_FRACTIONS: [(f64, &str); 15] = [
    (0.125, "⅛"),
    (1.0 / 6.0, "⅙"),
    (0.2, "⅕"),
    (0.25, "¼"),
    (1.0 / 3.0, "⅓"),
    (0.375, "⅜"),
    (0.4, "⅖"),
    (0.5, "½"),
    (0.6, "⅗"),
    (0.625, "⅝"),
    (2.0 / 3.0, "⅔"),
    (0.75, "¾"),
    (0.8, "⅘"),
    (5.0 / 6.0, "⅚"),
    (0.875, "⅞"),
];

/// Fractions further than this from the value fall back to decimal display
const FRACTION_TOLERANCE: f64 = 0.05;

/// Convert a value between two units of the same kind.
///
/// The function is total and pure. It is the identity when the units are
/// equal, when either unit is count-kind (including unknown identifiers),
/// when the kinds differ, or when a unit is missing from its kind's factor
/// table. Callers therefore never need to pre-check compatibility.
///
/// # Examples
///
/// ```rust
/// use mealplan::unit_catalog::Unit;
/// use mealplan::unit_conversion::convert;
///
/// assert_eq!(convert(1.0, &Unit::Kilograms, &Unit::Grams), 1000.0);
/// assert_eq!(convert(1.0, &Unit::Cups, &Unit::Grams), 240.0);
/// // Incompatible kinds pass through unchanged
/// assert_eq!(convert(2.0, &Unit::Cups, &Unit::Liters), 2.0);
/// ```
pub fn convert(value: f64, from: &Unit, to: &Unit) -> f64 {
    if from == to {
        return value;
    }

    let table: &HashMap<Unit, f64> = match (from.kind(), to.kind()) {
        (UnitKind::Weight, UnitKind::Weight) => &WEIGHT_GRAMS,
        (UnitKind::Volume, UnitKind::Volume) => &VOLUME_MILLILITERS,
        _ => {
            trace!(
                "No conversion between '{}' and '{}', keeping value {}",
                from.id(),
                to.id(),
                value
            );
            return value;
        }
    };

    match (table.get(from), table.get(to)) {
        (Some(from_factor), Some(to_factor)) => value * from_factor / to_factor,
        _ => value,
    }
}

/// Format a measurement for display, downshifting small cup amounts.
///
/// Amounts below 1/16 cup are re-expressed in teaspoons (×48) and amounts
/// below 1/4 cup in tablespoons (×16) before fraction formatting; this is a
/// unit substitution, not a rounding choice. The `unit` pseudo-unit renders
/// as the bare number.
///
/// # Examples
///
/// ```rust
/// use mealplan::unit_catalog::Unit;
/// use mealplan::unit_conversion::format_measurement;
///
/// assert_eq!(format_measurement(0.5, &Unit::Cups), "½ cup");
/// assert_eq!(format_measurement(0.05, &Unit::Cups), "2 ⅖ tsp");
/// assert_eq!(format_measurement(2.0, &Unit::Piece), "2");
/// ```
pub fn format_measurement(value: f64, unit: &Unit) -> String {
    let (value, unit) = if *unit == Unit::Cups && value < 1.0 / 16.0 {
        trace!("Downshifting {} cup to teaspoons", value);
        (value * 48.0, Unit::Teaspoons)
    } else if *unit == Unit::Cups && value < 0.25 {
        trace!("Downshifting {} cup to tablespoons", value);
        (value * 16.0, Unit::Tablespoons)
    } else {
        (value, unit.clone())
    };

    let amount = decimal_to_fraction(value);
    match unit {
        Unit::Piece => amount,
        _ => format!("{} {}", amount, unit.label()),
    }
}

/// Render a decimal amount the way a cook writes it.
///
/// Integers render verbatim. The fractional part of other values is matched
/// against the culinary fraction table, rounded to 3 decimal places, and
/// the closest glyph is used when it is within 0.05; otherwise the value
/// falls back to decimal display (2 places below 0.1, 1 place above).
///
/// Total and deterministic: zero and non-finite inputs yield `"0"`.
///
/// # Examples
///
/// ```rust
/// use mealplan::unit_conversion::decimal_to_fraction;
///
/// assert_eq!(decimal_to_fraction(3.0), "3");
/// assert_eq!(decimal_to_fraction(0.5), "½");
/// assert_eq!(decimal_to_fraction(1.5), "1 ½");
/// assert_eq!(decimal_to_fraction(0.333), "⅓");
/// ```
pub fn decimal_to_fraction(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }

    let whole = value.trunc() as i64;
    let fractional = (value.fract() * 1000.0).round() / 1000.0;

    let closest = CULINARY_FRACTIONS
        .iter()
        .map(|(fraction, glyph)| ((fraction - fractional).abs(), *glyph))
        .min_by(|a, b| a.0.total_cmp(&b.0));

    if let Some((difference, glyph)) = closest {
        if difference < FRACTION_TOLERANCE {
            return if whole == 0 {
                glyph.to_string()
            } else {
                format!("{} {}", whole, glyph)
            };
        }
    }

    if value < 0.1 {
        format!("{:.2}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_conversions() {
        assert_eq!(convert(1.0, &Unit::Kilograms, &Unit::Grams), 1000.0);
        assert_eq!(convert(500.0, &Unit::Grams, &Unit::Kilograms), 0.5);
        assert_eq!(convert(1000.0, &Unit::Milligrams, &Unit::Grams), 1.0);
    }

    #[test]
    fn test_volume_conversions() {
        assert_eq!(convert(1.0, &Unit::Liters, &Unit::Milliliters), 1000.0);
        assert_eq!(convert(25.0, &Unit::Centiliters, &Unit::Liters), 0.25);
    }

    #[test]
    fn test_kitchen_approximation_column() {
        // The documented water-like equivalences, not physical conversion
        assert_eq!(convert(1.0, &Unit::Cups, &Unit::Grams), 240.0);
        assert_eq!(convert(240.0, &Unit::Grams, &Unit::Cups), 1.0);
        assert_eq!(convert(1.0, &Unit::Tablespoons, &Unit::Grams), 15.0);
        assert_eq!(convert(3.0, &Unit::Teaspoons, &Unit::Tablespoons), 1.0);
        assert_eq!(convert(1.0, &Unit::Cups, &Unit::Teaspoons), 48.0);
    }

    #[test]
    fn test_identity_cases() {
        // Same unit
        assert_eq!(convert(7.0, &Unit::Grams, &Unit::Grams), 7.0);
        // Count units never convert
        assert_eq!(convert(2.0, &Unit::Piece, &Unit::Grams), 2.0);
        assert_eq!(convert(1.0, &Unit::Pinch, &Unit::Teaspoons), 1.0);
        // Mismatched kinds pass through
        assert_eq!(convert(2.0, &Unit::Cups, &Unit::Milliliters), 2.0);
        // Unknown units are count-kind
        let botte = Unit::from_id("botte");
        assert_eq!(convert(3.0, &botte, &Unit::Grams), 3.0);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let weight_units = [
            Unit::Milligrams,
            Unit::Grams,
            Unit::Kilograms,
            Unit::Ounces,
            Unit::Pounds,
            Unit::Cups,
            Unit::Tablespoons,
            Unit::Teaspoons,
        ];
        let volume_units = [
            Unit::Milliliters,
            Unit::Centiliters,
            Unit::Deciliters,
            Unit::Liters,
            Unit::FluidOunces,
            Unit::Pints,
            Unit::Quarts,
            Unit::Gallons,
        ];

        for units in [&weight_units[..], &volume_units[..]] {
            for from in units {
                for to in units {
                    for x in [0.001, 1.0, 1000.0] {
                        let round_trip = convert(convert(x, from, to), to, from);
                        assert!(
                            (round_trip - x).abs() <= x * 1e-6,
                            "{} -> {} -> back: {} became {}",
                            from.id(),
                            to.id(),
                            x,
                            round_trip
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_fraction_integers_render_verbatim() {
        assert_eq!(decimal_to_fraction(0.0), "0");
        assert_eq!(decimal_to_fraction(1.0), "1");
        assert_eq!(decimal_to_fraction(42.0), "42");
    }

    #[test]
    fn test_fraction_glyphs() {
        assert_eq!(decimal_to_fraction(0.5), "½");
        assert_eq!(decimal_to_fraction(1.5), "1 ½");
        assert_eq!(decimal_to_fraction(0.333), "⅓");
        assert_eq!(decimal_to_fraction(0.25), "¼");
        assert_eq!(decimal_to_fraction(2.75), "2 ¾");
        assert_eq!(decimal_to_fraction(0.125), "⅛");
        assert_eq!(decimal_to_fraction(0.667), "⅔");
    }

    #[test]
    fn test_fraction_tolerance_window() {
        // 0.52 is within 0.05 of ½
        assert_eq!(decimal_to_fraction(0.52), "½");
        // 0.45 is closer to ⅖ (0.4 -> 0.05 away) than to ½, but still at the
        // edge of the window; 0.44 is inside it
        assert_eq!(decimal_to_fraction(0.44), "⅖");
    }

    #[test]
    fn test_fraction_decimal_fallback() {
        // 0.05 is 0.075 away from ⅛, the closest entry
        assert_eq!(decimal_to_fraction(0.05), "0.05");
        // Above 0.1 the fallback keeps one decimal
        assert_eq!(decimal_to_fraction(7.45), "7.5");
    }

    #[test]
    fn test_fraction_non_finite_input() {
        assert_eq!(decimal_to_fraction(f64::NAN), "0");
        assert_eq!(decimal_to_fraction(f64::INFINITY), "0");
    }

    #[test]
    fn test_cup_downshift_to_teaspoons() {
        // 0.05 cup = 2.4 tsp
        assert_eq!(format_measurement(0.05, &Unit::Cups), "2 ⅖ tsp");
    }

    #[test]
    fn test_cup_downshift_to_tablespoons() {
        // 0.2 cup = 3.2 tbsp
        assert_eq!(format_measurement(0.2, &Unit::Cups), "3 ⅕ tbsp");
    }

    #[test]
    fn test_format_regular_units() {
        assert_eq!(format_measurement(250.0, &Unit::Grams), "250 g");
        assert_eq!(format_measurement(1.5, &Unit::Liters), "1 ½ l");
        assert_eq!(format_measurement(0.5, &Unit::Cups), "½ cup");
    }

    #[test]
    fn test_format_count_units() {
        assert_eq!(format_measurement(2.0, &Unit::Piece), "2");
        assert_eq!(format_measurement(1.0, &Unit::Pinch), "1 pinch");
    }
}
