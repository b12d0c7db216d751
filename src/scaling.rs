//! # Quantity Scaling Module
//!
//! Scales recipe ingredient amounts from the serving count they were
//! authored for to the serving count a meal entry requests.
//!
//! Scaling follows the engine's numeric resilience policy: a zero or
//! unspecified serving count on either side leaves the amount unchanged
//! instead of dividing by zero. Negative serving counts are a caller
//! contract violation and are not checked.

use crate::recipe_model::{IngredientLine, Quantity};
use log::trace;

/// Scale a raw amount linearly with the serving counts.
///
/// `value × requested / authored`; identity when either count is zero.
///
/// # Examples
///
/// ```rust
/// use mealplan::scaling::scale_value;
///
/// assert_eq!(scale_value(200.0, 4, 8), 400.0);
/// assert_eq!(scale_value(200.0, 4, 4), 200.0);
/// // Malformed serving counts degrade to identity
/// assert_eq!(scale_value(200.0, 0, 8), 200.0);
/// ```
pub fn scale_value(value: f64, authored_servings: u32, requested_servings: u32) -> f64 {
    if authored_servings == 0 || requested_servings == 0 {
        trace!(
            "Not scaling {} (authored {} / requested {} servings)",
            value,
            authored_servings,
            requested_servings
        );
        return value;
    }
    value * f64::from(requested_servings) / f64::from(authored_servings)
}

/// Scale a quantity, keeping its unit
pub fn scale_quantity(
    quantity: &Quantity,
    authored_servings: u32,
    requested_servings: u32,
) -> Quantity {
    Quantity::new(
        scale_value(quantity.value, authored_servings, requested_servings),
        quantity.unit.clone(),
    )
}

/// Scale every line of an ingredient list
pub fn scale_lines(
    lines: &[IngredientLine],
    authored_servings: u32,
    requested_servings: u32,
) -> Vec<IngredientLine> {
    lines
        .iter()
        .map(|line| IngredientLine {
            ingredient_id: line.ingredient_id.clone(),
            quantity: scale_value(line.quantity, authored_servings, requested_servings),
            unit: line.unit.clone(),
        })
        .collect()
}
