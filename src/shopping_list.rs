//! # Shopping List Aggregation Module
//!
//! Turns a week of planned meals into a single deduplicated shopping list:
//! every entry's ingredient list is resolved (variant or base), scaled to
//! the requested serving count, merged per ingredient across the whole week
//! and grouped by shopping category.
//!
//! ## Merging
//!
//! Quantities for the same ingredient are first accumulated as raw
//! (value, unit) pairs, then converted into the unit of the first
//! accumulated pair and summed. Converting late avoids summing mismatched
//! units; picking the first unit keeps the result deterministic because
//! entries are processed in plan order (monday..sunday, lunch before
//! dinner).
//!
//! ## Failure semantics
//!
//! A dangling recipe or ingredient reference never aborts aggregation: the
//! offending entry or line is skipped with a `warn!` and the rest of the
//! week still aggregates. The call itself cannot fail.

use crate::recipe_model::{Ingredient, IngredientCategory, Recipe, WeekPlan};
use crate::scaling::scale_value;
use crate::unit_catalog::Unit;
use crate::unit_conversion::{convert, format_measurement};
use log::{debug, warn};
use std::collections::HashMap;

/// Serving count assumed when a meal entry does not specify one
pub const DEFAULT_SERVINGS: u32 = 4;

/// One merged ingredient total across the week.
///
/// Transient: recomputed on every aggregation request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedLine {
    /// Ingredient identifier
    pub ingredient_id: String,
    /// Ingredient display name
    pub name: String,
    /// Shopping category the line is filed under
    pub category: IngredientCategory,
    /// Merged amount, in `unit`
    pub value: f64,
    /// Display unit: the unit of the first contribution, in plan order
    pub unit: Unit,
    /// Human-readable merged amount (fraction glyphs, cup downshift)
    pub display: String,
    /// Deduplicated labels of the meals that contributed to this line
    pub recipes: Vec<String>,
}

/// A shopping list section: one category and its merged lines
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection {
    pub category: IngredientCategory,
    pub lines: Vec<AggregatedLine>,
}

/// Per-ingredient accumulator, kept unconverted until the merge step
#[derive(Debug, Default)]
struct Accumulator {
    parts: Vec<(f64, Unit)>,
    labels: Vec<String>,
}

/// Aggregate a weekly plan into a categorized shopping list.
///
/// Entries are processed in plan order. For each entry the effective
/// ingredient list is resolved (selected variant, or base list when the
/// variant index does not resolve), scaled from the recipe's authored
/// serving count to the entry's requested count (default
/// [`DEFAULT_SERVINGS`]), and accumulated per ingredient. Sections come
/// back in category display order with empty categories omitted.
///
/// # Examples
///
/// ```rust
/// use mealplan::recipe_model::*;
/// use mealplan::shopping_list::aggregate_shopping_list;
/// use mealplan::unit_catalog::Unit;
///
/// let recipes = vec![Recipe::new("soupe", "Soupe de carottes", 4)
///     .with_base_line(IngredientLine::new("carotte", 600.0, Unit::Grams))];
/// let ingredients = vec![Ingredient::new(
///     "carotte",
///     "carottes",
///     IngredientCategory::Vegetables,
/// )];
///
/// let mut plan = WeekPlan::new();
/// plan.add_entry(Day::Monday, MealType::Dinner, MealSlotEntry::new("soupe").with_servings(8));
///
/// let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);
/// assert_eq!(sections[0].lines[0].value, 1200.0);
/// ```
pub fn aggregate_shopping_list(
    plan: &WeekPlan,
    recipes: &[Recipe],
    ingredients: &[Ingredient],
) -> Vec<CategorySection> {
    let recipes_by_id: HashMap<&str, &Recipe> =
        recipes.iter().map(|r| (r.id.as_str(), r)).collect();
    let ingredients_by_id: HashMap<&str, &Ingredient> =
        ingredients.iter().map(|i| (i.id.as_str(), i)).collect();

    let mut accumulators: HashMap<String, Accumulator> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for entry in plan.entries() {
        let Some(recipe) = recipes_by_id.get(entry.recipe_id.as_str()) else {
            warn!(
                "Skipping meal entry: recipe '{}' not found",
                entry.recipe_id
            );
            continue;
        };

        let (lines, variant) = recipe.effective_ingredients(entry.variant_index);
        let requested = entry.servings.unwrap_or(DEFAULT_SERVINGS);
        let label = match variant {
            Some(variant) => format!("{} ({}) x{}", recipe.title, variant.name, requested),
            None => format!("{} x{}", recipe.title, requested),
        };
        debug!(
            "Aggregating '{}': {} lines at {} servings",
            label,
            lines.len(),
            requested
        );

        for line in lines {
            if !ingredients_by_id.contains_key(line.ingredient_id.as_str()) {
                warn!(
                    "Skipping line in '{}': ingredient '{}' not found",
                    recipe.title, line.ingredient_id
                );
                continue;
            }

            let scaled = scale_value(line.quantity, recipe.servings, requested);
            let accumulator = accumulators.entry(line.ingredient_id.clone()).or_default();
            if accumulator.parts.is_empty() {
                order.push(line.ingredient_id.clone());
            }
            accumulator.parts.push((scaled, line.unit.clone()));
            if !accumulator.labels.contains(&label) {
                accumulator.labels.push(label.clone());
            }
        }
    }

    let mut sections: Vec<CategorySection> = IngredientCategory::ALL
        .iter()
        .map(|&category| CategorySection {
            category,
            lines: Vec::new(),
        })
        .collect();

    for ingredient_id in &order {
        let accumulator = &accumulators[ingredient_id];
        let ingredient = ingredients_by_id[ingredient_id.as_str()];

        // Merge into the unit of the first contribution
        let target_unit = accumulator.parts[0].1.clone();
        let total: f64 = accumulator
            .parts
            .iter()
            .map(|(value, unit)| convert(*value, unit, &target_unit))
            .sum();

        let line = AggregatedLine {
            ingredient_id: ingredient_id.clone(),
            name: ingredient.name.clone(),
            category: ingredient.category,
            value: total,
            unit: target_unit.clone(),
            display: format_measurement(total, &target_unit),
            recipes: accumulator.labels.clone(),
        };

        // Sections are built in `IngredientCategory::ALL` declaration order
        sections[ingredient.category as usize].lines.push(line);
    }

    sections.retain(|section| !section.lines.is_empty());
    debug!(
        "Aggregated {} ingredients into {} sections",
        order.len(),
        sections.len()
    );
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::{Day, IngredientLine, MealSlotEntry, MealType, Variant};

    fn pantry(id: &str, name: &str) -> Ingredient {
        Ingredient::new(id, name, IngredientCategory::Pantry)
    }

    #[test]
    fn test_single_entry_scales_to_requested_servings() {
        let recipes = vec![Recipe::new("crepes", "Crêpes", 4)
            .with_base_line(IngredientLine::new("farine", 250.0, Unit::Grams))];
        let ingredients = vec![pantry("farine", "farine")];

        let mut plan = WeekPlan::new();
        plan.add_entry(
            Day::Tuesday,
            MealType::Dinner,
            MealSlotEntry::new("crepes").with_servings(6),
        );

        let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);
        assert_eq!(sections.len(), 1);
        let line = &sections[0].lines[0];
        assert_eq!(line.value, 375.0);
        assert_eq!(line.unit, Unit::Grams);
        assert_eq!(line.recipes, vec!["Crêpes x6"]);
    }

    #[test]
    fn test_unspecified_servings_default_to_four() {
        let recipes = vec![Recipe::new("riz", "Riz pilaf", 2)
            .with_base_line(IngredientLine::new("riz", 150.0, Unit::Grams))];
        let ingredients = vec![pantry("riz", "riz basmati")];

        let mut plan = WeekPlan::new();
        plan.add_entry(Day::Monday, MealType::Lunch, MealSlotEntry::new("riz"));

        let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);
        assert_eq!(sections[0].lines[0].value, 300.0);
        assert_eq!(sections[0].lines[0].recipes, vec!["Riz pilaf x4"]);
    }

    #[test]
    fn test_merge_across_units_uses_first_unit() {
        // 400 g of flour from one meal, 1 cup (240 g) from another
        let recipes = vec![
            Recipe::new("pain", "Pain", 4)
                .with_base_line(IngredientLine::new("farine", 200.0, Unit::Grams)),
            Recipe::new("gateau", "Gâteau", 2)
                .with_base_line(IngredientLine::new("farine", 1.0, Unit::Cups)),
        ];
        let ingredients = vec![pantry("farine", "farine")];

        let mut plan = WeekPlan::new();
        plan.add_entry(
            Day::Monday,
            MealType::Lunch,
            MealSlotEntry::new("pain").with_servings(8),
        );
        plan.add_entry(
            Day::Wednesday,
            MealType::Dinner,
            MealSlotEntry::new("gateau").with_servings(2),
        );

        let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);
        assert_eq!(sections.len(), 1);
        let line = &sections[0].lines[0];
        // 400 g + 240 g, in the first contribution's unit
        assert_eq!(line.value, 640.0);
        assert_eq!(line.unit, Unit::Grams);
        assert_eq!(line.display, "640 g");
        assert_eq!(line.recipes, vec!["Pain x8", "Gâteau x2"]);
    }

    #[test]
    fn test_variant_list_replaces_base_list() {
        let recipes = vec![Recipe::new("quiche", "Quiche", 4)
            .with_base_line(IngredientLine::new("lardons", 200.0, Unit::Grams))
            .with_variant(
                Variant::new("végétarienne")
                    .with_line(IngredientLine::new("épinards", 300.0, Unit::Grams)),
            )];
        let ingredients = vec![
            Ingredient::new("lardons", "lardons", IngredientCategory::Proteins),
            Ingredient::new("épinards", "épinards", IngredientCategory::Vegetables),
        ];

        let mut plan = WeekPlan::new();
        plan.add_entry(
            Day::Friday,
            MealType::Dinner,
            MealSlotEntry::new("quiche").with_variant(0),
        );

        let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category, IngredientCategory::Vegetables);
        assert_eq!(sections[0].lines[0].name, "épinards");
        assert_eq!(
            sections[0].lines[0].recipes,
            vec!["Quiche (végétarienne) x4"]
        );
    }

    #[test]
    fn test_duplicate_contributions_label_once() {
        let recipes = vec![Recipe::new("soupe", "Soupe", 4)
            .with_base_line(IngredientLine::new("poireau", 2.0, Unit::Piece))];
        let ingredients = vec![Ingredient::new(
            "poireau",
            "poireaux",
            IngredientCategory::Vegetables,
        )];

        let mut plan = WeekPlan::new();
        plan.add_entry(Day::Monday, MealType::Lunch, MealSlotEntry::new("soupe"));
        plan.add_entry(Day::Thursday, MealType::Dinner, MealSlotEntry::new("soupe"));

        let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);
        let line = &sections[0].lines[0];
        assert_eq!(line.value, 4.0);
        assert_eq!(line.display, "4");
        // Same recipe at the same servings contributes its label once
        assert_eq!(line.recipes, vec!["Soupe x4"]);
    }

    #[test]
    fn test_dangling_recipe_is_skipped() {
        let recipes = vec![Recipe::new("ok", "Plat", 4)
            .with_base_line(IngredientLine::new("sel", 1.0, Unit::Pinch))];
        let ingredients = vec![pantry("sel", "sel")];

        let mut plan = WeekPlan::new();
        plan.add_entry(Day::Monday, MealType::Lunch, MealSlotEntry::new("supprimé"));
        plan.add_entry(Day::Monday, MealType::Dinner, MealSlotEntry::new("ok"));

        let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].lines.len(), 1);
        assert_eq!(sections[0].lines[0].name, "sel");
    }

    #[test]
    fn test_dangling_ingredient_line_is_skipped() {
        let recipes = vec![Recipe::new("plat", "Plat", 4)
            .with_base_line(IngredientLine::new("fantôme", 100.0, Unit::Grams))
            .with_base_line(IngredientLine::new("sel", 1.0, Unit::Pinch))];
        let ingredients = vec![pantry("sel", "sel")];

        let mut plan = WeekPlan::new();
        plan.add_entry(Day::Sunday, MealType::Lunch, MealSlotEntry::new("plat"));

        let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].lines.len(), 1);
        assert_eq!(sections[0].lines[0].ingredient_id, "sel");
    }

    #[test]
    fn test_sections_follow_category_display_order() {
        let recipes = vec![Recipe::new("plat", "Plat complet", 4)
            .with_base_line(IngredientLine::new("creme", 20.0, Unit::Centiliters))
            .with_base_line(IngredientLine::new("carotte", 500.0, Unit::Grams))
            .with_base_line(IngredientLine::new("poulet", 600.0, Unit::Grams))];
        let ingredients = vec![
            Ingredient::new("creme", "crème fraîche", IngredientCategory::Dairy),
            Ingredient::new("carotte", "carottes", IngredientCategory::Vegetables),
            Ingredient::new("poulet", "blancs de poulet", IngredientCategory::Proteins),
        ];

        let mut plan = WeekPlan::new();
        plan.add_entry(Day::Saturday, MealType::Dinner, MealSlotEntry::new("plat"));

        let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);
        let categories: Vec<IngredientCategory> =
            sections.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                IngredientCategory::Vegetables,
                IngredientCategory::Proteins,
                IngredientCategory::Dairy,
            ]
        );
    }

    #[test]
    fn test_empty_plan_aggregates_to_nothing() {
        let sections = aggregate_shopping_list(&WeekPlan::new(), &[], &[]);
        assert!(sections.is_empty());
    }
}
