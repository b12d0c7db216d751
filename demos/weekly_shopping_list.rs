//! # Weekly Shopping List Example
//!
//! This example builds a small household recipe collection and a week of
//! planned meals, then aggregates everything into a categorized shopping
//! list: quantities are scaled to each meal's serving count, merged across
//! the week through the unit conversion tables, and rendered with culinary
//! fractions.

use anyhow::Result;
use mealplan::recipe_model::{
    Day, Ingredient, IngredientCategory, IngredientLine, MealSlotEntry, MealType, Recipe, Variant,
    WeekPlan,
};
use mealplan::shopping_list::aggregate_shopping_list;
use mealplan::unit_catalog::Unit;

fn main() -> Result<()> {
    env_logger::init();

    println!("🛒 Weekly Shopping List Example");
    println!("================================\n");

    let ingredients = vec![
        Ingredient::new("farine", "farine", IngredientCategory::Pantry),
        Ingredient::new("sucre", "sucre", IngredientCategory::Pantry),
        Ingredient::new("lait", "lait entier", IngredientCategory::Dairy),
        Ingredient::new("beurre", "beurre doux", IngredientCategory::Dairy),
        Ingredient::new("oeuf", "œufs", IngredientCategory::Proteins),
        Ingredient::new("lardons", "lardons", IngredientCategory::Proteins),
        Ingredient::new("courgette", "courgettes", IngredientCategory::Vegetables)
            .with_seasons([6, 7, 8, 9]),
        Ingredient::new("oignon", "oignons", IngredientCategory::Vegetables),
    ];

    let recipes = vec![
        Recipe::new("crepes", "Crêpes", 4)
            .with_base_line(IngredientLine::new("farine", 250.0, Unit::Grams))
            .with_base_line(IngredientLine::new("lait", 50.0, Unit::Centiliters))
            .with_base_line(IngredientLine::new("oeuf", 3.0, Unit::Piece))
            .with_base_line(IngredientLine::new("sucre", 2.0, Unit::Tablespoons)),
        Recipe::new("quiche", "Quiche lorraine", 6)
            .with_base_line(IngredientLine::new("farine", 1.0, Unit::Cups))
            .with_base_line(IngredientLine::new("beurre", 125.0, Unit::Grams))
            .with_base_line(IngredientLine::new("oeuf", 4.0, Unit::Piece))
            .with_base_line(IngredientLine::new("lardons", 200.0, Unit::Grams))
            .with_variant(
                Variant::new("aux courgettes")
                    .with_line(IngredientLine::new("farine", 1.0, Unit::Cups))
                    .with_line(IngredientLine::new("beurre", 125.0, Unit::Grams))
                    .with_line(IngredientLine::new("oeuf", 4.0, Unit::Piece))
                    .with_line(IngredientLine::new("courgette", 2.0, Unit::Piece))
                    .with_line(IngredientLine::new("oignon", 1.0, Unit::Piece)),
            ),
    ];

    let mut plan = WeekPlan::new();
    plan.add_entry(Day::Monday, MealType::Dinner, MealSlotEntry::new("crepes"));
    plan.add_entry(
        Day::Wednesday,
        MealType::Lunch,
        MealSlotEntry::new("quiche").with_servings(8),
    );
    plan.add_entry(
        Day::Friday,
        MealType::Dinner,
        MealSlotEntry::new("quiche").with_variant(0).with_servings(4),
    );
    // A recipe deleted from the store; the aggregator skips it gracefully
    plan.add_entry(Day::Sunday, MealType::Lunch, MealSlotEntry::new("tajine"));

    let sections = aggregate_shopping_list(&plan, &recipes, &ingredients);

    for section in &sections {
        println!("📂 {:?}", section.category);
        for line in &section.lines {
            println!("  • {} — {}", line.name, line.display);
            for recipe in &line.recipes {
                println!("      ↳ {}", recipe);
            }
        }
        println!();
    }

    Ok(())
}
