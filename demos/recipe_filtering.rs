//! # Recipe Filtering Example
//!
//! This example runs the composite recipe filter: a free-text query with
//! AND semantics across comma-separated terms, tag intersection, and the
//! seasonal filter that excludes recipes using out-of-season vegetables.

use anyhow::Result;
use mealplan::recipe_model::{Ingredient, IngredientCategory, IngredientLine, Recipe};
use mealplan::recipe_search::{current_month, filter_recipes, RecipeFilter};
use mealplan::unit_catalog::Unit;

fn main() -> Result<()> {
    env_logger::init();

    println!("🔍 Recipe Filtering Example");
    println!("===========================\n");

    let ingredients = vec![
        Ingredient::new("poulet", "poulet fermier", IngredientCategory::Proteins),
        Ingredient::new("citron", "citron jaune", IngredientCategory::Other),
        Ingredient::new("tomate", "tomates", IngredientCategory::Vegetables)
            .with_seasons([6, 7, 8, 9]),
        Ingredient::new("poireau", "poireaux", IngredientCategory::Vegetables)
            .with_seasons([10, 11, 12, 1, 2]),
    ];

    let recipes = vec![
        Recipe::new("poulet-citron", "Poulet au citron confit", 4)
            .with_tag("plat")
            .with_base_line(IngredientLine::new("poulet", 1.0, Unit::Piece))
            .with_base_line(IngredientLine::new("citron", 2.0, Unit::Piece)),
        Recipe::new("basquaise", "Poulet basquaise", 4)
            .with_tag("plat")
            .with_tag("mijoté")
            .with_base_line(IngredientLine::new("poulet", 1.0, Unit::Piece))
            .with_base_line(IngredientLine::new("tomate", 4.0, Unit::Piece)),
        Recipe::new("flamiche", "Flamiche aux poireaux", 6)
            .with_tag("plat")
            .with_base_line(IngredientLine::new("poireau", 3.0, Unit::Piece)),
    ];

    // Free-text search: both terms must match, in any field
    let query = RecipeFilter::new().with_query("poulet, citron");
    println!("Query \"poulet, citron\":");
    for recipe in filter_recipes(&recipes, &ingredients, &query) {
        println!("  • {}", recipe.title);
    }

    // Tag selection: every selected tag is required
    let tagged = RecipeFilter::new().with_tag("plat").with_tag("mijoté");
    println!("\nTags plat + mijoté:");
    for recipe in filter_recipes(&recipes, &ingredients, &tagged) {
        println!("  • {}", recipe.title);
    }

    // Seasonal filter at the actual current month
    let month = current_month();
    let seasonal = RecipeFilter::new().with_seasonal_filter(month);
    println!("\nIn season (month {}):", month);
    for recipe in filter_recipes(&recipes, &ingredients, &seasonal) {
        println!("  • {}", recipe.title);
    }

    Ok(())
}
