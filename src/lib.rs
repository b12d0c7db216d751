//! # Mealplan Measurement & Aggregation Engine
//!
//! The computational core of a household recipe and meal-planning app:
//! unit conversion and culinary-fraction formatting, serving-count scaling,
//! weekly shopping list aggregation, and multi-criteria recipe search.
//!
//! The engine is a pure library. Recipes, ingredients and plans are owned
//! by an external document store; they enter here as plain data, are
//! validated at the boundary, and are never mutated.

pub mod recipe_model;
pub mod recipe_search;
pub mod scaling;
pub mod shopping_list;
pub mod unit_catalog;
pub mod unit_conversion;
