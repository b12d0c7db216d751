//! # Recipe Search Module
//!
//! Multi-criteria recipe filtering: diacritic-insensitive free-text search
//! across a recipe's fields, tag intersection, and seasonal availability of
//! the vegetables a recipe uses.
//!
//! ## Features
//!
//! - Accent-blind matching: "pâté" and "pate" normalize identically, so a
//!   household typing either finds the same recipes
//! - Comma-separated terms with AND semantics: every term must hit at least
//!   one field (title, instructions, ingredient names, variant names and
//!   variant instructions)
//! - Tag selection with AND semantics across the selected tags
//! - Seasonal veto: one out-of-season vegetable anywhere in the recipe
//!   (base list or any variant) excludes it
//!
//! All predicates are pure; filter options arrive in an explicit
//! [`RecipeFilter`] rather than being read from ambient storage, and the
//! output preserves the input recipe order.

use crate::recipe_model::{Ingredient, IngredientCategory, IngredientLine, Recipe};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Characters removed by normalization, after lowercasing and
    /// diacritic stripping
    static ref STRIP_PATTERN: Regex =
        Regex::new(r"[^a-z0-9\s,]").expect("Normalization strip pattern should be valid");
}

/// Search and filter options, passed explicitly into [`filter_recipes`].
///
/// The seasonal toggle and month are configuration owned by the caller
/// (the UI persists them); the engine never reads them from ambient state.
#[derive(Debug, Clone)]
pub struct RecipeFilter {
    /// Free-text query; comma-separated terms, AND semantics
    pub query: String,
    /// Selected tag identifiers; a recipe must carry all of them
    pub tags: HashSet<String>,
    /// Month (1-12) used by the seasonal filter
    pub current_month: u32,
    /// Whether the seasonal filter is active
    pub seasonal_enabled: bool,
}

impl RecipeFilter {
    /// An inactive filter that matches every recipe
    pub fn new() -> Self {
        Self {
            query: String::new(),
            tags: HashSet::new(),
            current_month: current_month(),
            seasonal_enabled: false,
        }
    }

    /// Set the free-text query
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    /// Require a tag
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    /// Enable the seasonal filter for the given month (1-12)
    pub fn with_seasonal_filter(mut self, month: u32) -> Self {
        self.current_month = month;
        self.seasonal_enabled = true;
        self
    }
}

impl Default for RecipeFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// The current calendar month (1-12), for feeding [`RecipeFilter`]
pub fn current_month() -> u32 {
    use chrono::Datelike;
    chrono::Local::now().month()
}

/// Build an id lookup over ingredient records
pub fn ingredient_index(ingredients: &[Ingredient]) -> HashMap<&str, &Ingredient> {
    ingredients.iter().map(|i| (i.id.as_str(), i)).collect()
}

/// Normalize text for accent- and case-insensitive matching.
///
/// Lowercases, decomposes (NFD) and strips combining diacritics, then
/// removes every character outside `[a-z0-9\s,]`. Idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
///
/// # Examples
///
/// ```rust
/// use mealplan::recipe_search::normalize;
///
/// assert_eq!(normalize("Pâtes à l'ail"), "pates a lail");
/// assert_eq!(normalize("CITRON"), "citron");
/// ```
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    STRIP_PATTERN.replace_all(&stripped, "").into_owned()
}

/// Check a free-text query against every searchable field of a recipe.
///
/// The query is split on commas into terms; every term must independently
/// match at least one of: title, instructions, the name of any ingredient
/// referenced by the base list or a variant list, a variant name, or
/// variant instructions. An empty term list matches everything.
pub fn matches_search(
    recipe: &Recipe,
    ingredients_by_id: &HashMap<&str, &Ingredient>,
    raw_query: &str,
) -> bool {
    let terms: Vec<String> = raw_query
        .split(',')
        .map(|term| normalize(term).trim().to_string())
        .filter(|term| !term.is_empty())
        .collect();

    if terms.is_empty() {
        return true;
    }

    let mut haystacks: Vec<String> = vec![normalize(&recipe.title), normalize(&recipe.instructions)];
    let mut push_ingredient_names = |lines: &[IngredientLine]| {
        for line in lines {
            if let Some(ingredient) = ingredients_by_id.get(line.ingredient_id.as_str()) {
                haystacks.push(normalize(&ingredient.name));
            }
        }
    };
    push_ingredient_names(&recipe.base_ingredients);
    for variant in &recipe.variants {
        push_ingredient_names(&variant.ingredients);
    }
    for variant in &recipe.variants {
        haystacks.push(normalize(&variant.name));
        haystacks.push(normalize(&variant.instructions));
    }

    let matched = terms
        .iter()
        .all(|term| haystacks.iter().any(|haystack| haystack.contains(term)));
    trace!(
        "Search '{}' against '{}': {}",
        raw_query,
        recipe.title,
        matched
    );
    matched
}

/// Check that a recipe carries every selected tag.
///
/// AND semantics: selecting two tags keeps only recipes tagged with both.
/// An empty selection matches everything.
pub fn matches_tags(recipe: &Recipe, selected_tags: &HashSet<String>) -> bool {
    selected_tags.is_empty() || selected_tags.iter().all(|tag| recipe.tags.contains(tag))
}

/// Check that every vegetable the recipe references is in season.
///
/// Vegetables are collected from the base list and every variant list. A
/// vegetable passes when its season set is empty (year-round) or contains
/// `month`. AND semantics: a single out-of-season vegetable anywhere in
/// the recipe excludes it. Recipes without vegetables pass trivially, as
/// do references that cannot be resolved.
pub fn matches_season(
    recipe: &Recipe,
    month: u32,
    ingredients_by_id: &HashMap<&str, &Ingredient>,
) -> bool {
    let vegetables = recipe
        .base_ingredients
        .iter()
        .chain(recipe.variants.iter().flat_map(|v| v.ingredients.iter()))
        .filter_map(|line| ingredients_by_id.get(line.ingredient_id.as_str()))
        .filter(|ingredient| ingredient.category == IngredientCategory::Vegetables);

    for vegetable in vegetables {
        if !vegetable.seasons.is_empty() && !vegetable.seasons.contains(&month) {
            trace!(
                "'{}' excluded: {} not in season in month {}",
                recipe.title,
                vegetable.name,
                month
            );
            return false;
        }
    }
    true
}

/// Apply the composite filter: search AND tags AND season.
///
/// The three predicates are evaluated independently and combined with
/// logical AND; recipes come back in their input order.
pub fn filter_recipes<'a>(
    recipes: &'a [Recipe],
    ingredients: &[Ingredient],
    filter: &RecipeFilter,
) -> Vec<&'a Recipe> {
    let index = ingredient_index(ingredients);

    let matches: Vec<&Recipe> = recipes
        .iter()
        .filter(|recipe| matches_search(recipe, &index, &filter.query))
        .filter(|recipe| matches_tags(recipe, &filter.tags))
        .filter(|recipe| {
            !filter.seasonal_enabled || matches_season(recipe, filter.current_month, &index)
        })
        .collect();

    debug!(
        "Filter kept {} of {} recipes (query: '{}', {} tags, seasonal: {})",
        matches.len(),
        recipes.len(),
        filter.query,
        filter.tags.len(),
        filter.seasonal_enabled
    );
    matches
}
