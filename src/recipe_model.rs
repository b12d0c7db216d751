//! # Recipe and Meal Plan Data Model
//!
//! This module defines the data structures consumed by the measurement and
//! aggregation engine: recipes with their variants, ingredients with their
//! shopping category and seasonal availability, and the weekly meal plan.
//!
//! Records originate in a document store owned by an external collaborator.
//! They are decoded and validated here, at the boundary, so the engine
//! itself only ever sees explicit, well-formed structures.
//!
//! ## Core Concepts
//!
//! - **Recipe**: title, instructions, authored serving count, base
//!   ingredient list, tag set and zero or more variants
//! - **Variant**: an alternate version of a recipe whose ingredient list
//!   fully replaces the base list when selected (never merged with it)
//! - **Ingredient**: a store-level food item with a shopping category and,
//!   for vegetables, the months it is in season
//! - **WeekPlan**: monday..sunday, lunch and dinner, each slot holding any
//!   number of meal entries
//!
//! ## Usage
//!
//! ```rust
//! use mealplan::recipe_model::{Ingredient, IngredientCategory, IngredientLine, Recipe};
//! use mealplan::unit_catalog::Unit;
//!
//! let flour = Ingredient::new("flour", "farine", IngredientCategory::Pantry);
//! let bread = Recipe::new("bread", "Pain de campagne", 4)
//!     .with_base_line(IngredientLine::new("flour", 500.0, Unit::Grams))
//!     .with_tag("boulangerie");
//!
//! assert_eq!(bread.base_ingredients.len(), 1);
//! assert_eq!(flour.category, IngredientCategory::Pantry);
//! ```

use crate::unit_catalog::Unit;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A numeric amount in a given unit.
///
/// The value is expected to be non-negative; negative amounts are a caller
/// contract violation and are not checked at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric amount
    pub value: f64,
    /// The unit the amount is expressed in
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.fract() == 0.0 {
            write!(f, "{} {}", self.value as i64, self.unit.label())
        } else {
            write!(f, "{} {}", self.value, self.unit.label())
        }
    }
}

/// Shopping category an ingredient belongs to.
///
/// The order of the variants is the display order of the shopping list
/// sections. Unknown category strings from the store decode to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum IngredientCategory {
    /// Fresh vegetables and fruit; the only category with seasonality
    Vegetables,
    /// Meat, fish, eggs and other protein sources
    Proteins,
    /// Pasta, rice, potatoes, bread
    Starches,
    /// Milk, cheese, butter, cream
    Dairy,
    /// Dry goods and condiments
    Pantry,
    /// Anything else
    #[default]
    Other,
}

impl From<String> for IngredientCategory {
    fn from(name: String) -> Self {
        match name.as_str() {
            "vegetables" => IngredientCategory::Vegetables,
            "proteins" => IngredientCategory::Proteins,
            "starches" => IngredientCategory::Starches,
            "dairy" => IngredientCategory::Dairy,
            "pantry" => IngredientCategory::Pantry,
            _ => IngredientCategory::Other,
        }
    }
}

impl IngredientCategory {
    /// All categories in shopping list display order
    pub const ALL: [IngredientCategory; 6] = [
        IngredientCategory::Vegetables,
        IngredientCategory::Proteins,
        IngredientCategory::Starches,
        IngredientCategory::Dairy,
        IngredientCategory::Pantry,
        IngredientCategory::Other,
    ];
}

/// A store-level ingredient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Store identifier
    pub id: String,
    /// Human-readable name (e.g. "courgette", "farine")
    pub name: String,
    /// Shopping category
    #[serde(default)]
    pub category: IngredientCategory,
    /// Months (1-12) the ingredient is in season. Empty means year-round.
    /// Only consulted when the category is `Vegetables`.
    #[serde(default)]
    pub seasons: HashSet<u32>,
}

impl Ingredient {
    /// Create a new ingredient
    pub fn new(id: &str, name: &str, category: IngredientCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            seasons: HashSet::new(),
        }
    }

    /// Restrict availability to the given months (1-12)
    pub fn with_seasons<I: IntoIterator<Item = u32>>(mut self, months: I) -> Self {
        self.seasons = months.into_iter().collect();
        self
    }

    /// Check that the record is well-formed
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.trim().is_empty() {
            return Err(ModelError::EmptyIdentifier("ingredient".to_string()));
        }
        if let Some(&month) = self.seasons.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(ModelError::InvalidMonth(month));
        }
        Ok(())
    }
}

/// One line of a recipe's (or variant's) ingredient list.
///
/// Flat `{ingredient_id, quantity, unit}` shape, matching the store record.
/// The same ingredient may appear on several lines; lines are kept
/// independent and only merged at aggregation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Reference to an [`Ingredient`] record
    pub ingredient_id: String,
    /// Amount for the recipe's authored serving count
    pub quantity: f64,
    /// Unit of the amount
    pub unit: Unit,
}

impl IngredientLine {
    /// Create a new ingredient line
    pub fn new(ingredient_id: &str, quantity: f64, unit: Unit) -> Self {
        Self {
            ingredient_id: ingredient_id.to_string(),
            quantity,
            unit,
        }
    }

    /// The line's amount as a [`Quantity`]
    pub fn to_quantity(&self) -> Quantity {
        Quantity::new(self.quantity, self.unit.clone())
    }
}

/// An alternate version of a recipe.
///
/// When a meal entry selects a variant, the variant's ingredient list is
/// authoritative and the base list is ignored, even if the variant list is
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant name (e.g. "végétarienne")
    pub name: String,
    /// Variant-specific instructions; opaque to the engine
    #[serde(default)]
    pub instructions: String,
    /// Preparation time in minutes
    #[serde(default)]
    pub preparation_time: Option<u32>,
    /// Cooking time in minutes
    #[serde(default)]
    pub cooking_time: Option<u32>,
    /// Full replacement ingredient list
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

impl Variant {
    /// Create a new variant
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            instructions: String::new(),
            preparation_time: None,
            cooking_time: None,
            ingredients: Vec::new(),
        }
    }

    /// Set the variant instructions
    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.instructions = instructions.to_string();
        self
    }

    /// Set preparation and cooking times in minutes
    pub fn with_times(mut self, preparation: u32, cooking: u32) -> Self {
        self.preparation_time = Some(preparation);
        self.cooking_time = Some(cooking);
        self
    }

    /// Add an ingredient line to the variant list
    pub fn with_line(mut self, line: IngredientLine) -> Self {
        self.ingredients.push(line);
        self
    }
}

/// A recipe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Store identifier
    pub id: String,
    /// Recipe title
    pub title: String,
    /// Instructions; rich text from the editing UI, opaque to the engine
    #[serde(default)]
    pub instructions: String,
    /// Serving count the ingredient amounts are authored for; must be > 0
    pub servings: u32,
    /// Preparation time in minutes
    #[serde(default)]
    pub preparation_time: Option<u32>,
    /// Cooking time in minutes
    #[serde(default)]
    pub cooking_time: Option<u32>,
    /// Tag identifiers attached to the recipe
    #[serde(default)]
    pub tags: HashSet<String>,
    /// Default ingredient list, used when no variant is selected
    #[serde(default)]
    pub base_ingredients: Vec<IngredientLine>,
    /// Alternate versions of the recipe
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Recipe {
    /// Create a new recipe
    pub fn new(id: &str, title: &str, servings: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            instructions: String::new(),
            servings,
            preparation_time: None,
            cooking_time: None,
            tags: HashSet::new(),
            base_ingredients: Vec::new(),
            variants: Vec::new(),
        }
    }

    /// Set the recipe instructions
    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.instructions = instructions.to_string();
        self
    }

    /// Set preparation and cooking times in minutes
    pub fn with_times(mut self, preparation: u32, cooking: u32) -> Self {
        self.preparation_time = Some(preparation);
        self.cooking_time = Some(cooking);
        self
    }

    /// Attach a tag
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    /// Add a line to the base ingredient list
    pub fn with_base_line(mut self, line: IngredientLine) -> Self {
        self.base_ingredients.push(line);
        self
    }

    /// Add a variant
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// The effective ingredient list for an optional variant selection.
    ///
    /// Returns the variant's list (and its name) when the index resolves,
    /// otherwise the base list. An explicitly selected variant is
    /// authoritative even when its list is empty.
    pub fn effective_ingredients(&self, variant_index: Option<usize>) -> (&[IngredientLine], Option<&Variant>) {
        match variant_index.and_then(|i| self.variants.get(i)) {
            Some(variant) => (&variant.ingredients, Some(variant)),
            None => (&self.base_ingredients, None),
        }
    }

    /// Check that the record is well-formed
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.trim().is_empty() {
            return Err(ModelError::EmptyIdentifier("recipe".to_string()));
        }
        if self.servings == 0 {
            return Err(ModelError::InvalidServings(self.title.clone()));
        }
        Ok(())
    }
}

/// Day of the week, in plan display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Lunch,
    Dinner,
}

/// One planned dish: a recipe, an optional variant, a serving count.
///
/// The planning UI stores these with camelCase keys
/// (`recipeId`, `variantIndex`, `servings`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSlotEntry {
    /// Reference to a [`Recipe`] record
    pub recipe_id: String,
    /// Index into the recipe's variant list, when a variant was chosen
    #[serde(default)]
    pub variant_index: Option<usize>,
    /// Requested serving count; `None` falls back to the UI default of 4
    #[serde(default)]
    pub servings: Option<u32>,
}

impl MealSlotEntry {
    /// Create an entry for a recipe's base version
    pub fn new(recipe_id: &str) -> Self {
        Self {
            recipe_id: recipe_id.to_string(),
            variant_index: None,
            servings: None,
        }
    }

    /// Select a variant by index
    pub fn with_variant(mut self, index: usize) -> Self {
        self.variant_index = Some(index);
        self
    }

    /// Request a serving count
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }
}

/// Lunch and dinner entries for a single day
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub lunch: Vec<MealSlotEntry>,
    #[serde(default)]
    pub dinner: Vec<MealSlotEntry>,
}

impl DayPlan {
    fn slot(&self, meal: MealType) -> &Vec<MealSlotEntry> {
        match meal {
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }

    fn slot_mut(&mut self, meal: MealType) -> &mut Vec<MealSlotEntry> {
        match meal {
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }
}

/// A week of planned meals.
///
/// Days are kept in a `BTreeMap` so iteration is always monday..sunday,
/// which in turn makes aggregation output deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeekPlan {
    #[serde(default)]
    pub days: BTreeMap<Day, DayPlan>,
}

impl WeekPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to a day's meal slot
    pub fn add_entry(&mut self, day: Day, meal: MealType, entry: MealSlotEntry) {
        self.days.entry(day).or_default().slot_mut(meal).push(entry);
    }

    /// All entries in deterministic order: monday..sunday, lunch before
    /// dinner, slot list order
    pub fn entries(&self) -> impl Iterator<Item = &MealSlotEntry> {
        self.days.values().flat_map(|day| {
            day.slot(MealType::Lunch)
                .iter()
                .chain(day.slot(MealType::Dinner).iter())
        })
    }
}

/// Errors raised while decoding or validating store records.
///
/// These belong to the boundary only: once records have passed validation
/// the engine's numeric and resolution failures degrade silently instead of
/// raising (unknown units convert as identity, dangling references are
/// skipped per item).
#[derive(Debug)]
pub enum ModelError {
    /// A record arrived without a usable identifier
    EmptyIdentifier(String),
    /// A recipe's authored serving count is zero
    InvalidServings(String),
    /// A seasonal month outside 1-12
    InvalidMonth(u32),
    /// The record could not be decoded from JSON
    Decode(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyIdentifier(kind) => write!(f, "Empty {kind} identifier"),
            ModelError::InvalidServings(title) => {
                write!(f, "Recipe '{title}' has a zero serving count")
            }
            ModelError::InvalidMonth(month) => write!(f, "Month {month} is outside 1-12"),
            ModelError::Decode(msg) => write!(f, "Decode error: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Decode(err.to_string())
    }
}

impl From<anyhow::Error> for ModelError {
    fn from(err: anyhow::Error) -> Self {
        ModelError::Decode(err.to_string())
    }
}

/// Decode and validate a recipe record from store JSON
pub fn recipe_from_json(json: &str) -> Result<Recipe, ModelError> {
    let recipe: Recipe = serde_json::from_str(json)?;
    recipe.validate()?;
    Ok(recipe)
}

/// Decode and validate an ingredient record from store JSON
pub fn ingredient_from_json(json: &str) -> Result<Ingredient, ModelError> {
    let ingredient: Ingredient = serde_json::from_str(json)?;
    ingredient.validate()?;
    Ok(ingredient)
}

/// Decode a weekly plan record from store JSON
pub fn week_plan_from_json(json: &str) -> Result<WeekPlan, ModelError> {
    Ok(serde_json::from_str(json)?)
}
