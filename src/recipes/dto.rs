use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::error::ApiError;
use crate::meals::dto::validate_meal_type;
use crate::nutrition::totals::{template_totals, RecipeTotals};

use super::repo::{Recipe, RecipeIngredient};

#[derive(Debug, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    #[serde(default = "default_servings")]
    pub servings: i32,
}

fn default_servings() -> i32 {
    1
}

impl RecipeCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.is_empty() {
            return Err(ApiError::validation("name must not be empty"));
        }
        if self.servings < 1 {
            return Err(ApiError::validation("servings must be >= 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct RecipeUpdate {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RecipeIngredientAdd {
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default = "default_checked")]
    pub checked: bool,
    #[serde(default)]
    pub calories_per_unit: f64,
    #[serde(default)]
    pub protein_per_unit: f64,
    #[serde(default)]
    pub carbs_per_unit: f64,
    #[serde(default)]
    pub fat_per_unit: f64,
    #[serde(default)]
    pub fiber_per_unit: f64,
    pub usda_fdc_id: Option<i64>,
}

fn default_checked() -> bool {
    true
}

impl RecipeIngredientAdd {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.food_name.is_empty() {
            return Err(ApiError::validation("food_name must not be empty"));
        }
        if self.quantity <= 0.0 {
            return Err(ApiError::validation("quantity must be > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeIngredientUpdate {
    pub food_name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub checked: Option<bool>,
    pub calories_per_unit: Option<f64>,
    pub protein_per_unit: Option<f64>,
    pub carbs_per_unit: Option<f64>,
    pub fat_per_unit: Option<f64>,
    pub fiber_per_unit: Option<f64>,
    pub usda_fdc_id: Option<i64>,
}

impl RecipeIngredientUpdate {
    pub fn is_empty(&self) -> bool {
        self.food_name.is_none()
            && self.quantity.is_none()
            && self.unit.is_none()
            && self.checked.is_none()
            && self.calories_per_unit.is_none()
            && self.protein_per_unit.is_none()
            && self.carbs_per_unit.is_none()
            && self.fat_per_unit.is_none()
            && self.fiber_per_unit.is_none()
            && self.usda_fdc_id.is_none()
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.is_empty() {
            return Err(ApiError::validation("No fields to update"));
        }
        if matches!(self.quantity, Some(q) if q <= 0.0) {
            return Err(ApiError::validation("quantity must be > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct IngredientOverride {
    pub ingredient_id: Uuid,
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct RecipeLogRequest {
    /// Defaults to today when omitted.
    pub logged_date: Option<Date>,
    pub meal_type: String,
    pub ingredient_overrides: Vec<IngredientOverride>,
    pub total_cooked_weight: Option<f64>,
    pub portion_weight: Option<f64>,
}

impl RecipeLogRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_meal_type(&self.meal_type)?;
        if self.ingredient_overrides.is_empty() {
            return Err(ApiError::validation("No ingredients selected"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub name: String,
    pub servings: i32,
    pub last_cooked_weight: Option<f64>,
    pub last_meal_type: Option<String>,
    pub ingredients: Vec<RecipeIngredient>,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
}

impl RecipeResponse {
    /// Totals cover the checked ingredients only; they are exact sums.
    pub fn build(recipe: Recipe, ingredients: Vec<RecipeIngredient>) -> Self {
        let RecipeTotals {
            total_calories,
            total_protein,
            total_carbs,
            total_fat,
            total_fiber,
        } = template_totals(ingredients.iter().map(RecipeIngredient::line));
        Self {
            id: recipe.id,
            name: recipe.name,
            servings: recipe.servings,
            last_cooked_weight: recipe.last_cooked_weight,
            last_meal_type: recipe.last_meal_type,
            ingredients,
            total_calories,
            total_protein,
            total_carbs,
            total_fat,
            total_fiber,
        }
    }
}
