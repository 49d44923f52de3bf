use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::ApiError;
use crate::meals::repo::Meal;

lazy_static! {
    static ref MEAL_TYPE_RE: Regex = Regex::new("^(Breakfast|Lunch|Dinner|Snack)$").unwrap();
}

pub fn validate_meal_type(meal_type: &str) -> Result<(), ApiError> {
    if MEAL_TYPE_RE.is_match(meal_type) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "meal_type must be one of Breakfast, Lunch, Dinner, Snack; got {meal_type:?}"
        )))
    }
}

#[derive(Debug, Deserialize)]
pub struct MealCreate {
    /// Defaults to today when omitted.
    pub logged_date: Option<Date>,
    pub meal_type: String,
    pub name: String,
    pub calories: i32,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
    pub notes: Option<String>,
}

impl MealCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_meal_type(&self.meal_type)?;
        if self.name.is_empty() || self.name.len() > 200 {
            return Err(ApiError::validation("name must be 1..=200 characters"));
        }
        if self.calories < 0 {
            return Err(ApiError::validation("calories must be >= 0"));
        }
        for (field, value) in [
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fat_g", self.fat_g),
            ("fiber_g", self.fiber_g),
        ] {
            if value < 0.0 {
                return Err(ApiError::validation(format!("{field} must be >= 0")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct MealPortionUpdate {
    pub portion_weight: f64,
}

#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: Date,
    pub total_calories: i64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
    pub meals: Vec<Meal>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 {
    14
}

#[derive(Debug, Serialize)]
pub struct HistoryDay {
    pub date: Date,
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal_create(meal_type: &str, name: &str, calories: i32) -> MealCreate {
        MealCreate {
            logged_date: None,
            meal_type: meal_type.into(),
            name: name.into(),
            calories,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            fiber_g: 0.0,
            notes: None,
        }
    }

    #[test]
    fn accepts_the_four_meal_types() {
        for t in ["Breakfast", "Lunch", "Dinner", "Snack"] {
            assert!(meal_create(t, "Oatmeal", 300).validate().is_ok());
        }
    }

    #[test]
    fn rejects_unknown_meal_type() {
        assert!(meal_create("Brunch", "Oatmeal", 300).validate().is_err());
        assert!(meal_create("breakfast", "Oatmeal", 300).validate().is_err());
    }

    #[test]
    fn rejects_empty_name_and_negative_calories() {
        assert!(meal_create("Lunch", "", 300).validate().is_err());
        assert!(meal_create("Lunch", "Rice", -1).validate().is_err());
    }

    #[test]
    fn rejects_negative_macros() {
        let mut m = meal_create("Lunch", "Rice", 300);
        m.fat_g = -0.1;
        assert!(m.validate().is_err());
    }
}
