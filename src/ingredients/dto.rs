use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    #[serde(default)]
    pub calories_per_100g: f64,
    #[serde(default)]
    pub protein_per_100g: f64,
    #[serde(default)]
    pub carbs_per_100g: f64,
    #[serde(default)]
    pub fat_per_100g: f64,
    #[serde(default)]
    pub fiber_per_100g: f64,
    pub usda_fdc_id: Option<i64>,
    pub upc: Option<String>,
    pub source: Option<String>,
    pub source_name: Option<String>,
}

impl IngredientCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.is_empty() {
            return Err(ApiError::validation("name must not be empty"));
        }
        for (field, value) in [
            ("calories_per_100g", self.calories_per_100g),
            ("protein_per_100g", self.protein_per_100g),
            ("carbs_per_100g", self.carbs_per_100g),
            ("fat_per_100g", self.fat_per_100g),
            ("fiber_per_100g", self.fiber_per_100g),
        ] {
            if value < 0.0 {
                return Err(ApiError::validation(format!("{field} must be >= 0")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub calories_per_100g: Option<f64>,
    pub protein_per_100g: Option<f64>,
    pub carbs_per_100g: Option<f64>,
    pub fat_per_100g: Option<f64>,
    pub fiber_per_100g: Option<f64>,
    pub usda_fdc_id: Option<i64>,
    pub upc: Option<String>,
    pub source: Option<String>,
    pub source_name: Option<String>,
}

impl IngredientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.calories_per_100g.is_none()
            && self.protein_per_100g.is_none()
            && self.carbs_per_100g.is_none()
            && self.fat_per_100g.is_none()
            && self.fiber_per_100g.is_none()
            && self.usda_fdc_id.is_none()
            && self.upc.is_none()
            && self.source.is_none()
            && self.source_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_detected() {
        assert!(IngredientUpdate::default().is_empty());
        let patch = IngredientUpdate {
            upc: Some("012345678905".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn create_rejects_negative_values() {
        let bad = IngredientCreate {
            name: "Oats".into(),
            calories_per_100g: -1.0,
            protein_per_100g: 0.0,
            carbs_per_100g: 0.0,
            fat_per_100g: 0.0,
            fiber_per_100g: 0.0,
            usda_fdc_id: None,
            upc: None,
            source: None,
            source_name: None,
        };
        assert!(bad.validate().is_err());
    }
}
