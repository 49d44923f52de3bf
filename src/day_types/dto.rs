use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct DayTypeCreate {
    pub name: String,
    pub calories_min: Option<i32>,
    pub calories_max: Option<i32>,
    pub protein_min: Option<f64>,
    pub protein_max: Option<f64>,
    pub carbs_min: Option<f64>,
    pub carbs_max: Option<f64>,
    pub fat_min: Option<f64>,
    pub fat_max: Option<f64>,
    pub fiber_min: Option<f64>,
    pub fiber_max: Option<f64>,
}

impl DayTypeCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.is_empty() {
            return Err(ApiError::validation("name must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DayTypeUpdate {
    pub name: Option<String>,
    pub calories_min: Option<i32>,
    pub calories_max: Option<i32>,
    pub protein_min: Option<f64>,
    pub protein_max: Option<f64>,
    pub carbs_min: Option<f64>,
    pub carbs_max: Option<f64>,
    pub fat_min: Option<f64>,
    pub fat_max: Option<f64>,
    pub fiber_min: Option<f64>,
    pub fiber_max: Option<f64>,
}

impl DayTypeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.calories_min.is_none()
            && self.calories_max.is_none()
            && self.protein_min.is_none()
            && self.protein_max.is_none()
            && self.carbs_min.is_none()
            && self.carbs_max.is_none()
            && self.fat_min.is_none()
            && self.fat_max.is_none()
            && self.fiber_min.is_none()
            && self.fiber_max.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct DayLogSet {
    pub day_type_id: Uuid,
}
