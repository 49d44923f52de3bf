use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// One name-search hit, normalized to per 100 g.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FoodSearchResult {
    pub fdc_id: i64,
    pub name: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
    pub fiber_per_100g: f64,
}

/// A barcode hit merged from either source into one shape; `source`
/// discriminates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpcFoodResult {
    pub source: String,
    pub upc: Option<String>,
    pub usda_fdc_id: Option<i64>,
    pub source_name: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
    pub fiber_per_100g: f64,
}
