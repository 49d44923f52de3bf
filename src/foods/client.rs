use anyhow::Context;
use axum::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::nutrition::normalize::{
    extract_nutrient, per_100g, NUTRIENT_CARBS, NUTRIENT_ENERGY, NUTRIENT_FAT, NUTRIENT_FIBER,
    NUTRIENT_PROTEIN,
};

use super::dto::{FoodSearchResult, UpcFoodResult};

const USDA_SEARCH_URL: &str = "https://api.nal.usda.gov/fdc/v1/foods/search";
const OFF_PRODUCT_URL: &str = "https://world.openfoodfacts.org/api/v0/product";

/// External food-database lookup.
///
/// `lookup_upc` distinguishes "no match anywhere" (`Ok(None)`) from an
/// unreachable or failing upstream (`Err`).
#[async_trait]
pub trait FoodLookup: Send + Sync {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<FoodSearchResult>>;
    async fn lookup_upc(&self, code: &str) -> anyhow::Result<Option<UpcFoodResult>>;
}

/// USDA FoodData Central, with Open Food Facts as the barcode fallback.
#[derive(Clone)]
pub struct UsdaFoodClient {
    http: reqwest::Client,
    api_key: String,
}

impl UsdaFoodClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    async fn usda_search(&self, query: &str, data_types: &[&str]) -> anyhow::Result<Vec<FdcFood>> {
        let mut params: Vec<(&str, &str)> = vec![
            ("query", query),
            ("api_key", &self.api_key),
            ("pageSize", "20"),
        ];
        for dt in data_types {
            params.push(("dataType", dt));
        }

        let response = self
            .http
            .get(USDA_SEARCH_URL)
            .query(&params)
            .send()
            .await
            .context("USDA API request failed")?;
        if !response.status().is_success() {
            anyhow::bail!("USDA API returned {}", response.status());
        }

        let body: FdcSearchResponse = response.json().await.context("USDA API response body")?;
        Ok(body.foods)
    }
}

#[async_trait]
impl FoodLookup for UsdaFoodClient {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<FoodSearchResult>> {
        // Quotes trigger upstream query syntax; strip them.
        let query: String = query.replace(['"', '\''], "");
        let foods = self
            .usda_search(&query, &["Foundation", "SR Legacy", "Branded"])
            .await?;
        debug!(query = %query, hits = foods.len(), "usda search");
        Ok(foods.into_iter().map(map_search_food).collect())
    }

    async fn lookup_upc(&self, code: &str) -> anyhow::Result<Option<UpcFoodResult>> {
        let foods = self.usda_search(code, &["Branded"]).await?;
        if let Some(food) = foods
            .into_iter()
            .find(|f| matches!(&f.gtin_upc, Some(gtin) if upc_matches(gtin, code)))
        {
            debug!(code, fdc_id = food.fdc_id, "upc matched in usda");
            return Ok(Some(map_branded_food(food)));
        }

        // Disjoint schema on the fallback source; merged into the same shape.
        let url = format!("{OFF_PRODUCT_URL}/{code}.json");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("Open Food Facts request failed")?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("Open Food Facts returned {}", response.status());
        }

        let body: OffResponse = response
            .json()
            .await
            .context("Open Food Facts response body")?;
        if body.status != 1 {
            return Ok(None);
        }
        let Some(product) = body.product else {
            return Ok(None);
        };
        debug!(code, "upc matched in open food facts");
        Ok(Some(map_off_product(code, product)))
    }
}

// --- USDA wire shapes ---

#[derive(Debug, Deserialize)]
struct FdcSearchResponse {
    #[serde(default)]
    foods: Vec<FdcFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FdcFood {
    fdc_id: i64,
    description: String,
    data_type: Option<String>,
    serving_size: Option<f64>,
    gtin_upc: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<FdcNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FdcNutrient {
    nutrient_id: Option<i64>,
    value: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct Per100g {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
}

impl FdcFood {
    fn is_branded(&self) -> bool {
        self.data_type.as_deref() == Some("Branded")
    }

    /// Extracts the five tracked nutrients and normalizes them to per 100 g.
    /// Branded records report serving-relative values; generic records are
    /// already per 100 g.
    fn per_100g(&self) -> Per100g {
        let pairs: Vec<(i64, f64)> = self
            .food_nutrients
            .iter()
            .filter_map(|n| Some((n.nutrient_id?, n.value?)))
            .collect();
        let branded = self.is_branded();
        let serving = self.serving_size.unwrap_or(0.0);
        let norm = |id| per_100g(extract_nutrient(&pairs, id), serving, branded);
        Per100g {
            calories: norm(NUTRIENT_ENERGY),
            protein: norm(NUTRIENT_PROTEIN),
            carbs: norm(NUTRIENT_CARBS),
            fat: norm(NUTRIENT_FAT),
            fiber: norm(NUTRIENT_FIBER),
        }
    }
}

fn map_search_food(food: FdcFood) -> FoodSearchResult {
    let n = food.per_100g();
    FoodSearchResult {
        fdc_id: food.fdc_id,
        name: title_case(&food.description),
        calories_per_100g: n.calories,
        protein_per_100g: n.protein,
        carbs_per_100g: n.carbs,
        fat_per_100g: n.fat,
        fiber_per_100g: n.fiber,
    }
}

fn map_branded_food(food: FdcFood) -> UpcFoodResult {
    let n = food.per_100g();
    UpcFoodResult {
        source: "usda".into(),
        upc: food.gtin_upc.clone(),
        usda_fdc_id: Some(food.fdc_id),
        source_name: title_case(&food.description),
        calories_per_100g: n.calories,
        protein_per_100g: n.protein,
        carbs_per_100g: n.carbs,
        fat_per_100g: n.fat,
        fiber_per_100g: n.fiber,
    }
}

// --- Open Food Facts wire shapes ---

#[derive(Debug, Deserialize)]
struct OffResponse {
    #[serde(default)]
    status: i32,
    product: Option<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    product_name: Option<String>,
    #[serde(default)]
    nutriments: OffNutriments,
}

#[derive(Debug, Default, Deserialize)]
struct OffNutriments {
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<f64>,
    proteins_100g: Option<f64>,
    carbohydrates_100g: Option<f64>,
    fat_100g: Option<f64>,
    fiber_100g: Option<f64>,
}

fn map_off_product(code: &str, product: OffProduct) -> UpcFoodResult {
    let n = product.nutriments;
    UpcFoodResult {
        source: "openfoodfacts".into(),
        upc: Some(code.to_string()),
        usda_fdc_id: None,
        source_name: product.product_name.unwrap_or_else(|| code.to_string()),
        calories_per_100g: n.energy_kcal_100g.unwrap_or(0.0),
        protein_per_100g: n.proteins_100g.unwrap_or(0.0),
        carbs_per_100g: n.carbohydrates_100g.unwrap_or(0.0),
        fat_per_100g: n.fat_100g.unwrap_or(0.0),
        fiber_per_100g: n.fiber_100g.unwrap_or(0.0),
    }
}

/// Barcodes compare with leading zeros stripped; upstream pads GTINs.
fn upc_matches(gtin: &str, code: &str) -> bool {
    gtin.trim_start_matches('0') == code.trim_start_matches('0')
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upc_comparison_strips_leading_zeros() {
        assert!(upc_matches("0012345678905", "012345678905"));
        assert!(upc_matches("012345678905", "12345678905"));
        assert!(!upc_matches("0012345678905", "012345678906"));
    }

    #[test]
    fn title_cases_usda_descriptions() {
        assert_eq!(title_case("CHEDDAR CHEESE"), "Cheddar Cheese");
        assert_eq!(title_case("apples, raw"), "Apples, Raw");
    }

    #[test]
    fn branded_search_hit_normalizes_per_serving_values() {
        let json = r#"{
            "foods": [{
                "fdcId": 123456,
                "description": "GREEK YOGURT",
                "dataType": "Branded",
                "servingSize": 150.0,
                "gtinUpc": "0012345678905",
                "foodNutrients": [
                    {"nutrientId": 1008, "value": 90.0},
                    {"nutrientId": 1003, "value": 15.0}
                ]
            }]
        }"#;
        let parsed: FdcSearchResponse = serde_json::from_str(json).unwrap();
        let result = map_search_food(parsed.foods.into_iter().next().unwrap());
        assert_eq!(result.name, "Greek Yogurt");
        assert_eq!(result.calories_per_100g, 60.0);
        assert_eq!(result.protein_per_100g, 10.0);
        assert_eq!(result.carbs_per_100g, 0.0);
    }

    #[test]
    fn generic_search_hit_passes_values_through() {
        let json = r#"{
            "foods": [{
                "fdcId": 173904,
                "description": "Oats",
                "dataType": "SR Legacy",
                "foodNutrients": [
                    {"nutrientId": 1008, "value": 389.0},
                    {"nutrientId": 1079, "value": 10.6}
                ]
            }]
        }"#;
        let parsed: FdcSearchResponse = serde_json::from_str(json).unwrap();
        let result = map_search_food(parsed.foods.into_iter().next().unwrap());
        assert_eq!(result.calories_per_100g, 389.0);
        assert_eq!(result.fiber_per_100g, 10.6);
    }

    #[test]
    fn matched_branded_food_reports_usda_source() {
        let food = FdcFood {
            fdc_id: 999,
            description: "SPARKLING WATER".into(),
            data_type: Some("Branded".into()),
            serving_size: Some(100.0),
            gtin_upc: Some("0012345678905".into()),
            food_nutrients: vec![],
        };
        assert!(upc_matches(food.gtin_upc.as_deref().unwrap(), "012345678905"));
        let result = map_branded_food(food);
        assert_eq!(result.source, "usda");
        assert_eq!(result.upc.as_deref(), Some("0012345678905"));
        assert_eq!(result.calories_per_100g, 0.0);
    }

    #[test]
    fn off_product_maps_per_100g_fields_unchanged() {
        let json = r#"{
            "status": 1,
            "product": {
                "product_name": "Dark Chocolate",
                "nutriments": {
                    "energy-kcal_100g": 546.0,
                    "proteins_100g": 7.8,
                    "carbohydrates_100g": 45.9,
                    "fat_100g": 31.0,
                    "fiber_100g": 10.9
                }
            }
        }"#;
        let parsed: OffResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, 1);
        let result = map_off_product("3017620422003", parsed.product.unwrap());
        assert_eq!(result.source, "openfoodfacts");
        assert_eq!(result.source_name, "Dark Chocolate");
        assert_eq!(result.calories_per_100g, 546.0);
        assert_eq!(result.fiber_per_100g, 10.9);
    }
}
