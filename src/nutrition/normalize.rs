use super::vector::round2;

// Nutrient numbers in USDA FoodData Central.
pub const NUTRIENT_ENERGY: i64 = 1008;
pub const NUTRIENT_PROTEIN: i64 = 1003;
pub const NUTRIENT_FAT: i64 = 1004;
pub const NUTRIENT_CARBS: i64 = 1005;
pub const NUTRIENT_FIBER: i64 = 1079;

/// Picks the reported value for one nutrient number out of a food's nutrient
/// list. Absent nutrients map to 0.0.
pub fn extract_nutrient(nutrients: &[(i64, f64)], nutrient_id: i64) -> f64 {
    nutrients
        .iter()
        .find(|(id, _)| *id == nutrient_id)
        .map(|(_, value)| round2(*value))
        .unwrap_or(0.0)
}

/// Converts an externally sourced nutrient value to a per-100 g basis.
///
/// Generic records (reference foods) already report per 100 g and pass
/// through unchanged. Branded records report per serving and are rescaled by
/// `serving_size` grams. A non-positive serving size falls back to the raw
/// value; upstream data does contain such records.
pub fn per_100g(value: f64, serving_size: f64, branded: bool) -> f64 {
    if !branded {
        return value;
    }
    if serving_size <= 0.0 {
        return value;
    }
    round2(value / serving_size * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_values_pass_through() {
        assert_eq!(per_100g(23.4, 55.0, false), 23.4);
    }

    #[test]
    fn branded_hundred_gram_serving_is_identity() {
        assert_eq!(per_100g(12.5, 100.0, true), 12.5);
    }

    #[test]
    fn branded_values_rescale_to_100g() {
        // 5 g of protein in a 50 g serving -> 10 g per 100 g
        assert_eq!(per_100g(5.0, 50.0, true), 10.0);
        // 140 kcal in a 240 g serving
        assert_eq!(per_100g(140.0, 240.0, true), 58.33);
    }

    #[test]
    fn zero_serving_size_falls_back_to_raw() {
        assert_eq!(per_100g(7.7, 0.0, true), 7.7);
        assert_eq!(per_100g(7.7, -1.0, true), 7.7);
    }

    #[test]
    fn extract_picks_by_nutrient_number() {
        let nutrients = [(NUTRIENT_ENERGY, 52.0), (NUTRIENT_PROTEIN, 0.26)];
        assert_eq!(extract_nutrient(&nutrients, NUTRIENT_ENERGY), 52.0);
        assert_eq!(extract_nutrient(&nutrients, NUTRIENT_PROTEIN), 0.26);
        assert_eq!(extract_nutrient(&nutrients, NUTRIENT_FIBER), 0.0);
    }
}
