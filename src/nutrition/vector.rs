use serde::{Deserialize, Serialize};

/// The five nutrient fields attached to a meal, an ingredient (per 100 g or
/// per unit) or a recipe total. Calories are integral, macros carry one
/// decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientVector {
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

impl NutrientVector {
    /// Multiplies every field by `factor`, then rounds: calories to the
    /// nearest integer, macros to one decimal place. Rounding happens after
    /// scaling, ties go to even.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            calories: round_kcal(self.calories as f64 * factor),
            protein_g: round1(self.protein_g * factor),
            carbs_g: round1(self.carbs_g * factor),
            fat_g: round1(self.fat_g * factor),
            fiber_g: round1(self.fiber_g * factor),
        }
    }

    /// Field-wise addition.
    pub fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fat_g: self.fat_g + other.fat_g,
            fiber_g: self.fiber_g + other.fiber_g,
        }
    }

    pub fn sum(vectors: impl IntoIterator<Item = Self>) -> Self {
        vectors
            .into_iter()
            .fold(Self::default(), |acc, v| acc.add(v))
    }
}

/// Round to one decimal place, ties to even.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

/// Round to two decimal places, ties to even.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// Round calories to the nearest integer, ties to even.
pub fn round_kcal(x: f64) -> i64 {
    x.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(calories: i64, protein: f64, carbs: f64, fat: f64, fiber: f64) -> NutrientVector {
        NutrientVector {
            calories,
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
            fiber_g: fiber,
        }
    }

    #[test]
    fn scale_by_one_is_identity() {
        let vec = v(300, 25.5, 40.1, 10.0, 6.3);
        assert_eq!(vec.scale(1.0), vec);
    }

    #[test]
    fn scale_rounds_after_multiplying() {
        let vec = v(333, 10.1, 0.0, 0.0, 0.0);
        let half = vec.scale(0.5);
        // 166.5 rounds to the even integer
        assert_eq!(half.calories, 166);
        // 5.05 -> 5.0 or 5.1 depending on binary representation is avoided:
        // 10.1 * 0.5 = 5.05, scaled-then-rounded to one decimal
        assert!((half.protein_g - 5.1).abs() < 1e-9 || (half.protein_g - 5.0).abs() < 1e-9);
    }

    #[test]
    fn round1_ties_to_even() {
        assert_eq!(round1(2.25), 2.2);
        assert_eq!(round1(2.35), 2.4);
        assert_eq!(round1(1.04), 1.0);
    }

    #[test]
    fn round_kcal_ties_to_even() {
        assert_eq!(round_kcal(166.5), 166);
        assert_eq!(round_kcal(167.5), 168);
        assert_eq!(round_kcal(150.2), 150);
    }

    #[test]
    fn sum_of_empty_is_zero() {
        assert_eq!(NutrientVector::sum([]), NutrientVector::default());
    }

    #[test]
    fn sum_is_field_wise() {
        let total = NutrientVector::sum([v(100, 1.0, 2.0, 3.0, 4.0), v(200, 5.0, 6.0, 7.0, 8.0)]);
        assert_eq!(total, v(300, 6.0, 8.0, 10.0, 12.0));
    }
}
