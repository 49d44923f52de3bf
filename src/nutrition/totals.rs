use serde::Serialize;

use super::vector::{round1, round_kcal, NutrientVector};

/// Per-unit nutrient values of one recipe ingredient.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerUnit {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// One template row as fed into the totals calculation.
#[derive(Debug, Clone, Copy)]
pub struct TemplateLine {
    pub checked: bool,
    pub quantity: f64,
    pub per_unit: PerUnit,
}

/// Exact (unrounded) nutrient sums of a recipe. Rounding happens only when a
/// total becomes part of a meal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RecipeTotals {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
}

impl RecipeTotals {
    fn accumulate(&mut self, quantity: f64, per_unit: PerUnit) {
        self.total_calories += quantity * per_unit.calories;
        self.total_protein += quantity * per_unit.protein;
        self.total_carbs += quantity * per_unit.carbs;
        self.total_fat += quantity * per_unit.fat;
        self.total_fiber += quantity * per_unit.fiber;
    }

    /// Applies a portion scale and rounds into meal-shaped macros.
    pub fn into_meal_macros(self, scale: f64) -> NutrientVector {
        NutrientVector {
            calories: round_kcal(self.total_calories * scale),
            protein_g: round1(self.total_protein * scale),
            carbs_g: round1(self.total_carbs * scale),
            fat_g: round1(self.total_fat * scale),
            fiber_g: round1(self.total_fiber * scale),
        }
    }
}

/// Sums `quantity x per-unit` over the checked template rows. Unchecked rows
/// stay stored but never contribute. Empty input yields zeros.
pub fn template_totals(lines: impl IntoIterator<Item = TemplateLine>) -> RecipeTotals {
    let mut totals = RecipeTotals::default();
    for line in lines.into_iter().filter(|l| l.checked) {
        totals.accumulate(line.quantity, line.per_unit);
    }
    totals
}

/// Sums override quantities against per-unit values. Used when logging a
/// recipe: the override list defines inclusion, the `checked` flag does not
/// apply here.
pub fn override_totals(lines: impl IntoIterator<Item = (f64, PerUnit)>) -> RecipeTotals {
    let mut totals = RecipeTotals::default();
    for (quantity, per_unit) in lines {
        totals.accumulate(quantity, per_unit);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_unit(calories: f64, protein: f64) -> PerUnit {
        PerUnit {
            calories,
            protein,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
        }
    }

    #[test]
    fn unchecked_rows_never_contribute() {
        // servings=4 recipe: 400 g at 1.2 kcal/g checked, plus an unchecked row
        let lines = [
            TemplateLine {
                checked: true,
                quantity: 400.0,
                per_unit: per_unit(1.2, 0.02),
            },
            TemplateLine {
                checked: false,
                quantity: 999.0,
                per_unit: per_unit(9.9, 9.9),
            },
        ];
        let totals = template_totals(lines);
        assert_eq!(totals.total_calories, 480.0);
        assert_eq!(totals.total_protein, 8.0);
    }

    #[test]
    fn empty_template_yields_zeros() {
        assert_eq!(template_totals([]), RecipeTotals::default());
    }

    #[test]
    fn totals_are_exact_sums() {
        let lines = [
            TemplateLine {
                checked: true,
                quantity: 123.0,
                per_unit: per_unit(0.52, 0.003),
            },
            TemplateLine {
                checked: true,
                quantity: 80.0,
                per_unit: per_unit(1.65, 0.25),
            },
        ];
        let totals = template_totals(lines);
        assert!((totals.total_calories - (123.0 * 0.52 + 80.0 * 1.65)).abs() < 1e-9);
        assert!((totals.total_protein - (123.0 * 0.003 + 80.0 * 0.25)).abs() < 1e-9);
    }

    #[test]
    fn override_totals_ignore_nothing() {
        let totals = override_totals([(100.0, per_unit(1.0, 0.1)), (50.0, per_unit(2.0, 0.2))]);
        assert_eq!(totals.total_calories, 200.0);
        assert!((totals.total_protein - 20.0).abs() < 1e-9);
    }

    #[test]
    fn meal_macros_round_after_scaling() {
        let totals = RecipeTotals {
            total_calories: 961.0,
            total_protein: 33.333,
            total_carbs: 0.0,
            total_fat: 0.0,
            total_fiber: 0.0,
        };
        let macros = totals.into_meal_macros(0.25);
        assert_eq!(macros.calories, 240); // 240.25 -> 240
        assert_eq!(macros.protein_g, 8.3); // 8.33325 -> 8.3
    }
}
