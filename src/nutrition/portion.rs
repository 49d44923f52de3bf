use super::vector::NutrientVector;

/// Rescales a logged meal's nutrients when the eaten portion weight changes.
///
/// Both the old and the new scale are taken relative to the total cooked
/// weight of the batch; the nutrients are multiplied by the ratio of the two.
/// Returns `None` when no nutrient rescale applies (unknown or non-positive
/// cooked weight, or a zero old scale) -- the caller then updates only the
/// stored portion weight.
///
/// Calories are floored at 0 after rounding; the macro fields are rounded to
/// one decimal without a floor. The asymmetry is long-standing behavior and
/// is kept.
pub fn rescale(
    current: NutrientVector,
    total_cooked_weight: Option<f64>,
    old_portion_weight: Option<f64>,
    new_portion_weight: f64,
) -> Option<NutrientVector> {
    let cooked = total_cooked_weight.filter(|w| *w > 0.0)?;

    let old_scale = match old_portion_weight {
        Some(w) => w / cooked,
        None => 1.0,
    };
    if old_scale == 0.0 {
        return None;
    }
    let new_scale = new_portion_weight / cooked;
    let ratio = new_scale / old_scale;

    let mut scaled = current.scale(ratio);
    scaled.calories = scaled.calories.max(0);
    Some(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(calories: i64, protein: f64) -> NutrientVector {
        NutrientVector {
            calories,
            protein_g: protein,
            carbs_g: 0.0,
            fat_g: 0.0,
            fiber_g: 0.0,
        }
    }

    #[test]
    fn halving_the_portion_halves_the_macros() {
        // 1000 g batch, 200 g logged -> rescale to 100 g
        let out = rescale(meal(300, 24.0), Some(1000.0), Some(200.0), 100.0).unwrap();
        assert_eq!(out.calories, 150);
        assert_eq!(out.protein_g, 12.0);
    }

    #[test]
    fn same_portion_weight_is_a_no_op() {
        let before = meal(512, 31.5);
        let after = rescale(before, Some(800.0), Some(250.0), 250.0).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn missing_cooked_weight_skips_the_rescale() {
        assert!(rescale(meal(300, 24.0), None, Some(200.0), 100.0).is_none());
        assert!(rescale(meal(300, 24.0), Some(0.0), Some(200.0), 100.0).is_none());
        assert!(rescale(meal(300, 24.0), Some(-5.0), Some(200.0), 100.0).is_none());
    }

    #[test]
    fn zero_old_portion_skips_the_rescale() {
        assert!(rescale(meal(300, 24.0), Some(1000.0), Some(0.0), 100.0).is_none());
    }

    #[test]
    fn unset_old_portion_scales_against_the_full_batch() {
        // old scale defaults to 1.0, new scale = 100/1000
        let out = rescale(meal(1000, 50.0), Some(1000.0), None, 100.0).unwrap();
        assert_eq!(out.calories, 100);
        assert_eq!(out.protein_g, 5.0);
    }

    #[test]
    fn calories_floor_at_zero_macros_do_not() {
        // a ratio cannot be negative in practice, but the floor still applies
        // to the rounded calorie value
        let out = rescale(meal(0, 3.0), Some(500.0), Some(100.0), 50.0).unwrap();
        assert_eq!(out.calories, 0);
        assert_eq!(out.protein_g, 1.5);
    }
}
