use std::collections::BTreeMap;

use time::Date;

use super::vector::NutrientVector;

/// How many rows to fetch per requested history day. Day boundaries are not
/// known until grouping, so the query over-fetches and the bucketing step
/// truncates.
pub const HISTORY_FETCH_MULTIPLIER: i64 = 10;

/// Nutrient fields of one logged meal as stored. Macro columns are nullable;
/// null counts as zero.
#[derive(Debug, Clone, Copy)]
pub struct LoggedMacros {
    pub calories: i64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
}

impl From<LoggedMacros> for NutrientVector {
    fn from(m: LoggedMacros) -> Self {
        NutrientVector {
            calories: m.calories,
            protein_g: m.protein_g.unwrap_or(0.0),
            carbs_g: m.carbs_g.unwrap_or(0.0),
            fat_g: m.fat_g.unwrap_or(0.0),
            fiber_g: m.fiber_g.unwrap_or(0.0),
        }
    }
}

/// Sums one day's meals into a summary vector. Empty day -> zero vector.
pub fn sum_meals(meals: impl IntoIterator<Item = LoggedMacros>) -> NutrientVector {
    NutrientVector::sum(meals.into_iter().map(NutrientVector::from))
}

/// Buckets an arbitrarily ordered meal list by date, sums each bucket and
/// returns the `limit` most recent days, newest first.
pub fn bucket_history(
    rows: impl IntoIterator<Item = (Date, LoggedMacros)>,
    limit: usize,
) -> Vec<(Date, NutrientVector)> {
    let mut days: BTreeMap<Date, NutrientVector> = BTreeMap::new();
    for (date, macros) in rows {
        let entry = days.entry(date).or_default();
        *entry = entry.add(macros.into());
    }
    days.into_iter().rev().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn m(calories: i64, protein: f64) -> LoggedMacros {
        LoggedMacros {
            calories,
            protein_g: Some(protein),
            carbs_g: None,
            fat_g: Some(0.0),
            fiber_g: None,
        }
    }

    #[test]
    fn empty_day_sums_to_zero() {
        assert_eq!(sum_meals([]), NutrientVector::default());
    }

    #[test]
    fn null_macros_count_as_zero() {
        let total = sum_meals([m(300, 20.0), m(150, 5.5)]);
        assert_eq!(total.calories, 450);
        assert_eq!(total.protein_g, 25.5);
        assert_eq!(total.carbs_g, 0.0);
    }

    #[test]
    fn history_keeps_most_recent_days_descending() {
        let d1 = date!(2025 - 03 - 10);
        let d2 = date!(2025 - 03 - 09);
        let d3 = date!(2025 - 03 - 01);
        // unordered input, two meals on the newest day
        let rows = vec![
            (d3, m(500, 10.0)),
            (d1, m(300, 20.0)),
            (d2, m(400, 30.0)),
            (d1, m(200, 5.0)),
        ];

        let history = bucket_history(rows, 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].0, d1);
        assert_eq!(history[0].1.calories, 500);
        assert_eq!(history[0].1.protein_g, 25.0);
        assert_eq!(history[1].0, d2);
        assert_eq!(history[1].1.calories, 400);
    }

    #[test]
    fn history_with_fewer_days_than_limit() {
        let history = bucket_history(vec![(date!(2025 - 01 - 01), m(100, 1.0))], 14);
        assert_eq!(history.len(), 1);
    }
}
