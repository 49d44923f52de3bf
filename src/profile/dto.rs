use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub calorie_goal: Option<i32>,
    pub protein_goal: Option<i32>,
    pub carbs_goal: Option<i32>,
    pub fat_goal: Option<i32>,
    pub fiber_goal: Option<i32>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.calorie_goal.is_none()
            && self.protein_goal.is_none()
            && self.carbs_goal.is_none()
            && self.fat_goal.is_none()
            && self.fiber_goal.is_none()
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.is_empty() {
            return Err(ApiError::validation("No fields to update"));
        }
        let ranges: [(&str, Option<i32>, i32, i32); 5] = [
            ("calorie_goal", self.calorie_goal, 500, 10_000),
            ("protein_goal", self.protein_goal, 0, 500),
            ("carbs_goal", self.carbs_goal, 0, 1_000),
            ("fat_goal", self.fat_goal, 0, 500),
            ("fiber_goal", self.fiber_goal, 0, 200),
        ];
        for (field, value, min, max) in ranges {
            if let Some(v) = value {
                if v < min || v > max {
                    return Err(ApiError::validation(format!(
                        "{field} must be between {min} and {max}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_rejected() {
        assert!(ProfileUpdate::default().validate().is_err());
    }

    #[test]
    fn goal_ranges_are_enforced() {
        let ok = ProfileUpdate {
            calorie_goal: Some(2200),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let too_low = ProfileUpdate {
            calorie_goal: Some(100),
            ..Default::default()
        };
        assert!(too_low.validate().is_err());

        let too_high = ProfileUpdate {
            fiber_goal: Some(500),
            ..Default::default()
        };
        assert!(too_high.validate().is_err());
    }
}
