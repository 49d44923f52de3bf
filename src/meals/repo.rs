use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::daily::LoggedMacros;
use crate::nutrition::vector::NutrientVector;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub logged_date: Date,
    pub meal_type: String,
    pub name: String,
    pub calories: i32,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub notes: Option<String>,
    pub raw_weight: Option<f64>,
    pub total_cooked_weight: Option<f64>,
    pub portion_weight: Option<f64>,
    pub recipe_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

impl Meal {
    pub fn macros(&self) -> LoggedMacros {
        LoggedMacros {
            calories: self.calories as i64,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
            fiber_g: self.fiber_g,
        }
    }
}

pub struct NewMeal<'a> {
    pub logged_date: Date,
    pub meal_type: &'a str,
    pub name: &'a str,
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub notes: Option<&'a str>,
    pub raw_weight: Option<f64>,
    pub total_cooked_weight: Option<f64>,
    pub portion_weight: Option<f64>,
    pub recipe_id: Option<Uuid>,
}

const MEAL_COLUMNS: &str = "id, user_id, logged_date, meal_type, name, calories, protein_g, \
     carbs_g, fat_g, fiber_g, notes, raw_weight, total_cooked_weight, portion_weight, \
     recipe_id, created_at";

#[derive(Debug, FromRow)]
pub struct HistoryRow {
    pub logged_date: Date,
    pub calories: i32,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
}

impl HistoryRow {
    pub fn into_parts(self) -> (Date, LoggedMacros) {
        (
            self.logged_date,
            LoggedMacros {
                calories: self.calories as i64,
                protein_g: self.protein_g,
                carbs_g: self.carbs_g,
                fat_g: self.fat_g,
                fiber_g: self.fiber_g,
            },
        )
    }
}

impl Meal {
    /// One calendar day's meals, creation order ascending.
    pub async fn list_for_day(
        db: &PgPool,
        user_id: Uuid,
        day: Date,
    ) -> sqlx::Result<Vec<Meal>> {
        sqlx::query_as::<_, Meal>(&format!(
            "SELECT {MEAL_COLUMNS} FROM meals \
             WHERE user_id = $1 AND logged_date = $2 \
             ORDER BY created_at"
        ))
        .bind(user_id)
        .bind(day)
        .fetch_all(db)
        .await
    }

    pub async fn get_owned(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<Option<Meal>> {
        sqlx::query_as::<_, Meal>(&format!(
            "SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(db: &PgPool, user_id: Uuid, new: &NewMeal<'_>) -> sqlx::Result<Meal> {
        sqlx::query_as::<_, Meal>(&format!(
            "INSERT INTO meals (user_id, logged_date, meal_type, name, calories, protein_g, \
             carbs_g, fat_g, fiber_g, notes, raw_weight, total_cooked_weight, portion_weight, recipe_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {MEAL_COLUMNS}"
        ))
        .bind(user_id)
        .bind(new.logged_date)
        .bind(new.meal_type)
        .bind(new.name)
        .bind(new.calories)
        .bind(new.protein_g)
        .bind(new.carbs_g)
        .bind(new.fat_g)
        .bind(new.fiber_g)
        .bind(new.notes)
        .bind(new.raw_weight)
        .bind(new.total_cooked_weight)
        .bind(new.portion_weight)
        .bind(new.recipe_id)
        .fetch_one(db)
        .await
    }

    /// Writes the new portion weight and, when a rescale applied, the
    /// rescaled nutrient fields.
    pub async fn update_portion(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        portion_weight: f64,
        rescaled: Option<NutrientVector>,
    ) -> sqlx::Result<Option<Meal>> {
        match rescaled {
            Some(v) => {
                sqlx::query_as::<_, Meal>(&format!(
                    "UPDATE meals SET portion_weight = $3, calories = $4, protein_g = $5, \
                     carbs_g = $6, fat_g = $7, fiber_g = $8 \
                     WHERE id = $1 AND user_id = $2 \
                     RETURNING {MEAL_COLUMNS}"
                ))
                .bind(id)
                .bind(user_id)
                .bind(portion_weight)
                .bind(v.calories as i32)
                .bind(v.protein_g)
                .bind(v.carbs_g)
                .bind(v.fat_g)
                .bind(v.fiber_g)
                .fetch_optional(db)
                .await
            }
            None => {
                sqlx::query_as::<_, Meal>(&format!(
                    "UPDATE meals SET portion_weight = $3 \
                     WHERE id = $1 AND user_id = $2 \
                     RETURNING {MEAL_COLUMNS}"
                ))
                .bind(id)
                .bind(user_id)
                .bind(portion_weight)
                .fetch_optional(db)
                .await
            }
        }
    }

    /// Returns whether an owned row was deleted.
    pub async fn delete_owned(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recent rows for the history view, newest logged date first. The
    /// caller over-fetches; bucketing truncates to the requested day count.
    pub async fn history_rows(
        db: &PgPool,
        user_id: Uuid,
        fetch_limit: i64,
    ) -> sqlx::Result<Vec<HistoryRow>> {
        sqlx::query_as::<_, HistoryRow>(
            "SELECT logged_date, calories, protein_g, carbs_g, fat_g, fiber_g \
             FROM meals WHERE user_id = $1 \
             ORDER BY logged_date DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(fetch_limit)
        .fetch_all(db)
        .await
    }
}
