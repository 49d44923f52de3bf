use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::{DayTypeCreate, DayTypeUpdate};

/// User-defined nutrient target-range profile assignable to a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DayType {
    pub id: Uuid,
    pub user_id: Uuid,
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
    pub created_at: OffsetDateTime,
}

const DAY_TYPE_COLUMNS: &str = "id, user_id, name, calories_min, calories_max, protein_min, \
     protein_max, carbs_min, carbs_max, fat_min, fat_max, fiber_min, fiber_max, created_at";

impl DayType {
    pub async fn list_owned(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<DayType>> {
        sqlx::query_as::<_, DayType>(&format!(
            "SELECT {DAY_TYPE_COLUMNS} FROM day_types WHERE user_id = $1 ORDER BY name"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn get_owned(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<Option<DayType>> {
        sqlx::query_as::<_, DayType>(&format!(
            "SELECT {DAY_TYPE_COLUMNS} FROM day_types WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(db: &PgPool, user_id: Uuid, new: &DayTypeCreate) -> sqlx::Result<DayType> {
        sqlx::query_as::<_, DayType>(&format!(
            "INSERT INTO day_types (user_id, name, calories_min, calories_max, protein_min, \
             protein_max, carbs_min, carbs_max, fat_min, fat_max, fiber_min, fiber_max) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {DAY_TYPE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&new.name)
        .bind(new.calories_min)
        .bind(new.calories_max)
        .bind(new.protein_min)
        .bind(new.protein_max)
        .bind(new.carbs_min)
        .bind(new.carbs_max)
        .bind(new.fat_min)
        .bind(new.fat_max)
        .bind(new.fiber_min)
        .bind(new.fiber_max)
        .fetch_one(db)
        .await
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        patch: &DayTypeUpdate,
    ) -> sqlx::Result<Option<DayType>> {
        sqlx::query_as::<_, DayType>(&format!(
            "UPDATE day_types SET \
             name = COALESCE($3, name), \
             calories_min = COALESCE($4, calories_min), \
             calories_max = COALESCE($5, calories_max), \
             protein_min = COALESCE($6, protein_min), \
             protein_max = COALESCE($7, protein_max), \
             carbs_min = COALESCE($8, carbs_min), \
             carbs_max = COALESCE($9, carbs_max), \
             fat_min = COALESCE($10, fat_min), \
             fat_max = COALESCE($11, fat_max), \
             fiber_min = COALESCE($12, fiber_min), \
             fiber_max = COALESCE($13, fiber_max) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {DAY_TYPE_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(&patch.name)
        .bind(patch.calories_min)
        .bind(patch.calories_max)
        .bind(patch.protein_min)
        .bind(patch.protein_max)
        .bind(patch.carbs_min)
        .bind(patch.carbs_max)
        .bind(patch.fat_min)
        .bind(patch.fat_max)
        .bind(patch.fiber_min)
        .bind(patch.fiber_max)
        .fetch_optional(db)
        .await
    }

    pub async fn delete_owned(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM day_types WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct DayLog;

impl DayLog {
    /// One day-type assignment per (user, date); assigning again replaces it.
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        logged_date: Date,
        day_type_id: Uuid,
    ) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO day_logs (user_id, logged_date, day_type_id) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, logged_date) \
             DO UPDATE SET day_type_id = EXCLUDED.day_type_id",
        )
        .bind(user_id)
        .bind(logged_date)
        .bind(day_type_id)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn clear(db: &PgPool, user_id: Uuid, logged_date: Date) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM day_logs WHERE user_id = $1 AND logged_date = $2")
            .bind(user_id)
            .bind(logged_date)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
