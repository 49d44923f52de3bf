use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{IngredientCreate, IngredientUpdate};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
    pub fiber_per_100g: f64,
    pub usda_fdc_id: Option<i64>,
    pub upc: Option<String>,
    pub source: Option<String>,
    pub source_name: Option<String>,
    pub created_at: OffsetDateTime,
}

const INGREDIENT_COLUMNS: &str = "id, name, calories_per_100g, protein_per_100g, \
     carbs_per_100g, fat_per_100g, fiber_per_100g, usda_fdc_id, upc, source, source_name, \
     created_at";

impl Ingredient {
    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Ingredient>> {
        sqlx::query_as::<_, Ingredient>(&format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients ORDER BY name"
        ))
        .fetch_all(db)
        .await
    }

    pub async fn insert(db: &PgPool, new: &IngredientCreate) -> sqlx::Result<Ingredient> {
        sqlx::query_as::<_, Ingredient>(&format!(
            "INSERT INTO ingredients (name, calories_per_100g, protein_per_100g, \
             carbs_per_100g, fat_per_100g, fiber_per_100g, usda_fdc_id, upc, source, source_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {INGREDIENT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.calories_per_100g)
        .bind(new.protein_per_100g)
        .bind(new.carbs_per_100g)
        .bind(new.fat_per_100g)
        .bind(new.fiber_per_100g)
        .bind(new.usda_fdc_id)
        .bind(&new.upc)
        .bind(&new.source)
        .bind(&new.source_name)
        .fetch_one(db)
        .await
    }

    /// Partial update; absent fields keep their stored values.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        patch: &IngredientUpdate,
    ) -> sqlx::Result<Option<Ingredient>> {
        sqlx::query_as::<_, Ingredient>(&format!(
            "UPDATE ingredients SET \
             name = COALESCE($2, name), \
             calories_per_100g = COALESCE($3, calories_per_100g), \
             protein_per_100g = COALESCE($4, protein_per_100g), \
             carbs_per_100g = COALESCE($5, carbs_per_100g), \
             fat_per_100g = COALESCE($6, fat_per_100g), \
             fiber_per_100g = COALESCE($7, fiber_per_100g), \
             usda_fdc_id = COALESCE($8, usda_fdc_id), \
             upc = COALESCE($9, upc), \
             source = COALESCE($10, source), \
             source_name = COALESCE($11, source_name) \
             WHERE id = $1 \
             RETURNING {INGREDIENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(patch.calories_per_100g)
        .bind(patch.protein_per_100g)
        .bind(patch.carbs_per_100g)
        .bind(patch.fat_per_100g)
        .bind(patch.fiber_per_100g)
        .bind(patch.usda_fdc_id)
        .bind(&patch.upc)
        .bind(&patch.source)
        .bind(&patch.source_name)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
