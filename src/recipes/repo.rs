use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::reconcile::SnapshotLine;
use crate::nutrition::totals::{PerUnit, TemplateLine};

use super::dto::RecipeIngredientAdd;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub servings: i32,
    pub last_cooked_weight: Option<f64>,
    pub last_meal_type: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeIngredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub checked: bool,
    pub calories_per_unit: f64,
    pub protein_per_unit: f64,
    pub carbs_per_unit: f64,
    pub fat_per_unit: f64,
    pub fiber_per_unit: f64,
    pub usda_fdc_id: Option<i64>,
    pub created_at: OffsetDateTime,
}

/// Immutable copy of a recipe ingredient taken when the recipe was logged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealIngredient {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub recipe_ingredient_id: Option<Uuid>,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub calories_per_unit: f64,
    pub protein_per_unit: f64,
    pub carbs_per_unit: f64,
    pub fat_per_unit: f64,
    pub fiber_per_unit: f64,
    pub usda_fdc_id: Option<i64>,
    pub created_at: OffsetDateTime,
}

impl RecipeIngredient {
    pub fn per_unit(&self) -> PerUnit {
        PerUnit {
            calories: self.calories_per_unit,
            protein: self.protein_per_unit,
            carbs: self.carbs_per_unit,
            fat: self.fat_per_unit,
            fiber: self.fiber_per_unit,
        }
    }

    pub fn line(&self) -> TemplateLine {
        TemplateLine {
            checked: self.checked,
            quantity: self.quantity,
            per_unit: self.per_unit(),
        }
    }
}

impl MealIngredient {
    pub fn snapshot_line(&self) -> SnapshotLine {
        SnapshotLine {
            recipe_ingredient_id: self.recipe_ingredient_id,
            food_name: self.food_name.clone(),
            quantity: self.quantity,
            unit: self.unit.clone(),
            per_unit: PerUnit {
                calories: self.calories_per_unit,
                protein: self.protein_per_unit,
                carbs: self.carbs_per_unit,
                fat: self.fat_per_unit,
                fiber: self.fiber_per_unit,
            },
            usda_fdc_id: self.usda_fdc_id,
        }
    }
}

const RECIPE_COLUMNS: &str =
    "id, user_id, name, servings, last_cooked_weight, last_meal_type, created_at";

const RECIPE_INGREDIENT_COLUMNS: &str = "id, recipe_id, food_name, quantity, unit, checked, \
     calories_per_unit, protein_per_unit, carbs_per_unit, fat_per_unit, fiber_per_unit, \
     usda_fdc_id, created_at";

const MEAL_INGREDIENT_COLUMNS: &str = "id, meal_id, recipe_ingredient_id, food_name, quantity, \
     unit, calories_per_unit, protein_per_unit, carbs_per_unit, fat_per_unit, fiber_per_unit, \
     usda_fdc_id, created_at";

impl Recipe {
    pub async fn insert(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        servings: i32,
    ) -> sqlx::Result<Recipe> {
        sqlx::query_as::<_, Recipe>(&format!(
            "INSERT INTO recipes (user_id, name, servings) VALUES ($1, $2, $3) \
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(name)
        .bind(servings)
        .fetch_one(db)
        .await
    }

    pub async fn list_owned(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Recipe>> {
        sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn get_owned(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<Option<Recipe>> {
        sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    /// Caller must have verified ownership first.
    pub async fn rename(db: &PgPool, id: Uuid, name: &str) -> sqlx::Result<Option<Recipe>> {
        sqlx::query_as::<_, Recipe>(&format!(
            "UPDATE recipes SET name = $2 WHERE id = $1 RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(db)
        .await
    }

    /// Cascades to the recipe's ingredient template.
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Sticky UI defaults written after each log; not nutrition-affecting.
    pub async fn touch_log_defaults(
        db: &PgPool,
        id: Uuid,
        last_meal_type: &str,
        last_cooked_weight: Option<f64>,
    ) -> sqlx::Result<()> {
        sqlx::query(
            "UPDATE recipes SET last_meal_type = $2, \
             last_cooked_weight = COALESCE($3, last_cooked_weight) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(last_meal_type)
        .bind(last_cooked_weight)
        .execute(db)
        .await?;
        Ok(())
    }
}

impl RecipeIngredient {
    pub async fn list_for_recipe(
        db: &PgPool,
        recipe_id: Uuid,
    ) -> sqlx::Result<Vec<RecipeIngredient>> {
        sqlx::query_as::<_, RecipeIngredient>(&format!(
            "SELECT {RECIPE_INGREDIENT_COLUMNS} FROM recipe_ingredients \
             WHERE recipe_id = $1 ORDER BY created_at"
        ))
        .bind(recipe_id)
        .fetch_all(db)
        .await
    }

    pub async fn list_for_recipes(
        db: &PgPool,
        recipe_ids: &[Uuid],
    ) -> sqlx::Result<Vec<RecipeIngredient>> {
        sqlx::query_as::<_, RecipeIngredient>(&format!(
            "SELECT {RECIPE_INGREDIENT_COLUMNS} FROM recipe_ingredients \
             WHERE recipe_id = ANY($1) ORDER BY created_at"
        ))
        .bind(recipe_ids)
        .fetch_all(db)
        .await
    }

    /// The subset of a recipe's template selected for a log, scoped to the
    /// recipe so foreign ids cannot leak in.
    pub async fn get_selected(
        db: &PgPool,
        recipe_id: Uuid,
        ids: &[Uuid],
    ) -> sqlx::Result<Vec<RecipeIngredient>> {
        sqlx::query_as::<_, RecipeIngredient>(&format!(
            "SELECT {RECIPE_INGREDIENT_COLUMNS} FROM recipe_ingredients \
             WHERE id = ANY($1) AND recipe_id = $2"
        ))
        .bind(ids)
        .bind(recipe_id)
        .fetch_all(db)
        .await
    }

    pub async fn insert(
        db: &PgPool,
        recipe_id: Uuid,
        new: &RecipeIngredientAdd,
    ) -> sqlx::Result<RecipeIngredient> {
        sqlx::query_as::<_, RecipeIngredient>(&format!(
            "INSERT INTO recipe_ingredients (recipe_id, food_name, quantity, unit, checked, \
             calories_per_unit, protein_per_unit, carbs_per_unit, fat_per_unit, fiber_per_unit, \
             usda_fdc_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {RECIPE_INGREDIENT_COLUMNS}"
        ))
        .bind(recipe_id)
        .bind(&new.food_name)
        .bind(new.quantity)
        .bind(&new.unit)
        .bind(new.checked)
        .bind(new.calories_per_unit)
        .bind(new.protein_per_unit)
        .bind(new.carbs_per_unit)
        .bind(new.fat_per_unit)
        .bind(new.fiber_per_unit)
        .bind(new.usda_fdc_id)
        .fetch_one(db)
        .await
    }

    /// Re-creates a template row from a meal snapshot under an explicit id,
    /// checked.
    pub async fn insert_restored(
        db: &PgPool,
        id: Uuid,
        recipe_id: Uuid,
        snapshot: &SnapshotLine,
    ) -> sqlx::Result<RecipeIngredient> {
        sqlx::query_as::<_, RecipeIngredient>(&format!(
            "INSERT INTO recipe_ingredients (id, recipe_id, food_name, quantity, unit, checked, \
             calories_per_unit, protein_per_unit, carbs_per_unit, fat_per_unit, fiber_per_unit, \
             usda_fdc_id) \
             VALUES ($1, $2, $3, $4, $5, TRUE, $6, $7, $8, $9, $10, $11) \
             RETURNING {RECIPE_INGREDIENT_COLUMNS}"
        ))
        .bind(id)
        .bind(recipe_id)
        .bind(&snapshot.food_name)
        .bind(snapshot.quantity)
        .bind(&snapshot.unit)
        .bind(snapshot.per_unit.calories)
        .bind(snapshot.per_unit.protein)
        .bind(snapshot.per_unit.carbs)
        .bind(snapshot.per_unit.fat)
        .bind(snapshot.per_unit.fiber)
        .bind(snapshot.usda_fdc_id)
        .fetch_one(db)
        .await
    }

    pub async fn update(
        db: &PgPool,
        recipe_id: Uuid,
        id: Uuid,
        patch: &super::dto::RecipeIngredientUpdate,
    ) -> sqlx::Result<Option<RecipeIngredient>> {
        sqlx::query_as::<_, RecipeIngredient>(&format!(
            "UPDATE recipe_ingredients SET \
             food_name = COALESCE($3, food_name), \
             quantity = COALESCE($4, quantity), \
             unit = COALESCE($5, unit), \
             checked = COALESCE($6, checked), \
             calories_per_unit = COALESCE($7, calories_per_unit), \
             protein_per_unit = COALESCE($8, protein_per_unit), \
             carbs_per_unit = COALESCE($9, carbs_per_unit), \
             fat_per_unit = COALESCE($10, fat_per_unit), \
             fiber_per_unit = COALESCE($11, fiber_per_unit), \
             usda_fdc_id = COALESCE($12, usda_fdc_id) \
             WHERE id = $1 AND recipe_id = $2 \
             RETURNING {RECIPE_INGREDIENT_COLUMNS}"
        ))
        .bind(id)
        .bind(recipe_id)
        .bind(&patch.food_name)
        .bind(patch.quantity)
        .bind(&patch.unit)
        .bind(patch.checked)
        .bind(patch.calories_per_unit)
        .bind(patch.protein_per_unit)
        .bind(patch.carbs_per_unit)
        .bind(patch.fat_per_unit)
        .bind(patch.fiber_per_unit)
        .bind(patch.usda_fdc_id)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, recipe_id: Uuid, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "DELETE FROM recipe_ingredients WHERE id = $1 AND recipe_id = $2",
        )
        .bind(id)
        .bind(recipe_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft removal: the rows stay stored but stop contributing to totals.
    pub async fn set_unchecked(db: &PgPool, ids: &[Uuid]) -> sqlx::Result<()> {
        sqlx::query("UPDATE recipe_ingredients SET checked = FALSE WHERE id = ANY($1)")
            .bind(ids)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn reset_quantity(db: &PgPool, id: Uuid, quantity: f64) -> sqlx::Result<()> {
        sqlx::query("UPDATE recipe_ingredients SET quantity = $2, checked = TRUE WHERE id = $1")
            .bind(id)
            .bind(quantity)
            .execute(db)
            .await?;
        Ok(())
    }
}

impl MealIngredient {
    pub async fn list_for_meal(db: &PgPool, meal_id: Uuid) -> sqlx::Result<Vec<MealIngredient>> {
        sqlx::query_as::<_, MealIngredient>(&format!(
            "SELECT {MEAL_INGREDIENT_COLUMNS} FROM meal_ingredients WHERE meal_id = $1"
        ))
        .bind(meal_id)
        .fetch_all(db)
        .await
    }

    pub async fn insert_snapshot(
        db: &PgPool,
        meal_id: Uuid,
        recipe_ingredient: &RecipeIngredient,
        quantity: f64,
    ) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO meal_ingredients (meal_id, recipe_ingredient_id, food_name, quantity, \
             unit, calories_per_unit, protein_per_unit, carbs_per_unit, fat_per_unit, \
             fiber_per_unit, usda_fdc_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(meal_id)
        .bind(recipe_ingredient.id)
        .bind(&recipe_ingredient.food_name)
        .bind(quantity)
        .bind(&recipe_ingredient.unit)
        .bind(recipe_ingredient.calories_per_unit)
        .bind(recipe_ingredient.protein_per_unit)
        .bind(recipe_ingredient.carbs_per_unit)
        .bind(recipe_ingredient.fat_per_unit)
        .bind(recipe_ingredient.fiber_per_unit)
        .bind(recipe_ingredient.usda_fdc_id)
        .execute(db)
        .await?;
        Ok(())
    }
}
