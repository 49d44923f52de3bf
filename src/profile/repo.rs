use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::ProfileUpdate;

/// One per user, keyed by the identity service's user id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub calorie_goal: i32,
    pub protein_goal: i32,
    pub carbs_goal: i32,
    pub fat_goal: i32,
    pub fiber_goal: i32,
    pub created_at: OffsetDateTime,
}

const PROFILE_COLUMNS: &str = "id, email, display_name, calorie_goal, protein_goal, \
     carbs_goal, fat_goal, fiber_goal, created_at";

impl Profile {
    pub async fn get(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        patch: &ProfileUpdate,
    ) -> sqlx::Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "UPDATE profiles SET \
             display_name = COALESCE($2, display_name), \
             calorie_goal = COALESCE($3, calorie_goal), \
             protein_goal = COALESCE($4, protein_goal), \
             carbs_goal = COALESCE($5, carbs_goal), \
             fat_goal = COALESCE($6, fat_goal), \
             fiber_goal = COALESCE($7, fiber_goal) \
             WHERE id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&patch.display_name)
        .bind(patch.calorie_goal)
        .bind(patch.protein_goal)
        .bind(patch.carbs_goal)
        .bind(patch.fat_goal)
        .bind(patch.fiber_goal)
        .fetch_optional(db)
        .await
    }
}
