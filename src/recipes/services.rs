use std::collections::HashMap;

use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::meals::repo::{Meal, NewMeal};
use crate::nutrition::reconcile::restore_plan;
use crate::nutrition::totals::override_totals;
use crate::nutrition::vector::round1;
use crate::state::AppState;

use super::dto::{RecipeLogRequest, RecipeResponse};
use super::repo::{MealIngredient, Recipe, RecipeIngredient};

/// Logs a recipe as a meal: totals from the caller's override quantities,
/// optional portion scaling, a snapshot row per selected ingredient, and the
/// recipe's sticky defaults updated last. Writes are best-effort sequential.
pub async fn log_recipe(
    state: &AppState,
    user_id: Uuid,
    recipe: &Recipe,
    body: &RecipeLogRequest,
) -> Result<Meal, ApiError> {
    let override_ids: Vec<Uuid> = body
        .ingredient_overrides
        .iter()
        .map(|o| o.ingredient_id)
        .collect();
    let selected = RecipeIngredient::get_selected(&state.db, recipe.id, &override_ids).await?;
    let by_id: HashMap<Uuid, &RecipeIngredient> = selected.iter().map(|i| (i.id, i)).collect();

    // Overrides define inclusion here; the checked flag does not apply.
    // Overrides whose id is not in the template are skipped.
    let totals = override_totals(
        body.ingredient_overrides
            .iter()
            .filter_map(|o| by_id.get(&o.ingredient_id).map(|i| (o.quantity, i.per_unit()))),
    );

    let cooked = body.total_cooked_weight.filter(|w| *w > 0.0);
    let scale = match (cooked, body.portion_weight) {
        (Some(cooked), Some(portion)) => portion / cooked,
        _ => 1.0,
    };
    let macros = totals.into_meal_macros(scale);

    let raw_weight: f64 = body.ingredient_overrides.iter().map(|o| o.quantity).sum();
    let logged_date = body
        .logged_date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let meal = Meal::insert(
        &state.db,
        user_id,
        &NewMeal {
            logged_date,
            meal_type: &body.meal_type,
            name: &recipe.name,
            calories: macros.calories as i32,
            protein_g: macros.protein_g,
            carbs_g: macros.carbs_g,
            fat_g: macros.fat_g,
            fiber_g: macros.fiber_g,
            notes: None,
            raw_weight: Some(round1(raw_weight)),
            total_cooked_weight: body.total_cooked_weight.map(round1),
            portion_weight: body.portion_weight.map(round1),
            recipe_id: Some(recipe.id),
        },
    )
    .await?;

    // Snapshot the composition so the template can be restored later even
    // after it is edited.
    for o in &body.ingredient_overrides {
        if let Some(ingredient) = by_id.get(&o.ingredient_id) {
            MealIngredient::insert_snapshot(&state.db, meal.id, ingredient, o.quantity).await?;
        }
    }

    Recipe::touch_log_defaults(
        &state.db,
        recipe.id,
        &body.meal_type,
        cooked.map(round1),
    )
    .await?;

    debug!(recipe_id = %recipe.id, meal_id = %meal.id, "recipe logged");
    Ok(meal)
}

/// Reconciles the recipe template back to the composition captured in one
/// meal's snapshot: unused rows are unchecked, used rows get the snapshot
/// quantity back, rows deleted since are re-created.
pub async fn restore_from_meal(
    state: &AppState,
    recipe: Recipe,
    meal_id: Uuid,
) -> Result<RecipeResponse, ApiError> {
    let snapshots = MealIngredient::list_for_meal(&state.db, meal_id).await?;
    let current = RecipeIngredient::list_for_recipe(&state.db, recipe.id).await?;

    let current_ids: Vec<Uuid> = current.iter().map(|i| i.id).collect();
    let snapshot_lines: Vec<_> = snapshots.iter().map(|s| s.snapshot_line()).collect();
    let plan = restore_plan(&current_ids, &snapshot_lines);

    if !plan.uncheck.is_empty() {
        RecipeIngredient::set_unchecked(&state.db, &plan.uncheck).await?;
    }
    for (id, quantity) in &plan.reset {
        RecipeIngredient::reset_quantity(&state.db, *id, *quantity).await?;
    }
    for line in &plan.reinsert {
        RecipeIngredient::insert_restored(&state.db, line.id, recipe.id, &line.snapshot).await?;
    }

    debug!(
        recipe_id = %recipe.id, %meal_id,
        unchecked = plan.uncheck.len(), reset = plan.reset.len(), reinserted = plan.reinsert.len(),
        "template restored from meal"
    );

    let ingredients = RecipeIngredient::list_for_recipe(&state.db, recipe.id).await?;
    Ok(RecipeResponse::build(recipe, ingredients))
}
