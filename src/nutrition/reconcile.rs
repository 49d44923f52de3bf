use uuid::Uuid;

use super::totals::PerUnit;

/// One meal-ingredient snapshot row, as captured when the recipe was logged.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLine {
    pub recipe_ingredient_id: Option<Uuid>,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub per_unit: PerUnit,
    pub usda_fdc_id: Option<i64>,
}

/// A template row re-created from a snapshot whose original row is gone.
/// When the snapshot still knows the original row id, that id is reused so a
/// repeated restore finds the row and takes the reset path instead of
/// inserting a duplicate.
#[derive(Debug, Clone, PartialEq)]
pub struct ReinsertLine {
    pub id: Uuid,
    pub snapshot: SnapshotLine,
}

/// The writes needed to turn a recipe template back into "the recipe as
/// cooked" for one meal, without losing unrelated template edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestorePlan {
    /// Template rows the meal did not use: soft-removed, not deleted.
    pub uncheck: Vec<Uuid>,
    /// Rows the meal used that still exist: quantity reset, re-checked.
    pub reset: Vec<(Uuid, f64)>,
    /// Snapshot rows whose template row no longer exists.
    pub reinsert: Vec<ReinsertLine>,
}

/// Reconciles the current template rows against a meal's snapshot set.
pub fn restore_plan(current_ids: &[Uuid], snapshots: &[SnapshotLine]) -> RestorePlan {
    let used: Vec<Uuid> = snapshots
        .iter()
        .filter_map(|s| s.recipe_ingredient_id)
        .collect();

    let mut plan = RestorePlan::default();

    for id in current_ids {
        if !used.contains(id) {
            plan.uncheck.push(*id);
        }
    }

    for snapshot in snapshots {
        match snapshot.recipe_ingredient_id {
            Some(rid) if current_ids.contains(&rid) => {
                plan.reset.push((rid, snapshot.quantity));
            }
            other => {
                plan.reinsert.push(ReinsertLine {
                    id: other.unwrap_or_else(Uuid::new_v4),
                    snapshot: snapshot.clone(),
                });
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(rid: Option<Uuid>, quantity: f64) -> SnapshotLine {
        SnapshotLine {
            recipe_ingredient_id: rid,
            food_name: "oats".into(),
            quantity,
            unit: "g".into(),
            per_unit: PerUnit {
                calories: 3.8,
                protein: 0.13,
                carbs: 0.68,
                fat: 0.07,
                fiber: 0.1,
            },
            usda_fdc_id: Some(173904),
        }
    }

    #[test]
    fn unused_rows_are_unchecked_not_deleted() {
        let kept = Uuid::new_v4();
        let dropped = Uuid::new_v4();
        let plan = restore_plan(&[kept, dropped], &[snapshot(Some(kept), 80.0)]);
        assert_eq!(plan.uncheck, vec![dropped]);
        assert_eq!(plan.reset, vec![(kept, 80.0)]);
        assert!(plan.reinsert.is_empty());
    }

    #[test]
    fn missing_template_rows_are_reinserted_under_their_old_id() {
        let gone = Uuid::new_v4();
        let plan = restore_plan(&[], &[snapshot(Some(gone), 120.0)]);
        assert!(plan.uncheck.is_empty());
        assert!(plan.reset.is_empty());
        assert_eq!(plan.reinsert.len(), 1);
        assert_eq!(plan.reinsert[0].id, gone);
        assert_eq!(plan.reinsert[0].snapshot.quantity, 120.0);
    }

    #[test]
    fn restore_is_idempotent() {
        let kept = Uuid::new_v4();
        let edited_away = Uuid::new_v4();
        let unrelated = Uuid::new_v4();
        let snapshots = vec![snapshot(Some(kept), 80.0), snapshot(Some(edited_away), 40.0)];

        // template after edits: the second used row was deleted, an unrelated
        // row was added
        let first = restore_plan(&[kept, unrelated], &snapshots);
        assert_eq!(first.uncheck, vec![unrelated]);
        assert_eq!(first.reset, vec![(kept, 80.0)]);
        assert_eq!(first.reinsert.len(), 1);

        // template ids after applying the first plan
        let after_first: Vec<Uuid> = vec![kept, unrelated, first.reinsert[0].id];
        let second = restore_plan(&after_first, &snapshots);
        assert_eq!(second.uncheck, vec![unrelated]);
        assert_eq!(
            second.reset,
            vec![(kept, 80.0), (first.reinsert[0].id, 40.0)]
        );
        assert!(second.reinsert.is_empty());
    }
}
