use std::sync::Arc;

use axum::extract::FromRef;
use deadpool_sqlite::Pool;
use shared::model::{Exercise, ExerciseField, WorkoutPlan};

use crate::{
    db::{Gateway, MemoryGateway, SqliteGateway},
    services::{ExerciseService, PlanService},
};

/// Everything handlers need, built once at startup. Both services share the
/// same pair of gateways
#[derive(Debug, Clone)]
pub struct AppState {
    pub plans: PlanService,
    pub exercises: ExerciseService,
}

impl AppState {
    pub fn new(plans: Arc<dyn Gateway<WorkoutPlan>>, exercises: Arc<dyn Gateway<Exercise>>) -> Self {
        Self {
            plans: PlanService::new(plans.clone(), exercises.clone()),
            exercises: ExerciseService::new(plans, exercises),
        }
    }

    pub fn sqlite(pool: Pool) -> Self {
        Self::new(
            Arc::new(SqliteGateway::<WorkoutPlan>::new(pool.clone())),
            Arc::new(SqliteGateway::<Exercise>::new(pool)),
        )
    }

    /// Non persistent state with the same delete cascade as the sqlite schema
    pub fn in_memory() -> Self {
        let exercises = MemoryGateway::<Exercise>::new();
        let plans =
            MemoryGateway::<WorkoutPlan>::new().cascade_to(&exercises, ExerciseField::WorkoutPlanId);
        Self::new(Arc::new(plans), Arc::new(exercises))
    }
}

impl FromRef<AppState> for PlanService {
    fn from_ref(state: &AppState) -> Self {
        // services only hold Arcs so clone is cheap
        state.plans.clone()
    }
}

impl FromRef<AppState> for ExerciseService {
    fn from_ref(state: &AppState) -> Self {
        state.exercises.clone()
    }
}
