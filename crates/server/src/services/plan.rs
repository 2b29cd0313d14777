use std::{fmt, sync::Arc};

use shared::{
    api::{error::ServerError, response_errors::PlanError},
    model::{
        Exercise, ExerciseField, Filter, NewWorkoutPlan, UpdateWorkoutPlan, ValidateModel,
        WorkoutPlan,
    },
};
use tracing::{info, instrument};

use super::parse_id;
use crate::db::{Gateway, GatewayResultExt};

type PlanResult<T> = Result<T, ServerError<PlanError>>;

fn not_found(id: &str) -> impl FnOnce() -> PlanError + '_ {
    move || PlanError::NotFound { id: id.to_owned() }
}

/// Owns the workout plan lifecycle
#[derive(Clone)]
pub struct PlanService {
    plans: Arc<dyn Gateway<WorkoutPlan>>,
    exercises: Arc<dyn Gateway<Exercise>>,
}

impl fmt::Debug for PlanService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanService").finish_non_exhaustive()
    }
}

impl PlanService {
    pub fn new(plans: Arc<dyn Gateway<WorkoutPlan>>, exercises: Arc<dyn Gateway<Exercise>>) -> Self {
        Self { plans, exercises }
    }

    #[instrument(skip(self))]
    pub async fn create_plan(&self, new: NewWorkoutPlan) -> PlanResult<WorkoutPlan> {
        new.validate()?;
        let plan = self.plans.create(new).await?;
        info!("Created workout plan {}", plan.id);
        Ok(plan)
    }

    #[instrument(skip(self))]
    pub async fn list_plans(&self) -> PlanResult<Vec<WorkoutPlan>> {
        Ok(self.plans.find_many(None).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_plan(&self, id: &str) -> PlanResult<WorkoutPlan> {
        let uuid = parse_id(id).ok_or_else(not_found(id))?;
        self.plans.find_one(&uuid).await.or_not_found(not_found(id))
    }

    /// Same as [`Self::get_plan`] with `exercises` populated
    #[instrument(skip(self))]
    pub async fn get_plan_with_exercises(&self, id: &str) -> PlanResult<WorkoutPlan> {
        let mut plan = self.get_plan(id).await?;
        let filter = Filter::eq(ExerciseField::WorkoutPlanId, plan.id);
        plan.exercises = Some(self.exercises.find_many(Some(filter)).await?);
        Ok(plan)
    }

    /// Replaces the name and applies the description change. Validation runs
    /// before the plan is looked up
    #[instrument(skip(self))]
    pub async fn update_plan(&self, id: &str, changes: UpdateWorkoutPlan) -> PlanResult<WorkoutPlan> {
        changes.validate()?;
        let uuid = parse_id(id).ok_or_else(not_found(id))?;
        let plan = self.plans.update(&uuid, changes).await.or_not_found(not_found(id))?;
        info!("Updated workout plan {}", plan.id);
        Ok(plan)
    }

    /// Removes the plan along with its exercises
    #[instrument(skip(self))]
    pub async fn delete_plan(&self, id: &str) -> PlanResult<()> {
        let uuid = parse_id(id).ok_or_else(not_found(id))?;
        self.plans.delete(&uuid).await.or_not_found(not_found(id))?;
        info!("Deleted workout plan {uuid}");
        Ok(())
    }
}
