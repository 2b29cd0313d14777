use std::{fmt, sync::Arc};

use shared::{
    api::{error::ServerError, response_errors::ExerciseError},
    model::{AddExercise, Exercise, ExerciseField, Filter, ValidateModel, WorkoutPlan},
    types::Uuid,
};
use tracing::{info, instrument};

use super::parse_id;
use crate::db::{Gateway, GatewayResultExt};

type ExerciseResult<T> = Result<T, ServerError<ExerciseError>>;

/// Owns the exercises of a plan. Creating or listing exercises always checks
/// the parent plan exists first
#[derive(Clone)]
pub struct ExerciseService {
    plans: Arc<dyn Gateway<WorkoutPlan>>,
    exercises: Arc<dyn Gateway<Exercise>>,
}

impl fmt::Debug for ExerciseService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExerciseService").finish_non_exhaustive()
    }
}

impl ExerciseService {
    pub fn new(plans: Arc<dyn Gateway<WorkoutPlan>>, exercises: Arc<dyn Gateway<Exercise>>) -> Self {
        Self { plans, exercises }
    }

    async fn ensure_plan(&self, plan_id: &str) -> ExerciseResult<Uuid> {
        let plan_not_found = || ExerciseError::PlanNotFound { plan_id: plan_id.to_owned() };
        let uuid = parse_id(plan_id).ok_or_else(plan_not_found)?;
        let plan = self.plans.find_one(&uuid).await.or_not_found(plan_not_found)?;
        Ok(plan.id)
    }

    /// The plan check and the insert are separate calls. A plan deleted in
    /// between leaves the insert to fail on the foreign key
    #[instrument(skip(self))]
    pub async fn add_exercise(&self, plan_id: &str, add: AddExercise) -> ExerciseResult<Exercise> {
        let plan_id = self.ensure_plan(plan_id).await?;
        add.validate()?;

        let exercise = self.exercises.create(add.for_plan(plan_id)).await?;
        info!("Added exercise {} to workout plan {plan_id}", exercise.id);
        Ok(exercise)
    }

    #[instrument(skip(self))]
    pub async fn list_exercises(&self, plan_id: &str) -> ExerciseResult<Vec<Exercise>> {
        let plan_id = self.ensure_plan(plan_id).await?;
        let filter = Filter::eq(ExerciseField::WorkoutPlanId, plan_id);
        Ok(self.exercises.find_many(Some(filter)).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_exercise(&self, id: &str) -> ExerciseResult<()> {
        let not_found = || ExerciseError::NotFound { id: id.to_owned() };
        let uuid = parse_id(id).ok_or_else(not_found)?;
        self.exercises.delete(&uuid).await.or_not_found(not_found)?;
        info!("Deleted exercise {uuid}");
        Ok(())
    }
}
