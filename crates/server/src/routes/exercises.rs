use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use shared::{
    api::{error::ServerError, response_errors::ExerciseError, Object},
    model::{AddExercise, Exercise},
};
use tracing::instrument;

use crate::{extract::JsonBody, services::ExerciseService};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ExerciseService: FromRef<S>,
{
    Router::new()
        .route(
            Object::WorkoutPlanExercises.path(),
            get(list_exercises).post(add_exercise),
        )
        .route(Object::Exercise.path(), delete(delete_exercise))
}

#[instrument(skip(exercises))]
pub async fn add_exercise(
    State(exercises): State<ExerciseService>,
    Path(plan_id): Path<String>,
    JsonBody(add): JsonBody<AddExercise>,
) -> Result<(StatusCode, Json<Exercise>), ServerError<ExerciseError>> {
    let exercise = exercises.add_exercise(&plan_id, add).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

#[instrument(skip(exercises))]
pub async fn list_exercises(
    State(exercises): State<ExerciseService>,
    Path(plan_id): Path<String>,
) -> Result<Json<Vec<Exercise>>, ServerError<ExerciseError>> {
    Ok(Json(exercises.list_exercises(&plan_id).await?))
}

#[instrument(skip(exercises))]
pub async fn delete_exercise(
    State(exercises): State<ExerciseService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError<ExerciseError>> {
    exercises.delete_exercise(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
