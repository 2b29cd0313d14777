use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{
    api::{error::ServerError, response_errors::PlanError, Object},
    model::{NewWorkoutPlan, UpdateWorkoutPlan, WorkoutPlan},
};
use tracing::instrument;

use crate::{extract::JsonBody, services::PlanService};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    PlanService: FromRef<S>,
{
    Router::new()
        .route(Object::WorkoutPlans.path(), get(list_plans).post(create_plan))
        .route(
            Object::WorkoutPlan.path(),
            get(fetch_plan).put(update_plan).delete(delete_plan),
        )
}

/// Related data a plan fetch can embed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Include {
    Exercises,
}

#[derive(Debug, Default, Deserialize)]
pub struct FetchPlanQuery {
    #[serde(default)]
    pub include: Option<Include>,
}

#[instrument(skip(plans))]
pub async fn create_plan(
    State(plans): State<PlanService>,
    JsonBody(new_plan): JsonBody<NewWorkoutPlan>,
) -> Result<Json<WorkoutPlan>, ServerError<PlanError>> {
    Ok(Json(plans.create_plan(new_plan).await?))
}

#[instrument(skip(plans))]
pub async fn list_plans(
    State(plans): State<PlanService>,
) -> Result<Json<Vec<WorkoutPlan>>, ServerError<PlanError>> {
    Ok(Json(plans.list_plans().await?))
}

#[instrument(skip(plans))]
pub async fn fetch_plan(
    State(plans): State<PlanService>,
    Path(id): Path<String>,
    Query(query): Query<FetchPlanQuery>,
) -> Result<Json<WorkoutPlan>, ServerError<PlanError>> {
    let plan = match query.include {
        Some(Include::Exercises) => plans.get_plan_with_exercises(&id).await?,
        None => plans.get_plan(&id).await?,
    };
    Ok(Json(plan))
}

#[instrument(skip(plans))]
pub async fn update_plan(
    State(plans): State<PlanService>,
    Path(id): Path<String>,
    JsonBody(changes): JsonBody<UpdateWorkoutPlan>,
) -> Result<Json<WorkoutPlan>, ServerError<PlanError>> {
    Ok(Json(plans.update_plan(&id, changes).await?))
}

#[instrument(skip(plans))]
pub async fn delete_plan(
    State(plans): State<PlanService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError<PlanError>> {
    plans.delete_plan(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
