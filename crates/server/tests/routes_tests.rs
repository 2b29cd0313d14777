use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use shared::{
    api::Object,
    model::{Exercise, WorkoutPlan},
    types::Uuid,
};

mod common;
use common::{delete, get, memory_app, post, put, send_request, sqlite_app};

#[tokio::test]
async fn leg_day_scenario() {
    let (_dir, app) = sqlite_app();

    let res = post(&app, "/workout-plans", json!({ "name": "Leg Day", "description": "Lower body" })).await;
    assert_eq!(res.status, StatusCode::OK);
    let plan: WorkoutPlan = res.json();
    assert_eq!(plan.name, "Leg Day");
    assert_eq!(plan.description.as_deref(), Some("Lower body"));
    let plan_path = Object::WorkoutPlan.path_for(plan.id);

    let res = post(&app, &Object::WorkoutPlanExercises.path_for(plan.id), json!({ "name": "Lunge", "sets": 4, "reps": 12 })).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let lunge: Exercise = res.json();
    assert_eq!(lunge.workout_plan_id, plan.id);

    let res = get(&app, &Object::WorkoutPlanExercises.path_for(plan.id)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json::<Vec<Exercise>>(), vec![lunge.clone()]);

    let res = delete(&app, &plan_path).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_empty());

    assert_eq!(get(&app, &plan_path).await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, &Object::WorkoutPlanExercises.path_for(plan.id)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(delete(&app, &Object::Exercise.path_for(lunge.id)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exercise_wire_shape() {
    let app = memory_app();
    let plan: WorkoutPlan = post(&app, "/workout-plans", json!({ "name": "Legs" })).await.json();

    let res = post(
        &app,
        &Object::WorkoutPlanExercises.path_for(plan.id),
        json!({ "name": "Squat", "sets": 3, "reps": 10 }),
    )
    .await;
    let body: Value = res.json();
    let id = body["id"].as_str().expect("id should be a string");
    assert!(Uuid::parse(id).is_ok());
    assert_eq!(
        body,
        json!({ "id": id, "name": "Squat", "sets": 3, "reps": 10, "workout_plan_id": plan.id.to_string() })
    );
}

#[tokio::test]
async fn plan_listing_and_fetch() {
    let (_dir, app) = sqlite_app();

    assert_eq!(get(&app, "/workout-plans").await.json::<Vec<WorkoutPlan>>(), vec![]);

    let push: WorkoutPlan = post(&app, "/workout-plans", json!({ "name": "Push" })).await.json();
    let pull: WorkoutPlan = post(&app, "/workout-plans", json!({ "name": "Pull", "description": "" })).await.json();

    let res = get(&app, "/workout-plans").await;
    assert_eq!(res.status, StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(
        body,
        json!([
            { "id": push.id.to_string(), "name": "Push" },
            { "id": pull.id.to_string(), "name": "Pull", "description": "" },
        ])
    );

    let res = get(&app, &Object::WorkoutPlan.path_for(pull.id)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json::<WorkoutPlan>(), pull);
}

#[tokio::test]
async fn fetch_can_include_exercises() {
    let (_dir, app) = sqlite_app();
    let plan: WorkoutPlan = post(&app, "/workout-plans", json!({ "name": "Legs" })).await.json();
    let plan_path = Object::WorkoutPlan.path_for(plan.id);

    let res = get(&app, &format!("{plan_path}?include=exercises")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json::<Value>()["exercises"], json!([]));

    let squat: Exercise =
        post(&app, &Object::WorkoutPlanExercises.path_for(plan.id), json!({ "name": "Squat", "sets": 5, "reps": 5 })).await.json();

    let fetched: WorkoutPlan = get(&app, &format!("{plan_path}?include=exercises")).await.json();
    assert_eq!(fetched.exercises, Some(vec![squat]));

    // Without the query the exercises stay off the wire
    let res = get(&app, &plan_path).await;
    assert!(res.json::<Value>().get("exercises").is_none());

    let res = get(&app, &format!("{plan_path}?include=everything")).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_plan_status_codes() {
    let (_dir, app) = sqlite_app();
    let plan: WorkoutPlan =
        post(&app, "/workout-plans", json!({ "name": "Legs", "description": "Quads" })).await.json();
    let plan_path = Object::WorkoutPlan.path_for(plan.id);

    let res = put(&app, &plan_path, json!({ "name": "Leg Day" })).await;
    assert_eq!(res.status, StatusCode::OK);
    let updated: WorkoutPlan = res.json();
    assert_eq!(updated.name, "Leg Day");
    assert_eq!(updated.description.as_deref(), Some("Quads"));

    let res = put(&app, &plan_path, json!({ "name": "Leg Day", "description": null })).await;
    assert_eq!(res.json::<WorkoutPlan>().description, None);

    let res = put(&app, &plan_path, json!({ "name": "" })).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>(),
        json!({ "Invalid": { "error_messages": ["name must not be empty"] } })
    );

    let missing = Uuid::new_v4();
    let res = put(&app, &Object::WorkoutPlan.path_for(missing), json!({ "name": "Ghost" })).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>(), json!({ "NotFound": { "id": missing.to_string() } }));
}

#[tokio::test]
async fn missing_resources_are_not_found() {
    let app = memory_app();
    let missing = Uuid::new_v4();

    for (method, uri) in [
        (Method::GET, Object::WorkoutPlan.path_for(missing)),
        (Method::DELETE, Object::WorkoutPlan.path_for(missing)),
        (Method::GET, Object::WorkoutPlanExercises.path_for(missing)),
        (Method::DELETE, Object::Exercise.path_for(missing)),
        (Method::GET, "/workout-plans/not-a-uuid".to_owned()),
        (Method::DELETE, "/exercises/not-a-uuid".to_owned()),
    ] {
        let res = common::send(&app, method.clone(), &uri, None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{method} {uri}");
    }

    let res = post(
        &app,
        &Object::WorkoutPlanExercises.path_for(missing),
        json!({ "name": "Squat", "sets": 3, "reps": 10 }),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>(), json!({ "PlanNotFound": { "plan_id": missing.to_string() } }));
}

#[tokio::test]
async fn invalid_exercises_are_rejected() {
    let app = memory_app();
    let plan: WorkoutPlan = post(&app, "/workout-plans", json!({ "name": "Legs" })).await.json();
    let uri = Object::WorkoutPlanExercises.path_for(plan.id);

    for body in [
        json!({ "name": "", "sets": 3, "reps": 10 }),
        json!({ "name": "Squat", "sets": 0, "reps": 10 }),
        json!({ "name": "Squat", "sets": 3, "reps": -1 }),
    ] {
        let res = post(&app, &uri, body.clone()).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{body}");
        assert!(res.json::<Value>().get("Invalid").is_some());
    }

    assert_eq!(get(&app, &uri).await.json::<Vec<Exercise>>(), vec![]);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = memory_app();
    let plan: WorkoutPlan = post(&app, "/workout-plans", json!({ "name": "Legs" })).await.json();

    let plan_path = Object::WorkoutPlan.path_for(plan.id);
    let exercises_path = Object::WorkoutPlanExercises.path_for(plan.id);
    let cases = [
        ("/workout-plans", Method::POST, json!({ "description": "no name" })),
        ("/workout-plans", Method::POST, json!({ "name": 3 })),
        ("/workout-plans", Method::POST, json!("Legs")),
        (plan_path.as_str(), Method::PUT, json!({})),
        (plan_path.as_str(), Method::PUT, json!({ "name": "Legs", "description": 7 })),
        (exercises_path.as_str(), Method::POST, json!({ "name": "Squat", "sets": 2.5, "reps": 10 })),
        (exercises_path.as_str(), Method::POST, json!({ "name": "Squat", "sets": "3", "reps": 10 })),
        (exercises_path.as_str(), Method::POST, json!({ "name": "Squat", "reps": 10 })),
    ];
    for (uri, method, body) in cases {
        let res = common::send(&app, method.clone(), uri, Some(body.clone())).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{method} {uri} {body}");
    }

    let syntax_error = Request::builder()
        .method(Method::POST)
        .uri("/workout-plans")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    assert_eq!(send_request(&app, syntax_error).await.status, StatusCode::BAD_REQUEST);

    let no_content_type = Request::builder()
        .method(Method::POST)
        .uri("/workout-plans")
        .body(Body::from(json!({ "name": "Legs" }).to_string()))
        .unwrap();
    assert_eq!(send_request(&app, no_content_type).await.status, StatusCode::BAD_REQUEST);

    assert_eq!(get(&app, "/workout-plans").await.json::<Vec<WorkoutPlan>>(), vec![plan]);
}

#[tokio::test]
async fn oversized_bodies_are_refused() {
    let app = memory_app();
    let name = "x".repeat(server::routes::DEFAULT_BODY_LIMIT_BYTES + 1);
    let res = post(&app, "/workout-plans", json!({ "name": name })).await;
    assert!(res.status.is_client_error());
    assert!(get(&app, "/workout-plans").await.json::<Vec<WorkoutPlan>>().is_empty());
}

#[tokio::test]
async fn ping_answers() {
    let app = memory_app();
    let res = get(&app, "/ping").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json::<Value>(), Value::Null);
}

#[tokio::test]
async fn exercise_deletion_is_scoped_to_the_exercise() {
    let (_dir, app) = sqlite_app();
    let plan: WorkoutPlan = post(&app, "/workout-plans", json!({ "name": "Legs" })).await.json();
    let uri = Object::WorkoutPlanExercises.path_for(plan.id);

    let squat: Exercise = post(&app, &uri, json!({ "name": "Squat", "sets": 3, "reps": 10 })).await.json();
    let lunge: Exercise = post(&app, &uri, json!({ "name": "Lunge", "sets": 3, "reps": 12 })).await.json();

    let res = delete(&app, &Object::Exercise.path_for(squat.id)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &uri).await.json::<Vec<Exercise>>(), vec![lunge]);

    assert_eq!(delete(&app, &Object::Exercise.path_for(squat.id)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, &Object::WorkoutPlan.path_for(plan.id)).await.status, StatusCode::OK);
}
