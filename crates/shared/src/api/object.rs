use const_format::concatcp;

use crate::api::API_BASE_PATH;

/// Name of the path parameter that carries a record identifier
pub const ID_PARAM: &str = ":id";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Ping,
    WorkoutPlans,
    WorkoutPlan,
    WorkoutPlanExercises,
    Exercise,
}

impl Object {
    /// Route pattern as registered with the router
    pub const fn path(&self) -> &'static str {
        use Object::*;
        match self {
            Ping => concatcp!(API_BASE_PATH, "ping"),
            WorkoutPlans => concatcp!(API_BASE_PATH, "workout-plans"),
            WorkoutPlan => concatcp!(API_BASE_PATH, "workout-plans/", ID_PARAM),
            WorkoutPlanExercises => concatcp!(API_BASE_PATH, "workout-plans/", ID_PARAM, "/exercises"),
            Exercise => concatcp!(API_BASE_PATH, "exercises/", ID_PARAM),
        }
    }

    /// Concrete path with the identifier filled in
    pub fn path_for<T: ToString>(&self, id: T) -> String {
        self.path().replace(ID_PARAM, &id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_the_public_routes() {
        assert_eq!(Object::WorkoutPlans.path(), "/workout-plans");
        assert_eq!(Object::WorkoutPlan.path(), "/workout-plans/:id");
        assert_eq!(Object::WorkoutPlanExercises.path(), "/workout-plans/:id/exercises");
        assert_eq!(Object::Exercise.path(), "/exercises/:id");
    }

    #[test]
    fn path_for_fills_in_the_id() {
        assert_eq!(Object::WorkoutPlanExercises.path_for("P1"), "/workout-plans/P1/exercises");
        assert_eq!(Object::Exercise.path_for(42), "/exercises/42");
    }
}
