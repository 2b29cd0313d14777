use std::convert::Infallible;

use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    crate::model::filter_condition,
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{Alias, Expr, Iden, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

use crate::{
    api::error::ValidationError,
    model::{name_is_blank, FieldValue, Record, ValidateModel},
    types::Uuid,
};

/// A single movement prescription belonging to exactly one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub sets: i64,
    pub reps: i64,
    pub workout_plan_id: Uuid,
}

/// Body of an add exercise request. The plan comes from the path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExercise {
    pub name: String,
    pub sets: i64,
    pub reps: i64,
}

impl AddExercise {
    pub fn new<T: Into<String>>(name: T, sets: i64, reps: i64) -> Self {
        Self { name: name.into(), sets, reps }
    }

    /// Links the exercise to the plan it will be created under
    pub fn for_plan(self, workout_plan_id: Uuid) -> NewExercise {
        let AddExercise { name, sets, reps } = self;
        NewExercise { workout_plan_id, name, sets, reps }
    }
}

impl ValidateModel for AddExercise {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error_messages = vec![];
        if name_is_blank(&self.name) {
            error_messages.push("name must not be empty".to_owned());
        }
        if self.sets <= 0 {
            error_messages.push(format!("sets must be a positive integer, got {}", self.sets));
        }
        if self.reps <= 0 {
            error_messages.push(format!("reps must be a positive integer, got {}", self.reps));
        }
        ValidationError::from_messages(error_messages)
    }
}

/// Creation fields of an exercise, including the plan it references
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub workout_plan_id: Uuid,
    pub name: String,
    pub sets: i64,
    pub reps: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseField {
    Id,
    Name,
    Sets,
    Reps,
    WorkoutPlanId,
}

impl Record for Exercise {
    type New = NewExercise;
    // Exercises are never updated in place
    type Changes = Infallible;
    type Field = ExerciseField;

    const NAME: &'static str = "exercise";

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn from_new(id: Uuid, new: NewExercise) -> Self {
        let NewExercise { workout_plan_id, name, sets, reps } = new;
        Self { id, name, sets, reps, workout_plan_id }
    }

    fn apply(&mut self, changes: Infallible) {
        match changes {}
    }

    fn field(&self, field: ExerciseField) -> FieldValue {
        match field {
            ExerciseField::Id => self.id.into(),
            ExerciseField::Name => self.name.clone().into(),
            ExerciseField::Sets => self.sets.into(),
            ExerciseField::Reps => self.reps.into(),
            ExerciseField::WorkoutPlanId => self.workout_plan_id.into(),
        }
    }
}

#[cfg(feature = "backend")]
#[derive(Iden)]
pub enum ExerciseIden {
    #[iden = "exercise"]
    Table,
    Id,
    Name,
    Sets,
    Reps,
    WorkoutPlanId,
}

#[cfg(feature = "backend")]
impl From<ExerciseField> for ExerciseIden {
    fn from(value: ExerciseField) -> Self {
        match value {
            ExerciseField::Id => Self::Id,
            ExerciseField::Name => Self::Name,
            ExerciseField::Sets => Self::Sets,
            ExerciseField::Reps => Self::Reps,
            ExerciseField::WorkoutPlanId => Self::WorkoutPlanId,
        }
    }
}

#[cfg(feature = "backend")]
impl Exercise {
    const COLUMNS: [ExerciseIden; 5] = [
        ExerciseIden::Id,
        ExerciseIden::Name,
        ExerciseIden::Sets,
        ExerciseIden::Reps,
        ExerciseIden::WorkoutPlanId,
    ];

    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<Exercise>, anyhow::Error> {
        let (sql, values) = Query::select()
            .columns(Self::COLUMNS)
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt.query_row(&*values.as_params(), Exercise::from_row).optional()?;
        Ok(exercise)
    }

    pub fn fetch_where(
        conn: &Connection,
        filter: Option<&crate::model::Filter<ExerciseField>>,
    ) -> Result<Vec<Exercise>, anyhow::Error> {
        let mut query = Query::select();
        query
            .columns(Self::COLUMNS)
            .from(ExerciseIden::Table)
            .order_by(Alias::new("rowid"), Order::Asc);
        if let Some(filter) = filter {
            query.and_where(filter_condition(ExerciseIden::from(filter.field), filter.value.clone()));
        }
        let (sql, values) = query.build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(exercises)
    }

    pub fn delete(conn: &Connection, id: &Uuid) -> Result<usize, anyhow::Error> {
        let (sql, values) = Query::delete()
            .from_table(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt.execute(&*values.as_params())?)
    }
}
