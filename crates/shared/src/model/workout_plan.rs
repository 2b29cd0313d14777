use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    crate::model::filter_condition,
    rusqlite::{Connection, OptionalExtension, Row},
    sea_query::{Alias, Expr, Iden, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

use crate::{
    api::error::ValidationError,
    model::{name_is_blank, Exercise, FieldValue, Filter, Record, ValidateModel},
    types::Uuid,
};

/// A named collection of exercises. `exercises` is only populated when the
/// caller asked for them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
}

/// Body of a plan creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkoutPlan {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewWorkoutPlan {
    pub fn new<T: Into<String>>(name: T, description: Option<String>) -> Self {
        Self { name: name.into(), description }
    }
}

/// Body of a plan update request. `name` is always replaced. `description` is
/// left alone when the key is missing, cleared by `null` and replaced by a
/// string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateWorkoutPlan {
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
}

impl UpdateWorkoutPlan {
    pub fn new<T: Into<String>>(name: T, description: Option<Option<String>>) -> Self {
        Self { name: name.into(), description }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let mut error_messages = vec![];
    if name_is_blank(name) {
        error_messages.push("name must not be empty".to_owned());
    }
    ValidationError::from_messages(error_messages)
}

impl ValidateModel for NewWorkoutPlan {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

impl ValidateModel for UpdateWorkoutPlan {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutPlanField {
    Id,
    Name,
    Description,
}

impl Record for WorkoutPlan {
    type New = NewWorkoutPlan;
    type Changes = UpdateWorkoutPlan;
    type Field = WorkoutPlanField;

    const NAME: &'static str = "workout plan";

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn from_new(id: Uuid, new: NewWorkoutPlan) -> Self {
        let NewWorkoutPlan { name, description } = new;
        Self { id, name, description, exercises: None }
    }

    fn apply(&mut self, changes: UpdateWorkoutPlan) {
        self.name = changes.name;
        if let Some(description) = changes.description {
            self.description = description;
        }
    }

    fn field(&self, field: WorkoutPlanField) -> FieldValue {
        match field {
            WorkoutPlanField::Id => self.id.into(),
            WorkoutPlanField::Name => self.name.clone().into(),
            WorkoutPlanField::Description => self.description.clone().into(),
        }
    }
}

#[cfg(feature = "backend")]
#[derive(Iden)]
pub enum WorkoutPlanIden {
    #[iden = "workout_plan"]
    Table,
    Id,
    Name,
    Description,
}

#[cfg(feature = "backend")]
impl From<WorkoutPlanField> for WorkoutPlanIden {
    fn from(value: WorkoutPlanField) -> Self {
        match value {
            WorkoutPlanField::Id => Self::Id,
            WorkoutPlanField::Name => Self::Name,
            WorkoutPlanField::Description => Self::Description,
        }
    }
}

#[cfg(feature = "backend")]
impl WorkoutPlan {
    const COLUMNS: [WorkoutPlanIden; 3] =
        [WorkoutPlanIden::Id, WorkoutPlanIden::Name, WorkoutPlanIden::Description];

    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            exercises: None,
        })
    }

    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<WorkoutPlan>, anyhow::Error> {
        let (sql, values) = Query::select()
            .columns(Self::COLUMNS)
            .from(WorkoutPlanIden::Table)
            .and_where(Expr::col(WorkoutPlanIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let plan = stmt.query_row(&*values.as_params(), WorkoutPlan::from_row).optional()?;
        Ok(plan)
    }

    pub fn fetch_where(
        conn: &Connection,
        filter: Option<&Filter<WorkoutPlanField>>,
    ) -> Result<Vec<WorkoutPlan>, anyhow::Error> {
        let mut query = Query::select();
        query
            .columns(Self::COLUMNS)
            .from(WorkoutPlanIden::Table)
            .order_by(Alias::new("rowid"), Order::Asc);
        if let Some(filter) = filter {
            query.and_where(filter_condition(
                WorkoutPlanIden::from(filter.field),
                filter.value.clone(),
            ));
        }
        let (sql, values) = query.build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let plans = stmt
            .query_map(&*values.as_params(), WorkoutPlan::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(plans)
    }

    pub fn insert(&self, conn: &Connection) -> Result<(), anyhow::Error> {
        let (sql, values) = Query::insert()
            .into_table(WorkoutPlanIden::Table)
            .columns(Self::COLUMNS)
            .values([self.id.into(), self.name.clone().into(), self.description.clone().into()])?
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;
        Ok(())
    }

    /// Writes the mutable columns back, returning the number of rows touched
    pub fn update(&self, conn: &Connection) -> Result<usize, anyhow::Error> {
        let (sql, values) = Query::update()
            .table(WorkoutPlanIden::Table)
            .values([
                (WorkoutPlanIden::Name, self.name.clone().into()),
                (WorkoutPlanIden::Description, self.description.clone().into()),
            ])
            .and_where(Expr::col(WorkoutPlanIden::Id).eq(self.id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt.execute(&*values.as_params())?)
    }

    /// Deletes the plan. Its exercises go with it via `ON DELETE CASCADE`
    pub fn delete(conn: &Connection, id: &Uuid) -> Result<usize, anyhow::Error> {
        let (sql, values) = Query::delete()
            .from_table(WorkoutPlanIden::Table)
            .and_where(Expr::col(WorkoutPlanIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt.execute(&*values.as_params())?)
    }
}
