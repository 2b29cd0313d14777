//! Storage agnostic description of a persisted record.
//!
//! A [`Record`] knows how to build itself from its creation fields, how to
//! apply an update and how to expose the fields a [`Filter`] can match on.
//! Storage implementations only ever deal with records through this trait.

use std::fmt;

use crate::types::Uuid;

pub trait Record: fmt::Debug + Clone + Send + Sync + 'static {
    /// Fields supplied when the record is created
    type New: fmt::Debug + Send + 'static;
    /// Fields supplied when the record is updated in place
    type Changes: fmt::Debug + Send + 'static;
    /// Fields a [`Filter`] can match on
    type Field: fmt::Debug + Copy + Send + Sync + 'static;

    /// Human readable name used in logs and error messages
    const NAME: &'static str;

    fn id(&self) -> &Uuid;

    fn from_new(id: Uuid, new: Self::New) -> Self;

    fn apply(&mut self, changes: Self::Changes);

    fn field(&self, field: Self::Field) -> FieldValue;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Id(Uuid),
    Text(String),
    Integer(i64),
    Null,
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        Self::Id(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

#[cfg(feature = "backend")]
impl From<FieldValue> for sea_query::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Id(id) => id.into(),
            FieldValue::Text(text) => text.into(),
            FieldValue::Integer(int) => int.into(),
            FieldValue::Null => sea_query::Value::String(None),
        }
    }
}

/// Equality predicate on a single field. [`FieldValue::Null`] matches records
/// where the field is absent
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<F> {
    pub field: F,
    pub value: FieldValue,
}

impl<F: Copy> Filter<F> {
    pub fn eq<V: Into<FieldValue>>(field: F, value: V) -> Self {
        Self { field, value: value.into() }
    }

    pub fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        record.field(self.field) == self.value
    }
}
