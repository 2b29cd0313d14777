mod record;
pub use record::*;

mod workout_plan;
pub use workout_plan::*;

mod exercise;
pub use exercise::*;

use crate::api::error::ValidationError;

pub trait ValidateModel {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Names count as empty when they hold nothing but whitespace
pub(crate) fn name_is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

/// Turns a filter value into a `WHERE` condition. Null values match with
/// `IS NULL` since `= NULL` never matches in SQL
#[cfg(feature = "backend")]
pub(crate) fn filter_condition<I>(column: I, value: FieldValue) -> sea_query::SimpleExpr
where
    I: sea_query::Iden + 'static,
{
    use sea_query::Expr;

    match value {
        FieldValue::Null => Expr::col(column).is_null(),
        value => Expr::col(column).eq(sea_query::Value::from(value)),
    }
}
