mod plan;
pub use plan::*;

mod exercise;
pub use exercise::*;

use shared::types::Uuid;

/// Ids only ever come from storage, so a string that doesn't parse can't name
/// an existing row
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse(id).ok()
}
