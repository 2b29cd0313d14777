pub mod error;
pub mod response_errors;

mod object;
pub use object::*;

pub const API_BASE_PATH: &str = "/";
