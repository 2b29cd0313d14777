pub mod cli;
pub mod db;
pub mod extract;
pub mod routes;
pub mod services;

mod state;
pub use state::*;
