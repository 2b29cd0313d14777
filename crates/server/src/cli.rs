use clap::Parser;

use crate::routes::DEFAULT_BODY_LIMIT_BYTES;

#[derive(Debug, Clone, Parser)]
#[clap(name = "workout server")]
pub struct Cli {
    #[clap(long, env, default_value = "workout.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "8080")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
    /// Requests with a larger body are rejected before reaching a handler
    #[clap(long, env, default_value_t = DEFAULT_BODY_LIMIT_BYTES)]
    pub body_limit_bytes: usize,

    /// Deletes the database before starting the main program for debug purposes
    #[arg(long, env, default_value = "false")]
    pub debug_delete_database: bool,
}
