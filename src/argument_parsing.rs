use clap::Parser;
use validator::Validate;

use crate::sqlite::SQLITE_CONNECTION_STRING;

/// Serve uptime charts from ClickHouse, or from a local Sqlite database
#[derive(Parser, Debug, Validate)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// ClickHouse HTTP endpoint; selects the ClickHouse backend when set
    #[arg(long, env, default_value = None)]
    #[validate(url)]
    pub(crate) clickhouse_url: Option<String>,

    /// ClickHouse user
    #[arg(long, env, default_value = "default")]
    pub(crate) clickhouse_user: String,

    /// ClickHouse password
    #[arg(long, env, default_value = "")]
    pub(crate) clickhouse_password: String,

    /// ClickHouse database holding the checks table
    #[arg(long, env, default_value = "default")]
    pub(crate) clickhouse_database: String,

    /// Sqlite connection string, used when no ClickHouse endpoint is given
    #[arg(short, long, env, default_value = SQLITE_CONNECTION_STRING)]
    pub(crate) sqlite: String,

    /// Address the HTTP server binds to
    #[arg(short, long, env, default_value = "127.0.0.1:3000")]
    pub(crate) listen: String,
}
