use clap::Parser;
use std::time::Duration;

/// Runtime settings, sourced from flags or environment variables.
///
/// Every value except the bind address is required; a missing or
/// unparseable variable aborts the process before anything is wired up.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// MongoDB connection string.
    #[arg(long, env = "APP_MONGO_URI")]
    pub mongo_uri: String,

    /// Database holding the accounts collection.
    #[arg(long, env = "APP_MONGO_DATABASE_NAME")]
    pub mongo_database: String,

    /// Minimum number of pooled connections.
    #[arg(long, env = "APP_MONGO_POOL_MIN")]
    pub mongo_pool_min: u32,

    /// Maximum number of pooled connections.
    #[arg(long, env = "APP_MONGO_POOL_MAX")]
    pub mongo_pool_max: u32,

    /// Seconds a pooled connection may sit idle before being reaped.
    #[arg(long, env = "APP_MONGO_MAX_IDLE_TIME_SECOND")]
    pub mongo_max_idle_secs: u64,

    /// Seconds allowed for the initial connection handshake.
    #[arg(long, env = "APP_MONGO_INIT_CONNECTION_TIME_SECOND")]
    pub mongo_connect_timeout_secs: u64,

    /// Milliseconds allowed for a single store operation.
    #[arg(long, env = "APP_MONGO_QUERY_TIMEOUT_MS")]
    pub mongo_query_timeout_ms: u64,

    /// Seconds allowed for a whole inbound request.
    #[arg(long, env = "API_TIMEOUT")]
    pub api_timeout_secs: u64,

    /// Page size applied when a list request carries no limit.
    #[arg(long, env = "DEFAULT_LIMIT", value_parser = clap::value_parser!(i64).range(1..))]
    pub default_limit: i64,

    /// Socket address the HTTP server binds to.
    #[arg(long, env = "APP_BIND_ADDRESS", default_value = "0.0.0.0:9999")]
    pub bind_address: String,
}

impl Settings {
    pub fn mongo_max_idle(&self) -> Duration {
        Duration::from_secs(self.mongo_max_idle_secs)
    }

    pub fn mongo_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.mongo_connect_timeout_secs)
    }

    pub fn mongo_query_timeout(&self) -> Duration {
        Duration::from_millis(self.mongo_query_timeout_ms)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_args() -> Vec<&'static str> {
        vec![
            "accountd",
            "--mongo-uri",
            "mongodb://localhost:27017",
            "--mongo-database",
            "accounts_db",
            "--mongo-pool-min",
            "2",
            "--mongo-pool-max",
            "10",
            "--mongo-max-idle-secs",
            "60",
            "--mongo-connect-timeout-secs",
            "5",
            "--mongo-query-timeout-ms",
            "500",
            "--api-timeout-secs",
            "10",
            "--default-limit",
            "10",
        ]
    }

    #[test]
    fn parses_full_flag_set() {
        let settings = Settings::try_parse_from(full_args()).unwrap();
        assert_eq!(settings.mongo_query_timeout(), Duration::from_millis(500));
        assert_eq!(settings.api_timeout(), Duration::from_secs(10));
        assert_eq!(settings.default_limit, 10);
        assert_eq!(settings.bind_address, "0.0.0.0:9999");
    }

    #[test]
    fn rejects_missing_required_value() {
        let mut args = full_args();
        args.truncate(args.len() - 2); // drop --default-limit
        assert!(Settings::try_parse_from(args).is_err());
    }

    #[test]
    fn rejects_non_positive_default_limit() {
        let mut args = full_args();
        let last = args.len() - 1;
        args[last] = "0";
        assert!(Settings::try_parse_from(args).is_err());
    }
}
