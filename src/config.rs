use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub lottery: LotteryConfig,
    #[serde(default)]
    pub stream: StreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Lottery business rules. The three stake shares (beneficiary + house +
/// pool remainder) are validated once at startup, not per bet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotteryConfig {
    /// Numbers run 0..=numbers_range
    #[serde(default = "default_numbers_range")]
    pub numbers_range: i32,
    /// Minimum stake in the smallest currency unit; also the default stake
    #[serde(default = "default_min_bet")]
    pub min_bet: i64,
    /// Maximum accepted stake; bounds ledger arithmetic
    #[serde(default = "default_max_bet")]
    pub max_bet: i64,
    /// Percentage of every stake forwarded to the chosen beneficiary
    #[serde(default = "default_beneficiary_percent")]
    pub beneficiary_percent: i64,
    /// Percentage of every stake retained by the house
    #[serde(default = "default_house_percent")]
    pub house_percent: i64,
    /// Reject a number already held as pending by a different bettor
    #[serde(default = "default_true")]
    pub enforce_unique_numbers: bool,
    /// Window for "restrict to recent" draws, in hours
    #[serde(default = "default_recent_window_hours")]
    pub recent_window_hours: i64,
    /// How long a settled bet still counts as "just completed" for the
    /// ticket-status endpoint, in seconds
    #[serde(default = "default_status_recency_secs")]
    pub status_recency_secs: i64,
    /// When set, a background task runs a draw on this cadence
    #[serde(default)]
    pub auto_draw_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Keep-alive period for SSE connections, in seconds
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
    /// Broadcast channel depth per subscriber before events are dropped
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_numbers_range() -> i32 {
    99
}
fn default_min_bet() -> i64 {
    100
}
fn default_max_bet() -> i64 {
    1_000_000_000
}
fn default_beneficiary_percent() -> i64 {
    15
}
fn default_house_percent() -> i64 {
    5
}
fn default_true() -> bool {
    true
}
fn default_recent_window_hours() -> i64 {
    24
}
fn default_status_recency_secs() -> i64 {
    30
}
fn default_heartbeat_secs() -> u64 {
    30
}
fn default_channel_capacity() -> usize {
    256
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            numbers_range: default_numbers_range(),
            min_bet: default_min_bet(),
            max_bet: default_max_bet(),
            beneficiary_percent: default_beneficiary_percent(),
            house_percent: default_house_percent(),
            enforce_unique_numbers: default_true(),
            recent_window_hours: default_recent_window_hours(),
            status_recency_secs: default_status_recency_secs(),
            auto_draw_interval_secs: None,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            heartbeat_secs: default_heartbeat_secs(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl LotteryConfig {
    /// Pool percentage is the remainder after beneficiary and house shares.
    pub fn pool_percent(&self) -> i64 {
        100 - self.beneficiary_percent - self.house_percent
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Read the config file if present, otherwise fall back to env vars
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse config: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // Without a config file the database URL must come from the env
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    lottery: LotteryConfig::default(),
                    stream: StreamConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Env vars override file values when both are present
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("LOTTERY_NUMBERS_RANGE")
            && let Ok(n) = v.parse()
        {
            config.lottery.numbers_range = n;
        }
        if let Ok(v) = env::var("LOTTERY_MIN_BET")
            && let Ok(n) = v.parse()
        {
            config.lottery.min_bet = n;
        }
        if let Ok(v) = env::var("LOTTERY_MAX_BET")
            && let Ok(n) = v.parse()
        {
            config.lottery.max_bet = n;
        }
        if let Ok(v) = env::var("LOTTERY_BENEFICIARY_PERCENT")
            && let Ok(n) = v.parse()
        {
            config.lottery.beneficiary_percent = n;
        }
        if let Ok(v) = env::var("LOTTERY_HOUSE_PERCENT")
            && let Ok(n) = v.parse()
        {
            config.lottery.house_percent = n;
        }
        if let Ok(v) = env::var("LOTTERY_ENFORCE_UNIQUE_NUMBERS")
            && let Ok(b) = v.parse()
        {
            config.lottery.enforce_unique_numbers = b;
        }
        if let Ok(v) = env::var("LOTTERY_AUTO_DRAW_INTERVAL_SECS")
            && let Ok(n) = v.parse()
        {
            config.lottery.auto_draw_interval_secs = Some(n);
        }
        if let Ok(v) = env::var("STREAM_HEARTBEAT_SECS")
            && let Ok(n) = v.parse()
        {
            config.stream.heartbeat_secs = n;
        }

        config.validate()?;

        Ok(config)
    }

    /// Startup invariants. Violations here are configuration mistakes, so
    /// they abort boot instead of surfacing per request.
    pub fn validate(&self) -> Result<(), String> {
        let l = &self.lottery;
        if l.numbers_range < 1 {
            return Err(format!(
                "lottery.numbers_range must be at least 1, got {}",
                l.numbers_range
            ));
        }
        if l.min_bet < 1 {
            return Err(format!("lottery.min_bet must be positive, got {}", l.min_bet));
        }
        if l.max_bet < l.min_bet {
            return Err(format!(
                "lottery.max_bet ({}) must not be below lottery.min_bet ({})",
                l.max_bet, l.min_bet
            ));
        }
        if l.beneficiary_percent < 0 || l.house_percent < 0 {
            return Err("stake share percentages must not be negative".to_string());
        }
        if l.beneficiary_percent + l.house_percent >= 100 {
            return Err(format!(
                "beneficiary_percent ({}) + house_percent ({}) must leave a positive pool share",
                l.beneficiary_percent, l.house_percent
            ));
        }
        if self.stream.channel_capacity == 0 {
            return Err("stream.channel_capacity must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 5,
            },
            lottery: LotteryConfig::default(),
            stream: StreamConfig::default(),
        }
    }

    #[test]
    fn test_default_shares_sum_to_100() {
        let l = LotteryConfig::default();
        assert_eq!(l.beneficiary_percent + l.house_percent + l.pool_percent(), 100);
        assert_eq!(l.pool_percent(), 80);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_shares_consuming_whole_stake() {
        let mut config = base_config();
        config.lottery.beneficiary_percent = 60;
        config.lottery.house_percent = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_max_bet_below_min_bet() {
        let mut config = base_config();
        config.lottery.max_bet = config.lottery.min_bet - 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_range() {
        let mut config = base_config();
        config.lottery.numbers_range = 0;
        assert!(config.validate().is_err());
    }
}
