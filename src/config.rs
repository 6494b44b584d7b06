use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// SQLite file for holdings. Without it holdings live in memory.
    pub database_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|port| port.trim().parse().ok())
            .unwrap_or(5000);

        let database_path = lookup("DATABASE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match lookup("LOG_FORMAT") {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Config {
            port,
            database_path,
            log_format,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_path, None);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn reads_variables() {
        let config = config(&[
            ("PORT", "8080"),
            ("DATABASE_PATH", "./data.db"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, Some(PathBuf::from("./data.db")));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_port_falls_back() {
        assert_eq!(config(&[("PORT", "http")]).port, 5000);
    }

    #[test]
    fn blank_database_path_means_memory() {
        assert_eq!(config(&[("DATABASE_PATH", "  ")]).database_path, None);
    }
}
