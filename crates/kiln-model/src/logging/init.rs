use std::sync::Once;

use log::LevelFilter;

/// Environment variable consulted before `RUST_LOG`.
pub const ENV_VAR: &str = "KILN_LOG";

/// Crates whose output `verbosity` raises.
const KILN_TARGETS: &[&str] = &["kiln_model", "kiln_xaml", "kiln_gen", "kiln_sample"];

/// Logger configuration for kiln binaries.
///
/// Filter precedence: an explicit [`filter`](Self::filter), then `KILN_LOG`,
/// then `RUST_LOG`, then `base_level` with the kiln crates raised by
/// `verbosity` (`-v` debug, `-vv` trace).
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub base_level: LevelFilter,
    pub verbosity: u8,
    pub timestamps: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            base_level: LevelFilter::Info,
            verbosity: 0,
            timestamps: false,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn timestamps(mut self, on: bool) -> Self {
        self.timestamps = on;
        self
    }

    /// Filter directives in effect, with `env` standing in for the process
    /// environment.
    pub fn directives(&self, env: impl Fn(&str) -> Option<String>) -> String {
        if let Some(filter) = &self.env_filter {
            return filter.clone();
        }
        if let Some(filter) = env(ENV_VAR).or_else(|| env("RUST_LOG")) {
            return filter;
        }
        let kiln_level = match self.verbosity {
            0 => return self.base_level.to_string().to_lowercase(),
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        let mut out = self.base_level.to_string().to_lowercase();
        for target in KILN_TARGETS {
            out.push_str(&format!(",{target}={}", kiln_level.to_string().to_lowercase()));
        }
        out
    }
}

static INIT: Once = Once::new();

/// Install the global logger. Only the first call has an effect, and a
/// logger installed by someone else is left alone.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let directives = config.directives(|key| std::env::var(key).ok());
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&directives);
        builder.write_style(config.write_style);
        if !config.timestamps {
            builder.format_timestamp(None);
        }
        if builder.try_init().is_ok() {
            log::debug!("kiln logging initialized ({directives})");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig::default().filter("warn").verbosity(2);
        assert_eq!(config.directives(|_| Some("trace".into())), "warn");
    }

    #[test]
    fn kiln_variable_before_rust_log() {
        let env = |key: &str| match key {
            ENV_VAR => Some("kiln_xaml=trace".to_string()),
            "RUST_LOG" => Some("error".to_string()),
            _ => None,
        };
        assert_eq!(LoggingConfig::default().directives(env), "kiln_xaml=trace");
        let rust_only = |key: &str| (key == "RUST_LOG").then(|| "error".to_string());
        assert_eq!(LoggingConfig::default().directives(rust_only), "error");
    }

    #[test]
    fn verbosity_raises_kiln_crates_only() {
        assert_eq!(LoggingConfig::default().directives(no_env), "info");
        let debug = LoggingConfig::default().verbosity(1).directives(no_env);
        assert!(debug.starts_with("info,"));
        assert!(debug.contains("kiln_xaml=debug"));
        let trace = LoggingConfig::default().verbosity(3).directives(no_env);
        assert!(trace.contains("kiln_gen=trace"));
    }
}
