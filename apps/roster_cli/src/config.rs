use std::{fs, io, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: 10,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

/// Defaults, then the config file, then the environment. An explicitly
/// named config file must exist; the default one is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => {
            apply_file(&mut settings, &raw)
                .with_context(|| format!("invalid config file '{}'", path.display()))?;
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ROSTER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

pub fn validate_server_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid server url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("server url '{raw}' must use http or https");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        apply_file(
            &mut settings,
            "server_url = \"http://school.example:9000\"\nrequest_timeout_secs = 3\n",
        )
        .expect("valid toml");

        assert_eq!(settings.server_url, "http://school.example:9000");
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn env_overrides_file_and_prefers_app_prefix() {
        let vars: HashMap<&str, &str> = [
            ("ROSTER_SERVER_URL", "http://roster.example"),
            ("APP__SERVER_URL", "http://app.example"),
            ("APP__REQUEST_TIMEOUT_SECS", "not-a-number"),
            ("APP__LOG_FILTER", "client_core=debug"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.server_url, "http://app.example");
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.log_filter, "client_core=debug");
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("roster_cli_missing_{suffix}.toml"));

        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("roster_cli_bad_{suffix}.toml"));
        fs::write(&path, "request_timeout_secs = \"soon\"").expect("write config");

        let err = load_settings(Some(&path)).expect_err("bad config");
        assert!(err.to_string().contains("invalid config file"));

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn server_url_must_be_http() {
        assert!(validate_server_url("http://127.0.0.1:8000").is_ok());
        assert!(validate_server_url("ftp://127.0.0.1").is_err());
        assert!(validate_server_url("127.0.0.1:8000").is_err());
    }
}
