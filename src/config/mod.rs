use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PUBLIC_SCHEME must be \"http\" or \"https\", got {0:?}")]
    InvalidScheme(String),

    #[error("AVATAR_PATH must start with '/', got {0:?}")]
    InvalidAvatarPath(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub is_dev: bool,
    /// Directory served as static assets (avatar, font).
    pub public_dir: PathBuf,
    /// Scheme used to build absolute URLs from the request `Host` header.
    pub public_scheme: String,
    /// Host-relative path of the sender avatar.
    pub avatar_path: String,
    pub font_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let public_scheme = get("PUBLIC_SCHEME").unwrap_or_else(|| "http".to_string());
        if public_scheme != "http" && public_scheme != "https" {
            return Err(ConfigError::InvalidScheme(public_scheme));
        }

        let avatar_path = get("AVATAR_PATH").unwrap_or_else(|| "/avatar.jpg".to_string());
        if !avatar_path.starts_with('/') {
            return Err(ConfigError::InvalidAvatarPath(avatar_path));
        }

        Ok(Config {
            server_host: get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: get("SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            is_dev: get("APP_ENV").as_deref() != Some("production"),
            public_dir: get("PUBLIC_DIR")
                .unwrap_or_else(|| "public".to_string())
                .into(),
            public_scheme,
            avatar_path,
            font_path: get("FONT_PATH")
                .unwrap_or_else(|| "public/fonts/Inter-Black.ttf".to_string())
                .into(),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
        assert!(config.is_dev);
        assert_eq!(config.public_scheme, "http");
        assert_eq!(config.avatar_path, "/avatar.jpg");
        assert_eq!(config.public_dir, PathBuf::from("public"));
    }

    #[test]
    fn production_disables_dev_mode() {
        let config = config_with(&[("APP_ENV", "production")]).unwrap();
        assert!(!config.is_dev);
    }

    #[test]
    fn unparsable_port_falls_back() {
        let config = config_with(&[("SERVER_PORT", "eighty")]).unwrap();
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = config_with(&[("PUBLIC_SCHEME", "ftp")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidScheme("ftp".into()));
    }

    #[test]
    fn rejects_relative_avatar_path() {
        let err = config_with(&[("AVATAR_PATH", "avatar.jpg")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidAvatarPath("avatar.jpg".into()));
    }
}
