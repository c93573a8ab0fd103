//! Layered client settings: defaults, then an optional TOML file, then
//! `PRACTICE_*` environment variables, then command-line flags.

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use practice_core::page::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

use crate::client::ApiConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub url:          String,
  pub username:     String,
  pub password:     String,
  pub timeout_secs: u64,
  pub page_size:    u32,
  pub log_file:     PathBuf,
}

/// Values given on the command line; `None` leaves lower layers in charge.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub url:          Option<String>,
  pub username:     Option<String>,
  pub password:     Option<String>,
  pub timeout_secs: Option<u64>,
  pub log_file:     Option<PathBuf>,
}

impl Settings {
  pub fn load(file: Option<&PathBuf>, overrides: Overrides) -> anyhow::Result<Self> {
    let mut builder = Config::builder()
      .set_default("url", "http://localhost:8080")?
      .set_default("username", "user")?
      .set_default("password", "user")?
      .set_default("timeout_secs", 30_i64)?
      .set_default("page_size", i64::from(DEFAULT_PAGE_SIZE))?
      .set_default("log_file", "practice.log")?;

    if let Some(path) = file {
      builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
    }

    let settings = builder
      .add_source(Environment::with_prefix("PRACTICE"))
      .set_override_option("url", overrides.url)?
      .set_override_option("username", overrides.username)?
      .set_override_option("password", overrides.password)?
      .set_override_option("timeout_secs", overrides.timeout_secs.map(|s| s.to_string()))?
      .set_override_option(
        "log_file",
        overrides.log_file.map(|p| p.to_string_lossy().into_owned()),
      )?
      .build()
      .context("failed to read settings")?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      base_url: self.url.clone(),
      username: self.username.clone(),
      password: self.password.clone(),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn defaults_apply_without_sources() {
    let settings = Settings::load(None, Overrides::default()).unwrap();
    assert_eq!(settings.username, "user");
    assert_eq!(settings.page_size, 20);
    assert_eq!(settings.api_config().timeout, Duration::from_secs(30));
  }

  #[test]
  fn file_then_flags_take_precedence() {
    let path = std::env::temp_dir().join(format!("practice-settings-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "url = \"http://hr.internal:9000\"\npage_size = 50\nusername = \"admin\"").unwrap();

    let settings = Settings::load(
      Some(&path),
      Overrides { username: Some("auditor".into()), ..Default::default() },
    )
    .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(settings.url, "http://hr.internal:9000");
    assert_eq!(settings.page_size, 50);
    assert_eq!(settings.username, "auditor");
    assert_eq!(settings.password, "user");
  }

  #[test]
  fn missing_file_is_an_error() {
    let path = PathBuf::from("/nonexistent/practice.toml");
    assert!(Settings::load(Some(&path), Overrides::default()).is_err());
  }
}
