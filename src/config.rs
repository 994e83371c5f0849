//! Runtime settings, loaded from `config.toml` and `ROLLCALL__*` environment variables.

use anyhow::{Result, ensure};
use config::{Config, Environment, File, Map};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub auth: AuthSettings,
    pub scanner: ScannerSettings,
    #[serde(default)]
    pub roster: RosterSettings,
}

/// Simulated latency of the auth store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthSettings {
    pub login_delay_ms: u64,
    pub fingerprint_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScannerSettings {
    pub scan_delay_ms: u64,
    /// Probability in `[0, 1]` that a simulated scan succeeds.
    pub success_rate: f64,
    /// Pause after a scan before the roll call moves to the next student.
    pub advance_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RosterSettings {
    /// A CSV roster to seed classes from. The built-in demo classes are used when unset.
    pub path: Option<PathBuf>,
}

impl AuthSettings {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn fingerprint_delay(&self) -> Duration {
        Duration::from_millis(self.fingerprint_delay_ms)
    }
}

impl ScannerSettings {
    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth: AuthSettings {
                login_delay_ms: 1000,
                fingerprint_delay_ms: 1500,
            },
            scanner: ScannerSettings {
                scan_delay_ms: 1500,
                success_rate: 0.8,
                advance_delay_ms: 1000,
            },
            roster: RosterSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from the config file at `path` (`config` by default, extension optional),
    /// then applies `ROLLCALL__SECTION__KEY` overrides from the environment and `.env`. A missing
    /// file is not an error.
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::load_with(path, Some(environment(Path::new(".env"))?))
    }

    /// Like [`Settings::load`], but reads overrides from `env` instead of the process
    /// environment when given.
    pub fn load_with(path: Option<&str>, env: Option<Map<String, String>>) -> Result<Self> {
        let defaults = Settings::default();
        let settings = Config::builder()
            .set_default("auth.login_delay_ms", defaults.auth.login_delay_ms)?
            .set_default("auth.fingerprint_delay_ms", defaults.auth.fingerprint_delay_ms)?
            .set_default("scanner.scan_delay_ms", defaults.scanner.scan_delay_ms)?
            .set_default("scanner.success_rate", defaults.scanner.success_rate)?
            .set_default("scanner.advance_delay_ms", defaults.scanner.advance_delay_ms)?
            .add_source(File::with_name(path.unwrap_or("config")).required(path.is_some()))
            .add_source(
                Environment::with_prefix("ROLLCALL")
                    .try_parsing(true)
                    .prefix_separator("__")
                    .separator("__")
                    .source(env),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let rate = self.scanner.success_rate;
        ensure!(
            (0.0..=1.0).contains(&rate),
            "scanner.success_rate must be between 0 and 1, got {rate}"
        );

        Ok(())
    }
}

/// The process environment, plus every entry of the `.env` file at `dotenv` that the process does
/// not already set. A missing `.env` file contributes nothing.
pub fn environment(dotenv: &Path) -> Result<Map<String, String>> {
    let mut vars: Map<String, String> = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect();

    match dotenvy::from_path_iter(dotenv) {
        Ok(entries) => {
            for entry in entries {
                let (key, value) = entry?;
                vars.entry(key).or_insert(value);
            }
        }
        Err(err) if err.not_found() => {}
        Err(err) => return Err(err.into()),
    }

    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_demo_timings() {
        let settings = Settings::default();
        assert_eq!(settings.auth.login_delay(), Duration::from_secs(1));
        assert_eq!(settings.scanner.scan_delay(), Duration::from_millis(1500));
        assert_eq!(settings.scanner.success_rate, 0.8);
        assert!(settings.roster.path.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let path = std::env::temp_dir().join(format!("rollcall-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[scanner]\nsuccess_rate = 1.0\nscan_delay_ms = 5").unwrap();
        writeln!(file, "[roster]\npath = \"roster.csv\"").unwrap();

        let settings = Settings::load(Some(path.to_str().unwrap())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.scanner.success_rate, 1.0);
        assert_eq!(settings.scanner.scan_delay_ms, 5);
        assert_eq!(settings.auth.login_delay_ms, 1000);
        assert_eq!(settings.roster.path, Some(PathBuf::from("roster.csv")));
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("rollcall-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn environment_overrides_win_over_the_file() {
        let path = temp_file("override.toml", "[scanner]\nsuccess_rate = 1.0\nscan_delay_ms = 5\n");
        let env = Map::from([
            ("ROLLCALL__SCANNER__SUCCESS_RATE".to_string(), "0.25".to_string()),
            ("ROLLCALL__AUTH__LOGIN_DELAY_MS".to_string(), "10".to_string()),
            ("UNRELATED__SCANNER__SCAN_DELAY_MS".to_string(), "999".to_string()),
        ]);

        let settings = Settings::load_with(Some(path.to_str().unwrap()), Some(env)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.scanner.success_rate, 0.25);
        assert_eq!(settings.auth.login_delay_ms, 10);
        assert_eq!(settings.scanner.scan_delay_ms, 5);
    }

    #[test]
    fn dotenv_entries_reach_the_settings() {
        let dotenv = temp_file(
            "dotenv",
            "ROLLCALL__SCANNER__ADVANCE_DELAY_MS=42\nROLLCALL__ROSTER__PATH=from-dotenv.csv\n",
        );

        let env = environment(&dotenv).unwrap();
        std::fs::remove_file(&dotenv).unwrap();
        assert_eq!(env["ROLLCALL__SCANNER__ADVANCE_DELAY_MS"], "42");

        let settings = Settings::load_with(None, Some(env)).unwrap();
        assert_eq!(settings.scanner.advance_delay(), Duration::from_millis(42));
        assert_eq!(settings.roster.path, Some(PathBuf::from("from-dotenv.csv")));
    }

    #[test]
    fn a_missing_dotenv_file_adds_nothing() {
        let missing = std::env::temp_dir().join("rollcall-no-such-dotenv");
        let env = environment(&missing).unwrap();
        assert!(!env.contains_key("ROLLCALL__SCANNER__ADVANCE_DELAY_MS"));
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let env = Map::from([("ROLLCALL__SCANNER__SUCCESS_RATE".to_string(), "2.5".to_string())]);
        assert!(Settings::load_with(None, Some(env)).is_err());
    }

    #[test]
    fn rejects_out_of_range_success_rate() {
        let mut settings = Settings::default();
        settings.scanner.success_rate = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(Settings::load(Some("/nonexistent/rollcall-settings.toml")).is_err());
    }
}
