use serde::{Deserialize, Serialize};
use std::fs;

/// Playback speed bounds, in percent of the default reveal timing.
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub animate: bool,
    pub speed: u32,
    pub history: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub animate: ValueSource,
    pub speed: ValueSource,
    pub history: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            animate: ValueSource::Default,
            speed: ValueSource::Default,
            history: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            animate: false,
            speed: 100,
            history: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("FIVEDRAW_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.animate {
            cfg.animate = v;
            sources.animate = ValueSource::File;
        }
        if let Some(v) = f.speed {
            cfg.speed = v;
            sources.speed = ValueSource::File;
        }
        if let Some(v) = f.history {
            cfg.history = Some(v);
            sources.history = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("FIVEDRAW_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(animate) = std::env::var("FIVEDRAW_ANIMATE")
        && !animate.is_empty()
    {
        cfg.animate =
            parse_bool(&animate).ok_or_else(|| ConfigError::Invalid("Invalid animate".into()))?;
        sources.animate = ValueSource::Env;
    }
    if let Ok(speed) = std::env::var("FIVEDRAW_SPEED")
        && !speed.is_empty()
    {
        cfg.speed = speed
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid speed".into()))?;
        sources.speed = ValueSource::Env;
    }
    if let Ok(history) = std::env::var("FIVEDRAW_HISTORY")
        && !history.is_empty()
    {
        cfg.history = Some(history);
        sources.history = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    animate: Option<bool>,
    #[serde(default)]
    speed: Option<u32>,
    #[serde(default)]
    history: Option<String>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&cfg.speed) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: speed must be between {} and {}",
            MIN_SPEED, MAX_SPEED
        )));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write as _;

    const VARS: [&str; 5] = [
        "FIVEDRAW_CONFIG",
        "FIVEDRAW_SEED",
        "FIVEDRAW_ANIMATE",
        "FIVEDRAW_SPEED",
        "FIVEDRAW_HISTORY",
    ];

    fn clear_env() {
        for v in VARS {
            // SAFETY: tests touching the environment are serialized
            unsafe { std::env::remove_var(v) };
        }
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::set_var(key, value) };
    }

    #[test]
    #[serial]
    fn defaults_when_nothing_is_set() {
        clear_env();
        let r = load_with_sources().unwrap();
        assert_eq!(r.config, Config::default());
        assert_eq!(r.sources.speed, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 7\nspeed = 250\nanimate = true").unwrap();
        set_env("FIVEDRAW_CONFIG", file.path().to_str().unwrap());
        set_env("FIVEDRAW_SEED", "99");

        let r = load_with_sources().unwrap();
        assert_eq!(r.config.seed, Some(99));
        assert_eq!(r.sources.seed, ValueSource::Env);
        assert_eq!(r.config.speed, 250);
        assert_eq!(r.sources.speed, ValueSource::File);
        assert!(r.config.animate);
        assert_eq!(r.sources.history, ValueSource::Default);
        clear_env();
    }

    #[test]
    #[serial]
    fn out_of_range_speed_is_rejected() {
        clear_env();
        set_env("FIVEDRAW_SPEED", "0");
        assert!(matches!(load_with_sources(), Err(ConfigError::Invalid(_))));
        set_env("FIVEDRAW_SPEED", "1001");
        assert!(load_with_sources().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn garbage_values_are_rejected() {
        clear_env();
        set_env("FIVEDRAW_ANIMATE", "maybe");
        assert!(load_with_sources().is_err());
        clear_env();
        set_env("FIVEDRAW_SEED", "abc");
        assert!(load_with_sources().is_err());
        clear_env();
    }
}
