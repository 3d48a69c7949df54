//! Service Configuration
//!
//! Startup settings for the notes service. Every setting has a built-in
//! default; environment variables override the defaults and command-line
//! flags override both.
//!
//! | Setting          | Env                 | Flag                   |
//! |------------------|---------------------|------------------------|
//! | listen address   | `NOTES_BIND`        | `--bind <addr:port>`   |
//! | database node    | `SCYLLA_URI`        | `--scylla <host:port>` |
//! | keyspace         | `NOTES_KEYSPACE`    | `--keyspace <name>`    |
//! | schema bootstrap | `NOTES_INIT_SCHEMA` (`1` or `true`) | `--init-schema` |
//! | backend          | `NOTES_BACKEND`     | `--memory`             |

use anyhow::{Context, Result, anyhow, bail};
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SCYLLA_URI: &str = "localhost:9042";
pub const DEFAULT_KEYSPACE: &str = "notes_api";

/// Which `NoteStore` implementation the service runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Scylla,
    Memory,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "scylla" => Ok(Backend::Scylla),
            "memory" => Ok(Backend::Memory),
            other => Err(anyhow!("Unknown backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub scylla_uri: String,
    pub keyspace: String,
    pub init_schema: bool,
    pub backend: Backend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            scylla_uri: DEFAULT_SCYLLA_URI.to_string(),
            keyspace: DEFAULT_KEYSPACE.to_string(),
            init_schema: false,
            backend: Backend::Scylla,
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment and arguments.
    pub fn load() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_sources(|key| std::env::var(key).ok(), &args)
    }

    /// Builds a configuration from an environment lookup and a list of
    /// arguments (without the program name).
    pub fn from_sources<F>(env: F, args: &[String]) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(bind) = env("NOTES_BIND") {
            config.bind_addr = bind
                .parse()
                .with_context(|| format!("Invalid NOTES_BIND: {}", bind))?;
        }
        if let Some(uri) = env("SCYLLA_URI") {
            config.scylla_uri = uri;
        }
        if let Some(keyspace) = env("NOTES_KEYSPACE") {
            config.keyspace = keyspace;
        }
        if let Some(flag) = env("NOTES_INIT_SCHEMA") {
            config.init_schema = matches!(flag.to_ascii_lowercase().as_str(), "1" | "true");
        }
        if let Some(backend) = env("NOTES_BACKEND") {
            config.backend = backend.parse()?;
        }

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = flag_value(args, i)?;
                    config.bind_addr = value
                        .parse()
                        .with_context(|| format!("Invalid --bind: {}", value))?;
                    i += 2;
                }
                "--scylla" => {
                    config.scylla_uri = flag_value(args, i)?.to_string();
                    i += 2;
                }
                "--keyspace" => {
                    config.keyspace = flag_value(args, i)?.to_string();
                    i += 2;
                }
                "--init-schema" => {
                    config.init_schema = true;
                    i += 1;
                }
                "--memory" => {
                    config.backend = Backend::Memory;
                    i += 1;
                }
                other => bail!("Unknown argument: {}", other),
            }
        }

        validate_keyspace(&config.keyspace)?;
        Ok(config)
    }
}

fn flag_value(args: &[String], i: usize) -> Result<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires a value", args[i]))
}

/// Keyspace names end up inside CQL statement text, so only plain identifiers
/// are accepted.
pub fn validate_keyspace(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 48
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        bail!("Invalid keyspace name: {:?}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_match_fixed_literals() {
        let config = Config::from_sources(no_env, &[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.scylla_uri, "localhost:9042");
        assert_eq!(config.keyspace, "notes_api");
        assert!(!config.init_schema);
        assert_eq!(config.backend, Backend::Scylla);
    }

    #[test]
    fn test_env_overrides_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("NOTES_BIND", "127.0.0.1:4000"),
            ("SCYLLA_URI", "db:9042"),
            ("NOTES_KEYSPACE", "scratch"),
            ("NOTES_INIT_SCHEMA", "true"),
            ("NOTES_BACKEND", "Memory"),
        ]);
        let config = Config::from_sources(|k| env.get(k).map(|v| v.to_string()), &[]).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:4000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.scylla_uri, "db:9042");
        assert_eq!(config.keyspace, "scratch");
        assert!(config.init_schema);
        assert_eq!(config.backend, Backend::Memory);
    }

    #[test]
    fn test_flags_override_env() {
        let env = |k: &str| (k == "SCYLLA_URI").then(|| "env-host:9042".to_string());
        let config = Config::from_sources(
            env,
            &args(&["--scylla", "flag-host:9042", "--bind", "127.0.0.1:3001", "--memory"]),
        )
        .unwrap();

        assert_eq!(config.scylla_uri, "flag-host:9042");
        assert_eq!(config.bind_addr.port(), 3001);
        assert_eq!(config.backend, Backend::Memory);
    }

    #[test]
    fn test_init_schema_env_accepts_only_one_or_true() {
        let with = |value: &'static str| {
            move |k: &str| (k == "NOTES_INIT_SCHEMA").then(|| value.to_string())
        };

        assert!(Config::from_sources(with("1"), &[]).unwrap().init_schema);
        assert!(Config::from_sources(with("TRUE"), &[]).unwrap().init_schema);
        assert!(!Config::from_sources(with("yes"), &[]).unwrap().init_schema);
        assert!(!Config::from_sources(with("0"), &[]).unwrap().init_schema);
    }

    #[test]
    fn test_missing_flag_value_is_an_error() {
        let err = Config::from_sources(no_env, &args(&["--bind"])).unwrap_err();
        assert!(err.to_string().contains("--bind requires a value"));
    }

    #[test]
    fn test_unknown_argument_is_an_error() {
        assert!(Config::from_sources(no_env, &args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_invalid_bind_address_is_an_error() {
        assert!(Config::from_sources(no_env, &args(&["--bind", "not-an-addr"])).is_err());
    }

    #[test]
    fn test_keyspace_validation() {
        assert!(validate_keyspace("notes_api").is_ok());
        assert!(validate_keyspace("Notes2").is_ok());
        assert!(validate_keyspace("").is_err());
        assert!(validate_keyspace("1notes").is_err());
        assert!(validate_keyspace("notes; DROP TABLE x").is_err());
        assert!(validate_keyspace(&"k".repeat(49)).is_err());
    }
}
