use std::{env, error::Error, fmt, path::PathBuf};

/// Environment variable naming a JSON dataset file.
pub const DATASET_VAR: &str = "LINREG_DATASET";

/// Environment variable selecting the [`InvalidInputPolicy`].
pub const ON_INVALID_VAR: &str = "LINREG_ON_INVALID";

/// What the menu does when it reads a selection or number it cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidInputPolicy {
    /// Report the problem and show the menu again.
    #[default]
    Reprompt,
    /// End the session with a failure exit status.
    Exit,
}

/// Errors produced while reading the configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { var, value } => {
                write!(f, "invalid value for {var}: {value:?}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Runtime settings of the interactive program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Dataset file to load. `None` uses the built-in sample.
    pub dataset: Option<PathBuf>,
    pub on_invalid: InvalidInputPolicy,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if a variable is set to an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if a variable is set to an unknown value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dataset = lookup(DATASET_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let on_invalid = match lookup(ON_INVALID_VAR) {
            None => InvalidInputPolicy::default(),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "" | "reprompt" => InvalidInputPolicy::Reprompt,
                "exit" => InvalidInputPolicy::Exit,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: ON_INVALID_VAR,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            dataset,
            on_invalid,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.on_invalid, InvalidInputPolicy::Reprompt);
    }

    #[test]
    fn reads_dataset_and_policy() {
        let config =
            Config::from_lookup(lookup(&[(DATASET_VAR, "data.json"), (ON_INVALID_VAR, "EXIT")]))
                .unwrap();

        assert_eq!(config.dataset, Some(PathBuf::from("data.json")));
        assert_eq!(config.on_invalid, InvalidInputPolicy::Exit);
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = Config::from_lookup(lookup(&[(ON_INVALID_VAR, "retry")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: ON_INVALID_VAR,
                value: "retry".into()
            }
        );
    }
}
