use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Environment {
    /// Developer machine. Logs carry file, line and target.
    #[default]
    Local,
    Production,
}

pub const BALLOTBOX_ENVIRONMENT_VAR_NAME: &str = "BALLOTBOX_ENVIRONMENT";
pub const BALLOTBOX_PRETTY_PRINT_LOGS_VAR_NAME: &str = "BALLOTBOX_PRETTY_PRINT_LOGS";
pub const BALLOTBOX_IDENTITY_VAR_NAME: &str = "BALLOTBOX_IDENTITY";

pub fn get_ballotbox_environment() -> Environment {
    std::env::var(BALLOTBOX_ENVIRONMENT_VAR_NAME)
        .unwrap_or(Environment::default().to_string())
        .parse()
        .unwrap_or(Environment::default())
}

pub fn get_pretty_print_logs() -> bool {
    std::env::var(BALLOTBOX_PRETTY_PRINT_LOGS_VAR_NAME)
        .unwrap_or("false".to_string())
        .parse()
        .unwrap_or(false)
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(crate::Error::InvalidEnvironment(s.to_string())),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = crate::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Environment> for String {
    fn from(environment: Environment) -> Self {
        environment.to_string()
    }
}
