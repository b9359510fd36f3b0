//! Generated keys configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{KeysError, QueryType};

/// Version of the Firebird server a statement is prepared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServerVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl ServerVersion {
    /// Creates a new server version.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for ServerVersion {
    fn default() -> Self {
        Self::new(5, 0)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ServerVersion {
    type Err = KeysError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KeysError::InvalidServerVersion(s.to_string());
        let (major, minor) = s.trim().split_once('.').unwrap_or((s.trim(), "0"));
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

/// How generated keys requests are handled, as configured by the
/// `generated keys` connection property.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedKeysMode {
    /// Every query type the server supports.
    #[default]
    Default,
    /// Requests for generated keys fail.
    Disabled,
    /// Requests for generated keys are silently ignored.
    Ignored,
    /// Only the listed query types; the others are ignored.
    QueryTypes(BTreeSet<QueryType>),
}

impl GeneratedKeysMode {
    /// Parses a configuration value: empty or `default`, `disabled`,
    /// `ignored`, or a comma separated list of query types.
    ///
    /// Matching is case-insensitive and unknown query type names are
    /// skipped.
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "" | "default" => Self::Default,
            "disabled" => Self::Disabled,
            "ignored" => Self::Ignored,
            list => Self::QueryTypes(
                list.split(',')
                    .map(str::trim)
                    .filter_map(|name| QueryType::SUPPORTED.into_iter().find(|t| t.matches(name)))
                    .collect(),
            ),
        }
    }
}

impl FromStr for GeneratedKeysMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_config(s))
    }
}

impl fmt::Display for GeneratedKeysMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Disabled => f.write_str("disabled"),
            Self::Ignored => f.write_str("ignored"),
            Self::QueryTypes(types) => {
                let names: Vec<_> = types.iter().map(|t| t.config_name()).collect();
                f.write_str(&names.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_version_from_str() {
        assert_eq!("4.0".parse::<ServerVersion>().unwrap(), ServerVersion::new(4, 0));
        assert_eq!("2.5".parse::<ServerVersion>().unwrap(), ServerVersion::new(2, 5));
        assert_eq!(" 3 ".parse::<ServerVersion>().unwrap(), ServerVersion::new(3, 0));
        assert_eq!(
            "five".parse::<ServerVersion>().unwrap_err(),
            KeysError::InvalidServerVersion("five".to_string())
        );
        assert!("4.x".parse::<ServerVersion>().is_err());
    }

    #[test]
    fn test_mode_keywords() {
        assert_eq!(GeneratedKeysMode::from_config(""), GeneratedKeysMode::Default);
        assert_eq!(GeneratedKeysMode::from_config("DEFAULT"), GeneratedKeysMode::Default);
        assert_eq!(GeneratedKeysMode::from_config("Disabled"), GeneratedKeysMode::Disabled);
        assert_eq!(GeneratedKeysMode::from_config("ignored"), GeneratedKeysMode::Ignored);
    }

    #[test]
    fn test_mode_query_type_list() {
        assert_eq!(
            GeneratedKeysMode::from_config("insert, UPDATE_OR_INSERT,bogus"),
            GeneratedKeysMode::QueryTypes(BTreeSet::from([
                QueryType::Insert,
                QueryType::UpdateOrInsert
            ]))
        );
        assert_eq!(
            GeneratedKeysMode::from_config("unsupported"),
            GeneratedKeysMode::QueryTypes(BTreeSet::new())
        );
    }

    #[test]
    fn test_mode_display() {
        let mode = GeneratedKeysMode::from_config("merge,insert");
        assert_eq!(mode.to_string(), "insert,merge");
        assert_eq!(GeneratedKeysMode::Ignored.to_string(), "ignored");
    }
}
