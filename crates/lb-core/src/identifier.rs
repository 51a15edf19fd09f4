use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

/// A namespaced identifier such as `luckbox:nonrandom/thunder`.
///
/// Ordering is lexicographic by namespace, then path. The registry relies on
/// this ordering to give outcomes a stable encounter order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    /// Namespace used when a string has no `namespace:` prefix.
    pub const DEFAULT_NAMESPACE: &'static str = "minecraft";

    /// Build an identifier from its parts, validating both.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> CoreResult<Self> {
        let namespace = namespace.into();
        let path = path.into();
        let input = format!("{namespace}:{path}");
        if namespace.is_empty() {
            return Err(invalid(&input, "empty namespace"));
        }
        if path.is_empty() {
            return Err(invalid(&input, "empty path"));
        }
        if let Some(c) = namespace.chars().find(|c| !is_namespace_char(*c)) {
            return Err(invalid(&input, &format!("'{c}' is not allowed in a namespace")));
        }
        if let Some(c) = path.chars().find(|c| !is_path_char(*c)) {
            return Err(invalid(&input, &format!("'{c}' is not allowed in a path")));
        }
        Ok(Self { namespace, path })
    }

    /// Parse `namespace:path`, or a bare `path` in the default namespace.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(Self::DEFAULT_NAMESPACE, s),
        }
    }

    /// The namespace part.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path part.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn invalid(input: &str, reason: &str) -> CoreError {
    CoreError::InvalidIdentifier {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
