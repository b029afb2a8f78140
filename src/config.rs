use serde::{Deserialize, Serialize};

use crate::error::NestedSetError;

/// Static configuration describing how a table encodes its nested-set
/// hierarchy: the id, left, right and level column names.
///
/// The forest scope column ("root id") is supplied per call instead, because
/// one configuration is commonly shared across tables that only differ in how
/// they partition their trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNestedSetConfig", into = "RawNestedSetConfig")]
pub struct NestedSetConfig {
    id_column: String,
    left_column: String,
    right_column: String,
    level_column: String,
}

impl NestedSetConfig {
    /// Create a validated configuration from the four column names.
    ///
    /// Fails when a name is empty or used for more than one role, since
    /// either would make every generated column reference ambiguous.
    pub fn new(
        id_column: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
        level_column: impl Into<String>,
    ) -> Result<Self, NestedSetError> {
        let config = Self {
            id_column: id_column.into(),
            left_column: left_column.into(),
            right_column: right_column.into(),
            level_column: level_column.into(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), NestedSetError> {
        let columns = [
            ("id", self.id_column.as_str()),
            ("left", self.left_column.as_str()),
            ("right", self.right_column.as_str()),
            ("level", self.level_column.as_str()),
        ];

        for (role, name) in &columns {
            if name.is_empty() {
                return Err(NestedSetError::config(format!(
                    "{role} column name is empty"
                )));
            }
        }

        for (index, (_, name)) in columns.iter().enumerate() {
            if columns[index + 1..].iter().any(|(_, other)| other == name) {
                return Err(NestedSetError::config(format!(
                    "column name `{name}` is used for more than one role"
                )));
            }
        }

        Ok(())
    }

    /// Column holding the node id.
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Column holding the left interval edge.
    pub fn left_column(&self) -> &str {
        &self.left_column
    }

    /// Column holding the right interval edge.
    pub fn right_column(&self) -> &str {
        &self.right_column
    }

    /// Column holding the depth from the tree root.
    pub fn level_column(&self) -> &str {
        &self.level_column
    }
}

/// Serde-facing shape; deserialization funnels through [`NestedSetConfig::new`]
/// so invalid column sets cannot enter via configuration files.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawNestedSetConfig {
    id: String,
    left: String,
    right: String,
    level: String,
}

impl TryFrom<RawNestedSetConfig> for NestedSetConfig {
    type Error = NestedSetError;

    fn try_from(raw: RawNestedSetConfig) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.left, raw.right, raw.level)
    }
}

impl From<NestedSetConfig> for RawNestedSetConfig {
    fn from(config: NestedSetConfig) -> Self {
        Self {
            id: config.id_column,
            left: config.left_column,
            right: config.right_column,
            level: config.level_column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_distinct_column_names() {
        let config = NestedSetConfig::new("id", "lft", "rgt", "depth").unwrap();
        assert_eq!(config.id_column(), "id");
        assert_eq!(config.left_column(), "lft");
        assert_eq!(config.right_column(), "rgt");
        assert_eq!(config.level_column(), "depth");
    }

    #[test]
    fn rejects_empty_column_names() {
        let err = NestedSetConfig::new("id", "", "rgt", "depth").unwrap_err();
        assert!(matches!(err, NestedSetError::Config(_)));
        assert!(err.to_string().contains("left column name is empty"));
    }

    #[test]
    fn rejects_duplicate_column_names() {
        let err = NestedSetConfig::new("id", "lft", "lft", "depth").unwrap_err();
        assert!(matches!(err, NestedSetError::Config(_)));
        assert!(err.to_string().contains("`lft`"));
    }

    #[test]
    fn deserializes_from_configuration_data() {
        let config: NestedSetConfig =
            serde_json::from_str(r#"{"id":"id","left":"lft","right":"rgt","level":"depth"}"#)
                .unwrap();
        assert_eq!(config.left_column(), "lft");
    }

    #[test]
    fn deserialization_applies_validation() {
        let result = serde_json::from_str::<NestedSetConfig>(
            r#"{"id":"id","left":"id","right":"rgt","level":"depth"}"#,
        );
        assert!(result.is_err());
    }
}
