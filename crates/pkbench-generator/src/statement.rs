//! Parameterized statement model and SQL dialects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameter name for the key (literal key or fingerprint input).
pub const PARAM_KEY: &str = "key";
/// Parameter name for the first name column.
pub const PARAM_FIRST_NAME: &str = "firstName";
/// Parameter name for the last name column.
pub const PARAM_LAST_NAME: &str = "lastName";

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int64(i64),
    String(String),
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int64(value)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int64(v) => write!(f, "{v}"),
            ParamValue::String(s) => write!(f, "'{s}'"),
        }
    }
}

/// A SQL template plus its named parameters.
///
/// Parameters keep insertion order; for [`SqlDialect::PostgreSql`] the
/// placeholder `$n` refers to the n-th parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    sql: String,
    params: Vec<(String, ParamValue)>,
}

impl Statement {
    /// Create a statement with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append a named parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// The SQL template.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in binding order.
    pub fn params(&self) -> &[(String, ParamValue)] {
        &self.params
    }

    /// Look up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Parameter names in binding order.
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|(n, _)| n.as_str()).collect()
    }
}

/// SQL dialect the statements are rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlDialect {
    /// Spanner GoogleSQL: `@name` placeholders, `FARM_FINGERPRINT`.
    #[default]
    GoogleSql,
    /// Spanner PostgreSQL interface: `$n` placeholders, `spanner.farm_fingerprint`.
    PostgreSql,
}

impl SqlDialect {
    /// Placeholder for the parameter `name` bound at 1-based `position`.
    pub fn placeholder(&self, name: &str, position: usize) -> String {
        match self {
            SqlDialect::GoogleSql => format!("@{name}"),
            SqlDialect::PostgreSql => format!("${position}"),
        }
    }

    /// Database-side 64-bit fingerprint of `expr`.
    pub fn fingerprint(&self, expr: &str) -> String {
        match self {
            SqlDialect::GoogleSql => format!("FARM_FINGERPRINT({expr})"),
            SqlDialect::PostgreSql => format!("spanner.farm_fingerprint({expr})"),
        }
    }

    /// String concatenation of two expressions.
    ///
    /// PostgreSQL cannot infer parameter types through the variadic
    /// `concat`, so both sides are cast to `varchar` there.
    pub fn concat(&self, left: &str, right: &str) -> String {
        match self {
            SqlDialect::GoogleSql => format!("CONCAT({left}, {right})"),
            SqlDialect::PostgreSql => format!("concat({left}::varchar, {right}::varchar)"),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::GoogleSql => write!(f, "googlesql"),
            SqlDialect::PostgreSql => write!(f, "postgresql"),
        }
    }
}

/// Target table: an integer primary key column plus two string columns.
///
/// The table must already exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    pub table: String,
    pub key_column: String,
    pub first_name_column: String,
    pub last_name_column: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            table: "Singers".to_string(),
            key_column: "SingerId".to_string(),
            first_name_column: "FirstName".to_string(),
            last_name_column: "LastName".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_keep_order() {
        let stmt = Statement::new("SELECT 1")
            .with_param("b", 2)
            .with_param("a", "x");

        assert_eq!(stmt.param_names(), vec!["b", "a"]);
        assert_eq!(stmt.param("a"), Some(&ParamValue::String("x".to_string())));
        assert_eq!(stmt.param("c"), None);
    }

    #[test]
    fn test_dialect_rendering() {
        assert_eq!(SqlDialect::GoogleSql.placeholder("key", 1), "@key");
        assert_eq!(SqlDialect::PostgreSql.placeholder("key", 3), "$3");
        assert_eq!(
            SqlDialect::GoogleSql.fingerprint(&SqlDialect::GoogleSql.concat("@a", "@b")),
            "FARM_FINGERPRINT(CONCAT(@a, @b))"
        );
        assert_eq!(
            SqlDialect::PostgreSql.concat("$1", "$2"),
            "concat($1::varchar, $2::varchar)"
        );
        assert_eq!(
            SqlDialect::PostgreSql.fingerprint("$1"),
            "spanner.farm_fingerprint($1)"
        );
    }

    #[test]
    fn test_default_layout() {
        let layout = TableLayout::default();
        assert_eq!(layout.table, "Singers");
        assert_eq!(layout.key_column, "SingerId");
    }
}
