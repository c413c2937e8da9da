//! Statement construction for one row.

use crate::clock::Clock;
use crate::counter::SequenceCounter;
use crate::entropy::EntropySource;
use crate::error::KeyGenError;
use crate::mode::Mode;
use crate::statement::{
    ParamValue, SqlDialect, Statement, TableLayout, PARAM_FIRST_NAME, PARAM_KEY, PARAM_LAST_NAME,
};
use crate::strategies::KeyMaterial;

/// Length of the generated first and last names.
pub const NAME_LENGTH: usize = 10;

/// Column values of one inserted row (the key is derived separately).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub first_name: String,
    pub last_name: String,
}

impl Row {
    /// Create a row from explicit names.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Create a row with random names of [`NAME_LENGTH`] characters.
    pub fn random<S: EntropySource + ?Sized>(entropy: &mut S) -> Self {
        Self {
            first_name: entropy.random_string(NAME_LENGTH),
            last_name: entropy.random_string(NAME_LENGTH),
        }
    }
}

/// Builds INSERT statements for the strategy bound to one [`Mode`].
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    mode: Mode,
    table: TableLayout,
    dialect: SqlDialect,
}

impl StatementBuilder {
    /// Create a builder for `mode` targeting `table` in `dialect`.
    pub fn new(mode: Mode, table: TableLayout, dialect: SqlDialect) -> Self {
        Self {
            mode,
            table,
            dialect,
        }
    }

    /// The mode this builder derives keys with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The dialect statements are rendered in.
    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Derive the key for the current counter value and build the INSERT.
    ///
    /// No statement is produced when key derivation fails.
    pub fn build<S, C>(
        &self,
        row: &Row,
        counter: &SequenceCounter,
        entropy: &mut S,
        clock: &C,
    ) -> Result<Statement, KeyGenError>
    where
        S: EntropySource + ?Sized,
        C: Clock + ?Sized,
    {
        let key = self.mode.derive_key(counter, entropy, clock)?;
        Ok(self.insert_statement(row, key))
    }

    /// Render the INSERT for already-derived key material.
    pub fn insert_statement(&self, row: &Row, key: KeyMaterial) -> Statement {
        let mut params: Vec<(&str, ParamValue)> = Vec::with_capacity(3);
        match &key {
            KeyMaterial::Literal(value) => params.push((PARAM_KEY, ParamValue::Int64(*value))),
            KeyMaterial::FingerprintOf(input) => {
                params.push((PARAM_KEY, ParamValue::String(input.clone())))
            }
            KeyMaterial::FingerprintOfNames => {}
        }
        params.push((PARAM_FIRST_NAME, ParamValue::String(row.first_name.clone())));
        params.push((PARAM_LAST_NAME, ParamValue::String(row.last_name.clone())));

        let placeholder = |name: &str| {
            let position = params
                .iter()
                .position(|(n, _)| *n == name)
                .map_or(0, |p| p + 1);
            self.dialect.placeholder(name, position)
        };

        let first_name = placeholder(PARAM_FIRST_NAME);
        let last_name = placeholder(PARAM_LAST_NAME);
        let key_expr = match &key {
            KeyMaterial::Literal(_) => placeholder(PARAM_KEY),
            KeyMaterial::FingerprintOf(_) => self.dialect.fingerprint(&placeholder(PARAM_KEY)),
            KeyMaterial::FingerprintOfNames => self
                .dialect
                .fingerprint(&self.dialect.concat(&first_name, &last_name)),
        };

        let sql = format!(
            "INSERT INTO {} ({}, {}, {}) VALUES ({}, {}, {})",
            self.table.table,
            self.table.key_column,
            self.table.first_name_column,
            self.table.last_name_column,
            key_expr,
            first_name,
            last_name
        );

        params
            .into_iter()
            .fold(Statement::new(sql), |stmt, (name, value)| {
                stmt.with_param(name, value)
            })
    }

    /// Statement deleting every row whose key is not the zero sentinel.
    pub fn delete_all(&self) -> Statement {
        Statement::new(format!(
            "DELETE FROM {} WHERE {} <> 0",
            self.table.table, self.table.key_column
        ))
    }
}
