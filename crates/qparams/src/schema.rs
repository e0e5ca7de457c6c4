//! Resolved field tables.
//!
//! A [`Schema`] is the field table of a [`QueryRecord`] with every
//! annotation resolved against a [`DecodeConfig`]: effective parameter
//! name, separator and operator vocabulary.

use crate::config::DecodeConfig;
use crate::options::FieldOptions;
use crate::record::{FieldKind, QueryRecord, RawField};

/// One resolved destination field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field identifier as declared.
    pub ident: &'static str,
    /// Lower-cased parameter name (override or identifier).
    pub name: String,
    pub kind: FieldKind,
    pub separator: String,
    /// Operator vocabulary in priority order.
    pub operators: Vec<String>,
}

impl FieldSpec {
    pub fn resolve(field: &RawField, config: &DecodeConfig) -> Self {
        let options = FieldOptions::new(field.tag, config);
        let name = options.name().unwrap_or(field.ident).to_lowercase();

        FieldSpec {
            ident: field.ident,
            name,
            kind: field.kind,
            separator: options.separator().to_string(),
            operators: options.operators().into_iter().map(String::from).collect(),
        }
    }

    /// Operator vocabulary as borrowed slices.
    pub fn operator_refs(&self) -> Vec<&str> {
        self.operators.iter().map(String::as_str).collect()
    }
}

/// Resolved field table of a record type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Resolves the field table of `T`.
    pub fn resolve<T: QueryRecord>(config: &DecodeConfig) -> Self {
        Schema::from_fields(T::fields(), config)
    }

    pub fn from_fields(fields: &[RawField], config: &DecodeConfig) -> Self {
        Schema {
            fields: fields
                .iter()
                .map(|field| FieldSpec::resolve(field, config))
                .collect(),
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field by its parameter name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        let name = name.to_lowercase();
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
