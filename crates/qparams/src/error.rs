//! Error types for the qparams crate.

use std::fmt;

use thiserror::Error;

/// Errors returned by a decode call.
///
/// Callers tell the two conditions apart by variant: a wrong destination
/// aborts before any field is touched, while conversion failures are
/// collected across the whole pass and reported together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The destination is not a registered query record.
    #[error("destination must be a query record type")]
    WrongDestType,

    /// One or more scalar fields could not be converted.
    #[error("{0}")]
    Conversion(#[from] ConversionErrors),
}

impl DecodeError {
    /// Returns the collected conversion messages, if this is a conversion error.
    pub fn conversion_errors(&self) -> Option<&ConversionErrors> {
        match self {
            DecodeError::Conversion(errs) => Some(errs),
            DecodeError::WrongDestType => None,
        }
    }
}

/// Ordered collection of human-readable conversion failure messages.
///
/// One message is recorded per failing field (or per failing member when
/// converting a [`Slice`](crate::Slice)).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionErrors(Vec<String>);

impl ConversionErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        ConversionErrors::default()
    }

    /// Appends a message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Converts into `Err` when at least one message was recorded.
    pub fn into_result(self) -> std::result::Result<(), ConversionErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConversionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.0 {
            writeln!(f, "{}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConversionErrors {}

impl<'a> IntoIterator for &'a ConversionErrors {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Best-effort result of a bulk member conversion.
///
/// `converted` holds every member that converted successfully, in order;
/// failing members are omitted rather than zero-filled.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialConversion<T> {
    pub converted: Vec<T>,
    pub errors: ConversionErrors,
}

impl<T> fmt::Display for PartialConversion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.errors, f)
    }
}

impl<T: fmt::Debug> std::error::Error for PartialConversion<T> {}

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
