//! Decoder configuration.
//!
//! [`DecodeConfig`] carries the defaults that apply when a field annotation
//! does not override them. It is threaded explicitly into every decode
//! call, so independent decoders never share mutable state.

use serde::{Deserialize, Serialize};

/// Separator used when a field does not declare `sep:`.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Separator between entries of an `ops:` vocabulary.
pub const DEFAULT_OPS_SEPARATOR: &str = ",";

/// What to do with a filter segment that contains none of the configured
/// operators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedFilters {
    /// Drop the segment without an error.
    #[default]
    Skip,
    /// Drop the segment and record a message in the error set.
    Report,
}

/// Configuration for a [`Decoder`](crate::Decoder) or [`Registry`](crate::Registry).
///
/// # Example
///
/// ```
/// use qparams::{DecodeConfig, UnmatchedFilters};
///
/// let config = DecodeConfig::new()
///     .separator("|")
///     .unmatched_filters(UnmatchedFilters::Report);
///
/// assert_eq!(config.default_separator(), "|");
/// assert_eq!(config.default_ops_separator(), ",");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    separator: String,
    ops_separator: String,
    unmatched_filters: UnmatchedFilters,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig {
            separator: DEFAULT_SEPARATOR.to_string(),
            ops_separator: DEFAULT_OPS_SEPARATOR.to_string(),
            unmatched_filters: UnmatchedFilters::Skip,
        }
    }
}

impl DecodeConfig {
    pub fn new() -> Self {
        DecodeConfig::default()
    }

    /// Sets the default list/filter separator.
    ///
    /// An empty string is ignored and keeps the previous value.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.separator = separator;
        }
        self
    }

    /// Sets the separator used to split an `ops:` vocabulary.
    ///
    /// An empty string is ignored and keeps the previous value.
    pub fn ops_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.ops_separator = separator;
        }
        self
    }

    pub fn unmatched_filters(mut self, policy: UnmatchedFilters) -> Self {
        self.unmatched_filters = policy;
        self
    }

    pub fn default_separator(&self) -> &str {
        if self.separator.is_empty() {
            DEFAULT_SEPARATOR
        } else {
            &self.separator
        }
    }

    pub fn default_ops_separator(&self) -> &str {
        if self.ops_separator.is_empty() {
            DEFAULT_OPS_SEPARATOR
        } else {
            &self.ops_separator
        }
    }

    pub fn unmatched_filter_policy(&self) -> UnmatchedFilters {
        self.unmatched_filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DecodeConfig::default();
        assert_eq!(config.default_separator(), ",");
        assert_eq!(config.default_ops_separator(), ",");
        assert_eq!(config.unmatched_filter_policy(), UnmatchedFilters::Skip);
    }

    #[test]
    fn empty_separator_is_ignored() {
        let config = DecodeConfig::new().separator("").ops_separator("");
        assert_eq!(config.default_separator(), ",");
        assert_eq!(config.default_ops_separator(), ",");
    }

    #[test]
    fn deserializes_partial_config() {
        let config: DecodeConfig =
            serde_json::from_str(r#"{"separator": ";", "unmatched_filters": "report"}"#).unwrap();

        assert_eq!(config.default_separator(), ";");
        assert_eq!(config.default_ops_separator(), ",");
        assert_eq!(config.unmatched_filter_policy(), UnmatchedFilters::Report);
    }

    #[test]
    fn empty_separator_in_file_falls_back() {
        let config: DecodeConfig = serde_json::from_str(r#"{"separator": ""}"#).unwrap();
        assert_eq!(config.default_separator(), ",");
    }
}
