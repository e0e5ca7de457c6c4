//! Field annotation options.
//!
//! A field annotation is a space-separated list of `option:value` pairs,
//! for example `name:filter sep:| ops:>,==,<=,<,!=,-like-`. Recognized
//! options are `name`, `sep` and `ops`; anything else is ignored.

use crate::config::DecodeConfig;

/// Returns the value of `option` in the annotation `tag`.
///
/// Tokens that are not exactly one `option:value` pair (no colon, or more
/// than one) are ignored. An empty value counts as unset. The first
/// matching token wins.
///
/// ```
/// use qparams::tag_value;
///
/// assert_eq!(tag_value("sep:| ops:>,<", "ops"), Some(">,<"));
/// assert_eq!(tag_value("sep:|", "name"), None);
/// assert_eq!(tag_value("", "sep"), None);
/// ```
pub fn tag_value<'a>(tag: &'a str, option: &str) -> Option<&'a str> {
    if tag.is_empty() {
        return None;
    }

    for token in tag.split(' ') {
        let mut parts = token.split(':');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        if key == option {
            return if value.is_empty() { None } else { Some(value) };
        }
    }

    None
}

/// Per-field options resolved against a [`DecodeConfig`].
#[derive(Debug, Clone, Copy)]
pub struct FieldOptions<'a> {
    tag: &'a str,
    config: &'a DecodeConfig,
}

impl<'a> FieldOptions<'a> {
    pub fn new(tag: &'a str, config: &'a DecodeConfig) -> Self {
        FieldOptions { tag, config }
    }

    /// Explicit parameter name override (`name:`).
    pub fn name(&self) -> Option<&'a str> {
        tag_value(self.tag, "name")
    }

    /// Separator for list and filter values (`sep:`), or the configured default.
    pub fn separator(&self) -> &'a str {
        tag_value(self.tag, "sep").unwrap_or_else(|| self.config.default_separator())
    }

    /// Operator vocabulary (`ops:`) in priority order.
    ///
    /// Empty entries are dropped; an absent option yields an empty vocabulary.
    pub fn operators(&self) -> Vec<&'a str> {
        match tag_value(self.tag, "ops") {
            Some(ops) => ops
                .split(self.config.default_ops_separator())
                .filter(|op| !op.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}
