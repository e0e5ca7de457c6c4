//! Filter expression tokenizer.
//!
//! A filter value such as `age>7,gender==0,balance<=1000` is split on the
//! field separator into segments, and each segment is split at the first
//! operator of the vocabulary that occurs in it:
//!
//! ```text
//! segment   = field-token operator operand
//! key       = lowercase(trim(field-token)) " " operator
//! ```
//!
//! The vocabulary is scanned in the order given, and the first operator
//! found anywhere in the segment wins. Multi-character operators must be
//! listed before their single-character prefixes (`<=` before `<`) or the
//! shorter one will split the segment first.

use crate::containers::Map;

/// One `(field, operator, operand)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter<'a> {
    /// Field token as written, trimmed but not lower-cased.
    pub field: &'a str,
    pub op: &'a str,
    /// Operand, verbatim.
    pub operand: &'a str,
}

impl Filter<'_> {
    /// Composite map key: `"<lowercased field> <op>"`.
    pub fn key(&self) -> String {
        format!("{} {}", self.field.to_lowercase(), self.op)
    }
}

/// A non-empty segment of a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Filter(Filter<'a>),
    /// No operator of the vocabulary occurs in this segment.
    Unmatched(&'a str),
}

/// Iterator over the segments of a filter value.
///
/// Created by [`segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a, 'o> {
    parts: std::str::Split<'a, &'o str>,
    operators: &'o [&'o str],
}

impl<'a> Iterator for Segments<'a, '_> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let part = self.parts.next()?;
            if part.is_empty() {
                continue;
            }
            return Some(split_segment(part, self.operators));
        }
    }
}

/// Splits `value` on `separator` and classifies each non-empty segment.
pub fn segments<'a, 'o>(
    value: &'a str,
    separator: &'o str,
    operators: &'o [&'o str],
) -> Segments<'a, 'o> {
    Segments {
        parts: value.split(separator),
        operators,
    }
}

fn split_segment<'a>(segment: &'a str, operators: &[&str]) -> Segment<'a> {
    for op in operators {
        if op.is_empty() {
            continue;
        }
        if let Some(pos) = segment.find(op) {
            let end = pos + op.len();
            return Segment::Filter(Filter {
                field: segment[..pos].trim(),
                op: &segment[pos..end],
                operand: &segment[end..],
            });
        }
    }
    Segment::Unmatched(segment)
}

/// Parses a filter value into an operator-keyed [`Map`].
///
/// Segments without a known operator are dropped. A later segment with the
/// same field and operator overwrites an earlier one.
///
/// ```
/// use qparams::walk;
///
/// let map = walk("Age>7,lastname-like-Doe", ",", &[">", "-like-"]);
/// assert_eq!(map.get("age", ">"), Some("7"));
/// assert_eq!(map.get("lastname", "-like-"), Some("Doe"));
/// ```
pub fn walk(value: &str, separator: &str, operators: &[&str]) -> Map {
    let mut map = Map::new();
    for segment in segments(value, separator, operators) {
        if let Segment::Filter(filter) = segment {
            map.insert(filter.key(), filter.operand);
        }
    }
    map
}
