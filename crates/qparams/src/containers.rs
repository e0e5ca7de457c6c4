//! Container field types.
//!
//! [`Slice`] holds an ordered list value (`?embed=user,order`), [`Map`] an
//! operator-keyed filter value (`?filter=age>7,name-like-Doe`).

use std::collections::hash_map;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{ConversionErrors, PartialConversion};

/// Ordered list of lower-cased, non-empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Slice(Vec<String>);

impl Slice {
    pub fn new() -> Self {
        Slice::default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Converts every member to `i64`.
    ///
    /// Members that fail to parse are left out of the result and reported
    /// in the error, which still carries the members that did convert.
    ///
    /// ```
    /// use qparams::Slice;
    ///
    /// let ids = Slice::from(vec!["1", "x", "3"]);
    /// let err = ids.to_int_slice().unwrap_err();
    /// assert_eq!(err.converted, vec![1, 3]);
    /// assert_eq!(err.errors.messages(), ["Could not convert member x to int"]);
    /// ```
    pub fn to_int_slice(&self) -> Result<Vec<i64>, PartialConversion<i64>> {
        self.convert_members("int")
    }

    /// Converts every member to `f64`, with the same partial-result contract
    /// as [`to_int_slice`](Self::to_int_slice).
    pub fn to_float_slice(&self) -> Result<Vec<f64>, PartialConversion<f64>> {
        self.convert_members("float")
    }

    fn convert_members<T: FromStr>(&self, type_name: &str) -> Result<Vec<T>, PartialConversion<T>> {
        let mut converted = Vec::with_capacity(self.0.len());
        let mut errors = ConversionErrors::new();

        for member in &self.0 {
            match member.parse::<T>() {
                Ok(v) => converted.push(v),
                Err(_) => errors.push(format!(
                    "Could not convert member {} to {}",
                    member, type_name
                )),
            }
        }

        if errors.is_empty() {
            Ok(converted)
        } else {
            Err(PartialConversion { converted, errors })
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for Slice {
    fn from(values: Vec<S>) -> Self {
        Slice(values.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for Slice {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Slice(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Slice {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Slice {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Splits a list value on `separator`.
///
/// Tokens are lower-cased and empty tokens are discarded, so leading,
/// trailing and doubled separators disappear.
///
/// ```
/// use qparams::split_list;
///
/// assert_eq!(split_list(",User,,Order,", ",").as_slice(), ["user", "order"]);
/// ```
pub fn split_list(value: &str, separator: &str) -> Slice {
    value
        .split(separator)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Map from `"<field> <operator>"` to a raw operand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Map(HashMap<String, String>);

impl Map {
    pub fn new() -> Self {
        Map::default()
    }

    /// Looks up the operand for `field` and `op`.
    ///
    /// `field` is matched against the lower-cased key, so pass it lower-cased.
    pub fn get(&self, field: &str, op: &str) -> Option<&str> {
        self.get_key(&format!("{} {}", field, op))
    }

    /// Looks up a composite key directly.
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets an entry, replacing any previous operand.
    pub fn insert(&mut self, key: impl Into<String>, operand: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), operand.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Iterates entries as `(field, operator, operand)`.
    ///
    /// The composite key is split at its last space. Order is unspecified.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.0.iter().map(|(key, operand)| {
            let (field, op) = key.rsplit_once(' ').unwrap_or((key.as_str(), ""));
            (field, op, operand.as_str())
        })
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for Map {
    fn from(map: HashMap<String, String>) -> Self {
        Map(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
