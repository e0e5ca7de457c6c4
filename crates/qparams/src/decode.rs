//! The decode engine.
//!
//! One pass over the destination's field table. For each field:
//!
//! 1. find every raw value whose parameter name matches, ignoring case;
//! 2. container fields: trim boundary separators off each value, join them
//!    into one composite value and initialize the container;
//! 3. skip the field if the effective value is empty;
//! 4. dispatch on the field kind: filter tokenizer, list splitter, or one of
//!    the scalar coercers.
//!
//! Scalar coercion failures are collected and returned together after the
//! pass; they never stop the remaining fields from being decoded.

use tracing::{debug, trace};

use crate::coerce;
use crate::config::{DecodeConfig, UnmatchedFilters};
use crate::containers::{split_list, Map};
use crate::error::{ConversionErrors, Result};
use crate::filter::{segments, Segment};
use crate::params::QueryParams;
use crate::record::{Decoded, FieldKind, QueryRecord};
use crate::schema::{FieldSpec, Schema};

/// Values of a map field are always joined with this separator.
const MAP_JOIN: &str = ",";

/// Decodes query parameters into [`QueryRecord`] types.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "derive")] {
/// use qparams::{Decoder, DecodeConfig, Map, QueryParams, Slice};
///
/// #[derive(Debug, Default, qparams::QueryRecord)]
/// struct Search {
///     embed: Slice,
///     #[qparams("ops:>,==,<=,<,!=,-like-")]
///     filter: Map,
///     page: i32,
/// }
///
/// let params =
///     QueryParams::from_query_str("Embed=User,Order&filter=age>7,Lastname-like-Doe&page=2");
/// let mut search = Search::default();
/// Decoder::new(DecodeConfig::default()).decode(&mut search, &params).unwrap();
///
/// assert_eq!(search.embed.as_slice(), ["user", "order"]);
/// assert_eq!(search.filter.get("lastname", "-like-"), Some("Doe"));
/// assert_eq!(search.page, 2);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Self {
        Decoder { config }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Resolves the field table of `T` under this decoder's configuration.
    pub fn schema<T: QueryRecord>(&self) -> Schema {
        Schema::resolve::<T>(&self.config)
    }

    /// Decodes `params` into `dest`.
    ///
    /// Returns [`DecodeError::Conversion`](crate::DecodeError::Conversion)
    /// listing every scalar field that failed; all other fields are still
    /// written.
    ///
    /// Field annotations are resolved on every call. For a hot path, resolve
    /// once with [`schema`](Self::schema) and call
    /// [`decode_with`](Self::decode_with), or register the type with a
    /// [`Registry`](crate::Registry).
    pub fn decode<T: QueryRecord>(&self, dest: &mut T, params: &QueryParams) -> Result<()> {
        let schema = self.schema::<T>();
        self.decode_with(&schema, dest, params)
    }

    /// Decodes using an already resolved schema of `T`.
    pub fn decode_with<T: QueryRecord>(
        &self,
        schema: &Schema,
        dest: &mut T,
        params: &QueryParams,
    ) -> Result<()> {
        let mut errors = ConversionErrors::new();
        bind_fields(schema, dest, params, &self.config, &mut errors);
        errors.into_result()?;
        Ok(())
    }
}

/// Decodes `params` into `dest` with the default configuration.
///
/// Resolves `T`'s field annotations on each call, like [`Decoder::decode`].
pub fn decode<T: QueryRecord>(dest: &mut T, params: &QueryParams) -> Result<()> {
    Decoder::default().decode(dest, params)
}

pub(crate) fn bind_fields<T: QueryRecord>(
    schema: &Schema,
    dest: &mut T,
    params: &QueryParams,
    config: &DecodeConfig,
    errors: &mut ConversionErrors,
) {
    for (index, field) in schema.fields().iter().enumerate() {
        let Some(value) = effective_value(field, params) else {
            trace!(field = field.ident, param = %field.name, "no matching parameter");
            continue;
        };

        if field.kind.is_container() {
            dest.initialize(index);
        }

        if value.is_empty() {
            trace!(field = field.ident, "empty value, skipping");
            continue;
        }

        if let Some(decoded) = decode_field(field, &value, config, errors) {
            debug!(field = field.ident, kind = %field.kind, "decoded field");
            dest.assign(index, decoded);
        }
    }
}

/// The single composite value a field is decoded from.
///
/// Scalars take the first matching value. Containers trim boundary
/// separators (and commas) off every matching value and join them: with
/// `,` for maps, with the field separator for lists.
fn effective_value(field: &FieldSpec, params: &QueryParams) -> Option<String> {
    let mut values = params.matching(&field.name).peekable();
    values.peek()?;

    if !field.kind.is_container() {
        return values.next().map(str::to_string);
    }

    let separator = field.separator.as_str();
    let trimmed: Vec<&str> = values
        .map(|v| v.trim_matches(|c: char| c == ',' || separator.contains(c)))
        .collect();

    let join = if field.kind == FieldKind::Map {
        MAP_JOIN
    } else {
        separator
    };
    Some(trimmed.join(join))
}

fn decode_field(
    field: &FieldSpec,
    value: &str,
    config: &DecodeConfig,
    errors: &mut ConversionErrors,
) -> Option<Decoded> {
    let result = match field.kind {
        FieldKind::Map => return Some(Decoded::Map(decode_map(field, value, config, errors))),
        FieldKind::List => return Some(Decoded::List(split_list(value, &field.separator))),
        FieldKind::String => return Some(Decoded::String(coerce::parse_string(value))),
        FieldKind::Int => coerce::parse_int(field.ident, value).map(Decoded::Int),
        FieldKind::Int64 => coerce::parse_int64(field.ident, value).map(Decoded::Int64),
        FieldKind::Float32 => coerce::parse_float32(field.ident, value).map(Decoded::Float32),
        FieldKind::Float64 => coerce::parse_float64(field.ident, value).map(Decoded::Float64),
    };

    match result {
        Ok(decoded) => Some(decoded),
        Err(message) => {
            debug!(field = field.ident, %message, "conversion failed");
            errors.push(message);
            None
        }
    }
}

fn decode_map(
    field: &FieldSpec,
    value: &str,
    config: &DecodeConfig,
    errors: &mut ConversionErrors,
) -> Map {
    let operators = field.operator_refs();
    let mut map = Map::new();

    for segment in segments(value, &field.separator, &operators) {
        match segment {
            Segment::Filter(filter) => {
                map.insert(filter.key(), filter.operand);
            }
            Segment::Unmatched(segment) => {
                debug!(field = field.ident, segment, "no known operator, dropped");
                if config.unmatched_filter_policy() == UnmatchedFilters::Report {
                    errors.push(format!(
                        "Filter {} has no known operator in ({})",
                        field.ident, segment
                    ));
                }
            }
        }
    }

    map
}
