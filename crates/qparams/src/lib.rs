//! qparams - Annotation-driven decoding of URL query parameters.
//!
//! qparams fills the fields of a plain struct from a query string such as
//! `?embed=User,Order&filter=age>7,gender==0&page=2`. Which parameter feeds
//! which field, how list values are split and which filter operators are
//! recognized is declared per field:
//!
//! - Scalars: `String`, `i32`, `i64`, `f32`, `f64` (and `Option` of each)
//! - Lists: [`Slice`], lower-cased tokens split on a separator
//! - Filters: [`Map`], `"<field> <operator>"` keys mapped to raw operands
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "derive")] {
//! use qparams::{Map, QueryParams, QueryRecord, Slice};
//!
//! #[derive(Debug, Default, QueryRecord)]
//! struct ListUsers {
//!     #[qparams("sep:|")]
//!     embed: Slice,
//!     #[qparams("ops:>,==,<=,<,!=,-like-")]
//!     filter: Map,
//!     #[qparams("name:per_page")]
//!     limit: i64,
//! }
//!
//! let params = QueryParams::from_query_str(
//!     "Embed=User|Order&filter=age>7,balance<=1000,Lastname-like-Doe&per_page=50",
//! );
//!
//! let mut opts = ListUsers::default();
//! qparams::decode(&mut opts, &params).unwrap();
//!
//! assert_eq!(opts.embed.as_slice(), ["user", "order"]);
//! assert_eq!(opts.filter.get("age", ">"), Some("7"));
//! assert_eq!(opts.filter.get("balance", "<="), Some("1000"));
//! assert_eq!(opts.filter.get("lastname", "-like-"), Some("Doe"));
//! assert_eq!(opts.limit, 50);
//! # }
//! ```
//!
//! # Annotations
//!
//! A field annotation is a space-separated list of `option:value` pairs:
//!
//! | Option | Meaning |
//! |--------|---------|
//! | `name:<param>` | Parameter name (default: the lower-cased field name) |
//! | `sep:<sep>` | Separator for list and filter values (default `,`) |
//! | `ops:<a>,<b>,...` | Filter operators, in priority order |
//!
//! Parameter names match ignoring case. Operators are tried in the order
//! listed and the first one found in a filter segment wins, so list `<=`
//! before `<`.
//!
//! # Errors
//!
//! Parameters that are missing or empty leave their field untouched. Only
//! scalar conversion failures are errors; they are collected over the
//! whole pass and returned together as [`DecodeError::Conversion`].

mod coerce;
mod config;
mod containers;
mod decode;
mod error;
mod filter;
mod options;
mod params;
mod record;
mod registry;
mod schema;

// Re-export public API
pub use coerce::{parse_float32, parse_float64, parse_int, parse_int64, parse_string};
pub use config::{DecodeConfig, UnmatchedFilters, DEFAULT_OPS_SEPARATOR, DEFAULT_SEPARATOR};
pub use containers::{split_list, Map, Slice};
pub use decode::{decode, Decoder};
pub use error::{ConversionErrors, DecodeError, PartialConversion, Result};
pub use filter::{segments, walk, Filter, Segment, Segments};
pub use options::{tag_value, FieldOptions};
pub use params::QueryParams;
pub use record::{Decoded, FieldKind, FieldValue, QueryRecord, RawField};
pub use registry::Registry;
pub use schema::{FieldSpec, Schema};

#[cfg(feature = "derive")]
pub use qparams_macros::QueryRecord;
