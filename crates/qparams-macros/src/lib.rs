//! Proc macros for qparams.
//!
//! # Available Macros
//!
//! - [`QueryRecord`] - Generate the field descriptor table that drives
//!   query parameter decoding
//!
//! The derive replaces runtime reflection: the field table is built at
//! compile time and the decoder dispatches on field indices.
//!
//! For working examples, see `qparams/tests/decode.rs`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `qparams::QueryRecord` for a struct with named fields.
///
/// Every field whose type implements `qparams::FieldValue` becomes a
/// decodable parameter: `String`, `i32`, `i64`, `f32`, `f64`,
/// `qparams::Slice`, `qparams::Map`, or `Option` of any of them.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[qparams("...")]` | Annotation string of space-separated `option:value` pairs |
/// | `#[qparams(skip)]` | Exclude this field from decoding |
///
/// Recognized options inside the annotation string:
///
/// | Option | Description |
/// |--------|-------------|
/// | `name:<param>` | Parameter name (default: lower-cased field name) |
/// | `sep:<sep>` | List/filter separator (default `,`) |
/// | `ops:<op>,<op>,...` | Filter operators for `Map` fields, in priority order |
///
/// # Example
///
/// ```ignore
/// use qparams::{Map, QueryRecord, Slice};
///
/// #[derive(Default, QueryRecord)]
/// struct ListOrders {
///     #[qparams("sep:|")]
///     embed: Slice,
///
///     #[qparams("ops:>,==,<=,<,!=,-like-")]
///     filter: Map,
///
///     #[qparams("name:per_page")]
///     limit: Option<i64>,
///
///     #[qparams(skip)]
///     cache_key: u64,
/// }
/// ```
#[proc_macro_derive(QueryRecord, attributes(qparams))]
pub fn query_record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::query_record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
