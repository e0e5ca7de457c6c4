//! Traits for derive macro support.
//!
//! A destination struct is described by a static table of [`RawField`]s
//! and writes decoded values through [`QueryRecord::assign`]. The table is
//! normally generated by `#[derive(QueryRecord)]`, but can be written by
//! hand.

use std::fmt;

use crate::containers::{Map, Slice};

/// Semantic type of a destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Int,
    Int64,
    Float32,
    Float64,
    List,
    Map,
}

impl FieldKind {
    /// Returns `true` for list and map fields.
    pub fn is_container(self) -> bool {
        matches!(self, FieldKind::List | FieldKind::Map)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Int64 => "int64",
            FieldKind::Float32 => "float32",
            FieldKind::Float64 => "float64",
            FieldKind::List => "list",
            FieldKind::Map => "map",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A decoded field value, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    String(String),
    Int(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    List(Slice),
    Map(Map),
}

impl Decoded {
    pub fn kind(&self) -> FieldKind {
        match self {
            Decoded::String(_) => FieldKind::String,
            Decoded::Int(_) => FieldKind::Int,
            Decoded::Int64(_) => FieldKind::Int64,
            Decoded::Float32(_) => FieldKind::Float32,
            Decoded::Float64(_) => FieldKind::Float64,
            Decoded::List(_) => FieldKind::List,
            Decoded::Map(_) => FieldKind::Map,
        }
    }
}

/// A type that can be the target of a single query parameter.
///
/// Implemented for `String`, `i32`, `i64`, `f32`, `f64`, [`Slice`], [`Map`]
/// and `Option` of each of them.
pub trait FieldValue {
    /// The kind of value the engine produces for this field.
    const KIND: FieldKind;

    /// Stores a decoded value. Values of another kind are ignored.
    fn assign(&mut self, value: Decoded);

    /// Puts a container field into its empty, initialized state.
    ///
    /// Called for matched container fields before their value is inspected.
    /// A no-op for types without an uninitialized state.
    fn initialize(&mut self) {}
}

macro_rules! impl_field_value {
    ($ty:ty, $variant:ident) => {
        impl FieldValue for $ty {
            const KIND: FieldKind = FieldKind::$variant;

            fn assign(&mut self, value: Decoded) {
                if let Decoded::$variant(v) = value {
                    *self = v;
                }
            }
        }
    };
}

impl_field_value!(String, String);
impl_field_value!(i32, Int);
impl_field_value!(i64, Int64);
impl_field_value!(f32, Float32);
impl_field_value!(f64, Float64);
impl_field_value!(Slice, List);
impl_field_value!(Map, Map);

impl<T: FieldValue + Default> FieldValue for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn assign(&mut self, value: Decoded) {
        if value.kind() == T::KIND {
            self.get_or_insert_with(T::default).assign(value);
        }
    }

    fn initialize(&mut self) {
        if T::KIND.is_container() && self.is_none() {
            *self = Some(T::default());
        }
    }
}

/// Static description of one destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField {
    /// Field identifier as declared, used in error messages.
    pub ident: &'static str,
    pub kind: FieldKind,
    /// Raw annotation text, e.g. `"sep:| ops:>,<"`. Empty when absent.
    pub tag: &'static str,
}

impl RawField {
    pub const fn new(ident: &'static str, kind: FieldKind, tag: &'static str) -> Self {
        RawField { ident, kind, tag }
    }
}

/// A struct that query parameters can be decoded into.
///
/// This trait is typically derived using `#[derive(QueryRecord)]`, but can
/// also be implemented manually. Indices passed to [`assign`](Self::assign)
/// and [`initialize`](Self::initialize) refer to positions in
/// [`fields`](Self::fields).
///
/// # Derive Usage
///
/// ```
/// use qparams::{QueryRecord, Slice};
///
/// # #[cfg(feature = "derive")]
/// #[derive(Default, QueryRecord)]
/// struct Options {
///     #[qparams("sep:|")]
///     embed: Slice,
///     page: i32,
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use qparams::{Decoded, FieldKind, FieldValue, QueryRecord, RawField, Slice};
///
/// #[derive(Default)]
/// struct Options {
///     embed: Slice,
///     page: i32,
/// }
///
/// impl QueryRecord for Options {
///     fn fields() -> &'static [RawField] {
///         const FIELDS: &[RawField] = &[
///             RawField::new("embed", FieldKind::List, "sep:|"),
///             RawField::new("page", FieldKind::Int, ""),
///         ];
///         FIELDS
///     }
///
///     fn assign(&mut self, index: usize, value: Decoded) {
///         match index {
///             0 => self.embed.assign(value),
///             1 => self.page.assign(value),
///             _ => {}
///         }
///     }
///
///     fn initialize(&mut self, index: usize) {
///         match index {
///             0 => self.embed.initialize(),
///             1 => self.page.initialize(),
///             _ => {}
///         }
///     }
/// }
/// ```
pub trait QueryRecord {
    /// The field table, in declaration order.
    fn fields() -> &'static [RawField];

    /// Stores a decoded value into the field at `index`.
    fn assign(&mut self, index: usize, value: Decoded);

    /// Initializes the container field at `index`.
    fn initialize(&mut self, index: usize);
}
