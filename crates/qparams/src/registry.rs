//! Registry of record types for dynamically typed destinations.
//!
//! [`Decoder::decode`](crate::Decoder::decode) is checked at compile time.
//! When the destination is only known as `&mut dyn Any` (plugin tables,
//! handler maps keyed by type), a [`Registry`] resolves each record type's
//! schema once at registration and rejects any destination whose type was
//! never registered with [`DecodeError::WrongDestType`].

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::config::DecodeConfig;
use crate::decode::bind_fields;
use crate::error::{ConversionErrors, DecodeError, Result};
use crate::params::QueryParams;
use crate::record::QueryRecord;
use crate::schema::Schema;

type DecodeFn =
    fn(&mut dyn Any, &Schema, &QueryParams, &DecodeConfig, &mut ConversionErrors) -> bool;

struct Entry {
    type_name: &'static str,
    schema: Schema,
    decode: DecodeFn,
}

/// Table of record types with pre-resolved schemas.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "derive")] {
/// use std::any::Any;
/// use qparams::{DecodeConfig, DecodeError, QueryParams, QueryRecord, Registry, Slice};
///
/// #[derive(Default, QueryRecord)]
/// struct Options {
///     embed: Slice,
/// }
///
/// let mut registry = Registry::new(DecodeConfig::default());
/// registry.register::<Options>();
///
/// let params = QueryParams::from_query_str("embed=User");
/// let mut opts = Options::default();
/// registry.decode(&mut opts as &mut dyn Any, &params).unwrap();
/// assert_eq!(opts.embed.as_slice(), ["user"]);
///
/// let mut not_a_record = 42u8;
/// assert_eq!(
///     registry.decode(&mut not_a_record as &mut dyn Any, &params),
///     Err(DecodeError::WrongDestType)
/// );
/// # }
/// ```
#[derive(Default)]
pub struct Registry {
    config: DecodeConfig,
    entries: HashMap<TypeId, Entry>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<_> = self.entries.values().map(|e| e.type_name).collect();
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("types", &types)
            .finish()
    }
}

impl Registry {
    pub fn new(config: DecodeConfig) -> Self {
        Registry {
            config,
            entries: HashMap::new(),
        }
    }

    /// Registers `T`, resolving its schema. Registering twice is a no-op.
    pub fn register<T: QueryRecord + 'static>(&mut self) -> &mut Self {
        let config = &self.config;
        self.entries.entry(TypeId::of::<T>()).or_insert_with(|| {
            let type_name = std::any::type_name::<T>();
            debug!(record = type_name, "registering record type");
            Entry {
                type_name,
                schema: Schema::resolve::<T>(config),
                decode: decode_erased::<T>,
            }
        });
        self
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// The resolved schema of a registered type.
    pub fn schema<T: 'static>(&self) -> Option<&Schema> {
        self.entries.get(&TypeId::of::<T>()).map(|e| &e.schema)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decodes `params` into a destination of any registered type.
    ///
    /// Fails with [`DecodeError::WrongDestType`] before touching `dest` if
    /// its concrete type is not registered.
    pub fn decode(&self, dest: &mut dyn Any, params: &QueryParams) -> Result<()> {
        let entry = self
            .entries
            .get(&(*dest).type_id())
            .ok_or(DecodeError::WrongDestType)?;

        let mut errors = ConversionErrors::new();
        if !(entry.decode)(dest, &entry.schema, params, &self.config, &mut errors) {
            return Err(DecodeError::WrongDestType);
        }
        debug!(record = entry.type_name, errors = errors.len(), "decoded");
        errors.into_result()?;
        Ok(())
    }
}

fn decode_erased<T: QueryRecord + 'static>(
    dest: &mut dyn Any,
    schema: &Schema,
    params: &QueryParams,
    config: &DecodeConfig,
    errors: &mut ConversionErrors,
) -> bool {
    match dest.downcast_mut::<T>() {
        Some(dest) => {
            bind_fields(schema, dest, params, config, errors);
            true
        }
        None => false,
    }
}
