//! Implementation of the `#[derive(QueryRecord)]` macro.
//!
//! This module turns `#[qparams(...)]` field annotations into the static
//! field table and dispatch methods of `qparams::QueryRecord`.

mod attrs;
mod derive;

pub use derive::query_record_derive_impl;
