//! Input data model: scalar values, records, and versioned record collections.
//!
//! Records are flat, insertion-ordered maps from field name to [`Value`]. A
//! [`Dataset`] wraps a record collection with an identity and a version so that
//! derived results can be memoized and invalidated explicitly.

pub mod coerce;
pub mod record;
pub mod value;

pub use coerce::{
    coerce_flag, coerce_number, parse_flag, parse_number_permissive, parse_timestamp,
    NumericCoercion,
};
pub use record::{Dataset, DatasetKey, Record};
pub use value::{Value, ValueKind};
