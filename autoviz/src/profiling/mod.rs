//! Dataset profiling for records of unknown shape.
//!
//! ## Components
//!
//! - **Field Profiler** (`field`): infers one semantic type per field from its
//!   name and first non-null value, counts distinct values, and keeps a small
//!   first-seen sample
//! - **Dataset Profile** (`dataset`): runs the field profiler over every column
//!   of the first record, in that record's key order
//!
//! Profiling is a pure function of the record collection. Anything that does
//! not fit the inferred type is counted in [`FieldProfile::coerced_count`]
//! instead of being reported as an error.
//!
//! ## Example Usage
//!
//! ```rust
//! use autoviz::data::Record;
//! use autoviz::profiling::{DatasetProfile, FieldType};
//!
//! let records = vec![
//!     Record::new().with("stage", "Screen").with("salary", 90_000),
//!     Record::new().with("stage", "Offer").with("salary", "N/A"),
//! ];
//!
//! let profile = DatasetProfile::build(&records);
//! let salary = profile.get("salary").unwrap();
//! assert_eq!(salary.inferred_type, FieldType::Number);
//! assert_eq!(salary.coerced_count, 1);
//! ```

pub mod dataset;
pub mod field;
pub mod types;

pub use dataset::DatasetProfile;
pub use field::{FieldProfiler, FieldProfilerBuilder, ProfilerConfig};
pub use types::{FieldProfile, FieldType};
