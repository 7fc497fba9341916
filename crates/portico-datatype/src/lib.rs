//! # Portico DataType
//!
//! The pluggable data-type casting registry and the output scrubbing that
//! consults it.
//!
//! A [`DataType`] descriptor answers two questions: can a raw value be cast
//! to this type ([`DataType::can_cast`]), and what does the cast produce
//! ([`DataType::cast`]). The [`DataTypeRegistry`] holds descriptors in
//! **registration order** and probes them first-match-wins — an ordering
//! that is semantically load-bearing (see [`DataTypeRegistry::find_match`]).
//!
//! Built-in descriptors cover string, number, integer, date, array, and
//! object; applications may append their own.

#![doc(html_root_url = "https://docs.rs/portico-datatype/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builtin;
mod registry;
mod scrub;

pub use builtin::{
    ArrayDataType, DateDataType, IntegerDataType, NumberDataType, ObjectDataType, StringDataType,
};
pub use registry::{DataType, DataTypeRegistry};
pub use scrub::{scrub, OutputShape};
