//! Core engine of falsify: value domains, generation, shrinking and the
//! property try loop.
//!
//! Give the engine value domains and a predicate; it tells you whether the
//! predicate holds and, if not, shows you the smallest counterexample it
//! could find.

pub mod arbitraries;
pub mod arbitrary;
pub mod collection;
pub mod config;
pub mod data;
pub mod decimal;
pub mod error;
pub mod gen;
pub mod integral;
pub mod parameters;
pub mod property;
pub mod shrinkable;
pub mod shrinker;
pub mod text;
pub mod value;

// Re-export the main types
pub use arbitrary::*;
pub use collection::*;
pub use config::*;
pub use data::*;
pub use decimal::*;
pub use error::*;
pub use gen::*;
pub use integral::*;
pub use parameters::*;
pub use property::*;
pub use shrinkable::*;
pub use shrinker::*;
pub use text::*;
pub use value::*;
