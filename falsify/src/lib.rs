//! falsify: property-based testing with generation and shrinking.
//!
//! This is the main entry point of the library. It re-exports the engine
//! from `falsify-core`.
//!
//! ```
//! use falsify::*;
//!
//! let config = PropertyConfiguration::builder().with_seed("7").build().unwrap();
//! let result = Property::for_all(
//!     "reversing twice is identity",
//!     config,
//!     vec![arbitraries::lists(arbitraries::integers::<i8>()).boxed()],
//! )
//! .check(|args| {
//!     let list = args[0].downcast_ref::<Vec<i8>>().cloned().unwrap_or_default();
//!     let mut twice = list.clone();
//!     twice.reverse();
//!     twice.reverse();
//!     twice == list
//! })
//! .unwrap();
//! assert!(result.is_successful());
//! ```

pub use falsify_core::*;
