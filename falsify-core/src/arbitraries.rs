//! Entry points for building domains.
//!
//! ```
//! use falsify_core::arbitraries;
//! use falsify_core::Arbitrary;
//!
//! let percentages = arbitraries::integers::<u8>().between(0, 100).unwrap();
//! let names = arbitraries::strings().alpha().of_max_length(8).unwrap();
//! let pairs = arbitraries::tuple2(percentages, names);
//! assert!(pairs.exhaustive(1_000).is_none());
//! ```

use crate::arbitrary::{Arbitrary, Choose, Just, Tuple2};
use crate::collection::ListArbitrary;
use crate::decimal::DoubleArbitrary;
use crate::error::Result;
use crate::integral::{Integral, IntegralArbitrary};
use crate::text::{CharArbitrary, StringArbitrary};
use std::fmt::Debug;

/// Integers spanning the whole range of `T`.
pub fn integers<T: Integral>() -> IntegralArbitrary<T> {
    IntegralArbitrary::new()
}

/// One of the given values, shrinking towards the first.
pub fn of<T>(values: impl IntoIterator<Item = T>) -> Result<Choose<T>>
where
    T: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    Choose::new(values.into_iter().collect())
}

pub fn bools() -> Choose<bool> {
    Choose::from_non_empty(vec![false, true])
}

pub fn just<T>(value: T) -> Just<T>
where
    T: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    Just::new(value)
}

/// All Unicode scalar values until restricted.
pub fn chars() -> CharArbitrary {
    CharArbitrary::new()
}

pub fn strings() -> StringArbitrary {
    StringArbitrary::new()
}

pub fn doubles() -> DoubleArbitrary {
    DoubleArbitrary::new()
}

pub fn lists<A: Arbitrary>(element: A) -> ListArbitrary<A> {
    ListArbitrary::new(element)
}

pub fn tuple2<A: Arbitrary, B: Arbitrary>(first: A, second: B) -> Tuple2<A, B> {
    Tuple2::new(first, second)
}

/// Triples, shrinking the leftmost component first.
pub fn tuple3<A, B, C>(
    first: A,
    second: B,
    third: C,
) -> impl Arbitrary<Value = (A::Value, B::Value, C::Value)>
where
    A: Arbitrary,
    B: Arbitrary,
    C: Arbitrary,
{
    Tuple2::new(first, Tuple2::new(second, third)).map(flatten)
}

fn flatten<A, B, C>((a, (b, c)): (A, (B, C))) -> (A, B, C) {
    (a, b, c)
}
