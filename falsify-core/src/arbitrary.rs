//! Value domains and their combinators.
//!
//! An [`Arbitrary`] describes a space of values. It can produce a random
//! generator for a size hint, an exhaustive generator when the space is small
//! enough, and a set of edge cases. Domains hold no mutable state, so one
//! domain can be shared by properties checked on different threads.

use crate::{data::*, error::*, gen::*, shrinkable::*, value::*};
use std::fmt::Debug;
use std::sync::Arc;

/// A description of a value space.
pub trait Arbitrary: Send + Sync {
    type Value: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// A random generator whose breadth scales with `size`.
    fn generator(&self, size: Size) -> RandomGenerator<Self::Value>;

    /// An enumeration of all values, if there are at most `max_samples`.
    fn exhaustive(&self, _max_samples: u64) -> Option<ExhaustiveGenerator<Self::Value>> {
        None
    }

    /// Boundary values worth trying directly.
    fn edge_cases(&self) -> EdgeCases<Self::Value> {
        EdgeCases::none()
    }

    /// Map a function over every value of this domain.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Value) -> U + Clone + Send + Sync + 'static,
        U: Clone + Debug + PartialEq + Send + Sync + 'static,
    {
        Map { inner: self, f }
    }

    /// Restrict this domain to values satisfying `predicate`.
    fn filter<P>(self, predicate: P) -> Filter<Self>
    where
        Self: Sized,
        P: Fn(&Self::Value) -> bool + Send + Sync + 'static,
    {
        Filter {
            inner: self,
            predicate: Arc::new(predicate),
        }
    }

    /// Erase the value type so the domain can feed a parameter tuple.
    fn as_generic(self) -> Generic<Self>
    where
        Self: Sized,
    {
        Generic { inner: self }
    }

    /// Box the erased domain.
    fn boxed(self) -> BoxedArbitrary
    where
        Self: Sized + 'static,
    {
        Box::new(self.as_generic())
    }
}

/// A type-erased domain producing [`AnyValue`]s.
pub type BoxedArbitrary = Box<dyn Arbitrary<Value = AnyValue>>;

impl<A: Arbitrary + ?Sized> Arbitrary for Box<A> {
    type Value = A::Value;

    fn generator(&self, size: Size) -> RandomGenerator<Self::Value> {
        (**self).generator(size)
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<Self::Value>> {
        (**self).exhaustive(max_samples)
    }

    fn edge_cases(&self) -> EdgeCases<Self::Value> {
        (**self).edge_cases()
    }
}

impl<A: Arbitrary + ?Sized> Arbitrary for Arc<A> {
    type Value = A::Value;

    fn generator(&self, size: Size) -> RandomGenerator<Self::Value> {
        (**self).generator(size)
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<Self::Value>> {
        (**self).exhaustive(max_samples)
    }

    fn edge_cases(&self) -> EdgeCases<Self::Value> {
        (**self).edge_cases()
    }
}

/// Domain produced by [`Arbitrary::map`].
pub struct Map<A, F> {
    inner: A,
    f: F,
}

impl<A, F, U> Arbitrary for Map<A, F>
where
    A: Arbitrary,
    F: Fn(A::Value) -> U + Clone + Send + Sync + 'static,
    U: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    type Value = U;

    fn generator(&self, size: Size) -> RandomGenerator<U> {
        self.inner.generator(size).map(self.f.clone())
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<U>> {
        self.inner
            .exhaustive(max_samples)
            .map(|exhaustive| exhaustive.map(self.f.clone()))
    }

    fn edge_cases(&self) -> EdgeCases<U> {
        self.inner.edge_cases().map(self.f.clone())
    }
}

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Domain produced by [`Arbitrary::filter`].
pub struct Filter<A: Arbitrary> {
    inner: A,
    predicate: Predicate<A::Value>,
}

impl<A: Arbitrary> Arbitrary for Filter<A> {
    type Value = A::Value;

    fn generator(&self, size: Size) -> RandomGenerator<A::Value> {
        self.inner.generator(size).filter(self.predicate.clone())
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<A::Value>> {
        self.inner
            .exhaustive(max_samples)
            .map(|exhaustive| exhaustive.filter(self.predicate.clone()))
    }

    fn edge_cases(&self) -> EdgeCases<A::Value> {
        self.inner.edge_cases().filter(self.predicate.clone())
    }
}

/// Domain produced by [`Arbitrary::as_generic`].
pub struct Generic<A> {
    inner: A,
}

impl<A: Arbitrary> Arbitrary for Generic<A> {
    type Value = AnyValue;

    fn generator(&self, size: Size) -> RandomGenerator<AnyValue> {
        self.inner.generator(size).map(AnyValue::new)
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<AnyValue>> {
        self.inner
            .exhaustive(max_samples)
            .map(|exhaustive| exhaustive.map(AnyValue::new))
    }

    fn edge_cases(&self) -> EdgeCases<AnyValue> {
        self.inner.edge_cases().map(AnyValue::new)
    }
}

/// A domain of exactly one value.
pub struct Just<T> {
    value: T,
}

impl<T> Just<T> {
    pub fn new(value: T) -> Self {
        Just { value }
    }
}

impl<T> Arbitrary for Just<T>
where
    T: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    type Value = T;

    fn generator(&self, _size: Size) -> RandomGenerator<T> {
        RandomGenerator::constant(self.value.clone())
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<T>> {
        (max_samples >= 1).then(|| {
            ExhaustiveGenerator::from_shrinkables(vec![Shrinkable::unshrinkable(self.value.clone())])
        })
    }

    fn edge_cases(&self) -> EdgeCases<T> {
        EdgeCases::from_shrinkables(vec![Shrinkable::unshrinkable(self.value.clone())])
    }
}

/// A domain of literal values, shrinking towards the first one.
pub struct Choose<T> {
    values: Arc<Vec<T>>,
}

impl<T> Choose<T>
where
    T: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    pub fn new(values: Vec<T>) -> Result<Self> {
        if values.is_empty() {
            return Err(FalsifyError::invalid_arbitrary(
                "a choice needs at least one value",
            ));
        }
        Ok(Choose::from_non_empty(values))
    }

    pub(crate) fn from_non_empty(values: Vec<T>) -> Self {
        Choose {
            values: Arc::new(values),
        }
    }

    fn shrinkable_at(&self, index: usize) -> Shrinkable<T> {
        let values = self.values.clone();
        Shrinkable::integral(index as i128, 0).map(move |i| values[i as usize].clone())
    }
}

impl<T> Arbitrary for Choose<T>
where
    T: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    type Value = T;

    fn generator(&self, size: Size) -> RandomGenerator<T> {
        choose(self.values.clone()).with_edge_cases(size, self.edge_cases())
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<T>> {
        let count = self.values.len() as u64;
        (count <= max_samples).then(|| {
            ExhaustiveGenerator::from_shrinkables(
                (0..self.values.len()).map(|i| self.shrinkable_at(i)).collect(),
            )
        })
    }

    fn edge_cases(&self) -> EdgeCases<T> {
        let last = self.values.len().saturating_sub(1);
        EdgeCases::from_shrinkables(vec![self.shrinkable_at(0), self.shrinkable_at(last)])
    }
}

/// A domain of pairs, shrinking the left component first.
pub struct Tuple2<A, B> {
    first: A,
    second: B,
}

impl<A, B> Tuple2<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Tuple2 { first, second }
    }
}

impl<A, B> Arbitrary for Tuple2<A, B>
where
    A: Arbitrary,
    B: Arbitrary,
{
    type Value = (A::Value, B::Value);

    fn generator(&self, size: Size) -> RandomGenerator<Self::Value> {
        let first = self.first.generator(size);
        let second = self.second.generator(size);
        RandomGenerator::new(move |random| {
            let a = first.next(random)?;
            let b = second.next(random)?;
            Ok(Shrinkable::pair(a, b))
        })
        .with_edge_cases(size, self.edge_cases())
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<Self::Value>> {
        let first = self.first.exhaustive(max_samples)?;
        let second = self.second.exhaustive(max_samples)?;
        let count = combinations([first.max_count(), second.max_count()])?;
        if count > max_samples {
            return None;
        }
        let firsts: Arc<Vec<Shrinkable<A::Value>>> = Arc::new(first.shrinkables().collect());
        let seconds: Arc<Vec<Shrinkable<B::Value>>> = Arc::new(second.shrinkables().collect());
        Some(ExhaustiveGenerator::new(count, move || {
            let firsts = firsts.clone();
            let seconds = seconds.clone();
            Odometer::new(vec![firsts.len(), seconds.len()]).map(move |indices| {
                Shrinkable::pair(firsts[indices[0]].clone(), seconds[indices[1]].clone())
            })
        }))
    }

    fn edge_cases(&self) -> EdgeCases<Self::Value> {
        let firsts = self.first.edge_cases();
        let seconds = self.second.edge_cases();
        EdgeCases::from_shrinkables(firsts.iter().flat_map(|a| {
            seconds
                .iter()
                .map(move |b| Shrinkable::pair(a.clone(), b.clone()))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw<A: Arbitrary>(arbitrary: &A, seed: u64, count: usize) -> Vec<A::Value> {
        let gen = arbitrary.generator(Size::new(100));
        let mut random = Random::from_u64(seed);
        (0..count)
            .map(|_| gen.next(&mut random).unwrap().into_value())
            .collect()
    }

    #[test]
    fn test_just() {
        let just = Just::new("only");
        assert!(draw(&just, 1, 10).iter().all(|v| *v == "only"));
        assert_eq!(just.exhaustive(1).unwrap().iter().collect::<Vec<_>>(), vec!["only"]);
        assert!(just.exhaustive(0).is_none());
    }

    #[test]
    fn test_choose_values_and_edge_cases() {
        let choice = Choose::new(vec![1, 2, 3, 4, 5]).unwrap();
        assert!(draw(&choice, 3, 100).iter().all(|v| (1..=5).contains(v)));
        assert_eq!(choice.edge_cases().values(), vec![1, 5]);
        assert_eq!(
            choice.exhaustive(5).unwrap().iter().collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert!(choice.exhaustive(4).is_none());
        assert!(Choose::<i32>::new(vec![]).is_err());
    }

    #[test]
    fn test_map_carries_everything() {
        let doubled = Choose::new(vec![1, 2, 3]).unwrap().map(|v| v * 2);
        assert!(draw(&doubled, 9, 50).iter().all(|v| v % 2 == 0));
        assert_eq!(doubled.edge_cases().values(), vec![2, 6]);
        assert_eq!(
            doubled.exhaustive(10).unwrap().iter().collect::<Vec<_>>(),
            vec![2, 4, 6]
        );
    }

    #[test]
    fn test_filter_carries_everything() {
        let odd = Choose::new(vec![1, 2, 3, 4]).unwrap().filter(|v| v % 2 == 1);
        assert!(draw(&odd, 2, 50).iter().all(|v| v % 2 == 1));
        assert_eq!(odd.edge_cases().values(), vec![1]);
        assert_eq!(odd.exhaustive(10).unwrap().iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_tuple_exhaustive_order() {
        let pairs = Tuple2::new(
            Choose::new(vec!['a', 'b']).unwrap(),
            Choose::new(vec![1, 2]).unwrap(),
        );
        let all: Vec<(char, i32)> = pairs.exhaustive(4).unwrap().iter().collect();
        assert_eq!(all, vec![('a', 1), ('a', 2), ('b', 1), ('b', 2)]);
        assert!(pairs.exhaustive(3).is_none());
        assert_eq!(pairs.edge_cases().len(), 4);
    }

    #[test]
    fn test_exhaustive_values_keep_their_candidates() {
        let pairs = Tuple2::new(
            Choose::new(vec!['a', 'b', 'c']).unwrap(),
            Choose::new(vec![1, 2]).unwrap(),
        );
        let last = pairs.exhaustive(6).unwrap().shrinkables().last().unwrap();
        assert_eq!(*last.value(), ('c', 2));
        let candidates: Vec<(char, i32)> = last.shrink().iter().map(|c| *c.value()).collect();
        assert_eq!(candidates, vec![('a', 2), ('b', 2), ('c', 1)]);
    }

    #[test]
    fn test_generic_erasure() {
        let generic = Choose::new(vec![7_u8]).unwrap().boxed();
        let values = draw(&generic, 0, 3);
        assert!(values.iter().all(|v| *v == AnyValue::new(7_u8)));
    }
}
