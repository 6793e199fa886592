//! Random and exhaustive generators, and edge cases.

use crate::{data::*, error::*, shrinkable::*};
use rand::Rng;
use std::sync::Arc;

/// Consecutive misses after which a filtered generator gives up.
pub const MAX_FILTER_MISSES: usize = 10_000;

type GenerateFn<T> = Arc<dyn Fn(&mut Random) -> Result<Shrinkable<T>> + Send + Sync>;

/// A generator for shrinkable values of type `T`.
///
/// A generator holds no state of its own: the same randomness source state
/// always yields the same value, so a run replays from its seed.
pub struct RandomGenerator<T> {
    generator: GenerateFn<T>,
}

impl<T> Clone for RandomGenerator<T> {
    fn clone(&self) -> Self {
        RandomGenerator {
            generator: self.generator.clone(),
        }
    }
}

impl<T> RandomGenerator<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Random) -> Result<Shrinkable<T>> + Send + Sync + 'static,
    {
        RandomGenerator {
            generator: Arc::new(f),
        }
    }

    /// Draw the next value from the randomness source.
    pub fn next(&self, random: &mut Random) -> Result<Shrinkable<T>> {
        (self.generator)(random)
    }
}

impl<T> RandomGenerator<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a generator that always produces the same unshrinkable value.
    pub fn constant(value: T) -> Self {
        RandomGenerator::new(move |_random| Ok(Shrinkable::unshrinkable(value.clone())))
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> RandomGenerator<U>
    where
        F: Fn(T) -> U + Clone + Send + Sync + 'static,
        U: 'static,
    {
        RandomGenerator::new(move |random| {
            let shrinkable = self.next(random)?;
            Ok(shrinkable.map(f.clone()))
        })
    }

    /// Filter generated values by a predicate, redrawing on a miss.
    pub fn filter(self, predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>) -> Self {
        RandomGenerator::new(move |random| {
            for _ in 0..MAX_FILTER_MISSES {
                if let Some(accepted) = self.next(random)?.filter(predicate.clone()) {
                    return Ok(accepted);
                }
            }
            tracing::warn!(misses = MAX_FILTER_MISSES, "filter gave up");
            Err(FalsifyError::TooManyFilterMisses {
                misses: MAX_FILTER_MISSES,
            })
        })
    }

    /// Inject edge cases with a size-dependent probability.
    pub fn with_edge_cases(self, size: Size, edge_cases: EdgeCases<T>) -> Self {
        if edge_cases.is_empty() {
            return self;
        }
        let probability = edge_case_probability(size);
        let edge_cases = Arc::new(edge_cases);
        RandomGenerator::new(move |random| {
            if random.gen_bool(probability) {
                let index = random.gen_range(0..edge_cases.len());
                if let Some(edge_case) = edge_cases.get(index) {
                    return Ok(edge_case.clone());
                }
            }
            self.next(random)
        })
    }
}

/// Probability of drawing an edge case instead of a regular value.
///
/// Small sizes mean few tries, so edge cases get a larger share.
pub fn edge_case_probability(size: Size) -> f64 {
    let size = size.get().max(1) as f64;
    (1.0 / size.sqrt()).clamp(0.05, 0.5)
}

/// Choose uniformly among fixed values, shrinking towards earlier ones.
pub fn choose<T>(values: Arc<Vec<T>>) -> RandomGenerator<T>
where
    T: Clone + Send + Sync + 'static,
{
    RandomGenerator::new(move |random| {
        if values.is_empty() {
            return Err(FalsifyError::invalid_arbitrary("cannot choose from no values"));
        }
        let index = random.gen_range(0..values.len());
        let values = values.clone();
        Ok(Shrinkable::integral(index as i128, 0).map(move |i| values[i as usize].clone()))
    })
}

/// A finite set of distinct boundary values of a domain.
#[derive(Debug)]
pub struct EdgeCases<T> {
    shrinkables: Vec<Shrinkable<T>>,
}

impl<T: Clone> Clone for EdgeCases<T> {
    fn clone(&self) -> Self {
        EdgeCases {
            shrinkables: self.shrinkables.clone(),
        }
    }
}

impl<T> EdgeCases<T> {
    pub fn none() -> Self {
        EdgeCases {
            shrinkables: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.shrinkables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shrinkables.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shrinkable<T>> {
        self.shrinkables.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shrinkable<T>> {
        self.shrinkables.iter()
    }

    /// The plain values of all edge cases.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.shrinkables.iter().map(|s| s.value().clone()).collect()
    }
}

impl<T: PartialEq> EdgeCases<T> {
    /// Collect edge cases, dropping later duplicates of the same value.
    pub fn from_shrinkables(shrinkables: impl IntoIterator<Item = Shrinkable<T>>) -> Self {
        let mut distinct: Vec<Shrinkable<T>> = Vec::new();
        for shrinkable in shrinkables {
            if !distinct.iter().any(|known| known.value() == shrinkable.value()) {
                distinct.push(shrinkable);
            }
        }
        EdgeCases {
            shrinkables: distinct,
        }
    }
}

impl<T: 'static> EdgeCases<T> {
    pub fn map<U, F>(self, f: F) -> EdgeCases<U>
    where
        F: Fn(T) -> U + Clone + Send + Sync + 'static,
        U: PartialEq + 'static,
    {
        EdgeCases::from_shrinkables(self.shrinkables.into_iter().map(|s| s.map(f.clone())))
    }

    pub fn filter(self, predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>) -> Self {
        EdgeCases {
            shrinkables: self
                .shrinkables
                .into_iter()
                .filter_map(|s| s.filter(predicate.clone()))
                .collect(),
        }
    }
}

type IteratorFn<T> = Arc<dyn Fn() -> Box<dyn Iterator<Item = Shrinkable<T>>> + Send + Sync>;

/// A finite, restartable enumeration of all values of a domain.
///
/// Values come with the domain's shrink candidates, so a falsifying value
/// found by enumeration can still be shrunk.
pub struct ExhaustiveGenerator<T> {
    max_count: u64,
    iterator: IteratorFn<T>,
}

impl<T> Clone for ExhaustiveGenerator<T> {
    fn clone(&self) -> Self {
        ExhaustiveGenerator {
            max_count: self.max_count,
            iterator: self.iterator.clone(),
        }
    }
}

impl<T: 'static> ExhaustiveGenerator<T> {
    /// Create an exhaustive generator yielding at most `max_count` values.
    pub fn new<F, I>(max_count: u64, f: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: Iterator<Item = Shrinkable<T>> + 'static,
    {
        ExhaustiveGenerator {
            max_count,
            iterator: Arc::new(move || -> Box<dyn Iterator<Item = Shrinkable<T>>> { Box::new(f()) }),
        }
    }

    /// Enumerate the given shrinkables in order.
    pub fn from_shrinkables(shrinkables: Vec<Shrinkable<T>>) -> Self
    where
        T: Clone + Send + Sync,
    {
        let shrinkables = Arc::new(shrinkables);
        let count = shrinkables.len() as u64;
        ExhaustiveGenerator::new(count, move || {
            let shrinkables = shrinkables.clone();
            (0..shrinkables.len()).map(move |i| shrinkables[i].clone())
        })
    }

    /// Upper bound of the number of values.
    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    /// Start a fresh enumeration from the first value.
    pub fn shrinkables(&self) -> Box<dyn Iterator<Item = Shrinkable<T>>> {
        (self.iterator)()
    }

    /// The plain values of a fresh enumeration.
    pub fn iter(&self) -> Box<dyn Iterator<Item = T>> {
        Box::new(self.shrinkables().map(Shrinkable::into_value))
    }

    pub fn map<U, F>(self, f: F) -> ExhaustiveGenerator<U>
    where
        F: Fn(T) -> U + Clone + Send + Sync + 'static,
        U: 'static,
    {
        let iterator = self.iterator;
        ExhaustiveGenerator::new(self.max_count, move || {
            let f = f.clone();
            iterator().map(move |shrinkable| shrinkable.map(f.clone()))
        })
    }

    /// Filter values and their candidates; the count stays an upper bound.
    pub fn filter(self, predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>) -> Self {
        let iterator = self.iterator;
        ExhaustiveGenerator::new(self.max_count, move || {
            let predicate = predicate.clone();
            iterator().filter_map(move |shrinkable| shrinkable.filter(predicate.clone()))
        })
    }
}

/// Mixed-radix counter enumerating every index combination in order,
/// rightmost position fastest.
#[derive(Debug, Clone)]
pub struct Odometer {
    radices: Vec<usize>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Odometer {
    pub fn new(radices: Vec<usize>) -> Self {
        let exhausted = radices.iter().any(|&r| r == 0);
        let indices = vec![0; radices.len()];
        Odometer {
            radices,
            indices,
            exhausted,
        }
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();
        let mut position = self.indices.len();
        loop {
            if position == 0 {
                self.exhausted = true;
                break;
            }
            position -= 1;
            self.indices[position] += 1;
            if self.indices[position] < self.radices[position] {
                break;
            }
            self.indices[position] = 0;
        }
        Some(current)
    }
}

/// Number of combinations of the given radices, `None` on overflow.
pub fn combinations(radices: impl IntoIterator<Item = u64>) -> Option<u64> {
    radices
        .into_iter()
        .try_fold(1u64, |acc, radix| acc.checked_mul(radix))
}
