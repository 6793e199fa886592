//! List domains.

use crate::{arbitrary::*, data::*, error::*, gen::*, shrinkable::*};
use rand::Rng;
use std::sync::Arc;

/// Largest list drawn when no maximum size is configured.
pub const DEFAULT_MAX_SIZE: usize = 255;

/// Lists of values drawn from an element domain.
///
/// Lists shrink by dropping elements first and by shrinking single elements
/// after that, never below the minimum size.
pub struct ListArbitrary<A> {
    pub(crate) element: A,
    pub(crate) min_size: usize,
    pub(crate) max_size: usize,
}

impl<A: Arbitrary> ListArbitrary<A> {
    pub fn new(element: A) -> Self {
        ListArbitrary {
            element,
            min_size: 0,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn of_size(self, size: usize) -> Self {
        ListArbitrary {
            min_size: size,
            max_size: size,
            ..self
        }
    }

    pub fn of_min_size(self, min_size: usize) -> Result<Self> {
        let max_size = self.max_size.max(min_size);
        self.with_sizes(min_size, max_size)
    }

    pub fn of_max_size(self, max_size: usize) -> Result<Self> {
        let min_size = self.min_size;
        self.with_sizes(min_size, max_size)
    }

    fn with_sizes(self, min_size: usize, max_size: usize) -> Result<Self> {
        if min_size > max_size {
            return Err(FalsifyError::invalid_arbitrary(format!(
                "min size {min_size} must not be greater than max size {max_size}"
            )));
        }
        Ok(ListArbitrary {
            min_size,
            max_size,
            ..self
        })
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Largest length drawn for a size hint.
    fn effective_max_size(&self, size: Size) -> usize {
        self.max_size.min(self.min_size.max(size.cutoff()))
    }
}

impl<A: Arbitrary> Arbitrary for ListArbitrary<A> {
    type Value = Vec<A::Value>;

    fn generator(&self, size: Size) -> RandomGenerator<Vec<A::Value>> {
        let element = self.element.generator(size);
        let min_size = self.min_size;
        let max_size = self.effective_max_size(size);
        RandomGenerator::new(move |random| {
            let len = random.gen_range(min_size..=max_size);
            let elements = (0..len)
                .map(|_| element.next(random))
                .collect::<Result<Vec<_>>>()?;
            Ok(Shrinkable::list(elements, min_size))
        })
        .with_edge_cases(size, self.edge_cases())
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<Vec<A::Value>>> {
        let elements: Arc<Vec<Shrinkable<A::Value>>> =
            Arc::new(self.element.exhaustive(max_samples)?.shrinkables().collect());
        let count = list_count(elements.len() as u64, self.min_size, self.max_size, max_samples)?;
        let (min_size, max_size) = (self.min_size, self.max_size);
        Some(ExhaustiveGenerator::new(count, move || {
            let elements = elements.clone();
            (min_size..=max_size).flat_map(move |len| {
                let elements = elements.clone();
                Odometer::new(vec![elements.len(); len]).map(move |indices| {
                    let chosen = indices.iter().map(|&i| elements[i].clone()).collect();
                    Shrinkable::list(chosen, min_size)
                })
            })
        }))
    }

    fn edge_cases(&self) -> EdgeCases<Vec<A::Value>> {
        let min_size = self.min_size;
        let mut edge_cases = Vec::new();
        if min_size == 0 {
            edge_cases.push(Shrinkable::list(Vec::new(), min_size));
        }
        if min_size <= 1 && self.max_size >= 1 {
            edge_cases.extend(
                self.element
                    .edge_cases()
                    .iter()
                    .map(|element| Shrinkable::list(vec![element.clone()], min_size)),
            );
        }
        EdgeCases::from_shrinkables(edge_cases)
    }
}

/// Number of lists with lengths in `[min_size, max_size]` over `elements`
/// distinct values, if at most `max_samples`.
fn list_count(elements: u64, min_size: usize, max_size: usize, max_samples: u64) -> Option<u64> {
    let mut total: u64 = 0;
    for len in min_size..=max_size {
        let lists = elements.checked_pow(u32::try_from(len).ok()?)?;
        total = total.checked_add(lists)?;
        if total > max_samples {
            return None;
        }
        if elements == 0 && len > 0 {
            break;
        }
    }
    Some(total)
}
