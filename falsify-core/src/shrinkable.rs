//! Shrinkable values: a generated value together with its smaller candidates.

use std::fmt;
use std::sync::Arc;

/// Distance of a shrinkable value from its shrinking target.
///
/// Distances compare lexicographically. A distance of all zeros means the
/// value sits on its target. Composite values concatenate or sum the
/// distances of their parts, so every value of one domain must report the
/// same number of dimensions, on its target included.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShrinkingDistance(Vec<u128>);

impl ShrinkingDistance {
    pub fn of(distance: u128) -> Self {
        ShrinkingDistance(vec![distance])
    }

    pub fn zero() -> Self {
        ShrinkingDistance::default()
    }

    /// Concatenate two distances, left one most significant.
    pub fn append(&self, other: &ShrinkingDistance) -> Self {
        let mut dimensions = self.0.clone();
        dimensions.extend_from_slice(&other.0);
        ShrinkingDistance(dimensions)
    }

    /// Element-wise saturating sum; the shorter distance is padded with zeros.
    pub fn plus(&self, other: &ShrinkingDistance) -> Self {
        let len = self.0.len().max(other.0.len());
        let dimensions = (0..len)
            .map(|i| {
                let left = self.0.get(i).copied().unwrap_or(0);
                let right = other.0.get(i).copied().unwrap_or(0);
                left.saturating_add(right)
            })
            .collect();
        ShrinkingDistance(dimensions)
    }

    /// Sum a sequence of distances.
    pub fn sum<'a>(distances: impl IntoIterator<Item = &'a ShrinkingDistance>) -> Self {
        distances
            .into_iter()
            .fold(ShrinkingDistance::zero(), |acc, d| acc.plus(d))
    }
}

type Candidates<T> = Arc<dyn Fn() -> Vec<Shrinkable<T>> + Send + Sync>;

/// A value paired with the ability to produce smaller candidates.
///
/// Candidates are computed lazily on [`Shrinkable::shrink`], ordered from
/// the one nearest the shrinking target to the one nearest the current value.
/// Every candidate is strictly closer to the target than `self`.
pub struct Shrinkable<T> {
    value: T,
    distance: ShrinkingDistance,
    candidates: Option<Candidates<T>>,
}

impl<T: Clone> Clone for Shrinkable<T> {
    fn clone(&self) -> Self {
        Shrinkable {
            value: self.value.clone(),
            distance: self.distance.clone(),
            candidates: self.candidates.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shrinkable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shrinkable")
            .field("value", &self.value)
            .field("distance", &self.distance)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for Shrinkable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Shrinkable<T> {
    /// A value that cannot be shrunk.
    pub fn unshrinkable(value: T) -> Self {
        Shrinkable {
            value,
            distance: ShrinkingDistance::zero(),
            candidates: None,
        }
    }

    /// Create a shrinkable from a value, its distance and a candidate function.
    pub fn new<F>(value: T, distance: ShrinkingDistance, candidates: F) -> Self
    where
        F: Fn() -> Vec<Shrinkable<T>> + Send + Sync + 'static,
    {
        Shrinkable {
            value,
            distance,
            candidates: Some(Arc::new(candidates)),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn distance(&self) -> &ShrinkingDistance {
        &self.distance
    }

    /// Produce the smaller candidates of this value.
    pub fn shrink(&self) -> Vec<Shrinkable<T>> {
        match &self.candidates {
            Some(candidates) => candidates(),
            None => Vec::new(),
        }
    }

    /// Whether this value is a shrink fixpoint by construction.
    pub fn is_unshrinkable(&self) -> bool {
        self.candidates.is_none()
    }
}

impl<T: 'static> Shrinkable<T> {
    /// Map a function over the value and all of its candidates.
    pub fn map<U, F>(self, f: F) -> Shrinkable<U>
    where
        F: Fn(T) -> U + Clone + Send + Sync + 'static,
        U: 'static,
    {
        let Shrinkable {
            value,
            distance,
            candidates,
        } = self;
        let mapped = f(value);
        match candidates {
            None => Shrinkable {
                value: mapped,
                distance,
                candidates: None,
            },
            Some(candidates) => Shrinkable::new(mapped, distance, move || {
                candidates()
                    .into_iter()
                    .map(|candidate| candidate.map(f.clone()))
                    .collect()
            }),
        }
    }

    /// Keep only candidates, recursively, that satisfy the predicate.
    ///
    /// Returns `None` when the value itself does not.
    pub fn filter(self, predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>) -> Option<Shrinkable<T>> {
        if !predicate(&self.value) {
            return None;
        }
        let Shrinkable {
            value,
            distance,
            candidates,
        } = self;
        match candidates {
            None => Some(Shrinkable {
                value,
                distance,
                candidates: None,
            }),
            Some(candidates) => Some(Shrinkable::new(value, distance, move || {
                candidates()
                    .into_iter()
                    .filter_map(|candidate| candidate.filter(predicate.clone()))
                    .collect()
            })),
        }
    }
}

impl Shrinkable<i128> {
    /// An integer shrinking towards `target`.
    ///
    /// Candidates are the target itself followed by values approaching the
    /// current one in halving steps, ending with the direct neighbour.
    pub fn integral(value: i128, target: i128) -> Self {
        let distance = value.abs_diff(target);
        if distance == 0 {
            return Shrinkable {
                value,
                distance: ShrinkingDistance::of(0),
                candidates: None,
            };
        }
        Shrinkable::new(value, ShrinkingDistance::of(distance), move || {
            candidate_distances(distance)
                .into_iter()
                .map(|d| {
                    // Lies between target and value, so wrapping arithmetic is exact.
                    let candidate = if value > target {
                        target.wrapping_add(d as i128)
                    } else {
                        target.wrapping_sub(d as i128)
                    };
                    Shrinkable::integral(candidate, target)
                })
                .collect()
        })
    }
}

/// Distances strictly below `distance`, nearest to zero first.
fn candidate_distances(distance: u128) -> Vec<u128> {
    let mut result = vec![0];
    let mut step = distance / 2;
    while step > 0 {
        let candidate = distance - step;
        if result.last() != Some(&candidate) {
            result.push(candidate);
        }
        step /= 2;
    }
    if distance > 1 && result.last() != Some(&(distance - 1)) {
        result.push(distance - 1);
    }
    result
}

impl<T> Shrinkable<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    /// A list shrinking by dropping elements and by shrinking elements.
    ///
    /// Lists never shrink below `min_size` elements.
    pub fn list(elements: Vec<Shrinkable<T>>, min_size: usize) -> Self {
        let value: Vec<T> = elements.iter().map(|e| e.value().clone()).collect();
        let element_distance = ShrinkingDistance::sum(elements.iter().map(|e| e.distance()));
        let distance = ShrinkingDistance::of(elements.len() as u128).append(&element_distance);
        let elements = Arc::new(elements);
        Shrinkable::new(value, distance, move || {
            list_candidates(&elements, min_size)
        })
    }
}

fn list_candidates<T>(elements: &[Shrinkable<T>], min_size: usize) -> Vec<Shrinkable<Vec<T>>>
where
    T: Clone + Send + Sync + 'static,
{
    let len = elements.len();
    let mut candidates = Vec::new();

    if len > min_size {
        let kept = (len / 2).max(min_size);
        if kept < len {
            candidates.push(Shrinkable::list(elements[..kept].to_vec(), min_size));
            if kept > 0 {
                candidates.push(Shrinkable::list(elements[len - kept..].to_vec(), min_size));
            }
        }
        if len > 2 {
            for index in 0..len {
                let mut rest = elements.to_vec();
                rest.remove(index);
                candidates.push(Shrinkable::list(rest, min_size));
            }
        }
    }

    for (index, element) in elements.iter().enumerate() {
        for smaller in element.shrink() {
            let mut replaced = elements.to_vec();
            replaced[index] = smaller;
            candidates.push(Shrinkable::list(replaced, min_size));
        }
    }

    candidates
}

impl<A, B> Shrinkable<(A, B)>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    /// A pair shrinking one side at a time, left side first.
    pub fn pair(first: Shrinkable<A>, second: Shrinkable<B>) -> Self {
        let value = (first.value().clone(), second.value().clone());
        let distance = first.distance().append(second.distance());
        Shrinkable::new(value, distance, move || {
            let mut candidates: Vec<Shrinkable<(A, B)>> = first
                .shrink()
                .into_iter()
                .map(|a| Shrinkable::pair(a, second.clone()))
                .collect();
            candidates.extend(
                second
                    .shrink()
                    .into_iter()
                    .map(|b| Shrinkable::pair(first.clone(), b)),
            );
            candidates
        })
    }
}

impl<T> From<T> for Shrinkable<T> {
    fn from(value: T) -> Self {
        Shrinkable::unshrinkable(value)
    }
}
