//! Integral domains for all primitive integer types up to `i128`.

use crate::{arbitrary::*, data::*, error::*, gen::*, shrinkable::*};
use rand::Rng;
use std::fmt::Debug;
use std::marker::PhantomData;

/// A primitive integer type whose values fit into an `i128`.
pub trait Integral: Copy + Debug + PartialEq + PartialOrd + Send + Sync + 'static {
    const MIN: i128;
    const MAX: i128;

    fn to_i128(self) -> i128;
    fn from_i128(value: i128) -> Self;
}

macro_rules! impl_integral {
    ($($t:ty),*) => {
        $(
            impl Integral for $t {
                const MIN: i128 = <$t>::MIN as i128;
                const MAX: i128 = <$t>::MAX as i128;

                fn to_i128(self) -> i128 {
                    self as i128
                }

                fn from_i128(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_integral!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

/// Integers of type `T` within inclusive bounds.
///
/// Bounds are validated when set; every value produced, edge cases
/// included, lies within them.
pub struct IntegralArbitrary<T> {
    min: i128,
    max: i128,
    shrinking_target: Option<i128>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for IntegralArbitrary<T> {
    fn clone(&self) -> Self {
        IntegralArbitrary {
            min: self.min,
            max: self.max,
            shrinking_target: self.shrinking_target,
            _marker: PhantomData,
        }
    }
}

impl<T> Debug for IntegralArbitrary<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegralArbitrary")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("shrinking_target", &self.shrinking_target)
            .finish()
    }
}

impl<T: Integral> Default for IntegralArbitrary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Integral> IntegralArbitrary<T> {
    /// The full range of `T`.
    pub fn new() -> Self {
        IntegralArbitrary {
            min: T::MIN,
            max: T::MAX,
            shrinking_target: None,
            _marker: PhantomData,
        }
    }

    pub fn between(self, min: T, max: T) -> Result<Self> {
        self.with_bounds(min.to_i128(), max.to_i128())
    }

    pub fn greater_or_equal(self, min: T) -> Result<Self> {
        let max = self.max;
        self.with_bounds(min.to_i128(), max)
    }

    pub fn less_or_equal(self, max: T) -> Result<Self> {
        let min = self.min;
        self.with_bounds(min, max.to_i128())
    }

    /// Shrink towards `target` instead of the value nearest to zero.
    pub fn shrink_towards(mut self, target: T) -> Result<Self> {
        let target = target.to_i128();
        if target < self.min || target > self.max {
            return Err(FalsifyError::invalid_arbitrary(format!(
                "shrinking target {target} outside of [{}, {}]",
                self.min, self.max
            )));
        }
        self.shrinking_target = Some(target);
        Ok(self)
    }

    /// Bounds known to be valid, with the target inside them.
    pub(crate) fn spanning(min: i128, max: i128, shrinking_target: Option<i128>) -> Self {
        IntegralArbitrary {
            min,
            max,
            shrinking_target,
            _marker: PhantomData,
        }
    }

    fn with_bounds(mut self, min: i128, max: i128) -> Result<Self> {
        if min > max {
            return Err(FalsifyError::invalid_arbitrary(format!(
                "min {min} must not be greater than max {max}"
            )));
        }
        if let Some(target) = self.shrinking_target {
            if target < min || target > max {
                return Err(FalsifyError::invalid_arbitrary(format!(
                    "shrinking target {target} outside of [{min}, {max}]"
                )));
            }
        }
        self.min = min;
        self.max = max;
        Ok(self)
    }

    pub fn min(&self) -> T {
        T::from_i128(self.min)
    }

    pub fn max(&self) -> T {
        T::from_i128(self.max)
    }

    /// The configured target, or the value of the range nearest to zero.
    pub fn shrinking_target(&self) -> T {
        T::from_i128(self.target())
    }

    fn target(&self) -> i128 {
        self.shrinking_target
            .unwrap_or_else(|| default_target(self.min, self.max))
    }
}

fn default_target(min: i128, max: i128) -> i128 {
    if min > 0 {
        min
    } else if max < 0 {
        max
    } else {
        0
    }
}

/// Split `[min, max]` into sub-ranges at the size-dependent partition points.
fn partitions(min: i128, max: i128, size: Size) -> Vec<(i128, i128)> {
    let point = (size.get() / 2).max(10) as i128;
    let mut ranges = Vec::with_capacity(3);
    let mut low = min;
    for split in [-point, point] {
        if split > low && split < max {
            ranges.push((low, split));
            low = split + 1;
        }
    }
    ranges.push((low, max));
    ranges
}

fn draw_between<R: Rng>(random: &mut R, low: i128, high: i128) -> i128 {
    let span = high.abs_diff(low);
    let offset = random.gen_range(0..=span);
    low.wrapping_add(offset as i128)
}

fn draw_integral(random: &mut Random, ranges: &[(i128, i128)], target: i128) -> i128 {
    let (low, high) = if random.gen_bool(0.5) {
        ranges
            .iter()
            .copied()
            .find(|&(low, high)| low <= target && target <= high)
            .unwrap_or(ranges[0])
    } else {
        ranges[random.gen_range(0..ranges.len())]
    };
    draw_between(random, low, high)
}

impl<T: Integral> Arbitrary for IntegralArbitrary<T> {
    type Value = T;

    fn generator(&self, size: Size) -> RandomGenerator<T> {
        let ranges = partitions(self.min, self.max, size);
        let target = self.target();
        RandomGenerator::new(move |random| {
            let value = draw_integral(random, &ranges, target);
            Ok(Shrinkable::integral(value, target).map(T::from_i128))
        })
        .with_edge_cases(size, self.edge_cases())
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<T>> {
        let count = self.max.abs_diff(self.min).checked_add(1)?;
        if count > max_samples as u128 {
            return None;
        }
        let (min, max, target) = (self.min, self.max, self.target());
        Some(ExhaustiveGenerator::new(count as u64, move || {
            (min..=max).map(move |value| Shrinkable::integral(value, target).map(T::from_i128))
        }))
    }

    fn edge_cases(&self) -> EdgeCases<T> {
        let target = self.target();
        let (min, max) = (self.min, self.max);
        let candidates = self
            .shrinking_target
            .into_iter()
            .chain([-2, -1, 0, 1, 2, min, max])
            .filter(|value| (min..=max).contains(value))
            .map(|value| Shrinkable::integral(value, target).map(T::from_i128));
        EdgeCases::from_shrinkables(candidates)
    }
}
