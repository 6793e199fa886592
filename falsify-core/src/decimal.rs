//! Floating point domains with a fixed decimal scale.

use crate::{arbitrary::*, data::*, error::*, gen::*, integral::*};

pub const DEFAULT_MAX_MAGNITUDE: f64 = 1_000_000.0;
pub const DEFAULT_SCALE: u32 = 2;
const MAX_SCALE: u32 = 15;

/// Doubles in `[min, max]` with at most `scale` decimal places.
///
/// Values are drawn as integers counting units of `10^-scale` and shrink
/// the same way integers do.
#[derive(Debug, Clone)]
pub struct DoubleArbitrary {
    min: f64,
    max: f64,
    scale: u32,
    units: IntegralArbitrary<i128>,
}

impl Default for DoubleArbitrary {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleArbitrary {
    pub fn new() -> Self {
        let min = -DEFAULT_MAX_MAGNITUDE;
        let max = DEFAULT_MAX_MAGNITUDE;
        let factor = 10f64.powi(DEFAULT_SCALE as i32);
        DoubleArbitrary {
            min,
            max,
            scale: DEFAULT_SCALE,
            units: IntegralArbitrary::spanning(
                (min * factor) as i128,
                (max * factor) as i128,
                None,
            ),
        }
    }

    pub fn between(self, min: f64, max: f64) -> Result<Self> {
        DoubleArbitrary::build(min, max, self.scale)
    }

    pub fn greater_or_equal(self, min: f64) -> Result<Self> {
        DoubleArbitrary::build(min, self.max, self.scale)
    }

    pub fn less_or_equal(self, max: f64) -> Result<Self> {
        DoubleArbitrary::build(self.min, max, self.scale)
    }

    /// Number of decimal places of generated values.
    pub fn of_scale(self, scale: u32) -> Result<Self> {
        DoubleArbitrary::build(self.min, self.max, scale)
    }

    fn build(min: f64, max: f64, scale: u32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(FalsifyError::invalid_arbitrary(
                "double bounds must be finite",
            ));
        }
        if scale > MAX_SCALE {
            return Err(FalsifyError::invalid_arbitrary(format!(
                "scale {scale} exceeds {MAX_SCALE}"
            )));
        }
        let factor = 10f64.powi(scale as i32);
        let low = (min * factor).ceil() as i128;
        let high = (max * factor).floor() as i128;
        if min > max || low > high {
            return Err(FalsifyError::invalid_arbitrary(format!(
                "no double with scale {scale} in [{min}, {max}]"
            )));
        }
        Ok(DoubleArbitrary {
            min,
            max,
            scale,
            units: IntegralArbitrary::new().between(low, high)?,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn to_double(&self) -> impl Fn(i128) -> f64 + Clone + Send + Sync + 'static {
        let factor = 10f64.powi(self.scale as i32);
        let (min, max) = (self.min, self.max);
        move |units| (units as f64 / factor).clamp(min, max)
    }
}

impl Arbitrary for DoubleArbitrary {
    type Value = f64;

    fn generator(&self, size: Size) -> RandomGenerator<f64> {
        self.units.generator(size).map(self.to_double())
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<f64>> {
        let to_double = self.to_double();
        self.units
            .exhaustive(max_samples)
            .map(|exhaustive| exhaustive.map(to_double))
    }

    fn edge_cases(&self) -> EdgeCases<f64> {
        self.units.edge_cases().map(self.to_double())
    }
}
