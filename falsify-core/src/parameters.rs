//! Parameter tuples: one type-erased shrinkable per parameter, one tuple per try.

use crate::{
    arbitrary::*, config::*, data::*, error::*, gen::*, shrinkable::*, value::*,
};
use std::fmt;

/// The parameter tuple of one try.
pub type Parameters = Vec<Shrinkable<AnyValue>>;

/// The plain values of a parameter tuple.
pub fn values_of(parameters: &[Shrinkable<AnyValue>]) -> Vec<AnyValue> {
    parameters.iter().map(|p| p.value().clone()).collect()
}

/// Endless random tuples.
///
/// Each parameter draws from its own stream split off the root source, so
/// how much randomness one parameter consumes never shifts the others.
pub struct RandomizedParameters {
    generators: Vec<RandomGenerator<AnyValue>>,
    streams: Vec<Random>,
}

impl RandomizedParameters {
    pub fn new(generators: Vec<RandomGenerator<AnyValue>>, mut random: Random) -> Self {
        let streams = generators.iter().map(|_| random.split()).collect();
        RandomizedParameters {
            generators,
            streams,
        }
    }
}

impl Iterator for RandomizedParameters {
    type Item = Result<Parameters>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(
            self.generators
                .iter()
                .zip(self.streams.iter_mut())
                .map(|(generator, random)| generator.next(random))
                .collect(),
        )
    }
}

/// Every combination of the parameters' values, last parameter fastest.
pub struct ExhaustiveParameters {
    values: Vec<Vec<Shrinkable<AnyValue>>>,
    combinations: Odometer,
    count: u64,
}

impl ExhaustiveParameters {
    pub fn new(generators: Vec<ExhaustiveGenerator<AnyValue>>) -> Self {
        let values: Vec<Vec<Shrinkable<AnyValue>>> =
            generators.iter().map(|g| g.shrinkables().collect()).collect();
        let count = values
            .iter()
            .map(|v| v.len() as u64)
            .try_fold(1u64, |acc, len| acc.checked_mul(len))
            .unwrap_or(u64::MAX);
        let combinations = Odometer::new(values.iter().map(Vec::len).collect());
        ExhaustiveParameters {
            values,
            combinations,
            count,
        }
    }

    /// Number of tuples in the full enumeration.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Iterator for ExhaustiveParameters {
    type Item = Result<Parameters>;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.combinations.next()?;
        Some(Ok(indices
            .iter()
            .zip(&self.values)
            .map(|(&index, values)| values[index].clone())
            .collect()))
    }
}

/// The tuple source chosen for a configuration.
pub enum GeneratedParameters {
    Randomized(RandomizedParameters),
    Exhaustive(ExhaustiveParameters),
}

impl fmt::Debug for GeneratedParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratedParameters::Randomized(p) => {
                write!(f, "Randomized({} parameters)", p.generators.len())
            }
            GeneratedParameters::Exhaustive(p) => write!(f, "Exhaustive({} tuples)", p.count),
        }
    }
}

impl GeneratedParameters {
    /// Pick randomized or exhaustive generation for the given domains.
    ///
    /// In `Auto` mode exhaustive generation is used when there is at least
    /// one parameter, every domain supports it, and all combinations fit
    /// into `tries`.
    pub fn for_arbitraries(
        arbitraries: &[BoxedArbitrary],
        config: &PropertyConfiguration,
    ) -> Result<Self> {
        let max_samples = config.tries() as u64;
        match config.generation() {
            GenerationMode::Randomized => Self::randomized(arbitraries, config),
            GenerationMode::Exhaustive => Self::exhaustive(arbitraries, max_samples)
                .map(GeneratedParameters::Exhaustive)
                .ok_or_else(|| FalsifyError::ExhaustiveNotPossible {
                    reason: format!(
                        "the combinations of {} parameters exceed {max_samples} tries or cannot be enumerated",
                        arbitraries.len()
                    ),
                }),
            GenerationMode::Auto => {
                if arbitraries.is_empty() {
                    return Self::randomized(arbitraries, config);
                }
                match Self::exhaustive(arbitraries, max_samples) {
                    Some(exhaustive) => Ok(GeneratedParameters::Exhaustive(exhaustive)),
                    None => Self::randomized(arbitraries, config),
                }
            }
        }
    }

    fn randomized(arbitraries: &[BoxedArbitrary], config: &PropertyConfiguration) -> Result<Self> {
        let size = Size::new(config.gen_size());
        let generators = arbitraries.iter().map(|a| a.generator(size)).collect();
        let random = Random::from_seed_str(config.seed())?;
        Ok(GeneratedParameters::Randomized(RandomizedParameters::new(
            generators, random,
        )))
    }

    fn exhaustive(arbitraries: &[BoxedArbitrary], max_samples: u64) -> Option<ExhaustiveParameters> {
        let generators = arbitraries
            .iter()
            .map(|a| a.exhaustive(max_samples))
            .collect::<Option<Vec<_>>>()?;
        let count = combinations(generators.iter().map(ExhaustiveGenerator::max_count))?;
        if count > max_samples {
            return None;
        }
        Some(ExhaustiveParameters::new(generators))
    }

    pub fn is_exhaustive(&self) -> bool {
        matches!(self, GeneratedParameters::Exhaustive(_))
    }

    /// Upper bound of the number of tuples, when finite.
    pub fn max_count(&self) -> Option<u64> {
        match self {
            GeneratedParameters::Randomized(_) => None,
            GeneratedParameters::Exhaustive(exhaustive) => Some(exhaustive.count()),
        }
    }
}

impl Iterator for GeneratedParameters {
    type Item = Result<Parameters>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            GeneratedParameters::Randomized(randomized) => randomized.next(),
            GeneratedParameters::Exhaustive(exhaustive) => exhaustive.next(),
        }
    }
}
