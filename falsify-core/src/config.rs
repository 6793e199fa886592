//! Configuration of a property check.

use crate::data::Seed;
use crate::error::*;

pub const DEFAULT_TRIES: usize = 1000;
pub const DEFAULT_MAX_DISCARD_RATIO: usize = 5;
pub const DEFAULT_SHRINK_LIMIT: usize = 10_000;

/// Whether a falsified sample is shrunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShrinkingMode {
    #[default]
    On,
    Off,
}

/// How parameter tuples are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Exhaustive when every domain supports it within `tries`, else random.
    #[default]
    Auto,
    Randomized,
    /// Exhaustive or fail.
    Exhaustive,
}

/// Diagnostics sent to the reporting sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reporting {
    /// Every generated parameter tuple, under the key `"generated"`.
    Generated,
    /// Every accepted shrinking step, under the key `"falsified"`.
    Falsified,
}

/// Validated settings of one property check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyConfiguration {
    tries: usize,
    max_discard_ratio: usize,
    shrinking: ShrinkingMode,
    shrink_limit: usize,
    gen_size: usize,
    generation: GenerationMode,
    reporting: Vec<Reporting>,
    seed: String,
}

impl Default for PropertyConfiguration {
    fn default() -> Self {
        PropertyConfiguration {
            tries: DEFAULT_TRIES,
            max_discard_ratio: DEFAULT_MAX_DISCARD_RATIO,
            shrinking: ShrinkingMode::On,
            shrink_limit: DEFAULT_SHRINK_LIMIT,
            gen_size: DEFAULT_TRIES,
            generation: GenerationMode::Auto,
            reporting: Vec::new(),
            seed: Seed::random_value().to_string(),
        }
    }
}

impl PropertyConfiguration {
    pub fn builder() -> PropertyConfigurationBuilder {
        PropertyConfigurationBuilder::default()
    }

    /// Maximum number of tries, discarded ones included.
    pub fn tries(&self) -> usize {
        self.tries
    }

    pub fn max_discard_ratio(&self) -> usize {
        self.max_discard_ratio
    }

    pub fn shrinking(&self) -> ShrinkingMode {
        self.shrinking
    }

    /// Maximum number of accepted shrinking steps.
    pub fn shrink_limit(&self) -> usize {
        self.shrink_limit
    }

    /// Size hint handed to every domain.
    pub fn gen_size(&self) -> usize {
        self.gen_size
    }

    pub fn generation(&self) -> GenerationMode {
        self.generation
    }

    pub fn reports(&self, reporting: Reporting) -> bool {
        self.reporting.contains(&reporting)
    }

    /// The seed that replays this check.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// The same configuration with `tries` lowered to at most `limit`.
    pub(crate) fn capped_tries(&self, limit: usize) -> Self {
        PropertyConfiguration {
            tries: self.tries.min(limit),
            ..self.clone()
        }
    }
}

/// Builder for [`PropertyConfiguration`].
///
/// ```
/// use falsify_core::{PropertyConfiguration, ShrinkingMode};
///
/// let config = PropertyConfiguration::builder()
///     .with_tries(100)
///     .with_shrinking(ShrinkingMode::Off)
///     .with_seed("42")
///     .build()
///     .unwrap();
/// assert_eq!(config.tries(), 100);
/// assert_eq!(config.gen_size(), 100);
/// assert_eq!(config.seed(), "42");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyConfigurationBuilder {
    tries: Option<usize>,
    max_discard_ratio: Option<usize>,
    shrinking: ShrinkingMode,
    shrink_limit: Option<usize>,
    gen_size: Option<usize>,
    generation: GenerationMode,
    reporting: Vec<Reporting>,
    seed: Option<String>,
}

impl PropertyConfigurationBuilder {
    pub fn with_tries(mut self, tries: usize) -> Self {
        self.tries = Some(tries);
        self
    }

    pub fn with_max_discard_ratio(mut self, ratio: usize) -> Self {
        self.max_discard_ratio = Some(ratio);
        self
    }

    pub fn with_shrinking(mut self, shrinking: ShrinkingMode) -> Self {
        self.shrinking = shrinking;
        self
    }

    pub fn with_shrink_limit(mut self, limit: usize) -> Self {
        self.shrink_limit = Some(limit);
        self
    }

    /// Size hint for domains; defaults to the number of tries.
    pub fn with_gen_size(mut self, size: usize) -> Self {
        self.gen_size = Some(size);
        self
    }

    pub fn with_generation(mut self, generation: GenerationMode) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_reporting(mut self, reporting: Reporting) -> Self {
        if !self.reporting.contains(&reporting) {
            self.reporting.push(reporting);
        }
        self
    }

    /// Replay a previous run. Without a seed a fresh one is generated.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn build(self) -> Result<PropertyConfiguration> {
        let tries = self.tries.unwrap_or(DEFAULT_TRIES);
        if tries < 1 {
            return Err(FalsifyError::invalid_config("tries must be at least 1"));
        }
        let max_discard_ratio = self.max_discard_ratio.unwrap_or(DEFAULT_MAX_DISCARD_RATIO);
        if max_discard_ratio < 1 {
            return Err(FalsifyError::invalid_config(
                "max discard ratio must be at least 1",
            ));
        }
        let gen_size = self.gen_size.unwrap_or(tries);
        if gen_size < 1 {
            return Err(FalsifyError::invalid_config("gen size must be at least 1"));
        }
        let seed = match self.seed {
            Some(seed) => {
                Seed::parse(&seed)?;
                seed
            }
            None => Seed::random_value().to_string(),
        };
        Ok(PropertyConfiguration {
            tries,
            max_discard_ratio,
            shrinking: self.shrinking,
            shrink_limit: self.shrink_limit.unwrap_or(DEFAULT_SHRINK_LIMIT),
            gen_size,
            generation: self.generation,
            reporting: self.reporting,
            seed,
        })
    }
}
