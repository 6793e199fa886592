//! Search for a smaller falsifying parameter tuple.

use crate::{error::*, parameters::*, property::*, value::*};
use tracing::{debug, warn};

/// Outcome of shrinking a falsifying tuple.
#[derive(Debug, Clone)]
pub struct ShrinkResult {
    /// Smallest falsifying tuple found.
    pub sample: Parameters,
    /// Failure observed for `sample`.
    pub failure: Option<Failure>,
    /// Accepted steps.
    pub steps: usize,
    /// Whether cancellation cut the search short.
    pub interrupted: bool,
}

/// Greedy descent over the parameters of a falsifying tuple.
///
/// Each position is shrunk in turn, left to right, accepting the first
/// candidate that is strictly smaller and still falsifies. Full passes
/// repeat until one changes nothing, so the result is a local fixpoint.
/// Candidates are evaluated by calling the predicate directly; they are not
/// tries.
pub struct Shrinker<'a> {
    function: &'a dyn Fn(&[AnyValue]) -> TryOutcome,
    shrink_limit: usize,
    cancellation: &'a Cancellation,
}

impl<'a> Shrinker<'a> {
    pub fn new(
        function: &'a dyn Fn(&[AnyValue]) -> TryOutcome,
        shrink_limit: usize,
        cancellation: &'a Cancellation,
    ) -> Self {
        Shrinker {
            function,
            shrink_limit,
            cancellation,
        }
    }

    /// Shrink `sample`, which falsified with `failure`.
    ///
    /// `on_step` sees the values of every accepted tuple.
    pub fn shrink<S>(&self, sample: Parameters, failure: Option<Failure>, mut on_step: S) -> ShrinkResult
    where
        S: FnMut(&[AnyValue]),
    {
        let mut best = ShrinkResult {
            sample,
            failure,
            steps: 0,
            interrupted: false,
        };

        'passes: loop {
            let mut changed = false;
            for position in 0..best.sample.len() {
                loop {
                    if self.cancellation.is_cancelled() {
                        warn!(steps = best.steps, "shrinking cancelled");
                        best.interrupted = true;
                        break 'passes;
                    }
                    if best.steps >= self.shrink_limit {
                        debug!(limit = self.shrink_limit, "shrink limit reached");
                        break 'passes;
                    }
                    match self.shrink_position(&best.sample, position) {
                        Step::Accepted(sample, failure) => {
                            best.steps += 1;
                            on_step(&values_of(&sample));
                            debug!(step = best.steps, position, sample = ?values_of(&sample), "shrink step accepted");
                            best.sample = sample;
                            best.failure = failure;
                            changed = true;
                        }
                        Step::Exhausted => break,
                        Step::Fatal => break 'passes,
                    }
                }
            }
            if !changed {
                break;
            }
        }
        best
    }

    fn shrink_position(&self, sample: &Parameters, position: usize) -> Step {
        let current = &sample[position];
        for candidate in current.shrink() {
            if candidate.distance() >= current.distance() {
                continue;
            }
            let mut tuple = sample.clone();
            tuple[position] = candidate;
            if let TryOutcome::Falsified(failure) = (self.function)(&values_of(&tuple)) {
                if failure.as_ref().is_some_and(|f| !f.is_recoverable()) {
                    warn!(position, "fatal failure while shrinking");
                    return Step::Fatal;
                }
                return Step::Accepted(tuple, failure);
            }
        }
        Step::Exhausted
    }
}

enum Step {
    Accepted(Parameters, Option<Failure>),
    Exhausted,
    Fatal,
}
