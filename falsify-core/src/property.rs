//! Properties and the try loop that checks them.

use crate::{
    arbitrary::*, config::*, error::*, parameters::*, shrinker::*, value::*,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The outcome of applying a predicate to one parameter tuple.
#[derive(Debug, Clone)]
pub enum TryOutcome {
    Satisfied,
    /// An assumption did not hold; the try is neither a success nor a failure.
    Discarded,
    /// The tuple falsifies the property. A plain `false` carries no cause.
    Falsified(Option<Failure>),
}

impl TryOutcome {
    pub fn is_falsified(&self) -> bool {
        matches!(self, TryOutcome::Falsified(_))
    }
}

impl From<bool> for TryOutcome {
    fn from(holds: bool) -> Self {
        if holds {
            TryOutcome::Satisfied
        } else {
            TryOutcome::Falsified(None)
        }
    }
}

impl From<()> for TryOutcome {
    fn from(_: ()) -> Self {
        TryOutcome::Satisfied
    }
}

impl From<Failure> for TryOutcome {
    fn from(failure: Failure) -> Self {
        TryOutcome::Falsified(Some(failure))
    }
}

impl<T: Into<TryOutcome>> From<std::result::Result<T, Failure>> for TryOutcome {
    fn from(result: std::result::Result<T, Failure>) -> Self {
        match result {
            Ok(outcome) => outcome.into(),
            Err(failure) => failure.into(),
        }
    }
}

/// Run `body` only if `condition` holds, discarding the try otherwise.
///
/// ```
/// use falsify_core::{assuming, TryOutcome};
///
/// let n = 7;
/// let outcome = assuming(n % 2 == 0, || n / 2 * 2 == n);
/// assert!(matches!(outcome, TryOutcome::Discarded));
/// ```
pub fn assuming<R, F>(condition: bool, body: F) -> TryOutcome
where
    F: FnOnce() -> R,
    R: Into<TryOutcome>,
{
    if condition {
        body().into()
    } else {
        TryOutcome::Discarded
    }
}

type CheckedFunction = Box<dyn Fn(&[AnyValue]) -> TryOutcome>;

/// Apply a predicate, turning a panic into a falsification.
fn execute(function: &dyn Fn(&[AnyValue]) -> TryOutcome, values: &[AnyValue]) -> TryOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| function(values))) {
        Ok(outcome) => outcome,
        Err(payload) => TryOutcome::Falsified(Some(Failure::from_panic(payload))),
    }
}

/// Sink for key/value diagnostics of a check.
pub trait Reporter {
    fn report(&mut self, key: &str, value: &str);
}

impl<F: FnMut(&str, &str)> Reporter for F {
    fn report(&mut self, key: &str, value: &str) {
        self(key, value)
    }
}

/// A reporter that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _key: &str, _value: &str) {}
}

/// External signal stopping a check between tries and between shrink steps.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Cancellation::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A predicate over type-erased parameter tuples, checked under a configuration.
pub struct GenericProperty {
    name: String,
    configuration: PropertyConfiguration,
    function: CheckedFunction,
    cancellation: Cancellation,
}

impl GenericProperty {
    pub fn new<F, R>(name: impl Into<String>, configuration: PropertyConfiguration, function: F) -> Self
    where
        F: Fn(&[AnyValue]) -> R + 'static,
        R: Into<TryOutcome>,
    {
        GenericProperty {
            name: name.into(),
            configuration,
            function: Box::new(move |values: &[AnyValue]| function(values).into()),
            cancellation: Cancellation::new(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn configuration(&self) -> &PropertyConfiguration {
        &self.configuration
    }

    /// Run the try loop over `parameters`.
    ///
    /// The loop ends on the first falsification, after `tries` tries, when
    /// the parameters run out, or on cancellation. Only then is the discard
    /// ratio evaluated.
    pub fn check<P>(&self, parameters: P, reporter: &mut dyn Reporter) -> Result<PropertyCheckResult>
    where
        P: IntoIterator<Item = Result<Parameters>>,
    {
        let config = &self.configuration;
        let mut parameters = parameters.into_iter();
        let mut count_tries = 0;
        let mut count_checks = 0;
        let mut interrupted = false;

        while count_tries < config.tries() {
            if self.cancellation.is_cancelled() {
                warn!(property = %self.name, tries = count_tries, "check cancelled");
                interrupted = true;
                break;
            }
            let sample = match parameters.next() {
                Some(sample) => sample?,
                None => {
                    debug!(property = %self.name, tries = count_tries, "parameters exhausted");
                    break;
                }
            };
            let values = values_of(&sample);
            if config.reports(Reporting::Generated) {
                reporter.report("generated", &format!("{values:?}"));
            }
            count_tries += 1;

            match execute(&*self.function, &values) {
                TryOutcome::Satisfied => {
                    count_checks += 1;
                    debug!(property = %self.name, attempt = count_tries, "satisfied");
                }
                TryOutcome::Discarded => {
                    debug!(property = %self.name, attempt = count_tries, "discarded");
                }
                TryOutcome::Falsified(failure) => {
                    count_checks += 1;
                    debug!(property = %self.name, attempt = count_tries, ?values, "falsified");
                    let result = self.falsified(sample, failure, count_tries, count_checks, reporter);
                    self.log_result(&result);
                    return Ok(result);
                }
            }
        }

        let count_discards = count_tries - count_checks;
        let exhausted = interrupted
            || count_checks == 0
            || count_discards > config.max_discard_ratio().saturating_mul(count_checks);
        let result = self.result(
            if exhausted {
                CheckStatus::Exhausted
            } else {
                CheckStatus::Successful
            },
            count_tries,
            count_checks,
            interrupted,
        );
        self.log_result(&result);
        Ok(result)
    }

    fn falsified(
        &self,
        sample: Parameters,
        failure: Option<Failure>,
        count_tries: usize,
        count_checks: usize,
        reporter: &mut dyn Reporter,
    ) -> PropertyCheckResult {
        let mut result = self.result(CheckStatus::Failed, count_tries, count_checks, false);
        let original = values_of(&sample);

        if failure.as_ref().is_some_and(|f| !f.is_recoverable()) {
            result.falsified_sample = Some(original);
            result.throwable = failure;
            return result;
        }

        result.original_sample = Some(original.clone());
        if self.configuration.shrinking() == ShrinkingMode::Off {
            result.falsified_sample = Some(original);
            result.throwable = failure;
            return result;
        }

        let function = |values: &[AnyValue]| execute(&*self.function, values);
        let shrinker = Shrinker::new(
            &function,
            self.configuration.shrink_limit(),
            &self.cancellation,
        );
        let report_steps = self.configuration.reports(Reporting::Falsified);
        let shrunk = shrinker.shrink(sample, failure, |values| {
            if report_steps {
                reporter.report("falsified", &format!("{values:?}"));
            }
        });

        result.falsified_sample = Some(values_of(&shrunk.sample));
        result.throwable = shrunk.failure;
        result.count_shrinking_steps = shrunk.steps;
        result.interrupted = shrunk.interrupted;
        result
    }

    fn result(
        &self,
        check_status: CheckStatus,
        count_tries: usize,
        count_checks: usize,
        interrupted: bool,
    ) -> PropertyCheckResult {
        PropertyCheckResult {
            property_name: self.name.clone(),
            check_status,
            count_tries,
            count_checks,
            count_shrinking_steps: 0,
            random_seed: self.configuration.seed().to_string(),
            original_sample: None,
            falsified_sample: None,
            throwable: None,
            interrupted,
        }
    }

    fn log_result(&self, result: &PropertyCheckResult) {
        info!(
            property = %result.property_name,
            status = ?result.check_status,
            tries = result.count_tries,
            checks = result.count_checks,
            shrinking_steps = result.count_shrinking_steps,
            seed = %result.random_seed,
            "property checked"
        );
    }
}

/// A property over parameter domains.
///
/// ```
/// use falsify_core::{arbitraries, Arbitrary, Property, PropertyConfiguration};
///
/// let config = PropertyConfiguration::builder().with_seed("42").build().unwrap();
/// let result = Property::for_all(
///     "small numbers",
///     config,
///     vec![arbitraries::integers::<i32>().between(1, 100).unwrap().boxed()],
/// )
/// .check(|args| args[0].downcast_ref::<i32>().map_or(false, |n| *n < 5))
/// .unwrap();
/// assert!(result.is_failed());
/// ```
pub struct Property {
    name: String,
    configuration: PropertyConfiguration,
    arbitraries: Vec<BoxedArbitrary>,
    cancellation: Cancellation,
}

impl Property {
    /// A property whose parameters are drawn from `arbitraries`, in order.
    pub fn for_all(
        name: impl Into<String>,
        configuration: PropertyConfiguration,
        arbitraries: Vec<BoxedArbitrary>,
    ) -> Self {
        Property {
            name: name.into(),
            configuration,
            arbitraries,
            cancellation: Cancellation::new(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn check<F, R>(self, predicate: F) -> Result<PropertyCheckResult>
    where
        F: Fn(&[AnyValue]) -> R + 'static,
        R: Into<TryOutcome>,
    {
        self.check_reporting(predicate, &mut NullReporter)
    }

    /// Check, sending diagnostics enabled in the configuration to `reporter`.
    pub fn check_reporting<F, R>(
        self,
        predicate: F,
        reporter: &mut dyn Reporter,
    ) -> Result<PropertyCheckResult>
    where
        F: Fn(&[AnyValue]) -> R + 'static,
        R: Into<TryOutcome>,
    {
        let parameters = GeneratedParameters::for_arbitraries(&self.arbitraries, &self.configuration)?;
        let configuration = match parameters.max_count() {
            Some(count) => {
                debug!(property = %self.name, count, "generating exhaustively");
                self.configuration
                    .capped_tries(usize::try_from(count).unwrap_or(usize::MAX))
            }
            None => self.configuration,
        };
        GenericProperty::new(self.name, configuration, predicate)
            .with_cancellation(self.cancellation)
            .check(parameters, reporter)
    }
}
