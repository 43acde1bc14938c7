//! Travel estimator adapter and resolution chain.
//!
//! The normalizer never calls a routing service. It asks, in order:
//! 1. the leaving job's `travel_hint_to_next`,
//! 2. the injected [`TravelEstimator`], if any,
//! 3. the configured fallback.
//!
//! A source whose figures have zero minutes counts as having no data. An
//! estimator error is logged and treated the same way, so one missing
//! estimate can never fail a whole day.

use std::fmt::{self, Debug};

use crate::error::EstimateError;
use crate::models::{NormalizedJob, TravelEstimate, TravelSource};

/// Supplies travel figures for two consecutive jobs.
///
/// `Ok(None)` means "no opinion"; the resolver moves on to the fallback.
pub trait TravelEstimator: Send + Sync + Debug {
    /// Estimates travel from `from` to `to`.
    fn estimate(
        &self,
        from: &NormalizedJob,
        to: &NormalizedJob,
    ) -> Result<Option<TravelEstimate>, EstimateError>;
}

/// Adapts a closure into a [`TravelEstimator`].
///
/// # Example
/// ```
/// use crew_timeline::models::TravelEstimate;
/// use crew_timeline::routing::{estimator_fn, TravelEstimator};
///
/// let flat = estimator_fn(|_, _| Some(TravelEstimate::new(20, 8.0)));
/// # let _ = &flat as &dyn TravelEstimator;
/// ```
pub fn estimator_fn<F>(f: F) -> FnEstimator<F>
where
    F: Fn(&NormalizedJob, &NormalizedJob) -> Option<TravelEstimate> + Send + Sync,
{
    FnEstimator(f)
}

/// A closure-backed estimator. See [`estimator_fn`].
pub struct FnEstimator<F>(F);

impl<F> Debug for FnEstimator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnEstimator")
    }
}

impl<F> TravelEstimator for FnEstimator<F>
where
    F: Fn(&NormalizedJob, &NormalizedJob) -> Option<TravelEstimate> + Send + Sync,
{
    fn estimate(
        &self,
        from: &NormalizedJob,
        to: &NormalizedJob,
    ) -> Result<Option<TravelEstimate>, EstimateError> {
        Ok((self.0)(from, to))
    }
}

/// Resolves the figures for one travel segment.
#[derive(Debug, Clone, Copy)]
pub struct TravelResolver<'a> {
    estimator: Option<&'a dyn TravelEstimator>,
    fallback: &'a TravelEstimate,
}

impl<'a> TravelResolver<'a> {
    /// Creates a resolver. `fallback` should itself be usable.
    pub fn new(estimator: Option<&'a dyn TravelEstimator>, fallback: &'a TravelEstimate) -> Self {
        Self {
            estimator,
            fallback,
        }
    }

    /// Figures for travel from `from` to `to`, and where they came from.
    pub fn resolve(
        &self,
        from: &NormalizedJob,
        to: &NormalizedJob,
    ) -> (TravelEstimate, TravelSource) {
        if let Some(hint) = from.job.travel_hint_to_next.as_ref().filter(|h| h.is_usable()) {
            return (hint.clone(), TravelSource::Hint);
        }

        if let Some(estimator) = self.estimator {
            match estimator.estimate(from, to) {
                Ok(Some(est)) if est.is_usable() => return (est, TravelSource::Estimator),
                Ok(_) => {
                    tracing::debug!(from = from.id(), to = to.id(), "no travel estimate, using fallback");
                }
                Err(err) => {
                    tracing::warn!(from = from.id(), to = to.id(), error = %err, "travel estimator failed, using fallback");
                }
            }
        }

        (self.fallback.clone(), TravelSource::Default)
    }
}
