//! Travel estimation plumbing.
//!
//! - **`estimator`**: the [`TravelEstimator`] seam and the hint → estimator →
//!   fallback resolution chain
//! - **`table`**: [`RouteTable`], an address-pair cache filled by the
//!   distance provider, and [`route_requests`] for prefetching
//! - **`legs`**: [`home_legs`], home-to-first and last-to-home segments

mod estimator;
mod legs;
mod table;

pub use estimator::{estimator_fn, FnEstimator, TravelEstimator, TravelResolver};
pub use legs::{home_legs, home_to_job_id, job_to_home_id};
pub use table::{route_requests, RouteRequest, RouteTable};
