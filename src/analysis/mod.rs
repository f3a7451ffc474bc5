//! The three dataset analyses: label consistency, correlations, profiling

pub mod correlations;
pub mod eda;
pub mod matches;
pub mod stats;
