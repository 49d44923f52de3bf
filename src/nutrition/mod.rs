//! Pure nutrition arithmetic: no storage, no clocks, no I/O.
//!
//! Handlers feed rows into these calculators and write the results back
//! through the repos; everything here is deterministic and unit-tested.

pub mod daily;
pub mod normalize;
pub mod portion;
pub mod reconcile;
pub mod totals;
pub mod vector;
