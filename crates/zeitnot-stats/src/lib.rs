//! Statistical helpers for the Zeitnot project.
//!
//! Small, dependency-free building blocks used by the summary
//! aggregation: means and rates that return `None` instead of dividing
//! by zero, and a running-mean accumulator for single-pass reductions.
//!
//! # Examples
//!
//! ```
//! use zeitnot_stats::descriptive::{mean, rate};
//!
//! assert_eq!(mean([1.0, 2.0, 3.0]), Some(2.0));
//! assert_eq!(mean(std::iter::empty()), None);
//! assert_eq!(rate(3, 4), Some(0.75));
//! assert_eq!(rate(3, 0), None);
//! ```

pub mod descriptive;
