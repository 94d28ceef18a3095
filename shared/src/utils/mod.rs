//! Common utility functions

pub mod validation;

pub use validation::*;
