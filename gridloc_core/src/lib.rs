// gridloc_core/src/lib.rs

//! Discrete Bayes (histogram) filter for localizing an agent on a known,
//! toroidal color grid from noisy color readings and unreliable moves.

// This file defines the public modules of the library.
pub mod distribution;
pub mod error;
pub mod estimation;
pub mod mapping;
pub mod messages;
pub mod models;
pub mod params;
pub mod prelude;
pub mod types;
