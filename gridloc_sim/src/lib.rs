// gridloc_sim/src/lib.rs

//! The runnable shell around `gridloc_core`: scenario files, a prefab catalog,
//! a ground-truth simulator and run reports.

// This prelude is for convenience for other files WITHIN the gridloc_sim crate.
pub mod prelude;

pub mod cli;
pub mod error;
pub mod simulation;
