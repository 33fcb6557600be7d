// gridloc_sim/src/simulation/core/mod.rs

pub mod agent;
pub mod prng;
