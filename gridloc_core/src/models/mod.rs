// gridloc_core/src/models/mod.rs

pub mod motion;
pub mod sensor;
