// gridloc_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::estimation::BeliefEstimator;
pub use crate::messages::FilterInput;
pub use crate::models::motion::MotionModel;
pub use crate::models::sensor::SensorModel;

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::distribution::Distribution;
pub use crate::error::{LocalizationError, Result};
pub use crate::mapping::ColorMap;
pub use crate::params::{FilterParams, Tolerance};
pub use crate::types::{Displacement, DisplacementPolicy, GridShape, Label};

// --- Estimation Algorithms ---
pub use crate::estimation::{estimate, estimate_with, HistogramFilter};
pub use crate::models::motion::predict;
pub use crate::models::sensor::correct;

// --- Concrete Model Implementations (Export common ones for convenience) ---
pub use crate::models::motion::ToroidalMotion;
pub use crate::models::sensor::ColorSensor;
