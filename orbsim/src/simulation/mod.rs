pub mod error;
pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod time_scale;
pub mod diagnostics;
pub mod engine;
pub mod scenario;
