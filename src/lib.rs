pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use control::balloon::{BalloonConfig, LiftGas, SafetyLevel};
pub use control::environment::{
    air_density, pressure_temperature, stratosphere_pressure, troposphere_pressure,
    AtmosphericSample,
};
pub use control::launch_state::{compute_launch_state, LaunchState};
pub use control::mission::{Mission, MissionReport};
pub use control::valve::{ValveConfig, ValveController, ValveState};
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::{Aerodynamics, LaunchForces};
pub use trajectory_system::ascent::{
    find_onset_and_float, pressure_profile, simulate_ascent_with_valve, AscentRun,
    AscentSimulator, ScanSettings, SimulationResult, ValveSimulation,
};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{AscentTrace, PressurePoint, TracePoint};
