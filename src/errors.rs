use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(
        "Cannot achieve lift: launch air density {air_density:.4} kg/m³ does not exceed gas density {gas_density:.4} kg/m³"
    )]
    InsufficientLift { air_density: f64, gas_density: f64 },

    #[error("Physics error: {0}")]
    PhysicsError(String),
}
