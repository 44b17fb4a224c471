use log::info;
use serde::{Deserialize, Serialize};

use super::environment::AtmosphericSample;
use super::launch_state::LaunchState;
use crate::constants::KPA_PER_PSI;
use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValveConfig {
    pub enabled: bool,
    pub limit_psi: f64,
}

impl Default for ValveConfig {
    fn default() -> Self {
        ValveConfig {
            enabled: false,
            limit_psi: 0.5,
        }
    }
}

impl ValveConfig {
    pub fn new(limit_psi: f64) -> Self {
        ValveConfig {
            enabled: true,
            limit_psi,
        }
    }

    pub fn limit_kpa(&self) -> f64 {
        self.limit_psi * KPA_PER_PSI
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.enabled && !(self.limit_psi.is_finite() && self.limit_psi > 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "valve limit must be a positive number of psi, got {}",
                self.limit_psi
            )));
        }
        Ok(())
    }
}

// Built fresh by every run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValveState {
    pub is_open: bool,
    pub activation_altitude: Option<f64>, // m
    pub gas_mass_released: f64,           // g
}

impl ValveState {
    pub fn activated(&self) -> bool {
        self.activation_altitude.is_some()
    }
}

#[derive(Debug)]
pub struct ValveController {
    limit: f64, // kPa
    state: ValveState,
}

impl ValveController {
    pub fn new(config: &ValveConfig) -> Self {
        ValveController {
            limit: config.limit_kpa(),
            state: ValveState::default(),
        }
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn state(&self) -> &ValveState {
        &self.state
    }

    pub fn into_state(self) -> ValveState {
        self.state
    }

    // Returns the charge (g) retained after holding internal pressure at external + limit.
    // Only the first venting altitude is recorded as the activation altitude.
    pub fn regulate(
        &mut self,
        launch: &LaunchState,
        sample: &AtmosphericSample,
        volume: f64,
        gas_mass: f64,
    ) -> f64 {
        let internal = launch.internal_pressure(gas_mass, sample.temperature, volume);
        let differential = internal - sample.pressure;

        if differential < self.limit {
            self.state.is_open = false;
            return gas_mass;
        }

        if self.state.activation_altitude.is_none() {
            info!(
                "Valve activated at {:.0} m ({:.3} kPa differential, limit {:.3} kPa)",
                sample.altitude, differential, self.limit
            );
            self.state.activation_altitude = Some(sample.altitude);
        }
        self.state.is_open = true;

        let required =
            launch.gas_mass_for_pressure(sample.pressure + self.limit, sample.temperature, volume);
        if required < gas_mass {
            self.state.gas_mass_released += gas_mass - required;
            required
        } else {
            gas_mass
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::balloon::BalloonConfig;
    use crate::control::launch_state::compute_launch_state;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_launch() -> LaunchState {
        compute_launch_state(&BalloonConfig::default()).unwrap()
    }

    #[test]
    fn test_limit_conversion() {
        let config = ValveConfig::new(1.0);
        assert_relative_eq!(config.limit_kpa(), 6.89476);
        assert!(config.enabled);
    }

    #[test]
    fn test_validation() {
        assert!(ValveConfig::new(0.5).validate().is_ok());
        assert!(ValveConfig::new(0.0).validate().is_err());
        assert!(ValveConfig::new(-1.0).validate().is_err());
        assert!(ValveConfig::new(f64::NAN).validate().is_err());

        // A disabled valve is never consulted, so its limit is irrelevant
        let disabled = ValveConfig {
            enabled: false,
            limit_psi: -1.0,
        };
        assert!(disabled.validate().is_ok());
    }

    #[test]
    fn test_closed_below_limit() {
        let launch = reference_launch();
        let mut valve = ValveController::new(&ValveConfig::new(100.0));
        let sample = AtmosphericSample::at(1_000.0);

        let retained = valve.regulate(&launch, &sample, 3.0, launch.gas_mass);

        assert_eq!(retained, launch.gas_mass);
        assert!(!valve.state().is_open);
        assert!(!valve.state().activated());
        assert_eq!(valve.state().gas_mass_released, 0.0);
    }

    #[test]
    fn test_vents_down_to_limit() {
        let launch = reference_launch();
        let mut valve = ValveController::new(&ValveConfig::new(0.5));
        let sample = AtmosphericSample::at(2_000.0);

        let retained = valve.regulate(&launch, &sample, 3.0, launch.gas_mass);

        assert!(retained < launch.gas_mass);
        assert!(valve.state().is_open);
        assert_eq!(valve.state().activation_altitude, Some(2_000.0));
        assert_relative_eq!(
            valve.state().gas_mass_released,
            launch.gas_mass - retained,
            max_relative = 1e-12
        );

        let differential =
            launch.internal_pressure(retained, sample.temperature, 3.0) - sample.pressure;
        assert_abs_diff_eq!(differential, valve.limit(), epsilon = 1e-9);
    }

    #[test]
    fn test_activation_altitude_recorded_once() {
        let launch = reference_launch();
        let mut valve = ValveController::new(&ValveConfig::new(0.5));

        let mut gas_mass = launch.gas_mass;
        let mut released = 0.0;
        for altitude in [2_000.0, 2_100.0, 2_200.0] {
            gas_mass = valve.regulate(&launch, &AtmosphericSample::at(altitude), 3.0, gas_mass);
            assert!(valve.state().gas_mass_released >= released);
            released = valve.state().gas_mass_released;
        }

        assert_eq!(valve.state().activation_altitude, Some(2_000.0));
        assert_relative_eq!(
            valve.into_state().gas_mass_released,
            launch.gas_mass - gas_mass,
            max_relative = 1e-9
        );
    }
}
