use log::debug;
use serde::{Deserialize, Serialize};

use super::balloon::BalloonConfig;
use super::launch_state::{compute_launch_state, LaunchState};
use super::valve::ValveConfig;
use crate::constants::{ALTITUDE_CEILING, PASSIVE_SCAN_STEP, VALVE_SCAN_STEP};
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::PressurePoint;
use crate::trajectory_system::aerodynamics::{Aerodynamics, LaunchForces};
use crate::trajectory_system::ascent::{
    find_onset_and_float, pressure_profile, simulate_ascent_with_valve, ScanSettings,
    SimulationResult, ValveSimulation,
};

/// Everything needed for one simulation run, as read from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mission {
    pub balloon: BalloonConfig,
    pub valve: Option<ValveConfig>,
    pub passive_step: f64, // m
    pub valve_step: f64,   // m
    pub ceiling: f64,      // m
}

impl Default for Mission {
    fn default() -> Self {
        Mission::new(BalloonConfig::default())
    }
}

/// All engine outputs of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionReport {
    pub launch: LaunchState,
    pub forces: LaunchForces,
    pub result: SimulationResult,
    pub profile: Vec<PressurePoint>,
    pub valve: Option<ValveSimulation>,
}

impl Mission {
    pub fn new(balloon: BalloonConfig) -> Self {
        Mission {
            balloon,
            valve: None,
            passive_step: PASSIVE_SCAN_STEP,
            valve_step: VALVE_SCAN_STEP,
            ceiling: ALTITUDE_CEILING,
        }
    }

    pub fn with_valve(mut self, valve: ValveConfig) -> Self {
        self.valve = Some(valve);
        self
    }

    pub fn passive_settings(&self) -> ScanSettings {
        ScanSettings::new(self.passive_step, self.ceiling)
    }

    pub fn valve_settings(&self) -> ScanSettings {
        ScanSettings::new(self.valve_step, self.ceiling)
    }

    /// Runs the pipeline: launch state, forces, passive ascent, then the valve comparison
    /// when an enabled valve is configured. Every call builds its own state.
    pub fn run(&self) -> Result<MissionReport, SimulationError> {
        let launch = compute_launch_state(&self.balloon)?;
        let forces = Aerodynamics::default().calculate_launch_forces(&launch);
        let result = find_onset_and_float(&launch, &self.balloon, self.passive_settings())?;
        let profile = pressure_profile(&launch, &self.balloon, result.float_altitude, self.ceiling);

        let valve = match &self.valve {
            Some(valve) if valve.enabled => Some(simulate_ascent_with_valve(
                &launch,
                &self.balloon,
                valve,
                self.valve_settings(),
            )?),
            _ => None,
        };

        debug!(
            "Mission complete: onset {:?} m, float {:?} m",
            result.onset_altitude, result.float_altitude
        );

        Ok(MissionReport {
            launch,
            forces,
            result,
            profile,
            valve,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_mission() {
        let report = Mission::default().run().unwrap();

        assert!(report.valve.is_none());
        assert!(report.result.onset_altitude.is_some());
        assert!(report.result.float_altitude.is_some());
        assert!(report.forces.ascent_rate > 0.0);
        assert!(!report.profile.is_empty());
    }

    #[test]
    fn test_mission_with_valve() {
        let report = Mission::default()
            .with_valve(ValveConfig::new(0.5))
            .run()
            .unwrap();

        let valve = report.valve.expect("valve comparison should be present");
        assert!(valve.result.valve_activated);
        assert_eq!(valve.baseline_result.float_altitude.map(|f| f % 100.0), Some(0.0));
    }

    #[test]
    fn test_disabled_valve_is_skipped() {
        let report = Mission::default()
            .with_valve(ValveConfig::default())
            .run()
            .unwrap();

        assert!(report.valve.is_none());
    }

    #[test]
    fn test_invalid_balloon_is_rejected() {
        let mission = Mission::new(BalloonConfig {
            envelope_volume: 0.0,
            ..BalloonConfig::default()
        });

        assert!(matches!(
            mission.run(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_mission_from_json() {
        let mission: Mission = serde_json::from_str(
            r#"{
                "balloon": { "payload_weight": 800.0 },
                "valve": { "enabled": true, "limit_psi": 0.75 },
                "ceiling": 30000.0
            }"#,
        )
        .unwrap();

        assert_eq!(mission.balloon.payload_weight, 800.0);
        assert_eq!(mission.balloon.envelope_volume, 3.0);
        assert_eq!(mission.valve, Some(ValveConfig::new(0.75)));
        assert_eq!(mission.ceiling, 30_000.0);
        assert_eq!(mission.passive_step, 1.0);
        assert_eq!(mission.valve_settings(), ScanSettings::new(100.0, 30_000.0));
    }
}
