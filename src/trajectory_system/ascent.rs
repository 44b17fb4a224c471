use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ALTITUDE_CEILING, GRAMS_PER_KILOGRAM, MAX_SCAN_SAMPLES, PASSIVE_SCAN_STEP, PROFILE_OVERSHOOT,
    PROFILE_STEP, PSI_PER_KPA, VALVE_SCAN_STEP,
};
use crate::control::balloon::{BalloonConfig, SafetyLevel};
use crate::control::environment::AtmosphericSample;
use crate::control::launch_state::LaunchState;
use crate::control::valve::{ValveConfig, ValveController, ValveState};
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::{AscentTrace, PressurePoint, TracePoint};

// Samples at 0, step, 2*step, ... up to ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSettings {
    pub step: f64,    // m
    pub ceiling: f64, // m
}

impl ScanSettings {
    pub fn new(step: f64, ceiling: f64) -> Self {
        ScanSettings { step, ceiling }
    }

    pub fn passive() -> Self {
        ScanSettings::new(PASSIVE_SCAN_STEP, ALTITUDE_CEILING)
    }

    pub fn valve() -> Self {
        ScanSettings::new(VALVE_SCAN_STEP, ALTITUDE_CEILING)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "scan step must be positive, got {} m",
                self.step
            )));
        }
        if !(self.ceiling.is_finite() && self.ceiling >= 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "altitude ceiling must be non-negative, got {} m",
                self.ceiling
            )));
        }
        if self.last_index() >= MAX_SCAN_SAMPLES {
            return Err(SimulationError::InvalidConfiguration(format!(
                "scan of {} m every {} m exceeds {} samples",
                self.ceiling, self.step, MAX_SCAN_SAMPLES
            )));
        }
        Ok(())
    }

    fn last_index(&self) -> f64 {
        (self.ceiling / self.step + 1e-9).floor()
    }

    // Indexed rather than accumulated so the grid never drifts
    pub fn altitudes(&self) -> impl Iterator<Item = f64> {
        let step = self.step;
        let last_index = self.last_index().min(MAX_SCAN_SAMPLES - 1.0) as u64;
        (0..=last_index).map(move |index| index as f64 * step)
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings::passive()
    }
}

// final_* fields hold the float altitude, or the last sample when float is not reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub onset_altitude: Option<f64>, // m
    pub float_altitude: Option<f64>, // m
    pub final_temperature: f64,      // K
    pub final_pressure: f64,         // kPa
    pub final_gas_mass: f64,         // g
    pub internal_pressure: f64,      // kPa
    pub differential_pressure: f64,  // kPa
    pub valve_activated: bool,
    pub valve: Option<ValveState>,
}

impl SimulationResult {
    pub fn altitude_gain(&self) -> Option<f64> {
        Some(self.float_altitude? - self.onset_altitude?)
    }

    pub fn differential_pressure_psi(&self) -> f64 {
        self.differential_pressure * PSI_PER_KPA
    }

    pub fn safety(&self) -> SafetyLevel {
        SafetyLevel::classify(self.differential_pressure)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AscentRun {
    pub result: SimulationResult,
    pub trace: AscentTrace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValveSimulation {
    pub result: SimulationResult,
    pub trace: AscentTrace,
    pub baseline_result: SimulationResult,
    pub baseline_trace: AscentTrace,
}

impl ValveSimulation {
    pub fn float_altitude_change(&self) -> Option<f64> {
        Some(self.result.float_altitude? - self.baseline_result.float_altitude?)
    }

    pub fn peak_differential_reduction(&self) -> f64 {
        self.baseline_trace.peak_differential() - self.trace.peak_differential()
    }
}

#[derive(Debug)]
pub struct AscentSimulator<'a> {
    launch: &'a LaunchState,
    envelope_volume: f64,
    structure_mass: f64, // g, envelope + payload
    settings: ScanSettings,
}

impl<'a> AscentSimulator<'a> {
    pub fn new(
        launch: &'a LaunchState,
        config: &BalloonConfig,
        settings: ScanSettings,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        settings.validate()?;

        Ok(AscentSimulator {
            launch,
            envelope_volume: config.envelope_volume,
            structure_mass: config.envelope_weight + config.payload_weight,
            settings,
        })
    }

    pub fn settings(&self) -> ScanSettings {
        self.settings
    }

    // A disabled or absent valve gives the passive ascent
    pub fn run(&self, valve: Option<&ValveConfig>) -> Result<AscentRun, SimulationError> {
        let mut controller = match valve {
            Some(config) if config.enabled => {
                config.validate()?;
                Some(ValveController::new(config))
            }
            _ => None,
        };

        debug!(
            "Scanning to {} m every {} m (valve: {})",
            self.settings.ceiling,
            self.settings.step,
            controller.is_some()
        );

        let launch = self.launch;
        let mut trace = AscentTrace::new();
        let mut gas_mass = launch.gas_mass;
        let mut onset_altitude = None;
        let mut float_altitude = None;

        for altitude in self.settings.altitudes() {
            let sample = AtmosphericSample::at(altitude);
            let unconstrained = launch.unconstrained_volume(&sample) * (gas_mass / launch.gas_mass);

            let (volume, internal_pressure, system_density) =
                if unconstrained >= self.envelope_volume {
                    if onset_altitude.is_none() {
                        info!("Envelope reached capacity at {:.0} m", altitude);
                        onset_altitude = Some(altitude);
                    }
                    if let Some(valve) = controller.as_mut() {
                        gas_mass = valve.regulate(launch, &sample, self.envelope_volume, gas_mass);
                    }
                    let internal = launch.internal_pressure(
                        gas_mass,
                        sample.temperature,
                        self.envelope_volume,
                    );
                    let density =
                        (self.structure_mass + gas_mass) / self.envelope_volume / GRAMS_PER_KILOGRAM;
                    (self.envelope_volume, internal, density)
                } else {
                    // Nothing vents while slack, so buoyancy is judged on the rated envelope
                    (unconstrained, sample.pressure, launch.system_density)
                };

            trace.record(TracePoint {
                altitude,
                gas_mass,
                volume,
                external_pressure: sample.pressure,
                internal_pressure,
                differential_pressure: internal_pressure - sample.pressure,
            });

            if sample.air_density() <= system_density {
                info!("Neutral buoyancy at {:.0} m", altitude);
                float_altitude = Some(altitude);
                break;
            }
        }

        if float_altitude.is_none() {
            warn!(
                "Float altitude not reached below the {} m ceiling",
                self.settings.ceiling
            );
        }

        let last = trace.last().copied().ok_or_else(|| {
            SimulationError::PhysicsError("ascent scan produced no samples".to_string())
        })?;
        let (final_pressure, final_temperature) = {
            let sample = AtmosphericSample::at(last.altitude);
            (sample.pressure, sample.temperature)
        };

        let valve = controller.map(ValveController::into_state);
        let result = SimulationResult {
            onset_altitude,
            float_altitude,
            final_temperature,
            final_pressure,
            final_gas_mass: last.gas_mass,
            internal_pressure: last.internal_pressure,
            differential_pressure: last.differential_pressure,
            valve_activated: valve.as_ref().map_or(false, ValveState::activated),
            valve,
        };

        Ok(AscentRun { result, trace })
    }
}

pub fn find_onset_and_float(
    launch: &LaunchState,
    config: &BalloonConfig,
    settings: ScanSettings,
) -> Result<SimulationResult, SimulationError> {
    let simulator = AscentSimulator::new(launch, config, settings)?;
    Ok(simulator.run(None)?.result)
}

pub fn simulate_ascent_with_valve(
    launch: &LaunchState,
    config: &BalloonConfig,
    valve: &ValveConfig,
    settings: ScanSettings,
) -> Result<ValveSimulation, SimulationError> {
    let simulator = AscentSimulator::new(launch, config, settings)?;
    let with_valve = simulator.run(Some(valve))?;
    let baseline = simulator.run(None)?;

    Ok(ValveSimulation {
        result: with_valve.result,
        trace: with_valve.trace,
        baseline_result: baseline.result,
        baseline_trace: baseline.trace,
    })
}

/// External vs. internal pressure every 100 m up to 1.5x the float altitude.
pub fn pressure_profile(
    launch: &LaunchState,
    config: &BalloonConfig,
    float_altitude: Option<f64>,
    ceiling: f64,
) -> Vec<PressurePoint> {
    let top = float_altitude.map_or(ceiling, |float| ceiling.min(float * PROFILE_OVERSHOOT));

    ScanSettings::new(PROFILE_STEP, top.max(0.0))
        .altitudes()
        .map(|altitude| {
            let sample = AtmosphericSample::at(altitude);
            let internal_pressure =
                if launch.unconstrained_volume(&sample) >= config.envelope_volume {
                    launch.internal_pressure(
                        launch.gas_mass,
                        sample.temperature,
                        config.envelope_volume,
                    )
                } else {
                    sample.pressure
                };

            PressurePoint {
                altitude,
                external_pressure: sample.pressure,
                internal_pressure,
            }
        })
        .collect()
}
