use log::{debug, warn};
use serde::Serialize;

use super::balloon::BalloonConfig;
use super::environment::{air_density, pressure_temperature, AtmosphericSample};
use crate::constants::GRAMS_PER_KILOGRAM;
use crate::errors::SimulationError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchState {
    pub launch_pressure: f64,    // kPa
    pub launch_temperature: f64, // K, as measured by the operator
    pub launch_air_density: f64, // kg/m³
    pub neck_lift: f64,          // g
    pub fill_volume: f64,        // m³
    pub fill_ratio: f64,         // % of envelope volume
    pub gas_mass: f64,           // g
    pub total_mass: f64,         // g
    pub system_density: f64,     // kg/m³
}

// Launch air density uses the measured temperature, not the ISA one at that elevation
pub fn compute_launch_state(config: &BalloonConfig) -> Result<LaunchState, SimulationError> {
    config.validate()?;

    let launch_temperature = config.launch_temperature_kelvin();
    let (launch_pressure, _) = pressure_temperature(config.launch_elevation);
    let launch_air_density = air_density(launch_pressure, launch_temperature);

    let density_margin = launch_air_density - config.gas_density;
    if density_margin <= 0.0 {
        return Err(SimulationError::InsufficientLift {
            air_density: launch_air_density,
            gas_density: config.gas_density,
        });
    }

    let neck_lift = config.free_lift + config.payload_weight;
    let fill_volume = (config.free_lift + config.payload_weight + config.envelope_weight)
        / (density_margin * GRAMS_PER_KILOGRAM);
    if !fill_volume.is_finite() || fill_volume <= 0.0 {
        return Err(SimulationError::PhysicsError(format!(
            "fill volume must be positive, got {} m³",
            fill_volume
        )));
    }

    let fill_ratio = (fill_volume / config.envelope_volume) * 100.0;
    let gas_mass = fill_volume * config.gas_density * GRAMS_PER_KILOGRAM;
    let total_mass = config.envelope_weight + config.payload_weight + gas_mass;
    let system_density = total_mass / config.envelope_volume / GRAMS_PER_KILOGRAM;

    debug!(
        "Launch at {:.0} m: P={:.3} kPa, rho={:.4} kg/m³, fill={:.4} m³ ({:.1}%)",
        config.launch_elevation, launch_pressure, launch_air_density, fill_volume, fill_ratio
    );
    if fill_ratio > 100.0 {
        warn!(
            "Fill volume {:.4} m³ exceeds envelope volume {} m³; envelope is taut at launch",
            fill_volume, config.envelope_volume
        );
    }

    Ok(LaunchState {
        launch_pressure,
        launch_temperature,
        launch_air_density,
        neck_lift,
        fill_volume,
        fill_ratio,
        gas_mass,
        total_mass,
        system_density,
    })
}

impl LaunchState {
    pub fn fill_volume_liters(&self) -> f64 {
        self.fill_volume * 1000.0
    }

    pub fn unconstrained_volume(&self, sample: &AtmosphericSample) -> f64 {
        self.fill_volume
            * (self.launch_pressure / sample.pressure)
            * (sample.temperature / self.launch_temperature)
    }

    // Moles scale with mass, so a vented charge is a fraction of the launch charge
    pub fn internal_pressure(&self, gas_mass: f64, temperature: f64, volume: f64) -> f64 {
        (self.launch_pressure * self.fill_volume / self.launch_temperature)
            * (temperature / volume)
            * (gas_mass / self.gas_mass)
    }

    pub fn gas_mass_for_pressure(&self, pressure: f64, temperature: f64, volume: f64) -> f64 {
        pressure * volume * self.launch_temperature * self.gas_mass
            / (self.launch_pressure * self.fill_volume * temperature)
    }
}
