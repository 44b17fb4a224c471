use serde::Serialize;

use crate::constants::{
    GRAVITY, MOLAR_MASS_AIR, SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE, SPECIFIC_GAS_CONSTANT_AIR,
    STRATOSPHERE_TEMPERATURE, TROPOSPHERE_HEIGHT, TROPOSPHERE_LAPSE_RATE, UNIVERSAL_GAS_CONSTANT,
};

/// Pressure and temperature of the International Standard Atmosphere at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericSample {
    pub altitude: f64,    // m
    pub pressure: f64,    // kPa
    pub temperature: f64, // K
}

impl AtmosphericSample {
    pub fn at(altitude: f64) -> Self {
        let (pressure, temperature) = pressure_temperature(altitude);
        AtmosphericSample {
            altitude,
            pressure,
            temperature,
        }
    }

    pub fn air_density(&self) -> f64 {
        air_density(self.pressure, self.temperature)
    }
}

/// Returns `(pressure kPa, temperature K)` at `altitude` meters.
///
/// Up to 11 km the troposphere lapse rate applies; above it the lower stratosphere is
/// isothermal at 216.65 K with pressure decaying exponentially from the 11 km value.
/// No upper bound is enforced here.
pub fn pressure_temperature(altitude: f64) -> (f64, f64) {
    if altitude <= TROPOSPHERE_HEIGHT {
        (
            troposphere_pressure(altitude),
            SEA_LEVEL_TEMPERATURE - TROPOSPHERE_LAPSE_RATE * altitude,
        )
    } else {
        (stratosphere_pressure(altitude), STRATOSPHERE_TEMPERATURE)
    }
}

pub fn troposphere_pressure(altitude: f64) -> f64 {
    let exponent = (GRAVITY * MOLAR_MASS_AIR) / (UNIVERSAL_GAS_CONSTANT * TROPOSPHERE_LAPSE_RATE);
    SEA_LEVEL_PRESSURE * (1.0 - (TROPOSPHERE_LAPSE_RATE * altitude) / SEA_LEVEL_TEMPERATURE).powf(exponent)
}

pub fn stratosphere_pressure(altitude: f64) -> f64 {
    let tropopause_pressure = troposphere_pressure(TROPOSPHERE_HEIGHT);
    tropopause_pressure
        * (-GRAVITY * MOLAR_MASS_AIR * (altitude - TROPOSPHERE_HEIGHT)
            / (UNIVERSAL_GAS_CONSTANT * STRATOSPHERE_TEMPERATURE))
            .exp()
}

/// Dry-air density in kg/m³ from pressure in kPa and temperature in K.
pub fn air_density(pressure: f64, temperature: f64) -> f64 {
    (pressure * 1000.0) / (SPECIFIC_GAS_CONSTANT_AIR * temperature)
}
