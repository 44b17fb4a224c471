use serde::{Deserialize, Serialize};

use crate::constants::{
    CELSIUS_TO_KELVIN, DIFFERENTIAL_BURST_THRESHOLD, DIFFERENTIAL_CAUTION_THRESHOLD,
    HELIUM_DENSITY, HYDROGEN_DENSITY,
};
use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LiftGas {
    Helium,
    Hydrogen,
    Custom(f64), // kg/m³
}

impl LiftGas {
    pub fn density(&self) -> f64 {
        match self {
            LiftGas::Helium => HELIUM_DENSITY,
            LiftGas::Hydrogen => HYDROGEN_DENSITY,
            LiftGas::Custom(density) => *density,
        }
    }
}

/// Operator inputs for one launch. Masses are in grams, volumes in m³.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonConfig {
    pub gas_density: f64,        // kg/m³
    pub envelope_volume: f64,    // m³
    pub envelope_weight: f64,    // g
    pub payload_weight: f64,     // g
    pub free_lift: f64,          // g
    pub launch_elevation: f64,   // m
    pub launch_temperature: f64, // °C
}

impl Default for BalloonConfig {
    fn default() -> Self {
        BalloonConfig {
            gas_density: HELIUM_DENSITY,
            envelope_volume: 3.0,
            envelope_weight: 1500.0,
            payload_weight: 1000.0,
            free_lift: 500.0,
            launch_elevation: 0.0,
            launch_temperature: 15.0,
        }
    }
}

impl BalloonConfig {
    pub fn with_gas(mut self, gas: LiftGas) -> Self {
        self.gas_density = gas.density();
        self
    }

    pub fn launch_temperature_kelvin(&self) -> f64 {
        self.launch_temperature + CELSIUS_TO_KELVIN
    }

    /// Rejects inputs that would divide by zero or go non-finite downstream.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let fields = [
            ("gas_density", self.gas_density),
            ("envelope_volume", self.envelope_volume),
            ("envelope_weight", self.envelope_weight),
            ("payload_weight", self.payload_weight),
            ("free_lift", self.free_lift),
            ("launch_elevation", self.launch_elevation),
            ("launch_temperature", self.launch_temperature),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        if self.envelope_volume <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "envelope volume must be positive, got {} m³",
                self.envelope_volume
            )));
        }
        if self.gas_density <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "gas density must be positive, got {} kg/m³",
                self.gas_density
            )));
        }
        if self.launch_temperature_kelvin() <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "launch temperature must be above absolute zero, got {} °C",
                self.launch_temperature
            )));
        }

        Ok(())
    }
}

/// Envelope stress band for a superpressure differential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SafetyLevel {
    Safe,
    Caution,
    Danger,
}

impl SafetyLevel {
    pub fn classify(differential: f64) -> Self {
        if differential < DIFFERENTIAL_CAUTION_THRESHOLD {
            SafetyLevel::Safe
        } else if differential < DIFFERENTIAL_BURST_THRESHOLD {
            SafetyLevel::Caution
        } else {
            SafetyLevel::Danger
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BalloonConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gas_density, 0.1785);
        assert_eq!(config.launch_temperature_kelvin(), 288.15);
    }

    #[test]
    fn test_with_gas() {
        let config = BalloonConfig::default().with_gas(LiftGas::Hydrogen);
        assert_eq!(config.gas_density, 0.0899);

        let config = config.with_gas(LiftGas::Custom(0.5));
        assert_eq!(config.gas_density, 0.5);
    }

    #[test]
    fn test_rejects_non_positive_envelope_volume() {
        for volume in [0.0, -3.0] {
            let config = BalloonConfig {
                envelope_volume: volume,
                ..BalloonConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SimulationError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_finite_fields() {
        let config = BalloonConfig {
            payload_weight: f64::NAN,
            ..BalloonConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("payload_weight"));

        let config = BalloonConfig {
            launch_elevation: f64::INFINITY,
            ..BalloonConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_absolute_zero_launch() {
        let config = BalloonConfig {
            launch_temperature: -273.15,
            ..BalloonConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_safety_classification() {
        assert_eq!(SafetyLevel::classify(0.0), SafetyLevel::Safe);
        assert_eq!(SafetyLevel::classify(3.99), SafetyLevel::Safe);
        assert_eq!(SafetyLevel::classify(4.0), SafetyLevel::Caution);
        assert_eq!(SafetyLevel::classify(4.69), SafetyLevel::Caution);
        assert_eq!(SafetyLevel::classify(4.7), SafetyLevel::Danger);
        assert_eq!(SafetyLevel::classify(13.0), SafetyLevel::Danger);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: BalloonConfig =
            serde_json::from_str(r#"{ "envelope_volume": 5.0, "free_lift": 250.0 }"#).unwrap();
        assert_eq!(config.envelope_volume, 5.0);
        assert_eq!(config.free_lift, 250.0);
        assert_eq!(config.payload_weight, 1000.0);
    }
}
