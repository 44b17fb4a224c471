// ISA Constants
pub const GRAVITY: f64 = 9.80665; // m/s²
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.3144598; // J/(mol·K)
pub const MOLAR_MASS_AIR: f64 = 0.0289644; // kg/mol
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15; // K
pub const SEA_LEVEL_PRESSURE: f64 = 101.325; // kPa
pub const TROPOSPHERE_LAPSE_RATE: f64 = 0.0065; // K per meter
pub const TROPOSPHERE_HEIGHT: f64 = 11_000.0; // m
pub const STRATOSPHERE_TEMPERATURE: f64 = 216.65; // K
pub const SPECIFIC_GAS_CONSTANT_AIR: f64 = 287.05; // J/(kg·K)

// Unit Conversions
pub const CELSIUS_TO_KELVIN: f64 = 273.15;
pub const KPA_PER_PSI: f64 = 6.89476;
pub const PSI_PER_KPA: f64 = 0.145038;
pub const FEET_PER_METER: f64 = 3.28084;
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

// Lift Gases
pub const HELIUM_DENSITY: f64 = 0.1785; // kg/m³ at STP
pub const HYDROGEN_DENSITY: f64 = 0.0899; // kg/m³ at STP

// Envelope Constants
pub const BALLOON_DRAG_COEFFICIENT: f64 = 0.5; // sphere
pub const DIFFERENTIAL_CAUTION_THRESHOLD: f64 = 4.0; // kPa
pub const DIFFERENTIAL_BURST_THRESHOLD: f64 = 4.7; // kPa, lower end of the 4.7-5.4 kPa burst range

// Simulation Parameters
pub const ALTITUDE_CEILING: f64 = 40_000.0; // m
pub const PASSIVE_SCAN_STEP: f64 = 1.0; // m
pub const VALVE_SCAN_STEP: f64 = 100.0; // m
pub const MAX_SCAN_SAMPLES: f64 = 1_000_000.0; // samples per scan
pub const PROFILE_STEP: f64 = 100.0; // m
pub const PROFILE_OVERSHOOT: f64 = 1.5; // profile extends to 1.5x float altitude
