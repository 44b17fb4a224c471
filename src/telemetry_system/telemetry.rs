use serde::Serialize;

use crate::constants::{CELSIUS_TO_KELVIN, FEET_PER_METER, PSI_PER_KPA};
use crate::control::balloon::SafetyLevel;
use crate::control::mission::MissionReport;

/// One sampled altitude of an ascent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    pub altitude: f64,              // m
    pub gas_mass: f64,              // g
    pub volume: f64,                // m³
    pub external_pressure: f64,     // kPa
    pub internal_pressure: f64,     // kPa
    pub differential_pressure: f64, // kPa
}

/// Altitude-ordered samples of one run. Each run builds its own trace from scratch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AscentTrace {
    points: Vec<TracePoint>,
}

impl AscentTrace {
    pub fn new() -> Self {
        AscentTrace { points: Vec::new() }
    }

    pub fn record(&mut self, point: TracePoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&TracePoint> {
        self.points.last()
    }

    pub fn peak_differential(&self) -> f64 {
        self.points
            .iter()
            .map(|point| point.differential_pressure)
            .fold(0.0, f64::max)
    }

    pub fn at_altitude(&self, altitude: f64) -> Option<&TracePoint> {
        self.points.iter().find(|point| point.altitude == altitude)
    }
}

/// External and internal pressure at one altitude, as charted against each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PressurePoint {
    pub altitude: f64,          // m
    pub external_pressure: f64, // kPa
    pub internal_pressure: f64, // kPa
}

pub fn format_altitude(altitude: Option<f64>) -> String {
    match altitude {
        Some(altitude) => format!("{:.0} m ({:.0} ft)", altitude, altitude * FEET_PER_METER),
        None => "not reached".to_string(),
    }
}

fn format_safety(level: SafetyLevel, differential: f64) -> String {
    match level {
        SafetyLevel::Safe => format!(
            "SAFE: {:.2} kPa is well below burst limit (4.7-5.4 kPa)",
            differential
        ),
        SafetyLevel::Caution => format!(
            "CAUTION: {:.2} kPa is approaching burst limit (4.7-5.4 kPa)",
            differential
        ),
        SafetyLevel::Danger => format!(
            "DANGER: {:.2} kPa exceeds burst limit (4.7-5.4 kPa)",
            differential
        ),
    }
}

/// Human readable report of a mission, used by the command line front end.
pub fn summarize(report: &MissionReport) -> String {
    let launch = &report.launch;
    let result = &report.result;
    let forces = &report.forces;
    let mut lines = Vec::new();

    lines.push("--- Launch Conditions ---".to_string());
    lines.push(format!("Launch Pressure: {:.3} kPa", launch.launch_pressure));
    lines.push(format!("Air Density: {:.4} kg/m³", launch.launch_air_density));
    lines.push(format!("Neck Lift: {:.2} g", launch.neck_lift));
    lines.push(format!(
        "Fill Volume: {:.4} m³ ({:.0} L, {:.1}% of envelope)",
        launch.fill_volume,
        launch.fill_volume_liters(),
        launch.fill_ratio
    ));
    lines.push(format!("Gas Mass: {:.2} g", launch.gas_mass));
    lines.push(format!("Total Mass: {:.2} g", launch.total_mass));
    lines.push(format!("System Density: {:.4} kg/m³", launch.system_density));

    lines.push("\n--- Launch Forces ---".to_string());
    lines.push(format!("Buoyant Force: {:.3} N", forces.buoyant_force));
    lines.push(format!("Weight: {:.3} N", forces.weight_force));
    lines.push(format!("Net Force: {:.3} N", forces.net_force));
    lines.push(format!("Ascent Rate: {:.2} m/s", forces.ascent_rate));

    lines.push("\n--- Ascent ---".to_string());
    lines.push(format!("Onset Altitude: {}", format_altitude(result.onset_altitude)));
    lines.push(format!("Float Altitude: {}", format_altitude(result.float_altitude)));
    if let Some(gain) = result.altitude_gain() {
        lines.push(format!("Altitude Gain: {:.0} m", gain));
    }
    lines.push(format!(
        "Temperature at Float: {:.1} °C",
        result.final_temperature - CELSIUS_TO_KELVIN
    ));
    lines.push(format!("Pressure at Float: {:.3} kPa", result.final_pressure));
    lines.push(format!("Internal Pressure: {:.3} kPa", result.internal_pressure));
    lines.push(format!(
        "Differential Pressure: {:.3} kPa ({:.3} psi)",
        result.differential_pressure,
        result.differential_pressure * PSI_PER_KPA
    ));
    lines.push(format_safety(result.safety(), result.differential_pressure));

    if let Some(comparison) = &report.valve {
        let valve = &comparison.result;
        lines.push("\n--- Relief Valve ---".to_string());
        match valve.valve.as_ref().and_then(|state| state.activation_altitude) {
            Some(altitude) => {
                lines.push(format!("Activated At: {}", format_altitude(Some(altitude))));
            }
            None => lines.push("Valve never opened".to_string()),
        }
        if let Some(state) = &valve.valve {
            lines.push(format!("Gas Released: {:.2} g", state.gas_mass_released));
        }
        lines.push(format!(
            "Float Altitude With Valve: {}",
            format_altitude(valve.float_altitude)
        ));
        lines.push(format!(
            "Peak Differential: {:.3} kPa (without valve {:.3} kPa)",
            comparison.trace.peak_differential(),
            comparison.baseline_trace.peak_differential()
        ));
    }

    lines.join("\n")
}
