use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use superpressure_simulation::telemetry_system::telemetry::summarize;
use superpressure_simulation::*;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Predicts onset altitude, float altitude and envelope superpressure of a superpressure balloon."
)]
struct Cli {
    #[arg(long, help = "JSON mission file; flags override its values")]
    config: Option<PathBuf>,

    #[arg(long, help = "Lift gas density (kg/m³)")]
    gas_density: Option<f64>,

    #[arg(long, help = "Rated envelope volume (m³)")]
    envelope_volume: Option<f64>,

    #[arg(long, help = "Envelope weight (g)")]
    envelope_weight: Option<f64>,

    #[arg(long, help = "Payload weight (g)")]
    payload_weight: Option<f64>,

    #[arg(long, help = "Free lift (g)")]
    free_lift: Option<f64>,

    #[arg(long, help = "Launch site elevation (m)")]
    launch_elevation: Option<f64>,

    #[arg(long, help = "Measured launch temperature (°C)")]
    launch_temperature: Option<f64>,

    #[arg(long, help = "Enable the relief valve with this differential limit (psi)")]
    valve_limit_psi: Option<f64>,

    #[arg(long, help = "Altitude step of the passive scan (m)")]
    step: Option<f64>,

    #[arg(long, help = "Altitude step of the valve scan (m)")]
    valve_step: Option<f64>,

    #[arg(long, help = "Highest altitude scanned (m)")]
    ceiling: Option<f64>,

    #[arg(long, help = "Print the full report as JSON")]
    json: bool,
}

impl Cli {
    fn mission(&self) -> Result<Mission, Box<dyn std::error::Error>> {
        let mut mission = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => Mission::default(),
        };

        let balloon = &mut mission.balloon;
        let overrides = [
            (self.gas_density, &mut balloon.gas_density),
            (self.envelope_volume, &mut balloon.envelope_volume),
            (self.envelope_weight, &mut balloon.envelope_weight),
            (self.payload_weight, &mut balloon.payload_weight),
            (self.free_lift, &mut balloon.free_lift),
            (self.launch_elevation, &mut balloon.launch_elevation),
            (self.launch_temperature, &mut balloon.launch_temperature),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        if let Some(limit) = self.valve_limit_psi {
            mission.valve = Some(ValveConfig::new(limit));
        }
        if let Some(step) = self.step {
            mission.passive_step = step;
        }
        if let Some(step) = self.valve_step {
            mission.valve_step = step;
        }
        if let Some(ceiling) = self.ceiling {
            mission.ceiling = ceiling;
        }

        Ok(mission)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let mission = cli.mission()?;
    info!("Running mission: {:?}", mission);

    let report = mission.run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summarize(&report));
    }

    Ok(())
}
