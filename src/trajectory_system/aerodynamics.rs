use std::f64::consts::PI;

use serde::Serialize;

use crate::constants::{BALLOON_DRAG_COEFFICIENT, GRAMS_PER_KILOGRAM, GRAVITY};
use crate::control::launch_state::LaunchState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchForces {
    pub buoyant_force: f64, // N
    pub weight_force: f64,  // N
    pub net_force: f64,     // N
    pub radius: f64,        // m
    pub cross_section: f64, // m²
    pub ascent_rate: f64,   // m/s
}

/// Quadratic drag model of a spherical envelope.
#[derive(Debug)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
}

impl Default for Aerodynamics {
    fn default() -> Self {
        Aerodynamics::new(BALLOON_DRAG_COEFFICIENT)
    }
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64) -> Self {
        Aerodynamics { drag_coefficient }
    }

    /// Forces on the inflated balloon at release and the resulting terminal ascent rate.
    pub fn calculate_launch_forces(&self, launch: &LaunchState) -> LaunchForces {
        let air_density = launch.launch_air_density;
        let buoyant_force = air_density * launch.fill_volume * GRAVITY;
        let weight_force = (launch.total_mass / GRAMS_PER_KILOGRAM) * GRAVITY;
        let net_force = buoyant_force - weight_force;

        let radius = sphere_radius(launch.fill_volume);
        let cross_section = PI * radius.powi(2);

        LaunchForces {
            buoyant_force,
            weight_force,
            net_force,
            radius,
            cross_section,
            ascent_rate: self.terminal_velocity(net_force, air_density, cross_section),
        }
    }

    /// Speed at which drag balances `net_force`. Zero whenever the balloon cannot rise.
    pub fn terminal_velocity(&self, net_force: f64, air_density: f64, cross_section: f64) -> f64 {
        if net_force <= 0.0 || air_density <= 0.0 || cross_section <= 0.0 {
            return 0.0;
        }

        let speed = (2.0 * net_force / (self.drag_coefficient * air_density * cross_section)).sqrt();
        if speed.is_finite() {
            speed
        } else {
            0.0
        }
    }
}

pub fn sphere_radius(volume: f64) -> f64 {
    (3.0 * volume / (4.0 * PI)).cbrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::balloon::BalloonConfig;
    use crate::control::launch_state::compute_launch_state;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_reference_launch_forces() {
        let launch = compute_launch_state(&BalloonConfig::default()).unwrap();
        let forces = Aerodynamics::default().calculate_launch_forces(&launch);

        assert_relative_eq!(
            forces.buoyant_force,
            launch.launch_air_density * launch.fill_volume * 9.80665,
            epsilon = EPSILON
        );
        assert_relative_eq!(
            forces.weight_force,
            launch.total_mass / 1000.0 * 9.80665,
            epsilon = EPSILON
        );

        // Net lift is the free lift: 500 g
        assert_abs_diff_eq!(forces.net_force, 0.5 * 9.80665, epsilon = 1e-6);

        assert_relative_eq!(
            4.0 / 3.0 * PI * forces.radius.powi(3),
            launch.fill_volume,
            max_relative = 1e-12
        );
        assert_relative_eq!(forces.cross_section, PI * forces.radius.powi(2), epsilon = EPSILON);

        let expected = (2.0 * forces.net_force
            / (0.5 * launch.launch_air_density * forces.cross_section))
            .sqrt();
        assert_relative_eq!(forces.ascent_rate, expected, epsilon = EPSILON);
        assert!(forces.ascent_rate > 2.0 && forces.ascent_rate < 5.0);
    }

    #[test]
    fn test_no_free_lift_gives_zero_ascent_rate() {
        let config = BalloonConfig {
            free_lift: -200.0,
            ..BalloonConfig::default()
        };
        let launch = compute_launch_state(&config).unwrap();
        let forces = Aerodynamics::default().calculate_launch_forces(&launch);

        assert!(forces.net_force < 0.0);
        assert_eq!(forces.ascent_rate, 0.0);
    }

    #[test]
    fn test_terminal_velocity_degenerate_inputs() {
        let aero = Aerodynamics::new(0.5);

        assert_eq!(aero.terminal_velocity(0.0, 1.2, 2.0), 0.0);
        assert_eq!(aero.terminal_velocity(-3.0, 1.2, 2.0), 0.0);
        assert_eq!(aero.terminal_velocity(3.0, 0.0, 2.0), 0.0);
        assert_eq!(aero.terminal_velocity(3.0, 1.2, 0.0), 0.0);
        assert_eq!(aero.terminal_velocity(f64::INFINITY, 1.2, 2.0), 0.0);
        assert_relative_eq!(
            aero.terminal_velocity(3.0, 1.2, 2.0),
            (6.0_f64 / 1.2).sqrt(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_sphere_radius() {
        assert_relative_eq!(sphere_radius(4.0 / 3.0 * PI), 1.0, epsilon = EPSILON);
        assert_eq!(sphere_radius(0.0), 0.0);
    }
}
