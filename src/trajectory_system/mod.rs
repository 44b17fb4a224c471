pub mod aerodynamics;
pub mod ascent;
