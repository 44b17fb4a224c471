pub mod balloon;
pub mod environment;
pub mod launch_state;
pub mod mission;
pub mod valve;
