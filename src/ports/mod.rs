//! Port traits: the seams between the simulation core and the outside world.

pub mod clock_port;
pub mod config_port;
pub mod report_port;
pub mod step_port;
