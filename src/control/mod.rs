pub mod target_velocity;
pub mod thrust;

pub use target_velocity::{ControllerConfig, TargetVelocityController};
pub use thrust::calc_thrust;
