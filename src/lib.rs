pub mod control;
pub mod world;

pub use control::{calc_thrust, ControllerConfig, TargetVelocityController};
pub use world::{BodyDef, BodyHandle, EngineConfig, PhysicsEngine, PostStep, PreStep, RigidBody};
