pub mod body;
pub mod engine;

pub use body::{BodyDef, BodyHandle, RigidBody, SleepState};
pub use engine::{EngineConfig, PhysicsEngine, PostStep, PreStep};
