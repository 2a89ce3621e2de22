use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::Vector3;

use crate::control::thrust::calc_thrust;
use crate::world::{BodyHandle, PhysicsEngine, PreStep, RigidBody};

// ---------------------------------------------------------------------------
// Controller configuration (per-axis tuning triples)
// ---------------------------------------------------------------------------

/// Per-axis tuning for a [`TargetVelocityController`].
///
/// Linear axes are [sideslip, lift, throttle]; angular axes are
/// [pitch, heading, roll]. Every triple is independent per axis; the only
/// cross-axis coupling in the controller is the shared orientation
/// transform. Max-thrust components are expected positive — they bound the
/// output magnitude of the thrust law.
///
/// Override any subset with struct-update syntax:
/// `ControllerConfig { linear_responsiveness: Vector3::new(5.0, 5.0, 5.0),
/// ..Default::default() }`.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub max_linear_thrust: Vector3<f64>,              // N
    pub max_angular_thrust: Vector3<f64>,             // N*m
    pub linear_responsiveness: Vector3<f64>,          // gain, dimensionless
    pub angular_responsiveness: Vector3<f64>,         // gain, dimensionless
    pub linear_target_velocity_scaling: Vector3<f64>, // m/s per unit command
    pub angular_target_velocity_scaling: Vector3<f64>, // rad/s per unit command
}

impl Default for ControllerConfig {
    fn default() -> Self {
        // Representative spacecraft-like tuning.
        Self {
            max_linear_thrust: Vector3::new(600.0, 500.0, 800.0),
            max_angular_thrust: Vector3::new(0.2, 0.2, 0.2),
            linear_responsiveness: Vector3::new(3.0, 3.0, 3.0),
            angular_responsiveness: Vector3::new(1000.0, 1000.0, 1000.0),
            linear_target_velocity_scaling: Vector3::new(1200.0, 1000.0, 1600.0),
            angular_target_velocity_scaling: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Target-velocity controller
// ---------------------------------------------------------------------------

/// Drives one body's velocity toward a normalized body-frame command.
///
/// Once per pre-step it rotates the body's world-frame velocities into
/// body frame, runs the saturating thrust law per axis against the scaled
/// target, rotates the resulting force and torque back into world frame,
/// and overwrites the body's accumulators — for ticks in which it runs it
/// is the sole authority over that body's propulsion force/torque.
///
/// Stateless across ticks apart from the target fields: a purely
/// proportional (saturating) law in velocity error, no integral or
/// derivative memory.
pub struct TargetVelocityController {
    handle: BodyHandle,
    /// Normalized command per linear axis, clamped to [-1, 1] before scaling.
    pub target_linear_velocity: Vector3<f64>,
    /// Normalized command per angular axis, clamped to [-1, 1] before scaling.
    pub target_angular_velocity: Vector3<f64>,
    pub config: ControllerConfig,
}

impl TargetVelocityController {
    /// Controller bound to `handle` with zeroed targets. Does not register
    /// anything; see [`attach`](Self::attach).
    pub fn new(handle: BodyHandle, config: ControllerConfig) -> Self {
        Self {
            handle,
            target_linear_velocity: Vector3::zeros(),
            target_angular_velocity: Vector3::zeros(),
            config,
        }
    }

    /// Create the controller and register it as a pre-step observer of its
    /// body. The returned shared handle is how the owner sets targets;
    /// deregister it with [`PhysicsEngine::remove_observer`] when done.
    pub fn attach(
        engine: &mut PhysicsEngine,
        handle: BodyHandle,
        config: ControllerConfig,
    ) -> Rc<RefCell<Self>> {
        let controller = Rc::new(RefCell::new(Self::new(handle, config)));
        engine.observe(handle, controller.clone());
        controller
    }

    /// The body this controller was bound to at construction.
    pub fn body(&self) -> BodyHandle {
        self.handle
    }

    fn update(&self, body: &mut RigidBody) {
        let cfg = &self.config;
        let inverse = body.orientation.inverse();

        let local_vel = inverse * body.velocity;
        let local_ang_vel = inverse * body.angular_velocity;

        let target_lin = clamp_unit(self.target_linear_velocity);
        let target_ang = clamp_unit(self.target_angular_velocity);

        let local_force = Vector3::new(
            calc_thrust(
                cfg.max_linear_thrust.x,
                cfg.linear_responsiveness.x,
                cfg.linear_target_velocity_scaling.x * target_lin.x - local_vel.x,
            ),
            calc_thrust(
                cfg.max_linear_thrust.y,
                cfg.linear_responsiveness.y,
                cfg.linear_target_velocity_scaling.y * target_lin.y - local_vel.y,
            ),
            calc_thrust(
                cfg.max_linear_thrust.z,
                cfg.linear_responsiveness.z,
                cfg.linear_target_velocity_scaling.z * target_lin.z - local_vel.z,
            ),
        );
        let local_torque = Vector3::new(
            calc_thrust(
                cfg.max_angular_thrust.x,
                cfg.angular_responsiveness.x,
                cfg.angular_target_velocity_scaling.x * target_ang.x - local_ang_vel.x,
            ),
            calc_thrust(
                cfg.max_angular_thrust.y,
                cfg.angular_responsiveness.y,
                cfg.angular_target_velocity_scaling.y * target_ang.y - local_ang_vel.y,
            ),
            calc_thrust(
                cfg.max_angular_thrust.z,
                cfg.angular_responsiveness.z,
                cfg.angular_target_velocity_scaling.z * target_ang.z - local_ang_vel.z,
            ),
        );

        // Local-frame thrust back into world frame, overwriting whatever the
        // accumulators held.
        body.force = body.orientation * local_force;
        body.torque = body.orientation * local_torque;
    }
}

impl PreStep for TargetVelocityController {
    fn pre_step(&mut self, body: &mut RigidBody) {
        self.update(body);
    }
}

/// Clamp each component to [-1, 1].
fn clamp_unit(v: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x.clamp(-1.0, 1.0), v.y.clamp(-1.0, 1.0), v.z.clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
