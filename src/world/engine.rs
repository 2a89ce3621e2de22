use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::world::body::{BodyDef, BodyHandle, RigidBody};

// ---------------------------------------------------------------------------
// Engine configuration
// ---------------------------------------------------------------------------

/// Stepping parameters for a [`PhysicsEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub simulation_rate: f64,        // fixed sub-steps per second
    pub max_sub_steps: usize,        // sub-step cap per tick; backlog beyond this is dropped
    pub gravity: Vector3<f64>,       // m/s^2, world frame
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulation_rate: 60.0,
            max_sub_steps: 10,
            gravity: Vector3::zeros(),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-body step observers
// ---------------------------------------------------------------------------

/// Invoked once per sub-step for a specific awake body, before forces are
/// integrated. Communicates only by mutating the body.
pub trait PreStep {
    fn pre_step(&mut self, body: &mut RigidBody);
}

/// Invoked once per sub-step for a specific awake body, after integration.
pub trait PostStep {
    fn post_step(&mut self, body: &mut RigidBody);
}

// ---------------------------------------------------------------------------
// Physics engine: body store + fixed-rate stepping with bounded sub-steps
// ---------------------------------------------------------------------------

/// Owns the simulated bodies and advances them at a fixed rate.
///
/// `tick(delta)` may be called at an uneven cadence; elapsed time is
/// accumulated and consumed in fixed sub-steps of `1 / simulation_rate`
/// seconds, at most `max_sub_steps` per tick. Single-threaded: observers
/// are dispatched synchronously from inside `tick`.
pub struct PhysicsEngine {
    pub config: EngineConfig,
    bodies: Vec<RigidBody>,
    pre_observers: Vec<(BodyHandle, Rc<RefCell<dyn PreStep>>)>,
    post_observers: Vec<(BodyHandle, Rc<RefCell<dyn PostStep>>)>,
    accumulator: f64,
}

impl PhysicsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            pre_observers: Vec::new(),
            post_observers: Vec::new(),
            accumulator: 0.0,
        }
    }

    /// Duration of one fixed sub-step, seconds.
    pub fn fixed_dt(&self) -> f64 {
        1.0 / self.config.simulation_rate
    }

    pub fn add_body(&mut self, def: BodyDef) -> BodyHandle {
        self.bodies.push(def.into());
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body(&self, handle: BodyHandle) -> &RigidBody {
        &self.bodies[handle.0]
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        &mut self.bodies[handle.0]
    }

    /// Register `observer` to run once per sub-step for `handle`, before
    /// integration. The caller keeps its own `Rc` clone to reach the
    /// observer between ticks.
    pub fn observe(&mut self, handle: BodyHandle, observer: Rc<RefCell<dyn PreStep>>) {
        self.pre_observers.push((handle, observer));
    }

    pub fn observe_post(&mut self, handle: BodyHandle, observer: Rc<RefCell<dyn PostStep>>) {
        self.post_observers.push((handle, observer));
    }

    /// Deregister a pre-step observer by pointer identity.
    /// Returns true if it was registered.
    pub fn remove_observer(&mut self, observer: &Rc<RefCell<dyn PreStep>>) -> bool {
        let before = self.pre_observers.len();
        self.pre_observers
            .retain(|(_, obs)| !Rc::ptr_eq(obs, observer));
        self.pre_observers.len() != before
    }

    /// Advance the simulation by `delta` seconds of wall time.
    /// Returns the number of fixed sub-steps taken.
    pub fn tick(&mut self, delta: f64) -> usize {
        let h = self.fixed_dt();
        self.accumulator += delta;

        let mut sub_steps = 0;
        while self.accumulator >= h && sub_steps < self.config.max_sub_steps {
            self.step_fixed(h);
            self.accumulator -= h;
            sub_steps += 1;
        }
        // Drop any backlog the cap left behind so a stall cannot snowball.
        if sub_steps == self.config.max_sub_steps {
            self.accumulator = 0.0;
        }
        sub_steps
    }

    /// One fixed sub-step: pre-step dispatch, integration, post-step dispatch.
    fn step_fixed(&mut self, dt: f64) {
        for (handle, observer) in &self.pre_observers {
            let body = &mut self.bodies[handle.0];
            if !body.is_sleeping() {
                observer.borrow_mut().pre_step(body);
            }
        }

        for body in &mut self.bodies {
            if body.is_sleeping() {
                continue;
            }
            integrate(body, self.config.gravity, dt);
            body.clear_accumulators();
        }

        for (handle, observer) in &self.post_observers {
            let body = &mut self.bodies[handle.0];
            if !body.is_sleeping() {
                observer.borrow_mut().post_step(body);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Symplectic-Euler integration
// ---------------------------------------------------------------------------

/// Integrate one body over `dt`: accumulated force plus gravity into
/// velocity, torque through the principal inertia into angular velocity,
/// then pose. Gyroscopic coupling is omitted at this fidelity.
fn integrate(body: &mut RigidBody, gravity: Vector3<f64>, dt: f64) {
    if body.inv_mass() > 0.0 {
        let accel = body.force * body.inv_mass() + gravity;
        body.velocity += accel * dt;

        // Torque in body frame over the principal moments, back to world.
        let torque_body = body.orientation.inverse() * body.torque;
        let alpha_body = Vector3::new(
            torque_body.x / body.inertia.x,
            torque_body.y / body.inertia.y,
            torque_body.z / body.inertia.z,
        );
        body.angular_velocity += (body.orientation * alpha_body) * dt;
    }

    body.position += body.velocity * dt;

    // Quaternion kinematics with world-frame omega: dq/dt = 0.5 * w_quat * q
    let w = body.angular_velocity;
    let omega_quat = Quaternion::new(0.0, w.x, w.y, w.z);
    let q_raw = body.orientation.quaternion() + omega_quat * body.orientation.quaternion() * (0.5 * dt);
    body.orientation = UnitQuaternion::new_normalize(q_raw);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
