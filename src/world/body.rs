use nalgebra::{UnitQuaternion, Vector3};

// ---------------------------------------------------------------------------
// Rigid body: pose, velocities, force/torque accumulators
// ---------------------------------------------------------------------------

/// Index of a body inside its owning [`PhysicsEngine`](crate::world::PhysicsEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) usize);

/// Whether a body participates in stepping.
/// Sleeping bodies are skipped by observer dispatch and integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepState {
    Awake,
    Sleeping,
}

/// A simulated rigid body.
///
/// Velocities and accumulators are world frame; `inertia` holds the
/// principal moments in body frame. `force` and `torque` accumulate
/// between sub-steps and are cleared after each integration.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub position: Vector3<f64>,              // m, world
    pub orientation: UnitQuaternion<f64>,    // body -> world rotation
    pub velocity: Vector3<f64>,              // m/s, world
    pub angular_velocity: Vector3<f64>,      // rad/s, world
    pub force: Vector3<f64>,                 // N, world, cleared each sub-step
    pub torque: Vector3<f64>,                // N*m, world, cleared each sub-step
    pub mass: f64,                           // kg (0 = static)
    pub inertia: Vector3<f64>,               // [Ixx, Iyy, Izz], kg*m^2, body frame
    inv_mass: f64,
    sleep_state: SleepState,
}

impl RigidBody {
    pub fn sleep_state(&self) -> SleepState {
        self.sleep_state
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleep_state == SleepState::Sleeping
    }

    /// Take the body out of the stepping cycle until [`wake_up`](Self::wake_up).
    pub fn sleep(&mut self) {
        self.sleep_state = SleepState::Sleeping;
        self.velocity = Vector3::zeros();
        self.angular_velocity = Vector3::zeros();
    }

    pub fn wake_up(&mut self) {
        self.sleep_state = SleepState::Awake;
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    /// Clear the force and torque accumulators (done after every sub-step).
    pub fn clear_accumulators(&mut self) {
        self.force = Vector3::zeros();
        self.torque = Vector3::zeros();
    }
}

// ---------------------------------------------------------------------------
// Body definition
// ---------------------------------------------------------------------------

/// Construction parameters for a body. Unspecified fields take defaults
/// via struct-update syntax: `BodyDef { mass: 10.0, ..Default::default() }`.
#[derive(Debug, Clone)]
pub struct BodyDef {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub velocity: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,
    pub mass: f64,                // kg; 0 makes the body static
    pub inertia: Vector3<f64>,    // principal moments, kg*m^2
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            mass: 1.0,
            inertia: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl From<BodyDef> for RigidBody {
    fn from(def: BodyDef) -> Self {
        let inv_mass = if def.mass > 0.0 { 1.0 / def.mass } else { 0.0 };
        RigidBody {
            position: def.position,
            orientation: def.orientation,
            velocity: def.velocity,
            angular_velocity: def.angular_velocity,
            force: Vector3::zeros(),
            torque: Vector3::zeros(),
            mass: def.mass,
            inertia: def.inertia,
            inv_mass,
            sleep_state: SleepState::Awake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn def_defaults_to_unit_mass_at_origin() {
        let body: RigidBody = BodyDef::default().into();
        assert_eq!(body.mass, 1.0);
        assert_eq!(body.inv_mass(), 1.0);
        assert_eq!(body.position, Vector3::zeros());
        assert_eq!(body.orientation, UnitQuaternion::identity());
        assert!(!body.is_sleeping());
    }

    #[test]
    fn zero_mass_is_static() {
        let body: RigidBody = BodyDef { mass: 0.0, ..Default::default() }.into();
        assert_eq!(body.inv_mass(), 0.0);
    }

    #[test]
    fn sleep_zeroes_velocities() {
        let mut body: RigidBody = BodyDef {
            velocity: Vector3::new(1.0, 2.0, 3.0),
            angular_velocity: Vector3::new(0.1, 0.0, 0.0),
            ..Default::default()
        }
        .into();
        body.sleep();
        assert!(body.is_sleeping());
        assert_eq!(body.velocity, Vector3::zeros());
        assert_eq!(body.angular_velocity, Vector3::zeros());
        body.wake_up();
        assert_eq!(body.sleep_state(), SleepState::Awake);
    }
}
