use nalgebra::Vector3;

use ship_sim::{BodyDef, ControllerConfig, EngineConfig, PhysicsEngine, TargetVelocityController};

fn main() {
    // -----------------------------------------------------------------------
    // Scene: one ship, velocity-command flight control
    // -----------------------------------------------------------------------
    let mut engine = PhysicsEngine::new(EngineConfig::default());

    let ship = engine.add_body(BodyDef {
        mass: 100.0,                              // kg
        inertia: Vector3::new(50.0, 50.0, 50.0),  // kg*m^2
        ..Default::default()
    });

    let controller =
        TargetVelocityController::attach(&mut engine, ship, ControllerConfig::default());

    // Full throttle plus a gentle starboard heading command.
    {
        let mut ctl = controller.borrow_mut();
        ctl.target_linear_velocity = Vector3::new(0.0, 0.0, 1.0);
        ctl.target_angular_velocity = Vector3::new(0.0, 0.25, 0.0);
    }

    // -----------------------------------------------------------------------
    // Run and report
    // -----------------------------------------------------------------------
    let sim_seconds = 30.0;
    let dt = engine.fixed_dt();
    let steps = (sim_seconds / dt) as usize;

    println!();
    println!("==========================================================");
    println!("  SHIP FLIGHT — throttle up, heading right");
    println!("==========================================================");
    println!(
        "  {:>6}  {:>9}  {:>10}  {:>9}  {:>9}",
        "t (s)", "speed", "fwd (m/s)", "yaw rate", "thrust(N)"
    );
    println!("  {}", "-".repeat(52));

    for i in 0..steps {
        engine.tick(dt);

        if i % (steps / 15).max(1) == 0 || i == steps - 1 {
            let body = engine.body(ship);
            let local_vel = body.orientation.inverse() * body.velocity;
            let local_ang = body.orientation.inverse() * body.angular_velocity;
            // Accumulators are cleared by the step; recompute the forward
            // thrust the controller would issue now for display.
            let ctl = controller.borrow();
            let cfg = &ctl.config;
            let thrust = ship_sim::calc_thrust(
                cfg.max_linear_thrust.z,
                cfg.linear_responsiveness.z,
                cfg.linear_target_velocity_scaling.z - local_vel.z,
            );
            println!(
                "  {:>6.2}  {:>9.2}  {:>10.2}  {:>9.4}  {:>9.1}",
                (i + 1) as f64 * dt,
                body.velocity.norm(),
                local_vel.z,
                local_ang.y,
                thrust,
            );
        }
    }

    let body = engine.body(ship);
    println!();
    println!(
        "  Final position: ({:.1}, {:.1}, {:.1}) m",
        body.position.x, body.position.y, body.position.z
    );
    println!("  Final speed:    {:.1} m/s", body.velocity.norm());
    println!("  Simulation:     {} sub-steps at {:.0} Hz", steps, 1.0 / dt);
    println!("==========================================================");
    println!();
}
