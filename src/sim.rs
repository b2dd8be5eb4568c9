//! Host bindings for a simulated robot.
//!
//! The drivetrain integrates the commanded wheel speeds over wall-clock time,
//! so a script such as `arcade(0.5, 0); wait(1); stop();` moves the
//! simulated robot forward and `distance()` reports how far.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};

use tracing::info;

use crate::{
    error::{RegistrationError, RuntimeError},
    interpreter::{
        evaluator::core::EvalResult,
        storage::{
            builtin::{Arity, exact_args},
            methods::Registry,
        },
        value::core::Value,
    },
};

/// Distance covered per second at full output, in meters.
const MAX_SPEED: f64 = 3.0;
/// Heading change per second with the wheels at full opposite output, in
/// degrees.
const MAX_TURN_RATE: f64 = 360.0;

#[derive(Debug)]
struct DriveState {
    left:        f64,
    right:       f64,
    heading:     f64,
    distance:    f64,
    shots:       u64,
    last_update: Instant,
}

impl DriveState {
    /// Integrates the current wheel outputs up to `now`.
    fn advance(&mut self, now: Instant) {
        let dt = now.duration_since(self.last_update).as_secs_f64();
        self.distance += (self.left + self.right) / 2.0 * MAX_SPEED * dt;
        self.heading = (self.heading + (self.left - self.right) / 2.0 * MAX_TURN_RATE * dt)
            .rem_euclid(360.0);
        self.last_update = now;
    }
}

/// A simulated two-sided drivetrain with a launcher.
///
/// Clones share the same state, so a host can keep one handle for
/// inspection while the registry holds the others.
///
/// # Example
/// ```
/// use autoscript::{
///     interpreter::{runner::Interpreter, storage::methods::Registry},
///     sim::Drivetrain,
/// };
///
/// let drivetrain = Drivetrain::new();
/// let mut registry = Registry::with_builtins().unwrap();
/// drivetrain.register(&mut registry).unwrap();
///
/// let report = Interpreter::new(registry).run("arcade(0.5, 0); shoot(); shoot(); stop()");
/// assert!(report.is_clean());
/// assert_eq!(drivetrain.shots(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Drivetrain {
    state:   Arc<Mutex<DriveState>>,
    started: Instant,
}

impl Default for Drivetrain {
    fn default() -> Self {
        Self::new()
    }
}

impl Drivetrain {
    /// Creates a stopped drivetrain facing heading 0.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self { state:   Arc::new(Mutex::new(DriveState { left:        0.0,
                                                         right:       0.0,
                                                         heading:     0.0,
                                                         distance:    0.0,
                                                         shots:       0,
                                                         last_update: now, })),
               started: now, }
    }

    /// Binds the drivetrain's methods into `registry`.
    ///
    /// Void: `arcade(speed, rotation)`, `tank(left, right)`, `stop()`,
    /// `shoot()`. Returning: `heading()`, `distance()`, `elapsed()`.
    ///
    /// # Errors
    /// Fails if any of these names is already bound.
    pub fn register(&self, registry: &mut Registry) -> Result<(), RegistrationError> {
        let this = self.clone();
        registry.register_void("arcade", move |args, line| {
                    let [speed, rotation] = exact_args("arcade", args, line)?;
                    let speed = output(speed, "arcade", line)?;
                    let rotation = output(rotation, "arcade", line)?;
                    this.set_outputs((speed + rotation).clamp(-1.0, 1.0),
                                     (speed - rotation).clamp(-1.0, 1.0),
                                     line)
                })?;

        let this = self.clone();
        registry.register_void("tank", move |args, line| {
                    let [left, right] = exact_args("tank", args, line)?;
                    let left = output(left, "tank", line)?;
                    let right = output(right, "tank", line)?;
                    this.set_outputs(left, right, line)
                })?;

        let this = self.clone();
        registry.register_void("stop", move |args, line| {
                    Arity::Exact(0).check("stop", args.len(), line)?;
                    this.set_outputs(0.0, 0.0, line)
                })?;

        let this = self.clone();
        registry.register_void("shoot", move |args, line| {
                    Arity::Exact(0).check("shoot", args.len(), line)?;
                    let mut state = this.lock(line)?;
                    state.shots += 1;
                    info!(shot = state.shots, line, "launcher fired");
                    Ok(())
                })?;

        let this = self.clone();
        registry.register_returning("heading", move |args, line| {
                    Arity::Exact(0).check("heading", args.len(), line)?;
                    let mut state = this.lock(line)?;
                    state.advance(Instant::now());
                    Ok(Value::from_real(state.heading))
                })?;

        let this = self.clone();
        registry.register_returning("distance", move |args, line| {
                    Arity::Exact(0).check("distance", args.len(), line)?;
                    let mut state = this.lock(line)?;
                    state.advance(Instant::now());
                    Ok(Value::from_real(state.distance))
                })?;

        let this = self.clone();
        registry.register_returning("elapsed", move |args, line| {
                    Arity::Exact(0).check("elapsed", args.len(), line)?;
                    Ok(Value::from_real(this.started.elapsed().as_secs_f64()))
                })?;

        Ok(())
    }

    /// Number of times `shoot()` was called.
    #[must_use]
    pub fn shots(&self) -> u64 {
        self.state.lock().map_or(0, |state| state.shots)
    }

    /// Current `(left, right)` wheel outputs.
    #[must_use]
    pub fn outputs(&self) -> (f64, f64) {
        self.state
            .lock()
            .map_or((0.0, 0.0), |state| (state.left, state.right))
    }

    fn set_outputs(&self, left: f64, right: f64, line: usize) -> EvalResult<()> {
        let mut state = self.lock(line)?;
        state.advance(Instant::now());
        state.left = left;
        state.right = right;
        info!(left, right, line, "drive outputs set");
        Ok(())
    }

    fn lock(&self, line: usize) -> EvalResult<MutexGuard<'_, DriveState>> {
        self.state
            .lock()
            .map_err(|_| RuntimeError::MethodFailed { name: "drivetrain".to_string(),
                                                      details: "state lock poisoned".to_string(),
                                                      line })
    }
}

/// Reads a motor output, which must lie in `[-1, 1]`.
fn output(value: &Value, method: &str, line: usize) -> EvalResult<f64> {
    let output = value.as_real(line)?;
    if !(-1.0..=1.0).contains(&output) {
        return Err(RuntimeError::InvalidArgument { details: format!("{method} expects outputs \
                                                                     between -1 and 1, found \
                                                                     {output}"),
                                                   line });
    }
    Ok(output)
}
