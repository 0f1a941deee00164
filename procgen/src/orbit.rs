//! Closed-form orbital motion for animated bodies
//!
//! Orbits are stylized ellipses: the body moves on `x = a·cos φ`,
//! `z = b·sin φ` (with `b = a·(1 − e)`) at a constant angular rate, and the
//! ellipse is tilted about the X axis by the inclination. Everything is a
//! pure function of the parameters and the caller's accumulated time.
//!
//! # Example
//! ```
//! use procgen::orbit::*;
//!
//! let orbit = OrbitParams::new(10.0, 0.2, 0.1, 0.5, 0.0);
//! let sample = orbit.sample(1.5, 0.6);
//! assert!(sample.bank.abs() <= 0.6);
//! ```

use std::f32::consts::TAU;

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Gravitational acceleration used for coordinated-turn banking (m/s²)
pub const GRAVITY: f32 = 9.81;

/// Horizontal speed below which orientation falls back to identity
pub const MIN_HORIZONTAL_SPEED: f32 = 1e-4;

pub const MIN_SEMI_MAJOR_AXIS: f32 = 0.001;
pub const MAX_ECCENTRICITY: f32 = 0.99;

/// Orbit shape and timing
///
/// Fields are private so every value, including deserialized ones, passes
/// through the clamping setters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "OrbitConfig")]
pub struct OrbitParams {
    semi_major_axis: f32,
    eccentricity: f32,
    inclination: f32,
    angular_rate: f32,
    phase: f32,
}

/// Unvalidated orbit description as it arrives from scene config
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub semi_major_axis: f32,
    pub eccentricity: f32,
    /// Radians, rotation of the orbit plane about X
    pub inclination: f32,
    /// Radians per second
    pub angular_rate: f32,
    /// Radians at t = 0
    pub phase: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            semi_major_axis: 10.0,
            eccentricity: 0.0,
            inclination: 0.0,
            angular_rate: 0.5,
            phase: 0.0,
        }
    }
}

impl From<OrbitConfig> for OrbitParams {
    fn from(c: OrbitConfig) -> Self {
        Self::new(
            c.semi_major_axis,
            c.eccentricity,
            c.inclination,
            c.angular_rate,
            c.phase,
        )
    }
}

impl Default for OrbitParams {
    fn default() -> Self {
        OrbitConfig::default().into()
    }
}

fn finite_or_zero(name: &str, value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        warn!("OrbitParams: {} must be finite (got {}), using 0", name, value);
        0.0
    }
}

impl OrbitParams {
    /// Create orbit parameters, clamping each value to its legal domain
    pub fn new(
        semi_major_axis: f32,
        eccentricity: f32,
        inclination: f32,
        angular_rate: f32,
        phase: f32,
    ) -> Self {
        let mut params = Self {
            semi_major_axis: 1.0,
            eccentricity: 0.0,
            inclination: 0.0,
            angular_rate: 0.0,
            phase: 0.0,
        };
        params.set_semi_major_axis(semi_major_axis);
        params.set_eccentricity(eccentricity);
        params.set_inclination(inclination);
        params.set_angular_rate(angular_rate);
        params.set_phase(phase);
        params
    }

    pub fn semi_major_axis(&self) -> f32 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f32 {
        self.eccentricity
    }

    pub fn inclination(&self) -> f32 {
        self.inclination
    }

    pub fn angular_rate(&self) -> f32 {
        self.angular_rate
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Semi-minor axis `a·(1 − e)`
    pub fn semi_minor_axis(&self) -> f32 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Must be > 0; smaller values clamp to [`MIN_SEMI_MAJOR_AXIS`]
    pub fn set_semi_major_axis(&mut self, value: f32) {
        self.semi_major_axis = if value > 0.0 && value.is_finite() {
            value
        } else {
            warn!(
                "OrbitParams: semi_major_axis must be > 0 (got {}), clamping to {}",
                value, MIN_SEMI_MAJOR_AXIS
            );
            MIN_SEMI_MAJOR_AXIS
        };
    }

    /// Must be in [0, 1); clamps to [0, [`MAX_ECCENTRICITY`]]
    pub fn set_eccentricity(&mut self, value: f32) {
        let value = finite_or_zero("eccentricity", value);
        self.eccentricity = if (0.0..=MAX_ECCENTRICITY).contains(&value) {
            value
        } else {
            let clamped = value.clamp(0.0, MAX_ECCENTRICITY);
            warn!(
                "OrbitParams: eccentricity must be in [0, 1) (got {}), clamping to {}",
                value, clamped
            );
            clamped
        };
    }

    pub fn set_inclination(&mut self, value: f32) {
        self.inclination = finite_or_zero("inclination", value);
    }

    pub fn set_angular_rate(&mut self, value: f32) {
        self.angular_rate = finite_or_zero("angular_rate", value);
    }

    pub fn set_phase(&mut self, value: f32) {
        self.phase = finite_or_zero("phase", value);
    }

    /// Time for one revolution, `None` for a stationary body
    pub fn period(&self) -> Option<f32> {
        (self.angular_rate != 0.0).then(|| TAU / self.angular_rate.abs())
    }

    #[inline]
    fn angle(&self, time: f32) -> f32 {
        self.angular_rate * time + self.phase
    }

    #[inline]
    fn tilt(&self) -> Quat {
        Quat::from_rotation_x(self.inclination)
    }

    /// Position, velocity, bank and orientation at `time`
    pub fn sample(&self, time: f32, max_bank: f32) -> OrbitSample {
        let position = calculate_orbit_position(self, time);
        let velocity = calculate_orbit_velocity(self, time);
        let acceleration = calculate_orbit_acceleration(self, time);
        let (bank, orientation) = bank_and_orientation(velocity, acceleration, max_bank);
        OrbitSample {
            position,
            velocity,
            bank,
            orientation,
        }
    }
}

/// One evaluation of an orbit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSample {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Roll about the direction of travel, radians
    pub bank: f32,
    pub orientation: Quat,
}

/// Position on the tilted ellipse
pub fn calculate_orbit_position(params: &OrbitParams, time: f32) -> Vec3 {
    let (s, c) = params.angle(time).sin_cos();
    params.tilt()
        * Vec3::new(
            params.semi_major_axis * c,
            0.0,
            params.semi_minor_axis() * s,
        )
}

/// First time derivative of [`calculate_orbit_position`]
pub fn calculate_orbit_velocity(params: &OrbitParams, time: f32) -> Vec3 {
    let (s, c) = params.angle(time).sin_cos();
    let w = params.angular_rate;
    params.tilt()
        * Vec3::new(
            -params.semi_major_axis * w * s,
            0.0,
            params.semi_minor_axis() * w * c,
        )
}

/// Second time derivative of [`calculate_orbit_position`]
pub fn calculate_orbit_acceleration(params: &OrbitParams, time: f32) -> Vec3 {
    let (s, c) = params.angle(time).sin_cos();
    let w2 = params.angular_rate * params.angular_rate;
    params.tilt()
        * Vec3::new(
            -params.semi_major_axis * w2 * c,
            0.0,
            -params.semi_minor_axis() * w2 * s,
        )
}

/// Rate of heading change in the horizontal (XZ) plane, radians per second
///
/// Positive when turning toward +X while heading +Z. Zero when there is no
/// horizontal motion.
pub fn horizontal_yaw_rate(velocity: Vec3, acceleration: Vec3) -> f32 {
    let speed_sq = velocity.x * velocity.x + velocity.z * velocity.z;
    if speed_sq < MIN_HORIZONTAL_SPEED * MIN_HORIZONTAL_SPEED {
        return 0.0;
    }
    (acceleration.x * velocity.z - acceleration.z * velocity.x) / speed_sq
}

/// Coordinated-turn bank angle, clamped to ±`max_bank`
///
/// A non-finite `max_bank` gives a zero limit (no banking).
pub fn calculate_bank_angle(speed: f32, yaw_rate: f32, max_bank: f32) -> f32 {
    let limit = if max_bank.is_finite() {
        max_bank.abs()
    } else {
        warn!("calculate_bank_angle: max_bank must be finite (got {}), using 0", max_bank);
        0.0
    };
    let bank = (speed * yaw_rate).atan2(GRAVITY);
    if bank.is_finite() {
        bank.clamp(-limit, limit)
    } else {
        0.0
    }
}

/// Look rotation with body +Z toward `forward` and body +Y toward world up
fn look_rotation(forward: Vec3) -> Quat {
    let right = Vec3::Y.cross(forward).normalize();
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

fn bank_and_orientation(velocity: Vec3, acceleration: Vec3, max_bank: f32) -> (f32, Quat) {
    let horizontal = Vec3::new(velocity.x, 0.0, velocity.z).length();
    if horizontal < MIN_HORIZONTAL_SPEED {
        return (0.0, Quat::IDENTITY);
    }

    let yaw_rate = horizontal_yaw_rate(velocity, acceleration);
    let bank = calculate_bank_angle(velocity.length(), yaw_rate, max_bank);

    // Positive bank dips the +X wing
    let roll = Quat::from_rotation_z(-bank);
    (bank, (look_rotation(velocity.normalize()) * roll).normalize())
}

/// Body orientation at `time`: facing the velocity, banked into the turn
///
/// Returns [`Quat::IDENTITY`] when the body has no horizontal motion.
pub fn calculate_orbit_orientation(params: &OrbitParams, time: f32, max_bank: f32) -> Quat {
    let velocity = calculate_orbit_velocity(params, time);
    let acceleration = calculate_orbit_acceleration(params, time);
    bank_and_orientation(velocity, acceleration, max_bank).1
}
