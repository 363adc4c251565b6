//! Core data types for the Myolab arm trainer.
//!
//! This module provides the pose model for the four-axis training arm and
//! the derived metrics readout:
//! - Joint identifiers with their declared travel envelopes
//! - The pose vector, clamped on every write
//! - The torque/power/battery/signal readout derived from the pose

use serde::{Deserialize, Serialize};

// ============================================================================
// Joint Identifiers
// ============================================================================

/// Identifies one controllable axis of the training arm.
///
/// The enumeration is closed: every axis the arm exposes is listed here, so
/// an unknown joint key cannot be constructed. Range violations on a known
/// key are handled by clamping, not by an error path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointKey {
    /// Shoulder pitch axis
    Shoulder,
    /// Elbow hinge axis
    Elbow,
    /// Wrist rotation axis
    Wrist,
    /// Gripper clamping force channel
    Grip,
}

impl JointKey {
    /// All axes in canonical order (shoulder to gripper).
    pub const ALL: [Self; 4] = [Self::Shoulder, Self::Elbow, Self::Wrist, Self::Grip];

    /// Number of controllable axes.
    pub const COUNT: usize = 4;

    /// Get the string identifier used in logs and serialized payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shoulder => "shoulder",
            Self::Elbow => "elbow",
            Self::Wrist => "wrist",
            Self::Grip => "grip",
        }
    }

    /// Get the human-readable axis name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shoulder => "Shoulder",
            Self::Elbow => "Elbow",
            Self::Wrist => "Wrist",
            Self::Grip => "Grip",
        }
    }

    /// Declared travel envelope for this axis, as `(min, max)`.
    ///
    /// Angles are in degrees; grip strength is a percentage.
    #[must_use]
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::Shoulder => (-90.0, 90.0),
            Self::Elbow => (0.0, 135.0),
            Self::Wrist => (-90.0, 90.0),
            Self::Grip => (0.0, 100.0),
        }
    }

    /// Measurement unit for this axis.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Grip => "%",
            _ => "deg",
        }
    }

    /// Clamp a requested value into this axis's travel envelope.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

// ============================================================================
// Joint State
// ============================================================================

/// Pose vector of the training arm.
///
/// Invariant: every field is always inside its axis envelope. The only
/// mutation path is [`JointState::set`], which clamps before storing; an
/// out-of-range value is never observable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointState {
    /// Shoulder pitch in degrees, within `[-90, 90]`
    pub shoulder_deg: f64,
    /// Elbow flexion in degrees, within `[0, 135]`
    pub elbow_deg: f64,
    /// Wrist rotation in degrees, within `[-90, 90]`
    pub wrist_deg: f64,
    /// Gripper clamping force in percent, within `[0, 100]`
    pub grip_pct: f64,
}

impl JointState {
    /// Neutral pose: all axes at rest.
    pub const NEUTRAL: Self = Self {
        shoulder_deg: 0.0,
        elbow_deg: 0.0,
        wrist_deg: 0.0,
        grip_pct: 0.0,
    };

    /// Set one axis, clamping the value into the axis envelope first.
    ///
    /// Returns the value actually stored.
    pub fn set(&mut self, joint: JointKey, value: f64) -> f64 {
        let clamped = joint.clamp(value);
        match joint {
            JointKey::Shoulder => self.shoulder_deg = clamped,
            JointKey::Elbow => self.elbow_deg = clamped,
            JointKey::Wrist => self.wrist_deg = clamped,
            JointKey::Grip => self.grip_pct = clamped,
        }
        clamped
    }

    /// Read one axis.
    #[must_use]
    pub const fn get(&self, joint: JointKey) -> f64 {
        match joint {
            JointKey::Shoulder => self.shoulder_deg,
            JointKey::Elbow => self.elbow_deg,
            JointKey::Wrist => self.wrist_deg,
            JointKey::Grip => self.grip_pct,
        }
    }
}

// ============================================================================
// Metrics Readout
// ============================================================================

/// Derived physical readout for the current pose.
///
/// Fully derived state: recomputed from the pose on every mutation, never
/// independently written.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Servo load torque in newton-metres, `>= 0`
    pub torque_nm: f64,
    /// Electrical power draw in watts, `>= 0`
    pub power_w: f64,
    /// Remaining battery charge in percent, within `[0, 100]`
    pub battery_pct: f64,
    /// Control-link signal quality in percent, within `[0, 100]`
    pub signal_pct: f64,
}

impl Default for Metrics {
    /// Resting readout for the neutral pose at session start.
    fn default() -> Self {
        Self {
            torque_nm: 8.2,
            power_w: 24.0,
            battery_pct: 100.0,
            signal_pct: 78.0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps_to_upper_bound() {
        let mut state = JointState::NEUTRAL;
        let stored = state.set(JointKey::Shoulder, 140.0);
        assert_eq!(stored, 90.0);
        assert_eq!(state.shoulder_deg, 90.0);
    }

    #[test]
    fn test_set_clamps_to_lower_bound() {
        let mut state = JointState::NEUTRAL;
        let stored = state.set(JointKey::Shoulder, -200.0);
        assert_eq!(stored, -90.0);
        assert_eq!(state.shoulder_deg, -90.0);

        state.set(JointKey::Elbow, -10.0);
        assert_eq!(state.elbow_deg, 0.0);
    }

    #[test]
    fn test_set_stores_in_range_value_unchanged() {
        let mut state = JointState::NEUTRAL;
        state.set(JointKey::Elbow, 45.0);
        state.set(JointKey::Grip, 62.5);
        assert_eq!(state.elbow_deg, 45.0);
        assert_eq!(state.grip_pct, 62.5);
    }

    #[test]
    fn test_every_axis_clamps_both_sides() {
        for joint in JointKey::ALL {
            let (min, max) = joint.range();
            let mut state = JointState::NEUTRAL;

            state.set(joint, min - 1000.0);
            assert_eq!(state.get(joint), min, "{} lower bound", joint.as_str());

            state.set(joint, max + 1000.0);
            assert_eq!(state.get(joint), max, "{} upper bound", joint.as_str());
        }
    }

    #[test]
    fn test_get_is_idempotent() {
        let mut state = JointState::NEUTRAL;
        state.set(JointKey::Wrist, -30.0);

        let first = state;
        let second = state;
        assert_eq!(first, second);
        assert_eq!(state.get(JointKey::Wrist), state.get(JointKey::Wrist));
    }

    #[test]
    fn test_axis_metadata() {
        assert_eq!(JointKey::ALL.len(), JointKey::COUNT);
        assert_eq!(JointKey::Shoulder.as_str(), "shoulder");
        assert_eq!(JointKey::Grip.unit(), "%");
        assert_eq!(JointKey::Elbow.unit(), "deg");
    }

    #[test]
    fn test_default_metrics_are_resting_values() {
        let metrics = Metrics::default();
        assert_eq!(metrics.torque_nm, 8.2);
        assert_eq!(metrics.power_w, 24.0);
        assert_eq!(metrics.battery_pct, 100.0);
        assert_eq!(metrics.signal_pct, 78.0);
    }
}
