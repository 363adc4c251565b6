//! Calibration missions.
//!
//! A mission is a generated target pose the trainee must match within a
//! tolerance for a point reward. The engine is a two-state machine:
//!
//! ```text
//! Idle ──start──▶ Active ──complete / cancel──▶ Idle
//! ```
//!
//! Evaluation is a pure predicate over the current pose and never
//! transitions state; only an explicit `complete` or `cancel` does.

use serde::{Deserialize, Serialize};

use crate::error::{MissionError, MissionResult};
use crate::math::NoiseSource;
use crate::types::{JointKey, JointState};

// ============================================================================
// Mission Data
// ============================================================================

/// Target pose for a mission. Absent axes are not part of the exercise and
/// are vacuously satisfied during alignment checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionTarget {
    /// Shoulder target in degrees
    pub shoulder_deg: Option<f64>,
    /// Elbow target in degrees
    pub elbow_deg: Option<f64>,
    /// Wrist target in degrees
    pub wrist_deg: Option<f64>,
    /// Grip target in percent
    pub grip_pct: Option<f64>,
}

impl MissionTarget {
    /// Target value for one axis, if that axis is part of the exercise.
    #[must_use]
    pub const fn get(&self, joint: JointKey) -> Option<f64> {
        match joint {
            JointKey::Shoulder => self.shoulder_deg,
            JointKey::Elbow => self.elbow_deg,
            JointKey::Wrist => self.wrist_deg,
            JointKey::Grip => self.grip_pct,
        }
    }
}

/// A generated calibration exercise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Human-readable instruction shown to the trainee
    pub description: String,
    /// Target pose, one entry per exercised axis
    pub target: MissionTarget,
    /// Per-axis alignment tolerance in axis units
    pub tolerance: f64,
    /// Point reward on completion
    pub points: u32,
}

/// Outcome of evaluating the pose against the active mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    /// True iff every exercised axis is within tolerance
    pub aligned: bool,
}

/// Reward returned when a mission completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionReward {
    /// Points credited to the trainee
    pub points: u32,
}

// ============================================================================
// Mission Engine
// ============================================================================

/// Target generation and reward constants.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MissionConfig {
    /// Shoulder target range in degrees, `(min, max)`
    pub shoulder_range_deg: (f64, f64),
    /// Elbow target range in degrees, `(min, max)`
    pub elbow_range_deg: (f64, f64),
    /// Per-axis alignment tolerance
    pub tolerance: f64,
    /// Point reward per completed mission
    pub points: u32,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            shoulder_range_deg: (-30.0, 30.0),
            elbow_range_deg: (0.0, 90.0),
            tolerance: 5.0,
            points: 50,
        }
    }
}

/// Generates calibration targets and tracks the single active mission.
#[derive(Clone, Debug, Default)]
pub struct MissionEngine {
    config: MissionConfig,
    active: Option<Mission>,
}

impl MissionEngine {
    /// Create an engine with default target ranges.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MissionConfig::default())
    }

    /// Create an engine with custom target ranges.
    #[must_use]
    pub const fn with_config(config: MissionConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// The active mission, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&Mission> {
        self.active.as_ref()
    }

    /// Whether a mission is currently active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Generate a new calibration target and make it active.
    ///
    /// Policy: if a mission is already active it is discarded and replaced
    /// unconditionally; callers wanting to preserve an exercise must not
    /// start a new one.
    ///
    /// Targets exercise the shoulder and elbow axes, drawn uniformly from
    /// the configured ranges and rounded to whole degrees.
    pub fn start(&mut self, noise: &mut dyn NoiseSource) -> &Mission {
        let (s_min, s_max) = self.config.shoulder_range_deg;
        let (e_min, e_max) = self.config.elbow_range_deg;

        let shoulder = noise.next_range(s_min, s_max).round();
        let elbow = noise.next_range(e_min, e_max).round();

        let mission = Mission {
            description: format!(
                "Align the shoulder to {shoulder:.0} deg and the elbow to {elbow:.0} deg"
            ),
            target: MissionTarget {
                shoulder_deg: Some(shoulder),
                elbow_deg: Some(elbow),
                wrist_deg: None,
                grip_pct: None,
            },
            tolerance: self.config.tolerance,
            points: self.config.points,
        };

        self.active.insert(mission)
    }

    /// Evaluate the pose against the active mission.
    ///
    /// Returns `None` while idle. Never mutates state: alignment can be
    /// checked any number of times and only [`MissionEngine::complete`]
    /// transitions the machine.
    #[must_use]
    pub fn evaluate(&self, state: &JointState) -> Option<Alignment> {
        let mission = self.active.as_ref()?;

        let aligned = JointKey::ALL.iter().all(|&joint| {
            mission
                .target
                .get(joint)
                .map_or(true, |target| (state.get(joint) - target).abs() <= mission.tolerance)
        });

        Some(Alignment { aligned })
    }

    /// Complete the active mission, clearing the target.
    ///
    /// # Errors
    ///
    /// Returns [`MissionError::NoActiveMission`] while idle; completing
    /// without a mission is a call-sequence bug in the driving layer.
    pub fn complete(&mut self) -> MissionResult<MissionReward> {
        let mission = self.active.take().ok_or(MissionError::NoActiveMission)?;
        Ok(MissionReward {
            points: mission.points,
        })
    }

    /// Cancel the active mission without reward.
    ///
    /// # Errors
    ///
    /// Returns [`MissionError::NoActiveMission`] while idle.
    pub fn cancel(&mut self) -> MissionResult<Mission> {
        self.active.take().ok_or(MissionError::NoActiveMission)
    }
}

// ============================================================================
// Tests
// ============================================================================
