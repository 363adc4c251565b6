//! Derived metrics computation.
//!
//! Maps the current pose to a physical readout: servo torque, power draw,
//! battery charge and control-link signal quality. The mapping is a total
//! function over any valid pose, pure except for the explicitly injected
//! elapsed time and noise source.
//!
//! Load factors are normalized against each axis's declared envelope:
//!
//! ```text
//! shoulder_load = |shoulder_deg| / 90
//! elbow_load    = elbow_deg / 135
//! grip_load     = grip_pct / 100
//! ```

use serde::{Deserialize, Serialize};

use crate::math::NoiseSource;
use crate::types::{JointKey, JointState, Metrics};

/// Tuning constants for metric derivation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Torque at the neutral pose (Nm)
    pub torque_base_nm: f64,
    /// Torque contribution of full shoulder load (Nm)
    pub torque_shoulder_nm: f64,
    /// Torque contribution of full elbow load (Nm)
    pub torque_elbow_nm: f64,
    /// Power draw at the neutral pose (W)
    pub power_base_w: f64,
    /// Power contribution of full shoulder load (W)
    pub power_shoulder_w: f64,
    /// Power contribution of full elbow load (W)
    pub power_elbow_w: f64,
    /// Power contribution of full grip load (W)
    pub power_grip_w: f64,
    /// Battery drain rate (percent per second of session time)
    pub battery_drain_pct_per_s: f64,
    /// Signal quality baseline (percent)
    pub signal_floor_pct: f64,
    /// Signal jitter span above the baseline (percent)
    pub signal_jitter_pct: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            torque_base_nm: 8.2,
            torque_shoulder_nm: 4.0,
            torque_elbow_nm: 2.0,
            power_base_w: 24.0,
            power_shoulder_w: 8.0,
            power_elbow_w: 4.0,
            power_grip_w: 6.0,
            battery_drain_pct_per_s: 0.05,
            signal_floor_pct: 78.0,
            signal_jitter_pct: 22.0,
        }
    }
}

/// Computes the derived readout for a pose.
#[derive(Clone, Debug, Default)]
pub struct MetricsEngine {
    config: MetricsConfig,
}

impl MetricsEngine {
    /// Create an engine with default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MetricsConfig::default())
    }

    /// Create an engine with custom tuning.
    #[must_use]
    pub const fn with_config(config: MetricsConfig) -> Self {
        Self { config }
    }

    /// Get the tuning constants.
    #[must_use]
    pub const fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Compute the readout for `state` at `elapsed_ms` of session time.
    ///
    /// Battery charge is a linear decay of elapsed session time, clamped to
    /// `[0, 100]` and floored against `previous_battery` so the reported
    /// value never increases. Signal quality is the configured baseline
    /// plus bounded jitter from `noise`, clamped to `[0, 100]` and rounded
    /// to a whole percent.
    pub fn compute(
        &self,
        state: &JointState,
        previous_battery: f64,
        elapsed_ms: f64,
        noise: &mut dyn NoiseSource,
    ) -> Metrics {
        let shoulder_load = state.shoulder_deg.abs() / JointKey::Shoulder.range().1;
        let elbow_load = state.elbow_deg / JointKey::Elbow.range().1;
        let grip_load = state.grip_pct / JointKey::Grip.range().1;

        let torque_nm = round_tenth(
            self.config.torque_base_nm
                + shoulder_load * self.config.torque_shoulder_nm
                + elbow_load * self.config.torque_elbow_nm,
        );

        let power_w = (self.config.power_base_w
            + shoulder_load * self.config.power_shoulder_w
            + elbow_load * self.config.power_elbow_w
            + grip_load * self.config.power_grip_w)
            .round();

        let drained = 100.0 - self.config.battery_drain_pct_per_s * (elapsed_ms / 1000.0);
        let battery_pct = drained.clamp(0.0, 100.0).min(previous_battery);

        let signal_pct = (self.config.signal_floor_pct
            + noise.next_f64() * self.config.signal_jitter_pct)
            .clamp(0.0, 100.0)
            .round();

        Metrics {
            torque_nm,
            power_w,
            battery_pct,
            signal_pct,
        }
    }
}

/// Round to one decimal place for display stability.
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// Tests
// ============================================================================
