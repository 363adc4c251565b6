//! Myolab Core - simulation and interaction state for the arm trainer
//!
//! This crate is the single source of truth for an interactive training
//! session with the virtual arm: the pose store, the derived metrics
//! readout, the calibration-mission state machine, the quiz loop and the
//! XP progression, wired together by a synchronous coordinator.
//!
//! Rendering, audio, speech and other collaborators live outside this
//! crate: they drive the session through its typed operations and consume
//! the [`SessionEvent`] notifications each operation returns.
//!
//! # Modules
//!
//! - [`types`]: joint identifiers, pose vector, metrics readout
//! - [`error`]: per-engine error types
//! - [`math`]: seedable noise source
//! - [`metrics`]: pose to torque/power/battery/signal derivation
//! - [`mission`]: calibration-target state machine
//! - [`quiz`]: question catalog sequencing
//! - [`progression`]: level/XP counters
//! - [`catalog`]: part metadata and the builtin question bank
//! - [`session`]: the interaction coordinator
//!
//! # Example
//!
//! ```rust
//! use myolab_core::{ArmSession, JointKey, SessionEvent};
//!
//! let mut session = ArmSession::builder().seed(42).build();
//! session.start_mission();
//!
//! let target = session.mission().unwrap().target;
//! session.set_joint(JointKey::Shoulder, target.shoulder_deg.unwrap());
//! let events = session.set_joint(JointKey::Elbow, target.elbow_deg.unwrap());
//!
//! assert!(events
//!     .iter()
//!     .any(|e| matches!(e, SessionEvent::MissionCompleted { .. })));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod catalog;
pub mod error;
pub mod math;
pub mod metrics;
pub mod mission;
pub mod progression;
pub mod quiz;
pub mod session;
pub mod types;

// Re-export commonly used types at crate root
pub use catalog::{builtin_question_bank, ArmPart, ComponentCatalog, PartInfo};
pub use error::{MissionError, ProgressionError, QuizError, SessionError};
pub use math::{NoiseSource, Xorshift64};
pub use metrics::{MetricsConfig, MetricsEngine};
pub use mission::{Alignment, Mission, MissionConfig, MissionEngine, MissionTarget};
pub use progression::{Progression, XpGain};
pub use quiz::{AnswerOutcome, QuizCategory, QuizEngine, QuizQuestion};
pub use session::{
    ArmSession, Clock, ManualClock, SessionBuilder, SessionConfig, SessionEvent, SessionStats,
    SystemClock,
};
pub use types::{JointKey, JointState, Metrics};
