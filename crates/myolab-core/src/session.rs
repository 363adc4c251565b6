//! Interaction coordinator.
//!
//! Wires the pose store, metrics engine, mission engine, quiz and
//! progression into one synchronous session and surfaces their outward
//! notifications. The reactive chain is explicit rather than hidden in a
//! runtime: every mutating call recomputes what depends on it before
//! returning, and hands back the ordered notifications it produced.
//!
//! ```text
//! input event ──▶ pose store ──▶ metrics recompute ──▶ mission evaluate
//!                                                          │ aligned
//!                                                          ▼
//!                                              progression credit + clear
//! ```
//!
//! Presentation, audio and speech collaborators consume the returned
//! [`SessionEvent`] stream; the core takes no action when a collaborator
//! ignores one.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::catalog::{builtin_question_bank, ArmPart, ComponentCatalog, PartInfo};
use crate::error::SessionResult;
use crate::math::{NoiseSource, Xorshift64};
use crate::metrics::{MetricsConfig, MetricsEngine};
use crate::mission::{Mission, MissionConfig, MissionEngine};
use crate::progression::Progression;
use crate::quiz::{QuizEngine, QuizQuestion};
use crate::types::{JointKey, JointState, Metrics};

// ============================================================================
// Clock
// ============================================================================

/// Monotonic session time source.
///
/// Injected at construction so metrics are reproducible under test.
pub trait Clock {
    /// Milliseconds elapsed since the session started.
    fn elapsed_ms(&mut self) -> f64;
}

/// Wall clock backed by [`std::time::Instant`].
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Start counting from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-advanced clock for tests and scripted playback.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    /// Start at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { now_ms: 0.0 }
    }

    /// Advance the clock.
    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl Clock for ManualClock {
    fn elapsed_ms(&mut self) -> f64 {
        self.now_ms
    }
}

// ============================================================================
// Session Events
// ============================================================================

/// Outward notification produced by a coordinator operation.
///
/// Notifications are data, not requests: the session never waits on a
/// consumer and keeps no delivery state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The pose changed
    JointChanged {
        /// Pose after the mutation
        state: JointState,
    },
    /// The derived readout was recomputed
    MetricsUpdated {
        /// Fresh readout
        metrics: Metrics,
    },
    /// A calibration mission became active
    MissionStarted {
        /// The generated mission
        mission: Mission,
    },
    /// The active mission was completed
    MissionCompleted {
        /// Points credited
        points: u32,
    },
    /// The focused part changed
    PartFocusChanged {
        /// Newly focused part, or `None` when focus cleared
        part: Option<ArmPart>,
    },
    /// A quiz answer was scored
    QuizAnswered {
        /// Whether the answer was correct
        correct: bool,
        /// Whether this answer finished a full pass through the bank
        is_last_question: bool,
    },
    /// Progression counters changed
    XpChanged {
        /// Level after the credit
        level: u32,
        /// XP after the credit
        xp: u32,
        /// Whether a level threshold was crossed
        leveled_up: bool,
    },
    /// Narration line for the speech/audio collaborators
    Narration {
        /// Text to speak or display
        text: String,
    },
}

/// Aggregate counters for the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Calibration missions completed
    pub missions_completed: u32,
    /// Quiz answers submitted
    pub questions_answered: u32,
    /// Quiz answers that were correct
    pub correct_answers: u32,
}

/// Engine tuning for a session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Metrics derivation constants
    pub metrics: MetricsConfig,
    /// Mission generation constants
    pub mission: MissionConfig,
}

// ============================================================================
// Arm Session
// ============================================================================

/// One trainee's interactive session with the arm.
///
/// All mutation is synchronous and single-actor: the driving layer calls
/// one operation at a time and consumes the returned events before the
/// next. Porting to a concurrent host requires serializing these calls.
pub struct ArmSession {
    state: JointState,
    metrics: Metrics,
    metrics_engine: MetricsEngine,
    missions: MissionEngine,
    quiz: QuizEngine,
    progression: Progression,
    focus: Option<ArmPart>,
    catalog: ComponentCatalog,
    stats: SessionStats,
    clock: Box<dyn Clock>,
    noise: Box<dyn NoiseSource>,
}

impl ArmSession {
    /// Create a session with builtin catalogs and the wall clock.
    #[must_use]
    pub fn new() -> Self {
        SessionBuilder::new().build()
    }

    /// Start configuring a session.
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Current pose. Pure read; identical values until the next mutation.
    #[must_use]
    pub const fn state(&self) -> &JointState {
        &self.state
    }

    /// Latest derived readout.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The active mission, if any.
    #[must_use]
    pub fn mission(&self) -> Option<&Mission> {
        self.missions.active()
    }

    /// The question the quiz cursor points at.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.current()
    }

    /// Progression counters.
    #[must_use]
    pub const fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Aggregate session counters.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Currently focused part, if any.
    #[must_use]
    pub const fn part_focus(&self) -> Option<ArmPart> {
        self.focus
    }

    /// Metadata for a part, from the catalog supplied at construction.
    #[must_use]
    pub fn part_info(&self, part: ArmPart) -> Option<&PartInfo> {
        self.catalog.get(part)
    }

    /// Command one axis of the arm.
    ///
    /// The value is clamped into the axis envelope, the metrics readout is
    /// recomputed against the new pose, and only then is the active mission
    /// evaluated, so alignment always sees a consistent snapshot. On
    /// alignment the mission is completed, the reward credited and the
    /// target cleared, all before this call returns.
    pub fn set_joint(&mut self, joint: JointKey, value: f64) -> Vec<SessionEvent> {
        self.state.set(joint, value);

        let mut events = vec![SessionEvent::JointChanged { state: self.state }];
        self.refresh_metrics(&mut events);

        let aligned = self
            .missions
            .evaluate(&self.state)
            .map_or(false, |alignment| alignment.aligned);
        if aligned {
            self.finish_mission(&mut events);
        }

        events
    }

    /// Generate a new calibration mission and make it active.
    ///
    /// An already-active mission is discarded and replaced; see
    /// [`MissionEngine::start`] for the policy.
    pub fn start_mission(&mut self) -> Vec<SessionEvent> {
        let mission = self.missions.start(self.noise.as_mut()).clone();
        let narration = format!("New calibration target. {}.", mission.description);

        vec![
            SessionEvent::MissionStarted { mission },
            SessionEvent::Narration { text: narration },
        ]
    }

    /// Cancel the active mission without reward.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::MissionError::NoActiveMission`] while no
    /// mission is active.
    pub fn cancel_mission(&mut self) -> SessionResult<Vec<SessionEvent>> {
        self.missions.cancel()?;
        Ok(vec![SessionEvent::Narration {
            text: String::from("Calibration cancelled."),
        }])
    }

    /// Score an answer for the current quiz question.
    ///
    /// Correct answers credit [`QuizEngine::QUESTION_XP`] through the
    /// progression counters.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::QuizError::IndexOutOfRange`] when the
    /// question bank is empty.
    pub fn answer_question(&mut self, option_index: usize) -> SessionResult<Vec<SessionEvent>> {
        let outcome = self.quiz.submit_answer(option_index)?;

        self.stats.questions_answered += 1;
        if outcome.correct {
            self.stats.correct_answers += 1;
        }

        let mut events = vec![SessionEvent::QuizAnswered {
            correct: outcome.correct,
            is_last_question: outcome.is_last_question,
        }];

        if outcome.correct {
            self.credit_xp(QuizEngine::QUESTION_XP, &mut events);
        }

        Ok(events)
    }

    /// Focus a part in the viewer, or clear focus with `None`.
    ///
    /// Emits nothing when the focus did not actually change.
    pub fn set_part_focus(&mut self, part: Option<ArmPart>) -> Vec<SessionEvent> {
        if self.focus == part {
            return Vec::new();
        }

        self.focus = part;
        vec![SessionEvent::PartFocusChanged { part }]
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn refresh_metrics(&mut self, events: &mut Vec<SessionEvent>) {
        let elapsed_ms = self.clock.elapsed_ms();
        self.metrics = self.metrics_engine.compute(
            &self.state,
            self.metrics.battery_pct,
            elapsed_ms,
            self.noise.as_mut(),
        );
        events.push(SessionEvent::MetricsUpdated {
            metrics: self.metrics,
        });
    }

    fn finish_mission(&mut self, events: &mut Vec<SessionEvent>) {
        // Guarded by the evaluate() result; an active mission exists here.
        let Ok(reward) = self.missions.complete() else {
            return;
        };

        self.stats.missions_completed += 1;
        events.push(SessionEvent::MissionCompleted {
            points: reward.points,
        });
        events.push(SessionEvent::Narration {
            text: format!("Calibration complete. {} points earned.", reward.points),
        });

        self.credit_xp(reward.points, events);
    }

    fn credit_xp(&mut self, amount: u32, events: &mut Vec<SessionEvent>) {
        let gain = self.progression.credit(amount);
        events.push(SessionEvent::XpChanged {
            level: gain.level,
            xp: gain.xp,
            leveled_up: gain.leveled_up,
        });

        if gain.leveled_up {
            events.push(SessionEvent::Narration {
                text: format!("Level up. You reached level {}.", gain.level),
            });
        }
    }
}

impl Default for ArmSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Session Builder
// ============================================================================

/// Fluent construction for [`ArmSession`].
pub struct SessionBuilder {
    config: SessionConfig,
    seed: u64,
    clock: Option<Box<dyn Clock>>,
    catalog: Option<ComponentCatalog>,
    questions: Option<Vec<QuizQuestion>>,
}

impl SessionBuilder {
    /// Start from defaults: builtin catalogs, wall clock, fixed seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            seed: 12345,
            clock: None,
            catalog: None,
            questions: None,
        }
    }

    /// Set the noise seed for mission targets and signal jitter.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set engine tuning.
    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject a clock (tests use [`ManualClock`]).
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Supply a custom part-metadata catalog.
    #[must_use]
    pub fn catalog(mut self, catalog: ComponentCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Supply a custom question bank.
    #[must_use]
    pub fn questions(mut self, questions: Vec<QuizQuestion>) -> Self {
        self.questions = Some(questions);
        self
    }

    /// Build the session.
    #[must_use]
    pub fn build(self) -> ArmSession {
        ArmSession {
            state: JointState::NEUTRAL,
            metrics: Metrics::default(),
            metrics_engine: MetricsEngine::with_config(self.config.metrics),
            missions: MissionEngine::with_config(self.config.mission),
            quiz: QuizEngine::new(self.questions.unwrap_or_else(builtin_question_bank)),
            progression: Progression::new(),
            focus: None,
            catalog: self.catalog.unwrap_or_else(ComponentCatalog::builtin),
            stats: SessionStats::default(),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock::new())),
            noise: Box::new(Xorshift64::seeded(self.seed)),
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MissionError, QuizError, SessionError};

    fn test_session() -> ArmSession {
        ArmSession::builder().clock(ManualClock::new()).seed(7).build()
    }

    fn align_to_active_mission(session: &mut ArmSession) -> Vec<SessionEvent> {
        let mission = session.mission().expect("mission should be active").clone();
        let shoulder = mission.target.shoulder_deg.unwrap();
        let elbow = mission.target.elbow_deg.unwrap();

        // The mission may already align after the first move if the elbow
        // target happens to sit within tolerance of the rest pose, so the
        // events of both moves are collected.
        let mut events = session.set_joint(JointKey::Shoulder, shoulder);
        events.extend(session.set_joint(JointKey::Elbow, elbow));
        events
    }

    #[test]
    fn test_set_joint_event_ordering() {
        let mut session = test_session();
        let events = session.set_joint(JointKey::Elbow, 45.0);

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SessionEvent::JointChanged { .. }));
        assert!(matches!(events[1], SessionEvent::MetricsUpdated { .. }));
    }

    #[test]
    fn test_set_joint_clamps_and_reports_clamped_state() {
        let mut session = test_session();
        let events = session.set_joint(JointKey::Shoulder, 500.0);

        let SessionEvent::JointChanged { state } = events[0] else {
            panic!("expected JointChanged first");
        };
        assert_eq!(state.shoulder_deg, 90.0);
        assert_eq!(session.state().shoulder_deg, 90.0);
    }

    #[test]
    fn test_metrics_follow_pose() {
        let mut session = test_session();
        session.set_joint(JointKey::Shoulder, 90.0);
        let events = session.set_joint(JointKey::Elbow, 135.0);

        let SessionEvent::MetricsUpdated { metrics } = events[1] else {
            panic!("expected MetricsUpdated second");
        };
        assert_eq!(metrics.torque_nm, 14.2);
        assert_eq!(metrics.power_w, 36.0);
    }

    #[test]
    fn test_mission_flow_completes_on_alignment() {
        let mut session = test_session();

        let start_events = session.start_mission();
        assert!(matches!(start_events[0], SessionEvent::MissionStarted { .. }));
        assert!(matches!(start_events[1], SessionEvent::Narration { .. }));

        let events = align_to_active_mission(&mut session);

        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::MissionCompleted { points: 50 })));
        assert!(events.iter().any(
            |e| matches!(e, SessionEvent::XpChanged { xp: 50, leveled_up: false, .. })
        ));
        assert!(session.mission().is_none());
        assert_eq!(session.stats().missions_completed, 1);
        assert_eq!(session.progression().xp(), 50);
    }

    #[test]
    fn test_mission_completion_precedes_xp_change() {
        let mut session = test_session();
        session.start_mission();
        let events = align_to_active_mission(&mut session);

        let completed = events
            .iter()
            .position(|e| matches!(e, SessionEvent::MissionCompleted { .. }))
            .unwrap();
        let xp = events
            .iter()
            .position(|e| matches!(e, SessionEvent::XpChanged { .. }))
            .unwrap();
        assert!(completed < xp);
    }

    #[test]
    fn test_two_missions_level_up() {
        let mut session = test_session();

        for _ in 0..2 {
            session.start_mission();
            align_to_active_mission(&mut session);
        }

        assert_eq!(session.progression().level(), 2);
        assert_eq!(session.progression().xp(), 0);
    }

    #[test]
    fn test_misaligned_pose_keeps_mission_active() {
        let mut session = test_session();
        session.start_mission();

        let mission = session.mission().unwrap().clone();
        let off_target = mission.target.shoulder_deg.unwrap() + mission.tolerance + 1.0;
        let events = session.set_joint(JointKey::Shoulder, off_target);

        assert!(!events
            .iter()
            .any(|e| matches!(e, SessionEvent::MissionCompleted { .. })));
        assert!(session.mission().is_some());
    }

    #[test]
    fn test_cancel_mission() {
        let mut session = test_session();
        session.start_mission();

        assert!(session.cancel_mission().is_ok());
        assert!(session.mission().is_none());
        assert_eq!(
            session.cancel_mission(),
            Err(SessionError::Mission(MissionError::NoActiveMission))
        );
    }

    #[test]
    fn test_correct_answer_awards_xp() {
        let mut session = test_session();
        let correct = session.current_question().unwrap().correct_index;

        let events = session.answer_question(correct).unwrap();

        assert!(matches!(
            events[0],
            SessionEvent::QuizAnswered { correct: true, is_last_question: false }
        ));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::XpChanged { xp: 20, .. })));
        assert_eq!(session.progression().xp(), 20);
        assert_eq!(session.stats().correct_answers, 1);
    }

    #[test]
    fn test_wrong_answer_awards_nothing() {
        let mut session = test_session();
        let correct = session.current_question().unwrap().correct_index;
        let wrong = (correct + 1) % 4;

        let events = session.answer_question(wrong).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(session.progression().xp(), 0);
        assert_eq!(session.stats().questions_answered, 1);
        assert_eq!(session.stats().correct_answers, 0);
    }

    #[test]
    fn test_full_quiz_pass_resets_cursor() {
        let mut session = test_session();
        let bank_len = 5;

        for i in 0..bank_len {
            let events = session.answer_question(0).unwrap();
            let SessionEvent::QuizAnswered { is_last_question, .. } = events[0] else {
                panic!("expected QuizAnswered first");
            };
            assert_eq!(is_last_question, i == bank_len - 1);
        }

        assert_eq!(session.current_question().unwrap().id, 1);
    }

    #[test]
    fn test_empty_bank_rejects_answers() {
        let mut session = ArmSession::builder()
            .clock(ManualClock::new())
            .questions(Vec::new())
            .build();

        assert_eq!(
            session.answer_question(0),
            Err(SessionError::Quiz(QuizError::IndexOutOfRange { index: 0, len: 0 }))
        );
    }

    #[test]
    fn test_part_focus_changes_and_clears() {
        let mut session = test_session();

        let events = session.set_part_focus(Some(ArmPart::Gripper));
        assert_eq!(
            events,
            vec![SessionEvent::PartFocusChanged { part: Some(ArmPart::Gripper) }]
        );

        // Unchanged focus emits nothing.
        assert!(session.set_part_focus(Some(ArmPart::Gripper)).is_empty());

        let events = session.set_part_focus(None);
        assert_eq!(events, vec![SessionEvent::PartFocusChanged { part: None }]);
    }

    #[test]
    fn test_part_info_lookup() {
        let session = test_session();
        let info = session.part_info(ArmPart::ElbowActuator).unwrap();
        assert_eq!(info.title, "Elbow Actuator");
    }

    #[test]
    fn test_state_reads_are_idempotent() {
        let mut session = test_session();
        session.set_joint(JointKey::Wrist, -15.0);

        let first = *session.state();
        let second = *session.state();
        assert_eq!(first, second);
    }

    #[test]
    fn test_events_serialize_for_collaborators() {
        let mut session = test_session();
        let events = session.set_joint(JointKey::Elbow, 30.0);

        let line = serde_json::to_string(&events[0]).unwrap();
        assert!(line.contains("JointChanged"));
    }

    #[test]
    fn test_battery_monotonic_across_updates() {
        let mut clock = ManualClock::new();
        clock.advance(60_000.0);
        let mut session = ArmSession::builder().clock(clock).build();

        session.set_joint(JointKey::Elbow, 10.0);
        let after_minute = session.metrics().battery_pct;
        assert!(after_minute < 100.0);

        session.set_joint(JointKey::Elbow, 20.0);
        assert!(session.metrics().battery_pct <= after_minute);
    }
}
