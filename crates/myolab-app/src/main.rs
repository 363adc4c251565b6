//! Myolab Application
//!
//! Command-line driver for the arm trainer core. Runs scripted training
//! sessions against the simulation and streams the resulting notifications
//! to the log (or as JSON lines for piping into other tools).
//!
//! # Usage
//!
//! ```bash
//! # Scripted calibration run (default if no subcommand)
//! myolab demo --missions 3
//!
//! # Play the question bank with seeded random answers
//! myolab quiz --seed 7
//!
//! # Dump the part catalog
//! myolab parts
//!
//! # Stream events as JSON lines
//! myolab --json demo
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use myolab_core::math::NoiseSource;
use myolab_core::{ArmPart, ArmSession, JointKey, SessionEvent, Xorshift64};

/// Myolab Arm Trainer
#[derive(Parser, Debug)]
#[command(name = "myolab")]
#[command(author, version, about = "Myolab arm trainer driver", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Emit session events as JSON lines instead of log output
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run scripted calibration missions (default if no subcommand)
    Demo {
        /// Noise seed for target generation and signal jitter
        #[arg(short, long, default_value = "12345")]
        seed: u64,

        /// Number of missions to run
        #[arg(short, long, default_value = "3")]
        missions: u32,

        /// Degrees moved per step while seeking a target
        #[arg(long, default_value = "4.0")]
        step_deg: f64,
    },

    /// Play the full question bank with seeded random answers
    Quiz {
        /// Noise seed for answer selection
        #[arg(short, long, default_value = "12345")]
        seed: u64,
    },

    /// Print the part catalog
    Parts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Myolab v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        None => run_demo(12345, 3, 4.0, cli.json),
        Some(Commands::Demo {
            seed,
            missions,
            step_deg,
        }) => run_demo(seed, missions, step_deg, cli.json),
        Some(Commands::Quiz { seed }) => run_quiz(seed, cli.json),
        Some(Commands::Parts) => print_parts(),
    }
}

/// Run scripted calibration missions against a fresh session
fn run_demo(seed: u64, missions: u32, step_deg: f64, json: bool) -> anyhow::Result<()> {
    anyhow::ensure!(step_deg > 0.0, "step must be positive");

    let mut session = ArmSession::builder().seed(seed).build();
    info!("Starting demo session (seed {seed}, {missions} missions)");

    for round in 1..=missions {
        info!("Mission {round}/{missions}");
        let events = session.start_mission();
        emit_events(&events, json)?;

        let target = session
            .mission()
            .context("mission should be active after start")?
            .target;

        // Walk each exercised axis toward its target in fixed steps. The
        // session completes the mission itself once every axis aligns.
        let mut steps = 0u32;
        while session.mission().is_some() {
            anyhow::ensure!(steps < 1000, "mission failed to converge");
            steps += 1;

            for joint in JointKey::ALL {
                if session.mission().is_none() {
                    break;
                }
                let Some(goal) = target.get(joint) else {
                    continue;
                };

                // Re-commanding an axis already at its goal is harmless and
                // keeps the mission evaluation running every pass.
                let current = session.state().get(joint);
                let delta = (goal - current).clamp(-step_deg, step_deg);
                let events = session.set_joint(joint, current + delta);
                emit_events(&events, json)?;
            }
        }

        info!(
            "Mission {round} done in {steps} steps; level {} ({} xp)",
            session.progression().level(),
            session.progression().xp()
        );
    }

    let stats = session.stats();
    info!(
        "Demo finished: {} missions completed, battery at {:.1}%",
        stats.missions_completed,
        session.metrics().battery_pct
    );
    Ok(())
}

/// Play the whole question bank once with seeded random answers
fn run_quiz(seed: u64, json: bool) -> anyhow::Result<()> {
    let mut session = ArmSession::builder().seed(seed).build();
    let mut picker = Xorshift64::seeded(seed.wrapping_add(1));

    info!("Starting quiz run (seed {seed})");

    loop {
        let Some(question) = session.current_question() else {
            warn!("Question bank is empty");
            break;
        };
        let options = question.options.len();
        info!("Q{}: {}", question.id, question.question);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let answer = (picker.next_f64() * options as f64) as usize % options;

        let events = session.answer_question(answer)?;
        emit_events(&events, json)?;

        let finished = events.iter().any(|event| {
            matches!(
                event,
                SessionEvent::QuizAnswered {
                    is_last_question: true,
                    ..
                }
            )
        });
        if finished {
            break;
        }
    }

    let stats = session.stats();
    info!(
        "Quiz finished: {}/{} correct, level {} ({} xp)",
        stats.correct_answers,
        stats.questions_answered,
        session.progression().level(),
        session.progression().xp()
    );
    Ok(())
}

/// Print the builtin part catalog
fn print_parts() -> anyhow::Result<()> {
    let session = ArmSession::new();

    for part in ArmPart::ALL {
        let info = session
            .part_info(part)
            .with_context(|| format!("missing catalog entry for {}", part.as_str()))?;
        info!("[{}] {}", part.as_str(), info.title);
        info!("  specs: {}", info.specs);
        info!("  {}", info.description);
    }

    Ok(())
}

/// Forward session events to the log, or print them as JSON lines
fn emit_events(events: &[SessionEvent], json: bool) -> anyhow::Result<()> {
    for event in events {
        if json {
            println!("{}", serde_json::to_string(event)?);
            continue;
        }

        match event {
            SessionEvent::JointChanged { state } => {
                info!(
                    "pose: shoulder {:.0} elbow {:.0} wrist {:.0} grip {:.0}",
                    state.shoulder_deg, state.elbow_deg, state.wrist_deg, state.grip_pct
                );
            }
            SessionEvent::MetricsUpdated { metrics } => {
                info!(
                    "metrics: torque {:.1} Nm, power {:.0} W, battery {:.1}%, signal {:.0}%",
                    metrics.torque_nm, metrics.power_w, metrics.battery_pct, metrics.signal_pct
                );
            }
            SessionEvent::MissionStarted { mission } => {
                info!("mission started: {}", mission.description);
            }
            SessionEvent::MissionCompleted { points } => {
                info!("mission completed: +{points} points");
            }
            SessionEvent::PartFocusChanged { part } => match part {
                Some(part) => info!("focused part: {}", part.name()),
                None => info!("part focus cleared"),
            },
            SessionEvent::QuizAnswered {
                correct,
                is_last_question,
            } => {
                info!("answer scored: correct={correct} last={is_last_question}");
            }
            SessionEvent::XpChanged {
                level,
                xp,
                leveled_up,
            } => {
                info!("progression: level {level}, {xp} xp (leveled up: {leveled_up})");
            }
            SessionEvent::Narration { text } => {
                info!("narration: {text}");
            }
        }
    }

    Ok(())
}
