//! Static content catalogs.
//!
//! Component metadata for the arm's parts (shown when the trainee focuses
//! a part in the viewer) and the built-in question bank. Both are supplied
//! to the session at construction as immutable configuration; the builtin
//! tables here are the stock content.

use serde::{Deserialize, Serialize};

use crate::quiz::{QuizCategory, QuizQuestion};

// ============================================================================
// Arm Parts
// ============================================================================

/// Identifies one component of the training arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmPart {
    /// Shoulder pitch servo
    ShoulderActuator,
    /// Upper-arm structural link
    UpperArm,
    /// Elbow hinge servo
    ElbowActuator,
    /// Forearm link and cable run
    Forearm,
    /// Wrist rotation servo
    WristActuator,
    /// Two-finger adaptive gripper
    Gripper,
}

impl ArmPart {
    /// All parts in proximal-to-distal order.
    pub const ALL: [Self; 6] = [
        Self::ShoulderActuator,
        Self::UpperArm,
        Self::ElbowActuator,
        Self::Forearm,
        Self::WristActuator,
        Self::Gripper,
    ];

    /// Number of catalogued parts.
    pub const COUNT: usize = 6;

    /// Get the string identifier for catalog lookup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShoulderActuator => "ACT_SHOULDER",
            Self::UpperArm => "LINK_UPPER",
            Self::ElbowActuator => "ACT_ELBOW",
            Self::Forearm => "LINK_FOREARM",
            Self::WristActuator => "ACT_WRIST",
            Self::Gripper => "GRIP_01",
        }
    }

    /// Get the human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShoulderActuator => "Shoulder Actuator",
            Self::UpperArm => "Upper Arm",
            Self::ElbowActuator => "Elbow Actuator",
            Self::Forearm => "Forearm",
            Self::WristActuator => "Wrist Actuator",
            Self::Gripper => "Gripper",
        }
    }
}

/// Metadata record for one part.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartInfo {
    /// Display title
    pub title: String,
    /// One-line technical specs
    pub specs: String,
    /// Teaching description
    pub description: String,
}

/// Immutable part-metadata lookup.
#[derive(Clone, Debug, Default)]
pub struct ComponentCatalog {
    entries: Vec<(ArmPart, PartInfo)>,
}

impl ComponentCatalog {
    /// Create a catalog from explicit entries.
    #[must_use]
    pub const fn new(entries: Vec<(ArmPart, PartInfo)>) -> Self {
        Self { entries }
    }

    /// The builtin catalog covering every part of the trainer arm.
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |part: ArmPart, specs: &str, description: &str| {
            (
                part,
                PartInfo {
                    title: part.name().to_string(),
                    specs: specs.to_string(),
                    description: description.to_string(),
                },
            )
        };

        Self::new(vec![
            entry(
                ArmPart::ShoulderActuator,
                "Brushless servo, 12 Nm peak, travel -90 to +90 deg",
                "Pitches the whole arm. The highest-torque joint: it carries \
                 every link below it, which is why its load dominates the \
                 torque readout.",
            ),
            entry(
                ArmPart::UpperArm,
                "Carbon-fiber link, 310 mm, 420 g",
                "Structural link between shoulder and elbow. Houses the main \
                 power bus running to the distal joints.",
            ),
            entry(
                ArmPart::ElbowActuator,
                "Brushless servo, 6 Nm peak, travel 0 to 135 deg",
                "Flexes the forearm. Its hinge geometry mimics a human elbow: \
                 it cannot hyperextend past the straightened position.",
            ),
            entry(
                ArmPart::Forearm,
                "Polymer link, 260 mm, 280 g, integrated cable run",
                "Carries signal and power to the wrist and gripper. Keeping \
                 mass low here reduces the load on the shoulder.",
            ),
            entry(
                ArmPart::WristActuator,
                "Coreless servo, 1.5 Nm, travel -90 to +90 deg",
                "Rotates the gripper about the forearm axis, the motion \
                 anatomists call pronation and supination.",
            ),
            entry(
                ArmPart::Gripper,
                "Two-finger adaptive gripper, 0-100% clamping force",
                "Closes on objects with a controllable clamping force. Force, \
                 not position, is what the grip channel commands.",
            ),
        ])
    }

    /// Look up the metadata for a part.
    #[must_use]
    pub fn get(&self, part: ArmPart) -> Option<&PartInfo> {
        self.entries
            .iter()
            .find(|(entry_part, _)| *entry_part == part)
            .map(|(_, info)| info)
    }

    /// Number of catalogued parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Question Bank
// ============================================================================

/// The builtin question bank: five questions mixing the technical and
/// terminology tracks.
#[must_use]
pub fn builtin_question_bank() -> Vec<QuizQuestion> {
    let q = |id: u32,
             category: QuizCategory,
             question: &str,
             options: [&str; 4],
             correct_index: usize| QuizQuestion {
        id,
        question: question.to_string(),
        options: options.map(str::to_string),
        correct_index,
        category,
    };

    vec![
        q(
            1,
            QuizCategory::Technical,
            "Which quantity does the servo controller report in newton-metres?",
            ["Power draw", "Joint torque", "Signal quality", "Battery charge"],
            1,
        ),
        q(
            2,
            QuizCategory::Language,
            "What is the anatomical term for rotating the forearm palm-down?",
            ["Supination", "Abduction", "Pronation", "Extension"],
            2,
        ),
        q(
            3,
            QuizCategory::Technical,
            "What happens to the arm's power draw as grip strength increases?",
            ["It increases", "It decreases", "It stays constant", "It drops to zero"],
            0,
        ),
        q(
            4,
            QuizCategory::Language,
            "Bending the elbow to decrease its joint angle is called what?",
            ["Extension", "Rotation", "Adduction", "Flexion"],
            3,
        ),
        q(
            5,
            QuizCategory::Technical,
            "Which readout only ever falls over the course of a session?",
            ["Battery charge", "Signal quality", "Joint torque", "Grip strength"],
            0,
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_covers_every_part() {
        let catalog = ComponentCatalog::builtin();
        assert_eq!(catalog.len(), ArmPart::COUNT);

        for part in ArmPart::ALL {
            let info = catalog.get(part).expect("missing part entry");
            assert_eq!(info.title, part.name());
            assert!(!info.specs.is_empty());
            assert!(!info.description.is_empty());
        }
    }

    #[test]
    fn test_part_ids_are_unique() {
        for (i, a) in ArmPart::ALL.iter().enumerate() {
            for b in &ArmPart::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn test_builtin_bank_shape() {
        let bank = builtin_question_bank();
        assert_eq!(bank.len(), 5);

        for question in &bank {
            assert!(question.correct_index < question.options.len());
            assert!(!question.question.is_empty());
        }

        let technical = bank
            .iter()
            .filter(|q| q.category == QuizCategory::Technical)
            .count();
        assert_eq!(technical, 3);
    }

    #[test]
    fn test_empty_catalog_lookup() {
        let catalog = ComponentCatalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.get(ArmPart::Gripper).is_none());
    }
}
