//! Quiz sequencing.
//!
//! A fixed, immutable question catalog walked by a cursor. Answers are
//! scored by option-index equality; the last answer of a pass reports
//! completion and the cursor resets so the bank can be replayed. Any
//! display delay before the restart belongs to the presentation layer;
//! the core guarantees only the completion signal and the reset.

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};

/// Subject area of a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizCategory {
    /// Engineering and physics of the arm
    Technical,
    /// Anatomical and kinesiology terminology
    Language,
}

/// One entry of the question catalog. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Stable identifier
    pub id: u32,
    /// Question text
    pub question: String,
    /// Four answer options, in display order
    pub options: [String; 4],
    /// Index of the correct option
    pub correct_index: usize,
    /// Subject area
    pub category: QuizCategory,
}

/// Outcome of scoring one answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// Whether the submitted option was the correct one
    pub correct: bool,
    /// True iff this answer finished a full pass through the catalog
    pub is_last_question: bool,
}

/// Walks the question catalog and scores answers.
#[derive(Clone, Debug)]
pub struct QuizEngine {
    questions: Vec<QuizQuestion>,
    cursor: usize,
}

impl QuizEngine {
    /// XP awarded for each correct answer.
    pub const QUESTION_XP: u32 = 20;

    /// Create an engine over an immutable catalog of any size.
    #[must_use]
    pub const fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            cursor: 0,
        }
    }

    /// Number of questions in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The question the cursor points at, if the catalog is non-empty.
    #[must_use]
    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.cursor)
    }

    /// Score an answer for the current question and advance the cursor.
    ///
    /// An option index outside the displayed options is simply an incorrect
    /// answer. When the last question of the catalog is answered, the
    /// outcome reports `is_last_question` and the cursor resets to 0.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::IndexOutOfRange`] when called with no questions
    /// remaining (an empty catalog); a call-sequence bug in the driver.
    pub fn submit_answer(&mut self, option_index: usize) -> QuizResult<AnswerOutcome> {
        let question = self.questions.get(self.cursor).ok_or(QuizError::IndexOutOfRange {
            index: self.cursor,
            len: self.questions.len(),
        })?;

        let correct = option_index == question.correct_index;
        let is_last_question = self.cursor + 1 == self.questions.len();

        self.cursor = if is_last_question { 0 } else { self.cursor + 1 };

        Ok(AnswerOutcome {
            correct,
            is_last_question,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
