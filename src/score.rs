//! Score messages and feedback
//!
//! The embedding page posts H5P results as JSON objects:
//! `{"type": "H5P_SCORE_RESULT", "score": 9, "maxScore": 10}`.
//! Anything else arriving on the same channel is ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FIREWORKS_THRESHOLD, GOOD_THRESHOLD};
use crate::renderer::Hsb;

/// Message `type` carrying a score result
pub const SCORE_MESSAGE_TYPE: &str = "H5P_SCORE_RESULT";

/// Shown before any score has arrived
pub const WAITING_TEXT: &str = "Waiting for H5P score...";

#[derive(Debug, Error)]
pub enum ScoreMessageError {
    /// Not JSON, or a score message with missing/invalid fields
    #[error("malformed score message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Wire format of a score message
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScoreMessage {
    #[serde(rename = "type")]
    kind: String,
    score: f64,
    #[serde(rename = "maxScore")]
    max_score: f64,
}

/// A received score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreReport {
    pub score: f64,
    pub max_score: f64,
}

impl ScoreReport {
    pub fn new(score: f64, max_score: f64) -> Self {
        Self { score, max_score }
    }

    /// Score as a percentage of the maximum (0 when there is no maximum)
    pub fn percentage(&self) -> f64 {
        if self.max_score > 0.0 {
            self.score / self.max_score * 100.0
        } else {
            0.0
        }
    }

    /// Whether this score earns the fireworks display
    pub fn fireworks_mode(&self) -> bool {
        self.percentage() >= FIREWORKS_THRESHOLD
    }

    /// Encode as the message the page would post
    pub fn to_message(&self) -> String {
        let message = ScoreMessage {
            kind: SCORE_MESSAGE_TYPE.to_string(),
            score: self.score,
            max_score: self.max_score,
        };
        serde_json::to_string(&message).unwrap_or_default()
    }
}

/// Decode a posted message. `Ok(None)` for messages of any other type.
pub fn parse_message(json: &str) -> Result<Option<ScoreReport>, ScoreMessageError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let is_score = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|kind| kind == SCORE_MESSAGE_TYPE);
    if !is_score {
        return Ok(None);
    }

    let message: ScoreMessage = serde_json::from_value(value)?;
    Ok(Some(ScoreReport::new(message.score, message.max_score)))
}

/// Feedback category shown for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// 90% and up (fireworks)
    Excellent,
    /// 60% and up
    Good,
    /// Anything above zero
    NeedsWork,
    /// No score yet, or a zero score
    Waiting,
}

impl Feedback {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= FIREWORKS_THRESHOLD {
            Feedback::Excellent
        } else if percentage >= GOOD_THRESHOLD {
            Feedback::Good
        } else if percentage > 0.0 {
            Feedback::NeedsWork
        } else {
            Feedback::Waiting
        }
    }

    pub fn for_report(report: Option<&ScoreReport>) -> Self {
        Self::from_percentage(report.map_or(0.0, ScoreReport::percentage))
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Feedback::Excellent => "Congratulations! Excellent score! 🎆",
            Feedback::Good => "Good score, keep it up.",
            Feedback::NeedsWork => "Needs more effort!",
            Feedback::Waiting => WAITING_TEXT,
        }
    }

    /// Headline color
    pub fn color(&self) -> Hsb {
        match self {
            Feedback::Excellent => Hsb::new(120.0, 100.0, 90.0),
            Feedback::Good => Hsb::new(60.0, 100.0, 90.0),
            Feedback::NeedsWork => Hsb::new(0.0, 100.0, 90.0),
            Feedback::Waiting => Hsb::new(0.0, 0.0, 50.0),
        }
    }

    /// Vertical offset of the headline from canvas center
    pub fn headline_offset(&self) -> f32 {
        match self {
            Feedback::Waiting => 0.0,
            _ => -50.0,
        }
    }
}

/// Color of the score line under the headline
pub const SCORE_LINE_COLOR: Hsb = Hsb::new(0.0, 0.0, 30.0);

/// "Score: 9/10 (90.0%)"
pub fn score_line(report: Option<&ScoreReport>) -> String {
    let report = report.copied().unwrap_or(ScoreReport::new(0.0, 0.0));
    format!(
        "Score: {}/{} ({:.1}%)",
        format_number(report.score),
        format_number(report.max_score),
        report.percentage()
    )
}

/// Whole numbers print without a fractional part
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
