//! Display session state
//!
//! Holds what the score message handler writes and the animation loop reads:
//! the latest score, the fireworks mode derived from it, and a pending
//! redraw request.

use crate::score::ScoreReport;

#[derive(Debug, Clone, Default)]
pub struct Session {
    report: Option<ScoreReport>,
    fireworks_mode: bool,
    redraw_requested: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new score; recomputes fireworks mode and asks for a redraw
    pub fn record_score(&mut self, report: ScoreReport) {
        log::info!(
            "Score received: {}/{} ({:.2}%)",
            report.score,
            report.max_score,
            report.percentage()
        );

        let mode = report.fireworks_mode();
        if mode != self.fireworks_mode {
            log::info!("Fireworks {}", if mode { "on" } else { "off" });
        }

        self.report = Some(report);
        self.fireworks_mode = mode;
        self.redraw_requested = true;
    }

    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    pub fn percentage(&self) -> f64 {
        self.report.map_or(0.0, |r| r.percentage())
    }

    pub fn fireworks_mode(&self) -> bool {
        self.fireworks_mode
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Consume the pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}
