//! Animation driver
//!
//! Glue between incoming score messages, the fireworks field and the canvas.
//! The loop idles until something asks for a redraw; a high enough score
//! switches it to continuous animation until a lower score arrives.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::renderer::PointCanvas;
use crate::score::{self, Feedback, ScoreReport};
use crate::settings::{ConfigError, Settings};
use crate::sim::{FireworksField, LoopControl, Session, TickInput};

/// Result of one `frame` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// The canvas changed and should be presented
    pub rendered: bool,
    /// Schedule another frame
    pub keep_looping: bool,
    /// Score or canvas size changed, so the feedback text needs redoing
    pub feedback_changed: bool,
}

impl FrameOutcome {
    const IDLE: FrameOutcome = FrameOutcome {
        rendered: false,
        keep_looping: false,
        feedback_changed: false,
    };
}

pub struct AnimationDriver<R = Pcg32> {
    session: Session,
    field: FireworksField<R>,
    canvas: PointCanvas,
    frame_index: u64,
    looping: bool,
    feedback_dirty: bool,
}

impl AnimationDriver<Pcg32> {
    pub fn new(settings: &Settings, width: f32, height: f32, seed: u64) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or(seed);
        let field = FireworksField::new(settings.field, seed)?;
        log::info!("Fireworks field ready (seed {})", seed);
        Ok(Self::from_field(field, width, height))
    }
}

impl<R: Rng> AnimationDriver<R> {
    /// Wrap an existing field. The first frame always draws.
    pub fn from_field(field: FireworksField<R>, width: f32, height: f32) -> Self {
        let mut session = Session::new();
        session.request_redraw();
        Self {
            session,
            field,
            canvas: PointCanvas::new(width, height),
            frame_index: 0,
            looping: false,
            feedback_dirty: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn field(&self) -> &FireworksField<R> {
        &self.field
    }

    pub fn canvas(&self) -> &PointCanvas {
        &self.canvas
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Handle a posted message. Returns true if it carried a score.
    pub fn receive_message(&mut self, json: &str) -> bool {
        match score::parse_message(json) {
            Ok(Some(report)) => {
                self.receive_score(report);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("Ignoring message: {}", e);
                false
            }
        }
    }

    pub fn receive_score(&mut self, report: ScoreReport) {
        self.session.record_score(report);
        self.feedback_dirty = true;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas.resize(width, height);
        self.session.request_redraw();
        self.feedback_dirty = true;
    }

    /// Run one animation frame if the loop is live or a redraw is pending
    pub fn frame(&mut self) -> FrameOutcome {
        let redraw = self.session.take_redraw();
        if !self.looping && !redraw {
            return FrameOutcome::IDLE;
        }

        let input = TickInput {
            fireworks_mode: self.session.fireworks_mode(),
            width: self.canvas.width(),
            height: self.canvas.height(),
            frame_index: self.frame_index,
        };
        let control = self.field.tick(&input, &mut self.canvas);
        self.frame_index += 1;

        let looping = control == LoopControl::Continuous;
        if looping != self.looping {
            log::info!(
                "Animation {} at frame {}",
                if looping { "started" } else { "paused" },
                self.frame_index
            );
        }
        self.looping = looping;

        FrameOutcome {
            rendered: true,
            keep_looping: looping,
            feedback_changed: std::mem::take(&mut self.feedback_dirty),
        }
    }

    /// Feedback category for the current score
    pub fn feedback(&self) -> Feedback {
        Feedback::for_report(self.session.report())
    }

    pub fn score_line(&self) -> String {
        score::score_line(self.session.report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> AnimationDriver {
        AnimationDriver::new(&Settings::default(), 640.0, 360.0, 1234).unwrap()
    }

    #[test]
    fn test_first_frame_draws_then_idles() {
        let mut driver = driver();
        let outcome = driver.frame();
        assert!(outcome.rendered);
        assert!(!outcome.keep_looping);
        assert_eq!(driver.feedback(), Feedback::Waiting);

        assert_eq!(driver.frame(), FrameOutcome::IDLE);
        assert_eq!(driver.frame_index(), 1);
    }

    #[test]
    fn test_high_score_starts_loop() {
        let mut driver = driver();
        driver.frame();

        assert!(driver.receive_message(r#"{"type":"H5P_SCORE_RESULT","score":10,"maxScore":10}"#));
        let outcome = driver.frame();
        assert!(outcome.keep_looping);
        assert!(driver.is_looping());
        assert_eq!(driver.feedback(), Feedback::Excellent);
        assert_eq!(driver.score_line(), "Score: 10/10 (100.0%)");

        // Keeps animating without further messages
        for _ in 0..200 {
            assert!(driver.frame().rendered);
        }
        assert_eq!(driver.frame_index(), 202);
        assert!(!driver.canvas().points().is_empty());
    }

    #[test]
    fn test_low_score_stops_loop_and_clears() {
        let mut driver = driver();
        driver.receive_score(ScoreReport::new(9.0, 10.0));
        for _ in 0..120 {
            driver.frame();
        }
        assert!(driver.is_looping());

        driver.receive_score(ScoreReport::new(5.0, 10.0));
        let outcome = driver.frame();
        assert!(outcome.rendered);
        assert!(!outcome.keep_looping);
        assert!(driver.field().is_empty());
        assert!(driver.canvas().points().is_empty());
        assert_eq!(driver.feedback(), Feedback::NeedsWork);

        assert_eq!(driver.frame(), FrameOutcome::IDLE);
    }

    #[test]
    fn test_unrelated_and_bad_messages() {
        let mut driver = driver();
        driver.frame();
        assert!(!driver.receive_message(r#"{"type":"other"}"#));
        assert!(!driver.receive_message("not json"));
        // What the page sees for `undefined` / `null` payloads
        assert!(!driver.receive_message(""));
        assert!(!driver.receive_message("null"));
        assert_eq!(driver.frame(), FrameOutcome::IDLE);
    }

    #[test]
    fn test_resize_requests_redraw() {
        let mut driver = driver();
        driver.frame();
        driver.resize(320.0, 180.0);
        assert!(driver.frame().rendered);
        assert_eq!(driver.canvas().width(), 320.0);
    }

    #[test]
    fn test_feedback_refresh_only_on_change() {
        let mut driver = driver();
        assert!(driver.frame().feedback_changed);

        driver.receive_score(ScoreReport::new(10.0, 10.0));
        let outcome = driver.frame();
        assert!(outcome.keep_looping);
        assert!(outcome.feedback_changed);

        // Animation frames leave the overlay alone
        for _ in 0..50 {
            let outcome = driver.frame();
            assert!(outcome.rendered);
            assert!(!outcome.feedback_changed);
        }

        driver.resize(320.0, 180.0);
        assert!(driver.frame().feedback_changed);
        assert!(!driver.frame().feedback_changed);

        // Ignored messages don't touch it either
        assert!(!driver.receive_message(r#"{"type":"other"}"#));
        assert!(!driver.frame().feedback_changed);
    }

    #[test]
    fn test_settings_seed_wins() {
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };
        let mut a = AnimationDriver::new(&settings, 640.0, 360.0, 1).unwrap();
        let mut b = AnimationDriver::new(&settings, 640.0, 360.0, 2).unwrap();
        a.receive_score(ScoreReport::new(1.0, 1.0));
        b.receive_score(ScoreReport::new(1.0, 1.0));
        for _ in 0..100 {
            a.frame();
            b.frame();
        }
        assert_eq!(a.canvas().points(), b.canvas().points());
    }
}
