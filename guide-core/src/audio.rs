//! Audio scrub state and time formatting.
//!
//! The timeline maps pointer position linearly to playback position.
//! While a seek is in flight the timer-driven progress display is
//! suppressed, and playback paused for a scrub resumes only once the
//! platform reports the seek as completed.

/// A seek the player should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekRequest {
    /// Target playback position in seconds.
    pub position: f64,
    /// Whether playback must be paused for the scrub.
    pub pause_playback: bool,
}

/// Scrub/seek bookkeeping for one audio player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrubState {
    dragging: bool,
    seeking: bool,
    resume_after_seek: bool,
}

impl ScrubState {
    /// Create an idle scrub state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down on the timeline.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Pointer released.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Whether a drag is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether progress display updates must be suppressed.
    #[must_use]
    pub const fn suppress_progress(&self) -> bool {
        self.seeking
    }

    /// Map a pointer offset on the timeline to a seek request.
    ///
    /// Returns `None` until the media duration is known. `playing` is the
    /// player's state at the moment of the scrub; a scrub over a playing
    /// track pauses it and remembers to resume.
    pub fn request_seek(
        &mut self,
        offset_x: f64,
        timeline_width: f64,
        duration: f64,
        playing: bool,
    ) -> Option<SeekRequest> {
        if !duration.is_finite() || duration <= 0.0 || timeline_width <= 0.0 {
            return None;
        }
        let fraction = (offset_x / timeline_width).clamp(0.0, 1.0);
        self.seeking = true;
        if playing {
            self.resume_after_seek = true;
        }
        Some(SeekRequest {
            position: fraction * duration,
            pause_playback: playing,
        })
    }

    /// The platform reported the seek as completed. Returns whether
    /// playback should resume.
    pub fn seek_completed(&mut self) -> bool {
        self.seeking = false;
        std::mem::take(&mut self.resume_after_seek)
    }
}

/// Remaining time formatted the way the player displays it, `m:ssmin`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_remaining(duration: f64, position: f64) -> String {
    if !duration.is_finite() || duration <= 0.0 {
        return "0:00min".to_string();
    }
    let remaining = (duration - position).max(0.0);
    let minutes = (remaining / 60.0).floor() as u64;
    let seconds = (remaining % 60.0).floor() as u64;
    format!("{minutes}:{seconds:02}min")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_to_half_maps_to_half_duration() {
        let mut scrub = ScrubState::new();
        let request = scrub
            .request_seek(150.0, 300.0, 180.0, false)
            .expect("duration known");
        assert!((request.position - 90.0).abs() < 1e-9);
        assert!(!request.pause_playback);
    }

    #[test]
    fn scrub_clamps_to_timeline_bounds() {
        let mut scrub = ScrubState::new();
        let before = scrub
            .request_seek(-20.0, 300.0, 60.0, false)
            .expect("duration known");
        assert!((before.position).abs() < 1e-9);
        let past = scrub
            .request_seek(400.0, 300.0, 60.0, false)
            .expect("duration known");
        assert!((past.position - 60.0).abs() < 1e-9);
    }

    #[test]
    fn no_seek_before_duration_is_known() {
        let mut scrub = ScrubState::new();
        assert!(scrub.request_seek(10.0, 300.0, f64::NAN, true).is_none());
        assert!(scrub.request_seek(10.0, 300.0, 0.0, true).is_none());
        assert!(!scrub.suppress_progress());
    }

    #[test]
    fn scrub_while_playing_pauses_then_resumes() {
        let mut scrub = ScrubState::new();
        scrub.begin_drag();
        let request = scrub
            .request_seek(10.0, 100.0, 60.0, true)
            .expect("duration known");
        assert!(request.pause_playback);
        assert!(scrub.suppress_progress());

        // Further scrub samples see the (now paused) player but must not
        // forget that playback resumes afterwards.
        let request = scrub
            .request_seek(20.0, 100.0, 60.0, false)
            .expect("duration known");
        assert!(!request.pause_playback);

        scrub.end_drag();
        assert!(scrub.seek_completed());
        assert!(!scrub.suppress_progress());
        // The resume flag is one-shot.
        assert!(!scrub.seek_completed());
    }

    #[test]
    fn paused_scrub_does_not_resume() {
        let mut scrub = ScrubState::new();
        scrub
            .request_seek(10.0, 100.0, 60.0, false)
            .expect("duration known");
        assert!(!scrub.seek_completed());
    }

    #[test]
    fn remaining_time_formats_minutes_and_seconds() {
        assert_eq!(format_remaining(180.0, 90.0), "1:30min");
        assert_eq!(format_remaining(65.0, 0.0), "1:05min");
        assert_eq!(format_remaining(65.0, 65.0), "0:00min");
        // Position past the end clamps instead of going negative.
        assert_eq!(format_remaining(65.0, 80.0), "0:00min");
    }

    #[test]
    fn unknown_duration_displays_zero() {
        assert_eq!(format_remaining(f64::NAN, 0.0), "0:00min");
        assert_eq!(format_remaining(0.0, 0.0), "0:00min");
    }
}
