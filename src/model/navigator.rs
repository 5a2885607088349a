use std::time::{Duration, Instant};

/// Rotation direction through the frame sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// An ordered, fixed-length sequence of turntable frames addressed as
/// `<folder><prefix><n>.<ext>` for n in 1..=length
#[derive(Debug, Clone)]
pub struct FrameSequence {
    folder: String,
    prefix: String,
    extension: String,
    length: usize,
    index: usize,
}

impl FrameSequence {
    pub fn new(
        folder: impl Into<String>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
        length: usize,
    ) -> Self {
        Self {
            folder: folder.into(),
            prefix: prefix.into(),
            extension: extension.into(),
            length: length.max(1), // a sequence always has at least one frame
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Asset path for a given frame index. Frames are numbered from 1 on disk.
    pub fn frame_path(&self, index: usize) -> String {
        format!(
            "{}{}{}.{}",
            self.folder,
            self.prefix,
            (index % self.length) + 1,
            self.extension
        )
    }

    pub fn current_path(&self) -> String {
        self.frame_path(self.index)
    }

    /// Move one frame in the given direction, wrapping at both ends.
    pub fn advance(&mut self, direction: Direction) {
        self.index = match direction {
            Direction::Previous => (self.index + self.length - 1) % self.length,
            Direction::Next => (self.index + 1) % self.length,
        };
    }
}

/// Timing and zoom tuning for the navigator
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// How long the navigation lock is held after a step
    pub settle: Duration,
    /// Period between automatic steps while a button is held.
    /// Must be longer than `settle` or held-button repeats get dropped.
    pub repeat_interval: Duration,
    pub zoom_step: f32,
    /// None = no ceiling
    pub max_zoom: Option<f32>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(100),
            repeat_interval: Duration::from_millis(150),
            zoom_step: 0.2,
            max_zoom: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Repeat {
    direction: Direction,
    next_fire: Instant,
}

/// Cycles a viewport through a frame sequence to simulate 3D rotation.
///
/// A single-flight lock guards each step: input arriving while a transition
/// settles is dropped, never queued, so rapid clicks can't produce a burst of
/// deferred frame changes. Continuous stepping re-fires on a timer that is
/// deliberately slower than the settle delay, so a held button advances on
/// every fire.
#[derive(Debug, Clone)]
pub struct FrameNavigator {
    sequence: FrameSequence,
    config: NavigatorConfig,
    zoom: f32,
    lock_until: Option<Instant>,
    repeat: Option<Repeat>,
}

impl FrameNavigator {
    pub fn new(sequence: FrameSequence, config: NavigatorConfig) -> Self {
        Self {
            sequence,
            config,
            zoom: 1.0,
            lock_until: None,
            repeat: None,
        }
    }

    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// True while the settle delay of the last step is still running.
    /// Doubles as the transition visual cue.
    pub fn is_transitioning(&self, now: Instant) -> bool {
        self.lock_until.map_or(false, |until| now < until)
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    /// Advance one frame. Returns false when the step was dropped because the
    /// previous transition has not settled yet.
    pub fn step(&mut self, direction: Direction, now: Instant) -> bool {
        if self.is_transitioning(now) {
            return false;
        }
        self.lock_until = Some(now + self.config.settle);
        self.sequence.advance(direction);
        true
    }

    /// Press-and-hold rotation: step once immediately, then repeat on a fixed
    /// timer until `stop_continuous` is called. Starting a new hold replaces
    /// any previous one.
    pub fn start_continuous(&mut self, direction: Direction, now: Instant) {
        self.step(direction, now);
        self.repeat = Some(Repeat {
            direction,
            next_fire: now + self.config.repeat_interval,
        });
    }

    /// Cancel the repeating timer. Safe to call when no hold is active.
    pub fn stop_continuous(&mut self) {
        self.repeat = None;
    }

    /// Fire any repeats that have come due. Call once per UI frame.
    pub fn tick(&mut self, now: Instant) {
        loop {
            let Some(repeat) = self.repeat.as_ref() else {
                return;
            };
            if now < repeat.next_fire {
                return;
            }
            let direction = repeat.direction;
            let fire_at = repeat.next_fire;
            // Step at the scheduled time so catch-up fires keep their spacing
            self.step(direction, fire_at);
            if let Some(repeat) = self.repeat.as_mut() {
                repeat.next_fire = fire_at + self.config.repeat_interval;
            }
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom += self.config.zoom_step;
        if let Some(max) = self.config.max_zoom {
            self.zoom = self.zoom.min(max);
        }
    }

    /// Zoom out one step, never below 1:1.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - self.config.zoom_step).max(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(len: usize) -> FrameSequence {
        FrameSequence::new("frames/", "cap", "png", len)
    }

    fn navigator(len: usize) -> FrameNavigator {
        FrameNavigator::new(sequence(len), NavigatorConfig::default())
    }

    #[test]
    fn test_frame_paths() {
        let seq = sequence(24);
        assert_eq!(seq.current_path(), "frames/cap1.png");
        assert_eq!(seq.frame_path(23), "frames/cap24.png");
    }

    #[test]
    fn test_wraparound_both_directions() {
        let mut seq = sequence(5);
        seq.advance(Direction::Previous);
        assert_eq!(seq.index(), 4);
        seq.advance(Direction::Next);
        assert_eq!(seq.index(), 0);
        seq.advance(Direction::Next);
        assert_eq!(seq.index(), 1);
    }

    #[test]
    fn test_cyclic_closure() {
        let mut nav = navigator(7);
        let now = Instant::now();
        for i in 0..7 {
            // Space steps out past the settle delay so none are dropped
            assert!(nav.step(Direction::Next, now + Duration::from_millis(i * 200)));
        }
        assert_eq!(nav.sequence().index(), 0);
    }

    #[test]
    fn test_step_dropped_while_settling() {
        let mut nav = navigator(10);
        let now = Instant::now();
        assert!(nav.step(Direction::Next, now));
        // A second request inside the settle window is dropped, not queued
        assert!(!nav.step(Direction::Next, now + Duration::from_millis(50)));
        assert_eq!(nav.sequence().index(), 1);
        // After the settle delay the navigator accepts input again
        assert!(nav.step(Direction::Next, now + Duration::from_millis(100)));
        assert_eq!(nav.sequence().index(), 2);
    }

    #[test]
    fn test_continuous_stop_after_first_repeat() {
        let mut nav = navigator(93);
        let start = Instant::now();
        nav.start_continuous(Direction::Next, start);
        assert_eq!(nav.sequence().index(), 1);

        // First automatic repeat fires at start + 150ms
        nav.tick(start + Duration::from_millis(150));
        assert_eq!(nav.sequence().index(), 2);

        nav.stop_continuous();
        // The timer is fully canceled: no trailing fire
        nav.tick(start + Duration::from_millis(300));
        nav.tick(start + Duration::from_millis(450));
        assert_eq!(nav.sequence().index(), 2);
    }

    #[test]
    fn test_held_button_outpaces_settle() {
        let mut nav = navigator(93);
        let start = Instant::now();
        nav.start_continuous(Direction::Next, start);
        // Repeat interval (150ms) > settle (100ms), so every fire advances
        for i in 1..=5u64 {
            nav.tick(start + Duration::from_millis(i * 150));
        }
        assert_eq!(nav.sequence().index(), 6);
    }

    #[test]
    fn test_stop_continuous_is_idempotent() {
        let mut nav = navigator(10);
        nav.stop_continuous();
        nav.stop_continuous();
        assert!(!nav.is_repeating());
    }

    #[test]
    fn test_zoom_floor() {
        let mut nav = navigator(10);
        nav.zoom_in();
        nav.zoom_in();
        assert!((nav.zoom() - 1.4).abs() < 1e-5);
        for _ in 0..20 {
            nav.zoom_out();
        }
        assert_eq!(nav.zoom(), 1.0);
    }

    #[test]
    fn test_zoom_ceiling_only_when_configured() {
        let mut unbounded = navigator(10);
        for _ in 0..100 {
            unbounded.zoom_in();
        }
        assert!(unbounded.zoom() > 20.0);

        let config = NavigatorConfig {
            max_zoom: Some(2.0),
            ..NavigatorConfig::default()
        };
        let mut capped = FrameNavigator::new(sequence(10), config);
        for _ in 0..100 {
            capped.zoom_in();
        }
        assert_eq!(capped.zoom(), 2.0);
    }
}
