use glam::Vec2;
use pixelshift_common::Viewport;

/// Scale applied to the per-event position delta when deriving velocity.
const VELOCITY_SCALE: f32 = 10.0;

/// Fraction of the remaining distance the lagged position covers each tick.
const LAG_FACTOR: f32 = 0.1;

/// Tracks normalized pointer position, velocity, acceleration, and a
/// separately smoothed (lagged) position/velocity pair.
///
/// `pointer_move` runs per input event; `smooth` runs once per render tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    position: Vec2,
    previous: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    lagged: Vec2,
    lagged_velocity: Vec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a pointer-move event at raw device coordinates.
    ///
    /// Shifts the current position to "previous", normalizes the new
    /// position against the viewport, and derives velocity as
    /// `clamp(|delta| * 10, 0, 1)` per axis.
    pub fn pointer_move(&mut self, x_px: f32, y_px: f32, viewport: Viewport) {
        self.previous = self.position;
        self.position = viewport.normalize_pointer(x_px, y_px);
        self.velocity = ((self.position - self.previous) * VELOCITY_SCALE)
            .abs()
            .min(Vec2::ONE);
        // Mixes normalized position with raw pixel coordinates; the shift
        // effect is tuned around this exact formula, so keep it as-is.
        let raw = Vec2::new(x_px, viewport.height as f32 - y_px);
        self.acceleration = (self.position - raw) - self.velocity;
    }

    /// Advance the lagged pair one render tick.
    ///
    /// The lagged position moves 10% of the remaining distance toward the
    /// current position; the lagged velocity is the remaining offset.
    pub fn smooth(&mut self) {
        self.lagged -= (self.lagged - self.position) * LAG_FACTOR;
        self.lagged_velocity = self.lagged - self.position;
    }

    /// Current normalized position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position at the immediately previous event.
    pub fn previous(&self) -> Vec2 {
        self.previous
    }

    /// Per-axis velocity, clamped to [0, 1].
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Derived acceleration (unclamped, mixed units).
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Smoothed position.
    pub fn lagged_position(&self) -> Vec2 {
        self.lagged
    }

    /// Smoothed velocity: lagged position minus current position.
    pub fn lagged_velocity(&self) -> Vec2 {
        self.lagged_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800, 600)
    }

    #[test]
    fn velocity_from_single_move() {
        let mut t = PointerTracker::new();
        t.pointer_move(400.0, 300.0, viewport());
        // 40px over an 800px viewport: delta = 0.05, velocity = 0.5.
        t.pointer_move(440.0, 300.0, viewport());
        assert!((t.velocity().x - 0.5).abs() < 1e-6);
        assert_eq!(t.velocity().y, 0.0);
    }

    #[test]
    fn velocity_stays_clamped() {
        let mut t = PointerTracker::new();
        let moves = [
            (0.0, 0.0),
            (800.0, 600.0),
            (0.0, 600.0),
            (799.0, 1.0),
            (12.0, 480.0),
        ];
        for (x, y) in moves {
            t.pointer_move(x, y, viewport());
            assert!(t.velocity().x >= 0.0 && t.velocity().x <= 1.0);
            assert!(t.velocity().y >= 0.0 && t.velocity().y <= 1.0);
        }
    }

    #[test]
    fn lagged_position_converges_geometrically() {
        let mut t = PointerTracker::new();
        t.pointer_move(800.0, 0.0, viewport());
        // Lagged starts at the origin, so the initial error is the full
        // pointer offset.
        let initial = (t.lagged_position() - t.position()).length();
        for _ in 0..10 {
            t.smooth();
        }
        let remaining = (t.lagged_position() - t.position()).length();
        let ratio = remaining / initial;
        // 0.9^10 of the initial error remains after ten still ticks.
        assert!((ratio - 0.9f32.powi(10)).abs() < 1e-3);
        assert!(ratio <= 0.35);
    }

    #[test]
    fn lagged_velocity_is_remaining_offset() {
        let mut t = PointerTracker::new();
        t.pointer_move(600.0, 150.0, viewport());
        t.smooth();
        let expected = t.lagged_position() - t.position();
        assert_eq!(t.lagged_velocity(), expected);
    }

    #[test]
    fn previous_tracks_last_event() {
        let mut t = PointerTracker::new();
        t.pointer_move(100.0, 100.0, viewport());
        let first = t.position();
        t.pointer_move(200.0, 200.0, viewport());
        assert_eq!(t.previous(), first);
    }
}
