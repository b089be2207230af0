use crate::composer::SceneComposer;
use glam::Vec2;
use pixelshift_common::Viewport;
use pixelshift_input::{PointerTracker, VirtualPage};

/// Fixed per-frame time step. No delta-time compensation: perceived
/// animation speed follows the display refresh rate.
pub const TIME_STEP: f32 = 0.05;

/// Height of the virtual scrollable page backing the scroll ratio.
const VIRTUAL_PAGE_HEIGHT: f32 = 4000.0;

/// Monotonic frame clock advanced once per rendered frame.
///
/// Time is derived from the tick count, so after N ticks it equals exactly
/// `TIME_STEP * N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    ticks: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick and return the new time.
    pub fn advance(&mut self) -> f32 {
        self.ticks += 1;
        self.time()
    }

    /// Accumulated time; never resets during a session.
    pub fn time(&self) -> f32 {
        self.ticks as f32 * TIME_STEP
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Uniform values produced by one tick, ready to push into both shader
/// stages. The post stage's input texture is bound by the render backend,
/// not carried here.
#[derive(Debug, Clone, Copy)]
pub struct FrameUniforms {
    pub time: f32,
    /// Current normalized pointer position.
    pub mouse: Vec2,
    /// Lagged pointer velocity from the smoothing step.
    pub mouse_speed: Vec2,
    pub scroll_ratio: f32,
}

/// The per-session render context.
///
/// All mutable loop state (pointer, scroll, clock, scene) lives here as
/// explicit fields rather than ambient globals, and the loop carries an
/// explicit stop handle for teardown.
#[derive(Debug)]
pub struct Sketch {
    pub composer: SceneComposer,
    pub pointer: PointerTracker,
    pub page: VirtualPage,
    viewport: Viewport,
    clock: FrameClock,
    running: bool,
}

impl Sketch {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            composer: SceneComposer::new(viewport),
            pointer: PointerTracker::new(),
            page: VirtualPage::new(VIRTUAL_PAGE_HEIGHT, viewport.height as f32),
            viewport,
            clock: FrameClock::new(),
            running: true,
        }
    }

    /// One render tick: advance the clock, run the pointer smoothing step,
    /// and emit the uniform values for both stages. Returns `None` once
    /// stopped.
    pub fn advance(&mut self) -> Option<FrameUniforms> {
        if !self.running {
            return None;
        }
        let time = self.clock.advance();
        self.pointer.smooth();
        Some(FrameUniforms {
            time,
            mouse: self.pointer.position(),
            mouse_speed: self.pointer.lagged_velocity(),
            scroll_ratio: self.page.ratio(),
        })
    }

    /// Stop the loop. Subsequent `advance` calls are no-ops.
    pub fn stop(&mut self) {
        self.running = false;
        tracing::debug!(ticks = self.clock.ticks(), "sketch stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    /// Ingest a pointer-move event. The caller pushes the returned position
    /// straight into the post-process mouse uniform.
    pub fn pointer_move(&mut self, x_px: f32, y_px: f32) -> Vec2 {
        self.pointer.pointer_move(x_px, y_px, self.viewport);
        self.pointer.position()
    }

    /// Window resize: viewport, camera aspect, and scroll client height all
    /// follow the new size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.composer.resize(viewport);
        self.page.set_client_height(viewport.height as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_exactly_step_times_ticks() {
        let mut clock = FrameClock::new();
        for _ in 0..10 {
            clock.advance();
        }
        assert_eq!(clock.time(), 10.0 * TIME_STEP);
        assert_eq!(clock.ticks(), 10);
    }

    #[test]
    fn clock_never_resets() {
        let mut clock = FrameClock::new();
        let mut last = 0.0;
        for _ in 0..1000 {
            let t = clock.advance();
            assert!(t > last);
            last = t;
        }
    }

    #[test]
    fn advance_runs_the_smoothing_step() {
        let mut sketch = Sketch::new(Viewport::new(800, 600));
        sketch.pointer_move(800.0, 0.0);
        let before = sketch.pointer.lagged_position();
        sketch.advance().unwrap();
        assert_ne!(sketch.pointer.lagged_position(), before);
    }

    #[test]
    fn stopped_sketch_refuses_to_tick() {
        let mut sketch = Sketch::new(Viewport::new(800, 600));
        sketch.advance().unwrap();
        sketch.stop();
        assert!(!sketch.is_running());
        assert!(sketch.advance().is_none());
        assert_eq!(sketch.time(), TIME_STEP);
    }

    #[test]
    fn uniforms_carry_lagged_velocity() {
        let mut sketch = Sketch::new(Viewport::new(800, 600));
        sketch.pointer_move(600.0, 200.0);
        let u = sketch.advance().unwrap();
        assert_eq!(u.mouse, sketch.pointer.position());
        assert_eq!(u.mouse_speed, sketch.pointer.lagged_velocity());
    }

    #[test]
    fn scroll_ratio_reaches_the_uniforms() {
        let mut sketch = Sketch::new(Viewport::new(800, 600));
        sketch.page.wheel(3400.0);
        let u = sketch.advance().unwrap();
        assert_eq!(u.scroll_ratio, 1.0);
    }

    #[test]
    fn resize_flows_to_camera_and_page() {
        let mut sketch = Sketch::new(Viewport::new(800, 600));
        sketch.resize(Viewport::new(1024, 512));
        assert_eq!(sketch.viewport(), Viewport::new(1024, 512));
        assert_eq!(sketch.composer.camera.aspect, 2.0);
    }
}
