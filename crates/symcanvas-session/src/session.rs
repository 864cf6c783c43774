use symcanvas_core::{Rank, RegistryError, Symbol, SymbolRegistry};
use symcanvas_renderer::{is_reserved_layer_name, CanvasSurface, PanOffset, Scene, Viewport};
use uuid::Uuid;

use crate::clock::{Clock, ManualClock, Millis};
use crate::config::SessionConfig;
use crate::controller::{Action, InteractionController};
use crate::scheduler::RedrawScheduler;

/// One interactive canvas: the symbol registry, drag/pan state, redraw
/// scheduler, drawing surface and time source, owned together.
///
/// Everything runs on the caller's thread. Input handlers only update state
/// and arm the scheduler; drawing happens in [`Session::poll`] once the
/// debounce deadline has passed, and always reads the state as it is at
/// that moment. Each handler first runs a redraw that is already overdue,
/// so an event never lands in a frame whose deadline came before it.
pub struct Session<S: CanvasSurface, C: Clock> {
    id: Uuid,
    config: SessionConfig,
    registry: SymbolRegistry,
    controller: InteractionController,
    scheduler: RedrawScheduler,
    surface: S,
    clock: C,
    redraw_count: u64,
}

impl<S: CanvasSurface, C: Clock> Session<S, C> {
    pub fn new(config: SessionConfig, surface: S, clock: C) -> Self {
        Self::with_registry(config, SymbolRegistry::new(), surface, clock)
    }

    pub fn with_registry(
        config: SessionConfig,
        registry: SymbolRegistry,
        surface: S,
        clock: C,
    ) -> Self {
        let id = Uuid::new_v4();
        for entry in registry.all_in_order() {
            if is_reserved_layer_name(entry.name()) {
                log::warn!(
                    "[{}] Symbol '{}' uses a reserved layer name and will be hidden",
                    id,
                    entry.name()
                );
            }
        }
        log::debug!(
            "[{}] Session created: {} symbols, redraw interval {} ms",
            id,
            registry.len(),
            config.redraw_interval_ms
        );
        Self {
            id,
            controller: InteractionController::new(config.margins),
            scheduler: RedrawScheduler::new(config.redraw_interval_ms),
            config,
            registry,
            surface,
            clock,
            redraw_count: 0,
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self) {
        self.poll();
        let action = self.controller.on_pointer_down();
        self.dispatch(action);
    }

    pub fn pointer_up(&mut self) {
        self.poll();
        let action = self.controller.on_pointer_up();
        self.dispatch(action);
    }

    pub fn pointer_move(&mut self, dx: i32, dy: i32) {
        self.poll();
        let action = self.controller.on_pointer_move(dx, dy);
        self.dispatch(action);
    }

    pub fn resize(&mut self, window_width: u32, window_height: u32) {
        self.poll();
        let action = self.controller.on_resize(window_width, window_height);
        self.dispatch(action);
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::RenderNeeded => {
                self.request_redraw();
            }
            Action::None => {}
        }
    }

    // ── Symbols ──────────────────────────────────────────────────────

    /// Register a symbol. It shows up on the next redraw; adding does not
    /// schedule one by itself.
    ///
    /// Names the scene uses for the grid and the marker are refused.
    pub fn add_symbol(&mut self, symbol: Symbol) -> Result<Rank, RegistryError> {
        self.poll();
        if is_reserved_layer_name(symbol.name()) {
            log::warn!("[{}] Rejected reserved symbol name '{}'", self.id, symbol.name());
            return Err(RegistryError::ReservedName(symbol.name().to_string()));
        }
        self.registry.add(symbol)
    }

    // ── Redraw ───────────────────────────────────────────────────────

    /// Arm the debounce timer if it is not already running.
    pub fn request_redraw(&mut self) -> bool {
        self.scheduler.request_redraw(self.clock.now())
    }

    /// Run the pending redraw if its deadline has passed. Returns whether a
    /// redraw ran.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let Self {
            id,
            config,
            registry,
            controller,
            scheduler,
            surface,
            redraw_count,
            ..
        } = self;

        scheduler.run_due(now, |_| {
            *redraw_count += 1;
            log::info!(
                "[{}] Redraw #{} at {} ms (pan x: {}, y: {})",
                id,
                redraw_count,
                now,
                controller.pan().x,
                controller.pan().y
            );
            render(surface, config, registry, controller);
        })
    }

    /// Draw immediately, bypassing the scheduler. Used for the first frame.
    pub fn redraw_now(&mut self) {
        self.redraw_count += 1;
        log::debug!("[{}] Immediate redraw #{}", self.id, self.redraw_count);
        render(
            &mut self.surface,
            &self.config,
            &self.registry,
            &self.controller,
        );
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn pan(&self) -> PanOffset {
        self.controller.pan()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn viewport(&self) -> Viewport {
        self.controller.viewport()
    }

    pub fn readout(&self) -> &str {
        self.controller.readout()
    }

    pub fn is_redraw_pending(&self) -> bool {
        self.scheduler.is_armed()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.scheduler.deadline()
    }

    /// Number of redraws executed so far, scheduled or immediate.
    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }
}

impl<S: CanvasSurface> Session<S, ManualClock> {
    /// Move simulated time forward to `target`, running each due redraw at
    /// its own deadline. Returns the number of redraws that ran.
    pub fn advance_to(&mut self, target: Millis) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.scheduler.deadline() {
            if deadline > target {
                break;
            }
            if deadline > self.clock.now() {
                self.clock.set(deadline);
            }
            if self.poll() {
                fired += 1;
            }
        }
        if target > self.clock.now() {
            self.clock.set(target);
        }
        fired
    }

    pub fn advance_by(&mut self, by: Millis) -> usize {
        let target = self.clock.now().saturating_add(by);
        self.advance_to(target)
    }
}

fn render<S: CanvasSurface>(
    surface: &mut S,
    config: &SessionConfig,
    registry: &SymbolRegistry,
    controller: &InteractionController,
) {
    let scene = Scene {
        registry,
        viewport: controller.viewport(),
        pan: controller.pan(),
        grid: &config.grid,
        show_marker: config.show_marker,
    };
    scene.draw(surface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use symcanvas_core::{Color, Shape, ShapeKind, Style};
    use symcanvas_renderer::RecordingSurface;

    fn rect(name: &str, x: f64, y: f64) -> Symbol {
        Symbol::new(
            name,
            Shape::rectangle(x, y, 100.0, 100.0),
            Style::filled(Color::RED).with_opacity(0.5),
        )
        .unwrap()
    }

    fn session() -> (Session<RecordingSurface, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let config = SessionConfig {
            // Keep frames small; the grid is covered in the renderer tests.
            grid: symcanvas_renderer::GridStyle {
                spacing: 1_000,
                ..Default::default()
            },
            ..SessionConfig::default()
        };
        let session = Session::new(config, RecordingSurface::new(), clock.clone());
        (session, clock)
    }

    #[test]
    fn test_drag_burst_yields_single_redraw_with_latest_pan() {
        let (mut s, clock) = session();
        s.pointer_down();
        for _ in 0..10 {
            s.pointer_move(1, 2);
            clock.advance(5);
        }
        // First move armed the timer at t=0, so it is due at t=100.
        assert_eq!(s.next_deadline(), Some(100));
        assert_eq!(s.pan(), PanOffset::new(10, 20));

        clock.set(99);
        assert!(!s.poll());

        // More motion after the burst but before the fire is still picked up.
        s.pointer_move(5, 5);
        clock.set(100);
        assert!(s.poll());
        assert!(!s.poll());
        assert_eq!(s.redraw_count(), 1);

        let frame = s.surface().last_frame().unwrap();
        assert_eq!(frame.layer("base").unwrap().offset, [15.0, 25.0]);
    }

    #[test]
    fn test_moves_without_drag_do_not_schedule() {
        let (mut s, _clock) = session();
        s.pointer_move(3, 3);
        assert!(!s.is_redraw_pending());
        assert_eq!(s.readout(), "x: 0, y: 0");
    }

    #[test]
    fn test_resize_schedules_redraw() {
        let (mut s, _clock) = session();
        s.resize(1440, 900);
        assert!(s.is_redraw_pending());
        assert_eq!(s.viewport(), Viewport::new(1400, 800));
        assert_eq!(s.advance_to(100), 1);
    }

    #[test]
    fn test_request_after_fire_rearms() {
        let (mut s, clock) = session();
        s.resize(800, 600);
        assert_eq!(s.advance_to(150), 1);
        assert!(!s.is_redraw_pending());

        assert!(s.request_redraw());
        assert!(!s.request_redraw());
        assert_eq!(s.next_deadline(), Some(250));
        assert_eq!(clock.now(), 150);
        assert_eq!(s.advance_to(1_000), 1);
        assert_eq!(s.redraw_count(), 2);
    }

    #[test]
    fn test_added_symbol_appears_on_next_redraw_in_order() {
        let (mut s, _clock) = session();
        s.add_symbol(rect("rect1", 100.0, 100.0)).unwrap();
        s.redraw_now();

        s.add_symbol(rect("rect2100", 100.0, 200.0)).unwrap();
        assert_eq!(
            s.add_symbol(rect("rect1", 0.0, 0.0)),
            Err(RegistryError::DuplicateName("rect1".to_string()))
        );
        s.resize(800, 600);
        s.advance_by(100);

        let frames = s.surface().frames();
        assert_eq!(frames.len(), 2);
        let names = |i: usize| -> Vec<&str> {
            frames[i]
                .layer_names()
                .into_iter()
                .filter(|n| !n.starts_with("grid"))
                .collect()
        };
        assert_eq!(names(0), vec!["rect1", "base"]);
        assert_eq!(names(1), vec!["rect1", "rect2100", "base"]);
    }

    #[test]
    fn test_overdue_redraw_runs_before_late_input() {
        let (mut s, clock) = session();
        s.pointer_down();
        s.pointer_move(1, 0);
        assert_eq!(s.next_deadline(), Some(100));

        // The host has not polled since the deadline passed.
        clock.set(150);
        s.pointer_move(1, 0);
        assert_eq!(s.redraw_count(), 1);
        assert_eq!(
            s.surface().last_frame().unwrap().layer("base").unwrap().offset,
            [1.0, 0.0]
        );

        // The late move armed a fresh window of its own.
        assert_eq!(s.next_deadline(), Some(250));
        assert_eq!(s.advance_to(250), 1);
        assert_eq!(
            s.surface().last_frame().unwrap().layer("base").unwrap().offset,
            [2.0, 0.0]
        );
        assert!(!s.is_redraw_pending());
    }

    #[test]
    fn test_reserved_names_rejected_and_layers_kept() {
        let (mut s, _clock) = session();
        let tiny = |name: &str| {
            Symbol::new(name, Shape::rectangle(0.0, 0.0, 50.0, 50.0), Style::default()).unwrap()
        };
        assert_eq!(
            s.add_symbol(tiny("base")),
            Err(RegistryError::ReservedName("base".to_string()))
        );
        assert_eq!(
            s.add_symbol(tiny("gridHeight0")),
            Err(RegistryError::ReservedName("gridHeight0".to_string()))
        );
        assert!(s.registry().is_empty());
        assert_eq!(s.registry().next_rank(), 0);

        s.resize(200, 200);
        s.redraw_now();
        let frame = s.surface().last_frame().unwrap();
        assert_eq!(frame.layer("base").unwrap().shape, Shape::rectangle(0.0, 0.0, 100.0, 100.0));
        assert_eq!(frame.layer("gridHeight0").unwrap().shape.kind(), ShapeKind::Line);
    }
}
