use crate::config::{validate_close_distance, validate_transform, LassoConfig};
use crate::error::{LassoError, Result};
use crate::geometry::{self, Point, ViewTransform};
use crate::hooks::{Hooks, LassoEvent};
use crate::registry::{ItemGeometry, ItemId, ItemRegistry};
use crate::render::{LassoSurface, NullSurface, PathData, ORIGIN_RADIUS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// One pointer-move sample.
///
/// `screen` is the raw client position and drives every distance and
/// enclosure test. `local` is the position inside the drawing area before the
/// zoom transform is undone, and is only used for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub screen: Point,
    pub local: Point,
    pub kind: PointerKind,
}

impl PointerSample {
    pub fn new(screen: Point, local: Point, kind: PointerKind) -> Self {
        Self {
            screen,
            local,
            kind,
        }
    }

    /// Sample where screen and drawing space coincide.
    pub fn mouse(x: f64, y: f64) -> Self {
        let point = Point::new(x, y);
        Self::new(point, point, PointerKind::Mouse)
    }
}

/// `Ended` is the resting state after a completed drag; the next
/// [`Lasso::start`] leaves it. `Idle` is only seen before the first drag or
/// after a drag was abandoned by disabling the lasso.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Drawing,
    Ended,
}

#[derive(Default)]
struct DrawnPath {
    coords: Vec<Point>,
    render: PathData,
    origin: Option<(Point, Point)>,
}

impl DrawnPath {
    fn clear(&mut self) {
        self.coords.clear();
        self.render.clear();
        self.origin = None;
    }
}

/// Freehand lasso over a set of host items.
///
/// The host feeds drag samples through [`Lasso::start`], [`Lasso::move_to`],
/// [`Lasso::hover`] and [`Lasso::end`]; the lasso keeps every item's selection
/// record current and pushes path directives to its surface.
pub struct Lasso<H, S = NullSurface> {
    config: LassoConfig,
    registry: ItemRegistry<H>,
    surface: S,
    hooks: Hooks<H>,
    phase: GesturePhase,
    path: DrawnPath,
    is_path_closed: bool,
    hover_armed: bool,
}

impl<H, S: Default> Default for Lasso<H, S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<H, S> Lasso<H, S> {
    pub fn new(surface: S) -> Self {
        Self {
            config: LassoConfig::default(),
            registry: ItemRegistry::default(),
            surface,
            hooks: Hooks::default(),
            phase: GesturePhase::Idle,
            path: DrawnPath::default(),
            is_path_closed: false,
            hover_armed: false,
        }
    }

    pub fn with_config(config: LassoConfig, surface: S) -> Result<Self> {
        config.validate()?;
        let mut lasso = Self::new(surface);
        lasso.config = config;
        Ok(lasso)
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_drawing(&self) -> bool {
        self.phase == GesturePhase::Drawing
    }

    /// Whether the latest sample came back within the close distance of the
    /// origin.
    pub fn is_path_closed(&self) -> bool {
        self.is_path_closed
    }

    /// Screen-space samples of the current (or last finished) drag.
    pub fn drawn_coords(&self) -> &[Point] {
        &self.path.coords
    }

    pub fn origin(&self) -> Option<Point> {
        self.path.origin.map(|(screen, _)| screen)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn items(&self) -> &ItemRegistry<H> {
        &self.registry
    }

    pub fn possible_items(&self) -> Vec<&H> {
        self.registry.possible_items()
    }

    pub fn selected_items(&self) -> Vec<&H> {
        self.registry.selected_items()
    }

    pub fn not_possible_items(&self) -> Vec<&H> {
        self.registry.not_possible_items()
    }

    pub fn not_selected_items(&self) -> Vec<&H> {
        self.registry.not_selected_items()
    }

    pub fn config(&self) -> &LassoConfig {
        &self.config
    }

    pub fn close_path_distance(&self) -> f64 {
        self.config.close_path_distance
    }

    pub fn close_path_select(&self) -> bool {
        self.config.close_path_select
    }

    pub fn hover_select(&self) -> bool {
        self.config.hover_select
    }

    pub fn view_transform(&self) -> ViewTransform {
        self.config.zoom_transform
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.is_drawing() {
            log::debug!("rejected lasso reconfiguration during a drag");
            return Err(LassoError::DragInProgress);
        }
        Ok(())
    }

    pub fn set_items(&mut self, handles: impl IntoIterator<Item = H>) -> Result<()> {
        self.ensure_idle()?;
        self.registry.replace(handles);
        log::debug!("lasso now tracks {} items", self.registry.len());
        Ok(())
    }

    pub fn set_close_path_distance(&mut self, distance: f64) -> Result<()> {
        self.ensure_idle()?;
        validate_close_distance(distance)?;
        self.config.close_path_distance = distance;
        Ok(())
    }

    pub fn set_close_path_select(&mut self, enabled: bool) -> Result<()> {
        self.ensure_idle()?;
        self.config.close_path_select = enabled;
        Ok(())
    }

    pub fn set_hover_select(&mut self, enabled: bool) -> Result<()> {
        self.ensure_idle()?;
        self.config.hover_select = enabled;
        Ok(())
    }

    pub fn set_view_transform(&mut self, transform: ViewTransform) -> Result<()> {
        self.ensure_idle()?;
        validate_transform(&transform)?;
        self.config.zoom_transform = transform;
        Ok(())
    }

    /// Replaces every option at once. `enabled` goes through
    /// [`Lasso::set_enabled`].
    pub fn configure(&mut self, config: LassoConfig) -> Result<()> {
        self.ensure_idle()?;
        config.validate()?;
        let enabled = config.enabled;
        self.config = LassoConfig {
            enabled: self.config.enabled,
            ..config
        };
        self.set_enabled(enabled);
        Ok(())
    }

    /// Disabling mid-drag abandons the drag: its path stays on the surface
    /// until the next start resets it.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.is_drawing() {
            log::debug!("lasso disabled mid-drag, abandoning the current path");
            self.phase = GesturePhase::Idle;
            self.hover_armed = false;
        }
        self.config.enabled = enabled;
    }

    /// Registers a hook by name. Names other than `start`, `draw` and `end`
    /// are ignored.
    pub fn on(&mut self, name: &str, hook: impl FnMut(&ItemRegistry<H>) + 'static) {
        match name.parse::<LassoEvent>() {
            Ok(event) => self.hooks.set(event, Box::new(hook)),
            Err(unknown) => log::debug!("ignoring lasso hook for unknown event {:?}", unknown.0),
        }
    }

    pub fn on_start(&mut self, hook: impl FnMut(&ItemRegistry<H>) + 'static) {
        self.hooks.set(LassoEvent::Start, Box::new(hook));
    }

    pub fn on_draw(&mut self, hook: impl FnMut(&ItemRegistry<H>) + 'static) {
        self.hooks.set(LassoEvent::Draw, Box::new(hook));
    }

    pub fn on_end(&mut self, hook: impl FnMut(&ItemRegistry<H>) + 'static) {
        self.hooks.set(LassoEvent::End, Box::new(hook));
    }

    fn notify(&mut self, event: LassoEvent) -> LassoEvent {
        self.hooks.fire(event, &self.registry);
        event
    }

    fn accepts_samples(&self) -> bool {
        self.config.enabled && self.is_drawing()
    }

    /// Marks an item the pointer passed over. Returns false when hover
    /// tracking is off or the id is unknown.
    pub fn hover(&mut self, id: ItemId) -> bool {
        if !self.accepts_samples() || !self.hover_armed {
            return false;
        }
        match self.registry.state_mut(id) {
            Some(state) => {
                state.mark_hovered();
                true
            }
            None => false,
        }
    }
}

impl<H: PartialEq, S> Lasso<H, S> {
    pub fn hover_handle(&mut self, handle: &H) -> bool {
        match self.registry.find(handle) {
            Some(id) => self.hover(id),
            None => false,
        }
    }
}

impl<H, S: LassoSurface> Lasso<H, S> {
    pub fn move_to(&mut self, sample: PointerSample) -> Option<LassoEvent> {
        if !self.accepts_samples() {
            return None;
        }
        if !sample.screen.is_finite() || !sample.local.is_finite() {
            return None;
        }

        let screen = sample.screen;
        let render = self.config.zoom_transform.invert(sample.local);
        let (origin, render_origin) = match self.path.origin {
            Some(origins) => {
                self.path.render.line_to(render);
                origins
            }
            None => {
                self.path.origin = Some((screen, render));
                self.path.render.move_to(render);
                self.surface.show_origin(render, ORIGIN_RADIUS);
                (screen, render)
            }
        };
        self.path.coords.push(screen);

        self.is_path_closed = geometry::distance(screen, origin) <= self.config.close_path_distance;
        let loop_select = self.is_path_closed && self.config.close_path_select;

        self.surface.set_drawn_path(Some(self.path.render.as_str()));
        let closing = PathData::segment(render, render_origin);
        self.surface.set_closing_path(Some(closing.as_str()));
        self.surface.set_closing_visible(loop_select);

        let coords = &self.path.coords;
        for state in self.registry.states_mut() {
            let enclosed = loop_select && geometry::enclosing(coords, state.representative_point());
            state.update_possible(enclosed);
        }
        log::trace!(
            "lasso {:?} sample {:?} ({} points, closed={})",
            sample.kind,
            screen,
            coords.len(),
            self.is_path_closed
        );

        Some(self.notify(LassoEvent::Draw))
    }

    pub fn end(&mut self) -> Option<LassoEvent> {
        if !self.accepts_samples() {
            return None;
        }
        self.hover_armed = false;
        for state in self.registry.states_mut() {
            state.finalize();
        }

        if !self.registry.any_selected() {
            self.surface.set_drawn_path(None);
            self.surface.set_closing_path(None);
            self.surface.hide_origin();
        } else if !self.path.render.is_empty() {
            self.surface.set_drawn_path(Some(&self.path.render.closed()));
        }

        self.phase = GesturePhase::Ended;
        log::debug!(
            "lasso drag ended with {} of {} items selected",
            self.registry.selected_ids().len(),
            self.registry.len()
        );
        Some(self.notify(LassoEvent::End))
    }

    /// Drops the current selection and every lasso shape, then fires `end`.
    pub fn clear(&mut self) -> LassoEvent {
        for state in self.registry.states_mut() {
            state.deselect();
        }
        self.surface.set_drawn_path(None);
        self.surface.set_closing_path(None);
        self.surface.hide_origin();
        self.notify(LassoEvent::End)
    }
}

impl<H: ItemGeometry, S: LassoSurface> Lasso<H, S> {
    pub fn start(&mut self) -> Option<LassoEvent> {
        if !self.config.enabled {
            return None;
        }
        if self.is_drawing() {
            log::debug!("lasso drag restarted before the previous one ended");
        }

        self.path.clear();
        self.is_path_closed = false;
        self.surface.set_drawn_path(None);
        self.surface.set_closing_path(None);

        for (handle, state) in self.registry.entries_mut() {
            let point = handle.screen_rect().map(|rect| rect.center());
            state.reset_for_drag(point);
        }

        self.hover_armed = self.config.hover_select;
        self.phase = GesturePhase::Drawing;
        log::debug!("lasso drag started over {} items", self.registry.len());
        Some(self.notify(LassoEvent::Start))
    }
}
