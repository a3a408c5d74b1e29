//! Canonical window records and their state transitions.
//!
//! The registry is pure state: it never renders and never publishes. Each transition returns the
//! [`RegistryEffect`] list the window manager must apply afterwards (surface updates, then bus
//! notifications) in order.

use crate::{
    error::RegistryError,
    model::{
        DragSession, InteractionState, PointerPosition, ResizeEdge, ResizeSession, WindowGeometry,
        WindowId, WindowRecord, WindowState,
    },
};

/// Follow-up work produced by a registry transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEffect {
    /// Re-render the window's chrome, geometry, stacking, and visibility.
    Render(WindowId),
    /// Remove the window's visual representation.
    Unmount(WindowId),
    /// Publish `windowFocused`.
    Focused(WindowId),
    /// Publish `windowMinimized`.
    Minimized(WindowId),
    /// Publish `windowRestored`.
    Restored(WindowId),
    /// Publish `windowClosed`.
    Closed(WindowId),
    /// Publish `windowRenamed`.
    Renamed { id: WindowId, title: String },
    /// Publish `windowsUnfocused`.
    Unfocused,
}

pub type Transition = Result<Vec<RegistryEffect>, RegistryError>;

#[derive(Debug, Clone, Default)]
pub struct WindowRegistry {
    windows: Vec<WindowRecord>,
    z_counter: u32,
    interaction: InteractionState,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Windows in insertion order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == *id)
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn focused_window_id(&self) -> Option<&WindowId> {
        self.windows.iter().find(|w| w.is_focused).map(|w| &w.id)
    }

    /// Highest-stacked visible window.
    pub fn topmost(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index)
    }

    pub fn z_counter(&self) -> u32 {
        self.z_counter
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Adds a record. The record is stored unfocused at z-index 0 until [`Self::focus`] runs.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateWindow`] when the id is already registered.
    pub fn insert(&mut self, mut record: WindowRecord) -> Result<(), RegistryError> {
        if self.contains(&record.id) {
            return Err(RegistryError::DuplicateWindow(record.id));
        }
        record.is_focused = false;
        record.z_index = 0;
        self.windows.push(record);
        Ok(())
    }

    /// Focuses and raises `id`; every other window loses focus.
    pub fn focus(&mut self, id: &WindowId) -> Transition {
        let index = self.index_of(id)?;
        let mut effects = Vec::new();
        for (idx, window) in self.windows.iter_mut().enumerate() {
            if idx != index && window.is_focused {
                window.is_focused = false;
                effects.push(RegistryEffect::Render(window.id.clone()));
            }
        }

        self.z_counter = self.z_counter.saturating_add(1);
        let window = &mut self.windows[index];
        window.is_focused = true;
        window.z_index = self.z_counter;
        effects.push(RegistryEffect::Render(id.clone()));
        effects.push(RegistryEffect::Focused(id.clone()));
        Ok(effects)
    }

    /// Clears every focus flag without touching z-order. Emits [`RegistryEffect::Unfocused`]
    /// only when some window actually lost focus.
    pub fn unfocus_all(&mut self) -> Vec<RegistryEffect> {
        let mut effects: Vec<RegistryEffect> = self
            .windows
            .iter_mut()
            .filter(|w| w.is_focused)
            .map(|w| {
                w.is_focused = false;
                RegistryEffect::Render(w.id.clone())
            })
            .collect();
        if !effects.is_empty() {
            effects.push(RegistryEffect::Unfocused);
        }
        effects
    }

    /// Hides `id`. Minimizing an already minimized window changes nothing.
    pub fn minimize(&mut self, id: &WindowId) -> Transition {
        let window = self.window_mut(id)?;
        if window.is_minimized() {
            return Ok(Vec::new());
        }
        window.state = WindowState::Minimized;
        window.is_focused = false;
        self.cancel_interaction_for(id);
        Ok(vec![
            RegistryEffect::Render(id.clone()),
            RegistryEffect::Minimized(id.clone()),
        ])
    }

    /// Returns `id` to its normal layout and focuses it.
    ///
    /// A minimized window goes back to the layout it had before minimizing (maximized windows
    /// keep their saved bounds while minimized). A maximized window is un-maximized.
    pub fn restore(&mut self, id: &WindowId) -> Transition {
        let window = self.window_mut(id)?;
        match window.state {
            WindowState::Minimized => {
                window.state = if window.saved_geometry.is_some() {
                    WindowState::Maximized
                } else {
                    WindowState::Normal
                };
            }
            WindowState::Maximized => {
                if let Some(saved) = window.saved_geometry.take() {
                    window.geometry = saved;
                }
                window.state = WindowState::Normal;
            }
            WindowState::Normal => {}
        }

        let mut effects = vec![RegistryEffect::Render(id.clone())];
        effects.extend(self.focus(id)?);
        effects.push(RegistryEffect::Restored(id.clone()));
        Ok(effects)
    }

    /// Maximize toggle. A maximized window returns to its saved bounds; any other window saves
    /// its bounds and fills `bounds`. Either way the window ends focused.
    pub fn toggle_maximize(&mut self, id: &WindowId, bounds: WindowGeometry) -> Transition {
        let window = self.window_mut(id)?;
        let mut effects = Vec::new();
        match window.state {
            WindowState::Maximized => {
                if let Some(saved) = window.saved_geometry.take() {
                    window.geometry = saved;
                }
                window.state = WindowState::Normal;
            }
            WindowState::Normal => {
                window.saved_geometry = Some(window.geometry);
                window.geometry = bounds;
                window.state = WindowState::Maximized;
            }
            WindowState::Minimized => {
                if window.saved_geometry.is_none() {
                    window.saved_geometry = Some(window.geometry);
                }
                window.geometry = bounds;
                window.state = WindowState::Maximized;
                effects.push(RegistryEffect::Restored(id.clone()));
            }
        }
        self.cancel_interaction_for(id);

        effects.insert(0, RegistryEffect::Render(id.clone()));
        effects.extend(self.focus(id)?);
        Ok(effects)
    }

    /// Drops `id`. Focus is not handed to another window.
    pub fn remove(&mut self, id: &WindowId) -> Transition {
        let index = self.index_of(id)?;
        self.windows.remove(index);
        self.cancel_interaction_for(id);
        Ok(vec![
            RegistryEffect::Unmount(id.clone()),
            RegistryEffect::Closed(id.clone()),
        ])
    }

    pub fn rename(&mut self, id: &WindowId, title: impl Into<String>) -> Transition {
        let title = title.into();
        let window = self.window_mut(id)?;
        window.title = title.clone();
        Ok(vec![
            RegistryEffect::Render(id.clone()),
            RegistryEffect::Renamed {
                id: id.clone(),
                title,
            },
        ])
    }

    /// Starts a title-bar drag. Non-draggable, minimized, and maximized windows are focused but
    /// not captured.
    pub fn begin_drag(&mut self, id: &WindowId, pointer: PointerPosition) -> Transition {
        let window = self.get(id).ok_or_else(|| RegistryError::WindowNotFound(id.clone()))?;
        let capturable = window.draggable && window.state == WindowState::Normal;
        let geometry_start = window.geometry;
        let effects = self.focus(id)?;
        if capturable {
            self.interaction.resizing = None;
            self.interaction.dragging = Some(DragSession {
                window_id: id.clone(),
                pointer_start: pointer,
                geometry_start,
            });
        }
        Ok(effects)
    }

    /// Moves the dragged window by the pointer delta since [`Self::begin_drag`].
    pub fn drag_to(&mut self, pointer: PointerPosition) -> Option<RegistryEffect> {
        let session = self.interaction.dragging.clone()?;
        let dx = pointer.x - session.pointer_start.x;
        let dy = pointer.y - session.pointer_start.y;
        let window = self.windows.iter_mut().find(|w| w.id == session.window_id)?;
        window.geometry = session.geometry_start.offset(dx, dy);
        Some(RegistryEffect::Render(session.window_id))
    }

    pub fn end_drag(&mut self) -> Option<WindowId> {
        self.interaction.dragging.take().map(|s| s.window_id)
    }

    /// Starts a resize from `edge`. Only resizable windows in the normal state are captured.
    pub fn begin_resize(
        &mut self,
        id: &WindowId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    ) -> Transition {
        let window = self.get(id).ok_or_else(|| RegistryError::WindowNotFound(id.clone()))?;
        let capturable = window.resizable && window.state == WindowState::Normal;
        let geometry_start = window.geometry;
        let effects = self.focus(id)?;
        if capturable {
            self.interaction.dragging = None;
            self.interaction.resizing = Some(ResizeSession {
                window_id: id.clone(),
                edge,
                pointer_start: pointer,
                geometry_start,
            });
        }
        Ok(effects)
    }

    /// Applies the pointer delta to the resized window, clamped to its minimum size.
    pub fn resize_to(&mut self, pointer: PointerPosition) -> Option<RegistryEffect> {
        let session = self.interaction.resizing.clone()?;
        let dx = pointer.x - session.pointer_start.x;
        let dy = pointer.y - session.pointer_start.y;
        let window = self.windows.iter_mut().find(|w| w.id == session.window_id)?;
        window.geometry = resize_geometry(
            session.geometry_start,
            session.edge,
            dx,
            dy,
            window.min_width,
            window.min_height,
        );
        Some(RegistryEffect::Render(session.window_id))
    }

    pub fn end_resize(&mut self) -> Option<WindowId> {
        self.interaction.resizing.take().map(|s| s.window_id)
    }

    /// Next Alt+Tab target: the visible window after the focused one in insertion order,
    /// wrapping. Falls back to the first visible window when nothing is focused.
    pub fn next_cycle_target(&self) -> Option<WindowId> {
        let visible: Vec<&WindowRecord> = self.windows.iter().filter(|w| w.is_visible()).collect();
        if visible.is_empty() {
            return None;
        }
        let next = match visible.iter().position(|w| w.is_focused) {
            Some(current) => (current + 1) % visible.len(),
            None => 0,
        };
        Some(visible[next].id.clone())
    }

    /// Refits maximized windows to new bounds after a viewport change.
    pub fn refit_maximized(&mut self, bounds: WindowGeometry) -> Vec<RegistryEffect> {
        self.windows
            .iter_mut()
            .filter(|w| w.is_maximized())
            .map(|w| {
                w.geometry = bounds;
                RegistryEffect::Render(w.id.clone())
            })
            .collect()
    }

    fn index_of(&self, id: &WindowId) -> Result<usize, RegistryError> {
        self.windows
            .iter()
            .position(|w| w.id == *id)
            .ok_or_else(|| RegistryError::WindowNotFound(id.clone()))
    }

    fn window_mut(&mut self, id: &WindowId) -> Result<&mut WindowRecord, RegistryError> {
        self.windows
            .iter_mut()
            .find(|w| w.id == *id)
            .ok_or_else(|| RegistryError::WindowNotFound(id.clone()))
    }

    fn cancel_interaction_for(&mut self, id: &WindowId) {
        if self
            .interaction
            .dragging
            .as_ref()
            .is_some_and(|s| s.window_id == *id)
        {
            self.interaction.dragging = None;
        }
        if self
            .interaction
            .resizing
            .as_ref()
            .is_some_and(|s| s.window_id == *id)
        {
            self.interaction.resizing = None;
        }
    }
}

/// Applies a resize delta for the dragged edge or corner.
///
/// Width and height never drop below the minimums. When a west or north edge hits its minimum
/// the opposite edge stays put.
pub fn resize_geometry(
    start: WindowGeometry,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    min_width: i32,
    min_height: i32,
) -> WindowGeometry {
    let (grow_west, grow_east) = match edge {
        ResizeEdge::West | ResizeEdge::NorthWest | ResizeEdge::SouthWest => (true, false),
        ResizeEdge::East | ResizeEdge::NorthEast | ResizeEdge::SouthEast => (false, true),
        ResizeEdge::North | ResizeEdge::South => (false, false),
    };
    let (grow_north, grow_south) = match edge {
        ResizeEdge::North | ResizeEdge::NorthEast | ResizeEdge::NorthWest => (true, false),
        ResizeEdge::South | ResizeEdge::SouthEast | ResizeEdge::SouthWest => (false, true),
        ResizeEdge::East | ResizeEdge::West => (false, false),
    };

    let mut next = start;
    if grow_east {
        next.width = (start.width + dx).max(min_width);
    }
    if grow_west {
        next.width = (start.width - dx).max(min_width);
        next.x = start.x + start.width - next.width;
    }
    if grow_south {
        next.height = (start.height + dy).max(min_height);
    }
    if grow_north {
        next.height = (start.height - dy).max(min_height);
        next.y = start.y + start.height - next.height;
    }
    next
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str) -> WindowRecord {
        WindowRecord {
            id: id.into(),
            title: id.to_uppercase(),
            icon: String::new(),
            geometry: WindowGeometry {
                x: 40,
                y: 30,
                width: 600,
                height: 400,
            },
            saved_geometry: None,
            z_index: 0,
            state: WindowState::Normal,
            is_focused: false,
            min_width: 300,
            min_height: 200,
            resizable: true,
            draggable: true,
        }
    }

    fn open(registry: &mut WindowRegistry, id: &str) -> WindowId {
        let id = WindowId::from(id);
        registry.insert(record(id.as_str())).expect("insert");
        registry.focus(&id).expect("focus");
        id
    }

    const SCREEN: WindowGeometry = WindowGeometry {
        x: 0,
        y: 0,
        width: 1280,
        height: 752,
    };

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut registry = WindowRegistry::new();
        open(&mut registry, "w1");
        assert_eq!(
            registry.insert(record("w1")),
            Err(RegistryError::DuplicateWindow("w1".into()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn focus_moves_the_single_focus_flag_and_raises() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");
        let w2 = open(&mut registry, "w2");

        let effects = registry.focus(&w1).expect("focus");

        assert_eq!(
            effects,
            vec![
                RegistryEffect::Render(w2.clone()),
                RegistryEffect::Render(w1.clone()),
                RegistryEffect::Focused(w1.clone()),
            ]
        );
        assert_eq!(registry.focused_window_id(), Some(&w1));
        assert!(!registry.get(&w2).unwrap().is_focused);
        assert!(registry.get(&w1).unwrap().z_index > registry.get(&w2).unwrap().z_index);
    }

    #[test]
    fn refocusing_the_focused_window_still_raises_it() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");
        let before = registry.get(&w1).unwrap().z_index;
        registry.focus(&w1).expect("focus");
        assert!(registry.get(&w1).unwrap().z_index > before);
    }

    #[test]
    fn unfocus_all_keeps_z_order() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");
        let w2 = open(&mut registry, "w2");
        let z = (
            registry.get(&w1).unwrap().z_index,
            registry.get(&w2).unwrap().z_index,
        );

        let effects = registry.unfocus_all();

        assert_eq!(
            effects,
            vec![RegistryEffect::Render(w2.clone()), RegistryEffect::Unfocused]
        );
        assert_eq!(registry.unfocus_all(), Vec::new());
        assert_eq!(registry.focused_window_id(), None);
        assert_eq!(
            z,
            (
                registry.get(&w1).unwrap().z_index,
                registry.get(&w2).unwrap().z_index
            )
        );
    }

    #[test]
    fn minimize_is_idempotent() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");

        assert_eq!(registry.minimize(&w1).expect("minimize").len(), 2);
        assert!(registry.minimize(&w1).expect("minimize again").is_empty());
        let window = registry.get(&w1).unwrap();
        assert_eq!(window.state, WindowState::Minimized);
        assert!(!window.is_focused);
    }

    #[test]
    fn restore_after_minimize_keeps_geometry_and_focuses() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");
        open(&mut registry, "w2");
        let geometry = registry.get(&w1).unwrap().geometry;

        registry.minimize(&w1).expect("minimize");
        let effects = registry.restore(&w1).expect("restore");

        assert_eq!(effects.first(), Some(&RegistryEffect::Render(w1.clone())));
        assert_eq!(effects.last(), Some(&RegistryEffect::Restored(w1.clone())));
        assert!(effects.contains(&RegistryEffect::Focused(w1.clone())));
        let window = registry.get(&w1).unwrap();
        assert_eq!(window.state, WindowState::Normal);
        assert!(window.is_focused);
        assert_eq!(window.geometry, geometry);
    }

    #[test]
    fn double_maximize_toggle_restores_geometry_exactly() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");
        let original = registry.get(&w1).unwrap().geometry;

        registry.toggle_maximize(&w1, SCREEN).expect("maximize");
        let window = registry.get(&w1).unwrap();
        assert_eq!(window.state, WindowState::Maximized);
        assert_eq!(window.geometry, SCREEN);
        assert_eq!(window.saved_geometry, Some(original));

        registry.toggle_maximize(&w1, SCREEN).expect("unmaximize");
        let window = registry.get(&w1).unwrap();
        assert_eq!(window.state, WindowState::Normal);
        assert_eq!(window.geometry, original);
        assert_eq!(window.saved_geometry, None);
    }

    #[test]
    fn minimized_maximized_window_restores_to_maximized() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");
        let original = registry.get(&w1).unwrap().geometry;
        registry.toggle_maximize(&w1, SCREEN).expect("maximize");

        registry.minimize(&w1).expect("minimize");
        registry.restore(&w1).expect("restore");
        assert_eq!(registry.get(&w1).unwrap().state, WindowState::Maximized);

        registry.restore(&w1).expect("restore from maximized");
        let window = registry.get(&w1).unwrap();
        assert_eq!(window.state, WindowState::Normal);
        assert_eq!(window.geometry, original);
    }

    #[test]
    fn maximizing_a_minimized_window_reports_restore() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");
        registry.minimize(&w1).expect("minimize");

        let effects = registry.toggle_maximize(&w1, SCREEN).expect("maximize");

        assert!(effects.contains(&RegistryEffect::Restored(w1.clone())));
        assert_eq!(registry.get(&w1).unwrap().state, WindowState::Maximized);
        assert!(registry.get(&w1).unwrap().is_focused);
    }

    #[test]
    fn remove_leaves_no_focused_window() {
        let mut registry = WindowRegistry::new();
        open(&mut registry, "w1");
        let w2 = open(&mut registry, "w2");

        let effects = registry.remove(&w2).expect("remove");

        assert_eq!(
            effects,
            vec![RegistryEffect::Unmount(w2.clone()), RegistryEffect::Closed(w2)]
        );
        assert_eq!(registry.focused_window_id(), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_ids_are_reported_and_change_nothing() {
        let mut registry = WindowRegistry::new();
        open(&mut registry, "w1");
        let before = registry.windows().to_vec();
        let ghost = WindowId::from("ghost");

        assert!(registry.focus(&ghost).is_err());
        assert!(registry.minimize(&ghost).is_err());
        assert!(registry.restore(&ghost).is_err());
        assert!(registry.toggle_maximize(&ghost, SCREEN).is_err());
        assert!(registry.remove(&ghost).is_err());
        assert!(registry.rename(&ghost, "x").is_err());
        assert!(registry
            .begin_drag(&ghost, PointerPosition::new(0, 0))
            .is_err());

        assert_eq!(registry.windows(), before.as_slice());
    }

    #[test]
    fn drag_tracks_pointer_delta() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");

        registry
            .begin_drag(&w1, PointerPosition::new(100, 100))
            .expect("begin");
        registry.drag_to(PointerPosition::new(125, 140));
        registry.drag_to(PointerPosition::new(130, 90));

        let geometry = registry.get(&w1).unwrap().geometry;
        assert_eq!((geometry.x, geometry.y), (70, 20));
        assert_eq!(registry.end_drag(), Some(w1));
        assert!(registry.interaction().is_idle());
    }

    #[test]
    fn drag_is_not_captured_for_fixed_or_maximized_windows() {
        let mut registry = WindowRegistry::new();
        let mut fixed = record("fixed");
        fixed.draggable = false;
        registry.insert(fixed).expect("insert");
        let fixed_id = WindowId::from("fixed");

        registry
            .begin_drag(&fixed_id, PointerPosition::new(0, 0))
            .expect("begin");
        assert!(registry.drag_to(PointerPosition::new(50, 50)).is_none());
        assert_eq!(registry.focused_window_id(), Some(&fixed_id));

        let w2 = open(&mut registry, "w2");
        registry.toggle_maximize(&w2, SCREEN).expect("maximize");
        registry
            .begin_drag(&w2, PointerPosition::new(0, 0))
            .expect("begin");
        assert!(registry.drag_to(PointerPosition::new(50, 50)).is_none());
        assert_eq!(registry.get(&w2).unwrap().geometry, SCREEN);
    }

    #[test]
    fn resize_clamps_to_window_minimums() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");

        registry
            .begin_resize(&w1, ResizeEdge::SouthEast, PointerPosition::new(640, 430))
            .expect("begin");
        registry.resize_to(PointerPosition::new(100, 100));
        let geometry = registry.get(&w1).unwrap().geometry;
        assert_eq!((geometry.width, geometry.height), (300, 200));

        registry.resize_to(PointerPosition::new(2000, 1500));
        let geometry = registry.get(&w1).unwrap().geometry;
        assert_eq!((geometry.width, geometry.height), (1960, 1470));
        assert_eq!(registry.end_resize(), Some(w1));
    }

    #[test]
    fn west_resize_keeps_east_edge_fixed_at_minimum() {
        let start = WindowGeometry {
            x: 100,
            y: 100,
            width: 400,
            height: 300,
        };
        let next = resize_geometry(start, ResizeEdge::NorthWest, 250, 250, 300, 200);
        assert_eq!(
            next,
            WindowGeometry {
                x: 200,
                y: 200,
                width: 300,
                height: 200
            }
        );
    }

    #[test]
    fn cycle_target_skips_minimized_and_wraps() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");
        let w2 = open(&mut registry, "w2");
        let w3 = open(&mut registry, "w3");
        registry.minimize(&w2).expect("minimize");
        registry.focus(&w1).expect("focus");

        assert_eq!(registry.next_cycle_target(), Some(w3.clone()));
        registry.focus(&w3).expect("focus");
        assert_eq!(registry.next_cycle_target(), Some(w1.clone()));

        registry.unfocus_all();
        assert_eq!(registry.next_cycle_target(), Some(w1));
    }

    #[test]
    fn refit_maximized_only_touches_maximized_windows() {
        let mut registry = WindowRegistry::new();
        let w1 = open(&mut registry, "w1");
        let w2 = open(&mut registry, "w2");
        registry.toggle_maximize(&w2, SCREEN).expect("maximize");
        let smaller = WindowGeometry {
            width: 800,
            height: 552,
            ..SCREEN
        };

        let effects = registry.refit_maximized(smaller);

        assert_eq!(effects, vec![RegistryEffect::Render(w2.clone())]);
        assert_eq!(registry.get(&w2).unwrap().geometry, smaller);
        assert_ne!(registry.get(&w1).unwrap().geometry, smaller);
    }
}
