//! Desktop-wide keyboard shortcuts.

/// A key press with its modifier state, decoupled from the browser event type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: String,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn from_keyboard_event(ev: &web_sys::KeyboardEvent) -> Self {
        Self {
            key: ev.key(),
            alt: ev.alt_key(),
            ctrl: ev.ctrl_key(),
            shift: ev.shift_key(),
            meta: ev.meta_key(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Alt+Tab: focus the next visible window in insertion order.
    CycleWindows,
    /// Escape: clear focus from every window.
    UnfocusAll,
}

pub fn resolve_shortcut(chord: &KeyChord) -> Option<ShortcutAction> {
    if chord.alt && !chord.ctrl && !chord.meta && chord.key == "Tab" {
        return Some(ShortcutAction::CycleWindows);
    }
    if !chord.alt && !chord.ctrl && !chord.meta && chord.key == "Escape" {
        return Some(ShortcutAction::UnfocusAll);
    }
    None
}
