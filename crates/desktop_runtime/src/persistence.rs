//! Desktop preference persistence: dock position, desktop icon positions, selected theme.
//!
//! Loads never fail. Absent keys mean first run; unreadable or malformed values are logged and
//! replaced by defaults.

use std::{collections::BTreeMap, rc::Rc};

use leptos::logging;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};
use serde::Serialize;

use crate::{
    model::{DockPosition, IconPosition},
    task::spawn_detached,
};

pub const DOCK_POSITION_KEY: &str = "retrodesk.dock_position.v1";
pub const ICON_POSITIONS_KEY: &str = "retrodesk.icon_positions.v1";
pub const THEME_KEY: &str = "retrodesk.theme.v1";

/// Saved desktop icon positions keyed by app id.
pub type IconPositions = BTreeMap<String, IconPosition>;

async fn load_or_warn<T: serde::de::DeserializeOwned>(
    prefs: &dyn PrefsStore,
    key: &str,
) -> Option<T> {
    match load_pref_with(prefs, key).await {
        Ok(value) => value,
        Err(err) => {
            logging::warn!("preference `{key}` ignored: {err}");
            None
        }
    }
}

pub async fn load_dock_position(prefs: &dyn PrefsStore) -> Option<DockPosition> {
    load_or_warn(prefs, DOCK_POSITION_KEY).await
}

pub async fn load_icon_positions(prefs: &dyn PrefsStore) -> IconPositions {
    load_or_warn(prefs, ICON_POSITIONS_KEY)
        .await
        .unwrap_or_default()
}

pub async fn load_theme_id(prefs: &dyn PrefsStore) -> Option<String> {
    load_or_warn::<String>(prefs, THEME_KEY)
        .await
        .filter(|id| !id.trim().is_empty())
}

/// Saves a preference and logs a failure instead of returning it.
pub async fn save_or_warn<T: Serialize>(prefs: &dyn PrefsStore, key: &str, value: &T) {
    if let Err(err) = save_pref_with(prefs, key, value).await {
        logging::warn!("preference `{key}` not saved: {err}");
    }
}

/// Queues a preference write without waiting for it.
pub fn persist_detached<T>(prefs: Rc<dyn PrefsStore>, key: &'static str, value: T)
where
    T: Serialize + 'static,
{
    spawn_detached(async move {
        save_or_warn(prefs.as_ref(), key, &value).await;
    });
}

pub fn persist_dock_position(prefs: Rc<dyn PrefsStore>, position: DockPosition) {
    persist_detached(prefs, DOCK_POSITION_KEY, position);
}

pub fn persist_icon_positions(prefs: Rc<dyn PrefsStore>, positions: IconPositions) {
    persist_detached(prefs, ICON_POSITIONS_KEY, positions);
}
