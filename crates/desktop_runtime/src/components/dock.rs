use super::*;

#[component]
pub(super) fn Dock(desktop: DesktopContext) -> impl IntoView {
    let view = desktop.view;

    let toggle_start = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        desktop.with_runtime(|runtime| runtime.start_menu.toggle());
    };

    view! {
        <nav
            class=move || view.dock.with(|(position, _)| dock_class(*position))
            aria-label="Open windows"
        >
            <button
                class="dock-start"
                aria-haspopup="menu"
                aria-expanded=move || view.start_menu.with(|(open, _)| open.to_string())
                on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                on:click=toggle_start
            >
                "Start"
            </button>
            <div class="dock-items" role="toolbar">
                <For
                    each=move || {
                        view.dock
                            .with(|(_, entries)| {
                                entries.iter().map(|e| e.window_id.clone()).collect::<Vec<_>>()
                            })
                    }
                    key=|id| id.clone()
                    let:window_id
                >
                    <DockItem desktop=desktop window_id=window_id />
                </For>
            </div>
        </nav>
    }
}

#[component]
fn DockItem(desktop: DesktopContext, window_id: WindowId) -> impl IntoView {
    let view = desktop.view;
    let id = store_value(window_id);
    let entry = Signal::derive(move || {
        id.with_value(|id| {
            view.dock.with(|(_, entries)| entries.iter().find(|e| e.window_id == *id).cloned())
        })
    });
    let title = move || entry.with(|e| e.as_ref().map(|e| e.title.clone()).unwrap_or_default());
    let icon = move || entry.with(|e| e.as_ref().map(|e| e.icon.clone()).unwrap_or_default());

    let on_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        desktop.with_runtime(|runtime| runtime.dock.handle_dock_item_click(&id.get_value()));
    };

    view! {
        <button
            class=move || entry.with(|e| e.as_ref().map(dock_item_class).unwrap_or_default())
            aria-pressed=move || entry.with(|e| e.as_ref().is_some_and(|e| e.focused).to_string())
            title=title
            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
            on:click=on_click
        >
            <img class="dock-item-icon" src=icon alt="" hidden=move || icon().is_empty() />
            <span class="dock-item-title">{title}</span>
        </button>
    }
}

fn dock_class(position: DockPosition) -> String {
    let orientation = if position.is_vertical() { "vertical" } else { "horizontal" };
    format!("dock dock-{} {orientation}", position.as_str())
}

fn dock_item_class(entry: &DockEntry) -> String {
    let mut class = String::from("dock-item");
    if entry.focused {
        class.push_str(" active");
    }
    if entry.minimized {
        class.push_str(" minimized");
    }
    class
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dock_class_carries_edge_and_orientation() {
        assert_eq!(dock_class(DockPosition::Bottom), "dock dock-bottom horizontal");
        assert_eq!(dock_class(DockPosition::Left), "dock dock-left vertical");
    }

    #[test]
    fn item_class_marks_active_and_minimized_entries() {
        let mut entry = DockEntry {
            window_id: "w1".into(),
            title: "Notes".to_string(),
            icon: String::new(),
            minimized: false,
            focused: true,
        };
        assert_eq!(dock_item_class(&entry), "dock-item active");

        entry.focused = false;
        entry.minimized = true;
        assert_eq!(dock_item_class(&entry), "dock-item minimized");
    }
}
