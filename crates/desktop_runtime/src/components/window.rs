use super::*;
use crate::model::ResizeEdge;

const RESIZE_EDGES: [ResizeEdge; 8] = [
    ResizeEdge::North,
    ResizeEdge::South,
    ResizeEdge::East,
    ResizeEdge::West,
    ResizeEdge::NorthEast,
    ResizeEdge::NorthWest,
    ResizeEdge::SouthEast,
    ResizeEdge::SouthWest,
];

#[component]
pub(super) fn DesktopWindow(desktop: DesktopContext, window_id: WindowId) -> impl IntoView {
    let view = desktop.view;
    let id = store_value(window_id);
    let title_bar_height = desktop
        .with_runtime(|runtime| runtime.windows.config().title_bar_height)
        .unwrap_or_else(|| DesktopConfig::default().title_bar_height);

    let window = Signal::derive(move || {
        id.with_value(|id| {
            view.windows.with(|windows| {
                windows
                    .iter()
                    .find(|w| w.record.id == *id)
                    .map(|w| w.record.clone())
            })
        })
    });
    // Content is set once at mount; later renders only touch the chrome.
    let content = id.with_value(|id| {
        view.windows.with_untracked(|windows| {
            windows
                .iter()
                .find(|w| w.record.id == *id)
                .map(|w| w.content.clone())
                .unwrap_or_default()
        })
    });

    let focus = move |_: web_sys::PointerEvent| {
        let should_focus = window.with_untracked(|w| w.as_ref().is_some_and(|w| !w.is_focused));
        if should_focus {
            desktop.with_runtime(|runtime| runtime.windows.focus_window(&id.get_value()));
        }
    };
    let minimize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        desktop.with_runtime(|runtime| runtime.windows.minimize_window(&id.get_value()));
    };
    let toggle_maximize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        desktop.with_runtime(|runtime| runtime.windows.maximize_window(&id.get_value()));
    };
    let close = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        desktop.with_runtime(|runtime| runtime.windows.close_window(&id.get_value()));
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        let movable = window.with_untracked(|w| {
            w.as_ref()
                .is_some_and(|w| w.draggable && !w.is_maximized())
        });
        if !movable {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        let pointer = pointer_from_pointer_event(&ev);
        desktop.with_runtime(|runtime| {
            let id = id.get_value();
            runtime.windows.focus_window(&id);
            runtime.windows.begin_drag(&id, pointer);
        });
    };
    let dom_id = id.with_value(|id| id.to_string());
    let title = move || window.with(|w| w.as_ref().map(|w| w.title.clone()).unwrap_or_default());
    let icon = move || window.with(|w| w.as_ref().map(|w| w.icon.clone()).unwrap_or_default());
    let resizable = move || {
        window.with(|w| w.as_ref().is_some_and(|w| w.resizable && !w.is_maximized()))
    };
    let keep_press = move |ev: web_sys::PointerEvent| {
        ev.prevent_default();
        ev.stop_propagation();
    };

    view! {
        <section
            class=move || window.with(|w| w.as_ref().map(window_class).unwrap_or_default())
            style=move || window.with(|w| w.as_ref().map(window_style).unwrap_or_default())
            data-window-id=dom_id
            role="dialog"
            aria-label=title
            on:pointerdown=focus
        >
            <header
                class="titlebar"
                style=format!("height:{title_bar_height}px;")
                on:pointerdown=begin_move
                on:dblclick=toggle_maximize
            >
                <div class="titlebar-title">
                    <img
                        class="titlebar-app-icon"
                        aria-hidden="true"
                        alt=""
                        src=icon
                        hidden=move || icon().is_empty()
                    />
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=keep_press
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=minimize
                    >
                        "_"
                    </button>
                    <button
                        aria-label=move || {
                            if window.with(|w| w.as_ref().is_some_and(|w| w.is_maximized())) {
                                "Restore window"
                            } else {
                                "Maximize window"
                            }
                        }
                        on:pointerdown=keep_press
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=toggle_maximize
                    >
                        "□"
                    </button>
                    <button
                        aria-label="Close window"
                        on:pointerdown=keep_press
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=close
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body" inner_html=content />
            <Show when=resizable fallback=|| ()>
                {RESIZE_EDGES
                    .into_iter()
                    .map(|edge| {
                        view! { <WindowResizeHandle desktop=desktop window_id=id edge=edge /> }
                    })
                    .collect_view()}
            </Show>
        </section>
    }
}

#[component]
fn WindowResizeHandle(
    desktop: DesktopContext,
    window_id: StoredValue<WindowId>,
    edge: ResizeEdge,
) -> impl IntoView {
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        let pointer = pointer_from_pointer_event(&ev);
        desktop.with_runtime(|runtime| {
            let id = window_id.get_value();
            runtime.windows.focus_window(&id);
            runtime.windows.begin_resize(&id, edge, pointer);
        });
    };

    view! { <div class=class_name aria-hidden="true" on:pointerdown=on_pointerdown /> }
}

fn window_class(record: &WindowRecord) -> String {
    let mut class = String::from("desktop-window");
    if record.is_focused {
        class.push_str(" focused");
    }
    if record.is_minimized() {
        class.push_str(" minimized");
    }
    if record.is_maximized() {
        class.push_str(" maximized");
    }
    class
}

fn window_style(record: &WindowRecord) -> String {
    let g = record.geometry;
    let mut style = format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        g.x, g.y, g.width, g.height, record.z_index
    );
    if !record.is_visible() {
        style.push_str("display:none;");
    }
    style
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}
