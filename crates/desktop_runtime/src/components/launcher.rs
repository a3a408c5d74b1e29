use super::*;
use crate::model::IconPosition;

#[component]
pub(super) fn StartMenuPanel(desktop: DesktopContext) -> impl IntoView {
    let view = desktop.view;

    view! {
        <Show when=move || view.start_menu.with(|(open, _)| *open) fallback=|| ()>
            <div
                class="start-menu"
                role="menu"
                on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
            >
                <For
                    each=move || view.start_menu.with(|(_, items)| items.clone())
                    key=|item| item.app_id.clone()
                    let:item
                >
                    {{
                        let app_id = store_value(item.app_id.clone());
                        let launch = move |ev: web_sys::MouseEvent| {
                            stop_mouse_event(&ev);
                            desktop.with_runtime(|runtime| {
                                runtime.start_menu.activate(&app_id.get_value())
                            });
                        };
                        view! {
                            <button class="start-menu-item" role="menuitem" on:click=launch>
                                <img class="start-menu-icon" src=item.icon.clone() alt="" />
                                <span>{item.name.clone()}</span>
                            </button>
                        }
                    }}
                </For>
            </div>
        </Show>
    }
}

#[component]
pub(super) fn DesktopIconLayer(desktop: DesktopContext) -> impl IntoView {
    let view = desktop.view;

    view! {
        <div class="desktop-icons">
            <For
                each=move || {
                    view.icons
                        .with(|icons| icons.iter().map(|i| i.app_id.clone()).collect::<Vec<_>>())
                }
                key=|app_id| app_id.clone()
                let:app_id
            >
                <DesktopIconTile desktop=desktop app_id=app_id />
            </For>
        </div>
    }
}

#[component]
fn DesktopIconTile(desktop: DesktopContext, app_id: String) -> impl IntoView {
    let view = desktop.view;
    let id = store_value(app_id);
    let icon = Signal::derive(move || {
        id.with_value(|id| view.icons.with(|icons| icons.iter().find(|i| i.app_id == *id).cloned()))
    });

    let style = move || {
        icon.with(|i| i.as_ref().map(|i| icon_style(i.position)).unwrap_or_default())
    };
    let begin_drag = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        let pointer = pointer_from_pointer_event(&ev);
        desktop.with_runtime(|runtime| {
            runtime.desktop_icons.begin_icon_drag(&id.get_value(), pointer)
        });
    };
    let open = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        desktop.with_runtime(|runtime| runtime.desktop_icons.activate(&id.get_value()));
    };

    view! {
        <button
            class="desktop-icon"
            style=style
            on:pointerdown=begin_drag
            on:dblclick=open
        >
            <img
                class="desktop-icon-image"
                src=move || icon.with(|i| i.as_ref().map(|i| i.icon.clone()).unwrap_or_default())
                alt=""
            />
            <span class="desktop-icon-label">
                {move || icon.with(|i| i.as_ref().map(|i| i.name.clone()).unwrap_or_default())}
            </span>
        </button>
    }
}

fn icon_style(position: IconPosition) -> String {
    format!("left:{}px;top:{}px;", position.x, position.y)
}
