use std::rc::Rc;

use desktop_runtime::{
    CreateWindowRequest, DesktopEvent, DesktopProvider, DesktopShell, DesktopView, EventBus,
    HostServices, RegisteredApp, WindowContent, WindowId,
};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[cfg(target_arch = "wasm32")]
const TEMPLATE_BASE_URL: &str = "/templates";
#[cfg(target_arch = "wasm32")]
const THEMES: [&str; 2] = ["classic", "midnight"];

/// `(id, name, icon, template)` for each bundled app.
const APPS: [(&str, &str, &str, &str); 3] = [
    ("about", "About", "/icons/about.svg", "about.html"),
    ("notes", "Notes", "/icons/notes.svg", "notes.html"),
    ("calculator", "Calculator", "/icons/calculator.svg", "calculator.html"),
];

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Desktop" />
        <Meta name="description" content="A desktop-style shell in the browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let view = DesktopView::new();

    view! {
        <DesktopProvider services=host_services(view) view=view apps=demo_apps>
            <DesktopShell />
        </DesktopProvider>
    }
}

/// Launchers for the bundled apps. Each opens a new window over `bus` from its template.
pub fn demo_apps(bus: Rc<EventBus>) -> Vec<RegisteredApp> {
    APPS.into_iter()
        .map(|(id, name, icon, template)| {
            let bus = bus.clone();
            RegisteredApp::new(id, name, icon, move || {
                bus.publish(DesktopEvent::CreateWindow(
                    CreateWindowRequest::new(WindowId::generate(), name)
                        .icon(icon)
                        .content(WindowContent::Template(template.to_string())),
                ));
            })
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn host_services(view: DesktopView) -> HostServices {
    HostServices::browser(TEMPLATE_BASE_URL, THEMES, view.surface_set())
}

#[cfg(not(target_arch = "wasm32"))]
fn host_services(view: DesktopView) -> HostServices {
    let (services, _) = HostServices::headless();
    HostServices {
        surface: view.surface_set(),
        ..services
    }
}
