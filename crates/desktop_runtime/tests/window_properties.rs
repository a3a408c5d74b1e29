//! Window manager invariants checked across long pseudo-random operation sequences.

use std::collections::BTreeSet;

use desktop_runtime::{
    register_app, CreateWindowRequest, DesktopConfig, DesktopRuntime, DisplaySurface,
    HostServices, KeyChord, PointerPosition, RegisteredApp, ResizeEdge, WindowId, WindowRecord,
};
use futures::executor::block_on;
use pretty_assertions::assert_eq;

/// Small deterministic generator so failures replay exactly.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

fn boot() -> DesktopRuntime {
    let (services, _) = HostServices::headless();
    block_on(DesktopRuntime::boot(services, DesktopConfig::default()))
}

fn create(runtime: &DesktopRuntime, id: &str) -> WindowId {
    block_on(
        runtime
            .windows
            .create_window(CreateWindowRequest::new(id, id.to_uppercase())),
    )
    .expect("create")
}

fn focused_count(windows: &[WindowRecord]) -> usize {
    windows.iter().filter(|w| w.is_focused).count()
}

fn pick(rng: &mut Lcg, ids: &[WindowId]) -> Option<WindowId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[rng.next(ids.len())].clone())
    }
}

#[test]
fn single_focus_and_dock_parity_hold_after_every_operation() {
    for seed in 1..=8u64 {
        let runtime = boot();
        let mut rng = Lcg(seed);
        let mut next_id = 0;

        for _ in 0..200 {
            let ids = runtime.windows.window_ids();
            match rng.next(10) {
                0 | 1 => {
                    next_id += 1;
                    create(&runtime, &format!("w{next_id}"));
                }
                2 => {
                    if let Some(id) = pick(&mut rng, &ids) {
                        runtime.windows.focus_window(&id);
                    }
                }
                3 => {
                    if let Some(id) = pick(&mut rng, &ids) {
                        runtime.windows.minimize_window(&id);
                    }
                }
                4 => {
                    if let Some(id) = pick(&mut rng, &ids) {
                        runtime.windows.restore_window(&id);
                    }
                }
                5 => {
                    if let Some(id) = pick(&mut rng, &ids) {
                        runtime.windows.maximize_window(&id);
                    }
                }
                6 => runtime.windows.unfocus_all_windows(),
                7 => {
                    runtime.windows.handle_key(&KeyChord::new("Escape"));
                }
                8 => {
                    runtime.windows.handle_key(&KeyChord::new("Tab").alt());
                }
                _ => {
                    if let Some(id) = pick(&mut rng, &ids) {
                        runtime.windows.close_window(&id);
                    }
                }
            }

            let windows = runtime.windows.windows();
            assert!(focused_count(&windows) <= 1, "seed {seed}: {windows:?}");

            let window_ids: BTreeSet<_> = windows.iter().map(|w| w.id.clone()).collect();
            let dock_ids: BTreeSet<_> = runtime
                .dock
                .entries()
                .into_iter()
                .map(|e| e.window_id)
                .collect();
            assert_eq!(window_ids, dock_ids, "seed {seed}");

            let dock_focused: Vec<_> = runtime
                .dock
                .entries()
                .into_iter()
                .filter(|e| e.focused)
                .map(|e| e.window_id)
                .collect();
            let registry_focused: Vec<_> =
                runtime.windows.focused_window_id().into_iter().collect();
            assert_eq!(dock_focused, registry_focused, "seed {seed}");
        }
    }
}

#[test]
fn focus_strictly_raises_above_every_other_window() {
    let runtime = boot();
    let ids: Vec<_> = (1..=5).map(|n| create(&runtime, &format!("w{n}"))).collect();
    let mut rng = Lcg(42);

    for _ in 0..100 {
        let target = ids[rng.next(ids.len())].clone();
        let before = runtime.windows.snapshot(&target).expect("target").z_index;
        runtime.windows.focus_window(&target);

        let after = runtime.windows.snapshot(&target).expect("target").z_index;
        assert!(after > before);
        for other in runtime.windows.windows().iter().filter(|w| w.id != target) {
            assert!(after > other.z_index, "{target} vs {}", other.id);
        }
    }
}

#[test]
fn minimize_restore_round_trip_preserves_geometry() {
    let runtime = boot();
    let id = create(&runtime, "w1");
    create(&runtime, "w2");
    runtime.windows.begin_drag(&id, PointerPosition::new(0, 0));
    runtime.windows.drag_to(PointerPosition::new(-35, 12));
    runtime.windows.end_drag();
    let before = runtime.windows.snapshot(&id).expect("w1").geometry;

    runtime.windows.minimize_window(&id);
    runtime.windows.restore_window(&id);

    let after = runtime.windows.snapshot(&id).expect("w1");
    assert!(!after.is_minimized() && !after.is_maximized());
    assert!(after.is_focused);
    assert_eq!(after.geometry, before);
}

#[test]
fn double_maximize_restores_geometry_bit_for_bit() {
    let runtime = boot();
    let id = create(&runtime, "w1");
    runtime
        .windows
        .begin_resize(&id, ResizeEdge::SouthEast, PointerPosition::new(0, 0));
    runtime.windows.resize_to(PointerPosition::new(77, -33));
    runtime.windows.end_resize();
    let before = runtime.windows.snapshot(&id).expect("w1").geometry;

    runtime.windows.maximize_window(&id);
    assert_ne!(runtime.windows.snapshot(&id).expect("w1").geometry, before);
    runtime.windows.maximize_window(&id);

    let after = runtime.windows.snapshot(&id).expect("w1");
    assert_eq!(after.geometry, before);
    assert_eq!(after.saved_geometry, None);
}

#[test]
fn triple_registration_materializes_once_per_surface() {
    let runtime = boot();
    for _ in 0..3 {
        register_app(
            &runtime.bus,
            RegisteredApp::new("calc", "Calculator", "calc.svg", || {}),
        );
        register_app(
            &runtime.bus,
            RegisteredApp::new("settings", "Settings", "settings.svg", || {})
                .on_surfaces([DisplaySurface::StartMenu]),
        );
    }

    let icon_ids: Vec<_> = runtime
        .desktop_icons
        .icons()
        .into_iter()
        .map(|i| i.app_id)
        .collect();
    let menu_ids: Vec<_> = runtime
        .start_menu
        .items()
        .into_iter()
        .map(|i| i.app_id)
        .collect();
    assert_eq!(icon_ids, vec!["calc"]);
    assert_eq!(menu_ids, vec!["calc", "settings"]);
}

#[test]
fn unknown_ids_never_mutate_existing_windows() {
    let runtime = boot();
    create(&runtime, "w1");
    create(&runtime, "w2");
    let before = runtime.windows.windows();
    let dock_before = runtime.dock.entries();
    let ghost = WindowId::from("ghost");

    assert!(!runtime.windows.focus_window(&ghost));
    assert!(!runtime.windows.minimize_window(&ghost));
    assert!(!runtime.windows.restore_window(&ghost));
    assert!(!runtime.windows.maximize_window(&ghost));
    assert!(!runtime.windows.close_window(&ghost));
    assert!(!runtime.windows.rename_window(&ghost, "boo"));
    assert!(!runtime
        .windows
        .begin_drag(&ghost, PointerPosition::new(1, 1)));
    assert!(!runtime
        .windows
        .begin_resize(&ghost, ResizeEdge::North, PointerPosition::new(1, 1)));
    runtime.windows.drag_to(PointerPosition::new(50, 50));
    runtime.windows.resize_to(PointerPosition::new(50, 50));
    assert!(!runtime.dock.handle_dock_item_click(&ghost));

    assert_eq!(runtime.windows.windows(), before);
    assert_eq!(runtime.dock.entries(), dock_before);
}
