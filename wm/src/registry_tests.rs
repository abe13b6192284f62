use vesper_abi::window::{
    MAX_WINDOWS, WINDOW_MIN_HEIGHT, WINDOW_MIN_WIDTH, WindowFlags, WindowId,
};
use vesper_lib::testing::TestResult;
use vesper_lib::{define_test_suite, fail, pass};

use crate::registry::WindowManager;

const SCREEN_W: i32 = 1024;
const SCREEN_H: i32 = 768;

fn manager() -> WindowManager {
    let mut wm = WindowManager::new();
    wm.set_screen(SCREEN_W, SCREEN_H);
    wm
}

fn create(wm: &mut WindowManager, x: i32, y: i32, w: i32, h: i32) -> Option<WindowId> {
    wm.create_window("test", x, y, w, h, WindowFlags::DEFAULT)
}

fn test_ids_unique_and_resolvable() -> TestResult {
    let mut wm = manager();
    let mut ids = [WindowId(0); 5];
    for (i, slot) in ids.iter_mut().enumerate() {
        match create(&mut wm, 10 * i as i32, 10, 200, 150) {
            Some(id) => *slot = id,
            None => return fail!("create {} failed", i),
        }
    }
    for (i, &a) in ids.iter().enumerate() {
        if wm.window(a).is_none() {
            return fail!("id {} does not resolve", a.0);
        }
        for &b in &ids[i + 1..] {
            if a == b {
                return fail!("duplicate id {}", a.0);
            }
        }
    }
    // Most recently created window is topmost and focused.
    if wm.z_order()[0] != ids[4] || wm.focused() != Some(ids[4]) {
        return fail!("newest window not front/focused");
    }
    pass!()
}

fn test_capacity_exhaustion() -> TestResult {
    let mut wm = manager();
    let mut last = None;
    for i in 0..MAX_WINDOWS {
        let id = create(&mut wm, 0, 0, WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT);
        if id.is_none() {
            return fail!("create {} failed below capacity", i);
        }
        last = id;
    }
    if create(&mut wm, 0, 0, WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT).is_some() {
        return fail!("create beyond capacity succeeded");
    }
    // The failure left the registry untouched.
    if wm.window_count() != MAX_WINDOWS {
        return fail!("window count changed on failed create");
    }
    if let Some(id) = last {
        if wm.window(id).is_none() {
            return fail!("existing window lost on failed create");
        }
    }
    pass!()
}

fn test_create_clamps_to_minimum() -> TestResult {
    let mut wm = manager();
    let Some(id) = create(&mut wm, 0, 0, 10, 10) else {
        return fail!("create failed");
    };
    let Some(win) = wm.window(id) else {
        return fail!("lookup failed");
    };
    if win.size() != (WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT) {
        return fail!("size {:?} below minimum", win.size());
    }
    pass!()
}

fn test_move_clamps_on_screen() -> TestResult {
    let mut wm = manager();
    let Some(id) = create(&mut wm, 100, 100, 200, 150) else {
        return fail!("create failed");
    };
    wm.move_window(id, -50, -70);
    let Some(win) = wm.window(id) else {
        return fail!("lookup failed");
    };
    if win.position() != (0, 0) {
        return fail!("negative move not clamped: {:?}", win.position());
    }
    wm.move_window(id, 5000, 5000);
    let Some(win) = wm.window(id) else {
        return fail!("lookup failed");
    };
    if win.position() != (SCREEN_W - 200, SCREEN_H - 150) {
        return fail!("overflow move not clamped: {:?}", win.position());
    }
    pass!()
}

fn test_resize_floors_and_fits() -> TestResult {
    let mut wm = manager();
    let Some(id) = create(&mut wm, 100, 100, 400, 300) else {
        return fail!("create failed");
    };
    if !wm.resize_window(id, 10, 10) {
        return fail!("minimum resize rejected");
    }
    let Some(win) = wm.window(id) else {
        return fail!("lookup failed");
    };
    if win.size() != (WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT) {
        return fail!("resize below minimum not floored: {:?}", win.size());
    }
    // A window resized near the right edge is shifted back on-screen.
    wm.resize_window(id, 300, 200);
    wm.move_window(id, SCREEN_W - 300, SCREEN_H - 200);
    wm.resize_window(id, 400, 300);
    let Some(win) = wm.window(id) else {
        return fail!("lookup failed");
    };
    let (x, y) = win.position();
    let (w, h) = win.size();
    if x < 0 || y < 0 || x + w > SCREEN_W || y + h > SCREEN_H {
        return fail!("resized window off-screen: {:?} {:?}", (x, y), (w, h));
    }
    pass!()
}

fn test_resize_beyond_capacity_fails() -> TestResult {
    let mut wm = manager();
    // Capacity is fixed at creation: 300 * 200 pixels.
    let Some(id) = create(&mut wm, 0, 0, 300, 200) else {
        return fail!("create failed");
    };
    if wm.resize_window(id, 400, 200) {
        return fail!("resize past allocated buffer succeeded");
    }
    let Some(win) = wm.window(id) else {
        return fail!("lookup failed");
    };
    if win.size() != (300, 200) {
        return fail!("failed resize still changed geometry");
    }
    // Shrinking within the allocation is fine.
    if !wm.resize_window(id, 200, 150) {
        return fail!("shrink rejected");
    }
    pass!()
}

fn test_destroy_focused_transfers_focus() -> TestResult {
    let mut wm = manager();
    let (Some(a), Some(b)) = (
        create(&mut wm, 0, 0, 200, 150),
        create(&mut wm, 50, 50, 200, 150),
    ) else {
        return fail!("create failed");
    };
    if wm.focused() != Some(b) {
        return fail!("newest window not focused");
    }
    wm.destroy_window(b);
    if wm.focused() != Some(a) {
        return fail!("focus did not transfer to front window");
    }
    let Some(win) = wm.window(a) else {
        return fail!("focused id does not resolve");
    };
    if !win.flags().contains(WindowFlags::FOCUSED) {
        return fail!("FOCUSED flag not set on new holder");
    }
    wm.destroy_window(a);
    if wm.focused().is_some() || wm.window_count() != 0 {
        return fail!("empty registry still has focus");
    }
    pass!()
}

fn test_destroy_stale_id() -> TestResult {
    let mut wm = manager();
    let Some(id) = create(&mut wm, 0, 0, 200, 150) else {
        return fail!("create failed");
    };
    if !wm.destroy_window(id) {
        return fail!("first destroy failed");
    }
    if wm.destroy_window(id) {
        return fail!("stale destroy reported success");
    }
    if wm.move_window(id, 10, 10) || wm.resize_window(id, 200, 150) || wm.focus_window(id) {
        return fail!("stale id accepted by mutators");
    }
    pass!()
}

fn test_focus_raises_and_demotes_previous() -> TestResult {
    let mut wm = manager();
    let (Some(a), Some(b)) = (
        create(&mut wm, 0, 0, 200, 150),
        create(&mut wm, 50, 50, 200, 150),
    ) else {
        return fail!("create failed");
    };
    wm.focus_window(a);
    if wm.z_order()[0] != a {
        return fail!("focus did not raise");
    }
    let Some(prev) = wm.window(b) else {
        return fail!("lookup failed");
    };
    if prev.flags().contains(WindowFlags::FOCUSED) {
        return fail!("previous holder kept FOCUSED");
    }
    pass!()
}

fn test_minimize_maximize_restore() -> TestResult {
    let mut wm = manager();
    let Some(id) = create(&mut wm, 100, 100, 400, 300) else {
        return fail!("create failed");
    };

    wm.minimize_window(id);
    let Some(win) = wm.window(id) else {
        return fail!("lookup failed");
    };
    if win.flags().contains(WindowFlags::VISIBLE) || !win.flags().contains(WindowFlags::MINIMIZED) {
        return fail!("minimize flags wrong: {:?}", win.flags());
    }

    wm.restore_window(id);
    wm.maximize_window(id);
    let Some(win) = wm.window(id) else {
        return fail!("lookup failed");
    };
    if !win.flags().contains(WindowFlags::MAXIMIZED) || win.position() != (0, 0) {
        return fail!("maximize did not move to origin");
    }
    let (w, h) = win.size();
    // Growth is capped by the buffer allocated at creation.
    if (w as usize) * (h as usize) > 400 * 300 {
        return fail!("maximize outgrew the allocated buffer");
    }

    wm.restore_window(id);
    let Some(win) = wm.window(id) else {
        return fail!("lookup failed");
    };
    if win.position() != (100, 100) || win.size() != (400, 300) {
        return fail!("restore lost saved geometry");
    }
    if !win.flags().contains(WindowFlags::VISIBLE) {
        return fail!("restore left window hidden");
    }
    pass!()
}

fn test_hidden_window_not_hit() -> TestResult {
    let mut wm = manager();
    let Some(id) = create(&mut wm, 100, 100, 200, 150) else {
        return fail!("create failed");
    };
    if wm.find_at(150, 150) != Some(id) {
        return fail!("visible window not hit");
    }
    wm.hide_window(id);
    if wm.find_at(150, 150).is_some() {
        return fail!("hidden window still hit");
    }
    wm.show_window(id);
    if wm.find_at(150, 150) != Some(id) {
        return fail!("shown window not hit again");
    }
    pass!()
}

define_test_suite!(
    wm_registry,
    [
        test_ids_unique_and_resolvable,
        test_capacity_exhaustion,
        test_create_clamps_to_minimum,
        test_move_clamps_on_screen,
        test_resize_floors_and_fits,
        test_resize_beyond_capacity_fails,
        test_destroy_focused_transfers_focus,
        test_destroy_stale_id,
        test_focus_raises_and_demotes_previous,
        test_minimize_maximize_restore,
        test_hidden_window_not_hit,
    ]
);
