mod app;
mod filters;
mod leaderboard;
mod modals;
mod profile;

use leptos::mount::mount_to;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::JsCast;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

/// `/profile` and `/profile.html` get the player page, everything else the leaderboard.
fn is_profile_path(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".html").unwrap_or(path);
    path.rsplit('/').next() == Some("profile")
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let mount_target = document
        .get_element_by_id("app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(target) = mount_target else {
        return;
    };
    let profile = window
        .location()
        .pathname()
        .map(|path| is_profile_path(&path))
        .unwrap_or(false);

    APP_MOUNT_HANDLE.with(move |slot| {
        // Drop a previous mount first so its effects stop touching the page.
        let _old = slot.borrow_mut().take();
        let handle: Box<dyn Any> = if profile {
            Box::new(mount_to(target, profile::ProfilePage))
        } else {
            Box::new(mount_to(target, app::App))
        };
        *slot.borrow_mut() = Some(handle);
    });
}
