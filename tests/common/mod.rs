//! Shared harness for integration tests: a ViewModel over an in-memory
//! store with a deterministic clock.
#![allow(dead_code)]

use niypher::app::commands::UserAction;
use niypher::app::models::{ContentCatalog, RouteParams};
use niypher::app::services::{MemoryStore, ThemeManager};
use niypher::app::view_models::ViewModel;
use niypher::config::AppConfig;
use std::time::Duration;

pub const SEEDED_EMAIL: &str = "user@example.com";
pub const SEEDED_PASSWORD: &str = "Password1";

/// Hour used for the time-of-day theme fallback; daytime, so light
pub const TEST_HOUR: u32 = 10;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("niypher=debug")
        .try_init();
}

pub fn view_model() -> ViewModel {
    init_tracing();
    let theme = ThemeManager::init(Box::new(MemoryStore::new()), TEST_HOUR)
        .expect("memory store never fails");
    ViewModel::new(
        ContentCatalog::seeded().expect("seed data parses"),
        theme,
        AppConfig::default(),
    )
}

/// Long enough for a slide, the auth rebind and a search debounce;
/// notification banners are still up afterwards
pub const SETTLE: Duration = Duration::from_millis(600);

pub fn settle(vm: &mut ViewModel) {
    vm.tick(SETTLE);
}

/// A ViewModel showing `route` once it has settled
pub fn started(route: &str) -> ViewModel {
    let mut vm = view_model();
    vm.start(route);
    settle(&mut vm);
    vm
}

pub fn go(vm: &mut ViewModel, route: &str) {
    vm.push(route, RouteParams::new());
    settle(vm);
}

pub fn act(vm: &mut ViewModel, action: UserAction) {
    vm.dispatch(action).expect("dispatch succeeds");
    settle(vm);
}

/// Targets of the nav entries currently marked active
pub fn active_nav(vm: &ViewModel) -> Vec<String> {
    vm.document()
        .nav_items()
        .iter()
        .filter(|item| item.active)
        .map(|item| item.target.clone())
        .collect()
}

pub fn profile_label(vm: &ViewModel) -> Option<String> {
    vm.document()
        .nav_items()
        .iter()
        .find(|item| item.target == "profile")
        .and_then(|item| item.label.clone())
}

/// Drive the auth card from step 1 to step 2 for `email`
pub fn enter_email(vm: &mut ViewModel, email: &str) {
    act(vm, UserAction::InputEmail(email.to_string()));
    act(vm, UserAction::SubmitEmail);
}

pub fn latest_notification(vm: &ViewModel) -> Option<String> {
    vm.document()
        .notifications()
        .last()
        .map(|n| n.message.clone())
}
