mod common;

use common::{act, active_nav, enter_email, go, profile_label, settle, started};
use niypher::app::commands::UserAction;
use niypher::app::events::{ModelEvent, RouteName, SlideDirection, TransitionKind};
use niypher::app::models::{detail_params, RouteParams};
use niypher::app::view_models::{TransitionState, PROFILE_LABEL_GUEST, PROFILE_LABEL_MEMBER};
use niypher::app::views::ANNOUNCEMENT_ID;
use std::time::Duration;

fn started_kinds(events: &[ModelEvent]) -> Vec<TransitionKind> {
    events
        .iter()
        .filter_map(|e| match e {
            ModelEvent::TransitionStarted { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect()
}

#[test]
fn push_should_record_previous_route() {
    let mut vm = started("home");
    go(&mut vm, "category");
    assert_eq!(vm.context().router.current().name, RouteName::Category);
    assert_eq!(vm.context().router.previous().name, RouteName::Home);

    go(&mut vm, "profile");
    assert_eq!(vm.context().router.current().name, RouteName::Profile);
    assert_eq!(vm.context().router.previous().name, RouteName::Category);
}

#[test]
fn moving_right_along_the_bar_should_slide_forward() {
    let mut vm = started("category");
    vm.collect_pending_model_events();

    vm.push("profile", RouteParams::new());
    let kinds = started_kinds(&vm.collect_pending_model_events());
    assert_eq!(kinds, vec![TransitionKind::Slide(SlideDirection::Forward)]);

    let content = vm.document().content();
    assert!(content.contains("page-transition-container"));
    assert!(content.contains("animate-slide-out-left"));
    assert!(content.contains("animate-slide-in-right"));
}

#[test]
fn moving_left_along_the_bar_should_slide_backward() {
    let mut vm = started("galgame");
    vm.collect_pending_model_events();

    vm.push("home", RouteParams::new());
    let kinds = started_kinds(&vm.collect_pending_model_events());
    assert_eq!(kinds, vec![TransitionKind::Slide(SlideDirection::Backward)]);
    assert!(vm.document().content().contains("animate-slide-out-right"));
}

#[test]
fn detail_should_fade_from_every_bar_route() {
    for origin in ["home", "category", "galgame", "profile"] {
        let mut vm = started(origin);
        vm.collect_pending_model_events();

        vm.push("detail", detail_params(105));
        let kinds = started_kinds(&vm.collect_pending_model_events());
        assert_eq!(kinds, vec![TransitionKind::Fade], "from {origin}");
        assert!(matches!(vm.transition_state(), TransitionState::Idle));
        assert!(vm.document().content().contains("魔法学院"));
    }
}

#[test]
fn unknown_route_should_render_empty_and_clear_nav() {
    let mut vm = started("home");
    go(&mut vm, "settings");

    assert_eq!(
        vm.context().router.current().name,
        RouteName::Unknown("settings".to_string())
    );
    assert_eq!(vm.document().content(), "");
    assert!(active_nav(&vm).is_empty());
}

#[test]
fn unknown_detail_id_should_render_not_found() {
    let mut vm = started("home");
    vm.push("detail", detail_params(999));
    assert!(vm.document().content().contains("未找到资源"));
}

#[test]
fn every_render_should_scroll_to_top() {
    let mut vm = started("home");
    go(&mut vm, "galgame");
    assert_eq!(vm.document().scroll_y(), 0);
    vm.push("detail", detail_params(101));
    assert_eq!(vm.document().scroll_y(), 0);
}

#[test]
fn rapid_navigation_should_end_on_last_route() {
    let mut vm = started("home");
    vm.push("category", RouteParams::new());
    vm.tick(Duration::from_millis(100));
    vm.push("galgame", RouteParams::new());

    // the outgoing pane of the second slide is the category page
    assert!(vm.document().content().contains("纯爱系"));

    vm.tick(Duration::from_millis(400));
    assert!(vm.document().content().contains("page-transition-container"));

    vm.tick(Duration::from_millis(100));
    assert!(!vm.document().content().contains("page-transition-container"));
    assert!(vm.document().has_element("gal-search"));
    assert!(matches!(vm.transition_state(), TransitionState::Idle));
    assert_eq!(active_nav(&vm), vec!["galgame".to_string()]);
}

#[test]
fn announcement_should_wait_for_home_to_settle() {
    let mut vm = started("category");
    vm.push("home", RouteParams::new());

    vm.tick(Duration::from_millis(499));
    assert!(!vm.document().is_overlay_visible(ANNOUNCEMENT_ID));
    vm.tick(Duration::from_millis(1));
    assert!(vm.document().is_overlay_visible(ANNOUNCEMENT_ID));
}

#[test]
fn dismissed_announcement_should_stay_closed() {
    let mut vm = started("home");
    assert!(vm.document().is_overlay_visible(ANNOUNCEMENT_ID));

    act(&mut vm, UserAction::CloseAnnouncement);
    assert!(!vm.document().is_overlay_visible(ANNOUNCEMENT_ID));
    assert!(!vm.context().catalog.announcement().show);

    go(&mut vm, "category");
    go(&mut vm, "home");
    assert!(!vm.document().is_overlay_visible(ANNOUNCEMENT_ID));
}

#[test]
fn nav_should_mark_exactly_one_entry() {
    let mut vm = started("home");
    for route in ["category", "galgame", "profile", "home"] {
        go(&mut vm, route);
        assert_eq!(active_nav(&vm), vec![route.to_string()]);
    }

    let active = vm
        .document()
        .nav_items()
        .iter()
        .find(|item| item.active)
        .map(|item| item.icon_class.clone());
    assert_eq!(active.as_deref(), Some("ri-home-4-fill text-xl"));
}

#[test]
fn nav_refresh_should_be_idempotent() {
    let mut vm = started("galgame");
    let before = vm.document().nav_items().to_vec();
    vm.refresh_nav();
    vm.refresh_nav();
    assert_eq!(vm.document().nav_items(), before.as_slice());
}

#[test]
fn profile_label_should_follow_session() {
    let mut vm = started("profile");
    assert_eq!(profile_label(&vm).as_deref(), Some(PROFILE_LABEL_GUEST));

    enter_email(&mut vm, common::SEEDED_EMAIL);
    act(
        &mut vm,
        UserAction::InputPassword(common::SEEDED_PASSWORD.to_string()),
    );
    act(&mut vm, UserAction::SubmitCredentials);

    assert_eq!(vm.context().router.current().name, RouteName::Home);
    assert_eq!(profile_label(&vm).as_deref(), Some(PROFILE_LABEL_MEMBER));
}

#[test]
fn navigate_action_should_push_route() {
    let mut vm = started("home");
    act(&mut vm, UserAction::navigate("galgame"));
    settle(&mut vm);
    assert_eq!(vm.context().router.current().name, RouteName::Galgame);
}
