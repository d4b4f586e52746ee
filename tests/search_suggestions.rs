mod common;

use common::{act, started};
use crossterm::event::KeyCode;
use niypher::app::commands::UserAction;
use niypher::app::services::search::{CONTAINS_SCORE, EXACT_SCORE, PREFIX_SCORE};
use niypher::app::services::SuggestionKind;
use std::sync::Arc;
use std::time::Duration;

fn search(text: &str) -> UserAction {
    UserAction::SearchInput(text.to_string())
}

#[test]
fn substring_match_should_score_lowest() {
    let mut vm = started("home");
    act(&mut vm, search("genshin"));

    let suggestions = vm.search_box().suggestions();
    assert!(vm.search_box().is_visible());
    assert_eq!(suggestions[0].text, "原神 (Genshin Impact)");
    assert_eq!(suggestions[0].kind, SuggestionKind::Game);
    assert_eq!(suggestions[0].id, Some(101));
    assert_eq!(suggestions[0].score, CONTAINS_SCORE);
}

#[test]
fn prefix_and_exact_matches_should_score_higher() {
    let mut vm = started("home");
    act(&mut vm, search("原神"));
    assert_eq!(vm.search_box().suggestions()[0].score, PREFIX_SCORE);

    act(&mut vm, search("rpg"));
    let first = &vm.search_box().suggestions()[0];
    assert_eq!(first.text, "RPG");
    assert_eq!(first.kind, SuggestionKind::Tag);
    assert_eq!(first.score, EXACT_SCORE);
}

#[test]
fn suggestions_should_be_ranked_and_capped() {
    let mut vm = started("home");
    act(&mut vm, search("a"));

    let suggestions = vm.search_box().suggestions();
    assert!(suggestions.len() <= vm.config().suggestion_limit);
    assert!(suggestions.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn repeated_query_should_come_from_cache() {
    let mut vm = started("home");
    act(&mut vm, search("魔法"));
    let first = Arc::clone(vm.search_box().suggestions());
    let scans = vm.search_engine().scan_count();

    act(&mut vm, search(""));
    assert!(!vm.search_box().is_visible());
    act(&mut vm, search("魔法"));

    assert!(Arc::ptr_eq(&first, vm.search_box().suggestions()));
    assert_eq!(vm.search_engine().scan_count(), scans);
}

#[test]
fn typing_burst_should_compute_once() {
    let mut vm = started("home");
    let scans = vm.search_engine().scan_count();

    vm.dispatch(search("原")).unwrap();
    vm.tick(Duration::from_millis(100));
    vm.dispatch(search("原神")).unwrap();
    vm.tick(Duration::from_millis(299));
    assert!(!vm.search_box().is_visible());

    vm.tick(Duration::from_millis(1));
    assert!(vm.search_box().is_visible());
    assert_eq!(vm.search_engine().scan_count(), scans + 1);
    assert_eq!(vm.search_box().suggestions()[0].text, "原神 (Genshin Impact)");
}

#[test]
fn no_match_should_keep_list_hidden() {
    let mut vm = started("home");
    act(&mut vm, search("zzzz-nothing"));
    assert!(!vm.search_box().is_visible());
    assert!(vm.search_box().suggestions().is_empty());
}

#[test]
fn arrow_keys_and_enter_should_commit_selection() {
    let mut vm = started("home");
    act(&mut vm, search("genshin"));

    act(&mut vm, UserAction::SearchKey(KeyCode::Down));
    assert_eq!(vm.search_box().selected(), Some(0));
    act(&mut vm, UserAction::SearchKey(KeyCode::Up));
    assert_eq!(vm.search_box().selected(), None);

    act(&mut vm, UserAction::SearchKey(KeyCode::Down));
    act(&mut vm, UserAction::SearchKey(KeyCode::Enter));
    assert!(!vm.search_box().is_visible());
    assert_eq!(vm.search_box().input(), "原神 (Genshin Impact)");
    assert_eq!(
        vm.document().last_alert(),
        Some("正在搜索: 原神 (Genshin Impact)")
    );
}

#[test]
fn enter_without_selection_should_search_raw_input() {
    let mut vm = started("home");
    act(&mut vm, search("genshin"));
    act(&mut vm, UserAction::SearchKey(KeyCode::Enter));
    assert_eq!(vm.document().last_alert(), Some("正在搜索: genshin"));
}

#[test]
fn picking_a_suggestion_should_search_it() {
    let mut vm = started("home");
    act(&mut vm, search("魔法"));
    let text = vm.search_box().suggestions()[0].text.clone();

    act(&mut vm, UserAction::PickSuggestion(0));
    assert_eq!(vm.search_box().input(), text);
    assert_eq!(
        vm.document().last_alert(),
        Some(format!("正在搜索: {text}").as_str())
    );
}

#[test]
fn escape_should_close_list() {
    let mut vm = started("home");
    act(&mut vm, search("genshin"));
    act(&mut vm, UserAction::SearchKey(KeyCode::Esc));
    assert!(!vm.search_box().is_visible());
    assert_eq!(vm.search_box().selected(), None);
}

#[test]
fn click_outside_should_close_list() {
    let mut vm = started("home");
    act(&mut vm, search("genshin"));
    act(&mut vm, UserAction::ClickOutside);
    assert!(!vm.search_box().is_visible());
    assert!(vm.document().last_alert().is_none());
}
