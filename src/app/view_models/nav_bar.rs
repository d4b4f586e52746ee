//! # Navigation Bar
//!
//! Marks the entry for the current route active and swaps icon glyphs
//! between their outline and filled variants. The profile entry's label
//! follows the session.

use crate::app::events::RouteName;
use crate::app::views::NavItem;
use regex::Regex;
use std::sync::LazyLock;

static LINE_ICON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ri-([\w-]+)-line").expect("valid icon pattern"));
static FILL_ICON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ri-([\w-]+)-fill").expect("valid icon pattern"));

pub const PROFILE_LABEL_GUEST: &str = "注册/登录";
pub const PROFILE_LABEL_MEMBER: &str = "我的";

/// Bring every nav entry in line with `current`. Safe to repeat.
pub fn refresh_nav(items: &mut [NavItem], current: &RouteName, logged_in: bool) {
    for item in items.iter_mut() {
        item.active = item.target == current.as_str();
        let icon = if item.active {
            LINE_ICON.replace(&item.icon_class, "ri-${1}-fill")
        } else {
            FILL_ICON.replace(&item.icon_class, "ri-${1}-line")
        };
        item.icon_class = icon.into_owned();

        if item.target == RouteName::Profile.as_str() {
            if let Some(label) = item.label.as_mut() {
                let text = if logged_in {
                    PROFILE_LABEL_MEMBER
                } else {
                    PROFILE_LABEL_GUEST
                };
                *label = text.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::views::document::default_nav_items;

    #[test]
    fn refresh_should_fill_only_the_active_icon() {
        let mut items = default_nav_items();
        refresh_nav(&mut items, &RouteName::Category, false);

        assert!(items[1].active);
        assert_eq!(items[1].icon_class, "ri-apps-2-fill text-xl");
        assert_eq!(items[0].icon_class, "ri-home-4-line text-xl");
        assert!(items.iter().filter(|i| i.active).count() == 1);
    }

    #[test]
    fn refresh_should_restore_outline_when_leaving() {
        let mut items = default_nav_items();
        refresh_nav(&mut items, &RouteName::Home, false);
        refresh_nav(&mut items, &RouteName::Profile, false);

        assert_eq!(items[0].icon_class, "ri-home-4-line text-xl");
        assert_eq!(items[3].icon_class, "ri-user-3-fill text-xl");
    }

    #[test]
    fn refresh_should_be_idempotent() {
        let mut once = default_nav_items();
        refresh_nav(&mut once, &RouteName::Galgame, true);
        let mut twice = once.clone();
        refresh_nav(&mut twice, &RouteName::Galgame, true);
        assert_eq!(once, twice);
    }

    #[test]
    fn profile_label_should_follow_session() {
        let mut items = default_nav_items();
        refresh_nav(&mut items, &RouteName::Home, true);
        assert_eq!(items[3].label.as_deref(), Some(PROFILE_LABEL_MEMBER));
        refresh_nav(&mut items, &RouteName::Home, false);
        assert_eq!(items[3].label.as_deref(), Some(PROFILE_LABEL_GUEST));
    }

    #[test]
    fn detail_route_should_leave_every_entry_inactive() {
        let mut items = default_nav_items();
        refresh_nav(&mut items, &RouteName::Detail, false);
        assert!(items.iter().all(|i| !i.active));
    }
}
