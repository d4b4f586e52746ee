//! # Document Model
//!
//! In-memory stand-in for the page the app draws into: the main container,
//! the bottom navigation bar, overlays, notification banners and alerts.
//! View models mutate it; renderers present it.

use crate::app::events::Theme;
use crate::app::services::Notification;

/// Id of the announcement overlay element
pub const ANNOUNCEMENT_ID: &str = "announcement-modal";

/// One entry of the bottom navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Route name this entry navigates to (`data-target`)
    pub target: String,
    /// Icon class; encodes the variant as `ri-{name}-line` / `ri-{name}-fill`
    pub icon_class: String,
    pub label: Option<String>,
    pub active: bool,
}

impl NavItem {
    pub fn new(target: &str, icon_class: &str, label: Option<&str>) -> Self {
        Self {
            target: target.to_string(),
            icon_class: icon_class.to_string(),
            label: label.map(str::to_string),
            active: false,
        }
    }
}

/// The site's standard navigation bar
pub fn default_nav_items() -> Vec<NavItem> {
    vec![
        NavItem::new("home", "ri-home-4-line text-xl", Some("首页")),
        NavItem::new("category", "ri-apps-2-line text-xl", Some("分类")),
        NavItem::new("galgame", "ri-planet-line text-xl", Some("引力")),
        NavItem::new("profile", "ri-user-3-line text-xl", Some("注册/登录")),
    ]
}

#[derive(Debug, Clone)]
pub struct Document {
    content: String,
    scroll_y: u32,
    nav_items: Vec<NavItem>,
    overlays: Vec<String>,
    notifications: Vec<Notification>,
    alerts: Vec<String>,
    theme: Theme,
    theme_icon: String,
}

impl Document {
    pub fn new(theme: Theme, theme_icon: &str) -> Self {
        Self {
            content: String::new(),
            scroll_y: 0,
            nav_items: default_nav_items(),
            overlays: Vec::new(),
            notifications: Vec::new(),
            alerts: Vec::new(),
            theme,
            theme_icon: theme_icon.to_string(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the main container wholesale. Overlays living inside the old
    /// markup go away with it.
    pub fn set_content(&mut self, markup: impl Into<String>) {
        self.content = markup.into();
        self.overlays.clear();
    }

    /// Whether the current markup holds an element with this id
    pub fn has_element(&self, id: &str) -> bool {
        self.content.contains(&format!("id=\"{id}\""))
    }

    /// Whether the current markup holds an element carrying `attr="value"`
    pub fn has_attribute(&self, attr: &str, value: &str) -> bool {
        self.content.contains(&format!("{attr}=\"{value}\""))
    }

    /// Whether the current markup holds an element with this class
    pub fn has_class(&self, class: &str) -> bool {
        let class = class.trim_start_matches('.');
        self.content.match_indices("class=\"").any(|(start, _)| {
            let rest = &self.content[start + 7..];
            rest.split('"')
                .next()
                .is_some_and(|list| list.split_whitespace().any(|c| c == class))
        })
    }

    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: u32) {
        self.scroll_y = y;
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav_items
    }

    pub fn nav_items_mut(&mut self) -> &mut [NavItem] {
        &mut self.nav_items
    }

    pub fn set_nav_items(&mut self, items: Vec<NavItem>) {
        self.nav_items = items;
    }

    /// Show an overlay, only if its element is in the current markup
    pub fn show_overlay(&mut self, id: &str) -> bool {
        if !self.has_element(id) {
            return false;
        }
        if !self.is_overlay_visible(id) {
            self.overlays.push(id.to_string());
        }
        true
    }

    pub fn hide_overlay(&mut self, id: &str) -> bool {
        let before = self.overlays.len();
        self.overlays.retain(|o| o != id);
        before != self.overlays.len()
    }

    pub fn is_overlay_visible(&self, id: &str) -> bool {
        self.overlays.iter().any(|o| o == id)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn set_notifications(&mut self, notifications: &[Notification]) {
        self.notifications = notifications.to_vec();
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("alert: {}", message);
        self.alerts.push(message);
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn theme_icon(&self) -> &str {
        &self.theme_icon
    }

    pub fn set_theme(&mut self, theme: Theme, icon: &str) {
        self.theme = theme;
        self.theme_icon = icon.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document::new(Theme::Light, "ri-moon-line text-xl")
    }

    #[test]
    fn has_element_should_match_exact_ids() {
        let mut doc = document();
        doc.set_content(r#"<input id="auth-email"><p id="email-error-extra"></p>"#);
        assert!(doc.has_element("auth-email"));
        assert!(!doc.has_element("email-error"));
    }

    #[test]
    fn has_class_should_match_whole_class_tokens() {
        let mut doc = document();
        doc.set_content(r#"<div class="mt-6 cf-turnstile"></div>"#);
        assert!(doc.has_class(".cf-turnstile"));
        assert!(!doc.has_class("cf"));
    }

    #[test]
    fn overlays_should_need_their_element_and_reset_on_content_swap() {
        let mut doc = document();
        assert!(!doc.show_overlay(ANNOUNCEMENT_ID));

        doc.set_content(format!(r#"<div id="{ANNOUNCEMENT_ID}"></div>"#));
        assert!(doc.show_overlay(ANNOUNCEMENT_ID));
        assert!(doc.is_overlay_visible(ANNOUNCEMENT_ID));

        doc.set_content("<div></div>");
        assert!(!doc.is_overlay_visible(ANNOUNCEMENT_ID));
    }

    #[test]
    fn default_nav_should_cover_the_four_bar_routes() {
        let targets: Vec<_> = default_nav_items()
            .into_iter()
            .map(|item| item.target)
            .collect();
        assert_eq!(targets, ["home", "category", "galgame", "profile"]);
    }
}
