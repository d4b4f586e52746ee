//! # Markup Helpers
//!
//! Small building blocks shared by the page render functions.

use std::borrow::Cow;

/// Escape text for use in element content or a quoted attribute
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Prefix `classes` with an optional animation class
pub fn with_animation(animation: Option<&str>, classes: &str) -> String {
    match animation {
        Some(anim) if !anim.is_empty() => format!("{anim} {classes}"),
        _ => classes.to_string(),
    }
}

/// Dual-pane container holding the outgoing and incoming views side by side
pub fn transition_container(
    outgoing: &str,
    exit_class: &str,
    incoming: &str,
    entrance_class: &str,
) -> String {
    format!(
        r#"<div class="page-transition-container"><div class="page-transition-old {exit_class}">{outgoing}</div><div class="page-transition-new {entrance_class}">{incoming}</div></div>"#
    )
}

/// Plain-text projection of markup, for terminal display
pub fn to_plain_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len() / 2);
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_should_borrow_clean_text() {
        assert!(matches!(escape("原神"), Cow::Borrowed(_)));
        assert_eq!(escape(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    }

    #[test]
    fn with_animation_should_skip_missing_class() {
        assert_eq!(with_animation(Some("animate-fade-in"), "pt-20"), "animate-fade-in pt-20");
        assert_eq!(with_animation(None, "pt-20"), "pt-20");
        assert_eq!(with_animation(Some(""), "pt-20"), "pt-20");
    }

    #[test]
    fn transition_container_should_hold_both_panes() {
        let markup = transition_container("<p>old</p>", "out", "<p>new</p>", "in");
        assert!(markup.contains(r#"class="page-transition-old out"><p>old</p>"#));
        assert!(markup.contains(r#"class="page-transition-new in"><p>new</p>"#));
    }

    #[test]
    fn plain_text_should_strip_tags_and_collapse_space() {
        assert_eq!(
            to_plain_text("<div><h2>Title</h2>\n  <p>a &amp; b</p></div>"),
            "Title a & b"
        );
    }
}
