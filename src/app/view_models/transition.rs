//! # View Transition Engine
//!
//! Swaps the main container for a freshly rendered view. Moves between two
//! ordered bar routes slide; everything else fades in place.
//!
//! A slide is make-before-break: the outgoing and incoming markup sit side by
//! side in a transition container until the settle deadline, when the
//! container collapses to the incoming static markup. Each slide carries a
//! token; starting another render invalidates the pending one so its
//! finalisation turns into a no-op.
//!
//! ```text
//! Idle ──slide──▶ Transitioning{outgoing, incoming, deadline, token} ──finalize(token)──▶ Idle
//!   ▲                          │
//!   └──────────fade────────────┘ (cancels)
//! ```

use crate::app::events::{RouteName, SlideDirection, TransitionKind};
use crate::app::views::markup::transition_container;
use crate::app::views::Document;
use std::fmt;
use std::time::Duration;

/// Identity of one slide transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(u64);

impl TransitionToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransitionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Transitioning {
        outgoing: String,
        /// Static markup installed at the deadline; captured once at start
        incoming: String,
        deadline: Duration,
        token: TransitionToken,
    },
}

/// When the rendered view becomes final
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swap {
    /// Content is final now
    Immediate,
    /// Content is final once `token` is finalised at `deadline`
    Deferred {
        token: TransitionToken,
        deadline: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPlan {
    pub kind: TransitionKind,
    pub swap: Swap,
    /// Pending slide this render invalidated
    pub cancelled: Option<TransitionToken>,
}

/// Direction from the bar order of both routes; fade when either is unordered
pub fn transition_kind(previous: &RouteName, current: &RouteName) -> TransitionKind {
    match (previous.page_order(), current.page_order()) {
        (Some(prev), Some(curr)) if curr > prev => TransitionKind::Slide(SlideDirection::Forward),
        (Some(prev), Some(curr)) if curr < prev => TransitionKind::Slide(SlideDirection::Backward),
        _ => TransitionKind::Fade,
    }
}

#[derive(Debug)]
pub struct ViewTransitionEngine {
    state: TransitionState,
    settle_delay: Duration,
    last_token: u64,
}

impl ViewTransitionEngine {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            state: TransitionState::Idle,
            settle_delay,
            last_token: 0,
        }
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning { .. })
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Swap `document` content for a new view.
    ///
    /// `animated` is the view with its entrance class, `static_markup` the
    /// same view without one.
    pub fn begin(
        &mut self,
        document: &mut Document,
        kind: TransitionKind,
        animated: String,
        static_markup: String,
        now: Duration,
    ) -> SwapPlan {
        document.scroll_to(0);

        let (outgoing, cancelled) = match std::mem::take(&mut self.state) {
            TransitionState::Transitioning {
                incoming, token, ..
            } => {
                tracing::debug!("transition {} cancelled by a newer render", token);
                (incoming, Some(token))
            }
            TransitionState::Idle => (document.content().to_string(), None),
        };

        let swap = match kind.exit_class() {
            Some(exit_class) => {
                document.set_content(transition_container(
                    &outgoing,
                    exit_class,
                    &static_markup,
                    kind.entrance_class(),
                ));
                self.last_token += 1;
                let token = TransitionToken(self.last_token);
                let deadline = now + self.settle_delay;
                tracing::debug!("transition {} started, settles at {:?}", token, deadline);
                self.state = TransitionState::Transitioning {
                    outgoing,
                    incoming: static_markup,
                    deadline,
                    token,
                };
                Swap::Deferred { token, deadline }
            }
            None => {
                document.set_content(animated);
                Swap::Immediate
            }
        };

        SwapPlan {
            kind,
            swap,
            cancelled,
        }
    }

    /// Collapse the transition container; false when `token` is stale
    pub fn finalize(&mut self, document: &mut Document, token: TransitionToken) -> bool {
        match &self.state {
            TransitionState::Transitioning { token: active, .. } if *active == token => {}
            _ => {
                tracing::debug!("ignoring stale finalize for transition {}", token);
                return false;
            }
        }
        if let TransitionState::Transitioning { incoming, .. } = std::mem::take(&mut self.state) {
            document.set_content(incoming);
        }
        tracing::debug!("transition {} settled", token);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::Theme;

    const SETTLE: Duration = Duration::from_millis(500);

    fn document_with(content: &str) -> Document {
        let mut doc = Document::new(Theme::Light, "ri-moon-line text-xl");
        doc.set_content(content);
        doc
    }

    #[test]
    fn kind_should_follow_bar_order() {
        assert_eq!(
            transition_kind(&RouteName::Category, &RouteName::Profile),
            TransitionKind::Slide(SlideDirection::Forward)
        );
        assert_eq!(
            transition_kind(&RouteName::Galgame, &RouteName::Home),
            TransitionKind::Slide(SlideDirection::Backward)
        );
        assert_eq!(
            transition_kind(&RouteName::Home, &RouteName::Home),
            TransitionKind::Fade
        );
        assert_eq!(
            transition_kind(&RouteName::Profile, &RouteName::Detail),
            TransitionKind::Fade
        );
        assert_eq!(
            transition_kind(&RouteName::Detail, &RouteName::Home),
            TransitionKind::Fade
        );
    }

    #[test]
    fn fade_should_swap_immediately() {
        let mut engine = ViewTransitionEngine::new(SETTLE);
        let mut doc = document_with("<p>old</p>");
        doc.scroll_to(300);

        let plan = engine.begin(
            &mut doc,
            TransitionKind::Fade,
            "<p class=\"animate-fade-in\">new</p>".to_string(),
            "<p>new</p>".to_string(),
            Duration::ZERO,
        );

        assert_eq!(plan.swap, Swap::Immediate);
        assert_eq!(doc.content(), "<p class=\"animate-fade-in\">new</p>");
        assert_eq!(doc.scroll_y(), 0);
        assert!(!engine.is_transitioning());
    }

    #[test]
    fn slide_should_hold_both_panes_until_finalized() {
        let mut engine = ViewTransitionEngine::new(SETTLE);
        let mut doc = document_with("<p>old</p>");

        let plan = engine.begin(
            &mut doc,
            TransitionKind::Slide(SlideDirection::Forward),
            "<p class=\"x\">new</p>".to_string(),
            "<p>new</p>".to_string(),
            Duration::from_millis(100),
        );
        let Swap::Deferred { token, deadline } = plan.swap else {
            panic!("expected a deferred swap");
        };
        assert_eq!(deadline, Duration::from_millis(600));
        assert!(doc.content().contains("page-transition-old animate-slide-out-left"));
        assert!(doc.content().contains("page-transition-new animate-slide-in-right"));

        assert!(engine.finalize(&mut doc, token));
        assert_eq!(doc.content(), "<p>new</p>");
        assert!(!engine.finalize(&mut doc, token));
    }

    #[test]
    fn newer_render_should_cancel_pending_slide() {
        let mut engine = ViewTransitionEngine::new(SETTLE);
        let mut doc = document_with("<p>a</p>");
        let slide = TransitionKind::Slide(SlideDirection::Forward);

        let first = engine.begin(&mut doc, slide, "b*".into(), "<p>b</p>".into(), Duration::ZERO);
        let second = engine.begin(&mut doc, slide, "c*".into(), "<p>c</p>".into(), Duration::ZERO);

        let (Swap::Deferred { token: stale, .. }, Swap::Deferred { token: live, .. }) =
            (first.swap, second.swap)
        else {
            panic!("expected deferred swaps");
        };
        assert_eq!(second.cancelled, Some(stale));
        // the cancelled incoming view becomes the new outgoing pane
        assert!(doc.content().contains(r#"animate-slide-out-left"><p>b</p>"#));

        assert!(!engine.finalize(&mut doc, stale));
        assert!(engine.finalize(&mut doc, live));
        assert_eq!(doc.content(), "<p>c</p>");
    }

    #[test]
    fn fade_should_cancel_pending_slide() {
        let mut engine = ViewTransitionEngine::new(SETTLE);
        let mut doc = document_with("<p>a</p>");
        let slide = engine.begin(
            &mut doc,
            TransitionKind::Slide(SlideDirection::Backward),
            "b*".into(),
            "<p>b</p>".into(),
            Duration::ZERO,
        );
        let fade = engine.begin(
            &mut doc,
            TransitionKind::Fade,
            "<p>d</p>".into(),
            "<p>d</p>".into(),
            Duration::ZERO,
        );

        let Swap::Deferred { token, .. } = slide.swap else {
            panic!("expected a deferred swap");
        };
        assert_eq!(fade.cancelled, Some(token));
        assert!(!engine.finalize(&mut doc, token));
        assert_eq!(doc.content(), "<p>d</p>");
    }
}
