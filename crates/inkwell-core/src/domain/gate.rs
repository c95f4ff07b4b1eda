use serde::{Deserialize, Serialize};

/// The comment gate - a two-state machine coordinating an unauthenticated
/// comment attempt with the next login-page render.
///
/// When a visitor submits a comment while logged out, the submission is
/// dropped, the gate moves to `BlockedPendingLogin`, and the visitor is
/// redirected to the login page. Rendering the login page consumes the gate:
/// the explanatory message is shown exactly once and the gate returns to
/// `Open`.
///
/// The gate travels with the visitor (a one-shot flash cookie on the
/// redirect), so two visitors never observe each other's state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentGate {
    #[default]
    Open,
    BlockedPendingLogin,
}

impl CommentGate {
    /// Message shown on the one login-page render that consumes the gate.
    pub const MESSAGE: &'static str = "You must log in to add comments!";

    /// Transition taken when a logged-out visitor submits a comment.
    pub fn block(self) -> Self {
        CommentGate::BlockedPendingLogin
    }

    /// One-shot consumption at login-page render time: yields the message to
    /// display (if any) and the follow-up state, which is always `Open`.
    pub fn consume(self) -> (Self, Option<&'static str>) {
        match self {
            CommentGate::Open => (CommentGate::Open, None),
            CommentGate::BlockedPendingLogin => (CommentGate::Open, Some(Self::MESSAGE)),
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, CommentGate::BlockedPendingLogin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_open() {
        assert_eq!(CommentGate::default(), CommentGate::Open);
    }

    #[test]
    fn test_open_renders_no_message() {
        let (next, msg) = CommentGate::Open.consume();
        assert_eq!(next, CommentGate::Open);
        assert_eq!(msg, None);
    }

    #[test]
    fn test_blocked_fires_exactly_once() {
        let gate = CommentGate::Open.block();
        assert!(gate.is_blocked());

        let (next, msg) = gate.consume();
        assert_eq!(msg, Some("You must log in to add comments!"));

        // Second render: message gone.
        let (next, msg) = next.consume();
        assert_eq!(next, CommentGate::Open);
        assert_eq!(msg, None);
    }
}
