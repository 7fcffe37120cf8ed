//! Hidden HTML comments that record what the bot already did on a thread.

use crate::github::Comment;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker(String);

impl Marker {
    pub fn missing_issue() -> Self {
        Marker("<!-- LinkBot Missing Issue -->".to_string())
    }

    pub fn unassign(login: &str) -> Self {
        Marker(format!("<!-- unassign-requested:{} -->", login))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefixes `body` with the marker on its own line.
    pub fn stamp(&self, body: &str) -> String {
        format!("{}\n{}", self.0, body)
    }

    pub fn find_in(&self, comments: &[Comment]) -> bool {
        comments
            .iter()
            .filter_map(|c| c.body.as_deref())
            .any(|body| body.contains(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Marker;
    use crate::github::{Comment, User};

    fn comment(body: Option<&str>) -> Comment {
        Comment {
            body: body.map(str::to_string),
            user: Some(User::new("someone")),
        }
    }

    #[test]
    fn stamped_body_is_found() {
        let marker = Marker::missing_issue();
        let comments = vec![comment(None), comment(Some(&marker.stamp("hello")))];

        assert!(marker.find_in(&comments));
        assert!(marker.stamp("hello").starts_with("<!-- LinkBot Missing Issue -->\n"));
    }

    #[test]
    fn unassign_marker_is_per_user() {
        let alice = Marker::unassign("alice");
        let comments = vec![comment(Some(&alice.stamp("done")))];

        assert_eq!(alice.as_str(), "<!-- unassign-requested:alice -->");
        assert!(alice.find_in(&comments));
        assert!(!Marker::unassign("bob").find_in(&comments));
    }

    #[test]
    fn empty_thread_has_no_marker() {
        assert!(!Marker::missing_issue().find_in(&[]));
    }
}
