use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - the single resource managed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub author: String,
}

/// Partial update of a post. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub text: Option<String>,
    pub author: Option<String>,
}

impl PostChanges {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none() && self.author.is_none()
    }
}

impl Post {
    /// Create a new post with a freshly generated, time-ordered ID.
    ///
    /// The post is not validated here; call [`Post::validate`] before
    /// persisting it.
    pub fn new(title: String, text: String, author: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            title,
            text,
            author,
        }
    }

    /// Check that every required field is present.
    ///
    /// All failing fields are reported in a single message, in declaration
    /// order.
    pub fn validate(&self) -> Result<(), DomainError> {
        let missing: Vec<String> = [
            ("title", &self.title),
            ("text", &self.text),
            ("author", &self.author),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| format!("{field} is required"))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "Post validation failed: {}",
                missing.join(", ")
            )))
        }
    }

    /// Merge `changes` into this post. The ID never changes.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(text) = changes.text {
            self.text = text;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Post::new("A".into(), "B".into(), "C".into())
    }

    #[test]
    fn test_new_post_is_valid() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(sample().id, sample().id);
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let post = Post::new(String::new(), "B".into(), String::new());
        let err = post.validate().unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert_eq!(
                    msg,
                    "Post validation failed: title is required, author is required"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_apply_changes_only_supplied_fields() {
        let mut post = sample();
        let id = post.id;

        post.apply(PostChanges {
            title: Some("Z".into()),
            ..Default::default()
        });

        assert_eq!(post.id, id);
        assert_eq!(post.title, "Z");
        assert_eq!(post.text, "B");
        assert_eq!(post.author, "C");
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(PostChanges::default().is_empty());
        assert!(
            !PostChanges {
                author: Some("D".into()),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn test_apply_then_validate_rejects_cleared_field() {
        let mut post = sample();
        post.apply(PostChanges {
            text: Some(String::new()),
            ..Default::default()
        });
        assert!(matches!(post.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_serializes_with_flat_fields() {
        let post = sample();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], post.id.to_string());
        assert_eq!(json["title"], "A");
        assert_eq!(json["text"], "B");
        assert_eq!(json["author"], "C");
    }
}
