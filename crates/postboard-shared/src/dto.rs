//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Deserializer, Serialize};

/// Request to create a post.
///
/// Fields are optional on the wire so that a missing field surfaces as a
/// validation error rather than a body parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Request to partially update a post.
///
/// The outer `Option` tells whether the field was present in the body, the
/// inner one whether it was `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub text: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub author: Option<Option<String>>,
}

/// Only called when the key exists, so wrap whatever was there.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_tolerates_missing_fields() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"title":"A"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("A"));
        assert!(req.text.is_none());
        assert!(req.author.is_none());
    }

    #[test]
    fn test_create_request_ignores_unknown_fields() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"id":"x","title":"A","text":"B","author":"C","likes":3}"#)
                .unwrap();
        assert_eq!(req.author.as_deref(), Some("C"));
    }

    #[test]
    fn test_create_request_rejects_wrong_type() {
        let res = serde_json::from_str::<CreatePostRequest>(r#"{"title":5}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_update_request_distinguishes_absent_and_null() {
        let req: UpdatePostRequest =
            serde_json::from_str(r#"{"title":"Z","author":null}"#).unwrap();
        assert_eq!(req.title, Some(Some("Z".to_string())));
        assert_eq!(req.text, None);
        assert_eq!(req.author, Some(None));
    }
}
