// ABOUTME: Tag type definitions
// ABOUTME: A tag with its derived note usage count

use serde::{Deserialize, Serialize};

/// A user-defined label applied to notes.
///
/// `note_count` is derived from `note_tags` each time a tag is read and is
/// never written back; renaming only looks at `tag_id` and `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub tag_id: i64,
    pub name: String,
    #[serde(default)]
    pub note_count: i64,
}

impl Tag {
    pub fn new(tag_id: i64, name: impl Into<String>) -> Self {
        Self {
            tag_id,
            name: name.into(),
            note_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let tag = Tag {
            tag_id: 7,
            name: "reading".to_string(),
            note_count: 3,
        };

        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "tagId": 7, "name": "reading", "noteCount": 3 })
        );
    }

    #[test]
    fn test_deserializes_without_count() {
        // Rename payloads from the UI only carry the id and the new name
        let tag: Tag = serde_json::from_str(r#"{"tagId": 4, "name": "travel"}"#).unwrap();
        assert_eq!(tag, Tag::new(4, "travel"));
    }
}
