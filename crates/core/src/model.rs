//! # Catalog Data Model
//!
//! Wire types for the gamedex catalog API. Field names follow the remote
//! API's camelCase JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A catalog entry as returned by the server.
///
/// `id` is globally unique and encodes the category: `"GAME"` + category
/// code + zero-padded 4-digit sequence (e.g. `GAMEA0007`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description, empty when the server omits it.
    #[serde(default)]
    pub description: String,
    /// Release date (calendar date, no time component).
    pub release_date: NaiveDate,
    /// Author or studio.
    pub author: String,
    /// Price in whole currency units; non-negative.
    pub price: f64,
    /// Image reference: server-relative path or inline data URI.
    #[serde(default)]
    pub image: String,
}

impl Game {
    /// Classify the raw `image` field.
    pub fn image_source(&self) -> ImageSource<'_> {
        if self.image.starts_with("data:") {
            ImageSource::InlineData(&self.image)
        } else {
            ImageSource::Path(&self.image)
        }
    }
}

/// The two forms an image reference can take.
///
/// A server-relative path is what fetches return; an inline data URI shows
/// up when a local edit staged a new image that the server has not stored
/// yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Opaque server-relative path, resolved against the API base URL.
    Path(&'a str),
    /// Inline-encoded payload (`data:` URI) from a pending local edit.
    InlineData(&'a str),
}

/// Mutation payload for create and partial update.
///
/// Every field is optional: on create the server fills defaults and assigns
/// the identifier from `category`; on update only the present fields are
/// patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameDraft {
    /// Category name; the server derives the identifier from it on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl GameDraft {
    /// Draft with only a category set, the minimum a create form starts from.
    pub fn for_category(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    /// Set the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// True when no field is set; an empty patch.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_wire_roundtrip() {
        let json = r#"{
            "id": "GAMEA0001",
            "name": "Foo",
            "releaseDate": "2024-03-01",
            "author": "someone",
            "price": 19.99,
            "image": "/images/foo.png"
        }"#;
        let game: Game = serde_json::from_str(json).unwrap();
        assert_eq!(game.id, "GAMEA0001");
        assert_eq!(game.description, "");
        assert_eq!(
            game.release_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(game.image_source(), ImageSource::Path("/images/foo.png"));
    }

    #[test]
    fn test_inline_image_is_detected() {
        let json = r#"{
            "id": "GAMEA0002",
            "name": "Bar",
            "releaseDate": "2020-01-01",
            "author": "someone",
            "price": 0.0,
            "image": "data:image/png;base64,AAAA"
        }"#;
        let game: Game = serde_json::from_str(json).unwrap();
        assert!(matches!(game.image_source(), ImageSource::InlineData(_)));
    }

    #[test]
    fn test_draft_skips_absent_fields() {
        let draft = GameDraft::for_category("Action")
            .with_name("Foo")
            .with_author("someone");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["category"], "Action");
        assert_eq!(json["name"], "Foo");
        assert_eq!(json["author"], "someone");
        assert!(json.get("price").is_none());
        assert!(json.get("releaseDate").is_none());
    }

    #[test]
    fn test_empty_draft() {
        assert!(GameDraft::default().is_empty());
        assert!(!GameDraft::default().with_price(1.0).is_empty());
    }
}
