//! MangaDex API response schemas.
//!
//! Typed representations of the `{ data: { attributes, relationships } }`
//! documents returned by the API. Decoding happens once at the fetch
//! boundary; everything downstream works on these types.

use serde::Deserialize;
use std::collections::HashMap;

/// Generic single-entity wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct EntityResponse<T> {
    pub data: T,
}

/// Manga record
#[derive(Debug, Clone, Deserialize)]
pub struct MangaData {
    pub id: String,
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Manga attributes with localized title and description maps
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MangaAttributes {
    /// Language code → title
    #[serde(default)]
    pub title: HashMap<String, String>,
    /// Language code → description
    #[serde(default)]
    pub description: HashMap<String, String>,
}

/// Reference to a related entity
#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
}

/// Author record
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorData {
    pub attributes: AuthorAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorAttributes {
    pub name: String,
}

/// Cover art record
#[derive(Debug, Clone, Deserialize)]
pub struct CoverData {
    pub attributes: CoverAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverAttributes {
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_manga_document() {
        let json = r#"{
            "result": "ok",
            "data": {
                "id": "abc123",
                "type": "manga",
                "attributes": {
                    "title": { "en": "Sample Manga" },
                    "description": { "en": "A story." },
                    "status": "ongoing",
                    "year": 2020
                },
                "relationships": [
                    { "id": "cov1", "type": "cover_art" },
                    { "id": "auth1", "type": "author" }
                ]
            }
        }"#;

        let response: EntityResponse<MangaData> = serde_json::from_str(json).unwrap();
        let manga = response.data;
        assert_eq!(manga.id, "abc123");
        assert_eq!(manga.attributes.title["en"], "Sample Manga");
        assert_eq!(manga.relationships.len(), 2);
        assert_eq!(manga.relationships[0].rel_type, "cover_art");
    }

    #[test]
    fn test_decode_cover_file_name() {
        let json = r#"{
            "data": {
                "id": "cov1",
                "attributes": { "fileName": "x.png", "volume": "1" }
            }
        }"#;

        let response: EntityResponse<CoverData> = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.attributes.file_name, "x.png");
    }

    #[test]
    fn test_missing_maps_default_to_empty() {
        let json = r#"{ "data": { "id": "abc123", "attributes": {} } }"#;

        let response: EntityResponse<MangaData> = serde_json::from_str(json).unwrap();
        assert!(response.data.attributes.title.is_empty());
        assert!(response.data.attributes.description.is_empty());
        assert!(response.data.relationships.is_empty());
    }
}
