//! Embed resolution.
//!
//! Folds a manga record and its related lookups (author, cover art) into
//! the flat preview fields the renderer consumes. Dependent lookups are
//! best-effort: a failure degrades the corresponding field instead of
//! failing the embed.

use crate::api::{MangaData, MangaDexClient};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Languages tried first when picking a title or description
const PREFERRED_LANGUAGES: &[&str] = &["en"];

/// Renderer-ready output of the aggregation pipeline.
///
/// Fields left empty mean the corresponding lookup failed or the record
/// carried no value for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewFields {
    /// Display title, with author names appended when resolved
    pub title: String,
    /// Description in the title's language where available
    pub description: String,
    /// Canonical title URL on the public site
    pub canonical_url: String,
    /// Cover image URL, empty when no cover could be resolved
    pub image_url: String,
}

/// Resolves preview fields for manga records
pub struct EmbedResolver {
    client: Arc<MangaDexClient>,
    site_base_url: String,
    covers_base_url: String,
}

impl EmbedResolver {
    /// Create a new embed resolver
    pub fn new(client: Arc<MangaDexClient>, site_base_url: String, covers_base_url: String) -> Self {
        Self {
            client,
            site_base_url,
            covers_base_url,
        }
    }

    /// The underlying API client, shared rate budget included
    pub fn client(&self) -> &MangaDexClient {
        &self.client
    }

    /// Assemble preview fields for `manga_id`.
    ///
    /// Never fails: a missing record yields only the canonical URL, and a
    /// failed dependent lookup leaves its field at the default. Dependent
    /// lookups run sequentially in relationship order, each one passing
    /// through the shared rate limiter.
    pub async fn resolve(&self, manga: Option<&MangaData>, manga_id: &str) -> PreviewFields {
        let mut fields = PreviewFields {
            canonical_url: format!("{}/title/{}", self.site_base_url, manga_id),
            ..PreviewFields::default()
        };

        let Some(manga) = manga else {
            return fields;
        };

        let mut primary_language = None;
        if let Some((language, title)) = pick_entry(&manga.attributes.title, None) {
            primary_language = Some(language);
            fields.title = title.to_string();
        }

        if let Some((_, description)) = pick_entry(&manga.attributes.description, primary_language)
        {
            fields.description = description.to_string();
        }

        for relationship in &manga.relationships {
            match relationship.rel_type.as_str() {
                "author" => match self.client.get_author(&relationship.id).await {
                    Ok(author) => {
                        fields.title = format!("{} - {}", fields.title, author.attributes.name);
                    }
                    Err(e) => warn!(
                        author_id = %relationship.id,
                        error = %e,
                        "Author lookup failed, leaving title unchanged"
                    ),
                },
                "cover_art" => match self.client.get_cover(&relationship.id).await {
                    Ok(cover) => {
                        fields.image_url = format!(
                            "{}/{}/{}",
                            self.covers_base_url, manga_id, cover.attributes.file_name
                        );
                    }
                    Err(e) => warn!(
                        cover_id = %relationship.id,
                        error = %e,
                        "Cover lookup failed, leaving image empty"
                    ),
                },
                _ => {}
            }
        }

        fields
    }
}

/// Pick an entry from a language map.
///
/// `preferred` wins when present; otherwise the first match from the
/// preference list, then the smallest language code. Sorting the fallback
/// keeps selection independent of map iteration order.
fn pick_entry<'a>(
    map: &'a HashMap<String, String>,
    preferred: Option<&str>,
) -> Option<(&'a str, &'a str)> {
    if let Some(language) = preferred {
        if let Some((key, value)) = map.get_key_value(language) {
            return Some((key.as_str(), value.as_str()));
        }
    }

    for language in PREFERRED_LANGUAGES {
        if let Some((key, value)) = map.get_key_value(*language) {
            return Some((key.as_str(), value.as_str()));
        }
    }

    map.iter()
        .min_by(|a, b| a.0.cmp(b.0))
        .map(|(key, value)| (key.as_str(), value.as_str()))
}
