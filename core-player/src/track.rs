//! Track model: normalization of heterogeneous track descriptors.
//!
//! Hosts supply descriptors in whatever shape their catalogue produces;
//! alternate field names (`title`/`name`, `author`/`artist`, `pic`/`cover`)
//! are common in the wild. Everything is mapped into the canonical [`Track`]
//! shape on ingestion so the rest of the core never deals with optional
//! fields.

use serde::{Deserialize, Serialize};

/// Display default for missing name/artist fields.
pub const UNKNOWN: &str = "Unknown";

/// An externally supplied track descriptor, pre-normalization.
///
/// All fields are optional; [`Track::normalize`] resolves the supported
/// aliases and fills documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    pub name: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub cover: Option<String>,
    pub pic: Option<String>,
    pub lrc: Option<String>,
}

/// One playable media item with display metadata and an optional lyric
/// resource. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track display name.
    pub name: String,
    /// Artist display name.
    pub artist: String,
    /// Media resource locator. Non-empty for every track in a playlist.
    pub url: String,
    /// Cover art locator; may be empty (consumer supplies a fallback asset).
    pub cover: String,
    /// Lyric resource locator, when available.
    pub lrc: Option<String>,
}

impl Track {
    /// Map a raw descriptor into the canonical shape.
    ///
    /// Total function: never fails. Field precedence is `name` over `title`
    /// and `artist` over `author` and `cover` over `pic`; missing name/artist
    /// default to `"Unknown"`, missing cover to the empty string. A missing
    /// url resolves to the empty string and is filtered out by [`ingest`].
    pub fn normalize(raw: RawTrack) -> Self {
        let first_non_empty = |primary: Option<String>, fallback: Option<String>| {
            primary
                .filter(|value| !value.is_empty())
                .or(fallback)
                .filter(|value| !value.is_empty())
        };

        Self {
            name: first_non_empty(raw.name, raw.title).unwrap_or_else(|| UNKNOWN.to_string()),
            artist: first_non_empty(raw.artist, raw.author).unwrap_or_else(|| UNKNOWN.to_string()),
            url: raw.url.unwrap_or_default(),
            cover: first_non_empty(raw.cover, raw.pic).unwrap_or_default(),
            lrc: raw.lrc.filter(|value| !value.is_empty()),
        }
    }
}

/// Normalize a batch of descriptors, dropping entries without a resolvable
/// url.
///
/// The returned vector upholds the playlist invariant that every element has
/// a non-empty url.
pub fn ingest(descriptors: Vec<RawTrack>) -> Vec<Track> {
    descriptors
        .into_iter()
        .map(Track::normalize)
        .filter(|track| !track.url.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(url: &str) -> RawTrack {
        RawTrack {
            url: Some(url.to_string()),
            ..RawTrack::default()
        }
    }

    #[test]
    fn normalize_resolves_aliases() {
        let track = Track::normalize(RawTrack {
            title: Some("A".into()),
            author: Some("B".into()),
            url: Some("u".into()),
            pic: Some("p".into()),
            ..RawTrack::default()
        });

        assert_eq!(track.name, "A");
        assert_eq!(track.artist, "B");
        assert_eq!(track.url, "u");
        assert_eq!(track.cover, "p");
        assert_eq!(track.lrc, None);
    }

    #[test]
    fn normalize_prefers_primary_field_names() {
        let track = Track::normalize(RawTrack {
            name: Some("Primary".into()),
            title: Some("Alias".into()),
            artist: Some("Main".into()),
            author: Some("Other".into()),
            cover: Some("c".into()),
            pic: Some("p".into()),
            url: Some("u".into()),
            ..RawTrack::default()
        });

        assert_eq!(track.name, "Primary");
        assert_eq!(track.artist, "Main");
        assert_eq!(track.cover, "c");
    }

    #[test]
    fn normalize_applies_documented_defaults() {
        let track = Track::normalize(raw("u"));

        assert_eq!(track.name, UNKNOWN);
        assert_eq!(track.artist, UNKNOWN);
        assert_eq!(track.url, "u");
        assert_eq!(track.cover, "");
    }

    #[test]
    fn normalize_treats_empty_strings_as_missing() {
        let track = Track::normalize(RawTrack {
            name: Some(String::new()),
            title: Some("Fallback".into()),
            url: Some("u".into()),
            ..RawTrack::default()
        });

        assert_eq!(track.name, "Fallback");
    }

    #[test]
    fn ingest_drops_tracks_without_url() {
        let tracks = ingest(vec![
            raw("a"),
            RawTrack::default(),
            RawTrack {
                url: Some(String::new()),
                ..RawTrack::default()
            },
            raw("b"),
        ]);

        let urls: Vec<&str> = tracks.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b"]);
    }
}
