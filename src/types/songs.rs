//! Request/response types for song resolution.

use serde::{Deserialize, Serialize};

/// Which link fields each song carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Both,
    Spot,
    Yt,
}

impl Platform {
    pub fn wants_spotify(self) -> bool {
        matches!(self, Platform::Both | Platform::Spot)
    }

    pub fn wants_youtube(self) -> bool {
        matches!(self, Platform::Both | Platform::Yt)
    }
}

/// Request to resolve a message into songs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongRequest {
    /// Free-text message describing how the user feels
    pub message: String,

    /// Link fields to include
    #[serde(default)]
    pub platform: Platform,

    /// Language preference; pool languages anchor on curated artists
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "random".to_string()
}

impl SongRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            platform: Platform::default(),
            language: default_language(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// One recommended song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongEntry {
    pub name: String,
    pub artist: String,
    /// Spotify track URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<String>,
    /// YouTube search URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

/// Response with the detected mood and the chosen songs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongResponse {
    /// Mood display name
    pub mood: String,
    pub songs: Vec<SongEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_request_defaults() {
        let req: SongRequest = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert_eq!(req.message, "hello");
        assert_eq!(req.platform, Platform::Both);
        assert_eq!(req.language, "random");
    }

    #[test]
    fn test_song_request_platforms() {
        let req: SongRequest =
            serde_json::from_str(r#"{"message": "x", "platform": "yt", "language": "hindi"}"#)
                .unwrap();
        assert_eq!(req.platform, Platform::Yt);
        assert_eq!(req.language, "hindi");

        assert!(serde_json::from_str::<SongRequest>(r#"{"message": "x", "platform": "tidal"}"#)
            .is_err());
        assert!(serde_json::from_str::<SongRequest>(r#"{"platform": "yt"}"#).is_err());
    }

    #[test]
    fn test_platform_flags() {
        assert!(Platform::Both.wants_spotify() && Platform::Both.wants_youtube());
        assert!(Platform::Spot.wants_spotify() && !Platform::Spot.wants_youtube());
        assert!(!Platform::Yt.wants_spotify() && Platform::Yt.wants_youtube());
    }

    #[test]
    fn test_song_entry_skips_missing_links() {
        let entry = SongEntry {
            name: "Song".to_string(),
            artist: "Artist".to_string(),
            spotify: Some("https://open.spotify.com/track/1".to_string()),
            youtube: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("spotify"));
        assert!(!json.contains("youtube"));
    }
}
