//! Language pools: curated artists per language plus the tag injected into
//! queries to steer the catalog toward that language.

use serde::Serialize;

/// One language's artist pool and query tag
#[derive(Debug, Clone, Serialize)]
pub struct LanguageProfile {
    /// Language identifier (lowercase)
    pub id: &'static str,
    /// Disambiguating query token; may be empty
    pub tag: &'static str,
    /// Canonical artist names, in curation order
    pub artists: &'static [&'static str],
}

pub const HINDI: LanguageProfile = LanguageProfile {
    id: "hindi",
    tag: "Hindi",
    artists: &[
        "Arijit Singh",
        "Shreya Ghoshal",
        "Atif Aslam",
        "Jubin Nautiyal",
        "Neha Kakkar",
        "Sonu Nigam",
        "Vishal Mishra",
        "Mohit Chauhan",
    ],
};

pub const BENGALI: LanguageProfile = LanguageProfile {
    id: "bengali",
    tag: "Bangla",
    artists: &[
        "Anupam Roy",
        "Nachiketa Chakraborty",
        "Rupam Islam",
        "Lopamudra Mitra",
        "Shilajit Majumder",
        "Anjan Dutt",
        "Iman Chakraborty",
        "Fossils",
    ],
};

pub const PUNJABI: LanguageProfile = LanguageProfile {
    id: "punjabi",
    tag: "Punjabi",
    artists: &[
        "Diljit Dosanjh",
        "Amrinder Gill",
        "Sidhu Moose Wala",
        "Karan Aujla",
        "Guru Randhawa",
        "Ammy Virk",
        "Gurdas Maan",
    ],
};

pub const TAMIL: LanguageProfile = LanguageProfile {
    id: "tamil",
    tag: "Tamil",
    artists: &[
        "Anirudh Ravichander",
        "Sid Sriram",
        "Yuvan Shankar Raja",
        "Harris Jayaraj",
        "Chinmayi",
    ],
};

pub const TELUGU: LanguageProfile = LanguageProfile {
    id: "telugu",
    tag: "Telugu",
    artists: &[
        "Devi Sri Prasad",
        "Kaala Bhairava",
        "Sid Sriram",
        "Mangli",
        "Anurag Kulkarni",
    ],
};

/// Every language with an artist pool. English has none and is searched
/// directly against the English market.
pub const LANGUAGE_POOLS: &[LanguageProfile] = &[HINDI, BENGALI, PUNJABI, TAMIL, TELUGU];

/// Pool for an already-normalized language id
pub fn pool_for(language: &str) -> Option<&'static LanguageProfile> {
    LANGUAGE_POOLS.iter().find(|profile| profile.id == language)
}

/// Trimmed, lowercased language preference
pub fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}
