//! Emotion classification — maps narrative text to a discrete emotion tag.
//!
//! Classification is a fast, explainable keyword heuristic: the text is
//! tested against an ordered list of keyword groups (Dutch and English
//! synonyms per category) and the first group with a hit wins. Texts that
//! match nothing resolve to [`EmotionTag::Peaceful`].

use serde::{Deserialize, Serialize};

/// The emotional tones a story fragment can carry.
///
/// `Sad` has no keyword group and is never produced by [`classify`]; callers
/// that already know the tone select it directly via
/// [`crate::engine::AmbientEngine::play_for_emotion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionTag {
    Happy,
    Sad,
    Excited,
    Mysterious,
    Calm,
    Adventurous,
    Peaceful,
}

impl EmotionTag {
    /// Every tag, in table order.
    pub const ALL: [EmotionTag; 7] = [
        EmotionTag::Happy,
        EmotionTag::Sad,
        EmotionTag::Excited,
        EmotionTag::Mysterious,
        EmotionTag::Calm,
        EmotionTag::Adventurous,
        EmotionTag::Peaceful,
    ];

    /// Position within [`EmotionTag::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            EmotionTag::Happy => 0,
            EmotionTag::Sad => 1,
            EmotionTag::Excited => 2,
            EmotionTag::Mysterious => 3,
            EmotionTag::Calm => 4,
            EmotionTag::Adventurous => 5,
            EmotionTag::Peaceful => 6,
        }
    }
}

/// Keyword groups in match priority order. A text can hit several groups;
/// the first one listed here wins, so the order is part of the contract.
const KEYWORD_GROUPS: &[(EmotionTag, &[&str])] = &[
    (
        EmotionTag::Happy,
        &[
            "vrolijk", "blij", "lach", "feest", "zonnig", "happy", "laugh", "smile", "party",
            "sunny",
        ],
    ),
    (
        EmotionTag::Excited,
        &[
            "spannend", "rennen", "snel", "wauw", "exciting", "thrill", "race", "hurry", "wow",
        ],
    ),
    (
        EmotionTag::Mysterious,
        &[
            "geheim",
            "mysterie",
            "mysterious",
            "schaduw",
            "spook",
            "mystery",
            "secret",
            "shadow",
            "whisper",
        ],
    ),
    (
        EmotionTag::Calm,
        &[
            "kalm",
            "zacht",
            "slaapliedje",
            "wiegen",
            "calm",
            "gentle",
            "lullaby",
            "cozy",
            "soft",
        ],
    ),
    (
        EmotionTag::Adventurous,
        &[
            "avontuur",
            "ontdekking",
            "schat",
            "reis",
            "adventure",
            "journey",
            "quest",
            "treasure",
            "explore",
        ],
    ),
];

/// Classify a fragment of narrative text.
///
/// Case-insensitive, deterministic, total over all inputs including the
/// empty string. No side effects.
pub fn classify(text: &str) -> EmotionTag {
    let text = text.to_lowercase();
    for (tag, keywords) in KEYWORD_GROUPS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return *tag;
        }
    }
    EmotionTag::Peaceful
}
