//! Sound profiles — per-emotion synthesis configuration.
//!
//! Each emotion tag maps to a fixed profile: an intended tempo, a musical
//! key, and one or two oscillator timbres. The table is read-only; callers
//! that want different sounds overlay JSON overrides via
//! [`ProfileSet::from_json`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::emotion::EmotionTag;

/// Base frequency of C major, also the fallback for unknown key names.
pub const DEFAULT_BASE_FREQUENCY: f64 = 261.63;

/// Synthesis configuration for one emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundProfile {
    /// Intended pacing in beats per minute. Documents the feel of the
    /// soundscape; no rhythmic events are scheduled from it.
    pub tempo_bpm: u32,
    /// Musical key name, e.g. "C major". Unknown names resolve to the
    /// C major base frequency rather than failing.
    pub musical_key: String,
    /// Oscillator waveform names, main voice first, optional harmony second.
    pub timbres: Vec<String>,
}

/// Map a musical key name to its base frequency in Hz.
///
/// Unknown keys fall back to C major; a missing mapping must never halt
/// playback.
pub fn base_frequency(key: &str) -> f64 {
    match key {
        "C major" => 261.63,
        "D major" => 293.66,
        "G major" => 392.00,
        "A minor" => 440.00,
        _ => DEFAULT_BASE_FREQUENCY,
    }
}

/// The built-in profile for a tag. Defined for every tag; pure, no I/O.
pub fn profile_for(tag: EmotionTag) -> SoundProfile {
    let (tempo_bpm, musical_key, timbres): (u32, &str, &[&str]) = match tag {
        EmotionTag::Happy => (120, "C major", &["sine", "triangle"]),
        EmotionTag::Sad => (70, "A minor", &["sine"]),
        EmotionTag::Excited => (140, "D major", &["sawtooth", "square"]),
        EmotionTag::Mysterious => (90, "A minor", &["triangle", "sine"]),
        EmotionTag::Calm => (80, "G major", &["sine"]),
        EmotionTag::Adventurous => (110, "D major", &["triangle", "square"]),
        EmotionTag::Peaceful => (75, "G major", &["sine"]),
    };
    SoundProfile {
        tempo_bpm,
        musical_key: musical_key.to_string(),
        timbres: timbres.iter().map(|t| t.to_string()).collect(),
    }
}

/// A total emotion→profile mapping.
///
/// Starts from the built-in table; individual tags can be overridden from
/// JSON. Lookup never fails.
#[derive(Debug, Clone)]
pub struct ProfileSet {
    profiles: [SoundProfile; 7],
}

impl ProfileSet {
    /// The built-in table.
    pub fn builtin() -> Self {
        ProfileSet {
            profiles: EmotionTag::ALL.map(profile_for),
        }
    }

    /// Built-ins overlaid with per-tag overrides from a JSON object keyed by
    /// tag name, e.g. `{"happy": {"tempo_bpm": 100, ...}}`. Tags absent from
    /// the JSON keep their built-in profile.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: HashMap<EmotionTag, SoundProfile> = serde_json::from_str(json)?;
        let mut set = Self::builtin();
        for (tag, profile) in overrides {
            set.profiles[tag.index()] = profile;
        }
        Ok(set)
    }

    /// The profile for a tag. Total over all tags.
    pub fn get(&self, tag: EmotionTag) -> &SoundProfile {
        &self.profiles[tag.index()]
    }
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_frequency_known_keys() {
        assert_eq!(base_frequency("C major"), 261.63);
        assert_eq!(base_frequency("D major"), 293.66);
        assert_eq!(base_frequency("G major"), 392.00);
        assert_eq!(base_frequency("A minor"), 440.00);
    }

    #[test]
    fn base_frequency_unknown_falls_back_to_c_major() {
        assert_eq!(base_frequency("unknown-key"), 261.63);
        assert_eq!(base_frequency(""), 261.63);
        assert_eq!(base_frequency("F# mixolydian"), 261.63);
    }

    #[test]
    fn profile_defined_for_every_tag() {
        for tag in EmotionTag::ALL {
            let profile = profile_for(tag);
            assert!(
                !profile.timbres.is_empty() && profile.timbres.len() <= 2,
                "{tag:?} should have 1 or 2 timbres, got {}",
                profile.timbres.len()
            );
            assert!(profile.tempo_bpm > 0);
        }
    }

    #[test]
    fn happy_profile_matches_contract() {
        let profile = profile_for(EmotionTag::Happy);
        assert_eq!(profile.tempo_bpm, 120);
        assert_eq!(profile.musical_key, "C major");
        assert_eq!(profile.timbres.len(), 2);
    }

    #[test]
    fn peaceful_profile_is_single_voice_g_major() {
        let profile = profile_for(EmotionTag::Peaceful);
        assert_eq!(profile.timbres.len(), 1);
        assert_eq!(base_frequency(&profile.musical_key), 392.00);
    }

    #[test]
    fn profile_set_lookup_is_total() {
        let set = ProfileSet::builtin();
        for tag in EmotionTag::ALL {
            assert_eq!(set.get(tag), &profile_for(tag));
        }
    }

    #[test]
    fn json_override_replaces_only_named_tags() {
        let set = ProfileSet::from_json(
            r#"{"happy": {"tempo_bpm": 90, "musical_key": "D major", "timbres": ["square"]}}"#,
        )
        .expect("valid override JSON");

        let happy = set.get(EmotionTag::Happy);
        assert_eq!(happy.tempo_bpm, 90);
        assert_eq!(happy.musical_key, "D major");
        assert_eq!(happy.timbres, vec!["square"]);

        // Everything else keeps the built-in.
        assert_eq!(set.get(EmotionTag::Calm), &profile_for(EmotionTag::Calm));
    }

    #[test]
    fn json_override_rejects_malformed_input() {
        assert!(ProfileSet::from_json("not json").is_err());
        assert!(ProfileSet::from_json(r#"{"happy": {"tempo_bpm": "fast"}}"#).is_err());
    }
}
