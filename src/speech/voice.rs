//! Voice identities and the live voice directory.

/// A synthesiser voice known to the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    /// Stable identifier persisted in column settings.
    pub id: String,
    /// Human-readable name for the configuration surface.
    pub name: String,
    /// BCP-47 language tag (e.g. `"ja-JP"`).
    pub lang: String,
}

impl Voice {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Live directory of available voices.
///
/// Queried at task-build and playback time, never cached across settings
/// changes — the installed voice set can change while the app runs.
pub trait VoiceDirectory: Send + Sync {
    fn list_voices(&self) -> Vec<Voice>;
}

/// Voice directory over a fixed list, for hosts without dynamic voices and
/// for tests.
pub struct StaticVoiceDirectory(pub Vec<Voice>);

impl VoiceDirectory for StaticVoiceDirectory {
    fn list_voices(&self) -> Vec<Voice> {
        self.0.clone()
    }
}

/// Resolve a persisted voice id against the live voice list.
///
/// Falls back to the first available voice when the id is unset or no longer
/// present; returns `None` only when no voices exist at all.
pub fn resolve_voice<'a>(voices: &'a [Voice], requested: Option<&str>) -> Option<&'a Voice> {
    requested
        .and_then(|id| voices.iter().find(|v| v.id == id))
        .or_else(|| voices.first())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn voices() -> Vec<Voice> {
        vec![
            Voice::new("v1", "Haruka", "ja-JP"),
            Voice::new("v2", "Nanami", "ja-JP"),
        ]
    }

    #[test]
    fn known_id_resolves_exactly() {
        let voices = voices();
        assert_eq!(resolve_voice(&voices, Some("v2")).unwrap().id, "v2");
    }

    #[test]
    fn unset_id_falls_back_to_first() {
        let voices = voices();
        assert_eq!(resolve_voice(&voices, None).unwrap().id, "v1");
    }

    #[test]
    fn stale_id_falls_back_to_first() {
        let voices = voices();
        assert_eq!(resolve_voice(&voices, Some("uninstalled")).unwrap().id, "v1");
    }

    #[test]
    fn empty_directory_resolves_to_none() {
        assert!(resolve_voice(&[], Some("v1")).is_none());
        assert!(resolve_voice(&[], None).is_none());
    }
}
