//! Common types and data structures

use serde::Deserialize;

use crate::constants::DEFAULT_XP_REWARD;

/// Devotion content nested in a pending response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Devotion {
    pub passage: String,
    pub text: String,
    pub insight: String,
    pub reflection: String,
}

/// Response from the daily devotion endpoint.
///
/// The wire format is discriminated by a top-level `type` field: the exact
/// string `"already_completed"` selects the first variant; any other value
/// (or no `type` at all) means a devotion is pending and the content is
/// nested under `devotion`. A pending response without a `devotion` object
/// is malformed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawDevotionResponse")]
pub enum DevotionResponse {
    AlreadyCompleted {
        message: String,
        streak: u32,
        devotion_type: Option<String>,
    },
    Pending {
        devotion: Devotion,
        current_streak: u32,
        devotion_type: Option<String>,
    },
}

#[derive(Deserialize)]
struct RawDevotionResponse {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    streak: Option<u32>,
    #[serde(default)]
    devotion: Option<Devotion>,
    #[serde(default)]
    current_streak: Option<u32>,
    #[serde(default)]
    devotion_type: Option<String>,
}

impl TryFrom<RawDevotionResponse> for DevotionResponse {
    type Error = String;

    fn try_from(raw: RawDevotionResponse) -> Result<Self, Self::Error> {
        if raw.kind.as_deref() == Some("already_completed") {
            return Ok(DevotionResponse::AlreadyCompleted {
                message: raw.message.unwrap_or_default(),
                streak: raw.streak.unwrap_or(0),
                devotion_type: raw.devotion_type,
            });
        }
        match raw.devotion {
            Some(devotion) => Ok(DevotionResponse::Pending {
                devotion,
                current_streak: raw.current_streak.unwrap_or(0),
                devotion_type: raw.devotion_type,
            }),
            None => Err("devotion payload missing `devotion` object".into()),
        }
    }
}

/// Response from the completion endpoint. Every field is optional on the
/// wire; only `xp_earned` matters for the notification.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompletionResult {
    pub xp_earned: Option<u32>,
    pub streak: Option<u32>,
    pub new_level: Option<String>,
    pub new_badges: Vec<String>,
    pub total_xp: Option<u32>,
}

impl CompletionResult {
    pub fn xp(&self) -> u32 {
        self.xp_earned.unwrap_or(DEFAULT_XP_REWARD)
    }
}

/// Gamification overview from the progress endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProgressOverview {
    pub level: String,
    pub xp: u32,
    pub next_level: String,
    pub progress_percentage: f32,
    pub badges: Vec<String>,
    pub streaks: ProgressStreaks,
    pub total_actions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProgressStreaks {
    pub devotion: u32,
    pub prayer: u32,
}

/// Presentation state of the devotion modal. Lives only in memory; the
/// modal renders purely as a function of this value.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    Loading,
    Loaded(DevotionResponse),
    Failed,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_already_completed() {
        let json = r#"{
            "type": "already_completed",
            "message": "You've already completed your morning devotion today!",
            "streak": 7,
            "devotion_type": "morning"
        }"#;
        let resp: DevotionResponse = serde_json::from_str(json).unwrap();
        match resp {
            DevotionResponse::AlreadyCompleted { message, streak, devotion_type } => {
                assert!(message.contains("already completed"));
                assert_eq!(streak, 7);
                assert_eq!(devotion_type.as_deref(), Some("morning"));
            }
            other => panic!("expected AlreadyCompleted, got {other:?}"),
        }
    }

    #[test]
    fn already_completed_defaults_missing_fields() {
        let json = r#"{"type": "already_completed"}"#;
        let resp: DevotionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp,
            DevotionResponse::AlreadyCompleted {
                message: String::new(),
                streak: 0,
                devotion_type: None,
            }
        );
    }

    #[test]
    fn decodes_pending_devotion() {
        let json = r#"{
            "type": "new_devotion",
            "devotion": {
                "passage": "Psalm 46:10",
                "text": "Be still, and know that I am God.",
                "insight": "God invites you to stillness.",
                "reflection": "Where do you need stillness today?"
            },
            "current_streak": 3,
            "devotion_type": "evening"
        }"#;
        let resp: DevotionResponse = serde_json::from_str(json).unwrap();
        match resp {
            DevotionResponse::Pending { devotion, current_streak, devotion_type } => {
                assert_eq!(devotion.passage, "Psalm 46:10");
                assert_eq!(devotion.text, "Be still, and know that I am God.");
                assert_eq!(current_streak, 3);
                assert_eq!(devotion_type.as_deref(), Some("evening"));
            }
            other => panic!("expected Pending, got {other:?}"),
        }
    }

    #[test]
    fn absent_type_with_devotion_is_pending() {
        let json = r#"{
            "devotion": {
                "passage": "p", "text": "t", "insight": "i", "reflection": "r"
            }
        }"#;
        let resp: DevotionResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(resp, DevotionResponse::Pending { current_streak: 0, .. }));
    }

    #[test]
    fn rejects_payload_without_devotion() {
        // e.g. the server's `{"error": "..."}` body on an internal failure
        let json = r#"{"error": "Failed to get devotion"}"#;
        assert!(serde_json::from_str::<DevotionResponse>(json).is_err());
    }

    #[test]
    fn completion_xp_defaults_to_two() {
        let explicit: CompletionResult = serde_json::from_str(r#"{"xp_earned": 5}"#).unwrap();
        assert_eq!(explicit.xp(), 5);

        let empty: CompletionResult = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.xp(), 2);
    }

    #[test]
    fn decodes_completion_extras() {
        let json = r#"{
            "xp_earned": 2,
            "new_level": "Shepherd",
            "streak": 4,
            "new_badges": ["Devotion Keeper"],
            "total_xp": 12
        }"#;
        let result: CompletionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.new_level.as_deref(), Some("Shepherd"));
        assert_eq!(result.new_badges, vec!["Devotion Keeper".to_string()]);
        assert_eq!(result.total_xp, Some(12));
    }

    #[test]
    fn decodes_progress_and_ignores_unknown_fields() {
        let json = r#"{
            "level": "Disciple",
            "xp": 30,
            "next_level": "Warrior",
            "progress_percentage": 20.0,
            "badges": ["Faith Seed", "Devotion Keeper"],
            "streaks": {"devotion": 5, "prayer": 2, "last_devotion": "2026-08-08"},
            "total_actions": 15,
            "verses_mastered": 4
        }"#;
        let progress: ProgressOverview = serde_json::from_str(json).unwrap();
        assert_eq!(progress.level, "Disciple");
        assert_eq!(progress.streaks.devotion, 5);
        assert_eq!(progress.badges.len(), 2);
    }
}
