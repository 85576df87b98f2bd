//! Storyboard schema and validation.
//!
//! The storyboard is the authoritative edit plan produced by the analysis
//! service and replaced wholesale by chat edits. The client never reorders
//! or hand-edits individual scenes; it only swaps in a new validated plan.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Current storyboard schema version. Payloads from newer backends are
/// rejected rather than silently reinterpreted.
pub const STORYBOARD_VERSION: u32 = 1;

/// Creative presets offered by the product. Free-form labels are also
/// accepted; only the empty label is rejected.
pub const STYLE_PRESETS: &[&str] = &[
    "Hollywood",
    "Emotional",
    "Motivational",
    "Romantic",
    "Corporate",
];

/// Output frame ratios the renderer understands.
pub const SUPPORTED_ASPECT_RATIOS: &[&str] = &["9:16", "16:9", "1:1", "4:5"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneRole {
    Hook,
    Body,
    Punch,
}

impl fmt::Display for SceneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneRole::Hook => write!(f, "hook"),
            SceneRole::Body => write!(f, "body"),
            SceneRole::Punch => write!(f, "punch"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneSource {
    UserClip,
    UserImage,
    AiBroll,
}

impl Default for SceneSource {
    fn default() -> Self {
        SceneSource::UserClip
    }
}

/// One segment of the plan. `start`/`end` are seconds into the source
/// media named by `file_path`, not into the output reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub input_type: SceneSource,
    pub file_path: String,
    pub start: f64,
    pub end: f64,
    pub role: SceneRole,
    #[serde(default)]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    /// Generation prompt, present on `ai_broll` scenes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storyboard {
    #[serde(default = "default_version")]
    pub version: u32,
    pub style: String,
    /// Target output length in seconds; 0 lets the agent decide.
    #[serde(default)]
    pub target_duration: u32,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub use_music: bool,
    #[serde(default)]
    pub use_voiceover: bool,
}

fn default_version() -> u32 {
    STORYBOARD_VERSION
}

fn default_aspect_ratio() -> String {
    "9:16".to_string()
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidStoryboard {
    #[error("storyboard has no scenes")]
    NoScenes,
    #[error("scene {index} has invalid timing ({start} .. {end})")]
    SceneTiming { index: usize, start: f64, end: f64 },
    #[error("unsupported aspect ratio {0:?}")]
    UnsupportedAspectRatio(String),
    #[error("style label is empty")]
    EmptyStyle,
    #[error("unrecognized storyboard schema version {0}")]
    UnsupportedVersion(u32),
}

impl Storyboard {
    /// Checks the invariants the orchestrator relies on before accepting a
    /// plan as current. Pure; no side effects.
    pub fn validate(&self) -> Result<(), InvalidStoryboard> {
        if self.version != STORYBOARD_VERSION {
            return Err(InvalidStoryboard::UnsupportedVersion(self.version));
        }
        if self.style.trim().is_empty() {
            return Err(InvalidStoryboard::EmptyStyle);
        }
        if !SUPPORTED_ASPECT_RATIOS.contains(&self.aspect_ratio.as_str()) {
            return Err(InvalidStoryboard::UnsupportedAspectRatio(
                self.aspect_ratio.clone(),
            ));
        }
        if self.scenes.is_empty() {
            return Err(InvalidStoryboard::NoScenes);
        }
        for (index, scene) in self.scenes.iter().enumerate() {
            let ordered = scene.start.is_finite()
                && scene.end.is_finite()
                && scene.start >= 0.0
                && scene.start <= scene.end;
            if !ordered {
                return Err(InvalidStoryboard::SceneTiming {
                    index,
                    start: scene.start,
                    end: scene.end,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(start: f64, end: f64) -> Scene {
        Scene {
            input_type: SceneSource::UserClip,
            file_path: "clip.mp4".to_string(),
            start,
            end,
            role: SceneRole::Hook,
            caption: "Watch this!".to_string(),
            effect: None,
            prompt: None,
        }
    }

    fn storyboard(scenes: Vec<Scene>) -> Storyboard {
        Storyboard {
            version: STORYBOARD_VERSION,
            style: "Hollywood".to_string(),
            target_duration: 30,
            aspect_ratio: "9:16".to_string(),
            scenes,
            use_music: false,
            use_voiceover: false,
        }
    }

    #[test]
    fn accepts_well_formed_plan() {
        assert_eq!(storyboard(vec![scene(0.0, 3.5)]).validate(), Ok(()));
    }

    #[test]
    fn accepts_every_style_preset_and_freeform_labels() {
        for style in STYLE_PRESETS {
            let mut sb = storyboard(vec![scene(0.0, 2.0)]);
            sb.style = style.to_string();
            assert_eq!(sb.validate(), Ok(()), "preset {style:?}");
        }
        let mut sb = storyboard(vec![scene(0.0, 2.0)]);
        sb.style = "Vaporwave".to_string();
        assert_eq!(sb.validate(), Ok(()));
    }

    #[test]
    fn rejects_blank_style() {
        let mut sb = storyboard(vec![scene(0.0, 2.0)]);
        sb.style = "  ".to_string();
        assert_eq!(sb.validate(), Err(InvalidStoryboard::EmptyStyle));
    }

    #[test]
    fn rejects_empty_scene_list() {
        assert_eq!(
            storyboard(vec![]).validate(),
            Err(InvalidStoryboard::NoScenes)
        );
    }

    #[test]
    fn rejects_scene_ending_before_it_starts() {
        let err = storyboard(vec![scene(0.0, 2.0), scene(8.0, 4.0)])
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            InvalidStoryboard::SceneTiming {
                index: 1,
                start: 8.0,
                end: 4.0
            }
        );
    }

    #[test]
    fn rejects_negative_start() {
        assert!(matches!(
            storyboard(vec![scene(-1.0, 2.0)]).validate(),
            Err(InvalidStoryboard::SceneTiming { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_unknown_aspect_ratio() {
        let mut sb = storyboard(vec![scene(0.0, 2.0)]);
        sb.aspect_ratio = "21:9".to_string();
        assert_eq!(
            sb.validate(),
            Err(InvalidStoryboard::UnsupportedAspectRatio("21:9".into()))
        );
    }

    #[test]
    fn rejects_future_schema_version() {
        let mut sb = storyboard(vec![scene(0.0, 2.0)]);
        sb.version = 2;
        assert_eq!(sb.validate(), Err(InvalidStoryboard::UnsupportedVersion(2)));
    }

    #[test]
    fn deserializes_backend_payload_with_defaults() {
        // The analysis service emits bare scenes without effect/prompt and
        // may omit target_duration entirely.
        let sb: Storyboard = serde_json::from_str(
            r#"{
                "style": "Motivational",
                "scenes": [
                    {"input_type": "user_clip", "file_path": "a.mp4",
                     "start": 0.0, "end": 3.0, "role": "hook", "caption": "POV"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(sb.version, STORYBOARD_VERSION);
        assert_eq!(sb.aspect_ratio, "9:16");
        assert_eq!(sb.target_duration, 0);
        assert_eq!(sb.validate(), Ok(()));
    }
}
