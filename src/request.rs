use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Avatar appearing in a scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(rename = "type", default = "default_character_type")]
    pub character_type: String,
    pub avatar_id: String,
    #[serde(default = "default_avatar_style")]
    pub avatar_style: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Character {
    /// Builds an avatar character with normal style and unit scale.
    pub fn avatar(avatar_id: impl Into<String>) -> Self {
        Self {
            character_type: default_character_type(),
            avatar_id: avatar_id.into(),
            avatar_style: default_avatar_style(),
            scale: default_scale(),
        }
    }
}

/// Spoken script of a scene.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInput {
    #[serde(rename = "type", default = "default_voice_type")]
    pub voice_type: String,
    pub input_text: String,
    pub voice_id: String,
}

impl VoiceInput {
    /// Builds a text-to-speech voice.
    pub fn text(voice_id: impl Into<String>, input_text: impl Into<String>) -> Self {
        Self {
            voice_type: default_voice_type(),
            input_text: input_text.into(),
            voice_id: voice_id.into(),
        }
    }
}

/// Playback of a video background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayStyle {
    #[default]
    FitToScene,
    Freeze,
    Loop,
    FullVideo,
}

/// Scene background.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    /// Solid color, `value` is a hex code.
    Color {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_asset_id: Option<String>,
    },
    Video {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        video_asset_id: Option<String>,
        #[serde(default)]
        play_style: PlayStyle,
    },
}

/// One scene of an avatar video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoInput {
    pub character: Character,
    pub voice: VoiceInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
}

impl VideoInput {
    pub fn new(character: Character, voice: VoiceInput) -> Self {
        Self {
            character,
            voice,
            background: None,
        }
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Default for Dimension {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Body of `POST v2/video/generate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoGenerateRequest {
    #[serde(default)]
    pub title: String,
    pub video_inputs: Vec<VideoInput>,
    #[serde(default)]
    pub test: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<String>,
    #[serde(default)]
    pub dimension: Dimension,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub caption: bool,
}

impl VideoGenerateRequest {
    /// Builds a request with default 1280x720 dimension.
    pub fn new(video_inputs: impl Into<Vec<VideoInput>>) -> Self {
        Self {
            title: String::new(),
            video_inputs: video_inputs.into(),
            test: false,
            callback_id: None,
            dimension: Dimension::default(),
            aspect_ratio: None,
            caption: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Body of `POST v2/video/av4/generate`: a talking video from a photo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarIvVideoRequest {
    /// Asset id of an uploaded photo.
    pub image_key: String,
    pub video_title: String,
    pub script: String,
    pub voice_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_motion_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhance_custom_motion_prompt: Option<bool>,
}

impl AvatarIvVideoRequest {
    pub fn new(
        image_key: impl Into<String>,
        video_title: impl Into<String>,
        script: impl Into<String>,
        voice_id: impl Into<String>,
    ) -> Self {
        Self {
            image_key: image_key.into(),
            video_title: video_title.into(),
            script: script.into(),
            voice_id: voice_id.into(),
            audio_url: None,
            audio_asset_id: None,
            custom_motion_prompt: None,
            enhance_custom_motion_prompt: None,
        }
    }
}

/// Body of `POST v2/template/{id}/generate`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TemplateVideoRequest {
    pub test: bool,
    pub caption: bool,
    #[serde(skip_serializing_if = "title_is_unset")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "variables_are_unset")]
    pub variables: Option<Map<String, JsonValue>>,
}

fn title_is_unset(title: &Option<String>) -> bool {
    title.as_deref().map_or(true, str::is_empty)
}

fn variables_are_unset(variables: &Option<Map<String, JsonValue>>) -> bool {
    variables.as_ref().map_or(true, Map::is_empty)
}

fn default_character_type() -> String {
    "avatar".to_owned()
}

fn default_avatar_style() -> String {
    "normal".to_owned()
}

fn default_scale() -> f64 {
    1.0
}

fn default_voice_type() -> String {
    "text".to_owned()
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::{
        Background, Character, PlayStyle, TemplateVideoRequest, VideoGenerateRequest,
        VideoInput, VoiceInput,
    };

    #[test]
    fn generate_request_serializes_defaults() {
        let request = VideoGenerateRequest::new(vec![VideoInput::new(
            Character::avatar("av_1"),
            VoiceInput::text("vo_1", "Hello"),
        )])
        .with_title("Intro");

        let body = serde_json::to_value(&request).expect("must serialize");
        assert_eq!(
            body,
            json!({
                "title": "Intro",
                "video_inputs": [{
                    "character": {
                        "type": "avatar",
                        "avatar_id": "av_1",
                        "avatar_style": "normal",
                        "scale": 1.0
                    },
                    "voice": { "type": "text", "input_text": "Hello", "voice_id": "vo_1" }
                }],
                "test": false,
                "dimension": { "width": 1280, "height": 720 },
                "caption": false
            })
        );
    }

    #[test]
    fn backgrounds_are_tagged_by_type() {
        let color = serde_json::to_value(Background::Color {
            value: Some("#008000".to_owned()),
        })
        .expect("must serialize");
        assert_eq!(color, json!({"type": "color", "value": "#008000"}));

        let video: Background = serde_json::from_value(json!({
            "type": "video",
            "video_asset_id": "asset_9"
        }))
        .expect("must parse");
        assert_eq!(
            video,
            Background::Video {
                url: None,
                video_asset_id: Some("asset_9".to_owned()),
                play_style: PlayStyle::FitToScene,
            }
        );
    }

    #[test]
    fn background_rejects_unknown_type() {
        assert!(serde_json::from_value::<Background>(json!({"type": "gradient"})).is_err());
    }

    #[test]
    fn scene_defaults_fill_in_from_json() {
        let scene: VideoInput = serde_json::from_value(json!({
            "character": { "avatar_id": "av_2" },
            "voice": { "voice_id": "vo_2", "input_text": "Hi" }
        }))
        .expect("must parse");
        assert_eq!(scene.character, Character::avatar("av_2"));
        assert_eq!(scene.voice.voice_type, "text");
        assert!(scene.background.is_none());
    }

    #[test]
    fn template_request_omits_unset_title_and_variables() {
        let body = serde_json::to_value(TemplateVideoRequest {
            test: true,
            title: Some(String::new()),
            variables: Some(Map::new()),
            ..TemplateVideoRequest::default()
        })
        .expect("must serialize");
        assert_eq!(body, json!({"test": true, "caption": false}));
    }
}
