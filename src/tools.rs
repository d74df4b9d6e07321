//! JSON tool-call front end over [`HeyGenClient`].
//!
//! A tool call is a JSON object naming a `tool`, an `action`, and the
//! action's parameters:
//!
//! ```json
//! {"tool": "videos", "action": "status", "video_id": "abc123"}
//! ```
//!
//! [`dispatch`] checks required parameters before touching the network and
//! always answers with a serialized [`Outcome`].

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::{
    AvatarIvVideoRequest, HeyGenClient, Outcome, TemplateVideoRequest, VideoGenerateRequest,
    VideoInput,
};

const TOOLS: [&str; 7] = [
    "user",
    "voices",
    "avatars",
    "videos",
    "templates",
    "assets",
    "folders",
];

const SCENE_EXAMPLE: &str =
    r#"[{"character": {"avatar_id": "..."}, "voice": {"voice_id": "...", "input_text": "..."}}]"#;

/// One parsed tool invocation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolCall {
    /// `info` | `credits`
    User { action: String },
    /// `list`
    Voices { action: String },
    /// `list` | `get` | `list_groups` | `list_in_group`
    Avatars {
        action: String,
        #[serde(default)]
        avatar_id: Option<String>,
        #[serde(default)]
        group_id: Option<String>,
        #[serde(default)]
        include_public: bool,
    },
    /// `list` | `generate` | `generate_iv` | `status`
    Videos {
        action: String,
        #[serde(default)]
        video_id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        token: Option<String>,
        /// JSON array of scenes, as a string.
        #[serde(default)]
        video_inputs_json: Option<String>,
        #[serde(default)]
        image_key: Option<String>,
        #[serde(default)]
        script: Option<String>,
        #[serde(default)]
        video_title: Option<String>,
        #[serde(default)]
        voice_id: Option<String>,
        #[serde(default)]
        audio_url: Option<String>,
        #[serde(default)]
        audio_asset_id: Option<String>,
        #[serde(default)]
        custom_motion_prompt: Option<String>,
        #[serde(default)]
        enhance_custom_motion_prompt: Option<bool>,
    },
    /// `list` | `get` | `generate`
    Templates {
        action: String,
        #[serde(default)]
        template_id: Option<String>,
        #[serde(default)]
        variables: Option<Map<String, JsonValue>>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        test: bool,
        #[serde(default)]
        caption: bool,
    },
    /// `list` | `upload` | `delete`
    Assets {
        action: String,
        #[serde(default)]
        file_path: Option<String>,
        #[serde(default)]
        asset_id: Option<String>,
    },
    /// `list` | `create` | `rename` | `trash` | `restore`
    Folders {
        action: String,
        #[serde(default)]
        folder_id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ToolCall {
    /// Parses a tool call object.
    pub fn from_json(value: JsonValue) -> Result<Self, String> {
        let tool = match value.get("tool") {
            Some(JsonValue::String(tool)) => tool.clone(),
            Some(_) => return Err("tool must be a string".to_owned()),
            None => return Err("tool is required".to_owned()),
        };
        if !TOOLS.contains(&tool.as_str()) {
            return Err(format!("Unknown tool: {tool}"));
        }
        serde_json::from_value(value)
            .map_err(|err| format!("invalid arguments for '{tool}' tool: {err}"))
    }

    pub fn tool(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::Voices { .. } => "voices",
            Self::Avatars { .. } => "avatars",
            Self::Videos { .. } => "videos",
            Self::Templates { .. } => "templates",
            Self::Assets { .. } => "assets",
            Self::Folders { .. } => "folders",
        }
    }

    pub fn action(&self) -> &str {
        match self {
            Self::User { action }
            | Self::Voices { action }
            | Self::Avatars { action, .. }
            | Self::Videos { action, .. }
            | Self::Templates { action, .. }
            | Self::Assets { action, .. }
            | Self::Folders { action, .. } => action,
        }
    }
}

/// Parses and runs a raw tool call object.
pub async fn dispatch_json(client: &HeyGenClient, value: JsonValue) -> JsonValue {
    match ToolCall::from_json(value) {
        Ok(call) => dispatch(client, call).await,
        Err(message) => Outcome::<()>::error(message).to_json(),
    }
}

/// Runs one tool call and renders its [`Outcome`] as JSON.
pub async fn dispatch(client: &HeyGenClient, call: ToolCall) -> JsonValue {
    tracing::info!(tool = call.tool(), action = call.action(), "dispatching tool call");
    match run(client, call).await {
        Ok(result) => result,
        Err(message) => Outcome::<()>::error(message).to_json(),
    }
}

type Invalid = String;

async fn run(client: &HeyGenClient, call: ToolCall) -> Result<JsonValue, Invalid> {
    let result = match call {
        ToolCall::User { action } => match action.as_str() {
            "info" => client.get_user_info().await.to_json(),
            "credits" => client.get_remaining_credits().await.to_json(),
            _ => return Err(unknown_action(&action)),
        },

        ToolCall::Voices { action } => match action.as_str() {
            "list" => client.get_voices().await.to_json(),
            _ => return Err(unknown_action(&action)),
        },

        ToolCall::Avatars {
            action,
            avatar_id,
            group_id,
            include_public,
        } => match action.as_str() {
            "list" => client.list_avatars().await.to_json(),
            "get" => {
                let avatar_id = required(&avatar_id, "avatar_id", &action)?;
                client.get_avatar_details(avatar_id).await.to_json()
            }
            "list_groups" => client.list_avatar_groups(include_public).await.to_json(),
            "list_in_group" => {
                let group_id = required(&group_id, "group_id", &action)?;
                client.get_avatars_in_group(group_id).await.to_json()
            }
            _ => return Err(unknown_action(&action)),
        },

        ToolCall::Videos {
            action,
            video_id,
            title,
            token,
            video_inputs_json,
            image_key,
            script,
            video_title,
            voice_id,
            audio_url,
            audio_asset_id,
            custom_motion_prompt,
            enhance_custom_motion_prompt,
        } => match action.as_str() {
            "list" => client.list_videos(token.as_deref()).await.to_json(),
            "generate" => {
                let raw = required(&video_inputs_json, "video_inputs_json", &action).map_err(
                    |message| format!("{message}. Provide a JSON array of scenes, e.g.: {SCENE_EXAMPLE}"),
                )?;
                let scenes = parse_scenes(raw)?;
                let request =
                    VideoGenerateRequest::new(scenes).with_title(title.unwrap_or_default());
                client.generate_avatar_video(&request).await.to_json()
            }
            "generate_iv" => {
                let image_key = required(&image_key, "image_key", &action).map_err(|message| {
                    format!("{message} (upload photo first using assets tool)")
                })?;
                let script = required(&script, "script", &action)?;
                let voice_id = required(&voice_id, "voice_id", &action)?;
                let video_title = required(&video_title, "video_title", &action)?;

                let mut request =
                    AvatarIvVideoRequest::new(image_key, video_title, script, voice_id);
                request.audio_url = audio_url;
                request.audio_asset_id = audio_asset_id;
                request.custom_motion_prompt = custom_motion_prompt;
                request.enhance_custom_motion_prompt = enhance_custom_motion_prompt;
                client.generate_avatar_iv_video(&request).await.to_json()
            }
            "status" => {
                let video_id = required(&video_id, "video_id", &action)?;
                client.get_video_status(video_id).await.to_json()
            }
            _ => return Err(unknown_action(&action)),
        },

        ToolCall::Templates {
            action,
            template_id,
            variables,
            title,
            test,
            caption,
        } => match action.as_str() {
            "list" => client.list_templates().await.to_json(),
            "get" => {
                let template_id = required(&template_id, "template_id", &action)?;
                client.get_template_details(template_id).await.to_json()
            }
            "generate" => {
                let template_id = required(&template_id, "template_id", &action)?;
                let request = TemplateVideoRequest {
                    test,
                    caption,
                    title,
                    variables,
                };
                client
                    .generate_video_from_template(template_id, &request)
                    .await
                    .to_json()
            }
            _ => return Err(unknown_action(&action)),
        },

        ToolCall::Assets {
            action,
            file_path,
            asset_id,
        } => match action.as_str() {
            "list" => client.list_assets().await.to_json(),
            "upload" => {
                let file_path = required(&file_path, "file_path", &action)?;
                client.upload_asset(file_path).await.to_json()
            }
            "delete" => {
                let asset_id = required(&asset_id, "asset_id", &action)?;
                client.delete_asset(asset_id).await.to_json()
            }
            _ => return Err(unknown_action(&action)),
        },

        ToolCall::Folders {
            action,
            folder_id,
            name,
        } => match action.as_str() {
            "list" => client.list_folders().await.to_json(),
            "create" => {
                let name = required(&name, "name", &action)?;
                client.create_folder(name).await.to_json()
            }
            "rename" => {
                let folder_id = required(&folder_id, "folder_id", &action)?;
                let name = required(&name, "name", &action)?;
                client.rename_folder(folder_id, name).await.to_json()
            }
            "trash" => {
                let folder_id = required(&folder_id, "folder_id", &action)?;
                client.trash_folder(folder_id).await.to_json()
            }
            "restore" => {
                let folder_id = required(&folder_id, "folder_id", &action)?;
                client.restore_folder(folder_id).await.to_json()
            }
            _ => return Err(unknown_action(&action)),
        },
    };
    Ok(result)
}

/// Empty strings count as missing.
fn required<'a>(value: &'a Option<String>, param: &str, action: &str) -> Result<&'a str, Invalid> {
    match value.as_deref() {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{param} is required for '{action}' action")),
    }
}

fn unknown_action(action: &str) -> Invalid {
    format!("Unknown action: {action}")
}

/// Validates and parses the `video_inputs_json` scene array.
fn parse_scenes(raw: &str) -> Result<Vec<VideoInput>, Invalid> {
    let parsed: JsonValue = serde_json::from_str(raw)
        .map_err(|err| format!("Invalid JSON in video_inputs_json: {err}"))?;
    let scenes = match parsed {
        JsonValue::Array(scenes) => scenes,
        _ => return Err("video_inputs_json must be a JSON array of scenes".to_owned()),
    };
    if scenes.is_empty() {
        return Err("video_inputs_json must contain at least one scene".to_owned());
    }

    scenes
        .into_iter()
        .enumerate()
        .map(|(index, scene)| {
            let number = index + 1;
            for (pointer, field) in [
                ("/character/avatar_id", "character.avatar_id"),
                ("/voice/input_text", "voice.input_text"),
                ("/voice/voice_id", "voice.voice_id"),
            ] {
                let present = scene
                    .pointer(pointer)
                    .and_then(JsonValue::as_str)
                    .is_some_and(|value| !value.is_empty());
                if !present {
                    return Err(format!("Scene {number}: {field} is required"));
                }
            }
            serde_json::from_value::<VideoInput>(scene)
                .map_err(|err| format!("Scene {number}: {err}"))
        })
        .collect()
}
