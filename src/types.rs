//! Outward result shapes carried by [`Outcome::Data`](crate::Outcome::Data).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Upper bound on voices returned by [`get_voices`](crate::HeyGenClient::get_voices).
pub const MAX_VOICES: usize = 100;

/// Seconds of quota per credit.
pub const QUOTA_SECONDS_PER_CREDIT: i64 = 60;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credits {
    pub remaining_credits: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub voice_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub preview_audio: Option<String>,
    #[serde(default)]
    pub support_pause: bool,
    #[serde(default)]
    pub emotion_support: bool,
    #[serde(default)]
    pub support_interactive_avatar: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Voices {
    pub voices: Vec<VoiceInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub num_looks: Option<u32>,
    #[serde(default)]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub group_type: Option<String>,
    #[serde(default)]
    pub train_status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AvatarGroups {
    pub avatar_groups: Vec<AvatarGroup>,
    pub total_count: u64,
}

/// Avatar as listed inside an avatar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    #[serde(alias = "avatar_id")]
    pub id: String,
    #[serde(alias = "avatar_name")]
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub preview_image_url: Option<String>,
    #[serde(default)]
    pub preview_video_url: Option<String>,
    #[serde(default)]
    pub premium: Option<bool>,
    #[serde(default, rename = "type")]
    pub avatar_type: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub default_voice_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub train_status: Option<String>,
    #[serde(default)]
    pub moderation_msg: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupAvatars {
    pub avatars: Vec<Avatar>,
}

/// Avatar as returned by the account-wide avatar listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarSummary {
    pub avatar_id: String,
    pub avatar_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub preview_image_url: Option<String>,
    #[serde(default)]
    pub preview_video_url: Option<String>,
    #[serde(default)]
    pub premium: Option<bool>,
    #[serde(default, rename = "type")]
    pub avatar_type: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Avatars {
    pub avatars: Vec<AvatarSummary>,
    pub total_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvatarDetails {
    #[serde(default, alias = "id")]
    pub avatar_id: Option<String>,
    #[serde(default, alias = "name")]
    pub avatar_name: Option<String>,
    #[serde(default, rename = "type")]
    pub avatar_type: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub preview_image_url: Option<String>,
    #[serde(default)]
    pub preview_video_url: Option<String>,
    #[serde(default)]
    pub premium: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub poses: Option<Vec<JsonValue>>,
    #[serde(default)]
    pub voices: Option<Vec<JsonValue>>,
    #[serde(default)]
    pub looks: Option<Vec<JsonValue>>,
}

/// Accepted video job. Poll [`get_video_status`](crate::HeyGenClient::get_video_status)
/// with `video_id` until it completes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VideoJob {
    pub video_id: Option<String>,
    pub task_id: Option<String>,
    pub video_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VideoId {
    pub video_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VideoStatus {
    pub video_id: String,
    /// One of `waiting`, `pending`, `processing`, `completed`, `failed`.
    pub status: String,
    pub duration: Option<f64>,
    pub video_url: Option<String>,
    pub gif_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: Option<i64>,
    pub error_details: Option<VideoErrorDetails>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VideoErrorDetails {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub detail: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoListItem {
    pub video_id: String,
    pub status: String,
    #[serde(default)]
    pub video_title: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub gif_url: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub callback_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VideoList {
    pub videos: Vec<VideoListItem>,
    pub total: usize,
    /// Pagination token for the next page, if any.
    pub token: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub template_id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail_image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Templates {
    pub templates: Vec<TemplateSummary>,
    pub total_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub variable_type: String,
    #[serde(default)]
    pub properties: Option<JsonValue>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateScene {
    pub scene_id: Option<String>,
    pub variables: Option<Vec<TemplateVariable>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateDetails {
    pub template_id: Option<String>,
    pub name: Option<String>,
    pub thumbnail_image_url: Option<String>,
    pub variables: Option<Vec<TemplateVariable>>,
    pub scenes: Option<Vec<TemplateScene>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadedAsset {
    pub asset_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, alias = "id")]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub asset_key: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "type")]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<JsonValue>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Assets {
    pub assets: Vec<Asset>,
    pub total: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeletedAsset {
    pub asset_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub is_trash: bool,
    #[serde(default)]
    pub created_ts: Option<i64>,
    #[serde(default)]
    pub updated_ts: Option<i64>,
    #[serde(default)]
    pub direct_children_count: Option<u64>,
    #[serde(default)]
    pub creator_username: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Folders {
    pub folders: Vec<Folder>,
    pub total: Option<u64>,
    pub token: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FolderRef {
    pub folder_id: String,
}
