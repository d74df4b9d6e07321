//! `heygen-http` is an async HTTP client for the HeyGen video API.
//!
//! Every operation on [`HeyGenClient`] returns an [`Outcome`]: either the
//! mapped data or one human-readable error message. Transient failures
//! (timeouts, HTTP 408/429/5xx) are retried with bounded exponential
//! backoff before an error is reported.
//!
//! - account: [`HeyGenClient::get_remaining_credits`], [`HeyGenClient::get_user_info`]
//! - voices and avatars: [`HeyGenClient::get_voices`], [`HeyGenClient::list_avatar_groups`]
//! - videos: [`HeyGenClient::generate_avatar_video`], [`HeyGenClient::get_video_status`]
//! - templates, assets and folders
//!
//! The [`tools`] module exposes the same operations as JSON tool calls.

mod client;
mod error;
mod mapping;
mod options;
mod outcome;
mod request;
mod retry;
mod transport;
mod types;
mod wire;

pub mod tools;

#[cfg(feature = "raw-mode")]
pub mod raw;

pub use client::HeyGenClient;
pub use error::HeyGenError;
pub use options::ClientOptions;
pub use outcome::Outcome;
pub use request::{
    AvatarIvVideoRequest, Background, Character, Dimension, PlayStyle, TemplateVideoRequest,
    VideoGenerateRequest, VideoInput, VoiceInput,
};
pub use retry::{run_with_retry, BackoffPolicy, Classification};
pub use tools::{dispatch, dispatch_json, ToolCall};
pub use transport::{classify, is_retryable_status, Method, RequestDescriptor};
pub use types::{
    Asset, Assets, Avatar, AvatarDetails, AvatarGroup, AvatarGroups, AvatarSummary, Avatars,
    Credits, DeletedAsset, Folder, FolderRef, Folders, GroupAvatars, TemplateDetails,
    TemplateScene, TemplateSummary, TemplateVariable, Templates, UploadedAsset, UserInfo,
    VideoErrorDetails, VideoId, VideoJob, VideoList, VideoListItem, VideoStatus, VoiceInfo,
    Voices, MAX_VOICES, QUOTA_SECONDS_PER_CREDIT,
};

pub type Result<T> = std::result::Result<T, HeyGenError>;
