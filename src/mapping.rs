//! Conversion of raw response bodies into [`Outcome`]s.
//!
//! [`map_data`] handles calls whose success carries a payload; [`map_ack`]
//! handles calls where only the absence of an upstream error matters. The
//! per-operation transforms below are plain functions from a wire type to
//! an outward type.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::{
    types::{
        Assets, AvatarDetails, AvatarGroups, Avatars, Credits, Folders,
        GroupAvatars, TemplateDetails, TemplateScene, Templates, UploadedAsset, UserInfo,
        VideoErrorDetails, VideoId, VideoJob, VideoList, VideoStatus, Voices, MAX_VOICES,
        QUOTA_SECONDS_PER_CREDIT,
    },
    wire::{self, Envelope},
    Outcome, Result,
};

enum Payload<W> {
    Data(W),
    UpstreamError(String),
    Empty,
}

/// Maps a response whose success carries a `data` payload.
///
/// Order of precedence: transport failure, co-present data and error
/// (rejected), data, upstream error, `fallback`.
pub(crate) fn map_data<W, T, F>(raw: Result<JsonValue>, fallback: &str, transform: F) -> Outcome<T>
where
    W: DeserializeOwned,
    F: FnOnce(W) -> T,
{
    let raw = match raw {
        Ok(raw) => raw,
        Err(err) => return Outcome::from(err),
    };

    match extract::<W>(raw) {
        Ok(Payload::Data(data)) => Outcome::Data(transform(data)),
        Ok(Payload::UpstreamError(message)) => Outcome::error(message),
        Ok(Payload::Empty) => Outcome::error(fallback),
        Err(message) => Outcome::error(message),
    }
}

/// Maps a response where success only means "no upstream error".
pub(crate) fn map_ack<T>(raw: Result<JsonValue>, ack: T) -> Outcome<T> {
    let raw = match raw {
        Ok(raw) => raw,
        Err(err) => return Outcome::from(err),
    };

    match parse_envelope(raw) {
        Ok(envelope) => match envelope.error_text() {
            Some(message) => Outcome::error(message),
            None => Outcome::Data(ack),
        },
        Err(message) => Outcome::error(message),
    }
}

fn extract<W: DeserializeOwned>(raw: JsonValue) -> std::result::Result<Payload<W>, String> {
    let envelope = parse_envelope(raw)?;
    let error = envelope.error_text();

    match (envelope.payload(), error) {
        (Some(_), Some(error)) => Err(format!(
            "upstream response carried both data and error: {error}"
        )),
        (Some(data), None) => serde_json::from_value::<W>(data.clone())
            .map(Payload::Data)
            .map_err(shape_error),
        (None, Some(error)) => Ok(Payload::UpstreamError(error)),
        (None, None) => Ok(Payload::Empty),
    }
}

fn parse_envelope(raw: JsonValue) -> std::result::Result<Envelope, String> {
    if !raw.is_object() {
        return Err(shape_error("expected a JSON object"));
    }
    serde_json::from_value(raw).map_err(shape_error)
}

fn shape_error(err: impl std::fmt::Display) -> String {
    format!("unexpected response shape: {err}")
}

pub(crate) fn credits_from_quota(quota: wire::RemainingQuota) -> Credits {
    Credits {
        remaining_credits: quota.remaining_quota.div_euclid(QUOTA_SECONDS_PER_CREDIT),
    }
}

pub(crate) fn user_info_from_profile(profile: wire::UserProfile) -> UserInfo {
    UserInfo {
        username: profile.username,
        email: profile.email,
        first_name: profile.first_name,
        last_name: profile.last_name,
    }
}

pub(crate) fn voices_from_data(data: wire::VoicesData) -> Voices {
    let mut voices = data.voices;
    voices.truncate(MAX_VOICES);
    Voices { voices }
}

pub(crate) fn avatar_groups_from_data(data: wire::AvatarGroupListData) -> AvatarGroups {
    let total_count = data
        .total_count
        .unwrap_or(data.avatar_group_list.len() as u64);
    AvatarGroups {
        avatar_groups: data.avatar_group_list,
        total_count,
    }
}

pub(crate) fn group_avatars_from_data(data: wire::AvatarsInGroupData) -> GroupAvatars {
    GroupAvatars {
        avatars: data.avatar_list,
    }
}

pub(crate) fn avatars_from_data(data: wire::AvatarsData) -> Avatars {
    Avatars {
        total_count: data.avatars.len(),
        avatars: data.avatars,
    }
}

pub(crate) fn avatar_details_from_data(details: AvatarDetails) -> AvatarDetails {
    details
}

pub(crate) fn video_job_from_data(data: wire::VideoGenerateData) -> VideoJob {
    VideoJob {
        video_id: data.video_id,
        task_id: data.task_id,
        video_url: data.video_url,
        status: data.status,
    }
}

pub(crate) fn video_id_from_data(data: wire::VideoIdData) -> VideoId {
    VideoId {
        video_id: data.video_id,
    }
}

pub(crate) fn video_status_from_data(data: wire::VideoStatusData) -> VideoStatus {
    VideoStatus {
        video_id: data.id,
        status: data.status,
        duration: data.duration,
        video_url: data.video_url,
        gif_url: data.gif_url,
        thumbnail_url: data.thumbnail_url,
        created_at: data.created_at,
        error_details: data.error.map(|error| VideoErrorDetails {
            code: error.code,
            message: error.message,
            detail: error.detail,
        }),
    }
}

pub(crate) fn video_list_from_data(data: wire::VideoListData) -> VideoList {
    VideoList {
        total: data.videos.len(),
        videos: data.videos,
        token: data.token,
    }
}

pub(crate) fn templates_from_data(data: wire::TemplatesData) -> Templates {
    Templates {
        total_count: data.templates.len(),
        templates: data.templates,
    }
}

pub(crate) fn template_details_from_data(data: wire::TemplateDetailsData) -> TemplateDetails {
    TemplateDetails {
        template_id: data.template_id,
        name: data.name,
        thumbnail_image_url: data.thumbnail_image_url,
        variables: data.variables,
        scenes: data.scenes.map(|scenes| {
            scenes
                .into_iter()
                .map(|scene| TemplateScene {
                    scene_id: scene.scene_id,
                    variables: scene.variables,
                })
                .collect()
        }),
    }
}

pub(crate) fn uploaded_asset_from_data(data: wire::AssetUploadData) -> UploadedAsset {
    UploadedAsset {
        asset_id: data.asset_id,
        url: data.url,
    }
}

pub(crate) fn assets_from_data(data: wire::AssetListData) -> Assets {
    Assets {
        assets: data.assets,
        total: data.total,
    }
}

pub(crate) fn folders_from_data(data: wire::FolderListData) -> Folders {
    Folders {
        folders: data.folders,
        total: data.total,
        token: data.token,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{credits_from_quota, map_ack, map_data, voices_from_data};
    use crate::{
        types::{Credits, Voices},
        wire, HeyGenError, Outcome,
    };

    fn credits(raw: serde_json::Value) -> Outcome<Credits> {
        map_data(Ok(raw), "No quota information found.", credits_from_quota)
    }

    #[test]
    fn quota_converts_seconds_to_whole_credits() {
        for (seconds, expected) in [(0, 0), (59, 0), (60, 1), (119, 1), (7_230, 120)] {
            let outcome = credits(json!({"data": {"remaining_quota": seconds}}));
            assert_eq!(
                outcome,
                Outcome::Data(Credits {
                    remaining_credits: expected
                })
            );
        }
    }

    #[test]
    fn upstream_error_is_propagated_verbatim() {
        let outcome = credits(json!({"data": null, "error": "Invalid API key"}));
        assert_eq!(outcome, Outcome::Error("Invalid API key".to_owned()));
    }

    #[test]
    fn neither_data_nor_error_yields_fallback() {
        let outcome = credits(json!({"code": 100, "message": "Success"}));
        assert_eq!(
            outcome,
            Outcome::Error("No quota information found.".to_owned())
        );

        let outcome = credits(json!({"data": {}, "error": null}));
        assert_eq!(
            outcome,
            Outcome::Error("No quota information found.".to_owned())
        );
    }

    #[test]
    fn co_present_data_and_error_is_rejected() {
        let outcome = credits(json!({
            "data": {"remaining_quota": 600},
            "error": "quota service degraded"
        }));
        let message = outcome.as_error().expect("must be an error");
        assert!(message.contains("both data and error"));
        assert!(message.contains("quota service degraded"));
    }

    #[test]
    fn wrong_shape_becomes_generic_error() {
        let outcome = credits(json!({"data": {"remaining_quota": "lots"}}));
        let message = outcome.as_error().expect("must be an error");
        assert!(message.starts_with("unexpected response shape"));

        let outcome = credits(json!(["not", "an", "object"]));
        assert!(outcome
            .as_error()
            .expect("must be an error")
            .starts_with("unexpected response shape"));
    }

    #[test]
    fn transport_failure_becomes_error() {
        let outcome: Outcome<Credits> = map_data(
            Err(HeyGenError::RetriesExhausted {
                attempts: 3,
                last_error: "request timed out".to_owned(),
            }),
            "unused",
            credits_from_quota,
        );
        assert_eq!(
            outcome.as_error(),
            Some("request failed after 3 attempts: request timed out")
        );
    }

    #[test]
    fn voices_are_capped_preserving_order() {
        let voices: Vec<_> = (0..150)
            .map(|i| json!({"voice_id": format!("v{i}"), "name": format!("Voice {i}")}))
            .collect();
        let outcome: Outcome<Voices> = map_data(
            Ok(json!({"data": {"voices": voices}})),
            "No voices found.",
            voices_from_data,
        );

        let voices = outcome.into_data().expect("must have data").voices;
        assert_eq!(voices.len(), 100);
        assert_eq!(voices[0].voice_id, "v0");
        assert_eq!(voices[99].voice_id, "v99");
    }

    #[test]
    fn ack_succeeds_without_payload() {
        let outcome = map_ack(Ok(json!({"code": 100, "data": null})), "asset_1");
        assert_eq!(outcome, Outcome::Data("asset_1"));

        let outcome = map_ack(Ok(json!({"error": {"message": "asset not found"}})), "asset_1");
        assert_eq!(outcome, Outcome::Error("asset not found".to_owned()));
    }

    #[test]
    fn typed_transform_is_applied() {
        let outcome = map_data::<wire::VideoIdData, _, _>(
            Ok(json!({"data": {"video_id": "vid_7"}})),
            "Failed to generate video from template.",
            super::video_id_from_data,
        );
        assert_eq!(
            outcome.into_data().map(|data| data.video_id).as_deref(),
            Some("vid_7")
        );
    }
}
