use std::fmt;
use std::path::Path;

use serde_json::{json, Value as JsonValue};

use crate::{
    mapping::{self, map_ack, map_data},
    transport::{RequestDescriptor, Transport},
    types::{
        Assets, AvatarDetails, AvatarGroups, Avatars, Credits, DeletedAsset, FolderRef, Folders,
        GroupAvatars, TemplateDetails, Templates, UploadedAsset, UserInfo, VideoId, VideoJob,
        VideoList, VideoStatus, Voices,
    },
    wire, AvatarIvVideoRequest, ClientOptions, HeyGenError, Outcome, Result,
    TemplateVideoRequest, VideoGenerateRequest,
};

/// HTTP client for the HeyGen API.
///
/// Construct once and pass it to every call site. Clones share one
/// connection pool and one read-only configuration.
#[derive(Clone)]
pub struct HeyGenClient {
    transport: Transport,
}

impl fmt::Debug for HeyGenClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeyGenClient")
            .field("transport", &self.transport)
            .finish()
    }
}

impl HeyGenClient {
    /// Creates a client authenticating with `api_key` via `X-Api-Key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(api_key.into().trim().to_owned()),
        }
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `HEYGEN_API_KEY`: API key (required)
    /// - `HEYGEN_BASE_URL`: API base URL override (optional)
    /// - the retry/timeout overrides documented on [`ClientOptions::from_env`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use heygen_http::HeyGenClient;
    ///
    /// let client = HeyGenClient::from_env().expect("HEYGEN_API_KEY must be set");
    /// ```
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("HEYGEN_API_KEY").map_err(|_| {
            HeyGenError::Config("missing HEYGEN_API_KEY environment variable".to_owned())
        })?;
        if api_key.trim().is_empty() {
            return Err(HeyGenError::Config(
                "HEYGEN_API_KEY is set but empty".to_owned(),
            ));
        }

        let mut client = Self::new(api_key).with_options(ClientOptions::from_env()?);
        if let Ok(base_url) = std::env::var("HEYGEN_BASE_URL") {
            if !base_url.trim().is_empty() {
                client = client.with_base_url(base_url.trim());
            }
        }
        Ok(client)
    }

    /// Applies timeout and retry options.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.transport.options = opts;
        self
    }

    /// Overrides the API base URL (default `https://api.heygen.com`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.transport.set_base_url(base_url.into());
        self
    }

    /// Overrides the asset upload URL (default `https://upload.heygen.com/v1/asset`).
    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.transport.set_upload_url(upload_url.into());
        self
    }

    /// Timeout and retry options in effect.
    pub fn options(&self) -> &ClientOptions {
        &self.transport.options
    }

    /// API base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Releases the client and its connection pool.
    ///
    /// Other clones keep the pool alive until they are dropped too.
    pub fn close(self) {
        tracing::debug!(base_url = %self.base_url(), "closing HeyGen client");
        drop(self);
    }

    #[cfg(feature = "raw-mode")]
    /// Executes any descriptor and returns the undecoded JSON body.
    ///
    /// Goes through the same retry pipeline as the typed operations.
    pub async fn raw(&self, descriptor: &RequestDescriptor) -> Result<crate::raw::RawResponse> {
        self.transport
            .execute(descriptor)
            .await
            .map(crate::raw::RawResponse)
    }

    async fn call(&self, descriptor: RequestDescriptor) -> Result<JsonValue> {
        self.transport.execute(&descriptor).await
    }

    // ---- account ----------------------------------------------------------

    /// Remaining credits; one credit is 60 seconds of quota.
    pub async fn get_remaining_credits(&self) -> Outcome<Credits> {
        let raw = self
            .call(RequestDescriptor::get(["v2", "user", "remaining_quota"]))
            .await;
        map_data::<wire::RemainingQuota, _, _>(
            raw,
            "No quota information found.",
            mapping::credits_from_quota,
        )
    }

    /// Profile of the account owning the API key.
    pub async fn get_user_info(&self) -> Outcome<UserInfo> {
        let raw = self.call(RequestDescriptor::get(["v1", "user", "me"])).await;
        map_data::<wire::UserProfile, _, _>(
            raw,
            "No user information found.",
            mapping::user_info_from_profile,
        )
    }

    // ---- voices and avatars -----------------------------------------------

    /// Available voices, at most [`MAX_VOICES`](crate::MAX_VOICES) of them.
    pub async fn get_voices(&self) -> Outcome<Voices> {
        let raw = self.call(RequestDescriptor::get(["v2", "voices"])).await;
        map_data::<wire::VoicesData, _, _>(raw, "No voices found.", mapping::voices_from_data)
    }

    /// Avatar groups, optionally including public ones.
    pub async fn list_avatar_groups(&self, include_public: bool) -> Outcome<AvatarGroups> {
        let descriptor = RequestDescriptor::get(["v2", "avatar_group.list"])
            .with_query("include_public", include_public.to_string());
        let raw = self.call(descriptor).await;
        map_data::<wire::AvatarGroupListData, _, _>(
            raw,
            "No avatar groups found.",
            mapping::avatar_groups_from_data,
        )
    }

    /// Avatars belonging to one avatar group.
    pub async fn get_avatars_in_group(&self, group_id: &str) -> Outcome<GroupAvatars> {
        let raw = self
            .call(RequestDescriptor::get([
                "v2",
                "avatar_group",
                group_id,
                "avatars",
            ]))
            .await;
        map_data::<wire::AvatarsInGroupData, _, _>(
            raw,
            "No avatars found in the group.",
            mapping::group_avatars_from_data,
        )
    }

    /// All avatars available to the account.
    pub async fn list_avatars(&self) -> Outcome<Avatars> {
        let raw = self.call(RequestDescriptor::get(["v2", "avatars"])).await;
        map_data::<wire::AvatarsData, _, _>(raw, "No avatars found.", mapping::avatars_from_data)
    }

    /// Details of one avatar.
    pub async fn get_avatar_details(&self, avatar_id: &str) -> Outcome<AvatarDetails> {
        let raw = self
            .call(RequestDescriptor::get(["v2", "avatar", avatar_id, "details"]))
            .await;
        map_data::<AvatarDetails, _, _>(
            raw,
            "Avatar not found.",
            mapping::avatar_details_from_data,
        )
    }

    // ---- videos -------------------------------------------------------------

    /// Starts rendering an avatar video. Poll [`get_video_status`](Self::get_video_status).
    pub async fn generate_avatar_video(&self, request: &VideoGenerateRequest) -> Outcome<VideoJob> {
        let body = match serde_json::to_value(request) {
            Ok(body) => body,
            Err(err) => return Outcome::error(format!("invalid video request: {err}")),
        };
        let raw = self
            .call(RequestDescriptor::post(["v2", "video", "generate"], Some(body)))
            .await;
        map_data::<wire::VideoGenerateData, _, _>(
            raw,
            "No video generation data returned.",
            mapping::video_job_from_data,
        )
    }

    /// Starts rendering a talking video from an uploaded photo.
    pub async fn generate_avatar_iv_video(&self, request: &AvatarIvVideoRequest) -> Outcome<VideoId> {
        let body = match serde_json::to_value(request) {
            Ok(body) => body,
            Err(err) => return Outcome::error(format!("invalid Avatar IV request: {err}")),
        };
        let raw = self
            .call(RequestDescriptor::post(
                ["v2", "video", "av4", "generate"],
                Some(body),
            ))
            .await;
        map_data::<wire::VideoIdData, _, _>(
            raw,
            "No video ID returned from Avatar IV generation.",
            mapping::video_id_from_data,
        )
    }

    /// Rendering status of a video, with URLs once completed.
    pub async fn get_video_status(&self, video_id: &str) -> Outcome<VideoStatus> {
        let descriptor =
            RequestDescriptor::get(["v1", "video_status.get"]).with_query("video_id", video_id);
        let raw = self.call(descriptor).await;
        map_data::<wire::VideoStatusData, _, _>(
            raw,
            "No video status returned.",
            mapping::video_status_from_data,
        )
    }

    /// Lists videos, one page at a time. Pass the returned token for the next page.
    pub async fn list_videos(&self, token: Option<&str>) -> Outcome<VideoList> {
        let mut descriptor = RequestDescriptor::get(["v1", "video.list"]);
        if let Some(token) = token.filter(|token| !token.is_empty()) {
            descriptor = descriptor.with_query("token", token);
        }
        let raw = self.call(descriptor).await;
        map_data::<wire::VideoListData, _, _>(
            raw,
            "Failed to list videos.",
            mapping::video_list_from_data,
        )
    }

    // ---- templates ----------------------------------------------------------

    /// Templates available to the account.
    pub async fn list_templates(&self) -> Outcome<Templates> {
        let raw = self.call(RequestDescriptor::get(["v2", "templates"])).await;
        map_data::<wire::TemplatesData, _, _>(
            raw,
            "No templates found.",
            mapping::templates_from_data,
        )
    }

    /// Variables and scenes of one template.
    pub async fn get_template_details(&self, template_id: &str) -> Outcome<TemplateDetails> {
        let raw = self
            .call(RequestDescriptor::get(["v3", "template", template_id]))
            .await;
        map_data::<wire::TemplateDetailsData, _, _>(
            raw,
            "Template not found.",
            mapping::template_details_from_data,
        )
    }

    /// Starts rendering a video from a template with substituted variables.
    pub async fn generate_video_from_template(
        &self,
        template_id: &str,
        request: &TemplateVideoRequest,
    ) -> Outcome<VideoId> {
        let body = match serde_json::to_value(request) {
            Ok(body) => body,
            Err(err) => return Outcome::error(format!("invalid template request: {err}")),
        };
        let raw = self
            .call(RequestDescriptor::post(
                ["v2", "template", template_id, "generate"],
                Some(body),
            ))
            .await;
        map_data::<wire::VideoIdData, _, _>(
            raw,
            "Failed to generate video from template.",
            mapping::video_id_from_data,
        )
    }

    // ---- assets -------------------------------------------------------------

    /// Uploads an image, video, or audio file.
    ///
    /// A missing file is reported without contacting the API.
    pub async fn upload_asset(&self, file_path: impl AsRef<Path>) -> Outcome<UploadedAsset> {
        let raw = self.transport.execute_upload(file_path.as_ref()).await;
        map_data::<wire::AssetUploadData, _, _>(
            raw,
            "Upload failed: No data returned.",
            mapping::uploaded_asset_from_data,
        )
    }

    /// Uploaded assets.
    pub async fn list_assets(&self) -> Outcome<Assets> {
        let raw = self
            .call(RequestDescriptor::get(["v1", "asset", "list"]))
            .await;
        map_data::<wire::AssetListData, _, _>(
            raw,
            "Failed to list assets.",
            mapping::assets_from_data,
        )
    }

    /// Deletes an uploaded asset.
    pub async fn delete_asset(&self, asset_id: &str) -> Outcome<DeletedAsset> {
        let raw = self
            .call(RequestDescriptor::post(
                ["v1", "asset", asset_id, "delete"],
                None,
            ))
            .await;
        map_ack(
            raw,
            DeletedAsset {
                asset_id: asset_id.to_owned(),
            },
        )
    }

    // ---- folders ------------------------------------------------------------

    /// Folders of the account.
    pub async fn list_folders(&self) -> Outcome<Folders> {
        let raw = self.call(RequestDescriptor::get(["v1", "folders"])).await;
        map_data::<wire::FolderListData, _, _>(
            raw,
            "Failed to list folders.",
            mapping::folders_from_data,
        )
    }

    /// Creates a folder and returns its id.
    pub async fn create_folder(&self, name: &str) -> Outcome<FolderRef> {
        let raw = self
            .call(RequestDescriptor::post(
                ["v1", "folders", "create"],
                Some(json!({ "name": name })),
            ))
            .await;
        map_data::<wire::FolderData, _, _>(raw, "Failed to create folder.", |folder| FolderRef {
            folder_id: folder.id,
        })
    }

    /// Renames a folder.
    pub async fn rename_folder(&self, folder_id: &str, name: &str) -> Outcome<FolderRef> {
        let raw = self
            .call(RequestDescriptor::post(
                ["v1", "folders", folder_id],
                Some(json!({ "name": name })),
            ))
            .await;
        map_ack(raw, folder_ref(folder_id))
    }

    /// Moves a folder to the trash.
    pub async fn trash_folder(&self, folder_id: &str) -> Outcome<FolderRef> {
        let raw = self
            .call(RequestDescriptor::post(
                ["v1", "folders", folder_id, "trash"],
                None,
            ))
            .await;
        map_ack(raw, folder_ref(folder_id))
    }

    /// Restores a folder from the trash.
    pub async fn restore_folder(&self, folder_id: &str) -> Outcome<FolderRef> {
        let raw = self
            .call(RequestDescriptor::post(
                ["v1", "folders", folder_id, "restore"],
                None,
            ))
            .await;
        map_ack(raw, folder_ref(folder_id))
    }
}

fn folder_ref(folder_id: &str) -> FolderRef {
    FolderRef {
        folder_id: folder_id.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::HeyGenClient;
    use crate::ClientOptions;

    #[test]
    fn debug_redacts_api_key() {
        let client = HeyGenClient::new("secret-token");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn builder_overrides_apply() {
        let options = ClientOptions {
            max_attempts: 5,
            ..ClientOptions::default()
        };
        let client = HeyGenClient::new("key")
            .with_base_url("http://127.0.0.1:9")
            .with_options(options.clone());
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
        assert_eq!(client.options(), &options);
    }
}
