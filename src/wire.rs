use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::types::{
    Asset, Avatar, AvatarGroup, AvatarSummary, Folder, TemplateSummary, TemplateVariable,
    VideoListItem, VoiceInfo,
};

/// Common shape of every HeyGen response body.
///
/// v1 endpoints answer `{code, data, message}`, v2 and v3 answer
/// `{error, data}`; both fit here.
#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Option<JsonValue>,
    #[serde(default)]
    pub error: Option<JsonValue>,
}

impl Envelope {
    /// Upstream error text, if the body carries a non-empty one.
    ///
    /// Accepts a plain string or an object with a `message` field.
    pub fn error_text(&self) -> Option<String> {
        let text = match self.error.as_ref()? {
            JsonValue::String(text) => text.clone(),
            JsonValue::Object(map) => match map.get("message") {
                Some(JsonValue::String(text)) => text.clone(),
                _ => JsonValue::Object(map.clone()).to_string(),
            },
            JsonValue::Null => return None,
            other => other.to_string(),
        };
        (!text.trim().is_empty()).then_some(text)
    }

    /// Payload, if present and non-empty.
    pub fn payload(&self) -> Option<&JsonValue> {
        self.data.as_ref().filter(|data| !is_empty_payload(data))
    }
}

pub(crate) fn is_empty_payload(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::String(text) => text.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
pub struct RemainingQuota {
    pub remaining_quota: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoicesData {
    #[serde(default)]
    pub voices: Vec<VoiceInfo>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarGroupListData {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub avatar_group_list: Vec<AvatarGroup>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarsInGroupData {
    #[serde(default)]
    pub avatar_list: Vec<Avatar>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarsData {
    #[serde(default)]
    pub avatars: Vec<AvatarSummary>,
}

/// `video/generate` answers with a loose object.
#[derive(Debug, Deserialize)]
pub struct VideoGenerateData {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoIdData {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoStatusData {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub gif_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub error: Option<VideoStatusError>,
}

#[derive(Debug, Deserialize)]
pub struct VideoStatusError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoListData {
    #[serde(default)]
    pub videos: Vec<VideoListItem>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TemplatesData {
    #[serde(default)]
    pub templates: Vec<TemplateSummary>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateDetailsData {
    #[serde(default, alias = "id")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub thumbnail_image_url: Option<String>,
    #[serde(default, deserialize_with = "variables_list_or_map")]
    pub variables: Option<Vec<TemplateVariable>>,
    #[serde(default)]
    pub scenes: Option<Vec<TemplateSceneData>>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateSceneData {
    #[serde(default, alias = "id")]
    pub scene_id: Option<String>,
    #[serde(default, deserialize_with = "variables_list_or_map")]
    pub variables: Option<Vec<TemplateVariable>>,
}

#[derive(Debug, Deserialize)]
pub struct AssetUploadData {
    #[serde(default, alias = "id")]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssetListData {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct FolderListData {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FolderData {
    pub id: String,
}

/// Template variables arrive either as a list or keyed by name.
fn variables_list_or_map<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<TemplateVariable>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        List(Vec<TemplateVariable>),
        Map(serde_json::Map<String, JsonValue>),
    }

    let shape = Option::<Shape>::deserialize(deserializer)?;
    let Some(shape) = shape else {
        return Ok(None);
    };

    match shape {
        Shape::List(list) => Ok(Some(list)),
        Shape::Map(map) => map
            .into_iter()
            .map(|(key, mut value)| {
                if let JsonValue::Object(fields) = &mut value {
                    fields
                        .entry("name")
                        .or_insert_with(|| JsonValue::String(key.clone()));
                }
                serde_json::from_value::<TemplateVariable>(value)
                    .map_err(|err| serde::de::Error::custom(format!("variable '{key}': {err}")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Envelope, TemplateDetailsData};

    fn envelope(value: serde_json::Value) -> Envelope {
        serde_json::from_value(value).expect("envelope must parse")
    }

    #[test]
    fn error_text_accepts_string_and_object() {
        assert_eq!(
            envelope(json!({"error": "bad key"})).error_text().as_deref(),
            Some("bad key")
        );
        assert_eq!(
            envelope(json!({"error": {"code": 400, "message": "invalid id"}}))
                .error_text()
                .as_deref(),
            Some("invalid id")
        );
        assert_eq!(envelope(json!({"error": null})).error_text(), None);
        assert_eq!(envelope(json!({"error": "  "})).error_text(), None);
    }

    #[test]
    fn empty_payloads_are_ignored() {
        assert!(envelope(json!({"data": {}})).payload().is_none());
        assert!(envelope(json!({"data": []})).payload().is_none());
        assert!(envelope(json!({"data": null})).payload().is_none());
        assert!(envelope(json!({"code": 100})).payload().is_none());
        assert!(envelope(json!({"data": {"x": 1}})).payload().is_some());
    }

    #[test]
    fn template_variables_from_map_take_key_as_name() {
        let data: TemplateDetailsData = serde_json::from_value(json!({
            "id": "tpl_1",
            "variables": {
                "headline": { "type": "text", "properties": { "content": "Hi" } }
            }
        }))
        .expect("must parse");

        assert_eq!(data.template_id.as_deref(), Some("tpl_1"));
        let variables = data.variables.expect("variables present");
        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0].name, "headline");
        assert_eq!(variables[0].variable_type, "text");
    }

    #[test]
    fn template_variables_from_list() {
        let data: TemplateDetailsData = serde_json::from_value(json!({
            "template_id": "tpl_2",
            "variables": [ { "name": "logo", "type": "image" } ]
        }))
        .expect("must parse");

        let variables = data.variables.expect("variables present");
        assert_eq!(variables[0].name, "logo");
    }
}
