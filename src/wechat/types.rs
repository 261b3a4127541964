//! Serde payload types for the WeChat CMS API.
//!
//! Field names follow the wire format exactly; the platform rejects
//! unknown spellings silently in places, so nothing is renamed.

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// `errcode`/`errmsg` pair present on every failure body (and, as zero /
/// empty, on some success bodies). Flattened into response envelopes.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiStatus {
    #[serde(default)]
    pub errcode: Option<i64>,
    #[serde(default)]
    pub errmsg: Option<String>,
}

impl ApiStatus {
    /// Error out on a non-zero `errcode`.
    pub fn ensure_ok(&self) -> Result<()> {
        match self.errcode {
            None | Some(0) => Ok(()),
            Some(code) => Err(Error::Api {
                errcode: code,
                errmsg: self.errmsg.clone().unwrap_or_default(),
            }),
        }
    }
}

/// One article in a draft. Content is HTML; image URLs inside it must
/// come from [`upload_article_image`](super::WechatClient::upload_article_image),
/// external URLs get filtered by the platform.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub title: String,
    /// Shown for single-article drafts only; empty means the platform
    /// takes the first 54 characters of the body.
    pub digest: String,
    pub author: String,
    pub content: String,
    /// URL behind the "read the original" link; may be empty.
    pub content_source_url: String,
    /// Cover image, must be a permanent material `media_id`.
    pub thumb_media_id: String,
    /// 1 opens the comment section, 0 keeps it closed.
    pub need_open_comment: u8,
    /// 1 restricts comments to followers.
    pub only_fans_can_comment: u8,
}

impl Article {
    /// New article with comments open to everyone and the remaining
    /// optional fields empty.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        thumb_media_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            digest: String::new(),
            author: String::new(),
            content: content.into(),
            content_source_url: String::new(),
            thumb_media_id: thumb_media_id.into(),
            need_open_comment: 1,
            only_fans_can_comment: 0,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = digest.into();
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.content_source_url = url.into();
        self
    }

    pub fn with_comments(mut self, open: bool, fans_only: bool) -> Self {
        self.need_open_comment = open.into();
        self.only_fans_can_comment = fans_only.into();
        self
    }
}

/// Permanent material type for listing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Image,
    Video,
    Voice,
    News,
}

/// One permanent material entry.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialItem {
    pub media_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub update_time: Option<u64>,
    /// Populated for `news` materials only.
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

/// Result of uploading a permanent image material.
#[derive(Debug, Clone, Deserialize)]
pub struct PermanentMaterial {
    pub media_id: String,
    pub url: String,
}

/// One entry from the draft box.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftItem {
    pub media_id: String,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub update_time: Option<u64>,
}

// -----------------------------------------------------------------------------
// Response envelopes (crate-internal)
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadImageResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddMaterialResponse {
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MaterialPage {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub item: Vec<MaterialItem>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DraftPage {
    #[serde(default)]
    pub item: Vec<DraftItem>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct DraftRequest<'a> {
    pub articles: &'a [Article],
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddDraftResponse {
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PublishResponse {
    #[serde(default)]
    pub publish_id: Option<u64>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_wire_field_names() {
        let article = Article::new("t", "<p>c</p>", "MEDIA_ID").with_author("a");
        let json: serde_json::Value = serde_json::to_value(&article).unwrap();
        let object = json.as_object().unwrap();
        for field in [
            "title",
            "digest",
            "author",
            "content",
            "content_source_url",
            "thumb_media_id",
            "need_open_comment",
            "only_fans_can_comment",
        ] {
            assert!(object.contains_key(field), "missing field `{field}`");
        }
        assert_eq!(json["need_open_comment"], 1);
        assert_eq!(json["only_fans_can_comment"], 0);
    }

    #[test]
    fn test_article_serializes_utf8_unescaped() {
        let article = Article::new("发布测试", "<p>正文</p>", "id");
        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("发布测试"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_material_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&MaterialType::Image).unwrap(),
            "\"image\""
        );
        assert_eq!(
            serde_json::to_string(&MaterialType::News).unwrap(),
            "\"news\""
        );
    }

    #[test]
    fn test_api_status_ensure_ok() {
        assert!(ApiStatus::default().ensure_ok().is_ok());
        assert!(
            ApiStatus {
                errcode: Some(0),
                errmsg: None
            }
            .ensure_ok()
            .is_ok()
        );

        let err = ApiStatus {
            errcode: Some(40001),
            errmsg: Some("invalid credential".to_string()),
        }
        .ensure_ok()
        .unwrap_err();
        assert!(matches!(err, Error::Api { errcode: 40001, .. }));
    }

    #[test]
    fn test_material_page_deserializes_error_body() {
        let page: MaterialPage =
            serde_json::from_str(r#"{"errcode":40007,"errmsg":"invalid media type"}"#).unwrap();
        assert!(page.item.is_empty());
        assert!(page.status.ensure_ok().is_err());
    }

    #[test]
    fn test_token_response_success_body() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"TOKEN","expires_in":7200}"#).unwrap();
        assert_eq!(response.access_token.as_deref(), Some("TOKEN"));
        assert!(response.status.ensure_ok().is_ok());
    }
}
