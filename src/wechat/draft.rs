//! Draft-box management and publishing.

use super::error::{Error, Result};
use super::types::{AddDraftResponse, Article, DraftItem, DraftPage, DraftRequest, PublishResponse};
use super::WechatClient;

impl WechatClient {
    /// Fetch one page of the draft box.
    pub fn list_drafts(&self, offset: u64, count: u8) -> Result<Vec<DraftItem>> {
        let url = self.endpoint("draft/batchget")?;
        let body = serde_json::json!({
            "offset": offset,
            "count": count.clamp(1, 20),
        });
        let page: DraftPage = self.http.post(&url).json(&body).send()?.json()?;
        page.status.ensure_ok()?;
        Ok(page.item)
    }

    /// Create a draft from one or more articles and return its `media_id`.
    ///
    /// The body goes over the wire as plain UTF-8 JSON, so CJK titles and
    /// content arrive unescaped.
    pub fn add_draft(&self, articles: &[Article]) -> Result<String> {
        let url = self.endpoint("draft/add")?;
        let request = DraftRequest { articles };
        let response: AddDraftResponse = self.http.post(&url).json(&request).send()?.json()?;
        response.status.ensure_ok()?;
        match response.media_id {
            Some(media_id) => {
                log::debug!("created draft: {media_id}");
                Ok(media_id)
            }
            None => Err(Error::api(
                None,
                Some("draft/add returned no media_id".to_string()),
            )),
        }
    }

    /// Submit a draft for publication and return the `publish_id`.
    ///
    /// Publication is asynchronous platform-side; the id identifies the
    /// submission, not a live article.
    pub fn publish_draft(&self, media_id: &str) -> Result<u64> {
        let url = self.endpoint("freepublish/submit")?;
        let body = serde_json::json!({ "media_id": media_id });
        let response: PublishResponse = self.http.post(&url).json(&body).send()?.json()?;
        response.status.ensure_ok()?;
        Ok(response.publish_id.unwrap_or_default())
    }
}
