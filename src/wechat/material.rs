//! Permanent material upload and listing.

use std::path::Path;

use reqwest::blocking::multipart::Form;

use super::error::{Error, Result};
use super::types::{
    AddMaterialResponse, MaterialItem, MaterialPage, MaterialType, PermanentMaterial,
    UploadImageResponse,
};
use super::WechatClient;

/// Page size bounds imposed by the platform.
const MAX_PAGE_SIZE: u8 = 20;

impl WechatClient {
    /// Upload an image for use inside article HTML.
    ///
    /// Returns the hosted URL. Article bodies may only reference images
    /// served from this URL space; external image URLs get filtered.
    pub fn upload_article_image(&self, image_path: &Path) -> Result<String> {
        let url = self.endpoint("media/uploadimg")?;
        let form = Form::new()
            .file("media", image_path)
            .map_err(|e| Error::Io(image_path.to_path_buf(), e))?;

        let response: UploadImageResponse =
            self.http.post(&url).multipart(form).send()?.json()?;
        response.status.ensure_ok()?;
        let hosted = response
            .url
            .ok_or_else(|| Error::api(None, Some("uploadimg returned no url".to_string())))?;
        log::debug!("uploaded article image: {hosted}");
        Ok(hosted)
    }

    /// Upload an image as permanent material.
    ///
    /// The returned `media_id` is what drafts reference as
    /// `thumb_media_id`.
    pub fn add_material(&self, image_path: &Path) -> Result<PermanentMaterial> {
        let url = format!("{}&type=image", self.endpoint("material/add_material")?);
        let form = Form::new()
            .file("media", image_path)
            .map_err(|e| Error::Io(image_path.to_path_buf(), e))?;

        let response: AddMaterialResponse =
            self.http.post(&url).multipart(form).send()?.json()?;
        response.status.ensure_ok()?;
        match (response.media_id, response.url) {
            (Some(media_id), Some(url)) => {
                log::debug!("uploaded permanent material: {media_id}");
                Ok(PermanentMaterial { media_id, url })
            }
            _ => Err(Error::api(
                None,
                Some("add_material returned no media_id/url".to_string()),
            )),
        }
    }

    /// List all permanent materials of one type, walking every page.
    ///
    /// `page_size` is clamped to the platform's 1..=20 window. An error on
    /// any page aborts the walk; partial pages are not returned as a
    /// complete listing.
    pub fn material_list(
        &self,
        material_type: MaterialType,
        page_size: u8,
    ) -> Result<Vec<MaterialItem>> {
        let count = page_size.clamp(1, MAX_PAGE_SIZE);
        let url = self.endpoint("material/batchget_material")?;

        let mut items = Vec::new();
        let mut offset: u64 = 0;
        loop {
            let body = serde_json::json!({
                "type": material_type,
                "offset": offset,
                "count": count,
            });
            let page: MaterialPage = self.http.post(&url).json(&body).send()?.json()?;
            page.status.ensure_ok()?;
            items.extend(page.item);

            match next_offset(offset, count, page.total_count) {
                Some(next) => offset = next,
                None => break,
            }
        }
        log::debug!("listed {} permanent material(s)", items.len());
        Ok(items)
    }
}

/// Advance pagination by one page; `None` when every item is fetched.
fn next_offset(offset: u64, count: u8, total_count: Option<u64>) -> Option<u64> {
    let next = offset + u64::from(count);
    match total_count {
        Some(total) if next < total => Some(next),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::next_offset;

    #[test]
    fn test_single_page_terminates() {
        assert_eq!(next_offset(0, 20, Some(10)), None);
        assert_eq!(next_offset(0, 20, Some(20)), None);
    }

    #[test]
    fn test_walks_pages_until_total() {
        assert_eq!(next_offset(0, 20, Some(45)), Some(20));
        assert_eq!(next_offset(20, 20, Some(45)), Some(40));
        assert_eq!(next_offset(40, 20, Some(45)), None);
    }

    #[test]
    fn test_missing_total_terminates() {
        assert_eq!(next_offset(0, 20, None), None);
    }

    #[test]
    fn test_empty_listing_terminates() {
        assert_eq!(next_offset(0, 20, Some(0)), None);
    }
}
