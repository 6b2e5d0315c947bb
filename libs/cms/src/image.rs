//! Image URL builder for CMS image references
//!
//! An image field in a document is an object such as
//! `{"_type": "image", "asset": {"_ref": "image-Tb9Ew8CX-2000x3000-jpg"}}`.
//! The asset id encodes the file name, dimensions and format, which is enough
//! to build a CDN URL without another round trip.

use serde_json::Value;

/// Thumbnail width used for cards and news items
pub const THUMBNAIL_WIDTH: u32 = 600;
/// Backdrop width used for hero banners and the player poster
pub const BACKDROP_WIDTH: u32 = 1920;
/// Quality of the live section cover image
pub const COVER_QUALITY: u8 = 80;

/// Builds resolvable image URLs from opaque image references
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    base: String,
}

impl ImageUrlBuilder {
    pub fn new(image_host: &str, project_id: &str, dataset: &str) -> Self {
        Self {
            base: format!(
                "{}/images/{}/{}",
                image_host.trim_end_matches('/'),
                project_id,
                dataset
            ),
        }
    }

    /// Build a URL for `source` at the given width and optional quality.
    ///
    /// Returns `None` when the reference is absent or cannot be understood.
    pub fn url(&self, source: &Value, width: u32, quality: Option<u8>) -> Option<String> {
        let base_url = match source {
            Value::String(reference) => self.asset_url(reference)?,
            Value::Object(map) => match map.get("asset") {
                Some(Value::Object(asset)) => {
                    if let Some(Value::String(url)) = asset.get("url") {
                        url.clone()
                    } else {
                        let reference = asset
                            .get("_ref")
                            .or_else(|| asset.get("_id"))
                            .and_then(Value::as_str)?;
                        self.asset_url(reference)?
                    }
                }
                Some(Value::String(reference)) => self.asset_url(reference)?,
                _ => return None,
            },
            _ => return None,
        };

        let separator = if base_url.contains('?') { '&' } else { '?' };
        let mut url = format!("{}{}w={}", base_url, separator, width);
        if let Some(quality) = quality {
            url.push_str(&format!("&q={}", quality));
        }
        Some(url)
    }

    /// Turn `image-<id>-<w>x<h>-<format>` into the CDN file URL
    fn asset_url(&self, reference: &str) -> Option<String> {
        let rest = reference.strip_prefix("image-")?;
        let (rest, format) = rest.rsplit_once('-')?;
        let (id, dimensions) = rest.rsplit_once('-')?;
        let (w, h) = dimensions.split_once('x')?;

        let valid = !id.is_empty()
            && !format.is_empty()
            && w.parse::<u32>().is_ok()
            && h.parse::<u32>().is_ok();
        if !valid {
            return None;
        }

        Some(format!("{}/{}-{}.{}", self.base, id, dimensions, format))
    }
}
