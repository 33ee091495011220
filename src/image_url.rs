//! CDN URLs for CMS image references.
//!
//! Asset references encode the asset id, pixel dimensions and format:
//!
//! ```text
//! image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg
//!       └────────── id ────────┘ └ w×h ┘ └fmt┘
//! ```
//!
//! which map to `https://cdn.sanity.io/images/{project}/{dataset}/{id}-{w}x{h}.{fmt}`.
//!
//! Crop and hotspot are applied server-side by the CDN through a
//! `rect=left,top,width,height` parameter in source pixels. When both a width
//! and a height are requested, the rect is narrowed to the requested aspect
//! ratio and centred on the hotspot, clamped to the crop area.

use crate::model::{Crop, Hotspot, SanityImage};

const CDN_HOST: &str = "https://cdn.sanity.io";

/// Parsed `image-<id>-<w>x<h>-<fmt>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetId {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl AssetId {
    /// Parse an asset reference. Returns `None` for anything that is not an
    /// image reference with positive dimensions.
    pub fn parse(reference: &str) -> Option<AssetId> {
        let rest = reference.strip_prefix("image-")?;
        let (rest, format) = rest.rsplit_once('-')?;
        let (id, dims) = rest.rsplit_once('-')?;
        let (w, h) = dims.split_once('x')?;
        let width: u32 = w.parse().ok()?;
        let height: u32 = h.parse().ok()?;
        if id.is_empty() || format.is_empty() || width == 0 || height == 0 {
            return None;
        }
        Some(AssetId {
            id: id.to_string(),
            width,
            height,
            format: format.to_string(),
        })
    }
}

/// How the CDN fits the image into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Clip,
    Crop,
    Fill,
    FillMax,
    Max,
    Scale,
    Min,
}

impl Fit {
    fn as_str(self) -> &'static str {
        match self {
            Fit::Clip => "clip",
            Fit::Crop => "crop",
            Fit::Fill => "fill",
            Fit::FillMax => "fillmax",
            Fit::Max => "max",
            Fit::Scale => "scale",
            Fit::Min => "min",
        }
    }
}

/// Builds image URLs for one project and dataset.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Start a request for `image`.
    pub fn image<'a>(&'a self, image: &'a SanityImage) -> ImageRequest<'a> {
        ImageRequest {
            builder: self,
            image,
            width: None,
            height: None,
            quality: None,
            fit: None,
            auto_format: false,
        }
    }
}

/// A single image URL under construction.
#[derive(Debug, Clone)]
pub struct ImageRequest<'a> {
    builder: &'a ImageUrlBuilder,
    image: &'a SanityImage,
    width: Option<u32>,
    height: Option<u32>,
    quality: Option<u8>,
    fit: Option<Fit>,
    auto_format: bool,
}

impl ImageRequest<'_> {
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// JPEG/WebP quality, clamped to 0-100.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality.min(100));
        self
    }

    pub fn fit(mut self, fit: Fit) -> Self {
        self.fit = Some(fit);
        self
    }

    /// Let the CDN pick WebP/AVIF when the browser accepts it.
    pub fn auto_format(mut self) -> Self {
        self.auto_format = true;
        self
    }

    /// The final URL, or `None` if the image has no parseable asset reference.
    pub fn url(&self) -> Option<String> {
        let asset = AssetId::parse(&self.image.asset.as_ref()?.reference)?;

        let mut url = format!(
            "{CDN_HOST}/images/{}/{}/{}-{}x{}.{}",
            self.builder.project_id,
            self.builder.dataset,
            asset.id,
            asset.width,
            asset.height,
            asset.format
        );

        let mut params: Vec<String> = Vec::new();
        let rect = source_rect(&asset, self.image.crop, self.image.hotspot, self.width, self.height);
        if rect != (0, 0, asset.width, asset.height) {
            params.push(format!("rect={},{},{},{}", rect.0, rect.1, rect.2, rect.3));
        }
        if let Some(w) = self.width {
            params.push(format!("w={w}"));
        }
        if let Some(h) = self.height {
            params.push(format!("h={h}"));
        }
        if let Some(q) = self.quality {
            params.push(format!("q={q}"));
        }
        if let Some(fit) = self.fit {
            params.push(format!("fit={}", fit.as_str()));
        }
        if self.auto_format {
            params.push("auto=format".to_string());
        }

        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        Some(url)
    }
}

/// Compute the source rectangle `(left, top, width, height)` in pixels.
fn source_rect(
    asset: &AssetId,
    crop: Option<Crop>,
    hotspot: Option<Hotspot>,
    width: Option<u32>,
    height: Option<u32>,
) -> (u32, u32, u32, u32) {
    let (aw, ah) = (asset.width as f64, asset.height as f64);
    let crop = crop.unwrap_or_default();

    // Opposite edges together never trim more than the whole image.
    let (left_f, top_f) = (fraction(crop.left), fraction(crop.top));
    let right_f = fraction(crop.right).min(1.0 - left_f);
    let bottom_f = fraction(crop.bottom).min(1.0 - top_f);

    let left = (left_f * aw).round().min(aw - 1.0).max(0.0);
    let top = (top_f * ah).round().min(ah - 1.0).max(0.0);
    let crop_w = (aw - right_f * aw - left).round().max(1.0);
    let crop_h = (ah - bottom_f * ah - top).round().max(1.0);

    let (Some(w), Some(h)) = (width, height) else {
        return (left as u32, top as u32, crop_w as u32, crop_h as u32);
    };
    if w == 0 || h == 0 {
        return (left as u32, top as u32, crop_w as u32, crop_h as u32);
    }

    let (hx, hy) = hotspot
        .map(|spot| (fraction(spot.x) * aw, fraction(spot.y) * ah))
        .unwrap_or((left + crop_w / 2.0, top + crop_h / 2.0));

    let desired = w as f64 / h as f64;
    let current = crop_w / crop_h;

    if current > desired {
        // Too wide: keep the height, trim the sides around the hotspot.
        let new_w = (crop_h * desired).round();
        let new_left = (hx - new_w / 2.0).clamp(left, left + crop_w - new_w).round();
        (new_left as u32, top as u32, new_w as u32, crop_h as u32)
    } else {
        let new_h = (crop_w / desired).round();
        let new_top = (hy - new_h / 2.0).clamp(top, top + crop_h - new_h).round();
        (left as u32, new_top as u32, crop_w as u32, new_h as u32)
    }
}

/// A CMS-supplied fraction limited to `0.0..=1.0`; non-finite values are 0.
fn fraction(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new("proj", "production")
    }

    #[test]
    fn parse_asset_reference() {
        let asset = AssetId::parse("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg").unwrap();
        assert_eq!(asset.id, "Tb9Ew8CXIwaY6R1kjMvI0uRR");
        assert_eq!((asset.width, asset.height), (2000, 3000));
        assert_eq!(asset.format, "jpg");
    }

    #[test]
    fn parse_rejects_malformed_references() {
        assert_eq!(AssetId::parse("file-abc-pdf"), None);
        assert_eq!(AssetId::parse("image-abc-jpg"), None);
        assert_eq!(AssetId::parse("image-abc-0x10-png"), None);
        assert_eq!(AssetId::parse("image-abc-wxh-png"), None);
        assert_eq!(AssetId::parse(""), None);
    }

    #[test]
    fn plain_url_without_params() {
        let image = SanityImage::from_ref("image-abc123-800x600-png");
        assert_eq!(
            builder().image(&image).url().unwrap(),
            "https://cdn.sanity.io/images/proj/production/abc123-800x600.png"
        );
    }

    #[test]
    fn width_only_keeps_full_rect() {
        let image = SanityImage::from_ref("image-abc-800x600-jpg");
        let url = builder().image(&image).width(400).url().unwrap();
        assert!(url.ends_with("abc-800x600.jpg?w=400"), "{url}");
    }

    #[test]
    fn width_and_height_crop_to_aspect_ratio() {
        // 800x600 source into a square: trim 100px from each side.
        let image = SanityImage::from_ref("image-abc-800x600-jpg");
        let url = builder().image(&image).width(300).height(300).url().unwrap();
        assert!(url.contains("rect=100,0,600,600"), "{url}");
        assert!(url.contains("w=300&h=300"), "{url}");
    }

    #[test]
    fn hotspot_shifts_crop_window() {
        let mut image = SanityImage::from_ref("image-abc-800x600-jpg");
        image.hotspot = Some(Hotspot {
            x: 0.9,
            y: 0.5,
            width: 0.1,
            height: 0.1,
        });
        let url = builder().image(&image).width(300).height(300).url().unwrap();
        // Window clamps to the right edge.
        assert!(url.contains("rect=200,0,600,600"), "{url}");
    }

    #[test]
    fn crop_fractions_become_rect() {
        let mut image = SanityImage::from_ref("image-abc-1000x500-jpg");
        image.crop = Some(Crop {
            top: 0.1,
            bottom: 0.1,
            left: 0.2,
            right: 0.0,
        });
        let url = builder().image(&image).url().unwrap();
        assert!(url.contains("rect=200,50,800,400"), "{url}");
    }

    #[test]
    fn out_of_range_crop_is_clamped() {
        let mut image = SanityImage::from_ref("image-abc-800x600-jpg");
        // Non-finite fractions are ignored and negative ones clamp to zero.
        image.crop = Some(Crop {
            top: -1e308,
            bottom: f64::INFINITY,
            left: f64::NAN,
            right: -0.5,
        });
        let url = builder().image(&image).width(300).height(300).url().unwrap();
        assert!(url.contains("rect=100,0,600,600"), "{url}");

        image.crop = Some(Crop {
            top: 0.0,
            bottom: 0.0,
            left: 2.0,
            right: 0.0,
        });
        let url = builder().image(&image).width(100).url().unwrap();
        assert!(url.contains("rect=799,0,1,600"), "{url}");
    }

    #[test]
    fn overlapping_crop_and_bad_hotspot_do_not_panic() {
        let mut image = SanityImage::from_ref("image-abc-800x600-jpg");
        image.crop = Some(Crop {
            top: 0.7,
            bottom: 0.7,
            left: 0.7,
            right: 0.7,
        });
        image.hotspot = Some(Hotspot {
            x: f64::NAN,
            y: f64::NEG_INFINITY,
            width: 0.1,
            height: 0.1,
        });
        for (w, h) in [(300, 300), (1200, 630), (10, 400)] {
            assert!(builder().image(&image).width(w).height(h).url().is_some());
        }

        image.crop = None;
        let url = builder().image(&image).width(300).height(300).url().unwrap();
        assert!(url.contains("rect=0,0,600,600"), "{url}");
    }

    #[test]
    fn quality_fit_and_auto_format() {
        let image = SanityImage::from_ref("image-abc-800x600-jpg");
        let url = builder()
            .image(&image)
            .width(800)
            .quality(150)
            .fit(Fit::Max)
            .auto_format()
            .url()
            .unwrap();
        assert!(url.ends_with("?w=800&q=100&fit=max&auto=format"), "{url}");
    }

    #[test]
    fn missing_asset_yields_none() {
        let image = SanityImage::default();
        assert_eq!(builder().image(&image).width(10).url(), None);
    }
}
