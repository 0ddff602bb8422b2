//! CDN URLs for image and file assets
//!
//! Asset references encode everything needed to build a URL:
//!
//! - images: `image-<assetId>-<width>x<height>-<ext>`
//! - files: `file-<assetId>-<ext>`
//!
//! A reference that does not follow its pattern yields an empty string and a
//! warning; nothing here fails.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::Config;

const CDN_BASE: &str = "https://cdn.sanity.io";

/// Output encoding requested from the image pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpg,
    Png,
    #[default]
    Webp,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "png" => Ok(ImageFormat::Png),
            "webp" => Ok(ImageFormat::Webp),
            other => Err(format!("unsupported image format: {}", other)),
        }
    }
}

/// Transform parameters for [`AssetUrls::image_url`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageOptions {
    pub width: u32,
    pub height: Option<u32>,
    pub quality: u8,
    pub format: ImageFormat,
}

impl ImageOptions {
    pub const DEFAULT_WIDTH: u32 = 1200;
    pub const DEFAULT_QUALITY: u8 = 90;

    pub fn width(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: None,
            quality: Self::DEFAULT_QUALITY,
            format: ImageFormat::default(),
        }
    }
}

/// A parsed image asset reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef<'a> {
    pub asset_id: &'a str,
    pub width: u32,
    pub height: u32,
    pub extension: &'a str,
}

impl<'a> ImageRef<'a> {
    pub fn parse(reference: &'a str) -> Option<Self> {
        let rest = reference.strip_prefix("image-")?;
        let mut parts = rest.rsplitn(3, '-');
        let extension = parts.next()?;
        let size = parts.next()?;
        let asset_id = parts.next()?;

        let (width, height) = size.split_once('x')?;
        let (width, height) = (width.parse().ok()?, height.parse().ok()?);

        if asset_id.is_empty() || extension.is_empty() {
            return None;
        }
        Some(Self {
            asset_id,
            width,
            height,
            extension,
        })
    }

    /// Path below the project/dataset prefix, e.g. `abc-800x600.jpg`
    fn file_name(&self) -> String {
        format!("{}-{}x{}.{}", self.asset_id, self.width, self.height, self.extension)
    }
}

/// Pixel size of an image asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
}

/// One image at the standard breakpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsiveUrls {
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
    /// Untransformed source
    pub original: String,
}

/// Builds CDN URLs for one project and dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    project_id: String,
    dataset: String,
}

impl AssetUrls {
    pub const MOBILE_WIDTH: u32 = 640;
    pub const TABLET_WIDTH: u32 = 1024;
    pub const DESKTOP_WIDTH: u32 = 1920;

    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.project_id, &config.dataset)
    }

    fn original(&self, image: &ImageRef<'_>) -> String {
        format!(
            "{}/images/{}/{}/{}",
            CDN_BASE,
            self.project_id,
            self.dataset,
            image.file_name()
        )
    }

    /// Transformed image URL, or `""` for a malformed reference
    pub fn image_url(&self, reference: &str, options: ImageOptions) -> String {
        let Some(image) = ImageRef::parse(reference) else {
            tracing::warn!(reference, "Invalid image asset reference");
            return String::new();
        };

        let mut url = format!("{}?w={}", self.original(&image), options.width);
        if let Some(height) = options.height {
            url.push_str(&format!("&h={}", height));
        }
        url.push_str(&format!("&q={}&fm={}", options.quality, options.format));
        url
    }

    /// Untransformed image URL, or `""` for a malformed reference
    pub fn original_url(&self, reference: &str) -> String {
        match ImageRef::parse(reference) {
            Some(image) => self.original(&image),
            None => {
                tracing::warn!(reference, "Invalid image asset reference");
                String::new()
            }
        }
    }

    pub fn responsive_urls(&self, reference: &str) -> ResponsiveUrls {
        ResponsiveUrls {
            mobile: self.image_url(reference, ImageOptions::width(Self::MOBILE_WIDTH)),
            tablet: self.image_url(reference, ImageOptions::width(Self::TABLET_WIDTH)),
            desktop: self.image_url(reference, ImageOptions::width(Self::DESKTOP_WIDTH)),
            original: self.original_url(reference),
        }
    }

    /// Size encoded in an image reference
    pub fn dimensions(reference: &str) -> Option<Dimensions> {
        let image = ImageRef::parse(reference)?;
        let aspect_ratio = if image.height == 0 {
            0.0
        } else {
            f64::from(image.width) / f64::from(image.height)
        };
        Some(Dimensions {
            width: image.width,
            height: image.height,
            aspect_ratio,
        })
    }

    /// Download URL of a file asset, or `""` for a malformed reference
    pub fn file_url(&self, reference: &str) -> String {
        let parsed = reference
            .strip_prefix("file-")
            .and_then(|rest| rest.rsplit_once('-'))
            .filter(|(id, ext)| !id.is_empty() && !ext.is_empty());

        match parsed {
            Some((asset_id, extension)) => format!(
                "{}/files/{}/{}/{}.{}",
                CDN_BASE, self.project_id, self.dataset, asset_id, extension
            ),
            None => {
                tracing::warn!(reference, "Invalid file asset reference");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::log_capture;

    fn urls() -> AssetUrls {
        AssetUrls::new("p1", "production")
    }

    #[test]
    fn test_image_url_defaults() {
        assert_eq!(
            urls().image_url("image-abc123-800x600-jpg", ImageOptions::default()),
            "https://cdn.sanity.io/images/p1/production/abc123-800x600.jpg?w=1200&q=90&fm=webp"
        );
    }

    #[test]
    fn test_image_url_with_height() {
        let url = urls().image_url(
            "image-abc123-800x600-jpg",
            ImageOptions::width(600).with_height(600),
        );
        assert!(url.contains("w=600&h=600"), "{}", url);
    }

    #[test]
    fn test_responsive_urls() {
        let set = urls().responsive_urls("image-abc123-4000x3000-png");
        assert!(set.mobile.contains("?w=640&"));
        assert!(set.tablet.contains("?w=1024&"));
        assert!(set.desktop.contains("?w=1920&"));
        assert_eq!(
            set.original,
            "https://cdn.sanity.io/images/p1/production/abc123-4000x3000.png"
        );
    }

    #[test]
    fn test_dimensions() {
        let dims = AssetUrls::dimensions("image-abc123-1600x900-jpg").unwrap();
        assert_eq!((dims.width, dims.height), (1600, 900));
        assert!((dims.aspect_ratio - 16.0 / 9.0).abs() < 1e-9);
        assert!(AssetUrls::dimensions("image-abc123-jpg").is_none());
    }

    #[test]
    fn test_file_url() {
        assert_eq!(
            urls().file_url("file-abc123-pdf"),
            "https://cdn.sanity.io/files/p1/production/abc123.pdf"
        );
    }

    #[test]
    fn test_malformed_refs_yield_empty() {
        assert_eq!(urls().file_url("file-abc123"), "");
        assert_eq!(urls().file_url("nonsense"), "");
        assert_eq!(urls().image_url("image-abc-12x-jpg", ImageOptions::default()), "");
        assert_eq!(urls().image_url("", ImageOptions::default()), "");
        assert_eq!(urls().responsive_urls("file-abc-pdf").original, "");
    }

    #[test]
    fn test_malformed_refs_are_logged() {
        let (logs, subscriber) = log_capture();
        tracing::subscriber::with_default(subscriber, || {
            urls().image_url("image-abc-12x-jpg", ImageOptions::default());
            urls().original_url("image-nope");
            urls().file_url("file-abc123");
        });

        let logs = logs.contents();
        let warnings: Vec<_> = logs.lines().filter(|line| line.contains("WARN")).collect();
        assert_eq!(warnings.len(), 3, "{}", logs);
        assert!(warnings[0].contains("Invalid image asset reference"));
        assert!(warnings[0].contains("image-abc-12x-jpg"));
        assert!(warnings[1].contains("image-nope"));
        assert!(warnings[2].contains("Invalid file asset reference"));
        assert!(warnings[2].contains("file-abc123"));
    }

    #[test]
    fn test_valid_refs_log_nothing() {
        let (logs, subscriber) = log_capture();
        tracing::subscriber::with_default(subscriber, || {
            urls().image_url("image-abc123-800x600-jpg", ImageOptions::default());
            urls().file_url("file-abc123-pdf");
        });
        assert_eq!(logs.contents(), "");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JPEG".parse::<ImageFormat>(), Ok(ImageFormat::Jpg));
        assert!("gif".parse::<ImageFormat>().is_err());
    }
}
