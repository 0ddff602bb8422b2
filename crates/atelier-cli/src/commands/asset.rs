//! Asset URL command handlers
//!
//! These work offline: URLs are derived from the asset reference and the
//! configured project and dataset.

use anyhow::{bail, Result};

use atelier_core::{AssetUrls, ImageOptions};

use crate::output::Output;

pub fn image(urls: &AssetUrls, reference: &str, options: ImageOptions, output: &Output) -> Result<()> {
    let url = urls.image_url(reference, options);
    if url.is_empty() {
        bail!("'{}' is not an image asset reference", reference);
    }
    output.print_value("url", &url)
}

pub fn file(urls: &AssetUrls, reference: &str, output: &Output) -> Result<()> {
    let url = urls.file_url(reference);
    if url.is_empty() {
        bail!("'{}' is not a file asset reference", reference);
    }
    output.print_value("url", &url)
}

/// Print the breakpoint URLs of an image
pub fn responsive(urls: &AssetUrls, reference: &str, output: &Output) -> Result<()> {
    let set = urls.responsive_urls(reference);
    if set.original.is_empty() {
        bail!("'{}' is not an image asset reference", reference);
    }
    output.print_record(
        &set,
        &[
            ("Mobile", set.mobile.clone()),
            ("Tablet", set.tablet.clone()),
            ("Desktop", set.desktop.clone()),
            ("Original", set.original.clone()),
        ],
    )
}

/// Print the pixel size encoded in an image reference
pub fn dimensions(reference: &str, output: &Output) -> Result<()> {
    let Some(dims) = AssetUrls::dimensions(reference) else {
        bail!("'{}' is not an image asset reference", reference);
    };
    output.print_record(
        &dims,
        &[
            ("Size", format!("{}x{}", dims.width, dims.height)),
            ("Aspect ratio", format!("{:.3}", dims.aspect_ratio)),
        ],
    )
}
