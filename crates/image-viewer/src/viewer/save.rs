//! Save-time helpers: target format, destination path and encoding

use image::{DynamicImage, ImageFormat, codecs::jpeg::JpegEncoder};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

const MAX_JPEG_QUALITY: u8 = 100;

/// Encoder name for a source file, taken from its extension (`tif` becomes `tiff`)
pub fn target_format(source: &Path) -> String {
    let ext = source
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if ext == "tif" { "tiff".to_owned() } else { ext }
}

/// Make `chosen` end with exactly one extension of `format`.
///
/// An extension that already names the same encoder (`.tif` for `tiff`,
/// `.JPG` for `jpeg`) is replaced by `format`, anything else gets it appended.
pub fn with_format_extension(chosen: PathBuf, format: &str) -> PathBuf {
    let same_format = chosen
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ext.eq_ignore_ascii_case(format)
                || ImageFormat::from_extension(ext)
                    .is_some_and(|fmt| Some(fmt) == ImageFormat::from_extension(format))
        });

    if same_format {
        return chosen.with_extension(format);
    }

    let mut path = OsString::from(chosen);
    path.push(".");
    path.push(format);
    path.into()
}

/// Bake a quarter-turn rotation into a copy, other angles leave it untouched
pub fn rotated(image: &DynamicImage, degrees: i32) -> DynamicImage {
    match degrees.rem_euclid(360) {
        90 => image.rotate90(),
        180 => image.rotate180(),
        270 => image.rotate270(),
        0 => image.clone(),
        other => {
            log::warn!("rotation of {other} degrees can't be baked, saving unrotated");
            image.clone()
        }
    }
}

/// Encode at the best quality the format offers
pub fn encode(image: &DynamicImage, path: &Path, format: ImageFormat) -> image::ImageResult<()> {
    match format {
        ImageFormat::Jpeg => {
            let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
            JpegEncoder::new_with_quality(&mut writer, MAX_JPEG_QUALITY)
                .encode_image(&image.to_rgb8())
        }
        fmt => image.save_with_format(path, fmt),
    }
}
