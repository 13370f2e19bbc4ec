use std::path::{Path, PathBuf};

use crate::foundation::error::{PublishError, PublishResult};

/// Library media item (bitmap or sound) as described by the host.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MediaItem {
    /// Library name, e.g. `"art/photo.jpg"`; its extension picks the output format.
    pub name: String,
    /// Source file of the media, relative to the host's asset root.
    #[serde(default)]
    pub source: Option<PathBuf>,
    /// Pixel width (bitmaps only).
    #[serde(default)]
    pub width: u32,
    /// Pixel height (bitmaps only).
    #[serde(default)]
    pub height: u32,
}

impl MediaItem {
    /// Extension of the library name as written, if any.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name).extension().and_then(|e| e.to_str())
    }
}

/// Host capability that materializes library media at a target path.
pub trait MediaExporter {
    /// Encode the bitmap `item` into `dest` (format chosen by the destination extension).
    fn export_bitmap(&mut self, item: &MediaItem, dest: &Path) -> PublishResult<()>;

    /// Encode the sound `item` into `dest`.
    fn export_sound(&mut self, item: &MediaItem, dest: &Path) -> PublishResult<()>;
}

/// [`MediaExporter`] reading media sources from a directory on disk.
///
/// Bitmaps are decoded and re-encoded with the `image` crate; sounds are copied byte for byte.
#[derive(Clone, Debug)]
pub struct FsMediaExporter {
    root: PathBuf,
}

impl FsMediaExporter {
    /// Create an exporter resolving item sources against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn source_path(&self, item: &MediaItem) -> PublishResult<PathBuf> {
        let rel = item.source.as_ref().ok_or_else(|| {
            PublishError::resource_unavailable(format!("media '{}' has no source file", item.name))
        })?;
        let path = self.root.join(rel);
        if !path.is_file() {
            return Err(PublishError::resource_unavailable(format!(
                "media source '{}' does not exist",
                path.display()
            )));
        }
        Ok(path)
    }
}

impl MediaExporter for FsMediaExporter {
    fn export_bitmap(&mut self, item: &MediaItem, dest: &Path) -> PublishResult<()> {
        let src = self.source_path(item)?;
        let img = image::open(&src).map_err(|e| {
            PublishError::resource_unavailable(format!("decode '{}': {e}", src.display()))
        })?;
        // Output encoders take 8-bit samples; JPEG has no alpha channel.
        let img = match dest.extension().and_then(|e| e.to_str()) {
            Some("jpg") | Some("jpeg") => image::DynamicImage::ImageRgb8(img.to_rgb8()),
            _ => image::DynamicImage::ImageRgba8(img.to_rgba8()),
        };
        img.save(dest).map_err(|e| match e {
            image::ImageError::IoError(source) => PublishError::io(dest, source),
            other => PublishError::resource_unavailable(format!(
                "encode '{}': {other}",
                dest.display()
            )),
        })
    }

    fn export_sound(&mut self, item: &MediaItem, dest: &Path) -> PublishResult<()> {
        let src = self.source_path(item)?;
        std::fs::copy(&src, dest).map_err(|e| PublishError::io(dest, e))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/media.rs"]
mod tests;
