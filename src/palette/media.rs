use std::collections::HashMap;
use std::path::PathBuf;

use crate::foundation::error::PublishResult;
use crate::host::media::MediaItem;
use crate::palette::ExportServices;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MediaKind {
    Image,
    Sound,
}

impl MediaKind {
    /// Output file name; only exact lowercase `jpg` and `wav` keep their format.
    fn file_name(self, n: u32, item: &MediaItem) -> String {
        let ext = item.extension();
        match self {
            MediaKind::Image => match ext {
                Some("jpg") => format!("Image{n}.jpg"),
                _ => format!("Image{n}.png"),
            },
            MediaKind::Sound => match ext {
                Some("wav") => format!("Sound{n}.WAV"),
                _ => format!("Sound{n}.MP3"),
            },
        }
    }
}

/// Output naming and materialization state of one media kind.
#[derive(Debug)]
struct MediaFolder {
    kind: MediaKind,
    folder: String,
    next: u32,
    created: bool,
    by_name: HashMap<String, String>,
}

impl MediaFolder {
    fn new(kind: MediaKind, folder: String) -> Self {
        Self {
            kind,
            folder,
            next: 0,
            created: false,
            by_name: HashMap::new(),
        }
    }

    fn clear(&mut self) {
        self.next = 0;
        self.created = false;
        self.by_name.clear();
    }

    fn resolve(
        &mut self,
        item: &MediaItem,
        output_dir: &std::path::Path,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<Option<String>> {
        if let Some(rel) = self.by_name.get(&item.name) {
            return Ok(Some(rel.clone()));
        }
        let Some(exporter) = services.media.as_deref_mut() else {
            tracing::warn!(item = %item.name, "no media exporter; recording without a path");
            return Ok(None);
        };

        let file = self.kind.file_name(self.next, item);

        let dir = output_dir.join(&self.folder);
        if !self.created {
            services.output.create_dir(&dir)?;
            self.created = true;
        }

        let dest = dir.join(&file);
        let exported = match self.kind {
            MediaKind::Image => exporter.export_bitmap(item, &dest),
            MediaKind::Sound => exporter.export_sound(item, &dest),
        };
        match exported {
            Ok(()) => self.next += 1,
            Err(e) if e.is_recoverable() => {
                tracing::warn!(item = %item.name, error = %e, "media export skipped");
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        let rel = format!("./{}/{}", self.folder, file);
        tracing::debug!(item = %item.name, path = %rel, "media exported");
        self.by_name.insert(item.name.clone(), rel.clone());
        Ok(Some(rel))
    }
}

/// Deterministic, collision-free output files for bitmaps and sounds.
///
/// Files are named `Image<N>.<jpg|png>` and `Sound<N>.<WAV|MP3>`, with one counter per kind for
/// the whole session. The counter advances only on a successful export, so numbers stay dense.
/// A library name is materialized at most once.
#[derive(Debug)]
pub(crate) struct MediaFiles {
    output_dir: PathBuf,
    images: MediaFolder,
    sounds: MediaFolder,
}

impl MediaFiles {
    pub(crate) fn new(output_dir: PathBuf, image_folder: &str, sound_folder: &str) -> Self {
        Self {
            output_dir,
            images: MediaFolder::new(MediaKind::Image, image_folder.to_string()),
            sounds: MediaFolder::new(MediaKind::Sound, sound_folder.to_string()),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.images.clear();
        self.sounds.clear();
    }

    pub(crate) fn bitmap(
        &mut self,
        item: &MediaItem,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<Option<String>> {
        self.images.resolve(item, &self.output_dir, services)
    }

    pub(crate) fn sound(
        &mut self,
        item: &MediaItem,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<Option<String>> {
        self.sounds.resolve(item, &self.output_dir, services)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/media.rs"]
mod tests;
