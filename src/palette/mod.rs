//! Resource palette: at-most-once export of shapes, bitmaps, sounds, text and symbols.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::foundation::core::ResourceId;
use crate::foundation::error::PublishResult;
use crate::host::media::{MediaExporter, MediaItem};
use crate::host::output::OutputSink;
use crate::host::shape::{Shape, ShapeService};
use crate::host::text::ClassicText;
use crate::model::document::{DocumentModel, TimelineKey};
use crate::model::resource::{
    BitmapResource, ResourceRecord, ResourceSet, ShapeResource, SoundResource,
};
use crate::timeline::builder::TimelineBuilder;

pub(crate) mod geometry;
pub(crate) mod gradient;
pub(crate) mod media;
pub(crate) mod text;

use self::media::MediaFiles;

/// Host services and the output sink available while exporting resources.
pub struct ExportServices<'a> {
    /// Destination of folders and files.
    pub output: &'a mut dyn OutputSink,
    /// Media materialization; without it, bitmap and sound records carry no path.
    pub media: Option<&'a mut dyn MediaExporter>,
    /// Stroke-to-fill conversion; without it, outlined strokes are dropped.
    pub shapes: Option<&'a dyn ShapeService>,
}

impl<'a> ExportServices<'a> {
    /// Services with only an output sink.
    pub fn new(output: &'a mut dyn OutputSink) -> Self {
        Self {
            output,
            media: None,
            shapes: None,
        }
    }

    /// Attach a media exporter.
    pub fn with_media(mut self, media: &'a mut dyn MediaExporter) -> Self {
        self.media = Some(media);
        self
    }

    /// Attach a stroke-to-fill service.
    pub fn with_shapes(mut self, shapes: &'a dyn ShapeService) -> Self {
        self.shapes = Some(shapes);
        self
    }
}

/// Folder names used for exported media, relative to the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFolders {
    /// Image folder.
    pub images: String,
    /// Sound folder.
    pub sounds: String,
}

impl Default for MediaFolders {
    fn default() -> Self {
        Self {
            images: "images".to_string(),
            sounds: "sounds".to_string(),
        }
    }
}

/// Deduplicating cache and exporter for every resource kind.
///
/// Identity checks are advisory: callers consult [`ResourcePalette::has_resource`] before adding,
/// and adding an id twice is caller misuse.
#[derive(Debug)]
pub struct ResourcePalette {
    order: Vec<ResourceId>,
    ids: HashSet<ResourceId>,
    names: HashSet<String>,
    resources: ResourceSet,
    media: MediaFiles,
}

impl ResourcePalette {
    /// Palette writing media below `output_dir` into the default folders.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_folders(output_dir, &MediaFolders::default())
    }

    /// Palette writing media below `output_dir` into `folders`.
    pub fn with_folders(output_dir: impl Into<PathBuf>, folders: &MediaFolders) -> Self {
        Self {
            order: Vec::new(),
            ids: HashSet::new(),
            names: HashSet::new(),
            resources: ResourceSet::default(),
            media: MediaFiles::new(output_dir.into(), &folders.images, &folders.sounds),
        }
    }

    /// `true` when `id` was added since the last [`ResourcePalette::clear`].
    pub fn has_resource(&self, id: ResourceId) -> bool {
        self.ids.contains(&id)
    }

    /// `true` when a resource with library name `name` was added.
    pub fn has_resource_named(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[ResourceId] {
        &self.order
    }

    /// Records exported so far.
    pub fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    /// Move the exported records out, leaving identity caches intact.
    pub fn take_resources(&mut self) -> ResourceSet {
        std::mem::take(&mut self.resources)
    }

    /// Forget every id, name, record and media file mapping.
    pub fn clear(&mut self) {
        self.order.clear();
        self.ids.clear();
        self.names.clear();
        self.resources = ResourceSet::default();
        self.media.clear();
    }

    fn register(&mut self, id: ResourceId, name: Option<&str>) {
        debug_assert!(!self.ids.contains(&id), "resource {id} exported twice");
        if !self.ids.insert(id) {
            tracing::warn!(resource = %id, "resource exported twice");
        }
        self.order.push(id);
        if let Some(name) = name {
            self.names.insert(name.to_string());
        }
    }

    /// Export a shape: fill paths for every region, then strokes or their outlined fallback.
    pub fn add_shape(
        &mut self,
        id: ResourceId,
        name: Option<&str>,
        shape: &Shape,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<()> {
        tracing::debug!(resource = %id, "define shape");
        self.register(id, name);
        let paths = self.export_shape_paths(shape, services)?;
        self.resources.push(ResourceRecord::Shape(ShapeResource {
            id,
            name: name.map(str::to_string),
            paths,
        }));
        Ok(())
    }

    /// Export a bitmap and record its size and relative path.
    pub fn add_bitmap(
        &mut self,
        id: ResourceId,
        item: &MediaItem,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<()> {
        tracing::debug!(resource = %id, item = %item.name, "define bitmap");
        self.register(id, Some(&item.name));
        let path = self.media.bitmap(item, services)?;
        self.resources.push(ResourceRecord::Bitmap(BitmapResource {
            id,
            name: Some(item.name.clone()),
            width: item.width,
            height: item.height,
            path,
        }));
        Ok(())
    }

    /// Export a sound and record its relative path.
    pub fn add_sound(
        &mut self,
        id: ResourceId,
        item: &MediaItem,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<()> {
        tracing::debug!(resource = %id, item = %item.name, "define sound");
        self.register(id, Some(&item.name));
        let path = self.media.sound(item, services)?;
        self.resources.push(ResourceRecord::Sound(SoundResource {
            id,
            name: Some(item.name.clone()),
            path,
        }));
        Ok(())
    }

    /// Export a classic text field.
    pub fn add_text(&mut self, id: ResourceId, name: Option<&str>, text: &ClassicText) {
        tracing::debug!(resource = %id, "define text");
        self.register(id, name);
        self.resources
            .push(ResourceRecord::Text(text::text_resource(id, name, text)));
    }

    /// Register a symbol and finalize its timeline into `model`.
    pub fn add_symbol(
        &mut self,
        id: ResourceId,
        name: Option<&str>,
        builder: TimelineBuilder,
        model: &mut DocumentModel,
    ) -> TimelineKey {
        tracing::debug!(resource = %id, name = ?name, "define symbol");
        self.register(id, name);
        builder.build(id, name, model)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/palette.rs"]
mod tests;
