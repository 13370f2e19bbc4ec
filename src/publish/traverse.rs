//! Frame-command generation: walks scene timelines and drives the palette and builders.

use crate::foundation::core::{ObjectId, ResourceId};
use crate::foundation::error::{PublishError, PublishResult};
use crate::host::scene::{FrameOp, LibraryEntry, LibraryItem, SceneDocument, SceneTimeline, SymbolKind};
use crate::model::document::DocumentModel;
use crate::palette::{ExportServices, ResourcePalette};
use crate::timeline::builder::{DisplayObjectInfo, TimelineBuilder, TimelineBuilderFactory};

/// Inclusive range of frames to export from a timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame, 0-based.
    pub first: u32,
    /// Last frame, inclusive.
    pub last: u32,
}

impl FrameRange {
    /// Range covering `first..=last`.
    pub fn new(first: u32, last: u32) -> PublishResult<Self> {
        if first > last {
            return Err(PublishError::validation(format!(
                "frame range {first}..={last} is empty"
            )));
        }
        Ok(Self { first, last })
    }

    fn indices(self, len: usize) -> PublishResult<std::ops::RangeInclusive<usize>> {
        let (first, last) = (self.first as usize, self.last as usize);
        if last >= len {
            return Err(PublishError::validation(format!(
                "frame range {first}..={last} exceeds a timeline of {len} frames"
            )));
        }
        Ok(first..=last)
    }
}

/// Mutable state shared by one traversal.
pub(crate) struct ExportContext<'c, 'a> {
    pub(crate) palette: &'c mut ResourcePalette,
    pub(crate) model: &'c mut DocumentModel,
    pub(crate) factory: &'c mut TimelineBuilderFactory,
    pub(crate) services: &'c mut ExportServices<'a>,
}

/// Generates frame commands for the timelines of one document.
pub(crate) struct FrameCommandGenerator<'d> {
    doc: &'d SceneDocument,
    in_progress: Vec<ResourceId>,
}

impl<'d> FrameCommandGenerator<'d> {
    pub(crate) fn new(doc: &'d SceneDocument) -> Self {
        Self {
            doc,
            in_progress: Vec::new(),
        }
    }

    /// Record `timeline` (restricted to `range` when given) into a fresh builder.
    pub(crate) fn generate(
        &mut self,
        cx: &mut ExportContext<'_, '_>,
        timeline: &'d SceneTimeline,
        range: Option<FrameRange>,
    ) -> PublishResult<TimelineBuilder> {
        let frames = match range {
            Some(r) => &timeline.frames[r.indices(timeline.frames.len())?],
            None => &timeline.frames[..],
        };
        let mut builder = cx.factory.create_timeline_builder();
        for frame in frames {
            for op in &frame.ops {
                self.apply(cx, &mut builder, op)?;
            }
            builder.show_frame();
        }
        Ok(builder)
    }

    fn entry(&self, id: ResourceId) -> PublishResult<&'d LibraryEntry> {
        self.doc
            .entry(id)
            .ok_or_else(|| PublishError::validation(format!("missing library id {id}")))
    }

    /// Export library item `id` unless the palette already holds it.
    pub(crate) fn ensure_resource(
        &mut self,
        cx: &mut ExportContext<'_, '_>,
        id: ResourceId,
    ) -> PublishResult<()> {
        if cx.palette.has_resource(id) {
            return Ok(());
        }
        if self.in_progress.contains(&id) {
            return Err(PublishError::identity_violation(format!(
                "symbol {id} contains itself"
            )));
        }
        let entry = self.entry(id)?;
        let name = Some(entry.name.as_str());
        match &entry.item {
            LibraryItem::Shape(shape) => cx.palette.add_shape(id, name, shape, cx.services)?,
            LibraryItem::Bitmap(item) => cx.palette.add_bitmap(id, item, cx.services)?,
            LibraryItem::Sound(item) => cx.palette.add_sound(id, item, cx.services)?,
            LibraryItem::Text(text) => cx.palette.add_text(id, name, text),
            LibraryItem::Symbol { timeline, .. } => {
                self.in_progress.push(id);
                let built = self.generate(cx, timeline, None);
                self.in_progress.pop();
                let builder = built?;
                cx.palette.add_symbol(id, name, builder, cx.model);
            }
        }
        Ok(())
    }

    fn apply(
        &mut self,
        cx: &mut ExportContext<'_, '_>,
        builder: &mut TimelineBuilder,
        op: &FrameOp,
    ) -> PublishResult<()> {
        match op {
            FrameOp::Place {
                object_id,
                resource_id,
                place_after,
                matrix,
                bounds,
            } => {
                self.ensure_resource(cx, *resource_id)?;
                let info = DisplayObjectInfo {
                    resource_id: *resource_id,
                    place_after: place_after.unwrap_or(ObjectId(0)),
                    matrix: *matrix,
                };
                let entry = self.entry(*resource_id)?;
                match &entry.item {
                    LibraryItem::Shape(_) => builder.add_shape(*object_id, &info),
                    LibraryItem::Bitmap(_) => builder.add_bitmap(*object_id, &info),
                    LibraryItem::Text(_) => {
                        if let Some(b) = bounds {
                            tracing::debug!(object = %object_id, bounds = ?b, "text bounds");
                        }
                        builder.add_classic_text(*object_id, &info);
                    }
                    LibraryItem::Symbol { symbol, .. } => match symbol {
                        SymbolKind::MovieClip => builder.add_movie_clip(*object_id, &info),
                        SymbolKind::Graphic => builder.add_graphic(*object_id, &info),
                        SymbolKind::Button { tracking } => {
                            builder.add_button(*object_id, &info, *tracking)
                        }
                    },
                    LibraryItem::Sound(_) => {
                        return Err(PublishError::validation(format!(
                            "sound '{}' must be placed with place_sound",
                            entry.name
                        )));
                    }
                }
            }
            FrameOp::PlaceSound {
                object_id,
                resource_id,
                sound,
            } => {
                self.ensure_resource(cx, *resource_id)?;
                builder.add_sound(*object_id, *resource_id, *sound);
            }
            FrameOp::Remove { object_id } => builder.remove_object(*object_id),
            FrameOp::ZOrder {
                object_id,
                place_after,
            } => builder.update_z_order(*object_id, *place_after),
            FrameOp::Mask {
                object_id,
                mask_till,
            } => builder.update_mask(*object_id, *mask_till),
            FrameOp::BlendMode { object_id, mode } => builder.update_blend_mode(*object_id, *mode),
            FrameOp::Visibility { object_id, visible } => {
                builder.update_visibility(*object_id, *visible)
            }
            FrameOp::Filters { object_id, filters } => builder.add_filters(*object_id, filters),
            FrameOp::Transform { object_id, matrix } => {
                builder.update_display_transform(*object_id, *matrix)
            }
            FrameOp::ColorTransform {
                object_id,
                transform,
            } => builder.update_color_transform(*object_id, transform),
            FrameOp::Script { layer, text } => builder.add_frame_script(Some(text), *layer),
            FrameOp::ClearScript { layer } => builder.remove_frame_script(*layer),
            FrameOp::Label { kind, text } => builder.set_frame_label(Some(text), *kind),
        }
        Ok(())
    }

    /// Export linkage-flagged library items that no timeline exported, checked by name.
    pub(crate) fn export_linkage(&mut self, cx: &mut ExportContext<'_, '_>) -> PublishResult<usize> {
        let mut exported = 0;
        for entry in &self.doc.library {
            if !entry.linkage
                || cx.palette.has_resource_named(&entry.name)
                || cx.palette.has_resource(entry.id)
            {
                continue;
            }
            tracing::debug!(resource = %entry.id, name = %entry.name, "export linkage item");
            self.ensure_resource(cx, entry.id)?;
            exported += 1;
        }
        Ok(exported)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/publish/traverse.rs"]
mod tests;
