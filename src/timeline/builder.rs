use crate::foundation::core::{Affine, ObjectId, ResourceId, Stacking};
use crate::model::document::{DocumentModel, TimelineKey};
use crate::timeline::command::{
    BlendMode, ButtonTracking, ColorTransform, LabelKind, PlacedMedia, SoundPlacement,
};
use crate::timeline::filter::Filter;
use crate::timeline::writer::TimelineWriter;

/// Placement of a display object as reported by the frame-command generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayObjectInfo {
    /// Placed resource.
    pub resource_id: ResourceId,
    /// Object to stack above; `0` places at the bottom.
    pub place_after: ObjectId,
    /// Placement matrix.
    pub matrix: Option<Affine>,
}

/// Hands out one [`TimelineBuilder`] per timeline.
#[derive(Debug, Default)]
pub struct TimelineBuilderFactory {
    created: usize,
}

impl TimelineBuilderFactory {
    /// Create a factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder for a new (main or symbol) timeline.
    pub fn create_timeline_builder(&mut self) -> TimelineBuilder {
        self.created += 1;
        tracing::trace!(count = self.created, "timeline builder created");
        TimelineBuilder::new()
    }

    /// Number of builders handed out.
    pub fn created(&self) -> usize {
        self.created
    }
}

/// Short-lived coordinator translating frame-command callbacks into writer calls.
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    writer: TimelineWriter,
    frame_index: u32,
}

impl TimelineBuilder {
    /// Create a builder with a fresh writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the frame currently being built.
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Borrow the underlying writer.
    pub fn writer(&self) -> &TimelineWriter {
        &self.writer
    }

    fn place(&mut self, object_id: ObjectId, info: &DisplayObjectInfo, media: Option<PlacedMedia>) {
        self.writer.place(
            info.resource_id,
            object_id,
            Stacking::from(info.place_after),
            info.matrix,
            media,
        );
    }

    /// Place a shape instance.
    pub fn add_shape(&mut self, object_id: ObjectId, info: &DisplayObjectInfo) {
        tracing::debug!(
            frame = self.frame_index,
            %object_id,
            resource = %info.resource_id,
            place_after = %info.place_after,
            "add shape"
        );
        self.place(object_id, info, None);
    }

    /// Place a classic text instance.
    pub fn add_classic_text(&mut self, object_id: ObjectId, info: &DisplayObjectInfo) {
        tracing::debug!(
            frame = self.frame_index,
            %object_id,
            resource = %info.resource_id,
            place_after = %info.place_after,
            "add classic text"
        );
        self.place(object_id, info, None);
    }

    /// Place a bitmap instance.
    pub fn add_bitmap(&mut self, object_id: ObjectId, info: &DisplayObjectInfo) {
        tracing::debug!(
            frame = self.frame_index,
            %object_id,
            resource = %info.resource_id,
            place_after = %info.place_after,
            "add bitmap"
        );
        self.place(object_id, info, None);
    }

    /// Place a movie clip instance.
    pub fn add_movie_clip(&mut self, object_id: ObjectId, info: &DisplayObjectInfo) {
        tracing::debug!(
            frame = self.frame_index,
            %object_id,
            resource = %info.resource_id,
            place_after = %info.place_after,
            "add movie clip"
        );
        self.place(object_id, info, Some(PlacedMedia::MovieClip));
    }

    /// Place a button instance.
    pub fn add_button(
        &mut self,
        object_id: ObjectId,
        info: &DisplayObjectInfo,
        tracking: ButtonTracking,
    ) {
        tracing::debug!(
            frame = self.frame_index,
            %object_id,
            resource = %info.resource_id,
            ?tracking,
            "add button"
        );
        self.place(object_id, info, Some(PlacedMedia::Button { tracking }));
    }

    /// Place a graphic symbol instance.
    pub fn add_graphic(&mut self, object_id: ObjectId, info: &DisplayObjectInfo) {
        tracing::debug!(
            frame = self.frame_index,
            %object_id,
            resource = %info.resource_id,
            "add graphic"
        );
        self.place(object_id, info, Some(PlacedMedia::Graphic));
    }

    /// Start a sound.
    pub fn add_sound(
        &mut self,
        object_id: ObjectId,
        resource_id: ResourceId,
        sound: Option<SoundPlacement>,
    ) {
        tracing::debug!(
            frame = self.frame_index,
            %object_id,
            resource = %resource_id,
            ?sound,
            "add sound"
        );
        self.writer.place_with_audio(resource_id, object_id, sound);
    }

    /// Move an instance.
    pub fn update_display_transform(&mut self, object_id: ObjectId, matrix: Affine) {
        tracing::debug!(frame = self.frame_index, %object_id, "update display transform");
        self.writer.update_transform(object_id, matrix);
    }

    /// Recolor an instance (reserved).
    pub fn update_color_transform(&mut self, object_id: ObjectId, transform: &ColorTransform) {
        self.writer.update_color_transform(object_id, transform);
    }

    /// Remove an instance.
    pub fn remove_object(&mut self, object_id: ObjectId) {
        tracing::debug!(frame = self.frame_index, %object_id, "remove object");
        self.writer.remove(object_id);
    }

    /// Restack an instance.
    pub fn update_z_order(&mut self, object_id: ObjectId, place_after: ObjectId) {
        tracing::debug!(frame = self.frame_index, %object_id, %place_after, "update z-order");
        self.writer
            .update_z_order(object_id, Stacking::from(place_after));
    }

    /// Mask an instance range; ignored by the writer.
    pub fn update_mask(&mut self, object_id: ObjectId, mask_till: ObjectId) {
        self.writer.update_mask(object_id, mask_till);
    }

    /// Change an instance's blend mode.
    pub fn update_blend_mode(&mut self, object_id: ObjectId, mode: BlendMode) {
        tracing::debug!(frame = self.frame_index, %object_id, mode = mode.name(), "update blend mode");
        self.writer.update_blend_mode(object_id, mode);
    }

    /// Show or hide an instance.
    pub fn update_visibility(&mut self, object_id: ObjectId, visible: bool) {
        tracing::debug!(frame = self.frame_index, %object_id, visible, "update visibility");
        self.writer.update_visibility(object_id, visible);
    }

    /// Attach filters, one command per filter in order.
    pub fn add_filters(&mut self, object_id: ObjectId, filters: &[Filter]) {
        for filter in filters {
            tracing::debug!(
                frame = self.frame_index,
                %object_id,
                filter = filter.name(),
                enabled = filter.enabled(),
                "add filter"
            );
            self.writer.add_filter(object_id, filter.clone());
        }
    }

    /// Seal the current frame.
    pub fn show_frame(&mut self) {
        let sealed = self.writer.show_frame();
        debug_assert_eq!(sealed.0, self.frame_index);
        tracing::trace!(frame = self.frame_index, "show frame");
        self.frame_index += 1;
    }

    /// Attach a frame script.
    pub fn add_frame_script(&mut self, script: Option<&str>, layer: u32) {
        if let Some(text) = script {
            tracing::debug!(frame = self.frame_index, layer, "add frame script");
            self.writer.add_frame_script(text, layer);
        }
    }

    /// Drop a frame script.
    pub fn remove_frame_script(&mut self, layer: u32) {
        tracing::debug!(frame = self.frame_index, layer, "remove frame script");
        self.writer.remove_frame_script(layer);
    }

    /// Label the current frame.
    pub fn set_frame_label(&mut self, label: Option<&str>, kind: LabelKind) {
        if let Some(text) = label {
            tracing::debug!(frame = self.frame_index, ?kind, text, "set frame label");
            self.writer.set_frame_label(text, kind);
        }
    }

    /// Finalize the timeline into `model`.
    ///
    /// `resource_id` `0` marks the main timeline.
    pub fn build(
        self,
        resource_id: ResourceId,
        name: Option<&str>,
        model: &mut DocumentModel,
    ) -> TimelineKey {
        model.push_timeline(self.writer.finish(resource_id, name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
