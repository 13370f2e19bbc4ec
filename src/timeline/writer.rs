use crate::foundation::core::{Affine, FrameIndex, ObjectId, ResourceId, Stacking};
use crate::host::shape::ramp_stops;
use crate::timeline::command::{
    BlendMode, ColorTransform, Frame, FrameCommand, LabelKind, PlacedMedia, SoundPlacement,
    SyncMode, Timeline,
};
use crate::timeline::filter::Filter;

/// Append-only command log of one timeline.
///
/// Commands accumulate into the current frame until [`TimelineWriter::show_frame`] seals it.
/// [`TimelineWriter::finish`] consumes the writer, so a timeline is finalized exactly once.
#[derive(Debug, Default)]
pub struct TimelineWriter {
    frames: Vec<Frame>,
    pending: Vec<FrameCommand>,
}

impl TimelineWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sealed frames so far.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Commands of the frame being built.
    pub fn pending_commands(&self) -> &[FrameCommand] {
        &self.pending
    }

    /// Place a display resource instance.
    pub fn place(
        &mut self,
        resource_id: ResourceId,
        object_id: ObjectId,
        stacking: Stacking,
        matrix: Option<Affine>,
        media: Option<PlacedMedia>,
    ) {
        self.pending.push(FrameCommand::Place {
            resource_id,
            object_id,
            stacking: Some(stacking),
            matrix,
            media,
        });
    }

    /// Place a sound instance; it has no stacking or matrix.
    pub fn place_with_audio(
        &mut self,
        resource_id: ResourceId,
        object_id: ObjectId,
        sound: Option<SoundPlacement>,
    ) {
        // Stop-sync sounds arrive as removals.
        debug_assert!(
            sound.is_none_or(|s| s.sync != SyncMode::Stop),
            "stop-sync sound reached a placement"
        );
        self.pending.push(FrameCommand::Place {
            resource_id,
            object_id,
            stacking: None,
            matrix: None,
            media: sound.map(PlacedMedia::Sound),
        });
    }

    /// Remove an instance.
    pub fn remove(&mut self, object_id: ObjectId) {
        self.pending.push(FrameCommand::Remove { object_id });
    }

    /// Restack an instance.
    pub fn update_z_order(&mut self, object_id: ObjectId, stacking: Stacking) {
        self.pending
            .push(FrameCommand::UpdateZOrder { object_id, stacking });
    }

    /// Masks are not supported by the player; the update is dropped.
    pub fn update_mask(&mut self, object_id: ObjectId, mask_till: ObjectId) {
        tracing::debug!(%object_id, %mask_till, "mask update ignored: masking is unsupported");
    }

    /// Change an instance's blend mode.
    pub fn update_blend_mode(&mut self, object_id: ObjectId, mode: BlendMode) {
        self.pending
            .push(FrameCommand::UpdateBlendMode { object_id, mode });
    }

    /// Show or hide an instance.
    pub fn update_visibility(&mut self, object_id: ObjectId, visible: bool) {
        self.pending
            .push(FrameCommand::UpdateVisibility { object_id, visible });
    }

    /// Attach one filter; gradient variants get their ramp exported as stops.
    pub fn add_filter(&mut self, object_id: ObjectId, filter: Filter) {
        let stops = filter.ramp().map(|r| ramp_stops(r)).unwrap_or_default();
        self.pending.push(FrameCommand::UpdateFilter {
            object_id,
            filter,
            stops,
        });
    }

    /// Move an instance.
    pub fn update_transform(&mut self, object_id: ObjectId, matrix: Affine) {
        self.pending.push(FrameCommand::Move { object_id, matrix });
    }

    /// Reserved; color transforms are not recorded yet.
    pub fn update_color_transform(&mut self, object_id: ObjectId, transform: &ColorTransform) {
        tracing::trace!(%object_id, ?transform, "color transform not recorded");
    }

    /// Seal the current frame and start a new one. Returns the sealed frame's index.
    pub fn show_frame(&mut self) -> FrameIndex {
        let index = FrameIndex(self.frames.len() as u32);
        self.frames.push(Frame {
            index,
            commands: std::mem::take(&mut self.pending),
        });
        index
    }

    /// Attach a frame script for `layer`.
    pub fn add_frame_script(&mut self, text: &str, layer: u32) {
        self.pending.push(FrameCommand::SetFrameScript {
            layer,
            text: text.to_string(),
        });
    }

    /// Drop the frame script of `layer`.
    pub fn remove_frame_script(&mut self, layer: u32) {
        self.pending.push(FrameCommand::ClearFrameScript { layer });
    }

    /// Label the current frame.
    pub fn set_frame_label(&mut self, text: &str, kind: LabelKind) {
        self.pending.push(FrameCommand::SetFrameLabel {
            kind,
            text: text.to_string(),
        });
    }

    /// Finalize into a timeline record. Resource id `0` marks the main timeline.
    ///
    /// Commands issued after the last `show_frame` belong to no frame and are dropped.
    pub fn finish(self, resource_id: ResourceId, name: Option<&str>) -> Timeline {
        if !self.pending.is_empty() {
            tracing::warn!(
                resource = %resource_id,
                dropped = self.pending.len(),
                "timeline finished with unsealed commands"
            );
        }
        Timeline {
            resource_id: resource_id.non_zero(),
            name: name.map(str::to_string),
            frames: self.frames,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/writer.rs"]
mod tests;
