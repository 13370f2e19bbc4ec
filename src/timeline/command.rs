use smallvec::SmallVec;

use crate::foundation::core::{Affine, FrameIndex, ObjectId, ResourceId, Stacking};
use crate::host::shape::GradientStop;
use crate::timeline::filter::Filter;

/// Blend mode of a display object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Normal.
    #[default]
    Normal,
    /// Layer.
    Layer,
    /// Darken.
    Darken,
    /// Multiply.
    Multiply,
    /// Lighten.
    Lighten,
    /// Screen.
    Screen,
    /// Overlay.
    Overlay,
    /// Hard light.
    Hardlight,
    /// Add.
    Add,
    /// Subtract.
    Subtract,
    /// Difference.
    Difference,
    /// Invert.
    Invert,
    /// Alpha.
    Alpha,
    /// Erase.
    Erase,
}

impl BlendMode {
    const ALL: [BlendMode; 14] = [
        BlendMode::Normal,
        BlendMode::Layer,
        BlendMode::Darken,
        BlendMode::Multiply,
        BlendMode::Lighten,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Hardlight,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::Difference,
        BlendMode::Invert,
        BlendMode::Alpha,
        BlendMode::Erase,
    ];

    /// Decode the host's numeric blend mode (`0..=13`).
    pub fn from_raw(raw: u8) -> Option<BlendMode> {
        Self::ALL.get(usize::from(raw)).copied()
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "Normal",
            BlendMode::Layer => "Layer",
            BlendMode::Darken => "Darken",
            BlendMode::Multiply => "Multiply",
            BlendMode::Lighten => "Lighten",
            BlendMode::Screen => "Screen",
            BlendMode::Overlay => "Overlay",
            BlendMode::Hardlight => "Hardlight",
            BlendMode::Add => "Add",
            BlendMode::Subtract => "Subtract",
            BlendMode::Difference => "Difference",
            BlendMode::Invert => "Invert",
            BlendMode::Alpha => "Alpha",
            BlendMode::Erase => "Erase",
        }
    }

    /// CSS `mix-blend-mode` value; modes the browser cannot express fall back to `normal`.
    pub fn css(self) -> &'static str {
        match self {
            BlendMode::Darken => "darken",
            BlendMode::Multiply => "multiply",
            BlendMode::Lighten => "lighten",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Hardlight => "hard-light",
            BlendMode::Add => "plus-lighter",
            BlendMode::Difference => "difference",
            BlendMode::Normal
            | BlendMode::Layer
            | BlendMode::Subtract
            | BlendMode::Invert
            | BlendMode::Alpha
            | BlendMode::Erase => "normal",
        }
    }
}

/// Sound loop behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Play once.
    #[default]
    None,
    /// Play `repeat_count` times.
    Repeat,
    /// Loop forever.
    Loop,
}

/// Sound synchronization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Start independently of the timeline.
    #[default]
    Event,
    /// Start unless already playing.
    Start,
    /// Stop the sound. Hosts model this as a removal, so it never reaches a placement.
    Stop,
    /// Stream in sync with the timeline.
    Stream,
}

/// Sound cue parameters of an audio placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SoundPlacement {
    /// Loop behavior.
    pub loop_mode: LoopMode,
    /// Repeat count for [`LoopMode::Repeat`].
    pub repeat_count: u32,
    /// Sync mode, never [`SyncMode::Stop`].
    pub sync: SyncMode,
    /// Playback start, in 44 kHz samples.
    pub in_pos44: u32,
    /// Playback end, in 44 kHz samples.
    pub out_pos44: u32,
}

/// How a button tracks the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonTracking {
    /// Track as a button.
    #[default]
    AsButton,
    /// Track as a menu item.
    AsMenuItem,
}

/// Extra media carried by a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacedMedia {
    /// Movie clip instance.
    MovieClip,
    /// Graphic symbol instance.
    Graphic,
    /// Button instance.
    Button {
        /// Pointer tracking mode.
        tracking: ButtonTracking,
    },
    /// Sound cue.
    Sound(SoundPlacement),
}

/// Frame label kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    /// No label.
    #[default]
    None,
    /// Named frame.
    Name,
    /// Comment.
    Comment,
    /// Anchor.
    Anchor,
}

impl LabelKind {
    /// Decode the host's numeric label kind.
    pub fn from_raw(raw: u8) -> LabelKind {
        match raw {
            1 => LabelKind::Name,
            2 => LabelKind::Comment,
            3 => LabelKind::Anchor,
            _ => LabelKind::None,
        }
    }
}

/// Color transform of a display object (multipliers and offsets for r, g, b, a).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorTransform {
    /// Channel multipliers.
    pub mul: [f64; 4],
    /// Channel offsets.
    pub add: [f64; 4],
}

impl Default for ColorTransform {
    fn default() -> Self {
        Self {
            mul: [1.0; 4],
            add: [0.0; 4],
        }
    }
}

/// One recorded timeline command.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum FrameCommand {
    /// Place a resource instance.
    Place {
        /// Placed resource.
        resource_id: ResourceId,
        /// Instance id.
        object_id: ObjectId,
        /// Stacking target; `None` for audio placements that have no display position.
        stacking: Option<Stacking>,
        /// Placement matrix.
        matrix: Option<Affine>,
        /// Movie clip, button or sound details.
        media: Option<PlacedMedia>,
    },
    /// Remove an instance.
    Remove {
        /// Instance id.
        object_id: ObjectId,
    },
    /// Restack an instance.
    UpdateZOrder {
        /// Instance id.
        object_id: ObjectId,
        /// New stacking target.
        stacking: Stacking,
    },
    /// Mask update. Never recorded by the writer: the player has no masking.
    UpdateMask {
        /// Instance id.
        object_id: ObjectId,
        /// Last object covered by the mask.
        mask_till: ObjectId,
    },
    /// Change the blend mode.
    UpdateBlendMode {
        /// Instance id.
        object_id: ObjectId,
        /// New blend mode.
        mode: BlendMode,
    },
    /// Show or hide an instance.
    UpdateVisibility {
        /// Instance id.
        object_id: ObjectId,
        /// Visibility.
        visible: bool,
    },
    /// Attach a filter.
    UpdateFilter {
        /// Instance id.
        object_id: ObjectId,
        /// Filter payload.
        filter: Filter,
        /// Exported stops of gradient filters, empty otherwise.
        stops: SmallVec<[GradientStop; 4]>,
    },
    /// Move an instance.
    Move {
        /// Instance id.
        object_id: ObjectId,
        /// New matrix.
        matrix: Affine,
    },
    /// Attach a frame script.
    SetFrameScript {
        /// Layer number.
        layer: u32,
        /// Script text.
        text: String,
    },
    /// Drop a frame script.
    ClearFrameScript {
        /// Layer number.
        layer: u32,
    },
    /// Label the frame.
    SetFrameLabel {
        /// Label kind.
        kind: LabelKind,
        /// Label text.
        text: String,
    },
}

impl FrameCommand {
    /// Target instance of display commands.
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            FrameCommand::Place { object_id, .. }
            | FrameCommand::Remove { object_id }
            | FrameCommand::UpdateZOrder { object_id, .. }
            | FrameCommand::UpdateMask { object_id, .. }
            | FrameCommand::UpdateBlendMode { object_id, .. }
            | FrameCommand::UpdateVisibility { object_id, .. }
            | FrameCommand::UpdateFilter { object_id, .. }
            | FrameCommand::Move { object_id, .. } => Some(*object_id),
            FrameCommand::SetFrameScript { .. }
            | FrameCommand::ClearFrameScript { .. }
            | FrameCommand::SetFrameLabel { .. } => None,
        }
    }
}

/// A sealed frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Timeline-local index, assigned in emission order.
    pub index: FrameIndex,
    /// Commands in append order.
    pub commands: Vec<FrameCommand>,
}

/// A finalized timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Symbol resource id; `None` for the document's main timeline.
    pub resource_id: Option<ResourceId>,
    /// Symbol name.
    pub name: Option<String>,
    /// Sealed frames in index order.
    pub frames: Vec<Frame>,
}

impl Timeline {
    /// `true` for the document's main timeline.
    pub fn is_main(&self) -> bool {
        self.resource_id.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/command.rs"]
mod tests;
