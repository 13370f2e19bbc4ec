//! Authoring document as the host hands it to the publisher.
//!
//! The document is plain data: stage settings, a library of items keyed by resource id, and one
//! or more scene timelines made of per-frame operations. Symbols in the library carry their own
//! timelines. Operations reference library items by resource id and display instances by object
//! id, the same numbering the recorded frame commands use.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use kurbo::Rect;

use crate::foundation::core::{Affine, Color, ObjectId, ResourceId, Stage};
use crate::foundation::error::{PublishError, PublishResult};
use crate::host::media::MediaItem;
use crate::host::shape::Shape;
use crate::host::text::ClassicText;
use crate::timeline::command::{BlendMode, ButtonTracking, ColorTransform, LabelKind, SoundPlacement};
use crate::timeline::filter::Filter;

/// Stage settings as authored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageDef {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Background color.
    #[serde(default = "white")]
    pub background: Color,
    /// Frame rate; fractional rates are truncated on publish.
    pub frame_rate: f64,
}

fn white() -> Color {
    Color::WHITE
}

/// Kind of a library symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolKind {
    /// Movie clip.
    MovieClip,
    /// Graphic symbol.
    Graphic,
    /// Button.
    Button {
        /// Pointer tracking.
        #[serde(default)]
        tracking: ButtonTracking,
    },
}

/// Payload of a library entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LibraryItem {
    /// Vector shape.
    Shape(Shape),
    /// Bitmap.
    Bitmap(MediaItem),
    /// Sound.
    Sound(MediaItem),
    /// Classic text field.
    Text(ClassicText),
    /// Symbol with its own timeline.
    Symbol {
        /// Symbol kind.
        symbol: SymbolKind,
        /// Nested timeline.
        timeline: SceneTimeline,
    },
}

impl LibraryItem {
    fn kind_name(&self) -> &'static str {
        match self {
            LibraryItem::Shape(_) => "shape",
            LibraryItem::Bitmap(_) => "bitmap",
            LibraryItem::Sound(_) => "sound",
            LibraryItem::Text(_) => "text",
            LibraryItem::Symbol { .. } => "symbol",
        }
    }
}

/// One library item with its resource id.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LibraryEntry {
    /// Resource id, non-zero.
    pub id: ResourceId,
    /// Library name.
    pub name: String,
    /// Exported for runtime linkage even when never placed.
    #[serde(default)]
    pub linkage: bool,
    /// Payload.
    pub item: LibraryItem,
}

/// Frame-level operation of a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FrameOp {
    /// Place a display instance of a library item.
    Place {
        /// Instance id.
        object_id: ObjectId,
        /// Library item.
        resource_id: ResourceId,
        /// Instance to stack above; absent or `0` stacks at the bottom.
        #[serde(default)]
        place_after: Option<ObjectId>,
        /// Placement matrix.
        #[serde(default)]
        matrix: Option<Affine>,
        /// Text field bounds, for text placements.
        #[serde(default)]
        bounds: Option<Rect>,
    },
    /// Start a sound.
    PlaceSound {
        /// Instance id.
        object_id: ObjectId,
        /// Sound item.
        resource_id: ResourceId,
        /// Cue parameters.
        #[serde(default)]
        sound: Option<SoundPlacement>,
    },
    /// Remove an instance.
    Remove {
        /// Instance id.
        object_id: ObjectId,
    },
    /// Restack an instance.
    ZOrder {
        /// Instance id.
        object_id: ObjectId,
        /// Instance to stack above; `0` stacks at the bottom.
        place_after: ObjectId,
    },
    /// Turn an instance into a mask.
    Mask {
        /// Instance id.
        object_id: ObjectId,
        /// Last masked instance.
        mask_till: ObjectId,
    },
    /// Change blend mode.
    BlendMode {
        /// Instance id.
        object_id: ObjectId,
        /// Mode.
        mode: BlendMode,
    },
    /// Show or hide.
    Visibility {
        /// Instance id.
        object_id: ObjectId,
        /// Visibility.
        visible: bool,
    },
    /// Attach filters.
    Filters {
        /// Instance id.
        object_id: ObjectId,
        /// Filters in order.
        filters: Vec<Filter>,
    },
    /// Move an instance.
    Transform {
        /// Instance id.
        object_id: ObjectId,
        /// New matrix.
        matrix: Affine,
    },
    /// Change color transform.
    ColorTransform {
        /// Instance id.
        object_id: ObjectId,
        /// Transform.
        transform: ColorTransform,
    },
    /// Frame script.
    Script {
        /// Layer number.
        #[serde(default)]
        layer: u32,
        /// Script text.
        text: String,
    },
    /// Clear a frame script.
    ClearScript {
        /// Layer number.
        #[serde(default)]
        layer: u32,
    },
    /// Frame label.
    Label {
        /// Label kind.
        #[serde(default)]
        kind: LabelKind,
        /// Label text.
        text: String,
    },
}

/// One authored frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneFrame {
    /// Operations in order.
    #[serde(default)]
    pub ops: Vec<FrameOp>,
}

/// Scene or symbol timeline.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneTimeline {
    /// Scene name; empty for symbol timelines.
    #[serde(default)]
    pub name: String,
    /// Frames in order.
    #[serde(default)]
    pub frames: Vec<SceneFrame>,
}

/// Whole authoring document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDocument {
    /// Location of the saved document, used to derive output paths.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Stage settings.
    pub stage: StageDef,
    /// Library items.
    #[serde(default)]
    pub library: Vec<LibraryEntry>,
    /// Scenes in order.
    pub scenes: Vec<SceneTimeline>,
}

impl SceneDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(s: &str) -> PublishResult<Self> {
        serde_json::from_str(s).map_err(|e| PublishError::serde(e.to_string()))
    }

    /// Read a document from a JSON file; a missing `path` is filled with the file location.
    pub fn from_json_file(path: &Path) -> PublishResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PublishError::io(path, e))?;
        let mut doc = Self::from_json_str(&text)?;
        if doc.path.is_none() {
            doc.path = Some(path.to_path_buf());
        }
        Ok(doc)
    }

    /// Library entry with resource id `id`.
    pub fn entry(&self, id: ResourceId) -> Option<&LibraryEntry> {
        self.library.iter().find(|e| e.id == id)
    }

    /// Scene named `name`.
    pub fn scene(&self, name: &str) -> Option<&SceneTimeline> {
        self.scenes.iter().find(|s| s.name == name)
    }

    /// Validated stage settings.
    pub fn stage(&self) -> PublishResult<Stage> {
        Stage::from_frame_rate(
            self.stage.width,
            self.stage.height,
            self.stage.background,
            self.stage.frame_rate,
        )
    }

    /// Check ids and the item kinds every operation references.
    pub fn validate(&self) -> PublishResult<()> {
        self.stage()?;
        if self.stage.width == 0 || self.stage.height == 0 {
            return Err(PublishError::validation("stage width/height must be > 0"));
        }

        let mut seen = HashSet::new();
        for e in &self.library {
            if e.id == ResourceId::NONE {
                return Err(PublishError::validation(format!(
                    "library item '{}' has resource id 0",
                    e.name
                )));
            }
            if !seen.insert(e.id) {
                return Err(PublishError::validation(format!(
                    "library id {} is used twice",
                    e.id
                )));
            }
        }

        for scene in &self.scenes {
            self.validate_timeline(&scene.name, scene)?;
        }
        for e in &self.library {
            if let LibraryItem::Symbol { timeline, .. } = &e.item {
                self.validate_timeline(&e.name, timeline)?;
            }
        }
        Ok(())
    }

    fn validate_timeline(&self, owner: &str, timeline: &SceneTimeline) -> PublishResult<()> {
        for (i, frame) in timeline.frames.iter().enumerate() {
            for op in &frame.ops {
                let (id, wants_sound) = match op {
                    FrameOp::Place { resource_id, .. } => (*resource_id, false),
                    FrameOp::PlaceSound { resource_id, .. } => (*resource_id, true),
                    _ => continue,
                };
                let Some(entry) = self.entry(id) else {
                    return Err(PublishError::validation(format!(
                        "'{owner}' frame {i} references missing library id {id}"
                    )));
                };
                let is_sound = matches!(entry.item, LibraryItem::Sound(_));
                if is_sound != wants_sound {
                    return Err(PublishError::validation(format!(
                        "'{owner}' frame {i} cannot place {} '{}' that way",
                        entry.item.kind_name(),
                        entry.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scene.rs"]
mod tests;
