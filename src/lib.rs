//! stagepub publishes vector-animation documents as a standalone player bundle.
//!
//! A publish walks an authoring document and produces four things:
//!
//! - Resources (shapes, bitmaps, sounds, classic text, symbols). The [`ResourcePalette`] exports
//!   each one at most once.
//! - Frame commands per timeline, recorded through a [`TimelineBuilder`].
//! - A [`DocumentModel`] that collects the resources and timelines.
//! - A compiled [`CompiledBundle`]: `script.js` plus an HTML document that plays the timeline
//!   frame by frame.
//!
//! [`Publisher`] drives the whole pipeline from a [`SceneDocument`]. The individual stages are
//! public so hosts with their own traversal can feed the builders directly.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compile;
mod foundation;
mod host;
mod model;
mod palette;
mod publish;
mod timeline;

pub use crate::foundation::core::{
    Affine, BezPath, Color, FrameIndex, ObjectId, PathEl, Point, ResourceId, Stacking, Stage,
    Vec2, fmt_matrix, fmt_num,
};
pub use crate::foundation::error::{PublishError, PublishResult};

pub use crate::host::media::{FsMediaExporter, MediaExporter, MediaItem};
pub use crate::host::outline::OutlineShapeService;
pub use crate::host::output::{FsSink, InMemorySink, OutputSink};
pub use crate::host::scene::{
    FrameOp, LibraryEntry, LibraryItem, SceneDocument, SceneFrame, SceneTimeline, StageDef,
    SymbolKind,
};
pub use crate::host::shape::{
    CapStyle, ColorPoint, ColorRamp, DashPattern, EdgePath, FillStyle, FilledRegion,
    GradientStop, JoinStyle, Segment, Shape, ShapeService, SpreadMode, StrokeBase, StrokeGroup,
    StrokeScaleType, StrokeStyle, WidthPoint, ramp_stops,
};
pub use crate::host::text::{ClassicText, FontStyle, Paragraph, TextBehavior, TextRun};

pub use crate::palette::{ExportServices, MediaFolders, ResourcePalette};

pub use crate::timeline::builder::{DisplayObjectInfo, TimelineBuilder, TimelineBuilderFactory};
pub use crate::timeline::command::{
    BlendMode, ButtonTracking, ColorTransform, Frame, FrameCommand, LabelKind, LoopMode,
    PlacedMedia, SoundPlacement, SyncMode, Timeline,
};
pub use crate::timeline::filter::{
    AdjustColorFilter, BevelFilter, BlurFilter, DropShadowFilter, Filter, FilterPlacement,
    FilterQuality, GlowFilter, GradientFilter,
};
pub use crate::timeline::writer::TimelineWriter;

pub use crate::model::document::{DocumentModel, TimelineKey};
pub use crate::model::resource::{
    BitmapPattern, BitmapResource, FontDescriptor, LinearGradient, Paint, PathKind, PathRecord,
    RadialGradient, ResourceRecord, ResourceSet, ShapeResource, SoundResource, StrokeAttrs,
    TextResource,
};

pub use crate::compile::{CompileStage, CompiledBundle, ScaffoldOptions, compile, compile_with};

pub use crate::publish::session::{CollectedDocument, PublishReport, Publisher};
pub use crate::publish::settings::{OUTPUT_EXTENSION, PublishSettings, derive_output_path};
pub use crate::publish::traverse::FrameRange;
