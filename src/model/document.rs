use crate::foundation::core::ResourceId;
use crate::model::resource::ResourceSet;
use crate::timeline::command::Timeline;

/// Position of a finalized timeline inside a [`DocumentModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TimelineKey(pub usize);

/// Root of the intermediate tree handed to the compiler.
///
/// Created at the start of a publish, populated during traversal, then borrowed read-only by
/// [`crate::compile`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentModel {
    resources: ResourceSet,
    timelines: Vec<Timeline>,
}

impl DocumentModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from already-collected parts.
    pub fn from_parts(resources: ResourceSet, timelines: Vec<Timeline>) -> Self {
        Self {
            resources,
            timelines,
        }
    }

    /// Exported resources.
    pub fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    /// Finalized timelines in finalization order (nested symbols before their parents).
    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    /// Take ownership of a finalized timeline.
    pub fn push_timeline(&mut self, timeline: Timeline) -> TimelineKey {
        let key = TimelineKey(self.timelines.len());
        tracing::debug!(
            key = key.0,
            resource = ?timeline.resource_id,
            frames = timeline.frames.len(),
            "timeline finalized"
        );
        self.timelines.push(timeline);
        key
    }

    /// Install the palette's resource collections.
    pub fn attach_resources(&mut self, resources: ResourceSet) {
        self.resources = resources;
    }

    /// Borrow a timeline by key.
    pub fn timeline(&self, key: TimelineKey) -> Option<&Timeline> {
        self.timelines.get(key.0)
    }

    /// The main timeline, if finalized.
    pub fn main_timeline(&self) -> Option<&Timeline> {
        self.timelines.iter().find(|t| t.is_main())
    }

    /// Timeline of a symbol resource.
    pub fn symbol_timeline(&self, id: ResourceId) -> Option<&Timeline> {
        self.timelines.iter().find(|t| t.resource_id == Some(id))
    }

    /// `true` when the model holds neither resources nor timelines.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.timelines.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/document.rs"]
mod tests;
