use std::path::{Path, PathBuf};

use crate::compile::{CompiledBundle, compile_with};
use crate::foundation::core::{ResourceId, Stage};
use crate::foundation::error::{PublishError, PublishResult};
use crate::host::scene::{SceneDocument, SceneTimeline};
use crate::model::document::DocumentModel;
use crate::palette::{ExportServices, ResourcePalette};
use crate::publish::settings::{PublishSettings, derive_output_path};
use crate::publish::traverse::{ExportContext, FrameCommandGenerator, FrameRange};
use crate::timeline::builder::TimelineBuilderFactory;

/// What a publish wrote.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PublishReport {
    /// Markup file.
    pub markup_path: PathBuf,
    /// Script file.
    pub script_path: PathBuf,
    /// Exported resources.
    pub resources: usize,
    /// Finalized timelines, main included.
    pub timelines: usize,
    /// Script actions.
    pub actions: usize,
    /// Entries in the layer index.
    pub frames: usize,
    /// `true` when the runtime folder was refreshed.
    pub runtime_copied: bool,
}

/// Model and stage collected from a document, before compilation.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectedDocument {
    /// Stage settings.
    pub stage: Stage,
    /// Populated model.
    pub model: DocumentModel,
}

/// State owned by one export: palette, model and builder factory.
struct Session {
    palette: ResourcePalette,
    model: DocumentModel,
    factory: TimelineBuilderFactory,
}

impl Session {
    fn new(output_dir: &Path, settings: &PublishSettings) -> Self {
        Self {
            palette: ResourcePalette::with_folders(output_dir, &settings.media_folders()),
            model: DocumentModel::new(),
            factory: TimelineBuilderFactory::new(),
        }
    }

    fn collect(
        mut self,
        doc: &SceneDocument,
        scene: &SceneTimeline,
        range: Option<FrameRange>,
        linkage: bool,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<DocumentModel> {
        let mut generator = FrameCommandGenerator::new(doc);
        let mut cx = ExportContext {
            palette: &mut self.palette,
            model: &mut self.model,
            factory: &mut self.factory,
            services,
        };
        let builder = generator.generate(&mut cx, scene, range)?;
        builder.build(ResourceId::NONE, None, cx.model);

        if linkage {
            let n = generator.export_linkage(&mut cx)?;
            if n > 0 {
                tracing::debug!(items = n, "exported linkage items");
            }
        }

        tracing::debug!(builders = self.factory.created(), "frame commands generated");
        self.model.attach_resources(self.palette.take_resources());
        Ok(self.model)
    }
}

/// Timeline, frames and destination of one publish.
struct Target<'d> {
    scene: &'d SceneTimeline,
    range: Option<FrameRange>,
    linkage: bool,
    stage: Stage,
    markup_path: PathBuf,
}

fn output_dir(markup: &Path) -> PathBuf {
    match markup.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Entry point for publishing scene documents.
#[derive(Clone, Debug, Default)]
pub struct Publisher {
    settings: PublishSettings,
}

impl Publisher {
    /// Publisher using `settings`.
    pub fn new(settings: PublishSettings) -> Self {
        Self { settings }
    }

    /// Active settings.
    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    fn single_scene(doc: &SceneDocument) -> PublishResult<&SceneTimeline> {
        match doc.scenes.as_slice() {
            [scene] => Ok(scene),
            scenes => Err(PublishError::validation(format!(
                "whole-document publish supports exactly one scene, found {}",
                scenes.len()
            ))),
        }
    }

    /// Collect the whole-document model without writing markup or script.
    ///
    /// Media still go through `services`; pass no media exporter for a dry run.
    pub fn collect_document(
        &self,
        doc: &SceneDocument,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<CollectedDocument> {
        self.settings.validate()?;
        doc.validate()?;
        let stage = doc.stage()?;
        let scene = Self::single_scene(doc)?;
        let dir = derive_output_path(&self.settings, doc.path.as_deref(), None)
            .map(|p| output_dir(&p))
            .unwrap_or_else(|_| PathBuf::from("."));
        let model = Session::new(&dir, &self.settings).collect(doc, scene, None, true, services)?;
        Ok(CollectedDocument { stage, model })
    }

    /// Publish the document's single scene plus its linkage items.
    #[tracing::instrument(skip_all, fields(doc = ?doc.path))]
    pub fn publish_document(
        &self,
        doc: &SceneDocument,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<PublishReport> {
        self.settings.validate()?;
        doc.validate()?;
        let stage = doc.stage()?;
        let scene = Self::single_scene(doc)?;
        let markup_path = derive_output_path(&self.settings, doc.path.as_deref(), None)?;
        let target = Target {
            scene,
            range: None,
            linkage: true,
            stage,
            markup_path,
        };
        self.run(doc, target, services)
    }

    /// Publish one scene, restricted to `range` when given; the output name carries the scene.
    #[tracing::instrument(skip_all, fields(doc = ?doc.path, scene = scene_name))]
    pub fn publish_scene(
        &self,
        doc: &SceneDocument,
        scene_name: &str,
        range: Option<FrameRange>,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<PublishReport> {
        self.settings.validate()?;
        doc.validate()?;
        let stage = doc.stage()?;
        let scene = doc
            .scene(scene_name)
            .ok_or_else(|| PublishError::validation(format!("no scene named '{scene_name}'")))?;
        let markup_path =
            derive_output_path(&self.settings, doc.path.as_deref(), Some(scene_name))?;
        let target = Target {
            scene,
            range,
            linkage: false,
            stage,
            markup_path,
        };
        self.run(doc, target, services)
    }

    fn run(
        &self,
        doc: &SceneDocument,
        target: Target<'_>,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<PublishReport> {
        let Target {
            scene,
            range,
            linkage,
            stage,
            markup_path,
        } = target;
        let dir = output_dir(&markup_path);
        tracing::info!(out = %markup_path.display(), "publishing");
        services.output.create_dir(&dir)?;

        let model =
            Session::new(&dir, &self.settings).collect(doc, scene, range, linkage, services)?;
        let bundle = compile_with(&model, &stage, &self.settings.scaffold())?;

        let script_path = dir.join(&self.settings.script_file);
        services.output.write_text(&markup_path, &bundle.markup)?;
        services.output.write_text(&script_path, &bundle.script)?;
        tracing::info!(
            markup = %markup_path.display(),
            script = %script_path.display(),
            actions = bundle.action_count,
            "wrote artifacts"
        );

        let runtime_copied = self.copy_runtime(&dir, services)?;
        Ok(report(&model, &bundle, markup_path, script_path, runtime_copied))
    }

    fn copy_runtime(&self, dir: &Path, services: &mut ExportServices<'_>) -> PublishResult<bool> {
        let Some(src) = &self.settings.copy_runtime_from else {
            return Ok(false);
        };
        let dest = dir.join(&self.settings.runtime_folder);
        services.output.remove_dir(&dest)?;
        services.output.copy_dir(src, &dest)?;
        tracing::info!(from = %src.display(), to = %dest.display(), "copied runtime");
        Ok(true)
    }
}

fn report(
    model: &DocumentModel,
    bundle: &CompiledBundle,
    markup_path: PathBuf,
    script_path: PathBuf,
    runtime_copied: bool,
) -> PublishReport {
    PublishReport {
        markup_path,
        script_path,
        resources: model.resources().len(),
        timelines: model.timelines().len(),
        actions: bundle.action_count,
        frames: bundle.layers.len(),
        runtime_copied,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/publish/session.rs"]
mod tests;
