//! Script and markup compiler.
//!
//! Turns a populated [`DocumentModel`] into two artifacts: a player script holding one action per
//! lowered frame command plus a per-frame layer index, and an HTML document whose stage container
//! carries one hidden element per exported resource. Compilation only reads the model, so compiling
//! the same model twice yields identical output.

use crate::foundation::core::Stage;
use crate::foundation::error::{PublishError, PublishResult};
use crate::model::document::DocumentModel;

pub(crate) mod markup;
pub(crate) mod script;

pub use self::markup::ScaffoldOptions;

/// Progress of one compilation, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CompileStage {
    /// Nothing emitted yet.
    NotStarted,
    /// Writing resource fragments and sound declarations.
    EmittingResources,
    /// Lowering timeline commands into actions.
    EmittingTimelineActions,
    /// Writing the layer index and frame driver.
    EmittingDriver,
    /// Both artifacts complete.
    Done,
}

/// Output of [`compile`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledBundle {
    /// Player script (`script.js`).
    pub script: String,
    /// HTML document.
    pub markup: String,
    /// Global action indices per frame, from frame 0 to the last frame any timeline reached.
    pub layers: Vec<Vec<usize>>,
    /// Number of actions in the script.
    pub action_count: usize,
}

struct Compiler<'m> {
    model: &'m DocumentModel,
    stage: CompileStage,
}

impl<'m> Compiler<'m> {
    fn advance(&mut self, next: CompileStage) {
        debug_assert!(next > self.stage, "compile stage {next:?} after {:?}", self.stage);
        tracing::trace!(from = ?self.stage, to = ?next, "compile stage");
        self.stage = next;
    }

    fn resource_fragments(&self) -> Vec<String> {
        let res = self.model.resources();
        let mut fragments = Vec::with_capacity(res.len());
        fragments.extend(res.shapes.iter().map(markup::shape_fragment));
        fragments.extend(res.bitmaps.iter().map(markup::bitmap_fragment));
        fragments.extend(res.texts.iter().map(markup::text_fragment));
        fragments.extend(
            self.model
                .timelines()
                .iter()
                .filter_map(|t| t.resource_id)
                .map(markup::symbol_fragment),
        );
        fragments
    }

    fn actions(&self) -> script::ActionTable {
        let resources = self.model.resources();
        let mut table = script::ActionTable::default();
        for timeline in self.model.timelines() {
            let parent = script::parent_expr(timeline.resource_id);
            for frame in &timeline.frames {
                let index = frame.index.0;
                table.touch(index);
                for cmd in &frame.commands {
                    if let Some(body) = script::lower(cmd, &parent, resources) {
                        table.push(index, body);
                    }
                }
            }
        }
        table
    }
}

/// Compile with the default runtime folder and script name.
pub fn compile(model: &DocumentModel, stage: &Stage) -> PublishResult<CompiledBundle> {
    compile_with(model, stage, &ScaffoldOptions::default())
}

/// Compile `model` for `stage`, referencing the runtime and script paths in `opts`.
#[tracing::instrument(skip_all, fields(timelines = model.timelines().len(), resources = model.resources().len()))]
pub fn compile_with(
    model: &DocumentModel,
    stage: &Stage,
    opts: &ScaffoldOptions,
) -> PublishResult<CompiledBundle> {
    if stage.fps == 0 {
        return Err(PublishError::validation("stage fps must be > 0"));
    }

    let mut c = Compiler {
        model,
        stage: CompileStage::NotStarted,
    };

    c.advance(CompileStage::EmittingResources);
    let fragments = c.resource_fragments();
    let sounds = script::sound_declarations(model.resources());

    c.advance(CompileStage::EmittingTimelineActions);
    let table = c.actions();

    c.advance(CompileStage::EmittingDriver);
    let script = script::assemble(&sounds, &table);
    let markup = markup::scaffold(stage, opts, &fragments);

    c.advance(CompileStage::Done);
    tracing::debug!(
        actions = table.action_count(),
        fragments = fragments.len(),
        "compiled document"
    );
    Ok(CompiledBundle {
        script,
        markup,
        layers: table.dense_layers(),
        action_count: table.action_count(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compile.rs"]
mod tests;
