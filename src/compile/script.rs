//! Lowering of frame commands into player script actions.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::compile::markup::css_matrix;
use crate::foundation::core::{ObjectId, ResourceId, Stacking, fmt_num};
use crate::model::resource::ResourceSet;
use crate::timeline::command::{FrameCommand, LoopMode, PlacedMedia, SoundPlacement, SyncMode};

const SAMPLES_PER_SECOND: f64 = 44_100.0;

/// Helpers every generated script declares before its actions.
const PRELUDE: &str = "\
    const canvas = document.querySelector('#canvas');
    const objects = new Map();
    const el = (id) => document.querySelector('.el_' + id);
    const obj = (oid) => objects.get(oid);
    const insertAfter = (node, ref) => ref.parentNode.insertBefore(node, ref.nextSibling);
    const place = (parent, id, oid, after, transform) => {
        const node = el(id);
        if (!node || !parent) { return; }
        objects.set(oid, node);
        node.style.display = '';
        if (transform) { node.style.transformOrigin = '0 0'; node.style.transform = transform; }
        const ref = after === 0 ? undefined : obj(after);
        if (ref && ref.parentNode) { insertAfter(node, ref); } else { parent.appendChild(node); }
    };
    const restack = (oid, after) => {
        const node = obj(oid);
        if (!node || !node.parentNode) { return; }
        const ref = after === 0 ? undefined : obj(after);
        if (ref && ref.parentNode) { insertAfter(node, ref); } else { node.parentNode.appendChild(node); }
    };
    const remove = (oid) => {
        const node = obj(oid);
        if (!node) { return; }
        objects.delete(oid);
        if (node instanceof HTMLAudioElement) { node.pause(); } else { node.style.display = 'none'; }
    };
    const style = (oid, key, value) => {
        const node = obj(oid);
        if (node && node.style) { node.style[key] = value; }
    };
    const playSound = (oid, snd, repeat, start) => {
        objects.set(oid, snd);
        let left = repeat;
        snd.onended = () => {
            left -= 1;
            if (left > 0) { snd.currentTime = start; snd.play(); }
        };
        snd.currentTime = start;
        snd.play();
    };
";

/// Tail that drives frames at the document rate.
const DRIVER: &str = "\
    let frame = 0;
    let fpsInterval, then, elapsed;
    const callLayers = () => {
        const entry = layers[frame];
        if (entry) { entry.forEach((i) => frames[i]()); }
    };
    const loop = () => {
        requestAnimationFrame(loop);
        const now = Date.now();
        elapsed = now - then;
        if (elapsed > fpsInterval) {
            then = now - (elapsed % fpsInterval);
            frame += 1;
            callLayers();
        }
    };
    const startAnimation = () => {
        fpsInterval = 1000 / FPS;
        then = Date.now();
        callLayers();
        requestAnimationFrame(loop);
    };
    startAnimation();
";

/// JavaScript string literal.
fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

pub(crate) fn sound_var(id: ResourceId) -> String {
    format!("snd_{id}")
}

/// Expression naming the element a timeline places its children into.
pub(crate) fn parent_expr(symbol: Option<ResourceId>) -> String {
    match symbol {
        None => "canvas".to_string(),
        Some(id) => format!("el({})", id.0),
    }
}

fn stacking_ref(stacking: Stacking) -> u32 {
    match stacking {
        Stacking::Bottom => 0,
        Stacking::After(ObjectId(oid)) => oid,
    }
}

fn has_audio(resources: &ResourceSet, id: ResourceId) -> bool {
    resources.sound(id).is_some_and(|s| s.path.is_some())
}

fn sound_cue(object_id: ObjectId, resource_id: ResourceId, cue: &SoundPlacement) -> String {
    let var = sound_var(resource_id);
    let repeat = match cue.loop_mode {
        LoopMode::None => "1".to_string(),
        LoopMode::Repeat => cue.repeat_count.max(1).to_string(),
        LoopMode::Loop => "Infinity".to_string(),
    };
    let start = fmt_num(f64::from(cue.in_pos44) / SAMPLES_PER_SECOND);
    let play = format!("playSound({object_id}, {var}, {repeat}, {start});");
    match cue.sync {
        SyncMode::Start => format!("if ({var}.paused) {{ {play} }}"),
        _ => play,
    }
}

/// Body of the action for one command; `None` when the command is not lowered at all.
pub(crate) fn lower(
    cmd: &FrameCommand,
    parent: &str,
    resources: &ResourceSet,
) -> Option<String> {
    let body = match cmd {
        FrameCommand::Place {
            resource_id,
            object_id,
            stacking: Some(stacking),
            matrix,
            ..
        } => {
            let transform = matrix
                .map(|m| js_str(&css_matrix(m)))
                .unwrap_or_else(|| "null".to_string());
            format!(
                "place({parent}, {}, {object_id}, {}, {transform});",
                resource_id.0,
                stacking_ref(*stacking)
            )
        }
        FrameCommand::Place {
            resource_id,
            object_id,
            stacking: None,
            media,
            ..
        } => match media {
            Some(PlacedMedia::Sound(cue)) if has_audio(resources, *resource_id) => {
                sound_cue(*object_id, *resource_id, cue)
            }
            _ => {
                tracing::debug!(resource = %resource_id, "audio cue without an exported sound");
                String::new()
            }
        },
        FrameCommand::Remove { object_id } => format!("remove({object_id});"),
        FrameCommand::UpdateZOrder {
            object_id,
            stacking,
        } => format!("restack({object_id}, {});", stacking_ref(*stacking)),
        FrameCommand::UpdateMask { object_id, .. } => {
            tracing::trace!(object = %object_id, "mask update skipped");
            return None;
        }
        FrameCommand::UpdateBlendMode { object_id, mode } => {
            format!("style({object_id}, 'mixBlendMode', {});", js_str(mode.css()))
        }
        FrameCommand::UpdateVisibility { object_id, visible } => {
            let v = if *visible { "visible" } else { "hidden" };
            format!("style({object_id}, 'visibility', '{v}');")
        }
        FrameCommand::Move { object_id, matrix } => format!(
            "style({object_id}, 'transformOrigin', '0 0'); style({object_id}, 'transform', {});",
            js_str(&css_matrix(*matrix))
        ),
        FrameCommand::UpdateFilter { .. }
        | FrameCommand::SetFrameScript { .. }
        | FrameCommand::ClearFrameScript { .. }
        | FrameCommand::SetFrameLabel { .. } => String::new(),
    };
    Some(body)
}

/// Actions and the per-frame layer index, accumulated across timelines.
#[derive(Debug, Default)]
pub(crate) struct ActionTable {
    actions: Vec<String>,
    layers: BTreeMap<u32, Vec<usize>>,
}

impl ActionTable {
    /// Append one action for frame `frame`, returning its global index.
    pub(crate) fn push(&mut self, frame: u32, body: String) -> usize {
        let idx = self.actions.len();
        self.actions.push(body);
        self.layers.entry(frame).or_default().push(idx);
        idx
    }

    /// Make sure frame `frame` has an entry, even if it stays empty.
    pub(crate) fn touch(&mut self, frame: u32) {
        self.layers.entry(frame).or_default();
    }

    pub(crate) fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Dense layer index from frame 0 to the highest frame seen.
    pub(crate) fn dense_layers(&self) -> Vec<Vec<usize>> {
        let Some(last) = self.layers.keys().next_back().copied() else {
            return Vec::new();
        };
        (0..=last)
            .map(|f| self.layers.get(&f).cloned().unwrap_or_default())
            .collect()
    }

    fn write_actions(&self, out: &mut String) {
        out.push_str("    const frames = [\n");
        for body in &self.actions {
            if body.is_empty() {
                out.push_str("        () => {},\n");
            } else {
                let _ = writeln!(out, "        () => {{ {body} }},");
            }
        }
        out.push_str("    ];\n");
    }

    fn write_layers(&self, out: &mut String) {
        out.push_str("    const layers = [\n");
        for entry in self.dense_layers() {
            if entry.is_empty() {
                out.push_str("        null,\n");
            } else {
                let list: Vec<String> = entry.iter().map(usize::to_string).collect();
                let _ = writeln!(out, "        [{}],", list.join(","));
            }
        }
        out.push_str("    ];\n");
    }
}

/// Audio element declarations for every sound resource with an exported file.
pub(crate) fn sound_declarations(resources: &ResourceSet) -> String {
    let mut out = String::new();
    for snd in &resources.sounds {
        if let Some(path) = &snd.path {
            let _ = writeln!(
                out,
                "    const {} = new Audio({});",
                sound_var(snd.id),
                js_str(path)
            );
        }
    }
    out
}

/// Full script text: prelude, sounds, actions, layers and driver.
pub(crate) fn assemble(sounds: &str, table: &ActionTable) -> String {
    let mut out = String::from("document.addEventListener('DOMContentLoaded', function() {\n");
    out.push_str(PRELUDE);
    out.push_str(sounds);
    table.write_actions(&mut out);
    table.write_layers(&mut out);
    out.push_str(DRIVER);
    out.push_str("});\n");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compile/script.rs"]
mod tests;
