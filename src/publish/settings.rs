use std::path::{Path, PathBuf};

use crate::compile::ScaffoldOptions;
use crate::foundation::error::{PublishError, PublishResult};
use crate::palette::MediaFolders;

/// Extension of the generated markup file.
pub const OUTPUT_EXTENSION: &str = "html";

/// Publish settings; every field has a default so a partial JSON object loads.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PublishSettings {
    /// Explicit markup path; derived from the document path when absent.
    pub out_file: Option<PathBuf>,
    /// Runtime folder referenced by the markup, relative to the output directory.
    pub runtime_folder: String,
    /// Image folder, relative to the output directory.
    pub image_folder: String,
    /// Sound folder, relative to the output directory.
    pub sound_folder: String,
    /// Script file name, relative to the output directory.
    pub script_file: String,
    /// Directory copied into `<output dir>/<runtime_folder>` after a publish.
    pub copy_runtime_from: Option<PathBuf>,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            out_file: None,
            runtime_folder: "Runtime".to_string(),
            image_folder: "images".to_string(),
            sound_folder: "sounds".to_string(),
            script_file: "script.js".to_string(),
            copy_runtime_from: None,
        }
    }
}

impl PublishSettings {
    /// Parse settings from JSON text.
    pub fn from_json_str(s: &str) -> PublishResult<Self> {
        serde_json::from_str(s).map_err(|e| PublishError::serde(e.to_string()))
    }

    /// Reject folder names that would escape the output directory or collide.
    pub fn validate(&self) -> PublishResult<()> {
        for (what, value) in [
            ("runtime_folder", &self.runtime_folder),
            ("image_folder", &self.image_folder),
            ("sound_folder", &self.sound_folder),
            ("script_file", &self.script_file),
        ] {
            if value.trim().is_empty() {
                return Err(PublishError::validation(format!("{what} must be non-empty")));
            }
            if Path::new(value).is_absolute() || value.split(['/', '\\']).any(|c| c == "..") {
                return Err(PublishError::validation(format!(
                    "{what} '{value}' must stay inside the output directory"
                )));
            }
        }
        if self.image_folder == self.sound_folder {
            return Err(PublishError::validation(
                "image_folder and sound_folder must differ",
            ));
        }
        Ok(())
    }

    pub(crate) fn media_folders(&self) -> MediaFolders {
        MediaFolders {
            images: self.image_folder.clone(),
            sounds: self.sound_folder.clone(),
        }
    }

    pub(crate) fn scaffold(&self) -> ScaffoldOptions {
        ScaffoldOptions {
            runtime_folder: self.runtime_folder.clone(),
            script_file: self.script_file.clone(),
        }
    }
}

/// Markup path for a publish.
///
/// `out_file` wins. Otherwise the path is `<parent>/<stem>[_<scene>].html`, where the parent of an
/// `.xfl` document is taken one level higher since the document lives in its own folder.
pub fn derive_output_path(
    settings: &PublishSettings,
    document: Option<&Path>,
    scene: Option<&str>,
) -> PublishResult<PathBuf> {
    if let Some(out) = &settings.out_file {
        return Ok(out.clone());
    }
    let Some(doc) = document else {
        return Err(PublishError::validation(
            "save the document or provide an output path in the publish settings",
        ));
    };

    let stem = doc
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            PublishError::validation(format!("document path '{}' has no file name", doc.display()))
        })?;
    let mut name = stem.to_string();
    if let Some(scene) = scene {
        name.push('_');
        name.push_str(scene);
    }
    name.push('.');
    name.push_str(OUTPUT_EXTENSION);

    let is_xfl = doc
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xfl"));
    let parent = doc.parent().unwrap_or_else(|| Path::new(""));
    let parent = if is_xfl {
        parent.parent().unwrap_or_else(|| Path::new(""))
    } else {
        parent
    };
    Ok(parent.join(name))
}

#[cfg(test)]
#[path = "../../tests/unit/publish/settings.rs"]
mod tests;
