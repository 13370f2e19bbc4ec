//! Publishing: settings, output paths, document traversal and artifact writing.

pub(crate) mod session;
pub(crate) mod settings;
pub(crate) mod traverse;
