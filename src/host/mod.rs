//! Host-facing types: the authoring document, its geometry, and the services the host provides.

pub(crate) mod media;
pub(crate) mod outline;
pub(crate) mod output;
pub(crate) mod scene;
pub(crate) mod shape;
pub(crate) mod text;
