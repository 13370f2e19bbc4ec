pub(crate) mod builder;
pub(crate) mod command;
pub(crate) mod filter;
pub(crate) mod writer;
