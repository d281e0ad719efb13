pub(crate) mod archive;
pub(crate) mod render;
pub(crate) mod request;
