pub(crate) mod footer;
pub(crate) mod headline;
pub(crate) mod surface;
