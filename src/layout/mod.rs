pub(crate) mod footer;
pub(crate) mod headline;
