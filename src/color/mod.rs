pub(crate) mod accent;
pub(crate) mod names;
pub(crate) mod palette;
