pub(crate) mod color;
pub(crate) mod curve;
pub(crate) mod ease;
