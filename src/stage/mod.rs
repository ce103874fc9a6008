pub(crate) mod builder;
pub(crate) mod definition;
pub(crate) mod segmenter;
