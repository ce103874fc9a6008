pub(crate) mod source;
