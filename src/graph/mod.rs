pub(crate) mod activation;
