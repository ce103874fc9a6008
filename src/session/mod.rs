pub(crate) mod fingerprint;
pub(crate) mod orchestrator;
pub(crate) mod state;
