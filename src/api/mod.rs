pub(crate) mod analytics;
pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod router;
