pub mod handlers;
pub mod synchronizer;
pub mod templates;
