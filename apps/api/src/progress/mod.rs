pub mod estimator;
pub mod handlers;
