pub mod college;
pub mod essay;
pub mod task;
