pub mod assistant;
pub mod clear;
pub mod list;
pub mod show;
pub mod submit;
pub mod sync;
pub mod watch;
