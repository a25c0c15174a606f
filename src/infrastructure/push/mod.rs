pub mod lines;
pub mod local;
