pub mod push;
pub mod sources;
