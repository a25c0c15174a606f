pub mod commands;
pub mod csv;
pub mod watch;
