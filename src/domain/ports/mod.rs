pub mod push_channel;
pub mod report_source;
