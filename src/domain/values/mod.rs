pub mod export_row;
pub mod feed_state;
pub mod filter_criteria;
pub mod instant;
pub mod merge_outcome;
