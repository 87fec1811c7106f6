pub mod environment;
pub mod timestamps;

pub use environment::{DATA_DIR_ENV, get_data_dir};
pub use timestamps::{format_recency, format_timestamp};
