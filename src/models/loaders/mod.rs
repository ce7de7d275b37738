pub mod topics_loader;

pub use topics_loader::{load_topics, parse_topic_line};
