pub mod loaders;
pub mod question;
pub mod topic;

pub use loaders::{load_topics, parse_topic_line};
pub use question::{PageBatch, QuestionRecord, DEFAULT_EXPLANATION, MISSING_VALUE, OPTION_COUNT};
pub use topic::TopicSpec;
