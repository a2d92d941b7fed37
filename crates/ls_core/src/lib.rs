pub mod models;
pub mod error;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::{CompletionModel, CompletionRequest};
pub use storage::RecordStorage;
pub use types::{ArticleRecord, CefrLevel, Classification, ExtractedArticle, LevelOrigin};

pub type Result<T> = std::result::Result<T, Error>;
