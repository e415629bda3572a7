//! 外部依赖接口（ports）
//!
//! 引擎只通过这些 trait 访问文档和文件集合，不关心具体存储。

mod document;
mod file_set;

pub use document::{DocId, Document, DocumentStore, LineMap, RangeError};
pub use file_set::FileSet;
