//! zsearch - 编辑器搜索替换引擎
//!
//! 模块结构：
//! - matcher: 匹配器（Boyer-Moore 字面匹配 + Regex 匹配）
//! - config: 搜索配置（按需构建并缓存匹配器）
//! - coordinator: 搜索协调器（find / replace_one / replace_all）
//! - ports: 外部依赖接口（Document, LineMap, FileSet, DocumentStore）
//! - adapters: 参考实现（Rope 文档 + SlotMap 工作区）

pub mod adapters;
pub mod config;
pub mod coordinator;
pub mod matcher;
pub mod ports;

pub use config::{ConfigError, SearchConfig};
pub use coordinator::{SearchCoordinator, SearchError};
pub use matcher::{Match, SearchMatcher};
pub use ports::{DocId, Document, DocumentStore, FileSet, LineMap, RangeError};
