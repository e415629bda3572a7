//! 文档门面
//!
//! 职责：
//! - 文本读写（字节偏移寻址，越界报错而不是截断）
//! - 行号 ↔ 偏移映射
//! - 编辑分组（布尔开关语义，不计数、不嵌套）

use std::fmt;

use slotmap::new_key_type;

new_key_type! {
    /// 文档句柄（带代数的稳定 ID，防止悬垂引用）
    pub struct DocId;
}

/// 偏移或长度越界。表示调用方的偏移算术出了问题，
/// 协调器不会捕获它，让缺陷保持可见。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    pub offset: usize,
    pub len: usize,
    pub doc_len: usize,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "range [{}, {}) out of bounds for document of length {}",
            self.offset,
            self.offset.saturating_add(self.len),
            self.doc_len
        )
    }
}

impl std::error::Error for RangeError {}

/// 行映射门面。
///
/// `line_end` 包含行终止符；最后一行没有终止符时返回文档末尾再加一，
/// 视作存在一个虚拟终止符。需要不含换行的区间时用 `line_end(i) - 1`。
pub trait LineMap {
    fn line_of(&self, offset: usize) -> usize;
    fn line_start(&self, line: usize) -> usize;
    fn line_end(&self, line: usize) -> usize;
    fn line_count(&self) -> usize;
}

/// 文档门面。偏移一律为字节偏移。
pub trait Document: LineMap {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 读取 `[offset, offset + len)` 的文本；越界返回 `RangeError`，
    /// 绝不静默截断。
    fn text(&self, offset: usize, len: usize) -> Result<String, RangeError>;

    fn remove(&mut self, offset: usize, len: usize) -> Result<(), RangeError>;

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), RangeError>;

    /// 开启编辑分组；已有分组时是 no-op。
    fn begin_edit_group(&mut self);

    /// 关闭编辑分组；仅当分组内确实记录过编辑时才提交历史。
    fn end_edit_group(&mut self);
}

/// 文档仓库：用 DocId 解析具体文档
pub trait DocumentStore {
    fn get(&self, id: DocId) -> Option<&dyn Document>;
    fn get_mut(&mut self, id: DocId) -> Option<&mut dyn Document>;
}
