//! 文件集合：多文档搜索的候选顺序策略
//!
//! 两种变体：仅当前文档，或全部打开的文档。枚举本身不做环形循环
//! （`next` 走到列表末尾就返回 None），是否回绕由协调器的一次性
//! 回调决定。

use super::DocId;

#[derive(Debug, Clone)]
pub enum FileSet {
    /// 仅当前文档
    Single(DocId),
    /// 全部打开文档。`first`/`next` 按列表顺序枚举；
    /// `all` 返回从 `start_after` 之后开始的轮转顺序，`start_after`
    /// 排在最后，供整集合替换使用。
    OpenRing {
        docs: Vec<DocId>,
        start_after: DocId,
    },
}

impl FileSet {
    /// 枚举顺序中的第一个文档
    pub fn first(&self) -> Option<DocId> {
        match self {
            FileSet::Single(doc) => Some(*doc),
            FileSet::OpenRing { docs, .. } => docs.first().copied(),
        }
    }

    /// `current` 之后的下一个文档；列表走完（或 `current` 不在集合里）
    /// 返回 None
    pub fn next(&self, current: DocId) -> Option<DocId> {
        match self {
            FileSet::Single(_) => None,
            FileSet::OpenRing { docs, .. } => {
                let pos = docs.iter().position(|&d| d == current)?;
                docs.get(pos + 1).copied()
            }
        }
    }

    /// 完整枚举：每个文档恰好出现一次
    pub fn all(&self) -> Vec<DocId> {
        match self {
            FileSet::Single(doc) => vec![*doc],
            FileSet::OpenRing { docs, start_after } => {
                match docs.iter().position(|d| d == start_after) {
                    Some(pos) => {
                        let mut order = Vec::with_capacity(docs.len());
                        order.extend_from_slice(&docs[pos + 1..]);
                        order.extend_from_slice(&docs[..=pos]);
                        order
                    }
                    // start_after 不在集合里时按原始顺序枚举
                    None => docs.clone(),
                }
            }
        }
    }
}
