//! 匹配器抽象
//!
//! 两种实现，通过 `Box<dyn SearchMatcher>` 虚调用分发：
//! - LiteralMatcher: Boyer-Moore 精确匹配
//! - PatternMatcher: 基于 regex crate 的正则匹配

mod boyer_moore;
mod pattern;

pub use boyer_moore::LiteralMatcher;
pub use pattern::PatternMatcher;

/// 一次匹配的字节区间，`end` 为开区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// 搜索匹配能力，仅有字面和正则两种实现
pub trait SearchMatcher {
    /// 从 `from` 开始查找下一个匹配；`from` 必须落在字符边界上
    fn next_match(&self, text: &str, from: usize) -> Option<Match>;

    /// 替换 `text` 中所有不重叠的匹配。
    ///
    /// 零个匹配返回 `None`，调用方由此区分"没有匹配"和
    /// "匹配了但替换结果与原文相同"。
    fn substitute(&self, text: &str) -> Option<String>;
}
