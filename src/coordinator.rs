//! 搜索协调器
//!
//! 驱动配置、文件集合和文档门面完成 find / replace_one / replace_all：
//! - find: 当前文档 → 后续文档 → 至多一次回绕（由调用方回调决定）
//! - replace_all: 按行分解区间，边替换边重定位 range_end
//! - 所有文档变更都包在一个编辑分组里，RAII 保证每条退出路径都关闭

use std::fmt;

use crate::config::{ConfigError, SearchConfig};
use crate::matcher::{Match, SearchMatcher};
use crate::ports::{DocId, Document, DocumentStore, FileSet, RangeError};

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug)]
pub enum SearchError {
    Config(ConfigError),
    Range(RangeError),
    UnknownDocument(DocId),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Config(e) => write!(f, "search configuration: {}", e),
            SearchError::Range(e) => write!(f, "document range: {}", e),
            SearchError::UnknownDocument(id) => write!(f, "unknown document: {:?}", id),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        SearchError::Config(e)
    }
}

impl From<RangeError> for SearchError {
    fn from(e: RangeError) -> Self {
        SearchError::Range(e)
    }
}

/// 编辑分组的 RAII 作用域：离开作用域（包括提前返回和报错路径）
/// 一定会调用 end_edit_group。分组本身的开关语义由文档门面保证。
struct EditScope<'a> {
    doc: &'a mut dyn Document,
}

impl<'a> EditScope<'a> {
    fn enter(doc: &'a mut dyn Document) -> Self {
        doc.begin_edit_group();
        Self { doc }
    }

    fn doc(&mut self) -> &mut dyn Document {
        self.doc
    }
}

impl Drop for EditScope<'_> {
    fn drop(&mut self) {
        self.doc.end_edit_group();
    }
}

/// 搜索协调器。持有会话注入的配置引用，自身不保存扫描状态：
/// 每次调用都是同步跑完的瞬态操作。
pub struct SearchCoordinator<'a> {
    config: &'a mut SearchConfig,
}

impl<'a> SearchCoordinator<'a> {
    pub fn new(config: &'a mut SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&mut self) -> &mut SearchConfig {
        self.config
    }

    /// 从 `start_doc` 的 `start_offset` 开始查找下一个匹配。
    ///
    /// 当前文档未命中时依次扫描文件集合的后续文档（各自从 0 开始）。
    /// 集合耗尽后调用一次 `confirm_wrap`；确认则从集合头部再做一整轮，
    /// 之后不再回绕，保证模式不存在时也能终止。
    pub fn find(
        &mut self,
        store: &dyn DocumentStore,
        set: &FileSet,
        start_doc: DocId,
        start_offset: usize,
        confirm_wrap: impl FnOnce() -> bool,
    ) -> Result<Option<(DocId, Match)>> {
        let matcher = self.config.matcher()?;

        if let Some(m) = scan_doc(store, start_doc, start_offset, matcher)? {
            return Ok(Some((start_doc, m)));
        }

        let mut current = start_doc;
        while let Some(id) = set.next(current) {
            if let Some(m) = scan_doc(store, id, 0, matcher)? {
                return Ok(Some((id, m)));
            }
            current = id;
        }

        if !confirm_wrap() {
            return Ok(None);
        }
        tracing::debug!(?start_doc, "file set exhausted, wrapping around once");

        let mut wrapped = set.first();
        while let Some(id) = wrapped {
            if let Some(m) = scan_doc(store, id, 0, matcher)? {
                return Ok(Some((id, m)));
            }
            wrapped = set.next(id);
        }

        Ok(None)
    }

    /// 只在 `[sel_start, sel_end)` 内做替换。
    /// 空选区是显式拒绝（返回 Ok(false)），不是静默 no-op。
    pub fn replace_one(
        &mut self,
        doc: &mut dyn Document,
        sel_start: usize,
        sel_end: usize,
    ) -> Result<bool> {
        if sel_start >= sel_end {
            tracing::debug!(sel_start, sel_end, "replace rejected: nothing selected");
            return Ok(false);
        }

        let matcher = self.config.matcher()?;
        let len = sel_end - sel_start;
        let text = doc.text(sel_start, len)?;

        let Some(replaced) = matcher.substitute(&text) else {
            return Ok(false);
        };

        let mut scope = EditScope::enter(doc);
        scope.doc().remove(sel_start, len)?;
        scope.doc().insert(sel_start, &replaced)?;
        Ok(true)
    }

    /// 对 `[range_start, range_end)` 做整区替换。
    ///
    /// 区间按行分解（不含行终止符），逐行跑 substitute；某行长度变化
    /// 时把差值累加到 range_end 上，后续行边界都按已变更的文档重新
    /// 计算。跨行的匹配不会被发现（已知限制）。整个文档的变更在一个
    /// 编辑分组里提交。
    pub fn replace_all_in(
        &mut self,
        doc: &mut dyn Document,
        range_start: usize,
        range_end: usize,
    ) -> Result<bool> {
        let matcher = self.config.matcher()?;

        let mut end = range_end;
        let mut line = doc.line_of(range_start);
        let mut replaced_any = false;

        let mut scope = EditScope::enter(doc);
        while line < scope.doc().line_count() {
            let doc = scope.doc();
            let line_start = doc.line_start(line);
            if line_start >= end {
                break;
            }
            // line_end 含终止符（最后一行按虚拟终止符算），减一取行文本
            let text_end = (doc.line_end(line) - 1).min(end);
            let sub_start = line_start.max(range_start);

            if text_end > sub_start {
                let old = doc.text(sub_start, text_end - sub_start)?;
                if let Some(new) = matcher.substitute(&old) {
                    replaced_any = true;
                    if new != old {
                        doc.remove(sub_start, text_end - sub_start)?;
                        doc.insert(sub_start, &new)?;
                        end = (end as isize + new.len() as isize - old.len() as isize) as usize;
                        // 替换文本自带换行时会生出新行；整体跳过它们，
                        // 刚插入的文本不再重扫（old 不含终止符，没有换行）
                        line += new.matches('\n').count();
                    }
                }
            }
            line += 1;
        }
        drop(scope);

        if replaced_any {
            tracing::debug!(range_start, range_end, "replace_all_in made changes");
        }
        Ok(replaced_any)
    }

    /// 对文件集合中的每个文档做整篇替换，按位或汇总是否发生过替换。
    /// 任何文档出错都会中止整个调用，不会跳过继续。
    pub fn replace_all(&mut self, store: &mut dyn DocumentStore, set: &FileSet) -> Result<bool> {
        let mut replaced_any = false;
        for id in set.all() {
            let doc = store
                .get_mut(id)
                .ok_or(SearchError::UnknownDocument(id))?;
            let len = doc.len();
            replaced_any |= self.replace_all_in(doc, 0, len)?;
        }
        Ok(replaced_any)
    }
}

fn scan_doc(
    store: &dyn DocumentStore,
    id: DocId,
    from: usize,
    matcher: &dyn SearchMatcher,
) -> Result<Option<Match>> {
    let doc = store.get(id).ok_or(SearchError::UnknownDocument(id))?;
    let text = doc.text(0, doc.len())?;
    Ok(matcher.next_match(&text, from))
}

#[cfg(test)]
#[path = "../tests/unit/coordinator.rs"]
mod tests;
