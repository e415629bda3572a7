//! Rope 文档适配器
//!
//! 职责：
//! - 字节偏移寻址的文本读写（越界报 RangeError）
//! - 行映射（line_end 含终止符，最后一行按虚拟终止符算）
//! - 编辑分组 + 快照式撤销（仅当分组内有编辑时才提交）

use ropey::Rope;
use slotmap::SlotMap;

use crate::ports::{DocId, Document, DocumentStore, LineMap, RangeError};

/// 基于 Rope 的文档，供上层和测试使用。
/// 偏移一律是字节偏移；不在字符边界上的偏移按 `RangeError` 拒绝。
/// 行终止符为 `\n`。
pub struct RopeDocument {
    rope: Rope,
    group_open: bool,
    group_edits: usize,
    group_snapshot: Option<Rope>,
    undo_stack: Vec<Rope>,
}

impl RopeDocument {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            group_open: false,
            group_edits: 0,
            group_snapshot: None,
            undo_stack: Vec::new(),
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn to_text(&self) -> String {
        self.rope.to_string()
    }

    /// 回退到上一个撤销单元之前的状态
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                self.rope = snapshot;
                true
            }
            None => false,
        }
    }

    fn check_range(&self, offset: usize, len: usize) -> Result<(), RangeError> {
        let doc_len = self.rope.len_bytes();
        let err = RangeError {
            offset,
            len,
            doc_len,
        };
        match offset.checked_add(len) {
            // 区间两端都必须落在字符边界上，否则报错而不是悄悄下取整
            Some(end) if end <= doc_len => {
                if self.is_char_boundary(offset) && self.is_char_boundary(end) {
                    Ok(())
                } else {
                    Err(err)
                }
            }
            _ => Err(err),
        }
    }

    fn is_char_boundary(&self, offset: usize) -> bool {
        self.rope.char_to_byte(self.rope.byte_to_char(offset)) == offset
    }

    fn record_edit(&mut self) {
        if self.group_open {
            self.group_edits += 1;
        } else {
            // 分组外的散编辑各自成为一个撤销单元
            self.undo_stack.push(self.rope.clone());
        }
    }
}

impl Default for RopeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl LineMap for RopeDocument {
    fn line_of(&self, offset: usize) -> usize {
        self.rope.byte_to_line(offset)
    }

    fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_byte(line)
    }

    fn line_end(&self, line: usize) -> usize {
        if line + 1 < self.rope.len_lines() {
            self.rope.line_to_byte(line + 1)
        } else {
            // 最后一行没有真实终止符，按虚拟终止符报告
            self.rope.len_bytes() + 1
        }
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }
}

impl Document for RopeDocument {
    fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    fn text(&self, offset: usize, len: usize) -> Result<String, RangeError> {
        self.check_range(offset, len)?;
        let start = self.rope.byte_to_char(offset);
        let end = self.rope.byte_to_char(offset + len);
        Ok(self.rope.slice(start..end).to_string())
    }

    fn remove(&mut self, offset: usize, len: usize) -> Result<(), RangeError> {
        self.check_range(offset, len)?;
        self.record_edit();
        let start = self.rope.byte_to_char(offset);
        let end = self.rope.byte_to_char(offset + len);
        self.rope.remove(start..end);
        Ok(())
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), RangeError> {
        self.check_range(offset, 0)?;
        self.record_edit();
        let at = self.rope.byte_to_char(offset);
        self.rope.insert(at, text);
        Ok(())
    }

    fn begin_edit_group(&mut self) {
        // 不嵌套：已有分组时什么都不做
        if self.group_open {
            return;
        }
        self.group_open = true;
        self.group_edits = 0;
        self.group_snapshot = Some(self.rope.clone());
    }

    fn end_edit_group(&mut self) {
        if !self.group_open {
            return;
        }
        self.group_open = false;
        if let Some(snapshot) = self.group_snapshot.take() {
            if self.group_edits > 0 {
                self.undo_stack.push(snapshot);
            }
        }
        self.group_edits = 0;
    }
}

/// SlotMap 工作区：DocId → RopeDocument
#[derive(Default)]
pub struct RopeWorkspace {
    docs: SlotMap<DocId, RopeDocument>,
}

impl RopeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, text: &str) -> DocId {
        self.docs.insert(RopeDocument::from_text(text))
    }

    pub fn close(&mut self, id: DocId) -> bool {
        self.docs.remove(id).is_some()
    }

    pub fn doc(&self, id: DocId) -> Option<&RopeDocument> {
        self.docs.get(id)
    }

    pub fn doc_mut(&mut self, id: DocId) -> Option<&mut RopeDocument> {
        self.docs.get_mut(id)
    }
}

impl DocumentStore for RopeWorkspace {
    fn get(&self, id: DocId) -> Option<&dyn Document> {
        self.docs.get(id).map(|d| d as &dyn Document)
    }

    fn get_mut(&mut self, id: DocId) -> Option<&mut dyn Document> {
        self.docs.get_mut(id).map(|d| d as &mut dyn Document)
    }
}
