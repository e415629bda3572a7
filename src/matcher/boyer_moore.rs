//! Boyer-Moore 字面匹配器
//!
//! - skip[256]: 坏字符表，字节按低 8 位落入 256 个桶，记录模式中
//!   该桶最后一次出现的下标（全部从 0 起，哈希冲突只降低位移质量）
//! - suffix: 好后缀表（m+1 项），经典两遍 border 数组构造
//! - 失配时 anchor += max(坏字符位移, 好后缀位移)，两种启发都不会
//!   跳过合法匹配

use super::{Match, SearchMatcher};

/// Boyer-Moore 精确匹配器。
///
/// `ignore_case` 时模式字节按 ASCII 大写折叠后存储；比较时只折叠
/// 文本字节，输出永远保持文本原有大小写。
pub struct LiteralMatcher {
    pattern: Vec<u8>,
    replacement: String,
    ignore_case: bool,
    skip: [usize; 256],
    suffix: Vec<usize>,
}

impl LiteralMatcher {
    pub fn new(pattern: &str, replacement: &str, ignore_case: bool) -> Self {
        let pattern: Vec<u8> = if ignore_case {
            pattern.bytes().map(|b| b.to_ascii_uppercase()).collect()
        } else {
            pattern.bytes().collect()
        };

        let mut skip = [0usize; 256];
        for (i, &b) in pattern.iter().enumerate() {
            skip[b as usize] = i;
        }

        let suffix = build_suffix_table(&pattern);
        tracing::trace!(pattern_len = pattern.len(), ignore_case, "built literal matcher");

        Self {
            pattern,
            replacement: replacement.to_string(),
            ignore_case,
            skip,
            suffix,
        }
    }

    #[inline]
    fn fold(&self, b: u8) -> u8 {
        if self.ignore_case {
            b.to_ascii_uppercase()
        } else {
            b
        }
    }
}

impl SearchMatcher for LiteralMatcher {
    fn next_match(&self, text: &str, from: usize) -> Option<Match> {
        let m = self.pattern.len();
        // 空模式永不匹配。原始设计里空模式让 substitute 原地死循环
        // （零长匹配的末尾就是当前锚点），这里显式偏离并记录在案。
        if m == 0 {
            return None;
        }

        let bytes = text.as_bytes();
        let n = bytes.len();
        if from > n || m > n - from {
            return None;
        }

        let mut anchor = from;
        'scan: while anchor + m <= n {
            // 从模式末尾往前比较
            let mut pos = m;
            while pos > 0 {
                pos -= 1;
                let ch = self.fold(bytes[anchor + pos]);
                if ch != self.pattern[pos] {
                    let bad_char = pos as isize - self.skip[ch as usize] as isize;
                    let good_suffix = self.suffix[pos + 1] as isize;
                    anchor += bad_char.max(good_suffix) as usize;
                    continue 'scan;
                }
            }
            return Some(Match::new(anchor, anchor + m));
        }

        None
    }

    fn substitute(&self, text: &str) -> Option<String> {
        let mut out = String::with_capacity(text.len());
        let mut tail = 0;
        let mut matched = false;

        // 每轮从上一个匹配的末尾继续（而不是起点加一），
        // 保证匹配互不重叠且起点严格递增
        while let Some(m) = self.next_match(text, tail) {
            matched = true;
            out.push_str(&text[tail..m.start]);
            out.push_str(&self.replacement);
            tail = m.end;
        }

        if !matched {
            return None;
        }
        out.push_str(&text[tail..]);
        Some(out)
    }
}

/// 经典好后缀表：对每个失配位置给出已匹配后缀重新对齐所需的位移。
/// 返回 m+1 项；失配发生在模式下标 pos 时查 `table[pos + 1]`，
/// 所有位移至少为 1。
fn build_suffix_table(pattern: &[u8]) -> Vec<usize> {
    let m = pattern.len();
    let mut shift = vec![0usize; m + 1];
    let mut border = vec![0usize; m + 1];

    // 第一遍：已匹配后缀在模式内部重现的情况
    let mut i = m;
    let mut j = m + 1;
    border[i] = j;
    while i > 0 {
        while j <= m && pattern[i - 1] != pattern[j - 1] {
            if shift[j] == 0 {
                shift[j] = j - i;
            }
            j = border[j];
        }
        i -= 1;
        j -= 1;
        border[i] = j;
    }

    // 第二遍：已匹配后缀只能与模式前缀对齐的情况
    j = border[0];
    for k in 0..=m {
        if shift[k] == 0 {
            shift[k] = j;
        }
        if k == j {
            j = border[j];
        }
    }

    shift
}
