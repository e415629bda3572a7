//! 正则匹配器
//!
//! 包装 regex crate；替换文本在构造时做一次转义展开（`\n`、`\t`），
//! 不在每次替换时重复解码。

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};

use super::{Match, SearchMatcher};

/// 基于 regex crate 的匹配器。
/// 替换文本里的 `$1`/`$name` 由 regex 引擎按捕获组展开。
pub struct PatternMatcher {
    regex: Regex,
    replacement: String,
}

impl PatternMatcher {
    pub fn new(pattern: &str, replacement: &str, ignore_case: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .multi_line(true)
            .build()?;
        Ok(Self {
            regex,
            replacement: decode_escapes(replacement),
        })
    }
}

impl SearchMatcher for PatternMatcher {
    fn next_match(&self, text: &str, from: usize) -> Option<Match> {
        if from > text.len() {
            return None;
        }
        self.regex
            .find_at(text, from)
            .map(|m| Match::new(m.start(), m.end()))
    }

    fn substitute(&self, text: &str) -> Option<String> {
        match self.regex.replace_all(text, self.replacement.as_str()) {
            // Borrowed 意味着一个匹配都没有
            Cow::Borrowed(_) => None,
            Cow::Owned(replaced) => Some(replaced),
        }
    }
}

/// 单遍转义展开：`\n`/`\t` 变成真实换行/制表符；反斜杠后跟其它字符
/// 时保留该字符本身。两字符序列里第一个反斜杠"获胜"，不支持额外的
/// 反斜杠自转义；结尾孤立的反斜杠原样保留。
fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
