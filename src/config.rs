//! 搜索配置：模式、替换文本、标志位，以及按需构建并缓存的匹配器

use std::fmt;

use crate::matcher::{LiteralMatcher, PatternMatcher, SearchMatcher};

#[derive(Debug)]
pub enum ConfigError {
    EmptyPattern,
    InvalidRegex(regex::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPattern => write!(f, "search pattern is empty"),
            ConfigError::InvalidRegex(e) => write!(f, "invalid regex: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<regex::Error> for ConfigError {
    fn from(e: regex::Error) -> Self {
        ConfigError::InvalidRegex(e)
    }
}

/// 会话级搜索配置。
///
/// 不变量：缓存的匹配器存在时一定反映四个字段的当前值——
/// 任何 setter 都无条件丢弃缓存。
#[derive(Default)]
pub struct SearchConfig {
    search: String,
    replace: String,
    ignore_case: bool,
    use_regex: bool,
    cached: Option<Box<dyn SearchMatcher>>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn replace(&self) -> &str {
        &self.replace
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn use_regex(&self) -> bool {
        self.use_regex
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.cached = None;
    }

    pub fn set_replace(&mut self, replace: impl Into<String>) {
        self.replace = replace.into();
        self.cached = None;
    }

    pub fn set_ignore_case(&mut self, ignore_case: bool) {
        self.ignore_case = ignore_case;
        self.cached = None;
    }

    pub fn set_use_regex(&mut self, use_regex: bool) {
        self.use_regex = use_regex;
        self.cached = None;
    }

    /// 返回缓存的匹配器，必要时先构建并缓存。
    /// 构建失败时缓存保持为空，已设置的字段不受影响。
    pub fn matcher(&mut self) -> Result<&dyn SearchMatcher, ConfigError> {
        let matcher = match self.cached.take() {
            Some(m) => m,
            None => self.build()?,
        };
        Ok(&**self.cached.insert(matcher))
    }

    fn build(&self) -> Result<Box<dyn SearchMatcher>, ConfigError> {
        if self.search.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        if self.use_regex {
            let matcher = PatternMatcher::new(&self.search, &self.replace, self.ignore_case)?;
            Ok(Box::new(matcher))
        } else {
            Ok(Box::new(LiteralMatcher::new(
                &self.search,
                &self.replace,
                self.ignore_case,
            )))
        }
    }
}
