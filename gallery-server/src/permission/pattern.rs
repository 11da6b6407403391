//! 路由模式匹配
//!
//! | 段 | 匹配 |
//! |----|------|
//! | `banner` | 字面量 |
//! | `:id` 或 `{id}` | 一个非空段 |
//! | 末尾 `*` | 剩余路径 (可为空) |
//!
//! 具体路径末尾的 `/` 可有可无，查询串忽略。

use regex::Regex;

/// 编译后的路由模式
#[derive(Debug, Clone)]
pub struct RoutePattern {
    regex: Regex,
}

impl RoutePattern {
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let trimmed = pattern.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        let mut re = String::from("^");
        for (i, segment) in segments.iter().enumerate() {
            let is_last = i + 1 == segments.len();
            if is_last && *segment == "*" {
                re.push_str("(?:/.*)?");
                break;
            }
            re.push('/');
            if is_param(segment) {
                re.push_str("[^/]+");
            } else {
                re.push_str(&regex::escape(segment));
            }
        }
        if segments.is_empty() {
            re.push('/');
        } else {
            re.push_str("/?");
        }
        re.push('$');

        Ok(Self {
            regex: Regex::new(&re)?,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        self.regex.is_match(path)
    }
}

fn is_param(segment: &str) -> bool {
    (segment.len() > 1 && segment.starts_with(':'))
        || (segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}'))
}
