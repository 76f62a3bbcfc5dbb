//! 博客领域实体
//!
//! 初始文章来自内容存储；生成的草稿在这里转换为文章，
//! 并插入到会话期间存在的内存列表头部。

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 生成文章的标签
pub const GENERATED_TAGS: [&str; 2] = ["AI Generated", "Tech"];

/// 生成文章 ID 的前缀
pub const GENERATED_ID_PREFIX: &str = "ai-gen-";

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*[ \t]*\r?\n(.*?)\r?\n?```\s*$").expect("fence regex")
});

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ ]{0,3}#{1,6}[ \t]+(.+?)[ \t#]*$").expect("heading regex")
});

static BOLD_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([^*]+)\*\*$").expect("bold title regex"));

/// 博客文章
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    /// ISO 日期，`YYYY-MM-DD`
    pub date: String,
    /// Markdown 正文
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BlogPost {
    /// 从生成的 Markdown 构建文章
    ///
    /// 标题取草稿的第一个标题，没有时使用主题。
    /// 包裹整个草稿的单个代码块会被去掉。
    pub fn from_draft(topic: &str, draft: &str, now: DateTime<Utc>) -> Self {
        let content = strip_wrapping_fence(draft);
        let title = first_heading(&content).unwrap_or_else(|| topic.trim().to_string());

        Self {
            id: format!("{}{}", GENERATED_ID_PREFIX, now.timestamp_millis()),
            title,
            date: now.format("%Y-%m-%d").to_string(),
            content,
            tags: GENERATED_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// 是否为本次会话生成的文章
    pub fn is_generated(&self) -> bool {
        self.id.starts_with(GENERATED_ID_PREFIX)
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

fn strip_wrapping_fence(draft: &str) -> String {
    // 只去掉包裹全文的一对围栏，独立的代码块保持不变
    match FENCE_RE.captures(draft) {
        Some(caps) if !caps[1].lines().any(is_fence) => caps[1].trim().to_string(),
        _ => draft.trim().to_string(),
    }
}

/// 代码块之外的第一个标题，或加粗的首行
fn first_heading(markdown: &str) -> Option<String> {
    let mut in_fence = false;
    let mut first_line = true;

    for line in markdown.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
            first_line = false;
            continue;
        }
        if in_fence || line.trim().is_empty() {
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            let title = caps[1].trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }
        if first_line {
            if let Some(caps) = BOLD_TITLE_RE.captures(line.trim()) {
                return Some(caps[1].trim().to_string());
            }
        }
        first_line = false;
    }
    None
}

/// 按显示顺序排列的文章，最新在前
#[derive(Debug, Clone, Default)]
pub struct BlogFeed {
    posts: Vec<BlogPost>,
}

impl BlogFeed {
    pub fn new(seed: Vec<BlogPost>) -> Self {
        Self { posts: seed }
    }

    /// 在头部插入文章，ID 冲突时追加后缀
    pub fn publish(&mut self, mut post: BlogPost) -> &BlogPost {
        if self.get(&post.id).is_some() {
            let base = post.id.clone();
            let mut n = 1;
            while self.get(&format!("{}-{}", base, n)).is_some() {
                n += 1;
            }
            post.id = format!("{}-{}", base, n);
        }
        self.posts.insert(0, post);
        &self.posts[0]
    }

    pub fn get(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_from_draft_uses_heading() {
        let draft = "# Proofs Without Secrets\n\nZK lets you prove things.";
        let post = BlogPost::from_draft("zk", draft, now());

        assert_eq!(post.title, "Proofs Without Secrets");
        assert_eq!(post.date, "2024-03-09");
        assert_eq!(post.id, format!("ai-gen-{}", now().timestamp_millis()));
        assert_eq!(post.tags, vec!["AI Generated", "Tech"]);
        assert!(post.is_generated());
    }

    #[test]
    fn test_from_draft_falls_back_to_topic() {
        let post = BlogPost::from_draft("  Rust Lifetimes ", "Plain body text.", now());
        assert_eq!(post.title, "Rust Lifetimes");
        assert_eq!(post.content, "Plain body text.");
    }

    #[test]
    fn test_from_draft_strips_code_fence() {
        let draft = "```markdown\n## Fenced Title\n\nBody\n```";
        let post = BlogPost::from_draft("topic", draft, now());

        assert_eq!(post.title, "Fenced Title");
        assert_eq!(post.content, "## Fenced Title\n\nBody");
    }

    #[test]
    fn test_inner_fences_are_kept() {
        let draft = "# Title\n\n```rust\nfn main() {}\n```\n\nMore text.";
        let post = BlogPost::from_draft("topic", draft, now());
        assert!(post.content.contains("```rust"));
        assert!(post.content.ends_with("More text."));
    }

    #[test]
    fn test_separate_code_blocks_are_not_unwrapped() {
        let draft = "```rust\nfn main() {}\n```\n\nRust makes this safe.\n\n```rust\nlet x = 1;\n```";
        let post = BlogPost::from_draft("Rust Safety", draft, now());

        assert_eq!(post.content, draft);
        assert_eq!(post.content.matches("```").count(), 4);
        assert_eq!(post.title, "Rust Safety");
    }

    #[test]
    fn test_comment_in_code_block_is_not_a_title() {
        let draft = "Install:\n\n```bash\n# install the toolchain\nrustup target add wasm32\n```";
        let post = BlogPost::from_draft("Shipping Wasm", draft, now());
        assert_eq!(post.title, "Shipping Wasm");
    }

    #[test]
    fn test_bold_first_line_is_a_title() {
        let draft = "**Shipping Wasm**\n\nInstall:\n\n```bash\n# install the toolchain\nrustup target add wasm32\n```";
        let post = BlogPost::from_draft("wasm", draft, now());
        assert_eq!(post.title, "Shipping Wasm");
    }

    #[test]
    fn test_heading_after_code_block() {
        let draft = "```sh\n# not this\n```\n\n## Real Title\n\nBody";
        let post = BlogPost::from_draft("topic", draft, now());
        assert_eq!(post.title, "Real Title");
    }

    #[test]
    fn test_feed_prepends_and_dedupes_ids() {
        let mut feed = BlogFeed::new(vec![BlogPost {
            id: "seed".to_string(),
            title: "Seed".to_string(),
            date: "2023-01-01".to_string(),
            content: String::new(),
            tags: vec![],
        }]);

        let first = BlogPost::from_draft("a", "# A", now());
        let second = BlogPost::from_draft("b", "# B", now());
        let first_id = feed.publish(first).id.clone();
        let second_id = feed.publish(second).id.clone();

        assert_ne!(first_id, second_id);
        assert!(second_id.ends_with("-1"));
        assert_eq!(feed.len(), 3);
        assert_eq!(feed.posts()[0].title, "B");
        assert_eq!(feed.posts()[2].id, "seed");
    }
}
