//! 个人资料领域实体
//!
//! 作品集的主人

use serde::{Deserialize, Serialize};

/// 教育经历
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
}

/// 技能分组，保持顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

/// 社交链接
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub email: String,
}

/// 个人资料实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub sub_role: String,
    pub education: Vec<Education>,
    pub skills: Vec<SkillCategory>,
    pub socials: SocialLinks,
    pub philosophy: String,
    /// 聊天助手描述主人时使用的人设
    pub persona: String,
    /// 生成博客时的口吻，例如 "a Web3 and AI developer"
    pub author_voice: String,
}

impl Profile {
    /// 名字的第一个词，用于提示词
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// 主要教育经历
    pub fn primary_education(&self) -> Option<&Education> {
        self.education.first()
    }

    /// 技能渲染为 `category: a, b; category: c`
    pub fn skills_summary(&self) -> String {
        self.skills
            .iter()
            .map(|c| format!("{}: {}", c.category, c.skills.join(", ")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// 黑客松平台资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HackathonProfile {
    pub id: String,
    pub platform: String,
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
