//! 领域层
//!
//! 作品集实体：个人资料、项目、博客文章和聊天消息

pub mod blog;
pub mod chat;
pub mod profile;
pub mod project;

pub use blog::{BlogFeed, BlogPost};
pub use chat::{ChatMessage, ChatRole};
pub use profile::{Education, HackathonProfile, Profile, SkillCategory, SocialLinks};
pub use project::{Project, ProjectId};
