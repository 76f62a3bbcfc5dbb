//! 提示词模板

use crate::core::content::ContentStore;
use crate::domain::Profile;

pub const DEEP_DIVE_HEADINGS: [&str; 3] = [
    "## 🔧 System Architecture",
    "## 🚀 Key Technical Challenges",
    "## 💡 Optimization Strategy",
];

fn stack_line<S: AsRef<str>>(tech_stack: &[S]) -> String {
    tech_stack
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 单段摘要，少于 100 词，不含列表
pub fn project_summary<S: AsRef<str>>(title: &str, tech_stack: &[S]) -> String {
    format!(
        "Analyze the project titled \"{title}\" which uses the following tech stack: {stack}.\n\
         \n\
         Generate a concise technical summary (under 100 words) that explicitly covers:\n\
         1. Technical challenges inherent to this domain.\n\
         2. Key architectural decisions likely involved.\n\
         3. The specific value provided by using this tech stack.\n\
         \n\
         Format the output as a single cohesive paragraph. Do not use bullet points.",
        stack = stack_line(tech_stack),
    )
}

/// 含三个固定章节的 Markdown 深度分析
pub fn project_deep_dive<S: AsRef<str>>(title: &str, tech_stack: &[S]) -> String {
    let lead_tool = tech_stack
        .first()
        .map(|s| s.as_ref())
        .unwrap_or("the core tooling");
    let [architecture, challenges, optimization] = DEEP_DIVE_HEADINGS;

    format!(
        "Create a \"Technical Deep Dive\" for the software project: \"{title}\".\n\
         Tech Stack: {stack}.\n\
         \n\
         Please structure the response in Markdown with the following sections (keep it professional and detailed):\n\
         \n\
         {architecture}\n\
         [Explain the hypothetical or likely architecture pattern (e.g., Microservices, Event-Driven) suitable for this stack]\n\
         \n\
         {challenges}\n\
         [Describe 2-3 complex engineering problems this project likely solves]\n\
         \n\
         {optimization}\n\
         [Mention how specific tools in the stack (like {lead_tool}) are used for performance or security]\n\
         \n\
         Keep the tone confident, technical, and suitable for a Senior Engineer's portfolio.",
        stack = stack_line(tech_stack),
    )
}

/// 约 200 词、以标题开头、作者口吻的 Markdown 文章
pub fn blog_post(topic: &str, profile: &Profile) -> String {
    format!(
        "Write a short, engaging technical blog post (approx 200 words) about \"{topic}\".\n\
         Write it from the perspective of {name}, {voice}.\n\
         Include a title at the start, followed by the content.\n\
         Use Markdown formatting.",
        name = profile.first_name(),
        voice = profile.author_voice,
    )
}

/// 由内容快照构建的聊天助手系统指令
pub fn system_instruction(content: &ContentStore) -> String {
    let profile = content.profile();
    let name = profile.first_name();

    let education = profile
        .primary_education()
        .map(|e| format!("Education: {} at {}.\n", e.degree, e.institution))
        .unwrap_or_default();

    let projects = content
        .projects()
        .iter()
        .map(|p| p.context_line())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an AI Assistant for {name}'s personal portfolio website.\n\
         {name} is a {role}.\n\
         {education}\
         Skills: {skills}.\n\
         \n\
         Key projects:\n\
         {projects}\n\
         \n\
         Your goal is to represent {name} professionally but authentically.\n\
         - {name} is described as \"{persona}\".\n\
         - Be helpful to recruiters, developers, and hackathon judges.\n\
         - If asked about contact info, direct them to the contact section or mention {email}.\n\
         - Keep answers concise and relevant to software engineering, Web3, and AI.",
        role = profile.role,
        skills = profile.skills_summary(),
        persona = profile.persona,
        email = profile.socials.email,
    )
}
