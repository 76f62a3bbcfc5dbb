//! 内容存储
//!
//! 只读的作品集数据：个人资料、项目、黑客松资料和初始博客文章。
//! 默认内置，也可以从 YAML 文件加载一次。

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    BlogPost, Education, HackathonProfile, Profile, Project, SkillCategory, SocialLinks,
};
use crate::errors::{AssistantError, Result};

/// 作品集内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStore {
    profile: Profile,
    projects: Vec<Project>,
    #[serde(default)]
    hackathons: Vec<HackathonProfile>,
    #[serde(default)]
    blog_posts: Vec<BlogPost>,
}

impl ContentStore {
    /// 组装并校验内容存储
    pub fn new(
        profile: Profile,
        projects: Vec<Project>,
        hackathons: Vec<HackathonProfile>,
        blog_posts: Vec<BlogPost>,
    ) -> Result<Self> {
        let store = Self {
            profile,
            projects,
            hackathons,
            blog_posts,
        };
        store.validate()?;
        Ok(store)
    }

    /// 解析 YAML 内容
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let store: ContentStore = serde_yaml::from_str(yaml)?;
        store.validate()?;
        Ok(store)
    }

    /// 从磁盘加载 YAML 内容
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let store = Self::from_yaml_str(&yaml)?;
        info!(
            path = %path.display(),
            projects = store.projects.len(),
            posts = store.blog_posts.len(),
            "loaded portfolio content"
        );
        Ok(store)
    }

    fn validate(&self) -> Result<()> {
        if self.profile.name.trim().is_empty() {
            return Err(AssistantError::Content("profile name must not be empty".to_string()));
        }
        ensure_unique("project", self.projects.iter().map(|p| p.id.as_str()))?;
        ensure_unique("hackathon", self.hackathons.iter().map(|h| h.id.as_str()))?;
        ensure_unique("blog post", self.blog_posts.iter().map(|b| b.id.as_str()))?;
        Ok(())
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn hackathons(&self) -> &[HackathonProfile] {
        &self.hackathons
    }

    pub fn seed_posts(&self) -> &[BlogPost] {
        &self.blog_posts
    }

    /// 导出为 YAML，格式与 `from_yaml_str` 读取的一致
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// 内置作品集
    pub fn seeded() -> Self {
        Self {
            profile: seed_profile(),
            projects: seed_projects(),
            hackathons: seed_hackathons(),
            blog_posts: seed_posts(),
        }
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(AssistantError::Content(format!("{} id must not be empty", kind)));
        }
        if !seen.insert(id) {
            return Err(AssistantError::Content(format!("duplicate {} id: {}", kind, id)));
        }
    }
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn seed_profile() -> Profile {
    Profile {
        name: "Dinith Tharindu".to_string(),
        role: "Software Engineer".to_string(),
        sub_role: "Specializing in Distributed Systems & AI".to_string(),
        education: vec![Education {
            degree: "BSc (Hons) in Software Engineering".to_string(),
            institution: "Saegis Campus".to_string(),
            period: "Semester 4 (Current)".to_string(),
        }],
        skills: vec![
            SkillCategory {
                category: "languages".to_string(),
                skills: strings(&["Rust", "TypeScript", "Solidity", "Python", "SQL"]),
            },
            SkillCategory {
                category: "frameworks".to_string(),
                skills: strings(&["React", "Node.js", "Linera SDK", "Next.js", "Actix Web"]),
            },
            SkillCategory {
                category: "web3".to_string(),
                skills: strings(&[
                    "Smart Contract Architecture",
                    "FHEVM",
                    "Zero-Knowledge Proofs",
                    "EVM",
                ]),
            },
            SkillCategory {
                category: "tools".to_string(),
                skills: strings(&["Docker", "CI/CD Pipelines", "Git", "Gemini API", "Linux"]),
            },
        ],
        socials: SocialLinks {
            github: "https://github.com/dinitheth".to_string(),
            linkedin: "#".to_string(),
            email: "dinithmain@gmail.com".to_string(),
        },
        philosophy: "I believe in building systems that are robust by design. My approach favors \
            type safety, memory efficiency, and decentralization. I prefer the rigour of Rust and \
            the transparency of Blockchain to build software that stands the test of time."
            .to_string(),
        persona: "brutally honest, logical, curious, and prefers accuracy over comfort".to_string(),
        author_voice: "a Web3 and AI developer".to_string(),
    }
}

fn project(
    id: &str,
    title: &str,
    description: &str,
    stack: &[&str],
    image: u8,
    github_url: &str,
    demo_url: Option<&str>,
) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        tech_stack: strings(stack),
        image_url: format!("https://picsum.photos/600/400?random={}", image),
        github_url: Some(github_url.to_string()),
        demo_url: demo_url.map(str::to_string),
    }
}

fn seed_projects() -> Vec<Project> {
    vec![
        project(
            "chain-clash",
            "Chain Clash Game",
            "A decentralized strategy game built using the Linera SDK. Demonstrates the \
             implementation of microchain architectures for high-throughput gaming logic.",
            &["Rust", "Linera SDK", "Wasm", "React"],
            1,
            "https://github.com/dinitheth",
            Some("#"),
        ),
        project(
            "ai-arbitrage",
            "AI Arbitrage Tracker",
            "Automated arbitrage detection engine for the Base Blockchain. Utilizes predictive \
             modeling to identify transient market inefficiencies across DEXs.",
            &["Python", "Web3.py", "TensorFlow", "Base Chain"],
            2,
            "https://github.com/dinitheth",
            None,
        ),
        project(
            "audit-gpt",
            "AuditGPT Security Suite",
            "A static analysis assistant for Smart Contracts. Leverages LLMs to perform heuristic \
             analysis on Solidity code to detect reentrancy and overflow vulnerabilities.",
            &["TypeScript", "Gemini API", "AST Parsing", "Next.js"],
            3,
            "https://github.com/dinitheth",
            None,
        ),
        project(
            "fhevm-dapps",
            "Privacy-First Voting dApp",
            "An implementation of sealed-bid auctions and voting mechanisms using Fully \
             Homomorphic Encryption (FHE) on the EVM to ensure data confidentiality on-chain.",
            &["FHEVM", "Solidity", "Hardhat", "React"],
            4,
            "https://github.com/dinitheth",
            None,
        ),
        project(
            "hci-sqa-tools",
            "Academic Assessment Platform",
            "A modular platform for HCI and SQA assessments, featuring real-time state management \
             and performance analytics for student evaluation.",
            &["JavaScript (ES6+)", "DOM Manipulation", "CSS3"],
            5,
            "https://github.com/dinitheth",
            None,
        ),
        project(
            "rust-raft-consensus",
            "Distributed Log Store",
            "A high-performance distributed key-value store implementing the Raft consensus \
             algorithm from scratch in Rust. Features leader election, log replication, and fault \
             tolerance against node failures.",
            &["Rust", "Tokio", "gRPC", "Protobuf"],
            6,
            "https://github.com/dinitheth/rust-raft",
            Some("#"),
        ),
        project(
            "zk-identity-oracle",
            "ZK Identity Oracle",
            "A privacy-preserving identity verification system using Zero-Knowledge Proofs. Allows \
             users to prove citizenship or age without revealing underlying personal data to \
             on-chain verifiers.",
            &["Circom", "SnarkJS", "Solidity", "Next.js"],
            7,
            "https://github.com/dinitheth/zk-oracle",
            None,
        ),
        project(
            "multi-agent-researcher",
            "Multi-Agent Research Swarm",
            "An autonomous agent system where specialized AI agents (Researcher, Writer, Reviewer) \
             collaborate to generate comprehensive technical reports from sparse user queries.",
            &["Python", "LangChain", "OpenAI API", "Pinecone"],
            8,
            "https://github.com/dinitheth/agent-swarm",
            None,
        ),
    ]
}

fn seed_hackathons() -> Vec<HackathonProfile> {
    vec![
        HackathonProfile {
            id: "dorahacks".to_string(),
            platform: "DoraHacks".to_string(),
            url: "https://dorahacks.io/hacker/dinitheth".to_string(),
            title: "Decentralized BUIDLs".to_string(),
            description: "View my complete portfolio of BUIDLs, hackathon submissions, and grant \
                applications directly on the DoraHacks platform."
                .to_string(),
            tags: strings(&["Web3", "Bounties", "Grants"]),
        },
        HackathonProfile {
            id: "akindo".to_string(),
            platform: "Akindo".to_string(),
            url: "https://app.akindo.io/users/dxbr".to_string(),
            title: "Wave & Hackathons".to_string(),
            description: "Explore my contributions to the Akindo ecosystem, participating in \
                diverse Web3 communities, challenges, and collaborative sprints."
                .to_string(),
            tags: strings(&["Sprints", "Collab", "Challenges"]),
        },
    ]
}

fn seed_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: "web3-future".to_string(),
            title: "Scalability in Microchain Architectures".to_string(),
            date: "2023-10-15".to_string(),
            content: "## The Microchain Revolution\n\n\
                Traditional blockchains suffer from the trilemma of security, scalability, and \
                decentralization. Linera's microchain model introduces a novel approach by allowing \
                individual users to operate their own chains.\n\n\
                ### Key Benefits\n\n\
                1. **Horizontal Scalability**: Throughput increases linearly with the number of \
                active chains.\n\
                2. **Low Latency**: Interactions within a microchain are nearly instantaneous.\n\
                3. **Resilient Security**: Inherits security from the validator set via cross-chain \
                messages.\n\n\
                This architecture is particularly effective for high-frequency applications like \
                gaming and social media, where global consensus is not always required for every \
                state transition."
                .to_string(),
            tags: strings(&["Distributed Systems", "Rust", "Architecture"]),
        },
        BlogPost {
            id: "rust-for-ai".to_string(),
            title: "Memory Safety in Mission-Critical Systems".to_string(),
            date: "2023-09-28".to_string(),
            content: "## Why Rust Matters\n\n\
                In systems programming, manual memory management (like in C++) often leads to \
                vulnerabilities such as buffer overflows and use-after-free errors.\n\n\
                ### The Ownership Model\n\n\
                Rust solves this at compile time through its ownership model:\n\n\
                * **Ownership**: Each value has a variable that's its owner.\n\
                * **Borrowing**: Data can be borrowed immutably or mutably, but not both \
                simultaneously.\n\
                * **Lifetimes**: Ensures references are valid as long as they are used.\n\n\
                This approach eliminates entire classes of bugs without the overhead of a garbage \
                collector, making it ideal for high-performance AI inference engines."
                .to_string(),
            tags: strings(&["Rust", "Systems Programming", "Security"]),
        },
    ]
}
