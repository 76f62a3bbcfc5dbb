//! 应用层：基于助手的前端

pub mod console;

pub use console::{Console, ConsoleCommand, Flow};
