//! 核心模块 - 配置、共享状态和后台任务
//!
//! # 模块结构
//!
//! - [`Config`] - 门店后台配置
//! - [`StoreState`] - 共享状态
//! - [`BackgroundTasks`] - 后台任务管理

pub mod config;
pub mod state;
pub mod tasks;

pub use config::{Config, MailTransport};
pub use state::StoreState;
pub use tasks::{BackgroundTasks, TaskKind};
