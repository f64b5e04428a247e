//! GoldenHour 门店后台
//!
//! # 架构概述
//!
//! 数据全部保存在数据目录下的 CSV 与小票文本文件中，启动时读入内存，
//! 修改后整体重写。
//!
//! - **台账** (`ledger`): 型号 × 门店库存
//! - **存储** (`storage`): 员工、门店、考勤 CSV
//! - **服务** (`services`): 登录、考勤、销售、调货、盘点、分析、编辑、日报
//! - **调度** (`scheduler`): 每日定时发送日报
//! - **命令行** (`cli`): clap 子命令
//!
//! # 模块结构
//!
//! ```text
//! golden-store/src/
//! ├── core/          # 配置、状态、后台任务
//! ├── storage/       # CSV 文件读写
//! ├── services/      # 业务服务
//! ├── utils/         # 日志、时间工具
//! ├── ledger.rs      # 库存台账
//! ├── scheduler.rs   # 日报调度器
//! └── cli.rs         # 命令行
//! ```

pub mod cli;
pub mod core;
pub mod ledger;
pub mod scheduler;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use cli::Cli;
pub use core::{BackgroundTasks, Config, StoreState, TaskKind};
pub use ledger::StockLedger;
pub use scheduler::DailyReportScheduler;
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 按配置初始化日志
pub fn setup_environment(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    tracing::debug!(environment = %config.environment, "Logger initialized");
}

pub fn print_banner() {
    eprintln!(
        r#"
   ______      __    __           __  __
  / ____/___  / /___/ /__  ____  / / / /___  __  _______
 / / __/ __ \/ / __  / _ \/ __ \/ /_/ / __ \/ / / / ___/
/ /_/ / /_/ / / /_/ /  __/ / / / __  / /_/ / /_/ / /
\____/\____/_/\__,_/\___/_/ /_/_/ /_/\____/\__,_/_/
    "#
    );
}
