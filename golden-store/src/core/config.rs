use std::path::PathBuf;

use chrono::NaiveTime;

use crate::utils::time;

/// Mail transport used by the daily report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTransport {
    /// Write the message to the log
    Log,
    /// Write the message as a file into `<data_dir>/outbox`
    Outbox,
}

impl MailTransport {
    fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("outbox") {
            MailTransport::Outbox
        } else {
            MailTransport::Log
        }
    }
}

/// 门店后台配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATA_DIR | ./data | 数据目录 (CSV 文件与小票目录) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志文件目录，设置后按天滚动 |
/// | REPORT_TIME | 22:00 | 日报发送时间 (HH:MM) |
/// | REPORT_RECIPIENT | manager@goldenhour.local | 日报收件人 |
/// | MAIL_TRANSPORT | log | 邮件通道: log / outbox |
/// | DEFAULT_OUTLET | C60 | 员工文件缺少门店列时的默认门店 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/srv/goldenhour REPORT_TIME=21:30 golden-store serve
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 日报发送时间点
    pub report_time: NaiveTime,
    pub report_recipient: String,
    pub mail_transport: MailTransport,
    pub default_outlet: String,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            report_time: std::env::var("REPORT_TIME")
                .ok()
                .map(|t| time::parse_report_time(&t))
                .unwrap_or_else(time::default_report_time),
            report_recipient: std::env::var("REPORT_RECIPIENT")
                .unwrap_or_else(|_| "manager@goldenhour.local".into()),
            mail_transport: std::env::var("MAIL_TRANSPORT")
                .map(|t| MailTransport::parse(&t))
                .unwrap_or(MailTransport::Log),
            default_outlet: std::env::var("DEFAULT_OUTLET")
                .unwrap_or_else(|_| shared::models::DEFAULT_OUTLET.into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义数据目录覆盖配置
    ///
    /// 常用于测试场景和 `--data-dir` 参数
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config
    }

    pub fn outbox_dir(&self) -> PathBuf {
        self.data_dir.join("outbox")
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
