//! 日报调度器
//!
//! 每天在 `REPORT_TIME` 之后发送一次当天日报。启动时若已过发送时间，
//! 视为当天已发送，不补发。

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tokio_util::sync::CancellationToken;

use crate::core::StoreState;
use crate::services::{Mailer, ReportService};
use crate::utils::time;

/// 检查间隔
const TICK: Duration = Duration::from_secs(60);

/// 日报调度器
///
/// 注册为 `TaskKind::Periodic`，在 `serve` 命令中启动。
pub struct DailyReportScheduler {
    service: ReportService,
    report_time: NaiveTime,
    shutdown: CancellationToken,
    last_sent: Option<NaiveDate>,
}

impl DailyReportScheduler {
    pub fn new(state: StoreState, mailer: Arc<dyn Mailer>, shutdown: CancellationToken) -> Self {
        let report_time = state.config.report_time;
        Self {
            service: ReportService::new(state, mailer),
            report_time,
            shutdown,
            last_sent: None,
        }
    }

    /// 主循环：每分钟检查一次 + 关机信号
    pub async fn run(mut self) {
        let now = time::now_local();
        self.last_sent = initial_last_sent(now, self.report_time);
        tracing::info!(
            report_time = %self.report_time.format("%H:%M"),
            "Daily report scheduler started"
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(TICK) => {
                    self.tick(time::now_local()).await;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Daily report scheduler received shutdown signal");
                    return;
                }
            }
        }
    }

    async fn tick(&mut self, now: NaiveDateTime) {
        if !is_due(now, self.report_time, self.last_sent) {
            return;
        }
        let today = now.date();
        // 失败也标记，避免每分钟重试刷日志
        self.last_sent = Some(today);
        if let Err(e) = self.service.send(today).await {
            tracing::error!(date = %today, error = %e, "Failed to send daily report");
        }
    }
}

/// 当天是否应发送日报
pub fn is_due(now: NaiveDateTime, report_time: NaiveTime, last_sent: Option<NaiveDate>) -> bool {
    now.time() >= report_time && last_sent != Some(now.date())
}

/// 启动时已过发送时间则视为当天已发送
pub fn initial_last_sent(now: NaiveDateTime, report_time: NaiveTime) -> Option<NaiveDate> {
    (now.time() >= report_time).then(|| now.date())
}
