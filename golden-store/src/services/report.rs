//! 日报 - 汇总当天销售并通过邮件通道发送
//!
//! 没有 SMTP 依赖：默认写日志 ([`LogMailer`])，也可以写入 outbox 目录
//! ([`OutboxMailer`]) 交给外部投递。

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{DailyReport, Employee, EmployeeSales, Transaction};
use shared::util::{format_date, format_money, now_millis};
use shared::{AppError, AppResult, ErrorCode};

use super::analytics::top_selling_model;
use super::performance::resolve_name;
use crate::core::{Config, MailTransport, StoreState};

pub const REPORT_SUBJECT: &str = "GoldenHour Daily Sales Report";

/// Outgoing message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> AppResult<()>;
}

/// Writes the message to the log
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Daily report e-mail\n{}",
            message.body
        );
        Ok(())
    }
}

/// Writes each message as a text file into an outbox directory
#[derive(Debug, Clone)]
pub struct OutboxMailer {
    dir: PathBuf,
}

impl OutboxMailer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!("report_{}.eml", now_millis()));
        let content = format!(
            "To: {}\nSubject: {}\n\n{}\n",
            message.to, message.subject, message.body
        );
        tokio::fs::write(&path, content).await.map_err(|e| {
            AppError::with_message(ErrorCode::MailFailed, format!("Failed to write outbox: {}", e))
        })?;
        tracing::info!(path = %path.display(), to = %message.to, "Daily report queued in outbox");
        Ok(())
    }
}

/// Mailer selected by `MAIL_TRANSPORT`
pub fn mailer_from_config(config: &Config) -> Arc<dyn Mailer> {
    match config.mail_transport {
        MailTransport::Log => Arc::new(LogMailer),
        MailTransport::Outbox => Arc::new(OutboxMailer::new(config.outbox_dir())),
    }
}

/// Summarize the sales of one day
pub fn build_daily_report(
    sales: &[Transaction],
    date: NaiveDate,
    employees: &BTreeMap<String, Employee>,
) -> DailyReport {
    let day: Vec<Transaction> = sales
        .iter()
        .filter(|t| t.is_sale() && t.date == date)
        .cloned()
        .collect();

    let mut by_employee: IndexMap<&str, (Decimal, u32)> = IndexMap::new();
    for t in &day {
        let entry = by_employee
            .entry(t.employee_id.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += t.total;
        entry.1 += 1;
    }

    DailyReport {
        business_date: date,
        total_sales: day.iter().map(|t| t.total).sum(),
        transaction_count: day.len(),
        units_sold: day.iter().map(|t| u64::from(t.quantity)).sum(),
        top_product: top_selling_model(&day),
        by_employee: by_employee
            .into_iter()
            .map(|(id, (total, count))| EmployeeSales {
                employee_id: id.to_string(),
                employee_name: resolve_name(employees, id),
                total_sales: total,
                transaction_count: count,
            })
            .collect(),
        generated_at: now_millis(),
    }
}

/// Plain-text e-mail body
pub fn render_report(report: &DailyReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Daily Sales Report - {}\n", format_date(report.business_date)));
    out.push_str(&format!("Total Sales: RM{}\n", format_money(report.total_sales)));
    out.push_str(&format!("Transactions: {}\n", report.transaction_count));
    out.push_str(&format!("Units Sold: {}\n", report.units_sold));
    out.push_str(&format!("Top Model: {}\n", report.top_product));
    if !report.by_employee.is_empty() {
        out.push_str("\nSales by Employee:\n");
        for e in &report.by_employee {
            out.push_str(&format!(
                "- {} ({}): RM{} in {} transaction(s)\n",
                e.employee_name,
                e.employee_id,
                format_money(e.total_sales),
                e.transaction_count
            ));
        }
    }
    out
}

/// Builds and sends the daily report
#[derive(Clone)]
pub struct ReportService {
    state: StoreState,
    mailer: Arc<dyn Mailer>,
}

impl ReportService {
    pub fn new(state: StoreState, mailer: Arc<dyn Mailer>) -> Self {
        Self { state, mailer }
    }

    /// Report for `date` from the sales journal
    pub fn build(&self, date: NaiveDate) -> AppResult<DailyReport> {
        let sales = self.state.sales.load_day(date)?;
        // snapshot, the lock is not held across the send
        let employees = self.state.employees.read().clone();
        Ok(build_daily_report(&sales, date, &employees))
    }

    /// Build and hand the report to the mailer
    pub async fn send(&self, date: NaiveDate) -> AppResult<DailyReport> {
        let report = self.build(date)?;
        let message = MailMessage {
            to: self.state.config.report_recipient.clone(),
            subject: REPORT_SUBJECT.to_string(),
            body: render_report(&report),
        };
        self.mailer.send(&message).await?;
        tracing::info!(
            date = %date,
            total = %report.total_sales,
            transactions = report.transaction_count,
            "Daily report sent"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Role, TransactionKind};
    use tempfile::TempDir;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn sale(day: u32, employee: &str, product: &str, qty: u32, total: i64) -> Transaction {
        Transaction {
            kind: TransactionKind::Sale,
            date: d(day),
            time: None,
            employee_id: employee.into(),
            outlet: "C60".into(),
            product: product.into(),
            quantity: qty,
            total: Decimal::from(total),
            customer: Some("x".into()),
        }
    }

    #[test]
    fn test_build_daily_report() {
        let mut employees = BTreeMap::new();
        employees.insert(
            "C6001".to_string(),
            Employee {
                id: "C6001".into(),
                name: "Tan".into(),
                role: Role::Manager,
                password: "pw".into(),
                outlet: "C60".into(),
            },
        );
        let sales = vec![
            sale(13, "C6001", "Luna", 5, 500),
            sale(14, "C6001", "Luna", 1, 100),
            sale(14, "C6002", "Classic Gold", 2, 260),
            sale(14, "C6001", "Classic Gold", 1, 130),
        ];
        let report = build_daily_report(&sales, d(14), &employees);
        assert_eq!(report.total_sales, Decimal::from(490));
        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.units_sold, 4);
        assert_eq!(report.top_product, "Classic Gold");
        assert_eq!(report.by_employee.len(), 2);
        assert_eq!(report.by_employee[0].employee_name, "Tan");
        assert_eq!(report.by_employee[0].total_sales, Decimal::from(230));
        assert_eq!(report.by_employee[1].employee_name, "Unknown Staff");

        let body = render_report(&report);
        assert!(body.contains("Total Sales: RM490.00"));
        assert!(body.contains("Top Model: Classic Gold"));
    }

    #[test]
    fn test_empty_day_report() {
        let report = build_daily_report(&[], d(14), &BTreeMap::new());
        assert_eq!(report.top_product, "N/A");
        assert!(!render_report(&report).contains("Sales by Employee"));
    }

    #[tokio::test]
    async fn test_outbox_mailer_writes_file() {
        let tmp = TempDir::new().unwrap();
        let mailer = OutboxMailer::new(tmp.path().join("outbox"));
        let message = MailMessage {
            to: "manager@goldenhour.local".into(),
            subject: REPORT_SUBJECT.into(),
            body: "hello".into(),
        };
        mailer.send(&message).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(mailer.dir()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let path = entries[0].as_ref().unwrap().path();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("To: manager@goldenhour.local\nSubject: GoldenHour Daily Sales Report\n"));
    }
}
