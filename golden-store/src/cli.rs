//! 命令行入口
//!
//! 每条子命令对应一个门店操作。除 `serve` 外都需要 `--user` / `--password`
//! 登录，`--json` 输出机器可读结果。

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use golden_receipt::AmendField;
use serde::Serialize;
use shared::models::{
    AttendanceReceipt, CountSession, Employee, EmployeeCreate, ItemLine, Role, TransactionKind,
    format_hours,
};
use shared::util::{format_clock, format_date, format_money};

use crate::core::{BackgroundTasks, Config, StoreState, TaskKind};
use crate::scheduler::DailyReportScheduler;
use crate::services::{
    self, AttendanceService, AuthService, CheckoutRequest, EditService, Period,
    RegistrationService, ReportService, SalesService, SortKey, StockCountService,
    TransferRequest, TransferService, analytics, history, performance,
};
use crate::utils::time;

#[derive(Debug, Parser)]
#[command(name = "golden-store")]
#[command(about = "GoldenHour outlet back office")]
pub struct Cli {
    /// Data directory holding the CSV files and receipt folders
    #[arg(long, global = true, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,
    #[arg(long, global = true, env = "GOLDEN_USER")]
    pub user: Option<String>,
    #[arg(long, global = true, env = "GOLDEN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check credentials
    Login,
    ClockIn,
    ClockOut,
    /// Stock of one model across outlets, or every model at your outlet
    Stock { model: Option<String> },
    StockCount {
        #[arg(long, value_enum)]
        session: Option<SessionArg>,
        /// Counted quantity, `MODEL=QTY` (repeatable)
        #[arg(long = "item", value_parser = parse_count)]
        items: Vec<(String, u32)>,
    },
    /// Record a sale at your outlet
    Sell {
        #[arg(long)]
        customer: String,
        #[arg(long, default_value = "")]
        payment: String,
        /// `MODEL=QTY` (repeatable)
        #[arg(long = "item", value_parser = parse_item, required = true)]
        items: Vec<ItemLine>,
    },
    Transfer {
        #[arg(long, value_enum)]
        kind: TransferKindArg,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long = "item", value_parser = parse_item, required = true)]
        items: Vec<ItemLine>,
    },
    /// Sales history within a date range
    History {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value = "date")]
        sort: String,
        #[arg(long, default_value_t = false)]
        desc: bool,
    },
    Analytics {
        #[arg(long, default_value = "today")]
        period: String,
    },
    /// Employee sales leaderboard
    Performance,
    /// Search receipts for a keyword
    Search {
        keyword: String,
        /// Search stock movement receipts instead of sales
        #[arg(long, default_value_t = false)]
        stock: bool,
    },
    EditStock {
        model: String,
        #[arg(long)]
        outlet: String,
        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
    },
    EditSale {
        #[arg(long)]
        date: String,
        #[arg(long)]
        customer: String,
        /// Customer Name, Model, Quantity, Total Price or Payment Method
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },
    /// Register a new employee (managers only)
    Register {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long = "new-password")]
        new_password: String,
        #[arg(long, value_enum)]
        role: RoleArg,
        #[arg(long)]
        outlet: String,
    },
    /// Build the daily sales report, optionally sending it
    Report {
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value_t = false)]
        send: bool,
    },
    /// Run the daily report scheduler until Ctrl-C
    Serve,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SessionArg {
    Morning,
    Night,
}

impl From<SessionArg> for CountSession {
    fn from(arg: SessionArg) -> Self {
        match arg {
            SessionArg::Morning => CountSession::Morning,
            SessionArg::Night => CountSession::Night,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TransferKindArg {
    In,
    Out,
}

impl From<TransferKindArg> for TransactionKind {
    fn from(arg: TransferKindArg) -> Self {
        match arg {
            TransferKindArg::In => TransactionKind::StockIn,
            TransferKindArg::Out => TransactionKind::StockOut,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Manager,
    FullTime,
    PartTime,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Manager => Role::Manager,
            RoleArg::FullTime => Role::FullTime,
            RoleArg::PartTime => Role::PartTime,
        }
    }
}

/// `MODEL=QTY`, split on the last `=` so model names may contain one
pub fn parse_item(s: &str) -> Result<ItemLine, String> {
    let (model, qty) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected MODEL=QTY, got `{}`", s))?;
    let quantity: i64 = qty
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity `{}`", qty.trim()))?;
    Ok(ItemLine::new(model.trim(), quantity))
}

fn parse_count(s: &str) -> Result<(String, u32), String> {
    let item = parse_item(s)?;
    let counted =
        u32::try_from(item.quantity).map_err(|_| format!("invalid count `{}`", item.quantity))?;
    Ok((item.model, counted))
}

impl Cli {
    pub fn config(&self) -> Config {
        match &self.data_dir {
            Some(dir) => Config::with_data_dir(dir),
            None => Config::from_env(),
        }
    }
}

struct Output {
    json: bool,
}

impl Output {
    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&T)) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }
}

fn login(state: &StoreState, user: Option<&str>, password: Option<&str>) -> anyhow::Result<Employee> {
    let user = user.context("--user is required")?;
    let password = password.context("--password is required")?;
    Ok(AuthService::new(state.clone()).login(user, password)?)
}

fn date_arg(raw: Option<&str>, fallback: NaiveDate) -> anyhow::Result<NaiveDate> {
    match raw {
        Some(s) => Ok(time::parse_date_arg(s)?),
        None => Ok(fallback),
    }
}

/// Execute one command
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let out = Output { json: cli.json };
    let state = StoreState::initialize(&config);
    let now = time::now_local();
    let today = now.date();

    if let Command::Serve = cli.command {
        return serve(state).await;
    }

    let me = login(&state, cli.user.as_deref(), cli.password.as_deref())?;

    match cli.command {
        Command::Login => out.emit(&me.to_response(), |e| {
            println!("Login Successful!");
            println!("Welcome, {} ({})", e.name, e.outlet);
        })?,

        Command::ClockIn => {
            let receipt = AttendanceService::new(state.clone()).clock_in(&me, now)?;
            print_attendance(&out, &state, &receipt, "Clock In")?;
        }

        Command::ClockOut => {
            let receipt = AttendanceService::new(state.clone()).clock_out(&me, now)?;
            print_attendance(&out, &state, &receipt, "Clock Out")?;
        }

        Command::Stock { model: Some(model) } => {
            let lookup = EditService::new(state.clone()).lookup(&model)?;
            out.emit(&lookup, |l| {
                println!("Model: {}", l.model);
                println!("Unit Price: RM{}", format_money(l.price));
                for o in &l.outlets {
                    println!("{} ({}): {}", o.code, o.name, o.quantity);
                }
                println!("Total: {}", l.total());
            })?;
        }

        Command::Stock { model: None } => {
            let expected = StockCountService::new(state.clone()).expected(&me);
            out.emit(&expected, |rows| {
                println!("Stock at {}", state.outlet_label(&me.outlet));
                for (model, qty) in rows {
                    println!("{}: {}", model, qty);
                }
            })?;
        }

        Command::StockCount { session, items } => {
            let service = StockCountService::new(state.clone());
            if items.is_empty() {
                let expected = service.expected(&me);
                return out.emit(&expected, |rows| {
                    println!("Models to count at {}:", me.outlet);
                    for (model, _) in rows {
                        println!("- {}", model);
                    }
                });
            }
            let session = session
                .map(CountSession::from)
                .unwrap_or_else(|| services::stock_count::session_for(now.time()));
            let report = service.count(&me, session, &items, now)?;
            out.emit(&report, |r| {
                println!("=== {} ===", r.session.title());
                println!("Date: {}", format_date(r.date));
                println!("Time: {}", format_clock(r.time));
                for line in &r.lines {
                    println!("Model: {} - Counted: {}", line.model, line.counted);
                    println!("Store Record: {}", line.recorded);
                    if line.is_tally() {
                        println!("Stock tally correct.");
                    } else {
                        println!("! Mismatch detected ({} unit difference)", line.difference());
                    }
                }
                println!("Total models checked: {}", r.total_checked());
                println!("Tally correct: {}", r.tally_correct());
                println!("Mismatches: {}", r.mismatches());
                println!("{} completed.", r.session.title());
                if r.has_mismatch() {
                    println!("Warning: Please verify stock.");
                }
            })?;
        }

        Command::Sell {
            customer,
            payment,
            items,
        } => {
            let result = SalesService::new(state.clone()).checkout(
                &me,
                CheckoutRequest {
                    customer,
                    payment_method: payment,
                    lines: items,
                },
                now,
            )?;
            out.emit(&result, |r| println!("{}", r.receipt))?;
        }

        Command::Transfer {
            kind,
            from,
            to,
            items,
        } => {
            let result = TransferService::new(state.clone()).transfer(
                &me,
                TransferRequest {
                    kind: kind.into(),
                    from,
                    to,
                    lines: items,
                },
                now,
            )?;
            out.emit(&result, |r| println!("{}", r.receipt))?;
        }

        Command::History {
            from,
            to,
            sort,
            desc,
        } => {
            let start = date_arg(from.as_deref(), NaiveDate::MIN)?;
            let end = date_arg(to.as_deref(), NaiveDate::MAX)?;
            let key: SortKey = sort.parse()?;
            let all = state.sales.load_all();
            let mut sales = history::filter_sales_by_date(&all, start, end);
            history::sort_sales(&mut sales, key, !desc);
            out.emit(&sales, |rows| {
                println!("=== Sales History (sorted by {}) ===", key);
                for t in rows {
                    let time = t.time.map(format_clock).unwrap_or_default();
                    println!(
                        "{} {} | {} | {} x{} | RM{}",
                        format_date(t.date),
                        time,
                        t.customer_name(),
                        t.product,
                        t.quantity,
                        format_money(t.total)
                    );
                }
                println!(
                    "Total Cumulative Sales: RM{}",
                    format_money(analytics::cumulative_total(rows))
                );
            })?;
        }

        Command::Analytics { period } => {
            let period: Period = period.parse()?;
            let all = state.sales.load_all();
            let summary = analytics::summarize(&all, period, today);
            out.emit(&summary, |s| {
                println!("=== Sales Analytics ({}) ===", s.period);
                println!("From {} to {}", format_date(s.start), format_date(s.end));
                println!("Total Sales: RM{}", format_money(s.total_sales));
                println!("Transactions: {}", s.transaction_count);
                println!("Most Sold Model: {}", s.top_model);
                println!("Average Daily Sales: RM{}", format_money(s.average_daily));
                for (day, total) in &s.trend {
                    println!("  {}: RM{}", format_date(*day), format_money(*total));
                }
            })?;
        }

        Command::Performance => {
            let all = state.sales.load_all();
            let employees = state.employees.read().clone();
            let board = performance::leaderboard(&all, &employees);
            out.emit(&board, |rows| {
                println!("=== Employee Performance ===");
                for r in rows {
                    println!(
                        "{}: {} ({}) - RM{} in {} transaction(s)",
                        r.rank_label,
                        r.employee_name,
                        r.entry.employee_id,
                        format_money(r.entry.total_sales),
                        r.entry.transaction_count
                    );
                }
            })?;
        }

        Command::Search { keyword, stock } => {
            let journal = if stock {
                &state.stock_receipts
            } else {
                &state.sales
            };
            let hits = journal.search(&keyword)?;
            out.emit(&hits, |hits| {
                if hits.is_empty() {
                    println!("No records found for \"{}\".", keyword.trim());
                }
                for hit in hits {
                    println!("[{}]", hit.file);
                    println!("{}", hit.text());
                    println!();
                }
            })?;
        }

        Command::EditStock {
            model,
            outlet,
            quantity,
        } => {
            let service = EditService::new(state.clone());
            service.set_stock(&me, &model, &outlet, quantity)?;
            let lookup = service.lookup(&model)?;
            out.emit(&lookup, |l| {
                println!("Stock information updated.");
                for o in l.outlets.iter().filter(|o| o.code.eq_ignore_ascii_case(outlet.trim())) {
                    println!("{}: {} at {}", l.model, o.quantity, o.code);
                }
            })?;
        }

        Command::EditSale {
            date,
            customer,
            field,
            value,
        } => {
            let date = time::parse_date_arg(&date)?;
            let field: AmendField = field.parse()?;
            let block = EditService::new(state.clone()).amend_sale(&me, date, &customer, field, &value)?;
            out.emit(&block, |lines| {
                println!("Sales information updated.");
                for line in lines {
                    println!("{}", line);
                }
            })?;
        }

        Command::Register {
            id,
            name,
            new_password,
            role,
            outlet,
        } => {
            let created = RegistrationService::new(state.clone()).register(
                &me,
                EmployeeCreate {
                    id,
                    name,
                    password: new_password,
                    role: role.into(),
                    outlet,
                },
            )?;
            out.emit(&created, |e| {
                println!("Employee successfully registered!");
                println!("{} ({}) - {} at {}", e.name, e.id, e.role, e.outlet);
            })?;
        }

        Command::Report { date, send } => {
            let date = date_arg(date.as_deref(), today)?;
            let service = ReportService::new(state.clone(), services::mailer_from_config(&config));
            let report = if send {
                service.send(date).await?
            } else {
                service.build(date)?
            };
            out.emit(&report, |r| print!("{}", services::report::render_report(r)))?;
        }

        Command::Serve => {}
    }

    Ok(())
}

fn print_attendance(
    out: &Output,
    state: &StoreState,
    receipt: &AttendanceReceipt,
    title: &str,
) -> anyhow::Result<()> {
    let outlet = state.outlet_label(&receipt.outlet);
    out.emit(receipt, |r| {
        println!("=== Attendance {} ===", title);
        println!("Employee ID: {}", r.employee_id);
        println!("Name: {}", r.employee_name);
        println!("Outlet: {}", outlet);
        println!();
        println!("{} Successful!", title);
        println!("Date: {}", format_date(r.date));
        println!("Time: {}", format_clock(r.time));
        if let Some(hours) = r.total_hours {
            println!("Total Hours Worked: {}", format_hours(hours));
        }
    })
}

/// 运行后台任务直到 Ctrl-C
async fn serve(state: StoreState) -> anyhow::Result<()> {
    let mailer = services::mailer_from_config(&state.config);
    let mut tasks = BackgroundTasks::new();
    let scheduler = DailyReportScheduler::new(state, mailer, tasks.shutdown_token());
    tasks.spawn("daily_report", TaskKind::Periodic, scheduler.run());

    tracing::info!("GoldenHour back office running, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    tasks.shutdown().await;
    Ok(())
}
