use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use golden_receipt::ReceiptJournal;
use indexmap::IndexMap;
use parking_lot::RwLock;
use shared::models::{Employee, Outlet, is_hq};
use shared::{AppError, AppResult};

use crate::core::Config;
use crate::ledger::StockLedger;
use crate::storage::{
    self, ATTENDANCE_FILE, AttendanceStore, EMPLOYEE_FILE, MODEL_FILE, OUTLET_FILE,
};

/// 门店后台状态 - 持有所有共享数据的引用
///
/// 启动时把 CSV 文件整体读入内存；修改先作用于内存，再整体重写对应文件。
/// 使用 Arc 实现浅拷贝，日报调度器与命令处理共享同一份数据。
///
/// # 组成
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | outlets | RwLock<IndexMap> | 门店列表 (文件顺序) |
/// | employees | RwLock<BTreeMap> | 员工表 (按工号排序) |
/// | ledger | RwLock<StockLedger> | 库存台账 |
/// | sales | ReceiptJournal | 销售小票 |
/// | stock_receipts | ReceiptJournal | 出入库小票 |
/// | attendance | AttendanceStore | 考勤文件 |
///
/// `outlets` 加载后只读，持有其他写锁时也可以读取。
#[derive(Clone)]
pub struct StoreState {
    pub config: Arc<Config>,
    pub outlets: Arc<RwLock<IndexMap<String, Outlet>>>,
    pub employees: Arc<RwLock<BTreeMap<String, Employee>>>,
    pub ledger: Arc<RwLock<StockLedger>>,
    pub sales: ReceiptJournal,
    pub stock_receipts: ReceiptJournal,
    pub attendance: AttendanceStore,
}

impl StoreState {
    /// 从数据目录加载全部文件
    ///
    /// 缺失或损坏的文件只记录日志，对应集合为空。
    pub fn initialize(config: &Config) -> Self {
        let dir = &config.data_dir;
        tracing::info!(data_dir = %dir.display(), "Loading store data");

        let outlets = storage::load_outlets(&dir.join(OUTLET_FILE));
        let employees = storage::load_employees(&dir.join(EMPLOYEE_FILE), &config.default_outlet);
        let ledger = StockLedger::load(&dir.join(MODEL_FILE));

        tracing::info!(
            outlets = outlets.len(),
            employees = employees.len(),
            products = ledger.len(),
            "Store data loaded"
        );

        Self {
            config: Arc::new(config.clone()),
            outlets: Arc::new(RwLock::new(outlets)),
            employees: Arc::new(RwLock::new(employees)),
            ledger: Arc::new(RwLock::new(ledger)),
            sales: ReceiptJournal::sales(dir),
            stock_receipts: ReceiptJournal::stock(dir),
            attendance: AttendanceStore::new(dir.join(ATTENDANCE_FILE)),
        }
    }

    pub fn data_path(&self, file: &str) -> PathBuf {
        self.config.data_dir.join(file)
    }

    /// 门店代码 (文件顺序)，决定 `model.csv` 的列
    pub fn outlet_codes(&self) -> Vec<String> {
        self.outlets.read().keys().cloned().collect()
    }

    pub fn outlet(&self, code: &str) -> Option<Outlet> {
        self.outlets.read().get(code.trim()).cloned()
    }

    /// Known outlet (HQ is not accepted here)
    pub fn require_outlet(&self, code: &str) -> AppResult<Outlet> {
        self.outlet(code)
            .ok_or_else(|| AppError::outlet_not_found(code.trim()))
    }

    /// `C60 (name)` label; HQ is rendered as the service center
    pub fn outlet_label(&self, code: &str) -> String {
        if is_hq(code) {
            return "HQ (Service Center)".to_string();
        }
        self.outlet(code)
            .map(|o| o.label())
            .unwrap_or_else(|| code.trim().to_string())
    }

    pub fn employee(&self, id: &str) -> Option<Employee> {
        self.employees.read().get(id.trim()).cloned()
    }

    /// 重写 `model.csv`，列顺序取当前门店列表
    pub fn save_ledger(&self, ledger: &StockLedger) -> AppResult<()> {
        ledger.save(&self.data_path(MODEL_FILE), &self.outlet_codes())
    }

    /// 重写 `employee.csv`
    pub fn save_employees(&self, employees: &BTreeMap<String, Employee>) -> AppResult<()> {
        storage::save_employees(&self.data_path(EMPLOYEE_FILE), employees)
    }
}

impl std::fmt::Debug for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreState")
            .field("data_dir", &self.config.data_dir)
            .field("outlets", &self.outlets.read().len())
            .field("employees", &self.employees.read().len())
            .field("products", &self.ledger.read().len())
            .finish()
    }
}
