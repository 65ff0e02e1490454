use chrono::NaiveDate;
use strum::{AsRefStr, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Row of the `Leaves` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Leave {
    pub leave_id: i32,
    pub employee_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub total_leave_days: Option<i32>,
    pub reason: Option<String>,
}
