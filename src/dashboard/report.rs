//! Dashboard payload types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::EmployeeSkill;

/// Revenue and margin for the selected month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    /// Monthly price summed over contracts active in the month.
    pub active_revenue: Decimal,
    /// Distinct employees on those contracts.
    pub billable_count: u32,
    /// Revenue per billable employee.
    pub avg_rate: Decimal,
    /// Revenue minus salary costs.
    pub net_margin: Decimal,
    /// Margin as a percentage of revenue, two decimals.
    pub margin_percentage: Decimal,
    /// Monthly cost of billable active employees.
    pub total_salary_costs: Decimal,
    /// Cost of bench employees over the whole month.
    pub bench_cost: Decimal,
    /// Active employees without a contract in the month.
    pub bench_count: u32,
    /// Bench employees plus contracts expiring this month and next.
    pub action_items: u32,
    /// Prorated cost of contracts expiring in the next 3 months.
    pub at_risk: Decimal,
}

/// Headcount split for the selected month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utilization {
    /// Active employees.
    pub total: u32,
    /// Active employees with a contract in the month.
    pub billable: u32,
    /// Active employees without one.
    pub on_bench: u32,
    /// Billable share, two decimals.
    pub utilization_percentage: Decimal,
}

/// A count and an amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    /// Number of employees or contracts.
    pub count: u32,
    /// Money at stake.
    pub amount: Decimal,
}

/// The four headline cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCards {
    /// Bench employees and their monthly cost.
    pub on_bench_now: SummaryCard,
    /// Contracts ending in the selected month.
    pub expiring_this_month: SummaryCard,
    /// Contracts ending in the following month.
    pub expiring_next_month: SummaryCard,
    /// Contracts ending in the 90 days after the following month starts.
    pub expiring_next_3_months: SummaryCard,
}

/// An active employee and their cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCost {
    /// Employee id.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Annual cost to company.
    pub annual_ctc: Option<Decimal>,
    /// Cost per day.
    pub daily_cost: Decimal,
    /// Skill rows.
    pub skills: Vec<EmployeeSkill>,
}

/// An employee with no contract running today or later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchEmployee {
    /// Employee id.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Annual cost to company.
    pub annual_ctc: Option<Decimal>,
    /// Cost per day.
    pub daily_cost: Decimal,
    /// Days since the day after the last contract ended; 0 if never placed.
    pub days_on_bench: i64,
    /// `daily_cost * days_on_bench`.
    pub total_loss: Decimal,
    /// Client of the most recent contract.
    pub last_client: Option<String>,
    /// End of the most recent contract.
    pub last_contract_end: Option<NaiveDate>,
    /// Submitted contracts the employee had with that client.
    pub contracts_with_last_client: u32,
    /// Skill rows.
    pub skills: Vec<EmployeeSkill>,
}

/// The bench list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchReport {
    /// Bench employees, highest cost first.
    pub employees: Vec<BenchEmployee>,
    /// Their cost over the selected month.
    pub monthly_cost: Decimal,
    /// Their combined cost per day.
    pub daily_loss: Decimal,
}

/// A contract ending inside a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiringContract {
    /// Contract id.
    pub contract_id: String,
    /// Employee id.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Annual cost to company.
    pub annual_ctc: Option<Decimal>,
    /// Cost per day.
    pub daily_cost: Decimal,
    /// Last day of the contract.
    pub end_date: NaiveDate,
    /// Client of the contract.
    pub current_client: String,
    /// Days until the end date; 0 once passed.
    pub days_left: i64,
    /// Skill rows.
    pub skills: Vec<EmployeeSkill>,
}

/// Contracts ending in one window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiringReport {
    /// Contracts by end date.
    pub contracts: Vec<ExpiringContract>,
    /// Combined daily cost of the employees.
    pub potential_loss_daily: Decimal,
    /// Thirty days of that cost.
    pub potential_loss_monthly: Decimal,
}

/// The complete revenue dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Selected month, 1-12.
    pub selected_month: u32,
    /// Selected year.
    pub selected_year: i32,
    /// Revenue cards.
    pub revenue_summary: RevenueSummary,
    /// Headcount split.
    pub utilization: Utilization,
    /// Every active employee, by name.
    pub all_employees: Vec<EmployeeCost>,
    /// Headline cards.
    pub summary_cards: SummaryCards,
    /// Bench list.
    pub on_bench: BenchReport,
    /// Contracts ending this month.
    pub expiring_this_month: ExpiringReport,
    /// Contracts ending next month.
    pub expiring_next_month: ExpiringReport,
    /// Contracts ending in the next 3 months.
    pub expiring_next_3_months: ExpiringReport,
    /// Sum of the three expiring card amounts.
    pub total_at_risk: Decimal,
}
