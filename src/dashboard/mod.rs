//! Revenue and utilization dashboard.
//!
//! Aggregates submitted placement contracts and employee costs into the
//! monthly revenue view: revenue and margin, utilization, the bench, and
//! contracts about to expire. All amounts are [`Decimal`]. Single employees
//! can be drilled into with [`employee_details`].

mod employee;
mod period;
mod report;

pub use employee::{EmployeeDetails, employee_details};
pub use period::{DateWindow, LOOKAHEAD_DAYS, ReportMonth, ReportWindows};
pub use report::{
    BenchEmployee, BenchReport, DashboardReport, EmployeeCost, ExpiringContract, ExpiringReport,
    RevenueSummary, SummaryCard, SummaryCards, Utilization,
};

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::info;

use crate::error::EngineResult;
use crate::models::{Contract, EmployeeRecord, EmployeeSkill};
use crate::store::RecordStore;

/// Days used to turn a daily loss into a monthly one.
const DAYS_PER_MONTH_ESTIMATE: i64 = 30;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Builds the dashboard for `month` as seen on `today`.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::StoreUnavailable`] when the store fails.
pub fn build_dashboard<S: RecordStore + ?Sized>(
    store: &S,
    month: ReportMonth,
    today: NaiveDate,
) -> EngineResult<DashboardReport> {
    let started = Instant::now();
    let ledger = Ledger::load(store)?;
    let windows = ReportWindows::for_month(month);

    let summary_cards = SummaryCards {
        on_bench_now: ledger.bench_card(month),
        expiring_this_month: ledger.expiring_card(windows.this_month),
        expiring_next_month: ledger.expiring_card(windows.next_month),
        expiring_next_3_months: ledger.expiring_card(windows.next_3_months),
    };

    let revenue_summary = ledger.revenue_summary(month, &summary_cards);
    let total_at_risk = summary_cards.expiring_this_month.amount
        + summary_cards.expiring_next_month.amount
        + summary_cards.expiring_next_3_months.amount;

    let report = DashboardReport {
        selected_month: month.month(),
        selected_year: month.year(),
        utilization: ledger.utilization(month),
        all_employees: ledger.all_employees(),
        on_bench: ledger.bench_report(month, today),
        expiring_this_month: ledger.expiring_report(windows.this_month, today),
        expiring_next_month: ledger.expiring_report(windows.next_month, today),
        expiring_next_3_months: ledger.expiring_report(windows.next_3_months, today),
        revenue_summary,
        summary_cards,
        total_at_risk,
    };

    info!(
        year = month.year(),
        month = month.month(),
        billable = report.revenue_summary.billable_count,
        bench = report.revenue_summary.bench_count,
        duration_us = started.elapsed().as_micros(),
        "Dashboard built"
    );

    Ok(report)
}

struct StaffMember {
    record: EmployeeRecord,
    skills: Vec<EmployeeSkill>,
}

impl StaffMember {
    fn daily_cost(&self) -> Decimal {
        self.record.daily_cost()
    }
}

/// Active employees and submitted placements, read once per report.
struct Ledger {
    staff: Vec<StaffMember>,
    placements: Vec<Contract>,
}

impl Ledger {
    fn load<S: RecordStore + ?Sized>(store: &S) -> EngineResult<Self> {
        let mut staff = Vec::new();
        for record in store.list_active_employees()? {
            let skills = store.list_employee_skills(&record.id)?;
            staff.push(StaffMember { record, skills });
        }

        let placements = store
            .list_contracts()?
            .into_iter()
            .filter(|contract| contract.is_submitted() && contract.employee_id.is_some())
            .collect();

        Ok(Self { staff, placements })
    }

    fn member(&self, employee_id: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|m| m.record.id == employee_id)
    }

    fn placements_of<'a>(&'a self, employee_id: &'a str) -> impl Iterator<Item = &'a Contract> + 'a {
        self.placements
            .iter()
            .filter(move |contract| contract.binds(employee_id))
    }

    /// Employees with a placement running on any day of the month.
    fn billable_ids(&self, month: ReportMonth) -> BTreeSet<&str> {
        self.placements
            .iter()
            .filter(|c| c.overlaps(month.first_day(), month.last_day()))
            .filter_map(|c| c.employee_id.as_deref())
            .collect()
    }

    fn bench(&self, month: ReportMonth) -> Vec<&StaffMember> {
        let billable = self.billable_ids(month);
        self.staff
            .iter()
            .filter(|m| !billable.contains(m.record.id.as_str()))
            .collect()
    }

    /// Placements ending inside `window` with their employee, by end date.
    fn expiring(&self, window: DateWindow) -> Vec<(&Contract, &StaffMember)> {
        let mut expiring: Vec<_> = self
            .placements
            .iter()
            .filter(|c| window.contains(c.end_date))
            .filter_map(|c| {
                let member = self.member(c.employee_id.as_deref()?)?;
                Some((c, member))
            })
            .collect();
        expiring.sort_by_key(|(c, _)| c.end_date);
        expiring
    }

    fn revenue_summary(&self, month: ReportMonth, cards: &SummaryCards) -> RevenueSummary {
        let first = month.first_day();
        let last = month.last_day();

        let active_revenue: Decimal = self
            .placements
            .iter()
            .filter(|c| c.overlaps(first, last))
            .map(|c| c.monthly_price)
            .sum();

        let billable = self.billable_ids(month);
        let billable_count = count(billable.len());
        let avg_rate = if billable_count > 0 {
            active_revenue / Decimal::from(billable_count)
        } else {
            Decimal::ZERO
        };

        let total_salary_costs: Decimal = self
            .staff
            .iter()
            .filter(|m| billable.contains(m.record.id.as_str()))
            .map(|m| m.record.monthly_cost())
            .sum();

        let net_margin = active_revenue - total_salary_costs;
        let margin_percentage = percentage(net_margin, active_revenue);

        RevenueSummary {
            active_revenue,
            billable_count,
            avg_rate,
            net_margin,
            margin_percentage,
            total_salary_costs,
            bench_cost: cards.on_bench_now.amount,
            bench_count: cards.on_bench_now.count,
            action_items: cards.on_bench_now.count
                + cards.expiring_this_month.count
                + cards.expiring_next_month.count,
            at_risk: cards.expiring_next_3_months.amount,
        }
    }

    fn utilization(&self, month: ReportMonth) -> Utilization {
        let total = count(self.staff.len());
        let on_bench = count(self.bench(month).len());
        let billable = total - on_bench;

        Utilization {
            total,
            billable,
            on_bench,
            utilization_percentage: percentage(Decimal::from(billable), Decimal::from(total)),
        }
    }

    fn bench_card(&self, month: ReportMonth) -> SummaryCard {
        let bench = self.bench(month);
        let days = Decimal::from(month.days());
        SummaryCard {
            count: count(bench.len()),
            amount: bench.iter().map(|m| m.daily_cost() * days).sum(),
        }
    }

    fn expiring_card(&self, window: DateWindow) -> SummaryCard {
        let expiring = self.expiring(window);
        SummaryCard {
            count: count(expiring.len()),
            amount: expiring
                .iter()
                .map(|(c, m)| m.daily_cost() * Decimal::from(window.days_after(c.end_date)))
                .sum(),
        }
    }

    fn all_employees(&self) -> Vec<EmployeeCost> {
        let mut employees: Vec<EmployeeCost> = self
            .staff
            .iter()
            .map(|m| EmployeeCost {
                employee_id: m.record.id.clone(),
                employee_name: m.record.name.clone(),
                annual_ctc: m.record.annual_ctc,
                daily_cost: m.daily_cost(),
                skills: m.skills.clone(),
            })
            .collect();
        employees.sort_by(|a, b| a.employee_name.cmp(&b.employee_name));
        employees
    }

    /// Employees with no placement ending today or later, costliest first.
    fn bench_report(&self, month: ReportMonth, today: NaiveDate) -> BenchReport {
        let mut members: Vec<&StaffMember> = self
            .staff
            .iter()
            .filter(|m| !self.placements_of(&m.record.id).any(|c| c.end_date >= today))
            .collect();
        members.sort_by(|a, b| b.record.annual_ctc.cmp(&a.record.annual_ctc));

        let employees: Vec<BenchEmployee> = members
            .into_iter()
            .map(|m| self.bench_employee(m, today))
            .collect();

        let daily_loss: Decimal = employees.iter().map(|e| e.daily_cost).sum();
        BenchReport {
            monthly_cost: daily_loss * Decimal::from(month.days()),
            daily_loss,
            employees,
        }
    }

    fn bench_employee(&self, member: &StaffMember, today: NaiveDate) -> BenchEmployee {
        let daily_cost = member.daily_cost();
        let last = self
            .placements_of(&member.record.id)
            .max_by_key(|c| c.end_date);

        let (days_on_bench, last_client, last_contract_end, contracts_with_last_client) =
            match last {
                Some(contract) => {
                    let bench_start = contract
                        .end_date
                        .checked_add_days(Days::new(1))
                        .unwrap_or(contract.end_date);
                    let with_client = self
                        .placements_of(&member.record.id)
                        .filter(|c| c.client_code == contract.client_code)
                        .count();
                    (
                        (today - bench_start).num_days(),
                        Some(client_label(contract)),
                        Some(contract.end_date),
                        count(with_client),
                    )
                }
                None => (0, None, None, 0),
            };

        BenchEmployee {
            employee_id: member.record.id.clone(),
            employee_name: member.record.name.clone(),
            annual_ctc: member.record.annual_ctc,
            daily_cost,
            days_on_bench,
            total_loss: daily_cost * Decimal::from(days_on_bench),
            last_client,
            last_contract_end,
            contracts_with_last_client,
            skills: member.skills.clone(),
        }
    }

    fn expiring_report(&self, window: DateWindow, today: NaiveDate) -> ExpiringReport {
        let contracts: Vec<ExpiringContract> = self
            .expiring(window)
            .into_iter()
            .map(|(contract, member)| ExpiringContract {
                contract_id: contract.id.clone(),
                employee_id: member.record.id.clone(),
                employee_name: member.record.name.clone(),
                annual_ctc: member.record.annual_ctc,
                daily_cost: member.daily_cost(),
                end_date: contract.end_date,
                current_client: client_label(contract),
                days_left: (contract.end_date - today).num_days().max(0),
                skills: member.skills.clone(),
            })
            .collect();

        let potential_loss_daily: Decimal = contracts.iter().map(|c| c.daily_cost).sum();
        ExpiringReport {
            potential_loss_monthly: potential_loss_daily * Decimal::from(DAYS_PER_MONTH_ESTIMATE),
            potential_loss_daily,
            contracts,
        }
    }
}

fn client_label(contract: &Contract) -> String {
    contract
        .client_name
        .clone()
        .unwrap_or_else(|| contract.client_code.clone())
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// `part / whole * 100` to two decimals; zero when `whole` is not positive.
fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        (part / whole * HUNDRED).round_dp(2)
    } else {
        Decimal::ZERO
    }
}
