use serde::Serialize;

/// Annual debt interest rate assumed when a profile does not name one.
pub const DEFAULT_DEBT_RATE: f64 = 0.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseholdMode {
    Single,
    DualEarner,
}

/// Profile as collected from a form or request. Every numeric field may be absent;
/// `None` also stands for values that were present but not numeric.
#[derive(Debug, Clone, Default)]
pub struct RawProfile {
    pub horizon_years: Option<f64>,
    pub age: Option<f64>,
    pub income: Option<f64>,
    pub partner_age: Option<f64>,
    pub partner_income: Option<f64>,
    pub bonus_income: Option<f64>,
    pub other_income: Option<f64>,
    pub initial_investments: Option<f64>,
    pub monthly_investment: Option<f64>,
    pub investment_return: Option<f64>,
    pub income_growth: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub expense_growth: Option<f64>,
    pub current_debt: Option<f64>,
    pub monthly_debt_payment: Option<f64>,
    pub debt_rate: Option<f64>,
}

/// Fully populated assumptions for one projection run. Rates are fractions (0.07 = 7%).
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub horizon_years: u32,
    pub household_mode: HouseholdMode,
    pub age: u32,
    pub income: f64,
    pub partner_age: Option<u32>,
    pub partner_income: f64,
    pub bonus_income: f64,
    pub other_income: f64,
    pub initial_investments: f64,
    pub monthly_investment: f64,
    pub investment_return: f64,
    pub income_growth: f64,
    pub monthly_expenses: f64,
    pub expense_growth: f64,
    pub current_debt: f64,
    pub monthly_debt_payment: f64,
    pub debt_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub year: u32,
    pub age: u32,
    pub partner_age: Option<u32>,
    pub income: f64,
    pub expenses: f64,
    pub contributions: f64,
    pub investment_growth: f64,
    pub debt_payments: f64,
    pub interest_paid: f64,
    pub net_cash_flow: f64,
    pub investment_balance: f64,
    pub debt_balance: f64,
    pub cumulative_interest_paid: f64,
    pub net_worth: f64,
}

/// When a threshold is first crossed within the projection.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", content = "year", rename_all = "camelCase")]
pub enum Milestone {
    /// Already satisfied before the first simulated year.
    AlreadyMet,
    /// First reached during this 1-indexed year.
    Year(u32),
    /// Not reached within the horizon.
    Never,
}

impl Milestone {
    pub fn year(self) -> Option<u32> {
        match self {
            Milestone::Year(year) => Some(year),
            Milestone::AlreadyMet | Milestone::Never => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub final_net_worth: f64,
    pub peak_net_worth: f64,
    pub net_worth_non_negative: Milestone,
    pub debt_free: Milestone,
    pub realized_investment_growth: f64,
    pub total_contributions: f64,
    pub total_interest_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub years: Vec<YearSnapshot>,
    pub summary: ProjectionSummary,
}
