use tracing::debug;

use super::debt::amortize_year;
use super::error::InvalidInputError;
use super::normalize::normalize_profile;
use super::summary::summarize_projection;
use super::types::{HouseholdMode, Profile, ProjectionResult, RawProfile, YearSnapshot};

#[derive(Debug, Clone, Copy)]
struct InvestmentYear {
    ending_balance: f64,
    contributions: f64,
    growth: f64,
}

/// Normalizes `raw`, simulates it and summarizes the trajectory.
pub fn run_projection(
    raw: &RawProfile,
    mode: HouseholdMode,
) -> Result<ProjectionResult, InvalidInputError> {
    let profile = normalize_profile(raw, mode)?;
    Ok(project(&profile))
}

/// Runs an already normalized profile.
pub fn project(profile: &Profile) -> ProjectionResult {
    let years = simulate_projection(profile);
    let summary = summarize_projection(profile, &years);
    ProjectionResult { years, summary }
}

/// Projects `profile` one year at a time and returns `horizon_years` snapshots.
pub fn simulate_projection(profile: &Profile) -> Vec<YearSnapshot> {
    let mut years = Vec::with_capacity(profile.horizon_years.min(1_000) as usize);
    let mut investment_balance = profile.initial_investments;
    let mut debt_balance = profile.current_debt;
    let mut cumulative_interest_paid = 0.0;

    for (years_since_start, year) in (1..=profile.horizon_years).enumerate() {
        let income = gross_income(profile, years_since_start as u32);
        let expenses = living_expenses(profile, years_since_start as u32);

        let debt = amortize_year(debt_balance, profile.monthly_debt_payment, profile.debt_rate);
        debt_balance = debt.ending_principal;
        cumulative_interest_paid += debt.interest_paid;

        let investments = grow_investments(
            investment_balance,
            profile.monthly_investment,
            profile.investment_return,
        );
        investment_balance = investments.ending_balance;

        let debt_payments = debt.total_paid();
        years.push(YearSnapshot {
            year,
            age: profile.age.saturating_add(years_since_start as u32),
            partner_age: profile
                .partner_age
                .map(|age| age.saturating_add(years_since_start as u32)),
            income,
            expenses,
            contributions: investments.contributions,
            investment_growth: investments.growth,
            debt_payments,
            interest_paid: debt.interest_paid,
            net_cash_flow: income - expenses - debt_payments - investments.contributions,
            investment_balance,
            debt_balance,
            cumulative_interest_paid,
            net_worth: investment_balance - debt_balance,
        });
    }

    debug!(
        horizon_years = profile.horizon_years,
        final_net_worth = years.last().map(|y| y.net_worth),
        "projection simulated"
    );
    years
}

/// Salaries grow with `income_growth`; bonus and other income stay flat.
fn gross_income(profile: &Profile, years_since_start: u32) -> f64 {
    let salaries = profile.income + profile.partner_income;
    grown(salaries, profile.income_growth, years_since_start)
        + profile.bonus_income
        + profile.other_income
}

fn living_expenses(profile: &Profile, years_since_start: u32) -> f64 {
    grown(
        profile.monthly_expenses * 12.0,
        profile.expense_growth,
        years_since_start,
    )
}

/// `base * (1 + rate)^years`. A zero base stays zero even if the multiplier overflows.
fn grown(base: f64, rate: f64, years: u32) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    base * (1.0 + rate).powi(years.min(i32::MAX as u32) as i32)
}

/// Ordinary annuity: each month compounds at `annual_return / 12`, then that month's
/// contribution is credited.
fn grow_investments(
    start_balance: f64,
    monthly_contribution: f64,
    annual_return: f64,
) -> InvestmentYear {
    let monthly_rate = annual_return / 12.0;
    let mut balance = start_balance;
    let mut growth = 0.0;

    for _ in 0..12 {
        let month_growth = balance * monthly_rate;
        balance += month_growth;
        growth += month_growth;
        balance += monthly_contribution;
    }

    InvestmentYear {
        ending_balance: balance,
        contributions: monthly_contribution * 12.0,
        growth,
    }
}
