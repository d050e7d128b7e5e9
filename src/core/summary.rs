use super::types::{Milestone, Profile, ProjectionSummary, YearSnapshot};

/// Reduces a trajectory to the headline numbers shown alongside it.
pub fn summarize_projection(profile: &Profile, years: &[YearSnapshot]) -> ProjectionSummary {
    let initial_net_worth = profile.initial_investments - profile.current_debt;
    let final_net_worth = years.last().map_or(initial_net_worth, |y| y.net_worth);
    let peak_net_worth = years
        .iter()
        .map(|y| y.net_worth)
        .fold(final_net_worth, f64::max);

    ProjectionSummary {
        final_net_worth,
        peak_net_worth,
        net_worth_non_negative: first_year(years, |y| y.net_worth >= 0.0),
        debt_free: debt_free_milestone(profile, years),
        realized_investment_growth: realized_investment_growth(profile, years),
        total_contributions: years.iter().map(|y| y.contributions).sum(),
        total_interest_paid: years.last().map_or(0.0, |y| y.cumulative_interest_paid),
    }
}

fn first_year(years: &[YearSnapshot], reached: impl Fn(&YearSnapshot) -> bool) -> Milestone {
    years
        .iter()
        .find(|y| reached(*y))
        .map_or(Milestone::Never, |y| Milestone::Year(y.year))
}

fn debt_free_milestone(profile: &Profile, years: &[YearSnapshot]) -> Milestone {
    if profile.current_debt <= 0.0 {
        return Milestone::AlreadyMet;
    }
    first_year(years, |y| y.debt_balance == 0.0)
}

/// Geometric mean of ending over initial investments. Contributions are folded in, so
/// this is the growth of the pot rather than the market return. Without a starting
/// balance nothing is observable and the assumed rate is returned.
fn realized_investment_growth(profile: &Profile, years: &[YearSnapshot]) -> f64 {
    let Some(last) = years.last() else {
        return profile.investment_return;
    };
    if profile.initial_investments <= 0.0 {
        return profile.investment_return;
    }

    let ratio = last.investment_balance / profile.initial_investments;
    ratio.max(0.0).powf(1.0 / years.len() as f64) - 1.0
}
