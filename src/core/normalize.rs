use super::error::InvalidInputError;
use super::types::{DEFAULT_DEBT_RATE, HouseholdMode, Profile, RawProfile};

/// Turns a raw profile into a `Profile` the simulator can run without further checks.
///
/// Required fields must be present and finite. Optional fields that are absent or not
/// finite become 0. Amounts and most rates are clamped at 0; investment return and income
/// growth may be negative but must stay above -100%. Partner fields are only read in
/// dual-earner mode.
pub fn normalize_profile(
    raw: &RawProfile,
    mode: HouseholdMode,
) -> Result<Profile, InvalidInputError> {
    let horizon_years = normalize_horizon(raw.horizon_years)?;
    let age = normalize_age("age", raw.age)?;
    let income = required("income", raw.income)?.max(0.0);

    let (partner_age, partner_income) = match mode {
        HouseholdMode::Single => (None, 0.0),
        HouseholdMode::DualEarner => (
            Some(normalize_age("partnerAge", raw.partner_age)?),
            required("partnerIncome", raw.partner_income)?.max(0.0),
        ),
    };

    let initial_investments = required("initialInvestments", raw.initial_investments)?.max(0.0);
    let monthly_investment = required("monthlyInvestment", raw.monthly_investment)?.max(0.0);
    let investment_return = growth_rate(
        "investmentReturn",
        required("investmentReturn", raw.investment_return)?,
    )?;
    let monthly_expenses = required("monthlyExpenses", raw.monthly_expenses)?.max(0.0);
    let expense_growth = required("expenseGrowth", raw.expense_growth)?.max(0.0);
    let income_growth = growth_rate("incomeGrowth", optional(raw.income_growth))?;

    Ok(Profile {
        horizon_years,
        household_mode: mode,
        age,
        income,
        partner_age,
        partner_income,
        bonus_income: optional(raw.bonus_income).max(0.0),
        other_income: optional(raw.other_income).max(0.0),
        initial_investments,
        monthly_investment,
        investment_return,
        income_growth,
        monthly_expenses,
        expense_growth,
        current_debt: optional(raw.current_debt).max(0.0),
        monthly_debt_payment: optional(raw.monthly_debt_payment).max(0.0),
        debt_rate: raw
            .debt_rate
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_DEBT_RATE)
            .max(0.0),
    })
}

fn required(field: &'static str, value: Option<f64>) -> Result<f64, InvalidInputError> {
    let value = value.ok_or(InvalidInputError::MissingRequiredField { field })?;
    if !value.is_finite() {
        return Err(InvalidInputError::NonFiniteNumber { field });
    }
    Ok(value)
}

fn optional(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn normalize_horizon(value: Option<f64>) -> Result<u32, InvalidInputError> {
    let value = required("horizonYears", value)?;
    let years = value.trunc();
    if years < 1.0 {
        return Err(InvalidInputError::NonPositiveHorizon { value });
    }
    Ok(years.min(u32::MAX as f64) as u32)
}

fn normalize_age(field: &'static str, value: Option<f64>) -> Result<u32, InvalidInputError> {
    let value = required(field, value)?;
    if value < 0.0 {
        return Err(InvalidInputError::NegativeAge { field, value });
    }
    Ok(value.trunc().min(u32::MAX as f64) as u32)
}

fn growth_rate(field: &'static str, value: f64) -> Result<f64, InvalidInputError> {
    if value <= -1.0 {
        return Err(InvalidInputError::RateOutOfRange { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_raw() -> RawProfile {
        RawProfile {
            horizon_years: Some(20.0),
            age: Some(35.0),
            income: Some(90_000.0),
            partner_age: Some(33.0),
            partner_income: Some(60_000.0),
            bonus_income: Some(5_000.0),
            other_income: None,
            initial_investments: Some(50_000.0),
            monthly_investment: Some(1_000.0),
            investment_return: Some(0.07),
            income_growth: Some(0.02),
            monthly_expenses: Some(4_000.0),
            expense_growth: Some(0.03),
            current_debt: Some(20_000.0),
            monthly_debt_payment: Some(500.0),
            debt_rate: None,
        }
    }

    #[test]
    fn normalize_fills_optional_fields_with_zero() {
        let mut raw = complete_raw();
        raw.bonus_income = None;
        raw.income_growth = None;
        raw.current_debt = None;
        raw.monthly_debt_payment = Some(f64::NAN);

        let profile = normalize_profile(&raw, HouseholdMode::Single).expect("valid profile");
        assert_eq!(profile.bonus_income, 0.0);
        assert_eq!(profile.other_income, 0.0);
        assert_eq!(profile.income_growth, 0.0);
        assert_eq!(profile.current_debt, 0.0);
        assert_eq!(profile.monthly_debt_payment, 0.0);
        assert_eq!(profile.debt_rate, DEFAULT_DEBT_RATE);
    }

    #[test]
    fn normalize_single_mode_ignores_partner_fields() {
        let mut raw = complete_raw();
        raw.partner_age = None;
        raw.partner_income = Some(f64::INFINITY);

        let profile = normalize_profile(&raw, HouseholdMode::Single).expect("valid profile");
        assert_eq!(profile.partner_age, None);
        assert_eq!(profile.partner_income, 0.0);
        assert_eq!(profile.household_mode, HouseholdMode::Single);
    }

    #[test]
    fn normalize_dual_mode_requires_partner_fields() {
        let mut raw = complete_raw();
        raw.partner_income = None;

        let err = normalize_profile(&raw, HouseholdMode::DualEarner).expect_err("must reject");
        assert_eq!(
            err,
            InvalidInputError::MissingRequiredField {
                field: "partnerIncome"
            }
        );

        let profile =
            normalize_profile(&complete_raw(), HouseholdMode::DualEarner).expect("valid profile");
        assert_eq!(profile.partner_age, Some(33));
        assert_eq!(profile.partner_income, 60_000.0);
    }

    #[test]
    fn normalize_rejects_non_positive_horizon() {
        let mut raw = complete_raw();
        raw.horizon_years = Some(0.0);
        let err = normalize_profile(&raw, HouseholdMode::Single).expect_err("must reject");
        assert_eq!(err.kind(), "non_positive_horizon");

        raw.horizon_years = Some(0.7);
        let err = normalize_profile(&raw, HouseholdMode::Single).expect_err("must reject");
        assert_eq!(err, InvalidInputError::NonPositiveHorizon { value: 0.7 });
        assert!(err.to_string().contains("got 0.7"));
    }

    #[test]
    fn normalize_accepts_long_horizons() {
        let mut raw = complete_raw();
        raw.horizon_years = Some(151.0);
        let profile = normalize_profile(&raw, HouseholdMode::Single).expect("valid profile");
        assert_eq!(profile.horizon_years, 151);
    }

    #[test]
    fn normalize_rejects_negative_age() {
        let mut raw = complete_raw();
        raw.partner_age = Some(-1.0);
        let err = normalize_profile(&raw, HouseholdMode::DualEarner).expect_err("must reject");
        assert_eq!(
            err,
            InvalidInputError::NegativeAge {
                field: "partnerAge",
                value: -1.0
            }
        );
    }

    #[test]
    fn normalize_rejects_missing_and_non_finite_required_fields() {
        let mut raw = complete_raw();
        raw.monthly_expenses = None;
        let err = normalize_profile(&raw, HouseholdMode::Single).expect_err("must reject");
        assert_eq!(err.kind(), "missing_required_field");
        assert_eq!(err.field(), "monthlyExpenses");

        let mut raw = complete_raw();
        raw.investment_return = Some(f64::NAN);
        let err = normalize_profile(&raw, HouseholdMode::Single).expect_err("must reject");
        assert_eq!(err.kind(), "non_finite_number");
        assert_eq!(err.field(), "investmentReturn");
    }

    #[test]
    fn normalize_allows_negative_growth_above_minus_one() {
        let mut raw = complete_raw();
        raw.investment_return = Some(-0.3);
        raw.income_growth = Some(-0.05);
        let profile = normalize_profile(&raw, HouseholdMode::Single).expect("valid profile");
        assert_eq!(profile.investment_return, -0.3);
        assert_eq!(profile.income_growth, -0.05);

        raw.investment_return = Some(-1.0);
        let err = normalize_profile(&raw, HouseholdMode::Single).expect_err("must reject");
        assert_eq!(err.kind(), "rate_out_of_range");
    }

    #[test]
    fn normalize_clamps_negative_amounts_and_truncates_ages() {
        let mut raw = complete_raw();
        raw.bonus_income = Some(-2_000.0);
        raw.expense_growth = Some(-0.01);
        raw.monthly_investment = Some(-50.0);
        raw.age = Some(41.9);
        raw.horizon_years = Some(10.6);
        raw.debt_rate = Some(-0.04);

        let profile = normalize_profile(&raw, HouseholdMode::Single).expect("valid profile");
        assert_eq!(profile.bonus_income, 0.0);
        assert_eq!(profile.expense_growth, 0.0);
        assert_eq!(profile.monthly_investment, 0.0);
        assert_eq!(profile.debt_rate, 0.0);
        assert_eq!(profile.age, 41);
        assert_eq!(profile.horizon_years, 10);
    }
}
