/// Balances below this are treated as paid off.
pub const PAYOFF_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtYear {
    pub ending_principal: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,
}

impl DebtYear {
    pub fn total_paid(self) -> f64 {
        self.interest_paid + self.principal_paid
    }
}

/// Runs twelve monthly amortization steps on `principal`.
///
/// Interest accrues on the balance at `annual_rate / 12` before each payment, and the
/// payment covers interest first. A payment smaller than the accrued interest leaves the
/// shortfall capitalized, so the balance can grow. Once the balance reaches zero no further
/// payments are taken.
pub fn amortize_year(principal: f64, monthly_payment: f64, annual_rate: f64) -> DebtYear {
    let monthly_rate = annual_rate / 12.0;
    let payment = monthly_payment.max(0.0);
    let mut balance = principal.max(0.0);
    let mut interest_paid = 0.0;
    let mut principal_paid = 0.0;

    for _ in 0..12 {
        if balance <= 0.0 {
            break;
        }

        let interest = balance * monthly_rate;
        let due = balance + interest;
        let paid = payment.min(due);
        let toward_interest = paid.min(interest);
        interest_paid += toward_interest;
        principal_paid += paid - toward_interest;

        balance = due - paid;
        if balance < PAYOFF_EPSILON {
            principal_paid += balance;
            balance = 0.0;
        }
    }

    DebtYear {
        ending_principal: balance,
        interest_paid,
        principal_paid,
    }
}
