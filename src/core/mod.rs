mod debt;
mod engine;
mod error;
mod normalize;
mod summary;
mod types;

pub use debt::{DebtYear, PAYOFF_EPSILON, amortize_year};
pub use engine::{project, run_projection, simulate_projection};
pub use error::InvalidInputError;
pub use normalize::normalize_profile;
pub use summary::summarize_projection;
pub use types::{
    DEFAULT_DEBT_RATE, HouseholdMode, Milestone, Profile, ProjectionResult,
    ProjectionSummary, RawProfile, YearSnapshot,
};
