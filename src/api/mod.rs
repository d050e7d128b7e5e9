use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    HouseholdMode, InvalidInputError, ProjectionResult, ProjectionSummary, RawProfile,
    YearSnapshot, run_projection,
};

/// Longest projection the HTTP API will run, in years.
pub const MAX_API_HORIZON_YEARS: f64 = 150.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliHouseholdMode {
    Single,
    Dual,
}

impl From<CliHouseholdMode> for HouseholdMode {
    fn from(value: CliHouseholdMode) -> Self {
        match value {
            CliHouseholdMode::Single => HouseholdMode::Single,
            CliHouseholdMode::Dual => HouseholdMode::DualEarner,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiHouseholdMode {
    Single,
    #[serde(alias = "dual-earner", alias = "dualEarner", alias = "couple")]
    Dual,
}

impl From<ApiHouseholdMode> for HouseholdMode {
    fn from(value: ApiHouseholdMode) -> Self {
        match value {
            ApiHouseholdMode::Single => HouseholdMode::Single,
            ApiHouseholdMode::Dual => HouseholdMode::DualEarner,
        }
    }
}

/// Wire shape of a projection request. Rates are percentages.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    household_mode: Option<ApiHouseholdMode>,

    #[serde(deserialize_with = "lenient_number")]
    horizon_years: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    age: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    income: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    partner_age: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    partner_income: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    bonus_income: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    other_income: Option<f64>,

    #[serde(deserialize_with = "lenient_number")]
    initial_investments: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    monthly_investment: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    investment_return: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    income_growth: Option<f64>,

    #[serde(deserialize_with = "lenient_number")]
    monthly_expenses: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    expense_growth: Option<f64>,

    #[serde(deserialize_with = "lenient_number")]
    current_debt: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    monthly_debt_payment: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    debt_rate: Option<f64>,
}

/// Numbers and numeric strings are kept; any other value reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

#[derive(Parser, Debug)]
#[command(
    name = "networth",
    about = "Deterministic multi-year net worth projection (income, expenses, investments, debt)"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the projection API over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Run one projection and print it as JSON
    Project(ProfileArgs),
}

#[derive(Args, Debug, Clone)]
struct ProfileArgs {
    #[arg(long, help = "Number of years to project")]
    horizon_years: f64,
    #[arg(long, value_enum, default_value_t = CliHouseholdMode::Single)]
    household_mode: CliHouseholdMode,
    #[arg(long)]
    age: f64,
    #[arg(long, help = "Annual salary of the primary earner")]
    income: f64,
    #[arg(long, help = "Required with --household-mode=dual")]
    partner_age: Option<f64>,
    #[arg(long, help = "Annual salary of the partner, required with --household-mode=dual")]
    partner_income: Option<f64>,
    #[arg(long, default_value_t = 0.0, help = "Annual bonus, not grown")]
    bonus_income: f64,
    #[arg(long, default_value_t = 0.0, help = "Other annual income, not grown")]
    other_income: f64,
    #[arg(long, default_value_t = 0.0)]
    initial_investments: f64,
    #[arg(long, default_value_t = 0.0)]
    monthly_investment: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        allow_hyphen_values = true,
        help = "Expected nominal annual investment return in percent, e.g. 7"
    )]
    investment_return: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        allow_hyphen_values = true,
        help = "Annual salary growth in percent"
    )]
    income_growth: f64,
    #[arg(long, default_value_t = 0.0)]
    monthly_expenses: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual expense growth in percent")]
    expense_growth: f64,
    #[arg(long, default_value_t = 0.0)]
    current_debt: f64,
    #[arg(long, default_value_t = 0.0)]
    monthly_debt_payment: f64,
    #[arg(long, help = "Annual debt interest rate in percent, defaults to 0")]
    debt_rate: Option<f64>,
}

impl ProfileArgs {
    fn into_raw(self) -> (RawProfile, HouseholdMode) {
        let raw = RawProfile {
            horizon_years: Some(self.horizon_years),
            age: Some(self.age),
            income: Some(self.income),
            partner_age: self.partner_age,
            partner_income: self.partner_income,
            bonus_income: Some(self.bonus_income),
            other_income: Some(self.other_income),
            initial_investments: Some(self.initial_investments),
            monthly_investment: Some(self.monthly_investment),
            investment_return: Some(percent(self.investment_return)),
            income_growth: Some(percent(self.income_growth)),
            monthly_expenses: Some(self.monthly_expenses),
            expense_growth: Some(percent(self.expense_growth)),
            current_debt: Some(self.current_debt),
            monthly_debt_payment: Some(self.monthly_debt_payment),
            debt_rate: self.debt_rate.map(percent),
        };
        (raw, self.household_mode.into())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    household_mode: HouseholdMode,
    years: Vec<YearSnapshot>,
    summary: ProjectionSummary,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

fn percent(value: f64) -> f64 {
    value / 100.0
}

/// Parses command-line arguments and runs the selected command.
pub async fn run_cli() -> Result<(), String> {
    match Cli::parse().command {
        Command::Serve { port } => run_http_server(port)
            .await
            .map_err(|e| format!("Server error: {e}")),
        Command::Project(args) => {
            let (raw, mode) = args.into_raw();
            let result = run_projection(&raw, mode).map_err(|e| e.to_string())?;
            let response = build_project_response(mode, result);
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| format!("Failed to serialize projection: {e}"))?;
            println!("{json}");
            Ok(())
        }
    }
}

fn app() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("projection API listening on http://{addr}");

    axum::serve(listener, app()).await
}

async fn health_handler() -> impl IntoResponse {
    with_cache_control("ok")
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", None)
}

async fn project_get_handler(
    payload: Result<Query<ProjectPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => payload_rejection_response(rejection.status(), &rejection.body_text()),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => payload_rejection_response(rejection.status(), &rejection.body_text()),
    }
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let (raw, mode) = raw_profile_from_payload(payload);
    if let Some(horizon) = raw.horizon_years.filter(|h| h.trunc() > MAX_API_HORIZON_YEARS) {
        warn!(horizon, "rejected projection request over the horizon limit");
        return error_response(
            StatusCode::BAD_REQUEST,
            &format!("horizonYears must be <= {MAX_API_HORIZON_YEARS}, got {horizon}"),
            Some("horizon_too_long"),
        );
    }

    match run_projection(&raw, mode) {
        Ok(result) => json_response(StatusCode::OK, build_project_response(mode, result)),
        Err(err) => {
            warn!(kind = err.kind(), field = err.field(), "rejected projection request");
            invalid_input_response(&err)
        }
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str, kind: Option<&'static str>) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            kind,
        },
    )
}

fn payload_rejection_response(status: StatusCode, msg: &str) -> Response {
    warn!(%status, "rejected malformed projection payload");
    error_response(status, msg, Some("invalid_payload"))
}

fn invalid_input_response(err: &InvalidInputError) -> Response {
    error_response(StatusCode::BAD_REQUEST, &err.to_string(), Some(err.kind()))
}

#[cfg(test)]
fn raw_profile_from_json(json: &str) -> Result<(RawProfile, HouseholdMode), String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(raw_profile_from_payload(payload))
}

fn raw_profile_from_payload(payload: ProjectPayload) -> (RawProfile, HouseholdMode) {
    let mode = payload
        .household_mode
        .map_or(HouseholdMode::Single, HouseholdMode::from);

    let raw = RawProfile {
        horizon_years: payload.horizon_years,
        age: payload.age,
        income: payload.income,
        partner_age: payload.partner_age,
        partner_income: payload.partner_income,
        bonus_income: payload.bonus_income,
        other_income: payload.other_income,
        initial_investments: payload.initial_investments,
        monthly_investment: payload.monthly_investment,
        investment_return: payload.investment_return.map(percent),
        income_growth: payload.income_growth.map(percent),
        monthly_expenses: payload.monthly_expenses,
        expense_growth: payload.expense_growth.map(percent),
        current_debt: payload.current_debt,
        monthly_debt_payment: payload.monthly_debt_payment,
        debt_rate: payload.debt_rate.map(percent),
    };
    (raw, mode)
}

fn build_project_response(mode: HouseholdMode, result: ProjectionResult) -> ProjectResponse {
    ProjectResponse {
        household_mode: mode,
        years: result.years,
        summary: result.summary,
    }
}
