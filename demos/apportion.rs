//! Runs the reference apportionment scenarios and prints the amounts owed.
//!
//! Run with: `cargo run --example apportion`

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::json;
use tracing::{error, info};

use salary_apportionment::calculation::calculate_apportioned_salary;
use salary_apportionment::error::{EngineError, EngineResult};
use salary_apportionment::models::{EmploymentContract, PayCycle, WorkingDays};

struct Scenario {
    label: &'static str,
    salary: i64,
    working_days: &'static [u8],
    start_date: (i32, u32, u32),
    pay_cycle: serde_json::Value,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            label: "Monthly, starting mid-month",
            salary: 5000,
            working_days: &[1, 2, 3, 4, 5],
            start_date: (2023, 6, 15),
            pay_cycle: json!("MONTHLY"),
        },
        Scenario {
            label: "Weekly, starting Wednesday",
            salary: 1000,
            working_days: &[1, 2, 3, 4, 5],
            start_date: (2023, 6, 7),
            pay_cycle: json!("WEEKLY"),
        },
        Scenario {
            label: "Fortnightly, starting Monday",
            salary: 2000,
            working_days: &[1, 2, 3, 4, 5],
            start_date: (2023, 6, 5),
            pay_cycle: json!("FORTNIGHTLY"),
        },
        Scenario {
            label: "Custom range for June",
            salary: 6000,
            working_days: &[1, 2, 3, 4, 5],
            start_date: (2023, 6, 20),
            pay_cycle: json!({ "start_date": "2023-06-01", "end_date": "2023-06-30" }),
        },
        Scenario {
            label: "Part-time Mon/Wed/Fri, monthly",
            salary: 3000,
            working_days: &[1, 3, 5],
            start_date: (2023, 6, 7),
            pay_cycle: json!("MONTHLY"),
        },
    ]
}

/// Formats an amount as US dollars, e.g. `$1,234.56`.
fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

fn run(scenario: &Scenario) -> EngineResult<Decimal> {
    let (year, month, day) = scenario.start_date;
    let start_date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        EngineError::InvalidContract {
            field: "start_date".to_string(),
            message: format!("{}-{}-{} is not a calendar date", year, month, day),
        }
    })?;

    let contract = EmploymentContract {
        salary: Decimal::from(scenario.salary),
        working_days: WorkingDays::from_day_numbers(scenario.working_days)?,
        start_date,
    };
    let pay_cycle = PayCycle::from_value(&scenario.pay_cycle)?;

    calculate_apportioned_salary(&contract, pay_cycle)
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    for scenario in scenarios() {
        match run(&scenario) {
            Ok(amount) => {
                info!(scenario = scenario.label, pay_cycle = %scenario.pay_cycle, "Apportioned");
                println!("{:<32} {:>12}", scenario.label, format_usd(amount));
            }
            Err(err) => error!(scenario = scenario.label, error = %err, "Apportionment failed"),
        }
    }
}
