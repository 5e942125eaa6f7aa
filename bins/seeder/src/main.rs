//! Database seeder for Xpensify development and testing.
//!
//! Seeds a demo user with a budget for the current month and a few weeks of
//! expenses, then prints a bearer token for that user.
//!
//! Usage: cargo run --bin seeder

use chrono::{Days, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use xpensify_core::budget::NewBudget;
use xpensify_core::expense::NewExpense;
use xpensify_core::period::format_period_key;
use xpensify_db::entities::users;
use xpensify_db::{BudgetRepository, ExpenseRepository, UserRepository};
use xpensify_shared::{AppConfig, JwtService};

/// Demo user email (consistent for all seeds)
const DEMO_EMAIL: &str = "demo@xpensify.dev";

/// Expenses as (days ago, amount in paise, description).
const DEMO_EXPENSES: [(u64, i64, &str); 8] = [
    (0, 45_000, "Groceries"),
    (1, 12_000, "Auto rickshaw"),
    (2, 89_900, "Electricity bill"),
    (6, 25_050, "Dinner out"),
    (9, 150_000, "Phone recharge"),
    (13, 32_000, "Pharmacy"),
    (20, 60_000, "Fuel"),
    (27, 18_500, "Books"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let tz: Tz = config
        .reports
        .timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid reports.timezone: {e}"))?;

    println!("Connecting to database...");
    let db = xpensify_db::connect(&config.database.url).await?;

    println!("Seeding demo user...");
    let user = UserRepository::new(db.clone())
        .find_or_create(DEMO_EMAIL, Some("Demo User"), None)
        .await?;

    println!("Seeding budget...");
    seed_budget(&BudgetRepository::new(db.clone()), &user, tz).await?;

    println!("Seeding expenses...");
    seed_expenses(&ExpenseRepository::new(db), &user, tz).await?;

    let token = JwtService::new(config.jwt).issue_token(DEMO_EMAIL, Some("Demo User"), None)?;
    println!("Seeding complete!");
    println!("Bearer token for {DEMO_EMAIL}:\n{token}");

    Ok(())
}

/// Sets this month's budget, overwriting any earlier seed.
async fn seed_budget(repo: &BudgetRepository, user: &users::Model, tz: Tz) -> anyhow::Result<()> {
    let period_key = format_period_key(Utc::now().with_timezone(&tz).date_naive());
    let (budget, outcome) = repo
        .upsert(
            user.id,
            &NewBudget {
                period_key,
                amount: Decimal::new(25_000, 0),
            },
        )
        .await?;

    println!("  {} budget {} ({outcome:?})", budget.period_key, budget.amount);
    Ok(())
}

/// Records the demo expenses unless the user already has some.
async fn seed_expenses(
    repo: &ExpenseRepository,
    user: &users::Model,
    tz: Tz,
) -> anyhow::Result<()> {
    if !repo.list_for_user(user.id).await?.is_empty() {
        println!("  Demo expenses already exist, skipping...");
        return Ok(());
    }

    let today = Utc::now().with_timezone(&tz).date_naive();
    let midday = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);

    for (days_ago, paise, description) in DEMO_EXPENSES {
        let Some(day) = today.checked_sub_days(Days::new(days_ago)) else {
            continue;
        };
        let Some(date) = tz.from_local_datetime(&day.and_time(midday)).earliest() else {
            continue;
        };

        repo.create(
            user.id,
            &NewExpense {
                amount: Decimal::new(paise, 2),
                description: description.to_string(),
                date: date.with_timezone(&Utc),
            },
        )
        .await?;
        println!("  {day} {description}");
    }

    Ok(())
}
