use super::prompt;
use super::session::{self, Session};
use crate::db::indicator_queries::{self, IndicatorQueries};
use crate::db::indicators::{self, EconomicIndicators};
use crate::db::users::Role;
use crate::libs::error::AppError;
use crate::libs::indicator::{IndicatorCode, IndicatorService};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Consult,
    MyQueries,
    MyStats,
    MonthlySummary,
    SavedHistory,
    LatestSaved,
    StorageStats,
    Purge,
    Back,
}

const ACTIONS: [Action; 9] = [
    Action::Consult,
    Action::MyQueries,
    Action::MyStats,
    Action::MonthlySummary,
    Action::SavedHistory,
    Action::LatestSaved,
    Action::StorageStats,
    Action::Purge,
    Action::Back,
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Consult => "Look up an indicator",
            Action::MyQueries => "My recent lookups",
            Action::MyStats => "My lookups per indicator",
            Action::MonthlySummary => "Monthly summary",
            Action::SavedHistory => "Saved values of an indicator",
            Action::LatestSaved => "Latest saved values",
            Action::StorageStats => "Storage statistics",
            Action::Purge => "Purge old records",
            Action::Back => "Back",
        };
        write!(f, "{}", label)
    }
}

pub async fn menu(session: &Session<'_>) -> Result<()> {
    loop {
        let action = ACTIONS[prompt::choose(Message::MenuIndicators, &ACTIONS)?];
        let outcome = match action {
            Action::Consult => consult(session).await,
            Action::MyQueries => my_queries(session),
            Action::MyStats => my_stats(session),
            Action::MonthlySummary => monthly_summary(session),
            Action::SavedHistory => saved_history(session),
            Action::LatestSaved => latest_saved(session),
            Action::StorageStats => storage_stats(session),
            Action::Purge => purge(session),
            Action::Back => return Ok(()),
        };

        if let Err(error) = outcome {
            session::report(error)?;
        }
    }
}

fn choose_code() -> Result<IndicatorCode> {
    let labels: Vec<String> = IndicatorCode::ALL
        .iter()
        .map(|code| format!("{} ({})", code.official_name(), code))
        .collect();
    Ok(IndicatorCode::ALL[prompt::choose(Message::PromptSelectIndicator, &labels)?])
}

async fn consult(session: &Session<'_>) -> Result<()> {
    let code = choose_code()?;
    let date = prompt::optional_date(Message::PromptIndicatorDate)?;

    let service = IndicatorService::new(session.db, session.client);
    let consultation = service
        .consult(session.user.id, code.as_str(), date, |reading| {
            View::reading(reading);
            prompt::confirm(Message::PromptSaveIndicator).unwrap_or(false)
        })
        .await?;

    match consultation {
        Some(consultation) if consultation.saved => {
            msg_success!(Message::IndicatorSaved(consultation.reading.code.to_string(), consultation.reading.date))
        }
        Some(_) => {}
        None => msg_info!(Message::IndicatorNoValue(code.to_string(), date)),
    }
    Ok(())
}

fn my_queries(session: &Session<'_>) -> Result<()> {
    let queries = IndicatorQueries::new(session.db).list_for_user(session.user.id, indicator_queries::DEFAULT_LIST_LIMIT)?;
    if queries.is_empty() {
        msg_info!(Message::NoIndicatorQueries);
        return Ok(());
    }
    View::indicator_queries(&queries);
    Ok(())
}

fn my_stats(session: &Session<'_>) -> Result<()> {
    let usage = IndicatorQueries::new(session.db).stats_for_user(session.user.id)?;
    if usage.is_empty() {
        msg_info!(Message::NoIndicatorQueries);
        return Ok(());
    }
    View::code_usage(&usage);
    Ok(())
}

/// `YYYY-MM`.
fn parse_month(input: &str) -> Result<(i32, u32), AppError> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(Message::InvalidMonth(input.trim().to_string())))?;
    Ok((first.year(), first.month()))
}

fn monthly_summary(session: &Session<'_>) -> Result<()> {
    let current = Local::now().format("%Y-%m").to_string();
    let input = prompt::text_with_default(Message::PromptMonth, &current)?;
    let (year, month) = parse_month(&input)?;

    let usage = IndicatorQueries::new(session.db).monthly_summary(session.user.id, year, month)?;
    if usage.is_empty() {
        msg_info!(Message::NoIndicatorQueriesInMonth(year, month));
        return Ok(());
    }
    View::code_usage(&usage);
    Ok(())
}

fn saved_history(session: &Session<'_>) -> Result<()> {
    let code = choose_code()?;
    let history = EconomicIndicators::new(session.db).history(code, indicators::DEFAULT_HISTORY_LIMIT)?;
    if history.is_empty() {
        msg_info!(Message::NoSavedIndicators);
        return Ok(());
    }
    View::indicators(&history);
    Ok(())
}

fn latest_saved(session: &Session<'_>) -> Result<()> {
    let latest = EconomicIndicators::new(session.db).latest_per_code()?;
    if latest.is_empty() {
        msg_info!(Message::NoSavedIndicators);
        return Ok(());
    }
    View::indicators(&latest);
    Ok(())
}

fn storage_stats(session: &Session<'_>) -> Result<()> {
    let stats = EconomicIndicators::new(session.db).stats()?;
    msg_info!(Message::IndicatorStorageStats(
        stats.total,
        stats.distinct_codes,
        stats.last_update.unwrap_or_else(|| "-".to_string())
    ));
    Ok(())
}

fn purge(session: &Session<'_>) -> Result<()> {
    if session.role() != Role::Admin {
        msg_warning!(Message::AdminOnly);
        return Ok(());
    }
    if !prompt::confirm(Message::PromptConfirmPurge(
        indicators::DEFAULT_RETENTION_DAYS,
        indicator_queries::DEFAULT_RETENTION_DAYS,
    ))? {
        return Ok(());
    }

    let values = EconomicIndicators::new(session.db).purge_older_than(indicators::DEFAULT_RETENTION_DAYS)?;
    let queries = IndicatorQueries::new(session.db).purge_older_than(indicator_queries::DEFAULT_RETENTION_DAYS)?;
    msg_success!(Message::IndicatorsPurged(values, queries));
    Ok(())
}
