use super::prompt;
use super::session::{self, Session};
use crate::db::indicator_queries::{self, IndicatorQueries};
use crate::db::indicators::EconomicIndicators;
use crate::db::time_entries::TimeEntries;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_info;
use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    TopIndicators,
    GlobalStats,
    LatestIndicators,
    HoursPerEmployee,
    HoursPerProject,
    Back,
}

impl Action {
    fn for_session(session: &Session<'_>) -> Vec<Action> {
        let mut actions = vec![Action::TopIndicators, Action::GlobalStats, Action::LatestIndicators];
        if session.role().can_manage_staff() {
            actions.extend([Action::HoursPerEmployee, Action::HoursPerProject]);
        }
        actions.push(Action::Back);
        actions
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::TopIndicators => "Most consulted indicators",
            Action::GlobalStats => "Global statistics",
            Action::LatestIndicators => "Latest indicator values",
            Action::HoursPerEmployee => "Hours per employee",
            Action::HoursPerProject => "Hours per project",
            Action::Back => "Back",
        };
        write!(f, "{}", label)
    }
}

pub fn menu(session: &Session<'_>) -> Result<()> {
    let actions = Action::for_session(session);
    loop {
        let action = actions[prompt::choose(Message::MenuReports, &actions)?];
        let outcome = match action {
            Action::TopIndicators => top_indicators(session),
            Action::GlobalStats => global_stats(session),
            Action::LatestIndicators => latest_indicators(session),
            Action::HoursPerEmployee => hours_per_employee(session),
            Action::HoursPerProject => hours_per_project(session),
            Action::Back => return Ok(()),
        };

        if let Err(error) = outcome {
            session::report(error)?;
        }
    }
}

fn top_indicators(session: &Session<'_>) -> Result<()> {
    let top = IndicatorQueries::new(session.db).top_global(indicator_queries::DEFAULT_TOP_LIMIT)?;
    if top.is_empty() {
        msg_info!(Message::NoIndicatorQueries);
        return Ok(());
    }
    msg_info!(Message::ReportTopIndicators(indicator_queries::DEFAULT_TOP_LIMIT), true);
    View::top_indicators(&top);
    Ok(())
}

fn global_stats(session: &Session<'_>) -> Result<()> {
    let stats = TimeEntries::new(session.db).global_stats()?;
    let queries_today = IndicatorQueries::new(session.db).total_today()?;
    msg_info!(Message::ReportGlobalStats, true);
    View::time_stats(&stats, queries_today);
    Ok(())
}

fn latest_indicators(session: &Session<'_>) -> Result<()> {
    let latest = EconomicIndicators::new(session.db).latest_per_code()?;
    if latest.is_empty() {
        msg_info!(Message::NoSavedIndicators);
        return Ok(());
    }
    View::indicators(&latest);
    Ok(())
}

fn hours_per_employee(session: &Session<'_>) -> Result<()> {
    let hours = TimeEntries::new(session.db).hours_by_employee()?;
    if hours.is_empty() {
        msg_info!(Message::NoTimeEntries);
        return Ok(());
    }
    View::employee_hours(&hours);
    Ok(())
}

fn hours_per_project(session: &Session<'_>) -> Result<()> {
    let hours = TimeEntries::new(session.db).hours_by_project()?;
    if hours.is_empty() {
        msg_info!(Message::NoTimeEntries);
        return Ok(());
    }
    View::project_hours(&hours);
    Ok(())
}
