use super::prompt;
use super::session::Session;
use crate::db::employees::Employee;
use crate::db::time_entries::{NewTimeEntry, TimeEntries};
use crate::libs::formatter::format_hours;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::Local;

/// Staff may record hours for anyone; employees only for their own record.
fn target_employee(session: &Session<'_>) -> Result<Option<Employee>> {
    if session.role().can_manage_staff() {
        return prompt::pick_employee(session.db, Message::PromptSelectEmployee);
    }

    let own = session.own_employee()?;
    if own.is_none() {
        msg_warning!(Message::NoEmployeeRecord(session.user.username.clone()));
    }
    Ok(own)
}

pub fn register(session: &Session<'_>) -> Result<()> {
    let Some(employee) = target_employee(session)? else {
        return Ok(());
    };
    let Some(project) = prompt::pick_project(session.db, Message::PromptSelectProject)? else {
        return Ok(());
    };

    let date = prompt::optional_date(Message::PromptWorkDate)?.unwrap_or_else(|| Local::now().date_naive());
    let hours = prompt::decimal(Message::PromptHours, None)?;
    let description = prompt::optional_text(Message::PromptWorkDescription)?;

    TimeEntries::new(session.db).record(NewTimeEntry {
        employee_id: employee.id,
        project_id: project.id,
        date,
        hours,
        description,
    })?;

    msg_success!(Message::HoursRecorded(format_hours(hours), employee.name, project.name));
    Ok(())
}

pub fn mine(session: &Session<'_>) -> Result<()> {
    let Some(employee) = session.own_employee()? else {
        msg_warning!(Message::NoEmployeeRecord(session.user.username.clone()));
        return Ok(());
    };

    let from = prompt::optional_date(Message::PromptDateFrom)?;
    let to = prompt::optional_date(Message::PromptDateTo)?;

    let time_entries = TimeEntries::new(session.db);
    let entries = time_entries.list_for_employee(employee.id, from, to)?;
    if entries.is_empty() {
        msg_info!(Message::NoTimeEntries);
        return Ok(());
    }

    let total = time_entries.total_hours_for_employee(employee.id, from, to)?;
    View::time_entries(&entries, total);
    Ok(())
}
