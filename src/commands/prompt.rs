//! Small `dialoguer` wrappers shared by the menus.

use crate::db::db::Db;
use crate::db::departments::Departments;
use crate::db::employees::{Employee, Employees};
use crate::db::projects::{Project, Projects};
use crate::db::users::{User, Users};
use crate::libs::formatter::{parse_decimal, parse_optional_date};
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};

pub fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Index of the chosen item.
pub fn choose<T: ToString>(prompt: Message, items: &[T]) -> Result<usize> {
    Ok(Select::with_theme(&theme())
        .with_prompt(prompt.to_string())
        .items(items)
        .default(0)
        .interact()?)
}

pub fn text(prompt: Message) -> Result<String> {
    Ok(Input::<String>::with_theme(&theme())
        .with_prompt(prompt.to_string())
        .interact_text()?
        .trim()
        .to_string())
}

/// Like [`text`], prefilled with `current`.
pub fn text_with_default(prompt: Message, current: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&theme())
        .with_prompt(prompt.to_string())
        .default(current.to_string())
        .interact_text()?
        .trim()
        .to_string())
}

/// Pre-fills `current` for editing. Erasing it returns an empty string.
pub fn editable_text(prompt: Message, current: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&theme())
        .with_prompt(prompt.to_string())
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?
        .trim()
        .to_string())
}

/// Blank input is `None`.
pub fn optional_text(prompt: Message) -> Result<Option<String>> {
    let value: String = Input::with_theme(&theme())
        .with_prompt(prompt.to_string())
        .allow_empty(true)
        .interact_text()?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

pub fn secret(prompt: Message) -> Result<String> {
    Ok(Password::with_theme(&theme()).with_prompt(prompt.to_string()).interact()?)
}

/// `YYYY-MM-DD`, re-asked until valid. Blank is `None`.
pub fn optional_date(prompt: Message) -> Result<Option<NaiveDate>> {
    let value: String = Input::with_theme(&theme())
        .with_prompt(prompt.to_string())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            parse_optional_date(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(parse_optional_date(&value)?)
}

/// A number accepting `,` or `.` as decimal separator.
pub fn decimal(prompt: Message, default: Option<f64>) -> Result<f64> {
    let theme = theme();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(prompt.to_string())
        .validate_with(|input: &String| -> Result<(), String> { parse_decimal(input).map(|_| ()).map_err(|e| e.to_string()) });
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    Ok(parse_decimal(&input.interact_text()?)?)
}

pub fn confirm(prompt: Message) -> Result<bool> {
    Ok(Confirm::with_theme(&theme())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?)
}

/// Lets the user pick one of `items` or cancel. Prints a notice when empty.
fn pick<T: Clone>(prompt: Message, empty: Message, items: Vec<T>, label: impl Fn(&T) -> String) -> Result<Option<T>> {
    if items.is_empty() {
        msg_info!(empty);
        return Ok(None);
    }

    let mut labels: Vec<String> = items.iter().map(label).collect();
    labels.push(Message::MenuCancel.to_string());

    let selection = choose(prompt, &labels)?;
    Ok(items.get(selection).cloned())
}

pub fn pick_employee(db: &Db, prompt: Message) -> Result<Option<Employee>> {
    let employees = Employees::new(db).list()?;
    pick(prompt, Message::NoEmployees, employees, |e| format!("#{} {} <{}>", e.id, e.name, e.email))
}

pub fn pick_project(db: &Db, prompt: Message) -> Result<Option<Project>> {
    let projects = Projects::new(db).list()?;
    pick(prompt, Message::NoProjects, projects, |p| format!("#{} {} ({})", p.id, p.name, p.status))
}

pub fn pick_department(db: &Db, prompt: Message) -> Result<Option<i64>> {
    let departments = Departments::new(db).list()?;
    Ok(pick(prompt, Message::NoDepartments, departments, |d| format!("#{} {}", d.id, d.name))?.map(|d| d.id))
}

pub fn pick_user(db: &Db, prompt: Message) -> Result<Option<User>> {
    let users = Users::new(db).list()?;
    pick(prompt, Message::NoUsers, users, |u| format!("#{} {} ({})", u.id, u.username, u.role))
}
