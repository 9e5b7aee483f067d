use super::prompt;
use super::session::{self, Session};
use crate::db::employees::{EmployeeChanges, Employees, NewEmployee};
use crate::db::users::Role;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    SearchByName,
    SearchByEmail,
    Create,
    Update,
    ChangeDepartment,
    LinkAccount,
    Delete,
    Back,
}

const ACTIONS: [Action; 9] = [
    Action::List,
    Action::SearchByName,
    Action::SearchByEmail,
    Action::Create,
    Action::Update,
    Action::ChangeDepartment,
    Action::LinkAccount,
    Action::Delete,
    Action::Back,
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::List => "List employees",
            Action::SearchByName => "Search by name",
            Action::SearchByEmail => "Search by email",
            Action::Create => "Add employee",
            Action::Update => "Edit employee",
            Action::ChangeDepartment => "Change department",
            Action::LinkAccount => "Link login account",
            Action::Delete => "Delete employee",
            Action::Back => "Back",
        };
        write!(f, "{}", label)
    }
}

pub fn menu(session: &Session<'_>) -> Result<()> {
    loop {
        let action = ACTIONS[prompt::choose(Message::MenuEmployees, &ACTIONS)?];
        let outcome = match action {
            Action::List => list(session),
            Action::SearchByName => search_by_name(session),
            Action::SearchByEmail => search_by_email(session),
            Action::Create => create(session),
            Action::Update => update(session),
            Action::ChangeDepartment => change_department(session),
            Action::LinkAccount => link_account(session),
            Action::Delete => delete(session),
            Action::Back => return Ok(()),
        };

        if let Err(error) = outcome {
            session::report(error)?;
        }
    }
}

fn list(session: &Session<'_>) -> Result<()> {
    let employees = Employees::new(session.db).list()?;
    if employees.is_empty() {
        msg_info!(Message::NoEmployees);
        return Ok(());
    }
    View::employees(&employees);
    Ok(())
}

fn search_by_name(session: &Session<'_>) -> Result<()> {
    let fragment = prompt::text(Message::PromptSearchName)?;
    let employees = Employees::new(session.db).find_by_name(&fragment)?;
    if employees.is_empty() {
        msg_info!(Message::NoEmployeesMatching(fragment));
        return Ok(());
    }
    View::employees(&employees);
    Ok(())
}

fn search_by_email(session: &Session<'_>) -> Result<()> {
    let email = prompt::text(Message::PromptEmail)?;
    match Employees::new(session.db).find_by_email(&email)? {
        Some(employee) => View::employee(&employee),
        None => msg_info!(Message::NoEmployeesMatching(email)),
    }
    Ok(())
}

fn create(session: &Session<'_>) -> Result<()> {
    let name = prompt::text(Message::PromptEmployeeName)?;
    let email = prompt::text(Message::PromptEmail)?;
    let address = prompt::optional_text(Message::PromptAddress)?;
    let phone = prompt::optional_text(Message::PromptPhone)?;
    let hire_date = prompt::optional_date(Message::PromptHireDate)?;
    let salary = prompt::decimal(Message::PromptSalary, Some(0.0))?;
    let department_id = if prompt::confirm(Message::PromptAssignDepartmentNow)? {
        prompt::pick_department(session.db, Message::PromptSelectDepartment)?
    } else {
        None
    };

    let id = Employees::new(session.db).create(NewEmployee {
        name: name.clone(),
        email,
        address,
        phone,
        hire_date,
        salary: Some(salary),
        department_id,
        user_id: None,
    })?;

    msg_success!(Message::EmployeeCreated(name, id));
    Ok(())
}

fn update(session: &Session<'_>) -> Result<()> {
    let Some(employee) = prompt::pick_employee(session.db, Message::PromptSelectEmployee)? else {
        return Ok(());
    };

    let name = prompt::text_with_default(Message::PromptEmployeeName, &employee.name)?;
    let email = prompt::text_with_default(Message::PromptEmail, &employee.email)?;
    let address = prompt::editable_text(Message::PromptAddress, employee.address.as_deref().unwrap_or(""))?;
    let phone = prompt::editable_text(Message::PromptPhone, employee.phone.as_deref().unwrap_or(""))?;
    let salary = prompt::decimal(Message::PromptSalary, Some(employee.salary))?;

    Employees::new(session.db).update(
        employee.id,
        EmployeeChanges {
            name: Some(name),
            email: Some(email),
            address: Some(address),
            phone: Some(phone),
            salary: Some(salary),
        },
    )?;

    msg_success!(Message::EmployeeUpdated(employee.id));
    Ok(())
}

fn change_department(session: &Session<'_>) -> Result<()> {
    let Some(employee) = prompt::pick_employee(session.db, Message::PromptSelectEmployee)? else {
        return Ok(());
    };
    let department_id = prompt::pick_department(session.db, Message::PromptSelectDepartment)?;
    if department_id.is_none() && !prompt::confirm(Message::PromptRemoveFromDepartment)? {
        return Ok(());
    }

    Employees::new(session.db).set_department(employee.id, department_id)?;
    msg_success!(Message::EmployeeUpdated(employee.id));
    Ok(())
}

fn link_account(session: &Session<'_>) -> Result<()> {
    if session.role() != Role::Admin {
        msg_warning!(Message::AdminOnly);
        return Ok(());
    }

    let Some(employee) = prompt::pick_employee(session.db, Message::PromptSelectEmployee)? else {
        return Ok(());
    };
    let user = prompt::pick_user(session.db, Message::PromptSelectUser)?;

    Employees::new(session.db).link_user(employee.id, user.map(|u| u.id))?;
    msg_success!(Message::EmployeeUpdated(employee.id));
    Ok(())
}

fn delete(session: &Session<'_>) -> Result<()> {
    let Some(employee) = prompt::pick_employee(session.db, Message::PromptSelectEmployee)? else {
        return Ok(());
    };

    let employees = Employees::new(session.db);
    let entries = employees.time_entry_count(employee.id)?;
    if entries > 0 {
        msg_warning!(Message::EmployeeHasTimeEntries(employee.name.clone(), entries));
    }
    if !prompt::confirm(Message::PromptConfirmDelete)? {
        return Ok(());
    }

    employees.delete(employee.id)?;
    msg_success!(Message::EmployeeDeleted(employee.name));
    Ok(())
}
