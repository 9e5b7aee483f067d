use super::prompt;
use super::session::{self, Session};
use crate::db::departments::Departments;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Create,
    Rename,
    SetManager,
    Delete,
    Back,
}

const ACTIONS: [Action; 6] = [
    Action::List,
    Action::Create,
    Action::Rename,
    Action::SetManager,
    Action::Delete,
    Action::Back,
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::List => "List departments",
            Action::Create => "Add department",
            Action::Rename => "Rename department",
            Action::SetManager => "Assign manager",
            Action::Delete => "Delete department",
            Action::Back => "Back",
        };
        write!(f, "{}", label)
    }
}

pub fn menu(session: &Session<'_>) -> Result<()> {
    loop {
        let action = ACTIONS[prompt::choose(Message::MenuDepartments, &ACTIONS)?];
        let outcome = match action {
            Action::List => list(session),
            Action::Create => create(session),
            Action::Rename => rename(session),
            Action::SetManager => set_manager(session),
            Action::Delete => delete(session),
            Action::Back => return Ok(()),
        };

        if let Err(error) = outcome {
            session::report(error)?;
        }
    }
}

fn list(session: &Session<'_>) -> Result<()> {
    let departments = Departments::new(session.db).list()?;
    if departments.is_empty() {
        msg_info!(Message::NoDepartments);
        return Ok(());
    }
    View::departments(&departments);
    Ok(())
}

fn create(session: &Session<'_>) -> Result<()> {
    let name = prompt::text(Message::PromptDepartmentName)?;
    let manager = if prompt::confirm(Message::PromptAssignManagerNow)? {
        prompt::pick_employee(session.db, Message::PromptSelectManager)?
    } else {
        None
    };

    let id = Departments::new(session.db).create(&name, manager.map(|m| m.id))?;
    msg_success!(Message::DepartmentCreated(name, id));
    Ok(())
}

fn rename(session: &Session<'_>) -> Result<()> {
    let Some(id) = prompt::pick_department(session.db, Message::PromptSelectDepartment)? else {
        return Ok(());
    };
    let name = prompt::text(Message::PromptDepartmentName)?;

    Departments::new(session.db).rename(id, &name)?;
    msg_success!(Message::DepartmentUpdated(id));
    Ok(())
}

fn set_manager(session: &Session<'_>) -> Result<()> {
    let Some(id) = prompt::pick_department(session.db, Message::PromptSelectDepartment)? else {
        return Ok(());
    };
    let manager = prompt::pick_employee(session.db, Message::PromptSelectManager)?;

    Departments::new(session.db).set_manager(id, manager.map(|m| m.id))?;
    msg_success!(Message::DepartmentUpdated(id));
    Ok(())
}

fn delete(session: &Session<'_>) -> Result<()> {
    let Some(id) = prompt::pick_department(session.db, Message::PromptSelectDepartment)? else {
        return Ok(());
    };
    if !prompt::confirm(Message::PromptConfirmDelete)? {
        return Ok(());
    }

    Departments::new(session.db).delete(id)?;
    msg_success!(Message::DepartmentDeleted(id));
    Ok(())
}
