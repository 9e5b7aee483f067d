use super::prompt;
use super::session::{self, Session};
use crate::db::assignments::{AssignOutcome, Assignments};
use crate::db::projects::{NewProject, ProjectChanges, ProjectStatus, Projects};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Create,
    Update,
    Delete,
    Assign,
    Unassign,
    Team,
    EmployeeProjects,
    ClearTeam,
    Back,
}

const ACTIONS: [Action; 10] = [
    Action::List,
    Action::Create,
    Action::Update,
    Action::Delete,
    Action::Assign,
    Action::Unassign,
    Action::Team,
    Action::EmployeeProjects,
    Action::ClearTeam,
    Action::Back,
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::List => "List projects",
            Action::Create => "Add project",
            Action::Update => "Edit project",
            Action::Delete => "Delete project",
            Action::Assign => "Assign employee",
            Action::Unassign => "Remove employee",
            Action::Team => "Show project team",
            Action::EmployeeProjects => "Show projects of an employee",
            Action::ClearTeam => "Remove all employees from a project",
            Action::Back => "Back",
        };
        write!(f, "{}", label)
    }
}

pub fn menu(session: &Session<'_>) -> Result<()> {
    loop {
        let action = ACTIONS[prompt::choose(Message::MenuProjects, &ACTIONS)?];
        let outcome = match action {
            Action::List => list(session),
            Action::Create => create(session),
            Action::Update => update(session),
            Action::Delete => delete(session),
            Action::Assign => assign(session),
            Action::Unassign => unassign(session),
            Action::Team => team(session),
            Action::EmployeeProjects => employee_projects(session),
            Action::ClearTeam => clear_team(session),
            Action::Back => return Ok(()),
        };

        if let Err(error) = outcome {
            session::report(error)?;
        }
    }
}

fn list(session: &Session<'_>) -> Result<()> {
    let projects = Projects::new(session.db).list()?;
    if projects.is_empty() {
        msg_info!(Message::NoProjects);
        return Ok(());
    }
    View::projects(&projects);
    Ok(())
}

fn create(session: &Session<'_>) -> Result<()> {
    let name = prompt::text(Message::PromptProjectName)?;
    let description = prompt::optional_text(Message::PromptProjectDescription)?;
    let start_date = prompt::optional_date(Message::PromptStartDate)?;

    let id = Projects::new(session.db).create(NewProject {
        name: name.clone(),
        description,
        start_date,
    })?;
    msg_success!(Message::ProjectCreated(name, id));
    Ok(())
}

fn update(session: &Session<'_>) -> Result<()> {
    let Some(project) = prompt::pick_project(session.db, Message::PromptSelectProject)? else {
        return Ok(());
    };

    let name = prompt::text_with_default(Message::PromptProjectName, &project.name)?;
    let description = prompt::text_with_default(
        Message::PromptProjectDescription,
        project.description.as_deref().unwrap_or(""),
    )?;
    let start_date = prompt::optional_date(Message::PromptStartDateKeep)?;
    let status = ProjectStatus::ALL[prompt::choose(Message::PromptProjectStatus, &ProjectStatus::ALL)?];

    Projects::new(session.db).update(
        project.id,
        ProjectChanges {
            name: Some(name),
            description: Some(description),
            start_date,
            status: Some(status),
        },
    )?;
    msg_success!(Message::ProjectUpdated(project.id));
    Ok(())
}

fn delete(session: &Session<'_>) -> Result<()> {
    let Some(project) = prompt::pick_project(session.db, Message::PromptSelectProject)? else {
        return Ok(());
    };

    let members = Assignments::new(session.db).count_for_project(project.id)?;
    if members > 0 {
        msg_warning!(Message::ProjectHasMembers(project.name.clone(), members));
    }
    if !prompt::confirm(Message::PromptConfirmDelete)? {
        return Ok(());
    }

    Projects::new(session.db).delete(project.id)?;
    msg_success!(Message::ProjectDeleted(project.name));
    Ok(())
}

fn assign(session: &Session<'_>) -> Result<()> {
    let Some(project) = prompt::pick_project(session.db, Message::PromptSelectProject)? else {
        return Ok(());
    };
    let Some(employee) = prompt::pick_employee(session.db, Message::PromptSelectEmployee)? else {
        return Ok(());
    };

    match Assignments::new(session.db).assign(employee.id, project.id)? {
        AssignOutcome::Created => msg_success!(Message::EmployeeAssigned(employee.name, project.name)),
        AssignOutcome::AlreadyExists => msg_info!(Message::EmployeeAlreadyAssigned(employee.name, project.name)),
        AssignOutcome::Rejected(reason) => msg_warning!(Message::AssignmentRejected(reason.to_string())),
    }
    Ok(())
}

fn unassign(session: &Session<'_>) -> Result<()> {
    let Some(project) = prompt::pick_project(session.db, Message::PromptSelectProject)? else {
        return Ok(());
    };

    let assignments = Assignments::new(session.db);
    let members = assignments.employees_of_project(project.id)?;
    if members.is_empty() {
        msg_info!(Message::ProjectWithoutMembers(project.name));
        return Ok(());
    }

    let labels: Vec<String> = members.iter().map(|e| format!("#{} {}", e.id, e.name)).collect();
    let employee = &members[prompt::choose(Message::PromptSelectEmployee, &labels)?];

    if assignments.unassign(employee.id, project.id)? {
        msg_success!(Message::EmployeeUnassigned(employee.name.clone(), project.name));
    } else {
        msg_info!(Message::EmployeeNotAssigned(employee.name.clone(), project.name));
    }
    Ok(())
}

fn team(session: &Session<'_>) -> Result<()> {
    let Some(project) = prompt::pick_project(session.db, Message::PromptSelectProject)? else {
        return Ok(());
    };

    let members = Assignments::new(session.db).employees_of_project(project.id)?;
    if members.is_empty() {
        msg_info!(Message::ProjectWithoutMembers(project.name));
        return Ok(());
    }
    View::employees(&members);
    Ok(())
}

fn employee_projects(session: &Session<'_>) -> Result<()> {
    let Some(employee) = prompt::pick_employee(session.db, Message::PromptSelectEmployee)? else {
        return Ok(());
    };

    let projects = Assignments::new(session.db).projects_of_employee(employee.id)?;
    if projects.is_empty() {
        msg_info!(Message::EmployeeWithoutProjects(employee.name));
        return Ok(());
    }
    View::projects(&projects);
    Ok(())
}

fn clear_team(session: &Session<'_>) -> Result<()> {
    let Some(project) = prompt::pick_project(session.db, Message::PromptSelectProject)? else {
        return Ok(());
    };
    if !prompt::confirm(Message::PromptConfirmClearTeam(project.name.clone()))? {
        return Ok(());
    }

    let removed = Assignments::new(session.db).cascade_clear_for_project(project.id)?;
    msg_success!(Message::TeamCleared(project.name, removed));
    Ok(())
}
