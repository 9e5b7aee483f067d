//! The role-gated main menu shown after a successful login.

use super::{departments, employees, hours, indicators, password, projects, prompt, reports, users};
use crate::api::mindicador::IndicatorClient;
use crate::db::db::Db;
use crate::db::employees::{Employee, Employees};
use crate::db::users::Role;
use crate::libs::auth::AuthenticatedUser;
use crate::libs::error::AppError;
use crate::libs::messages::Message;
use crate::{msg_error, msg_info};
use anyhow::Result;
use std::fmt;

/// Everything a menu action needs.
pub struct Session<'a> {
    pub db: &'a Db,
    pub client: &'a IndicatorClient,
    pub user: AuthenticatedUser,
}

impl Session<'_> {
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// The employee record linked to the logged-in account, if any.
    pub fn own_employee(&self) -> Result<Option<Employee>, AppError> {
        Employees::new(self.db).find_by_user(self.user.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Employees,
    Departments,
    Projects,
    RegisterHours,
    Indicators,
    MyHours,
    Reports,
    ChangePassword,
    Users,
    Logout,
}

impl MainAction {
    pub fn for_role(role: Role) -> Vec<MainAction> {
        let mut actions = vec![
            MainAction::Employees,
            MainAction::Departments,
            MainAction::Projects,
            MainAction::RegisterHours,
            MainAction::Indicators,
            MainAction::MyHours,
            MainAction::Reports,
            MainAction::ChangePassword,
            MainAction::Users,
            MainAction::Logout,
        ];

        match role {
            Role::Admin => {}
            Role::Hr => actions.retain(|a| *a != MainAction::Users),
            Role::Employee => {
                actions = vec![
                    MainAction::Indicators,
                    MainAction::RegisterHours,
                    MainAction::MyHours,
                    MainAction::Reports,
                    MainAction::ChangePassword,
                    MainAction::Logout,
                ]
            }
        }
        actions
    }
}

impl fmt::Display for MainAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MainAction::Employees => "Employees",
            MainAction::Departments => "Departments",
            MainAction::Projects => "Projects",
            MainAction::RegisterHours => "Register worked hours",
            MainAction::Indicators => "Economic indicators",
            MainAction::MyHours => "My hours",
            MainAction::Reports => "Reports",
            MainAction::ChangePassword => "Change password",
            MainAction::Users => "User management",
            MainAction::Logout => "Log out",
        };
        write!(f, "{}", label)
    }
}

/// Prints a failed action and decides whether the menu may continue.
///
/// Domain errors are shown and swallowed. Anything else (prompt I/O, a
/// database that went away) ends the session.
pub fn report(error: anyhow::Error) -> Result<()> {
    match error.downcast_ref::<AppError>() {
        Some(app_error) if app_error.is_recoverable() => {
            msg_error!(app_error);
            Ok(())
        }
        _ => Err(error),
    }
}

pub async fn run(session: Session<'_>) -> Result<()> {
    msg_info!(Message::Welcome(session.user.username.clone(), session.role().to_string()), true);

    let actions = MainAction::for_role(session.role());
    loop {
        let selection = prompt::choose(Message::MenuMain, &actions)?;
        let action = actions[selection];

        let outcome = match action {
            MainAction::Employees => employees::menu(&session),
            MainAction::Departments => departments::menu(&session),
            MainAction::Projects => projects::menu(&session),
            MainAction::RegisterHours => hours::register(&session),
            MainAction::Indicators => indicators::menu(&session).await,
            MainAction::MyHours => hours::mine(&session),
            MainAction::Reports => reports::menu(&session),
            MainAction::ChangePassword => password::change(&session),
            MainAction::Users => users::menu(&session),
            MainAction::Logout => break,
        };

        if let Err(error) = outcome {
            report(error)?;
        }
    }

    msg_info!(Message::LoggedOut(session.user.username.clone()));
    Ok(())
}
