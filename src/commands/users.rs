use super::prompt;
use super::session::{self, Session};
use crate::db::users::{Role, Users};
use crate::libs::auth::check_new_password;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Create,
    ChangeRole,
    ResetPassword,
    Delete,
    Back,
}

const ACTIONS: [Action; 6] = [
    Action::List,
    Action::Create,
    Action::ChangeRole,
    Action::ResetPassword,
    Action::Delete,
    Action::Back,
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::List => "List users",
            Action::Create => "Create user",
            Action::ChangeRole => "Change role",
            Action::ResetPassword => "Reset password",
            Action::Delete => "Delete user",
            Action::Back => "Back",
        };
        write!(f, "{}", label)
    }
}

pub fn menu(session: &Session<'_>) -> Result<()> {
    if session.role() != Role::Admin {
        msg_warning!(Message::AdminOnly);
        return Ok(());
    }

    loop {
        let action = ACTIONS[prompt::choose(Message::MenuUsers, &ACTIONS)?];
        let outcome = match action {
            Action::List => list(session),
            Action::Create => create(session),
            Action::ChangeRole => change_role(session),
            Action::ResetPassword => reset_password(session),
            Action::Delete => delete(session),
            Action::Back => return Ok(()),
        };

        if let Err(error) = outcome {
            session::report(error)?;
        }
    }
}

fn list(session: &Session<'_>) -> Result<()> {
    let users = Users::new(session.db).list()?;
    if users.is_empty() {
        msg_info!(Message::NoUsers);
        return Ok(());
    }
    View::users(&users);
    Ok(())
}

fn create(session: &Session<'_>) -> Result<()> {
    let username = prompt::text(Message::PromptUsername)?;
    let password = prompt::secret(Message::PromptNewPassword)?;
    let confirmation = prompt::secret(Message::PromptConfirmPassword)?;
    check_new_password(&password, &confirmation)?;
    let role = Role::ALL[prompt::choose(Message::PromptSelectRole, &Role::ALL)?];

    let id = Users::new(session.db).create(&username, &password, role)?;
    msg_success!(Message::UserCreated(username, id));
    Ok(())
}

fn change_role(session: &Session<'_>) -> Result<()> {
    let Some(user) = prompt::pick_user(session.db, Message::PromptSelectUser)? else {
        return Ok(());
    };
    let role = Role::ALL[prompt::choose(Message::PromptSelectRole, &Role::ALL)?];

    Users::new(session.db).change_role(user.id, role)?;
    msg_success!(Message::UserRoleChanged(user.username, role.to_string()));
    Ok(())
}

fn reset_password(session: &Session<'_>) -> Result<()> {
    let Some(user) = prompt::pick_user(session.db, Message::PromptSelectUser)? else {
        return Ok(());
    };
    let password = prompt::secret(Message::PromptNewPassword)?;
    let confirmation = prompt::secret(Message::PromptConfirmPassword)?;
    check_new_password(&password, &confirmation)?;

    Users::new(session.db).change_password(user.id, &password)?;
    msg_success!(Message::PasswordChanged(user.username));
    Ok(())
}

fn delete(session: &Session<'_>) -> Result<()> {
    let Some(user) = prompt::pick_user(session.db, Message::PromptSelectUser)? else {
        return Ok(());
    };
    if user.id == session.user.id {
        msg_warning!(Message::CannotDeleteSelf);
        return Ok(());
    }
    if !prompt::confirm(Message::PromptConfirmDelete)? {
        return Ok(());
    }

    Users::new(session.db).delete(user.id)?;
    msg_success!(Message::UserDeleted(user.username));
    Ok(())
}
