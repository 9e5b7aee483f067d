use super::prompt;
use super::session::Session;
use crate::db::users::Users;
use crate::libs::auth::check_new_password;
use crate::libs::error::AppError;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;

/// The current password is checked before anything changes.
pub fn change(session: &Session<'_>) -> Result<()> {
    let users = Users::new(session.db);

    let current = prompt::secret(Message::PromptCurrentPassword)?;
    if users.authenticate(&session.user.username, &current)?.is_none() {
        return Err(AppError::Forbidden(Message::WrongCurrentPassword).into());
    }

    let password = prompt::secret(Message::PromptNewPassword)?;
    let confirmation = prompt::secret(Message::PromptConfirmPassword)?;
    check_new_password(&password, &confirmation)?;

    users.change_password(session.user.id, &password)?;
    msg_success!(Message::PasswordChanged(session.user.username.clone()));
    Ok(())
}
