use super::prompt;
use super::session::{self, Session};
use crate::api::mindicador::IndicatorClient;
use crate::db::db::Db;
use crate::db::users::Users;
use crate::libs::auth::{AttemptOutcome, LoginSession};
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_warning};
use anyhow::Result;
use tracing::info;

pub async fn cmd(db: &Db, client: &IndicatorClient) -> Result<()> {
    let users = Users::new(db);
    let mut login = LoginSession::new();

    let user = loop {
        let credentials = prompt::text(Message::PromptUsername)
            .and_then(|username| Ok((username, prompt::secret(Message::PromptPassword)?)));
        let (username, password) = match credentials {
            Ok(credentials) => credentials,
            Err(error) => {
                login.abort();
                return Err(error);
            }
        };

        match login.attempt(&users, &username, &password)? {
            AttemptOutcome::Granted(user) => break user,
            AttemptOutcome::Denied { remaining, retry_after } => {
                msg_warning!(Message::LoginFailed(remaining));
                tokio::time::sleep(retry_after).await;
            }
            AttemptOutcome::Locked => msg_bail_anyhow!(Message::LoginLocked),
        }
    };

    info!(user = %user.username, role = %user.role.as_str(), "session started");
    session::run(Session { db, client, user }).await
}
