pub mod departments;
pub mod employees;
pub mod hours;
pub mod indicators;
pub mod init;
pub mod login;
pub mod password;
pub mod projects;
pub mod prompt;
pub mod reports;
pub mod session;
pub mod users;

use crate::api::mindicador::IndicatorClient;
use crate::db::db::Db;
use crate::db::schema;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_warning;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create the database and optionally configure the application")]
    Init(init::InitArgs),
    #[command(about = "Log in and open the main menu")]
    Login,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Login => {
                let config = Config::read()?;
                let db = Db::open(config.database)?;
                if db.used_fallback() {
                    msg_warning!(Message::DatabaseFallback(db.resolved_path().display().to_string()));
                }
                let seeded = schema::initialize(&db)?;
                debug!(seeded, path = %db.resolved_path().display(), "database ready");

                let client = IndicatorClient::new(&config.indicators)?;
                login::cmd(&db, &client).await
            }
        }
    }
}
