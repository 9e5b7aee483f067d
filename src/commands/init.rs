use crate::db::db::Db;
use crate::db::schema;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Drop every table and recreate the schema with the seed accounts
    #[arg(short, long)]
    reset: bool,

    /// Run the configuration wizard before touching the database
    #[arg(short, long)]
    configure: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let config = if init_args.configure {
        let config = Config::init()?;
        config.save()?;
        msg_success!(Message::ConfigSaved);
        config
    } else {
        Config::read()?
    };

    let db = Db::open(config.database)?;
    if db.used_fallback() {
        msg_warning!(Message::DatabaseFallback(db.resolved_path().display().to_string()));
    }

    let seeded = if init_args.reset {
        msg_warning!(Message::DatabaseResetting);
        schema::reset(&db)?
    } else {
        schema::initialize(&db)?
    };

    msg_success!(Message::DatabaseReady(db.resolved_path().display().to_string()));
    if seeded > 0 {
        msg_info!(Message::SeedAccountsHeader, true);
        for (username, password, role) in schema::SEED_USERS {
            msg_print!(format!("  {:<10} {:<12} {}", username, password, role));
        }
    }
    Ok(())
}
