//! User CLI commands

use clap::Subcommand;

use crate::audit::ActorContext;
use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::Role;
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user account
    Add {
        username: String,
        #[arg(short, long)]
        email: String,
        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Role (reader, standard, admin)
        #[arg(short, long, default_value = "standard")]
        role: String,
    },
    /// List user accounts
    List,
    /// Change the name, email or role of a user account
    Edit {
        username: String,
        #[arg(short, long)]
        email: Option<String>,
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        /// Role (reader, standard, admin)
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Delete a user account; their history entries are kept without an actor
    Delete { username: String },
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    settings: &Settings,
    actor: &ActorContext,
    cmd: UserCommands,
) -> TrackerResult<()> {
    let service = UserService::new(storage, settings);

    match cmd {
        UserCommands::Add {
            username,
            email,
            name,
            role,
        } => {
            let role = parse_role(&role)?;
            let user = service.create(actor, &username, &name, &email, role)?;
            println!("Created user: {} ({})", user.username, user.role);
        }

        UserCommands::List => {
            let users = service.list()?;
            if users.is_empty() {
                println!("No users found.");
            }
            for user in users {
                println!("  {:<16} {:<8} {}", user.username, user.role, user.email);
            }
        }

        UserCommands::Edit {
            username,
            email,
            name,
            role,
        } => {
            let role = role.as_deref().map(parse_role).transpose()?;
            let user = service.update(
                actor,
                &username,
                name.as_deref(),
                email.as_deref(),
                role,
            )?;
            println!("Updated user: {} ({}, {})", user.username, user.role, user.email);
        }

        UserCommands::Delete { username } => {
            let user = service.delete(actor, &username)?;
            println!("Deleted user: {}", user.username);
        }
    }

    Ok(())
}

fn parse_role(role: &str) -> TrackerResult<Role> {
    Role::parse(role).ok_or_else(|| {
        TrackerError::Validation(format!(
            "Invalid role: '{}'. Valid roles: reader, standard, admin",
            role
        ))
    })
}
