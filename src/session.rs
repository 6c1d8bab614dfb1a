// Session bootstrap: obtain a user identity by logging in or creating a
// user, or let the operator leave. Nothing else is reachable until this
// returns a `Session`.

use crate::api::{Backend, EmailRequest};
use crate::console::Console;
use crate::error::Result;
use crate::protocol::{decode_identity, Decoded, UserIdentity};
use crate::ui;
use tracing::{debug, info};

/// Identity adopted for the rest of the process. Only `bootstrap` hands
/// these out, and the identity cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    identity: UserIdentity,
}

impl Session {
    pub(crate) fn new(identity: UserIdentity) -> Self {
        Session { identity }
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn user_id(&self) -> &str {
        &self.identity.user_id
    }
}

/// Pre-auth menu choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartChoice {
    LogIn,
    CreateUser,
    Exit,
}

impl StartChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(StartChoice::LogIn),
            "2" => Some(StartChoice::CreateUser),
            "3" => Some(StartChoice::Exit),
            _ => None,
        }
    }
}

/// Run the pre-auth menu until an identity is adopted (`Some`) or the
/// operator picks Exit (`None`). Failed attempts and transport errors are
/// reported and the menu is shown again.
pub fn bootstrap<B: Backend, C: Console>(api: &B, console: &mut C) -> Result<Option<Session>> {
    loop {
        ui::start_menu(console);
        let choice = console.prompt(ui::CHOICE_PROMPT)?;
        let attempt = match StartChoice::parse(&choice) {
            Some(StartChoice::LogIn) => log_in(api, console),
            Some(StartChoice::CreateUser) => create_user(api, console),
            Some(StartChoice::Exit) => return Ok(None),
            None => {
                console.warn("Invalid choice. Please try again.");
                continue;
            }
        };

        match attempt {
            Ok(Some(identity)) => {
                info!(user_id = %identity.user_id, "session identity adopted");
                return Ok(Some(Session::new(identity)));
            }
            Ok(None) => {}
            Err(e) if e.is_transport() => console.error(&e.to_string()),
            Err(e) => return Err(e),
        }
    }
}

fn log_in<B: Backend, C: Console>(api: &B, console: &mut C) -> Result<Option<UserIdentity>> {
    let email = console.prompt("Enter your email to log in")?;
    let req = EmailRequest { email };
    let res = console.in_flight("Logging in...", || api.login(&req))?;

    match decode_identity(&res) {
        Decoded::Ok(identity) => {
            console.say(&format!(
                "Logged in as {} (User ID: {})",
                identity.email, identity.user_id
            ));
            Ok(Some(identity))
        }
        Decoded::Malformed(raw) => {
            debug!(body = %raw, "malformed login response");
            console.error(&format!(
                "Unexpected response format when logging in. Response: {raw}"
            ));
            Ok(None)
        }
        Decoded::Failed { status, .. } => {
            debug!(%status, "login rejected");
            console.error("Login failed. User not found or incorrect email.");
            Ok(None)
        }
    }
}

fn create_user<B: Backend, C: Console>(
    api: &B,
    console: &mut C,
) -> Result<Option<UserIdentity>> {
    let email = console.prompt("Enter your email to create a new user")?;
    let req = EmailRequest { email };
    let res = console.in_flight("Creating user...", || api.create_user(&req))?;

    match decode_identity(&res) {
        Decoded::Ok(identity) => {
            console.say(&format!(
                "User created: {} (User ID: {})",
                identity.email, identity.user_id
            ));
            Ok(Some(identity))
        }
        Decoded::Malformed(raw) => {
            debug!(body = %raw, "malformed user creation response");
            console.error(&format!(
                "Unexpected response format when creating user. Response: {raw}"
            ));
            Ok(None)
        }
        Decoded::Failed { status, body } => {
            debug!(%status, "user creation rejected");
            console.error(&format!("Error creating user. Response: {body}"));
            Ok(None)
        }
    }
}
