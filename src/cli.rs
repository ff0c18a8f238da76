use clap::{Parser, Subcommand};

use crate::form::{FormEvent, FormState};
use crate::models::Field;

#[derive(Parser, Debug)]
#[command(name = "carshow-register")]
#[command(about = "Register a vehicle for the car-show contest")]
#[command(version)]
pub struct Cli {
    /// Registration endpoint (overrides CARSHOW_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Open the interactive registration form (default)
    Tui,

    /// Submit one registration without the interactive form
    Submit {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Vehicle model
        #[arg(long, default_value = "")]
        vehicle_model: String,

        /// Vehicle notes (motor swap etc...)
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Check whether an email address passes the form's format rule
    CheckEmail {
        /// Address to check
        address: String,
    },
}

impl Commands {
    /// Whether the command talks to the registration endpoint
    pub fn uses_network(&self) -> bool {
        !matches!(self, Commands::CheckEmail { .. })
    }

    /// Replay the `submit` arguments as field edits on a fresh form
    pub fn to_form_state(&self) -> Option<FormState> {
        match self {
            Commands::Submit {
                first_name,
                last_name,
                email,
                vehicle_model,
                notes,
            } => {
                let edits = [
                    (Field::FirstName, first_name),
                    (Field::LastName, last_name),
                    (Field::Email, email),
                    (Field::VehicleModel, vehicle_model),
                    (Field::OtherNotes, notes),
                ];
                Some(edits.into_iter().fold(FormState::new(), |state, (field, value)| {
                    state.apply(FormEvent::Changed(field, value.clone()))
                }))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_email_stays_offline() {
        let cli = Cli::try_parse_from(["carshow-register", "check-email", "a@b.c"]).unwrap();
        assert!(!cli.command.unwrap().uses_network());
        assert!(Commands::Tui.uses_network());
    }

    #[test]
    fn test_default_is_tui() {
        let cli = Cli::try_parse_from(["carshow-register"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.endpoint.is_none());
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "carshow-register",
            "submit",
            "--first-name",
            "Jane",
            "--last-name",
            "Doe",
            "-e",
            "jane@example.com",
            "--endpoint",
            "http://127.0.0.1:9000/registrations",
        ])
        .unwrap();

        assert_eq!(
            cli.endpoint.as_deref(),
            Some("http://127.0.0.1:9000/registrations")
        );
        let command = cli.command.unwrap();
        let state = command.to_form_state().unwrap();
        assert_eq!(state.first_name, "Jane");
        assert_eq!(state.last_name, "Doe");
        assert_eq!(state.email, "jane@example.com");
        assert_eq!(state.vehicle_model, "");
        assert!(state.email_error.is_empty());
        assert!(state.first_invalid_field().is_none());
    }

    #[test]
    fn test_submit_requires_names() {
        assert!(Cli::try_parse_from(["carshow-register", "submit", "-e", "a@b.c"]).is_err());
    }

    #[test]
    fn test_invalid_email_surfaces_in_state() {
        let command = Commands::Submit {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "foo".to_string(),
            vehicle_model: String::new(),
            notes: String::new(),
        };
        let state = command.to_form_state().unwrap();
        assert_eq!(state.email_error, "Invalid email address");
        assert_eq!(state.first_invalid_field(), Some(Field::Email));
    }

    #[test]
    fn test_check_email_has_no_form_state() {
        let cli = Cli::try_parse_from(["carshow-register", "check-email", "a@b.c"]).unwrap();
        let command = cli.command.unwrap();
        assert_eq!(
            command,
            Commands::CheckEmail {
                address: "a@b.c".to_string()
            }
        );
        assert!(command.to_form_state().is_none());
    }
}
