use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use carshow_register::{
    cli::{Cli, Commands},
    client::HttpRegistrationClient,
    config::Config,
    form::{self, SubmitOutcome},
    registration_tui, validation,
};

const LOG_FILE: &str = "carshow-register.log";

fn init_logging(interactive: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "carshow_register=info");
    }

    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::from_default_env());

    // The TUI owns the terminal, so it only logs to the file
    let console_layer = (!interactive).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    init_logging(command == Commands::Tui);

    let config = Config::from_env()?.with_endpoint(cli.endpoint);
    if command.uses_network() {
        config.validate()?;
    }

    match command {
        Commands::Tui => registration_tui::run_tui(config).await?,

        Commands::CheckEmail { ref address } => {
            if validation::validate_email(address) {
                println!("{} is a valid email address", address);
            } else {
                println!("{}: {}", address, validation::INVALID_EMAIL);
                std::process::exit(1);
            }
        }

        Commands::Submit { .. } => {
            let state = match command.to_form_state() {
                Some(state) => state,
                None => return Ok(()),
            };
            let client = HttpRegistrationClient::new(&config)?;
            info!("Submitting registration to {}", client.endpoint());

            let (state, outcome) = form::submit(state, &client).await;
            match outcome {
                SubmitOutcome::Rejected(field) => {
                    let reason = state
                        .field_error(field)
                        .unwrap_or("This field is required");
                    eprintln!("{}: {}", field.label(), reason);
                    std::process::exit(2);
                }
                SubmitOutcome::Succeeded => {
                    println!("{}", form::SUCCESS_MESSAGE);
                }
                SubmitOutcome::Failed { status } => {
                    error!("Registration endpoint returned {}", status);
                    eprintln!("{}", form::FAILURE_MESSAGE);
                    std::process::exit(1);
                }
                SubmitOutcome::Errored(_) => {
                    eprintln!("{}", form::ERROR_MESSAGE);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
