//! Employee registration client

mod constants;
mod logger;
mod register;

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::HealthResponse;
use constants::{DEFAULT_SERVER_URL, ENV_SERVER_URL, HEALTH_ENDPOINT};
use registration::{Course, Designation, Gender};
use register::{RegisterOutcome, RegistrationRequest};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "client")]
#[command(about = "Employee registration client")]
struct Cli {
    /// Server URL
    #[arg(short, long, global = true, env = ENV_SERVER_URL, default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the registration form
    Register {
        /// Employee name
        #[arg(long, default_value = "")]
        name: String,
        /// Email address
        #[arg(long, default_value = "")]
        email: String,
        /// Ten digit mobile number
        #[arg(long, default_value = "")]
        mobile: String,
        /// HR, Manager or Sales
        #[arg(long)]
        designation: Option<Designation>,
        /// Male or Female
        #[arg(long)]
        gender: Option<Gender>,
        /// MCA, BCA or BSC; repeat for several
        #[arg(long)]
        course: Vec<Course>,
        /// JPG or PNG image to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Check that the server is up
    Health,
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Register {
            name,
            email,
            mobile,
            designation,
            gender,
            course,
            image,
        } => {
            let request = RegistrationRequest {
                name,
                email,
                mobile,
                designation,
                gender,
                course,
                image,
            };
            match request.submit(&cli.server)? {
                RegisterOutcome::Accepted(receipt) => {
                    println!("Registered! Registration id: {}", receipt.registration_id);
                }
                RegisterOutcome::Rejected(errors) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{}: {}", field, message);
                    }
                    anyhow::bail!("Registration rejected ({} problem(s))", errors.len());
                }
            }
        }
        Commands::Health => {
            let url = format!("{}{}", cli.server.trim_end_matches('/'), HEALTH_ENDPOINT);
            let health: HealthResponse = reqwest::blocking::get(&url)
                .context("Failed to connect to server")?
                .error_for_status()?
                .json()
                .context("Failed to parse health response")?;
            println!("Server status: {}", health.status);
        }
    }

    Ok(())
}
