use crate::constants::{
    DEFAULT_HOST, DEFAULT_PORT, ENV_DRAFT_TTL, ENV_HOST, ENV_MAX_DRAFTS, ENV_PORT,
    ENV_REJECTED_EMAILS, ENV_SINK,
};
use crate::state::DraftLimits;
use clap::{Arg, ArgAction, ArgMatches, Command};
use registration::directory::DEFAULT_REJECTED_EMAILS;
use std::ffi::OsString;
use std::str::FromStr;
use std::time::Duration;
use submission::backend::SINK_TYPE_LOG;
use submission::SinkBackend;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Where accepted registrations go
    pub sink: SinkBackend,
    /// Emails treated as already registered
    pub rejected_emails: Vec<String>,
    /// Idle lifetime and cap for draft sessions
    pub draft_limits: DraftLimits,
}

fn command() -> Command {
    Command::new("server")
        .about("Employee registration form server")
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Server host (default: 0.0.0.0, or SERVER_HOST env var)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("Server port (default: 8080, or SERVER_PORT env var)"),
        )
        .arg(
            Arg::new("sink")
                .long("sink")
                .value_name("TYPE")
                .help("Submission sink: 'log' or 'memory' (default: log, or SUBMISSION_SINK env var)"),
        )
        .arg(
            Arg::new("rejected-email")
                .long("rejected-email")
                .value_name("EMAIL")
                .action(ArgAction::Append)
                .help("Email treated as already registered; repeatable (or REJECTED_EMAILS env var, comma separated)"),
        )
        .arg(
            Arg::new("draft-ttl")
                .long("draft-ttl")
                .value_name("SECONDS")
                .help("Idle seconds before a draft is dropped (default: 1800, or DRAFT_TTL_SECS env var)"),
        )
        .arg(
            Arg::new("max-drafts")
                .long("max-drafts")
                .value_name("COUNT")
                .help("Most draft sessions kept open at once (default: 10000, or MAX_DRAFTS env var)"),
        )
}

impl ServerConfig {
    pub fn load() -> Result<Self, std::io::Error> {
        Self::from_args(std::env::args_os(), |key| std::env::var(key).ok())
    }

    /// Priority: command-line args > environment variables > defaults
    pub fn from_args<I, T, E>(args: I, env: E) -> Result<Self, std::io::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        E: Fn(&str) -> Option<String>,
    {
        let matches = command()
            .try_get_matches_from(args)
            .map_err(|e| invalid_input(e.to_string()))?;

        let host = arg_or_env(&matches, "host", &env, ENV_HOST)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port_str =
            arg_or_env(&matches, "port", &env, ENV_PORT).unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port_str
            .parse()
            .map_err(|_| invalid_input(format!("Invalid port number: {}", port_str)))?;

        let sink = arg_or_env(&matches, "sink", &env, ENV_SINK)
            .unwrap_or_else(|| SINK_TYPE_LOG.to_string())
            .parse::<SinkBackend>()
            .map_err(|e| invalid_input(e.to_string()))?;

        let rejected_emails = match matches.get_many::<String>("rejected-email") {
            Some(values) => values.cloned().collect(),
            None => match env(ENV_REJECTED_EMAILS) {
                Some(list) => list
                    .split(',')
                    .map(str::trim)
                    .filter(|email| !email.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => DEFAULT_REJECTED_EMAILS.iter().map(|e| e.to_string()).collect(),
            },
        };

        let defaults = DraftLimits::default();
        let draft_limits = DraftLimits {
            ttl: parse_arg_or_env::<_, u64>(&matches, "draft-ttl", &env, ENV_DRAFT_TTL)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.ttl),
            max_open: parse_arg_or_env(&matches, "max-drafts", &env, ENV_MAX_DRAFTS)?
                .unwrap_or(defaults.max_open),
        };
        if draft_limits.max_open == 0 {
            return Err(invalid_input("Draft cap must be at least 1".to_string()));
        }

        Ok(ServerConfig {
            host,
            port,
            sink,
            rejected_emails,
            draft_limits,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn arg_or_env<E>(matches: &ArgMatches, id: &str, env: &E, key: &str) -> Option<String>
where
    E: Fn(&str) -> Option<String>,
{
    matches.get_one::<String>(id).cloned().or_else(|| env(key))
}

/// Parse an optional flag or env value
fn parse_arg_or_env<E, T>(
    matches: &ArgMatches,
    id: &str,
    env: &E,
    key: &str,
) -> Result<Option<T>, std::io::Error>
where
    E: Fn(&str) -> Option<String>,
    T: FromStr,
{
    arg_or_env(matches, id, env, key)
        .map(|raw| {
            raw.parse()
                .map_err(|_| invalid_input(format!("Invalid value for --{}: {}", id, raw)))
        })
        .transpose()
}

fn invalid_input(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message)
}
