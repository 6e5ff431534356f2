use colored::*;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StandupError {
    // Configuration errors
    MissingCredentials(Vec<&'static str>),
    ConfigInvalid(String),

    // Jira errors
    JiraAuthFailed(u16, String),
    JiraApiError(u16, String),
    ResponseInvalid(String),

    // Network errors
    NetworkError(String),

    // Report file errors
    Persistence { path: PathBuf, message: String },

    // Generic error
    Other(String),
}

impl fmt::Display for StandupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Configuration errors
            StandupError::MissingCredentials(names) => {
                write!(f, "{}\n", "Missing Jira credentials".red().bold())?;
                write!(
                    f,
                    "   {}\n\n",
                    format!("Error: {} environment variables are required", names.join(" and "))
                        .dimmed()
                )?;
                write!(f, "   To fix:\n")?;
                write!(f, "   1. Export your account email: {}\n", "JIRA_EMAIL=you@company.com".green())?;
                write!(
                    f,
                    "   2. Create an API token: {}\n",
                    "https://id.atlassian.com/manage-profile/security/api-tokens".cyan()
                )?;
                write!(f, "   3. Export it: {}", "JIRA_API_TOKEN=...".green())
            }
            StandupError::ConfigInvalid(msg) => {
                write!(f, "{}\n", "Invalid configuration".red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   Check JIRA_DOMAIN, OUTPUT_DIR and DO_POST_IN_TEAMS")
            }

            // Jira errors
            StandupError::JiraAuthFailed(status, msg) => {
                write!(f, "{}\n", format!("Jira authentication failed ({})", status).red().bold())?;
                if !msg.is_empty() {
                    write!(f, "   {}\n", msg.dimmed())?;
                }
                write!(f, "   {}\n\n", "Your API token may have expired or is invalid".dimmed())?;
                write!(f, "   To fix:\n")?;
                write!(
                    f,
                    "   1. Generate new token: {}\n",
                    "https://id.atlassian.com/manage-profile/security/api-tokens".cyan()
                )?;
                write!(f, "   2. Update {} and {}", "JIRA_EMAIL".green(), "JIRA_API_TOKEN".green())
            }
            StandupError::JiraApiError(status, msg) => {
                write!(f, "{}\n", format!("Jira API error: {}", status).red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   Try again or check your network connection")
            }
            StandupError::ResponseInvalid(msg) => {
                write!(f, "{}\n", "Unexpected Jira response".red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   Check that JIRA_DOMAIN points at a Jira Cloud site")
            }

            // Network errors
            StandupError::NetworkError(msg) => {
                write!(f, "{}\n", "Network error".red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   To fix:\n")?;
                write!(f, "   1. Check your internet connection\n")?;
                write!(f, "   2. Verify you can reach the Jira domain\n")?;
                write!(f, "   3. Try again in a moment")
            }

            // Report file errors
            StandupError::Persistence { path, message } => {
                write!(f, "{}\n", "Failed to write standup report".red().bold())?;
                write!(f, "   {}\n", format!("{}: {}", path.display(), message).dimmed())?;
                write!(f, "\n   Check that OUTPUT_DIR exists and is writable")
            }

            // Generic
            StandupError::Other(msg) => {
                write!(f, "{}\n", "Error".red().bold())?;
                write!(f, "   {}", msg.dimmed())
            }
        }
    }
}

impl std::error::Error for StandupError {}

impl From<config::ConfigError> for StandupError {
    fn from(err: config::ConfigError) -> Self {
        StandupError::ConfigInvalid(err.to_string())
    }
}

impl From<reqwest::Error> for StandupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            StandupError::NetworkError(err.to_string())
        } else if let Some(status) = err.status() {
            if status == 401 || status == 403 {
                StandupError::JiraAuthFailed(status.as_u16(), err.to_string())
            } else {
                StandupError::JiraApiError(status.as_u16(), err.to_string())
            }
        } else if err.is_decode() {
            StandupError::ResponseInvalid(err.to_string())
        } else {
            StandupError::Other(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, StandupError>;
