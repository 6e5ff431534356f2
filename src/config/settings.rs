use crate::errors::{Result, StandupError};
use ::config::{Config, Environment, Map};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_JIRA_DOMAIN: &str = "fnba.atlassian.net";
pub const DEFAULT_OUTPUT_DIR: &str = "/output";

#[derive(Debug, Clone)]
pub struct Settings {
    pub jira: JiraConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub domain: String,
    pub email: String,
    pub api_token: String,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    /// Reserved for posting the report to a Teams channel.
    pub post_to_teams: bool,
}

/// Flat view of the environment as the `config` crate sees it
/// (`JIRA_EMAIL` becomes `jira_email`).
#[derive(Debug, Deserialize)]
struct EnvSettings {
    jira_email: Option<String>,
    jira_api_token: Option<String>,
    jira_domain: String,
    output_dir: PathBuf,
    do_post_in_teams: Option<String>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_env_map(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Reads settings from an explicit variable map instead of the process
    /// environment.
    pub fn from_env_map<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::load(map)
    }

    fn load(source: Map<String, String>) -> Result<Self> {
        let raw = Config::builder()
            .set_default("jira_domain", DEFAULT_JIRA_DOMAIN)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .add_source(Environment::default().ignore_empty(true).source(Some(source)))
            .build()?
            .try_deserialize::<EnvSettings>()?;

        let email = raw.jira_email.filter(|v| !v.trim().is_empty());
        let api_token = raw.jira_api_token.filter(|v| !v.trim().is_empty());

        let (email, api_token) = match (email, api_token) {
            (Some(email), Some(api_token)) => (email, api_token),
            (email, api_token) => {
                let mut missing = Vec::new();
                if email.is_none() {
                    missing.push("JIRA_EMAIL");
                }
                if api_token.is_none() {
                    missing.push("JIRA_API_TOKEN");
                }
                return Err(StandupError::MissingCredentials(missing));
            }
        };

        Ok(Settings {
            jira: JiraConfig {
                domain: raw.jira_domain,
                email,
                api_token,
            },
            report: ReportConfig {
                output_dir: raw.output_dir,
                post_to_teams: flag_enabled(raw.do_post_in_teams.as_deref()),
            },
        })
    }

    pub fn api_base_url(&self) -> String {
        format!("https://{}", self.jira.domain)
    }

    pub fn browse_url(&self, key: &str) -> String {
        format!("https://{}/browse/{}", self.jira.domain, key)
    }
}

/// Unset, empty, `false`, `0`, `no` and `off` mean disabled; anything else
/// enables the flag.
fn flag_enabled(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        None => false,
        Some(v) => !matches!(v.as_str(), "" | "false" | "0" | "no" | "off"),
    }
}
