use crate::config::settings::Settings;
use crate::errors::{Result, StandupError};
use crate::models::issue::{JiraIssue, SearchResponse, STORY_POINTS_FIELD};
use chrono::{Datelike, Duration, NaiveDate};
use reqwest::Client;

/// Upper bound on issues in one report; there is no pagination.
pub const MAX_RESULTS: u32 = 20;

pub struct JiraClient {
    client: Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    pub fn new(base_url: String, email: String, api_token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            email,
            api_token,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.api_base_url(),
            settings.jira.email.clone(),
            settings.jira.api_token.clone(),
        )
    }

    pub fn search_url(&self) -> String {
        format!("{}/rest/api/3/search/jql", self.base_url)
    }

    /// Issues assigned to the authenticated user that are still open, or
    /// that changed status category on or after `week_start`.
    pub async fn fetch_assigned_issues(&self, week_start: NaiveDate) -> Result<Vec<JiraIssue>> {
        let jql = assigned_issues_jql(week_start);
        self.search_with_jql(&jql, MAX_RESULTS).await
    }

    pub async fn search_with_jql(&self, jql: &str, max_results: u32) -> Result<Vec<JiraIssue>> {
        let fields = format!("summary,status,{}", STORY_POINTS_FIELD);
        let max_results = max_results.to_string();

        let response = self
            .client
            .get(self.search_url())
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .query(&[
                ("jql", jql),
                ("fields", fields.as_str()),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            if status == 401 || status == 403 {
                return Err(StandupError::JiraAuthFailed(status, text));
            }
            return Err(StandupError::JiraApiError(status, text));
        }

        let search = response.json::<SearchResponse>().await.map_err(|e| {
            StandupError::ResponseInvalid(format!("Failed to parse Jira search response: {}", e))
        })?;

        Ok(search.issues)
    }
}

/// Monday of the week containing `today`. Sundays belong to the week that
/// started six days earlier.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

pub fn assigned_issues_jql(week_start: NaiveDate) -> String {
    format!(
        "assignee = currentUser() AND (statusCategory != Done OR statusCategoryChangedDate >= \"{}\")",
        week_start.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const AUTH_HEADER: &str = "Basic ZGV2QGV4YW1wbGUuY29tOnNlY3JldC10b2tlbg==";

    fn client_for(server: &Server) -> JiraClient {
        JiraClient::new(
            server.url(),
            "dev@example.com".to_string(),
            "secret-token".to_string(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_midweek() {
        // 2024-03-07 is a Thursday
        assert_eq!(week_start(date(2024, 3, 7)), date(2024, 3, 4));
    }

    #[test]
    fn test_week_start_on_monday() {
        assert_eq!(week_start(date(2024, 3, 4)), date(2024, 3, 4));
    }

    #[test]
    fn test_week_start_on_sunday() {
        assert_eq!(week_start(date(2024, 3, 10)), date(2024, 3, 4));
    }

    #[test]
    fn test_week_start_across_year_boundary() {
        // 2025-01-01 is a Wednesday
        assert_eq!(week_start(date(2025, 1, 1)), date(2024, 12, 30));
    }

    #[test]
    fn test_assigned_issues_jql() {
        assert_eq!(
            assigned_issues_jql(date(2024, 3, 4)),
            "assignee = currentUser() AND (statusCategory != Done OR statusCategoryChangedDate >= \"2024-03-04\")"
        );
    }

    #[test]
    fn test_search_url() {
        let client = JiraClient::new(
            "https://acme.atlassian.net".to_string(),
            "dev@example.com".to_string(),
            "secret-token".to_string(),
        );
        assert_eq!(client.search_url(), "https://acme.atlassian.net/rest/api/3/search/jql");
    }

    #[tokio::test]
    async fn test_fetch_assigned_issues_sends_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/3/search/jql")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "jql".into(),
                    assigned_issues_jql(date(2024, 3, 4)),
                ),
                Matcher::UrlEncoded("fields".into(), "summary,status,customfield_10028".into()),
                Matcher::UrlEncoded("maxResults".into(), "20".into()),
            ]))
            .match_header("authorization", AUTH_HEADER)
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"issues":[
                    {"key":"ABC-2","fields":{"summary":"Second","status":{"name":"Review","statusCategory":{"key":"indeterminate"}},"customfield_10028":null}},
                    {"key":"ABC-1","fields":{"summary":"First","status":{"name":"Done","statusCategory":{"key":"done"}},"customfield_10028":3}}
                ]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let issues = client.fetch_assigned_issues(date(2024, 3, 4)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].key, "ABC-2");
        assert_eq!(issues[1].key, "ABC-1");
        assert_eq!(issues[1].story_points_label(), "3");
    }

    #[tokio::test]
    async fn test_server_error_carries_status_and_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/api/3/search/jql")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("internal failure")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.fetch_assigned_issues(date(2024, 3, 4)).await.unwrap_err();

        match err {
            StandupError::JiraApiError(status, body) => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal failure");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/api/3/search/jql")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.fetch_assigned_issues(date(2024, 3, 4)).await.unwrap_err();

        assert!(matches!(err, StandupError::JiraAuthFailed(401, _)));
    }

    #[tokio::test]
    async fn test_forbidden_keeps_response_body() {
        let body = r#"{"errorMessages":["Basic auth with passwords is deprecated"]}"#;
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/api/3/search/jql")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(body)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.fetch_assigned_issues(date(2024, 3, 4)).await.unwrap_err();

        match err {
            StandupError::JiraAuthFailed(status, text) => {
                assert_eq!(status, 403);
                assert_eq!(text, body);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_body_without_issues_is_invalid_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/api/3/search/jql")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"errorMessages":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.fetch_assigned_issues(date(2024, 3, 4)).await.unwrap_err();

        assert!(matches!(err, StandupError::ResponseInvalid(_)));
    }
}
