use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Jira field id holding story point estimates on our site.
pub const STORY_POINTS_FIELD: &str = "customfield_10028";

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResponse {
    pub issues: Vec<JiraIssue>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JiraIssue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: Status,
    #[serde(rename = "customfield_10028", default)]
    pub story_points: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Status {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "statusCategory", default)]
    pub status_category: Option<StatusCategory>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatusCategory {
    #[serde(default)]
    pub key: String,
}

impl JiraIssue {
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    pub fn status_name(&self) -> &str {
        &self.fields.status.name
    }

    pub fn status_category_key(&self) -> Option<&str> {
        self.fields
            .status
            .status_category
            .as_ref()
            .map(|category| category.key.as_str())
    }

    /// Story points as they should appear in the report, `N/A` when unset.
    pub fn story_points_label(&self) -> String {
        match &self.fields.story_points {
            None | Some(Value::Null) => "N/A".to_string(),
            Some(Value::String(text)) => text.clone(),
            // Jira Cloud sends whole estimates as floats (`3.0`)
            Some(Value::Number(number)) => match number.as_f64() {
                Some(points) if number.is_f64() => points.to_string(),
                _ => number.to_string(),
            },
            Some(other) => other.to_string(),
        }
    }
}
