use crate::models::issue::JiraIssue;
use crate::report::classify::status_emoji;

pub const NO_TASKS_LINE: &str = "# No tasks assigned\n";

/// Renders issues in the order Jira returned them, one line each.
pub fn render_report(issues: &[JiraIssue]) -> String {
    if issues.is_empty() {
        return NO_TASKS_LINE.to_string();
    }

    issues.iter().map(render_line).collect()
}

/// `[KEY] Summary: emoji Status (points)`, newline-terminated.
pub fn render_line(issue: &JiraIssue) -> String {
    format!(
        "[{}] {}: {} {} ({})\n",
        issue.key,
        issue.summary(),
        status_emoji(issue.status_name()),
        issue.status_name(),
        issue.story_points_label()
    )
}
