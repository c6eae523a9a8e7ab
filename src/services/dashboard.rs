//! Dashboard service client
//!
//! ## Table of Contents
//! - **DashboardClient**: Aggregated student/instructor/admin views
//! - Wire types for the dashboard API
//!
//! The dashboard service composes data from the other backends into
//! ready-to-render summaries: the student home view, instructor course
//! statistics with at-risk detection, and admin platform totals.

use crate::envelope::ApiResponse;
use crate::http::{Auth, HttpClient};
use crate::services::assessment::GradebookSummaryResponse;
use crate::services::courses::EnrollmentResponse;
use crate::services::profile::UserProfileResponse;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

const DASHBOARD_PREFIX: &str = "/api/v1/dashboard";

// ============================================================================
// Wire types
// ============================================================================

/// Dropout risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// On track
    Low,
    /// Needs attention
    Medium,
    /// Likely to fail or drop
    High,
}

/// Direction a risk profile is moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTrend {
    /// No change
    Stable,
    /// Getting worse
    Increasing,
    /// Getting better
    Decreasing,
}

/// Health probe payload
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Probe status string
    pub status: Option<String>,
    /// Reporting service name
    pub service: Option<String>,
}

/// Headline numbers on the student home view
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboardSummary {
    /// Courses currently in progress
    pub courses_in_progress: Option<u32>,
    /// Next assignment due date
    pub next_assignment_due: Option<String>,
}

/// Dropout risk profile
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    /// Current level
    pub level: Option<RiskLevel>,
    /// Direction of movement
    pub trend: Option<RiskTrend>,
}

/// Student home view
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboardResponse {
    /// Headline numbers
    pub summary: Option<StudentDashboardSummary>,
    /// Dropout risk profile
    pub risk_profile: Option<RiskProfile>,
    /// Skill radar values by skill name
    #[serde(default)]
    pub skill_radar: HashMap<String, f64>,
}

/// Course counters on the dashboard
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStats {
    /// Total course count
    pub total_courses: Option<u32>,
    /// In-progress count
    pub in_progress_courses: Option<u32>,
    /// Completed count
    pub completed_courses: Option<u32>,
    /// Mean progress in percent
    pub average_progress: Option<f64>,
}

/// Achievement entry on the dashboard
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Achievement id
    pub id: Option<String>,
    /// Display title
    pub title: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Icon name
    pub icon: Option<String>,
    /// Category label
    pub category: Option<String>,
    /// Rarity label
    pub rarity: Option<String>,
    /// Whether it is earned
    pub is_earned: Option<bool>,
    /// Earn date
    pub earned_date: Option<String>,
}

/// Full student dashboard aggregate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryResponse {
    /// Profile of the viewing student
    pub profile: Option<UserProfileResponse>,
    /// Current enrollments
    #[serde(default)]
    pub courses: Vec<EnrollmentResponse>,
    /// Course counters
    pub course_stats: Option<CourseStats>,
    /// Performance summary
    pub performance: Option<GradebookSummaryResponse>,
    /// Achievements
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    /// Achievement count
    pub achievements_count: Option<u32>,
    /// Total learning hours
    pub total_learning_hours: Option<f64>,
    /// Upcoming assignment count
    pub upcoming_assignments: Option<u32>,
}

/// GPA movement between grading periods
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicProgress {
    /// Current GPA
    pub current_gpa: Option<f64>,
    /// Previous GPA
    pub previous_gpa: Option<f64>,
    /// Direction of movement (`up`, `down`, `stable`)
    pub trend: Option<String>,
    /// Percent change
    pub percent_change: Option<f64>,
}

/// Per-subject score movement
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPerformance {
    /// Subject name
    pub name: Option<String>,
    /// Current score
    pub current_score: Option<f64>,
    /// Previous score
    pub previous_score: Option<f64>,
    /// Direction of movement
    pub trend: Option<String>,
    /// Percent change
    pub percent_change: Option<f64>,
    /// Chart color hint
    pub color: Option<String>,
}

/// One exam score data point
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamScore {
    /// Month label
    pub month: Option<String>,
    /// Own score
    pub score: Option<f64>,
    /// Cohort average
    pub average: Option<f64>,
}

/// One learning-time data point
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningTime {
    /// Week label
    pub week: Option<String>,
    /// Hours studied
    pub hours: Option<f64>,
}

/// Student analytics view
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnalyticsResponse {
    /// GPA movement
    pub academic_progress: Option<AcademicProgress>,
    /// Per-subject movements
    #[serde(default)]
    pub subject_performance: Vec<SubjectPerformance>,
    /// Attendance rate in percent
    pub attendance_rate: Option<f64>,
    /// Assignment completion in percent
    pub assignment_completion: Option<f64>,
    /// Exam score series
    #[serde(default)]
    pub exam_scores: Vec<ExamScore>,
    /// Learning time series
    #[serde(default)]
    pub learning_time: Vec<LearningTime>,
    /// Identified strengths
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Suggested improvements
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Instructor-facing statistics for one course
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorCourseStatsResponse {
    /// Mean score across the roster
    pub average_score: Option<f64>,
    /// Number of at-risk students
    pub at_risk_count: Option<u32>,
    /// Completion rate in percent
    pub completion_rate: Option<f64>,
}

/// One at-risk student entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRiskStudent {
    /// Student id
    pub student_id: Option<String>,
    /// Student display name
    pub student_name: Option<String>,
    /// Risk level
    pub risk_level: Option<RiskLevel>,
    /// Why the student was flagged
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// At-risk listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRiskListResponse {
    /// Flagged students
    #[serde(default)]
    pub students: Vec<AtRiskStudent>,
}

/// Admin platform totals
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    /// Active user count
    pub active_users: Option<u32>,
    /// Revenue this month
    pub revenue_this_month: Option<f64>,
    /// Total course count
    pub total_courses: Option<u32>,
    /// System health label
    pub system_health: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the dashboard service
#[derive(Clone)]
pub struct DashboardClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl DashboardClient {
    pub(crate) fn new(http: Arc<HttpClient>, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, DASHBOARD_PREFIX, path)
    }

    /// Service health probe (outside the API prefix)
    pub async fn health(&self) -> ApiResponse<HealthStatus> {
        self.http
            .get(
                format!("{}/health", self.base_url),
                Auth::Public,
                "Failed to fetch dashboard-service health",
            )
            .await
    }

    /// Student home view
    pub async fn student_dashboard(&self) -> ApiResponse<StudentDashboardResponse> {
        self.http
            .get(
                self.url("/student"),
                Auth::Bearer,
                "Failed to fetch student dashboard",
            )
            .await
    }

    /// Full student dashboard aggregate
    pub async fn student_summary(&self) -> ApiResponse<DashboardSummaryResponse> {
        self.http
            .get(
                self.url("/student/summary"),
                Auth::Bearer,
                "Failed to fetch student dashboard summary",
            )
            .await
    }

    /// Student analytics view
    pub async fn student_analytics(&self) -> ApiResponse<StudentAnalyticsResponse> {
        self.http
            .get(
                self.url("/student/analytics"),
                Auth::Bearer,
                "Failed to fetch student analytics",
            )
            .await
    }

    /// Instructor-facing statistics for one course
    pub async fn instructor_course_stats(&self, id: i64) -> ApiResponse<InstructorCourseStatsResponse> {
        self.http
            .get(
                self.url(&format!("/instructor/courses/{}", id)),
                Auth::Bearer,
                "Failed to fetch instructor course stats",
            )
            .await
    }

    /// Students flagged as at risk across the instructor's courses
    pub async fn at_risk_students(&self) -> ApiResponse<AtRiskListResponse> {
        self.http
            .get(
                self.url("/instructor/at-risk"),
                Auth::Bearer,
                "Failed to fetch at-risk students",
            )
            .await
    }

    /// Platform totals for administrators
    pub async fn admin_stats(&self) -> ApiResponse<AdminStatsResponse> {
        self.http
            .get(
                self.url("/admin/stats"),
                Auth::Bearer,
                "Failed to fetch admin stats",
            )
            .await
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_dashboard_payload() {
        let view: StudentDashboardResponse = serde_json::from_str(
            r#"{
                "summary": {"coursesInProgress": 3, "nextAssignmentDue": "2025-01-10"},
                "riskProfile": {"level": "MEDIUM", "trend": "DECREASING"},
                "skillRadar": {"algorithms": 0.7}
            }"#,
        )
        .unwrap();

        assert_eq!(view.summary.unwrap().courses_in_progress, Some(3));
        let risk = view.risk_profile.unwrap();
        assert_eq!(risk.level, Some(RiskLevel::Medium));
        assert_eq!(risk.trend, Some(RiskTrend::Decreasing));
        assert_eq!(view.skill_radar.get("algorithms"), Some(&0.7));
    }

    #[test]
    fn test_at_risk_listing_defaults() {
        let listing: AtRiskListResponse = serde_json::from_str("{}").unwrap();
        assert!(listing.students.is_empty());
    }
}
