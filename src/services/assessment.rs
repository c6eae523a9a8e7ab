//! Assessment service client
//!
//! ## Table of Contents
//! - **AssessmentClient**: Gradebook, exams, documents, question banks
//! - Wire types for the assessment API
//!
//! Grading and examination surface: gradebook summaries and history, exam
//! configuration and attempts, personal document management, question pools,
//! achievements, and the skill radar.

use crate::envelope::ApiResponse;
use crate::http::{Auth, HttpClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Wire types
// ============================================================================

/// Exam attempt lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    /// Attempt running
    InProgress,
    /// Answers handed in
    Submitted,
    /// Waiting for manual grading
    UnderReview,
    /// Grading finished
    Graded,
}

/// Personal document category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentCategory {
    /// Lecture note
    Note,
    /// Assignment submission
    Assignment,
    /// Reference material
    Reference,
    /// Project document
    Project,
}

/// Question kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// Multiple choice
    Mcq,
    /// Coding exercise
    Coding,
    /// Free-text essay
    Essay,
}

/// Health probe payload
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Probe status string
    pub status: Option<String>,
    /// Reporting service name
    pub service: Option<String>,
}

/// One answer within an attempt submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    /// Question being answered
    pub question_id: i64,
    /// Free-form answer payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<HashMap<String, Value>>,
}

/// Attempt submission payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSubmitRequest {
    /// Answers in question order
    pub answers: Vec<AnswerRequest>,
}

/// Attempt submission acknowledgement
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSubmitResponse {
    /// Backend acknowledgement text
    pub message: Option<String>,
    /// Submission timestamp
    pub submitted_at: Option<String>,
}

/// Section rule within an exam configuration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSectionRuleRequest {
    /// Pool to draw from
    pub pool_id: i64,
    /// Number of questions pulled
    pub count_to_pull: u32,
    /// Points per question
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_per_question: Option<f64>,
}

/// Exam configuration payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamConfigRequest {
    /// Exam title
    pub title: String,
    /// Owning course
    pub course_id: i64,
    /// Attached lesson, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<i64>,
    /// Proctoring policy name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    /// Whether the browser lock is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_lock_enabled: Option<bool>,
    /// Time limit in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_minutes: Option<u32>,
    /// Window open timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_start: Option<String>,
    /// Window close timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_end: Option<String>,
    /// Free-form policy settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_config: Option<HashMap<String, Value>>,
    /// Section rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<ExamSectionRuleRequest>>,
}

/// Section rule record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSectionRuleResponse {
    /// Rule id
    pub id: Option<i64>,
    /// Pool drawn from
    pub pool_id: Option<i64>,
    /// Pool display name
    pub pool_name: Option<String>,
    /// Number of questions pulled
    pub count_to_pull: Option<u32>,
    /// Points per question
    pub points_per_question: Option<f64>,
}

/// Exam configuration record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamConfigResponse {
    /// Configuration id
    pub id: Option<i64>,
    /// Exam title
    pub title: Option<String>,
    /// Owning course
    pub course_id: Option<i64>,
    /// Attached lesson
    pub lesson_id: Option<i64>,
    /// Proctoring policy name
    pub policy: Option<String>,
    /// Whether the browser lock is required
    pub browser_lock_enabled: Option<bool>,
    /// Time limit in minutes
    pub time_limit_minutes: Option<u32>,
    /// Window open timestamp
    pub window_start: Option<String>,
    /// Window close timestamp
    pub window_end: Option<String>,
    /// Free-form policy settings
    pub policy_config: Option<HashMap<String, Value>>,
    /// Owning instructor
    pub instructor_id: Option<String>,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Section rules
    #[serde(default)]
    pub sections: Vec<ExamSectionRuleResponse>,
}

/// Attempt start acknowledgement
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptStartResponse {
    /// New attempt id
    pub attempt_id: Option<i64>,
    /// Configuration the attempt runs under
    pub exam_config_id: Option<i64>,
    /// Start timestamp
    pub started_at: Option<String>,
    /// Time limit in minutes
    pub time_limit: Option<u32>,
}

/// Per-question grading detail
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResultResponse {
    /// Question id
    pub question_id: Option<i64>,
    /// The answer as given
    pub your_answer: Option<HashMap<String, Value>>,
    /// Whether it was correct
    pub correct: Option<bool>,
    /// Points awarded
    pub score: Option<f64>,
}

/// Attempt grading result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResultResponse {
    /// Attempt id
    pub attempt_id: Option<i64>,
    /// Points achieved
    pub score: Option<f64>,
    /// Maximum achievable points
    pub max_score: Option<f64>,
    /// Whether the attempt passed
    pub passed: Option<bool>,
    /// Grader feedback
    pub feedback: Option<String>,
    /// Per-question details
    #[serde(default)]
    pub answers: Vec<AnswerResultResponse>,
}

/// Paged gradebook listing query
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookListQuery {
    /// Zero-based page index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Gradebook summary query
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookSummaryQuery {
    /// Semester filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    /// Student scope (instructor view)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

/// One gradebook row
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookResponse {
    /// Student id
    pub student_id: Option<String>,
    /// Student display name
    pub student_name: Option<String>,
    /// Exam id
    pub exam_id: Option<i64>,
    /// Exam title
    pub exam_title: Option<String>,
    /// Score achieved
    pub score: Option<f64>,
    /// Row status text
    pub status: Option<String>,
    /// Grading timestamp
    pub graded_at: Option<String>,
}

/// Per-course grade detail inside a summary
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGradeDetail {
    /// Course id
    pub course_id: Option<i64>,
    /// Course name
    pub course_name: Option<String>,
    /// Course code
    pub course_code: Option<String>,
    /// Final numeric score
    pub final_score: Option<f64>,
    /// Letter grade
    pub grade: Option<String>,
    /// Grade point value
    pub gpa: Option<f64>,
    /// Course status text
    pub status: Option<String>,
}

/// Gradebook summary
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookSummaryResponse {
    /// Overall grade point average
    pub overall_gpa: Option<f64>,
    /// Total credits earned
    pub total_credits: Option<u32>,
    /// Completed course count
    pub completed_courses: Option<u32>,
    /// In-progress course count
    pub in_progress_courses: Option<u32>,
    /// Class rank
    pub rank: Option<u32>,
    /// Cohort size
    pub total_students: Option<u32>,
    /// Achievements earned
    pub total_achievements: Option<u32>,
    /// Semester the summary covers
    pub semester: Option<String>,
    /// Per-course grades
    #[serde(default)]
    pub course_grades: Vec<CourseGradeDetail>,
}

/// One semester inside the v2 summary
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterSummary {
    /// Semester label
    pub semester: Option<String>,
    /// Semester GPA
    pub gpa: Option<f64>,
    /// Credits taken
    pub total_credits: Option<u32>,
    /// Class rank
    pub rank: Option<u32>,
    /// Cohort size
    pub total_students: Option<u32>,
    /// Achievements earned
    pub achievements: Option<u32>,
    /// Attendance rate in percent
    pub attendance: Option<f64>,
}

/// Cross-semester aggregate inside the v2 summary
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    /// Cumulative GPA
    pub gpa: Option<f64>,
    /// Cumulative credits
    pub total_credits: Option<u32>,
}

/// Semester-bucketed gradebook summary
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookSummaryV2Response {
    /// Student id
    pub student_id: Option<String>,
    /// Per-semester summaries
    #[serde(default)]
    pub semesters: Vec<SemesterSummary>,
    /// Cross-semester aggregate
    pub overall: Option<OverallStats>,
}

/// One graded subject inside an academic record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    /// Subject name
    pub name: Option<String>,
    /// Subject code
    pub code: Option<String>,
    /// Credits
    pub credits: Option<u32>,
    /// Letter grade
    pub grade: Option<String>,
    /// Numeric score
    pub score: Option<f64>,
    /// Teaching instructor
    pub teacher: Option<String>,
}

/// One semester of academic history
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    /// Semester label
    pub semester: Option<String>,
    /// Semester GPA
    pub gpa: Option<f64>,
    /// Credits taken
    pub total_credits: Option<u32>,
    /// Class rank
    pub rank: Option<u32>,
    /// Cohort size
    pub total_students: Option<u32>,
    /// Achievements earned
    pub achievements: Option<u32>,
    /// Attendance rate in percent
    pub attendance: Option<f64>,
    /// Graded subjects
    #[serde(default)]
    pub subjects: Vec<SubjectRecord>,
}

/// Full academic history
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookHistoryResponse {
    /// Student id
    pub student_id: Option<String>,
    /// Per-semester records
    #[serde(default)]
    pub records: Vec<AcademicRecord>,
}

/// Progress detail on an achievement
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    /// Current counter
    pub current: Option<u32>,
    /// Target counter
    pub target: Option<u32>,
}

/// Achievement record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementResponse {
    /// Achievement id
    pub id: Option<i64>,
    /// Stable code
    pub code: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Icon URL
    pub icon_url: Option<String>,
    /// Inline icon name
    pub icon: Option<String>,
    /// Point value
    pub points: Option<u32>,
    /// Category label
    pub category: Option<String>,
    /// Rarity label
    pub rarity: Option<String>,
    /// Whether the caller earned it
    pub earned: Option<bool>,
    /// Alias some backends use for `earned`
    pub is_earned: Option<bool>,
    /// Earn timestamp
    pub earned_at: Option<String>,
    /// Progress in percent
    pub progress: Option<f64>,
    /// Structured progress detail
    pub progress_detail: Option<AchievementProgress>,
}

/// One exam score data point
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamScorePoint {
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
pub struct LearningTimePoint {
    /// Week label
    pub week: Option<String>,
    /// Hours studied
    pub hours: Option<f64>,
}

/// Assessment analytics payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// Exam score series
    #[serde(default)]
    pub exam_scores: Vec<ExamScorePoint>,
    /// Learning time series
    #[serde(default)]
    pub learning_time: Vec<LearningTimePoint>,
    /// Identified strengths
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Suggested improvements
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Document creation/update payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    /// Document title
    pub title: String,
    /// Document body
    pub content: String,
    /// Category
    pub category: DocumentCategory,
    /// Related course label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    /// Free-form tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Favorite flag toggle payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggleRequest {
    /// New favorite state
    pub is_favorite: bool,
}

/// Document record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    /// Document id
    pub id: Option<String>,
    /// Document title
    pub title: Option<String>,
    /// Document body
    pub content: Option<String>,
    /// Category
    pub category: Option<DocumentCategory>,
    /// Related course label
    pub course: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Favorite flag
    pub is_favorite: Option<bool>,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
}

/// Document collection statistics
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatisticsResponse {
    /// Total document count
    pub total_documents: Option<u32>,
    /// Notes count
    pub notes_count: Option<u32>,
    /// Assignments count
    pub assignments_count: Option<u32>,
    /// References count
    pub references_count: Option<u32>,
    /// Projects count
    pub projects_count: Option<u32>,
    /// Favorites count
    pub favorites_count: Option<u32>,
}

/// Document listing filter
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListQuery {
    /// Category filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DocumentCategory>,
    /// Favorites only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    /// Free-text filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

/// Question pool creation/update payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPoolRequest {
    /// Pool name
    pub name: String,
    /// Difficulty label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Whether other instructors may draw from it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// Question pool record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPoolResponse {
    /// Pool id
    pub id: Option<i64>,
    /// Pool name
    pub name: Option<String>,
    /// Difficulty label
    pub difficulty: Option<String>,
    /// Whether the pool is shared
    pub is_public: Option<bool>,
    /// Owning instructor
    pub instructor_id: Option<String>,
    /// Creation timestamp
    pub created_at: Option<String>,
}

/// Question creation/update payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    /// Owning pool
    pub pool_id: i64,
    /// Question kind
    pub r#type: QuestionType,
    /// Question text
    pub content: String,
    /// Kind-specific settings (choices, test cases, rubric)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
    /// Scoring weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Skill this question exercises
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_tag: Option<String>,
}

/// Question record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    /// Question id
    pub id: Option<i64>,
    /// Owning pool
    pub pool_id: Option<i64>,
    /// Question kind
    pub r#type: Option<QuestionType>,
    /// Question text
    pub content: Option<String>,
    /// Kind-specific settings
    pub metadata: Option<HashMap<String, Value>>,
    /// Scoring weight
    pub weight: Option<f64>,
    /// Skill this question exercises
    pub skill_tag: Option<String>,
}

/// One skill on the radar
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    /// Skill name
    pub name: Option<String>,
    /// Mastery level
    pub level: Option<f64>,
    /// Skill category
    pub category: Option<String>,
}

/// Skill radar payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRadarResponse {
    /// Student id
    pub student_id: Option<String>,
    /// Skill entries
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

/// Per-skill mastery map
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSkillResponse {
    /// Mastery by skill name, 0.0 to 1.0
    #[serde(default)]
    pub mastery: HashMap<String, f64>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the assessment service
#[derive(Clone)]
pub struct AssessmentClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl AssessmentClient {
    pub(crate) fn new(http: Arc<HttpClient>, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Service health probe
    pub async fn health(&self) -> ApiResponse<HealthStatus> {
        self.http
            .get(
                self.url("/health"),
                Auth::Public,
                "Failed to fetch assessment-service health",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Gradebook & analytics
    // ------------------------------------------------------------------

    /// The caller's gradebook summary
    pub async fn my_gradebook_summary(
        &self,
        query: &GradebookSummaryQuery,
    ) -> ApiResponse<GradebookSummaryResponse> {
        self.http
            .get_query(
                self.url("/api/v1/assessment/gradebook/summary"),
                query,
                Auth::Bearer,
                "Failed to fetch gradebook summary",
            )
            .await
    }

    /// Semester-bucketed gradebook summary
    pub async fn gradebook_summary_v2(
        &self,
        query: &GradebookSummaryQuery,
    ) -> ApiResponse<GradebookSummaryV2Response> {
        self.http
            .get_query(
                self.url("/api/v1/assessment/gradebook/summary/v2"),
                query,
                Auth::Bearer,
                "Failed to fetch gradebook summary v2",
            )
            .await
    }

    /// A student's full academic history
    pub async fn gradebook_history(&self, student_id: &str) -> ApiResponse<GradebookHistoryResponse> {
        self.http
            .get(
                self.url(&format!("/api/v1/assessment/gradebook/history/{}", student_id)),
                Auth::Bearer,
                "Failed to fetch gradebook history",
            )
            .await
    }

    /// Assessment analytics, scoped to a student when given
    pub async fn analytics(&self, student_id: Option<&str>) -> ApiResponse<AnalyticsResponse> {
        let url = self.url("/api/v1/assessment/analytics");
        match student_id {
            Some(id) => {
                self.http
                    .get_query(
                        url,
                        &[("studentId", id)],
                        Auth::Bearer,
                        "Failed to fetch assessment analytics",
                    )
                    .await
            }
            None => {
                self.http
                    .get(url, Auth::Bearer, "Failed to fetch assessment analytics")
                    .await
            }
        }
    }

    // ------------------------------------------------------------------
    // Achievements
    // ------------------------------------------------------------------

    /// The caller's achievements
    pub async fn achievements(&self) -> ApiResponse<Vec<AchievementResponse>> {
        self.http
            .get(
                self.url("/api/v1/assessment/achievements"),
                Auth::Bearer,
                "Failed to fetch achievements",
            )
            .await
    }

    /// Award an achievement by code
    pub async fn award_achievement(&self, code: &str) -> ApiResponse<Value> {
        self.http
            .post_empty(
                self.url(&format!("/api/v1/assessment/achievements/{}/award", code)),
                Auth::Bearer,
                "Failed to award achievement",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Exams & attempts
    // ------------------------------------------------------------------

    /// Start an attempt under an exam configuration
    pub async fn start_exam_attempt(&self, config_id: i64) -> ApiResponse<AttemptStartResponse> {
        self.http
            .post_empty(
                self.url(&format!("/api/v1/exams/{}/start", config_id)),
                Auth::Bearer,
                "Failed to start exam attempt",
            )
            .await
    }

    /// Submit an attempt's answers
    pub async fn submit_attempt(
        &self,
        id: i64,
        payload: &AttemptSubmitRequest,
    ) -> ApiResponse<AttemptSubmitResponse> {
        self.http
            .post(
                self.url(&format!("/api/v1/attempts/{}/submit", id)),
                payload,
                Auth::Bearer,
                "Failed to submit attempt",
            )
            .await
    }

    /// Fetch a graded attempt's result
    pub async fn attempt_result(&self, id: i64) -> ApiResponse<AttemptResultResponse> {
        self.http
            .get(
                self.url(&format!("/api/v1/attempts/{}/result", id)),
                Auth::Bearer,
                "Failed to fetch attempt result",
            )
            .await
    }

    /// Create an exam configuration (instructor)
    pub async fn create_exam_config(&self, payload: &ExamConfigRequest) -> ApiResponse<ExamConfigResponse> {
        self.http
            .post(
                self.url("/api/v1/exams"),
                payload,
                Auth::Bearer,
                "Failed to create exam configuration",
            )
            .await
    }

    /// Update an exam configuration (instructor)
    pub async fn update_exam_config(
        &self,
        id: i64,
        payload: &ExamConfigRequest,
    ) -> ApiResponse<ExamConfigResponse> {
        self.http
            .put(
                self.url(&format!("/api/v1/exams/{}", id)),
                payload,
                Auth::Bearer,
                "Failed to update exam configuration",
            )
            .await
    }

    /// Fetch an exam configuration
    pub async fn exam_config(&self, id: i64) -> ApiResponse<ExamConfigResponse> {
        self.http
            .get(
                self.url(&format!("/api/v1/exams/{}", id)),
                Auth::Bearer,
                "Failed to fetch exam configuration",
            )
            .await
    }

    /// Delete an exam configuration (instructor)
    pub async fn delete_exam_config(&self, id: i64) -> ApiResponse<Value> {
        self.http
            .delete(
                self.url(&format!("/api/v1/exams/{}", id)),
                Auth::Bearer,
                "Failed to delete exam configuration",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Course & student grades
    // ------------------------------------------------------------------

    /// Gradebook rows for a course (instructor)
    pub async fn course_grades(
        &self,
        course_id: i64,
        query: &GradebookListQuery,
    ) -> ApiResponse<Vec<GradebookResponse>> {
        self.http
            .get_query(
                self.url(&format!("/api/v1/gradebook/courses/{}", course_id)),
                query,
                Auth::Bearer,
                "Failed to fetch course grades",
            )
            .await
    }

    /// The caller's gradebook rows in a course
    pub async fn my_course_grades(
        &self,
        course_id: i64,
        query: &GradebookListQuery,
    ) -> ApiResponse<Vec<GradebookResponse>> {
        self.http
            .get_query(
                self.url(&format!("/api/v1/gradebook/my/courses/{}", course_id)),
                query,
                Auth::Bearer,
                "Failed to fetch my course grades",
            )
            .await
    }

    /// A student's gradebook rows in a course (instructor)
    pub async fn student_course_grades(
        &self,
        student_id: &str,
        course_id: i64,
        query: &GradebookListQuery,
    ) -> ApiResponse<Vec<GradebookResponse>> {
        self.http
            .get_query(
                self.url(&format!(
                    "/api/v1/gradebook/student/{}/course/{}",
                    student_id, course_id
                )),
                query,
                Auth::Bearer,
                "Failed to fetch student course grades",
            )
            .await
    }

    /// A student's academic history (instructor)
    pub async fn student_gradebook_history(
        &self,
        student_id: &str,
    ) -> ApiResponse<GradebookHistoryResponse> {
        self.http
            .get(
                self.url(&format!("/api/v1/gradebook/student/{}/history", student_id)),
                Auth::Bearer,
                "Failed to fetch student gradebook history",
            )
            .await
    }

    /// A student's analytics over a timeframe (instructor)
    pub async fn student_analytics(
        &self,
        student_id: &str,
        timeframe: Option<&str>,
    ) -> ApiResponse<AnalyticsResponse> {
        let url = self.url(&format!("/api/v1/gradebook/student/{}/analytics", student_id));
        match timeframe {
            Some(window) => {
                self.http
                    .get_query(
                        url,
                        &[("timeframe", window)],
                        Auth::Bearer,
                        "Failed to fetch student analytics",
                    )
                    .await
            }
            None => {
                self.http
                    .get(url, Auth::Bearer, "Failed to fetch student analytics")
                    .await
            }
        }
    }

    /// A student's gradebook summary (instructor)
    pub async fn student_gradebook_summary(
        &self,
        student_id: &str,
    ) -> ApiResponse<GradebookSummaryResponse> {
        self.http
            .get(
                self.url(&format!("/api/v1/gradebook/student/{}/summary", student_id)),
                Auth::Bearer,
                "Failed to fetch student gradebook summary",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------

    /// Document collection statistics
    pub async fn document_stats(&self) -> ApiResponse<DocumentStatisticsResponse> {
        self.http
            .get(
                self.url("/api/v1/documents/stats"),
                Auth::Bearer,
                "Failed to fetch document statistics",
            )
            .await
    }

    /// List the caller's documents
    pub async fn list_documents(&self, query: &DocumentListQuery) -> ApiResponse<Vec<DocumentResponse>> {
        self.http
            .get_query(
                self.url("/api/v1/documents"),
                query,
                Auth::Bearer,
                "Failed to fetch documents",
            )
            .await
    }

    /// Create a document
    pub async fn create_document(&self, payload: &DocumentRequest) -> ApiResponse<DocumentResponse> {
        self.http
            .post(
                self.url("/api/v1/documents"),
                payload,
                Auth::Bearer,
                "Failed to create document",
            )
            .await
    }

    /// Fetch one document
    pub async fn document(&self, id: &str) -> ApiResponse<DocumentResponse> {
        self.http
            .get(
                self.url(&format!("/api/v1/documents/{}", id)),
                Auth::Bearer,
                "Failed to fetch document",
            )
            .await
    }

    /// Update a document
    pub async fn update_document(
        &self,
        id: &str,
        payload: &DocumentRequest,
    ) -> ApiResponse<DocumentResponse> {
        self.http
            .put(
                self.url(&format!("/api/v1/documents/{}", id)),
                payload,
                Auth::Bearer,
                "Failed to update document",
            )
            .await
    }

    /// Delete a document
    pub async fn delete_document(&self, id: &str) -> ApiResponse<Value> {
        self.http
            .delete(
                self.url(&format!("/api/v1/documents/{}", id)),
                Auth::Bearer,
                "Failed to delete document",
            )
            .await
    }

    /// Flip a document's favorite flag
    pub async fn toggle_favorite(
        &self,
        id: &str,
        payload: &FavoriteToggleRequest,
    ) -> ApiResponse<DocumentResponse> {
        self.http
            .patch(
                self.url(&format!("/api/v1/documents/{}/favorite", id)),
                payload,
                Auth::Bearer,
                "Failed to toggle favorite",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Question pools & questions
    // ------------------------------------------------------------------

    /// Create a question pool (instructor)
    pub async fn create_question_pool(
        &self,
        payload: &QuestionPoolRequest,
    ) -> ApiResponse<QuestionPoolResponse> {
        self.http
            .post(
                self.url("/api/v1/pools"),
                payload,
                Auth::Bearer,
                "Failed to create question pool",
            )
            .await
    }

    /// Update a question pool (instructor)
    pub async fn update_question_pool(
        &self,
        id: i64,
        payload: &QuestionPoolRequest,
    ) -> ApiResponse<QuestionPoolResponse> {
        self.http
            .put(
                self.url(&format!("/api/v1/pools/{}", id)),
                payload,
                Auth::Bearer,
                "Failed to update question pool",
            )
            .await
    }

    /// Fetch one question pool
    pub async fn question_pool(&self, id: i64) -> ApiResponse<QuestionPoolResponse> {
        self.http
            .get(
                self.url(&format!("/api/v1/pools/{}", id)),
                Auth::Bearer,
                "Failed to fetch question pool",
            )
            .await
    }

    /// Delete a question pool (instructor)
    pub async fn delete_question_pool(&self, id: i64) -> ApiResponse<Value> {
        self.http
            .delete(
                self.url(&format!("/api/v1/pools/{}", id)),
                Auth::Bearer,
                "Failed to delete question pool",
            )
            .await
    }

    /// List the caller's question pools (instructor)
    pub async fn my_question_pools(&self) -> ApiResponse<Vec<QuestionPoolResponse>> {
        self.http
            .get(
                self.url("/api/v1/pools/my"),
                Auth::Bearer,
                "Failed to fetch my question pools",
            )
            .await
    }

    /// Create a question (instructor)
    pub async fn create_question(&self, payload: &QuestionRequest) -> ApiResponse<QuestionResponse> {
        self.http
            .post(
                self.url("/api/v1/questions"),
                payload,
                Auth::Bearer,
                "Failed to create question",
            )
            .await
    }

    /// Fetch one question
    pub async fn question(&self, id: i64) -> ApiResponse<QuestionResponse> {
        self.http
            .get(
                self.url(&format!("/api/v1/questions/{}", id)),
                Auth::Bearer,
                "Failed to fetch question",
            )
            .await
    }

    /// Update a question (instructor)
    pub async fn update_question(
        &self,
        id: i64,
        payload: &QuestionRequest,
    ) -> ApiResponse<QuestionResponse> {
        self.http
            .put(
                self.url(&format!("/api/v1/questions/{}", id)),
                payload,
                Auth::Bearer,
                "Failed to update question",
            )
            .await
    }

    /// Delete a question (instructor)
    pub async fn delete_question(&self, id: i64) -> ApiResponse<Value> {
        self.http
            .delete(
                self.url(&format!("/api/v1/questions/{}", id)),
                Auth::Bearer,
                "Failed to delete question",
            )
            .await
    }

    /// List a pool's questions (instructor)
    pub async fn questions_by_pool(&self, pool_id: i64) -> ApiResponse<Vec<QuestionResponse>> {
        self.http
            .get(
                self.url(&format!("/api/v1/questions/pool/{}", pool_id)),
                Auth::Bearer,
                "Failed to fetch questions by pool",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Skills
    // ------------------------------------------------------------------

    /// Skill radar, scoped to a student when given
    pub async fn skill_radar(&self, student_id: Option<&str>) -> ApiResponse<SkillRadarResponse> {
        let url = self.url("/api/v1/assessment/skills");
        match student_id {
            Some(id) => {
                self.http
                    .get_query(
                        url,
                        &[("studentId", id)],
                        Auth::Bearer,
                        "Failed to fetch skill radar",
                    )
                    .await
            }
            None => {
                self.http
                    .get(url, Auth::Bearer, "Failed to fetch skill radar")
                    .await
            }
        }
    }

    /// Per-skill mastery for a user
    pub async fn user_skills(&self, user_id: &str) -> ApiResponse<AssessmentSkillResponse> {
        self.http
            .get(
                self.url(&format!("/api/v1/assessment/skills/{}", user_id)),
                Auth::Bearer,
                "Failed to fetch user skills",
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_submission_wire_format() {
        let payload = AttemptSubmitRequest {
            answers: vec![AnswerRequest {
                question_id: 12,
                response: Some(HashMap::from([(
                    "selected".to_string(),
                    Value::from("B"),
                )])),
            }],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["answers"][0]["questionId"], 12);
        assert_eq!(json["answers"][0]["response"]["selected"], "B");
    }

    #[test]
    fn test_document_category_wire_names() {
        assert_eq!(
            serde_json::to_value(DocumentCategory::Reference).unwrap(),
            "REFERENCE"
        );
        let parsed: QuestionType = serde_json::from_value(Value::from("MCQ")).unwrap();
        assert_eq!(parsed, QuestionType::Mcq);
    }

    #[test]
    fn test_summary_tolerates_sparse_payload() {
        let summary: GradebookSummaryResponse =
            serde_json::from_str(r#"{"overallGpa": 3.4, "rank": 12}"#).unwrap();

        assert_eq!(summary.overall_gpa, Some(3.4));
        assert_eq!(summary.rank, Some(12));
        assert!(summary.course_grades.is_empty());
    }

    #[test]
    fn test_exam_config_request_skips_unset() {
        let payload = ExamConfigRequest {
            title: "Midterm".to_string(),
            course_id: 5,
            lesson_id: None,
            policy: None,
            browser_lock_enabled: Some(true),
            time_limit_minutes: Some(60),
            window_start: None,
            window_end: None,
            policy_config: None,
            sections: Some(vec![ExamSectionRuleRequest {
                pool_id: 2,
                count_to_pull: 10,
                points_per_question: Some(1.0),
            }]),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["courseId"], 5);
        assert_eq!(json["sections"][0]["countToPull"], 10);
        assert!(json.get("lessonId").is_none());
    }
}
