//! Course service client
//!
//! ## Table of Contents
//! - **CourseClient**: Courses, chapters, lessons, enrollments
//! - Wire types for the course API
//!
//! The largest of the service surfaces: course CRUD and lifecycle, chapter
//! and lesson management, and the enrollment flow.

use crate::envelope::ApiResponse;
use crate::http::{Auth, HttpClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Wire types
// ============================================================================

/// Course visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseVisibility {
    /// Listed for everyone
    Public,
    /// Invisible outside the roster
    Private,
}

/// Course lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    /// Editable, not yet visible to students
    Draft,
    /// Live
    Published,
    /// Retired, read-only
    Archived,
}

/// Lesson content kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonType {
    /// Video lesson
    Video,
    /// Reading material
    Text,
    /// Graded quiz
    Quiz,
}

/// Enrollment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    /// Currently studying
    Active,
    /// Finished the course
    Completed,
    /// Left the course
    Dropped,
}

/// Prerequisite strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrerequisiteType {
    /// Enrollment blocked without it
    Hard,
    /// Recommended only
    Soft,
}

/// Tag classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagType {
    /// Subject area
    Topic,
    /// Skill taught
    Skill,
    /// Difficulty level
    Difficulty,
}

/// Health probe payload
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Probe status string
    pub status: Option<String>,
    /// Reporting service name
    pub service: Option<String>,
    /// Probe timestamp
    pub timestamp: Option<String>,
}

/// Paged listing query
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListQuery {
    /// Zero-based page index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Sort expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Semester filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    /// Enrollment status filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_status: Option<EnrollmentStatus>,
}

/// Published-course listing query
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedCourseQuery {
    /// Zero-based page index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Semester filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

/// Keyword search query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSearchQuery {
    /// Search keyword
    pub keyword: String,
    /// Zero-based page index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Enrollment listing filter
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentListQuery {
    /// Enrollment status filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EnrollmentStatus>,
}

/// Own-enrollment listing filter
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyEnrollmentQuery {
    /// Enrollment status filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EnrollmentStatus>,
    /// Free-text filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

/// Course creation payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    /// Course title
    pub title: String,
    /// Visibility
    pub visibility: CourseVisibility,
    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Course code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Credit count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    /// Semester label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    /// Weekly schedule text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// Enrollment cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    /// Start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// End date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Thumbnail image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Learning objectives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objectives: Option<String>,
    /// Tag ids to attach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
    /// Prerequisite course ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite_course_ids: Option<Vec<i64>>,
}

/// Course update payload; unset fields keep their current value
pub type UpdateCourseRequest = CreateCourseRequest;

/// Chapter creation/update payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapterRequest {
    /// Chapter title
    pub title: String,
    /// Chapter description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Chapter reordering payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderChaptersRequest {
    /// Chapter ids in their new order
    pub chapter_ids: Vec<i64>,
}

/// Lesson creation/update payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    /// Lesson title
    pub title: String,
    /// Content kind
    pub r#type: LessonType,
    /// Lesson description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Quiz mastery threshold in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_threshold: Option<u32>,
    /// Lesson body or media URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Estimated duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
}

/// Instructor summary embedded in course records
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorSummaryResponse {
    /// Instructor id
    pub id: Option<String>,
    /// Display name
    pub full_name: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
}

/// Course tag record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    /// Tag id
    pub id: Option<i64>,
    /// Tag name
    pub name: Option<String>,
    /// Tag classification
    pub r#type: Option<TagType>,
    /// Tag description
    pub description: Option<String>,
}

/// Prerequisite record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteResponse {
    /// Prerequisite link id
    pub id: Option<i64>,
    /// Required course id
    pub required_course_id: Option<i64>,
    /// Required course title
    pub required_course_title: Option<String>,
    /// Prerequisite strength
    pub r#type: Option<PrerequisiteType>,
    /// Free-text explanation
    pub description: Option<String>,
}

/// Lesson record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    /// Lesson id
    pub id: Option<i64>,
    /// Lesson title
    pub title: Option<String>,
    /// Lesson description
    pub description: Option<String>,
    /// Content kind
    pub r#type: Option<LessonType>,
    /// Position within the chapter
    pub sequence: Option<u32>,
    /// Quiz mastery threshold
    pub mastery_threshold: Option<u32>,
    /// Lesson body or media URL
    pub content: Option<String>,
    /// Estimated duration in minutes
    pub estimated_duration: Option<u32>,
    /// Whether the current student finished it
    pub is_completed: Option<bool>,
    /// Next lesson id, if any
    pub next_lesson_id: Option<i64>,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
}

/// Chapter record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterResponse {
    /// Chapter id
    pub id: Option<i64>,
    /// Chapter title
    pub title: Option<String>,
    /// Chapter description
    pub description: Option<String>,
    /// Position within the course
    pub sequence: Option<u32>,
    /// Contained lessons
    #[serde(default)]
    pub lessons: Vec<LessonResponse>,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
}

/// Course record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    /// Course id
    pub id: Option<i64>,
    /// Course title
    pub title: Option<String>,
    /// Long description
    pub description: Option<String>,
    /// Lifecycle state
    pub status: Option<CourseStatus>,
    /// Visibility
    pub visibility: Option<CourseVisibility>,
    /// Owning instructor id
    pub instructor_id: Option<String>,
    /// Owning instructor name
    pub instructor_name: Option<String>,
    /// Owning instructor avatar URL
    pub instructor_avatar_url: Option<String>,
    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,
    /// Learning objectives
    pub objectives: Option<String>,
    /// Course code
    pub code: Option<String>,
    /// Credit count
    pub credits: Option<u32>,
    /// Semester label
    pub semester: Option<String>,
    /// Weekly schedule text
    pub schedule: Option<String>,
    /// Enrollment cap
    pub max_students: Option<u32>,
    /// Start date
    pub start_date: Option<String>,
    /// End date
    pub end_date: Option<String>,
    /// Current enrollment count
    pub current_students: Option<u32>,
    /// Whether the current student is enrolled
    pub enrolled: Option<bool>,
    /// Current student's progress in percent
    pub progress: Option<f64>,
    /// Embedded instructor summary
    pub instructor: Option<InstructorSummaryResponse>,
    /// Attached tags
    #[serde(default)]
    pub tags: Vec<TagResponse>,
    /// Prerequisites
    #[serde(default)]
    pub prerequisites: Vec<PrerequisiteResponse>,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
    /// Publication timestamp
    pub published_at: Option<String>,
    /// Free-form syllabus blocks
    #[serde(default)]
    pub syllabus: Vec<HashMap<String, Value>>,
    /// Free-form assignment blocks
    #[serde(default)]
    pub assignments: Vec<HashMap<String, Value>>,
    /// Free-form resource blocks
    #[serde(default)]
    pub resources: Vec<HashMap<String, Value>>,
}

/// Aggregate statistics over the caller's courses
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStatistics {
    /// Total course count
    pub total_courses: Option<u32>,
    /// Courses currently running
    pub active_courses: Option<u32>,
    /// Total credits
    pub total_credits: Option<u32>,
    /// Mean progress in percent
    pub average_progress: Option<f64>,
}

/// Per-course enrollment statistics
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStatsResponse {
    /// Course id
    pub course_id: Option<i64>,
    /// All-time enrollment count
    pub total_enrollments: Option<u32>,
    /// Active enrollments
    pub active_enrollments: Option<u32>,
    /// Completed enrollments
    pub completed_enrollments: Option<u32>,
    /// Mean progress in percent
    pub average_progress: Option<f64>,
}

/// Enrollment record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    /// Enrollment id
    pub id: Option<i64>,
    /// Course id
    pub course_id: Option<i64>,
    /// Course title
    pub course_title: Option<String>,
    /// Course code
    pub course_code: Option<String>,
    /// Course semester
    pub course_semester: Option<String>,
    /// Course schedule text
    pub course_schedule: Option<String>,
    /// Course credit count
    pub course_credits: Option<u32>,
    /// Course enrollment cap
    pub course_max_students: Option<u32>,
    /// Course thumbnail URL
    pub course_thumbnail_url: Option<String>,
    /// Instructor name
    pub instructor_name: Option<String>,
    /// Instructor avatar URL
    pub instructor_avatar_url: Option<String>,
    /// Enrolled student id
    pub student_id: Option<String>,
    /// Enrollment state
    pub status: Option<EnrollmentStatus>,
    /// Progress in percent
    pub progress: Option<f64>,
    /// Enrollment timestamp
    pub enrolled_at: Option<String>,
    /// Completion timestamp
    pub completed_at: Option<String>,
    /// Last access timestamp
    pub last_access_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct EnrollmentProgressRequest {
    progress: f64,
}

/// Enrollment membership check result
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentStatusResponse {
    /// Whether the current student is enrolled
    pub enrolled: bool,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the course service
#[derive(Clone)]
pub struct CourseClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl CourseClient {
    pub(crate) fn new(http: Arc<HttpClient>, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ------------------------------------------------------------------
    // Health
    // ------------------------------------------------------------------

    /// Service health probe
    pub async fn health(&self) -> ApiResponse<HealthStatus> {
        self.http
            .get(self.url("/health"), Auth::Public, "Failed to fetch health status")
            .await
    }

    /// Readiness probe
    pub async fn readiness(&self) -> ApiResponse<HealthStatus> {
        self.http
            .get(
                self.url("/health/ready"),
                Auth::Public,
                "Failed to fetch readiness status",
            )
            .await
    }

    /// Liveness probe
    pub async fn liveness(&self) -> ApiResponse<HealthStatus> {
        self.http
            .get(
                self.url("/health/live"),
                Auth::Public,
                "Failed to fetch liveness status",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Courses
    // ------------------------------------------------------------------

    /// Create a course (instructor)
    pub async fn create_course(&self, payload: &CreateCourseRequest) -> ApiResponse<CourseResponse> {
        self.http
            .post(self.url("/courses"), payload, Auth::Bearer, "Failed to create course")
            .await
    }

    /// List courses visible to the caller
    pub async fn courses(&self, query: &CourseListQuery) -> ApiResponse<Vec<CourseResponse>> {
        self.http
            .get_query(self.url("/courses"), query, Auth::Bearer, "Failed to fetch courses")
            .await
    }

    /// Fetch one course
    pub async fn course(&self, id: i64) -> ApiResponse<CourseResponse> {
        self.http
            .get(
                self.url(&format!("/courses/{}", id)),
                Auth::Bearer,
                "Failed to fetch course",
            )
            .await
    }

    /// Update a course (instructor)
    pub async fn update_course(
        &self,
        id: i64,
        payload: &UpdateCourseRequest,
    ) -> ApiResponse<CourseResponse> {
        self.http
            .put(
                self.url(&format!("/courses/{}", id)),
                payload,
                Auth::Bearer,
                "Failed to update course",
            )
            .await
    }

    /// Delete a course (instructor)
    pub async fn delete_course(&self, id: i64) -> ApiResponse<Value> {
        self.http
            .delete(
                self.url(&format!("/courses/{}", id)),
                Auth::Bearer,
                "Failed to delete course",
            )
            .await
    }

    /// List an instructor's courses
    pub async fn courses_by_instructor(
        &self,
        instructor_id: &str,
        query: &CourseListQuery,
    ) -> ApiResponse<Vec<CourseResponse>> {
        self.http
            .get_query(
                self.url(&format!("/courses/instructor/{}", instructor_id)),
                query,
                Auth::Bearer,
                "Failed to fetch instructor courses",
            )
            .await
    }

    /// List the caller's courses
    pub async fn my_courses(&self, query: &CourseListQuery) -> ApiResponse<Vec<CourseResponse>> {
        self.http
            .get_query(
                self.url("/courses/my-courses"),
                query,
                Auth::Bearer,
                "Failed to fetch my courses",
            )
            .await
    }

    /// List published courses
    pub async fn published_courses(
        &self,
        query: &PublishedCourseQuery,
    ) -> ApiResponse<Vec<CourseResponse>> {
        self.http
            .get_query(
                self.url("/courses/published"),
                query,
                Auth::Bearer,
                "Failed to fetch published courses",
            )
            .await
    }

    /// Keyword search over courses
    pub async fn search_courses(&self, query: &CourseSearchQuery) -> ApiResponse<Vec<CourseResponse>> {
        self.http
            .get_query(
                self.url("/courses/search"),
                query,
                Auth::Bearer,
                "Failed to search courses",
            )
            .await
    }

    /// Publish a draft course
    pub async fn publish_course(&self, id: i64) -> ApiResponse<CourseResponse> {
        self.http
            .post_empty(
                self.url(&format!("/courses/{}/publish", id)),
                Auth::Bearer,
                "Failed to publish course",
            )
            .await
    }

    /// Archive a course
    pub async fn archive_course(&self, id: i64) -> ApiResponse<CourseResponse> {
        self.http
            .post_empty(
                self.url(&format!("/courses/{}/archive", id)),
                Auth::Bearer,
                "Failed to archive course",
            )
            .await
    }

    /// Enrollment statistics for one course
    pub async fn course_stats(&self, id: i64) -> ApiResponse<CourseStatsResponse> {
        self.http
            .get(
                self.url(&format!("/courses/{}/stats", id)),
                Auth::Bearer,
                "Failed to fetch course stats",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Chapters
    // ------------------------------------------------------------------

    /// Add a chapter to a course
    pub async fn create_chapter(
        &self,
        course_id: i64,
        payload: &CreateChapterRequest,
    ) -> ApiResponse<ChapterResponse> {
        self.http
            .post(
                self.url(&format!("/courses/{}/chapters", course_id)),
                payload,
                Auth::Bearer,
                "Failed to create chapter",
            )
            .await
    }

    /// List a course's chapters
    pub async fn course_chapters(&self, course_id: i64) -> ApiResponse<Vec<ChapterResponse>> {
        self.http
            .get(
                self.url(&format!("/courses/{}/chapters", course_id)),
                Auth::Bearer,
                "Failed to fetch chapters",
            )
            .await
    }

    /// Fetch one chapter
    pub async fn chapter(&self, id: i64) -> ApiResponse<ChapterResponse> {
        self.http
            .get(
                self.url(&format!("/chapters/{}", id)),
                Auth::Bearer,
                "Failed to fetch chapter",
            )
            .await
    }

    /// Update a chapter
    pub async fn update_chapter(
        &self,
        id: i64,
        payload: &CreateChapterRequest,
    ) -> ApiResponse<ChapterResponse> {
        self.http
            .put(
                self.url(&format!("/chapters/{}", id)),
                payload,
                Auth::Bearer,
                "Failed to update chapter",
            )
            .await
    }

    /// Delete a chapter
    pub async fn delete_chapter(&self, id: i64) -> ApiResponse<Value> {
        self.http
            .delete(
                self.url(&format!("/chapters/{}", id)),
                Auth::Bearer,
                "Failed to delete chapter",
            )
            .await
    }

    /// Reorder a course's chapters
    pub async fn reorder_chapters(
        &self,
        course_id: i64,
        payload: &ReorderChaptersRequest,
    ) -> ApiResponse<Vec<ChapterResponse>> {
        self.http
            .put(
                self.url(&format!("/courses/{}/chapters/reorder", course_id)),
                payload,
                Auth::Bearer,
                "Failed to reorder chapters",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Lessons
    // ------------------------------------------------------------------

    /// Add a lesson to a chapter
    pub async fn create_lesson(
        &self,
        chapter_id: i64,
        payload: &CreateLessonRequest,
    ) -> ApiResponse<LessonResponse> {
        self.http
            .post(
                self.url(&format!("/chapters/{}/lessons", chapter_id)),
                payload,
                Auth::Bearer,
                "Failed to create lesson",
            )
            .await
    }

    /// List a chapter's lessons
    pub async fn lessons(&self, chapter_id: i64) -> ApiResponse<Vec<LessonResponse>> {
        self.http
            .get(
                self.url(&format!("/chapters/{}/lessons", chapter_id)),
                Auth::Bearer,
                "Failed to fetch lessons",
            )
            .await
    }

    /// Fetch one lesson
    pub async fn lesson(&self, id: i64) -> ApiResponse<LessonResponse> {
        self.http
            .get(
                self.url(&format!("/lessons/{}", id)),
                Auth::Bearer,
                "Failed to fetch lesson",
            )
            .await
    }

    /// Update a lesson
    pub async fn update_lesson(
        &self,
        id: i64,
        payload: &CreateLessonRequest,
    ) -> ApiResponse<LessonResponse> {
        self.http
            .put(
                self.url(&format!("/lessons/{}", id)),
                payload,
                Auth::Bearer,
                "Failed to update lesson",
            )
            .await
    }

    /// Delete a lesson
    pub async fn delete_lesson(&self, id: i64) -> ApiResponse<Value> {
        self.http
            .delete(
                self.url(&format!("/lessons/{}", id)),
                Auth::Bearer,
                "Failed to delete lesson",
            )
            .await
    }

    // ------------------------------------------------------------------
    // Enrollments
    // ------------------------------------------------------------------

    /// Enroll the caller in a course
    pub async fn enroll(&self, course_id: i64) -> ApiResponse<EnrollmentResponse> {
        self.http
            .post_empty(
                self.url(&format!("/courses/{}/enroll", course_id)),
                Auth::Bearer,
                "Failed to enroll in course",
            )
            .await
    }

    /// List the caller's enrollments
    pub async fn my_enrollments(&self, query: &MyEnrollmentQuery) -> ApiResponse<Vec<EnrollmentResponse>> {
        self.http
            .get_query(
                self.url("/courses/my-courses"),
                query,
                Auth::Bearer,
                "Failed to fetch my enrollments",
            )
            .await
    }

    /// Aggregate statistics over the caller's courses
    pub async fn my_course_stats(&self) -> ApiResponse<CourseStatistics> {
        self.http
            .get(
                self.url("/courses/my-courses/stats"),
                Auth::Bearer,
                "Failed to fetch my course stats",
            )
            .await
    }

    /// List a course's enrollments (instructor)
    pub async fn course_enrollments(
        &self,
        course_id: i64,
        query: &EnrollmentListQuery,
    ) -> ApiResponse<Vec<EnrollmentResponse>> {
        self.http
            .get_query(
                self.url(&format!("/courses/{}/enrollments", course_id)),
                query,
                Auth::Bearer,
                "Failed to fetch course enrollments",
            )
            .await
    }

    /// Update the caller's progress in percent
    pub async fn update_progress(
        &self,
        enrollment_id: i64,
        progress: f64,
    ) -> ApiResponse<EnrollmentResponse> {
        self.http
            .patch(
                self.url(&format!("/enrollments/{}/progress", enrollment_id)),
                &EnrollmentProgressRequest { progress },
                Auth::Bearer,
                "Failed to update enrollment progress",
            )
            .await
    }

    /// Fetch one enrollment
    pub async fn enrollment(&self, enrollment_id: i64) -> ApiResponse<EnrollmentResponse> {
        self.http
            .get(
                self.url(&format!("/enrollments/{}", enrollment_id)),
                Auth::Bearer,
                "Failed to fetch enrollment",
            )
            .await
    }

    /// Drop an enrollment
    pub async fn drop_enrollment(&self, enrollment_id: i64) -> ApiResponse<Value> {
        self.http
            .delete(
                self.url(&format!("/enrollments/{}", enrollment_id)),
                Auth::Bearer,
                "Failed to drop enrollment",
            )
            .await
    }

    /// Check whether the caller is enrolled in a course
    pub async fn check_enrollment(&self, course_id: i64) -> ApiResponse<EnrollmentStatusResponse> {
        self.http
            .get(
                self.url(&format!("/courses/{}/is-enrolled", course_id)),
                Auth::Bearer,
                "Failed to check enrollment status",
            )
            .await
    }

    /// List a student's enrollments (instructor/admin)
    pub async fn enrollments_by_student(&self, student_id: &str) -> ApiResponse<Vec<EnrollmentResponse>> {
        self.http
            .get(
                self.url(&format!("/enrollments/student/{}", student_id)),
                Auth::Bearer,
                "Failed to fetch student enrollments",
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_record_from_envelope_payload() {
        let course: CourseResponse = serde_json::from_str(
            r#"{
                "id": 3,
                "title": "Software Engineering",
                "status": "PUBLISHED",
                "visibility": "PUBLIC",
                "credits": 4,
                "enrolled": true,
                "progress": 62.5,
                "tags": [{"id": 1, "name": "SE", "type": "TOPIC"}]
            }"#,
        )
        .unwrap();

        assert_eq!(course.status, Some(CourseStatus::Published));
        assert_eq!(course.tags.len(), 1);
        assert_eq!(course.tags[0].r#type, Some(TagType::Topic));
        assert!(course.prerequisites.is_empty());
    }

    #[test]
    fn test_query_skips_unset_fields() {
        let query = CourseListQuery {
            page: Some(0),
            size: Some(20),
            ..Default::default()
        };

        let encoded = serde_urlencoded_probe(&query);
        assert!(encoded.contains("page=0"));
        assert!(encoded.contains("size=20"));
        assert!(!encoded.contains("semester"));
        assert!(!encoded.contains("enrollmentStatus"));
    }

    #[test]
    fn test_enrollment_status_query_value() {
        let query = MyEnrollmentQuery {
            status: Some(EnrollmentStatus::Active),
            q: None,
        };

        let encoded = serde_urlencoded_probe(&query);
        assert_eq!(encoded, "status=ACTIVE");
    }

    #[test]
    fn test_lesson_request_wire_format() {
        let payload = CreateLessonRequest {
            title: "Intro".to_string(),
            r#type: LessonType::Video,
            description: None,
            mastery_threshold: Some(80),
            content: None,
            estimated_duration: Some(15),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "VIDEO");
        assert_eq!(json["masteryThreshold"], 80);
        assert!(json.get("description").is_none());
    }

    fn serde_urlencoded_probe<Q: Serialize>(query: &Q) -> String {
        let client = reqwest::Client::new();
        let req = client
            .get("http://localhost/probe")
            .query(query)
            .build()
            .unwrap();
        req.url().query().unwrap_or_default().to_string()
    }
}
