//! Mock data layer standing in for the school backend.
//! Every call is gated on the live session token, exactly as the remote API
//! rejects a request without its bearer header. Data comes from the fixed
//! tables in [`fixtures`]; the pure helpers below carry the derivations the
//! views need (summaries, filters, bands, greetings).

pub mod fixtures;

use std::sync::Arc;

use chrono::Weekday;
use serde::Serialize;

use crate::error::{PortalError, PortalResult};
use crate::identity::{ChildSummary, SessionManager};

pub use fixtures::{
    Announcement, ClassGrades, DocumentKind, DocumentRequest, DocumentStatus, FinancialRecord,
    GradeEntry, PaymentStatus, Registration, RegistrationStatus, ScheduleDay, SchedulePeriod,
    StudentGrades, StudentRecord, SubjectGrades, Urgency,
};

/// Token-gated access to the mock backend.
pub struct PortalApi {
    session: Arc<SessionManager>,
}

impl PortalApi {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }

    // The request interceptor: no token, no call.
    fn bearer(&self) -> PortalResult<String> {
        self.session
            .token()
            .ok_or_else(|| PortalError::unauthorized("missing bearer token"))
    }

    pub async fn student_schedule(&self) -> PortalResult<Vec<ScheduleDay>> {
        self.bearer()?;
        Ok(fixtures::student_schedule())
    }

    pub async fn teacher_schedule(&self) -> PortalResult<Vec<ScheduleDay>> {
        self.bearer()?;
        Ok(fixtures::teacher_schedule())
    }

    pub async fn student_grades(&self) -> PortalResult<Vec<SubjectGrades>> {
        self.bearer()?;
        Ok(fixtures::student_grades())
    }

    pub async fn class_grades(&self, class_name: &str) -> PortalResult<ClassGrades> {
        self.bearer()?;
        Ok(fixtures::class_grades(class_name))
    }

    pub async fn announcements(&self) -> PortalResult<Vec<Announcement>> {
        self.bearer()?;
        Ok(fixtures::announcements())
    }

    pub async fn finance_records(&self) -> PortalResult<Vec<FinancialRecord>> {
        self.bearer()?;
        Ok(fixtures::finance_records())
    }

    pub async fn students(&self) -> PortalResult<Vec<StudentRecord>> {
        self.bearer()?;
        Ok(fixtures::students())
    }

    pub async fn registrations(&self) -> PortalResult<Vec<Registration>> {
        self.bearer()?;
        Ok(fixtures::registrations())
    }

    pub async fn documents(&self) -> PortalResult<Vec<DocumentRequest>> {
        self.bearer()?;
        Ok(fixtures::documents())
    }

    /// One of the signed-in guardian's children, by child id.
    pub async fn child(&self, child_id: &str) -> PortalResult<ChildSummary> {
        self.bearer()?;
        let user = self
            .session
            .current_user()
            .ok_or_else(|| PortalError::unauthorized("no session"))?;
        user.linked_children()
            .iter()
            .find(|c| c.id == child_id)
            .cloned()
            .ok_or_else(|| PortalError::not_found(format!("child {}", child_id)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinanceSummary {
    pub paid: f64,
    pub pending: f64,
    pub overdue: f64,
    pub total: f64,
}

pub fn finance_summary(records: &[FinancialRecord]) -> FinanceSummary {
    let sum_of = |status: PaymentStatus| {
        records
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.amount)
            .sum::<f64>()
    };
    let paid = sum_of(PaymentStatus::Paid);
    let pending = sum_of(PaymentStatus::Pending);
    let overdue = sum_of(PaymentStatus::Overdue);
    FinanceSummary { paid, pending, overdue, total: paid + pending + overdue }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationCounts {
    pub all: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub completed: usize,
}

/// Status tallies for one academic year.
pub fn registration_counts(records: &[Registration], year: &str) -> RegistrationCounts {
    let in_year: Vec<&Registration> = records.iter().filter(|r| r.academic_year == year).collect();
    let count_of = |status: RegistrationStatus| in_year.iter().filter(|r| r.status == status).count();
    RegistrationCounts {
        all: in_year.len(),
        pending: count_of(RegistrationStatus::Pending),
        approved: count_of(RegistrationStatus::Approved),
        rejected: count_of(RegistrationStatus::Rejected),
        completed: count_of(RegistrationStatus::Completed),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentCounts {
    pub all: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub rejected: usize,
}

pub fn document_counts(records: &[DocumentRequest]) -> DocumentCounts {
    let count_of = |status: DocumentStatus| records.iter().filter(|r| r.status == status).count();
    DocumentCounts {
        all: records.len(),
        pending: count_of(DocumentStatus::Pending),
        processing: count_of(DocumentStatus::Processing),
        completed: count_of(DocumentStatus::Completed),
        rejected: count_of(DocumentStatus::Rejected),
    }
}

/// Roster search: name or enrollment id contains the query
/// (case-insensitive), optionally narrowed to one class.
pub fn filter_students(records: &[StudentRecord], query: &str, class: Option<&str>) -> Vec<StudentRecord> {
    let q = query.to_lowercase();
    records
        .iter()
        .filter(|s| {
            let matches_search = s.name.to_lowercase().contains(&q)
                || s.enrollment_id.to_lowercase().contains(&q);
            let matches_class = class.map_or(true, |c| s.class == c);
            matches_search && matches_class
        })
        .cloned()
        .collect()
}

pub fn filter_registrations(
    records: &[Registration],
    query: &str,
    status: Option<RegistrationStatus>,
    year: &str,
) -> Vec<Registration> {
    let q = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            let matches_search =
                r.student_name.to_lowercase().contains(&q) || r.id.to_lowercase().contains(&q);
            let matches_status = status.map_or(true, |s| r.status == s);
            matches_search && matches_status && r.academic_year == year
        })
        .cloned()
        .collect()
}

pub fn filter_documents(
    records: &[DocumentRequest],
    query: &str,
    status: Option<DocumentStatus>,
) -> Vec<DocumentRequest> {
    let q = query.to_lowercase();
    records
        .iter()
        .filter(|doc| {
            let matches_search = doc.student_name.to_lowercase().contains(&q)
                || doc.id.to_lowercase().contains(&q)
                || doc.type_name.to_lowercase().contains(&q);
            let matches_status = status.map_or(true, |s| doc.status == s);
            matches_search && matches_status
        })
        .cloned()
        .collect()
}

/// Mean of the per-subject averages; 0 when there are no subjects yet.
pub fn overall_average(subjects: &[SubjectGrades]) -> f64 {
    if subjects.is_empty() {
        return 0.0;
    }
    subjects.iter().map(|s| s.average).sum::<f64>() / subjects.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformanceBands {
    pub good: usize,
    pub average: usize,
    pub risk: usize,
}

/// Subjects bucketed by average: good at 8 and above, at risk below 6.
pub fn performance_bands(subjects: &[SubjectGrades]) -> PerformanceBands {
    PerformanceBands {
        good: subjects.iter().filter(|s| s.average >= 8.0).count(),
        average: subjects.iter().filter(|s| s.average >= 6.0 && s.average < 8.0).count(),
        risk: subjects.iter().filter(|s| s.average < 6.0).count(),
    }
}

/// Important announcements, newest first, capped at three.
pub fn important_recent(announcements: &[Announcement]) -> Vec<Announcement> {
    let mut important: Vec<Announcement> =
        announcements.iter().filter(|a| a.important).cloned().collect();
    important.sort_by(|a, b| b.date.cmp(&a.date));
    important.truncate(3);
    important
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Day the schedule view opens on: today, or Monday on weekends.
pub fn school_day_for(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sat | Weekday::Sun => "Segunda-feira",
        other => weekday_name(other),
    }
}

/// Periods for one named day; empty when the day has no classes.
pub fn periods_for<'a>(days: &'a [ScheduleDay], day: &str) -> &'a [SchedulePeriod] {
    days.iter()
        .find(|d| d.day == day)
        .map(|d| d.periods.as_slice())
        .unwrap_or(&[])
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    if (5..12).contains(&hour) {
        "Bom dia"
    } else if (12..18).contains(&hour) {
        "Boa tarde"
    } else {
        "Boa noite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{AuthProvider, MockDirectory, Role};
    use crate::storage::MemStore;

    fn api_with(email: Option<&str>) -> PortalApi {
        let session = Arc::new(SessionManager::new(
            Arc::new(MockDirectory::demo()),
            Arc::new(MemStore::new()),
        ));
        session.restore();
        if let Some(email) = email {
            session.login(email, "senha123").unwrap();
        }
        PortalApi::new(session)
    }

    #[tokio::test]
    async fn calls_without_a_session_are_unauthorized() {
        let api = api_with(None);
        let err = api.student_schedule().await.unwrap_err();
        assert_eq!(err.code_str(), "unauthorized");
        assert_eq!(api.announcements().await.unwrap_err().code_str(), "unauthorized");
        assert_eq!(api.child("1").await.unwrap_err().code_str(), "unauthorized");
    }

    #[tokio::test]
    async fn signed_in_calls_return_data() {
        let api = api_with(Some("aluno@escola.com"));
        assert_eq!(api.student_schedule().await.unwrap().len(), 5);
        assert_eq!(api.student_grades().await.unwrap().len(), 5);
        assert_eq!(api.announcements().await.unwrap().len(), 6);
        let class = api.class_grades("9º Ano B").await.unwrap();
        assert_eq!(class.class_name, "9º Ano B");
    }

    #[tokio::test]
    async fn child_lookup_resolves_only_linked_children() {
        let api = api_with(Some("responsavel@escola.com"));
        let child = api.child("6").await.unwrap();
        assert_eq!(child.name, "Ana Clara Mendes");
        assert_eq!(api.child("99").await.unwrap_err().code_str(), "not_found");

        let student_api = api_with(Some("aluno@escola.com"));
        assert_eq!(student_api.child("6").await.unwrap_err().code_str(), "not_found");
    }

    #[test]
    fn finance_summary_adds_up() {
        let s = finance_summary(&fixtures::finance_records());
        assert_eq!(s.paid, 1470.0);
        assert_eq!(s.pending, 800.0);
        assert_eq!(s.overdue, 180.0);
        assert_eq!(s.total, 2450.0);
    }

    #[test]
    fn registration_counts_are_per_year() {
        let c = registration_counts(&fixtures::registrations(), "2023/2024");
        assert_eq!(c.all, 5);
        assert_eq!(c.pending, 2);
        assert_eq!(c.approved, 1);
        assert_eq!(c.rejected, 1);
        assert_eq!(c.completed, 1);

        let none = registration_counts(&fixtures::registrations(), "2024/2025");
        assert_eq!(none.all, 0);
    }

    #[test]
    fn document_counts_cover_every_status() {
        let c = document_counts(&fixtures::documents());
        assert_eq!((c.all, c.pending, c.processing, c.completed, c.rejected), (5, 2, 1, 1, 1));
    }

    #[test]
    fn student_filter_matches_name_enrollment_and_class() {
        let roster = fixtures::students();
        assert_eq!(filter_students(&roster, "silva", None).len(), 1);
        assert_eq!(filter_students(&roster, "2023000", None).len(), 5);
        assert_eq!(filter_students(&roster, "", Some("8º Ano B")).len(), 2);
        let hit = filter_students(&roster, "ferreira", Some("8º Ano B"));
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].name, "Lucas Ferreira");
        assert!(filter_students(&roster, "ferreira", Some("9º Ano A")).is_empty());
    }

    #[test]
    fn registration_filter_combines_query_status_and_year() {
        let regs = fixtures::registrations();
        assert_eq!(filter_registrations(&regs, "reg2023", None, "2023/2024").len(), 5);
        assert_eq!(
            filter_registrations(&regs, "", Some(RegistrationStatus::Pending), "2023/2024").len(),
            2
        );
        let hit = filter_registrations(&regs, "silva", None, "2023/2024");
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].student_name, "Roberto Silva");
        assert!(filter_registrations(&regs, "", None, "2024/2025").is_empty());
    }

    #[test]
    fn document_filter_searches_type_names_too() {
        let docs = fixtures::documents();
        assert_eq!(filter_documents(&docs, "histórico", None).len(), 1);
        assert_eq!(filter_documents(&docs, "doc2023", None).len(), 5);
        assert_eq!(filter_documents(&docs, "", Some(DocumentStatus::Pending)).len(), 2);
    }

    #[test]
    fn overall_average_of_demo_grades() {
        let avg = overall_average(&fixtures::student_grades());
        assert!((avg - 8.5).abs() < 1e-9);
        assert_eq!(overall_average(&[]), 0.0);
    }

    #[test]
    fn performance_band_boundaries() {
        let mk = |avg: f64| SubjectGrades {
            subject: "X".into(),
            teacher: "Y".into(),
            grades: vec![],
            average: avg,
        };
        let subjects = [mk(8.0), mk(7.9), mk(6.0), mk(5.9)];
        let bands = performance_bands(&subjects);
        assert_eq!((bands.good, bands.average, bands.risk), (1, 2, 1));
    }

    #[test]
    fn important_recent_takes_three_newest() {
        let picked = important_recent(&fixtures::announcements());
        let ids: Vec<&str> = picked.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "4"]);
    }

    #[test]
    fn greeting_boundaries() {
        assert_eq!(greeting_for_hour(4), "Boa noite");
        assert_eq!(greeting_for_hour(5), "Bom dia");
        assert_eq!(greeting_for_hour(11), "Bom dia");
        assert_eq!(greeting_for_hour(12), "Boa tarde");
        assert_eq!(greeting_for_hour(17), "Boa tarde");
        assert_eq!(greeting_for_hour(18), "Boa noite");
        assert_eq!(greeting_for_hour(0), "Boa noite");
    }

    #[test]
    fn weekends_open_on_monday() {
        assert_eq!(school_day_for(Weekday::Sat), "Segunda-feira");
        assert_eq!(school_day_for(Weekday::Sun), "Segunda-feira");
        assert_eq!(school_day_for(Weekday::Wed), "Quarta-feira");

        let days = fixtures::student_schedule();
        assert!(periods_for(&days, "Domingo").is_empty());
        assert_eq!(periods_for(&days, "Sexta-feira").len(), 5);
    }

    #[test]
    fn role_fixture_consistency() {
        // The demo student's class exists in the secretary roster.
        let dir = MockDirectory::demo();
        let student = dir.authenticate("aluno@escola.com", "senha123").unwrap();
        assert_eq!(student.role, Role::Student);
        let class = student.class.unwrap();
        assert!(fixtures::students().iter().any(|s| s.class == class));
    }
}
