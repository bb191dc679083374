mod common;

use attendance::error::AppError;
use attendance::models::{AttendanceStatus, ReportType, YearMonth};
use attendance::services::{AttendanceService, ReportService};
use chrono::Local;
use common::{add_course, add_student, date, mark, open_session, seed, setup_test_db};

#[tokio::test]
async fn test_daily_report_on_empty_day() {
    let pool = setup_test_db().await;
    seed(&pool).await;

    let report = ReportService::new(pool.clone())
        .daily_report(date(2025, 9, 1))
        .await
        .unwrap();

    assert_eq!(report.report_type, ReportType::Daily);
    assert_eq!(report.start_date, date(2025, 9, 1));
    assert_eq!(report.end_date, date(2025, 9, 1));
    assert!(report.records.is_empty());
    assert_eq!(report.summary.total_present, 0);
    assert_eq!(report.summary.attendance_rate, 0.0);
}

#[tokio::test]
async fn test_daily_report_counts_excused_in_denominator_only() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let carol = add_student(&pool, "2025-0003", "Carol", "Cruz").await;
    let day = date(2025, 9, 10);
    open_session(&pool, &fx, day).await;
    let attendance = AttendanceService::new(pool.clone());

    attendance.mark_attendance(mark(&fx, &fx.alice, day, "PRESENT")).await.unwrap();
    attendance.mark_attendance(mark(&fx, &fx.bob, day, "EXCUSED")).await.unwrap();
    attendance.mark_attendance(mark(&fx, &carol, day, "LATE")).await.unwrap();

    let report = ReportService::new(pool.clone()).daily_report(day).await.unwrap();
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.summary.total_present, 1);
    assert_eq!(report.summary.total_late, 1);
    assert_eq!(report.summary.total_absent, 0);
    assert_eq!(report.summary.attendance_rate, 66.7);
}

#[tokio::test]
async fn test_monthly_report_covers_whole_month_only() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let attendance = AttendanceService::new(pool.clone());

    for day in [date(2024, 2, 1), date(2024, 2, 29), date(2024, 3, 1)] {
        open_session(&pool, &fx, day).await;
        attendance.mark_attendance(mark(&fx, &fx.alice, day, "PRESENT")).await.unwrap();
    }

    let month: YearMonth = "2024-02".parse().unwrap();
    let report = ReportService::new(pool.clone()).monthly_report(month).await.unwrap();

    assert_eq!(report.report_type, ReportType::Monthly);
    assert_eq!(report.start_date, date(2024, 2, 1));
    assert_eq!(report.end_date, date(2024, 2, 29));
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.summary.attendance_rate, 100.0);
}

#[tokio::test]
async fn test_course_report_is_newest_first_and_spans_records() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let attendance = AttendanceService::new(pool.clone());
    let days = [date(2025, 9, 15), date(2025, 9, 1), date(2025, 9, 8)];

    for day in days {
        open_session(&pool, &fx, day).await;
        attendance.mark_attendance(mark(&fx, &fx.alice, day, "PRESENT")).await.unwrap();
    }
    attendance
        .mark_attendance(mark(&fx, &fx.bob, date(2025, 9, 8), "ABSENT"))
        .await
        .unwrap();

    let reports = ReportService::new(pool.clone());
    let report = reports.course_report(&fx.course.id).await.unwrap();

    assert_eq!(report.report_type, ReportType::Course);
    assert_eq!(report.start_date, date(2025, 9, 1));
    assert_eq!(report.end_date, date(2025, 9, 15));
    let dates: Vec<_> = report.records.iter().map(|r| r.date).collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]), "not sorted: {:?}", dates);
    assert_eq!(report.records[0].course_code, "CS101");
    assert_eq!(report.summary.attendance_rate, 75.0);

    let student = reports.student_report(&fx.bob.id).await.unwrap();
    assert_eq!(student.report_type, ReportType::Student);
    assert_eq!(student.records.len(), 1);
    assert_eq!(student.records[0].status, AttendanceStatus::Absent);
    assert_eq!(student.records[0].student_name, "Bob Santos");
}

#[tokio::test]
async fn test_course_report_without_records_uses_today() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let quiet = add_course(&pool, "ART9", "Sculpture").await;
    let today = Local::now().date_naive();

    let reports = ReportService::new(pool.clone());
    let report = reports.course_report(&quiet.id).await.unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.start_date, today);
    assert_eq!(report.end_date, today);

    assert!(matches!(
        reports.course_report("missing").await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        reports.student_report("missing").await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_dashboard_rate_uses_total_students() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    add_student(&pool, "2025-0003", "Carol", "Cruz").await;
    add_student(&pool, "2025-0004", "Dan", "Lim").await;
    let day = date(2025, 9, 22);
    open_session(&pool, &fx, day).await;
    let attendance = AttendanceService::new(pool.clone());

    attendance.mark_attendance(mark(&fx, &fx.alice, day, "PRESENT")).await.unwrap();
    attendance.mark_attendance(mark(&fx, &fx.bob, day, "LATE")).await.unwrap();

    let stats = ReportService::new(pool.clone())
        .dashboard_statistics_on(day)
        .await
        .unwrap();

    assert_eq!(stats.today_present, 1);
    assert_eq!(stats.today_late, 1);
    assert_eq!(stats.today_absent, 0);
    assert_eq!(stats.total_students, 4);
    assert_eq!(stats.total_teachers, 1);
    assert_eq!(stats.total_courses, 1);
    assert_eq!(stats.attendance_rate, 50.0);
}
