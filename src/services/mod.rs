pub mod attendance_service;
pub mod catalog_service;
pub mod enrollment_service;
pub mod people_service;
pub mod report_service;
pub mod schedule_service;
pub mod session_service;

pub use attendance_service::AttendanceService;
pub use catalog_service::CatalogService;
pub use enrollment_service::EnrollmentService;
pub use people_service::PeopleService;
pub use report_service::ReportService;
pub use schedule_service::ScheduleService;
pub use session_service::SessionService;
