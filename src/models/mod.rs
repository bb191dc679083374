pub mod attendance;
pub mod course;
pub mod people;
pub mod report;
pub mod schedule;
pub mod session;

pub use attendance::{
    Attendance, AttendanceRecord, AttendanceResponse, AttendanceStatus, MarkAttendanceRequest,
};
pub use course::{
    Classroom, Course, Department, NewClassroomRequest, NewCourseRequest, NewDepartmentRequest,
    NewOfferedCourseRequest, OfferedCourse, UpdateCourseRequest,
};
pub use people::{
    EnrolledStudent, Enrollment, EnrollmentRequest, EnrollmentStatus, NewStudentRequest,
    NewTeacherRequest, Student, Teacher, UpdateEnrollmentRequest,
};
pub use report::{AttendanceReport, DashboardStats, ReportRecord, ReportSummary, ReportType, YearMonth};
pub use schedule::{ClassSchedule, ConflictQuery, DayOfWeek, ScheduleRequest};
pub use session::{AttendanceSession, SessionRequest};
