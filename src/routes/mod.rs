pub mod auth;

pub mod students;

pub mod teachers;

pub mod subjects;

pub mod classrooms;

pub mod enrollments;

pub mod dashboard;

pub mod frontend;

#[cfg(test)]
mod tests;

pub use auth::configure_auth_routes;
pub use classrooms::configure_classroom_routes;
pub use dashboard::configure_dashboard_routes;
pub use enrollments::configure_enrollment_routes;
pub use frontend::configure_frontend_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use teachers::configure_teacher_routes;

use actix_web::web;

/// 注册全部 API 路由，前端路由放在最后作为 fallback
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_student_routes)
        .configure(configure_teacher_routes)
        .configure(configure_subject_routes)
        .configure(configure_classroom_routes)
        .configure(configure_enrollment_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_frontend_routes);
}
