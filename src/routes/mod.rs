pub mod auth;

pub mod classes;

pub mod students;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use frontend::configure_frontend_routes;
pub use students::configure_students_routes;

use actix_web::web;

/// 注册全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_classes_routes)
        .configure(configure_students_routes)
        .configure(configure_frontend_routes);
}
