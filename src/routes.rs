use crate::{
    api::{attendance, employee, shell},
    client::HrmApi,
};
use actix_web::web;

pub fn configure<B: HrmApi + 'static>(cfg: &mut web::ServiceConfig, api: web::Data<B>) {
    cfg.app_data(api);

    cfg.route("/", web::get().to(shell::index));

    cfg.service(
        web::scope("/employees")
            // /employees
            .service(
                web::resource("")
                    .route(web::get().to(employee::employees_page::<B>))
                    .route(web::post().to(employee::create_employee::<B>)),
            )
            // /employees/{employee_id}
            .service(
                web::resource("/{employee_id}").route(web::post().to(employee::update_employee::<B>)),
            )
            // /employees/{employee_id}/delete
            .service(
                web::resource("/{employee_id}/delete")
                    .route(web::post().to(employee::delete_employee::<B>)),
            ),
    );

    cfg.service(
        web::scope("/attendance")
            // /attendance
            .service(
                web::resource("")
                    .route(web::get().to(attendance::attendance_page::<B>))
                    .route(web::post().to(attendance::create_attendance::<B>)),
            )
            // /attendance/{id}
            .service(web::resource("/{id}").route(web::post().to(attendance::update_attendance::<B>)))
            // /attendance/{id}/delete
            .service(
                web::resource("/{id}/delete").route(web::post().to(attendance::delete_attendance::<B>)),
            ),
    );
}
