use actix_web::{HttpResponse, web};
use tracing::debug;

use super::{render, see_other};
use crate::{
    client::HrmApi,
    forms::{SubmitOutcome, employee::EmployeeInput},
    pages::{IntentQuery, employee::EmployeePage},
    shell::Tab,
    views,
};

async fn mounted<B: HrmApi>(api: &B) -> EmployeePage {
    let mut page = EmployeePage::new();
    page.mount(api).await;
    page
}

fn page_or_redirect(page: &EmployeePage, done: bool) -> actix_web::Result<HttpResponse> {
    if done {
        Ok(see_other(&Tab::Employees.href()))
    } else {
        render(views::employees(page))
    }
}

/// GET /employees[?form=create|edit=ID|delete=ID]
pub async fn employees_page<B: HrmApi + 'static>(
    api: web::Data<B>,
    query: web::Query<IntentQuery>,
) -> actix_web::Result<HttpResponse> {
    let mut page = mounted(api.get_ref()).await;
    page.apply(api.get_ref(), query.intent()).await;
    render(views::employees(&page))
}

/// POST /employees
pub async fn create_employee<B: HrmApi + 'static>(
    api: web::Data<B>,
    form: web::Form<EmployeeInput>,
) -> actix_web::Result<HttpResponse> {
    let mut page = mounted(api.get_ref()).await;
    page.open_create();

    let outcome = page.submit(api.get_ref(), form.into_inner()).await;
    debug!(?outcome, "Employee create submitted");
    page_or_redirect(&page, outcome == Some(SubmitOutcome::Saved))
}

/// POST /employees/{employee_id}
pub async fn update_employee<B: HrmApi + 'static>(
    api: web::Data<B>,
    path: web::Path<String>,
    form: web::Form<EmployeeInput>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    let mut page = mounted(api.get_ref()).await;

    if !page.open_edit(api.get_ref(), &employee_id).await {
        return render(views::employees(&page));
    }

    let outcome = page.submit(api.get_ref(), form.into_inner()).await;
    debug!(?outcome, employee_id = %employee_id, "Employee update submitted");
    page_or_redirect(&page, outcome == Some(SubmitOutcome::Saved))
}

/// POST /employees/{employee_id}/delete
pub async fn delete_employee<B: HrmApi + 'static>(
    api: web::Data<B>,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    let mut page = mounted(api.get_ref()).await;

    page.request_delete(&employee_id);
    let deleted = page.confirm_delete(api.get_ref()).await;
    page_or_redirect(&page, matches!(deleted, Some(Ok(()))))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, http::header, test, web::Data};

    use crate::client::memory::InMemoryBackend;
    use crate::model::employee::Employee;
    use crate::routes;

    fn ann() -> Employee {
        Employee {
            employee_id: "E1".into(),
            full_name: "Ann".into(),
            email: "a@b.com".into(),
            department: "Eng".into(),
        }
    }

    fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn root_redirects_to_employees() {
        let api = Data::new(InMemoryBackend::new());
        let app = test::init_service(
            App::new().configure(|cfg| routes::configure(cfg, api.clone())),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/employees");
    }

    #[actix_web::test]
    async fn list_renders_rows_as_html() {
        let api = Data::new(InMemoryBackend::with_employees(vec![ann()]));
        let app = test::init_service(
            App::new().configure(|cfg| routes::configure(cfg, api.clone())),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/employees").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        let body = test::read_body(resp).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("HRMS Lite"));
        assert!(body.contains("a@b.com"));
        assert!(body.contains("/employees?edit=E1"));
    }

    #[actix_web::test]
    async fn empty_list_shows_placeholder() {
        let api = Data::new(InMemoryBackend::new());
        let app = test::init_service(
            App::new().configure(|cfg| routes::configure(cfg, api.clone())),
        )
        .await;

        let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/employees").to_request()).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("No employees found"));
        assert!(body.contains("Get started by adding a new employee."));
    }

    #[actix_web::test]
    async fn create_intent_opens_form() {
        let api = Data::new(InMemoryBackend::new());
        let app = test::init_service(
            App::new().configure(|cfg| routes::configure(cfg, api.clone())),
        )
        .await;

        let req = test::TestRequest::get().uri("/employees?form=create").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("Add New Employee"));
        assert!(body.contains("Enter employee ID"));
    }

    #[actix_web::test]
    async fn valid_create_redirects_and_stores() {
        let api = Data::new(InMemoryBackend::new());
        let app = test::init_service(
            App::new().configure(|cfg| routes::configure(cfg, api.clone())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/employees")
            .set_form([
                ("employee_id", "E1"),
                ("full_name", "Ann"),
                ("email", "a@b.com"),
                ("department", "Eng"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/employees");
        assert_eq!(api.employees(), vec![ann()]);
    }

    #[actix_web::test]
    async fn invalid_create_rerenders_with_field_error() {
        let api = Data::new(InMemoryBackend::new());
        let app = test::init_service(
            App::new().configure(|cfg| routes::configure(cfg, api.clone())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/employees")
            .set_form([
                ("employee_id", "E1"),
                ("full_name", ""),
                ("email", "nope"),
                ("department", "Eng"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("Full name is required"));
        assert!(body.contains("Email is invalid"));
        assert_eq!(api.calls(), vec!["GET /employees"]);
    }

    #[actix_web::test]
    async fn update_keeps_id_from_path() {
        let api = Data::new(InMemoryBackend::with_employees(vec![ann()]));
        let app = test::init_service(
            App::new().configure(|cfg| routes::configure(cfg, api.clone())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/employees/E1")
            .set_form([("full_name", "Ann Lee"), ("email", "a@b.com"), ("department", "Ops")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let stored = api.employees();
        assert_eq!(stored[0].employee_id, "E1");
        assert_eq!(stored[0].department, "Ops");
    }

    #[actix_web::test]
    async fn failed_delete_shows_banner() {
        let api = Data::new(InMemoryBackend::with_employees(vec![ann()]));
        let app = test::init_service(
            App::new().configure(|cfg| routes::configure(cfg, api.clone())),
        )
        .await;

        let req = test::TestRequest::post().uri("/employees/E9/delete").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("Failed to delete employee: Employee not found"));
        assert_eq!(api.employees(), vec![ann()]);
    }

    #[actix_web::test]
    async fn delete_intent_asks_for_confirmation() {
        let api = Data::new(InMemoryBackend::with_employees(vec![ann()]));
        let app = test::init_service(
            App::new().configure(|cfg| routes::configure(cfg, api.clone())),
        )
        .await;

        let req = test::TestRequest::get().uri("/employees?delete=E1").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("Are you sure you want to delete this employee?"));
        assert!(body.contains("/employees/E1/delete"));
        assert_eq!(api.employees().len(), 1);
    }
}
