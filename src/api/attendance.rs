use actix_web::{HttpResponse, web};
use tracing::debug;

use super::{render, see_other};
use crate::{
    client::HrmApi,
    forms::{SubmitOutcome, attendance::AttendanceInput},
    model::attendance::AttendanceFilter,
    pages::{Intent, IntentQuery, attendance::AttendancePage},
    shell::Tab,
    views,
};

async fn mounted<B: HrmApi>(api: &B, filter: AttendanceFilter) -> AttendancePage {
    let mut page = AttendancePage::new();
    page.mount(api, filter).await;
    page
}

/// Back to the list, keeping whatever filter the page was showing.
fn page_or_redirect(page: &AttendancePage, done: bool) -> actix_web::Result<HttpResponse> {
    if done {
        let location = views::link(
            &Tab::Attendance.href(),
            &page.filter().to_query_string(),
            &Intent::None,
        );
        Ok(see_other(&location))
    } else {
        render(views::attendance(page))
    }
}

/// GET /attendance[?employee_id&date_from&date_to][&form=create|edit=ID|delete=ID]
pub async fn attendance_page<B: HrmApi + 'static>(
    api: web::Data<B>,
    filter: web::Query<AttendanceFilter>,
    query: web::Query<IntentQuery>,
) -> actix_web::Result<HttpResponse> {
    let mut page = mounted(api.get_ref(), filter.into_inner()).await;
    page.apply(query.intent());
    render(views::attendance(&page))
}

/// POST /attendance[?filter]
pub async fn create_attendance<B: HrmApi + 'static>(
    api: web::Data<B>,
    filter: web::Query<AttendanceFilter>,
    form: web::Form<AttendanceInput>,
) -> actix_web::Result<HttpResponse> {
    let mut page = mounted(api.get_ref(), filter.into_inner()).await;

    if !page.open_create() {
        return render(views::attendance(&page));
    }

    let outcome = page.submit(api.get_ref(), form.into_inner()).await;
    debug!(?outcome, "Attendance create submitted");
    page_or_redirect(&page, outcome == Some(SubmitOutcome::Saved))
}

/// POST /attendance/{id}[?filter]
pub async fn update_attendance<B: HrmApi + 'static>(
    api: web::Data<B>,
    path: web::Path<String>,
    filter: web::Query<AttendanceFilter>,
    form: web::Form<AttendanceInput>,
) -> actix_web::Result<HttpResponse> {
    let id = path.into_inner();
    let mut page = mounted(api.get_ref(), filter.into_inner()).await;

    if !page.open_edit(&id) {
        return render(views::attendance(&page));
    }

    let outcome = page.submit(api.get_ref(), form.into_inner()).await;
    debug!(?outcome, id = %id, "Attendance update submitted");
    page_or_redirect(&page, outcome == Some(SubmitOutcome::Saved))
}

/// POST /attendance/{id}/delete[?filter]
pub async fn delete_attendance<B: HrmApi + 'static>(
    api: web::Data<B>,
    path: web::Path<String>,
    filter: web::Query<AttendanceFilter>,
) -> actix_web::Result<HttpResponse> {
    let id = path.into_inner();
    let mut page = mounted(api.get_ref(), filter.into_inner()).await;

    page.request_delete(&id);
    let deleted = page.confirm_delete(api.get_ref()).await;
    page_or_redirect(&page, matches!(deleted, Some(Ok(()))))
}
