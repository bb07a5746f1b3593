use actix_web::HttpResponse;

use super::see_other;
use crate::shell::Tab;

/// `/` lands on the default tab.
pub async fn index() -> HttpResponse {
    see_other(&Tab::default().href())
}
