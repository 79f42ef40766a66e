//! `GET /` shorten form.

use askama::Template;
use askama_web::WebTemplate;

/// The input form. Pure presentation; everything interesting happens in
/// `POST /shorten`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate;

pub async fn index_handler() -> IndexTemplate {
    IndexTemplate
}
