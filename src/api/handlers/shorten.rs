//! `POST /shorten` handler.

use axum::{Form, Json, extract::State};

use crate::api::dto::{ShortenForm, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

pub async fn shorten_handler(
    State(st): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Result<Json<ShortenResponse>, AppError> {
    let mapping = st
        .shortener
        .shorten(&form.original_url, form.expiry_date)
        .await?;

    Ok(Json(ShortenResponse {
        shortened_url: st.short_url(&mapping.short_code),
        short_code: mapping.short_code,
        expiry_time: mapping.expiry_time,
    }))
}
