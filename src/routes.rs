use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    email::{send_email, size_profile_email, welcome_email},
    error::AppError,
    models::{LeadPayload, MeasurementPayload, SizeEmailPayload, SizeLabels, WelcomeEmailPayload},
    sheets::{append_lead_row, update_measurement_row},
    sizing::{format_jacket_size, format_pant_size},
    state::AppState,
};

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "success": true, "message": "Funnel backend is running." }))
}

pub async fn submit_page1_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeadPayload>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let (row_id, row_number) = append_lead_row(&state, &payload).await?;
    info!("Lead captured in row {row_number}");

    Ok(Json(json!({
        "success": true,
        "rowId": row_id,
        "rowNumber": row_number,
    })))
}

pub async fn submit_page2_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MeasurementPayload>,
) -> Result<Json<Value>, AppError> {
    let measurements = payload.validate()?;

    // Computed once here; the sheet row and the confirmation email both read
    // these exact strings.
    let sizes = SizeLabels {
        jacket: format_jacket_size(
            &measurements.bust,
            &measurements.jacket_length,
            &measurements.jacket_width,
        ),
        pant: format_pant_size(
            &measurements.pant_waist,
            &measurements.pants_length,
            &measurements.pants_width,
        ),
    };

    let row_number = update_measurement_row(&state, &payload.row_id, measurements, &sizes).await?;
    info!("Measurements locked in for row {row_number}");

    Ok(Json(json!({
        "success": true,
        "rowNumber": row_number,
        "sizes": sizes,
    })))
}

pub async fn email_page1_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WelcomeEmailPayload>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let email = welcome_email(&payload.email, &payload.name, &payload.page2_url);
    send_email(&state, email).await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn email_page2_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SizeEmailPayload>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let email = size_profile_email(
        &payload.email,
        &payload.jacket_size,
        &payload.pant_size,
        &payload.size_chart_url,
        &payload.socials,
    );
    send_email(&state, email).await?;

    Ok(Json(json!({ "success": true })))
}
