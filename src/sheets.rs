//! # Google Sheets
//!
//! Row storage for the funnel. One tab, one row per lead.
//!
//! ## Columns
//! - A:E identity, written on page 1: rowId, createdAt, name, phone, email
//! - F:J raw measurements: bust, naturalWaist, pantWaist, hip, thigh
//! - K:L locked-in sizes: jacketSize, pantSize
//! - M free-text notes
//!
//! Page 1 appends the identity prefix and leaves the measurement cells blank.
//! Page 2 looks the row up by its UUID in column A and rewrites the full row in
//! place, preserving whatever the append wrote into A:E.
//!
//! Talks to the `spreadsheets.values` REST endpoints directly with a bearer
//! token. Token provisioning/refresh happens outside the server.
use chrono::Utc;
use reqwest::Response;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{LeadPayload, MeasurementSet, SizeLabels},
    state::AppState,
};

const ROW_CELLS: usize = 13;
const LAST_COLUMN: char = 'M';

// Last identity column preserved across the page 2 rewrite.
const PREFIX_COLUMN: char = 'E';

#[derive(Deserialize)]
struct AppendResponse {
    updates: Option<Updates>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Updates {
    #[serde(default)]
    updated_range: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Appends a fresh lead row and returns its generated ID plus the 1-indexed
/// row number the sheet assigned to it.
pub async fn append_lead_row(
    state: &AppState,
    lead: &LeadPayload,
) -> Result<(String, u32), AppError> {
    let row_id = Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339();

    let mut row = vec![
        row_id.clone(),
        created_at,
        lead.name.clone(),
        lead.phone.clone(),
        lead.email.clone(),
    ];
    row.resize(ROW_CELLS, String::new());

    let url = format!(
        "{}/v4/spreadsheets/{}/values/{}:append",
        state.config.sheets_url,
        state.config.sheets_id,
        whole_sheet_range(&state.config.sheets_tab),
    );

    let response = state
        .http
        .post(&url)
        .bearer_auth(&state.config.sheets_token)
        .query(&[("valueInputOption", "USER_ENTERED")])
        .json(&json!({ "values": [row] }))
        .send()
        .await?;
    let response = expect_ok(response).await?;

    let append: AppendResponse = response.json().await?;
    let updated_range = append
        .updates
        .map(|updates| updates.updated_range)
        .unwrap_or_default();

    let row_number = row_number_from_range(&updated_range)
        .ok_or_else(|| AppError::Sheets("Malformed append response.".to_string()))?;

    Ok((row_id, row_number))
}

/// Rewrites the lead's row with its measurements and locked-in sizes,
/// returning the row number that was updated.
pub async fn update_measurement_row(
    state: &AppState,
    row_id: &str,
    measurements: &MeasurementSet,
    sizes: &SizeLabels,
) -> Result<u32, AppError> {
    let row_number = find_row_number(state, row_id).await?;

    let prefix_range = row_range(&state.config.sheets_tab, row_number, PREFIX_COLUMN);
    let existing = get_values(state, &prefix_range).await?;
    let prefix = existing.into_iter().next().unwrap_or_default();

    let row = measurement_row(row_id, &prefix, measurements, sizes);

    let url = format!(
        "{}/v4/spreadsheets/{}/values/{}",
        state.config.sheets_url,
        state.config.sheets_id,
        row_range(&state.config.sheets_tab, row_number, LAST_COLUMN),
    );

    let response = state
        .http
        .put(&url)
        .bearer_auth(&state.config.sheets_token)
        .query(&[("valueInputOption", "USER_ENTERED")])
        .json(&json!({ "values": [row] }))
        .send()
        .await?;
    expect_ok(response).await?;

    Ok(row_number)
}

async fn find_row_number(state: &AppState, row_id: &str) -> Result<u32, AppError> {
    let rows = get_values(state, &id_column_range(&state.config.sheets_tab)).await?;

    match id_row_position(&rows, row_id) {
        Some(row_number) => Ok(row_number),
        None => Err(AppError::RowNotFound(row_id.to_string())),
    }
}

async fn get_values(state: &AppState, range: &str) -> Result<Vec<Vec<String>>, AppError> {
    let url = format!(
        "{}/v4/spreadsheets/{}/values/{}",
        state.config.sheets_url, state.config.sheets_id, range,
    );

    let response = state
        .http
        .get(&url)
        .bearer_auth(&state.config.sheets_token)
        .send()
        .await?;
    let response = expect_ok(response).await?;

    let values: ValueRange = response.json().await?;
    Ok(values.values)
}

async fn expect_ok(response: Response) -> Result<Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    Err(AppError::Sheets(format!("Sheets API returned {status}: {body}")))
}

/// Assembles the full 13-cell replacement row, keeping the identity prefix the
/// append wrote. A blank createdAt cell gets backfilled rather than erased.
fn measurement_row(
    row_id: &str,
    existing: &[String],
    measurements: &MeasurementSet,
    sizes: &SizeLabels,
) -> Vec<String> {
    let cell = |index: usize| existing.get(index).cloned().unwrap_or_default();

    let mut created_at = cell(1);
    if created_at.is_empty() {
        created_at = Utc::now().to_rfc3339();
    }

    vec![
        row_id.to_string(),
        created_at,
        cell(2),
        cell(3),
        cell(4),
        measurements.bust.clone(),
        measurements.natural_waist.clone(),
        measurements.pant_waist.clone(),
        measurements.hip.clone(),
        measurements.thigh.clone(),
        sizes.jacket.clone(),
        sizes.pant.clone(),
        measurements.notes.clone(),
    ]
}

// Sheets rows are 1-indexed.
fn id_row_position(rows: &[Vec<String>], row_id: &str) -> Option<u32> {
    rows.iter()
        .position(|row| row.first().is_some_and(|cell| cell == row_id))
        .map(|index| index as u32 + 1)
}

fn row_number_from_range(range: &str) -> Option<u32> {
    let digits: Vec<char> = range
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.iter().rev().collect::<String>().parse().ok()
}

fn whole_sheet_range(tab: &str) -> String {
    format!("{tab}!A:{LAST_COLUMN}")
}

fn id_column_range(tab: &str) -> String {
    format!("{tab}!A:A")
}

fn row_range(tab: &str, row_number: u32, last_column: char) -> String {
    format!("{tab}!A{row_number}:{last_column}{row_number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements() -> MeasurementSet {
        MeasurementSet {
            bust: "37".to_string(),
            natural_waist: "30".to_string(),
            pant_waist: "33".to_string(),
            hip: "40".to_string(),
            thigh: "22".to_string(),
            jacket_length: "Regular".to_string(),
            jacket_width: "Slim".to_string(),
            pants_length: "Long".to_string(),
            pants_width: "Regular".to_string(),
            notes: "call after 5pm".to_string(),
        }
    }

    fn sizes() -> SizeLabels {
        SizeLabels {
            jacket: "36 Regular, Slim".to_string(),
            pant: "32 Long, Regular".to_string(),
        }
    }

    #[test]
    fn test_row_number_from_range() {
        assert_eq!(row_number_from_range("Leads!A5:M5"), Some(5));
        assert_eq!(row_number_from_range("Leads!A107:M107"), Some(107));
        assert_eq!(row_number_from_range("Leads!A:M"), None);
        assert_eq!(row_number_from_range(""), None);
    }

    #[test]
    fn test_range_building() {
        assert_eq!(whole_sheet_range("Leads"), "Leads!A:M");
        assert_eq!(id_column_range("Leads"), "Leads!A:A");
        assert_eq!(row_range("Leads", 5, 'E'), "Leads!A5:E5");
        assert_eq!(row_range("Leads", 12, 'M'), "Leads!A12:M12");
    }

    #[test]
    fn test_id_row_position_is_one_indexed() {
        let rows = vec![
            vec!["rowId".to_string()],
            vec!["aaa".to_string()],
            vec!["bbb".to_string()],
        ];

        assert_eq!(id_row_position(&rows, "aaa"), Some(2));
        assert_eq!(id_row_position(&rows, "bbb"), Some(3));
        assert_eq!(id_row_position(&rows, "ccc"), None);
    }

    #[test]
    fn test_id_row_position_skips_blank_rows() {
        let rows = vec![vec![], vec!["aaa".to_string()]];

        assert_eq!(id_row_position(&rows, "aaa"), Some(2));
    }

    #[test]
    fn test_measurement_row_preserves_identity_prefix() {
        let existing = vec![
            "old-id".to_string(),
            "2026-08-01T00:00:00+00:00".to_string(),
            "Test User".to_string(),
            "+63 912 345 6789".to_string(),
            "test@example.com".to_string(),
        ];

        let row = measurement_row("row-1", &existing, &measurements(), &sizes());

        assert_eq!(row.len(), 13);
        assert_eq!(row[0], "row-1");
        assert_eq!(row[1], "2026-08-01T00:00:00+00:00");
        assert_eq!(row[2], "Test User");
        assert_eq!(row[4], "test@example.com");
        assert_eq!(row[5], "37");
        assert_eq!(row[10], "36 Regular, Slim");
        assert_eq!(row[11], "32 Long, Regular");
        assert_eq!(row[12], "call after 5pm");
    }

    #[test]
    fn test_measurement_row_backfills_created_at() {
        let row = measurement_row("row-1", &[], &measurements(), &sizes());

        assert!(!row[1].is_empty());
        assert_eq!(row[2], "");
    }
}
