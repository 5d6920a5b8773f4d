//! Wire payloads for the funnel endpoints.
//!
//! Field names are camelCase on the wire to match the frontend forms. Missing
//! keys deserialize to empty strings so the presence checks below own the 400,
//! not the JSON extractor.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Page 1 submission: the captured contact record.
#[derive(Deserialize)]
pub struct LeadPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl LeadPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if any_blank(&[&self.name, &self.phone, &self.email]) {
            return Err(AppError::MissingFields(
                "Name, phone, and email are required.",
            ));
        }

        Ok(())
    }
}

/// Raw body measurements from the page 2 form.
///
/// Every field is a user-entered free-form string. Only bust and pant waist are
/// ever parsed as numbers; the length/width fields are fit-preference labels.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementSet {
    #[serde(default)]
    pub bust: String,
    #[serde(default)]
    pub natural_waist: String,
    #[serde(default)]
    pub pant_waist: String,
    #[serde(default)]
    pub hip: String,
    #[serde(default)]
    pub thigh: String,
    #[serde(default)]
    pub jacket_length: String,
    #[serde(default)]
    pub jacket_width: String,
    #[serde(default)]
    pub pants_length: String,
    #[serde(default)]
    pub pants_width: String,
    #[serde(default)]
    pub notes: String,
}

impl MeasurementSet {
    fn required(&self) -> [&str; 9] {
        [
            self.bust.as_str(),
            self.natural_waist.as_str(),
            self.pant_waist.as_str(),
            self.hip.as_str(),
            self.thigh.as_str(),
            self.jacket_length.as_str(),
            self.jacket_width.as_str(),
            self.pants_length.as_str(),
            self.pants_width.as_str(),
        ]
    }
}

/// Page 2 submission: measurements for an existing lead row.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementPayload {
    #[serde(default)]
    pub row_id: String,
    pub measurements: Option<MeasurementSet>,
}

impl MeasurementPayload {
    /// Flat presence check. Notes stay optional, the nine measurement fields
    /// do not.
    pub fn validate(&self) -> Result<&MeasurementSet, AppError> {
        let measurements = match &self.measurements {
            Some(measurements) if !self.row_id.trim().is_empty() => measurements,
            _ => {
                return Err(AppError::MissingFields(
                    "rowId and measurements are required.",
                ));
            }
        };

        if any_blank(&measurements.required()) {
            return Err(AppError::MissingFields(
                "Please complete all measurement fields.",
            ));
        }

        Ok(measurements)
    }
}

/// The locked-in size profile, rendered once and treated as display data.
#[derive(Serialize)]
pub struct SizeLabels {
    pub jacket: String,
    pub pant: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeEmailPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub page2_url: String,
}

impl WelcomeEmailPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if any_blank(&[&self.email, &self.name, &self.page2_url]) {
            return Err(AppError::MissingFields(
                "email, name, and page2Url are required.",
            ));
        }

        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeEmailPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub jacket_size: String,
    #[serde(default)]
    pub pant_size: String,
    #[serde(default)]
    pub size_chart_url: String,
    #[serde(default)]
    pub socials: Socials,
}

impl SizeEmailPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if any_blank(&[
            &self.email,
            &self.jacket_size,
            &self.pant_size,
            &self.size_chart_url,
        ]) {
            return Err(AppError::MissingFields(
                "email, jacketSize, pantSize, and sizeChartUrl are required.",
            ));
        }

        Ok(())
    }
}

#[derive(Deserialize, Default)]
pub struct Socials {
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub tiktok: Option<String>,
}

fn any_blank(fields: &[&str]) -> bool {
    fields.iter().any(|field| field.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn measurements(bust: &str) -> MeasurementSet {
        MeasurementSet {
            bust: bust.to_string(),
            natural_waist: "30".to_string(),
            pant_waist: "33".to_string(),
            hip: "40".to_string(),
            thigh: "22".to_string(),
            jacket_length: "Regular".to_string(),
            jacket_width: "Slim".to_string(),
            pants_length: "Long".to_string(),
            pants_width: "Regular".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_lead_requires_all_fields() {
        let payload: LeadPayload = serde_json::from_value(json!({
            "name": "Test User",
            "phone": "",
            "email": "test@example.com"
        }))
        .unwrap();

        let error = payload.validate().unwrap_err();
        assert_eq!(error.to_string(), "Name, phone, and email are required.");
    }

    #[test]
    fn test_lead_missing_key_defaults_to_blank() {
        let payload: LeadPayload =
            serde_json::from_value(json!({ "name": "Test User" })).unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_lead_accepts_complete_payload() {
        let payload: LeadPayload = serde_json::from_value(json!({
            "name": "Test User",
            "phone": "+63 912 345 6789",
            "email": "test@example.com"
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_measurement_payload_deserializes_camel_case() {
        let payload: MeasurementPayload = serde_json::from_value(json!({
            "rowId": "mock-1",
            "measurements": {
                "bust": "37",
                "naturalWaist": "30",
                "pantWaist": "33",
                "hip": "40",
                "thigh": "22",
                "jacketLength": "Regular",
                "jacketWidth": "Slim",
                "pantsLength": "Long",
                "pantsWidth": "Regular",
                "notes": "prefers darker fabric"
            }
        }))
        .unwrap();

        let measurements = payload.validate().unwrap();
        assert_eq!(measurements.natural_waist, "30");
        assert_eq!(measurements.notes, "prefers darker fabric");
    }

    #[test]
    fn test_measurement_payload_requires_row_id() {
        let payload = MeasurementPayload {
            row_id: "  ".to_string(),
            measurements: Some(measurements("37")),
        };

        let error = payload.validate().unwrap_err();
        assert_eq!(error.to_string(), "rowId and measurements are required.");
    }

    #[test]
    fn test_measurement_payload_requires_all_nine_fields() {
        let payload = MeasurementPayload {
            row_id: "mock-1".to_string(),
            measurements: Some(measurements("")),
        };

        let error = payload.validate().unwrap_err();
        assert_eq!(error.to_string(), "Please complete all measurement fields.");
    }

    #[test]
    fn test_measurement_notes_are_optional() {
        let payload = MeasurementPayload {
            row_id: "mock-1".to_string(),
            measurements: Some(measurements("37")),
        };

        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_size_email_defaults_socials() {
        let payload: SizeEmailPayload = serde_json::from_value(json!({
            "email": "test@example.com",
            "jacketSize": "38 Slim, Regular",
            "pantSize": "32 Long, Wide",
            "sizeChartUrl": "https://example.com/size-chart"
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert!(payload.socials.instagram.is_none());
    }

    #[test]
    fn test_welcome_email_requires_page2_url() {
        let payload: WelcomeEmailPayload = serde_json::from_value(json!({
            "email": "test@example.com",
            "name": "Test User"
        }))
        .unwrap();

        let error = payload.validate().unwrap_err();
        assert_eq!(error.to_string(), "email, name, and page2Url are required.");
    }
}
