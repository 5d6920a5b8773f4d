//! # Resend
//!
//! Outbound confirmation emails, one per funnel step:
//!
//! - Welcome (page 1): thanks the lead and links the measurement page
//! - Size profile (page 2): carries the locked-in jacket/pant labels and the
//!   size chart link
//!
//! Sends go through `POST /emails` with a bearer key. Without a configured key
//! the send is skipped with a warning instead of failing the submission.
use serde_json::json;
use tracing::warn;

use crate::{error::AppError, models::Socials, state::AppState};

pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub async fn send_email(state: &AppState, email: Email) -> Result<(), AppError> {
    let Some(api_key) = &state.config.resend_key else {
        warn!("RESEND_API_KEY not set. Email send skipped.");
        return Ok(());
    };

    let response = state
        .http
        .post(format!("{}/emails", state.config.resend_url))
        .bearer_auth(api_key)
        .json(&json!({
            "from": state.config.email_from,
            "to": email.to,
            "subject": email.subject,
            "html": email.html,
            "text": email.text,
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let payload: serde_json::Value = response.json().await.unwrap_or_default();
        let message = payload
            .get("message")
            .and_then(|message| message.as_str())
            .unwrap_or("Email provider error")
            .to_string();

        return Err(AppError::Email(message));
    }

    Ok(())
}

pub fn welcome_email(to: &str, name: &str, page2_url: &str) -> Email {
    Email {
        to: to.to_string(),
        subject: "You're in! Next up: your Essato measurements".to_string(),
        html: welcome_html(name, page2_url),
        text: welcome_text(name, page2_url),
    }
}

pub fn size_profile_email(
    to: &str,
    jacket_size: &str,
    pant_size: &str,
    size_chart_url: &str,
    socials: &Socials,
) -> Email {
    Email {
        to: to.to_string(),
        subject: "Your Essato Customs size profile".to_string(),
        html: size_profile_html(jacket_size, pant_size, size_chart_url, socials),
        text: size_profile_text(jacket_size, pant_size, size_chart_url, socials),
    }
}

fn welcome_html(name: &str, page2_url: &str) -> String {
    format!(
        r#"<div style="font-family:Inter,Arial,sans-serif;color:#000;">
  <p>Hi {name},</p>
  <p>Welcome to the Essato Customs 8-Pocket Suit Giveaway list&mdash;consider your early spot secured.</p>
  <p>To maximize your entries and secure your pre-sale slot, take 60 seconds to add your measurements:</p>
  <p><a href="{page2_url}" style="background:#FEB6A3;color:#000;padding:12px 24px;border-radius:999px;text-decoration:none;display:inline-block;">Enter Measurements</a></p>
  <p>If the button doesn&rsquo;t work, copy this link:<br>{page2_url}</p>
  <p>With love,<br>Essato Customs</p>
</div>"#
    )
}

fn welcome_text(name: &str, page2_url: &str) -> String {
    format!(
        "Hi {name},\n\n\
         Thank you for joining the Essato Customs 8-Pocket Suit Giveaway.\n\n\
         Next step: reserve your size now so you're ready for launch.\n\
         {page2_url}\n\n\
         With love,\nTeam Essato"
    )
}

fn size_profile_html(
    jacket_size: &str,
    pant_size: &str,
    size_chart_url: &str,
    socials: &Socials,
) -> String {
    let instagram = socials.instagram.as_deref().unwrap_or("#");
    let linkedin = socials.linkedin.as_deref().unwrap_or("#");
    let tiktok = socials.tiktok.as_deref().unwrap_or("#");

    format!(
        r#"<div style="font-family:Inter,Arial,sans-serif;color:#000;">
  <p>Your Essato Customs profile is locked in.</p>
  <p><strong>Jacket:</strong> {jacket_size}<br/>
  <strong>Pants:</strong> {pant_size}</p>
  <p><a href="{size_chart_url}" style="background:#FEB6A3;color:#000;padding:12px 24px;border-radius:999px;text-decoration:none;display:inline-block;">Open Size Chart</a></p>
  <p>Save this email and keep your tape handy&mdash;launch is right around the corner.</p>
  <p style="margin-top:2rem;">Follow Essato Customs:</p>
  <p>
    <a href="{instagram}">Instagram</a> &middot;
    <a href="{linkedin}">LinkedIn</a> &middot;
    <a href="{tiktok}">TikTok</a>
  </p>
</div>"#
    )
}

fn size_profile_text(
    jacket_size: &str,
    pant_size: &str,
    size_chart_url: &str,
    socials: &Socials,
) -> String {
    let instagram = socials.instagram.as_deref().unwrap_or("");
    let linkedin = socials.linkedin.as_deref().unwrap_or("");
    let tiktok = socials.tiktok.as_deref().unwrap_or("");

    format!(
        "Your Essato Customs profile is confirmed.\n\n\
         Jacket: {jacket_size}\n\
         Pants: {pant_size}\n\n\
         Size chart: {size_chart_url}\n\n\
         Follow us:\n\
         Instagram: {instagram}\n\
         LinkedIn: {linkedin}\n\
         TikTok: {tiktok}\n"
    )
}
