//! Admin notification for access requests, sent through the Resend API.
//!
//! Spotify apps in development mode only work for allow-listed users, so a new
//! user asks for access and the admin adds them by hand.

use reqwest::Client;
use serde::Serialize;

use crate::config;

const RESEND_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct Email {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

/// Notifies the admin about an access request.
///
/// Returns whether a mail was actually sent. Missing configuration or a failed
/// send only logs the request.
pub async fn send_signup_notification(http: &Client, email: &str, name: Option<&str>) -> bool {
    let display_name = name.filter(|n| !n.trim().is_empty()).unwrap_or("Not provided");

    let (Some(api_key), Some(admin)) = (config::resend_api_key(), config::admin_email()) else {
        log::info!("Resend not configured. Access request: {} ({})", email, display_name);
        return false;
    };

    let mail = Email {
        from: format!("musikai <{}>", config::resend_from_email()),
        to: vec![admin.clone()],
        subject: format!("musikai: New User Access Request - {}", email),
        html: render_body(email, display_name),
    };

    log::info!("Sending notification to {} for {}", admin, email);
    let result = http
        .post(RESEND_URL)
        .bearer_auth(api_key)
        .json(&mail)
        .send()
        .await
        .and_then(|r| r.error_for_status());

    match result {
        Ok(_) => true,
        Err(e) => {
            log::error!("Failed to send notification via Resend: {}", e);
            log::info!("Access request: {} ({})", email, display_name);
            false
        }
    }
}

fn render_body(email: &str, name: &str) -> String {
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6;">
  <h2>musikai: New User Access Request</h2>
  <p><strong>User Email:</strong> {email}</p>
  <p><strong>User Name:</strong> {name}</p>
  <p>Add <code>{email}</code> to the allowed users of the Spotify app in the developer dashboard.</p>
</body>
</html>"#
    )
}
