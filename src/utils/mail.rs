use crate::config::config;
use crate::types::mail::SendEmail;
use reqwest::ClientBuilder;
use std::time::Duration;

/// Dispatch a message through the Resend HTTP API. Callers decide
/// whether to await this before responding; a hard failure must at
/// least be logged, never dropped.
pub async fn send_email(email: SendEmail) -> Result<(), String> {
    let mail_config = &config().mail;

    let payload =
        serde_json::to_string(&email).map_err(|e| format!("serialize email failed: {e}"))?;

    let client = ClientBuilder::new()
        .user_agent("portal-auth/0.1 (+reqwest)")
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| format!("build client failed: {e}"))?;

    let res = client
        .post(&mail_config.endpoint)
        .bearer_auth(&mail_config.api_key)
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await
        .map_err(|e| format!("send failed: {e}"))?;

    let status = res.status();
    if status.is_success() {
        log::info!("mail dispatched to {:?}", email.to);
        Ok(())
    } else {
        let body = res.text().await.unwrap_or_default();
        Err(format!("mail API error: HTTP {status}: {body}"))
    }
}
