use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tokio::time::{sleep, Duration};

use crate::config::Config;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 1000;

pub async fn send_email(
    config: &Config,
    to_email: &str,
    subject: &str,
    template: &str,
    placeholders: &[(String, String)],
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate inputs
    if to_email.is_empty() {
        return Err("Email recipient cannot be empty".into());
    }
    if !to_email.contains('@') {
        return Err(format!("Invalid email address: {}", to_email).into());
    }

    let mut html_body = template.to_string();
    for (key, value) in placeholders {
        html_body = html_body.replace(key, value);
    }

    send_with_retries(config, to_email, subject, &html_body).await
}

async fn send_with_retries(
    config: &Config,
    to_email: &str,
    subject: &str,
    html_body: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_error = None;

    for attempt in 1..=MAX_RETRIES {
        match send_via_smtp(config, to_email, subject, html_body).await {
            Ok(()) => {
                tracing::info!("email sent successfully to {}", to_email);
                return Ok(());
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < MAX_RETRIES {
                    let delay = RETRY_DELAY_MS * (2_u64.pow(attempt - 1));
                    tracing::warn!(
                        "email send attempt {} failed for {}, retrying in {}ms",
                        attempt,
                        to_email,
                        delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                }
            }
        }
    }

    let error_msg = last_error
        .map(|e| format!("Failed after {} retries: {}", MAX_RETRIES, e))
        .unwrap_or_else(|| "Unknown email sending error".to_string());

    tracing::error!("email failed for {}: {}", to_email, error_msg);
    Err(error_msg.into())
}

async fn send_via_smtp(
    config: &Config,
    to_email: &str,
    subject: &str,
    html_body: &str,
) -> Result<(), String> {
    let message = Message::builder()
        .from(
            config
                .smtp_from
                .parse()
                .map_err(|e| format!("Invalid from address: {}", e))?,
        )
        .to(to_email
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html_body.to_string())
        .map_err(|e| format!("Failed to build message: {}", e))?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        .map_err(|e| format!("SMTP relay error: {}", e))?
        .credentials(Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        ))
        .build();

    mailer
        .send(message)
        .await
        .map(|_| ())
        .map_err(|e| format!("SMTP send error: {}", e))
}
