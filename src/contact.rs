use crate::forms::{self, FormErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    #[validate(length(min = 2, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

/// Acknowledgement for a message that was "sent"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub name: String,
    pub subject: String,
    pub received_at: DateTime<Utc>,
}

/// Simulated send: validates, waits, and acknowledges. Nothing is delivered.
pub async fn send_message(form: ContactForm, delay: Duration) -> Result<ContactReceipt, FormErrors> {
    forms::check(&form)?;
    tokio::time::sleep(delay).await;

    info!("Contact message from {} about '{}'", form.email, form.subject);

    Ok(ContactReceipt {
        name: form.name,
        subject: form.subject,
        received_at: Utc::now(),
    })
}
