use crate::config::SmtpInfo;
use crate::error::ApiError;
use crate::tasks::{ConfirmationSender, PaymentConfirmation};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use tracing::info;

#[derive(Clone)]
pub struct EmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
}

impl EmailClient {
    pub fn new(smtp: &SmtpInfo) -> Result<Self, ApiError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.server)
            .map_err(|e| ApiError::Internal(format!("Invalid SMTP relay: {e}")))?
            .port(smtp.port);

        if !smtp.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.expose_secret().to_string(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from_email: smtp.from_email.clone(),
        })
    }

    fn build_message(&self, job: &PaymentConfirmation) -> Result<Message, ApiError> {
        let subject = format!("Payment Confirmed: {}", job.booking_reference);
        let body = format!(
            "Hi,\n\n\
             Your payment for booking '{}' has been confirmed.\n\
             Amount: {} {}\n\
             Transaction Ref: {}\n\n\
             Thank you.",
            job.booking_reference, job.amount, job.currency, job.tx_ref
        );

        Message::builder()
            .from(
                self.from_email
                    .parse()
                    .map_err(|_| ApiError::Internal("Invalid sender address".into()))?,
            )
            .to(job
                .to_email
                .parse()
                .map_err(|_| ApiError::BadRequest("Invalid recipient address".into()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| ApiError::Internal(format!("Failed to build email: {e}")))
    }
}

#[async_trait]
impl ConfirmationSender for EmailClient {
    async fn send(&self, job: &PaymentConfirmation) -> Result<(), ApiError> {
        let message = self.build_message(job)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ApiError::Internal(format!("SMTP send failed: {e}")))?;

        info!(tx_ref = %job.tx_ref, to = %job.to_email, "confirmation email sent");
        Ok(())
    }
}
