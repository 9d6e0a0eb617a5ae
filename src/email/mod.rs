pub mod templates;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::models::{Charge, Member};

pub struct SystemMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SystemMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("System SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }

    pub async fn send_password_reset(
        &self,
        to_email: &str,
        reset_url: &str,
    ) -> Result<(), String> {
        let html = templates::render_password_reset(reset_url);
        self.send(to_email, "Password recovery - Member Portal", &html)
            .await
    }

    /// Sent when an admin approves a PENDING signup.
    pub async fn send_membership_approved(
        &self,
        member: &Member,
        base_url: &str,
    ) -> Result<(), String> {
        let html = templates::render_membership_approved(&member.name, base_url);
        self.send(&member.email, "Your membership is active - Member Portal", &html)
            .await
    }

    pub async fn send_charge_reminder(
        &self,
        to_email: &str,
        member_name: &str,
        charge: &Charge,
    ) -> Result<(), String> {
        let html = templates::render_charge_reminder(member_name, charge);
        self.send(
            to_email,
            &format!("Payment reminder: {}", charge.description),
            &html,
        )
        .await
    }

    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport.send(message).await.map_err(|e| {
            // The common misconfiguration is bad relay credentials; say so.
            if e.to_string().contains("authentication") {
                format!("SMTP authentication failed - check the ASSOCIA_SMTP_USER/PASS credentials: {e}")
            } else {
                format!("Failed to send email: {e}")
            }
        })?;

        Ok(())
    }
}
