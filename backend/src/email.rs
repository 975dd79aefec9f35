use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, warn};

use crate::storage::DemoBooking;

/// SMTP settings, read from `BOOKING_SMTP_*` variables
#[derive(Clone, PartialEq)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from_email", &self.from_email)
            .finish()
    }
}

/// Something that can deliver a plain-text mail
pub trait MailSender: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

pub struct SmtpMailer {
    from: Mailbox,
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        info!("Initializing SMTP mailer for {}:{}", config.smtp_server, config.smtp_port);

        let tls_params = TlsParameters::new(config.smtp_server.clone())
            .context("Failed to create TLS parameters")?;

        let transport = SmtpTransport::relay(&config.smtp_server)
            .context("Failed to create SMTP relay")?
            .port(config.smtp_port)
            .tls(Tls::Required(tls_params))
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .build();

        let from = config
            .from_email
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid sender address: {}", config.from_email))?;

        Ok(Self { from, transport })
    }
}

impl MailSender for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>().with_context(|| format!("Invalid recipient: {}", to))?)
            .subject(subject)
            .body(body.to_string())
            .context("Failed to build email")?;

        self.transport.send(&email).context("Failed to send email")?;
        Ok(())
    }
}

/// Booking mails. Without a sender every mail is skipped with a log line.
#[derive(Clone, Default)]
pub struct EmailService {
    sender: Option<Arc<dyn MailSender>>,
}

impl EmailService {
    pub fn new(sender: Arc<dyn MailSender>) -> Self {
        Self { sender: Some(sender) }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn from_config(config: Option<&EmailConfig>) -> Result<Self> {
        match config {
            Some(config) => Ok(Self::new(Arc::new(SmtpMailer::new(config)?))),
            None => {
                info!("SMTP is not configured, booking confirmations will not be mailed");
                Ok(Self::disabled())
            }
        }
    }

    /// Mail the visitor that their slot is reserved. The meeting link is not
    /// included; it goes out closer to the meeting.
    pub async fn send_booking_confirmation(&self, booking: &DemoBooking) -> Result<()> {
        let Some(sender) = self.sender.clone() else {
            info!("Skipping confirmation mail for booking {}", booking.id);
            return Ok(());
        };

        let to = booking.email.clone();
        let (subject, body) = confirmation_message(booking);
        tokio::task::spawn_blocking(move || sender.send(&to, &subject, &body))
            .await
            .context("Mail task panicked")??;

        info!("Sent confirmation mail for booking {}", booking.id);
        Ok(())
    }

    /// Like `send_booking_confirmation`, but a failure is only logged
    pub async fn notify_booked(&self, booking: &DemoBooking) {
        if let Err(e) = self.send_booking_confirmation(booking).await {
            warn!("Failed to send confirmation for booking {}: {:#}", booking.id, e);
        }
    }
}

fn confirmation_message(booking: &DemoBooking) -> (String, String) {
    let subject = "Your demo booking confirmation".to_string();
    let body = format!(
        "Dear {},\n\nYour demo is booked for {} at {}.\nWe will send you the meeting link shortly before your scheduled time.\n\nThank you!",
        booking.person_name, booking.meeting_date, booking.meeting_time
    );
    (subject, body)
}
