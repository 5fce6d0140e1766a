//! Email service for order confirmations.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::Order;

/// One item line in the confirmation email.
struct EmailItemLine {
    name: String,
    quantity: u32,
    line_total: String,
}

/// Build the item lines shared by the HTML and text bodies.
fn item_lines(order: &Order) -> Vec<EmailItemLine> {
    order
        .items
        .iter()
        .map(|item| EmailItemLine {
            name: item.name.clone(),
            quantity: item.quantity,
            line_total: item.line_total().to_string(),
        })
        .collect()
}

/// HTML template for the order confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.html")]
struct OrderConfirmationHtml {
    client_name: String,
    order_number: String,
    delivery_date: String,
    items: Vec<EmailItemLine>,
    total: String,
}

/// Plain text template for the order confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.txt")]
struct OrderConfirmationText {
    client_name: String,
    order_number: String,
    delivery_date: String,
    items: Vec<EmailItemLine>,
    total: String,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for transactional mail.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send the order confirmation after checkout completes.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to send or a template fails to
    /// render.
    pub async fn send_order_confirmation(
        &self,
        to: &str,
        client_name: &str,
        order: &Order,
    ) -> Result<(), EmailError> {
        let html = OrderConfirmationHtml {
            client_name: client_name.to_string(),
            order_number: order.number.to_string(),
            delivery_date: order.delivery.to_string(),
            items: item_lines(order),
            total: order.total.to_string(),
        }
        .render()?;

        let text = OrderConfirmationText {
            client_name: client_name.to_string(),
            order_number: order.number.to_string(),
            delivery_date: order.delivery.to_string(),
            items: item_lines(order),
            total: order.total.to_string(),
        }
        .render()?;

        let subject = format!("Votre commande {} — Fournil", order.number);
        self.send_multipart_email(to, &subject, &text, &html).await
    }

    /// Send a multipart (text + HTML) email.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.to_string()),
                    ),
            )?;

        self.mailer.send(message).await?;
        Ok(())
    }
}
