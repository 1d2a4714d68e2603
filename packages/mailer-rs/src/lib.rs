// Thin client for the hosted email-delivery function.
//
// The portal never talks SMTP itself; it POSTs a JSON payload to the
// company's send-email function and treats the response as opaque.

pub mod models;

use reqwest::{header, Client};

use crate::models::{EmailMessage, SendEmailResponse};

#[derive(Debug, Clone)]
pub struct MailerOptions {
    /// Fully-qualified URL of the send-email function.
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct MailerService {
    options: MailerOptions,
    client: Client,
}

impl MailerService {
    pub fn new(options: MailerOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<SendEmailResponse, &'static str> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "Content-Type",
            "application/json"
                .parse()
                .expect("Header value should parse correctly"),
        );

        let res = self
            .client
            .post(&self.options.endpoint)
            .bearer_auth(&self.options.api_key)
            .headers(headers)
            .json(message)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Mailer error ({}): {}", status, error_body);
                    return Err("Mailer returned an error");
                }

                match response.json::<SendEmailResponse>().await {
                    Ok(data) => Ok(data),
                    Err(e) => {
                        eprintln!("Failed to parse mailer response: {}", e);
                        Err("Error parsing mailer response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to mailer failed: {}", e);
                Err("Error sending email")
            }
        }
    }
}
