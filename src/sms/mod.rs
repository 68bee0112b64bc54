// Orange SMS gateway client.
//
// Two-legged flow: exchange the configured Basic credential for a bearer
// token, then post one outbound message. Both calls share a request-scoped
// timeout so a stalled gateway cannot hold a request open indefinitely.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::SmsConfig;

#[derive(Debug, Error)]
pub enum SmsError {
    /// Structured error returned by the provider, unwrapped from its body.
    #[error("{name}: {message}")]
    Api {
        status: u16,
        name: String,
        message: String,
    },

    #[error("SMS gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SMS gateway client could not be constructed: {0}")]
    Client(String),
}

/// Delivery seam for one-time codes. The production implementation talks to
/// the Orange gateway; tests substitute their own.
#[async_trait]
pub trait OtpSender: Send + Sync {
    async fn send_code(&self, contact: &str, code: &str) -> Result<(), SmsError>;
}

#[derive(Debug, Deserialize)]
struct GatewayToken {
    token_type: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

pub struct OrangeSmsGateway {
    http: reqwest::Client,
    api_url: String,
    authorization_header: String,
    sender: String,
    country_prefix: String,
}

impl OrangeSmsGateway {
    pub fn new(config: &SmsConfig) -> Result<Self, SmsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SmsError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            authorization_header: config.authorization_header.clone(),
            sender: config.sender.clone(),
            country_prefix: config.country_prefix.clone(),
        })
    }

    /// Client-credentials exchange against the gateway's OAuth endpoint.
    async fn access_token(&self) -> Result<GatewayToken, SmsError> {
        let response = self
            .http
            .post(format!("{}/oauth/v3/token", self.api_url))
            .header("Authorization", &self.authorization_header)
            .header("Accept", "application/json")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(unwrap_api_error(response).await);
        }

        Ok(response.json::<GatewayToken>().await?)
    }

    fn outbound_url(&self) -> String {
        // The sender address is percent-encoded into the resource path
        format!(
            "{}/smsmessaging/v1/outbound/tel%3A%2B{}{}/requests",
            self.api_url, self.country_prefix, self.sender
        )
    }

    fn message_body(&self, contact: &str, code: &str) -> serde_json::Value {
        json!({
            "outboundSMSMessageRequest": {
                "address": format!("tel:+{}{}", self.country_prefix, contact),
                "senderAddress": format!("tel:+{}{}", self.country_prefix, self.sender),
                "outboundSMSTextMessage": {
                    "message": login_message(code),
                },
            }
        })
    }
}

#[async_trait]
impl OtpSender for OrangeSmsGateway {
    async fn send_code(&self, contact: &str, code: &str) -> Result<(), SmsError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(self.outbound_url())
            .header(
                "Authorization",
                format!("{} {}", token.token_type, token.access_token),
            )
            .json(&self.message_body(contact, code))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(unwrap_api_error(response).await);
        }

        Ok(())
    }
}

fn login_message(code: &str) -> String {
    format!(
        "Votre code de connexion à l'application FanXp est: {}",
        code
    )
}

/// Pull `{error, error_description}` out of a failed gateway response when the
/// body is structured that way, falling back to a generic classification.
async fn unwrap_api_error(response: reqwest::Response) -> SmsError {
    let status = response.status().as_u16();
    let body = response.json::<GatewayErrorBody>().await.ok();
    match body {
        Some(GatewayErrorBody {
            error: Some(name),
            error_description,
        }) => SmsError::Api {
            status,
            name,
            message: error_description.unwrap_or_default(),
        },
        _ => SmsError::Api {
            status,
            name: "GatewayError".to_string(),
            message: "SMS gateway rejected the request".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn outbound_url_percent_encodes_the_sender_address() {
        let gateway = OrangeSmsGateway::new(&test_config().sms).unwrap();
        assert_eq!(
            gateway.outbound_url(),
            "https://api.orange.invalid/smsmessaging/v1/outbound/tel%3A%2B2250000/requests"
        );
    }

    #[test]
    fn message_body_addresses_both_parties_with_the_country_prefix() {
        let gateway = OrangeSmsGateway::new(&test_config().sms).unwrap();
        let body = gateway.message_body("0700000001", "1234");
        let request = &body["outboundSMSMessageRequest"];
        assert_eq!(request["address"], "tel:+2250700000001");
        assert_eq!(request["senderAddress"], "tel:+2250000");
        let message = request["outboundSMSTextMessage"]["message"].as_str().unwrap();
        assert!(message.ends_with("1234"));
    }
}
