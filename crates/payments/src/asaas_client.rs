use chrono::NaiveDate;
use hmac::{Hmac, Mac};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use sha2::Sha256;
use tracing::error;
use uuid::Uuid;

use anyhow::Result;

type HmacSha256 = Hmac<Sha256>;

/// Minimal Asaas client built on reqwest.
pub struct AsaasClient {
    http: reqwest::Client,
    api_key: String,
    webhook_token: String,
    base_url: String,
}

/// Webhook payload. Asaas posts one event per request; payment events carry
/// the payment object, subscription events the subscription object.
#[derive(Debug, Deserialize)]
pub struct AsaasEvent {
    pub event: String,
    pub payment: Option<AsaasPayment>,
    pub subscription: Option<AsaasSubscription>,
}

#[derive(Debug, Deserialize)]
pub struct AsaasPayment {
    pub id: Option<String>,
    pub customer: Option<String>,
    pub subscription: Option<String>,
    pub value: Option<f64>,
    pub status: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct AsaasSubscription {
    pub id: Option<String>,
    pub customer: Option<String>,
    pub value: Option<f64>,
    pub cycle: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "nextDueDate")]
    pub next_due_date: Option<NaiveDate>,
}

impl AsaasSubscription {
    /// Subscription price in integer minor units; Asaas reports decimal BRL.
    pub fn value_minor(&self) -> Option<i64> {
        self.value.map(|value| (value * 100.0).round() as i64)
    }
}

#[derive(Debug, Deserialize)]
struct AsaasErrorEnvelope {
    errors: Vec<AsaasErrorDetails>,
}

#[derive(Debug, Deserialize)]
struct AsaasErrorDetails {
    code: Option<String>,
    description: Option<String>,
}

impl AsaasClient {
    pub fn new(api_key: String, webhook_token: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            webhook_token,
            base_url,
        }
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (asaas_error_code, asaas_error_description) =
            match serde_json::from_str::<AsaasErrorEnvelope>(&body) {
                Ok(envelope) => match envelope.errors.into_iter().next() {
                    Some(details) => (details.code, details.description),
                    None => (None, None),
                },
                Err(_) => (None, None),
            };

        error!(
            status = %status,
            asaas_error_code = ?asaas_error_code,
            asaas_error_description = ?asaas_error_description,
            response_body = %body,
            context = %context,
            "asaas api request failed"
        );

        anyhow::bail!("Asaas API request failed: {} (status {})", context, status);
    }

    /// Creates an Asaas customer for a company and returns its id.
    pub async fn create_customer(
        &self,
        name: &str,
        email: &str,
        cpf_cnpj: &str,
        company_id: Uuid,
    ) -> Result<String> {
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "cpfCnpj": cpf_cnpj,
            "externalReference": company_id.to_string(),
        });

        let resp = self
            .http
            .post(format!("{}/customers", self.base_url))
            .header("access_token", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create customer").await?;

        #[derive(Deserialize)]
        struct CustomerResp {
            id: String,
        }

        let parsed: CustomerResp = resp.json().await?;
        Ok(parsed.id)
    }

    /// Creates a recurring subscription billed by Asaas.
    pub async fn create_subscription(
        &self,
        customer_id: &str,
        value_minor: i64,
        cycle: &str,
        next_due_date: NaiveDate,
    ) -> Result<AsaasSubscription> {
        let body = serde_json::json!({
            "customer": customer_id,
            "billingType": "UNDEFINED",
            "value": (value_minor as f64) / 100.0,
            "cycle": cycle,
            "nextDueDate": next_due_date.format("%Y-%m-%d").to_string(),
        });

        let resp = self
            .http
            .post(format!("{}/subscriptions", self.base_url))
            .header("access_token", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create subscription").await?;

        let subscription: AsaasSubscription = resp.json().await?;
        Ok(subscription)
    }

    pub async fn retrieve_subscription(&self, subscription_id: &str) -> Result<AsaasSubscription> {
        let resp = self
            .http
            .get(format!("{}/subscriptions/{}", self.base_url, subscription_id))
            .header("access_token", &self.api_key)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "retrieve subscription").await?;

        let subscription: AsaasSubscription = resp.json().await?;
        Ok(subscription)
    }

    pub async fn cancel_subscription(&self, subscription_id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(format!("{}/subscriptions/{}", self.base_url, subscription_id))
            .header("access_token", &self.api_key)
            .send()
            .await?;
        Self::ensure_success(resp, "cancel subscription").await?;

        Ok(())
    }

    /// Authenticates a webhook delivery. Asaas sends the configured token in
    /// the `asaas-access-token` header; both sides are MACed so the
    /// comparison runs in constant time over equal-length digests.
    pub fn verify_webhook_token(&self, provided_token: &str, payload: &[u8]) -> Result<AsaasEvent> {
        let mut expected = HmacSha256::new_from_slice(self.webhook_token.as_bytes())?;
        expected.update(b"asaas-webhook-token");
        let expected = expected.finalize().into_bytes();

        let mut provided = HmacSha256::new_from_slice(provided_token.as_bytes())?;
        provided.update(b"asaas-webhook-token");
        let provided = provided.finalize().into_bytes();

        if expected[..] != provided[..] {
            anyhow::bail!("invalid webhook token");
        }

        let event: AsaasEvent = serde_json::from_slice(payload)?;
        Ok(event)
    }
}
