use crate::domain::model::{BookingRequest, ContactRequest};
use crate::domain::ports::{BookingGateway, ConfigProvider};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Booking boundary over HTTP: JSON `POST`s, any 2xx is an acknowledgment.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    booking_url: Url,
    contact_url: Url,
    timeout: Duration,
}

/// Appends `path` to the base URL's own path, so a service mounted under a
/// prefix such as `/v1` keeps it.
fn endpoint(base: &Url, field_name: &str, path: &str) -> Result<Url> {
    if base.cannot_be_a_base() {
        return Err(BookingError::InvalidValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!("Cannot append a path to {}", base),
        });
    }

    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    Ok(url)
}

impl HttpGateway {
    pub fn new(
        base_url: &str,
        booking_path: &str,
        contact_path: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| BookingError::InvalidValue {
            field: "service.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            booking_url: endpoint(&base, "service.booking_path", booking_path)?,
            contact_url: endpoint(&base, "service.contact_path", contact_path)?,
            timeout,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.base_url(),
            config.booking_path(),
            config.contact_path(),
            config.timeout(),
        )
    }

    pub fn booking_url(&self) -> &Url {
        &self.booking_url
    }

    pub fn contact_url(&self) -> &Url {
        &self.contact_url
    }

    async fn post<T: Serialize + Sync>(&self, url: &Url, body: &T) -> Result<()> {
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BookingError::Timeout {
                        after: self.timeout,
                    }
                } else {
                    BookingError::HttpError(e)
                }
            })?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status.is_success() {
            Ok(())
        } else {
            Err(BookingError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl BookingGateway for HttpGateway {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<()> {
        self.post(&self.booking_url, request).await
    }

    async fn submit_contact(&self, request: &ContactRequest) -> Result<()> {
        self.post(&self.contact_url, request).await
    }
}
