use crate::domain::model::{BookingRequest, ContactRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn booking_path(&self) -> &str;
    fn contact_path(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// The opaque request/response boundary behind "submit a booking" and
/// "submit a contact message". `Ok(())` is the acknowledgment; any other
/// outcome is a failure.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<()>;
    async fn submit_contact(&self, request: &ContactRequest) -> Result<()>;
}

#[async_trait]
impl<T: BookingGateway + ?Sized> BookingGateway for std::sync::Arc<T> {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<()> {
        (**self).submit_booking(request).await
    }

    async fn submit_contact(&self, request: &ContactRequest) -> Result<()> {
        (**self).submit_contact(request).await
    }
}
