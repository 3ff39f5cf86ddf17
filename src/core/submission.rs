//! Submission state machine.
//!
//! ```text
//! idle --submit--> pending --ok--> succeeded
//!                          \--err--> failed(reason)
//! succeeded | failed --edit--> idle
//! ```
//!
//! A submission is started synchronously with [`SubmissionController::begin`],
//! which validates the form and claims the single in-flight slot, and then
//! driven with [`PendingSubmission::send`]. Dropping a pending submission
//! before it settles releases the slot and returns the controller to idle.

use crate::core::configuration::Configuration;
use crate::core::contact::ContactMessage;
use crate::domain::model::{SubmissionRequest, SubmissionState};
use crate::domain::ports::BookingGateway;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::Validate;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A form that can be edited and submitted through a [`SubmissionController`].
pub trait FormModel: Validate + Default + Send + Sync {
    type Change;

    fn apply(&mut self, change: Self::Change);

    fn to_submission(&self) -> SubmissionRequest;
}

impl FormModel for Configuration {
    type Change = crate::core::configuration::BookingChange;

    fn apply(&mut self, change: Self::Change) {
        Configuration::apply(self, change);
    }

    fn to_submission(&self) -> SubmissionRequest {
        SubmissionRequest::Booking(self.to_request())
    }
}

impl FormModel for ContactMessage {
    type Change = crate::core::contact::ContactChange;

    fn apply(&mut self, change: Self::Change) {
        ContactMessage::apply(self, change);
    }

    fn to_submission(&self) -> SubmissionRequest {
        SubmissionRequest::Contact(self.to_request())
    }
}

pub struct SubmissionController<G: BookingGateway> {
    gateway: G,
    state: Mutex<SubmissionState>,
    timeout: Option<Duration>,
}

impl<G: BookingGateway> SubmissionController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: Mutex::new(SubmissionState::Idle),
            timeout: None,
        }
    }

    /// Treats a boundary call that has not resolved after `timeout` as failed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SubmissionState {
        self.lock_state().clone()
    }

    pub fn is_pending(&self) -> bool {
        *self.lock_state() == SubmissionState::Pending
    }

    /// Called after every form edit. A settled outcome no longer describes
    /// the form, so the controller goes back to idle.
    pub fn note_edit(&self) {
        let mut state = self.lock_state();
        if state.is_terminal() {
            tracing::debug!("Form edited after {}, back to idle", *state);
            *state = SubmissionState::Idle;
        }
    }

    /// Validates `form` and moves to pending.
    ///
    /// Fails with [`BookingError::SubmissionInFlight`] while another
    /// submission is pending, and with [`BookingError::Validation`] when the
    /// form is incomplete. In both cases the state is left as it was and the
    /// gateway is not contacted.
    pub fn begin<F: FormModel>(&self, form: &F) -> Result<PendingSubmission<'_, G>> {
        let mut state = self.lock_state();
        if *state == SubmissionState::Pending {
            tracing::warn!("Ignoring submit: a submission is already in flight");
            return Err(BookingError::SubmissionInFlight);
        }

        if let Err(e) = form.validate() {
            tracing::info!("Submit refused: {}", e);
            return Err(e);
        }

        let request = form.to_submission();
        *state = SubmissionState::Pending;
        tracing::info!("Submitting {} request", request.kind());

        Ok(PendingSubmission {
            controller: self,
            request,
            settled: false,
        })
    }

    pub async fn submit<F: FormModel>(&self, form: &F) -> Result<()> {
        self.begin(form)?.send().await
    }
}

pub struct PendingSubmission<'a, G: BookingGateway> {
    controller: &'a SubmissionController<G>,
    request: SubmissionRequest,
    settled: bool,
}

impl<G: BookingGateway> PendingSubmission<'_, G> {
    pub fn request(&self) -> &SubmissionRequest {
        &self.request
    }

    async fn dispatch(&self) -> Result<()> {
        let gateway = &self.controller.gateway;
        match &self.request {
            SubmissionRequest::Booking(request) => gateway.submit_booking(request).await,
            SubmissionRequest::Contact(request) => gateway.submit_contact(request).await,
        }
    }

    pub async fn send(mut self) -> Result<()> {
        let outcome = match self.controller.timeout {
            Some(limit) => tokio::time::timeout(limit, self.dispatch())
                .await
                .unwrap_or(Err(BookingError::Timeout { after: limit })),
            None => self.dispatch().await,
        };

        self.settled = true;
        let mut state = self.controller.lock_state();
        match &outcome {
            Ok(()) => {
                tracing::info!("{} request accepted", self.request.kind());
                *state = SubmissionState::Succeeded;
            }
            Err(e) => {
                tracing::warn!("{} request failed: {}", self.request.kind(), e);
                *state = SubmissionState::Failed {
                    reason: e.user_friendly_message(),
                };
            }
        }

        outcome
    }
}

impl<G: BookingGateway> Drop for PendingSubmission<'_, G> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("{} request abandoned before it settled", self.request.kind());
            *self.controller.lock_state() = SubmissionState::Idle;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::configuration::BookingChange;
    use crate::domain::model::{BookingRequest, ContactRequest, Frequency, ServiceType};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// In-memory gateway that records what it was sent.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingGateway {
        pub(crate) bookings: Arc<Mutex<Vec<BookingRequest>>>,
        pub(crate) contacts: Arc<Mutex<Vec<ContactRequest>>>,
        pub(crate) reject_with: Option<u16>,
        pub(crate) delay: Option<Duration>,
    }

    impl RecordingGateway {
        pub(crate) fn rejecting(status: u16) -> Self {
            Self {
                reject_with: Some(status),
                ..Self::default()
            }
        }

        pub(crate) fn booking_count(&self) -> usize {
            self.bookings.lock().unwrap().len()
        }

        async fn outcome(&self) -> Result<()> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match self.reject_with {
                Some(status) => Err(BookingError::Rejected { status }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl BookingGateway for RecordingGateway {
        async fn submit_booking(&self, request: &BookingRequest) -> Result<()> {
            self.bookings.lock().unwrap().push(request.clone());
            self.outcome().await
        }

        async fn submit_contact(&self, request: &ContactRequest) -> Result<()> {
            self.contacts.lock().unwrap().push(request.clone());
            self.outcome().await
        }
    }

    pub(crate) fn valid_booking() -> Configuration {
        let mut configuration = Configuration::default();
        configuration.apply_all([
            BookingChange::ServiceType(ServiceType::Deep),
            BookingChange::Rooms(3),
            BookingChange::Bathrooms(2),
            BookingChange::Frequency(Frequency::Weekly),
            BookingChange::PreferredDate("2099-06-01".to_string()),
            BookingChange::PreferredTime("9:00 AM".to_string()),
            BookingChange::FirstName("Grace".to_string()),
            BookingChange::LastName("Hopper".to_string()),
            BookingChange::Email("grace@example.com".to_string()),
            BookingChange::Phone("555-0100".to_string()),
            BookingChange::Address("12 Harbor Rd".to_string()),
        ]);
        configuration
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let gateway = RecordingGateway::default();
        let controller = SubmissionController::new(gateway.clone());

        controller.submit(&valid_booking()).await.unwrap();

        assert_eq!(controller.state(), SubmissionState::Succeeded);
        let sent = gateway.bookings.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].estimated_price, 198);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_gateway() {
        let gateway = RecordingGateway::default();
        let controller = SubmissionController::new(gateway.clone());
        let mut configuration = valid_booking();
        configuration.apply(BookingChange::FirstName(String::new()));

        let err = controller.submit(&configuration).await.unwrap_err();

        match err {
            BookingError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(gateway.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_rejection_moves_to_failed() {
        let controller = SubmissionController::new(RecordingGateway::rejecting(500));

        let err = controller.submit(&valid_booking()).await.unwrap_err();

        assert!(matches!(err, BookingError::Rejected { status: 500 }));
        match controller.state() {
            SubmissionState::Failed { reason } => {
                assert!(reason.contains("try again"));
            }
            other => panic!("expected failed state, got {}", other),
        }
    }

    #[test]
    fn test_second_submit_while_pending_is_refused() {
        let gateway = RecordingGateway::default();
        let controller = SubmissionController::new(gateway.clone());
        let form = valid_booking();

        let pending = controller.begin(&form).unwrap();
        assert!(controller.is_pending());

        let second = controller.begin(&form);
        assert!(matches!(second, Err(BookingError::SubmissionInFlight)));
        assert!(controller.is_pending());

        drop(pending);
        assert_eq!(gateway.booking_count(), 0);
    }

    #[test]
    fn test_abandoned_submission_returns_to_idle() {
        let controller = SubmissionController::new(RecordingGateway::default());
        let form = valid_booking();

        let pending = controller.begin(&form).unwrap();
        assert_eq!(pending.request().kind(), "booking");
        drop(pending);

        assert_eq!(controller.state(), SubmissionState::Idle);
        assert!(controller.begin(&form).is_ok());
    }

    #[test]
    fn test_edit_after_terminal_state_resets_to_idle() {
        let controller = SubmissionController::new(RecordingGateway::rejecting(422));
        tokio_test::block_on(async {
            assert!(controller.submit(&valid_booking()).await.is_err());
        });
        assert!(controller.state().is_terminal());

        controller.note_edit();
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_edit_while_pending_keeps_pending() {
        let controller = SubmissionController::new(RecordingGateway::default());
        let form = valid_booking();
        let _pending = controller.begin(&form).unwrap();

        controller.note_edit();
        assert!(controller.is_pending());
    }

    #[tokio::test]
    async fn test_slow_gateway_times_out() {
        let gateway = RecordingGateway {
            delay: Some(Duration::from_secs(5)),
            ..RecordingGateway::default()
        };
        let controller =
            SubmissionController::new(gateway).with_timeout(Duration::from_millis(20));

        let err = controller.submit(&valid_booking()).await.unwrap_err();

        assert!(matches!(err, BookingError::Timeout { .. }));
        assert!(matches!(controller.state(), SubmissionState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_contact_submission() {
        use crate::core::contact::ContactChange;

        let gateway = RecordingGateway::default();
        let controller = SubmissionController::new(gateway.clone());
        let mut message = ContactMessage::default();
        message.apply_all([
            ContactChange::FirstName("Ada".to_string()),
            ContactChange::LastName("Lovelace".to_string()),
            ContactChange::Email("ada@example.com".to_string()),
            ContactChange::Message("Do you bring supplies?".to_string()),
        ]);

        controller.submit(&message).await.unwrap();

        assert_eq!(controller.state(), SubmissionState::Succeeded);
        assert_eq!(gateway.contacts.lock().unwrap().len(), 1);
    }
}
