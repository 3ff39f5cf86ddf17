use crate::core::configuration::Configuration;
use crate::core::contact::ContactMessage;
use crate::core::pricing::QuoteBreakdown;
use crate::core::submission::{FormModel, SubmissionController};
use crate::core::url_sync;
use crate::domain::model::SubmissionState;
use crate::domain::ports::BookingGateway;
use crate::utils::error::Result;

/// One form instance: the form it owns and the controller that submits it.
pub struct FormSession<F: FormModel, G: BookingGateway> {
    form: F,
    controller: SubmissionController<G>,
}

pub type BookingSession<G> = FormSession<Configuration, G>;
pub type ContactSession<G> = FormSession<ContactMessage, G>;

impl<F: FormModel, G: BookingGateway> FormSession<F, G> {
    pub fn new(controller: SubmissionController<G>) -> Self {
        Self::with_form(F::default(), controller)
    }

    pub fn with_form(form: F, controller: SubmissionController<G>) -> Self {
        Self { form, controller }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn controller(&self) -> &SubmissionController<G> {
        &self.controller
    }

    pub fn state(&self) -> SubmissionState {
        self.controller.state()
    }

    pub fn edit(&mut self, change: F::Change) {
        self.form.apply(change);
        self.controller.note_edit();
    }

    /// Submits the form. On success the form is cleared; on any error it is
    /// left exactly as it was so the user can fix it or retry.
    pub async fn submit(&mut self) -> Result<()> {
        let pending = self.controller.begin(&self.form)?;
        pending.send().await?;
        self.form = F::default();
        Ok(())
    }
}

impl<G: BookingGateway> FormSession<Configuration, G> {
    /// Opens the booking form seeded from a shared link's query string.
    pub fn from_query(query: &str, controller: SubmissionController<G>) -> Self {
        Self::with_form(url_sync::configuration_from_query(query), controller)
    }

    pub fn estimate(&self) -> u32 {
        self.form.estimated_price()
    }

    pub fn breakdown(&self) -> QuoteBreakdown {
        self.form.breakdown()
    }
}
