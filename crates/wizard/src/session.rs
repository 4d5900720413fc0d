//! UI-facing wizard session.
//!
//! Owns the state machine, the active step form, and the client handles,
//! and exposes the three operations the page layer drives: read the
//! current step, submit it, go to the previous one. Forms validate and
//! hand normalized values to the session; the session turns them into
//! machine commands and applies the resulting events.

use thiserror::Error;

use eventreg_catalog::{EventCatalog, EventSummary};
use eventreg_client::{EventApi, OrderSubmitter, Tracker, WizardContext};
use eventreg_core::{Aggregate, DomainError, DomainResult};

use crate::confirmation::Confirmation;
use crate::forms::{CustomerForm, PaymentError, PaymentForm, PaymentOutcome, TicketsForm};
use crate::machine::{
    CompleteOrder, ConfirmCustomer, ConfirmTickets, ReturnToCustomer, ReturnToTickets, Wizard,
    WizardCommand, WizardStep,
};

/// Failure surfaced by the session to the page layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An illegal machine transition was attempted.
    #[error(transparent)]
    Wizard(#[from] DomainError),

    /// Payment submission failed in a way the form could not absorb
    /// (contract violation or transport failure).
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

#[derive(Debug)]
enum ActiveForm {
    Customer(CustomerForm),
    Tickets(TicketsForm),
    Payment(PaymentForm),
    Done,
}

fn form_for(wizard: &Wizard) -> ActiveForm {
    match wizard.step() {
        WizardStep::Customer { draft, .. } => ActiveForm::Customer(CustomerForm::new(draft.clone())),
        WizardStep::Tickets { draft, .. } => {
            ActiveForm::Tickets(TicketsForm::new(wizard.editor().clone(), draft.clone()))
        }
        WizardStep::Payment { draft, .. } => ActiveForm::Payment(PaymentForm::new(draft.clone())),
        WizardStep::Done { .. } => ActiveForm::Done,
    }
}

/// One wizard run wired to its collaborators.
#[derive(Debug)]
pub struct WizardSession<A: EventApi, T: Tracker> {
    event: EventSummary,
    catalog: EventCatalog,
    wizard: Wizard,
    form: ActiveForm,
    api: A,
    tracker: T,
}

impl<A: EventApi, T: Tracker> WizardSession<A, T> {
    /// Start a session from a loaded context. A valid pre-filled profile
    /// enters directly at the tickets step.
    pub fn start(context: WizardContext, api: A, tracker: T) -> Self {
        let wizard = match context.profile {
            Some(customer) => Wizard::begin_with_customer(&context.catalog, customer),
            None => Wizard::begin(&context.catalog),
        };
        let form = form_for(&wizard);
        Self {
            event: context.event,
            catalog: context.catalog,
            wizard,
            form,
            api,
            tracker,
        }
    }

    pub fn event(&self) -> &EventSummary {
        &self.event
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn step(&self) -> &WizardStep {
        self.wizard.step()
    }

    /// Zero-based position for step-progress displays.
    pub fn step_index(&self) -> usize {
        self.wizard.step_index()
    }

    pub fn is_done(&self) -> bool {
        self.wizard.is_done()
    }

    /// The customer form, while that step is active.
    pub fn customer_form(&mut self) -> Option<&mut CustomerForm> {
        match &mut self.form {
            ActiveForm::Customer(form) => Some(form),
            _ => None,
        }
    }

    /// The tickets form, while that step is active.
    pub fn tickets_form(&mut self) -> Option<&mut TicketsForm> {
        match &mut self.form {
            ActiveForm::Tickets(form) => Some(form),
            _ => None,
        }
    }

    /// The payment form, while that step is active.
    pub fn payment_form(&mut self) -> Option<&mut PaymentForm> {
        match &mut self.form {
            ActiveForm::Payment(form) => Some(form),
            _ => None,
        }
    }

    /// The confirmation view, once the wizard is done.
    pub fn confirmation(&self) -> Option<Confirmation> {
        match self.wizard.step() {
            WizardStep::Done { order } => Some(Confirmation::for_order(order)),
            _ => None,
        }
    }

    /// Submit the customer step. Returns whether the wizard advanced.
    pub fn submit_customer(&mut self) -> Result<bool, SessionError> {
        let customer = match &mut self.form {
            ActiveForm::Customer(form) => form.submit(),
            _ => return Ok(false),
        };
        let Some(customer) = customer else {
            return Ok(false);
        };
        self.dispatch(WizardCommand::ConfirmCustomer(ConfirmCustomer { customer }))?;
        Ok(true)
    }

    /// Submit the tickets step. Returns whether the wizard advanced.
    pub fn submit_tickets(&mut self) -> Result<bool, SessionError> {
        let tickets = match &mut self.form {
            ActiveForm::Tickets(form) => form.submit(),
            _ => return Ok(false),
        };
        let Some(tickets) = tickets else {
            return Ok(false);
        };
        self.dispatch(WizardCommand::ConfirmTickets(ConfirmTickets { tickets }))?;
        Ok(true)
    }

    /// Submit the payment step, driving the order submission.
    ///
    /// Returns whether the wizard reached the confirmation step. Local and
    /// remote validation failures stay on the form; contract violations and
    /// transport failures propagate.
    pub async fn submit_payment(&mut self) -> Result<bool, SessionError> {
        let (customer, tickets) = match self.wizard.step() {
            WizardStep::Payment {
                customer, tickets, ..
            } => (customer.clone(), tickets.clone()),
            _ => return Ok(false),
        };
        let event_id = self.event.id;
        let ActiveForm::Payment(form) = &mut self.form else {
            return Ok(false);
        };

        let submitter = OrderSubmitter::new(&self.api, &self.tracker);
        let outcome = form
            .submit(&submitter, event_id, &self.catalog, &customer, &tickets)
            .await?;

        match outcome {
            PaymentOutcome::Completed(order) => {
                self.dispatch(WizardCommand::CompleteOrder(CompleteOrder { order }))?;
                Ok(true)
            }
            PaymentOutcome::Rejected => Ok(false),
        }
    }

    /// Go back one step, preserving the in-progress draft. Refused at the
    /// first step, at the confirmation step, and while a submission is
    /// outstanding.
    pub fn previous(&mut self) -> Result<bool, SessionError> {
        let command = match &self.form {
            ActiveForm::Tickets(form) => {
                Some(WizardCommand::ReturnToCustomer(ReturnToCustomer {
                    tickets: form.rows().to_vec(),
                }))
            }
            ActiveForm::Payment(form) if !form.is_busy() => {
                Some(WizardCommand::ReturnToTickets(ReturnToTickets {
                    payment: form.values().clone(),
                }))
            }
            _ => None,
        };
        match command {
            Some(command) => {
                self.dispatch(command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn dispatch(&mut self, command: WizardCommand) -> DomainResult<()> {
        let events = self.wizard.handle(&command)?;
        for event in &events {
            self.wizard.apply(event);
        }
        self.form = form_for(&self.wizard);
        tracing::debug!(
            wizard_id = %self.wizard.id_typed(),
            step = self.wizard.step_index(),
            "wizard step changed"
        );
        Ok(())
    }
}
