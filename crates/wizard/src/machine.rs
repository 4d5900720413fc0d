use serde::{Deserialize, Serialize};

use eventreg_catalog::EventCatalog;
use eventreg_core::{Aggregate, AggregateRoot, DomainError, WizardId};
use eventreg_orders::{
    Customer, CustomerDraft, Order, PaymentDraft, Ticket, TicketDraft, TicketListEditor,
};

/// Wizard step state.
///
/// A tagged union over the four steps, each carrying exactly the data known
/// to be valid at that point plus any in-progress drafts preserved by
/// back-navigation. A step whose predecessor's data is absent cannot be
/// represented, so steps cannot be skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    /// Buyer identity is being edited.
    Customer {
        draft: CustomerDraft,
        /// Ticket list preserved when the user stepped back from the
        /// tickets step; restored instead of reseeding on re-advance.
        stashed_tickets: Option<Vec<TicketDraft>>,
    },
    /// Attendee tickets are being edited; the buyer is committed.
    Tickets {
        customer: Customer,
        draft: Vec<TicketDraft>,
        /// Payment draft preserved when the user stepped back from the
        /// payment step.
        stashed_payment: Option<PaymentDraft>,
    },
    /// Payment is being selected; buyer and attendees are committed.
    Payment {
        customer: Customer,
        tickets: Vec<Ticket>,
        draft: PaymentDraft,
    },
    /// Terminal: the order exists.
    Done { order: Order },
}

impl WizardStep {
    fn label(&self) -> &'static str {
        match self {
            WizardStep::Customer { .. } => "customer",
            WizardStep::Tickets { .. } => "tickets",
            WizardStep::Payment { .. } => "payment",
            WizardStep::Done { .. } => "done",
        }
    }
}

/// Command: ConfirmCustomer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmCustomer {
    pub customer: Customer,
}

/// Command: ReturnToCustomer (carries the in-progress ticket list so
/// re-advancing does not lose edits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnToCustomer {
    pub tickets: Vec<TicketDraft>,
}

/// Command: ConfirmTickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmTickets {
    pub tickets: Vec<Ticket>,
}

/// Command: ReturnToTickets (carries the in-progress payment draft).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnToTickets {
    pub payment: PaymentDraft,
}

/// Command: CompleteOrder. Issued only after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteOrder {
    pub order: Order,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardCommand {
    ConfirmCustomer(ConfirmCustomer),
    ReturnToCustomer(ReturnToCustomer),
    ConfirmTickets(ConfirmTickets),
    ReturnToTickets(ReturnToTickets),
    CompleteOrder(CompleteOrder),
}

impl WizardCommand {
    fn label(&self) -> &'static str {
        match self {
            WizardCommand::ConfirmCustomer(_) => "ConfirmCustomer",
            WizardCommand::ReturnToCustomer(_) => "ReturnToCustomer",
            WizardCommand::ConfirmTickets(_) => "ConfirmTickets",
            WizardCommand::ReturnToTickets(_) => "ReturnToTickets",
            WizardCommand::CompleteOrder(_) => "CompleteOrder",
        }
    }
}

/// Event: CustomerConfirmed. Carries the ticket list the next step starts
/// from (the stashed one, or a fresh seed from the customer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerConfirmed {
    pub customer: Customer,
    pub tickets: Vec<TicketDraft>,
}

/// Event: SteppedBackToCustomer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteppedBackToCustomer {
    pub draft: CustomerDraft,
    pub tickets: Vec<TicketDraft>,
}

/// Event: TicketsConfirmed. Carries the payment draft the next step starts
/// from (the stashed one, or the initial draft with the sole method
/// pre-selected).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketsConfirmed {
    pub tickets: Vec<Ticket>,
    pub payment: PaymentDraft,
}

/// Event: SteppedBackToTickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteppedBackToTickets {
    pub payment: PaymentDraft,
}

/// Event: OrderCompleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCompleted {
    pub order: Order,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardEvent {
    CustomerConfirmed(CustomerConfirmed),
    SteppedBackToCustomer(SteppedBackToCustomer),
    TicketsConfirmed(TicketsConfirmed),
    SteppedBackToTickets(SteppedBackToTickets),
    OrderCompleted(OrderCompleted),
}

/// The order wizard state machine.
///
/// Decision logic lives in `handle` (pure), state evolution in `apply`.
/// Field-level validity is the step forms' concern; the machine re-checks
/// only the structural invariants it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    id: WizardId,
    editor: TicketListEditor,
    default_payment_id: String,
    step: WizardStep,
    version: u64,
}

impl Wizard {
    /// Start a fresh wizard at the customer step.
    pub fn begin(catalog: &EventCatalog) -> Self {
        Self::with_step(
            catalog,
            WizardStep::Customer {
                draft: CustomerDraft::default(),
                stashed_tickets: None,
            },
        )
    }

    /// Start from an already-known customer (pre-filled profile), entering
    /// directly at the tickets step with a seeded list.
    pub fn begin_with_customer(catalog: &EventCatalog, customer: Customer) -> Self {
        let editor = TicketListEditor::new(catalog);
        let draft = editor.seed(&customer);
        Self::with_step(
            catalog,
            WizardStep::Tickets {
                customer,
                draft,
                stashed_payment: None,
            },
        )
    }

    fn with_step(catalog: &EventCatalog, step: WizardStep) -> Self {
        Self {
            id: WizardId::new(),
            editor: TicketListEditor::new(catalog),
            default_payment_id: catalog
                .sole_payment()
                .map(|p| p.id.to_string())
                .unwrap_or_default(),
            step,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> WizardId {
        self.id
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn editor(&self) -> &TicketListEditor {
        &self.editor
    }

    pub fn is_done(&self) -> bool {
        matches!(self.step, WizardStep::Done { .. })
    }

    /// Zero-based position for step-progress displays.
    pub fn step_index(&self) -> usize {
        match self.step {
            WizardStep::Customer { .. } => 0,
            WizardStep::Tickets { .. } => 1,
            WizardStep::Payment { .. } => 2,
            WizardStep::Done { .. } => 3,
        }
    }

    /// The payment draft a fresh payment step starts from.
    fn initial_payment_draft(&self) -> PaymentDraft {
        PaymentDraft {
            payment_id: self.default_payment_id.clone(),
            ..PaymentDraft::default()
        }
    }

    fn illegal(&self, command: &WizardCommand) -> DomainError {
        DomainError::invariant(format!(
            "{} is not allowed at the {} step",
            command.label(),
            self.step.label()
        ))
    }
}

impl AggregateRoot for Wizard {
    type Id = WizardId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Wizard {
    type Command = WizardCommand;
    type Event = WizardEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        let step = std::mem::replace(
            &mut self.step,
            WizardStep::Customer {
                draft: CustomerDraft::default(),
                stashed_tickets: None,
            },
        );

        self.step = match (step, event) {
            (WizardStep::Customer { .. }, WizardEvent::CustomerConfirmed(e)) => {
                WizardStep::Tickets {
                    customer: e.customer.clone(),
                    draft: e.tickets.clone(),
                    stashed_payment: None,
                }
            }
            (WizardStep::Tickets { .. }, WizardEvent::SteppedBackToCustomer(e)) => {
                WizardStep::Customer {
                    draft: e.draft.clone(),
                    stashed_tickets: Some(e.tickets.clone()),
                }
            }
            (WizardStep::Tickets { customer, .. }, WizardEvent::TicketsConfirmed(e)) => {
                WizardStep::Payment {
                    customer,
                    tickets: e.tickets.clone(),
                    draft: e.payment.clone(),
                }
            }
            (
                WizardStep::Payment {
                    customer, tickets, ..
                },
                WizardEvent::SteppedBackToTickets(e),
            ) => WizardStep::Tickets {
                customer,
                draft: tickets.iter().map(Ticket::draft).collect(),
                stashed_payment: Some(e.payment.clone()),
            },
            (WizardStep::Payment { .. }, WizardEvent::OrderCompleted(e)) => WizardStep::Done {
                order: e.order.clone(),
            },
            // Event does not apply to this step; state is left unchanged.
            (step, _) => step,
        };

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match (&self.step, command) {
            (
                WizardStep::Customer {
                    stashed_tickets, ..
                },
                WizardCommand::ConfirmCustomer(cmd),
            ) => {
                let tickets = stashed_tickets
                    .clone()
                    .unwrap_or_else(|| self.editor.seed(&cmd.customer));
                Ok(vec![WizardEvent::CustomerConfirmed(CustomerConfirmed {
                    customer: cmd.customer.clone(),
                    tickets,
                })])
            }
            (WizardStep::Tickets { customer, .. }, WizardCommand::ReturnToCustomer(cmd)) => {
                Ok(vec![WizardEvent::SteppedBackToCustomer(
                    SteppedBackToCustomer {
                        draft: customer.draft(),
                        tickets: cmd.tickets.clone(),
                    },
                )])
            }
            (
                WizardStep::Tickets {
                    stashed_payment, ..
                },
                WizardCommand::ConfirmTickets(cmd),
            ) => {
                if cmd.tickets.is_empty() {
                    return Err(DomainError::validation(
                        "at least one attendee is required",
                    ));
                }
                let payment = stashed_payment
                    .clone()
                    .unwrap_or_else(|| self.initial_payment_draft());
                Ok(vec![WizardEvent::TicketsConfirmed(TicketsConfirmed {
                    tickets: cmd.tickets.clone(),
                    payment,
                })])
            }
            (WizardStep::Payment { .. }, WizardCommand::ReturnToTickets(cmd)) => {
                Ok(vec![WizardEvent::SteppedBackToTickets(
                    SteppedBackToTickets {
                        payment: cmd.payment.clone(),
                    },
                )])
            }
            (WizardStep::Payment { .. }, WizardCommand::CompleteOrder(cmd)) => {
                Ok(vec![WizardEvent::OrderCompleted(OrderCompleted {
                    order: cmd.order.clone(),
                })])
            }
            _ => Err(self.illegal(command)),
        }
    }
}
