//! Attendee-list step controller.

use eventreg_orders::{Ticket, TicketDraft, TicketListEditor, TicketListErrors};

/// The attendee-list step form: a dynamic list of per-attendee rows over
/// the structural editor.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketsForm {
    editor: TicketListEditor,
    rows: Vec<TicketDraft>,
    errors: TicketListErrors,
}

impl TicketsForm {
    pub fn new(editor: TicketListEditor, rows: Vec<TicketDraft>) -> Self {
        Self {
            editor,
            rows,
            errors: TicketListErrors::default(),
        }
    }

    pub fn rows(&self) -> &[TicketDraft] {
        &self.rows
    }

    /// The UI edits row fields in place.
    pub fn rows_mut(&mut self) -> &mut Vec<TicketDraft> {
        &mut self.rows
    }

    pub fn errors(&self) -> &TicketListErrors {
        &self.errors
    }

    /// Whether the type selector is fixed (single selectable type).
    pub fn selector_inert(&self) -> bool {
        self.editor.selector_inert()
    }

    /// Add a blank attendee row at the end.
    pub fn append_row(&mut self) {
        self.rows = self.editor.append(std::mem::take(&mut self.rows));
        self.errors = TicketListErrors::default();
    }

    /// Remove the attendee row at `index`.
    pub fn remove_row(&mut self, index: usize) {
        self.rows = self.editor.remove(std::mem::take(&mut self.rows), index);
        self.errors = TicketListErrors::default();
    }

    /// Whether the UI offers removal for the row at `index`.
    pub fn can_remove(&self, index: usize) -> bool {
        TicketListEditor::can_remove(index)
    }

    /// Whether the UI offers the append action on the row at `index`.
    pub fn offers_append(&self, index: usize) -> bool {
        TicketListEditor::offers_append(&self.rows, index)
    }

    /// Validate the whole list; on success the committed tickets are
    /// returned. On failure every row keeps its entered values and carries
    /// its own error slots.
    pub fn submit(&mut self) -> Option<Vec<Ticket>> {
        match self.editor.validate(&self.rows) {
            Ok(tickets) => {
                self.errors = TicketListErrors::default();
                Some(tickets)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}
