use serde::Serialize;

use crate::model::ticket::Ticket;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TicketJson {
    pub number: u64,
    pub title: String,
    pub path: String,
}

impl TicketJson {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        TicketJson {
            number: ticket.number,
            title: ticket.title.clone(),
            path: ticket.path.display().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct TicketListJson {
    pub tickets: Vec<TicketJson>,
}

#[derive(Serialize)]
pub struct SearchJson {
    pub query: String,
    pub matches: Vec<TicketJson>,
}

#[derive(Serialize)]
pub struct CreatedJson {
    pub number: u64,
    pub path: String,
}

/// Plain-text listing line for a ticket.
pub fn ticket_line(ticket: &Ticket) -> String {
    format!("{:>4}  {}", ticket.number, ticket.title)
}
