use std::fmt;

/// Kind of fetch dispatched to the search service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchKind {
    Recent,
    Query,
    ById(String),
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchKind::Recent => f.write_str("recent"),
            FetchKind::Query => f.write_str("query"),
            FetchKind::ById(id) => write!(f, "by-id {id}"),
        }
    }
}

/// Token attached to a dispatched fetch and echoed back with its response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub sequence: u64,
    pub kind: FetchKind,
}

/// Monotonic request counter.
///
/// Only the most recently issued ticket is current; responses carrying an
/// older ticket resolved out of order and must be discarded.
#[derive(Clone, Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self, kind: FetchKind) -> FetchTicket {
        self.latest += 1;
        FetchTicket {
            sequence: self.latest,
            kind,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.sequence == self.latest
    }

    /// Retire every outstanding ticket without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}
