use std::cell::Cell;
use std::rc::Rc;

/// Monotonic ticket counter for debounced lookups. Each keystroke issues a
/// new ticket; a response may only publish its results while its ticket is
/// still the latest, so overlapping in-flight requests resolve to
/// last-issued-wins instead of racing into shared state.
#[derive(Clone, Default)]
pub struct LatestTicket {
    current: Rc<Cell<u64>>,
}

impl LatestTicket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        let next = self.current.get() + 1;
        self.current.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current.get() == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::LatestTicket;

    #[test]
    fn only_the_latest_ticket_is_current() {
        let guard = LatestTicket::new();
        let first = guard.issue();
        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn clones_share_the_counter() {
        let guard = LatestTicket::new();
        let clone = guard.clone();
        let ticket = guard.issue();
        assert!(clone.is_current(ticket));
        clone.issue();
        assert!(!guard.is_current(ticket));
    }
}
