//! Monotonic id generation.
//!
//! Every id handed out in a session comes from one [`IdGenerator`], so ids are
//! unique regardless of how quickly they are requested. Ids that enter the
//! session from persisted templates are fed back through [`IdGenerator::observe`]
//! to keep later ids from colliding with them.

/// Loaded suffixes above this are not observed. Ids beyond it can never be
/// generated, so they cannot collide with fresh ones.
const MAX_OBSERVED: u64 = u64::MAX >> 1;

/// Generates `<prefix>-<n>` ids from a single counter.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Creates a generator starting at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next raw counter value.
    pub fn next_value(&mut self) -> u64 {
        let value = self.next;
        self.next = value.saturating_add(1);
        value
    }

    /// Returns a fresh id of the form `<prefix>-<n>`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_value())
    }

    /// Advances the counter past the numeric suffix of `id`, if it has one.
    ///
    /// Suffixes too large to be reached by counting are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Some(n) = numeric_suffix(id).filter(|n| *n <= MAX_OBSERVED) {
            if n >= self.next {
                self.next = n.saturating_add(1);
            }
        }
    }

    /// Peeks at the value the next call will use.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn numeric_suffix(id: &str) -> Option<u64> {
    let digits_start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    id[digits_start..].parse().ok()
}
