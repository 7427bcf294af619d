// Roster draft editing and submission validation.

use thiserror::Error;

/// Number of players in a balance request.
pub const ROSTER_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Fewer (or more) than ten identifiers after trimming. `found` is the
    /// number of non-empty entries.
    #[error("Need exactly 10 vanity URLs")]
    IncompleteRoster { found: usize },
}

// ---------------------------------------------------------------------------
// RosterDraft
// ---------------------------------------------------------------------------

/// The user's in-progress, unsubmitted set of ten identifier slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterDraft {
    slots: [String; ROSTER_SIZE],
}

impl RosterDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a draft from up to ten entries; missing slots stay empty and
    /// extra entries are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut draft = Self::new();
        for (slot, entry) in draft.slots.iter_mut().zip(entries) {
            *slot = entry.into();
        }
        draft
    }

    pub fn slots(&self) -> &[String; ROSTER_SIZE] {
        &self.slots
    }

    /// Raw contents of slot `index`, or `None` when out of range.
    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    /// Replace slot `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = value.into();
        }
    }

    pub fn push_char(&mut self, index: usize, c: char) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.push(c);
        }
    }

    pub fn pop_char(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.pop();
        }
    }

    pub fn clear_slot(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.clear();
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(String::clear);
    }

    /// Whether slot `index` holds a non-blank entry.
    pub fn is_filled(&self, index: usize) -> bool {
        self.slot(index).is_some_and(|s| !s.trim().is_empty())
    }

    /// Number of non-blank slots (the `N/10` indicator).
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.trim().is_empty()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == ROSTER_SIZE
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// A validated roster: exactly ten trimmed, non-empty identifiers in the
/// order they were entered. Only constructible through validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    identifiers: Vec<String>,
}

impl Roster {
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn into_identifiers(self) -> Vec<String> {
        self.identifiers
    }
}

/// Validate a draft snapshot for submission.
pub fn validate(draft: &RosterDraft) -> Result<Roster, ValidationError> {
    validate_entries(draft.slots())
}

/// Trim every entry, drop blanks, and require exactly ten to remain.
///
/// Identifiers are neither deduplicated nor syntax-checked.
pub fn validate_entries<I, S>(entries: I) -> Result<Roster, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let identifiers: Vec<String> = entries
        .into_iter()
        .map(|e| e.as_ref().trim().to_string())
        .filter(|e| !e.is_empty())
        .collect();

    if identifiers.len() != ROSTER_SIZE {
        return Err(ValidationError::IncompleteRoster {
            found: identifiers.len(),
        });
    }

    Ok(Roster { identifiers })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
