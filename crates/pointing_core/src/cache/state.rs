//! Read-cursor state machine for the direction cache.
//!
//! **States:** `Cold -> Filling -> Idle | Eof`, with `Rewind` returning any
//! state to `Cold`.
//!
//! Transitions happen only inside the fill routine. Outside a fill the
//! cache is `Cold`, `Idle` or `Eof`, never `Filling`.

// ─── States ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheState {
    /// No row read since construction or the last rewind.
    Cold,
    /// Reading rows to satisfy a pending lookup.
    Filling,
    /// Between lookups, rows remain.
    Idle,
    /// Every row has been read.
    Eof,
}

impl CacheState {
    pub fn is_eof(self) -> bool {
        self == CacheState::Eof
    }
}

// ─── Events ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillEvent {
    /// A fill loop starts.
    Begin,
    /// The fill loop stopped with rows remaining.
    Satisfied,
    /// The cursor reached the last row.
    Exhausted,
    /// Caches flushed, cursor back to row 0.
    Rewind,
}

// ─── Transitions ────────────────────────────────────────────────────────

/// Next state for `event`. Events that do not apply leave the state as is.
pub fn next_state(from: CacheState, event: FillEvent) -> CacheState {
    match (from, event) {
        (_, FillEvent::Rewind) => CacheState::Cold,

        (CacheState::Cold | CacheState::Idle, FillEvent::Begin) => CacheState::Filling,
        (CacheState::Filling, FillEvent::Satisfied) => CacheState::Idle,
        (CacheState::Filling, FillEvent::Exhausted) => CacheState::Eof,

        // An empty source is exhausted before anything is read.
        (CacheState::Cold | CacheState::Idle, FillEvent::Exhausted) => CacheState::Eof,

        (state, _) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_cycle() {
        let s = next_state(CacheState::Cold, FillEvent::Begin);
        assert_eq!(s, CacheState::Filling);
        let s = next_state(s, FillEvent::Satisfied);
        assert_eq!(s, CacheState::Idle);
        let s = next_state(s, FillEvent::Begin);
        let s = next_state(s, FillEvent::Exhausted);
        assert_eq!(s, CacheState::Eof);
    }

    #[test]
    fn test_eof_is_sticky_until_rewind() {
        assert_eq!(next_state(CacheState::Eof, FillEvent::Begin), CacheState::Eof);
        assert_eq!(next_state(CacheState::Eof, FillEvent::Satisfied), CacheState::Eof);
        assert_eq!(next_state(CacheState::Eof, FillEvent::Rewind), CacheState::Cold);
    }

    #[test]
    fn test_satisfied_outside_fill_is_ignored() {
        assert_eq!(next_state(CacheState::Idle, FillEvent::Satisfied), CacheState::Idle);
        assert_eq!(next_state(CacheState::Cold, FillEvent::Satisfied), CacheState::Cold);
    }
}
