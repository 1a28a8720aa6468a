//! Type-to-select search state for llama.
//!
//! Search is a transient mode on top of browsing. Every activation and every
//! query edit starts a new session id; a delayed expiry only closes search if it
//! carries the id that is still current, so an older timer never ends a
//! session that received input after it was scheduled.

#[derive(Debug, Default)]
pub struct SearchState {
    active: bool,
    query: String,
    session_id: u64,
    matched: Vec<usize>,
}

impl SearchState {
    // Getters / Accessors

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Character positions of the top match, for highlighting.
    #[inline]
    pub fn matched(&self) -> &[usize] {
        &self.matched
    }

    // Mutators

    /// Enters search mode with an empty query and returns the new session id.
    pub fn activate(&mut self) -> u64 {
        self.active = true;
        self.query.clear();
        self.matched.clear();
        self.next_session()
    }

    /// Leaves search mode. The cursor stays wherever the query moved it.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Appends text to the query and returns the new session id.
    pub fn push(&mut self, c: char) -> u64 {
        self.query.push(c);
        self.next_session()
    }

    /// Removes the last query character.
    ///
    /// Returns the new session id, or `None` when the query was already empty.
    pub fn pop(&mut self) -> Option<u64> {
        self.query.pop()?;
        Some(self.next_session())
    }

    pub fn set_matched(&mut self, positions: Vec<usize>) {
        self.matched = positions;
    }

    pub fn clear_matched(&mut self) {
        self.matched.clear();
    }

    /// Handles a delayed expiry. Returns true if search mode was closed.
    pub fn expire(&mut self, session_id: u64) -> bool {
        if self.active && session_id == self.session_id {
            self.active = false;
            true
        } else {
            false
        }
    }

    fn next_session(&mut self) -> u64 {
        self.session_id = self.session_id.wrapping_add(1);
        self.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_resets_query_and_bumps_session() {
        let mut search = SearchState::default();
        let first = search.activate();
        search.push('a');
        search.set_matched(vec![0]);
        search.deactivate();

        let second = search.activate();
        assert!(second > first);
        assert!(search.is_active());
        assert!(search.query().is_empty());
        assert!(search.matched().is_empty());
    }

    #[test]
    fn stale_expiry_is_ignored() {
        let mut search = SearchState::default();
        search.activate();
        let old = search.push('s');
        let newer = search.push('r');
        assert!(!search.expire(old));
        assert!(search.is_active());
        assert!(search.expire(newer));
        assert!(!search.is_active());
    }

    #[test]
    fn expiry_from_previous_activation_does_not_close_new_one() {
        let mut search = SearchState::default();
        search.activate();
        let old = search.push('x');
        search.deactivate();
        search.activate();
        assert!(!search.expire(old));
        assert!(search.is_active());
    }

    #[test]
    fn pop_on_empty_query_is_none() {
        let mut search = SearchState::default();
        let id = search.activate();
        assert_eq!(search.pop(), None);
        assert_eq!(search.session_id(), id);
        search.push('a');
        assert!(search.pop().is_some());
        assert_eq!(search.query(), "");
    }
}
