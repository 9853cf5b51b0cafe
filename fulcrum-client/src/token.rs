//! Credential cell
//!
//! Single-slot, overwrite-only store for the agent's bearer credential,
//! shared between the HTTP client (which reads it on every request) and the
//! management endpoint (which replaces it on rotation). Replacement is
//! atomic: a reader sees either the old value or the new one, never a mix,
//! and no history is kept.

use std::sync::RwLock;

/// Holds the current bearer credential.
#[derive(Debug)]
pub struct TokenCell {
    inner: RwLock<String>,
}

impl TokenCell {
    /// Creates a cell holding the initial credential.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(token.into()),
        }
    }

    /// Returns the current credential.
    pub fn get(&self) -> String {
        self.inner.read().unwrap().clone()
    }

    /// Atomically replaces the credential. Visible to all subsequent reads;
    /// requests already built with the old value are unaffected.
    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().unwrap() = token.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_replacement_is_visible() {
        let cell = TokenCell::new("initial");
        assert_eq!(cell.get(), "initial");

        cell.set("rotated");
        assert_eq!(cell.get(), "rotated");
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_values() {
        let cell = Arc::new(TokenCell::new("old-token"));

        let writer = {
            let cell = Arc::clone(&cell);
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    cell.set("new-token");
                    cell.set("old-token");
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cell = Arc::clone(&cell);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let token = cell.get();
                        assert!(token == "old-token" || token == "new-token");
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
