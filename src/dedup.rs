// dedup.rs - Tested-Parameter Dedup Registry
// Purpose: Track (URL, parameter) pairs that already have a probe in flight
// so the remaining payload variants for that parameter short-circuit without
// a network call.

use std::collections::HashSet;
use std::sync::Mutex;

/// Per-scan registry of claimed (URL, parameter) keys.
///
/// First claimant wins: under concurrent execution, which payload ends up
/// probing a given parameter depends on task scheduling. That race is a
/// documented property of the scanner, not a bug.
#[derive(Debug, Default)]
pub struct DedupRegistry {
    claimed: Mutex<HashSet<String>>,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim a (URL, parameter) key. Returns true exactly once
    /// per key, for the first caller; every later caller gets false.
    pub fn try_claim(&self, url: &str, param: &str) -> bool {
        let key = format!("{}:{}", url, param);
        self.claimed.lock().unwrap().insert(key)
    }

    /// Number of parameters claimed so far.
    pub fn claimed_count(&self) -> usize {
        self.claimed.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn second_claim_is_rejected() {
        let registry = DedupRegistry::new();
        assert!(registry.try_claim("http://example.test/?id=1", "id"));
        assert!(!registry.try_claim("http://example.test/?id=1", "id"));
        assert_eq!(registry.claimed_count(), 1);
    }

    #[test]
    fn distinct_params_claim_independently() {
        let registry = DedupRegistry::new();
        assert!(registry.try_claim("http://example.test/?id=1&name=x", "id"));
        assert!(registry.try_claim("http://example.test/?id=1&name=x", "name"));
        assert_eq!(registry.claimed_count(), 2);
    }

    #[test]
    fn same_param_on_different_urls_claims_independently() {
        let registry = DedupRegistry::new();
        assert!(registry.try_claim("http://a.test/?id=1", "id"));
        assert!(registry.try_claim("http://b.test/?id=1", "id"));
    }

    #[test]
    fn exactly_one_winner_among_concurrent_claimants() {
        let registry = Arc::new(DedupRegistry::new());

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.try_claim("http://example.test/?id=1", "id"))
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();
        assert_eq!(wins, 1);
    }
}
