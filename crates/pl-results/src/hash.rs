//! Content-based hashing for run IDs.

use pl_project::schema::Scenario;
use sha2::{Digest, Sha256};

use crate::ResultsResult;

/// Length of a hex-encoded SHA-256 digest.
pub const RUN_ID_LEN: usize = 64;

pub fn compute_run_id(scenario: &Scenario, engine_version: &str) -> ResultsResult<String> {
    let mut hasher = Sha256::new();

    hasher.update(serde_json::to_vec(scenario)?);
    hasher.update(engine_version.as_bytes());

    Ok(format!("{:x}", hasher.finalize()))
}

/// True for ids in the form produced by [`compute_run_id`].
pub fn is_valid_run_id(run_id: &str) -> bool {
    run_id.len() == RUN_ID_LEN
        && run_id
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_stability() {
        let scenario = Scenario::default();
        let hash1 = compute_run_id(&scenario, "v1").unwrap();
        let hash2 = compute_run_id(&scenario, "v1").unwrap();

        assert_eq!(hash1, hash2);
        assert!(is_valid_run_id(&hash1));
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let base = Scenario::default();
        let mut retuned = Scenario::default();
        retuned.controller.kp = 1.2;

        let id = |s: &Scenario, v: &str| compute_run_id(s, v).unwrap();
        assert_ne!(id(&base, "v1"), id(&retuned, "v1"));
        assert_ne!(id(&base, "v1"), id(&base, "v2"));
    }

    #[test]
    fn run_id_format() {
        assert!(is_valid_run_id(&"0123456789abcdef".repeat(4)));
        assert!(!is_valid_run_id(&"0123456789ABCDEF".repeat(4)));
        assert!(!is_valid_run_id(&"a".repeat(63)));
        assert!(!is_valid_run_id(&"a".repeat(65)));
        assert!(!is_valid_run_id(".."));
        assert!(!is_valid_run_id(&format!("../{}", "a".repeat(61))));
    }
}
