#![allow(dead_code)]

extern crate std;

use crate::types::{OracleData, OracleInfo};

/// INV-1: A stored measurement always carries positive metrics.
pub fn assert_metrics_positive(data: &OracleData) {
    assert!(
        data.metrics.is_positive(),
        "INV-1 violated: stored metrics not positive: {:?}",
        data.metrics
    );
}

/// INV-2: Corrections never alter the attested hash, the submitter or the
/// submission sequence.
pub fn assert_record_identity_unchanged(original: &OracleData, current: &OracleData) {
    assert_eq!(
        original.data_hash, current.data_hash,
        "INV-2 violated: data hash changed"
    );
    assert_eq!(
        original.oracle, current.oracle,
        "INV-2 violated: submitting oracle changed"
    );
    assert_eq!(
        original.sequence, current.sequence,
        "INV-2 violated: submission sequence changed"
    );
}

/// INV-3: Submission counters only grow.
pub fn assert_submission_count_monotonic(before: &OracleInfo, after: &OracleInfo) {
    assert!(
        after.submission_count >= before.submission_count,
        "INV-3 violated: submission count decreased from {} to {}",
        before.submission_count,
        after.submission_count
    );
}

/// INV-4: The global counter equals the sum of per-oracle counters.
pub fn assert_total_matches_oracles(total: u64, oracles: &[OracleInfo]) {
    let sum: u64 = oracles.iter().map(|o| o.submission_count).sum();
    assert_eq!(
        total, sum,
        "INV-4 violated: global total {} != per-oracle sum {}",
        total, sum
    );
}
