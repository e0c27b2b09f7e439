#![allow(dead_code)]

extern crate std;

use crate::types::{Donation, DonationStatus, Project};

/// INV-1: Escrow is what was raised minus what left through releases and
/// refunds, and never negative.
pub fn assert_escrow_equation(project: &Project) {
    assert_eq!(
        project.escrow_balance,
        project.raised - project.released - project.refunded,
        "INV-1 violated: project {} escrow drifted from its totals",
        project.id
    );
    assert!(
        project.escrow_balance >= 0,
        "INV-1 violated: project {} has negative escrow ({})",
        project.id,
        project.escrow_balance
    );
}

/// INV-2: Aggregate custody equals the sum of all project escrow.
pub fn assert_custody_matches(custody: i128, projects: &[Project]) {
    let total: i128 = projects.iter().map(|p| p.escrow_balance).sum();
    assert_eq!(
        custody, total,
        "INV-2 violated: custody {} but projects hold {}",
        custody, total
    );
}

/// INV-3: Goals stay within `(0, MAX_AMOUNT]`.
pub fn assert_goal_in_range(project: &Project) {
    assert!(
        project.goal > 0 && project.goal <= crate::MAX_AMOUNT,
        "INV-3 violated: project {} has goal {} out of range",
        project.id,
        project.goal
    );
}

/// INV-4: A refunded donation keeps the amount it had when refunded.
pub fn assert_refund_frozen(before: &Donation, after: &Donation) {
    if before.status == DonationStatus::Refunded {
        assert_eq!(after.status, DonationStatus::Refunded, "INV-4 violated: refund reset");
        assert_eq!(before.amount, after.amount, "INV-4 violated: refunded amount changed");
    }
}
