//! Lifecycle decisions expressed as values so the cascades can be tested
//! without a database. The db layer executes a plan inside one
//! transaction.

use crate::models::engagementmodel::{Application, EngagementStatus, Proposal};
use crate::models::jobmodel::JobStatus;

/// The full mutation set produced by accepting a proposal: the accepted
/// row, the job moving to in_progress, and every pending sibling being
/// rejected. A job therefore never holds two accepted proposals.
#[derive(Debug, PartialEq)]
pub struct AcceptancePlan {
    pub accept: i64,
    pub job_id: i64,
    pub job_to: JobStatus,
    pub reject: Vec<i64>,
}

pub fn plan_acceptance(proposal: &Proposal, siblings: &[Proposal]) -> AcceptancePlan {
    let reject = siblings
        .iter()
        .filter(|p| p.id != proposal.id && p.status == EngagementStatus::Pending)
        .map(|p| p.id)
        .collect();

    AcceptancePlan {
        accept: proposal.id,
        job_id: proposal.job_id,
        job_to: JobStatus::InProgress,
        reject,
    }
}

/// Reapplication gate: a fresh submission is allowed when there is no
/// prior application, or when the most recent one was rejected with the
/// reapply flag set. Enforced here at the submit path; the status-update
/// path only records the flag.
pub fn may_reapply(previous: Option<&Application>) -> bool {
    match previous {
        None => true,
        Some(app) => app.status == EngagementStatus::Rejected && app.allow_reapply,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::Utc;

    fn proposal(id: i64, job_id: i64, status: EngagementStatus) -> Proposal {
        Proposal {
            id,
            job_id,
            freelancer_id: id + 100,
            bid_amount: BigDecimal::from(250),
            cover_letter: "I have shipped three of these.".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    fn application(status: EngagementStatus, allow_reapply: bool) -> Application {
        Application {
            id: 1,
            job_id: 10,
            user_id: 7,
            status,
            feedback: None,
            allow_reapply,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn acceptance_rejects_every_pending_sibling() {
        let winner = proposal(1, 10, EngagementStatus::Pending);
        let siblings = vec![
            winner.clone(),
            proposal(2, 10, EngagementStatus::Pending),
            proposal(3, 10, EngagementStatus::Pending),
        ];

        let plan = plan_acceptance(&winner, &siblings);

        assert_eq!(plan.accept, 1);
        assert_eq!(plan.job_to, JobStatus::InProgress);
        assert_eq!(plan.reject, vec![2, 3]);
    }

    #[test]
    fn acceptance_leaves_already_resolved_siblings_alone() {
        let winner = proposal(1, 10, EngagementStatus::Pending);
        let siblings = vec![
            winner.clone(),
            proposal(2, 10, EngagementStatus::Rejected),
            proposal(3, 10, EngagementStatus::Pending),
        ];

        let plan = plan_acceptance(&winner, &siblings);
        assert_eq!(plan.reject, vec![3]);
    }

    #[test]
    fn sole_proposal_rejects_nothing() {
        let winner = proposal(1, 10, EngagementStatus::Pending);
        let plan = plan_acceptance(&winner, std::slice::from_ref(&winner));
        assert!(plan.reject.is_empty());
    }

    #[test]
    fn reapply_requires_rejected_with_flag() {
        assert!(may_reapply(None));
        assert!(may_reapply(Some(&application(
            EngagementStatus::Rejected,
            true
        ))));
        assert!(!may_reapply(Some(&application(
            EngagementStatus::Rejected,
            false
        ))));
        assert!(!may_reapply(Some(&application(
            EngagementStatus::Pending,
            true
        ))));
        assert!(!may_reapply(Some(&application(
            EngagementStatus::Accepted,
            true
        ))));
    }
}
