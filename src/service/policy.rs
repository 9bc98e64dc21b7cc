//! Authorization predicates shared by the job, engagement, communication
//! and review handlers. All of them work over rows the caller already
//! loaded, so they stay independent of storage.

use crate::models::jobmodel::Job;
use crate::models::questionmodel::Question;
use crate::models::usermodel::{User, UserRole};

/// Owner-or-admin: job status updates, resolving engagements, viewing a
/// job's proposals/applications, answering its questions.
pub fn can_act_on_job(user: &User, job: &Job) -> bool {
    job.client_id == user.id || user.role == UserRole::Admin
}

/// A party to a job is its client or the freelancer with the accepted
/// proposal. Admins are not parties; callers that extend access to
/// admins check the role separately.
pub fn is_party_to_job(user_id: i64, job: &Job, accepted_freelancer_id: Option<i64>) -> bool {
    job.client_id == user_id || accepted_freelancer_id == Some(user_id)
}

/// Messaging: sender must be a party (or admin); the receiver must be a
/// genuine party regardless of who the sender is.
pub fn may_use_job_thread(user: &User, job: &Job, accepted_freelancer_id: Option<i64>) -> bool {
    is_party_to_job(user.id, job, accepted_freelancer_id) || user.role == UserRole::Admin
}

/// Application details are visible to the applicant, the job owner, or
/// an admin.
pub fn can_view_application(user: &User, applicant_id: i64, job_client_id: i64) -> bool {
    user.id == applicant_id || user.id == job_client_id || user.role == UserRole::Admin
}

/// Resolve who the reviewer is allowed to review: the client reviews the
/// accepted freelancer and vice versa. Anyone else (including admins)
/// has no counterpart and may not review.
pub fn review_counterpart(
    reviewer_id: i64,
    job: &Job,
    accepted_freelancer_id: Option<i64>,
) -> Option<i64> {
    if reviewer_id == job.client_id {
        accepted_freelancer_id
    } else if accepted_freelancer_id == Some(reviewer_id) {
        Some(job.client_id)
    } else {
        None
    }
}

pub fn can_delete_question(user: &User, question: &Question) -> bool {
    question.user_id == user.id || user.role == UserRole::Admin
}

/// Posting jobs is a client action.
pub fn can_post_job(role: UserRole) -> bool {
    matches!(role, UserRole::Client | UserRole::Admin)
}

/// Bidding and applying are freelancer actions; clients never submit
/// engagements on other clients' jobs.
pub fn can_submit_engagement(role: UserRole) -> bool {
    matches!(role, UserRole::Freelancer | UserRole::Admin)
}

/// A question is visible when public, or to its asker, the job's owner,
/// or an admin. Asking carries no precondition at all, so the asker and
/// the owner can be the same user.
pub fn can_view_question(user: &User, question: &Question, job_client_id: i64) -> bool {
    question.is_public
        || question.user_id == user.id
        || job_client_id == user.id
        || user.role == UserRole::Admin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::jobmodel::JobStatus;
    use bigdecimal::BigDecimal;
    use chrono::Utc;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            name: format!("user-{}", id),
            email: format!("user{}@example.com", id),
            password: "hash".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    fn job(client_id: i64) -> Job {
        Job {
            id: 10,
            client_id,
            title: "Build a storefront".to_string(),
            description: "A small shop with checkout and an admin page".to_string(),
            budget: BigDecimal::from(500),
            status: JobStatus::Open,
            image_path: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_and_admin_may_act_on_job() {
        let j = job(1);
        assert!(can_act_on_job(&user(1, UserRole::Client), &j));
        assert!(can_act_on_job(&user(99, UserRole::Admin), &j));
        assert!(!can_act_on_job(&user(2, UserRole::Client), &j));
        assert!(!can_act_on_job(&user(2, UserRole::Freelancer), &j));
    }

    #[test]
    fn parties_are_client_and_accepted_freelancer_only() {
        let j = job(1);
        assert!(is_party_to_job(1, &j, Some(7)));
        assert!(is_party_to_job(7, &j, Some(7)));
        assert!(!is_party_to_job(8, &j, Some(7)));
        assert!(!is_party_to_job(7, &j, None));
    }

    #[test]
    fn admin_may_use_thread_but_is_not_a_party() {
        let j = job(1);
        let admin = user(50, UserRole::Admin);
        assert!(may_use_job_thread(&admin, &j, Some(7)));
        assert!(!is_party_to_job(admin.id, &j, Some(7)));
    }

    #[test]
    fn review_counterparts_are_mutual() {
        let j = job(1);
        assert_eq!(review_counterpart(1, &j, Some(7)), Some(7));
        assert_eq!(review_counterpart(7, &j, Some(7)), Some(1));
    }

    #[test]
    fn outsider_has_no_review_counterpart() {
        let j = job(1);
        assert_eq!(review_counterpart(8, &j, Some(7)), None);
        // Rejected-proposal freelancer is not the accepted party.
        assert_eq!(review_counterpart(7, &j, None), None);
        // Client cannot review before anyone was accepted.
        assert_eq!(review_counterpart(1, &j, None), None);
    }

    fn question(asker_id: i64, is_public: bool) -> Question {
        Question {
            id: 20,
            job_id: 10,
            user_id: asker_id,
            content: "Is the deadline firm?".to_string(),
            is_public,
            answer: None,
            replied_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_gates_split_job_posting_from_engagement() {
        assert!(can_post_job(UserRole::Client));
        assert!(can_post_job(UserRole::Admin));
        assert!(!can_post_job(UserRole::Freelancer));

        assert!(can_submit_engagement(UserRole::Freelancer));
        assert!(can_submit_engagement(UserRole::Admin));
        assert!(!can_submit_engagement(UserRole::Client));
    }

    #[test]
    fn private_question_visible_to_asker_owner_and_admin_only() {
        let q = question(7, false);
        assert!(can_view_question(&user(7, UserRole::Freelancer), &q, 1));
        assert!(can_view_question(&user(1, UserRole::Client), &q, 1));
        assert!(can_view_question(&user(50, UserRole::Admin), &q, 1));
        assert!(!can_view_question(&user(8, UserRole::Freelancer), &q, 1));
    }

    #[test]
    fn owner_asking_on_their_own_job_is_a_supported_state() {
        // Clients may ask on their own jobs (seeding an FAQ); their
        // private questions stay visible to them as both asker and owner.
        let q = question(1, false);
        assert!(can_view_question(&user(1, UserRole::Client), &q, 1));

        let public = question(1, true);
        assert!(can_view_question(&user(8, UserRole::Freelancer), &public, 1));
    }

    #[test]
    fn application_details_three_way_check() {
        let admin = user(50, UserRole::Admin);
        let applicant = user(7, UserRole::Freelancer);
        let owner = user(1, UserRole::Client);
        let stranger = user(8, UserRole::Freelancer);

        assert!(can_view_application(&applicant, 7, 1));
        assert!(can_view_application(&owner, 7, 1));
        assert!(can_view_application(&admin, 7, 1));
        assert!(!can_view_application(&stranger, 7, 1));
    }
}
