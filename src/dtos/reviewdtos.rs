use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewDto {
    pub job_id: i64,
    pub reviewed_user_id: i64,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(min = 5, message = "Comment must be at least 5 characters"))]
    pub comment: String,
}

/// A review joined with both participants and the job title.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewResponseDto {
    pub id: i64,
    pub job_id: i64,
    pub reviewer_id: i64,
    pub reviewed_user_id: i64,
    pub rating: i32,
    pub comment: String,
    pub reviewer_name: String,
    pub job_title: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UserReviewsResponseDto {
    pub status: String,
    pub reviews: Vec<ReviewResponseDto>,
    pub average_rating: f64,
    pub total_reviews: i64,
}

/// Mean rating rounded to two decimals; no reviews yields 0.
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    let avg = sum as f64 / ratings.len() as f64;
    (avg * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_enforced() {
        let base = CreateReviewDto {
            job_id: 1,
            reviewed_user_id: 7,
            rating: 3,
            comment: "Delivered on time.".to_string(),
        };
        assert!(base.validate().is_ok());

        let low = CreateReviewDto { rating: 0, ..base.clone() };
        assert!(low.validate().is_err());

        let high = CreateReviewDto { rating: 6, ..base };
        assert!(high.validate().is_err());
    }

    #[test]
    fn reviewed_user_id_is_required_and_carried() {
        let dto: CreateReviewDto = serde_json::from_str(
            r#"{"job_id":1,"reviewed_user_id":9999,"rating":5,"comment":"Great work."}"#,
        )
        .unwrap();
        assert_eq!(dto.reviewed_user_id, 9999);

        // A submission that does not name the reviewed party is rejected
        // at the deserialization boundary.
        let missing = serde_json::from_str::<CreateReviewDto>(
            r#"{"job_id":1,"rating":5,"comment":"Great work."}"#,
        );
        assert!(missing.is_err());
    }

    #[test]
    fn review_response_carries_reviewer_identity() {
        let row = ReviewResponseDto {
            id: 1,
            job_id: 1,
            reviewer_id: 1,
            reviewed_user_id: 7,
            rating: 5,
            comment: "Great work.".to_string(),
            reviewer_name: "Carol".to_string(),
            job_title: "Build a storefront".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["reviewer_name"], "Carol");
        assert_eq!(json["job_title"], "Build a storefront");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[5]), 5.0);
        assert_eq!(average_rating(&[5, 4]), 4.5);
        // 10 / 3 = 3.333...
        assert_eq!(average_rating(&[3, 3, 4]), 3.33);
        // 11 / 3 = 3.666...
        assert_eq!(average_rating(&[3, 4, 4]), 3.67);
    }
}
