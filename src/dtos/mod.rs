use serde::{Deserialize, Serialize};

pub mod engagementdtos;
pub mod jobdtos;
pub mod messagedtos;
pub mod questiondtos;
pub mod reviewdtos;
pub mod userdtos;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

/// Offset/limit pagination query, shared by every listing endpoint.
#[derive(Debug, Deserialize)]
pub struct PageQueryDto {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQueryDto {
    pub fn resolve(&self, default_limit: i64) -> (i64, i64) {
        let limit = self.limit.unwrap_or(default_limit).clamp(1, 100);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults_and_clamps() {
        let q = PageQueryDto {
            limit: None,
            offset: None,
        };
        assert_eq!(q.resolve(20), (20, 0));

        let q = PageQueryDto {
            limit: Some(1000),
            offset: Some(-5),
        };
        assert_eq!(q.resolve(20), (100, 0));
    }
}
