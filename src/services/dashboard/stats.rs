use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn get_stats(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.dashboard_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Dashboard statistics retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            "Failed to load dashboard statistics",
            e,
            ErrorCode::BadRequest,
            ErrorCode::BadRequest,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, request, storage};
    use actix_web::http::StatusCode;

    #[tokio::test]
    async fn test_stats_reflect_fixtures() {
        let storage = storage().await;
        storage.seed_fixtures().await.unwrap();
        let service = DashboardService::with_storage(storage);

        let resp = service.get_stats(&request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let data = body_json(resp).await["data"].clone();
        assert_eq!(data["students"], 8);
        assert_eq!(data["teachers"], 4);
        assert_eq!(data["subjects"], 5);
        assert_eq!(data["classrooms"], 3);
        assert_eq!(data["enrollments"]["active"], 5);
        assert_eq!(data["enrollments"]["pending"], 2);
        assert_eq!(data["enrollments"]["cancelled"], 1);
        assert_eq!(data["enrollments"]["total"], 8);
    }
}
