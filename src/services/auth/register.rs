use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::RegisterRequest,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::services::storage_error_response;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let username = register_request.username.trim().to_string();
    let email = register_request.email.trim().to_string();

    // 1. 格式校验
    if let Err(msg) = validate_username(&username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    let storage = service.get_storage(request)?;

    // 2. 唯一性检查
    if let Err(response) = check_identity_free(&storage, &username, &email).await {
        return Ok(response);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Password hashing failed: {}", e.message()),
                )),
            );
        }
    };

    // 4. 创建账号，注册入口只发放 staff 角色
    let create_request = CreateUserRequest {
        username,
        email,
        password: password_hash,
        role: UserRole::Staff,
        display_name: register_request
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("Account {} registered", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
        }
        Err(e) => Ok(storage_error_response(
            "Registration failed",
            e,
            ErrorCode::RegisterFailed,
            ErrorCode::UserAlreadyExists,
        )),
    }
}

async fn check_identity_free(
    storage: &Arc<dyn Storage>,
    username: &str,
    email: &str,
) -> Result<(), HttpResponse> {
    let conflict = |message: &str| {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            message,
        ))
    };
    let failed = |e: crate::errors::SchoolAdminError| {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::RegisterFailed,
            format!("Registration failed: {}", e.message()),
        ))
    };

    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => return Err(conflict("Username already exists")),
        Ok(None) => {}
        Err(e) => return Err(failed(e)),
    }

    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(conflict("Email already exists")),
        Ok(None) => Ok(()),
        Err(e) => Err(failed(e)),
    }
}
