use crate::common::EmployeeId;
use crate::domains::auth::JwtService;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated caller information from the verified JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub employee_id: EmployeeId,
    pub email: String,
    pub is_admin: bool,
    pub is_manager: bool,
}

/// JWT authentication middleware
///
/// Extracts the token from the Authorization header, verifies it, and adds
/// AuthUser to request extensions. With no token or an invalid token the
/// request continues unauthenticated; resolvers decide what that means.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(
            "Authenticated employee: {} (admin: {}, manager: {})",
            user.employee_id, user.is_admin, user.is_manager
        );
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify the JWT from a request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Accept both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        employee_id: EmployeeId::from_uuid(claims.employee_id),
        email: claims.email,
        is_admin: claims.is_admin,
        is_manager: claims.is_manager,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn request_with_header(value: Option<String>) -> axum::http::Request<axum::body::Body> {
        let mut builder = axum::http::Request::builder();
        if let Some(value) = value {
            builder = builder.header("authorization", value);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let employee_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(employee_id, "kay@example.com".to_string(), false, true)
            .unwrap();

        let request = request_with_header(Some(format!("Bearer {}", token)));
        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.employee_id, EmployeeId::from_uuid(employee_id));
        assert!(auth_user.is_manager);
        assert!(!auth_user.is_admin);
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let employee_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(employee_id, "kay@example.com".to_string(), true, false)
            .unwrap();

        let request = request_with_header(Some(token));
        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.employee_id, EmployeeId::from_uuid(employee_id));
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = request_with_header(None);
        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = request_with_header(Some("Bearer invalid_token".to_string()));
        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }
}
