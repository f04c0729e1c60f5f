//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;

/// 需要登录的路径
///
/// 目录类接口全部公开，只有写入预订、取消、个人数据的接口需要令牌。
fn is_protected(path: &str) -> bool {
    path == "/book"
        || path.starts_with("/cancel/")
        || path == "/history/me"
        || path == "/auth/me"
}

/// 认证中间件 - 要求受保护路径携带有效令牌
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展 (`req.extensions_mut().insert(user)`)。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 所有不在受保护集合内的路径 (`/movies`、`/showtimes`、`/seats`、
///   `/auth/login`、`/auth/signup`、`/history/{user}`、`/reservations` 等)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !is_protected(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or_else(AppError::invalid_token)?
        }
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Auth failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_path_set() {
        assert!(is_protected("/book"));
        assert!(is_protected("/cancel/3"));
        assert!(is_protected("/history/me"));
        assert!(is_protected("/auth/me"));

        assert!(!is_protected("/movies"));
        assert!(!is_protected("/auth/login"));
        assert!(!is_protected("/history/alice@example.com"));
        assert!(!is_protected("/reservations"));
        assert!(!is_protected("/health"));
    }
}
