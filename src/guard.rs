//! Route Guard
//!
//! Decides whether the holder of a bearer token may open a route, reading
//! the role claim straight out of the token payload. Signatures are not
//! verified here; the API does that on every call.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::api::dto::Role;
use crate::api::error::{ClientError, ClientResult};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/home";

/// Routes open to every signed-in user
pub const ANY_ROLE: &[Role] = &Role::ALL;
/// Routes only admins may open
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
/// Routes open to shop staff
pub const STAFF: &[Role] = &[Role::Admin, Role::Employee];
/// Routes open to employees only
pub const EMPLOYEE_ONLY: &[Role] = &[Role::Employee];
/// Routes open to customers only
pub const CUSTOMER_ONLY: &[Role] = &[Role::Customer];

/// Claims read from a token payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiry, seconds since epoch
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// The role claim, from `role` or else the first entry of `roles`
    pub fn role_claim(&self) -> Option<&str> {
        self.role
            .as_deref()
            .or_else(|| self.roles.first().map(String::as_str))
    }

    pub fn role(&self) -> Option<Role> {
        self.role_claim().and_then(Role::from_claim)
    }

    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.exp.map(|exp| exp <= now_secs).unwrap_or(false)
    }
}

/// Decode the payload segment of a `header.payload.signature` token
pub fn decode_claims(token: &str) -> ClientResult<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| ClientError::Session("token has no payload segment".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClientError::Session(format!("token payload is not base64: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::Session(format!("token payload is not JSON: {}", e)))
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(Role),
    /// Send the visitor elsewhere. `logout` is set when the stored
    /// token is unusable and the session must be dropped first.
    Redirect { path: &'static str, logout: bool },
}

impl GuardDecision {
    fn to(path: &'static str) -> Self {
        GuardDecision::Redirect {
            path,
            logout: false,
        }
    }

    fn logout() -> Self {
        GuardDecision::Redirect {
            path: LOGIN_PATH,
            logout: true,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow(_))
    }
}

/// Check a token against a route's allowed roles at time `now_secs`
pub fn check_access(token: Option<&str>, allowed: &[Role], now_secs: i64) -> GuardDecision {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return GuardDecision::to(LOGIN_PATH);
    };

    let claims = match decode_claims(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable token, forcing logout");
            return GuardDecision::logout();
        }
    };

    if claims.is_expired(now_secs) {
        tracing::info!("Token expired, forcing logout");
        return GuardDecision::logout();
    }

    match claims.role() {
        Some(role) if allowed.contains(&role) => GuardDecision::Allow(role),
        Some(role) => GuardDecision::to(role.landing_path()),
        None => GuardDecision::to(HOME_PATH),
    }
}

/// [`check_access`] against the current wall clock
pub fn check_access_now(token: Option<&str>, allowed: &[Role]) -> GuardDecision {
    check_access(token, allowed, chrono::Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn test_missing_token_goes_to_login() {
        assert_eq!(check_access(None, ADMIN_ONLY, 0), GuardDecision::to(LOGIN_PATH));
        assert_eq!(check_access(Some(""), ADMIN_ONLY, 0), GuardDecision::to(LOGIN_PATH));
    }

    #[test]
    fn test_allowed_role() {
        let token = token_with(serde_json::json!({"sub": "kim", "role": "ADMIN"}));
        assert_eq!(
            check_access(Some(&token), STAFF, 0),
            GuardDecision::Allow(Role::Admin)
        );
    }

    #[test]
    fn test_disallowed_roles_go_to_landing() {
        for role in Role::ALL {
            let token = token_with(serde_json::json!({"role": role.as_str()}));
            let allowed: Vec<Role> = Role::ALL.into_iter().filter(|r| *r != role).collect();
            assert_eq!(
                check_access(Some(&token), &allowed, 0),
                GuardDecision::to(role.landing_path())
            );
        }
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(Role::Admin.landing_path(), "/admin/dashboard");
        assert_eq!(Role::Employee.landing_path(), "/employee/dashboard");
        assert_eq!(Role::Customer.landing_path(), "/customer/dashboard");
    }

    #[test]
    fn test_unknown_role_goes_home() {
        let token = token_with(serde_json::json!({"role": "MECHANIC"}));
        assert_eq!(check_access(Some(&token), ADMIN_ONLY, 0), GuardDecision::to(HOME_PATH));

        let token = token_with(serde_json::json!({"sub": "nobody"}));
        assert_eq!(check_access(Some(&token), ADMIN_ONLY, 0), GuardDecision::to(HOME_PATH));
    }

    #[test]
    fn test_prefixed_roles_array() {
        let token = token_with(serde_json::json!({"roles": ["ROLE_EMPLOYEE"]}));
        assert_eq!(
            check_access(Some(&token), EMPLOYEE_ONLY, 0),
            GuardDecision::Allow(Role::Employee)
        );
    }

    #[test]
    fn test_garbage_token_forces_logout() {
        assert_eq!(
            check_access(Some("not-a-token"), ADMIN_ONLY, 0),
            GuardDecision::logout()
        );
        assert_eq!(
            check_access(Some("a.!!!.c"), ADMIN_ONLY, 0),
            GuardDecision::logout()
        );
    }

    #[test]
    fn test_expired_token_forces_logout() {
        let token = token_with(serde_json::json!({"role": "CUSTOMER", "exp": 1_000}));
        assert_eq!(
            check_access(Some(&token), CUSTOMER_ONLY, 999),
            GuardDecision::Allow(Role::Customer)
        );
        assert_eq!(
            check_access(Some(&token), CUSTOMER_ONLY, 1_000),
            GuardDecision::logout()
        );
    }
}
