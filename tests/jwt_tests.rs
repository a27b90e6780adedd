use campus_lost_found::config::JwtConfig;
use campus_lost_found::util::jwt::*;

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

#[test]
fn test_lifetimes_follow_config() {
    let utils = JwtTokenUtilsImpl::new(JwtConfig {
        user_token_expiration: 60,
        admin_token_expiration: 15,
        ..JwtConfig::default()
    });
    let user = utils.issue_token(&Principal::User { user_id: "u1".to_string() }).unwrap();
    let admin = utils.issue_token(&Principal::Admin { admin_id: "a1".to_string() }).unwrap();
    assert_eq!(user.expires_in, 60 * 60);
    assert_eq!(admin.expires_in, 15 * 60);

    let claims = utils.verify_token(&user.token).unwrap();
    assert_eq!(claims.exp - claims.iat, 60 * 60);
}

#[test]
fn test_each_token_has_unique_id() {
    let utils = create_test_jwt_utils();
    let principal = Principal::User { user_id: "u1".to_string() };
    let first = utils.verify_token(&utils.issue_token(&principal).unwrap().token).unwrap();
    let second = utils.verify_token(&utils.issue_token(&principal).unwrap().token).unwrap();
    assert_ne!(first.jti, second.jti);
}

#[test]
fn test_principal_kind_survives_round_trip() {
    let utils = create_test_jwt_utils();
    for principal in [
        Principal::User { user_id: "65f1c0ffee0000000000beef".to_string() },
        Principal::Admin { admin_id: "admin1".to_string() },
    ] {
        let issued = utils.issue_token(&principal).unwrap();
        let resolved = utils.authenticate_header(&format!("Bearer {}", issued.token)).unwrap();
        assert_eq!(resolved, principal);
        assert_eq!(resolved.kind(), principal.kind());
    }
}

#[test]
fn test_tampered_token_is_rejected() {
    let utils = create_test_jwt_utils();
    let issued = utils.issue_token(&Principal::User { user_id: "u1".to_string() }).unwrap();
    let mut parts: Vec<&str> = issued.token.split('.').collect();
    let forged_payload = "eyJzdWIiOiJhZG1pbjEiLCJraW5kIjoiYWRtaW4ifQ";
    parts[1] = forged_payload;
    assert!(utils.verify_token(&parts.join(".")).is_err());
}

#[test]
fn test_header_without_bearer_scheme_is_invalid() {
    let utils = create_test_jwt_utils();
    let issued = utils.issue_token(&Principal::User { user_id: "u1".to_string() }).unwrap();
    assert!(matches!(utils.authenticate_header(&issued.token), Err(JwtError::InvalidToken)));
}
