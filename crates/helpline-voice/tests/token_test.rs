use helpline_voice::{LiveKitConfig, VoiceService, ROOM_PREFIX};

const DEFAULT_URL: &str = "ws://localhost:7880";
const DEFAULT_KEY: &str = "devkey";
const DEFAULT_SECRET: &str = "secret-with-enough-entropy-for-hs256";

fn dev_service() -> VoiceService {
    VoiceService::new(LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET))
}

#[test]
fn issue_session_returns_token_and_prefixed_room() {
    let details = dev_service()
        .issue_session(Some("Ava"))
        .expect("issue_session should succeed with full config");

    assert!(!details.access_token.is_empty());
    assert_eq!(details.url, DEFAULT_URL);
    assert!(details.room_name.starts_with(ROOM_PREFIX));
    assert_eq!(details.identity, "Ava");
}

#[test]
fn issue_session_rooms_are_distinct() {
    let service = dev_service();
    let first = service.issue_session(None).expect("first session");
    let second = service.issue_session(None).expect("second session");
    assert_ne!(first.room_name, second.room_name);
}

#[test]
fn blank_name_gets_generated_identity() {
    let service = dev_service();

    let details = service.issue_session(None).expect("no name");
    assert!(details.identity.starts_with("user-"));

    let details = service.issue_session(Some("   ")).expect("blank name");
    assert!(details.identity.starts_with("user-"));
}

#[test]
fn supplied_name_is_trimmed() {
    let details = dev_service()
        .issue_session(Some("  Ava  "))
        .expect("padded name");
    assert_eq!(details.identity, "Ava");
}

#[test]
fn token_grants_decode_to_expected_capabilities() {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde::Deserialize;

    let service = dev_service();
    let token = service
        .generate_join_token("perm-room", "user-perm", "Perm User")
        .expect("Failed to generate token");

    #[derive(Deserialize)]
    struct Claims {
        sub: String,
        video: VideoClaims,
    }

    #[derive(Deserialize)]
    struct VideoClaims {
        #[serde(rename = "roomJoin")]
        room_join: bool,
        room: String,
        #[serde(rename = "canPublish")]
        can_publish: bool,
        #[serde(rename = "canSubscribe")]
        can_subscribe: bool,
        #[serde(rename = "canPublishData")]
        can_publish_data: bool,
        #[serde(rename = "canUpdateOwnMetadata")]
        can_update_own_metadata: bool,
    }

    let validation = Validation::new(Algorithm::HS256);
    let key = DecodingKey::from_secret(DEFAULT_SECRET.as_bytes());
    let token_data = decode::<Claims>(&token, &key, &validation).expect("Failed to decode token");

    assert_eq!(token_data.claims.sub, "user-perm");
    assert!(token_data.claims.video.room_join, "roomJoin should be true");
    assert_eq!(token_data.claims.video.room, "perm-room");
    assert!(
        token_data.claims.video.can_publish,
        "canPublish should be true"
    );
    assert!(
        token_data.claims.video.can_subscribe,
        "canSubscribe should be true"
    );
    assert!(
        token_data.claims.video.can_publish_data,
        "canPublishData should be true"
    );
    assert!(
        token_data.claims.video.can_update_own_metadata,
        "canUpdateOwnMetadata should be true"
    );
}

#[test]
fn token_expiry_respects_configured_ttl() {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde::Deserialize;

    let mut config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET);
    config.token_ttl_seconds = 600;
    let service = VoiceService::new(config);

    let token = service
        .generate_join_token("ttl-room", "user-ttl", "Ttl User")
        .expect("token");

    #[derive(Deserialize)]
    struct Claims {
        exp: u64,
        iat: u64,
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    let key = DecodingKey::from_secret(DEFAULT_SECRET.as_bytes());
    let claims = decode::<Claims>(&token, &key, &validation)
        .expect("decode")
        .claims;

    // Allow a little slack for signing time.
    let lifetime = claims.exp.saturating_sub(claims.iat);
    assert!(
        (595..=605).contains(&lifetime),
        "expected ~600s lifetime, got {}",
        lifetime
    );
}

#[test]
fn config_section_parses_from_toml() {
    let toml_str = r#"
        url = "wss://helpline.example.com"
        api_key = "key"
        api_secret = "secret"
    "#;

    let config: LiveKitConfig = toml::from_str(toml_str).expect("parse TOML");
    assert_eq!(config.url, "wss://helpline.example.com");
    assert_eq!(config.token_ttl_seconds, 600, "missing TTL should default");
}
