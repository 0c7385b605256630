mod common;

use std::sync::Arc;

use adapters::outbound::mail::TracingMailer;
use agora::config::Configuration;
use agora::{Stores, build_state};
use application::ports::inbound::ResolveAccount;
use common::{FixedClock, NOW};

const CONFIG: &str = r#"
name: Agora
admin_emails:
  - root@example.com
argon2:
  memory_cost: 1024
  iterations: 1
  parallelism: 1
"#;

#[tokio::test]
async fn test_trust_predicates_from_configuration() {
    let config: Configuration = serde_yaml::from_str(CONFIG).unwrap();
    let state = build_state(
        Arc::new(config),
        Stores::in_memory(),
        Arc::new(FixedClock::new(NOW)),
        Arc::new(TracingMailer::new()),
    )
    .unwrap();

    let root = state
        .resolver
        .find_or_create_guest("root@example.com")
        .await
        .unwrap();
    let mut alice = state
        .resolver
        .find_or_create_guest("alice@example.com")
        .await
        .unwrap();

    assert!(state.trust.is_admin(&root));
    assert!(state.trust.is_wiki_editor(&root));

    assert!(!state.trust.is_admin(&alice));
    assert!(!state.trust.is_wiki_editor(&alice));

    alice.verified = true;
    assert!(!state.trust.is_admin(&alice));
    assert!(state.trust.is_wiki_editor(&alice));
}

#[tokio::test]
async fn test_no_admin_without_allowlist() {
    let state = build_state(
        Arc::new(Configuration::default()),
        Stores::in_memory(),
        Arc::new(FixedClock::new(NOW)),
        Arc::new(TracingMailer::new()),
    )
    .unwrap();

    let root = state
        .resolver
        .find_or_create_guest("root@example.com")
        .await
        .unwrap();
    assert!(!state.trust.is_admin(&root));
}
