mod common;

use application::dto::{
    AuthRequestDto, ProfileUpdateDto, ProviderCallbackDto, ProviderProfileDto,
    RegisterRequestDto,
};
use application::error::ApplicationError;
use application::ports::inbound::{
    DeleteAccount, LocalAccount, ReadNotifications, ResolveAccount, UpdateProfile,
};
use application::ports::outbound::{IdentityRepository, NotificationRepository};
use common::{Harness, NOW};
use domain::identity::{IdentityOrigin, IdentityRecord};
use domain::notification::Notification;

fn register(login: &str, email: &str, password: &str) -> RegisterRequestDto {
    RegisterRequestDto {
        login: login.into(),
        email: email.into(),
        password: password.into(),
        password_confirmation: Some(password.into()),
    }
}

fn credentials(email: &str, password: &str) -> AuthRequestDto {
    AuthRequestDto {
        email: email.into(),
        password: password.into(),
    }
}

async fn alice(harness: &Harness) -> IdentityRecord {
    harness
        .accounts
        .register(register("alice", "alice@example.com", "old-secret"))
        .await
        .unwrap()
}

async fn linked(harness: &Harness) -> IdentityRecord {
    harness
        .resolver
        .create_from_provider_callback(ProviderCallbackDto {
            provider: "github".into(),
            uid: "42".into(),
            info: ProviderProfileDto {
                nickname: Some("octo".into()),
                email: Some("octo@example.com".into()),
                ..Default::default()
            },
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_and_authenticate() {
    let harness = Harness::new();
    let alice = alice(&harness).await;

    assert!(!alice.guest);
    assert!(alice.password_hash.is_some());
    assert_eq!(
        harness.events.created(),
        vec![(alice.id.clone(), IdentityOrigin::Local)]
    );

    let authenticated = harness
        .accounts
        .authenticate(credentials("alice@example.com", "old-secret"))
        .await
        .unwrap();
    assert_eq!(authenticated.id, alice.id);

    for (email, password) in [
        ("alice@example.com", "wrong-secret"),
        ("nobody@example.com", "old-secret"),
        ("alice@example.com", ""),
    ] {
        assert!(matches!(
            harness
                .accounts
                .authenticate(credentials(email, password))
                .await,
            Err(ApplicationError::Authentication)
        ));
    }
}

#[tokio::test]
async fn test_register_rejections() {
    let harness = Harness::new();
    alice(&harness).await;

    let cases = [
        (register("bob", "bob@example.com", "short"), "password"),
        (
            RegisterRequestDto {
                password_confirmation: Some("other-secret".into()),
                ..register("bob", "bob@example.com", "new-secret")
            },
            "password_confirmation",
        ),
        (register("ALICE", "bob@example.com", "new-secret"), "login"),
        (register("bob", "alice@example.com", "new-secret"), "email"),
        (register("bob", "not-an-email", "new-secret"), "email"),
        (register("b-o-b", "bob@example.com", "new-secret"), "login"),
    ];

    for (request, field) in cases {
        let err = harness.accounts.register(request).await.unwrap_err();
        let ApplicationError::Validation(errors) = err else {
            panic!("expected a validation error, got {err:?}");
        };
        assert!(
            errors.field_errors().contains_key(field),
            "missing {field} in {errors:?}"
        );
    }

    assert_eq!(harness.events.created().len(), 1);
}

#[tokio::test]
async fn test_guest_cannot_authenticate() {
    let harness = Harness::new();
    harness
        .resolver
        .find_or_create_guest("guest@example.com")
        .await
        .unwrap();

    assert!(matches!(
        harness
            .accounts
            .authenticate(credentials("guest@example.com", "anything"))
            .await,
        Err(ApplicationError::Authentication)
    ));
}

#[tokio::test]
async fn test_profile_update_without_credentials() {
    let harness = Harness::new();
    let alice = alice(&harness).await;
    harness.clock.set(NOW + 10);

    let updated = harness
        .profiles
        .update_with_password(
            alice.clone(),
            ProfileUpdateDto {
                current_password: Some("   ".into()),
                location: Some("Paris".into()),
                github: Some("alice".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.location.as_deref(), Some("Paris"));
    assert_eq!(updated.github_url(), "http://github.com/alice");
    assert_eq!(updated.updated_at, NOW + 10);
    assert_eq!(updated.password_hash, alice.password_hash);

    let stored = harness.stored(&alice.id).await;
    assert_eq!(stored.location.as_deref(), Some("Paris"));
}

#[tokio::test]
async fn test_provider_linked_update_without_password() {
    let harness = Harness::new();
    let octo = linked(&harness).await;

    let updated = harness
        .profiles
        .update_with_password(
            octo,
            ProfileUpdateDto {
                bio: Some("Eight arms".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.bio.as_deref(), Some("Eight arms"));
    assert!(updated.password_hash.is_none());
}

#[tokio::test]
async fn test_provider_linked_cannot_set_password_without_current() {
    let harness = Harness::new();
    let octo = linked(&harness).await;

    assert!(matches!(
        harness
            .profiles
            .update_with_password(
                octo,
                ProfileUpdateDto {
                    password: Some("new-secret".into()),
                    password_confirmation: Some("new-secret".into()),
                    ..Default::default()
                },
            )
            .await,
        Err(ApplicationError::Authentication)
    ));
}

#[tokio::test]
async fn test_password_change() {
    let harness = Harness::new();
    let alice = alice(&harness).await;

    let err = harness
        .profiles
        .update_with_password(
            alice.clone(),
            ProfileUpdateDto {
                current_password: Some("wrong-secret".into()),
                password: Some("new-secret".into()),
                password_confirmation: Some("new-secret".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Authentication));

    let err = harness
        .profiles
        .update_with_password(
            alice.clone(),
            ProfileUpdateDto {
                current_password: Some("old-secret".into()),
                password: Some("new-secret".into()),
                password_confirmation: Some("other-secret".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    let ApplicationError::Validation(errors) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(errors.field_errors().contains_key("password_confirmation"));

    harness
        .profiles
        .update_with_password(
            alice,
            ProfileUpdateDto {
                current_password: Some("old-secret".into()),
                password: Some("new-secret".into()),
                password_confirmation: Some("new-secret".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(
        harness
            .accounts
            .authenticate(credentials("alice@example.com", "new-secret"))
            .await
            .is_ok()
    );
    assert!(
        harness
            .accounts
            .authenticate(credentials("alice@example.com", "old-secret"))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_reauthenticated_profile_update_keeps_password() {
    let harness = Harness::new();
    let alice = alice(&harness).await;

    let updated = harness
        .profiles
        .update_with_password(
            alice.clone(),
            ProfileUpdateDto {
                current_password: Some("old-secret".into()),
                password: Some("".into()),
                password_confirmation: Some("".into()),
                email: Some("alice2@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.email, "alice2@example.com");
    assert_eq!(updated.password_hash, alice.password_hash);
    assert_eq!(harness.stored(&alice.id).await.email, "alice2@example.com");
    assert!(
        harness
            .accounts
            .authenticate(credentials("alice2@example.com", "old-secret"))
            .await
            .is_ok()
    );

    // Still re-authenticated first.
    assert!(matches!(
        harness
            .profiles
            .update_with_password(
                updated,
                ProfileUpdateDto {
                    current_password: Some("wrong-secret".into()),
                    email: Some("alice3@example.com".into()),
                    ..Default::default()
                },
            )
            .await,
        Err(ApplicationError::Authentication)
    ));
}

#[tokio::test]
async fn test_profile_update_rejections() {
    let harness = Harness::new();
    let alice = alice(&harness).await;
    harness
        .accounts
        .register(register("bob", "bob@example.com", "bob-secret"))
        .await
        .unwrap();

    let err = harness
        .profiles
        .update_with_password(
            alice.clone(),
            ProfileUpdateDto {
                email: Some("bob@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    let ApplicationError::Validation(errors) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(errors.field_errors().contains_key("email"));

    assert!(matches!(
        harness
            .profiles
            .update_with_password(
                alice.clone(),
                ProfileUpdateDto {
                    tagline: Some("x".repeat(141)),
                    ..Default::default()
                },
            )
            .await,
        Err(ApplicationError::Validation(_))
    ));

    assert_eq!(harness.stored(&alice.id).await.email, "alice@example.com");
}

#[tokio::test]
async fn test_delete_account() {
    let harness = Harness::new();
    let octo = linked(&harness).await;
    harness
        .notifications
        .push(Notification::new(1, octo.id.clone(), NOW))
        .await;
    harness
        .notifications
        .push(Notification::new(2, octo.id.clone(), NOW))
        .await;

    harness.deletion.execute(&octo.id).await.unwrap();

    assert_eq!(harness.identities.find_by_id(&octo.id).await.unwrap(), None);
    assert_eq!(harness.notifications.unread_count(&octo.id).await.unwrap(), 0);
    assert_eq!(harness.reads.unread_count(&octo).await.unwrap(), 0);
    assert!(matches!(
        harness.deletion.execute(&octo.id).await,
        Err(ApplicationError::IdentityNotFound)
    ));

    // Login and provider subject are free again.
    let again = linked(&harness).await;
    assert_ne!(again.id, octo.id);
    assert_eq!(again.login, "octo");
}
