use super::support::*;

#[tokio::test]
async fn store_user_creates_record_from_identity() {
    let backend = backend();
    let caller = identity("ada", "Ada Lovelace").image_url("https://img.test/ada.png");

    let user_id = backend.store_user(Some(&caller), None).await.expect("store");
    let user = backend.get_user_profile(Some(&caller)).await.expect("profile").expect("stored");

    assert_eq!(user.id, user_id);
    assert_eq!(user.name, "Ada Lovelace");
    assert_eq!(user.username, None);
    assert_eq!(user.token_identifier, "https://auth.test|ada");
    assert_eq!(user.profile_image.as_deref(), Some("https://img.test/ada.png"));
    assert_eq!(user.created_at, user.updated_at);
}

#[tokio::test]
async fn explicit_username_wins_over_claims() {
    let backend = backend();
    let caller = identity("ada", "Ada Lovelace").username("countess");

    let user_id = backend.store_user(Some(&caller), Some("ada")).await.expect("store");
    let user = backend.get_user_by_id(&user_id).await.expect("get").expect("stored");

    assert_eq!(user.name, "ada");
    assert_eq!(user.username.as_deref(), Some("ada"));
    assert_eq!(user.display_name(), "ada");
}

#[tokio::test]
async fn nameless_identity_is_anonymous() {
    let backend = backend();
    let caller = Identity::with_token("https://auth.test|ghost");

    let user_id = backend.store_user(Some(&caller), None).await.expect("store");
    let user = backend.get_user_by_id(&user_id).await.expect("get").expect("stored");
    assert_eq!(user.name, "Anonymous");
}

#[tokio::test]
async fn repeat_store_returns_same_user_and_refreshes_changes() {
    let backend = backend();
    let (caller, user_id) = register(&backend, "ada", "Ada").await;
    let before = backend.get_user_by_id(&user_id).await.expect("get").expect("stored");

    let unchanged = backend.store_user(Some(&caller), None).await.expect("store again");
    assert_eq!(unchanged, user_id);
    let same = backend.get_user_by_id(&user_id).await.expect("get").expect("stored");
    assert_eq!(same.updated_at, before.updated_at);

    let renamed = identity("ada", "Ada King").image_url("https://img.test/new.png");
    let again = backend.store_user(Some(&renamed), None).await.expect("refresh");
    assert_eq!(again, user_id);

    let after = backend.get_user_by_id(&user_id).await.expect("get").expect("stored");
    assert_eq!(after.name, "Ada King");
    assert_eq!(after.profile_image.as_deref(), Some("https://img.test/new.png"));
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn concurrent_first_store_yields_one_user() {
    let backend = backend();
    let caller = identity("ada", "Ada");

    let (first, second) = tokio::join!(
        backend.store_user(Some(&caller), None),
        backend.store_user(Some(&caller), None)
    );
    assert_eq!(first.expect("first"), second.expect("second"));
}

#[tokio::test]
async fn store_user_requires_identity() {
    let backend = backend();

    let err = backend.store_user(None, None).await.unwrap_err();
    assert!(matches!(err, FramezError::NotAuthenticated));

    let tokenless = Identity::default().name("Nobody");
    let err = backend.store_user(Some(&tokenless), None).await.unwrap_err();
    assert!(matches!(err, FramezError::MissingTokenIdentifier));
}

#[tokio::test]
async fn subject_is_used_without_token_identifier() {
    let backend = backend();
    let caller = Identity {
        subject: Some("user_2abc".into()),
        first_name: Some("Grace".into()),
        ..Identity::default()
    };

    let user_id = backend.store_user(Some(&caller), None).await.expect("store");
    let user = backend.get_user_by_id(&user_id).await.expect("get").expect("stored");
    assert_eq!(user.token_identifier, "user_2abc");
    assert_eq!(user.name, "Grace");
}

#[tokio::test]
async fn profile_lookup_is_empty_when_signed_out_or_unregistered() {
    let backend = backend();

    assert!(backend.get_user_profile(None).await.expect("signed out").is_none());
    let stranger = identity("stranger", "Stranger");
    assert!(backend.get_user_profile(Some(&stranger)).await.expect("unregistered").is_none());
    assert!(backend.get_user_by_id("missing").await.expect("by id").is_none());
}
