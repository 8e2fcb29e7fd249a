use super::support::*;

#[tokio::test]
async fn toggle_likes_then_unlikes() {
    let backend = backend();
    let (owner, _) = register(&backend, "owner", "Owner").await;
    let (fan, fan_id) = register(&backend, "fan", "Fan").await;
    let post_id = publish(&backend, &owner, "hello").await;

    let first = backend.toggle_like(Some(&fan), &post_id).await.expect("like");
    assert!(first.liked);
    assert_eq!(backend.get_like_count(&post_id).await.expect("count"), 1);

    let likers = backend.get_likes_by_post(&post_id, None).await.expect("likers");
    assert_eq!(likers.len(), 1);
    assert_eq!(likers[0].user_id, fan_id);
    assert_eq!(likers[0].username, "Fan");

    let second = backend.toggle_like(Some(&fan), &post_id).await.expect("unlike");
    assert!(!second.liked);
    assert_eq!(backend.get_like_count(&post_id).await.expect("count"), 0);
    assert!(backend.get_likes_by_post(&post_id, None).await.expect("likers").is_empty());
}

#[tokio::test]
async fn concurrent_toggles_from_one_user_cancel_out() {
    let backend = backend();
    let (owner, _) = register(&backend, "owner", "Owner").await;
    let (fan, _) = register(&backend, "fan", "Fan").await;
    let post_id = publish(&backend, &owner, "hello").await;

    let (a, b) = tokio::join!(
        backend.toggle_like(Some(&fan), &post_id),
        backend.toggle_like(Some(&fan), &post_id)
    );
    let (a, b) = (a.expect("first toggle"), b.expect("second toggle"));
    assert_ne!(a.liked, b.liked);
    assert_eq!(backend.get_like_count(&post_id).await.expect("count"), 0);
    assert!(backend.get_likes_by_post(&post_id, None).await.expect("likers").is_empty());
}

#[tokio::test]
async fn likes_are_per_user() {
    let backend = backend();
    let (owner, _) = register(&backend, "owner", "Owner").await;
    let (fan, _) = register(&backend, "fan", "Fan").await;
    let post_id = publish(&backend, &owner, "hello").await;

    backend.toggle_like(Some(&owner), &post_id).await.expect("owner like");
    backend.toggle_like(Some(&fan), &post_id).await.expect("fan like");
    assert_eq!(backend.get_like_count(&post_id).await.expect("count"), 2);

    backend.toggle_like(Some(&owner), &post_id).await.expect("owner unlike");
    let likers = backend.get_likes_by_post(&post_id, None).await.expect("likers");
    assert_eq!(likers.len(), 1);
    assert_eq!(likers[0].username, "Fan");
}

#[tokio::test]
async fn toggle_like_failure_modes() {
    let backend = backend();
    let (owner, _) = register(&backend, "owner", "Owner").await;
    let post_id = publish(&backend, &owner, "hello").await;

    let err = backend.toggle_like(None, &post_id).await.unwrap_err();
    assert!(matches!(err, FramezError::NotAuthenticated));

    let unregistered = identity("new", "New");
    let err = backend.toggle_like(Some(&unregistered), &post_id).await.unwrap_err();
    assert!(matches!(err, FramezError::UserNotRegistered));

    let err = backend.toggle_like(Some(&owner), "missing").await.unwrap_err();
    assert!(matches!(err, FramezError::NotFound { collection: "posts", .. }));
    assert_eq!(backend.get_like_count("missing").await.expect("count"), 0);
}

#[tokio::test]
async fn likers_fall_back_when_user_is_missing() {
    let backend = backend();
    let (owner, _) = register(&backend, "owner", "Owner").await;
    let post_id = publish(&backend, &owner, "hello").await;

    let orphan = Like {
        id: "like_orphan".into(),
        created_at: Utc::now(),
        post_id: post_id.clone(),
        user_id: "deleted_user".into(),
    };
    backend.store().toggle_like(&orphan).await.expect("insert like");

    let likers = backend.get_likes_by_post(&post_id, None).await.expect("likers");
    assert_eq!(likers.len(), 1);
    assert_eq!(likers[0].like_id, "like_orphan");
    assert_eq!(likers[0].user_id, "deleted_user");
    assert_eq!(likers[0].username, "Unknown");
    assert_eq!(likers[0].profile_image, None);
}

#[tokio::test]
async fn likers_are_newest_first_and_limit_is_clamped() {
    let backend = backend();
    let (owner, _) = register(&backend, "owner", "Owner").await;
    let post_id = publish(&backend, &owner, "hello").await;

    let start = Utc::now() - Duration::hours(1);
    for index in 0..250 {
        let like = Like {
            id: format!("like_{index}"),
            created_at: start + Duration::seconds(index),
            post_id: post_id.clone(),
            user_id: format!("user_{index}"),
        };
        backend.store().toggle_like(&like).await.expect("insert like");
    }

    assert_eq!(backend.get_like_count(&post_id).await.expect("count"), 250);

    let default_page = backend.get_likes_by_post(&post_id, None).await.expect("default");
    assert_eq!(default_page.len(), 100);
    assert_eq!(default_page[0].user_id, "user_249");

    let capped = backend.get_likes_by_post(&post_id, Some(10_000)).await.expect("capped");
    assert_eq!(capped.len(), 200);

    let small = backend.get_likes_by_post(&post_id, Some(3)).await.expect("small");
    let ids: Vec<&str> = small.iter().map(|liker| liker.user_id.as_str()).collect();
    assert_eq!(ids, vec!["user_249", "user_248", "user_247"]);

    let negative = backend.get_likes_by_post(&post_id, Some(-5)).await.expect("negative");
    assert_eq!(negative.len(), 100);
}
