use super::support::*;

#[tokio::test]
async fn create_post_copies_author_details() {
    let backend = backend();
    let caller = identity("ada", "Ada").image_url("https://img.test/ada.png");
    let user_id = backend.store_user(Some(&caller), Some("ada_l")).await.expect("store");

    let new_post = NewPost::new(vec![
        Media::from_url("https://cdn.test/one.jpg"),
        Media::from_url("https://cdn.test/two.mov").with_poster("https://cdn.test/two.jpg"),
    ])
    .caption("  Weekend  ");
    let post_id = backend.create_post(Some(&caller), new_post).await.expect("create");

    let posts = backend.get_all_posts().await.expect("feed");
    assert_eq!(posts.len(), 1);
    let post = &posts[0];
    assert_eq!(post.id, post_id);
    assert_eq!(post.author, user_id);
    assert_eq!(post.author_name, "ada_l");
    assert_eq!(post.author_profile_image.as_deref(), Some("https://img.test/ada.png"));
    assert_eq!(post.caption.as_deref(), Some("Weekend"));
    assert_eq!(post.media[0].kind, MediaKind::Image);
    assert_eq!(post.media[1].kind, MediaKind::Video);
    assert_eq!(post.media[1].poster.as_deref(), Some("https://cdn.test/two.jpg"));
}

#[tokio::test]
async fn author_snapshot_survives_profile_changes() {
    let backend = backend();
    let (_, user_id) = register(&backend, "ada", "Ada").await;
    let caller = identity("ada", "Ada");
    publish(&backend, &caller, "before").await;

    let renamed = identity("ada", "Countess").image_url("https://img.test/new.png");
    backend.store_user(Some(&renamed), None).await.expect("refresh");

    let posts = backend.get_posts_by_user(&user_id).await.expect("by user");
    assert_eq!(posts[0].author_name, "Ada");
    assert_eq!(posts[0].author_profile_image, None);
}

#[tokio::test]
async fn blank_caption_is_not_stored() {
    let backend = backend();
    let (caller, _) = register(&backend, "ada", "Ada").await;
    publish(&backend, &caller, "   ").await;

    let posts = backend.get_all_posts().await.expect("feed");
    assert_eq!(posts[0].caption, None);
}

#[tokio::test]
async fn post_without_media_is_rejected() {
    let backend = backend();
    let (caller, _) = register(&backend, "ada", "Ada").await;

    let err = backend
        .create_post(Some(&caller), NewPost::new(Vec::new()).caption("words only"))
        .await
        .unwrap_err();
    assert_eq!(err.validation_codes(), vec!["post.media_required"]);
    assert!(backend.get_all_posts().await.expect("feed").is_empty());
}

#[tokio::test]
async fn invalid_media_urls_are_reported_per_item() {
    let backend = backend();
    let (caller, _) = register(&backend, "ada", "Ada").await;

    let new_post = NewPost::new(vec![
        Media::image("https://cdn.test/ok.jpg"),
        Media::image("not a url"),
        Media::video("https://cdn.test/clip.mp4").with_poster("ftp://cdn.test/poster.jpg"),
    ]);
    let err = backend.create_post(Some(&caller), new_post).await.unwrap_err();
    assert_eq!(err.validation_codes(), vec!["media.url", "media.poster"]);
}

#[tokio::test]
async fn validation_runs_before_authentication() {
    let backend = backend();

    let err = backend.create_post(None, NewPost::default()).await.unwrap_err();
    assert!(matches!(err, FramezError::Validation(_)));

    let err = backend.create_post(None, photo("https://cdn.test/a.jpg")).await.unwrap_err();
    assert!(matches!(err, FramezError::NotAuthenticated));

    let unregistered = identity("new", "New");
    let err = backend
        .create_post(Some(&unregistered), photo("https://cdn.test/a.jpg"))
        .await
        .unwrap_err();
    assert!(matches!(err, FramezError::UserNotRegistered));
}

#[tokio::test]
async fn feed_is_newest_first_and_profile_grid_in_creation_order() {
    let backend = backend();
    let (ada, ada_id) = register(&backend, "ada", "Ada").await;
    let (grace, _) = register(&backend, "grace", "Grace").await;

    let first = publish(&backend, &ada, "first").await;
    let second = publish(&backend, &grace, "second").await;
    let third = publish(&backend, &ada, "third").await;

    let feed: Vec<String> = backend
        .get_all_posts()
        .await
        .expect("feed")
        .into_iter()
        .map(|post| post.id)
        .collect();
    assert_eq!(feed, vec![third.clone(), second, first.clone()]);

    let grid: Vec<String> = backend
        .get_posts_by_user(&ada_id)
        .await
        .expect("by user")
        .into_iter()
        .map(|post| post.id)
        .collect();
    assert_eq!(grid, vec![first, third]);

    assert!(backend.get_posts_by_user("nobody").await.expect("empty").is_empty());
}
