use super::support::*;

struct Thread {
    backend: TestBackend,
    owner: Identity,
    commenter: Identity,
    stranger: Identity,
    post_id: String,
    comment_id: String,
}

/// Owner publishes a post, commenter comments on it, stranger is registered.
async fn thread() -> Thread {
    let backend = backend();
    let (owner, _) = register(&backend, "owner", "Owner").await;
    let (commenter, _) = register(&backend, "commenter", "Commenter").await;
    let (stranger, _) = register(&backend, "stranger", "Stranger").await;
    let post_id = publish(&backend, &owner, "hello").await;
    let comment_id = backend
        .create_comment(Some(&commenter), &post_id, "first!")
        .await
        .expect("comment");
    Thread {
        backend,
        owner,
        commenter,
        stranger,
        post_id,
        comment_id,
    }
}

#[tokio::test]
async fn comment_carries_trimmed_text_and_author_snapshot() {
    let backend = backend();
    let (owner, _) = register(&backend, "owner", "Owner").await;
    let caller = identity("ada", "Ada").image_url("https://img.test/ada.png");
    let ada_id = backend.store_user(Some(&caller), None).await.expect("store");
    let post_id = publish(&backend, &owner, "hello").await;

    let comment_id = backend
        .create_comment(Some(&caller), &post_id, "  lovely light \n")
        .await
        .expect("comment");

    let comments = backend.get_comments_by_post(&post_id, None).await.expect("list");
    assert_eq!(comments.len(), 1);
    let comment = &comments[0];
    assert_eq!(comment.id, comment_id);
    assert_eq!(comment.post_id, post_id);
    assert_eq!(comment.author_id, ada_id);
    assert_eq!(comment.author_name, "Ada");
    assert_eq!(comment.author_profile_image.as_deref(), Some("https://img.test/ada.png"));
    assert_eq!(comment.text, "lovely light");
}

#[tokio::test]
async fn comment_text_limits() {
    let t = thread().await;

    let err = t.backend.create_comment(Some(&t.stranger), &t.post_id, "   ").await.unwrap_err();
    assert_eq!(err.validation_codes(), vec!["comment.empty"]);

    let long = "x".repeat(1001);
    let err = t.backend.create_comment(Some(&t.stranger), &t.post_id, &long).await.unwrap_err();
    assert_eq!(err.validation_codes(), vec!["comment.too_long"]);

    let exact = "x".repeat(1000);
    t.backend
        .create_comment(Some(&t.stranger), &t.post_id, &exact)
        .await
        .expect("1000 chars allowed");
}

#[tokio::test]
async fn comment_requires_identity_post_and_user() {
    let t = thread().await;

    let err = t.backend.create_comment(None, &t.post_id, "hi").await.unwrap_err();
    assert!(matches!(err, FramezError::NotAuthenticated));

    let err = t.backend.create_comment(Some(&t.stranger), "missing", "hi").await.unwrap_err();
    assert!(matches!(err, FramezError::NotFound { collection: "posts", .. }));

    let unregistered = identity("new", "New");
    let err = t
        .backend
        .create_comment(Some(&unregistered), &t.post_id, "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, FramezError::UserNotRegistered));
}

#[tokio::test]
async fn author_can_delete_own_comment() {
    let t = thread().await;

    let deleted = t
        .backend
        .delete_comment(Some(&t.commenter), &t.comment_id)
        .await
        .expect("delete");
    assert!(deleted.deleted);
    assert!(t.backend.get_comments_by_post(&t.post_id, None).await.expect("list").is_empty());
}

#[tokio::test]
async fn post_owner_can_delete_any_comment_on_post() {
    let t = thread().await;

    t.backend
        .delete_comment(Some(&t.owner), &t.comment_id)
        .await
        .expect("owner delete");
    assert!(t.backend.get_comments_by_post(&t.post_id, None).await.expect("list").is_empty());
}

#[tokio::test]
async fn stranger_cannot_delete_comment() {
    let t = thread().await;

    let err = t
        .backend
        .delete_comment(Some(&t.stranger), &t.comment_id)
        .await
        .unwrap_err();
    assert!(matches!(err, FramezError::Unauthorized { .. }));
    assert_eq!(err.to_string(), "not authorized to delete this comment");
    assert_eq!(t.backend.get_comments_by_post(&t.post_id, None).await.expect("list").len(), 1);
}

#[tokio::test]
async fn delete_failure_modes() {
    let t = thread().await;

    let err = t.backend.delete_comment(None, &t.comment_id).await.unwrap_err();
    assert!(matches!(err, FramezError::NotAuthenticated));

    let err = t.backend.delete_comment(Some(&t.owner), "missing").await.unwrap_err();
    assert!(matches!(err, FramezError::NotFound { collection: "comments", .. }));

    let unregistered = identity("new", "New");
    let err = t
        .backend
        .delete_comment(Some(&unregistered), &t.comment_id)
        .await
        .unwrap_err();
    assert!(matches!(err, FramezError::UserNotRegistered));

    t.backend
        .delete_comment(Some(&t.commenter), &t.comment_id)
        .await
        .expect("delete");
    let err = t
        .backend
        .delete_comment(Some(&t.commenter), &t.comment_id)
        .await
        .unwrap_err();
    assert!(matches!(err, FramezError::NotFound { .. }));
}

#[tokio::test]
async fn concurrent_deletes_report_one_success() {
    let t = thread().await;

    let (a, b) = tokio::join!(
        t.backend.delete_comment(Some(&t.commenter), &t.comment_id),
        t.backend.delete_comment(Some(&t.owner), &t.comment_id)
    );
    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|outcome| matches!(outcome, Err(FramezError::NotFound { collection: "comments", .. })))
    );
    assert!(t.backend.get_comments_by_post(&t.post_id, None).await.expect("list").is_empty());
}

#[tokio::test]
async fn comments_list_newest_first_with_limit() {
    let t = thread().await;
    let second = t
        .backend
        .create_comment(Some(&t.owner), &t.post_id, "second")
        .await
        .expect("second");
    let third = t
        .backend
        .create_comment(Some(&t.stranger), &t.post_id, "third")
        .await
        .expect("third");

    let ids: Vec<String> = t
        .backend
        .get_comments_by_post(&t.post_id, None)
        .await
        .expect("list")
        .into_iter()
        .map(|comment| comment.id)
        .collect();
    assert_eq!(ids, vec![third.clone(), second, t.comment_id.clone()]);

    let limited = t.backend.get_comments_by_post(&t.post_id, Some(1)).await.expect("limited");
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, third);

    let fallback = t.backend.get_comments_by_post(&t.post_id, Some(0)).await.expect("zero");
    assert_eq!(fallback.len(), 3);

    assert!(t.backend.get_comments_by_post("other", None).await.expect("other").is_empty());
}
