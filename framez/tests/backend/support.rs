#![allow(dead_code)]

pub(crate) use chrono::{Duration, Utc};
pub(crate) use framez::{
    Backend, FramezError, Identity, Like, Media, MediaKind, MemoryStore, NewPost, Store,
};

pub(crate) type TestBackend = Backend<MemoryStore>;

pub(crate) fn backend() -> TestBackend {
    let _ = env_logger::builder().is_test(true).try_init();
    Backend::in_memory()
}

pub(crate) fn identity(token: &str, name: &str) -> Identity {
    Identity::with_token(format!("https://auth.test|{token}")).name(name)
}

/// Signs `name` in and stores their user record.
pub(crate) async fn register(backend: &TestBackend, token: &str, name: &str) -> (Identity, String) {
    let caller = identity(token, name);
    let user_id = backend.store_user(Some(&caller), None).await.expect("store user");
    (caller, user_id)
}

pub(crate) fn photo(url: &str) -> NewPost {
    NewPost::new(vec![Media::image(url)])
}

pub(crate) async fn publish(backend: &TestBackend, caller: &Identity, caption: &str) -> String {
    backend
        .create_post(Some(caller), photo("https://cdn.test/photo.jpg").caption(caption))
        .await
        .expect("create post")
}
