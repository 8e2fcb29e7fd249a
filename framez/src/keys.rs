/// Service segment shared by every framez key.
pub const SERVICE: &str = "framez";

pub const USERS: &str = "users";
pub const POSTS: &str = "posts";
pub const COMMENTS: &str = "comments";
pub const LIKES: &str = "likes";

/// Key-construction helpers for documents and their indexes.
#[derive(Debug, Clone)]
pub struct KeyContext<'a> {
    pub prefix: &'a str,
    pub service: &'a str,
}

impl<'a> KeyContext<'a> {
    pub fn new(prefix: &'a str, service: &'a str) -> Self {
        Self { prefix, service }
    }

    pub fn document(&self, collection: &str, id: &str) -> String {
        format!("{}:{}:{}:{}", self.prefix, self.service, collection, id)
    }

    /// Collection-wide index, e.g. the token lookup for users or the feed ordering for posts.
    pub fn index(&self, collection: &str, name: &str) -> String {
        format!("{}:{}:{}:idx:{}", self.prefix, self.service, collection, name)
    }

    /// Index scoped to an owning document, e.g. the comments of one post.
    /// Format: prefix:service:collection:idx:name:owner_id
    pub fn scoped_index(&self, collection: &str, name: &str, owner_id: &str) -> String {
        format!(
            "{}:{}:{}:idx:{}:{}",
            self.prefix, self.service, collection, name, owner_id
        )
    }

    /// Pattern matching every key of the namespace.
    pub fn namespace_pattern(&self) -> String {
        format!("{}:{}:*", self.prefix, self.service)
    }
}
