use std::borrow::Cow;

use chrono::{DateTime, Utc};
use redis::{aio::ConnectionManager, cmd};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::Store;
use crate::{
    errors::FramezError,
    keys::{COMMENTS, KeyContext, LIKES, POSTS, SERVICE, USERS},
    model::{Comment, Like, LikeToggle, Post, User, UserPatch},
    runtime::{
        MutationExecutor, RedisExecutor,
        commands::{
            DocumentDelete, DocumentInsert, DocumentPatch, FieldAssignment, LikeToggleCommand, MutationCommand,
            MutationPlan, SortedIndexEntry, SortedIndexRemoval, UniqueIndexEntry,
        },
    },
};

const BY_TOKEN: &str = "by_token";
const BY_CREATED: &str = "by_created";
const BY_AUTHOR: &str = "by_author";
const BY_POST: &str = "by_post";
const BY_POST_USER: &str = "by_post_user";

/// [`Store`] backed by Redis Stack.
///
/// Documents live under `{prefix}:framez:{collection}:{id}` as RedisJSON
/// values. Unique lookups are hashes, ordered lookups are sorted sets scored by
/// creation time in milliseconds widened with a per-millisecond sequence, so
/// equal timestamps read back in insertion order.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
        }
    }

    /// Opens a managed connection to `url`.
    ///
    /// # Example
    /// ```ignore
    /// let store = RedisStore::connect("redis://localhost:6379", "framez").await?;
    /// ```
    pub async fn connect(url: &str, prefix: impl Into<String>) -> Result<Self, FramezError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self::new(conn, prefix))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Clone of the connection manager for advanced operations.
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    fn keys(&self) -> KeyContext<'_> {
        KeyContext::new(&self.prefix, SERVICE)
    }

    async fn execute(&self, command: MutationCommand) -> Result<Value, FramezError> {
        let mut conn = self.conn.clone();
        let mut executor = RedisExecutor::new(&mut conn);
        let mut replies = executor.execute(MutationPlan::single(command)).await?;
        replies.pop().ok_or(FramezError::Other {
            message: Cow::Borrowed("script returned no reply"),
        })
    }

    async fn get_document<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>, FramezError> {
        let key = self.keys().document(collection, id);
        let mut conn = self.conn.clone();
        let result: Option<String> = cmd("JSON.GET").arg(&key).query_async(&mut conn).await?;
        match result {
            Some(json) => Ok(Some(serde_json::from_str::<T>(&json)?)),
            None => Ok(None),
        }
    }

    /// Loads documents in the order of `ids`, skipping ids whose document vanished.
    async fn get_documents<T: DeserializeOwned>(&self, collection: &str, ids: &[String]) -> Result<Vec<T>, FramezError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let keys = self.keys();
        let document_keys: Vec<String> = ids.iter().map(|id| keys.document(collection, id)).collect();
        let mut conn = self.conn.clone();
        let raw: Vec<Option<String>> = cmd("JSON.MGET")
            .arg(&document_keys)
            .arg("$")
            .query_async(&mut conn)
            .await?;
        let mut documents = Vec::with_capacity(raw.len());
        for json in raw.into_iter().flatten() {
            // `$` paths reply with an array holding the root value.
            let mut matches: Vec<T> = serde_json::from_str(&json)?;
            if !matches.is_empty() {
                documents.push(matches.swap_remove(0));
            }
        }
        Ok(documents)
    }

    async fn range(&self, index_key: &str, limit: Option<usize>, newest_first: bool) -> Result<Vec<String>, FramezError> {
        if limit == Some(0) {
            return Ok(Vec::new());
        }
        let stop = limit.map_or(-1, |limit| limit as isize - 1);
        let command = if newest_first { "ZREVRANGE" } else { "ZRANGE" };
        let mut conn = self.conn.clone();
        let ids: Vec<String> = cmd(command)
            .arg(index_key)
            .arg(0)
            .arg(stop)
            .query_async(&mut conn)
            .await?;
        Ok(ids)
    }

    fn insert_command<T: Serialize>(
        &self,
        collection: &'static str,
        id: &str,
        document: &T,
        unique_indexes: Vec<UniqueIndexEntry>,
        sorted_indexes: Vec<SortedIndexEntry>,
    ) -> Result<MutationCommand, FramezError> {
        Ok(MutationCommand::InsertDocument(DocumentInsert {
            collection,
            key: self.keys().document(collection, id),
            document_id: id.to_string(),
            payload_json: serde_json::to_string(document)?,
            unique_indexes,
            sorted_indexes,
        }))
    }
}

fn sorted_entry(index_key: String, at: DateTime<Utc>, member: &str) -> SortedIndexEntry {
    SortedIndexEntry {
        index_key,
        created_ms: at.timestamp_millis(),
        member: member.to_string(),
    }
}

fn assignment<T: Serialize>(field: &str, value: &T) -> Result<FieldAssignment, FramezError> {
    Ok(FieldAssignment {
        path: format!("$.{field}"),
        value_json: serde_json::to_string(value)?,
    })
}

impl Store for RedisStore {
    async fn user_by_token(&self, token_identifier: &str) -> Result<Option<User>, FramezError> {
        let index_key = self.keys().index(USERS, BY_TOKEN);
        let mut conn = self.conn.clone();
        let user_id: Option<String> = cmd("HGET")
            .arg(&index_key)
            .arg(token_identifier)
            .query_async(&mut conn)
            .await?;
        match user_id {
            Some(user_id) => self.get_document(USERS, &user_id).await,
            None => Ok(None),
        }
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, FramezError> {
        self.get_document(USERS, user_id).await
    }

    async fn insert_user(&self, user: &User) -> Result<(), FramezError> {
        let unique = vec![UniqueIndexEntry {
            index_key: self.keys().index(USERS, BY_TOKEN),
            field: user.token_identifier.clone(),
        }];
        let command = self.insert_command(USERS, &user.id, user, unique, Vec::new())?;
        self.execute(command).await?;
        Ok(())
    }

    async fn patch_user(&self, user_id: &str, patch: &UserPatch, at: DateTime<Utc>) -> Result<(), FramezError> {
        let mut assignments = Vec::new();
        if let Some(name) = &patch.name {
            assignments.push(assignment("name", name)?);
        }
        if let Some(username) = &patch.username {
            assignments.push(assignment("username", username)?);
        }
        if let Some(image) = &patch.profile_image {
            assignments.push(assignment("profile_image", image)?);
        }
        assignments.push(assignment("updated_at", &at)?);

        let command = MutationCommand::PatchDocument(DocumentPatch {
            collection: USERS,
            key: self.keys().document(USERS, user_id),
            document_id: user_id.to_string(),
            assignments,
        });
        self.execute(command).await?;
        Ok(())
    }

    async fn insert_post(&self, post: &Post) -> Result<(), FramezError> {
        let keys = self.keys();
        let sorted = vec![
            sorted_entry(keys.index(POSTS, BY_CREATED), post.created_at, &post.id),
            sorted_entry(keys.scoped_index(POSTS, BY_AUTHOR, &post.author), post.created_at, &post.id),
        ];
        let command = self.insert_command(POSTS, &post.id, post, Vec::new(), sorted)?;
        self.execute(command).await?;
        Ok(())
    }

    async fn get_post(&self, post_id: &str) -> Result<Option<Post>, FramezError> {
        self.get_document(POSTS, post_id).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, FramezError> {
        let ids = self.range(&self.keys().index(POSTS, BY_CREATED), None, true).await?;
        self.get_documents(POSTS, &ids).await
    }

    async fn list_posts_by_author(&self, author_id: &str) -> Result<Vec<Post>, FramezError> {
        let index_key = self.keys().scoped_index(POSTS, BY_AUTHOR, author_id);
        let ids = self.range(&index_key, None, false).await?;
        self.get_documents(POSTS, &ids).await
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), FramezError> {
        let sorted = vec![sorted_entry(
            self.keys().scoped_index(COMMENTS, BY_POST, &comment.post_id),
            comment.created_at,
            &comment.id,
        )];
        let command = self.insert_command(COMMENTS, &comment.id, comment, Vec::new(), sorted)?;
        self.execute(command).await?;
        Ok(())
    }

    async fn get_comment(&self, comment_id: &str) -> Result<Option<Comment>, FramezError> {
        self.get_document(COMMENTS, comment_id).await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<bool, FramezError> {
        let Some(comment) = self.get_comment(comment_id).await? else {
            return Ok(false);
        };
        let keys = self.keys();
        let command = MutationCommand::DeleteDocument(DocumentDelete {
            collection: COMMENTS,
            key: keys.document(COMMENTS, comment_id),
            document_id: comment_id.to_string(),
            sorted_indexes: vec![SortedIndexRemoval {
                index_key: keys.scoped_index(COMMENTS, BY_POST, &comment.post_id),
                member: comment_id.to_string(),
            }],
        });
        let reply = self.execute(command).await?;
        Ok(reply.get("deleted").and_then(Value::as_bool).unwrap_or(false))
    }

    async fn list_comments_by_post(&self, post_id: &str, limit: usize) -> Result<Vec<Comment>, FramezError> {
        let index_key = self.keys().scoped_index(COMMENTS, BY_POST, post_id);
        let ids = self.range(&index_key, Some(limit), true).await?;
        self.get_documents(COMMENTS, &ids).await
    }

    async fn toggle_like(&self, candidate: &Like) -> Result<LikeToggle, FramezError> {
        let keys = self.keys();
        let command = MutationCommand::ToggleLike(LikeToggleCommand {
            pair_index_key: keys.scoped_index(LIKES, BY_POST_USER, &candidate.post_id),
            by_post_index_key: keys.scoped_index(LIKES, BY_POST, &candidate.post_id),
            like_key_prefix: keys.document(LIKES, ""),
            user_id: candidate.user_id.clone(),
            like_id: candidate.id.clone(),
            payload_json: serde_json::to_string(candidate)?,
            created_ms: candidate.created_at.timestamp_millis(),
        });
        let reply = self.execute(command).await?;
        let liked = reply.get("liked").and_then(Value::as_bool).ok_or(FramezError::Other {
            message: Cow::Borrowed("toggle_like reply is missing 'liked'"),
        })?;
        Ok(LikeToggle { liked })
    }

    async fn count_likes(&self, post_id: &str) -> Result<u64, FramezError> {
        let index_key = self.keys().scoped_index(LIKES, BY_POST, post_id);
        let mut conn = self.conn.clone();
        let count: u64 = cmd("ZCARD").arg(&index_key).query_async(&mut conn).await?;
        Ok(count)
    }

    async fn list_likes_by_post(&self, post_id: &str, limit: usize) -> Result<Vec<Like>, FramezError> {
        let index_key = self.keys().scoped_index(LIKES, BY_POST, post_id);
        let ids = self.range(&index_key, Some(limit), true).await?;
        self.get_documents(LIKES, &ids).await
    }
}
