use super::overlay::Overlay;
use crate::model::Liker;

/// Users who liked one post, with the pending local toggle applied.
#[derive(Debug, Clone, Default)]
pub struct LikeState {
    user_ids: Overlay<String>,
    server_count: Option<u64>,
}

impl LikeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts the server's liker list.
    pub fn sync(&mut self, likers: &[Liker]) {
        self.user_ids
            .sync(likers.iter().map(|liker| liker.user_id.clone()).collect());
    }

    /// Adopts the server's like count, used until a liker list arrives.
    pub fn sync_count(&mut self, count: u64) {
        self.server_count = Some(count);
    }

    pub fn has_liked(&self, user_id: Option<&str>) -> bool {
        user_id.is_some_and(|user_id| self.user_ids.current().iter().any(|id| id == user_id))
    }

    pub fn count(&self) -> u64 {
        if self.user_ids.is_overridden() || self.user_ids.is_confirmed() {
            self.user_ids.current().len() as u64
        } else {
            self.server_count.unwrap_or(0)
        }
    }

    pub fn user_ids(&self) -> &[String] {
        self.user_ids.current()
    }

    /// Flips `user_id`'s membership and returns the state from before the flip.
    pub fn begin_toggle(&mut self, user_id: &str) -> Vec<String> {
        let previous = self.user_ids.snapshot();
        if previous.iter().any(|id| id == user_id) {
            self.user_ids.update(|ids| ids.retain(|id| id != user_id));
        } else {
            self.user_ids.update(|ids| ids.insert(0, user_id.to_string()));
        }
        previous
    }

    pub fn rollback(&mut self, previous: Vec<String>) {
        self.user_ids.restore(previous);
    }
}
