/// Server-confirmed list plus an optional local override.
///
/// Reads prefer the local copy, then the last confirmed server list, then
/// nothing. Every optimistic edit writes the local copy; a server sync
/// replaces both.
#[derive(Debug, Clone)]
pub struct Overlay<T> {
    confirmed: Option<Vec<T>>,
    local: Option<Vec<T>>,
}

impl<T> Default for Overlay<T> {
    fn default() -> Self {
        Self {
            confirmed: None,
            local: None,
        }
    }
}

impl<T: Clone> Overlay<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts a fresh server result.
    pub fn sync(&mut self, server: Vec<T>) {
        self.local = Some(server.clone());
        self.confirmed = Some(server);
    }

    pub fn current(&self) -> &[T] {
        self.local
            .as_deref()
            .or(self.confirmed.as_deref())
            .unwrap_or(&[])
    }

    /// `true` once the server has answered at least once.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed.is_some()
    }

    pub fn is_overridden(&self) -> bool {
        self.local.is_some()
    }

    /// Copy of the current view, used to roll back a failed mutation.
    pub fn snapshot(&self) -> Vec<T> {
        self.current().to_vec()
    }

    pub fn restore(&mut self, snapshot: Vec<T>) {
        self.local = Some(snapshot);
    }

    /// Edits the current view in place, turning it into a local override.
    pub fn update(&mut self, edit: impl FnOnce(&mut Vec<T>)) {
        let mut items = self.snapshot();
        edit(&mut items);
        self.local = Some(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fall_back_to_confirmed_then_empty() {
        let mut overlay: Overlay<u32> = Overlay::new();
        assert!(overlay.current().is_empty());
        assert!(!overlay.is_confirmed());

        overlay.sync(vec![1, 2]);
        assert_eq!(overlay.current(), &[1, 2]);

        overlay.update(|items| items.insert(0, 0));
        assert_eq!(overlay.current(), &[0, 1, 2]);
    }

    #[test]
    fn restore_rolls_back_and_sync_wins() {
        let mut overlay = Overlay::new();
        overlay.sync(vec!["a"]);
        let snapshot = overlay.snapshot();
        overlay.update(|items| items.clear());
        assert!(overlay.current().is_empty());
        overlay.restore(snapshot);
        assert_eq!(overlay.current(), &["a"]);

        overlay.update(|items| items.push("pending"));
        overlay.sync(vec!["a", "b"]);
        assert_eq!(overlay.current(), &["a", "b"]);
    }
}
