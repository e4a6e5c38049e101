//! Cart session persistence
//!
//! The cart writes through to a JSON file on every mutation so a client
//! restart never loses cart state. A missing or damaged session file loads
//! as an empty cart instead of blocking the user.

use std::path::{Path, PathBuf};

use shared::models::CartLine;

use crate::error::ClientResult;

/// File-backed store for the current cart
///
/// Cart file path: `{session_dir}/cart.json`
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `session_dir`
    pub fn new(session_dir: &Path) -> Self {
        Self {
            file_path: session_dir.join("cart.json"),
        }
    }

    /// Load the persisted cart lines
    ///
    /// Missing file means no session yet; a file that fails to parse is
    /// treated the same way, after a warning.
    pub fn load(&self) -> Vec<CartLine> {
        if !self.file_path.exists() {
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %self.file_path.display(), error = %e, "Failed to read cart session, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(path = %self.file_path.display(), error = %e, "Cart session file is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Persist the cart lines
    pub fn save(&self, lines: &[CartLine]) -> ClientResult<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(lines)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!(path = %self.file_path.display(), lines = lines.len(), "Cart session saved");
        Ok(())
    }

    /// Remove the session file
    pub fn clear(&self) -> ClientResult<()> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
            tracing::debug!(path = %self.file_path.display(), "Cart session cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(menu_item_id: &str, price: f64, quantity: i32) -> CartLine {
        CartLine {
            menu_item_id: menu_item_id.into(),
            item_name: "Test item".into(),
            price,
            image: "test.jpg".into(),
            quantity,
            restaurant_id: "rest-bento-bar".into(),
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        let lines = vec![line("item-gyoza", 5.50, 2), line("item-katsu", 11.50, 1)];
        store.save(&lines).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, lines);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::write(dir.path().join("cart.json"), "{not valid json!").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.save(&[line("item-gyoza", 5.50, 1)]).unwrap();
        store.clear().unwrap();
        assert!(!dir.path().join("cart.json").exists());
        assert!(store.load().is_empty());

        // Clearing an already-empty session is fine
        store.clear().unwrap();
    }
}
