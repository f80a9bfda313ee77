use std::collections::HashMap;
use std::sync::Mutex;

use super::SessionStore;

/// An in-memory cookie jar. Stands in for the browser's jar when embedding
/// the gate outside a browser and in tests.
#[derive(Default)]
pub struct MemoryStore {
    cookies: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a jar pre-populated with the given cookies.
    pub fn seeded<'a, I>(cookies: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let store = Self::new();
        for (name, value) in cookies {
            store.set(name, value);
        }
        store
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.lock().expect("cookie jar mutex poisoned");
        cookies.get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        let mut cookies = self.cookies.lock().expect("cookie jar mutex poisoned");
        cookies.insert(name.to_string(), value.to_string());
    }

    fn remove(&self, name: &str) {
        let mut cookies = self.cookies.lock().expect("cookie jar mutex poisoned");
        cookies.remove(name);
    }

    fn clear(&self) {
        let mut cookies = self.cookies.lock().expect("cookie jar mutex poisoned");
        cookies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test basic get/set/remove round trips.
    #[test]
    fn test_memory_store_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("auth_token"), None);

        store.set("auth_token", "abc");
        assert_eq!(store.get("auth_token").as_deref(), Some("abc"));

        store.set("auth_token", "def");
        assert_eq!(store.get("auth_token").as_deref(), Some("def"));

        store.remove("auth_token");
        assert_eq!(store.get("auth_token"), None);
    }

    /// Test that clear wipes every cookie, not just the session ones.
    #[test]
    fn test_memory_store_clear_wipes_everything() {
        let store = MemoryStore::seeded([
            ("auth_token", "abc"),
            ("uuid", "123"),
            ("is_creator", "1"),
            ("user_data", "{}"),
        ]);
        store.clear();
        assert_eq!(store.get("auth_token"), None);
        assert_eq!(store.get("uuid"), None);
        assert_eq!(store.get("is_creator"), None);
        assert_eq!(store.get("user_data"), None);
    }
}
