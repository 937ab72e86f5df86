pub(crate) const TOKEN_KEY: &str = "token";

#[cfg(target_arch = "wasm32")]
mod backend {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    pub fn get(key: &str) -> Option<String> {
        local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    pub fn set(key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    pub fn remove(key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory stand-in for local storage on native targets, one map per thread.
#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static ITEMS: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn get(key: &str) -> Option<String> {
        ITEMS.with(|items| items.borrow().get(key).cloned())
    }

    pub fn set(key: &str, value: &str) {
        ITEMS.with(|items| {
            items.borrow_mut().insert(key.to_string(), value.to_string());
        });
    }

    pub fn remove(key: &str) {
        ITEMS.with(|items| {
            items.borrow_mut().remove(key);
        });
    }
}

pub(crate) fn load_token() -> Option<String> {
    backend::get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

pub(crate) fn save_token(token: &str) {
    backend::set(TOKEN_KEY, token);
}

pub(crate) fn remove_token() {
    backend::remove(TOKEN_KEY);
}
