use std::collections::HashMap;

use super::prelude::Value;

/// Variables of one session. Bindings are only ever created or overwritten.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    store: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    /// Binds `name`, returning the value it replaced.
    pub fn set(&mut self, name: String, value: Value) -> Option<Value> {
        tracing::trace!(%name, %value, "binding variable");

        self.store.insert(name, value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
