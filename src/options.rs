//! Runtime access to instance options by name.

use popstack_config::PopstackConfig;
use popstack_util::{Callback, Callbacks, Hook, ReadyCallback};
use std::{fmt, sync::Arc};

/// Options that only take effect at construction. Writes to them are dropped.
pub const CONSTRUCTION_ONLY: [&str; 9] = [
    "append_to",
    "block",
    "position",
    "layout",
    "spacing",
    "header_text",
    "closer",
    "interval",
    "pause_on_hover",
];

#[derive(Clone)]
pub enum OptionValue {
    Value(serde_json::Value),
    Callback(Callback),
    Ready(ReadyCallback),
}

impl OptionValue {
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            OptionValue::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            OptionValue::Callback(_) => f.write_str("Callback(..)"),
            OptionValue::Ready(_) => f.write_str("Ready(..)"),
        }
    }
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OptionValue::Value(a), OptionValue::Value(b)) => a == b,
            (OptionValue::Callback(a), OptionValue::Callback(b)) => Arc::ptr_eq(a, b),
            (OptionValue::Ready(a), OptionValue::Ready(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for OptionValue {
    fn from(value: serde_json::Value) -> Self {
        OptionValue::Value(value)
    }
}

impl From<Callback> for OptionValue {
    fn from(callback: Callback) -> Self {
        OptionValue::Callback(callback)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Value(value.into())
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        OptionValue::Value(value.into())
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Value(value.into())
    }
}

/// Snake case form of `key`, so `pauseOnHover` and `pause_on_hover` agree.
pub fn canonical_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn is_construction_only(key: &str) -> bool {
    CONSTRUCTION_ONLY.contains(&key)
}

pub fn get_option(config: &PopstackConfig, callbacks: &Callbacks, key: &str) -> Option<OptionValue> {
    let key = canonical_key(key);
    if key == "ready" {
        return callbacks.ready().cloned().map(OptionValue::Ready);
    }
    if let Some(hook) = Hook::from_key(&key) {
        return callbacks.get(hook).cloned().map(OptionValue::Callback);
    }

    match serde_json::to_value(config) {
        Ok(serde_json::Value::Object(mut map)) => map.remove(&key).map(OptionValue::Value),
        Ok(_) => None,
        Err(err) => {
            tracing::error!("Failed to serialize options: {}", err);
            None
        }
    }
}

/// Apply one option write. Returns whether anything changed.
pub fn set_option(config: &mut PopstackConfig, callbacks: &mut Callbacks, key: &str, value: OptionValue) -> bool {
    let key = canonical_key(key);
    if is_construction_only(&key) {
        tracing::debug!("Option {key} is fixed at construction, ignoring");
        return false;
    }

    match value {
        OptionValue::Ready(ready) if key == "ready" => {
            callbacks.set_ready(ready);
            true
        }
        OptionValue::Callback(callback) => match Hook::from_key(&key) {
            Some(hook) => {
                callbacks.set(hook, callback);
                true
            }
            None => {
                tracing::warn!("Option {key} is not a callback, ignoring");
                false
            }
        },
        OptionValue::Ready(_) => {
            tracing::warn!("Option {key} does not take a ready callback, ignoring");
            false
        }
        OptionValue::Value(value) => set_value(config, &key, value),
    }
}

fn set_value(config: &mut PopstackConfig, key: &str, value: serde_json::Value) -> bool {
    let mut map = match serde_json::to_value(&*config) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) => return false,
        Err(err) => {
            tracing::error!("Failed to serialize options: {}", err);
            return false;
        }
    };

    if !map.contains_key(key) {
        tracing::warn!("Unknown option {key}, ignoring");
        return false;
    }
    map.insert(key.to_string(), value);

    match serde_json::from_value::<PopstackConfig>(serde_json::Value::Object(map)) {
        Ok(updated) => {
            let changed = updated != *config;
            *config = updated;
            changed
        }
        Err(err) => {
            tracing::warn!("Invalid value for option {key}: {err}");
            false
        }
    }
}
