use crate::{CloseReason, ElementId, Notification};
use std::{fmt, sync::Arc};

/// Lifecycle hooks a notification can be observed or vetoed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    Add,
    BeforeOpen,
    Open,
    AfterOpen,
    BeforeClose,
    Close,
    Click,
}

impl Hook {
    pub const ALL: [Hook; 7] = [
        Hook::Add,
        Hook::BeforeOpen,
        Hook::Open,
        Hook::AfterOpen,
        Hook::BeforeClose,
        Hook::Close,
        Hook::Click,
    ];

    /// Whether `false` from the handler stops the transition.
    pub fn is_cancellable(self) -> bool {
        matches!(self, Hook::BeforeOpen | Hook::BeforeClose | Hook::Close)
    }

    /// Option key of the instance-wide default.
    pub fn key(self) -> &'static str {
        match self {
            Hook::Add => "add",
            Hook::BeforeOpen => "before_open",
            Hook::Open => "open",
            Hook::AfterOpen => "after_open",
            Hook::BeforeClose => "before_close",
            Hook::Close => "close",
            Hook::Click => "click",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Hook::ALL.into_iter().find(|hook| hook.key() == key)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// What a hook handler gets to see.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub notification: &'a Notification,
    /// Unset for `Add`, the notification has no element yet.
    pub element: Option<ElementId>,
    /// Set for `BeforeClose` and `Close`.
    pub reason: Option<CloseReason>,
}

/// Returning `false` vetoes a cancellable hook and is ignored otherwise.
pub type Callback = Arc<dyn Fn(&HookContext<'_>) -> bool + Send + Sync>;

/// Fired once with the surface id after the instance is constructed.
pub type ReadyCallback = Arc<dyn Fn(&str) + Send + Sync>;

pub fn callback<F>(f: F) -> Callback
where
    F: Fn(&HookContext<'_>) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A set of hook handlers.
///
/// Instances hold the defaults, notifications hold their overrides. Lookup goes
/// through [`Callbacks::resolve`] and never copies defaults into a notification.
#[derive(Clone, Default)]
pub struct Callbacks {
    hooks: [Option<Callback>; 7],
    ready: Option<ReadyCallback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, hook: Hook, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.set(hook, Arc::new(f));
        self
    }

    pub fn with_ready<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.ready = Some(Arc::new(f));
        self
    }

    pub fn set(&mut self, hook: Hook, callback: Callback) {
        self.hooks[hook.slot()] = Some(callback);
    }

    pub fn set_ready(&mut self, callback: ReadyCallback) {
        self.ready = Some(callback);
    }

    pub fn get(&self, hook: Hook) -> Option<&Callback> {
        self.hooks[hook.slot()].as_ref()
    }

    pub fn ready(&self) -> Option<&ReadyCallback> {
        self.ready.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.ready.is_none() && self.hooks.iter().all(Option::is_none)
    }

    /// The override in `own` if present, else the default in `defaults`.
    pub fn resolve<'a>(own: &'a Callbacks, defaults: &'a Callbacks, hook: Hook) -> Option<&'a Callback> {
        own.get(hook).or_else(|| defaults.get(hook))
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set: Vec<_> = Hook::ALL
            .into_iter()
            .filter(|hook| self.get(*hook).is_some())
            .map(Hook::key)
            .collect();
        f.debug_struct("Callbacks")
            .field("hooks", &set)
            .field("ready", &self.ready.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_keys_round_trip() {
        for hook in Hook::ALL {
            assert_eq!(Hook::from_key(hook.key()), Some(hook));
        }
        assert_eq!(Hook::from_key("ready"), None);
        assert_eq!(Hook::from_key("beforeOpen"), None);
    }

    #[test]
    fn test_cancellable_hooks() {
        assert!(Hook::BeforeOpen.is_cancellable());
        assert!(Hook::BeforeClose.is_cancellable());
        assert!(Hook::Close.is_cancellable());
        assert!(!Hook::Open.is_cancellable());
        assert!(!Hook::AfterOpen.is_cancellable());
        assert!(!Hook::Add.is_cancellable());
    }

    #[test]
    fn test_resolve_prefers_override() {
        let defaults = Callbacks::new().with(Hook::BeforeOpen, |_| true);
        let own = Callbacks::new().with(Hook::BeforeOpen, |_| false);
        let notification = Notification::default();
        let ctx = HookContext {
            notification: &notification,
            element: None,
            reason: None,
        };

        let resolved = Callbacks::resolve(&own, &defaults, Hook::BeforeOpen).unwrap();
        assert!(!resolved(&ctx));

        let none = Callbacks::new();
        let resolved = Callbacks::resolve(&none, &defaults, Hook::BeforeOpen).unwrap();
        assert!(resolved(&ctx));

        assert!(Callbacks::resolve(&own, &defaults, Hook::Close).is_none());
    }

    #[test]
    fn test_debug_lists_set_hooks() {
        let callbacks = Callbacks::new().with(Hook::Close, |_| true);
        let debug = format!("{:?}", callbacks);
        assert!(debug.contains("close"));
        assert!(!debug.contains("before_open"));
    }
}
