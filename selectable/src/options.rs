//! Options threaded through select/deselect calls.

use serde::Serialize;

/// Structural change that caused a selection, carried into notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalEvent {
    /// The item was added to a host while already selected.
    Add,
    /// The item was removed from a host.
    Remove,
    /// The host's backing collection was replaced.
    Reset,
}

impl std::fmt::Display for ExternalEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ExternalEvent::Add => "add",
            ExternalEvent::Remove => "remove",
            ExternalEvent::Reset => "reset",
        })
    }
}

/// Flags controlling notification and propagation for one call.
///
/// `silent` and `silent_reselect` travel with the whole operation.
/// `silent_locally` and `skip_model_call` only apply at the level they are
/// set on and are cleared by [`forwarded`](Self::forwarded) before a
/// component calls its counterpart.
///
/// ```ignore
/// engine.select_with(host, item, SelectOptions::new().silent())?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Suppress every notification, at every level.
    pub silent: bool,
    /// Suppress notifications at this propagation level only.
    pub silent_locally: bool,
    /// Suppress only the reselection variant of a notification.
    pub silent_reselect: bool,
    /// Skip the reverse call from a host into the item.
    pub skip_model_call: bool,
    /// Structural change that triggered this call, if any.
    pub external: Option<ExternalEvent>,
}

impl SelectOptions {
    /// Options with every flag cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress all notifications.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Suppress notifications at this level only.
    pub fn silent_locally(mut self) -> Self {
        self.silent_locally = true;
        self
    }

    /// Suppress reselection notifications.
    pub fn silent_reselect(mut self) -> Self {
        self.silent_reselect = true;
        self
    }

    /// Do not call back into the item.
    pub fn skip_model_call(mut self) -> Self {
        self.skip_model_call = true;
        self
    }

    /// Tag the call with the structural change that caused it.
    pub fn external(mut self, event: ExternalEvent) -> Self {
        self.external = Some(event);
        self
    }

    /// The options a component hands to its counterpart.
    pub fn forwarded(&self) -> Self {
        Self {
            silent_locally: false,
            skip_model_call: false,
            ..*self
        }
    }

    /// Whether notifications at this level are suppressed.
    pub fn is_quiet(&self) -> bool {
        self.silent || self.silent_locally
    }

    /// Whether a reselection notification at this level is suppressed.
    pub fn mutes_reselect(&self) -> bool {
        self.is_quiet() || self.silent_reselect
    }
}
