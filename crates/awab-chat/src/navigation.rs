//! Settings navigation capability.
//!
//! Some fallback replies ask the host to show its settings surface. The
//! engine only triggers it; what "settings" means is up to the host.

/// Fire-and-forget trigger for the host's settings screen.
pub trait SettingsNavigator: Send + Sync {
    fn open_settings(&self);
}

/// Navigator that does nothing. For hosts without a settings surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl SettingsNavigator for NoopNavigator {
    fn open_settings(&self) {
        tracing::debug!("Settings navigation requested but no settings surface is attached");
    }
}
