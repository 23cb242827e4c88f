//! Action trait for host state mutations

use std::fmt::Debug;

/// Marker trait for actions a host dispatches to its store
///
/// Components never write host state directly. A select field, for example,
/// hands its new selection back by building an action with the host's
/// `on_change` constructor; the host dispatches it and re-renders.
///
/// Actions should be:
/// - Clone: they may be logged and then reduced
/// - Debug: for logging
/// - Send + 'static: so they can travel through channels
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}
