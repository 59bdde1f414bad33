use thiserror::Error;

use crate::tree::WidgetId;
use crate::widgets::WidgetKind;

/// Misuse of a widget handle.
///
/// Entry points of the widget API treat these as contract violations and
/// abort; the tree returns them so framework code can check handles first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("widget handle {0:?} is stale or was never registered")]
    StaleHandle(WidgetId),
    #[error("widget {id:?} is a {found} widget, expected {expected}")]
    WrongKind {
        id: WidgetId,
        expected: WidgetKind,
        found: WidgetKind,
    },
    #[error("{0} widgets cannot have children")]
    ChildrenNotAllowed(WidgetKind),
    #[error("widget {0:?} is already being dispatched")]
    Busy(WidgetId),
}

/// Unwrap a handle check at an API boundary, aborting on misuse.
#[track_caller]
pub(crate) fn assert_handle<T>(result: Result<T, WidgetError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("widget contract violation: {err}"),
    }
}
