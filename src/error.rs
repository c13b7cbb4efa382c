use std::any::Any;

use thiserror::Error;

use crate::types::ElementType;

/// Status code returned across the boundary by every `_by` entry point.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Success = 0,
    /// The comparator panicked, the sort failed internally, or the combination is not supported.
    Failure = 1,
}

impl From<u32> for Status {
    fn from(code: u32) -> Self {
        match code {
            0 => Status::Success,
            _ => Status::Failure,
        }
    }
}

#[derive(Debug, Error)]
pub enum SortError {
    #[error("panic in foreign comparison function")]
    ComparatorPanic,

    #[error("comparison function returned unknown ordering value {0}")]
    UnknownOrdering(i8),

    #[error("{algorithm} does not support {element}: {reason}")]
    Unsupported {
        algorithm: &'static str,
        element: ElementType,
        reason: &'static str,
    },

    #[error("{0} reported failure")]
    Failed(&'static str),

    #[error("sort implementation panicked: {0}")]
    Internal(String),
}

impl SortError {
    /// Recovers the error carried by an unwind caught at a shim boundary.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<SortError>() {
            Ok(err) => return *err,
            Err(payload) => payload,
        };

        if let Some(msg) = payload.downcast_ref::<&'static str>() {
            SortError::Internal((*msg).to_owned())
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            SortError::Internal(msg.clone())
        } else {
            SortError::Internal("unknown panic payload".to_owned())
        }
    }
}

/// Raise `err` as a local unwind. It must be caught by [`crate::shim::guard`] before reaching a
/// foreign frame.
///
/// `resume_unwind` skips the panic hook, so expected comparator failures stay quiet.
#[cold]
pub(crate) fn raise(err: SortError) -> ! {
    std::panic::resume_unwind(Box::new(err))
}
