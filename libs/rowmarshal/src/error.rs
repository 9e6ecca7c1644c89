use std::error::Error as StdError;

use crate::schema::BaseType;
use crate::value::ValueKind;

/// Why a cell could not be written into a slot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionFailure {
    #[error("no conversion rule")]
    Unsupported,

    #[error("malformed text {0:?}")]
    Malformed(String),

    #[error("value does not fit without loss")]
    PrecisionLoss,

    #[error("invalid UTF-8")]
    InvalidUtf8,
}

/// Failure of a single cell → slot coercion.
///
/// Carries no column or field name; the materializer attaches those.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{from} -> {to}: {reason}")]
pub struct ConversionError {
    pub from: ValueKind,
    pub to: BaseType,
    pub reason: ConversionFailure,
}

impl ConversionError {
    pub fn unsupported(from: ValueKind, to: BaseType) -> Self {
        Self { from, to, reason: ConversionFailure::Unsupported }
    }

    pub fn malformed(to: BaseType, text: &str) -> Self {
        Self {
            from: ValueKind::Text,
            to,
            reason: ConversionFailure::Malformed(text.to_string()),
        }
    }

    pub fn precision_loss(from: ValueKind, to: BaseType) -> Self {
        Self { from, to, reason: ConversionFailure::PrecisionLoss }
    }

    pub fn invalid_utf8(to: BaseType) -> Self {
        Self {
            from: ValueKind::Bytes,
            to,
            reason: ConversionFailure::InvalidUtf8,
        }
    }
}

/// Error returned by [`select`](crate::select). Every variant is terminal.
#[derive(Debug, thiserror::Error)]
pub enum MarshalError {
    #[error("invalid destination {destination}: {reason}")]
    InvalidDestinationKind {
        destination: &'static str,
        reason: &'static str,
    },

    #[error("duplicate mapping key '{key}' on fields '{first}' and '{second}'")]
    DuplicateMappingKey {
        key: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("destination {destination} takes exactly one column, result has {columns}")]
    ColumnCountMismatch {
        destination: &'static str,
        columns: usize,
    },

    #[error("column '{column}' has no matching field in {destination}")]
    UnmappedColumn {
        column: String,
        destination: &'static str,
    },

    #[error("column '{column}' into field '{field}': {source}")]
    UnsupportedConversion {
        column: String,
        field: &'static str,
        #[source]
        source: ConversionError,
    },

    #[error("row source failed at row {row}: {source}")]
    RowSource {
        row: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl MarshalError {
    pub(crate) fn row_source<E>(row: usize, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        MarshalError::RowSource { row, source: Box::new(source) }
    }
}
