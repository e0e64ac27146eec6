use crate::types::VertexId;
use thiserror::Error;

/// Failure conditions reported by the geometry core.
///
/// All of them are recoverable: a handle or geometry stays usable after any failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
	/// A codec was given ill-formed, truncated or mismatching data.
	#[error("malformed input: {0}")]
	MalformedInput(String),

	/// A vertex address lies outside the addressed geometry.
	#[error("invalid vertex address {0}")]
	InvalidAddress(VertexId),

	/// The topology engine or a projection declined or failed on its input.
	#[error("operation failed: {0}")]
	OperationFailed(String),
}

impl GeometryError {
	/// Wraps an internal decoding error, keeping the whole context chain in the message.
	pub(crate) fn malformed(error: &anyhow::Error) -> Self {
		GeometryError::MalformedInput(format!("{error:#}"))
	}

	pub(crate) fn failed(message: impl Into<String>) -> Self {
		GeometryError::OperationFailed(message.into())
	}
}

pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::{Context, anyhow};

	#[test]
	fn malformed_keeps_context_chain() {
		let error = Err::<(), _>(anyhow!("unexpected end of data"))
			.context("while reading ring 2")
			.unwrap_err();
		let error = GeometryError::malformed(&error);
		assert_eq!(
			error.to_string(),
			"malformed input: while reading ring 2: unexpected end of data"
		);
	}

	#[test]
	fn display() {
		assert_eq!(
			GeometryError::InvalidAddress(VertexId::new(0, 1, 7)).to_string(),
			"invalid vertex address (0, 1, 7)"
		);
		assert_eq!(
			GeometryError::failed("empty operand").to_string(),
			"operation failed: empty operand"
		);
	}
}
