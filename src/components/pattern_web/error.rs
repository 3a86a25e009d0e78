//! Errors raised while attaching the component to its canvas.

use thiserror::Error;

/// Failures while wiring the component to its canvas.
#[derive(Debug, Error)]
pub enum CanvasError {
	/// Not running in a browser window.
	#[error("no global window object")]
	NoWindow,
	/// The canvas refused to hand out a 2d context.
	#[error("canvas has no 2d context")]
	NoContext,
	/// `getContext` threw.
	#[error("2d context lookup failed: {0}")]
	ContextLookup(String),
	/// `getContext("2d")` returned something unexpected.
	#[error("context is not a CanvasRenderingContext2d")]
	WrongContextType,
	/// A window event listener could not be attached.
	#[error("failed to register {event:?} listener: {reason}")]
	Listener {
		/// DOM event name.
		event: &'static str,
		/// Browser-provided error text.
		reason: String,
	},
}
