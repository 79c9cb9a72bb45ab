//! Document session: the status indicator and the install trigger.
//!
//! # Example
//!
//! ```
//! use pep723::session::{Document, DocumentSession};
//!
//! let script = "# /// script\n# requires-python = \">=3.8\"\n# ///\n";
//!
//! let mut session = DocumentSession::new();
//! let status = session.update(&Document::new("tool.py", script)).unwrap();
//!
//! assert!(status.visible);
//! assert_eq!(status.label, "Install [PEP723]");
//! ```

mod document;
mod document_session;
mod terminal;

pub use document::{Document, StatusItem, STATUS_LABEL};
pub use document_session::{DocumentSession, InstallOutcome};
pub use terminal::{RecordingTerminal, ShellTerminal, Terminal};
