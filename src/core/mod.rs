pub mod error;
pub mod filter;
pub mod host;
pub mod render;
pub mod scan;
pub mod session;
pub mod validate;

pub use error::{DeleteError, ScanError, SessionError, ValidationError};
pub use filter::{DEFAULT_THRESHOLD_MIB, FilterSettings, apply_filter};
pub use host::{DeletionHost, NoProgress, ProgressSink, ScanTask, ShellIntegration, spawn_scan};
pub use render::{RenderOptions, format_size, write_tree};
pub use scan::{CancelFlag, ScanReport, Scanner, SubtreeError};
pub use session::{DeleteOutcome, ScanStatus, Session};
pub use validate::{parse_threshold, validate_inputs, validate_root_path};
