//! Output generation modules for JSON and plain-text study documents.
//!
//! # Submodules
//!
//! - [`json`]: Writes daily and weekly compilations to dated JSON files
//! - [`text`]: Renders quiz documents and printable daily reports
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2026-08-20/
//!     ├── daily.json
//!     └── week-34.json
//!
//! report_output_dir/
//! └── 2026-08-20/
//!     ├── quiz.txt
//!     └── report.txt
//! ```

pub mod json;
pub mod text;
