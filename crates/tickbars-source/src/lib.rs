//! CSV tick source loading for tickbars.
//!
//! This crate provides the tick loading pipeline:
//!
//! - [`discover_csv_files`] - Lists the `.csv` files of a directory in name order
//! - [`read_ticks`] - Parses one source file
//! - [`source_stream`] - Loads files one after another, skipping failed files

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod discover;
mod error;
mod reader;
mod stream;

pub use discover::discover_csv_files;
pub use error::SourceError;
pub use reader::read_ticks;
pub use stream::{SourceBatch, load_files, source_stream};
