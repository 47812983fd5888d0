//! Multi-channel tabular time-series container.
//!
//! `channelset` is the data-ingestion layer for multi-output
//! Gaussian-process modeling: it reads tabular input (CSV, records-oriented
//! JSON, or caller-assembled columns), infers per-column types, normalizes
//! datetime columns onto numeric axes, and composes the selected columns
//! into an ordered set of channels with per-channel train/test masks.
//!
//! ```no_run
//! use std::path::Path;
//! use channelset::{load_csv, CsvOptions};
//!
//! let set = load_csv(
//!     Path::new("passengers.csv"),
//!     &CsvOptions::default(),
//!     &["time"],
//!     &["passengers"],
//! )?;
//! assert_eq!(set.input_dims(), vec![1]);
//! # anyhow::Ok(())
//! ```

pub mod data;
pub mod error;

pub use data::channel::{Channel, ChannelData, Dimension};
pub use data::column::Column;
pub use data::loader::{CsvOptions, Table, load_csv};
pub use data::set::ChannelSet;
pub use error::DataError;
