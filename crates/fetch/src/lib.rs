//! Direct-link download pipeline
//!
//! This crate takes a user supplied HTTP(S) link through validation,
//! a header-only size probe and a streaming download into a per-request
//! staging directory. The staged file is removed as soon as the returned
//! [`Download`] is dropped, whichever way the request ends.

pub mod constants;
pub mod error;
pub mod fetcher;
pub mod filename;
pub mod staging;
pub mod stats;
pub mod url;

pub use error::{FetchError, FetchResult};
pub use fetcher::{Download, FetchConfig, Fetcher, ProbeInfo, RemoteFile};
pub use filename::{is_extension_allowed, resolve_filename};
pub use staging::{StagedFile, StagingArea};
pub use stats::{Progress, TransferStats};
pub use url::validate_url;
