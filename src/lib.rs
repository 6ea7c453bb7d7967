//! Estonian eID certificate bundle.
//!
//! The [`updater`] scrapes the SK ID Solutions certificate listing, classifies
//! what it finds and keeps a directory of `*.pem` files in sync with it. The
//! [`lookup`] module resolves issuer titles to files of such a directory.

pub mod certificate;
pub mod common;
pub mod constants;
pub mod extractor;
pub mod fetcher;
pub mod lookup;
pub mod reconciler;
pub mod updater;
