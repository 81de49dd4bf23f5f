//! The core, UI-agnostic library for the `ejectr` volume utility.
//!
//! `ejectr-core` lists the removable volumes mounted on macOS or Windows and
//! safely ejects them. It is meant to sit behind any front-end, whether a
//! command-line interface (like `ejectr`) or a launcher extension, and it
//! never prints: user-facing problems are handed back as [`toast::Toast`]
//! values or returned as errors.
//!
//! The library is structured into several key modules:
//! - [`volume`]: Contains the `Volume` value passed from listing to ejecting.
//! - [`platform`]: Resolves the running OS and holds the per-OS commands and
//!   output parsers.
//! - [`mod@list`]: Lists removable volumes, applying the user's ignore list.
//! - [`mod@eject`]: Safely ejects a listed volume.
//! - [`command`]: Runs external processes with optional timeouts.
//! - [`config`]: The explicit configuration threaded into every call.
//!
//! ## Example: Ejecting the First Removable Volume
//!
//! ```rust,no_run
//! use ejectr_core::{command::SystemRunner, config::{Config, IgnoreList}, eject, list};
//! use ejectr_core::platform::Platform;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> ejectr_core::error::Result<()> {
//!     // Fails on anything other than macOS or Windows.
//!     let platform = Platform::current()?;
//!     let config = Config::new(IgnoreList::parse("Macintosh HD"), None);
//!
//!     let volumes = list::run(platform, &config, &SystemRunner, |toast| {
//!         eprintln!("{}: {}", toast.title, toast.message);
//!     })
//!     .await;
//!
//!     if let Some(volume) = volumes.first() {
//!         eject::run(platform, volume, &config, &SystemRunner).await?;
//!         println!("Ejected {volume}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod config;
pub mod eject;
pub mod error;
pub mod list;
pub mod platform;
pub mod toast;
pub mod volume;

#[cfg(test)]
mod testing;
