//! Command-line extensions for `hocon-bind` library.
//!
//! The extensions are as follows:
//!
//! - [Printing help](Printer::print_help()) for config fields with optional filtering.
//! - [Debugging](Printer::print_debug()) field values and coercion errors.
//!
//! All extensions are encapsulated in [`Printer`].
//!
//! # Examples
//!
//! ## Printing help
//!
//! ```
//! use hocon_bind::{ConfigSchema, DescribeConfig, DeserializeConfig};
//! use hocon_bind_commands::Printer;
//!
//! #[derive(DescribeConfig, DeserializeConfig)]
//! struct TestConfig {
//!     /// Port to bind to.
//!     #[hocon("default=8080")]
//!     port: u16,
//! }
//!
//! let schema = ConfigSchema::new(&TestConfig::DESCRIPTION)?;
//! Printer::stderr().print_help(&schema, |_| true)?;
//! # anyhow::Ok(())
//! ```
//!
//! ## Debugging param values
//!
//! ```
//! use hocon_bind::{ConfigSchema, ConfigTree};
//! # use hocon_bind::{DescribeConfig, DeserializeConfig};
//! use hocon_bind_commands::Printer;
//!
//! # #[derive(DescribeConfig, DeserializeConfig)]
//! # struct TestConfig {
//! #     #[hocon("default=8080")]
//! #     port: u16,
//! # }
//! let schema = ConfigSchema::new(&TestConfig::DESCRIPTION)?;
//! let tree = ConfigTree::parse_str("port: 3000")?;
//! let errors = Printer::stderr().print_debug(&schema, &tree, |_| true)?;
//! assert!(errors.is_empty());
//! # anyhow::Ok(())
//! ```

// Documentation settings
#![doc(html_root_url = "https://docs.rs/hocon-bind-commands/0.1.0")]
// Linter settings
#![warn(missing_docs)]

use std::{
    io,
    io::{StderrLock, StdoutLock},
};

use anstream::{AutoStream, stream::RawStream};

mod debug;
mod help;
mod utils;

/// Wrapper around an I/O writer. Will style the output with ANSI sequences if appropriate.
///
/// Internally, the printer is based on [`anstream`] / [`anstyle`]; see their docs to find out how styling support
/// is detected by default. (TL;DR: based on `NO_COLOR`, `CLICOLOR_FORCE` and `CLICOLOR` env vars, and whether
/// the output is a terminal.) If this detection doesn't work for you, you can always [create](Self::custom()) a fully custom `Printer`.
///
/// [`anstream`]: https://docs.rs/anstream/
/// [`anstyle`]: https://docs.rs/anstyle/
#[derive(Debug)]
pub struct Printer<W: RawStream> {
    writer: AutoStream<W>,
}

impl Printer<StdoutLock<'static>> {
    /// Creates a printer to stdout. The stdout is locked while the printer is alive!
    pub fn stdout() -> Self {
        Self {
            writer: AutoStream::auto(io::stdout()).lock(),
        }
    }
}

impl Printer<StderrLock<'static>> {
    /// Creates a printer to stderr. The stderr is locked while the printer is alive!
    pub fn stderr() -> Self {
        Self {
            writer: AutoStream::auto(io::stderr()).lock(),
        }
    }
}

impl<W: RawStream> Printer<W> {
    /// Creates a custom printer.
    pub fn custom(writer: AutoStream<W>) -> Self {
        Self { writer }
    }
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
