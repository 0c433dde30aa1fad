//! Shared-library dependency closure.
//!
//! This crate computes the transitive set of libraries a Mach-O binary or
//! dylib links against:
//!
//! - **otool parsing**: Extract library paths from `otool -L` output
//! - **Dependency listers**: Query direct dependencies of one path
//! - **Closure resolution**: Breadth-first expansion until no new paths appear
//!
//! # Example
//!
//! ```ignore
//! use depclosure::{ClosureResolver, OtoolLister};
//!
//! let resolver = ClosureResolver::new(OtoolLister::default());
//! let closure = resolver.resolve("/usr/lib/libz.dylib")?;
//!
//! for path in &closure {
//!     println!("{}", path);
//! }
//! ```

mod error;
mod lister;
pub mod otool;
mod resolver;

pub use error::{ClosureError, ClosureResult};
pub use lister::{DependencyLister, MemoryLister, OtoolConfig, OtoolLister};
pub use resolver::{resolve, Closure, ClosureResolver};
