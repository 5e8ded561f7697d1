//! Structural interface grafting for Java sources.
//!
//! Interfaces marked `@DuckType` are grafted onto classes whose declared
//! method sets structurally cover them: the class's source is rewritten
//! (into a generated-sources tree, never in place) with an `implements`
//! entry, an import of the interface, and `@Override` markers on the
//! matching methods. Classes marked `@AddField` get a fresh companion
//! unit containing a single `private String name;` field.
//!
//! # Pipeline
//!
//! ```text
//! Round (element snapshot)
//!     │
//!     ▼
//! InterfaceRegistry ──► scan_round ──► Match per class
//!                                          │
//!                                          ▼
//!                        load_unit ──► graft_interfaces ──► write_artifact
//! ```
//!
//! Everything is per-round; the registry and matches are discarded when
//! `process` returns. One failed class never blocks the rest of the round.

pub mod addfield;
pub mod edit;
pub mod element;
pub mod emit;
pub mod locate;
pub mod matcher;
pub mod mutate;
pub mod options;
pub mod processor;
pub mod registry;
pub mod signature;

pub use element::{elements_from_unit, ElementKind, MethodElement, Round, TypeElement};
pub use locate::{MapLookup, SourceLookup};
pub use matcher::{scan_round, Match};
pub use mutate::{graft_interfaces, GraftOutcome};
pub use options::ProcessorOptions;
pub use processor::{Processor, SourceVersion};
pub use registry::{InterfaceDescriptor, InterfaceRegistry};
pub use signature::{signature, MethodView, SyntacticMethod, TypeResolver};
