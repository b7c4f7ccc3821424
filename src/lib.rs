//! utsushi: cycle-safe deep copies of dynamic value graphs.
//!
//! The engine takes an arbitrary, possibly cyclic [`Value`] graph and
//! produces an independent graph sharing no mutable storage with the
//! original. No per-type copy code is needed: values are classified by
//! runtime shape, containers are rebuilt by dedicated strategies, and
//! objects are rebuilt through the class metadata they carry
//! ([`ClassSpec`]), probing declared constructors with synthesized
//! placeholder arguments when no no-arg path exists.
//!
//! The single entry point is [`deep_copy`].

pub mod class;
mod containers;
mod context;
mod engine;
mod reconstruct;
mod synthesize;
pub(crate) mod trace;
pub mod value;

pub use class::{AttrSpec, ClassSpec, ClassSpecBuilder, CtorSpec, TypeHint};
pub use engine::deep_copy;
pub use value::{
    ArrayRef, CopyError, CopyErrorCode, MapKind, MapRef, ObjectRef, SeqKind, SeqRef, Value,
};
