//! One-way replication of guest and booking records into a secondary
//! document store. Pushes are keyed by stable identifiers; updates merge
//! rather than replace; deletion is deliberately unimplemented.

pub mod firestore;
pub mod service;
pub mod store;

pub use firestore::FirestoreMirror;
pub use service::{BookingRecord, GuestRecord, MirrorService};
pub use store::{DocumentFields, DocumentStore, FieldValue, MirrorError};
