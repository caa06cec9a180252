//! Store adapters behind the `AccountStore` port.

pub mod document;
pub mod in_memory;
pub mod mongo;
