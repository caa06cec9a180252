//! Application layer orchestrating the account use-cases.
//!
//! `AccountService` is the single entry point for the HTTP handlers. It
//! owns the storage port, resolves pagination inputs into a concrete
//! query window, and derives the page count from the store's total.

pub mod service;
