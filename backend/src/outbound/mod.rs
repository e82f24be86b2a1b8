//! Driven adapters: implementations of the domain ports against real
//! infrastructure.

pub mod persistence;
