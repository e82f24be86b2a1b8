//! Driving adapters: everything that turns an external request into a
//! domain operation.

pub mod http;
