//! Data models used throughout the application
//!
//! This module contains the wire structures exchanged with the upstream
//! JSON-RPC node and the conversion helpers for its hex quantities.

// JSON-RPC protocol data structures
pub mod jsonrpc;
