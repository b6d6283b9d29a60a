//! Integration Tests Module
//!
//! End-to-end coverage for the Roast.fm server: the HTTP surface and the
//! full conversation loop driven the way the browser drives it, plus
//! property tests for the response sanitizer and request signer.
//! No network calls are made; the completion provider is left
//! unconfigured so every LLM-backed path exercises its fallback.

// Router-level and full-conversation tests
mod conversation_test;

// Sanitizer and signature property tests
mod sanitize_props;
