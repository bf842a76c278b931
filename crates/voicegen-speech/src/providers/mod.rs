//! Speech provider implementations
//!
//! This module contains concrete implementations of [`crate::TTSSpeechProvider`].

pub mod openai;
