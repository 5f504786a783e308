//! Tests for the verification service

#[cfg(test)]
mod mocks;
