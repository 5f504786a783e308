//! Tests for the authentication service

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod tracker_tests;
#[cfg(test)]
mod service_tests;
