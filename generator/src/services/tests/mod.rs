//! Unit tests for generator services

mod link_selector;
