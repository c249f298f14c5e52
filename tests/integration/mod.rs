//! Integration tests for the hostfacet enumeration core

mod enumeration_engine;
mod test_utils;
