// Common test utilities
mod common;
