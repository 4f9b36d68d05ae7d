//! End-to-end tests for tablegen-codegen live under `tests/`.
