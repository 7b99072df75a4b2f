//! # NeighborSolve Testkit
//!
//! Testing utilities for NeighborSolve.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Stored snapshots from earlier builds and how they must decode
//! - **Generators**: Proptest strategies for submissions, patches and filters
//! - **Fixtures**: A shared memory backend with a pinned clock
//! - **Doubles**: Counting and failing backends, and a recording map widget
//!
//! ## Golden Vectors
//!
//! ```rust
//! use neighborsolve_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed, detail) in verify_all_vectors() {
//!     assert!(passed, "{name}: {detail}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use neighborsolve_testkit::{generators::valid_input, TestFixture};
//!
//! proptest! {
//!     #[test]
//!     fn created_issue_is_findable(input in valid_input()) {
//!         let store = TestFixture::new().open().unwrap();
//!         let issue = store.create(input).unwrap();
//!         prop_assert_eq!(store.find_by_id(issue.id.as_str()), Some(issue));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use neighborsolve_testkit::fixtures::{sample_input, TestFixture};
//! use neighborsolve_core::IssueKind;
//!
//! let fixture = TestFixture::new();
//! let store = fixture.open().unwrap();
//! let issue = store.create(sample_input(IssueKind::Pothole, "Deep pothole")).unwrap();
//! assert_eq!(fixture.open().unwrap().len(), 3);
//! # let _ = issue;
//! ```

pub mod doubles;
pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use doubles::{CountingBackend, FailingBackend, MapCall, RecordingMap};
pub use fixtures::{sample_input, TestFixture};
pub use generators::{filter_criteria, filter_from, issue_patch, valid_input, FilterCriteria};
pub use vectors::{all_vectors, decode_vector, verify_all_vectors, Expected, GoldenVector};
