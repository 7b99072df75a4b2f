//! Golden snapshot vectors.
//!
//! Each vector is a stored snapshot exactly as an earlier browser build of
//! NeighborSolve wrote it, together with what decoding must produce. They
//! pin the camelCase field names, the `type` key, bare `YYYY-MM-DD` dates,
//! and the fields older builds left out or wrote empty.

use neighborsolve_core::{decode_snapshot, SnapshotError};

/// Expected decoding outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Decodes to this many issues.
    Issues(usize),
    /// Rejected as unparseable.
    Malformed,
    /// Rejected because two records share an id.
    DuplicateId,
}

/// A golden snapshot vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Raw snapshot JSON.
    pub json: &'static str,
    pub expected: Expected,
}

/// Get all golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty collection",
            json: "[]",
            expected: Expected::Issues(0),
        },
        GoldenVector {
            name: "demo seed",
            json: r#"[
                {"id":"NS-2024-001","type":"pothole","description":"Large pothole on Main Street causing damage to vehicles",
                 "location":{"lat":40.7128,"lng":-74.006,"address":"Main Street & 1st Ave"},
                 "status":"progress","urgency":"high",
                 "reporter":{"name":"John Doe","email":"john@example.com"},
                 "dateReported":"2024-11-25","upvotes":15,"department":"roads"},
                {"id":"NS-2024-002","type":"streetlight","description":"Streetlight out at park entrance, safety concern",
                 "location":{"lat":40.758,"lng":-73.9855,"address":"Central Park Entrance"},
                 "status":"resolved","urgency":"medium",
                 "reporter":{"name":"Jane Smith","email":"jane@example.com"},
                 "dateReported":"2024-11-20","upvotes":8,"department":"utilities"}
            ]"#,
            expected: Expected::Issues(2),
        },
        GoldenVector {
            name: "fresh report with empty phone and null department",
            json: r#"[
                {"id":"NS-2025-4821","type":"water","description":"Hydrant leaking",
                 "location":{"lat":40.73,"lng":-73.99,"address":"Location not specified"},
                 "status":"reported","urgency":"emergency",
                 "reporter":{"name":"Sam","email":"sam@example.org","phone":""},
                 "dateReported":"2025-03-09","upvotes":0,"department":null}
            ]"#,
            expected: Expected::Issues(1),
        },
        GoldenVector {
            name: "unknown issue type",
            json: r#"[
                {"id":"NS-2025-017","type":"graffiti-free-text","description":"x",
                 "location":{"lat":0,"lng":0,"address":"a"},
                 "status":"reported","urgency":"low",
                 "reporter":{"name":"a","email":"a@b"},
                 "dateReported":"2025-01-01","upvotes":0}
            ]"#,
            expected: Expected::Malformed,
        },
        GoldenVector {
            name: "operator update fields",
            json: r#"[
                {"id":"NS-2025-017","type":"traffic","description":"Signal stuck on red",
                 "location":{"lat":40.7,"lng":-74.0,"address":"Canal St"},
                 "status":"progress","urgency":"high",
                 "reporter":{"name":"Kim","email":"kim@example.net","phone":"555-0101"},
                 "dateReported":"2025-01-02","upvotes":4,
                 "notes":"Crew dispatched","estimatedCompletion":"2025-01-10",
                 "lastUpdated":"2025-01-03"}
            ]"#,
            expected: Expected::Issues(1),
        },
        GoldenVector {
            name: "unknown status",
            json: r#"[
                {"id":"NS-2025-001","type":"noise","description":"Loud bar",
                 "location":{"lat":1,"lng":1,"address":"b"},
                 "status":"closed","urgency":"low",
                 "reporter":{"name":"a","email":"a@b"},
                 "dateReported":"2025-01-01","upvotes":0,"department":null}
            ]"#,
            expected: Expected::Malformed,
        },
        GoldenVector {
            name: "duplicate ids",
            json: r#"[
                {"id":"NS-2025-001","type":"noise","description":"one",
                 "location":{"lat":1,"lng":1,"address":"b"},
                 "status":"reported","urgency":"low",
                 "reporter":{"name":"a","email":"a@b"},
                 "dateReported":"2025-01-01","upvotes":0,"department":null},
                {"id":"NS-2025-001","type":"noise","description":"two",
                 "location":{"lat":1,"lng":1,"address":"b"},
                 "status":"reported","urgency":"low",
                 "reporter":{"name":"a","email":"a@b"},
                 "dateReported":"2025-01-01","upvotes":0,"department":null}
            ]"#,
            expected: Expected::DuplicateId,
        },
        GoldenVector {
            name: "object instead of array",
            json: r#"{"issues":[]}"#,
            expected: Expected::Malformed,
        },
    ]
}

/// Decode a vector and classify the outcome.
pub fn decode_vector(vector: &GoldenVector) -> Expected {
    match decode_snapshot(vector.json.as_bytes()) {
        Ok(issues) => Expected::Issues(issues.len()),
        Err(SnapshotError::DuplicateId(_)) => Expected::DuplicateId,
        Err(_) => Expected::Malformed,
    }
}

/// Check every vector: (name, passed, detail).
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|vector| {
            let actual = decode_vector(vector);
            (
                vector.name.to_string(),
                actual == vector.expected,
                format!("expected {:?}, got {:?}", vector.expected, actual),
            )
        })
        .collect()
}
