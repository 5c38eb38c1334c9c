// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the Jira "moved to In Progress" pipeline (API, offset paging, changelog aggregation)
// role: jira/namespace
// outputs: Public submodules api, fetch, aggregate
// invariants: Window filtering happens server-side in JQL; nothing here re-checks dates
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod aggregate;
pub mod api;
pub mod fetch;
