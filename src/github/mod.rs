// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the GitHub pull request pipeline (API, windowed fetch, aggregation)
// role: github/namespace
// outputs: Public submodules api, fetch, aggregate
// invariants: The pipeline is sequential; one page is in flight at a time
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod aggregate;
pub mod api;
pub mod fetch;
