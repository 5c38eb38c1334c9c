// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path access into serde_json::Value with typed, optional or required extraction
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (to / require)
// invariants: No panics; missing paths yield None; require names the path it failed on
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;

/// Wrapper around a JSON location to allow typed extraction via a clear second step.
pub struct JsonFetched<'a> {
  path: String,
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  /// Attempt to deserialize the fetched value as `T`.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// Deserialize as `T`; a missing path or a shape mismatch is an error.
  pub fn require<T>(&self) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let v = self.inner.ok_or_else(|| anyhow!("response is missing `{}`", self.path))?;
    serde_json::from_value::<T>(v.clone()).with_context(|| format!("decoding `{}`", self.path))
  }
}

/// Extension to fetch nested values via dotted paths like "data.user.name".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    let mut cur = self;

    if !path.is_empty() {
      for key in path.split('.') {
        match cur.get(key) {
          Some(next) if !next.is_null() => cur = next,
          _ => return JsonFetched { path: path.to_string(), inner: None },
        }
      }
    }

    JsonFetched { path: path.to_string(), inner: Some(cur) }
  }
}
