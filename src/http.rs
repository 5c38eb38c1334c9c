// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Blocking JSON POST helper shared by the GitHub GraphQL and Jira REST clients
// role: transport/http
// inputs: ureq Agent, URL, Authorization header value, JSON body
// outputs: Parsed JSON response body
// side_effects: Network calls
// invariants: Non-2xx is always an error; response bodies in errors are truncated
// errors: Transport, status and decode failures surface with the URL in context (no retries)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub const USER_AGENT: &str = "pull-metrics";

pub fn agent() -> ureq::Agent {
  ureq::AgentBuilder::new().user_agent(USER_AGENT).build()
}

pub fn bearer(token: &str) -> String {
  format!("Bearer {}", token)
}

pub fn basic(user: &str, token: &str) -> String {
  format!("Basic {}", STANDARD.encode(format!("{}:{}", user, token)))
}

pub fn post_json(agent: &ureq::Agent, url: &str, authorization: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
  let resp = agent
    .post(url)
    .set("Accept", "application/json")
    .set("Content-Type", "application/json")
    .set("Authorization", authorization)
    .send_json(body);

  match resp {
    Ok(r) => r
      .into_json::<serde_json::Value>()
      .with_context(|| format!("decoding JSON response from {url}")),
    Err(ureq::Error::Status(code, r)) => {
      let text = r.into_string().unwrap_or_default();
      bail!("{url} returned HTTP {code}: {}", truncate_for_error(&text))
    }
    Err(err) => Err(err).with_context(|| format!("calling {url}")),
  }
}

pub fn truncate_for_error(body: &str) -> String {
  const MAX_LEN: usize = 200;

  if body.chars().count() <= MAX_LEN {
    body.to_owned()
  } else {
    format!("{}...", body.chars().take(MAX_LEN).collect::<String>())
  }
}
