use test_support::pull_metrics;

#[test]
fn cli_generates_man_page() {
  let (_cwd, mut cmd) = pull_metrics();
  let out = cmd.args(["--gen-man"]).output().unwrap();
  assert!(out.status.success());
  let s = String::from_utf8_lossy(&out.stdout);
  // clap_mangen emits a roff manpage starting with .TH and mentions the binary name
  assert!(s.contains(".TH"));
  assert!(s.contains("pull-metrics"));
  // hidden flags stay out of the page
  assert!(!s.contains("now-override"));
}
