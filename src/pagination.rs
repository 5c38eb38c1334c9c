// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: One paging capability shared by the cursor-based (GitHub) and offset-based (Jira) sources
// role: pagination/drain
// inputs: A PageSource and a per-item visitor deciding whether to keep going
// outputs: Number of pages requested; items are handed to the visitor by value, once each
// invariants:
// - An empty page always ends the drain
// - A page flagged done ends the drain after its items are visited
// - Flow::Stop ends the drain immediately; no further items or pages are visited
// errors: First source error aborts the drain and propagates unchanged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;

/// One fetched page. `done` is the source's own "no more pages" signal.
#[derive(Debug)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub done: bool,
}

pub trait PageSource {
  type Item;

  fn next_page(&mut self) -> Result<Page<Self::Item>>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
  Continue,
  Stop,
}

/// Pull pages until the source is exhausted or the visitor asks to stop.
pub fn drain<S, F>(source: &mut S, mut visit: F) -> Result<usize>
where
  S: PageSource + ?Sized,
  F: FnMut(S::Item) -> Flow,
{
  let mut pages = 0usize;

  loop {
    let page = source.next_page()?;
    pages += 1;

    if page.items.is_empty() {
      break;
    }

    for item in page.items {
      if visit(item) == Flow::Stop {
        return Ok(pages);
      }
    }

    if page.done {
      break;
    }
  }

  Ok(pages)
}
