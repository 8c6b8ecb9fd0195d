//! MARQUEE demo shell
//!
//! Loads a page description, runs the ready-time pass, drives a short
//! scripted interaction session and prints a state snapshot after each
//! phase. Pass a path to a page JSON to run against your own page.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};

use marquee_core::{init_logging, Config, Document, Event, EventKind, Page};

const SAMPLE_PAGE: &str = include_str!("../sample_page.json");

fn main() -> Result<()> {
    init_logging();

    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading page description {path}"))?,
        None => SAMPLE_PAGE.to_string(),
    };

    let doc = Document::from_json(&json).context("parsing page description")?;
    let page = Page::new(Config::default(), doc);

    let root = page.with_document(|d| d.root());
    page.dispatch(Event::ready(root))?;
    print_snapshot(&page, "ready")?;

    // Walk every tab group through each of its triggers
    let groups = page.snapshot()?.groups;
    for (gi, group) in groups.iter().enumerate() {
        for bi in 0..group.buttons {
            page.activate_tab(gi, bi)?;
        }
    }
    print_snapshot(&page, "tabs-cycled")?;

    // One press and one hover, the way a reader would
    let card = page.with_document(|d| {
        d.descendants_with_class(d.root(), "action-card")
            .first()
            .copied()
    });
    if let Some(card) = card {
        page.dispatch(Event::click(card, 200.0, 580.0))?;
    }
    let nav = page.with_document(|d| {
        d.descendants_with_class(d.root(), "nav-button")
            .first()
            .copied()
    });
    if let Some(nav) = nav {
        page.dispatch(Event::new(nav, EventKind::MouseEnter))?;
    }
    print_snapshot(&page, "interacted")?;

    // Let every timed effect run out
    page.advance(Utc::now() + Duration::seconds(5));
    print_snapshot(&page, "settled")?;

    Ok(())
}

fn print_snapshot(page: &Page, label: &str) -> Result<()> {
    let snapshot = page.snapshot()?;
    println!("{} {}", label, serde_json::to_string(&snapshot)?);
    Ok(())
}
