//! Command-line harness: loads a JSON page fixture, drives the
//! interactive engine against it and reports the resulting page state.

mod fixture;

use std::{cell::RefCell, fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use rb_core::{
    page::{Page, PageKind},
    selectors, NavigationGateway,
};
use rb_dom::Document;
use rb_entities::tag::TagName;

use crate::fixture::Fixture;

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Drives the recipe site's interactive engine over a JSON page fixture"
)]
struct Cli {
    /// JSON page fixture to load
    fixture: PathBuf,
    /// Activate these tags after loading
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    tags: Vec<String>,
    /// Clear the tag filter
    #[arg(long)]
    reset_tags: bool,
    /// Adjust the serving yield to this value (recipe pages)
    #[arg(long = "yield", value_name = "N")]
    servings: Option<u32>,
    /// Open a random recipe among the visible ones
    #[arg(long)]
    random: bool,
    /// Seed for --random; unseeded picks differ between runs
    #[arg(long, value_name = "SEED", requires = "random")]
    seed: Option<u64>,
}

/// Location/history stand-in. Navigation side effects are logged; the
/// current URL is kept consistent with every `push_state` and `assign`.
#[derive(Debug)]
struct CliNavigation {
    path: RefCell<String>,
    hash: RefCell<String>,
}

impl CliNavigation {
    fn new(path: &str, hash: &str) -> Self {
        Self {
            path: RefCell::new(path.to_owned()),
            hash: RefCell::new(hash.to_owned()),
        }
    }
}

impl NavigationGateway for CliNavigation {
    fn pathname(&self) -> String {
        self.path.borrow().clone()
    }

    fn hash(&self) -> String {
        self.hash.borrow().clone()
    }

    fn push_state(&self, path: &str) {
        log::info!("pushState {path}");
        match path.split_once('#') {
            Some((path, hash)) => {
                *self.path.borrow_mut() = path.to_owned();
                *self.hash.borrow_mut() = hash.to_owned();
            }
            None => {
                *self.path.borrow_mut() = path.to_owned();
                self.hash.borrow_mut().clear();
            }
        }
    }

    fn reload(&self) {
        log::info!("reload {}", self.path.borrow());
    }

    fn assign(&self, url: &str) {
        log::info!("navigate to {url}");
        *self.path.borrow_mut() = url.to_owned();
        self.hash.borrow_mut().clear();
    }
}

fn main() -> Result<()> {
    env_logger::init();
    run(&Cli::parse())
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.fixture)
        .with_context(|| format!("cannot read fixture {}", cli.fixture.display()))?;
    let fixture: Fixture = serde_json::from_str(&text)
        .with_context(|| format!("invalid fixture {}", cli.fixture.display()))?;

    let mut doc = fixture.build_document();
    let nav = CliNavigation::new(&fixture.path, &fixture.hash);
    let mut page = Page::initialize(&mut doc, &nav)?;

    for name in &cli.tags {
        page.toggle_tag(&mut doc, &nav, &TagName::from(name.as_str()))?;
    }
    if cli.reset_tags {
        page.reset_tags(&mut doc, &nav)?;
    }

    if let Some(target) = cli.servings {
        if page.ingredients().is_some() {
            adjust_servings(&mut page, &mut doc, target);
        } else {
            log::warn!("--servings has no effect on this page");
        }
    }

    if cli.random {
        match cli.seed {
            Some(seed) => {
                page.open_random_recipe(&doc, &nav, &mut StdRng::seed_from_u64(seed))?;
            }
            None => page.open_random_recipe(&doc, &nav, &mut rand::thread_rng())?,
        }
    }

    report(&page, &doc, &nav)
}

fn adjust_servings(page: &mut Page, doc: &mut Document, target: u32) {
    let target = target.max(1);
    while let Some(ingredients) = page.ingredients_mut() {
        let current = ingredients.yields().current();
        if current < target {
            ingredients.increase(doc);
        } else if current > target {
            ingredients.decrease(doc);
        } else {
            break;
        }
    }
}

fn report(page: &Page, doc: &Document, nav: &CliNavigation) -> Result<()> {
    let hash = nav.hash();
    if hash.is_empty() {
        println!("url: {}", nav.pathname());
    } else {
        println!("url: {}#{hash}", nav.pathname());
    }

    let active = page.tags().active_names();
    if !active.is_empty() {
        let names: Vec<&str> = active.iter().map(|name| name.as_str()).collect();
        println!("active tags: {}", names.join(", "));
    }

    match page.kind() {
        PageKind::Recipe => {
            if let Some(ingredients) = page.ingredients() {
                println!("servings: {}", ingredients.yields().current());
            }
            println!("ingredients:");
            for li in doc.select_all("main > .recipe > .ingredients li")? {
                println!("  {}", doc.text_content(li).trim());
            }
        }
        PageKind::Listing | PageKind::Other => {
            let mut titles = Vec::new();
            for tagged in page.tags().tagged() {
                if doc.has_class(tagged.element(), selectors::CLASS_HIDDEN) {
                    continue;
                }
                if let Some(anchor) = doc.select_within(tagged.element(), selectors::ANCHOR)? {
                    titles.push(doc.text_content(anchor));
                }
            }
            println!("visible recipes: {}", titles.len());
            for title in &titles {
                println!("  {title}");
            }
        }
    }
    Ok(())
}
