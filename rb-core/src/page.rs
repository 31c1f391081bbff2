//! Page wiring: scanning a document into owned state objects and routing
//! events to them through an explicit dispatch table, instead of the
//! original's ad-hoc listener closures.

use rb_dom::{Document, NodeId};
use rb_entities::tag::TagName;

use crate::{
    hash, ingredients::IngredientManager, selectors, tags::TagManager, Error, NavigationGateway,
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// The recipe listing with the tag cloud.
    Listing,
    /// A single recipe with ingredients and yield controls.
    Recipe,
    /// Any other page carrying the shared header.
    Other,
}

/// Host-page configuration, read from the `#config` element's dataset.
#[derive(Debug, Clone)]
pub struct Config {
    pub decimal_separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
        }
    }
}

impl Config {
    fn scan(doc: &Document) -> Result<Self> {
        let mut config = Self::default();
        match doc.select(selectors::CONFIG)? {
            Some(element) => {
                if let Some(separator) = doc
                    .dataset(element, selectors::DATA_DECIMAL_SEPARATOR)
                    .and_then(|value| value.chars().next())
                {
                    config.decimal_separator = separator;
                }
            }
            None => log::debug!("no config element, using defaults"),
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClickAction {
    ToggleTag(TagName),
    ResetTags,
    RandomRecipe,
    IncreaseYield,
    DecreaseYield,
    ResetYield,
    ToggleCollapse,
}

/// An input event delivered by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Click(NodeId),
    HashChanged,
}

/// All interactive state of one page.
#[derive(Debug)]
pub struct Page {
    kind: PageKind,
    config: Config,
    tags: TagManager,
    ingredients: Option<IngredientManager>,
    click_handlers: Vec<(NodeId, ClickAction)>,
}

impl Page {
    /// Scans the document and derives the initial state from the current
    /// URL hash, the way the original script runs on `DOMContentLoaded`.
    pub fn initialize(doc: &mut Document, nav: &dyn NavigationGateway) -> Result<Self> {
        let mut page = Self::scan(doc)?;
        page.tags.apply_hash(doc, &nav.hash())?;
        if let Some(ingredients) = &mut page.ingredients {
            ingredients.reset(doc);
        }
        Ok(page)
    }

    /// Registers every interactive element reachable from the document
    /// root. Optional page parts (favorites link, random button, config)
    /// are skipped when absent; the yield block of a recipe page is
    /// mandatory.
    pub fn scan(doc: &Document) -> Result<Self> {
        let kind = if doc.select(selectors::RECIPE_PAGE)?.is_some() {
            PageKind::Recipe
        } else if doc.select(selectors::RECIPES_PAGE)?.is_some() {
            PageKind::Listing
        } else {
            PageKind::Other
        };
        let config = Config::scan(doc)?;

        let mut tags = TagManager::default();
        let mut click_handlers = Vec::new();
        for badge in doc.select_all(selectors::TAG)? {
            let name = TagName::from(doc.text_content(badge));
            tags.add_tag_element(name.clone(), badge);
            click_handlers.push((badge, ClickAction::ToggleTag(name)));
        }
        match doc.select(selectors::FAVORITES)? {
            Some(favorites) => match doc.dataset(favorites, selectors::DATA_TAG_NAME) {
                Some(name) => {
                    let name = TagName::from(name);
                    tags.add_tag_element(name.clone(), favorites);
                    click_handlers.push((favorites, ClickAction::ToggleTag(name)));
                }
                None => log::debug!("favorites link without a tag name"),
            },
            None => log::debug!("no favorites link on this page"),
        }
        for card in doc.select_all(selectors::RECIPE)? {
            tags.add_tagged_element(doc, card)?;
        }
        for reset in doc.select_all(selectors::TAG_RESET)? {
            click_handlers.push((reset, ClickAction::ResetTags));
        }
        if kind == PageKind::Listing {
            if let Some(random) = doc.select(selectors::RANDOM)? {
                click_handlers.push((random, ClickAction::RandomRecipe));
            }
        }
        for trigger in doc.select_all(selectors::COLLAPSE_TRIGGER)? {
            click_handlers.push((trigger, ClickAction::ToggleCollapse));
        }

        let ingredients = if kind == PageKind::Recipe {
            let yield_block = doc
                .select(selectors::YIELD)?
                .ok_or(Error::MissingElement(selectors::YIELD))?;
            let decrease = doc
                .select_within(yield_block, selectors::YIELD_DECREASE)?
                .ok_or(Error::MissingElement(selectors::YIELD_DECREASE))?;
            let increase = doc
                .select_within(yield_block, selectors::YIELD_INCREASE)?
                .ok_or(Error::MissingElement(selectors::YIELD_INCREASE))?;
            let digits = doc
                .select_within(yield_block, selectors::YIELD_DIGITS)?
                .ok_or(Error::MissingElement(selectors::YIELD_DIGITS))?;
            click_handlers.push((decrease, ClickAction::DecreaseYield));
            click_handlers.push((increase, ClickAction::IncreaseYield));
            click_handlers.push((digits, ClickAction::ResetYield));
            Some(IngredientManager::scan(doc, config.decimal_separator)?)
        } else {
            None
        };

        Ok(Self {
            kind,
            config,
            tags,
            ingredients,
            click_handlers,
        })
    }

    pub const fn kind(&self) -> PageKind {
        self.kind
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn tags(&self) -> &TagManager {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagManager {
        &mut self.tags
    }

    pub const fn ingredients(&self) -> Option<&IngredientManager> {
        self.ingredients.as_ref()
    }

    pub fn ingredients_mut(&mut self) -> Option<&mut IngredientManager> {
        self.ingredients.as_mut()
    }

    pub fn dispatch(
        &mut self,
        doc: &mut Document,
        nav: &dyn NavigationGateway,
        event: PageEvent,
    ) -> Result<()> {
        match event {
            PageEvent::Click(target) => self.click(doc, nav, target),
            PageEvent::HashChanged => self.hash_changed(doc, nav),
        }
    }

    /// Routes a click on `target` through the dispatch table. Clicks on
    /// elements without a handler are ignored.
    pub fn click(
        &mut self,
        doc: &mut Document,
        nav: &dyn NavigationGateway,
        target: NodeId,
    ) -> Result<()> {
        let action = self
            .click_handlers
            .iter()
            .find(|(element, _)| *element == target)
            .map(|(_, action)| action.clone());
        let Some(action) = action else {
            log::debug!("click on an element without a handler");
            return Ok(());
        };
        match action {
            ClickAction::ToggleTag(name) => self.toggle_tag(doc, nav, &name),
            ClickAction::ResetTags => self.reset_tags(doc, nav),
            ClickAction::RandomRecipe => {
                self.open_random_recipe(doc, nav, &mut rand::thread_rng())
            }
            ClickAction::IncreaseYield => {
                if let Some(ingredients) = &mut self.ingredients {
                    ingredients.increase(doc);
                }
                Ok(())
            }
            ClickAction::DecreaseYield => {
                if let Some(ingredients) = &mut self.ingredients {
                    ingredients.decrease(doc);
                }
                Ok(())
            }
            ClickAction::ResetYield => {
                if let Some(ingredients) = &mut self.ingredients {
                    ingredients.reset(doc);
                }
                Ok(())
            }
            ClickAction::ToggleCollapse => {
                toggle_collapse(doc, target);
                Ok(())
            }
        }
    }

    /// Flips one tag and persists the new filter into the URL.
    pub fn toggle_tag(
        &mut self,
        doc: &mut Document,
        nav: &dyn NavigationGateway,
        name: &TagName,
    ) -> Result<()> {
        self.tags.toggle(name);
        self.persist_tags(doc, nav)
    }

    /// Deactivates every tag and persists the empty filter.
    pub fn reset_tags(&mut self, doc: &mut Document, nav: &dyn NavigationGateway) -> Result<()> {
        self.tags.deactivate_all();
        self.persist_tags(doc, nav)
    }

    /// Re-derives tag state from the current hash, e.g. after the user
    /// navigated through history.
    pub fn hash_changed(&mut self, doc: &mut Document, nav: &dyn NavigationGateway) -> Result<()> {
        self.tags.apply_hash(doc, &nav.hash())?;
        Ok(())
    }

    /// Persists the active tag set into the URL. On a recipe page the tag
    /// list lives on the parent listing, so navigation goes there and the
    /// page is reloaded; on any other page the state is re-derived in
    /// place.
    fn persist_tags(&mut self, doc: &mut Document, nav: &dyn NavigationGateway) -> Result<()> {
        let mut params = hash::parse_params(&nav.hash());
        self.tags.write_hash_params(&mut params);
        let fragment = hash::serialize_params(&params);

        let is_recipe_page = self.kind == PageKind::Recipe;
        let mut path = nav.pathname();
        if is_recipe_page {
            path = parent_listing_path(&path);
        }
        if !fragment.is_empty() {
            path.push('#');
            path.push_str(&fragment);
        }
        nav.push_state(&path);

        if is_recipe_page {
            nav.reload();
            Ok(())
        } else {
            self.tags.apply_hash(doc, &nav.hash())?;
            Ok(())
        }
    }

    /// Navigates to a uniformly random recipe among the currently visible
    /// ones. An empty selection or a card without an anchor is inert.
    pub fn open_random_recipe<R: rand::Rng + ?Sized>(
        &self,
        doc: &Document,
        nav: &dyn NavigationGateway,
        rng: &mut R,
    ) -> Result<()> {
        let Some(card) = self.tags.random(rng) else {
            log::debug!("no recipe matches the active filters");
            return Ok(());
        };
        let Some(anchor) = doc.select_within(card, selectors::ANCHOR)? else {
            log::warn!("recipe card without an anchor");
            return Ok(());
        };
        let Some(href) = doc.attr(anchor, "href").map(str::to_owned) else {
            log::warn!("recipe anchor without an href");
            return Ok(());
        };
        nav.assign(&format!("{}{href}", nav.pathname()));
        Ok(())
    }
}

fn toggle_collapse(doc: &mut Document, trigger: NodeId) {
    let collapsed = doc.toggle_class(trigger, selectors::CLASS_COLLAPSED);
    doc.set_text_content(trigger, if collapsed { "+" } else { "\u{2212}" });
    let Some(target_selector) = doc
        .dataset(trigger, selectors::DATA_COLLAPSE_SELECTOR)
        .map(str::to_owned)
    else {
        log::debug!("collapse trigger without a target selector");
        return;
    };
    match doc.select(&target_selector) {
        Ok(Some(target)) => doc.set_class(target, selectors::CLASS_COLLAPSED, collapsed),
        Ok(None) => log::debug!("collapse target {target_selector:?} not found"),
        Err(err) => log::warn!("invalid collapse selector {target_selector:?}: {err}"),
    }
}

/// Trims the last two `/`-delimited segments, turning a recipe path like
/// `/recipes/pasta/index.html` into its parent listing `/recipes/`.
fn parent_listing_path(path: &str) -> String {
    let Some(last) = path.rfind('/') else {
        return path.to_owned();
    };
    match path[..last].rfind('/') {
        Some(index) => path[..=index].to_owned(),
        None => path.to_owned(),
    }
}
