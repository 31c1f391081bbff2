//! End-to-end flows over complete page documents: scanning, clicking,
//! hash persistence and navigation.

use std::cell::{Cell, RefCell};

use rb_core::{
    page::{Page, PageEvent, PageKind},
    NavigationGateway,
};
use rb_dom::{Document, NodeId};

/// Fake location/history recording every navigation call. `push_state`
/// keeps `pathname`/`hash` consistent with the pushed URL.
#[derive(Debug, Default)]
struct RecordingNavigation {
    path: RefCell<String>,
    hash: RefCell<String>,
    pushes: RefCell<Vec<String>>,
    reloads: Cell<usize>,
    assigns: RefCell<Vec<String>>,
}

impl RecordingNavigation {
    fn at(path: &str, hash: &str) -> Self {
        let nav = Self::default();
        *nav.path.borrow_mut() = path.to_owned();
        *nav.hash.borrow_mut() = hash.to_owned();
        nav
    }

    fn set_hash(&self, hash: &str) {
        *self.hash.borrow_mut() = hash.to_owned();
    }
}

impl NavigationGateway for RecordingNavigation {
    fn pathname(&self) -> String {
        self.path.borrow().clone()
    }

    fn hash(&self) -> String {
        self.hash.borrow().clone()
    }

    fn push_state(&self, path: &str) {
        self.pushes.borrow_mut().push(path.to_owned());
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
        self.reloads.set(self.reloads.get() + 1);
    }

    fn assign(&self, url: &str) {
        self.assigns.borrow_mut().push(url.to_owned());
    }
}

fn tag_block(doc: &mut Document, parent: NodeId, names: &[&str]) -> Vec<NodeId> {
    let block = doc.append_element(parent, "div");
    doc.add_class(block, "tags");
    let ul = doc.append_element(block, "ul");
    names
        .iter()
        .map(|name| {
            let li = doc.append_element(ul, "li");
            let badge = doc.append_element(li, "span");
            doc.add_class(badge, "tag");
            doc.append_text(badge, name);
            badge
        })
        .collect()
}

struct ListingPage {
    doc: Document,
    favorites: NodeId,
    cloud: Vec<NodeId>,
    reset: NodeId,
    random: NodeId,
    cards: Vec<NodeId>,
    count_value: NodeId,
}

/// Builds a complete listing page: header with the favorites link, the
/// tag cloud with a reset badge, the count element, the random button and
/// one card per `(href, tags)` entry.
fn listing_page(cards: &[(&str, &[&str])]) -> ListingPage {
    let mut doc = Document::new();
    let root = doc.root();
    let body = doc.append_element(root, "body");

    let header = doc.append_element(body, "header");
    let nav = doc.append_element(header, "nav");
    let favorites = doc.append_element(nav, "a");
    doc.add_class(favorites, "favorites");
    doc.set_dataset(favorites, "tagName", "favorite");

    let main = doc.append_element(body, "main");
    let recipes = doc.append_element(main, "div");
    doc.add_class(recipes, "recipes");

    let cloud_names: Vec<&str> = {
        let mut names = Vec::new();
        for (_, tags) in cards {
            for name in *tags {
                if !names.contains(name) {
                    names.push(*name);
                }
            }
        }
        names
    };
    let cloud = tag_block(&mut doc, recipes, &cloud_names);
    let cloud_ul = doc.parent(doc.parent(cloud[0]).unwrap()).unwrap();
    let reset_li = doc.append_element(cloud_ul, "li");
    let reset = doc.append_element(reset_li, "span");
    doc.add_class(reset, "reset");

    let list = doc.append_element(recipes, "div");
    doc.add_class(list, "list");
    let count = doc.append_element(list, "p");
    doc.add_class(count, "count");
    let count_value = doc.append_element(count, "span");
    doc.add_class(count_value, "value");
    let count_word = doc.append_element(count, "span");
    doc.add_class(count_word, "recipes");
    doc.set_dataset(count_word, "singular", "recipe");
    doc.set_dataset(count_word, "plural", "recipes");
    let random = doc.append_element(list, "button");
    doc.add_class(random, "random");

    let ul = doc.append_element(list, "ul");
    let card_nodes = cards
        .iter()
        .map(|(href, tags)| {
            let li = doc.append_element(ul, "li");
            let anchor = doc.append_element(li, "a");
            doc.set_attr(anchor, "href", href);
            tag_block(&mut doc, li, tags);
            li
        })
        .collect();

    ListingPage {
        doc,
        favorites,
        cloud,
        reset,
        random,
        cards: card_nodes,
        count_value,
    }
}

struct RecipePage {
    doc: Document,
    badges: Vec<NodeId>,
    digits: NodeId,
    increase: NodeId,
    quantity_values: Vec<NodeId>,
    collapse_trigger: NodeId,
    instructions: NodeId,
}

fn recipe_page(tags: &[&str], default_yield: &str, quantities: &[&str]) -> RecipePage {
    let mut doc = Document::new();
    let root = doc.root();
    let body = doc.append_element(root, "body");
    let main = doc.append_element(body, "main");
    let recipe = doc.append_element(main, "article");
    doc.add_class(recipe, "recipe");

    let badges = tag_block(&mut doc, recipe, tags);

    let metadata = doc.append_element(recipe, "div");
    doc.add_class(metadata, "metadata");
    let yields = doc.append_element(metadata, "div");
    doc.add_class(yields, "yield");
    let content = doc.append_element(yields, "div");
    doc.add_class(content, "content");
    let value = doc.append_element(content, "div");
    doc.add_class(value, "value");
    let decrease = doc.append_element(value, "button");
    doc.add_class(decrease, "decrease");
    let increase = doc.append_element(value, "button");
    doc.add_class(increase, "increase");
    let digits = doc.append_element(value, "span");
    doc.add_class(digits, "digits");
    doc.append_text(digits, default_yield);

    let ingredients = doc.append_element(recipe, "div");
    doc.add_class(ingredients, "ingredients");
    let quantity_values = quantities
        .iter()
        .map(|text| {
            let li = doc.append_element(ingredients, "li");
            let quantity = doc.append_element(li, "span");
            doc.add_class(quantity, "quantity");
            let value = doc.append_element(quantity, "span");
            doc.add_class(value, "value");
            doc.append_text(value, text);
            value
        })
        .collect();

    let collapse_trigger = doc.append_element(recipe, "button");
    doc.add_class(collapse_trigger, "collapse-trigger");
    doc.set_dataset(collapse_trigger, "collapseSelector", "#instructions");
    doc.append_text(collapse_trigger, "\u{2212}");
    let instructions = doc.append_element(recipe, "div");
    doc.set_element_id(instructions, "instructions");

    RecipePage {
        doc,
        badges,
        digits,
        increase,
        quantity_values,
        collapse_trigger,
        instructions,
    }
}

#[test]
fn listing_toggle_filters_in_place_without_reloading() {
    let mut listing = listing_page(&[
        ("pasta/", &["vegetarian", "quick"]),
        ("stew/", &["hearty"]),
    ]);
    let nav = RecordingNavigation::at("/recipes/", "");
    let mut page = Page::initialize(&mut listing.doc, &nav).unwrap();
    assert_eq!(page.kind(), PageKind::Listing);

    page.dispatch(&mut listing.doc, &nav, PageEvent::Click(listing.cloud[0]))
        .unwrap();
    assert_eq!(nav.hash(), "tags=vegetarian");
    assert_eq!(nav.pushes.borrow().as_slice(), ["/recipes/#tags=vegetarian"]);
    assert_eq!(nav.reloads.get(), 0);
    assert!(!listing.doc.has_class(listing.cards[0], "hidden"));
    assert!(listing.doc.has_class(listing.cards[1], "hidden"));
    assert_eq!(listing.doc.text_content(listing.count_value), "1");

    page.dispatch(&mut listing.doc, &nav, PageEvent::Click(listing.cloud[0]))
        .unwrap();
    assert_eq!(nav.hash(), "");
    assert_eq!(nav.pushes.borrow().last().map(String::as_str), Some("/recipes/"));
    assert!(!listing.doc.has_class(listing.cards[1], "hidden"));
}

#[test]
fn unrelated_hash_keys_survive_toggling() {
    let mut listing = listing_page(&[("pasta/", &["quick"])]);
    let nav = RecordingNavigation::at("/recipes/", "view=grid");
    let mut page = Page::initialize(&mut listing.doc, &nav).unwrap();

    page.click(&mut listing.doc, &nav, listing.cloud[0]).unwrap();
    assert_eq!(nav.hash(), "view=grid&tags=quick");

    page.click(&mut listing.doc, &nav, listing.reset).unwrap();
    assert_eq!(nav.hash(), "view=grid");
}

#[test]
fn initialize_applies_the_hash_from_the_url() {
    let mut listing = listing_page(&[("pasta/", &["quick"]), ("stew/", &["hearty"])]);
    let nav = RecordingNavigation::at("/recipes/", "tags=hearty");
    Page::initialize(&mut listing.doc, &nav).unwrap();

    assert!(listing.doc.has_class(listing.cards[0], "hidden"));
    assert!(!listing.doc.has_class(listing.cards[1], "hidden"));
    // the cloud badge for the active tag is highlighted
    let hearty = listing.cloud[1];
    assert!(listing.doc.has_class(hearty, "active"));
}

#[test]
fn hash_change_event_rederives_the_filter() {
    let mut listing = listing_page(&[("pasta/", &["quick"]), ("stew/", &["hearty"])]);
    let nav = RecordingNavigation::at("/recipes/", "");
    let mut page = Page::initialize(&mut listing.doc, &nav).unwrap();

    nav.set_hash("tags=quick");
    page.dispatch(&mut listing.doc, &nav, PageEvent::HashChanged)
        .unwrap();
    assert!(listing.doc.has_class(listing.cards[1], "hidden"));

    nav.set_hash("");
    page.dispatch(&mut listing.doc, &nav, PageEvent::HashChanged)
        .unwrap();
    assert!(!listing.doc.has_class(listing.cards[1], "hidden"));
}

#[test]
fn favorites_link_toggles_its_configured_tag() {
    let mut listing = listing_page(&[
        ("pasta/", &["favorite", "quick"]),
        ("stew/", &["hearty"]),
    ]);
    let nav = RecordingNavigation::at("/recipes/", "");
    let mut page = Page::initialize(&mut listing.doc, &nav).unwrap();

    page.click(&mut listing.doc, &nav, listing.favorites).unwrap();
    assert_eq!(nav.hash(), "tags=favorite");
    assert!(listing.doc.has_class(listing.favorites, "active"));
    assert!(listing.doc.has_class(listing.cards[1], "hidden"));
}

#[test]
fn random_click_opens_a_matching_recipe() {
    let mut listing = listing_page(&[("pasta/", &["quick"]), ("stew/", &["hearty"])]);
    let nav = RecordingNavigation::at("/recipes/", "tags=quick");
    let mut page = Page::initialize(&mut listing.doc, &nav).unwrap();

    // only one card matches, so the pick is deterministic
    page.click(&mut listing.doc, &nav, listing.random).unwrap();
    assert_eq!(nav.assigns.borrow().as_slice(), ["/recipes/pasta/"]);
}

#[test]
fn random_click_with_no_matches_is_inert() {
    let mut listing = listing_page(&[("pasta/", &["quick"])]);
    let nav = RecordingNavigation::at("/recipes/", "");
    let mut page = Page::initialize(&mut listing.doc, &nav).unwrap();

    page.tags_mut().toggle(&"quick".into());
    page.tags_mut().toggle(&"favorite".into());
    page.tags_mut().refresh(&mut listing.doc).unwrap();
    page.click(&mut listing.doc, &nav, listing.random).unwrap();
    assert!(nav.assigns.borrow().is_empty());
}

#[test]
fn recipe_page_toggle_navigates_to_the_listing_and_reloads() {
    let mut recipe = recipe_page(&["vegetarian"], "2", &["1\u{2044}2"]);
    let nav = RecordingNavigation::at("/recipes/pasta/", "");
    let mut page = Page::initialize(&mut recipe.doc, &nav).unwrap();
    assert_eq!(page.kind(), PageKind::Recipe);

    page.click(&mut recipe.doc, &nav, recipe.badges[0]).unwrap();
    assert_eq!(
        nav.pushes.borrow().as_slice(),
        ["/recipes/#tags=vegetarian"]
    );
    assert_eq!(nav.reloads.get(), 1);
}

#[test]
fn yield_buttons_scale_and_reset_the_quantities() {
    let mut recipe = recipe_page(&[], "2", &["1\u{2044}2"]);
    let nav = RecordingNavigation::at("/recipes/pasta/", "");
    let mut page = Page::initialize(&mut recipe.doc, &nav).unwrap();

    page.click(&mut recipe.doc, &nav, recipe.increase).unwrap();
    assert_eq!(recipe.doc.text_content(recipe.digits), "3");
    assert_eq!(
        recipe.doc.text_content(recipe.quantity_values[0]),
        "3\u{2044}4"
    );

    page.click(&mut recipe.doc, &nav, recipe.digits).unwrap();
    assert_eq!(recipe.doc.text_content(recipe.digits), "2");
    assert_eq!(
        recipe.doc.text_content(recipe.quantity_values[0]),
        "1\u{2044}2"
    );
    assert!(recipe.doc.has_class(recipe.digits, "default"));
}

#[test]
fn collapse_trigger_folds_its_target() {
    let mut recipe = recipe_page(&[], "2", &[]);
    let nav = RecordingNavigation::at("/recipes/pasta/", "");
    let mut page = Page::initialize(&mut recipe.doc, &nav).unwrap();

    page.click(&mut recipe.doc, &nav, recipe.collapse_trigger)
        .unwrap();
    assert!(recipe.doc.has_class(recipe.instructions, "collapsed"));
    assert_eq!(recipe.doc.text_content(recipe.collapse_trigger), "+");

    page.click(&mut recipe.doc, &nav, recipe.collapse_trigger)
        .unwrap();
    assert!(!recipe.doc.has_class(recipe.instructions, "collapsed"));
}
