//! JSON page fixtures: a declarative description of a listing or recipe
//! page that is expanded into the DOM shape the engine expects.

use rb_dom::{Document, NodeId};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub hash: String,
    /// Decimal separator announced via the `#config` element.
    #[serde(default)]
    pub decimal_separator: Option<char>,
    /// Tag toggled by the favorites link in the header.
    #[serde(default)]
    pub favorites_tag: Option<String>,
    #[serde(flatten)]
    pub kind: FixtureKind,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    Listing {
        #[serde(default)]
        recipes: Vec<RecipeCard>,
    },
    Recipe {
        #[serde(default)]
        tags: Vec<String>,
        #[serde(rename = "yield")]
        servings: u32,
        #[serde(default)]
        ingredients: Vec<Ingredient>,
    },
}

#[derive(Debug, Deserialize)]
pub struct RecipeCard {
    pub title: String,
    pub href: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Ingredient {
    /// Quantity text as rendered, e.g. `1⁄2` or `2.5`. Empty for
    /// unquantified ingredients.
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub name: String,
}

fn default_path() -> String {
    "/".to_owned()
}

impl Fixture {
    /// Expands the fixture into a document following the selector
    /// contract of the generated pages.
    pub fn build_document(&self) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let body = doc.append_element(root, "body");

        if let Some(separator) = self.decimal_separator {
            let config = doc.append_element(body, "div");
            doc.set_element_id(config, "config");
            doc.set_dataset(config, "decimalSeparator", &separator.to_string());
        }

        let header = doc.append_element(body, "header");
        let nav = doc.append_element(header, "nav");
        if let Some(tag) = &self.favorites_tag {
            let favorites = doc.append_element(nav, "a");
            doc.add_class(favorites, "favorites");
            doc.set_dataset(favorites, "tagName", tag);
        }

        let main = doc.append_element(body, "main");
        match &self.kind {
            FixtureKind::Listing { recipes } => build_listing(&mut doc, main, recipes),
            FixtureKind::Recipe {
                tags,
                servings,
                ingredients,
            } => build_recipe(&mut doc, main, tags, *servings, ingredients),
        }
        doc
    }
}

fn tag_block(doc: &mut Document, parent: NodeId, names: &[String], with_reset: bool) {
    let block = doc.append_element(parent, "div");
    doc.add_class(block, "tags");
    let ul = doc.append_element(block, "ul");
    for name in names {
        let li = doc.append_element(ul, "li");
        let badge = doc.append_element(li, "span");
        doc.add_class(badge, "tag");
        doc.append_text(badge, name);
    }
    if with_reset {
        let li = doc.append_element(ul, "li");
        let reset = doc.append_element(li, "span");
        doc.add_class(reset, "reset");
        doc.append_text(reset, "\u{d7}");
    }
}

fn build_listing(doc: &mut Document, main: NodeId, recipes: &[RecipeCard]) {
    let container = doc.append_element(main, "div");
    doc.add_class(container, "recipes");

    let mut cloud = Vec::new();
    for card in recipes {
        for tag in &card.tags {
            if !cloud.contains(tag) {
                cloud.push(tag.clone());
            }
        }
    }
    tag_block(doc, container, &cloud, true);

    let list = doc.append_element(container, "div");
    doc.add_class(list, "list");

    let count = doc.append_element(list, "p");
    doc.add_class(count, "count");
    let value = doc.append_element(count, "span");
    doc.add_class(value, "value");
    doc.append_text(value, &recipes.len().to_string());
    let word = doc.append_element(count, "span");
    doc.add_class(word, "recipes");
    doc.set_dataset(word, "singular", "recipe");
    doc.set_dataset(word, "plural", "recipes");
    doc.append_text(word, "recipes");

    let random = doc.append_element(list, "button");
    doc.add_class(random, "random");
    doc.append_text(random, "I'm feeling hungry");

    let ul = doc.append_element(list, "ul");
    for card in recipes {
        let li = doc.append_element(ul, "li");
        let anchor = doc.append_element(li, "a");
        doc.set_attr(anchor, "href", &card.href);
        doc.append_text(anchor, &card.title);
        tag_block(doc, li, &card.tags, false);
    }
}

fn build_recipe(
    doc: &mut Document,
    main: NodeId,
    tags: &[String],
    servings: u32,
    ingredients: &[Ingredient],
) {
    let recipe = doc.append_element(main, "article");
    doc.add_class(recipe, "recipe");

    tag_block(doc, recipe, tags, false);

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
    doc.append_text(decrease, "-");
    let increase = doc.append_element(value, "button");
    doc.add_class(increase, "increase");
    doc.append_text(increase, "+");
    let digits = doc.append_element(value, "span");
    doc.add_class(digits, "digits");
    doc.add_class(digits, "default");
    doc.append_text(digits, &servings.to_string());

    let block = doc.append_element(recipe, "div");
    doc.add_class(block, "ingredients");
    let ul = doc.append_element(block, "ul");
    for ingredient in ingredients {
        let li = doc.append_element(ul, "li");
        let quantity = doc.append_element(li, "span");
        doc.add_class(quantity, "quantity");
        let value = doc.append_element(quantity, "span");
        doc.add_class(value, "value");
        doc.append_text(value, &ingredient.quantity);
        let mut rest = String::new();
        if let Some(unit) = &ingredient.unit {
            rest.push(' ');
            rest.push_str(unit);
        }
        rest.push(' ');
        rest.push_str(&ingredient.name);
        doc.append_text(li, &rest);
    }
}
