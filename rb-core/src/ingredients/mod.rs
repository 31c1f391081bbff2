//! Ingredient scaling: the serving-yield counter and the displayed
//! quantities it rescales.

use rb_dom::{Document, NodeId};
use rb_entities::{quantity::Quantity, yields::Yield};

use crate::{selectors, Error, Result};

/// Owns a recipe's yield counter and every registered quantity element.
#[derive(Debug)]
pub struct IngredientManager {
    digits: NodeId,
    yields: Yield,
    decimal_separator: char,
    quantities: Vec<(NodeId, Quantity)>,
}

impl IngredientManager {
    /// Scans the yield digits and all ingredient quantities of a recipe
    /// page. Quantity elements with blank text are skipped; unparsable
    /// ones are logged and skipped.
    pub fn scan(doc: &Document, decimal_separator: char) -> Result<Self> {
        let yield_block = doc
            .select(selectors::YIELD)?
            .ok_or(Error::MissingElement(selectors::YIELD))?;
        let digits = doc
            .select_within(yield_block, selectors::YIELD_DIGITS)?
            .ok_or(Error::MissingElement(selectors::YIELD_DIGITS))?;
        let default_yield: u32 = doc
            .text_content(digits)
            .trim()
            .parse()
            .map_err(|_| Error::Yield)?;
        if default_yield == 0 {
            return Err(Error::Yield);
        }

        let mut quantities = Vec::new();
        for element in doc.select_all(selectors::INGREDIENT_QUANTITY)? {
            let text = doc.text_content(element);
            if text.trim().is_empty() {
                continue;
            }
            match Quantity::parse(&text, decimal_separator) {
                Ok(quantity) => quantities.push((element, quantity)),
                Err(err) => log::warn!("skipping unparsable quantity {text:?}: {err}"),
            }
        }

        Ok(Self {
            digits,
            yields: Yield::new(default_yield),
            decimal_separator,
            quantities,
        })
    }

    pub const fn yields(&self) -> Yield {
        self.yields
    }

    pub fn increase(&mut self, doc: &mut Document) {
        if self.yields.increase() {
            self.refresh(doc);
        }
    }

    pub fn decrease(&mut self, doc: &mut Document) {
        if self.yields.decrease() {
            self.refresh(doc);
        }
    }

    pub fn reset(&mut self, doc: &mut Document) {
        self.yields.reset();
        self.refresh(doc);
    }

    /// Rewrites the yield digits and every quantity. At the default yield
    /// the quantities are reset instead of scaled so the original text is
    /// restored exactly.
    pub fn refresh(&mut self, doc: &mut Document) {
        let is_default = self.yields.is_default();
        doc.set_text_content(self.digits, &self.yields.current().to_string());
        doc.set_class(self.digits, selectors::CLASS_DEFAULT, is_default);
        let factor = self.yields.scale_factor();
        for (element, quantity) in &mut self.quantities {
            if is_default {
                quantity.reset();
            } else {
                quantity.scale(factor);
            }
            doc.set_text_content(*element, &quantity.display(self.decimal_separator));
        }
    }
}
