//! The DOM contract between the generated pages and this engine: the
//! selector shapes, class names and dataset keys the host pages must carry.

pub const FAVORITES: &str = "body > header > nav > .favorites";
pub const INGREDIENT_QUANTITY: &str = "main > .recipe > .ingredients .quantity > .value";
pub const RANDOM: &str = "main > .recipes > .list .random";
pub const RECIPE: &str = "main > .recipes > .list > ul > li";
pub const RECIPE_COUNT: &str = "main > .recipes > .list > .count";
pub const TAG: &str = ".tags ul li .tag";
pub const TAG_RESET: &str = ".tags ul li .reset";
pub const YIELD: &str = "main .recipe > .metadata > .yield > .content > .value";

/// Page kind discriminators.
pub const RECIPE_PAGE: &str = "main > .recipe";
pub const RECIPES_PAGE: &str = "main > .recipes";

pub const COLLAPSE_TRIGGER: &str = ".collapse-trigger";
pub const CONFIG: &str = "#config";

/// Children of the count element.
pub const COUNT_VALUE: &str = ".value";
pub const COUNT_WORD: &str = ".recipes";

/// Children of the yield block.
pub const YIELD_DECREASE: &str = ".decrease";
pub const YIELD_INCREASE: &str = ".increase";
pub const YIELD_DIGITS: &str = ".digits";

pub const ANCHOR: &str = "a";

/// Dataset keys (camelCase, mapped to `data-*` attributes).
pub const DATA_TAG_NAME: &str = "tagName";
pub const DATA_SINGULAR: &str = "singular";
pub const DATA_PLURAL: &str = "plural";
pub const DATA_COLLAPSE_SELECTOR: &str = "collapseSelector";
pub const DATA_DECIMAL_SEPARATOR: &str = "decimalSeparator";

/// State classes toggled by the engine.
pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_DEFAULT: &str = "default";
pub const CLASS_COLLAPSED: &str = "collapsed";
