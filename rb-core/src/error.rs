use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required element: {0}")]
    MissingElement(&'static str),
    #[error("invalid yield digits")]
    Yield,
    #[error(transparent)]
    Selector(#[from] rb_dom::ParseSelectorError),
}
