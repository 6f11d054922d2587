use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Http status not OK: {0}")]
    Status(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    Selector(String),

    #[error("Listing row is missing an expected element. Selector: {0}")]
    MissingElement(&'static str),

    #[error("Couldn't parse the listing price: {0}")]
    Price(#[from] std::num::ParseFloatError),

    #[error("Couldn't parse the listing link: {0}")]
    Url(#[from] url::ParseError),

    #[error("Listing link has no 'newurl' parameter.")]
    MissingRedirect,

    #[error("No 'updated' date found in the listing row.")]
    MissingDate,

    #[error("Couldn't parse the 'updated' date: {0}")]
    Date(#[from] chrono::ParseError),
}
