//! A client library for the staticICE price search.
//!
//! Builds a search query, issues a single blocking GET against one of the
//! four regional deployments, and scans the response body line by line,
//! decoding one [`ItemEntry`] per result row.
//!
//! ```no_run
//! use staticice::{Client, Region, SearchQuery};
//!
//! let client = Client::default();
//! let query = SearchQuery::new().query("samsung 970 evo").max_price(200);
//! for entry in client.search(Region::Au, &query)? {
//!     println!("{} | {} | {}", entry.price, entry.seller, entry.description);
//! }
//! # Ok::<(), staticice::Error>(())
//! ```

mod error;
mod parse;
mod query;
mod request;

pub use error::{Error, Result};
pub use parse::{scan, ItemEntry};
pub use query::SearchQuery;
pub use request::{Client, Region};
