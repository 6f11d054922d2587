use std::collections::BTreeMap;

use url::form_urlencoded;

/// A search query to run against staticICE.
///
/// Every setter stores a single value under a fixed key, replacing whatever
/// was stored there before. The site caps results at 100 links per search,
/// so every query carries a fixed `links=100` parameter.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    values: BTreeMap<&'static str, String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        let mut values = BTreeMap::new();
        values.insert("links", "100".to_string());
        Self { values }
    }

    /// Sets a comma separated list of manufacturers to search for.
    pub fn manufacturer(mut self, manufacturer: &str) -> Self {
        self.values.insert("manufacturer", manufacturer.to_string());
        self
    }

    /// Sets a comma separated list of model names/numbers to search for.
    pub fn model(mut self, model: &str) -> Self {
        self.values.insert("model", model.to_string());
        self
    }

    /// Sets a space separated list of words that the listing must contain.
    pub fn words(mut self, words: &str) -> Self {
        self.values.insert("words", words.to_string());
        self
    }

    /// Sets an exact phrase that the listing must contain.
    pub fn phrase(mut self, phrase: &str) -> Self {
        self.values.insert("phrase", phrase.to_string());
        self
    }

    /// Sets a space separated list of words that the listing must not include.
    pub fn exclude_words(mut self, words: &str) -> Self {
        self.values.insert("excludewords", words.to_string());
        self
    }

    /// Sets a comma separated list of strings that the seller's domain name
    /// must contain.
    pub fn site(mut self, site: &str) -> Self {
        self.values.insert("site", site.to_string());
        self
    }

    /// Sets the normal search query to use.
    pub fn query(mut self, query: &str) -> Self {
        self.values.insert("q", query.to_string());
        self
    }

    /// Sets the minimum price for the search query in the local currency.
    pub fn min_price(mut self, min: i64) -> Self {
        self.values.insert("price-min", min.to_string());
        self
    }

    /// Sets the maximum price for the search query in the local currency.
    pub fn max_price(mut self, max: i64) -> Self {
        self.values.insert("price-max", max.to_string());
        self
    }

    /// Renders the accumulated parameters as a URL-encoded query string.
    pub(crate) fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.values.iter())
            .finish()
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new()
    }
}
