//! One method per API module

use super::{into_array, into_object, WikiClient};
use crate::error::Result;
use crate::http::Transport;
use crate::merge::merge;
use crate::params::{
    CategoriesOptions, CategoryMembersOptions, ExternalLinksOptions, ExtractsOptions,
    ImagesOptions, InfoOptions, InterwikiLinksOptions, LinksHereOptions, LinksOptions,
    MostViewedOptions, PageViewsOptions, ParamBuilder, ParseOptions, SiteViewsOptions,
};
use crate::types::{JsonObject, JsonValue};
use serde_json::map::Entry;

const PAGES: &[&str] = &["query", "pages"];
const CATEGORY_MEMBERS: &[&str] = &["query", "categorymembers"];
const SITE_VIEWS: &[&str] = &["query", "siteviews"];
const MOST_VIEWED: &[&str] = &["query", "mostviewed"];
const PARSE: &[&str] = &["parse"];

impl<T: Transport> WikiClient<T> {
    async fn pages<B: ParamBuilder>(&self, options: &B) -> Result<JsonObject> {
        into_object(self.run(options, PAGES).await?, PAGES)
    }

    /// Page information, keyed by page id
    pub async fn info(&self, options: &InfoOptions) -> Result<JsonObject> {
        self.pages(options).await
    }

    /// Members of a category, in server order
    pub async fn category_members(
        &self,
        options: &CategoryMembersOptions,
    ) -> Result<Vec<JsonValue>> {
        into_array(self.run(options, CATEGORY_MEMBERS).await?, CATEGORY_MEMBERS)
    }

    /// Categories of each page, keyed by page id
    pub async fn categories(&self, options: &CategoriesOptions) -> Result<JsonObject> {
        self.pages(options).await
    }

    /// Interwiki links of each page, keyed by page id
    pub async fn interwiki_links(&self, options: &InterwikiLinksOptions) -> Result<JsonObject> {
        self.pages(options).await
    }

    /// Wiki links of each page, keyed by page id
    pub async fn links(&self, options: &LinksOptions) -> Result<JsonObject> {
        self.pages(options).await
    }

    /// External links of each page, keyed by page id
    pub async fn external_links(&self, options: &ExternalLinksOptions) -> Result<JsonObject> {
        self.pages(options).await
    }

    /// Pages linking to each page, keyed by page id
    pub async fn links_here(&self, options: &LinksHereOptions) -> Result<JsonObject> {
        self.pages(options).await
    }

    /// Files used on each page, keyed by page id
    pub async fn images(&self, options: &ImagesOptions) -> Result<JsonObject> {
        self.pages(options).await
    }

    /// Daily pageviews of each page, keyed by page id
    pub async fn page_views(&self, options: &PageViewsOptions) -> Result<JsonObject> {
        self.pages(options).await
    }

    /// Site-wide daily views, keyed by date
    pub async fn site_views(&self) -> Result<JsonObject> {
        into_object(self.run(&SiteViewsOptions, SITE_VIEWS).await?, SITE_VIEWS)
    }

    /// Most viewed pages of the previous day
    pub async fn most_viewed(&self) -> Result<Vec<JsonValue>> {
        into_array(self.run(&MostViewedOptions, MOST_VIEWED).await?, MOST_VIEWED)
    }

    /// Parsed content of one page
    pub async fn parse(&self, options: &ParseOptions) -> Result<JsonObject> {
        into_object(self.run(options, PARSE).await?, PARSE)
    }

    /// Plain-text extracts, keyed by page id
    ///
    /// `formatversion=2` returns pages as a list; they are re-keyed by page id
    /// (or title, for pages that do not exist) to match the other modules.
    /// A page listed again by a continued request is merged into its first
    /// entry, so a later copy without an `extract` does not erase it.
    pub async fn extracts(&self, options: &ExtractsOptions) -> Result<JsonObject> {
        let pages = into_array(self.run(options, PAGES).await?, PAGES)?;
        let mut keyed = JsonObject::new();
        for page in pages {
            match keyed.entry(page_key(&page)) {
                Entry::Occupied(mut existing) => merge(existing.get_mut(), page),
                Entry::Vacant(slot) => {
                    slot.insert(page);
                }
            }
        }
        Ok(keyed)
    }
}

fn page_key(page: &JsonValue) -> String {
    match (page.get("pageid"), page.get("title")) {
        (Some(JsonValue::Number(id)), _) => id.to_string(),
        (_, Some(JsonValue::String(title))) => title.clone(),
        _ => String::new(),
    }
}
