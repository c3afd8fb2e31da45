//! Per-endpoint option structs
//!
//! Every builder emits `action` and `format` first, then the module selector,
//! then its own options. Unset options are left out of the map.

use super::types::{
    CategoryMemberType, ExtLinkProtocol, InfoProp, LinksHereShow, Limit, PageTargets,
    ParamBuilder, ParseProp,
};
use crate::error::{Error, Result};
use crate::types::RequestParams;

/// `action=query&format=json` plus one module selector, e.g. `prop=info`
fn query_params(module: &str, name: &str) -> RequestParams {
    RequestParams::new()
        .with("action", "query")
        .with("format", "json")
        .with(module, name)
}

// ============================================================================
// prop=info
// ============================================================================

/// Basic page information
///
/// Example: `action=query&format=json&prop=info&titles=Algebra`
#[derive(Debug, Clone, Default)]
pub struct InfoOptions {
    pub pages: PageTargets,
    pub inprop: Option<InfoProp>,
}

impl InfoOptions {
    pub fn new(pages: PageTargets) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn inprop(mut self, inprop: InfoProp) -> Self {
        self.inprop = Some(inprop);
        self
    }
}

impl ParamBuilder for InfoOptions {
    fn build(&self) -> Result<RequestParams> {
        let mut params = query_params("prop", "info");
        self.pages.apply(&mut params)?;
        params.set_opt("inprop", self.inprop);
        Ok(params)
    }
}

// ============================================================================
// list=categorymembers
// ============================================================================

/// Members of one category, identified by title or page id
///
/// Example: `action=query&format=json&list=categorymembers&cmtype=subcat&cmtitle=Category:Algebra&cmlimit=max`
#[derive(Debug, Clone, Default)]
pub struct CategoryMembersOptions {
    pub cmtitle: Option<String>,
    pub cmpageid: Option<u64>,
    /// Required
    pub cmtype: Option<CategoryMemberType>,
    pub cmlimit: Limit,
}

impl CategoryMembersOptions {
    /// List members of the category with this title (`Category:...`)
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            cmtitle: Some(title.into()),
            ..Self::default()
        }
    }

    /// List members of the category with this page id
    pub fn pageid(pageid: u64) -> Self {
        Self {
            cmpageid: Some(pageid),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn member_type(mut self, cmtype: CategoryMemberType) -> Self {
        self.cmtype = Some(cmtype);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: Limit) -> Self {
        self.cmlimit = limit;
        self
    }
}

impl ParamBuilder for CategoryMembersOptions {
    fn build(&self) -> Result<RequestParams> {
        if self.cmtitle.is_some() == self.cmpageid.is_some() {
            return Err(Error::validation(
                "either cmtitle or cmpageid must be specified",
            ));
        }
        let Some(cmtype) = self.cmtype else {
            return Err(Error::validation(
                "cmtype must be one of page, subcat, file",
            ));
        };

        let mut params = query_params("list", "categorymembers");
        params.set_opt("cmtitle", self.cmtitle.clone());
        params.set_opt("cmpageid", self.cmpageid);
        params.set("cmtype", cmtype);
        params.set("cmlimit", self.cmlimit);
        Ok(params)
    }
}

// ============================================================================
// prop=categories
// ============================================================================

/// Categories the pages belong to
///
/// Example: `action=query&format=json&prop=categories&titles=Albert%20Einstein`
#[derive(Debug, Clone, Default)]
pub struct CategoriesOptions {
    pub pages: PageTargets,
    pub cllimit: Limit,
}

impl CategoriesOptions {
    pub fn new(pages: PageTargets) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: Limit) -> Self {
        self.cllimit = limit;
        self
    }
}

impl ParamBuilder for CategoriesOptions {
    fn build(&self) -> Result<RequestParams> {
        let mut params = query_params("prop", "categories");
        self.pages.apply(&mut params)?;
        params.set("cllimit", self.cllimit);
        Ok(params)
    }
}

// ============================================================================
// prop=iwlinks
// ============================================================================

/// Interwiki links from the pages
///
/// Example: `action=query&format=json&prop=iwlinks&titles=Albert%20Einstein`
#[derive(Debug, Clone, Default)]
pub struct InterwikiLinksOptions {
    pub pages: PageTargets,
    /// Only links with this interwiki prefix
    pub iwprefix: Option<String>,
    pub iwlimit: Limit,
}

impl InterwikiLinksOptions {
    pub fn new(pages: PageTargets) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.iwprefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: Limit) -> Self {
        self.iwlimit = limit;
        self
    }
}

impl ParamBuilder for InterwikiLinksOptions {
    fn build(&self) -> Result<RequestParams> {
        let mut params = query_params("prop", "iwlinks");
        self.pages.apply(&mut params)?;
        params.set_opt("iwprefix", self.iwprefix.clone());
        params.set("iwlimit", self.iwlimit);
        Ok(params)
    }
}

// ============================================================================
// prop=links
// ============================================================================

/// Wiki links from the pages
#[derive(Debug, Clone, Default)]
pub struct LinksOptions {
    pub pages: PageTargets,
    pub plnamespace: Option<i32>,
    pub pllimit: Limit,
}

impl LinksOptions {
    pub fn new(pages: PageTargets) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn namespace(mut self, namespace: i32) -> Self {
        self.plnamespace = Some(namespace);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: Limit) -> Self {
        self.pllimit = limit;
        self
    }
}

impl ParamBuilder for LinksOptions {
    fn build(&self) -> Result<RequestParams> {
        let mut params = query_params("prop", "links");
        self.pages.apply(&mut params)?;
        params.set_opt("plnamespace", self.plnamespace);
        params.set("pllimit", self.pllimit);
        Ok(params)
    }
}

// ============================================================================
// prop=extlinks
// ============================================================================

/// External links from the pages
#[derive(Debug, Clone, Default)]
pub struct ExternalLinksOptions {
    pub pages: PageTargets,
    pub elprotocol: Option<ExtLinkProtocol>,
    pub ellimit: Limit,
}

impl ExternalLinksOptions {
    pub fn new(pages: PageTargets) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn protocol(mut self, protocol: ExtLinkProtocol) -> Self {
        self.elprotocol = Some(protocol);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: Limit) -> Self {
        self.ellimit = limit;
        self
    }
}

impl ParamBuilder for ExternalLinksOptions {
    fn build(&self) -> Result<RequestParams> {
        let mut params = query_params("prop", "extlinks");
        self.pages.apply(&mut params)?;
        params.set_opt("elprotocol", self.elprotocol);
        params.set("ellimit", self.ellimit);
        Ok(params)
    }
}

// ============================================================================
// prop=linkshere
// ============================================================================

/// Pages linking to the given pages
#[derive(Debug, Clone, Default)]
pub struct LinksHereOptions {
    pub pages: PageTargets,
    pub lhnamespace: Option<i32>,
    pub lhshow: Option<LinksHereShow>,
    pub lhlimit: Limit,
}

impl LinksHereOptions {
    pub fn new(pages: PageTargets) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn namespace(mut self, namespace: i32) -> Self {
        self.lhnamespace = Some(namespace);
        self
    }

    #[must_use]
    pub fn show(mut self, show: LinksHereShow) -> Self {
        self.lhshow = Some(show);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: Limit) -> Self {
        self.lhlimit = limit;
        self
    }
}

impl ParamBuilder for LinksHereOptions {
    fn build(&self) -> Result<RequestParams> {
        let mut params = query_params("prop", "linkshere");
        self.pages.apply(&mut params)?;
        params.set_opt("lhnamespace", self.lhnamespace);
        params.set_opt("lhshow", self.lhshow);
        params.set("lhlimit", self.lhlimit);
        Ok(params)
    }
}

// ============================================================================
// prop=images
// ============================================================================

/// Files used on the pages
#[derive(Debug, Clone, Default)]
pub struct ImagesOptions {
    pub pages: PageTargets,
    pub imlimit: Limit,
}

impl ImagesOptions {
    pub fn new(pages: PageTargets) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: Limit) -> Self {
        self.imlimit = limit;
        self
    }
}

impl ParamBuilder for ImagesOptions {
    fn build(&self) -> Result<RequestParams> {
        let mut params = query_params("prop", "images");
        self.pages.apply(&mut params)?;
        params.set("imlimit", self.imlimit);
        Ok(params)
    }
}

// ============================================================================
// prop=pageviews
// ============================================================================

/// Default number of days for `pvipdays`
pub const DEFAULT_PAGEVIEW_DAYS: u32 = 30;

/// Daily pageview counts for the pages
#[derive(Debug, Clone)]
pub struct PageViewsOptions {
    pub pages: PageTargets,
    pub pvipdays: u32,
}

impl Default for PageViewsOptions {
    fn default() -> Self {
        Self {
            pages: PageTargets::default(),
            pvipdays: DEFAULT_PAGEVIEW_DAYS,
        }
    }
}

impl PageViewsOptions {
    pub fn new(pages: PageTargets) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn days(mut self, days: u32) -> Self {
        self.pvipdays = days;
        self
    }
}

impl ParamBuilder for PageViewsOptions {
    fn build(&self) -> Result<RequestParams> {
        let mut params = query_params("prop", "pageviews");
        self.pages.apply(&mut params)?;
        params.set("pvipdays", self.pvipdays);
        Ok(params)
    }
}

// ============================================================================
// meta=siteviews / list=mostviewed
// ============================================================================

/// Site-wide daily view counts
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteViewsOptions;

impl ParamBuilder for SiteViewsOptions {
    fn build(&self) -> Result<RequestParams> {
        Ok(query_params("meta", "siteviews"))
    }
}

/// Most viewed pages, based on the previous day's counts
#[derive(Debug, Clone, Copy, Default)]
pub struct MostViewedOptions;

impl ParamBuilder for MostViewedOptions {
    fn build(&self) -> Result<RequestParams> {
        Ok(query_params("list", "mostviewed"))
    }
}

// ============================================================================
// action=parse
// ============================================================================

/// Rendered HTML or wikitext of one page
///
/// Example: `action=parse&format=json&page=Algebra&prop=text&formatversion=2`
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub page: String,
    pub prop: Option<ParseProp>,
}

impl ParseOptions {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            prop: None,
        }
    }

    #[must_use]
    pub fn prop(mut self, prop: ParseProp) -> Self {
        self.prop = Some(prop);
        self
    }
}

impl ParamBuilder for ParseOptions {
    fn build(&self) -> Result<RequestParams> {
        if self.page.trim().is_empty() {
            return Err(Error::validation("page must be specified"));
        }

        let mut params = RequestParams::new()
            .with("action", "parse")
            .with("format", "json")
            .with("page", self.page.as_str());
        params.set_opt("prop", self.prop);
        params.set("formatversion", 2_u32);
        Ok(params)
    }
}

// ============================================================================
// prop=extracts
// ============================================================================

/// Plain-text extracts of the pages, cut by characters or sentences
///
/// Requests for more than one page ask for intros only (`exintro`). A single
/// page gets the full cut-down text whether it is given as one title, one id,
/// or a one-element list of either.
///
/// Example: `action=query&prop=extracts&exsentences=10&titles=Pet_door&explaintext=1&formatversion=2`
#[derive(Debug, Clone, Default)]
pub struct ExtractsOptions {
    pub pages: PageTargets,
    pub exchars: Option<u32>,
    pub exsentences: Option<u32>,
    pub exlimit: Limit,
}

impl ExtractsOptions {
    /// Extracts cut after `sentences` sentences
    pub fn sentences(pages: PageTargets, sentences: u32) -> Self {
        Self {
            pages,
            exsentences: Some(sentences),
            ..Self::default()
        }
    }

    /// Extracts cut after `chars` characters
    pub fn chars(pages: PageTargets, chars: u32) -> Self {
        Self {
            pages,
            exchars: Some(chars),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: Limit) -> Self {
        self.exlimit = limit;
        self
    }
}

impl ParamBuilder for ExtractsOptions {
    fn build(&self) -> Result<RequestParams> {
        if self.exchars.is_some() == self.exsentences.is_some() {
            return Err(Error::validation(
                "either exchars or exsentences must be specified",
            ));
        }

        let mut params = query_params("prop", "extracts");
        self.pages.apply(&mut params)?;
        params.set_opt("exchars", self.exchars);
        params.set_opt("exsentences", self.exsentences);
        // multi-page requests only get intros
        if !self.pages.is_single() {
            params.set("exintro", "");
        }
        params.set("exlimit", self.exlimit);
        params.set("explaintext", 1_u32);
        params.set("formatversion", 2_u32);
        Ok(params)
    }
}
