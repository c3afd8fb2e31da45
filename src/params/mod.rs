//! Parameter builders
//!
//! Maps typed, validated options to the request parameters of one API module.
//! Validation happens in [`ParamBuilder::build`], before anything is sent.

mod builders;
mod types;

pub use builders::{
    CategoriesOptions, CategoryMembersOptions, ExternalLinksOptions, ExtractsOptions,
    ImagesOptions, InfoOptions, InterwikiLinksOptions, LinksHereOptions, LinksOptions,
    MostViewedOptions, PageViewsOptions, ParseOptions, SiteViewsOptions, DEFAULT_PAGEVIEW_DAYS,
};
pub use types::{
    CategoryMemberType, ExtLinkProtocol, InfoProp, LinksHereShow, Limit, PageTargets,
    ParamBuilder, ParseProp,
};

#[cfg(test)]
mod tests;
