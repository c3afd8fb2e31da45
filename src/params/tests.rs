//! Tests for the parameter builders

use super::*;
use crate::types::RequestParams;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn pairs(params: &RequestParams) -> Vec<(String, String)> {
    params.to_query_pairs()
}

fn expected(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ============================================================================
// Shared Value Types
// ============================================================================

#[test_case("max", Limit::Max ; "max")]
#[test_case("MAX", Limit::Max ; "max uppercase")]
#[test_case("5", Limit::Count(5) ; "count")]
fn test_limit_parse(input: &str, limit: Limit) {
    assert_eq!(input.parse::<Limit>().unwrap(), limit);
}

#[test]
fn test_limit_parse_rejects_garbage() {
    assert!("lots".parse::<Limit>().unwrap_err().is_validation());
}

#[test]
fn test_enum_round_trip_through_str() {
    assert_eq!("subcat".parse::<CategoryMemberType>().unwrap(), CategoryMemberType::Subcat);
    assert_eq!(LinksHereShow::NonRedirect.as_str(), "!redirect");
    assert_eq!(InfoProp::DisplayTitle.to_string(), "displaytitle");

    let err = "article".parse::<CategoryMemberType>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid query options: cmtype must be one of page, subcat, file, got 'article'"
    );
}

#[test]
fn test_page_targets_single() {
    assert!(PageTargets::title("Algebra").is_single());
    assert!(PageTargets::pageid(736).is_single());
    assert!(!PageTargets::titles(["Algebra", "Geometry"]).is_single());
    assert!(!PageTargets::default().is_single());
}

// ============================================================================
// Page Target Validation
// ============================================================================

#[test]
fn test_prop_builders_require_exactly_one_target() {
    let both = PageTargets {
        titles: Some(vec!["Algebra".to_string()]),
        pageids: Some(vec![1]),
    };
    let neither = PageTargets::default();

    for pages in [both, neither] {
        assert!(InfoOptions::new(pages.clone()).build().unwrap_err().is_validation());
        assert!(CategoriesOptions::new(pages.clone()).build().unwrap_err().is_validation());
        assert!(InterwikiLinksOptions::new(pages.clone()).build().unwrap_err().is_validation());
        assert!(LinksOptions::new(pages.clone()).build().unwrap_err().is_validation());
        assert!(ExternalLinksOptions::new(pages.clone()).build().unwrap_err().is_validation());
        assert!(LinksHereOptions::new(pages.clone()).build().unwrap_err().is_validation());
        assert!(ImagesOptions::new(pages.clone()).build().unwrap_err().is_validation());
        assert!(PageViewsOptions::new(pages.clone()).build().unwrap_err().is_validation());
        assert!(ExtractsOptions::sentences(pages, 3).build().unwrap_err().is_validation());
    }
}

// ============================================================================
// list=categorymembers
// ============================================================================

#[test]
fn test_category_members_by_title() {
    let params = CategoryMembersOptions::title("Category:Algebra")
        .member_type(CategoryMemberType::Page)
        .limit(Limit::Count(5))
        .build()
        .unwrap();

    assert_eq!(
        pairs(&params),
        expected(&[
            ("action", "query"),
            ("format", "json"),
            ("list", "categorymembers"),
            ("cmtitle", "Category:Algebra"),
            ("cmtype", "page"),
            ("cmlimit", "5"),
        ])
    );
}

#[test]
fn test_category_members_by_pageid_defaults_to_max() {
    let params = CategoryMembersOptions::pageid(1234)
        .member_type(CategoryMemberType::Subcat)
        .build()
        .unwrap();

    assert_eq!(
        pairs(&params),
        expected(&[
            ("action", "query"),
            ("format", "json"),
            ("list", "categorymembers"),
            ("cmpageid", "1234"),
            ("cmtype", "subcat"),
            ("cmlimit", "max"),
        ])
    );
}

#[test_case(Some("Category:Algebra"), Some(1) ; "both set")]
#[test_case(None, None ; "neither set")]
fn test_category_members_title_xor_pageid(cmtitle: Option<&str>, cmpageid: Option<u64>) {
    let options = CategoryMembersOptions {
        cmtitle: cmtitle.map(String::from),
        cmpageid,
        cmtype: Some(CategoryMemberType::Page),
        cmlimit: Limit::Max,
    };
    let err = options.build().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("cmtitle or cmpageid"));
}

#[test]
fn test_category_members_requires_type() {
    let err = CategoryMembersOptions::title("Category:Algebra")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("cmtype"));
}

// ============================================================================
// prop modules
// ============================================================================

#[test]
fn test_info_params() {
    let params = InfoOptions::new(PageTargets::titles(["Algebra", "Geometry"]))
        .inprop(InfoProp::Url)
        .build()
        .unwrap();

    assert_eq!(
        pairs(&params),
        expected(&[
            ("action", "query"),
            ("format", "json"),
            ("prop", "info"),
            ("titles", "Algebra|Geometry"),
            ("inprop", "url"),
        ])
    );
}

#[test]
fn test_links_params_by_pageids() {
    let params = LinksOptions::new(PageTargets::pageids([10, 20]))
        .namespace(0)
        .build()
        .unwrap();

    assert_eq!(
        pairs(&params),
        expected(&[
            ("action", "query"),
            ("format", "json"),
            ("prop", "links"),
            ("pageids", "10|20"),
            ("plnamespace", "0"),
            ("pllimit", "max"),
        ])
    );
}

#[test]
fn test_links_here_params() {
    let params = LinksHereOptions::new(PageTargets::title("Algebra"))
        .namespace(-1)
        .show(LinksHereShow::Redirect)
        .limit(Limit::Count(50))
        .build()
        .unwrap();

    assert_eq!(
        pairs(&params),
        expected(&[
            ("action", "query"),
            ("format", "json"),
            ("prop", "linkshere"),
            ("titles", "Algebra"),
            ("lhnamespace", "-1"),
            ("lhshow", "redirect"),
            ("lhlimit", "50"),
        ])
    );
}

#[test]
fn test_optional_entries_are_dropped() {
    let params = ExternalLinksOptions::new(PageTargets::title("Algebra"))
        .build()
        .unwrap();
    assert!(!params.contains("elprotocol"));
    assert!(!params.contains("pageids"));

    let params = InterwikiLinksOptions::new(PageTargets::title("Algebra"))
        .prefix("wikt")
        .build()
        .unwrap();
    assert_eq!(params.get("iwprefix").unwrap().to_string(), "wikt");
}

#[test]
fn test_pageviews_default_days() {
    let params = PageViewsOptions::new(PageTargets::title("Mathematics"))
        .build()
        .unwrap();
    assert_eq!(params.get("pvipdays").unwrap().to_string(), "30");

    let params = PageViewsOptions::new(PageTargets::title("Mathematics"))
        .days(7)
        .build()
        .unwrap();
    assert_eq!(params.get("pvipdays").unwrap().to_string(), "7");
}

#[test]
fn test_meta_and_list_builders() {
    assert_eq!(
        pairs(&SiteViewsOptions.build().unwrap()),
        expected(&[("action", "query"), ("format", "json"), ("meta", "siteviews")])
    );
    assert_eq!(
        pairs(&MostViewedOptions.build().unwrap()),
        expected(&[("action", "query"), ("format", "json"), ("list", "mostviewed")])
    );
}

// ============================================================================
// action=parse / prop=extracts
// ============================================================================

#[test]
fn test_parse_params() {
    let params = ParseOptions::new("Algebra")
        .prop(ParseProp::Wikitext)
        .build()
        .unwrap();

    assert_eq!(
        pairs(&params),
        expected(&[
            ("action", "parse"),
            ("format", "json"),
            ("page", "Algebra"),
            ("prop", "wikitext"),
            ("formatversion", "2"),
        ])
    );
}

#[test]
fn test_parse_requires_page() {
    assert!(ParseOptions::new("  ").build().unwrap_err().is_validation());
}

#[test]
fn test_extracts_single_page_has_no_exintro() {
    let params = ExtractsOptions::sentences(PageTargets::title("Pet door"), 10)
        .build()
        .unwrap();

    assert_eq!(
        pairs(&params),
        expected(&[
            ("action", "query"),
            ("format", "json"),
            ("prop", "extracts"),
            ("titles", "Pet door"),
            ("exsentences", "10"),
            ("exlimit", "max"),
            ("explaintext", "1"),
            ("formatversion", "2"),
        ])
    );
}

#[test_case(PageTargets::titles(["Pet door"]) ; "one-element title list")]
#[test_case(PageTargets::pageids([736]) ; "one-element id list")]
fn test_extracts_one_element_list_counts_as_single(pages: PageTargets) {
    let params = ExtractsOptions::sentences(pages, 10).build().unwrap();
    assert!(!params.contains("exintro"));
}

#[test]
fn test_extracts_multi_page_requests_intro() {
    let params = ExtractsOptions::chars(PageTargets::pageids([1, 2]), 200)
        .build()
        .unwrap();

    assert_eq!(params.get("exchars").unwrap().to_string(), "200");
    assert_eq!(params.get("exintro").unwrap().to_string(), "");
    assert!(!params.contains("exsentences"));
}

#[test_case(None, None ; "neither")]
#[test_case(Some(100), Some(2) ; "both")]
fn test_extracts_chars_xor_sentences(exchars: Option<u32>, exsentences: Option<u32>) {
    let options = ExtractsOptions {
        pages: PageTargets::title("Algebra"),
        exchars,
        exsentences,
        exlimit: Limit::Max,
    };
    let err = options.build().unwrap_err();
    assert!(err.to_string().contains("exchars or exsentences"));
}

#[test]
fn test_raw_params_build_is_identity() {
    let raw = RequestParams::new().with("action", "query").with("meta", "siteinfo");
    assert_eq!(raw.build().unwrap(), raw);
}
