//! Option value types shared by the parameter builders

use crate::error::{Error, Result};
use crate::types::{ParamValue, RequestParams};
use std::fmt;
use std::str::FromStr;

/// Builds the request parameters for one logical query
pub trait ParamBuilder {
    /// Validate the options and produce the parameter map
    fn build(&self) -> Result<RequestParams>;
}

impl ParamBuilder for RequestParams {
    fn build(&self) -> Result<RequestParams> {
        Ok(self.clone())
    }
}

// ============================================================================
// Limit
// ============================================================================

/// Page size for list-style modules (`cmlimit`, `pllimit`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    /// Let the server pick its maximum
    #[default]
    Max,
    /// Fixed number of items per request
    Count(u32),
}

impl From<Limit> for ParamValue {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Max => ParamValue::Text("max".to_string()),
            Limit::Count(n) => ParamValue::Integer(n.into()),
        }
    }
}

impl FromStr for Limit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("max") {
            return Ok(Limit::Max);
        }
        s.parse()
            .map(Limit::Count)
            .map_err(|_| Error::validation(format!("limit must be 'max' or a number, got '{s}'")))
    }
}

// ============================================================================
// Page Targets
// ============================================================================

/// The pages a `prop` module runs against: titles or page ids, never both
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTargets {
    /// Page titles
    pub titles: Option<Vec<String>>,
    /// Page ids
    pub pageids: Option<Vec<u64>>,
}

impl PageTargets {
    /// Target pages by title
    pub fn titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: Some(titles.into_iter().map(Into::into).collect()),
            pageids: None,
        }
    }

    /// Target a single page by title
    pub fn title(title: impl Into<String>) -> Self {
        Self::titles([title.into()])
    }

    /// Target pages by id
    pub fn pageids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            titles: None,
            pageids: Some(ids.into_iter().collect()),
        }
    }

    /// Target a single page by id
    pub fn pageid(id: u64) -> Self {
        Self::pageids([id])
    }

    /// Whether exactly one page is targeted, counting one-element lists
    pub fn is_single(&self) -> bool {
        match (&self.titles, &self.pageids) {
            (Some(titles), None) => titles.len() == 1,
            (None, Some(ids)) => ids.len() == 1,
            _ => false,
        }
    }

    /// Validate and write `titles` or `pageids`
    pub(crate) fn apply(&self, params: &mut RequestParams) -> Result<()> {
        match (&self.titles, &self.pageids) {
            (Some(titles), None) => params.set("titles", titles.clone()),
            (None, Some(ids)) => params.set("pageids", ids.clone()),
            _ => {
                return Err(Error::validation(
                    "either titles or pageids must be specified",
                ))
            }
        }
        Ok(())
    }
}

// ============================================================================
// Enumerated Options
// ============================================================================

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = $value]
                $variant,
            )+
        }

        impl $name {
            /// Wire value
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(Error::validation(format!(
                        "{} must be one of {}, got '{}'",
                        $label,
                        [$($value),+].join(", "),
                        s
                    ))),
                }
            }
        }

        impl From<$name> for ParamValue {
            fn from(value: $name) -> Self {
                ParamValue::Text(value.as_str().to_string())
            }
        }
    };
}

string_enum! {
    /// Kind of category member to list
    CategoryMemberType, "cmtype" {
        Page => "page",
        Subcat => "subcat",
        File => "file",
    }
}

string_enum! {
    /// Extra page information for `prop=info`
    InfoProp, "inprop" {
        Protection => "protection",
        TalkId => "talkid",
        Watched => "watched",
        Watchers => "watchers",
        VisitingWatchers => "visitingwatchers",
        NotificationTimestamp => "notificationtimestamp",
        SubjectId => "subjectid",
        Url => "url",
        Readable => "readable",
        Preload => "preload",
        DisplayTitle => "displaytitle",
    }
}

string_enum! {
    /// URL protocol filter for `prop=extlinks`
    ExtLinkProtocol, "elprotocol" {
        Http => "http",
        Https => "https",
        Ftp => "ftp",
        Ftps => "ftps",
    }
}

string_enum! {
    /// Redirect filter for `prop=linkshere`
    LinksHereShow, "lhshow" {
        Redirect => "redirect",
        NonRedirect => "!redirect",
    }
}

string_enum! {
    /// Content format for `action=parse`
    ParseProp, "prop" {
        Text => "text",
        Wikitext => "wikitext",
    }
}
