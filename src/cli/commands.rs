//! CLI commands and argument parsing

use crate::params::{
    CategoryMemberType, ExtLinkProtocol, InfoProp, Limit, LinksHereShow, PageTargets, ParseProp,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Query the MediaWiki API, following continuations to the end
#[derive(Parser, Debug)]
#[command(name = "wikiquery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API endpoint (overrides the config file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Requests per second ceiling (overrides the config file)
    #[arg(long, global = true)]
    pub rps: Option<u32>,

    /// Give up on a query after this many requests
    #[arg(long, global = true)]
    pub max_requests: Option<u32>,

    /// Deadline for a whole query, in seconds
    #[arg(long, global = true)]
    pub query_timeout: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Titles or page ids, exactly one of the two
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Page titles
    #[arg(short, long = "title", num_args = 1..)]
    pub titles: Vec<String>,

    /// Page ids
    #[arg(short, long = "pageid", num_args = 1..)]
    pub pageids: Vec<u64>,
}

impl PageArgs {
    /// Convert to page targets; empty lists count as unset
    pub fn targets(&self) -> PageTargets {
        PageTargets {
            titles: (!self.titles.is_empty()).then(|| self.titles.clone()),
            pageids: (!self.pageids.is_empty()).then(|| self.pageids.clone()),
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Basic page information
    Info {
        #[command(flatten)]
        pages: PageArgs,

        /// Extra property (url, displaytitle, ...)
        #[arg(long)]
        inprop: Option<InfoProp>,
    },

    /// Members of a category
    CategoryMembers {
        /// Category title (Category:...)
        #[arg(long)]
        cmtitle: Option<String>,

        /// Category page id
        #[arg(long)]
        cmpageid: Option<u64>,

        /// Member type: page, subcat or file
        #[arg(long)]
        cmtype: Option<CategoryMemberType>,

        /// Members per request ("max" or a number)
        #[arg(long, default_value = "max")]
        limit: Limit,
    },

    /// Categories of pages
    Categories {
        #[command(flatten)]
        pages: PageArgs,

        #[arg(long, default_value = "max")]
        limit: Limit,
    },

    /// Interwiki links of pages
    Iwlinks {
        #[command(flatten)]
        pages: PageArgs,

        /// Only links with this prefix
        #[arg(long)]
        prefix: Option<String>,

        #[arg(long, default_value = "max")]
        limit: Limit,
    },

    /// Wiki links of pages
    Links {
        #[command(flatten)]
        pages: PageArgs,

        /// Only links into this namespace
        #[arg(long, allow_negative_numbers = true)]
        namespace: Option<i32>,

        #[arg(long, default_value = "max")]
        limit: Limit,
    },

    /// External links of pages
    Extlinks {
        #[command(flatten)]
        pages: PageArgs,

        /// Only links with this protocol
        #[arg(long)]
        protocol: Option<ExtLinkProtocol>,

        #[arg(long, default_value = "max")]
        limit: Limit,
    },

    /// Pages linking to pages
    LinksHere {
        #[command(flatten)]
        pages: PageArgs,

        /// Only linking pages in this namespace
        #[arg(long, allow_negative_numbers = true)]
        namespace: Option<i32>,

        /// "redirect" or "!redirect"
        #[arg(long)]
        show: Option<LinksHereShow>,

        #[arg(long, default_value = "max")]
        limit: Limit,
    },

    /// Files used on pages
    Images {
        #[command(flatten)]
        pages: PageArgs,

        #[arg(long, default_value = "max")]
        limit: Limit,
    },

    /// Daily pageviews of pages
    Pageviews {
        #[command(flatten)]
        pages: PageArgs,

        /// Number of days
        #[arg(long, default_value = "30")]
        days: u32,
    },

    /// Site-wide daily views
    Siteviews,

    /// Most viewed pages of the previous day
    MostViewed,

    /// Parsed content of a page
    Parse {
        /// Page title
        page: String,

        /// text or wikitext
        #[arg(long)]
        prop: Option<ParseProp>,
    },

    /// Plain-text extracts of pages
    Extracts {
        #[command(flatten)]
        pages: PageArgs,

        /// Cut after this many characters
        #[arg(long, conflicts_with = "sentences")]
        chars: Option<u32>,

        /// Cut after this many sentences
        #[arg(long)]
        sentences: Option<u32>,

        #[arg(long, default_value = "max")]
        limit: Limit,
    },

    /// Arbitrary parameters, printed as the full merged response
    Raw {
        /// Parameters as key=value; repeat for multiple
        #[arg(short, long = "param", value_parser = parse_key_value, num_args = 1..)]
        params: Vec<(String, String)>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_category_members() {
        let cli = Cli::try_parse_from([
            "wikiquery",
            "category-members",
            "--cmtitle",
            "Category:Algebra",
            "--cmtype",
            "page",
            "--limit",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::CategoryMembers {
                cmtitle,
                cmpageid,
                cmtype,
                limit,
            } => {
                assert_eq!(cmtitle.as_deref(), Some("Category:Algebra"));
                assert!(cmpageid.is_none());
                assert_eq!(cmtype, Some(CategoryMemberType::Page));
                assert_eq!(limit, Limit::Count(5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_page_args() {
        let cli = Cli::try_parse_from([
            "wikiquery", "links", "-t", "Algebra", "Geometry", "--namespace", "-1",
        ])
        .unwrap();

        let Commands::Links {
            pages, namespace, ..
        } = cli.command
        else {
            panic!("expected links");
        };
        assert_eq!(
            pages.targets(),
            PageTargets::titles(["Algebra", "Geometry"])
        );
        assert_eq!(namespace, Some(-1));
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "wikiquery",
            "siteviews",
            "--rps",
            "10",
            "--format",
            "pretty",
            "--max-requests",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.rps, Some(10));
        assert_eq!(cli.max_requests, Some(3));
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_cli_raw_params() {
        let cli = Cli::try_parse_from([
            "wikiquery",
            "raw",
            "-p",
            "action=query",
            "-p",
            "meta=siteinfo",
        ])
        .unwrap();
        let Commands::Raw { params } = cli.command else {
            panic!("expected raw");
        };
        assert_eq!(
            params,
            vec![
                ("action".to_string(), "query".to_string()),
                ("meta".to_string(), "siteinfo".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_key_value_rejects_missing_equals() {
        assert!(parse_key_value("action").is_err());
        assert!(parse_key_value("=x").is_err());
        assert_eq!(
            parse_key_value("continue=-||").unwrap(),
            ("continue".to_string(), "-||".to_string())
        );
    }
}
