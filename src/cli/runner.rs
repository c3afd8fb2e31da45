//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::params::{
    CategoriesOptions, CategoryMembersOptions, ExternalLinksOptions, ExtractsOptions,
    ImagesOptions, InfoOptions, InterwikiLinksOptions, LinksHereOptions, LinksOptions,
    PageViewsOptions, ParseOptions,
};
use crate::query::WikiClient;
use crate::types::{JsonValue, RequestParams};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = WikiClient::from_config(&self.client_config()?)?;
        let output = self.execute(&client).await?;
        self.output(&output);
        Ok(())
    }

    /// Config file (if any) with command-line overrides applied
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(rps) = self.cli.rps {
            config.requests_per_second = rps;
        }
        if let Some(max_requests) = self.cli.max_requests {
            config.max_requests = Some(max_requests);
        }
        if let Some(secs) = self.cli.query_timeout {
            config.query_timeout_secs = Some(secs);
        }

        config.validate()?;
        Ok(config)
    }

    async fn execute(&self, client: &WikiClient) -> Result<JsonValue> {
        let value: JsonValue = match &self.cli.command {
            Commands::Info { pages, inprop } => {
                let mut options = InfoOptions::new(pages.targets());
                options.inprop = *inprop;
                client.info(&options).await?.into()
            }
            Commands::CategoryMembers {
                cmtitle,
                cmpageid,
                cmtype,
                limit,
            } => {
                let options = CategoryMembersOptions {
                    cmtitle: cmtitle.clone(),
                    cmpageid: *cmpageid,
                    cmtype: *cmtype,
                    cmlimit: *limit,
                };
                client.category_members(&options).await?.into()
            }
            Commands::Categories { pages, limit } => {
                let options = CategoriesOptions::new(pages.targets()).limit(*limit);
                client.categories(&options).await?.into()
            }
            Commands::Iwlinks {
                pages,
                prefix,
                limit,
            } => {
                let mut options = InterwikiLinksOptions::new(pages.targets()).limit(*limit);
                options.iwprefix.clone_from(prefix);
                client.interwiki_links(&options).await?.into()
            }
            Commands::Links {
                pages,
                namespace,
                limit,
            } => {
                let mut options = LinksOptions::new(pages.targets()).limit(*limit);
                options.plnamespace = *namespace;
                client.links(&options).await?.into()
            }
            Commands::Extlinks {
                pages,
                protocol,
                limit,
            } => {
                let mut options = ExternalLinksOptions::new(pages.targets()).limit(*limit);
                options.elprotocol = *protocol;
                client.external_links(&options).await?.into()
            }
            Commands::LinksHere {
                pages,
                namespace,
                show,
                limit,
            } => {
                let mut options = LinksHereOptions::new(pages.targets()).limit(*limit);
                options.lhnamespace = *namespace;
                options.lhshow = *show;
                client.links_here(&options).await?.into()
            }
            Commands::Images { pages, limit } => {
                let options = ImagesOptions::new(pages.targets()).limit(*limit);
                client.images(&options).await?.into()
            }
            Commands::Pageviews { pages, days } => {
                let options = PageViewsOptions::new(pages.targets()).days(*days);
                client.page_views(&options).await?.into()
            }
            Commands::Siteviews => client.site_views().await?.into(),
            Commands::MostViewed => client.most_viewed().await?.into(),
            Commands::Parse { page, prop } => {
                let mut options = ParseOptions::new(page.as_str());
                options.prop = *prop;
                client.parse(&options).await?.into()
            }
            Commands::Extracts {
                pages,
                chars,
                sentences,
                limit,
            } => {
                let options = ExtractsOptions {
                    pages: pages.targets(),
                    exchars: *chars,
                    exsentences: *sentences,
                    exlimit: *limit,
                };
                client.extracts(&options).await?.into()
            }
            Commands::Raw { params } => {
                let mut params: RequestParams = params
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                let output = client.fetch_until_complete(&mut params).await?;
                info!(
                    "Raw query finished after {} request(s), {} warning(s)",
                    output.requests,
                    output.warnings.len()
                );
                output.result
            }
        };
        Ok(value)
    }

    /// Output a JSON value
    fn output(&self, value: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}
