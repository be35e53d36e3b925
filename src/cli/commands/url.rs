//! skit url - Parse, build and encode URLs

use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::cli::commands::parse_pairs;
use crate::cli::output::{emit, emit_value};
use crate::error::Result;
use crate::urls::{build_url, extract_domain, is_valid_url, parse_url, url_decode, url_encode};

#[derive(Args, Debug)]
pub struct UrlArgs {
    #[command(subcommand)]
    pub command: UrlCommand,
}

#[derive(Subcommand, Debug)]
pub enum UrlCommand {
    /// Split a URL into its parts
    Parse { url: String },

    /// Encode key=value pairs as a query string
    Encode {
        #[arg(required = true)]
        pairs: Vec<String>,
    },

    /// Decode a query string into key/value pairs
    Decode { query: String },

    /// Join a base URL, a path and query parameters
    Build {
        base: String,

        #[arg(default_value = "")]
        path: String,

        /// Query parameter as key=value (repeatable)
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,
    },

    /// Host of a URL without a leading "www."
    Domain { url: String },

    /// Whether a string is a well-formed http(s) URL
    Validate { url: String },
}

pub fn run(ctx: &AppContext, args: &UrlArgs) -> Result<()> {
    match &args.command {
        UrlCommand::Parse { url } => {
            let parts = parse_url(url)?;
            emit(ctx, "url parse", &parts, |parts, layout| {
                layout.kv("scheme", &parts.scheme);
                if let Some(host) = &parts.host {
                    layout.kv("host", host);
                }
                if let Some(port) = parts.port {
                    layout.kv("port", &port.to_string());
                }
                layout.kv("path", &parts.path);
                if !parts.query.is_empty() {
                    layout.kv("query", &parts.query);
                }
                for (key, value) in &parts.query_params {
                    layout.bullet(&format!("{key} = {value}"));
                }
                if !parts.fragment.is_empty() {
                    layout.kv("fragment", &parts.fragment);
                }
                if let Some(username) = &parts.username {
                    layout.kv("username", username);
                }
            })
        }
        UrlCommand::Encode { pairs } => {
            let encoded = url_encode(&parse_pairs(pairs)?);
            emit_value(ctx, "url encode", &encoded)
        }
        UrlCommand::Decode { query } => {
            let decoded = url_decode(query)?;
            emit(ctx, "url decode", &decoded, |decoded, layout| {
                for (key, value) in decoded {
                    layout.kv(key, value);
                }
            })
        }
        UrlCommand::Build { base, path, params } => {
            let url = build_url(base, path, &parse_pairs(params)?);
            emit_value(ctx, "url build", &url)
        }
        UrlCommand::Domain { url } => {
            let domain = extract_domain(url);
            emit(ctx, "url domain", &domain, |domain, layout| {
                layout.push_line(domain.as_deref().unwrap_or("(none)"));
            })
        }
        UrlCommand::Validate { url } => emit_value(ctx, "url validate", &is_valid_url(url)),
    }
}
