use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;
use wep_model::{DEFAULT_PUBLIC_BASE, DEFAULT_RESOURCE_BASE};
use wep_store::{DEFAULT_DATASET, DEFAULT_FUSEKI_URL};
use wep_web::DEFAULT_BIND;

#[derive(Parser)]
#[command(about, version, name = "wep")]
/// WeP news provenance server and toolkit
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the WeP HTTP server
    Serve {
        /// Host and port to listen to
        #[arg(short, long, env = "WEP_BIND", default_value = DEFAULT_BIND, value_hint = ValueHint::Hostname)]
        bind: String,
        #[command(flatten)]
        store: StoreArgs,
        /// Base of the public article URLs
        #[arg(long, env = "BASE_URL", default_value = DEFAULT_PUBLIC_BASE, value_hint = ValueHint::Url)]
        base_url: String,
        /// Base of the article and author resource URIs
        #[arg(long, env = "WEP_RESOURCE_BASE", default_value = DEFAULT_RESOURCE_BASE, value_hint = ValueHint::Url)]
        resource_base: String,
        /// Allows cross-origin requests
        #[arg(long, env = "WEP_CORS")]
        cors: bool,
        /// Keep all data in an embedded in-memory store instead of Fuseki
        ///
        /// Data is lost when the server stops. The store options are ignored.
        #[arg(long)]
        in_memory: bool,
    },
    /// Serialize an article without a store
    Render {
        /// Output serialization
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Turtle)]
        format: RenderFormat,
        /// Id of the rendered article
        ///
        /// A random id is generated if none is given.
        #[arg(long)]
        id: Option<String>,
        /// Base of the public article URLs
        #[arg(long, env = "BASE_URL", default_value = DEFAULT_PUBLIC_BASE, value_hint = ValueHint::Url)]
        base_url: String,
        /// Base of the article and author resource URIs
        #[arg(long, env = "WEP_RESOURCE_BASE", default_value = DEFAULT_RESOURCE_BASE, value_hint = ValueHint::Url)]
        resource_base: String,
        /// JSON file with the article
        ///
        /// If no file is given, stdin is read.
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
    /// Check that the triple store is reachable
    Health {
        #[command(flatten)]
        store: StoreArgs,
    },
}

#[derive(clap::Args)]
pub struct StoreArgs {
    /// Base URL of the Fuseki server
    #[arg(long, env = "FUSEKI_URL", default_value = DEFAULT_FUSEKI_URL, value_hint = ValueHint::Url)]
    pub fuseki_url: String,
    /// Name of the Fuseki dataset
    #[arg(long, env = "FUSEKI_DATASET", default_value = DEFAULT_DATASET)]
    pub dataset: String,
    /// Timeout of each store request in seconds
    #[arg(long, env = "WEP_STORE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RenderFormat {
    Turtle,
    Jsonld,
    Rdfa,
}
