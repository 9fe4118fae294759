use crate::cli::{Args, Command, RenderFormat, StoreArgs};
use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{stdin, stdout, Read, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wep_mapper::{to_json_ld, to_rdfa, to_turtle};
use wep_model::{ArticleInput, UriScheme};
use wep_store::{FusekiStore, MemoryStore, StoreConfig, TripleStore, Url};
use wep_web::ServerConfig;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    match matches.command {
        Command::Serve {
            bind,
            store,
            base_url,
            resource_base,
            cors,
            in_memory,
        } => {
            init_tracing();
            let store: Arc<dyn TripleStore> = if in_memory {
                info!("Using an in-memory store");
                Arc::new(MemoryStore::new()?)
            } else {
                let config = store_config(&store)?;
                info!("Using Fuseki dataset at {}", config.base());
                Arc::new(FusekiStore::new(config)?)
            };
            wep_web::serve(ServerConfig {
                store,
                uris: UriScheme::new(resource_base, base_url),
                bind,
                cors,
            })
            .await
        }
        Command::Render {
            format,
            id,
            base_url,
            resource_base,
            file,
        } => {
            let input = match file {
                Some(file) => read_input(File::open(&file).with_context(|| {
                    format!("Could not open {}", file.display())
                })?)?,
                None => read_input(stdin().lock())?,
            };
            let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
            let article = input.validate(id)?;
            let uris = UriScheme::new(resource_base, base_url);
            let output = match format {
                RenderFormat::Turtle => to_turtle(&article, &uris),
                RenderFormat::Jsonld => serde_json::to_string_pretty(&to_json_ld(&article, &uris))?,
                RenderFormat::Rdfa => to_rdfa(&article, &uris),
            };
            let mut out = stdout().lock();
            writeln!(out, "{}", output.trim_end())?;
            Ok(out.flush()?)
        }
        Command::Health { store } => {
            let store = FusekiStore::new(store_config(&store)?)?;
            let health = store.health().await?;
            let mut out = stdout().lock();
            writeln!(out, "{}", serde_json::to_string_pretty(&health)?)?;
            Ok(out.flush()?)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn store_config(args: &StoreArgs) -> anyhow::Result<StoreConfig> {
    let base_url = Url::parse(&args.fuseki_url)
        .with_context(|| format!("Invalid Fuseki URL {}", args.fuseki_url))?;
    Ok(StoreConfig::new(base_url, args.dataset.as_str())
        .with_timeout(args.timeout_secs.map(Duration::from_secs)))
}

fn read_input(mut reader: impl Read) -> anyhow::Result<ArticleInput> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    serde_json::from_str(&buffer).context("The article is not valid JSON")
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn, reason = "Tests")]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;

    const ARTICLE: &str = r#"{"title":"T","content":"hello world","author":"Ana Pop","language":"en","contentType":"text"}"#;

    fn cli_command() -> Command {
        let mut command = Command::new(env!("CARGO"));
        command.arg("run").arg("--bin").arg("wep");
        command.arg("--");
        command
    }

    #[test]
    fn cli_help() {
        cli_command()
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::contains("WeP"));
    }

    #[test]
    fn cli_render_turtle() {
        cli_command()
            .arg("render")
            .arg("--id")
            .arg("abc")
            .write_stdin(ARTICLE)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "<http://news-provenance.org/article/abc> a schema:NewsArticle",
            ))
            .stdout(predicate::str::contains(r#"schema:wordCount "2"^^xsd:integer ;"#));
    }

    #[test]
    fn cli_render_json_ld() {
        cli_command()
            .arg("render")
            .arg("--format")
            .arg("jsonld")
            .arg("--id")
            .arg("abc")
            .arg("--base-url")
            .arg("https://news.example.com")
            .write_stdin(ARTICLE)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""@type": "NewsArticle""#))
            .stdout(predicate::str::contains(
                r#""url": "https://news.example.com/articles/abc""#,
            ));
    }

    #[test]
    fn cli_render_rejects_invalid_article() {
        cli_command()
            .arg("render")
            .write_stdin(r#"{"title":"T","content":"c","author":"A","language":"xx","contentType":"text"}"#)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid language"));
    }

    #[test]
    fn cli_health_fails_without_store() {
        cli_command()
            .arg("health")
            .arg("--fuseki-url")
            .arg("http://127.0.0.1:9")
            .arg("--timeout-secs")
            .arg("5")
            .assert()
            .failure();
    }

    #[test]
    fn store_config_from_args() -> anyhow::Result<()> {
        let config = store_config(&StoreArgs {
            fuseki_url: "http://fuseki:3030/".to_owned(),
            dataset: "news".to_owned(),
            timeout_secs: Some(3),
        })?;
        assert_eq!(config.query_endpoint(), "http://fuseki:3030/news/query");
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
        Ok(())
    }

    #[test]
    fn clap_debug() {
        use clap::CommandFactory;

        Args::command().debug_assert()
    }
}
