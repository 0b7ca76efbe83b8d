//! Site compiler server — entry point.

use std::path::Path;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use site_compiler::{
    attribute_issues, CompileOptions, Compiler, Escaping, JsonGraphFile, WidgetKind,
};
use site_compiler_server::config::{resolve_graph_path, resolve_listen_addr, resolve_output_dir};
use site_compiler_server::service::CompileService;
use site_compiler_server::transport::HttpTransport;
use site_compiler_server::types::{CompileRequest, CompileResponse};

#[derive(Parser)]
#[command(
    name = "site-compiler-server",
    about = "Compile stored websites into static HTML pages",
    version
)]
struct Cli {
    /// Path to the JSON graph export.
    #[arg(short, long, global = true)]
    graph: Option<String>,

    /// Root directory for compiled websites.
    #[arg(short, long, global = true)]
    out: Option<String>,

    /// Interpolate stored strings into the HTML without escaping.
    #[arg(long, global = true)]
    raw_html: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default).
    Serve {
        /// Listen address (host:port). Also reads SITE_COMPILER_ADDR.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Compile one website and print the result as JSON.
    Compile {
        /// Website id.
        #[arg(short, long)]
        website: String,

        /// Page id to alias as index.html.
        #[arg(long)]
        home: Option<String>,
    },

    /// Check a graph export and list attributes that would fall back to defaults.
    Validate,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   site-compiler-server completions bash > ~/.local/share/bash-completion/completions/site-compiler-server
    ///   site-compiler-server completions zsh > ~/.zfunc/_site-compiler-server
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn build_compiler(cli: &Cli) -> Compiler {
    let graph_path = resolve_graph_path(cli.graph.as_deref());
    let output_root = resolve_output_dir(cli.out.as_deref());
    let escaping = if cli.raw_html {
        Escaping::Raw
    } else {
        Escaping::Html
    };

    tracing::info!("Graph: {}", graph_path.display());
    tracing::info!("Output: {}", output_root.display());
    if cli.raw_html {
        tracing::warn!("HTML escaping disabled (--raw-html)");
    }

    Compiler::new(
        Arc::new(JsonGraphFile::new(graph_path)),
        output_root,
        CompileOptions { escaping },
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.as_ref().unwrap_or(&Commands::Serve { addr: None }) {
        Commands::Serve { addr } => {
            let addr = resolve_listen_addr(addr.as_deref());
            tracing::info!("Site compiler server");
            let service = CompileService::new(build_compiler(&cli));
            HttpTransport::new(service).run(&addr).await?;
        }

        Commands::Compile { website, home } => {
            let service = CompileService::new(build_compiler(&cli));
            let response: CompileResponse = service
                .compile(CompileRequest {
                    website_id: website.clone(),
                    home_page_id: home.clone(),
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Validate => {
            let graph_path = resolve_graph_path(cli.graph.as_deref());
            if let Err(e) = validate(&graph_path) {
                eprintln!("Invalid graph file: {e}");
                std::process::exit(1);
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                *shell,
                &mut cmd,
                "site-compiler-server",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

fn validate(graph_path: &Path) -> anyhow::Result<()> {
    let document = JsonGraphFile::new(graph_path).load()?;
    println!("Valid graph file: {}", graph_path.display());
    println!("  Websites: {}", document.websites.len());

    for website in &document.websites {
        let widgets: usize = website.pages.iter().map(|p| p.widgets.len()).sum();
        println!(
            "  {}: {} pages, {} widgets, home page {}",
            website.id,
            website.pages.len(),
            widgets,
            website.home_page_id.as_deref().unwrap_or("(none)")
        );

        if let Some(home) = &website.home_page_id {
            if !website.pages.iter().any(|p| &p.id == home) {
                println!("    home page '{home}' is not one of this website's pages");
            }
        }

        for page in &website.pages {
            for widget in &page.widgets {
                if let WidgetKind::Unknown(raw) = WidgetKind::parse(&widget.widget_type) {
                    println!(
                        "    {}/{}: unsupported type '{raw}', will be skipped",
                        page.id, widget.id
                    );
                }
                for issue in attribute_issues(widget) {
                    println!("    {}/{}: {issue}, default used", page.id, widget.id);
                }
            }
        }
    }

    Ok(())
}
