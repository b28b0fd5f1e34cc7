//! CLI entry point for postbook

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postbook")]
#[command(version)]
#[command(about = "A small static blog generator", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Author (defaults to the site author)
        #[arg(short, long)]
        author: Option<String>,

        /// Route of the new post (defaults to /<slug>)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip)
        #[arg(short, long)]
        ip: Option<String>,

        /// Do not reload posts when files change
        #[arg(long)]
        r#static: bool,
    },

    /// Print the rendered post index, or one post, to stdout
    Render {
        /// Route of the post to render
        path: Option<String>,
    },

    /// Clean the public folder
    Clean,

    /// List posts
    List {
        /// Also print each post's excerpt
        #[arg(short, long)]
        excerpt: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postbook=debug,info"
    } else {
        "postbook=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            postbook::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            author,
            path,
        } => {
            let blog = postbook::Blog::new(&base_dir)?;
            let file = postbook::commands::new::create_post(
                &blog,
                &title,
                author.as_deref(),
                path.as_deref(),
            )?;
            println!("Created: {:?}", file);
        }

        Commands::Generate { watch } => {
            let blog = postbook::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            blog.generate()?;
            println!("Generated successfully!");

            if watch {
                tokio::task::spawn_blocking(move || postbook::commands::generate::watch(&blog))
                    .await??;
            }
        }

        Commands::Server {
            port,
            ip,
            r#static,
        } => {
            let blog = postbook::Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);
            postbook::server::start(&blog, &ip, port, !r#static).await?;
        }

        Commands::Render { path } => {
            let blog = postbook::Blog::new(&base_dir)?;
            let html = postbook::commands::render::run(&blog, path.as_deref())?;
            print!("{}", html);
        }

        Commands::Clean => {
            let blog = postbook::Blog::new(&base_dir)?;
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { excerpt } => {
            let blog = postbook::Blog::new(&base_dir)?;
            postbook::commands::list::run(&blog, excerpt)?;
        }

        Commands::Version => {
            println!("postbook version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
