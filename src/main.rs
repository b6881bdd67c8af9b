//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Manage markdown blog posts in a content directory", long_about = None)]
struct Cli {
    /// Site directory (defaults to current directory)
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
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Print posts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a post
    Show {
        /// File name in the content directory, or an absolute path
        path: PathBuf,

        /// Print the markdown source instead of HTML
        #[arg(long)]
        raw: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name stem (derived from the title when omitted)
        #[arg(short, long)]
        slug: Option<String>,

        /// Tag to add; repeat or separate with commas
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Mark the post as a draft
        #[arg(long)]
        draft: bool,

        /// Markdown body
        #[arg(short, long, default_value = "")]
        body: String,
    },

    /// Edit an existing post; only the given fields change
    Edit {
        /// File name in the content directory, or an absolute path
        path: PathBuf,

        #[arg(long)]
        title: Option<String>,

        /// New markdown body
        #[arg(short, long)]
        body: Option<String>,

        /// New slug; the file is not renamed
        #[arg(short, long)]
        slug: Option<String>,

        /// Replacement tags; repeat or separate with commas
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Set or clear the draft flag
        #[arg(long)]
        draft: Option<bool>,

        #[arg(long)]
        date: Option<String>,

        /// Last-modified time (defaults to now)
        #[arg(long)]
        lastmod: Option<String>,
    },

    /// List tags with post counts
    Tags,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let site = folio::Folio::new(&base_dir)?;
    tracing::debug!("Using content directory {:?}", site.content_dir);

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::List { json } => {
            folio::commands::list::run(&site, json, &mut stdout)?;
        }

        Commands::Show { path, raw } => {
            folio::commands::show::run(&site, &path, raw, &mut stdout)?;
        }

        Commands::New {
            title,
            slug,
            tags,
            draft,
            body,
        } => {
            tracing::info!("Creating new post with title: {}", title);
            let post = folio::commands::new::create_post(
                &site,
                folio::commands::new::NewPost {
                    title,
                    slug,
                    tags,
                    draft,
                    body,
                },
            )?;
            writeln!(stdout, "Created: {}", post.file_path.display())?;
        }

        Commands::Edit {
            path,
            title,
            body,
            slug,
            tags,
            draft,
            date,
            lastmod,
        } => {
            let post = folio::commands::edit::edit_post(
                &site,
                &path,
                folio::commands::edit::PostEdit {
                    title,
                    body,
                    slug,
                    tags,
                    draft,
                    date,
                    last_modified: lastmod,
                },
            )?;
            writeln!(stdout, "Updated: {}", post.file_path.display())?;
        }

        Commands::Tags => {
            folio::commands::tags::run(&site, &mut stdout)?;
        }
    }

    Ok(())
}
