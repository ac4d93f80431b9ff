use std::fs::File;
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use docs_mirror::MirrorConfig;
use tokio::runtime;

/// Mirror a documentation site's markdown pages from its sitemap
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Args {
    #[clap(subcommand)]
    pub cmd: Option<SubCommand>,
    #[clap(flatten)]
    pub mirror: MirrorArgs,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    #[clap(hide = true)]
    Completion,
}

#[derive(Debug, clap::Args)]
pub struct MirrorArgs {
    /// Optional yaml configuration file
    #[clap(env = "DOCS_MIRROR_CONFIG", parse(from_os_str), long)]
    pub config: Option<PathBuf>,
    /// Override the sitemap listing the documentation pages
    #[clap(long)]
    pub sitemap_url: Option<String>,
    /// Override the directory the pages are written to
    #[clap(parse(from_os_str), long, short)]
    pub output_dir: Option<PathBuf>,
    /// Override the maximum number of concurrent page downloads
    #[clap(long)]
    pub concurrency_limit: Option<NonZeroUsize>,
    /// Override the path marker where documentation pages begin
    #[clap(long)]
    pub docs_root: Option<String>,
    /// Override the excluded language prefixes (repeatable)
    #[clap(long = "language")]
    pub languages: Vec<String>,
    /// Send this user agent with every request
    #[clap(long)]
    pub user_agent: Option<String>,
    /// When quiet no logs are outputted
    #[clap(long, short)]
    pub quiet: bool,
}

impl TryFrom<&MirrorArgs> for MirrorConfig {
    type Error = anyhow::Error;

    fn try_from(args: &MirrorArgs) -> Result<Self, Self::Error> {
        let mut conf = if let Some(file) = args.config.as_ref().map(File::open) {
            serde_yaml::from_reader(file?)?
        } else {
            MirrorConfig::default()
        };
        if let Some(sitemap_url) = &args.sitemap_url {
            conf.sitemap_url = sitemap_url.to_string();
        }
        if let Some(output_dir) = &args.output_dir {
            conf.output_dir = output_dir.clone();
        }
        if let Some(concurrency_limit) = args.concurrency_limit {
            conf.concurrency_limit = concurrency_limit;
        }
        if let Some(docs_root) = &args.docs_root {
            conf.docs_root = docs_root.to_string();
        }
        if !args.languages.is_empty() {
            conf.languages = args.languages.clone();
        }
        if let Some(user_agent) = &args.user_agent {
            conf.user_agent = Some(user_agent.to_string());
        }
        conf.validate()?;
        Ok(conf)
    }
}

pub fn mirror(args: MirrorArgs) -> anyhow::Result<()> {
    let conf: MirrorConfig = (&args).try_into()?;
    log::debug!("Mirroring with {conf:?}");

    let rt = runtime::Builder::new_current_thread().enable_all().build()?;
    let report = rt.block_on(docs_mirror::run(&conf, &mut io::stdout()))?;
    print!("{report}");

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        Some(SubCommand::Completion) => {
            generate(
                Shell::Bash,
                &mut Args::command(),
                "docs-mirror",
                &mut io::stdout(),
            );
            Ok(())
        }
        None => {
            if !args.mirror.quiet {
                env_logger::Builder::from_env(
                    env_logger::Env::default().default_filter_or("docs_mirror=warn"),
                )
                .init();
            }
            mirror(args.mirror)
        }
    }
}
