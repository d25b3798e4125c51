//! Command-line interface for repotree.
//!
//! Builds a repository tree from a local checkout, a GitHub tree listing or a
//! plain path list, and prints it or the README generation request built
//! from it.

use clap::{Parser, ValueEnum};
use repotree::{
    BinaryDetection, GenerateResponse, RepoEntry, RepoUrl, RepotreeBuilder, RepotreeError,
    RepotreeOptions, Session, Snapshot, attach_contents, fetch_plan, output, parse_listing,
    parse_path_list, parse_repo_info, scan_local, snapshot_from_entries,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::exit;

/// repotree — repository tree renderer and README request builder
#[derive(Parser)]
#[command(name = "repotree", version, about, long_about = None)]
struct Cli {
    /// Local checkout to scan (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// GitHub recursive tree listing JSON to read instead of scanning ("-" for stdin)
    #[arg(long, conflicts_with = "paths")]
    listing: Option<String>,

    /// Newline-delimited path list to read instead of scanning ("-" for stdin)
    #[arg(long)]
    paths: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,

    /// Repository URL, required for the request format
    #[arg(long)]
    repo_url: Option<String>,

    /// Directory holding downloaded README and key files, laid out by repository path
    #[arg(long)]
    contents_dir: Option<PathBuf>,

    /// Branch the urls format points at
    #[arg(long, conflicts_with = "repo_info")]
    branch: Option<String>,

    /// Repository metadata JSON naming the default branch ("-" for stdin)
    #[arg(long)]
    repo_info: Option<String>,

    /// Generation service response to unwrap into README.md in --out-dir
    #[arg(long, requires = "repo_url")]
    response: Option<String>,

    /// Directory README.md is written to when applying a response
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Ignore patterns (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Key files at or above this size in bytes are not analyzed
    #[arg(long, default_value_t = repotree::DEFAULT_KEY_FILE_SIZE_LIMIT)]
    key_file_size_limit: u64,

    /// Binary detection strategy
    #[arg(long, default_value = "simple", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Fail on paths that claim an existing file as a directory or vice versa
    #[arg(long)]
    strict: bool,

    /// Pretty output (indented JSON)
    #[arg(short, long)]
    pretty: bool,

    /// Include hidden files
    #[arg(long)]
    hidden: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Disable .gitignore handling
    #[arg(long)]
    no_gitignore: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Tree,
    Json,
    Markdown,
    Request,
    Urls,
}

enum Source {
    Local,
    Listing(String),
    Paths(String),
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn options(&self) -> RepotreeOptions {
        let builder = RepotreeBuilder::new(&self.root)
            .respect_gitignore(!self.no_gitignore)
            .include_hidden(self.hidden)
            .follow_links(self.follow_links)
            .ignore_patterns(self.ignore_patterns.clone())
            .key_file_size_limit(self.key_file_size_limit)
            .binary_detection(self.binary_detection)
            .strict(self.strict);

        match self.max_depth {
            Some(depth) => builder.max_depth(depth),
            None => builder.no_limit_depth(),
        }
        .build()
    }

    fn source(&self) -> Source {
        match (&self.listing, &self.paths) {
            (Some(listing), _) => Source::Listing(listing.clone()),
            (None, Some(paths)) => Source::Paths(paths.clone()),
            (None, None) => Source::Local,
        }
    }
}

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), RepotreeError> {
    if let (Some(response), Some(repo_url)) = (&cli.response, &cli.repo_url) {
        return apply_response(repo_url, response, cli);
    }

    let options = cli.options();
    let mut snapshot = match cli.source() {
        Source::Local => scan_local(&options)?,
        Source::Listing(input) => {
            let listing = parse_listing(&read_input(&input)?)?;
            snapshot_from_entries(listing.into_entries(), &options)?
        }
        Source::Paths(input) => {
            let entries: Vec<RepoEntry> = parse_path_list(&read_input(&input)?);
            snapshot_from_entries(entries, &options)?
        }
    };
    if let Some(dir) = &cli.contents_dir {
        attach_contents(&mut snapshot, |path| read_downloaded(dir, path))?;
    }

    let out = match cli.format {
        OutputFormat::Tree => output::format_snapshot(&snapshot, output::OutputFormat::Tree, cli.pretty)?,
        OutputFormat::Json => output::format_snapshot(&snapshot, output::OutputFormat::Json, cli.pretty)?,
        OutputFormat::Markdown => {
            output::format_snapshot(&snapshot, output::OutputFormat::Markdown, cli.pretty)?
        }
        OutputFormat::Request => request_json(cli, snapshot)?,
        OutputFormat::Urls => urls(cli, &snapshot)?,
    };
    print!("{}", out);
    Ok(())
}

fn required_repo_url<'a>(cli: &'a Cli, format: &str) -> Result<&'a str, RepotreeError> {
    cli.repo_url.as_deref().ok_or_else(|| {
        RepotreeError::InvalidRepoUrl(format!("--repo-url is required for the {} format", format))
    })
}

fn request_json(cli: &Cli, snapshot: Snapshot) -> Result<String, RepotreeError> {
    let mut session = Session::begin(required_repo_url(cli, "request")?)?;
    session.load(snapshot);
    let mut json = session.generate_request().to_json(cli.pretty)?;
    json.push('\n');
    Ok(json)
}

/// Lists the endpoints a remote load goes through, one `label<TAB>url` per
/// line, ending with the raw files to download for --contents-dir.
fn urls(cli: &Cli, snapshot: &Snapshot) -> Result<String, RepotreeError> {
    let repo = RepoUrl::parse(required_repo_url(cli, "urls")?)?;
    let branch = match (&cli.branch, &cli.repo_info) {
        (Some(branch), _) => branch.clone(),
        (None, Some(input)) => parse_repo_info(&read_input(input)?)?.default_branch,
        (None, None) => {
            return Err(RepotreeError::InvalidRepoUrl(
                "--branch or --repo-info is required for the urls format".into(),
            ));
        }
    };
    let mut out = format!("repo\t{}\ntree\t{}\n", repo.repo_api_url(), repo.tree_api_url(&branch));
    for target in fetch_plan(snapshot, &repo, &branch) {
        out.push_str(&format!("{}\t{}\n", target.path, target.url));
    }
    Ok(out)
}

fn read_downloaded(dir: &Path, path: &str) -> Result<Option<String>, RepotreeError> {
    let file = dir.join(path);
    if !file.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(&file)
        .map(Some)
        .map_err(|e| RepotreeError::Io { path: file, source: e })
}

fn apply_response(repo_url: &str, input: &str, cli: &Cli) -> Result<(), RepotreeError> {
    let response = GenerateResponse::from_json(&read_input(input)?)?;
    let mut session = Session::begin(repo_url)?;
    session.apply_response(&response);
    let written = session.export_readme(&cli.out_dir)?;
    println!("{}", written.display());
    Ok(())
}

fn read_input(source: &str) -> Result<String, RepotreeError> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| RepotreeError::Io {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).map_err(|e| RepotreeError::Io {
            path: PathBuf::from(source),
            source: e,
        })
    }
}
