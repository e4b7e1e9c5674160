//! csarrange - Declarative arranger for C# source code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use csarrange::process::arrange_source;
use csarrange::{parse_args, CliArgs, Config};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

/// C# file extensions to process
const CSHARP_EXTENSIONS: &[&str] = &["cs"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Outcome of arranging one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    Changed,
    Unchanged,
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        // Process stdin - use current directory for config discovery
        let config = build_config(&args, None)?;
        return process_stdin(&config);
    }

    // For explicit config files, one config serves all files; with
    // auto-discovery each file may resolve its own config
    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process
    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No C# files found to arrange.");
        }
        return Ok(());
    }

    let changed_count = AtomicUsize::new(0);
    let unchanged_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    let process = |path: &PathBuf| {
        let file_result = if let Some(config) = &base_config {
            process_single_file(path, config, &args)
        } else {
            match build_config(&args, Some(path)) {
                Ok(config) => process_single_file(path, &config, &args),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(FileOutcome::Changed) => {
                changed_count.fetch_add(1, Ordering::Relaxed);
            }
            Ok(FileOutcome::Unchanged) => {
                unchanged_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error arranging {}: {}", path.display(), e);
            }
        }
    };

    // Sequential for stdout output (ordering matters) or --jobs 1
    let use_sequential = args.stdout || args.jobs == Some(1);
    if use_sequential {
        files.iter().for_each(process);
    } else {
        files.par_iter().for_each(&process);
    }

    let changed = changed_count.load(Ordering::Relaxed);
    let unchanged = unchanged_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("{changed} files arranged, {unchanged} unchanged.");
        } else {
            eprintln!("{changed} files arranged, {unchanged} unchanged, {errors} errors.");
        }
    }

    if errors > 0 || (args.check && changed > 0) {
        std::process::exit(1);
    }

    Ok(())
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        // Auto-discover config files from parent directories
        if args.debug {
            let discovered = Config::discover_config_files(path);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", path.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", path.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(path)
    } else {
        // No path provided, use current directory for discovery
        Config::from_discovered_files(&std::env::current_dir().unwrap_or_default())
    };

    // Override with CLI arguments
    if args.tabs {
        config.tab_style = "tabs".to_string();
    }
    if let Some(spaces) = args.spaces_per_tab {
        config.spaces_per_tab = spaces;
    }
    if args.no_regions {
        config.regions_enabled = false;
    }
    if args.no_inline_auto_properties {
        config.inline_auto_properties = false;
    }

    if args.debug {
        eprintln!("[DEBUG] Configuration:");
        eprintln!("[DEBUG]   tab_style: {}", config.tab_style);
        eprintln!("[DEBUG]   spaces_per_tab: {}", config.spaces_per_tab);
        eprintln!("[DEBUG]   regions_enabled: {}", config.regions_enabled);
        eprintln!(
            "[DEBUG]   inline_auto_properties: {}",
            config.inline_auto_properties
        );
        eprintln!("[DEBUG]   rules: {}", config.rules.len());
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Recursive directory traversal; symlink loops surface as
                // errors from WalkDir and are skipped
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_csharp_file(path)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_csharp_file(&path)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check if a file has a C# extension
fn is_csharp_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CSHARP_EXTENSIONS.contains(&ext))
}

/// Process a single file
fn process_single_file(
    path: &PathBuf,
    config: &Config,
    args: &CliArgs,
) -> anyhow::Result<FileOutcome> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                size_mb,
                limit_mb
            );
        }
        return Ok(FileOutcome::Unchanged);
    }

    // Read input file into memory
    let mut file_contents = Vec::new();
    File::open(path)?.read_to_end(&mut file_contents)?;

    // Arrange the file
    let reader = BufReader::new(Cursor::new(&file_contents));
    let mut output = Vec::new();
    arrange_source(reader, &mut output, config)?;

    // Only rewrite files whose contents actually changed
    if output == file_contents {
        return Ok(FileOutcome::Unchanged);
    }

    if args.stdout {
        io::stdout().write_all(&output)?;
    } else if args.check {
        if !args.silent {
            println!("would arrange: {}", path.display());
        }
    } else {
        if !args.silent {
            eprintln!("Arranging: {}", path.display());
        }
        std::fs::write(path, &output)?;
    }

    Ok(FileOutcome::Changed)
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config) -> anyhow::Result<()> {
    // Read all input from stdin
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    // Arrange the input
    let reader = BufReader::new(Cursor::new(&stdin_contents));
    let mut output = Vec::new();
    arrange_source(reader, &mut output, config)?;

    // Always output to stdout when reading from stdin
    io::stdout().write_all(&output)?;

    Ok(())
}

fn print_usage() {
    println!(
        "csarrange v{} - C# source code arranger",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Parses C# source, reorders and regroups declarations per configuration,");
    println!("and rewrites the file preserving comments and formatting.");
    println!();
    println!("Usage:");
    println!("  csarrange [OPTIONS] <FILE>...");
    println!("  csarrange [OPTIONS] -r <DIRECTORY>");
    println!("  csarrange [OPTIONS] -              # Read from stdin");
    println!("  cat File.cs | csarrange            # Pipe input");
    println!();
    println!("Examples:");
    println!("  csarrange File.cs               # Arrange single file in-place");
    println!("  csarrange -r src/               # Recursively arrange directory");
    println!("  csarrange --check -r src/       # Report files that would change");
    println!("  csarrange --stdout File.cs      # Output to stdout");
    println!("  csarrange -i 2 File.cs          # Use 2-space indent");
    println!();
    println!("Options:");
    println!("  -t, --tabs                      Indent with tabs");
    println!("  -i, --spaces-per-tab <NUM>      Spaces per indent level [default: 4]");
    println!("  --no-regions                    Do not emit #region wrappers");
    println!("  --no-inline-auto-properties     Keep multi-line auto-properties multi-line");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  -s, --stdout                    Output to stdout");
    println!("  --check                         Report would-be changes; exit nonzero if any");
    println!("  -c, --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  -j, --jobs <NUM>                Parallel jobs (0=auto, 1=sequential)");
    println!("  -S, --silent                    Silent mode");
    println!("  -D, --debug                     Enable debug output");
    println!("  -h, --help                      Print help");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for csarrange.toml in parent directories");
    println!("  starting from the file being arranged up to the root directory.");
    println!("  Also checks csarrange.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
