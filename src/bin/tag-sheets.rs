//! Tag Sheets CLI tool
//!
//! A command-line tool for printing foldable name tags from plain text lists.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use tag_sheets::entries::RolePolicy;
use tag_sheets::generate::{generate_tag_sheet, TagSheetOptions};
use tag_sheets::pdf::extract_metadata;

/// Tag Sheets - Print foldable, double-sided name tags
#[derive(Parser)]
#[command(name = "tag-sheets")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Use names.txt, roles.txt and the default assets in the current directory
    tag-sheets

    # Pick the input lists and output file
    tag-sheets render --names guests.txt --roles guest-roles.txt -o guests.pdf

    # Allow a roles file that is shorter than the names file
    tag-sheets render --pad-roles --open

    # Check a generated sheet
    tag-sheets info namnlappar.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the name tag sheet (the default)
    Render(RenderArgs),

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Names file, one name per line
    #[arg(long, default_value = "names.txt")]
    names: PathBuf,

    /// Roles file, one role per line, in the same order as the names
    #[arg(long, default_value = "roles.txt")]
    roles: PathBuf,

    /// Output PDF file path
    #[arg(short, long, default_value = "namnlappar.pdf")]
    output: PathBuf,

    /// Regular TrueType face of the tag font family
    #[arg(long, default_value = "Fonts/Exo/Exo-Regular.ttf")]
    regular_font: PathBuf,

    /// Bold TrueType face used for names and roles
    #[arg(long, default_value = "Fonts/Exo/Exo-Bold.ttf")]
    font: PathBuf,

    /// Logo image (PNG or JPEG) drawn on every tag
    #[arg(long, default_value = "au-logotyp.jpg")]
    logo: PathBuf,

    /// Document title stored in the PDF
    #[arg(long)]
    title: Option<String>,

    /// Starting name size in whole points; long names shrink from here
    #[arg(long, default_value_t = 24.0, value_parser = parse_whole_size)]
    name_size: f32,

    /// Role size in points
    #[arg(long, default_value_t = 14.0, value_parser = parse_size)]
    role_size: f32,

    /// Smallest size a long name may shrink to
    #[arg(long, default_value_t = 1.0, value_parser = parse_size, conflicts_with = "no_size_floor")]
    min_name_size: f32,

    /// Keep shrinking long names with no lower limit
    #[arg(long)]
    no_size_floor: bool,

    /// Give names without a role a blank one instead of failing
    #[arg(long)]
    pad_roles: bool,

    /// Open the output file after creation
    #[arg(long)]
    open: bool,
}

/// Parse a positive font size in points
fn parse_size(s: &str) -> Result<f32, String> {
    let size: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !size.is_finite() || size <= 0.0 {
        return Err(format!("size must be greater than zero, got {}", s));
    }
    Ok(size)
}

/// Parse a positive font size that is a whole number of points
///
/// Names shrink one point at a time, so a whole starting size keeps every
/// tried size whole.
fn parse_whole_size(s: &str) -> Result<f32, String> {
    let size = parse_size(s)?;
    if size.fract() != 0.0 {
        return Err(format!("size must be a whole number of points, got {}", s));
    }
    Ok(size)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render(args)) => cmd_render(args),
        Some(Commands::Info { input }) => cmd_info(&input),
        None => cmd_render(RenderArgs::parse_defaults()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

impl RenderArgs {
    /// Render arguments as if given on an empty command line
    fn parse_defaults() -> Self {
        #[derive(Parser)]
        struct Defaults {
            #[command(flatten)]
            render: RenderArgs,
        }
        Defaults::parse_from(["tag-sheets"]).render
    }

    fn into_options(self) -> TagSheetOptions {
        let mut options = TagSheetOptions {
            names_path: self.names,
            roles_path: self.roles,
            output_path: self.output,
            regular_font_path: self.regular_font,
            font_path: self.font,
            logo_path: self.logo,
            role_policy: if self.pad_roles { RolePolicy::PadBlank } else { RolePolicy::Strict },
            ..Default::default()
        };
        options.style.name_size = self.name_size;
        options.style.role_size = self.role_size;
        options.style.min_name_size = (!self.no_size_floor).then_some(self.min_name_size);
        if let Some(title) = self.title {
            options.info.title = title;
        }
        options
    }
}

/// Open a file with the system default application
fn open_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Render the tag sheet
fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let open = args.open;
    let options = args.into_options();

    eprintln!(
        "Making name tags from {} and {}...",
        options.names_path.display(),
        options.roles_path.display()
    );

    let summary = generate_tag_sheet(&options)
        .with_context(|| format!("could not create {}", options.output_path.display()))?;

    for name in &summary.overflowing {
        eprintln!("Warning: \"{}\" does not fit on its tag", name);
    }
    eprintln!(
        "Wrote {} tags for {} names on {} pages to: {}",
        summary.tags,
        summary.entries,
        summary.pages,
        options.output_path.display()
    );

    if open {
        open_file(&options.output_path)?;
    }

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: &Path) -> anyhow::Result<()> {
    let metadata = extract_metadata(input)
        .with_context(|| format!("could not read {}", input.display()))?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(producer) = metadata.producer {
        println!("Producer: {}", producer);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(args: &[&str]) -> Result<RenderArgs, clap::Error> {
        let argv = ["tag-sheets", "render"].into_iter().chain(args.iter().copied());
        match Cli::try_parse_from(argv)?.command {
            Some(Commands::Render(args)) => Ok(args),
            _ => panic!("expected the render subcommand"),
        }
    }

    #[test]
    fn test_defaults_match_fixed_file_names() {
        let options = RenderArgs::parse_defaults().into_options();
        assert!(options.regular_font_path.ends_with("Fonts/Exo/Exo-Regular.ttf"));
        assert!(options.font_path.ends_with("Fonts/Exo/Exo-Bold.ttf"));
        assert_eq!(options.style.name_size, 24.0);
        assert_eq!(options.style.min_name_size, Some(1.0));
    }

    #[test]
    fn test_regular_font_flag() {
        let options = render(&["--regular-font", "Light.ttf"]).unwrap().into_options();
        assert_eq!(options.regular_font_path, PathBuf::from("Light.ttf"));
    }

    #[test]
    fn test_name_size_must_be_positive_and_whole() {
        assert_eq!(render(&["--name-size", "30"]).unwrap().name_size, 30.0);
        assert!(render(&["--name-size", "0"]).is_err());
        assert!(render(&["--name-size", "-4"]).is_err());
        assert!(render(&["--name-size", "20.5"]).is_err());
        assert!(render(&["--name-size", "big"]).is_err());
    }

    #[test]
    fn test_role_and_floor_sizes_must_be_positive() {
        assert_eq!(render(&["--role-size", "12.5"]).unwrap().role_size, 12.5);
        assert!(render(&["--role-size", "0"]).is_err());
        assert!(render(&["--min-name-size", "-1"]).is_err());
        assert!(render(&["--min-name-size", "2", "--no-size-floor"]).is_err());
    }
}
