//! Font discovery and loading for report rendering.
//!
//! `genpdf` needs real TrueType files for glyph metrics. Directories are searched in this order and
//! the first complete family wins:
//!
//! 1. `TAXI_REPORT_FONTS_DIR`,
//! 2. `assets/fonts` next to the running executable,
//! 3. `assets/fonts` in the crate manifest directory,
//! 4. well-known system font directories (Liberation Sans, then DejaVu Sans).

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use log::{debug, warn};

/// Environment variable pointing at a directory with the bundled font files.
pub const FONTS_DIR_ENV: &str = "TAXI_REPORT_FONTS_DIR";

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "LiberationSans";

/// File names of the four styles of one font family.
struct FamilyFiles {
    name: &'static str,
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

impl FamilyFiles {
    fn all(&self) -> [&'static str; 4] {
        [self.regular, self.bold, self.italic, self.bold_italic]
    }
}

const BUNDLED_FAMILY: FamilyFiles = FamilyFiles {
    name: DEFAULT_FONT_FAMILY_NAME,
    regular: "LiberationSans-Regular.ttf",
    bold: "LiberationSans-Bold.ttf",
    italic: "LiberationSans-Italic.ttf",
    bold_italic: "LiberationSans-BoldItalic.ttf",
};

const DEJAVU_FAMILY: FamilyFiles = FamilyFiles {
    name: "DejaVuSans",
    regular: "DejaVuSans.ttf",
    bold: "DejaVuSans-Bold.ttf",
    italic: "DejaVuSans-Oblique.ttf",
    bold_italic: "DejaVuSans-BoldOblique.ttf",
};

const SYSTEM_FONT_DIRECTORIES: &[(&str, &FamilyFiles)] = &[
    ("/usr/share/fonts/truetype/liberation", &BUNDLED_FAMILY),
    ("/usr/share/fonts/truetype/liberation2", &BUNDLED_FAMILY),
    ("/usr/share/fonts/liberation", &BUNDLED_FAMILY),
    ("/usr/share/fonts/liberation-sans", &BUNDLED_FAMILY),
    ("/usr/share/fonts/TTF", &BUNDLED_FAMILY),
    ("/usr/share/fonts/truetype/dejavu", &DEJAVU_FAMILY),
    ("/usr/share/fonts/dejavu", &DEJAVU_FAMILY),
    ("/usr/share/fonts/TTF", &DEJAVU_FAMILY),
];

/// Directory holding the fonts shipped alongside the crate sources.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn bundled_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env::var_os(FONTS_DIR_ENV) {
        if !path.is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = bundled_fonts_source_dir();
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_files(directory: &Path, family: &FamilyFiles) -> Vec<&'static str> {
    family
        .all()
        .into_iter()
        .filter(|name| !directory.join(name).is_file())
        .collect()
}

fn all_candidates() -> Vec<(PathBuf, &'static FamilyFiles)> {
    bundled_directory_candidates()
        .into_iter()
        .map(|path| (path, &BUNDLED_FAMILY))
        .chain(
            SYSTEM_FONT_DIRECTORIES
                .iter()
                .map(|(path, family)| (PathBuf::from(path), *family)),
        )
        .collect()
}

fn resolve_font_source() -> Result<(PathBuf, &'static FamilyFiles), Error> {
    let mut attempts = Vec::new();

    for (directory, family) in all_candidates() {
        if !directory.is_dir() {
            attempts.push(format!("{} (directory missing)", directory.display()));
            continue;
        }

        let missing = missing_files(&directory, family);
        if missing.is_empty() {
            debug!("using font family '{}' from {}", family.name, directory.display());
            return Ok((directory, family));
        }

        attempts.push(format!(
            "{} (missing {} files [{}])",
            directory.display(),
            family.name,
            missing.join(", ")
        ));
    }

    Err(Error::new(
        format!(
            "Unable to locate a usable font family. Checked: {}. See assets/fonts/README.md or set {}.",
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn load_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn load_family(directory: &Path, family: &FamilyFiles) -> Result<FontFamily<FontData>, Error> {
    Ok(FontFamily {
        regular: load_font(directory, family.regular, "regular")?,
        bold: load_font(directory, family.bold, "bold")?,
        italic: load_font(directory, family.italic, "italic")?,
        bold_italic: load_font(directory, family.bold_italic, "bold italic")?,
    })
}

/// Whether an error means no font files could be found, as opposed to a broken font file.
pub fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Loads the first complete font family found on the search path.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    let (directory, family) = resolve_font_source()?;
    if family.name != DEFAULT_FONT_FAMILY_NAME {
        warn!(
            "Bundled '{}' fonts unavailable; falling back to '{}' from {}.",
            DEFAULT_FONT_FAMILY_NAME,
            family.name,
            directory.display()
        );
    }
    load_family(&directory, family)
}

/// Indicates whether any complete font family is present on disk.
pub fn default_fonts_available() -> bool {
    resolve_font_source().is_ok()
}
