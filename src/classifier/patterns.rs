use regex::{Regex, RegexBuilder};

use crate::models::BucketKind;

/// File names worth looking at: license texts, readmes, copyright notices,
/// and C/C++ sources or headers.
const RELEVANT_NAMES: &[&str] = &[
    r"licen(s|c)e",
    r"readme",
    r"copyright",
    r"\.h(pp|p)?$",
    r"\.c(pp|p|xx|c)?$",
];

/// Paths that may land in the "other files" bucket.
const SOURCE_PATH: &str = r"\.(c|cpp|cp|cxx|cc|h|hpp|hp)?$";

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Filename filter applied before grouping files into libraries.
#[derive(Debug)]
pub struct RelevanceFilter {
    names: Vec<Regex>,
}

impl RelevanceFilter {
    pub fn new() -> Result<Self, regex::Error> {
        let names = RELEVANT_NAMES
            .iter()
            .map(|p| case_insensitive(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { names })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.names.iter().any(|re| re.is_match(file_name))
    }
}

/// Where a path sits relative to one library's top directory.
#[derive(Debug)]
pub struct LibraryPlacement {
    license: Regex,
    copyright: Regex,
    readme: Regex,
    source: Regex,
}

/// Outcome of [`LibraryPlacement::place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A top-level license, copyright or readme file.
    TopLevel(BucketKind),
    /// A C/C++ source or header anywhere in the library.
    Source,
    Ignored,
}

impl LibraryPlacement {
    pub fn new(library: &str) -> Result<Self, regex::Error> {
        let lib = regex::escape(library);
        Ok(Self {
            license: case_insensitive(&format!("/{lib}/licen(s|c)e"))?,
            copyright: case_insensitive(&format!("/{lib}/copyright"))?,
            readme: case_insensitive(&format!("/{lib}/readme"))?,
            source: case_insensitive(SOURCE_PATH)?,
        })
    }

    pub fn place(&self, path: &str) -> Placement {
        if self.license.is_match(path) || self.copyright.is_match(path) {
            Placement::TopLevel(BucketKind::License)
        } else if self.readme.is_match(path) {
            Placement::TopLevel(BucketKind::Readme)
        } else if self.source.is_match(path) {
            Placement::Source
        } else {
            Placement::Ignored
        }
    }
}
