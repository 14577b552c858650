//! Textual version pattern catalogue
//!
//! Handles name formats such as:
//! - `1.2.3`, `1.2.3.4`, `1.2.3rc4`, `1.2.3.rc4`, `1.2.3-4`
//! - `libfoo1.2.3`, `GTK_3_24_5`, `release-1-2-3`
//! - `1.2`, `1-2`, `1_2`, `v1.2`, `release-1-2`, `gtk_1_2`
//! - `42`, `v42`
//! - `1.2beta`
//!
//! Rules are tried in catalogue order and the first match wins, so the
//! more constrained forms must stay ahead of the looser ones.

use super::ParsedVersion;
use regex::Regex;
use std::sync::LazyLock;

/// Branches under this prefix are never versions
const WIP_PREFIX: &str = "wip/";

/// How many numeric levels a rule captures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `MAJOR`
    Major,
    /// `MAJOR<sep>MINOR`
    MajorMinor,
    /// `MAJOR<sep>MINOR<sep>REVISION`
    MajorMinorRevision,
}

/// A single entry of the catalogue
#[derive(Debug, Clone, Copy)]
struct Rule {
    shape: Shape,
    /// Separator between the numeric levels
    separator: char,
    /// Literal text between the revision and the RC digits
    rc_separator: Option<&'static str>,
    /// Arbitrary text may precede the version
    prefix: bool,
    /// Arbitrary text may follow the version
    suffix: bool,
}

impl Rule {
    const fn new(shape: Shape, separator: char) -> Self {
        Self {
            shape,
            separator,
            rc_separator: None,
            prefix: false,
            suffix: false,
        }
    }

    const fn rc(mut self, rc_separator: &'static str) -> Self {
        self.rc_separator = Some(rc_separator);
        self
    }

    const fn prefixed(mut self) -> Self {
        self.prefix = true;
        self
    }

    const fn suffixed(mut self) -> Self {
        self.suffix = true;
        self
    }

    /// Builds the regular expression for this rule
    fn pattern(&self) -> String {
        let separator = regex::escape(&self.separator.to_string());
        let levels = match self.shape {
            Shape::Major => 1,
            Shape::MajorMinor => 2,
            Shape::MajorMinorRevision => 3,
        };

        let mut pattern = vec!["[0-9]+"; levels].join(separator.as_str());
        if let Some(rc_separator) = self.rc_separator {
            pattern.push_str(&regex::escape(rc_separator));
            pattern.push_str("[0-9]+");
        }
        if !self.prefix {
            pattern.insert(0, '^');
        }
        if !self.suffix {
            pattern.push('$');
        }
        pattern
    }

    /// Converts the matched span into a version
    ///
    /// Returns None when a level does not fit in a `u64`.
    fn extract(&self, matched: &str) -> Option<ParsedVersion> {
        let (levels, rc) = match self.rc_separator {
            Some(rc_separator) => {
                let pos = matched.rfind(rc_separator)?;
                let rc = matched[pos + rc_separator.len()..].parse().ok()?;
                (&matched[..pos], Some(rc))
            }
            None => (matched, None),
        };

        let numbers: Vec<u64> = levels
            .split(self.separator)
            .map(str::parse)
            .collect::<Result<_, _>>()
            .ok()?;

        match (self.shape, numbers.as_slice()) {
            (Shape::Major, &[major]) => Some(ParsedVersion::new(Some(major), None, None, rc)),
            (Shape::MajorMinor, &[major, minor]) => {
                Some(ParsedVersion::new(Some(major), Some(minor), None, rc))
            }
            (Shape::MajorMinorRevision, &[major, minor, revision]) => Some(ParsedVersion::new(
                Some(major),
                Some(minor),
                Some(revision),
                rc,
            )),
            _ => None,
        }
    }
}

use Shape::{Major, MajorMinor, MajorMinorRevision};

/// The ordered catalogue; reordering changes results
const CATALOGUE: [Rule; 17] = [
    // MAJOR.MINOR.REVISION.RC
    Rule::new(MajorMinorRevision, '.').rc("."),
    // MAJOR.MINOR.REVISION
    Rule::new(MajorMinorRevision, '.'),
    // MAJOR.MINOR.REVISIONrcXX
    Rule::new(MajorMinorRevision, '.').rc("rc"),
    // MAJOR.MINOR.REVISION.rcXX
    Rule::new(MajorMinorRevision, '.').rc(".rc"),
    // MAJOR.MINOR.REVISION-XX
    Rule::new(MajorMinorRevision, '.').rc("-"),
    // aaaaMAJOR.MINOR.REVISION
    Rule::new(MajorMinorRevision, '.').prefixed(),
    // aaaaMAJOR_MINOR_REVISION
    Rule::new(MajorMinorRevision, '_').prefixed(),
    // aaaaMAJOR-MINOR-REVISION
    Rule::new(MajorMinorRevision, '-').prefixed(),
    // MAJOR.MINOR
    Rule::new(MajorMinor, '.'),
    // MAJOR-MINOR
    Rule::new(MajorMinor, '-'),
    // MAJOR_MINOR
    Rule::new(MajorMinor, '_'),
    // aaaaMAJOR.MINOR
    Rule::new(MajorMinor, '.').prefixed(),
    // aaaaMAJOR-MINOR
    Rule::new(MajorMinor, '-').prefixed(),
    // aaaaMAJOR_MINOR
    Rule::new(MajorMinor, '_').prefixed(),
    // MAJOR
    Rule::new(Major, '.'),
    // aaaaMAJOR
    Rule::new(Major, '.').prefixed(),
    // MAJOR.MINORaaaa
    Rule::new(MajorMinor, '.').suffixed(),
];

static COMPILED: LazyLock<Vec<(Rule, Regex)>> = LazyLock::new(|| {
    CATALOGUE
        .iter()
        .map(|rule| (*rule, Regex::new(&rule.pattern()).unwrap()))
        .collect()
});

/// Parse a tag or branch name into a version
///
/// Names under `wip/`, names matching no pattern and names whose winning
/// rule holds a level too large for a `u64` yield an invalid version with
/// every level absent.
pub fn parse(name: &str) -> ParsedVersion {
    first_match(name)
        .map(|(_, version)| version)
        .unwrap_or_else(ParsedVersion::invalid)
}

/// Returns the catalogue index of the winning rule together with its result
fn first_match(name: &str) -> Option<(usize, ParsedVersion)> {
    if name.starts_with(WIP_PREFIX) {
        return None;
    }

    COMPILED.iter().enumerate().find_map(|(index, (rule, re))| {
        let matched = re.find(name)?;
        let version = rule
            .extract(matched.as_str())
            .unwrap_or_else(ParsedVersion::invalid);
        Some((index, version))
    })
}
