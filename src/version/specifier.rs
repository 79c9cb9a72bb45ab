//! PEP 440 versions and specifier sets.
//!
//! Only the parts needed to check an interpreter version against a
//! `requires-python` constraint are implemented: parsing, ordering, and
//! the eight comparison operators (including `.*` wildcards).

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static RE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?(?:(?P<epoch>[0-9]+)!)?(?P<release>[0-9]+(?:\.[0-9]+)*)(?:[-_.]?(?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)[-_.]?(?P<pre_n>[0-9]+)?)?(?:-(?P<post_n1>[0-9]+)|[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?)?(?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?(?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?$",
    )
    .unwrap()
});

static RE_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<op>~=|===|==|!=|<=|>=|<|>)\s*(?P<version>[^\s,]+)\s*$").unwrap()
});

/// Errors from parsing versions or specifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecifierError {
    #[error("invalid version: '{0}'")]
    InvalidVersion(String),

    #[error("invalid version specifier: '{0}'")]
    InvalidSpecifier(String),
}

/// Pre-release phase, ordered alpha < beta < release candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreRelease {
    Alpha,
    Beta,
    Rc,
}

/// A parsed PEP 440 version.
#[derive(Debug, Clone)]
pub struct Version {
    pub epoch: u64,
    pub release: Vec<u64>,
    pub pre: Option<(PreRelease, u64)>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
    pub local: Option<String>,
}

/// Where the pre-release part sorts relative to the final release.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    DevOnly,
    Pre(PreRelease, u64),
    Final,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum DevKey {
    Dev(u64),
    None,
}

impl Version {
    /// Whether this is a pre-release or development release.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// The same version without its local label.
    fn public(&self) -> Version {
        Version {
            local: None,
            ..self.clone()
        }
    }

    fn pre_key(&self) -> PreKey {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(_)) => PreKey::DevOnly,
            (Some((phase, n)), _, _) => PreKey::Pre(phase, n),
            _ => PreKey::Final,
        }
    }

    fn dev_key(&self) -> DevKey {
        self.dev.map_or(DevKey::None, DevKey::Dev)
    }

    fn release_segment(&self, idx: usize) -> u64 {
        self.release.get(idx).copied().unwrap_or(0)
    }

    fn cmp_release(&self, other: &Version) -> Ordering {
        let len = self.release.len().max(other.release.len());
        (0..len)
            .map(|i| self.release_segment(i).cmp(&other.release_segment(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Whether the zero-padded release starts with `prefix`.
    fn release_starts_with(&self, prefix: &[u64]) -> bool {
        prefix
            .iter()
            .enumerate()
            .all(|(i, seg)| self.release_segment(i) == *seg)
    }
}

impl FromStr for Version {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        // Some distribution builds report versions like "3.12.1+"
        let candidate = lowered.strip_suffix('+').unwrap_or(&lowered);

        let caps = RE_VERSION
            .captures(candidate)
            .ok_or_else(|| SpecifierError::InvalidVersion(s.to_string()))?;

        let number = |name: &str| -> Result<Option<u64>, SpecifierError> {
            caps.name(name)
                .map(|m| {
                    m.as_str()
                        .parse::<u64>()
                        .map_err(|_| SpecifierError::InvalidVersion(s.to_string()))
                })
                .transpose()
        };

        let release = caps
            .name("release")
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split('.')
            .map(|seg| {
                seg.parse::<u64>()
                    .map_err(|_| SpecifierError::InvalidVersion(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match caps.name("pre_l").map(|m| m.as_str()) {
            Some(label) => {
                let phase = match label {
                    "a" | "alpha" => PreRelease::Alpha,
                    "b" | "beta" => PreRelease::Beta,
                    _ => PreRelease::Rc,
                };
                Some((phase, number("pre_n")?.unwrap_or(0)))
            }
            None => None,
        };

        let post = match number("post_n1")? {
            Some(n) => Some(n),
            None if caps.name("post_l").is_some() => Some(number("post_n2")?.unwrap_or(0)),
            None => None,
        };

        let dev = if caps.name("dev_l").is_some() {
            Some(number("dev_n")?.unwrap_or(0))
        } else {
            None
        };

        Ok(Version {
            epoch: number("epoch")?.unwrap_or(0),
            release,
            pre,
            post,
            dev,
            local: caps.name("local").map(|m| m.as_str().to_string()),
        })
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.cmp_release(other))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((phase, n)) = self.pre {
            let label = match phase {
                PreRelease::Alpha => "a",
                PreRelease::Beta => "b",
                PreRelease::Rc => "rc",
            };
            write!(f, "{}{}", label, n)?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{}", n)?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{}", n)?;
        }
        if let Some(local) = &self.local {
            write!(f, "+{}", local)?;
        }
        Ok(())
    }
}

/// Comparison operator of a single specifier clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Compatible,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    Arbitrary,
}

impl Operator {
    fn parse(op: &str) -> Option<Self> {
        Some(match op {
            "~=" => Self::Compatible,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<=" => Self::LessEqual,
            ">=" => Self::GreaterEqual,
            "<" => Self::Less,
            ">" => Self::Greater,
            "===" => Self::Arbitrary,
            _ => return None,
        })
    }
}

/// A single clause such as `>=3.8` or `==3.*`.
#[derive(Debug, Clone)]
pub struct Specifier {
    operator: Operator,
    raw_version: String,
    version: Option<Version>,
    wildcard: bool,
}

impl Specifier {
    /// The clause's operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Check a candidate version against this clause.
    pub fn contains(&self, candidate: &Version) -> bool {
        let Some(spec) = &self.version else {
            // Only `===` keeps an unparsed version
            return candidate.to_string() == self.raw_version.to_lowercase();
        };

        match self.operator {
            Operator::Arbitrary => candidate.to_string() == spec.to_string(),
            Operator::Equal if self.wildcard => {
                candidate.epoch == spec.epoch && candidate.release_starts_with(&spec.release)
            }
            Operator::NotEqual if self.wildcard => {
                !(candidate.epoch == spec.epoch && candidate.release_starts_with(&spec.release))
            }
            Operator::Equal => self.matches_exactly(candidate, spec),
            Operator::NotEqual => !self.matches_exactly(candidate, spec),
            Operator::LessEqual => candidate.public() <= *spec,
            Operator::GreaterEqual => candidate.public() >= *spec,
            Operator::Less => {
                candidate.public() < *spec
                    && (spec.is_prerelease()
                        || !(candidate.is_prerelease() && candidate.cmp_release(spec).is_eq()))
            }
            Operator::Greater => {
                candidate.public() > *spec
                    && (spec.post.is_some()
                        || !(candidate.post.is_some() && candidate.cmp_release(spec).is_eq()))
            }
            Operator::Compatible => {
                let prefix = &spec.release[..spec.release.len() - 1];
                candidate.public() >= *spec
                    && candidate.epoch == spec.epoch
                    && candidate.release_starts_with(prefix)
            }
        }
    }

    fn matches_exactly(&self, candidate: &Version, spec: &Version) -> bool {
        if spec.local.is_some() {
            candidate == spec
        } else {
            candidate.public() == *spec
        }
    }
}

impl FromStr for Specifier {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SpecifierError::InvalidSpecifier(s.trim().to_string());
        let caps = RE_SPECIFIER.captures(s).ok_or_else(invalid)?;
        let operator = caps
            .name("op")
            .and_then(|m| Operator::parse(m.as_str()))
            .ok_or_else(invalid)?;
        let raw_version = caps
            .name("version")
            .map(|m| m.as_str().to_string())
            .ok_or_else(invalid)?;

        if operator == Operator::Arbitrary {
            return Ok(Self {
                operator,
                version: raw_version.parse().ok(),
                raw_version,
                wildcard: false,
            });
        }

        let (version_text, wildcard) = match raw_version.strip_suffix(".*") {
            Some(prefix) if matches!(operator, Operator::Equal | Operator::NotEqual) => {
                (prefix, true)
            }
            Some(_) => return Err(invalid()),
            None => (raw_version.as_str(), false),
        };

        let version: Version = version_text.parse().map_err(|_| invalid())?;
        if operator == Operator::Compatible && version.release.len() < 2 {
            return Err(invalid());
        }
        if wildcard && (version.is_prerelease() || version.post.is_some()) {
            return Err(invalid());
        }

        Ok(Self {
            operator,
            raw_version,
            version: Some(version),
            wildcard,
        })
    }
}

/// A comma-separated set of specifiers; a version must satisfy all of them.
#[derive(Debug, Clone, Default)]
pub struct SpecifierSet {
    specifiers: Vec<Specifier>,
}

impl SpecifierSet {
    /// The clauses in source order.
    pub fn specifiers(&self) -> &[Specifier] {
        &self.specifiers
    }

    /// Check a candidate version against every clause.
    ///
    /// Pre-release candidates are accepted: the interpreter already exists,
    /// so only its position relative to the bounds matters.
    pub fn contains(&self, candidate: &Version) -> bool {
        self.specifiers.iter().all(|spec| spec.contains(candidate))
    }
}

impl FromStr for SpecifierSet {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let specifiers = s
            .split(',')
            .filter(|clause| !clause.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { specifiers })
    }
}
