//! Line classification for Gemfiles
//!
//! Every physical line is either a gem declaration or opaque text. A
//! declaration looks like
//!
//! ```text
//! <indent>gem "name"[, "constraint"]*[, options][ # comment]
//! ```
//!
//! and keeps its raw text alongside the parsed pieces, so rewriting a
//! declaration touches only the bytes that change.

use crate::domain::Dependency;
use regex::Regex;
use std::sync::LazyLock;

// `gem "name"` / `gem 'name'`
static GEM_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*gem\s*(?:"([^"]+)"|'([^']+)')"#).unwrap());

// `, "constraint"` following the name or a previous constraint
static CONSTRAINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*,\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

// git/path sources: `github: "org/repo"`, `:git => "..."`, `path: "../lib"`
static SOURCE_OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s,{(]):?(?:git|github|gitlab|bitbucket|path)(?::|\s*=>)").unwrap()
});

// Embedded MAJOR.MINOR.PATCH token
static VERSION_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").unwrap());

/// One physical line of a Gemfile, terminator included
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine {
    /// A `gem "name", ...` line
    Declaration(GemDeclaration),
    /// Anything else: comments, blank lines, `source`, `group ... do`, `end`
    Opaque(String),
}

impl ManifestLine {
    /// Classify a single line (with or without its terminator)
    pub fn parse(raw: &str) -> Self {
        match GemDeclaration::parse(raw) {
            Some(declaration) => ManifestLine::Declaration(declaration),
            None => ManifestLine::Opaque(raw.to_string()),
        }
    }

    /// Split text into lines, keeping each line's terminator
    pub fn parse_all(content: &str) -> Vec<Self> {
        content.split_inclusive('\n').map(Self::parse).collect()
    }

    /// The exact text of this line
    pub fn raw(&self) -> &str {
        match self {
            ManifestLine::Declaration(declaration) => declaration.raw(),
            ManifestLine::Opaque(raw) => raw,
        }
    }

    pub fn as_declaration(&self) -> Option<&GemDeclaration> {
        match self {
            ManifestLine::Declaration(declaration) => Some(declaration),
            ManifestLine::Opaque(_) => None,
        }
    }
}

/// A parsed `gem` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemDeclaration {
    raw: String,
    body_len: usize,
    name: String,
    constraints: Vec<String>,
    options: Option<String>,
    /// Byte offset just past the closing quote of the name
    name_end: usize,
    /// Byte offset just past the closing quote of the last constraint
    constraints_end: usize,
    source_controlled: bool,
    continued: bool,
}

impl GemDeclaration {
    /// Parse a declaration line, or `None` if the line is not one
    pub fn parse(raw: &str) -> Option<Self> {
        let body = strip_terminator(raw);

        let head = GEM_HEAD_RE.captures(body)?;
        let name = head.get(1).or_else(|| head.get(2))?.as_str().to_string();
        let name_end = head.get(0)?.end();

        let mut constraints = Vec::new();
        let mut constraints_end = name_end;
        while let Some(caps) = CONSTRAINT_RE.captures(&body[constraints_end..]) {
            let end = constraints_end + caps.get(0)?.end();
            if !ends_clause(&body[end..]) {
                break;
            }
            let value = caps.get(1).or_else(|| caps.get(2))?.as_str();
            constraints.push(value.to_string());
            constraints_end = end;
        }

        let rest = body[constraints_end..].trim_start();
        let options = if rest.is_empty() || rest.starts_with('#') {
            None
        } else if let Some(options) = rest.strip_prefix(',') {
            Some(options.trim().to_string()).filter(|o| !o.is_empty())
        } else {
            return None;
        };

        let source_controlled = options
            .as_deref()
            .is_some_and(|o| SOURCE_OPTION_RE.is_match(o));
        let continued = without_comment(rest).trim_end().ends_with(',');

        Some(Self {
            raw: raw.to_string(),
            body_len: body.len(),
            name,
            constraints,
            options,
            name_end,
            constraints_end,
            source_controlled,
            continued,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quoted version constraints in declaration order, quotes removed
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    /// The first version constraint
    pub fn constraint(&self) -> Option<&str> {
        self.constraints.first().map(String::as_str)
    }

    /// Raw text after the constraints, without the leading comma
    pub fn options(&self) -> Option<&str> {
        self.options.as_deref()
    }

    /// Uses a git or path source and so carries no registry version
    pub fn is_source_controlled(&self) -> bool {
        self.source_controlled
    }

    /// Ends with a comma and continues on the following line
    pub fn is_continued(&self) -> bool {
        self.continued
    }

    /// Has anything after the name separated by a comma
    pub fn has_clauses(&self) -> bool {
        !self.constraints.is_empty() || self.options.is_some() || self.continued
    }

    pub fn to_dependency(&self) -> Dependency {
        Dependency::new(
            self.name.clone(),
            self.constraint().map(str::to_string),
            self.options.clone(),
        )
    }

    fn body(&self) -> &str {
        &self.raw[..self.body_len]
    }

    fn terminator(&self) -> &str {
        &self.raw[self.body_len..]
    }

    /// Text with everything from the first comma after the name removed
    pub fn without_clauses(&self) -> String {
        let body = self.body();
        match body[self.name_end..].find(',') {
            Some(offset) => format!("{}{}", &body[..self.name_end + offset], self.terminator()),
            None => self.raw.clone(),
        }
    }

    /// Text with `, "~> <version>"` added after the last constraint
    pub fn with_pessimistic_constraint(&self, version: &str) -> String {
        let body = self.body();
        format!(
            "{}, \"~> {}\"{}{}",
            &body[..self.constraints_end],
            version,
            &body[self.constraints_end..],
            self.terminator()
        )
    }

    /// Text with the first MAJOR.MINOR.PATCH after the name replaced
    pub fn with_version(&self, new_version: &str) -> String {
        let body = self.body();
        match VERSION_TOKEN_RE.find(&body[self.name_end..]) {
            Some(m) => format!(
                "{}{}{}{}",
                &body[..self.name_end + m.start()],
                new_version,
                &body[self.name_end + m.end()..],
                self.terminator()
            ),
            None => self.raw.clone(),
        }
    }
}

fn strip_terminator(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}

// Text before the first `#` outside a quoted string
fn without_comment(text: &str) -> &str {
    let mut quote = None;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(open), _) if c == open => quote = None,
            (None, '#') => return &text[..i],
            _ => {}
        }
    }
    text
}

// A quoted constraint must be followed by another clause, a comment or nothing.
fn ends_clause(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with(',') || rest.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(raw: &str) -> GemDeclaration {
        GemDeclaration::parse(raw).expect("declaration")
    }

    #[test]
    fn test_parse_bare_declaration() {
        let decl = declaration("gem 'pg'\n");
        assert_eq!(decl.name(), "pg");
        assert!(decl.constraints().is_empty());
        assert!(decl.options().is_none());
        assert!(!decl.has_clauses());
    }

    #[test]
    fn test_parse_versioned_declaration() {
        let decl = declaration("gem \"rails\", \"6.1.0\"\n");
        assert_eq!(decl.name(), "rails");
        assert_eq!(decl.constraint(), Some("6.1.0"));
        assert!(decl.options().is_none());
    }

    #[test]
    fn test_parse_multiple_constraints_and_options() {
        let decl = declaration("  gem 'puma', '>= 5.0', '< 7', require: false\n");
        assert_eq!(decl.name(), "puma");
        assert_eq!(decl.constraints(), &[">= 5.0".to_string(), "< 7".to_string()]);
        assert_eq!(decl.options(), Some("require: false"));
        assert!(!decl.is_source_controlled());
    }

    #[test]
    fn test_parse_options_without_constraint() {
        let decl = declaration("gem 'bootsnap', require: false");
        assert!(decl.constraints().is_empty());
        assert_eq!(decl.options(), Some("require: false"));
    }

    #[test]
    fn test_parse_trailing_comment() {
        let decl = declaration("gem 'rack', '2.2.3' # security fix\n");
        assert_eq!(decl.constraint(), Some("2.2.3"));
        assert!(decl.options().is_none());
    }

    #[test]
    fn test_source_controlled_variants() {
        assert!(declaration("gem \"private-lib\", github: \"org/repo\"").is_source_controlled());
        assert!(declaration("gem 'x', :git => 'https://example.com/x.git'").is_source_controlled());
        assert!(declaration("gem 'x', '1.0.0', branch: 'main', git: 'u'").is_source_controlled());
        assert!(declaration("gem 'x', path: '../x'").is_source_controlled());
        assert!(!declaration("gem 'x', require_path: 'lib'").is_source_controlled());
        assert!(!declaration("gem 'github-markup', '4.0.0'").is_source_controlled());
    }

    #[test]
    fn test_continued_declaration() {
        let decl = declaration("gem 'sidekiq', '~> 7.0',\n");
        assert!(decl.is_continued());
        assert_eq!(decl.constraint(), Some("~> 7.0"));
    }

    #[test]
    fn test_comma_in_trailing_comment_is_not_continuation() {
        let decl = declaration("gem 'pg', '1.5.4' # pinned for now, see issue,\n");
        assert!(!decl.is_continued());
        assert_eq!(decl.constraint(), Some("1.5.4"));

        let decl = declaration("gem 'pg', require: false # later,\n");
        assert!(!decl.is_continued());
        assert_eq!(decl.options(), Some("require: false # later,"));
    }

    #[test]
    fn test_continuation_before_comment() {
        assert!(declaration("gem 'sidekiq', # web ui\n").is_continued());
        assert!(declaration("gem 'x', github: 'o/r#main',\n").is_continued());
    }

    #[test]
    fn test_without_comment() {
        assert_eq!(without_comment(", require: false # a, b"), ", require: false ");
        assert_eq!(without_comment(", github: \"o/r#x\","), ", github: \"o/r#x\",");
        assert_eq!(without_comment("# only"), "");
    }

    #[test]
    fn test_non_declarations_are_opaque() {
        for raw in [
            "source 'https://rubygems.org'\n",
            "gemspec\n",
            "# gem 'rails'\n",
            "group :test do\n",
            "gem_group 'x'\n",
            "  gem 'rails' if ENV['RAILS']\n",
            "\n",
        ] {
            assert!(
                matches!(ManifestLine::parse(raw), ManifestLine::Opaque(_)),
                "{raw:?} should be opaque"
            );
        }
    }

    #[test]
    fn test_parse_all_keeps_terminators() {
        let content = "source 'https://rubygems.org'\r\ngem 'rails'\nend";
        let lines = ManifestLine::parse_all(content);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].raw(), "source 'https://rubygems.org'\r\n");
        assert_eq!(lines[1].raw(), "gem 'rails'\n");
        assert_eq!(lines[2].raw(), "end");
        let joined: String = lines.iter().map(ManifestLine::raw).collect();
        assert_eq!(joined, content);
    }

    #[test]
    fn test_without_clauses() {
        let decl = declaration("  gem 'puma', '~> 5.0', require: false\r\n");
        assert_eq!(decl.without_clauses(), "  gem 'puma'\r\n");

        let decl = declaration("gem 'pg'\n");
        assert_eq!(decl.without_clauses(), "gem 'pg'\n");
    }

    #[test]
    fn test_with_pessimistic_constraint_appends_after_constraint() {
        let decl = declaration("gem \"rails\", \"6.1.0\"\n");
        assert_eq!(
            decl.with_pessimistic_constraint("6.1.4"),
            "gem \"rails\", \"6.1.0\", \"~> 6.1.4\"\n"
        );
    }

    #[test]
    fn test_with_pessimistic_constraint_before_options() {
        let decl = declaration("gem \"private-lib\", github: \"org/repo\"\n");
        assert_eq!(
            decl.with_pessimistic_constraint("0.3.1"),
            "gem \"private-lib\", \"~> 0.3.1\", github: \"org/repo\"\n"
        );
    }

    #[test]
    fn test_with_pessimistic_constraint_no_terminator() {
        let decl = declaration("gem 'pg'");
        assert_eq!(decl.with_pessimistic_constraint("1.5.4"), "gem 'pg', \"~> 1.5.4\"");
    }

    #[test]
    fn test_with_version_replaces_first_token_only() {
        let decl = declaration("gem 'nokogiri', '>= 1.13.0', '< 1.16.0'\n");
        assert_eq!(
            decl.with_version("1.15.5"),
            "gem 'nokogiri', '>= 1.15.5', '< 1.16.0'\n"
        );
    }

    #[test]
    fn test_with_version_ignores_digits_in_name() {
        let decl = declaration("gem 'x1.2.3', '~> 1.0.0'\n");
        assert_eq!(decl.with_version("2.0.0"), "gem 'x1.2.3', '~> 2.0.0'\n");
    }

    #[test]
    fn test_with_version_without_token_is_unchanged() {
        let decl = declaration("gem 'rails', '~> 7.1'\n");
        assert_eq!(decl.with_version("7.1.3"), "gem 'rails', '~> 7.1'\n");
    }

    #[test]
    fn test_to_dependency() {
        let dep = declaration("gem 'rails', '~> 6.1.4', require: false").to_dependency();
        assert_eq!(dep.name, "rails");
        assert_eq!(dep.version.as_deref(), Some("~> 6.1.4"));
        assert_eq!(dep.options.as_deref(), Some("require: false"));
        assert_eq!(dep.major(), Some(6));
    }
}
