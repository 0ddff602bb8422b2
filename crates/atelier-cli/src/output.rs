//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use serde::Serialize;

use atelier_core::models::{
    Artwork, Award, Category, Document, Exhibition, Location, Person, Project, SiteSettings,
    TaxonomyTerm,
};
use atelier_core::{Prepared, SearchResults};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// How a document is shown in lists and detail views
pub trait Listing: Serialize {
    /// Printed alone in quiet mode: the slug when there is one, else the id
    fn key(&self) -> String;
    fn label(&self) -> String;
    /// Short secondary column in list views
    fn detail(&self) -> String {
        String::new()
    }
    /// Labelled lines for the detail view
    fn fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

fn year(value: Option<i32>) -> String {
    value.map(|y| y.to_string()).unwrap_or_default()
}

fn joined<T>(items: &[T], f: impl Fn(&T) -> String) -> String {
    items.iter().map(f).collect::<Vec<_>>().join(", ")
}

impl Listing for Person {
    fn key(&self) -> String {
        self.slug().unwrap_or(&self.meta.id).to_string()
    }

    fn label(&self) -> String {
        self.display_name()
    }

    fn detail(&self) -> String {
        joined(&self.roles, |r| r.title.clone())
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Name", self.display_name()),
            ("Slug", self.key()),
            ("Roles", self.detail()),
            ("Born", year(self.birth_year)),
            ("Based in", self.current_location.clone().unwrap_or_default()),
            ("Website", self.website.clone().unwrap_or_default()),
            ("Biography", self.bio_summary(200)),
        ];
        if let Some(nationality) = &self.nationality {
            fields.push(("Nationality", nationality.clone()));
        }
        fields.push(("Artworks", joined(&self.artworks, |a| a.title.clone())));
        fields.push(("Projects", joined(&self.projects, |p| p.title.clone())));
        fields.push(("Exhibitions", joined(&self.exhibition_docs, |e| e.title.clone())));
        fields
    }
}

impl Listing for Artwork {
    fn key(&self) -> String {
        self.slug().unwrap_or(&self.meta.id).to_string()
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn detail(&self) -> String {
        let artists = joined(&self.artists, |a| a.display_name());
        match self.year {
            Some(y) => format!("{} ({})", artists, y),
            None => artists,
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Slug", self.key()),
            ("Artists", joined(&self.artists, |a| a.display_name())),
            ("Year", year(self.year)),
            ("Media types", joined(&self.media_types, |m| m.title.clone())),
            ("Techniques", joined(&self.techniques, |t| t.title.clone())),
            ("Tags", joined(&self.tags, |t| t.title.clone())),
            ("Dimensions", self.dimensions.clone().unwrap_or_default()),
            (
                "Project",
                self.project.as_ref().map(|p| p.title.clone()).unwrap_or_default(),
            ),
            (
                "Primary media",
                self.primary_media().map(|m| m.kind().to_string()).unwrap_or_default(),
            ),
        ]
    }
}

impl Listing for Project {
    fn key(&self) -> String {
        self.slug().unwrap_or(&self.meta.id).to_string()
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn detail(&self) -> String {
        let status = self.status.map(|s| s.as_str()).unwrap_or("-");
        format!("{}, {} artwork(s)", status, self.artwork_count)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Slug", self.key()),
            ("Status", self.status.map(|s| s.as_str().to_string()).unwrap_or_default()),
            ("Creators", joined(&self.creators, |p| p.display_name())),
            ("Collaborators", joined(&self.collaborators, |p| p.display_name())),
            ("Started", self.start_date.map(|d| d.to_string()).unwrap_or_default()),
            ("Ended", self.end_date.map(|d| d.to_string()).unwrap_or_default()),
            ("Artworks", joined(&self.artworks, |a| a.title.clone())),
        ]
    }
}

impl Listing for Exhibition {
    fn key(&self) -> String {
        self.slug().unwrap_or(&self.meta.id).to_string()
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn detail(&self) -> String {
        let start = self.start_date.map(|d| d.to_string()).unwrap_or_default();
        match self.venue_name() {
            Some(venue) => format!("{} @ {}", start, venue),
            None => start,
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Slug", self.key()),
            ("Status", self.status.map(|s| s.as_str().to_string()).unwrap_or_default()),
            ("Venue", self.venue_name().unwrap_or_default().to_string()),
            ("Opens", self.start_date.map(|d| d.to_string()).unwrap_or_default()),
            ("Closes", self.end_date.map(|d| d.to_string()).unwrap_or_default()),
            ("Curators", joined(&self.curators, |p| p.display_name())),
            ("Artworks", joined(&self.artworks, |a| a.title.clone())),
        ]
    }
}

impl Listing for Award {
    fn key(&self) -> String {
        self.meta.id.clone()
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn detail(&self) -> String {
        let org = self.organization.clone().unwrap_or_default();
        format!("{} {}", org, year(self.year)).trim().to_string()
    }
}

impl Listing for Location {
    fn key(&self) -> String {
        self.slug().unwrap_or(&self.meta.id).to_string()
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn detail(&self) -> String {
        [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Slug", self.key()),
            (
                "Type",
                self.location_type.as_ref().map(|t| t.title.clone()).unwrap_or_default(),
            ),
            ("Address", self.address.clone().unwrap_or_default()),
            ("City", self.detail()),
            ("Website", self.website.clone().unwrap_or_default()),
            ("Exhibitions", joined(&self.exhibitions, |e| e.title.clone())),
        ]
    }
}

impl Listing for TaxonomyTerm {
    fn key(&self) -> String {
        self.slug
            .as_ref()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| self.meta.id.clone())
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

impl Listing for Category {
    fn key(&self) -> String {
        self.slug
            .as_ref()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| self.meta.id.clone())
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn detail(&self) -> String {
        match &self.parent {
            Some(parent) => format!("in {}", parent.title),
            None => joined(&self.children, |c| c.title.clone()),
        }
    }
}

impl Listing for SiteSettings {
    fn key(&self) -> String {
        self.meta.id.clone()
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Contact", self.contact_email.clone().unwrap_or_default()),
        ]
    }
}

impl Listing for Document {
    fn key(&self) -> String {
        self.id().to_string()
    }

    fn label(&self) -> String {
        Document::label(self)
    }

    fn detail(&self) -> String {
        self.meta()
            .doc_type
            .map(|t| t.to_string())
            .unwrap_or_default()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = match self {
            Document::Person(d) => d.fields(),
            Document::Artwork(d) => d.fields(),
            Document::Project(d) => d.fields(),
            Document::Exhibition(d) => d.fields(),
            Document::Location(d) => d.fields(),
            Document::SiteSettings(d) => d.fields(),
            Document::Award(d) => vec![("Title", d.label()), ("Awarded", d.detail())],
            Document::Category(d) => vec![("Title", d.label()), ("Parent", d.detail())],
            Document::Taxonomy(d) => vec![("Title", d.label())],
        };
        fields.insert(0, ("Type", self.detail()));
        fields.insert(0, ("ID", self.key()));
        fields
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a list of documents
    pub fn print_list<T: Listing>(&self, items: &[T], noun: &str) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("No {} found.", noun);
                    return Ok(());
                }
                for item in items {
                    let detail = item.detail();
                    if detail.is_empty() {
                        println!("{:<24} | {}", truncate(&item.key(), 24), item.label());
                    } else {
                        println!(
                            "{:<24} | {} | {}",
                            truncate(&item.key(), 24),
                            truncate(&item.label(), 35),
                            truncate(&detail, 45)
                        );
                    }
                }
                println!("\n{} {}", items.len(), noun);
            }
            OutputFormat::Json => print_json(items)?,
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.key());
                }
            }
        }
        Ok(())
    }

    /// Print a single document
    pub fn print_item<T: Listing>(&self, item: &T) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                let fields = item.fields();
                if fields.is_empty() {
                    println!("{} ({})", item.label(), item.key());
                }
                for (name, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
                    println!("{:<14}{}", format!("{}:", name), value);
                }
            }
            OutputFormat::Json => print_json(item)?,
            OutputFormat::Quiet => println!("{}", item.key()),
        }
        Ok(())
    }

    /// Print search hits grouped by category
    pub fn print_search(&self, results: &SearchResults) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if results.is_empty() {
                    println!("No matches.");
                    return Ok(());
                }
                section("Artworks", &results.artworks);
                section("Projects", &results.projects);
                section("People", &results.people);
                println!("\n{} match(es)", results.len());
            }
            OutputFormat::Json => print_json(results)?,
            OutputFormat::Quiet => {
                let keys = results
                    .artworks
                    .iter()
                    .map(Listing::key)
                    .chain(results.projects.iter().map(Listing::key))
                    .chain(results.people.iter().map(Listing::key));
                for key in keys {
                    println!("{}", key);
                }
            }
        }
        Ok(())
    }

    /// Print a compiled query instead of running it
    pub fn print_explain(&self, prepared: &[Prepared]) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let queries: Vec<_> = prepared
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "context": p.context,
                            "query": p.query.to_string(),
                            "params": p.params,
                        })
                    })
                    .collect();
                print_json(&queries)?;
            }
            _ => {
                for (i, p) in prepared.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    if !self.is_quiet() {
                        println!("# {}", p.context);
                    }
                    println!("{}", p);
                }
            }
        }
        Ok(())
    }

    /// Print a bare value (URL, path)
    pub fn print_value(&self, name: &str, value: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => print_json(&serde_json::json!({ name: value }))?,
            _ => println!("{}", value),
        }
        Ok(())
    }

    /// Print a serializable record as labelled lines or JSON
    pub fn print_record<T: Serialize>(&self, record: &T, lines: &[(&str, String)]) -> Result<()> {
        match self.format {
            OutputFormat::Json => print_json(record)?,
            OutputFormat::Quiet => {
                if let Some((_, first)) = lines.first() {
                    println!("{}", first);
                }
            }
            OutputFormat::Human => {
                for (name, value) in lines {
                    println!("{:<14}{}", format!("{}:", name), value);
                }
            }
        }
        Ok(())
    }
}

fn section<T: Listing>(title: &str, items: &[T]) {
    if items.is_empty() {
        return;
    }
    println!("── {} ({}) ──", title, items.len());
    for item in items {
        println!("{:<24} | {}", truncate(&item.key(), 24), item.label());
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
