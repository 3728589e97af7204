use crate::{
    comments::strip_comments,
    config::Config,
    env::SiteVar,
    error::Result,
    frontmatter::{PageFrontmatter, derive_title, remove_frontmatter},
    links::LinkRewriter,
    math::fix_math,
    note::{NoteFile, read_lines},
    scanner::Scanner,
    section::SectionIndexer,
    writer::{Writer, print_step},
};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Statistics collected during pipeline execution.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Site variables that fell back to their placeholder
    pub missing_vars: Vec<SiteVar>,

    /// Number of `_index.md` files generated
    pub sections_written: usize,

    /// Number of notes converted, promoted ones included
    pub notes_converted: usize,

    /// Number of notes promoted to a section index
    pub indexes_promoted: usize,

    /// Total execution time
    pub duration: Duration,

    /// Time spent generating section indexes
    pub section_duration: Duration,

    /// Time spent converting notes
    pub note_duration: Duration,

    /// Content directory that was converted
    pub content_directory: String,
}

impl PipelineStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║            Conversion Summary                         ║");
        println!("╠═══════════════════════════════════════════════════════╣");
        println!(
            "║ Missing variables:    {:>8}                        ║",
            self.missing_vars.len()
        );
        println!(
            "║ Sections written:     {:>8}                        ║",
            self.sections_written
        );
        println!(
            "║ Notes converted:      {:>8}                        ║",
            self.notes_converted
        );
        println!(
            "║   - Promoted indexes: {:>8}                        ║",
            self.indexes_promoted
        );
        println!("║ Content Directory:                                    ║");
        println!("║   {}", self.content_directory);
        println!("║                                                       ║");
        println!("║ Timing Breakdown:                                     ║");
        println!(
            "║   - Sections:         {:>8.2}s                     ║",
            self.section_duration.as_secs_f64()
        );
        println!(
            "║   - Notes:            {:>8.2}s                     ║",
            self.note_duration.as_secs_f64()
        );
        println!(
            "║   - Total:            {:>8.2}s                     ║",
            self.duration.as_secs_f64()
        );
        println!("╚═══════════════════════════════════════════════════════╝\n");
    }
}

/// Runs the four conversion stages over a Zola site.
pub struct Pipeline {
    config: Config,
    scanner: Scanner,
    writer: Writer,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let scanner = Scanner::new(&config);
        let writer = Writer::new(config.echo);

        Ok(Self {
            config,
            scanner,
            writer,
        })
    }

    /// Executes every stage and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Check**: reports site variables, substituting placeholders for
    ///    missing ones
    /// 2. **Substitute**: writes the variables into the config file
    /// 3. **Sections**: regenerates `_index.md` in every directory
    /// 4. **Notes**: converts every note in place
    ///
    /// # Errors
    ///
    /// Returns an error on the first filesystem failure; files converted
    /// before it stay converted.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use obsidian_zola::{Config, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder().site_dir(".").build()?;
    ///
    /// let stats = Pipeline::new(config)?.run()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(site_dir = %self.config.site_dir.display()))]
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        info!("Starting conversion of {}", self.config.content_dir.display());

        info!("Stage 1/4: Checking site variables...");
        let missing_vars = self.check_environment();

        info!("Stage 2/4: Substituting config file...");
        self.substitute_config()?;

        info!("Stage 3/4: Generating section indexes...");
        let section_start = Instant::now();
        let sections_written = self.generate_sections()?;
        let section_duration = section_start.elapsed();
        info!(
            "✓ Wrote {} section indexes in {:.2}s",
            sections_written,
            section_duration.as_secs_f64()
        );

        info!("Stage 4/4: Converting notes...");
        let note_start = Instant::now();
        let (notes_converted, indexes_promoted) = self.convert_notes()?;
        let note_duration = note_start.elapsed();
        info!(
            "✓ Converted {} notes ({} promoted to section index) in {:.2}s",
            notes_converted,
            indexes_promoted,
            note_duration.as_secs_f64()
        );

        let duration = start_time.elapsed();
        info!("✓ Conversion completed in {:.2}s", duration.as_secs_f64());

        Ok(PipelineStats {
            missing_vars,
            sections_written,
            notes_converted,
            indexes_promoted,
            duration,
            section_duration,
            note_duration,
            content_directory: self.config.content_dir.display().to_string(),
        })
    }

    /// Reports each site variable and returns the missing ones.
    fn check_environment(&self) -> Vec<SiteVar> {
        print_step("CHECKING ENVIRONMENT VARIABLES");
        let env = &self.config.site_env;
        for var in SiteVar::ALL {
            match env.get(var) {
                Some(value) => println!("{var}: {value}"),
                None => warn!("{} not set!", var.placeholder()),
            }
        }
        env.missing()
    }

    fn substitute_config(&self) -> Result<()> {
        print_step("SUBSTITUTING CONFIG FILE");
        let path = &self.config.config_file;
        let content = read_lines(path)?.join("\n");
        self.writer
            .write(path, &self.config.site_env.substitute(&content))
    }

    fn generate_sections(&self) -> Result<usize> {
        print_step("GENERATING _index.md");
        let indexer = SectionIndexer::new(
            &self.config.content_dir,
            self.config.site_env.sort_order(),
            &self.writer,
        );

        let mut written = 0;
        for section in self.scanner.sections()? {
            if indexer.generate(&section)? {
                written += 1;
            }
        }
        Ok(written)
    }

    fn convert_notes(&self) -> Result<(usize, usize)> {
        print_step("PARSING MARKDOWN FILES");
        let notes = self.scanner.notes()?;
        if notes.is_empty() {
            warn!(
                "No Markdown notes found in {}",
                self.config.content_dir.display()
            );
        }

        let mut promoted = 0;
        for path in &notes {
            let note = NoteFile::load(path)?;
            let as_section_index = note.is_index_marker(&self.config.index_marker);
            let content = convert_note(&self.config.content_dir, &note, as_section_index);

            if as_section_index {
                let target = note.section_index_path();
                debug!("Promoting {} to {}", path.display(), target.display());
                self.writer.replace(path, &target, &content)?;
                promoted += 1;
            } else {
                self.writer.write(path, &content)?;
            }
        }
        Ok((notes.len(), promoted))
    }
}

/// Converts one note: old frontmatter out, links rewritten, comments
/// stripped, math fixed, fresh frontmatter in.
pub(crate) fn convert_note(content_dir: &Path, note: &NoteFile, as_section_index: bool) -> String {
    let body = remove_frontmatter(&note.lines).join("\n");
    let body = LinkRewriter::for_note(content_dir, &note.path).rewrite(&body);
    let body = strip_comments(&body);
    let body = fix_math(&body);

    let title = derive_title(&note.stem);
    let frontmatter = if as_section_index {
        PageFrontmatter::section_index(title, note.modified)
    } else {
        PageFrontmatter::page(title, note.modified)
    };
    frontmatter.render(&body)
}
