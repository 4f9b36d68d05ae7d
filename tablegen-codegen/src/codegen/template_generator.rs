//! Template generator - renders entity, DAO and mapper files from a table

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tera::{Context, Tera};
use tracing::{debug, error, info, warn};

use crate::error::{CodegenError, Result};
use crate::schema::TableDescriptor;

const ENTITY_PATH: &str = "src/main/java/{package}/eo/{class}.java";
const DAO_PATH: &str = "src/main/java/{package}/dao/{class}Dao.java";
const MAPPER_PATH: &str = "src/main/resources/mapper/mybatis/{class}Mapper.xml";

const ENTITY_TEMPLATE: &str = include_str!("../../templates/entity.java.tera");
const DAO_TEMPLATE: &str = include_str!("../../templates/dao.java.tera");
const MAPPER_TEMPLATE: &str = include_str!("../../templates/mapper.xml.tera");

/// The three files generated for every table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Entity object (`eo/UserEO.java`)
    Entity,
    /// Persistence interface (`dao/UserEODao.java`)
    Dao,
    /// MyBatis mapping descriptor (`mapper/mybatis/UserEOMapper.xml`)
    Mapper,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [TemplateKind::Entity, TemplateKind::Dao, TemplateKind::Mapper];

    /// Template file name looked up in the template set
    pub fn template_name(&self) -> &'static str {
        match self {
            TemplateKind::Entity => "entity.java.tera",
            TemplateKind::Dao => "dao.java.tera",
            TemplateKind::Mapper => "mapper.xml.tera",
        }
    }

    fn builtin_source(&self) -> &'static str {
        match self {
            TemplateKind::Entity => ENTITY_TEMPLATE,
            TemplateKind::Dao => DAO_TEMPLATE,
            TemplateKind::Mapper => MAPPER_TEMPLATE,
        }
    }

    fn path_pattern(&self) -> &'static str {
        match self {
            TemplateKind::Entity => ENTITY_PATH,
            TemplateKind::Dao => DAO_PATH,
            TemplateKind::Mapper => MAPPER_PATH,
        }
    }

    /// Output path relative to the project root
    ///
    /// `package` is dotted (`com.example`) and becomes nested directories.
    pub fn relative_path(&self, package: &str, class_name: &str) -> PathBuf {
        let package_path = package.replace('.', "/");
        self.path_pattern()
            .replace("{package}", &package_path)
            .replace("{class}", class_name)
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}

impl FromStr for TemplateKind {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "entity" | "eo" | "EOTemplate" => Ok(TemplateKind::Entity),
            "dao" | "DaoTemplate" => Ok(TemplateKind::Dao),
            "mapper" | "MapperTemplate" => Ok(TemplateKind::Mapper),
            other => Err(CodegenError::ConfigError(format!(
                "Template `{}` is not prepared (expected entity, dao or mapper)",
                other
            ))),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateKind::Entity => "entity",
            TemplateKind::Dao => "dao",
            TemplateKind::Mapper => "mapper",
        };
        f.write_str(name)
    }
}

/// A file that failed to render or write
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub kind: TemplateKind,
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of generating the files for one table
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Files written to disk
    pub written: Vec<PathBuf>,
    /// Files rendered but not written (dry run)
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl GenerationReport {
    /// True when every requested file was produced
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renders [`TemplateKind`] templates for a table into the project tree
pub struct TemplateGenerator {
    tera: Tera,
    /// Custom templates that failed to parse, reported per file
    load_errors: HashMap<TemplateKind, String>,
    output_dir: PathBuf,
    dry_run: bool,
}

impl TemplateGenerator {
    /// Create a generator using only the built-in templates
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_template_dir(output_dir, None)
    }

    /// Create a generator whose templates are loaded from `template_dir`,
    /// falling back to the built-in template for any name it lacks
    ///
    /// A custom template that fails to parse does not abort the generator;
    /// only files of that kind fail, when they are generated.
    pub fn with_template_dir(
        output_dir: impl AsRef<Path>,
        template_dir: Option<&Path>,
    ) -> Result<Self> {
        let mut tera = Tera::default();
        let mut load_errors = HashMap::new();

        if let Some(dir) = template_dir {
            if !dir.is_dir() {
                return Err(CodegenError::ConfigError(format!(
                    "Template directory not found: {}",
                    dir.display()
                )));
            }
        }

        for kind in TemplateKind::ALL {
            let custom = template_dir
                .map(|dir| dir.join(kind.template_name()))
                .filter(|path| path.is_file());

            match custom {
                Some(path) => {
                    debug!("Using custom {} template {}", kind, path.display());
                    if let Err(e) = tera.add_template_file(&path, Some(kind.template_name())) {
                        warn!("Failed to load template {}: {}", path.display(), e);
                        load_errors.insert(
                            kind,
                            format!("failed to load {}: {}", path.display(), error_chain(&e)),
                        );
                    }
                }
                None => tera.add_raw_template(kind.template_name(), kind.builtin_source())?,
            }
        }

        let mut generator = Self::from_tera(tera, output_dir);
        generator.load_errors = load_errors;
        Ok(generator)
    }

    /// Wrap an already populated template set
    pub fn from_tera(mut tera: Tera, output_dir: impl AsRef<Path>) -> Self {
        // Generated sources must never be HTML-escaped
        tera.autoescape_on(vec![]);
        Self {
            tera,
            load_errors: HashMap::new(),
            output_dir: output_dir.as_ref().to_path_buf(),
            dry_run: false,
        }
    }

    /// Render without writing anything
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Absolute (or output-dir relative) destination for a file
    pub fn target_path(&self, kind: TemplateKind, package: &str, class_name: &str) -> PathBuf {
        self.output_dir.join(kind.relative_path(package, class_name))
    }

    /// Generate all three files for a table
    pub fn generate_all(&self, table: &TableDescriptor) -> Result<GenerationReport> {
        self.generate_kinds(table, &TemplateKind::ALL)
    }

    /// Generate the given files for a table
    ///
    /// Every target is checked before anything is written; a configuration
    /// problem with any of them aborts the whole call. Rendering and I/O
    /// failures are logged and recorded per file without stopping the rest.
    pub fn generate_kinds(
        &self,
        table: &TableDescriptor,
        kinds: &[TemplateKind],
    ) -> Result<GenerationReport> {
        let class_name = table.short_class_name();
        let package = table.package();

        let targets = kinds
            .iter()
            .map(|kind| -> Result<(TemplateKind, PathBuf)> {
                let path = self.target_path(*kind, package, class_name);
                self.preflight(*kind, &path)?;
                Ok((*kind, path))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut report = GenerationReport::default();
        for (kind, path) in targets {
            match self.render_to(kind, &path, package, table) {
                Ok(true) => report.written.push(path),
                Ok(false) => report.skipped.push(path),
                Err(e) => {
                    error!("Generate {} file {} failed: {}", kind, path.display(), e);
                    report.failures.push(FileFailure {
                        kind,
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    /// Generate one file, returning its path
    ///
    /// Unlike [`generate_kinds`](Self::generate_kinds), a rendering or I/O
    /// failure is returned to the caller.
    pub fn generate_file(
        &self,
        kind: TemplateKind,
        class_name: &str,
        package: &str,
        table: &TableDescriptor,
    ) -> Result<PathBuf> {
        let path = self.target_path(kind, package, class_name);
        self.preflight(kind, &path)?;
        self.render_to(kind, &path, package, table)?;
        Ok(path)
    }

    fn preflight(&self, kind: TemplateKind, path: &Path) -> Result<()> {
        if !has_template(&self.tera, kind) && !self.load_errors.contains_key(&kind) {
            return Err(CodegenError::ConfigError(format!(
                "Template `{}` is not prepared",
                kind.template_name()
            )));
        }

        let parent = path.parent().unwrap_or(self.output_dir.as_path());
        if let Some(existing) = parent.ancestors().find(|p| p.exists()) {
            if !existing.is_dir() {
                return Err(CodegenError::ConfigError(format!(
                    "Cannot use output directory {}: {} is not a directory",
                    parent.display(),
                    existing.display()
                )));
            }
        }
        Ok(())
    }

    /// Render into memory, then write; returns whether the file was written
    fn render_to(
        &self,
        kind: TemplateKind,
        path: &Path,
        package: &str,
        table: &TableDescriptor,
    ) -> Result<bool> {
        if let Some(load_error) = self.load_errors.get(&kind) {
            return Err(CodegenError::TemplateError(tera::Error::msg(load_error)));
        }

        let context = build_context(table, package);
        let content = self.tera.render(kind.template_name(), &context)?;

        if self.dry_run {
            info!("Would generate file: {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if path.exists() {
            warn!("Replace file: {}", path.display());
        }
        fs::write(path, content)?;
        info!("Generate file: {}", path.display());
        Ok(true)
    }
}

fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn has_template(tera: &Tera, kind: TemplateKind) -> bool {
    tera.get_template_names()
        .any(|name| name == kind.template_name())
}

fn build_context(table: &TableDescriptor, package: &str) -> Context {
    let entity_package = sub_package(package, "eo");
    let entity_type = format!("{}.{}", entity_package, table.short_class_name());

    let mut context = Context::new();
    context.insert("table", table);
    context.insert("package", package);
    context.insert("class_name", table.short_class_name());
    context.insert("imports", &table.imports());
    context.insert("dao_package", &sub_package(package, "dao"));
    context.insert("entity_package", &entity_package);
    context.insert("entity_type", &entity_type);
    context
}

fn sub_package(package: &str, leaf: &str) -> String {
    if package.is_empty() {
        leaf.to_string()
    } else {
        format!("{}.{}", package, leaf)
    }
}
