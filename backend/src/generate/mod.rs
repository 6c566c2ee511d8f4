//! Deck generation pipeline.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Uploads    │──▶│   WorkDir    │──▶│  Generator   │──▶│  PPTX bytes  │
//! │ (validated)  │   │  (staged)    │   │ (subprocess) │   │  (returned)  │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! The work directory is removed when [`WorkDir`] drops, whatever the outcome.

pub mod runner;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::api::logs::{log_info, log_success, log_warning};
use crate::config::GenerationSettings;
use crate::error::{GenerateResult, GeneratorError, RequestError};

pub use runner::GeneratorCommand;

/// Name the Excel upload is staged under.
pub const EXCEL_INPUT_NAME: &str = "datasheet_imarc.xlsx";

/// Name the template is staged under.
pub const TEMPLATE_INPUT_NAME: &str = "template.pptx";

/// Name the generator must write the deck to.
pub const OUTPUT_FILE_NAME: &str = "updated_poc.pptx";

/// MIME type of the generated deck.
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

const EXCEL_EXTENSIONS: [&str; 2] = [".xlsx", ".xls"];
const TEMPLATE_EXTENSION: &str = ".pptx";

// =============================================================================
// Inputs
// =============================================================================

/// A file received from a client.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    fn has_extension(&self, extensions: &[&str]) -> bool {
        let name = self.file_name.to_lowercase();
        extensions.iter().any(|ext| name.ends_with(ext))
    }
}

/// Validated inputs for one generation.
#[derive(Debug, Clone)]
pub struct GenerationInputs {
    excel: UploadedFile,
    template: Option<UploadedFile>,
}

impl GenerationInputs {
    /// Check presence and extensions. A part with an empty filename (a plain
    /// form field, or a file input left blank) counts as absent.
    pub fn new(
        excel: Option<UploadedFile>,
        template: Option<UploadedFile>,
    ) -> Result<Self, RequestError> {
        let excel = excel
            .filter(|e| !e.file_name.is_empty())
            .ok_or(RequestError::MissingExcel)?;
        if !excel.has_extension(&EXCEL_EXTENSIONS) {
            return Err(RequestError::InvalidExcel(excel.file_name));
        }

        let template = template.filter(|t| !t.file_name.is_empty());
        if let Some(t) = &template {
            if !t.has_extension(&[TEMPLATE_EXTENSION]) {
                return Err(RequestError::InvalidTemplate(t.file_name.clone()));
            }
        }

        Ok(Self { excel, template })
    }

    pub fn excel(&self) -> &UploadedFile {
        &self.excel
    }

    pub fn template(&self) -> Option<&UploadedFile> {
        self.template.as_ref()
    }
}

// =============================================================================
// Work directory
// =============================================================================

/// A uniquely named scratch directory, deleted on drop.
///
/// Removal in `Drop` is synchronous; the directory only ever holds the
/// staged inputs and one output file.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    pub async fn create(root: &Path) -> io::Result<Self> {
        let path = root.join(format!("pocdeck_{}", Uuid::new_v4().simple()));
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            log_warning(format!("Failed to remove {}: {}", self.path.display(), e));
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

enum TemplateSource<'a> {
    Uploaded(&'a UploadedFile),
    Default(&'a Path),
}

/// Stage the inputs, run the generator and return the deck bytes.
pub async fn generate_deck(
    inputs: &GenerationInputs,
    settings: &GenerationSettings,
) -> GenerateResult<Vec<u8>> {
    // Resolved before touching the disk.
    let template = match (inputs.template(), settings.default_template.as_deref()) {
        (Some(uploaded), _) => TemplateSource::Uploaded(uploaded),
        (None, Some(path)) => TemplateSource::Default(path),
        (None, None) => return Err(RequestError::MissingTemplate.into()),
    };

    let work = WorkDir::create(&settings.work_root).await?;
    log_info(format!(
        "Staging {} ({} bytes) in {}",
        inputs.excel().file_name,
        inputs.excel().bytes.len(),
        work.path().display()
    ));

    tokio::fs::write(work.join(EXCEL_INPUT_NAME), &inputs.excel().bytes).await?;

    match template {
        TemplateSource::Uploaded(uploaded) => {
            tokio::fs::write(work.join(TEMPLATE_INPUT_NAME), &uploaded.bytes).await?;
        }
        TemplateSource::Default(path) => {
            log_info(format!("Using default template {}", path.display()));
            tokio::fs::copy(path, work.join(TEMPLATE_INPUT_NAME)).await?;
        }
    }

    settings.generator.run(work.path()).await?;

    let deck = match tokio::fs::read(work.join(OUTPUT_FILE_NAME)).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(GeneratorError::MissingOutput.into());
        }
        Err(e) => return Err(e.into()),
    };

    log_success(format!("Generated {} ({} bytes)", OUTPUT_FILE_NAME, deck.len()));
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use tempfile::tempdir;

    fn xlsx() -> UploadedFile {
        UploadedFile::new("Datasheet.XLSX", b"xlsx".to_vec())
    }

    fn pptx() -> UploadedFile {
        UploadedFile::new("template.pptx", b"pptx".to_vec())
    }

    #[test]
    fn test_inputs_require_excel() {
        let err = GenerationInputs::new(None, Some(pptx())).unwrap_err();
        assert_eq!(err, RequestError::MissingExcel);
    }

    #[test]
    fn test_inputs_check_extensions() {
        assert!(GenerationInputs::new(Some(xlsx()), Some(pptx())).is_ok());
        assert!(GenerationInputs::new(Some(UploadedFile::new("old.xls", vec![])), None).is_ok());

        let err = GenerationInputs::new(Some(UploadedFile::new("data.csv", vec![])), None)
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidExcel("data.csv".into()));

        let err = GenerationInputs::new(Some(xlsx()), Some(UploadedFile::new("deck.ppt", vec![])))
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidTemplate("deck.ppt".into()));
    }

    #[test]
    fn test_unnamed_template_counts_as_absent() {
        let inputs =
            GenerationInputs::new(Some(xlsx()), Some(UploadedFile::new("", vec![]))).unwrap();
        assert!(inputs.template().is_none());
    }

    #[test]
    fn test_unnamed_excel_counts_as_missing() {
        let err = GenerationInputs::new(Some(UploadedFile::new("", b"xlsx".to_vec())), Some(pptx()))
            .unwrap_err();
        assert_eq!(err, RequestError::MissingExcel);
    }

    #[tokio::test]
    async fn test_work_dir_removed_on_drop() {
        let root = tempdir().unwrap();
        let path = {
            let work = WorkDir::create(&root.path().join("nested")).await.unwrap();
            assert!(work.path().is_dir());
            fs::write(work.join("scratch"), b"x").unwrap();
            work.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_missing_template_without_default() {
        let root = tempdir().unwrap();
        let settings =
            GenerationSettings::new(GeneratorCommand::new("true")).with_work_root(root.path());
        let inputs = GenerationInputs::new(Some(xlsx()), None).unwrap();

        let err = generate_deck(&inputs, &settings).await.unwrap_err();
        assert!(matches!(err, GenerateError::Request(RequestError::MissingTemplate)));
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_generates_from_staged_inputs() {
        let root = tempdir().unwrap();
        let generator = GeneratorCommand::new("sh")
            .with_args(["-c", "cat datasheet_imarc.xlsx template.pptx > updated_poc.pptx"]);
        let settings = GenerationSettings::new(generator).with_work_root(root.path());
        let inputs = GenerationInputs::new(Some(xlsx()), Some(pptx())).unwrap();

        let deck = generate_deck(&inputs, &settings).await.unwrap();
        assert_eq!(deck, b"xlsxpptx");
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_default_template_is_copied() {
        let root = tempdir().unwrap();
        let assets = tempdir().unwrap();
        let default = assets.path().join("default_template.pptx");
        fs::write(&default, b"default").unwrap();

        let generator =
            GeneratorCommand::new("sh").with_args(["-c", "cp template.pptx updated_poc.pptx"]);
        let settings = GenerationSettings::new(generator)
            .with_work_root(root.path())
            .with_default_template(&default);
        let inputs = GenerationInputs::new(Some(xlsx()), None).unwrap();

        let deck = generate_deck(&inputs, &settings).await.unwrap();
        assert_eq!(deck, b"default");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_output() {
        let root = tempdir().unwrap();
        let settings =
            GenerationSettings::new(GeneratorCommand::new("true")).with_work_root(root.path());
        let inputs = GenerationInputs::new(Some(xlsx()), Some(pptx())).unwrap();

        let err = generate_deck(&inputs, &settings).await.unwrap_err();
        assert!(matches!(err, GenerateError::Generator(GeneratorError::MissingOutput)));
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
    }
}
