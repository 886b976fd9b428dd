use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use interview_analyst::adapters::{HttpAnalysisClient, HttpClientConfig};
use interview_analyst::application::{
    ExportDocumentCommand, ExportDocumentHandler, GenerateNextStepsCommand,
    GenerateNextStepsHandler, GenerateReportCommand, GenerateReportHandler, HandlerError,
    ListSnapshotsHandler, ListSnapshotsQuery, SaveSnapshotCommand, SaveSnapshotHandler,
    SortEvidenceCommand, SortEvidenceHandler, UploadTranscriptCommand, UploadTranscriptHandler,
};
use interview_analyst::config::{AppConfig, LoggingConfig};
use interview_analyst::domain::analysis::SectionKind;
use interview_analyst::domain::foundation::FileId;
use interview_analyst::domain::snapshot::TriggerType;
use interview_analyst::domain::store::{AnalysisStore, SharedAnalysisStore};
use interview_analyst::ports::ExportFormat;

#[derive(Parser)]
#[command(name = "interview-analyst")]
#[command(about = "Analyse interview transcripts with the remote analysis service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a transcript and print the generated analysis as JSON
    Analyze {
        /// Transcript file (.txt, .docx, .pdf)
        transcript: PathBuf,
        /// Regenerate next steps from the areas to target
        #[arg(long)]
        next_steps: bool,
        /// Attach transcript evidence to both sections
        #[arg(long)]
        sort_evidence: bool,
        /// Save a manual snapshot of the result
        #[arg(long)]
        snapshot: bool,
    },
    /// Upload a transcript and export the analysis as a document
    Export {
        /// Transcript file (.txt, .docx, .pdf)
        transcript: PathBuf,
        /// Output format (word or pdf)
        #[arg(long, default_value = "pdf")]
        format: ExportFormat,
        /// Output file, or a directory to receive the suggested filename
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// List saved snapshots for an uploaded transcript
    Snapshots {
        /// File id returned by the upload
        task_id: String,
    },
}

/// Handlers wired to one shared store.
struct App {
    client: Arc<HttpAnalysisClient>,
    store: SharedAnalysisStore,
}

impl App {
    fn new(config: &AppConfig) -> Result<Self, HandlerError> {
        let mut http = HttpClientConfig::new(config.api.base_url.clone())
            .with_timeout(config.api.timeout())
            .with_max_retries(config.api.max_retries);
        if let Some(key) = config.api.api_key.clone() {
            http = http.with_api_key(key);
        }
        Ok(Self {
            client: Arc::new(HttpAnalysisClient::new(http)?),
            store: AnalysisStore::shared(),
        })
    }

    async fn upload_and_generate(&self, transcript: &Path) -> Result<FileId, Box<dyn std::error::Error>> {
        let bytes = tokio::fs::read(transcript).await?;
        let filename = transcript
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file_id = UploadTranscriptHandler::new(self.client.clone(), self.store.clone())
            .handle(UploadTranscriptCommand { filename, bytes })
            .await?;
        GenerateReportHandler::new(self.client.clone(), self.store.clone())
            .handle(GenerateReportCommand::new(file_id.clone()))
            .await?;
        Ok(file_id)
    }

    async fn analyze(
        &self,
        transcript: &Path,
        next_steps: bool,
        sort_evidence: bool,
        snapshot: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let file_id = self.upload_and_generate(transcript).await?;

        if next_steps {
            GenerateNextStepsHandler::new(self.client.clone(), self.store.clone())
                .handle(GenerateNextStepsCommand {
                    file_id: file_id.clone(),
                })
                .await?;
        }
        if sort_evidence {
            let handler = SortEvidenceHandler::new(self.client.clone(), self.store.clone());
            for section in [SectionKind::Strengths, SectionKind::AreasToTarget] {
                let result = handler
                    .handle(SortEvidenceCommand {
                        file_id: file_id.clone(),
                        section,
                    })
                    .await?;
                for heading in &result.unmatched {
                    eprintln!("No {section} item matches evidence heading {heading:?}");
                }
            }
        }
        if snapshot {
            let saved = SaveSnapshotHandler::new(self.client.clone(), self.store.clone())
                .handle(SaveSnapshotCommand {
                    task_id: file_id.clone(),
                    trigger_type: TriggerType::Manual,
                    parent_id: None,
                })
                .await?;
            eprintln!("Saved snapshot {}", saved.id);
        }

        let store = self.store.read().await;
        let output = serde_json::json!({
            "file_id": file_id,
            "template_id": store.active_template_id(),
            "analysis": store.active_template(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    async fn export(
        &self,
        transcript: &Path,
        format: ExportFormat,
        out: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.upload_and_generate(transcript).await?;
        let document = ExportDocumentHandler::new(self.client.clone(), self.store.clone())
            .handle(ExportDocumentCommand {
                format,
                template_id: None,
            })
            .await?;
        let path = document.write_to(out).await?;
        println!("{}", path.display());
        Ok(())
    }

    async fn snapshots(&self, task_id: String) -> Result<(), Box<dyn std::error::Error>> {
        let snapshots = ListSnapshotsHandler::new(self.client.clone(), self.store.clone())
            .handle(ListSnapshotsQuery {
                task_id: FileId::new(task_id)?,
            })
            .await?;
        if snapshots.is_empty() {
            println!("No snapshots found.");
        }
        for snapshot in snapshots {
            println!(
                "{}  {}  {}",
                snapshot.id,
                snapshot.created_at,
                snapshot.trigger_type
            );
        }
        Ok(())
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = logging.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().try_init()?;
    } else {
        builder.try_init()?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Error initialising logging: {}", e);
        return ExitCode::FAILURE;
    }

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error creating API client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Analyze {
            transcript,
            next_steps,
            sort_evidence,
            snapshot,
        } => app.analyze(&transcript, next_steps, sort_evidence, snapshot).await,
        Commands::Export {
            transcript,
            format,
            out,
        } => app.export(&transcript, format, &out).await,
        Commands::Snapshots { task_id } => app.snapshots(task_id).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<HandlerError>() {
                Some(handler_error) => eprintln!("Error: {}", handler_error.user_message()),
                None => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}
