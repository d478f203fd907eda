//! ResumeAI CLI: command-line client for the ResumeAI API.
//!
//! Set RESUMEAI_API_URL (or API_URL). The session cookie from `login` is kept in
//! RESUMEAI_DATA_DIR so later commands run signed in.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use resumeai_api_client::ApiClient;
use resumeai_cli::{truncate_string, AnalyzeFlow, AnalyzeOutcome, AuthContext, SessionStore};
use resumeai_core::models::{ResumeData, SectionType};
use resumeai_core::validation::validate_parse_upload;
use resumeai_core::{ClientConfig, ClientError, ErrorMetadata, JobInfo, UploadFile};
use resumeai_infra::{init_telemetry, RateLimitGate};
use resumeai_storage::{LocalPendingStore, PendingUploadBridge};

#[derive(Parser)]
#[command(name = "resumeai", about = "ResumeAI API CLI")]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and resume a pending analysis, if any
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Signup {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the signed-in user
    Profile,
    /// Score one or more resumes (PDF, DOC or DOCX, up to 5MB)
    Analyze {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, default_value = "")]
        job_title: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        job_description: String,
        /// Parse each analyzed PDF into resume builder data
        #[arg(long)]
        fix: bool,
        /// Write the builder data here instead of printing it (single file only)
        #[arg(long, requires = "fix")]
        fix_output: Option<PathBuf>,
    },
    /// Analysis history
    History {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        limit: u32,
    },
    /// Dashboard statistics
    Stats,
    /// Get a single analysis by ID
    Get { id: String },
    /// Delete an analysis by ID
    Delete { id: String },
    /// Download the resume stored with an analysis
    Download {
        id: String,
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Inspect or discard the upload saved for after login
    Pending {
        #[command(subcommand)]
        sub: PendingCommands,
    },
    /// Resume builder operations
    Builder {
        #[command(subcommand)]
        sub: BuilderCommands,
    },
    /// Job description analysis
    JobDesc {
        #[command(subcommand)]
        sub: JobDescCommands,
    },
}

#[derive(Subcommand)]
enum PendingCommands {
    Show,
    Clear,
}

#[derive(Subcommand)]
enum BuilderCommands {
    /// Parse a PDF resume into structured data
    Parse { file: PathBuf },
    /// AI suggestions for one section
    Suggest {
        /// summary, experience, project, skills or education
        section: SectionType,
        /// Section content as JSON (plain text is sent as a string)
        content: String,
        #[arg(long)]
        job_title: Option<String>,
    },
    /// Full review of a resume JSON file
    Review { resume: PathBuf },
    /// Rewrite a section
    Rewrite {
        section: String,
        content: String,
        #[arg(long)]
        style: Option<String>,
    },
    /// Generate bullet points from a description
    Bullets {
        description: String,
        #[arg(long)]
        count: Option<u32>,
    },
    /// List resume templates
    Templates,
    /// Save a resume JSON file
    Save {
        resume: PathBuf,
        #[arg(long)]
        template: Option<String>,
    },
    /// Render a resume JSON file to PDF
    Pdf {
        resume: PathBuf,
        #[arg(long, default_value = "classic")]
        template: String,
        /// Defaults to the candidate's name
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Preview a resume as base64 PDF or HTML
    Preview {
        resume: PathBuf,
        #[arg(long, default_value = "classic")]
        template: String,
        #[arg(long)]
        html: bool,
    },
    /// Print the preview image URL of a template
    TemplateUrl { template: String },
}

#[derive(Subcommand)]
enum JobDescCommands {
    /// Extract requirements from a job description
    Analyze { description: String },
    /// Match a stored resume against a job description
    Match {
        resume_id: String,
        description: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn parse_content(content: String) -> Value {
    serde_json::from_str(&content).unwrap_or(Value::String(content))
}

async fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    print_json(&json!({ "success": true, "path": path, "size": bytes.len() }))
}

/// Print (or write) the parsed resume so `builder` commands can pick it up.
async fn hand_to_builder(
    flow: &AnalyzeFlow,
    auth: &AuthContext,
    file: &UploadFile,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let resume = match flow.fix_resume(auth, file).await {
        Some(resume) => resume,
        None => {
            return print_json(&json!({
                "success": false,
                "fileName": file.file_name,
                "message": "Could not parse the resume. Start the builder from an empty resume.",
            }))
        }
    };

    match output {
        Some(path) => {
            let data = serde_json::to_vec_pretty(&resume).context("Serialize resume")?;
            write_output(path, &data).await
        }
        None => print_json(&json!({ "success": true, "resumeData": resume })),
    }
}

async fn persist_session(client: &ApiClient, sessions: &SessionStore) -> anyhow::Result<()> {
    match client.session_cookie() {
        Some(cookie) => sessions.save(&cookie).await,
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(cli.json_logs);

    let config = ClientConfig::from_env().context("Invalid configuration")?;
    let client = ApiClient::from_config(&config)
        .context("Failed to create API client. Check RESUMEAI_API_URL (or API_URL)")?;

    let sessions = SessionStore::new(&config.data_dir);
    if let Some(cookie) = sessions.load().await {
        client.restore_session(&cookie);
    }

    let store = LocalPendingStore::new(&config.data_dir)
        .await
        .context("Failed to open pending upload store")?;
    let bridge = PendingUploadBridge::new(Arc::new(store), config.pending_upload_ttl);
    let gate = RateLimitGate::new(config.rate_limit_window, config.rate_limit_max_requests);
    let flow = AnalyzeFlow::new(bridge, gate);

    let mut auth = AuthContext::new(client.clone());

    match cli.command {
        Commands::Login { email, password } => {
            let transitioned = auth.login(&email, &password).await?;
            persist_session(&client, &sessions).await?;
            print_json(&json!({ "success": true, "user": auth.user() }))?;

            if let Some(result) = flow.resume_after_login(&mut auth, transitioned).await {
                print_json(&result?)?;
            }
        }
        Commands::Signup {
            name,
            email,
            password,
        } => {
            let transitioned = auth.signup(&name, &email, &password).await?;
            persist_session(&client, &sessions).await?;
            print_json(&json!({ "success": true, "user": auth.user() }))?;

            if let Some(result) = flow.resume_after_login(&mut auth, transitioned).await {
                print_json(&result?)?;
            }
        }
        Commands::Logout => {
            let result = auth.logout().await;
            sessions.clear().await?;
            result?;
            print_json(&json!({ "success": true, "message": "Logged out" }))?;
        }
        Commands::Profile => match auth.init().await {
            Some(user) => print_json(user)?,
            None => print_json(&json!({ "authenticated": false }))?,
        },
        Commands::Analyze {
            files,
            job_title,
            company,
            job_description,
            fix,
            fix_output,
        } => {
            if fix_output.is_some() && files.len() > 1 {
                anyhow::bail!("--fix-output takes a single file");
            }
            auth.init().await;
            let job_info = JobInfo {
                job_title,
                company_name: company,
                job_description,
            };

            for path in files {
                let file = UploadFile::from_path(&path)?;
                match flow.submit(&mut auth, &file, &job_info).await {
                    Ok(AnalyzeOutcome::Completed(response)) => {
                        print_json(&response)?;
                        if fix {
                            hand_to_builder(&flow, &auth, &file, fix_output.as_deref()).await?;
                        }
                    }
                    Ok(AnalyzeOutcome::LoginRequired) => {
                        print_json(&json!({
                            "success": false,
                            "loginRequired": true,
                            "fileName": file.file_name,
                            "message": "Log in to continue. The analysis resumes after `resumeai login`.",
                        }))?;
                        // Only one upload can be pending
                        break;
                    }
                    Err(e @ ClientError::RateLimited { .. }) => {
                        print_json(&json!({
                            "success": false,
                            "fileName": file.file_name,
                            "code": e.error_code(),
                            "message": e.client_message(),
                        }))?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Commands::History { page, limit } => {
            let response = client.get_history(page, limit).await?;
            print_json(&response)?;
        }
        Commands::Stats => {
            let response = client.get_dashboard_stats().await?;
            print_json(&response)?;
        }
        Commands::Get { id } => {
            let response = client.get_analysis(&id).await?;
            print_json(&response)?;
        }
        Commands::Delete { id } => {
            let response = client.delete_analysis(&id).await?;
            print_json(&response)?;
        }
        Commands::Download { id, output } => {
            let download = client.download_resume_file(&id).await?;
            write_output(&output, &download.bytes).await?;
        }
        Commands::Pending { sub } => match sub {
            PendingCommands::Show => match flow.bridge().load().await {
                Some(pending) => print_json(&json!({
                    "fileName": pending.file_name,
                    "fileType": pending.file_type,
                    "size": pending.file_bytes.len(),
                    "jobTitle": pending.job_info().job_title,
                    "jobDescription": truncate_string(&pending.job_info().job_description, 80),
                    "createdAt": pending.created_at,
                }))?,
                None => print_json(&json!({ "pending": null }))?,
            },
            PendingCommands::Clear => {
                flow.bridge().clear().await;
                print_json(&json!({ "success": true }))?;
            }
        },
        Commands::Builder { sub } => match sub {
            BuilderCommands::Parse { file } => {
                let file = UploadFile::from_path(&file)?;
                validate_parse_upload(&file)?;
                let response = client.parse_resume(&file).await?;
                print_json(&response)?;
            }
            BuilderCommands::Suggest {
                section,
                content,
                job_title,
            } => {
                let response = client
                    .get_suggestions(section, &parse_content(content), job_title.as_deref())
                    .await?;
                print_json(&response)?;
            }
            BuilderCommands::Review { resume } => {
                let resume: ResumeData = read_json(&resume).await?;
                let response = client.get_full_review(&resume).await?;
                print_json(&response)?;
            }
            BuilderCommands::Rewrite {
                section,
                content,
                style,
            } => {
                let response = client
                    .rewrite_content(&section, &parse_content(content), style.as_deref())
                    .await?;
                print_json(&response)?;
            }
            BuilderCommands::Bullets { description, count } => {
                let response = client.generate_bullets(&description, count).await?;
                print_json(&response)?;
            }
            BuilderCommands::Templates => {
                let response = client.get_templates().await?;
                print_json(&response)?;
            }
            BuilderCommands::Save { resume, template } => {
                let resume: ResumeData = read_json(&resume).await?;
                let response = client.save_resume(&resume, template.as_deref()).await?;
                print_json(&response)?;
            }
            BuilderCommands::Pdf {
                resume,
                template,
                output,
            } => {
                let resume: ResumeData = read_json(&resume).await?;
                let pdf = client.generate_pdf(&resume, &template).await?;
                let output = output.unwrap_or_else(|| PathBuf::from(resume.pdf_file_name()));
                write_output(&output, &pdf.bytes).await?;
            }
            BuilderCommands::Preview {
                resume,
                template,
                html,
            } => {
                let resume: ResumeData = read_json(&resume).await?;
                if html {
                    print_json(&client.get_html_preview(&resume, &template).await?)?;
                } else {
                    print_json(&client.get_pdf_preview(&resume, &template).await?)?;
                }
            }
            BuilderCommands::TemplateUrl { template } => {
                print_json(&json!({ "url": client.template_preview_url(&template) }))?;
            }
        },
        Commands::JobDesc { sub } => match sub {
            JobDescCommands::Analyze { description } => {
                let response = client.analyze_job_description(&description).await?;
                print_json(&response)?;
            }
            JobDescCommands::Match {
                resume_id,
                description,
            } => {
                let response = client.match_resume(&resume_id, &description).await?;
                print_json(&response)?;
            }
        },
    }

    Ok(())
}
