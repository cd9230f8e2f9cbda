//! CLI argument parsing.
//!
//! Defines the command-line interface using clap.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::app::App;

/// Weekly Report - write weekly reports and export them through a Word template
#[derive(Parser)]
#[command(name = "weekly-report")]
#[command(author, version, about = "Write weekly reports and export them through a Word template")]
pub struct Cli {
    /// Directory holding reports.json, settings.json and the template.
    #[arg(long, global = true, env = "WEEKLY_REPORT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Report fields given on the command line.
#[derive(Args, Debug, Default)]
pub struct ReportFields {
    /// Author name.
    #[arg(long)]
    pub name: Option<String>,

    /// Report date (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<String>,

    /// This week's summary.
    #[arg(long)]
    pub summary: Option<String>,

    /// Next week's plan.
    #[arg(long)]
    pub plan: Option<String>,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List all reports, newest first.
    List,

    /// Create a report. Name defaults to the last one used, date to today.
    New {
        #[command(flatten)]
        fields: ReportFields,
    },

    /// Change fields of an existing report.
    Edit {
        /// Report id.
        id: u64,

        #[command(flatten)]
        fields: ReportFields,
    },

    /// Delete a report.
    Delete {
        /// Report id.
        id: u64,
    },

    /// Show or change export settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Export a report through the stored template.
    Export {
        /// Report id.
        id: u64,

        /// Output directory.
        #[arg(long, short = 'o', default_value = ".")]
        out: PathBuf,
    },

    /// Fill a template file directly, without touching the data directory.
    Render {
        /// Template .docx file.
        template: PathBuf,

        /// Value for {{NAME}}.
        #[arg(long, default_value = "")]
        name: String,

        /// Value for {{DATE}} (YYYY-MM-DD).
        #[arg(long)]
        date: String,

        /// Value for {{SUMMARY}}.
        #[arg(long, default_value = "")]
        summary: String,

        /// Value for {{PLAN}}.
        #[arg(long, default_value = "")]
        plan: String,

        /// Output .docx file.
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings and template status.
    Show,

    /// Set the export file name pattern ({DATE} and {NAME} are replaced).
    SetPattern {
        /// New pattern; an empty value restores the default.
        pattern: String,
    },

    /// Store a .docx file as the report template.
    UploadTemplate {
        /// Template file to upload.
        file: PathBuf,
    },
}

impl Cli {
    /// Executes the parsed CLI command.
    pub fn run(self) -> Result<()> {
        let app = App::new(self.data_dir);

        match self.command {
            Commands::List => app.list(),
            Commands::New { fields } => app.new_report(fields),
            Commands::Edit { id, fields } => app.edit(id, fields),
            Commands::Delete { id } => app.delete(id),
            Commands::Settings { action } => match action {
                SettingsAction::Show => app.show_settings(),
                SettingsAction::SetPattern { pattern } => app.set_pattern(&pattern),
                SettingsAction::UploadTemplate { file } => app.upload_template(&file),
            },
            Commands::Export { id, out } => app.export(id, &out),
            Commands::Render {
                template,
                name,
                date,
                summary,
                plan,
                output,
            } => app.render(&template, name, &date, summary, plan, &output),
        }
    }
}
