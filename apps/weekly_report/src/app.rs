//! Command handlers.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use docx_template::render_to_file;
use report_model::{parse_report_date, PlaceholderContext, PlaceholderKey, ReportRecord};
use report_store::{ConfigManager, Exporter, ReportRepository, StoredReport, TemplateStore};
use std::path::{Path, PathBuf};

use crate::cli::ReportFields;

const PREVIEW_CHARS: usize = 30;

/// Command handlers bound to one data directory.
pub struct App {
    data_dir: PathBuf,
}

impl App {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn reports(&self) -> Result<ReportRepository> {
        ReportRepository::open(&self.data_dir)
            .with_context(|| format!("failed to open reports in {}", self.data_dir.display()))
    }

    fn config(&self) -> Result<ConfigManager> {
        ConfigManager::open(&self.data_dir).context("failed to load settings")
    }

    fn templates(&self) -> TemplateStore {
        TemplateStore::new(&self.data_dir)
    }

    pub fn list(&self) -> Result<()> {
        let reports = self.reports()?;
        if reports.is_empty() {
            println!("No reports yet.");
            return Ok(());
        }

        for report in reports.list() {
            println!("{}", summary_line(report));
        }
        Ok(())
    }

    pub fn new_report(&self, fields: ReportFields) -> Result<()> {
        let mut reports = self.reports()?;

        let date = match fields.date.as_deref() {
            Some(date) => parse_date(date)?,
            None => Local::now().date_naive(),
        };
        let name = fields.name.or_else(|| reports.last_name().map(str::to_string));

        let record = ReportRecord {
            name,
            date,
            summary: fields.summary,
            plan: fields.plan,
        };
        let id = reports.create(record).context("failed to save report")?;

        println!("Created report {}", id);
        Ok(())
    }

    pub fn edit(&self, id: u64, fields: ReportFields) -> Result<()> {
        let mut reports = self.reports()?;
        let mut record = reports.get(id)?.record.clone();

        if let Some(name) = fields.name {
            record.name = Some(name);
        }
        if let Some(date) = fields.date.as_deref() {
            record.date = parse_date(date)?;
        }
        if let Some(summary) = fields.summary {
            record.summary = Some(summary);
        }
        if let Some(plan) = fields.plan {
            record.plan = Some(plan);
        }

        let updated = reports.update(id, record).context("failed to save report")?;
        println!("{}", summary_line(updated));
        Ok(())
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        let mut reports = self.reports()?;
        reports.delete(id)?;
        println!("Deleted report {}", id);
        Ok(())
    }

    pub fn show_settings(&self) -> Result<()> {
        let config = self.config()?;
        let templates = self.templates();

        println!("Data directory:   {}", self.data_dir.display());
        println!("Settings file:    {}", config.settings_path().display());
        println!("Filename pattern: {}", config.get().filename_pattern);

        if templates.has_template() {
            let summary = templates.summary().context("stored template is unreadable")?;
            let keys: Vec<_> = summary.placeholders().iter().map(|k| k.token()).collect();
            println!("Template:         {}", templates.path().display());
            println!("Placeholders:     {}", if keys.is_empty() { "(none)".to_string() } else { keys.join(" ") });
        } else {
            println!("Template:         (none uploaded)");
        }
        Ok(())
    }

    pub fn set_pattern(&self, pattern: &str) -> Result<()> {
        let mut config = self.config()?;
        let updated = config.set_filename_pattern(pattern).context("failed to save settings")?;
        println!("Filename pattern: {}", updated.filename_pattern);
        Ok(())
    }

    pub fn upload_template(&self, file: &Path) -> Result<()> {
        let bytes = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let summary = self.templates().upload(&file_name, &bytes)?;
        if summary.has_placeholders() {
            let keys: Vec<_> = summary.placeholders().iter().map(|k| k.token()).collect();
            println!("Template stored. Placeholders: {}", keys.join(" "));
        } else {
            println!("Template stored, but it contains no placeholders.");
        }
        Ok(())
    }

    pub fn export(&self, id: u64, out_dir: &Path) -> Result<()> {
        let reports = self.reports()?;
        let templates = self.templates();
        let config = self.config()?;

        let exported = Exporter::new(&reports, &templates, config.get())
            .export(id, out_dir)
            .with_context(|| format!("failed to export report {}", id))?;

        println!("{}", exported.path.display());
        Ok(())
    }

    pub fn render(
        &self,
        template: &Path,
        name: String,
        date: &str,
        summary: String,
        plan: String,
        output: &Path,
    ) -> Result<()> {
        let bytes = std::fs::read(template)
            .with_context(|| format!("failed to read {}", template.display()))?;
        let date = parse_date(date)?;

        let context = PlaceholderContext::new()
            .with(PlaceholderKey::Name, name)
            .with(PlaceholderKey::Date, date.format(report_model::DATE_FORMAT).to_string())
            .with(PlaceholderKey::Summary, summary)
            .with(PlaceholderKey::Plan, plan);

        let rendered = render_to_file(&bytes, &context, output)
            .with_context(|| format!("failed to render {}", template.display()))?;

        println!(
            "{} ({} paragraphs rewritten)",
            output.display(),
            rendered.stats.rewritten.total()
        );
        Ok(())
    }
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    parse_report_date(input).context("date must be YYYY-MM-DD")
}

fn preview(text: Option<&str>) -> String {
    let text = text.unwrap_or("").replace(['\r', '\n'], " ");
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

fn summary_line(report: &StoredReport) -> String {
    format!(
        "#{:<4} {}  {:<8}  {}",
        report.id,
        report.record.iso_date(),
        report.record.display_name().unwrap_or("-"),
        preview(report.record.summary.as_deref())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fields(name: Option<&str>, date: Option<&str>) -> ReportFields {
        ReportFields {
            name: name.map(str::to_string),
            date: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_report_defaults_to_last_name() {
        let temp_dir = TempDir::new().unwrap();
        let app = App::new(temp_dir.path().to_path_buf());

        app.new_report(fields(Some("张三"), Some("2024-05-01"))).unwrap();
        app.new_report(fields(None, None)).unwrap();

        let reports = ReportRepository::open(temp_dir.path()).unwrap();
        let second = reports.get(2).unwrap();
        assert_eq!(second.record.name.as_deref(), Some("张三"));
        assert_eq!(second.record.date, Local::now().date_naive());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let app = App::new(temp_dir.path().to_path_buf());

        let err = app.new_report(fields(Some("张三"), Some("05/01/2024"))).unwrap_err();

        assert_eq!(err.to_string(), "date must be YYYY-MM-DD");
        assert!(ReportRepository::open(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let temp_dir = TempDir::new().unwrap();
        let app = App::new(temp_dir.path().to_path_buf());
        app.new_report(ReportFields {
            summary: Some("完成了模块A".to_string()),
            ..fields(Some("张三"), Some("2024-05-01"))
        })
        .unwrap();

        app.edit(1, fields(None, Some("2024-05-08"))).unwrap();

        let reports = ReportRepository::open(temp_dir.path()).unwrap();
        let record = &reports.get(1).unwrap().record;
        assert_eq!(record.iso_date(), "2024-05-08");
        assert_eq!(record.name.as_deref(), Some("张三"));
        assert_eq!(record.summary.as_deref(), Some("完成了模块A"));
    }

    #[test]
    fn test_missing_report() {
        let temp_dir = TempDir::new().unwrap();
        let app = App::new(temp_dir.path().to_path_buf());

        assert!(app.delete(3).is_err());
        assert!(app.edit(3, ReportFields::default()).is_err());
        assert!(app.export(3, temp_dir.path()).is_err());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview(None), "");
        assert_eq!(preview(Some("a\nb")), "a b");
        let long = "字".repeat(40);
        assert_eq!(preview(Some(&long)).chars().count(), PREVIEW_CHARS + 1);
    }
}
