use anyhow::{Context, Result};
use docver_core::{
    DocsConfig, Substitutions, VersionExtractionError, VersionInfo, VersionStatus,
    resolve_from_path, version_report,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

#[derive(Debug, Default)]
pub struct Overrides {
    pub descriptor: Option<PathBuf>,
    pub suffix: Option<String>,
}

/// Everything resolved once at the start of a docs build.
pub struct BuildContext {
    pub config: DocsConfig,
    pub descriptor: PathBuf,
    pub version: Result<VersionInfo, VersionExtractionError>,
}

impl BuildContext {
    pub fn load(config_path: &Path, overrides: Overrides) -> Result<Self> {
        let mut config = DocsConfig::load(config_path)?;
        if let Some(descriptor) = overrides.descriptor {
            config = config.with_descriptor(descriptor);
        }
        if let Some(suffix) = overrides.suffix {
            config = config.with_suffix_marker(suffix);
        }
        Ok(Self::resolve(config))
    }

    pub fn resolve(config: DocsConfig) -> Self {
        let descriptor = config.descriptor_path();
        let version = resolve_from_path(&descriptor, &config.suffix_marker);
        if let Err(err) = &version {
            log::warn!(
                "Continuing without a version, {} unusable: {err}",
                descriptor.display()
            );
        }
        Self {
            config,
            descriptor,
            version,
        }
    }

    fn version_info(&self) -> Option<&VersionInfo> {
        self.version.as_ref().ok()
    }

    fn substitutions(&self) -> Substitutions {
        Substitutions::for_current_year(&self.config, self.version_info())
    }
}

pub fn version(ctx: &BuildContext, out: &mut impl Write) -> Result<Status> {
    writeln!(out, "{}", version_report(&ctx.descriptor, &ctx.version))?;
    Ok(Status::Success)
}

pub fn release(ctx: &BuildContext, out: &mut impl Write) -> Result<Status> {
    writeln!(
        out,
        "{}",
        ctx.version_info().map_or("", VersionInfo::release)
    )?;
    Ok(Status::Success)
}

pub fn full(ctx: &BuildContext, out: &mut impl Write) -> Result<Status> {
    writeln!(out, "{}", ctx.version_info().map_or("", VersionInfo::full))?;
    Ok(Status::Success)
}

pub fn epilog(ctx: &BuildContext, out: &mut impl Write) -> Result<Status> {
    write!(out, "{}", ctx.substitutions().rst_epilog())?;
    Ok(Status::Success)
}

pub fn title(ctx: &BuildContext, out: &mut impl Write) -> Result<Status> {
    writeln!(out, "{}", ctx.substitutions().html_short_title)?;
    Ok(Status::Success)
}

pub fn substitutions(ctx: &BuildContext, out: &mut impl Write) -> Result<Status> {
    let json = serde_json::to_string_pretty(&ctx.substitutions())?;
    writeln!(out, "{json}")?;
    Ok(Status::Success)
}

pub fn json_versions(
    ctx: &BuildContext,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<Status> {
    let payload = ctx.config.versions_data.jsonp()?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{payload}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote versions index to {}", path.display());
        }
        None => writeln!(out, "{payload}")?,
    }
    Ok(Status::Success)
}

pub fn json_versions_file(ctx: &BuildContext, out: &mut impl Write) -> Result<Status> {
    let name = ctx.config.versions_file_name().with_context(|| {
        format!(
            "Versions URL has no file name: {}",
            ctx.config.versions_url()
        )
    })?;
    writeln!(out, "{name}")?;
    Ok(Status::Success)
}

pub fn check(ctx: &BuildContext, out: &mut impl Write) -> Result<Status> {
    let Some(info) = ctx.version_info() else {
        writeln!(out, "{}", version_report(&ctx.descriptor, &ctx.version))?;
        return Ok(Status::Failure);
    };

    if let Some((status, entry)) = ctx.config.versions_data.find(info) {
        writeln!(
            out,
            "{} is {} as {}",
            info.full(),
            status.as_str(),
            entry.label()
        )?;
        Ok(Status::Success)
    } else {
        writeln!(out, "{} is {}", info.full(), VersionStatus::Unlisted.as_str())?;
        log::warn!("{} is missing from the versions data", info.full());
        Ok(Status::Failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_for(pom: Option<&str>) -> (tempfile::TempDir, BuildContext) {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let descriptor = temp_dir.path().join("pom.xml");
        if let Some(pom) = pom {
            std::fs::write(&descriptor, pom).expect("pom should be written");
        }
        let ctx = BuildContext::resolve(DocsConfig::default().with_descriptor(descriptor));
        (temp_dir, ctx)
    }

    fn run(
        command: impl Fn(&BuildContext, &mut Vec<u8>) -> Result<Status>,
        ctx: &BuildContext,
    ) -> (String, Status) {
        let mut out = Vec::new();
        let code = command(ctx, &mut out).expect("command should not error");
        (
            String::from_utf8(out).expect("output should be utf-8"),
            code,
        )
    }

    #[test]
    fn version_line_for_snapshot() {
        let (_dir, ctx) = context_for(Some("<project><version>0.9.10-SNAPSHOT</version></project>"));
        let (output, code) = run(|c, o| version(c, o), &ctx);

        assert_eq!(output, "SDK Version: 0.9.10 (0.9.10-SNAPSHOT)\n");
        assert_eq!(code, Status::Success);
    }

    #[test]
    fn missing_descriptor_degrades_without_failing() {
        let (_dir, ctx) = context_for(None);

        let (output, code) = run(|c, o| version(c, o), &ctx);
        assert!(output.starts_with("Could not get version from"));
        assert_eq!(code, Status::Success);

        let (output, _) = run(|c, o| release(c, o), &ctx);
        assert_eq!(output, "\n");

        let (output, _) = run(|c, o| title(c, o), &ctx);
        assert_eq!(output, "Coopr Documentation\n");

        let (output, code) = run(|c, o| check(c, o), &ctx);
        assert!(output.starts_with("Could not get version from"));
        assert_eq!(code, Status::Failure);
    }

    #[test]
    fn release_and_full_print_one_form_each() {
        let (_dir, ctx) = context_for(Some("<project><version>0.9.10-SNAPSHOT</version></project>"));

        assert_eq!(run(|c, o| release(c, o), &ctx).0, "0.9.10\n");
        assert_eq!(run(|c, o| full(c, o), &ctx).0, "0.9.10-SNAPSHOT\n");
    }

    #[test]
    fn epilog_and_substitutions_carry_version() {
        let (_dir, ctx) = context_for(Some("<project><version>0.9.9</version></project>"));

        let (epilog_text, _) = run(|c, o| epilog(c, o), &ctx);
        assert!(epilog_text.contains("``0.9.9``"));

        let (json, _) = run(|c, o| substitutions(c, o), &ctx);
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["version"], "0.9.9");
        assert_eq!(value["html_short_title"], "Coopr Documentation v0.9.9");
    }

    #[test]
    fn json_versions_writes_file() {
        let (dir, ctx) = context_for(Some("<project><version>0.9.9</version></project>"));
        let target = dir.path().join("json-versions.js");

        let (stdout, _) = run(|c, o| json_versions(c, Some(target.as_path()), o), &ctx);
        assert!(stdout.is_empty());

        let written = std::fs::read_to_string(&target).expect("payload should be written");
        assert!(written.starts_with("versionscallback({"));
        assert!(written.ends_with(");\n"));

        assert_eq!(
            run(|c, o| json_versions_file(c, o), &ctx).0,
            "json-versions.js\n"
        );
    }

    #[test]
    fn check_reports_status() {
        let (_dir, ctx) = context_for(Some("<project><version>0.9.9</version></project>"));
        let (output, code) = run(|c, o| check(c, o), &ctx);
        assert_eq!(output, "0.9.9 is current as 0.9.9\n");
        assert_eq!(code, Status::Success);

        let (_dir, ctx) = context_for(Some("<project><version>1.0.0</version></project>"));
        let (output, code) = run(|c, o| check(c, o), &ctx);
        assert_eq!(output, "1.0.0 is unlisted\n");
        assert_eq!(code, Status::Failure);

        let (_dir, ctx) = context_for(Some("<project><version>0.9.10-SNAPSHOT</version></project>"));
        let (output, code) = run(|c, o| check(c, o), &ctx);
        assert_eq!(output, "0.9.10-SNAPSHOT is development as 0.9.10\n");
        assert_eq!(code, Status::Success);
    }

    #[test]
    fn overrides_apply_on_load() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let descriptor = temp_dir.path().join("pom.xml");
        std::fs::write(&descriptor, "<project><version>2.0.0-dev</version></project>")
            .expect("pom should be written");

        let ctx = BuildContext::load(
            &temp_dir.path().join("docver.json"),
            Overrides {
                descriptor: Some(descriptor),
                suffix: Some("-dev".to_string()),
            },
        )
        .expect("context should load");

        let info = ctx.version.expect("version should resolve");
        assert_eq!(info.release(), "2.0.0");
    }
}
