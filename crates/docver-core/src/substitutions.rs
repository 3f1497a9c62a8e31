use chrono::Datelike;
use serde::Serialize;

use crate::config::DocsConfig;
use crate::version::VersionInfo;

/// Values the documentation renderer substitutes into every page.
///
/// Follows the renderer's naming: `version` is the short release form and
/// `release` is the full declared version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitutions {
    pub project: String,
    pub version: Option<String>,
    pub release: Option<String>,
    pub copyright: String,
    pub html_short_title: String,
    pub html_short_title_toc: String,
}

impl Substitutions {
    #[must_use]
    pub fn new(config: &DocsConfig, version: Option<&VersionInfo>, year: i32) -> Self {
        let html_short_title = match version {
            Some(info) => format!("{} Documentation v{}", config.project, info.release()),
            None => format!("{} Documentation", config.project),
        };

        Self {
            project: config.project.clone(),
            version: version.map(|info| info.release().to_string()),
            release: version.map(|info| info.full().to_string()),
            copyright: format!(
                "{}-{} {}",
                config.copyright_start_year, year, config.copyright_holder
            ),
            html_short_title,
            html_short_title_toc: String::new(),
        }
    }

    #[must_use]
    pub fn for_current_year(config: &DocsConfig, version: Option<&VersionInfo>) -> Self {
        Self::new(config, version, chrono::Local::now().year())
    }

    /// reStructuredText appended to every source file.
    #[must_use]
    pub fn rst_epilog(&self) -> String {
        let version = self.version.as_deref().unwrap_or_default();
        let release = self.release.as_deref().unwrap_or_default();
        let copyright = &self.copyright;

        format!(
            r"
.. |bold-version| replace:: **{version}**

.. |italic-version| replace:: *{version}*

.. |literal-version| replace:: ``{version}``

.. |literal-release| replace:: ``{release}``

.. role:: gp
.. |$| replace:: :gp:`$`

.. |http:| replace:: http:

.. |(TM)| unicode:: U+2122 .. trademark sign
   :ltrim:

.. |(R)| unicode:: U+00AE .. registered trademark sign
   :ltrim:

.. |copyright| replace:: {copyright}

"
        )
    }
}
