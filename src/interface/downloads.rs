use crate::interface::notifications::Notification;
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Files offered on the downloads page, by the `data-type` of their button.
#[derive(Clone, Debug, Display, EnumString, Eq, PartialEq, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    Aggregated,
    Analysis,
    Docs,
    /// Any other button falls back to a plain text file.
    #[strum(default)]
    Other(String),
}

impl DownloadKind {
    pub fn parse(data_type: &str) -> Self {
        data_type
            .parse()
            .unwrap_or_else(|_| DownloadKind::Other(data_type.to_string()))
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DownloadKind::Aggregated => "donnees_aggregees_2014.csv",
            DownloadKind::Analysis => "resultats_analyse.json",
            DownloadKind::Docs => "documentation_complete.pdf",
            DownloadKind::Other(_) => "download.txt",
        }
    }

    pub fn format(&self) -> &'static str {
        match self {
            DownloadKind::Aggregated => "CSV",
            DownloadKind::Analysis => "JSON",
            DownloadKind::Docs => "PDF",
            DownloadKind::Other(_) => "TXT",
        }
    }
}

/// A download in progress: announced when started, confirmed when finished.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Download {
    pub kind: DownloadKind,
    pub file_name: &'static str,
}

impl Download {
    pub fn start(data_type: &str) -> (Self, Notification) {
        let kind = DownloadKind::parse(data_type);
        let download = Self {
            file_name: kind.file_name(),
            kind,
        };
        tracing::info!(file = download.file_name, "download requested");
        let notification = Notification::info(format!("Téléchargement de {}...", download.file_name));

        (download, notification)
    }

    pub fn complete(&self) -> Notification {
        Notification::success(format!("{} téléchargé avec succès", self.kind.format()))
    }
}
