use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::i18n::Labels;
use crate::invoice::cell;
use crate::sheet::DataSource;

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Shipment {
    #[serde(default, deserialize_with = "cell")]
    pub tracking_code: String,
    #[serde(alias = "origen", default, deserialize_with = "cell")]
    pub origin: String,
    #[serde(alias = "desti", default, deserialize_with = "cell")]
    pub destination: String,
    #[serde(default, deserialize_with = "cell")]
    pub eta: String,
    #[serde(alias = "ubicacio_actual", default, deserialize_with = "cell")]
    pub current_location: String,
    #[serde(alias = "estat", default, deserialize_with = "cell")]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentStatus {
    InWarehouse,
    InTransit,
    Delivered,
    Unknown,
}

impl ShipmentStatus {
    /// Map the sheet's status cell. Values are written in Catalan.
    pub fn from_cell(value: &str) -> Self {
        match value.trim() {
            "En magatzem" => ShipmentStatus::InWarehouse,
            "En trànsit" => ShipmentStatus::InTransit,
            "Lliurat" => ShipmentStatus::Delivered,
            _ => ShipmentStatus::Unknown,
        }
    }

    /// Progress percentage shown on the status bar.
    pub fn progress(self) -> u8 {
        match self {
            ShipmentStatus::InWarehouse => 10,
            ShipmentStatus::InTransit => 50,
            ShipmentStatus::Delivered => 100,
            ShipmentStatus::Unknown => 0,
        }
    }

    pub fn label(self, labels: &Labels) -> &'static str {
        match self {
            ShipmentStatus::InWarehouse => labels.status_warehouse,
            ShipmentStatus::InTransit => labels.status_transit,
            ShipmentStatus::Delivered => labels.status_delivered,
            ShipmentStatus::Unknown => labels.status_unknown,
        }
    }
}

impl Shipment {
    pub fn status(&self) -> ShipmentStatus {
        ShipmentStatus::from_cell(&self.status)
    }
}

/// Look up a shipment by tracking code. The first match wins.
pub fn track<S>(source: &S, code: &str, labels: &Labels) -> Result<Shipment>
where
    S: DataSource + ?Sized,
{
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::MissingTrackingCode);
    }

    let shipment = source
        .find_shipments(code)
        .map_err(|e| match e {
            AppError::Fetch { .. } => {
                tracing::error!(error = %e, code, "could not look up shipment");
                AppError::TrackingUnavailable(labels.tracking_fetch_error.to_string())
            }
            other => other,
        })?
        .into_iter()
        .next();
    tracing::info!(code, found = shipment.is_some(), "tracking lookup");

    shipment.ok_or_else(|| AppError::ShipmentNotFound {
        code: code.to_string(),
        message: labels.shipment_not_found.to_string(),
    })
}

/// Text progress bar, e.g. `[#####-----] 50%`.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100);
    let filled = width * percent as usize / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}
