//! Read-only access to the spreadsheet-backed API.
//!
//! Every collection lives in a sheet of the same document and is read with
//! a plain GET. Searches are equality matches on column values.

mod fetch;

pub use fetch::{is_staff, load_invoices, DocumentView, STAFF_ROLES};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use ureq::Agent;

use crate::error::{AppError, Result};
use crate::invoice::{ClientRecord, DocumentLine};
use crate::tracking::Shipment;

const USERS_SHEET: &str = "usuaris";
const DOCUMENTS_SHEET: &str = "documents";

/// Account row returned by a credential search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserAccount {
    #[serde(alias = "usuari", default, deserialize_with = "crate::invoice::cell")]
    pub user: String,
    #[serde(alias = "nom", default, deserialize_with = "crate::invoice::cell")]
    pub name: String,
    #[serde(alias = "empresa", default, deserialize_with = "crate::invoice::cell")]
    pub company: String,
}

/// The queries the rest of the crate needs from the data source.
pub trait DataSource: Sync {
    fn client_records(&self) -> Result<Vec<ClientRecord>>;

    fn document_lines(&self) -> Result<Vec<DocumentLine>>;

    /// Rows of the users sheet matching both user and password.
    fn find_accounts(&self, user: &str, password: &str) -> Result<Vec<UserAccount>>;

    fn find_shipments(&self, tracking_code: &str) -> Result<Vec<Shipment>>;
}

/// HTTP client for a SheetDB-style endpoint.
pub struct SheetClient {
    agent: Agent,
    base_url: String,
}

impl SheetClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        what: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, what, "fetching");

        let mut request = self.agent.get(&url);
        for (key, value) in query {
            request = request.query(*key, *value);
        }

        let body = request
            .call()
            .map_err(|e| AppError::fetch(what, e))?
            .body_mut()
            .read_to_string()
            .map_err(|e| AppError::fetch(what, e))?;

        serde_json::from_str(&body).map_err(|e| AppError::fetch(what, e))
    }
}

impl DataSource for SheetClient {
    fn client_records(&self) -> Result<Vec<ClientRecord>> {
        self.get_json("client records", "", &[("sheet", USERS_SHEET)])
    }

    fn document_lines(&self) -> Result<Vec<DocumentLine>> {
        self.get_json("document lines", "", &[("sheet", DOCUMENTS_SHEET)])
    }

    fn find_accounts(&self, user: &str, password: &str) -> Result<Vec<UserAccount>> {
        self.get_json(
            "user account",
            "/search",
            &[
                ("sheet", USERS_SHEET),
                ("usuari", user),
                ("contrasenya", password),
            ],
        )
    }

    fn find_shipments(&self, tracking_code: &str) -> Result<Vec<Shipment>> {
        self.get_json(
            "shipment",
            "/search",
            &[("tracking_code", tracking_code)],
        )
    }
}
