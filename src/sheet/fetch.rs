use std::thread;

use super::DataSource;
use crate::config::Session;
use crate::error::Result;
use crate::invoice::{aggregate, Invoices};

/// Roles that see every client's documents.
pub const STAFF_ROLES: &[&str] = &["admin", "administrador", "treballador"];

const DEFAULT_ROLE: &str = "client";

pub fn is_staff(role: &str) -> bool {
    let role = role.trim().to_lowercase();
    STAFF_ROLES.contains(&role.as_str())
}

/// Invoices visible to the logged-in user.
#[derive(Debug)]
pub struct DocumentView {
    pub role: String,
    pub invoices: Invoices,
}

impl DocumentView {
    pub fn is_staff(&self) -> bool {
        is_staff(&self.role)
    }
}

/// Fetch client records and document lines, then aggregate the lines the
/// session may see.
///
/// Both sheets are requested at the same time. If either request fails the
/// error is returned and nothing is aggregated.
pub fn load_invoices<S>(source: &S, session: &Session, unknown_client: &str) -> Result<DocumentView>
where
    S: DataSource + ?Sized,
{
    let (clients, documents) = thread::scope(|scope| {
        let clients = scope.spawn(|| source.client_records());
        let documents = source.document_lines();
        let clients = clients
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (clients, documents)
    });
    let clients = clients?;
    let documents = documents?;

    let role = clients
        .iter()
        .find(|c| c.user == session.user)
        .map(|c| c.role.trim().to_lowercase())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string());

    let visible: Vec<_> = if is_staff(&role) {
        documents
    } else {
        documents
            .into_iter()
            .filter(|d| d.user == session.user)
            .collect()
    };

    tracing::info!(
        user = %session.user,
        %role,
        clients = clients.len(),
        lines = visible.len(),
        "loaded documents"
    );

    Ok(DocumentView {
        role,
        invoices: aggregate(&visible, &clients, unknown_client),
    })
}
