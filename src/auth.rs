use std::path::Path;

use crate::config::{clear_session, save_session, Session};
use crate::error::{AppError, Result};
use crate::i18n::Labels;
use crate::sheet::DataSource;

/// Check credentials against the users sheet and remember the first match.
pub fn login<S>(
    source: &S,
    cfg_dir: &Path,
    user: &str,
    password: &str,
    labels: &Labels,
) -> Result<Session>
where
    S: DataSource + ?Sized,
{
    if user.is_empty() || password.is_empty() {
        return Err(AppError::MissingCredentials(labels.fill_fields.to_string()));
    }

    let account = source
        .find_accounts(user, password)
        .map_err(|e| match e {
            AppError::Fetch { .. } => {
                tracing::error!(error = %e, "could not check credentials");
                AppError::LoginUnavailable(labels.login_error.to_string())
            }
            other => other,
        })?
        .into_iter()
        .next()
        .ok_or_else(|| {
            tracing::warn!(user, "login rejected");
            AppError::IncorrectCredentials(labels.incorrect_data.to_string())
        })?;

    let session = Session {
        // Sheets sometimes omit the key column from search results.
        user: if account.user.is_empty() {
            user.to_string()
        } else {
            account.user
        },
        name: account.name,
        company: account.company,
    };
    save_session(cfg_dir, &session)?;
    tracing::info!(user = %session.user, "logged in");

    Ok(session)
}

/// Forget the saved session. Returns whether one existed.
pub fn logout(cfg_dir: &Path) -> Result<bool> {
    let existed = clear_session(cfg_dir)?;
    tracing::info!(existed, "logged out");
    Ok(existed)
}
