use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{redirect, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::ReportError;
use crate::types::SessionToken;

pub const SESSION_COOKIE: &str = "zbx_session";
const LOGIN_PATH: &str = "/index.php";
const EXPORT_PATH: &str = "/zabbix.php?action=problem.view.csv";

/// HTTP access to one Zabbix frontend.
pub struct ZabbixClient {
    http: Client,
    base_url: String,
}

impl ZabbixClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ReportError> {
        // Redirects stay unfollowed: the session cookie rides on the first
        // response of the login, and a followed redirect would lose it.
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(ReportError::ClientInit)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign in and return the `zbx_session` cookie value.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken, ReportError> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        debug!("POST {}", url);

        let request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&[("name", username), ("password", password), ("enter", "Sign in")])
            .build()
            .map_err(ReportError::LoginRequestBuild)?;

        let res = self
            .http
            .execute(request)
            .await
            .map_err(ReportError::LoginTransport)?;

        if res.status() != StatusCode::FOUND {
            error!("login returned {} instead of a redirect", res.status());
            return Err(ReportError::WrongCredentials {
                status: res.status().as_u16(),
            });
        }

        let token = res
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| SessionToken::new(c.value()))
            .ok_or(ReportError::MissingSessionCookie)?;

        info!("logged in as {}", username);
        Ok(token)
    }

    /// Download the problem list as CSV text.
    pub async fn export_problems_csv(&self, session: &SessionToken) -> Result<String, ReportError> {
        let url = format!("{}{}", self.base_url, EXPORT_PATH);
        debug!("GET {}", url);

        let request = self
            .http
            .get(&url)
            .header(COOKIE, format!("{}={}", SESSION_COOKIE, session.value()))
            .build()
            .map_err(ReportError::ExportRequestBuild)?;

        let res = self
            .http
            .execute(request)
            .await
            .map_err(ReportError::ExportTransport)?;

        if !res.status().is_success() {
            let status = res.status();
            error!("CSV export failed: {}", status);
            return Err(ReportError::ExportStatus {
                status: status.as_u16(),
            });
        }

        let body = res.text().await.map_err(ReportError::ExportTransport)?;
        info!("exported {} bytes of CSV", body.len());
        Ok(body)
    }
}
