//! Entity browser command (`backoffice browse`)

use std::sync::Arc;

use iocraft::prelude::*;

use crate::config::Config;
use crate::entity::{Client, Document, EntityKind, Invoice, Partner, Project};
use crate::error::{BackofficeError, Result};
use crate::source::HttpSource;
use crate::source::demo::{DEMO_LATENCY, DemoData, demo_source};
use crate::tui::{Browser, EntityBrowser, Screen, ScreenSession};

/// Launch the browser TUI for one entity
pub async fn cmd_browse(kind: EntityKind, demo: bool) -> Result<()> {
    let config = Config::load()?;
    let browser = match kind {
        EntityKind::Clients => open::<Client>(&config, demo)?,
        EntityKind::Projects => open::<Project>(&config, demo)?,
        EntityKind::Partners => open::<Partner>(&config, demo)?,
        EntityKind::Invoices => open::<Invoice>(&config, demo)?,
        EntityKind::Documents => open::<Document>(&config, demo)?,
    };
    tracing::debug!(entity = %browser.kind(), demo, "opening browser");

    element!(EntityBrowser(browser: Some(browser)))
        .fullscreen()
        .await
        .map_err(|e| BackofficeError::Other(format!("TUI error: {e}")))
}

fn open<T: Screen + DemoData>(config: &Config, demo: bool) -> Result<Arc<dyn Browser>> {
    let options = config.coordinator_options(T::default_sort())?;
    let timeout = config.request_timeout();

    if demo {
        let session = ScreenSession::new(demo_source::<T>().with_latency(DEMO_LATENCY), options, timeout)?
            .with_subtitle("demo");
        return Ok(Arc::new(session));
    }

    let source = HttpSource::<T>::from_config(config)?;
    let subtitle = config
        .endpoint()
        .and_then(|endpoint| url::Url::parse(&endpoint).ok())
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| "remote".to_string());
    Ok(Arc::new(ScreenSession::new(source, options, timeout)?.with_subtitle(subtitle)))
}
