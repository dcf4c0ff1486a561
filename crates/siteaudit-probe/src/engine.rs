use crate::error::{ProbeError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::stream::StreamExt;
use tokio::task::JoinHandle;

/// A headless Chromium instance that Lighthouse attaches to over DevTools.
///
/// One engine is launched per measurement and shut down afterwards.
pub struct BrowserEngine {
    browser: Browser,
    handler_task: JoinHandle<()>,
    devtools_port: u16,
}

impl BrowserEngine {
    /// Launch Chromium.
    pub async fn launch(headless: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-setuid-sandbox");
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(ProbeError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ProbeError::BrowserLaunch(e.to_string()))?;

        // Drive the CDP connection until the browser goes away
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let devtools_port = match devtools_port(browser.websocket_address()) {
            Ok(port) => port,
            Err(e) => {
                handler_task.abort();
                return Err(e);
            }
        };
        tracing::debug!("Chromium listening on DevTools port {}", devtools_port);

        Ok(Self {
            browser,
            handler_task,
            devtools_port,
        })
    }

    /// Port Lighthouse should connect to.
    #[must_use]
    pub fn devtools_port(&self) -> u16 {
        self.devtools_port
    }

    /// Close the browser and wait for the process to exit.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Browser close returned: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser wait returned: {}", e);
        }
        self.handler_task.abort();
    }
}

/// Extract the DevTools port from a `ws://host:port/devtools/browser/<id>` address.
pub fn devtools_port(ws_address: &str) -> Result<u16> {
    let url = url::Url::parse(ws_address).map_err(|e| {
        ProbeError::BrowserLaunch(format!("invalid DevTools address {ws_address}: {e}"))
    })?;

    url.port_or_known_default().ok_or_else(|| {
        ProbeError::BrowserLaunch(format!("no port in DevTools address {ws_address}"))
    })
}
