//! Headless Chrome driven over the DevTools protocol.

use super::{Browser, BrowserCookie};
use crate::config::BrowserOptions;
use crate::error::{Result, UnderstatError};
use crate::CHROME_ENV_VAR;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::fmt;
use tokio::task::JoinHandle;
use tracing::debug;

/// A Chrome/Chromium process with one open tab.
pub struct ChromeBrowser {
    browser: CdpBrowser,
    page: Page,
    handler: JoinHandle<()>,
}

impl fmt::Debug for ChromeBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromeBrowser").finish_non_exhaustive()
    }
}

fn driver_unavailable(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> UnderstatError {
    UnderstatError::DriverUnavailable {
        driver: "Chrome/Chromium",
        env_var: CHROME_ENV_VAR,
        source: source.into(),
    }
}

fn browser_error(err: impl fmt::Display) -> UnderstatError {
    UnderstatError::Browser {
        message: err.to_string(),
    }
}

impl ChromeBrowser {
    /// Launch Chrome and open a blank tab.
    ///
    /// Fails with `DriverUnavailable` when no usable Chrome binary is found.
    pub async fn launch(options: &BrowserOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .window_size(1920, 1080);
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &options.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(driver_unavailable)?;

        let (browser, mut handler) = CdpBrowser::launch(config).await.map_err(driver_unavailable)?;

        // The handler must be polled for the browser to make progress.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "chrome handler event failed");
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(browser_error)?;
        debug!("chrome launched");
        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    async fn element(&self, xpath: &str) -> Result<Element> {
        self.page.find_xpath(xpath).await.map_err(|e| UnderstatError::Browser {
            message: format!("no element at {xpath}: {e}"),
        })
    }
}

/// JS expression that is true when the element at `xpath` is rendered.
fn visibility_script(xpath: &str) -> Result<String> {
    let literal = serde_json::to_string(xpath).map_err(browser_error)?;
    Ok(format!(
        "(() => {{ \
            const el = document.evaluate({literal}, document, null, \
                XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue; \
            if (!el) return false; \
            const style = window.getComputedStyle(el); \
            return style.display !== 'none' && style.visibility !== 'hidden' \
                && el.getClientRects().length > 0; \
        }})()"
    ))
}

impl Browser for ChromeBrowser {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await.map_err(browser_error)?;
        Ok(())
    }

    async fn click(&mut self, xpath: &str) -> Result<()> {
        self.element(xpath).await?.click().await.map_err(browser_error)?;
        Ok(())
    }

    async fn send_keys(&mut self, xpath: &str, text: &str) -> Result<()> {
        self.element(xpath).await?.type_str(text).await.map_err(browser_error)?;
        Ok(())
    }

    async fn text(&mut self, xpath: &str) -> Result<String> {
        let text = self.element(xpath).await?.inner_text().await.map_err(browser_error)?;
        Ok(text.unwrap_or_default())
    }

    async fn is_displayed(&mut self, xpath: &str) -> Result<bool> {
        let script = visibility_script(xpath)?;
        self.page
            .evaluate(script)
            .await
            .map_err(browser_error)?
            .into_value::<bool>()
            .map_err(browser_error)
    }

    async fn current_url(&mut self) -> Result<String> {
        self.page.wait_for_navigation().await.map_err(browser_error)?;
        let url = self.page.url().await.map_err(browser_error)?;
        url.ok_or_else(|| UnderstatError::Browser {
            message: "page has no URL".to_string(),
        })
    }

    async fn back(&mut self) -> Result<()> {
        self.page.evaluate("history.back()").await.map_err(browser_error)?;
        self.page.wait_for_navigation().await.map_err(browser_error)?;
        Ok(())
    }

    async fn cookies(&mut self) -> Result<Vec<BrowserCookie>> {
        let cookies = self.page.get_cookies().await.map_err(browser_error)?;
        Ok(cookies
            .into_iter()
            .map(|c| BrowserCookie::new(c.name, c.value))
            .collect())
    }

    async fn quit(&mut self) -> Result<()> {
        let closed = self.browser.close().await.map_err(browser_error);
        if closed.is_ok() {
            // Reap the process so it does not outlive the search.
            let _ = self.browser.wait().await;
        }
        self.handler.abort();
        debug!("chrome shut down");
        closed.map(|_| ())
    }
}
