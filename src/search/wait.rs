//! Bounded waits on element visibility.

use super::Browser;
use crate::error::{Result, UnderstatError};
use std::fmt;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Something to wait for on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The element at this XPath is present and displayed.
    Visible(String),
    /// The element at this XPath is absent or hidden.
    Invisible(String),
}

impl Condition {
    async fn holds<B: Browser>(&self, browser: &mut B) -> Result<bool> {
        match self {
            Self::Visible(xpath) => browser.is_displayed(xpath).await,
            Self::Invisible(xpath) => Ok(!browser.is_displayed(xpath).await?),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visible(xpath) => write!(f, "visibility of {xpath}"),
            Self::Invisible(xpath) => write!(f, "invisibility of {xpath}"),
        }
    }
}

/// Poll `condition` every `poll` until it holds, failing with
/// `UnderstatError::Timeout` once `limit` has elapsed.
pub async fn wait_until<B: Browser>(
    browser: &mut B,
    condition: &Condition,
    limit: Duration,
    poll: Duration,
) -> Result<()> {
    let poll_loop = async {
        while !condition.holds(browser).await? {
            sleep(poll).await;
        }
        Ok::<_, UnderstatError>(())
    };

    match timeout(limit, poll_loop).await {
        Ok(result) => result,
        Err(_) => Err(UnderstatError::Timeout {
            condition: condition.to_string(),
            timeout: limit,
        }),
    }
}
