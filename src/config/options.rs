// src/config/options.rs
use super::consts::*;

/// Which game page the watcher scrapes this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Plateau,
    Interface,
}

impl PageKind {
    pub fn path(&self) -> &'static str {
        match self {
            PageKind::Plateau => PLATEAU_PATH,
            PageKind::Interface => INTERFACE_PATH,
        }
    }
}

/// Environment signals the capability gate inspects. Independent of the
/// fetched tree; filled from CLI flags or left at defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientContext {
    /// User-agent string of the hosting context, when known.
    pub user_agent: Option<String>,
    /// Viewport width in px, when known.
    pub viewport_width: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchOptions {
    pub page: PageKind,
    pub context: ClientContext,
    /// Seconds between cycle ticks.
    pub interval_secs: u64,
    /// Run one cycle and exit.
    pub once: bool,
    /// Override the stored apiKey for this run.
    pub api_key: Option<String>,
    /// Defer the snapshot write until the backend confirms a 2xx.
    /// Default false: snapshot is updated as soon as the send is issued.
    pub confirm_delivery: bool,
    /// Print the backend user directory and exit.
    pub list_users: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            page: PageKind::Plateau,
            context: ClientContext::default(),
            interval_secs: REFRESH_INTERVAL_SECS,
            once: false,
            api_key: None,
            confirm_delivery: false,
            list_users: false,
        }
    }
}
