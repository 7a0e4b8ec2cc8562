// Named text panes the renderer draws into

use std::collections::BTreeMap;

use crate::error::CalendarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pane {
    Header,
    MonthGrid,
    Timeline,
    Detail,
    Notices,
}

impl Pane {
    pub const ALL: [Pane; 5] = [
        Pane::Header,
        Pane::MonthGrid,
        Pane::Timeline,
        Pane::Detail,
        Pane::Notices,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pane::Header => "header",
            Pane::MonthGrid => "month-grid",
            Pane::Timeline => "timeline",
            Pane::Detail => "detail",
            Pane::Notices => "notices",
        }
    }
}

/// A surface only owns the panes it was created with. Drawing into any other
/// pane is logged and skipped.
#[derive(Debug, Clone, Default)]
pub struct RenderSurface {
    panes: BTreeMap<Pane, String>,
}

impl RenderSurface {
    pub fn with_panes(panes: &[Pane]) -> Self {
        Self {
            panes: panes.iter().map(|pane| (*pane, String::new())).collect(),
        }
    }

    pub fn full() -> Self {
        Self::with_panes(&Pane::ALL)
    }

    pub fn pane_mut(&mut self, pane: Pane) -> Result<&mut String, CalendarError> {
        self.panes
            .get_mut(&pane)
            .ok_or_else(|| CalendarError::MissingRenderTarget(pane.name().to_string()))
    }

    pub fn pane(&self, pane: Pane) -> Option<&str> {
        self.panes.get(&pane).map(String::as_str)
    }

    /// Redraw one pane from scratch. A missing pane is a logged no-op.
    pub fn draw<F>(&mut self, pane: Pane, paint: F)
    where
        F: FnOnce(&mut String),
    {
        match self.pane_mut(pane) {
            Ok(out) => {
                out.clear();
                paint(out);
            }
            Err(err) => log::warn!("Skipping draw: {}", err),
        }
    }

    /// All non-empty panes in display order
    pub fn compose(&self) -> String {
        self.panes
            .values()
            .filter(|content| !content.is_empty())
            .map(|content| content.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
