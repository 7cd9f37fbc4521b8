//! Step tab bar for the editor workflow.

use crate::ui::theme::{Styles, Symbols};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// A horizontal tab bar over the ordered workflow steps.
///
/// Steps before the selected one are marked as completed; there is no
/// direct-jump affordance, matching the back/continue workflow.
#[derive(Debug, Clone)]
pub struct StepTabs<'a> {
    titles: Vec<&'a str>,
    selected: usize,
    block: Option<Block<'a>>,
}

impl<'a> StepTabs<'a> {
    /// Create a new step tab bar.
    pub fn new(titles: Vec<&'a str>) -> Self {
        Self {
            titles,
            selected: 0,
            block: None,
        }
    }

    /// Set the selected step index.
    #[must_use]
    pub fn select(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    /// Set the block to wrap the tabs.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for StepTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = match self.block {
            Some(b) => {
                let inner = b.inner(area);
                b.render(area, buf);
                inner
            }
            None => area,
        };

        if area.height < 1 {
            return;
        }

        let mut spans = Vec::new();
        for (i, title) in self.titles.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" \u{2192} ", Styles::dim())); // →
            }

            if i < self.selected {
                spans.push(Span::styled(
                    format!("{} ", Symbols::STEP_DONE),
                    Styles::success(),
                ));
                spans.push(Span::styled(*title, Styles::dim()));
            } else if i == self.selected {
                spans.push(Span::styled(*title, Styles::highlight()));
            } else {
                spans.push(Span::styled(*title, Styles::dim()));
            }
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
