use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::render_utils::{InputHint, render_hints, render_overlay};

/// Informational overlays reachable from the navigation chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoTopic {
    Features,
    Technology,
    ClinicalEvidence,
    About,
}

impl InfoTopic {
    pub const ALL: [InfoTopic; 4] = [
        InfoTopic::Features,
        InfoTopic::Technology,
        InfoTopic::ClinicalEvidence,
        InfoTopic::About,
    ];

    pub fn title(self) -> &'static str {
        match self {
            InfoTopic::Features => "Core Features",
            InfoTopic::Technology => "Our Technology",
            InfoTopic::ClinicalEvidence => "Clinical Evidence",
            InfoTopic::About => "About ImagingIQ",
        }
    }

    /// Key that opens the topic from the home view.
    pub fn key(self) -> char {
        match self {
            InfoTopic::Features => 'f',
            InfoTopic::Technology => 't',
            InfoTopic::ClinicalEvidence => 'e',
            InfoTopic::About => 'a',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.key() == key)
    }

    pub fn body(self) -> &'static [&'static str] {
        match self {
            InfoTopic::Features => &[
                "Automated anomaly detection",
                "Heatmap visualization",
                "Automated reporting",
            ],
            InfoTopic::Technology => &[
                "Convolutional neural networks",
                "PACS/HIS compatibility",
                "Encrypted transport and storage",
            ],
            InfoTopic::ClinicalEvidence => &[
                "Benchmarked against validated cases",
                "Peer-reviewed algorithms",
            ],
            InfoTopic::About => &["AI-assisted medical imaging diagnostics."],
        }
    }
}

pub fn render_info(frame: &mut Frame, area: Rect, topic: InfoTopic) {
    let body = topic.body();
    let inner = render_overlay(
        frame,
        area,
        topic.title(),
        Color::Cyan,
        52,
        body.len() as u16 + 5,
    );

    let mut lines = vec![Line::default()];
    lines.extend(body.iter().map(|item| {
        Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Cyan)),
            Span::raw(*item),
        ])
    }));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    render_hints(frame, inner, &[InputHint::new("Esc", "close")], Color::Cyan);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_to_topics() {
        for topic in InfoTopic::ALL {
            assert_eq!(InfoTopic::from_key(topic.key()), Some(topic));
        }
        assert_eq!(InfoTopic::from_key('z'), None);
    }
}
