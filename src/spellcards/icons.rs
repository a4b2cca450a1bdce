//! Action-cost tokens such as `[two-actions]` inside entry text.
//!
//! Only the fixed vocabulary below is substituted; any other bracketed text is
//! left as written.

/// The known action tokens, in the order they are substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionIcon {
    OneAction,
    TwoActions,
    ThreeActions,
    Reaction,
    FreeAction,
}

impl ActionIcon {
    pub const ALL: [ActionIcon; 5] = [
        ActionIcon::OneAction,
        ActionIcon::TwoActions,
        ActionIcon::ThreeActions,
        ActionIcon::Reaction,
        ActionIcon::FreeAction,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionIcon::OneAction => "one-action",
            ActionIcon::TwoActions => "two-actions",
            ActionIcon::ThreeActions => "three-actions",
            ActionIcon::Reaction => "reaction",
            ActionIcon::FreeAction => "free-action",
        }
    }

    pub fn token(&self) -> String {
        format!("[{}]", self.name())
    }

    fn glyph(&self) -> &'static str {
        match self {
            ActionIcon::OneAction => "◆",
            ActionIcon::TwoActions => "◆◆",
            ActionIcon::ThreeActions => "◆◆◆",
            ActionIcon::Reaction => "⟲",
            ActionIcon::FreeAction => "◇",
        }
    }
}

/// How a token is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconStyle {
    /// An inline `<img>` pointing at `{dir}/{token}.svg`.
    Html { dir: String },
    /// A plain-text glyph, for terminal output.
    Glyph,
}

impl IconStyle {
    pub fn html(dir: impl Into<String>) -> Self {
        IconStyle::Html { dir: dir.into() }
    }

    fn render(&self, icon: ActionIcon) -> String {
        match self {
            IconStyle::Html { dir } => format!(
                r#"<img class="action" src="{}/{}.svg" alt="{}"/>"#,
                dir.trim_end_matches('/'),
                icon.name(),
                icon.token()
            ),
            IconStyle::Glyph => icon.glyph().to_string(),
        }
    }

    /// Replaces every known action token in `text`.
    pub fn substitute(&self, text: &str) -> String {
        let mut text = text.to_string();
        for icon in ActionIcon::ALL {
            let token = icon.token();
            if text.contains(&token) {
                text = text.replace(&token, &self.render(icon));
            }
        }
        text
    }
}
