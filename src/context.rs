//! Rendering context - the theme handed down to components while drawing

use crate::theme::Theme;

/// Context passed to components during rendering
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        RenderContext { theme }
    }

    /// Child context drawing with a different theme
    pub fn with_theme(&self, theme: &'a Theme) -> Self {
        RenderContext { theme }
    }
}

/// Hook trait for accessing theme from context
pub trait UseTheme {
    fn use_theme<'a>(&self, ctx: &'a RenderContext) -> &'a Theme {
        ctx.theme
    }
}

impl<T> UseTheme for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::BorderStyle;

    #[test]
    fn test_context_theme_swap() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ascii = theme.clone().with_border_style(BorderStyle::Ascii);
        let ctx = RenderContext::new(&theme);
        let child = ctx.with_theme(&ascii);

        assert!(std::ptr::eq(ctx.theme, &theme));
        assert_eq!(child.use_theme(&child).border_style, BorderStyle::Ascii);
    }
}
