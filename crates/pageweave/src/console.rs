//! Styled terminal output.
//!
//! Command-line front ends address colors by name ("red", "lightcyan") and
//! mark emphasis inline with attribute tags (`<bold>important</bold>`).
//! This module turns both into ANSI escapes via [`console::Style`].

use console::Style;
use thiserror::Error;

/// Inline attribute tags honored by [`style_text`].
const ATTRIBUTES: &[(&str, fn(Style) -> Style)] = &[
    ("bold", Style::bold),
    ("dim", Style::dim),
    ("underline", Style::underlined),
    ("italic", Style::italic),
    ("blink", Style::blink),
    ("reverse", Style::reverse),
];

/// An output color name nothing maps to.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown output color `{0}`")]
pub struct InvalidColor(pub String);

/// Maps a color name to a [`Style`].
///
/// The eight ANSI base colors are accepted, plus their `light` prefixed
/// variants ("lightred", "lightcyan") mapped to the bright palette. Names
/// are case-insensitive.
pub fn style_for(color: &str) -> Result<Style, InvalidColor> {
    let name = color.to_ascii_lowercase();
    let (base, bright) = match name.strip_prefix("light") {
        Some(rest) => (rest, true),
        None => (name.as_str(), false),
    };
    let style = match base {
        "black" => Style::new().black(),
        "red" => Style::new().red(),
        "green" => Style::new().green(),
        "yellow" => Style::new().yellow(),
        "blue" => Style::new().blue(),
        "magenta" => Style::new().magenta(),
        "cyan" => Style::new().cyan(),
        "white" => Style::new().white(),
        _ => return Err(InvalidColor(color.to_string())),
    };
    Ok(if bright { style.bright() } else { style })
}

/// Styles `text` in the named color, expanding inline attribute tags.
///
/// Attribute spans keep the surrounding color and add the attribute on
/// top, so `<bold>x</bold>` inside a red line renders bold red.
pub fn style_text(text: &str, color: &str) -> Result<String, InvalidColor> {
    let base = style_for(color)?.force_styling(true);
    let mut out = String::new();
    let mut rest = text;
    while !rest.is_empty() {
        // Earliest complete <attr>..</attr> span wins; everything before
        // it takes the base style only.
        let next = ATTRIBUTES
            .iter()
            .filter_map(|(name, apply)| {
                let open = format!("<{}>", name);
                let close = format!("</{}>", name);
                let start = rest.find(&open)?;
                let end = rest[start + open.len()..].find(&close)?;
                Some((start, start + open.len(), end, close.len(), apply))
            })
            .min_by_key(|&(start, ..)| start);
        match next {
            Some((start, inner_start, inner_len, close_len, apply)) => {
                if start > 0 {
                    out.push_str(&base.apply_to(&rest[..start]).to_string());
                }
                let inner = &rest[inner_start..inner_start + inner_len];
                out.push_str(&apply(base.clone()).apply_to(inner).to_string());
                rest = &rest[inner_start + inner_len + close_len..];
            }
            None => {
                out.push_str(&base.apply_to(rest).to_string());
                break;
            }
        }
    }
    Ok(out)
}

/// Prints one line of styled output to stdout.
pub fn display_output(text: &str, color: &str) -> Result<(), InvalidColor> {
    println!("{}", style_text(text, color)?);
    Ok(())
}
