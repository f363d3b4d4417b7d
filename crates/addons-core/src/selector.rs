//! Setup selection: argument, single-entry auto-select, or interactive choice

use crate::error::SetupError;
use crate::prompt::Prompt;
use anyhow::Result;
use std::path::Path;

/// How the setup was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedBy {
    Argument,
    OnlyOption,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub by: SelectedBy,
}

/// Pick a setup from `catalog`.
///
/// Resolution order, first match wins:
/// 1. `choice` names an entry of the catalog
/// 2. the catalog has exactly one entry
/// 3. ask: a 1-based index or an exact (trimmed) name; anything else fails
///    with [`SetupError::InvalidSelection`] without asking again
///
/// `descriptions` is matched to `catalog` by position and may be shorter.
pub fn select(
    catalog: &[String],
    descriptions: &[Option<String>],
    choice: Option<&str>,
    catalog_root: &Path,
    prompt: &mut dyn Prompt,
) -> Result<Selection> {
    if catalog.is_empty() {
        return Err(SetupError::EmptyCatalog(catalog_root.to_path_buf()).into());
    }

    if let Some(name) = choice.filter(|c| !c.is_empty()) {
        if catalog.iter().any(|t| t == name) {
            return Ok(Selection {
                name: name.to_string(),
                by: SelectedBy::Argument,
            });
        }
    }

    if let [only] = catalog {
        return Ok(Selection {
            name: only.clone(),
            by: SelectedBy::OnlyOption,
        });
    }

    prompt.say(&numbered_list(catalog, descriptions))?;
    let answer = prompt.ask("Choose a setup (number or name)")?;

    let name = resolve_answer(catalog, &answer)
        .ok_or_else(|| SetupError::InvalidSelection(answer.trim().to_string()))?;

    Ok(Selection {
        name: name.to_string(),
        by: SelectedBy::Prompt,
    })
}

fn numbered_list(catalog: &[String], descriptions: &[Option<String>]) -> String {
    let mut out = String::from("Available setups:");
    for (idx, name) in catalog.iter().enumerate() {
        match descriptions.get(idx).and_then(Option::as_deref) {
            Some(desc) => out.push_str(&format!("\n  {}. {} - {}", idx + 1, name, desc)),
            None => out.push_str(&format!("\n  {}. {}", idx + 1, name)),
        }
    }
    out
}

/// Index by range, name by exact membership. No fuzzy matching.
fn resolve_answer<'a>(catalog: &'a [String], answer: &str) -> Option<&'a str> {
    let answer = answer.trim();

    if let Ok(num) = answer.parse::<usize>() {
        if (1..=catalog.len()).contains(&num) {
            return Some(&catalog[num - 1]);
        }
    }

    catalog.iter().find(|t| *t == answer).map(String::as_str)
}
