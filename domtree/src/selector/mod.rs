//! A small CSS selector subset: enough to discover upgradable elements.
//!
//! Supported: type (`div`), universal (`*`), class (`.foo`), id (`#bar`),
//! attribute presence (`[data-x]`) and equality (`[data-x=y]`,
//! `[data-x="y z"]`), compound selectors, the descendant (whitespace) and
//! child (`>`) combinators, and comma-separated lists.

mod parse;

use std::fmt;

use crate::element::Element;
use crate::error::SelectorError;

/// A parsed selector list.
#[derive(Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// Compounds joined by combinators, left to right.
/// `combinators[i]` sits between `parts[i]` and `parts[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<Compound>,
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    /// `None` is the universal selector.
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let alternatives = parse::Parser::new(source).selector_list()?;
        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// `.name`, without going through the parser.
    pub fn class(name: &str) -> Self {
        Self::single(
            format!(".{name}"),
            Compound {
                classes: vec![name.to_string()],
                ..Default::default()
            },
        )
    }

    /// `[name]`, without going through the parser.
    pub fn attribute(name: &str) -> Self {
        Self::single(
            format!("[{name}]"),
            Compound {
                attributes: vec![AttributeMatch {
                    name: name.to_string(),
                    value: None,
                }],
                ..Default::default()
            },
        )
    }

    fn single(source: String, compound: Compound) -> Self {
        Self {
            source,
            alternatives: vec![Complex {
                parts: vec![compound],
                combinators: Vec::new(),
            }],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, element: &Element) -> bool {
        self.alternatives
            .iter()
            .any(|complex| complex.matches_at(complex.parts.len() - 1, element))
    }
}

impl Complex {
    fn matches_at(&self, index: usize, element: &Element) -> bool {
        if !self.parts[index].matches(element) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.combinators[index - 1] {
            Combinator::Child => element
                .parent()
                .is_some_and(|parent| self.matches_at(index - 1, &parent)),
            Combinator::Descendant => {
                let mut ancestor = element.parent();
                while let Some(current) = ancestor {
                    if self.matches_at(index - 1, &current) {
                        return true;
                    }
                    ancestor = current.parent();
                }
                false
            }
        }
    }
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        // Synthetic roots (`#document`) are not elements.
        if element.tag_name().starts_with('#') {
            return false;
        }
        if let Some(tag) = &self.tag {
            if tag != element.tag_name() {
                return false;
            }
        }
        if !self.ids.is_empty() {
            let id = element.get_id();
            if self.ids.iter().any(|wanted| id.as_deref() != Some(wanted.as_str())) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attributes.iter().all(|attr| match &attr.value {
            None => element.has_attribute(&attr.name),
            Some(value) => element.attribute(&attr.name).as_deref() == Some(value.as_str()),
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({:?})", self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
