//! Output formatting for query results.
//!
//! Raw mode prints scalar values as they are; YAML mode quotes them the way
//! the printer would. Collections always print as YAML.

use rtyaml::yaml::{self, Node};

// =============================================================================
// YamlOutput Trait
// =============================================================================

/// Trait for nodes that can be output as YAML or raw strings.
pub trait YamlOutput {
    /// Serialize as the printer would, without trailing newline.
    fn to_yaml_string(&self) -> Result<String, yaml::Error>;

    /// Serialize with unquoted scalars.
    fn to_raw_string(&self) -> Result<String, yaml::Error>;

    /// Output with current policy (yaml_mode determines format).
    fn format(&self, yaml_mode: bool) -> Result<String, yaml::Error> {
        if yaml_mode {
            self.to_yaml_string()
        } else {
            self.to_raw_string()
        }
    }
}

impl YamlOutput for Node {
    fn to_yaml_string(&self) -> Result<String, yaml::Error> {
        match self {
            Node::Scalar(scalar) => match scalar.value() {
                Some(value) if !value.contains('\n') => Ok(yaml::escape(value)),
                Some(_) => Ok(yaml::to_string(self)?.trim_end().to_string()),
                None => Ok(String::new()),
            },
            _ => Ok(yaml::to_string(self)?.trim_end().to_string()),
        }
    }

    fn to_raw_string(&self) -> Result<String, yaml::Error> {
        match self {
            Node::Scalar(scalar) => Ok(scalar.value().unwrap_or_default().to_string()),
            _ => self.to_yaml_string(),
        }
    }
}

// =============================================================================
// OutputPolicy
// =============================================================================

/// Policy for formatting output.
#[derive(Clone, Debug)]
pub struct OutputPolicy {
    /// Separator between items ("\n" for lines, "\0" for null-terminated).
    pub separator: Separator,
    /// If true, output YAML; if false, use raw format for scalars.
    pub yaml_mode: bool,
}

/// Type of separator between output items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Separator {
    /// Newline-separated output (standard mode).
    Newline,
    /// Null-terminated output (for -0 variants).
    Nul,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Newline => "\n",
            Separator::Nul => "\0",
        }
    }
}

impl OutputPolicy {
    pub fn newline(yaml_mode: bool) -> Self {
        Self {
            separator: Separator::Newline,
            yaml_mode,
        }
    }

    pub fn nul(yaml_mode: bool) -> Self {
        Self {
            separator: Separator::Nul,
            yaml_mode,
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Items joined by the separator. Newline output ends with a newline when
/// anything was written; NUL output terminates every item.
pub fn render_items<'a>(
    items: impl IntoIterator<Item = &'a Node>,
    policy: &OutputPolicy,
) -> Result<String, yaml::Error> {
    let sep = policy.separator.as_str();
    let mut out = String::new();
    for item in items {
        out.push_str(&item.format(policy.yaml_mode)?);
        out.push_str(sep);
    }
    Ok(out)
}

/// Keys and values alternating, as [`render_items`] does.
pub fn render_kv_items<'a>(
    entries: impl IntoIterator<Item = &'a (Node, Node)>,
    policy: &OutputPolicy,
) -> Result<String, yaml::Error> {
    render_items(entries.into_iter().flat_map(|(k, v)| [k, v]), policy)
}

// =============================================================================
// Unit Tests
// =============================================================================
