//! Scene graph: serialized shape fragments and named groups

use crate::{geometry::FmtScalar, Error, Scalar};
use std::collections::HashSet;
use tracing::debug;

/// Ceiling on the total number of fragments held by one scene graph
///
/// Render-bomb protection: the consuming renderer is a browser, unbounded
/// scenes can hang it.
pub const MAX_SHAPES: usize = 10_000;

/// One serialized SVG shape element owned by the scene graph
///
/// Created once at draw-call time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Named group of fragments with its own transform and visibility
#[derive(Debug, Clone, Default)]
pub struct Group {
    fragments: Vec<Fragment>,
    transform: String,
    hidden: bool,
}

impl Group {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn transform(&self) -> &str {
        &self.transform
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Ordered collection of top-level fragments and named groups
///
/// Group lifecycle: a name is created on first open, stays addressable
/// after closing, and removal is terminal. At most one group is current at
/// a time, there is no nesting.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    shapes: Vec<Fragment>,
    // creation order matters for serialization
    groups: Vec<(String, Group)>,
    removed: HashSet<String>,
    current: Option<String>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total fragment count, top-level plus every group
    pub fn fragment_count(&self) -> usize {
        self.shapes.len()
            + self
                .groups
                .iter()
                .map(|(_, group)| group.fragments.len())
                .sum::<usize>()
    }

    /// Append a fragment to the current group or the top-level list
    ///
    /// Checked against `MAX_SHAPES` before anything is appended, a failed
    /// push leaves the graph untouched.
    pub fn push(&mut self, fragment: Fragment) -> Result<(), Error> {
        if self.fragment_count() >= MAX_SHAPES {
            return Err(Error::ShapeLimitExceeded);
        }
        match &self.current {
            Some(name) => {
                // current group always exists, open_group created it
                match self.groups.iter_mut().find(|(n, _)| n == name) {
                    Some((_, group)) => group.fragments.push(fragment),
                    None => self.shapes.push(fragment),
                }
            }
            None => self.shapes.push(fragment),
        }
        Ok(())
    }

    /// Open a group, creating it on first use, and make it current
    ///
    /// Reopening an existing group resets neither its visibility nor its
    /// transform. Removed names stay dead.
    pub fn open_group(&mut self, name: &str) -> Result<(), Error> {
        if self.removed.contains(name) {
            return Err(Error::UnknownGroup {
                name: name.to_string(),
            });
        }
        if !self.groups.iter().any(|(n, _)| n == name) {
            debug!(name, "scene: new group");
            self.groups.push((name.to_string(), Group::default()));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Close the current group, if any
    pub fn close_group(&mut self) {
        self.current = None;
    }

    pub fn current_group(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn group_mut(&mut self, name: &str) -> Result<&mut Group, Error> {
        self.groups
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, group)| group)
            .ok_or_else(|| Error::UnknownGroup {
                name: name.to_string(),
            })
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, group)| group)
    }

    /// Set the translation of a group to `(dx, dy)`
    ///
    /// Any previous `translate(...)` clause is dropped, the new one is
    /// prepended to whatever else the transform accumulated.
    pub fn move_group(&mut self, name: &str, dx: Scalar, dy: Scalar) -> Result<(), Error> {
        let group = self.group_mut(name)?;
        let rest = strip_translate(&group.transform);
        group.transform = format!("translate({}, {}) {}", FmtScalar(dx), FmtScalar(dy), rest)
            .trim()
            .to_string();
        Ok(())
    }

    /// Append a rotation around `(cx, cy)` to a group's transform
    pub fn rotate_group(
        &mut self,
        name: &str,
        angle: Scalar,
        cx: Scalar,
        cy: Scalar,
    ) -> Result<(), Error> {
        let group = self.group_mut(name)?;
        group.transform = format!(
            "{} rotate({}, {}, {})",
            group.transform,
            FmtScalar(angle),
            FmtScalar(cx),
            FmtScalar(cy)
        )
        .trim()
        .to_string();
        Ok(())
    }

    /// Exclude a group from serialization, keeping its contents
    pub fn hide_group(&mut self, name: &str) -> Result<(), Error> {
        self.group_mut(name)?.hidden = true;
        Ok(())
    }

    /// Bring a hidden group back, fragments and transform intact
    pub fn show_group(&mut self, name: &str) -> Result<(), Error> {
        self.group_mut(name)?.hidden = false;
        Ok(())
    }

    /// Remove a group permanently, the name cannot be reused
    pub fn remove_group(&mut self, name: &str) -> Result<(), Error> {
        let index = self
            .groups
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| Error::UnknownGroup {
                name: name.to_string(),
            })?;
        debug!(name, "scene: remove group");
        self.groups.remove(index);
        self.removed.insert(name.to_string());
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        Ok(())
    }

    /// Drop all fragments and groups, removed names become usable again
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.groups.clear();
        self.removed.clear();
        self.current = None;
    }

    /// Serialize top-level fragments, then groups in creation order
    ///
    /// Hidden groups are skipped entirely rather than emitted empty.
    pub fn write_svg(&self, out: &mut String) {
        for fragment in &self.shapes {
            out.push_str(fragment.as_str());
        }
        for (name, group) in &self.groups {
            if group.hidden {
                continue;
            }
            if group.transform.is_empty() {
                out.push_str(&format!("<g id=\"{}\">", name));
            } else {
                out.push_str(&format!(
                    "<g id=\"{}\" transform=\"{}\">",
                    name, group.transform
                ));
            }
            for fragment in &group.fragments {
                out.push_str(fragment.as_str());
            }
            out.push_str("</g>");
        }
    }
}

/// Drop the first `translate(...)` clause from a transform string
fn strip_translate(transform: &str) -> String {
    match transform.find("translate(") {
        None => transform.to_string(),
        Some(start) => match transform[start..].find(')') {
            None => transform.to_string(),
            Some(end) => {
                let mut rest = String::with_capacity(transform.len());
                rest.push_str(transform[..start].trim_end());
                rest.push_str(&transform[start + end + 1..]);
                rest.trim().to_string()
            }
        },
    }
}
