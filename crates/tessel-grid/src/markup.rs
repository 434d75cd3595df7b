//! Builds grids and dividers from `.tgrid` documents.
//!
//! `tessel-markup` only knows nodes and properties; this module decides what
//! `Grid`, `Row`, `Cell`, and `Divider` mean. Divider targets are written as
//! keys and resolved to indices here, once, through the grid lookup tables.

use std::collections::HashSet;

use tessel_engine::coords::Rect;
use tessel_markup::{Document, Node, Value, parse_str};

use crate::divider::{ControlRange, DividerConfig, DividerDirection, DividerTarget};
use crate::error::{BuildError, LoadError};
use crate::grid::{CellSpec, GridLayout, GridStructure, RowSpec};
use crate::key::{DividerKey, Key};
use crate::scene::GridScene;
use crate::track::{MINIMUM_RATIO, Redistribution, ResizeRules};

// ── Layout ────────────────────────────────────────────────────────────────

/// A grid plus the dividers declared alongside it.
#[derive(Debug, Clone)]
pub struct Layout {
    pub structure: GridStructure,
    pub grid: GridLayout,
    pub dividers: Vec<(DividerKey, DividerConfig)>,
}

impl Layout {
    /// Put the grid and its dividers into a scene covering `bounds`.
    pub fn into_scene(self, bounds: Rect) -> Result<GridScene, BuildError> {
        let mut scene = GridScene::new(self.grid, bounds);
        for (key, config) in self.dividers {
            scene.add_divider(key, config)?;
        }
        Ok(scene)
    }
}

/// Parse and build a `.tgrid` source string.
pub fn load_str(src: &str) -> Result<Layout, LoadError> {
    let doc = parse_str(src)?;
    Ok(build(&doc)?)
}

pub fn build(doc: &Document) -> Result<Layout, BuildError> {
    let root = &doc.root;
    if root.kind != "Grid" {
        return Err(BuildError::markup(
            root.line,
            format!("the root node must be `Grid`, found `{}`", root.kind),
        ));
    }
    check_props(root, &["min_ratio", "policy"])?;

    let min_ratio = opt_f32(root, "min_ratio")?.unwrap_or(MINIMUM_RATIO);
    let redistribution = match opt_name(root, "policy")? {
        None | Some("adjacent") => Redistribution::Adjacent,
        Some("proportional") => Redistribution::Proportional,
        Some(other) => {
            return Err(BuildError::markup(
                prop_line(root, "policy"),
                format!("unknown policy `{other}`, expected `adjacent` or `proportional`"),
            ));
        }
    };
    let rules = ResizeRules { min_ratio, redistribution };

    let mut structure = GridStructure::new();
    let mut divider_nodes = Vec::new();
    for child in &root.children {
        match child.kind.as_str() {
            "Row" => structure.rows.push(build_row(child)?),
            "Divider" => divider_nodes.push(child),
            other => {
                return Err(BuildError::markup(
                    child.line,
                    format!("unexpected `{other}` inside Grid, expected `Row` or `Divider`"),
                ));
            }
        }
    }

    let grid = GridLayout::new(&structure, rules)?;

    let mut seen = HashSet::new();
    let mut dividers = Vec::with_capacity(divider_nodes.len());
    for node in divider_nodes {
        let key = label(node)?;
        if !seen.insert(key.clone()) {
            return Err(BuildError::markup(node.line, format!("divider `{key}` is declared twice")));
        }
        let config = build_divider(node, &grid)?;
        dividers.push((key, config));
    }

    log::debug!("layout built: {} rows, {} dividers", grid.row_count(), dividers.len());
    Ok(Layout { structure, grid, dividers })
}

// ── Rows and cells ────────────────────────────────────────────────────────

fn build_row(node: &Node) -> Result<RowSpec, BuildError> {
    check_props(node, &["weight"])?;
    let mut row = RowSpec::new(label(node)?);
    row.weight = opt_f32(node, "weight")?;
    for child in &node.children {
        if child.kind != "Cell" {
            return Err(BuildError::markup(
                child.line,
                format!("unexpected `{}` inside Row, expected `Cell`", child.kind),
            ));
        }
        check_props(child, &["weight"])?;
        if let Some(grandchild) = child.children.first() {
            return Err(BuildError::markup(grandchild.line, "a Cell cannot have children"));
        }
        row.cells.push(CellSpec { key: label(child)?, weight: opt_f32(child, "weight")? });
    }
    Ok(row)
}

// ── Dividers ──────────────────────────────────────────────────────────────

const DIVIDER_PROPS: &[&str] =
    &["direction", "range", "row", "cell", "invert", "min_movement", "max_movement", "grab_radius"];

fn build_divider(node: &Node, grid: &GridLayout) -> Result<DividerConfig, BuildError> {
    check_props(node, DIVIDER_PROPS)?;

    let direction = match opt_name(node, "direction")? {
        None | Some("horizontal") => DividerDirection::Horizontal,
        Some("vertical") => DividerDirection::Vertical,
        Some(other) => {
            return Err(BuildError::markup(
                prop_line(node, "direction"),
                format!("unknown direction `{other}`, expected `horizontal` or `vertical`"),
            ));
        }
    };
    let control_range = match opt_name(node, "range")? {
        None | Some("local") => ControlRange::LocalLine,
        Some("all") => ControlRange::AllLine,
        Some(other) => {
            return Err(BuildError::markup(
                prop_line(node, "range"),
                format!("unknown range `{other}`, expected `local` or `all`"),
            ));
        }
    };

    let target = match direction {
        DividerDirection::Horizontal => horizontal_target(node, grid)?,
        DividerDirection::Vertical => vertical_target(node, grid)?,
    };

    let defaults = DividerConfig::default();
    let config = DividerConfig {
        direction,
        control_range,
        min_movement_ratio: opt_f32(node, "min_movement")?.unwrap_or(defaults.min_movement_ratio),
        max_movement_ratio: opt_f32(node, "max_movement")?.unwrap_or(defaults.max_movement_ratio),
        invert_axis: opt_bool(node, "invert")?.unwrap_or(false),
        target,
        grab_radius: opt_f32(node, "grab_radius")?.unwrap_or(defaults.grab_radius),
    };
    config.validate()?;
    Ok(config)
}

/// A horizontal divider sits on the leading edge of `cell`.
fn horizontal_target(node: &Node, grid: &GridLayout) -> Result<DividerTarget, BuildError> {
    let Some(cell) = opt_name(node, "cell")? else {
        return Err(BuildError::markup(node.line, "a horizontal divider needs `cell: <key>`"));
    };
    let line = prop_line(node, "cell");
    let addr = grid
        .locate_cell(cell)
        .ok_or_else(|| BuildError::markup(line, format!("unknown cell `{cell}`")))?;

    if let Some(row) = opt_name(node, "row")? {
        let r = resolve_row(node, grid, row)?;
        if r != addr.row {
            return Err(BuildError::markup(line, format!("cell `{cell}` is not in row `{row}`")));
        }
    }
    if addr.cell == 0 {
        return Err(BuildError::markup(
            line,
            format!("cell `{cell}` is first in its row, so there is no edge to drag ahead of it"),
        ));
    }
    Ok(addr)
}

/// A vertical divider sits on the top edge of `row`. An optional `cell` in
/// that row decides where along the edge the handle is drawn.
fn vertical_target(node: &Node, grid: &GridLayout) -> Result<DividerTarget, BuildError> {
    let Some(row) = opt_name(node, "row")? else {
        return Err(BuildError::markup(node.line, "a vertical divider needs `row: <key>`"));
    };
    let r = resolve_row(node, grid, row)?;
    if r == 0 {
        return Err(BuildError::markup(
            prop_line(node, "row"),
            format!("row `{row}` is the first row, so there is no edge to drag above it"),
        ));
    }

    let cell = match opt_name(node, "cell")? {
        None => 0,
        Some(cell) => {
            let line = prop_line(node, "cell");
            match grid.locate_cell(cell) {
                Some(addr) if addr.row == r => addr.cell,
                Some(_) => {
                    return Err(BuildError::markup(line, format!("cell `{cell}` is not in row `{row}`")));
                }
                None => return Err(BuildError::markup(line, format!("unknown cell `{cell}`"))),
            }
        }
    };
    Ok(DividerTarget::new(r, cell))
}

fn resolve_row(node: &Node, grid: &GridLayout, row: &str) -> Result<usize, BuildError> {
    grid.locate_row(row)
        .ok_or_else(|| BuildError::markup(prop_line(node, "row"), format!("unknown row `{row}`")))
}

// ── Property helpers ──────────────────────────────────────────────────────

fn label(node: &Node) -> Result<Key, BuildError> {
    match node.label.as_deref() {
        Some(s) if !s.is_empty() => Ok(Key::from(s)),
        _ => Err(BuildError::markup(
            node.line,
            format!("`{}` needs a quoted key, e.g. {} \"name\"", node.kind, node.kind),
        )),
    }
}

fn check_props(node: &Node, allowed: &[&str]) -> Result<(), BuildError> {
    match node.props.iter().find(|p| !allowed.contains(&p.key.as_str())) {
        Some(p) => Err(BuildError::markup(
            p.line,
            format!("`{}` has no property `{}`", node.kind, p.key),
        )),
        None => Ok(()),
    }
}

fn prop_line(node: &Node, key: &str) -> usize {
    node.props.iter().rev().find(|p| p.key == key).map_or(node.line, |p| p.line)
}

fn wrong_kind(node: &Node, key: &str, expected: &str, got: &Value) -> BuildError {
    BuildError::markup(
        prop_line(node, key),
        format!("`{key}` expects {expected}, got {}", got.kind()),
    )
}

fn opt_f32(node: &Node, key: &str) -> Result<Option<f32>, BuildError> {
    match node.prop(key) {
        None => Ok(None),
        Some(Value::Number(v)) => Ok(Some(*v)),
        Some(other) => Err(wrong_kind(node, key, "a number", other)),
    }
}

fn opt_bool(node: &Node, key: &str) -> Result<Option<bool>, BuildError> {
    match node.prop(key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(wrong_kind(node, key, "true or false", other)),
    }
}

fn opt_name<'a>(node: &'a Node, key: &str) -> Result<Option<&'a str>, BuildError> {
    match node.prop(key) {
        None => Ok(None),
        Some(Value::Ident(s) | Value::Str(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(wrong_kind(node, key, "a name", other)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
