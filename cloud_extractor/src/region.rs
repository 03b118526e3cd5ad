//! Declarative selection rules for sky regions
//!
//! Each region of the first quadrant is described by a [`RegionRule`]: a set
//! of column thresholds that must all hold, plus exclusion clauses that drop
//! a row when every criterion in the clause holds. Rules are plain data, so
//! additional regions can come from configuration.

use std::fmt;

use dendro::{Catalog, StructureRecord};
use serde::{Deserialize, Serialize};

/// Default descendant limit for the positive- and negative-velocity regions
pub const DEFAULT_MAX_DESCENDANTS: usize = 30;

/// Default descendant limit for the low-velocity Perseus region
pub const PERSEUS_MAX_DESCENDANTS: usize = 10;

/// Highest `fractional_gain` a qualifying structure may have (exclusive)
pub const MAX_FRACTIONAL_GAIN: f64 = 0.81;

/// Catalog columns a rule can test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    VCen,
    VRms,
    XCen,
    YCen,
    AbsYCen,
    NDescendants,
    FractionalGain,
    OnEdge,
    Mass,
    Distance,
}

impl Column {
    /// Value of this column for a row; booleans map to 0 and 1
    pub fn value(&self, row: &StructureRecord) -> f64 {
        match self {
            Column::VCen => row.v_cen,
            Column::VRms => row.v_rms,
            Column::XCen => row.x_cen,
            Column::YCen => row.y_cen,
            Column::AbsYCen => row.y_cen.abs(),
            Column::NDescendants => row.n_descendants as f64,
            Column::FractionalGain => row.fractional_gain,
            Column::OnEdge => {
                if row.on_edge {
                    1.0
                } else {
                    0.0
                }
            }
            Column::Mass => row.mass,
            Column::Distance => row.distance,
        }
    }
}

/// Comparison operator of a criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparison {
    /// Apply the operator; any NaN operand yields false
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Lt => value < threshold,
            Comparison::Le => value <= threshold,
            Comparison::Gt => value > threshold,
            Comparison::Ge => value >= threshold,
            Comparison::Eq => value == threshold,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Eq => "==",
        }
    }
}

/// A single `column <op> threshold` test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub column: Column,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl Criterion {
    pub const fn new(column: Column, comparison: Comparison, threshold: f64) -> Self {
        Self {
            column,
            comparison,
            threshold,
        }
    }

    pub fn holds(&self, row: &StructureRecord) -> bool {
        self.comparison
            .holds(self.column.value(row), self.threshold)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} {}",
            self.column,
            self.comparison.symbol(),
            self.threshold
        )
    }
}

/// Conjunction of criteria; a row matching all of them is excluded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub reason: String,
    pub when: Vec<Criterion>,
}

impl Exclusion {
    pub fn matches(&self, row: &StructureRecord) -> bool {
        !self.when.is_empty() && self.when.iter().all(|c| c.holds(row))
    }
}

/// Named selection rule for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRule {
    pub name: String,

    /// All of these must hold
    pub require: Vec<Criterion>,

    /// A row matching any of these is dropped
    #[serde(default)]
    pub exclude: Vec<Exclusion>,
}

impl RegionRule {
    pub fn new(name: impl Into<String>, require: Vec<Criterion>) -> Self {
        Self {
            name: name.into(),
            require,
            exclude: Vec::new(),
        }
    }

    pub fn with_exclusion(mut self, reason: impl Into<String>, when: Vec<Criterion>) -> Self {
        self.exclude.push(Exclusion {
            reason: reason.into(),
            when,
        });
        self
    }

    /// Whether a row qualifies for this region
    pub fn matches(&self, row: &StructureRecord) -> bool {
        self.require.iter().all(|c| c.holds(row)) && !self.exclude.iter().any(|e| e.matches(row))
    }

    /// Copy of the rows that qualify
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        catalog.filter(|row| self.matches(row))
    }
}

impl fmt::Display for RegionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        let require: Vec<String> = self.require.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", require.join(" AND "))?;
        for exclusion in &self.exclude {
            let when: Vec<String> = exclusion.when.iter().map(|c| c.to_string()).collect();
            write!(f, " AND NOT ({})", when.join(" AND "))?;
        }
        Ok(())
    }
}

/// The three sky regions of the first quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Inner Galaxy, v >= 20 km/s; the distance ambiguity applies to most structures
    PositiveVelocity,
    /// Outer Galaxy, v <= -5 km/s; distances are unambiguous
    NegativeVelocity,
    /// Perseus Arm at low velocity near the plane; ambiguity applies to some structures
    LowVelocityPerseus,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::PositiveVelocity => write!(f, "positive-velocity"),
            Region::NegativeVelocity => write!(f, "negative-velocity"),
            Region::LowVelocityPerseus => write!(f, "low-velocity-perseus"),
        }
    }
}

fn not_on_edge() -> Criterion {
    Criterion::new(Column::OnEdge, Comparison::Eq, 0.0)
}

/// 1 < v_rms <= 10 km/s
fn linewidth_window() -> [Criterion; 2] {
    [
        Criterion::new(Column::VRms, Comparison::Gt, 1.0),
        Criterion::new(Column::VRms, Comparison::Le, 10.0),
    ]
}

fn tree_quality(max_descendants: usize) -> [Criterion; 2] {
    [
        Criterion::new(Column::NDescendants, Comparison::Lt, max_descendants as f64),
        Criterion::new(Column::FractionalGain, Comparison::Lt, MAX_FRACTIONAL_GAIN),
    ]
}

impl Region {
    /// Candidate selection rule for this region.
    ///
    /// The negative-velocity rule has no line-width or tree-quality criteria,
    /// so `max_descendants` does not affect it.
    pub fn selection_rule(&self, max_descendants: usize) -> RegionRule {
        use Column::{AbsYCen, VCen, XCen};
        use Comparison::{Ge, Le, Lt};

        match self {
            Region::PositiveVelocity => {
                let mut require = vec![Criterion::new(VCen, Ge, 20.0), not_on_edge()];
                require.extend(linewidth_window());
                require.extend(tree_quality(max_descendants));
                RegionRule::new(self.to_string(), require)
            }
            Region::NegativeVelocity => RegionRule::new(
                self.to_string(),
                vec![Criterion::new(VCen, Le, -5.0), not_on_edge()],
            )
            .with_exclusion(
                "extreme negative velocities near the Galactic centre",
                vec![
                    Criterion::new(VCen, Lt, -10.0),
                    Criterion::new(XCen, Lt, 20.0),
                ],
            ),
            Region::LowVelocityPerseus => {
                let mut require = vec![
                    Criterion::new(VCen, Ge, -5.0),
                    Criterion::new(VCen, Le, 20.0),
                    Criterion::new(AbsYCen, Le, 1.0),
                    Criterion::new(XCen, Ge, 35.0),
                    not_on_edge(),
                ];
                require.extend(linewidth_window());
                require.extend(tree_quality(max_descendants));
                RegionRule::new(self.to_string(), require)
            }
        }
    }

    /// Final mass (and distance) cut applied after properties are known
    pub fn final_cut(&self) -> RegionRule {
        use Column::{Distance, Mass};
        use Comparison::{Gt, Lt};

        let name = format!("{self} final cut");
        match self {
            Region::PositiveVelocity => RegionRule::new(name, vec![Criterion::new(Mass, Gt, 3e4)]),
            Region::NegativeVelocity => RegionRule::new(name, vec![Criterion::new(Mass, Gt, 3e3)]),
            Region::LowVelocityPerseus => RegionRule::new(
                name,
                vec![
                    Criterion::new(Mass, Gt, 3e4),
                    Criterion::new(Distance, Gt, 5.0),
                    Criterion::new(Distance, Lt, 14.0),
                ],
            ),
        }
    }

    /// Whether distances in this region need near/far disambiguation
    pub fn needs_disambiguation(&self) -> bool {
        !matches!(self, Region::NegativeVelocity)
    }

    /// Descendant limit used when none is given
    pub fn default_max_descendants(&self) -> usize {
        match self {
            Region::LowVelocityPerseus => PERSEUS_MAX_DESCENDANTS,
            _ => DEFAULT_MAX_DESCENDANTS,
        }
    }
}
